use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use client_core::{load_settings, Settings};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::ChessGuiApp;

const APP_DIR: &str = "remote_chess";
const SETTINGS_FILE: &str = "settings.toml";

#[derive(Parser, Debug)]
#[command(name = "chess-gui", about = "Drag-and-drop chessboard backed by a remote move server")]
struct Args {
    /// Overrides the configured backend base URL.
    #[arg(long)]
    server_url: Option<String>,
    /// Settings file; defaults to the per-user config directory when present.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE))
}

fn settings_path(explicit: Option<&Path>, fallback: Option<PathBuf>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => fallback.filter(|path| path.is_file()),
    }
}

fn resolve_settings(args: &Args) -> Result<Settings> {
    let path = settings_path(args.config.as_deref(), default_settings_path());
    let mut settings = load_settings(path.as_deref()).context("failed to load settings")?;
    if let Some(server_url) = &args.server_url {
        settings = settings
            .with_server_url(server_url)
            .context("invalid --server-url")?;
    }
    Ok(settings)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let args = Args::parse();
    let settings = resolve_settings(&args)?;
    tracing::info!(server_url = %settings.server_url, "starting chess gui");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    let initial_scores = settings.initial_scores;
    let server_url = settings.server_url.clone();
    backend_bridge::runtime::launch(settings, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Chess")
            .with_inner_size([720.0, 820.0])
            .with_min_inner_size([420.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Chess",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(ChessGuiApp::new(
                cmd_tx,
                ui_rx,
                initial_scores,
                server_url,
            )))
        }),
    )
    .map_err(|err| anyhow!("gui exited with an error: {err}"))
}
