use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{load_settings, GameSession, MoveOutcome, ResetOutcome};
use shared::domain::Square;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

mod render;

use render::{render_board, render_summary};

#[derive(Parser, Debug)]
struct Cli {
    /// Backend base url; overrides the settings file and environment.
    #[arg(long)]
    server_url: Option<String>,
    /// Settings file (defaults to ./chess_client.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive session on stdin (default).
    Play,
    /// Ask the backend to start a new game and exit.
    Reset,
}

#[derive(Debug, PartialEq, Eq)]
enum SessionCommand {
    Move { from: Square, to: Square },
    Reset,
    Show,
    Help,
    Quit,
}

const HELP: &str = "commands: <from> <to> | move <from> <to> | e2e4 | reset | show | help | quit";

fn parse_command(line: &str) -> Result<SessionCommand, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        ["reset"] => Ok(SessionCommand::Reset),
        ["show"] | ["board"] => Ok(SessionCommand::Show),
        ["help"] | ["?"] => Ok(SessionCommand::Help),
        ["quit"] | ["exit"] => Ok(SessionCommand::Quit),
        ["move", from, to] | [from, to] => squares(from, to),
        [joined] if joined.len() == 4 && joined.is_ascii() => squares(&joined[..2], &joined[2..]),
        [] => Err("empty command".to_string()),
        _ => Err(format!("unrecognized command '{}'; {HELP}", line.trim())),
    }
}

fn squares(from: &str, to: &str) -> Result<SessionCommand, String> {
    let from = Square::new(from.to_ascii_lowercase());
    let to = Square::new(to.to_ascii_lowercase());
    for square in [&from, &to] {
        if square.coords().is_none() {
            return Err(format!("'{square}' is not a square"));
        }
    }
    Ok(SessionCommand::Move { from, to })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings(cli.config.as_deref()).context("failed to load settings")?;
    if let Some(server_url) = &cli.server_url {
        settings = settings
            .with_server_url(server_url)
            .context("invalid --server-url")?;
    }
    let session = GameSession::connect(&settings).context("failed to build backend client")?;
    tracing::info!(server_url = %settings.server_url, "backend configured");

    match cli.command.unwrap_or(Command::Play) {
        Command::Reset => match session.reset().await {
            ResetOutcome::Applied(_) => println!("New game started."),
            ResetOutcome::Failed(err) => anyhow::bail!("reset failed: {err}"),
            ResetOutcome::Superseded => {}
        },
        Command::Play => play(&session).await?,
    }

    Ok(())
}

async fn play(session: &GameSession<client_core::HttpChessBackend>) -> Result<()> {
    let state = session.snapshot().await;
    print!("{}{}", render_board(&state), render_summary(&state));
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        match command {
            SessionCommand::Move { from, to } => {
                let current = session.snapshot().await;
                if !current.accepts_drop(&from, &to) {
                    println!("Move not accepted: {}", current.headline());
                    continue;
                }
                match session.submit_move(from, to).await {
                    MoveOutcome::Applied(state) => {
                        print!("{}{}", render_board(&state), render_summary(&state));
                    }
                    MoveOutcome::Rejected(err) => println!("Move not applied: {err}"),
                    MoveOutcome::Superseded => {}
                }
            }
            SessionCommand::Reset => match session.reset().await {
                ResetOutcome::Applied(state) => {
                    print!("{}{}", render_board(&state), render_summary(&state));
                }
                ResetOutcome::Failed(err) => println!("Reset failed: {err}"),
                ResetOutcome::Superseded => {}
            },
            SessionCommand::Show => {
                let state = session.snapshot().await;
                print!("{}{}", render_board(&state), render_summary(&state));
            }
            SessionCommand::Help => println!("{HELP}"),
            SessionCommand::Quit => break,
        }
    }

    Ok(())
}
