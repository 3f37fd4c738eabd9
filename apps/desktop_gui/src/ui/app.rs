use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::Scores;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::BoardModel;
use crate::ui::board::{BoardWidget, DragState};
use crate::ui::theme;

pub struct ChessGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    model: BoardModel,
    drag: Option<DragState>,
    server_url: String,
}

impl ChessGuiApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        initial_scores: Scores,
        server_url: String,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            model: BoardModel::new(initial_scores),
            drag: None,
            server_url,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.model.apply(event);
        }
    }

    fn dispatch(&mut self, cmd: BackendCommand) -> bool {
        let mut status = None;
        let queued = dispatch_backend_command(&self.cmd_tx, cmd, &mut status);
        if status.is_some() {
            self.model.set_status_line(status);
        }
        queued
    }

    fn show_header(&mut self, ctx: &egui::Context) {
        let mut reset_clicked = false;
        egui::TopBottomPanel::top("game_header").show(ctx, |ui| {
            let state = self.model.state();
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("Chess");
                ui.add_space(12.0);

                let banner_fill = if state.game_over {
                    theme::GAME_OVER_BANNER
                } else {
                    theme::IN_PROGRESS_BANNER
                };
                egui::Frame::NONE
                    .fill(banner_fill)
                    .corner_radius(5.0)
                    .inner_margin(egui::Margin::symmetric(10, 6))
                    .show(ui, |ui| {
                        let headline =
                            egui::RichText::new(state.headline()).color(egui::Color32::BLACK);
                        ui.label(if state.game_over {
                            headline.strong()
                        } else {
                            headline
                        });
                    });

                ui.label(format!("White score: {:.2}", state.scores.white));
                ui.label(format!("Black score: {:.2}", state.scores.black));

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let button = egui::Button::new(
                        egui::RichText::new("New game").color(egui::Color32::WHITE),
                    )
                    .fill(theme::RESET_BUTTON);
                    if ui.add(button).clicked() {
                        reset_clicked = true;
                    }
                });
            });
            ui.label(format!("Game status: {}", state.status_message));
            if let Some(status) = self.model.status_line() {
                ui.label(egui::RichText::new(status).weak());
            }
            ui.add_space(6.0);
        });

        if reset_clicked {
            let cmd = self.model.request_reset();
            self.dispatch(cmd);
        }
    }

    fn show_footer(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("connection_footer").show(ctx, |ui| {
            ui.label(egui::RichText::new(format!("Backend: {}", self.server_url)).small().weak());
        });
    }

    fn show_board(&mut self, ctx: &egui::Context) {
        let dropped = egui::CentralPanel::default()
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    BoardWidget::new(self.model.state(), self.model.pending(), &mut self.drag)
                        .show(ui)
                })
                .inner
            })
            .inner;

        if let Some((from, to)) = dropped {
            tracing::debug!(from = %from, to = %to, "piece dropped");
            if let Some(cmd) = self.model.drop_piece(from.clone(), to.clone()) {
                if !self.dispatch(cmd) {
                    self.model.apply(UiEvent::MoveSuperseded { from, to });
                }
            }
        }
    }
}

impl eframe::App for ChessGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_header(ctx);
        self.show_footer(ctx);
        self.show_board(ctx);

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
