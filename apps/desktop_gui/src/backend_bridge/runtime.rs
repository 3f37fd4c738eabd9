//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{
    ChessBackend, ClientError, GameSession, MoveOutcome, PreparedMove, PreparedReset,
    ResetOutcome, Settings,
};
use crossbeam_channel::{Receiver, Sender};
use shared::domain::Square;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Each command takes its ticket on the worker thread and then runs as its
/// own task, so a slow response never holds up the next gesture. The session
/// decides which response is allowed to land.
pub fn launch(settings: Settings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let session = match GameSession::connect(&settings) {
            Ok(session) => Arc::new(session),
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_client_error(
                    UiErrorContext::BackendStartup,
                    &err,
                )));
                tracing::error!(error = %err, "failed to build backend client");
                return;
            }
        };
        let _ = ui_tx.try_send(UiEvent::Info(format!(
            "Connected to {}",
            settings.server_url
        )));

        while let Ok(cmd) = cmd_rx.recv() {
            // Tickets are taken here, in the order the gestures arrived.
            let request = runtime.block_on(prepare_command(&session, cmd));
            let session = Arc::clone(&session);
            let ui_tx = ui_tx.clone();
            runtime.spawn(async move {
                let event = send_command(&session, request).await;
                if ui_tx.try_send(event).is_err() {
                    tracing::warn!("ui event queue unavailable; dropping backend event");
                }
            });
        }
        tracing::info!("ui command queue closed; backend worker exiting");
    });
}

enum PreparedCommand {
    Move {
        from: Square,
        to: Square,
        prepared: Result<PreparedMove, ClientError>,
    },
    Reset(PreparedReset),
}

async fn prepare_command<B: ChessBackend>(
    session: &GameSession<B>,
    cmd: BackendCommand,
) -> PreparedCommand {
    match cmd {
        BackendCommand::SubmitMove { from, to } => {
            let prepared = session.prepare_move(from.clone(), to.clone()).await;
            PreparedCommand::Move { from, to, prepared }
        }
        BackendCommand::Reset => PreparedCommand::Reset(session.prepare_reset().await),
    }
}

async fn send_command<B: ChessBackend>(
    session: &GameSession<B>,
    request: PreparedCommand,
) -> UiEvent {
    match request {
        PreparedCommand::Move { from, to, prepared } => {
            let outcome = match prepared {
                Ok(prepared) => session.send_move(prepared).await,
                Err(err) => MoveOutcome::Rejected(err),
            };
            move_event(from, to, outcome)
        }
        PreparedCommand::Reset(prepared) => reset_event(session.send_reset(prepared).await),
    }
}

pub fn move_event(from: Square, to: Square, outcome: MoveOutcome) -> UiEvent {
    match outcome {
        MoveOutcome::Applied(state) => UiEvent::MoveApplied { from, to, state },
        MoveOutcome::Rejected(err) => UiEvent::MoveRejected {
            from,
            to,
            error: UiError::from_client_error(UiErrorContext::Move, &err),
        },
        MoveOutcome::Superseded => UiEvent::MoveSuperseded { from, to },
    }
}

pub fn reset_event(outcome: ResetOutcome) -> UiEvent {
    match outcome {
        ResetOutcome::Applied(state) => UiEvent::ResetApplied(state),
        ResetOutcome::Failed(err) => {
            UiEvent::ResetFailed(UiError::from_client_error(UiErrorContext::Reset, &err))
        }
        ResetOutcome::Superseded => UiEvent::Info("Reset superseded by a newer request".into()),
    }
}
