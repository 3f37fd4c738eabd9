//! Reducer-like state transitions for the board screen.
//!
//! The confirmed `BoardState` is only ever replaced by backend events. A drop
//! the user just made is kept apart as a pending move, drawn on top of the
//! confirmed board until its response arrives; clearing it on rejection is
//! what rolls the piece back.

use std::sync::Arc;

use client_core::BoardState;
use shared::domain::{Scores, Square};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiEvent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMove {
    pub from: Square,
    pub to: Square,
}

impl PendingMove {
    fn is(&self, from: &Square, to: &Square) -> bool {
        &self.from == from && &self.to == to
    }
}

pub struct BoardModel {
    state: Arc<BoardState>,
    pending: Option<PendingMove>,
    status_line: Option<String>,
}

impl BoardModel {
    pub fn new(initial_scores: Scores) -> Self {
        Self {
            state: Arc::new(BoardState::initial(initial_scores)),
            pending: None,
            status_line: None,
        }
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn pending(&self) -> Option<&PendingMove> {
        self.pending.as_ref()
    }

    pub fn status_line(&self) -> Option<&str> {
        self.status_line.as_deref()
    }

    pub fn set_status_line(&mut self, status: Option<String>) {
        self.status_line = status;
    }

    /// The widget's release handler. `None` means the drop is refused and no
    /// request is made.
    pub fn drop_piece(&mut self, from: Square, to: Square) -> Option<BackendCommand> {
        if !self.state.accepts_drop(&from, &to) {
            if self.state.game_over {
                self.status_line = Some("The game is over; press Reset to play again".into());
            }
            return None;
        }
        self.pending = Some(PendingMove {
            from: from.clone(),
            to: to.clone(),
        });
        self.status_line = None;
        Some(BackendCommand::SubmitMove { from, to })
    }

    pub fn request_reset(&mut self) -> BackendCommand {
        self.status_line = Some("Starting a new game...".into());
        BackendCommand::Reset
    }

    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => self.status_line = Some(message),
            UiEvent::Error(error) => self.report(&error),
            UiEvent::MoveApplied { from, to, state } => {
                self.clear_pending(&from, &to);
                self.state = state;
            }
            UiEvent::MoveRejected { from, to, error } => {
                self.clear_pending(&from, &to);
                self.report(&error);
            }
            UiEvent::MoveSuperseded { from, to } => self.clear_pending(&from, &to),
            UiEvent::ResetApplied(state) => {
                self.pending = None;
                self.state = state;
                self.status_line = None;
            }
            UiEvent::ResetFailed(error) => self.report(&error),
        }
    }

    fn report(&mut self, error: &UiError) {
        tracing::warn!(
            category = ?error.category(),
            context = ?error.context(),
            message = error.message(),
            "backend request failed"
        );
        self.status_line = Some(error.summary());
    }

    fn clear_pending(&mut self, from: &Square, to: &Square) {
        if self
            .pending
            .as_ref()
            .is_some_and(|pending| pending.is(from, to))
        {
            self.pending = None;
        }
    }
}
