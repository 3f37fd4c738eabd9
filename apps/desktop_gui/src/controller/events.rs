//! Backend-to-UI events and error modeling for the board controller.

use std::sync::Arc;

use client_core::{BoardState, ClientError};
use shared::domain::Square;

pub enum UiEvent {
    Info(String),
    Error(UiError),
    MoveApplied {
        from: Square,
        to: Square,
        state: Arc<BoardState>,
    },
    MoveRejected {
        from: Square,
        to: Square,
        error: UiError,
    },
    /// A newer request was issued before this move's response arrived.
    MoveSuperseded {
        from: Square,
        to: Square,
    },
    ResetApplied(Arc<BoardState>),
    ResetFailed(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Backend,
    InvalidMove,
    GameOver,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Move,
    Reset,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_client_error(context: UiErrorContext, err: &ClientError) -> Self {
        let category = match err {
            ClientError::Transport(_) => UiErrorCategory::Transport,
            ClientError::Status { .. } => UiErrorCategory::Backend,
            ClientError::InvalidMove => UiErrorCategory::InvalidMove,
            ClientError::GameOver => UiErrorCategory::GameOver,
            ClientError::Decode(_) | ClientError::Notation(_) => UiErrorCategory::Validation,
            ClientError::InvalidUrl(_) | ClientError::Settings(_) => UiErrorCategory::Unknown,
        };
        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self {
            category: UiErrorCategory::Unknown,
            context,
            message: message.into(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Short status-line text; the board itself is the main error signal.
    pub fn summary(&self) -> String {
        let action = match self.context {
            UiErrorContext::BackendStartup => "Backend startup failed",
            UiErrorContext::Move => "Move not applied",
            UiErrorContext::Reset => "Reset failed",
        };
        match self.category {
            UiErrorCategory::InvalidMove => format!("{action}: illegal move"),
            UiErrorCategory::GameOver => format!("{action}: the game is over"),
            UiErrorCategory::Transport => format!("{action}: server unreachable"),
            _ => format!("{action}: {}", self.message),
        }
    }
}
