use reqwest::StatusCode;
use shared::error::{DomainError, NotationError};
use thiserror::Error;

use crate::config::SettingsError;

/// Every way a reset or move can fail. None of these change the board.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("backend rejected the move")]
    InvalidMove,
    #[error("malformed backend response: {0}")]
    Decode(String),
    #[error("backend board could not be transcoded: {0}")]
    Notation(#[from] NotationError),
    #[error("game is over; reset to play again")]
    GameOver,
    #[error("invalid backend url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

impl From<DomainError> for ClientError {
    fn from(value: DomainError) -> Self {
        Self::Decode(value.to_string())
    }
}
