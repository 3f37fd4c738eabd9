use serde::{Deserialize, Serialize};

use crate::{
    domain::{Side, Square},
    notation::Position,
};

pub const RESET_PATH: &str = "api/chess";
pub const MOVE_PATH: &str = "api/chess/move";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    pub current_position: Position,
    pub current_turn: Side,
}

/// Move resolution as reported by the backend. An invalid move may come back
/// with nothing but `validMove`, so every other field is optional here and
/// checked only when the move is applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveResponse {
    pub valid_move: bool,
    #[serde(default)]
    pub fen: Option<String>,
    #[serde(default)]
    pub current_turn: Option<String>,
    /// Game-over flag; absent and `null` both mean the game goes on.
    #[serde(default)]
    pub status: Option<bool>,
    #[serde(default)]
    pub last_move_from: Option<Square>,
    #[serde(default)]
    pub last_move_to: Option<Square>,
    #[serde(default)]
    pub white_score: Option<f64>,
    #[serde(default)]
    pub black_score: Option<f64>,
}

impl MoveResponse {
    pub fn is_game_over(&self) -> bool {
        self.status.unwrap_or(false)
    }
}
