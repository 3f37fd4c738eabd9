use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Lowercase form sent to the backend as `currentTurn`.
    pub fn wire_name(self) -> &'static str {
        match self {
            Side::White => "white",
            Side::Black => "black",
        }
    }

    /// Side-to-move field of positional notation.
    pub fn notation_letter(self) -> char {
        match self {
            Side::White => 'w',
            Side::Black => 'b',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Side::White => "White",
            Side::Black => "Black",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Side {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "white" | "w" => Ok(Side::White),
            "black" | "b" => Ok(Side::Black),
            _ => Err(DomainError::UnknownSide(s.to_string())),
        }
    }
}

/// Algebraic square identifier (`e2`, `h8`). Carried as-is between the
/// widget and the backend; only the widgets ever look inside it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Square(pub String);

impl Square {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// `file` and `rank` are zero-based, `(0, 0)` is `a1`.
    pub fn from_coords(file: u8, rank: u8) -> Option<Self> {
        if file > 7 || rank > 7 {
            return None;
        }
        Some(Self(format!("{}{}", (b'a' + file) as char, rank + 1)))
    }

    pub fn coords(&self) -> Option<(u8, u8)> {
        let bytes = self.0.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].to_ascii_lowercase().checked_sub(b'a')?;
        let rank = bytes[1].checked_sub(b'1')?;
        (file < 8 && rank < 8).then_some((file, rank))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Square {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Backend-computed scores; never interpreted locally.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub white: f64,
    pub black: f64,
}

impl Scores {
    pub fn new(white: f64, black: f64) -> Self {
        Self { white, black }
    }
}

impl Default for Scores {
    fn default() -> Self {
        Self::new(38.0, 38.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastMove {
    pub from: Square,
    pub to: Square,
}

impl LastMove {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }
}
