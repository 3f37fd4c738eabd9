//! Board-grid to positional-notation transcoding.
//!
//! The backend reports the board as eight newline-separated rows of eight
//! characters, `.` for an empty square. Its letter case is the reverse of
//! positional notation (uppercase there is Black), so every piece letter is
//! case-inverted on the way through.

use std::fmt;

use serde::Serialize;

use crate::{domain::Side, error::NotationError};

pub const START_POSITION: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Castling, en-passant and move counters are never tracked locally.
const FIXED_TRAILER: &str = "KQkq - 0 1";
const EMPTY_SQUARE: char = '.';
const RANK_DELIMITER: &str = "/";
const PIECE_LETTERS: &str = "pnbrqkPNBRQK";

/// Transcodes a single backend row into one rank group.
pub fn transcode_row(row: &str) -> Result<String, NotationError> {
    transcode_row_at(0, row)
}

/// Transcodes a whole backend grid into the occupancy field.
pub fn transcode_grid(grid: &str) -> Result<String, NotationError> {
    let rows: Vec<&str> = grid
        .lines()
        .map(str::trim)
        .filter(|row| !row.is_empty())
        .collect();
    if rows.len() != 8 {
        return Err(NotationError::RankCount(rows.len()));
    }

    let groups = rows
        .iter()
        .enumerate()
        .map(|(index, row)| transcode_row_at(index, row))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(groups.join(RANK_DELIMITER))
}

fn transcode_row_at(index: usize, row: &str) -> Result<String, NotationError> {
    let row = row.trim();
    let squares = row.chars().count();
    if squares != 8 {
        return Err(NotationError::RowLength {
            row: index,
            squares,
        });
    }

    let mut group = String::with_capacity(8);
    let mut empty_run = 0u8;
    for square in row.chars() {
        if square == EMPTY_SQUARE {
            empty_run += 1;
            continue;
        }
        if !PIECE_LETTERS.contains(square) {
            return Err(NotationError::UnexpectedSquare {
                row: index,
                found: square,
            });
        }
        flush_run(&mut group, &mut empty_run);
        group.push(invert_case(square));
    }
    flush_run(&mut group, &mut empty_run);
    Ok(group)
}

fn flush_run(group: &mut String, empty_run: &mut u8) {
    if *empty_run > 0 {
        group.push(char::from(b'0' + *empty_run));
        *empty_run = 0;
    }
}

fn invert_case(letter: char) -> char {
    if letter.is_ascii_uppercase() {
        letter.to_ascii_lowercase()
    } else {
        letter.to_ascii_uppercase()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// A piece as positional notation sees it: uppercase letters are White.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub side: Side,
    pub kind: PieceKind,
}

impl Piece {
    pub fn from_notation(letter: char) -> Option<Self> {
        let kind = match letter.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        let side = if letter.is_ascii_uppercase() {
            Side::White
        } else {
            Side::Black
        };
        Some(Self { side, kind })
    }

    pub fn notation_letter(self) -> char {
        let letter = match self.kind {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match self.side {
            Side::White => letter.to_ascii_uppercase(),
            Side::Black => letter,
        }
    }
}

/// Expanded occupancy, row 0 is rank 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement([[Option<Piece>; 8]; 8]);

impl Placement {
    /// `file` and `rank` are zero-based from `a1`.
    pub fn piece_at(&self, file: u8, rank: u8) -> Option<Piece> {
        if file > 7 || rank > 7 {
            return None;
        }
        self.0[usize::from(7 - rank)][usize::from(file)]
    }
}

/// Full positional-notation string handed to the board widgets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Position(String);

impl Position {
    pub fn start() -> Self {
        Self(START_POSITION.to_string())
    }

    pub fn from_grid(grid: &str, side_to_move: Side) -> Result<Self, NotationError> {
        let occupancy = transcode_grid(grid)?;
        Ok(Self(format!(
            "{occupancy} {} {FIXED_TRAILER}",
            side_to_move.notation_letter()
        )))
    }

    pub fn parse(raw: &str) -> Result<Self, NotationError> {
        let mut fields = raw.split_whitespace();
        let occupancy = fields
            .next()
            .ok_or(NotationError::MissingField("occupancy"))?;
        let side = fields
            .next()
            .ok_or(NotationError::MissingField("side to move"))?;
        expand_occupancy(occupancy)?;
        if side != "w" && side != "b" {
            return Err(NotationError::InvalidSideToMove(side.to_string()));
        }
        Ok(Self(raw.trim().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn occupancy(&self) -> &str {
        self.0.split_whitespace().next().unwrap_or_default()
    }

    pub fn side_to_move(&self) -> Option<Side> {
        match self.0.split_whitespace().nth(1)? {
            "w" => Some(Side::White),
            "b" => Some(Side::Black),
            _ => None,
        }
    }

    pub fn placement(&self) -> Result<Placement, NotationError> {
        expand_occupancy(self.occupancy())
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn expand_occupancy(occupancy: &str) -> Result<Placement, NotationError> {
    let groups: Vec<&str> = occupancy.split(RANK_DELIMITER).collect();
    if groups.len() != 8 {
        return Err(NotationError::RankCount(groups.len()));
    }

    let mut squares = [[None; 8]; 8];
    for (row, group) in groups.iter().enumerate() {
        let mut file = 0usize;
        for symbol in group.chars() {
            if let Some(run) = symbol.to_digit(10).filter(|run| (1..=8).contains(run)) {
                file += run as usize;
                continue;
            }
            let piece = Piece::from_notation(symbol).ok_or(NotationError::UnexpectedSquare {
                row,
                found: symbol,
            })?;
            if file < 8 {
                squares[row][file] = Some(piece);
            }
            file += 1;
        }
        if file != 8 {
            return Err(NotationError::RowLength { row, squares: file });
        }
    }
    Ok(Placement(squares))
}

#[cfg(test)]
#[path = "tests/notation_tests.rs"]
mod tests;
