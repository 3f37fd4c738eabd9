use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("unknown side '{0}'")]
    UnknownSide(String),
}

/// Rows are counted from the top of the board (rank 8 is row 0).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("row {row} has {squares} squares, expected 8")]
    RowLength { row: usize, squares: usize },
    #[error("unexpected square '{found}' in row {row}")]
    UnexpectedSquare { row: usize, found: char },
    #[error("board has {0} rows, expected 8")]
    RankCount(usize),
    #[error("position is missing the {0} field")]
    MissingField(&'static str),
    #[error("invalid side to move '{0}'")]
    InvalidSideToMove(String),
}
