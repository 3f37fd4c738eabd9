//! Board-state store: the single source of truth the widgets render from.
//!
//! The snapshot is never patched. An applied move or reset swaps in a whole
//! new `BoardState`. Each request takes a ticket, and a response is dropped
//! once a newer request of its kind was issued or a later one has landed.

use std::{collections::BTreeMap, sync::Arc};

use shared::{
    domain::{LastMove, Scores, Side, Square},
    notation::Position,
    protocol::{MoveRequest, MoveResponse},
};

use crate::error::ClientError;

pub const IN_PROGRESS_MESSAGE: &str = "Game in progress";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    InProgress,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SquareHighlight {
    LastMove,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoardState {
    pub position: Position,
    pub turn: Side,
    pub last_move: Option<LastMove>,
    pub scores: Scores,
    pub game_over: bool,
    pub status_message: String,
}

impl BoardState {
    pub fn initial(scores: Scores) -> Self {
        Self {
            position: Position::start(),
            turn: Side::White,
            last_move: None,
            scores,
            game_over: false,
            status_message: IN_PROGRESS_MESSAGE.to_string(),
        }
    }

    fn from_response(response: &MoveResponse) -> Result<Self, ClientError> {
        let grid = response
            .fen
            .as_deref()
            .ok_or_else(|| missing_field("fen"))?;
        let turn: Side = response
            .current_turn
            .as_deref()
            .ok_or_else(|| missing_field("currentTurn"))?
            .parse()?;
        let white = response
            .white_score
            .ok_or_else(|| missing_field("whiteScore"))?;
        let black = response
            .black_score
            .ok_or_else(|| missing_field("blackScore"))?;
        let last_move = match (&response.last_move_from, &response.last_move_to) {
            (Some(from), Some(to)) => Some(LastMove::new(from.clone(), to.clone())),
            _ => None,
        };
        let game_over = response.is_game_over();
        let status_message = if game_over {
            win_message(turn.opposite())
        } else {
            IN_PROGRESS_MESSAGE.to_string()
        };

        Ok(Self {
            position: Position::from_grid(grid, turn)?,
            turn,
            last_move,
            scores: Scores::new(white, black),
            game_over,
            status_message,
        })
    }

    pub fn phase(&self) -> GamePhase {
        if self.game_over {
            GamePhase::GameOver
        } else {
            GamePhase::InProgress
        }
    }

    pub fn turn_label(&self) -> String {
        format!("Current turn: {}", self.turn)
    }

    /// Banner line: the result once the game is over, otherwise whose turn it is.
    pub fn headline(&self) -> String {
        if self.game_over {
            self.status_message.clone()
        } else {
            self.turn_label()
        }
    }

    pub fn highlights(&self) -> BTreeMap<Square, SquareHighlight> {
        let mut squares = BTreeMap::new();
        if let Some(last_move) = &self.last_move {
            squares.insert(last_move.from.clone(), SquareHighlight::LastMove);
            squares.insert(last_move.to.clone(), SquareHighlight::LastMove);
        }
        squares
    }

    /// Drop handler for the board widgets: whether a released piece may be
    /// sent to the backend at all.
    pub fn accepts_drop(&self, from: &Square, to: &Square) -> bool {
        !self.game_over && from != to
    }
}

fn missing_field(name: &str) -> ClientError {
    ClientError::Decode(format!("valid move response is missing '{name}'"))
}

pub fn win_message(winner: Side) -> String {
    format!("{winner} wins!")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
pub enum MoveOutcome {
    Applied(Arc<BoardState>),
    /// The board is unchanged.
    Rejected(ClientError),
    /// A newer move was issued, or a later request already landed, before
    /// this response arrived.
    Superseded,
}

#[derive(Debug)]
pub enum ResetOutcome {
    Applied(Arc<BoardState>),
    Failed(ClientError),
    Superseded,
}

/// Tickets come from one counter shared by moves and resets. A response may
/// replace the snapshot only while its ticket is the newest of its kind and
/// nothing issued after it has landed yet. Failed requests never land, so
/// they displace nothing.
#[derive(Debug)]
pub struct BoardStore {
    state: Arc<BoardState>,
    initial_scores: Scores,
    latest_ticket: Ticket,
    latest_move: Ticket,
    latest_reset: Ticket,
    last_landed: Ticket,
}

impl BoardStore {
    pub fn new(initial_scores: Scores) -> Self {
        Self {
            state: Arc::new(BoardState::initial(initial_scores)),
            initial_scores,
            latest_ticket: Ticket(0),
            latest_move: Ticket(0),
            latest_reset: Ticket(0),
            last_landed: Ticket(0),
        }
    }

    pub fn snapshot(&self) -> Arc<BoardState> {
        Arc::clone(&self.state)
    }

    pub fn latest_ticket(&self) -> Ticket {
        self.latest_ticket
    }

    fn issue_ticket(&mut self) -> Ticket {
        self.latest_ticket = Ticket(self.latest_ticket.0 + 1);
        self.latest_ticket
    }

    fn land(&mut self, ticket: Ticket, next: BoardState) -> Arc<BoardState> {
        self.state = Arc::new(next);
        self.last_landed = ticket;
        self.snapshot()
    }

    /// Builds the backend request for a move. Refused locally once the game
    /// is over, in which case no ticket is issued.
    pub fn begin_move(
        &mut self,
        from: Square,
        to: Square,
    ) -> Result<(Ticket, MoveRequest), ClientError> {
        if self.state.game_over {
            return Err(ClientError::GameOver);
        }
        let request = MoveRequest {
            from,
            to,
            current_position: self.state.position.clone(),
            current_turn: self.state.turn,
        };
        let ticket = self.issue_ticket();
        self.latest_move = ticket;
        Ok((ticket, request))
    }

    pub fn begin_reset(&mut self) -> Ticket {
        let ticket = self.issue_ticket();
        self.latest_reset = ticket;
        ticket
    }

    pub fn apply_move(&mut self, ticket: Ticket, response: &MoveResponse) -> MoveOutcome {
        if ticket != self.latest_move || self.last_landed > ticket {
            return MoveOutcome::Superseded;
        }
        if !response.valid_move {
            return MoveOutcome::Rejected(ClientError::InvalidMove);
        }
        match BoardState::from_response(response) {
            Ok(next) => MoveOutcome::Applied(self.land(ticket, next)),
            Err(err) => MoveOutcome::Rejected(err),
        }
    }

    pub fn apply_reset(&mut self, ticket: Ticket) -> ResetOutcome {
        if ticket != self.latest_reset || self.last_landed > ticket {
            return ResetOutcome::Superseded;
        }
        let initial = BoardState::initial(self.initial_scores);
        ResetOutcome::Applied(self.land(ticket, initial))
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
