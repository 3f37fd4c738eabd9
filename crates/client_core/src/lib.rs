use std::sync::Arc;

use shared::{
    domain::{Scores, Square},
    protocol::MoveRequest,
};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

pub mod config;
pub mod error;
pub mod store;
pub mod transport;

pub use config::{load_settings, Settings, SettingsError};
pub use error::ClientError;
pub use store::{
    BoardState, BoardStore, GamePhase, MoveOutcome, ResetOutcome, SquareHighlight, Ticket,
};
pub use transport::{ChessBackend, HttpChessBackend};

/// Owns the board store and the backend it is kept in sync with.
///
/// The store lock is held only while starting or applying a request, never
/// across the network call, so overlapping requests are possible. A response
/// lands only if no newer request of its kind was issued and nothing issued
/// after it has landed; failed requests displace nothing.
pub struct GameSession<B: ChessBackend> {
    backend: B,
    store: Mutex<BoardStore>,
}

impl GameSession<HttpChessBackend> {
    pub fn connect(settings: &Settings) -> Result<Self, ClientError> {
        Ok(Self::new(
            HttpChessBackend::from_settings(settings)?,
            settings.initial_scores,
        ))
    }
}

impl<B: ChessBackend> GameSession<B> {
    pub fn new(backend: B, initial_scores: Scores) -> Self {
        Self {
            backend,
            store: Mutex::new(BoardStore::new(initial_scores)),
        }
    }

    pub async fn snapshot(&self) -> Arc<BoardState> {
        self.store.lock().await.snapshot()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Asks the backend for a new game. The board goes back to its initial
    /// state only if the backend acknowledged the reset.
    pub async fn reset(&self) -> ResetOutcome {
        let prepared = self.prepare_reset().await;
        self.send_reset(prepared).await
    }

    /// Takes the reset's ticket without contacting the backend.
    pub async fn prepare_reset(&self) -> PreparedReset {
        let ticket = self.store.lock().await.begin_reset();
        PreparedReset { ticket }
    }

    pub async fn send_reset(&self, prepared: PreparedReset) -> ResetOutcome {
        let ticket = prepared.ticket;
        debug!(ticket = ticket.value(), "reset: requesting new game");

        if let Err(err) = self.backend.reset().await {
            error!(ticket = ticket.value(), error = %err, "reset: backend failed");
            return ResetOutcome::Failed(err);
        }

        let outcome = self.store.lock().await.apply_reset(ticket);
        match &outcome {
            ResetOutcome::Applied(_) => info!(ticket = ticket.value(), "reset: new game started"),
            ResetOutcome::Superseded => debug!(
                ticket = ticket.value(),
                "reset: acknowledgement superseded by a newer request"
            ),
            ResetOutcome::Failed(_) => {}
        }
        outcome
    }

    /// Sends a move to the backend. Refused without a network call once the
    /// game is over. Every failure leaves the board as it was.
    pub async fn submit_move(&self, from: Square, to: Square) -> MoveOutcome {
        match self.prepare_move(from, to).await {
            Ok(prepared) => self.send_move(prepared).await,
            Err(err) => MoveOutcome::Rejected(err),
        }
    }

    /// Builds the request from the current snapshot and takes its ticket.
    pub async fn prepare_move(
        &self,
        from: Square,
        to: Square,
    ) -> Result<PreparedMove, ClientError> {
        let begun = self.store.lock().await.begin_move(from, to);
        match begun {
            Ok((ticket, request)) => Ok(PreparedMove { ticket, request }),
            Err(err) => {
                warn!(error = %err, "move: refused locally");
                Err(err)
            }
        }
    }

    pub async fn send_move(&self, prepared: PreparedMove) -> MoveOutcome {
        let PreparedMove { ticket, request } = prepared;
        debug!(
            ticket = ticket.value(),
            from = %request.from,
            to = %request.to,
            "move: submitting"
        );

        let response = match self.backend.submit_move(&request).await {
            Ok(response) => response,
            Err(err) => {
                error!(
                    ticket = ticket.value(),
                    from = %request.from,
                    to = %request.to,
                    error = %err,
                    "move: backend call failed"
                );
                return MoveOutcome::Rejected(err);
            }
        };

        let outcome = self.store.lock().await.apply_move(ticket, &response);
        match &outcome {
            MoveOutcome::Applied(state) => info!(
                ticket = ticket.value(),
                from = %request.from,
                to = %request.to,
                position = %state.position,
                game_over = state.game_over,
                "move: applied"
            ),
            MoveOutcome::Rejected(ClientError::InvalidMove) => warn!(
                ticket = ticket.value(),
                from = %request.from,
                to = %request.to,
                "move: backend reported invalid move"
            ),
            MoveOutcome::Rejected(err) => error!(
                ticket = ticket.value(),
                error = %err,
                "move: backend response could not be applied"
            ),
            MoveOutcome::Superseded => debug!(
                ticket = ticket.value(),
                "move: response superseded by a newer request"
            ),
        }
        outcome
    }
}

/// A move holding its ticket, not yet sent.
#[derive(Debug)]
pub struct PreparedMove {
    ticket: Ticket,
    request: MoveRequest,
}

impl PreparedMove {
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }
}

/// A reset holding its ticket, not yet sent.
#[derive(Debug, Clone, Copy)]
pub struct PreparedReset {
    ticket: Ticket,
}

impl PreparedReset {
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
