//! Backend commands queued from UI to backend worker.

use shared::domain::Square;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    SubmitMove { from: Square, to: Square },
    Reset,
}
