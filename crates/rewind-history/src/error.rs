/// Errors raised while constructing or configuring a history.
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HistoryError {
    /// A history must be able to hold at least one past snapshot.
    #[error("history capacity must be at least 1")]
    ZeroCapacity,
}
