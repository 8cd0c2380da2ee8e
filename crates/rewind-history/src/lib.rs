/// Bounded undo/redo history over whole-value snapshots.
///
/// Provides a `HistoryManager` that keeps a capped list of past snapshots,
/// the present snapshot, and the snapshots available for redo. An
/// `EditSession` wraps the manager with the dirty/saved bookkeeping an
/// editor surface needs.
pub mod config;
pub mod eq;
pub mod error;
pub mod manager;
pub mod session;

pub use config::HistoryConfig;
pub use eq::{SnapshotEq, ValueEq};
pub use error::HistoryError;
pub use manager::HistoryManager;
pub use session::EditSession;
