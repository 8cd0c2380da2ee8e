/// Editor-facing wrapper that pairs a history with save state.
use crate::config::HistoryConfig;
use crate::eq::{SnapshotEq, ValueEq};
use crate::error::HistoryError;
use crate::manager::HistoryManager;

/// One editing session: the snapshot history plus a dirty flag.
///
/// Committed edits and undo/redo steps mark the session dirty;
/// `mark_saved` makes the current state the new undo baseline.
#[derive(Debug)]
pub struct EditSession<T, E = ValueEq> {
    history: HistoryManager<T, E>,
    dirty: bool,
}

impl<T: PartialEq> EditSession<T> {
    /// Starts a clean session at `initial`.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn new(initial: T, config: &HistoryConfig) -> Result<Self, HistoryError> {
        Ok(Self::from_history(HistoryManager::from_config(initial, config)?))
    }
}

impl<T, E: SnapshotEq<T>> EditSession<T, E> {
    /// Wraps an existing history. The session starts clean.
    pub fn from_history(history: HistoryManager<T, E>) -> Self {
        Self {
            history,
            dirty: false,
        }
    }

    /// Commits an edited state. Returns whether the history changed.
    pub fn commit(&mut self, state: T) -> bool {
        let changed = self.history.record(state);
        if changed {
            self.dirty = true;
        }
        changed
    }

    pub fn undo(&mut self) -> Option<&T> {
        let state = self.history.undo()?;
        self.dirty = true;
        Some(state)
    }

    pub fn redo(&mut self) -> Option<&T> {
        let state = self.history.redo()?;
        self.dirty = true;
        Some(state)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Resets the undo baseline to the current state and marks it clean.
    pub fn mark_saved(&mut self) {
        self.history.clear();
        self.dirty = false;
        tracing::debug!("Session saved, history reset");
    }
}

impl<T, E> EditSession<T, E> {
    pub fn current(&self) -> &T {
        self.history.present()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Flags unsaved changes that bypass the history (e.g. status toggles).
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn history(&self) -> &HistoryManager<T, E> {
        &self.history
    }
}
