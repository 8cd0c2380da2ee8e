/// Core undo/redo manager over whole-value snapshots.
///
/// The manager owns three parts: `past` (oldest first, capped at
/// `capacity`), `present` (always defined), and `future` (nearest first).
/// Recording a new state discards `future`; recording a state equal to
/// `present` does nothing.
use std::collections::VecDeque;

use crate::config::{HistoryConfig, DEFAULT_CAPACITY};
use crate::eq::{SnapshotEq, ValueEq};
use crate::error::HistoryError;

/// Manages undo/redo history for a single editing session.
///
/// Each session owns its own `HistoryManager`. Operations are synchronous
/// and never fail; running out of history is reported as `None`.
pub struct HistoryManager<T, E = ValueEq> {
    /// Snapshots that were once present, oldest first.
    past: VecDeque<T>,
    /// The current snapshot.
    present: T,
    /// Undone snapshots, the next one to redo at the front.
    future: VecDeque<T>,
    /// Max length of `past`. Always at least 1.
    capacity: usize,
    /// Detects records that would not change the present.
    eq: E,
}

impl<T, E> std::fmt::Debug for HistoryManager<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryManager")
            .field("past_len", &self.past.len())
            .field("future_len", &self.future.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl<T: PartialEq> HistoryManager<T> {
    /// Creates a history seeded with `initial` and the default capacity of 50.
    pub fn new(initial: T) -> Self {
        Self::build(initial, DEFAULT_CAPACITY, ValueEq)
    }

    /// Creates a history that keeps at most `capacity` past snapshots.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::ZeroCapacity`] if `capacity` is 0.
    pub fn with_capacity(initial: T, capacity: usize) -> Result<Self, HistoryError> {
        Self::with_eq(initial, capacity, ValueEq)
    }

    /// Creates a history sized by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn from_config(initial: T, config: &HistoryConfig) -> Result<Self, HistoryError> {
        Self::with_capacity(initial, config.capacity)
    }
}

impl<T, E: SnapshotEq<T>> HistoryManager<T, E> {
    /// Creates a history that uses `eq` to detect no-op records.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::ZeroCapacity`] if `capacity` is 0.
    pub fn with_eq(initial: T, capacity: usize, eq: E) -> Result<Self, HistoryError> {
        HistoryConfig { capacity }.validate()?;
        Ok(Self::build(initial, capacity, eq))
    }

    fn build(initial: T, capacity: usize, eq: E) -> Self {
        Self {
            past: VecDeque::new(),
            present: initial,
            future: VecDeque::new(),
            capacity,
            eq,
        }
    }

    /// Records `state` as the new present.
    ///
    /// Does nothing if `state` equals the current present. Otherwise the old
    /// present moves to the end of `past` (evicting the oldest entry when
    /// over capacity) and the redo branch is discarded. Returns whether the
    /// history changed.
    pub fn record(&mut self, state: T) -> bool {
        if self.eq.same(&self.present, &state) {
            tracing::trace!("Skipping record of unchanged snapshot");
            return false;
        }

        let previous = std::mem::replace(&mut self.present, state);
        self.push_past(previous);
        if !self.future.is_empty() {
            tracing::trace!("Discarding {} redo snapshot(s)", self.future.len());
            self.future.clear();
        }
        tracing::trace!(past = self.past.len(), "Recorded snapshot");
        true
    }

    /// Steps back to the previous snapshot.
    ///
    /// Returns the new present, or `None` if there is nothing to undo.
    pub fn undo(&mut self) -> Option<&T> {
        let previous = self.past.pop_back()?;
        let current = std::mem::replace(&mut self.present, previous);
        self.future.push_front(current);
        tracing::trace!(
            past = self.past.len(),
            future = self.future.len(),
            "Undid snapshot"
        );
        Some(&self.present)
    }

    /// Steps forward to the most recently undone snapshot.
    ///
    /// Returns the new present, or `None` if there is nothing to redo.
    pub fn redo(&mut self) -> Option<&T> {
        let next = self.future.pop_front()?;
        let current = std::mem::replace(&mut self.present, next);
        self.push_past(current);
        tracing::trace!(
            past = self.past.len(),
            future = self.future.len(),
            "Redid snapshot"
        );
        Some(&self.present)
    }

    /// Whether undo is available.
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Whether redo is available.
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Drops all past and future snapshots, keeping the present.
    ///
    /// Used to make the current state the new baseline, e.g. after a save.
    pub fn clear(&mut self) {
        tracing::debug!(
            past = self.past.len(),
            future = self.future.len(),
            "Clearing history"
        );
        self.past.clear();
        self.future.clear();
    }

    fn push_past(&mut self, snapshot: T) {
        self.past.push_back(snapshot);
        while self.past.len() > self.capacity {
            self.past.pop_front();
            tracing::debug!(capacity = self.capacity, "Evicted oldest snapshot");
        }
    }
}

impl<T, E> HistoryManager<T, E> {
    /// The current snapshot.
    pub fn present(&self) -> &T {
        &self.present
    }

    /// Past snapshots in chronological order (oldest first).
    pub fn past(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.past.iter()
    }

    /// Redo snapshots, the next one to redo first.
    pub fn future(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.future.iter()
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    /// Max number of past snapshots retained.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Consumes the manager and returns the present snapshot.
    pub fn into_present(self) -> T {
        self.present
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Point {
        x: i32,
    }

    fn p(x: i32) -> Point {
        Point { x }
    }

    fn past_of<T: Clone, E>(mgr: &HistoryManager<T, E>) -> Vec<T> {
        mgr.past().cloned().collect()
    }

    // --- Construction ---

    #[test]
    fn test_new_uses_default_capacity() {
        let mgr = HistoryManager::new(p(0));
        assert_eq!(mgr.capacity(), 50);
        assert_eq!(mgr.present(), &p(0));
        assert!(!mgr.can_undo());
        assert!(!mgr.can_redo());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = HistoryManager::with_capacity(p(0), 0).expect_err("zero capacity");
        assert_eq!(err, HistoryError::ZeroCapacity);
    }

    #[test]
    fn test_from_config() {
        let mgr = HistoryManager::from_config(p(0), &HistoryConfig { capacity: 3 }).expect("new");
        assert_eq!(mgr.capacity(), 3);
        assert!(HistoryManager::from_config(p(0), &HistoryConfig { capacity: 0 }).is_err());
    }

    // --- Basic undo/redo ---

    #[test]
    fn test_undo_redo_basic() {
        let mut mgr = HistoryManager::new(p(0));
        assert!(mgr.record(p(1)));
        assert!(mgr.record(p(2)));

        assert_eq!(mgr.undo(), Some(&p(1)));
        assert!(mgr.can_redo());
        assert_eq!(mgr.redo(), Some(&p(2)));
        assert!(!mgr.can_redo());
        assert_eq!(mgr.past_len(), 2);
    }

    #[test]
    fn test_workflow_scenario() {
        let mut mgr = HistoryManager::new(p(0));
        mgr.record(p(1));
        mgr.record(p(2));

        assert_eq!(mgr.undo(), Some(&p(1)));
        assert_eq!(mgr.undo(), Some(&p(0)));
        assert_eq!(mgr.undo(), None);
        assert_eq!(mgr.redo(), Some(&p(1)));

        mgr.record(p(9));
        assert!(!mgr.can_redo());
        assert_eq!(mgr.present(), &p(9));
        assert_eq!(past_of(&mgr), vec![p(0), p(1)]);
    }

    #[test]
    fn test_empty_history() {
        let mut mgr = HistoryManager::new(p(0));
        assert!(mgr.undo().is_none());
        assert!(mgr.redo().is_none());
        assert_eq!(mgr.present(), &p(0));
        assert_eq!(mgr.past_len(), 0);
        assert_eq!(mgr.future_len(), 0);
    }

    #[test]
    fn test_future_is_nearest_first() {
        let mut mgr = HistoryManager::new(p(0));
        for x in 1..=3 {
            mgr.record(p(x));
        }
        mgr.undo();
        mgr.undo();
        let future: Vec<Point> = mgr.future().cloned().collect();
        assert_eq!(future, vec![p(2), p(3)]);
        assert_eq!(mgr.present(), &p(1));
    }

    // --- No-op records ---

    #[test]
    fn test_record_equal_value_is_noop() {
        let mut mgr = HistoryManager::new(p(0));
        mgr.record(p(1));
        mgr.undo();
        assert!(!mgr.record(p(0)));
        assert_eq!(mgr.past_len(), 0);
        // Redo branch survives a no-op record
        assert!(mgr.can_redo());
    }

    #[test]
    fn test_custom_eq_ignores_fields() {
        #[derive(Debug)]
        struct Doc {
            text: &'static str,
            cursor: usize,
        }
        let same_text = |a: &Doc, b: &Doc| a.text == b.text;
        let mut mgr = HistoryManager::with_eq(Doc { text: "a", cursor: 0 }, 10, same_text)
            .expect("new");

        assert!(!mgr.record(Doc { text: "a", cursor: 4 }));
        assert_eq!(mgr.present().cursor, 0);
        assert!(mgr.record(Doc { text: "ab", cursor: 2 }));
        assert_eq!(mgr.past_len(), 1);
    }

    // --- Capacity ---

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut mgr = HistoryManager::with_capacity('A', 2).expect("new");
        mgr.record('B');
        mgr.record('C');
        mgr.record('D');
        assert_eq!(past_of(&mgr), vec!['B', 'C']);
        assert_eq!(mgr.present(), &'D');
    }

    #[test]
    fn test_redo_respects_capacity() {
        let mut mgr = HistoryManager::with_capacity(0, 1).expect("new");
        mgr.record(1);
        mgr.undo();
        assert_eq!(mgr.redo(), Some(&1));
        assert_eq!(past_of(&mgr), vec![0]);
        assert_eq!(mgr.past_len(), 1);
    }

    #[test]
    fn test_future_not_bounded_by_capacity_eviction() {
        let mut mgr = HistoryManager::with_capacity(0, 3).expect("new");
        for x in 1..=10 {
            mgr.record(x);
        }
        while mgr.undo().is_some() {}
        assert_eq!(mgr.present(), &7);
        assert_eq!(mgr.future_len(), 3);
    }

    // --- Clear ---

    #[test]
    fn test_clear_keeps_present() {
        let mut mgr = HistoryManager::new(p(0));
        mgr.record(p(1));
        mgr.record(p(2));
        mgr.undo();
        mgr.clear();
        assert!(!mgr.can_undo());
        assert!(!mgr.can_redo());
        assert_eq!(mgr.present(), &p(1));
    }

    #[test]
    fn test_into_present() {
        let mut mgr = HistoryManager::new(String::from("draft"));
        mgr.record(String::from("final"));
        assert_eq!(mgr.into_present(), "final");
    }

    #[test]
    fn test_debug_omits_snapshots() {
        let mut mgr = HistoryManager::new(String::from("secret"));
        mgr.record(String::from("other"));
        let dbg = format!("{mgr:?}");
        assert!(dbg.contains("past_len: 1"));
        assert!(!dbg.contains("secret"));
    }
}
