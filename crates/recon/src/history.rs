//! Bounded undo/redo history of snapshots.
//!
//! Entries live in a `Vec`; `count` is one past the active entry. Appending
//! after an undo truncates everything past the cursor, so the timeline stays
//! linear. At capacity the oldest entry is evicted.

use log::trace;

/// Default number of snapshots kept.
pub const DEFAULT_MAX_ENTRIES: usize = 20;

/// Where the cursor sits relative to the stored entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryState {
    Empty,
    /// Cursor is past the newest entry; nothing to redo.
    AtHead,
    /// At least one undone entry can be redone.
    MidHistory,
}

#[derive(Debug, Clone)]
pub struct History<T> {
    entries: Vec<T>,
    count: usize,
    max_entries: usize,
}

impl<T: Clone> History<T> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_ENTRIES)
    }

    /// A capacity of zero is treated as one.
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            count: 0,
            max_entries: max_entries.max(1),
        }
    }

    pub fn state(&self) -> HistoryState {
        if self.entries.is_empty() {
            HistoryState::Empty
        } else if self.count < self.entries.len() {
            HistoryState::MidHistory
        } else {
            HistoryState::AtHead
        }
    }

    /// Record a new snapshot and make it the active one.
    pub fn append(&mut self, item: T) {
        if self.count >= self.max_entries {
            self.entries.remove(0);
        } else if self.count < self.entries.len() {
            self.entries.truncate(self.count);
            self.count += 1;
        } else {
            self.count += 1;
        }
        self.entries.push(item);
        trace!("history append: count={} len={}", self.count, self.entries.len());
    }

    pub fn can_undo(&self) -> bool {
        self.count > 1
    }

    pub fn can_redo(&self) -> bool {
        self.count < self.entries.len()
    }

    /// Step back one snapshot and return the one that becomes active.
    pub fn undo(&mut self) -> Option<T> {
        if !self.can_undo() {
            return None;
        }
        self.count -= 1;
        trace!("history undo: count={}", self.count);
        self.entries.get(self.count - 1).cloned()
    }

    /// Step forward one snapshot and return the one that becomes active.
    pub fn redo(&mut self) -> Option<T> {
        if !self.can_redo() {
            return None;
        }
        let item = self.entries.get(self.count).cloned();
        self.count += 1;
        trace!("history redo: count={}", self.count);
        item
    }

    /// The active snapshot, if any.
    pub fn current(&self) -> Option<&T> {
        self.count.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.count = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }
}

impl<T: Clone> Default for History<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Display for History<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "History(len: {}, count: {}, max_entries: {})",
            self.entries.len(),
            self.count,
            self.max_entries
        )
    }
}
