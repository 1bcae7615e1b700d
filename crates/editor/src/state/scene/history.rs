//! Undo/redo functionality
//!
//! Linear history of immutable snapshots with a cursor. Committing after an
//! undo discards the redo branch.

use shared::Snapshot;

/// Default number of snapshots kept
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Linear undo/redo stack
#[derive(Debug)]
pub struct History {
    entries: Vec<Snapshot>,
    index: usize,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    /// Empty history keeping at most `limit` snapshots (minimum 1)
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            index: 0,
            limit: limit.max(1),
        }
    }

    /// Append a snapshot after the cursor, dropping any redo branch
    pub fn commit(&mut self, snapshot: Snapshot) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.index + 1);
        }
        self.entries.push(snapshot);
        if self.entries.len() > self.limit {
            let excess = self.entries.len() - self.limit;
            self.entries.drain(..excess);
        }
        self.index = self.entries.len() - 1;
    }

    /// Step back; returns the snapshot to restore, or `None` at the oldest entry
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        self.entries.get(self.index)
    }

    /// Step forward; returns the snapshot to restore, or `None` at the newest entry
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        self.entries.get(self.index)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Snapshot at the cursor
    pub fn current(&self) -> Option<&Snapshot> {
        self.entries.get(self.index)
    }

    /// Cursor position
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of stored snapshots
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
