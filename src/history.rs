//! Bounded linear undo/redo history over [`FilterState`] snapshots.
//!
//! ```text
//!   init(S0)        [S0]                cursor 0
//!   push(S1)        [S0, S1]            cursor 1
//!   push(S2)        [S0, S1, S2]        cursor 2
//!   undo()          [S0, S1, S2]        cursor 1   -> S1
//!   push(S3)        [S0, S1, S3]        cursor 2   (S2 discarded)
//! ```
//!
//! Pushing the snapshot already under the cursor is a no-op. Once the stack
//! exceeds its capacity the oldest entry is dropped. Undo at the head and redo
//! at the tail do nothing.

use crate::FilterState;
use std::collections::VecDeque;
use tracing::trace;

/// Default number of snapshots kept.
pub const DEFAULT_CAPACITY: usize = 50;

#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<FilterState>,
    cursor: usize,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// A zero capacity is raised to 1: the current state is always kept.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { entries: VecDeque::with_capacity(capacity), cursor: 0, capacity }
    }

    /// Reset the stack to `[state]`.
    pub fn init(&mut self, state: FilterState) {
        self.entries.clear();
        self.entries.push_back(state);
        self.cursor = 0;
    }

    /// Record `state` after the cursor. Returns false when it equals the
    /// current snapshot.
    pub fn push(&mut self, state: FilterState) -> bool {
        if self.entries.is_empty() {
            self.init(state);
            return true;
        }
        if self.entries.get(self.cursor) == Some(&state) {
            return false;
        }

        self.entries.truncate(self.cursor + 1);
        self.entries.push_back(state);
        if self.entries.len() > self.capacity {
            self.entries.pop_front();
            trace!(capacity = self.capacity, "history full; oldest snapshot dropped");
        }
        self.cursor = self.entries.len() - 1;
        true
    }

    /// Step back and return a copy of the snapshot now under the cursor.
    pub fn undo(&mut self) -> Option<FilterState> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.current().cloned()
    }

    /// Step forward and return a copy of the snapshot now under the cursor.
    pub fn redo(&mut self) -> Option<FilterState> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.current().cloned()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> Option<&FilterState> {
        self.entries.get(self.cursor)
    }

    pub fn entries(&self) -> impl Iterator<Item = &FilterState> {
        self.entries.iter()
    }
}
