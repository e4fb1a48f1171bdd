//! Bounded undo/redo over committed document states.
//!
//! The history holds full document snapshots. The entry at `cursor` is the
//! state currently shown; committing a change truncates any redo tail and
//! appends the new state.

use crate::constants::MAX_HISTORY_STATES;
use crate::types::Document;

pub struct History {
    states: Vec<Document>,
    cursor: usize,
    capacity: usize,
}

impl History {
    /// Start a history whose baseline is `initial`.
    pub fn new(initial: Document) -> Self {
        Self::with_capacity(initial, MAX_HISTORY_STATES)
    }

    pub fn with_capacity(initial: Document, capacity: usize) -> Self {
        Self {
            states: vec![initial],
            cursor: 0,
            capacity: capacity.max(1),
        }
    }

    /// Record a committed state.
    pub fn push(&mut self, state: Document) {
        self.states.truncate(self.cursor + 1);
        self.states.push(state);
        if self.states.len() > self.capacity {
            let overflow = self.states.len() - self.capacity;
            self.states.drain(..overflow);
        }
        self.cursor = self.states.len() - 1;
    }

    /// Step back, returning the state to restore.
    pub fn undo(&mut self) -> Option<&Document> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.states.get(self.cursor)
    }

    /// Step forward, returning the state to restore.
    pub fn redo(&mut self) -> Option<&Document> {
        if self.cursor + 1 >= self.states.len() {
            return None;
        }
        self.cursor += 1;
        self.states.get(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.states.len()
    }

    /// Drop everything and start over from `baseline` (after an import).
    pub fn reset(&mut self, baseline: Document) {
        self.states = vec![baseline];
        self.cursor = 0;
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
