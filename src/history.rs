//! Edit history (undo/redo) for the mask editing engine.
//!
//! The engine records a snapshot of its pre-operation state for every run of
//! edits; undo and redo replay those snapshots linearly. The history is
//! either live (new edits append to the tail) or replaying (undo/redo is
//! navigating the saved entries).

use crate::selection::Selection;

/// Default cap on recorded snapshots
pub const DEFAULT_HISTORY_LIMIT: usize = 1000;

/// Operation tag attached to history snapshots, used to coalesce
/// consecutive edits of the same kind into one undo step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp {
    Input,
    Backspace,
}

/// A saved engine state: value buffer, selection, and the operation tag
/// that was current when the snapshot was taken.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub value: Vec<Option<char>>,
    pub selection: Selection,
    pub last_op: Option<EditOp>,
    /// Marks the synthetic entry recorded when undoing begins; it exists
    /// only so redo can reach the pre-undo state and is dropped once it has
    /// been redone to.
    pub start_undo: bool,
}

impl Snapshot {
    pub fn new(value: Vec<Option<char>>, selection: Selection, last_op: Option<EditOp>) -> Self {
        Self {
            value,
            selection,
            last_op,
            start_undo: false,
        }
    }

    fn same_state(&self, other: &Snapshot) -> bool {
        self.value == other.value && self.selection == other.selection
    }
}

/// Where the history currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryCursor {
    /// New edits append to the tail
    Live,
    /// Undo/redo is navigating; index of the entry last restored
    Replaying(usize),
}

/// Linear undo/redo history of engine snapshots.
#[derive(Debug, Clone)]
pub struct EditHistory {
    entries: Vec<Snapshot>,
    cursor: HistoryCursor,
    max_size: usize,
}

impl EditHistory {
    pub fn new() -> Self {
        Self::with_max_size(DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: HistoryCursor::Live,
            max_size,
        }
    }

    pub fn cursor(&self) -> HistoryCursor {
        self.cursor
    }

    pub fn is_replaying(&self) -> bool {
        matches!(self.cursor, HistoryCursor::Replaying(_))
    }

    /// Number of recorded snapshots
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Discard any entries from the replay position onward and return to
    /// live mode. Called when new input arrives mid-undo; returns whether a
    /// branch was actually discarded.
    pub fn commit_live(&mut self) -> bool {
        if let HistoryCursor::Replaying(index) = self.cursor {
            self.entries.truncate(index);
            self.cursor = HistoryCursor::Live;
            true
        } else {
            false
        }
    }

    /// Append a pre-operation snapshot, evicting the oldest entries past the
    /// cap. Callers return the history to live mode first.
    pub fn push(&mut self, snapshot: Snapshot) {
        self.entries.push(snapshot);
        while self.entries.len() > self.max_size {
            self.entries.remove(0);
        }
    }

    /// Step backward. Returns the snapshot to restore, or None when there is
    /// no history or the oldest point was already reached.
    ///
    /// The first step out of live mode records the current state as a
    /// synthetic redo target when it differs from the newest entry, so the
    /// pre-undo state stays reachable.
    pub fn undo(&mut self, current: impl FnOnce() -> Snapshot) -> Option<Snapshot> {
        match self.cursor {
            HistoryCursor::Live => {
                if self.entries.is_empty() {
                    return None;
                }
                let index = self.entries.len() - 1;
                let restored = self.entries[index].clone();
                let mut current = current();
                if !current.same_state(&restored) {
                    current.start_undo = true;
                    self.entries.push(current);
                }
                self.cursor = HistoryCursor::Replaying(index);
                Some(restored)
            }
            HistoryCursor::Replaying(0) => None,
            HistoryCursor::Replaying(index) => {
                self.cursor = HistoryCursor::Replaying(index - 1);
                self.entries.get(index - 1).cloned()
            }
        }
    }

    /// Step forward. Returns the snapshot to restore, or None when not
    /// replaying. Reaching the newest entry returns the history to live
    /// mode and drops a synthetic redo target once it has served.
    pub fn redo(&mut self) -> Option<Snapshot> {
        let HistoryCursor::Replaying(index) = self.cursor else {
            return None;
        };
        let next = index + 1;
        let snapshot = self.entries.get(next)?.clone();
        if next == self.entries.len() - 1 {
            self.cursor = HistoryCursor::Live;
            if snapshot.start_undo {
                self.entries.pop();
            }
        } else {
            self.cursor = HistoryCursor::Replaying(next);
        }
        Some(snapshot)
    }

    pub fn can_undo(&self) -> bool {
        match self.cursor {
            HistoryCursor::Live => !self.entries.is_empty(),
            HistoryCursor::Replaying(index) => index > 0,
        }
    }

    pub fn can_redo(&self) -> bool {
        match self.cursor {
            HistoryCursor::Live => false,
            HistoryCursor::Replaying(index) => index + 1 < self.entries.len(),
        }
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = HistoryCursor::Live;
    }
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new()
    }
}
