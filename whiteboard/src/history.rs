//! Linear undo/redo history.
//!
//! `committed` is the ordered list of strokes currently on the board;
//! `redo` holds undone entries, most recently undone first. History is
//! strictly linear: a new commit drops whatever could have been redone.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::stroke::{Shape, Stroke};

/// One undo/redo unit. Never persisted as its own entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum HistoryEntry {
    /// A freehand or shape stroke from a pointer gesture.
    Stroke(Stroke),
    /// A submitted text box.
    Text(Stroke),
}

impl HistoryEntry {
    /// Wrap a stroke in the entry type matching its shape.
    #[must_use]
    pub fn new(stroke: Stroke) -> Self {
        match stroke.shape {
            Shape::Text { .. } => Self::Text(stroke),
            _ => Self::Stroke(stroke),
        }
    }

    #[must_use]
    pub fn stroke(&self) -> &Stroke {
        match self {
            Self::Stroke(s) | Self::Text(s) => s,
        }
    }

    #[must_use]
    pub fn into_stroke(self) -> Stroke {
        match self {
            Self::Stroke(s) | Self::Text(s) => s,
        }
    }
}

/// Committed entries plus the redo buffer.
#[derive(Debug, Clone, Default)]
pub struct History {
    committed: Vec<HistoryEntry>,
    redo: VecDeque<HistoryEntry>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and invalidate the redo buffer.
    pub fn commit(&mut self, entry: HistoryEntry) {
        self.committed.push(entry);
        self.redo.clear();
    }

    /// Move the last committed entry to the front of the redo buffer.
    ///
    /// Returns the undone entry, or `None` when there is nothing to undo.
    pub fn undo(&mut self) -> Option<&HistoryEntry> {
        let entry = self.committed.pop()?;
        self.redo.push_front(entry);
        self.redo.front()
    }

    /// Move the first redo entry back onto the end of the committed list.
    ///
    /// Returns the re-applied entry, or `None` when the redo buffer is empty.
    pub fn redo(&mut self) -> Option<&HistoryEntry> {
        let entry = self.redo.pop_front()?;
        self.committed.push(entry);
        self.committed.last()
    }

    /// Drop every committed and redoable entry.
    pub fn clear(&mut self) {
        self.committed.clear();
        self.redo.clear();
    }

    /// Replace the committed list with strokes fetched from the log, in the
    /// order given. The redo buffer is left as is.
    pub fn replace_committed(&mut self, strokes: impl IntoIterator<Item = Stroke>) {
        self.committed = strokes.into_iter().map(HistoryEntry::new).collect();
    }

    #[must_use]
    pub fn committed(&self) -> &[HistoryEntry] {
        &self.committed
    }

    /// Redo entries, next to be redone first.
    pub fn redo_entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.redo.iter()
    }

    /// Committed strokes in draw order.
    pub fn strokes(&self) -> impl Iterator<Item = &Stroke> {
        self.committed.iter().map(HistoryEntry::stroke)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.committed.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
}
