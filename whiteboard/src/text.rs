//! Text tool editing session.
//!
//! A session is opened by a pointer-down with the text tool and lives until
//! the host overlay blurs or the user presses Enter. The draft is local and
//! uncommitted until then; a blank draft is discarded without touching
//! history.

#[cfg(test)]
#[path = "text_test.rs"]
mod text_test;

use crate::point::Point;
use crate::stroke::Shape;

/// An open text overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSession {
    /// Surface-local anchor of the text box.
    pub anchor: Point,
    /// Uncommitted text as typed so far.
    pub draft: String,
    /// Color captured when the session opened.
    pub color: String,
    /// Font size captured when the session opened.
    pub size: f64,
}

impl TextSession {
    #[must_use]
    pub fn new(anchor: Point, color: impl Into<String>, size: f64) -> Self {
        Self { anchor, draft: String::new(), color: color.into(), size }
    }

    /// Replace the draft with the overlay's current contents.
    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
    }

    /// Geometry to commit, or `None` when the trimmed draft is empty.
    #[must_use]
    pub fn into_shape(self) -> Option<Shape> {
        if self.draft.trim().is_empty() {
            return None;
        }
        Some(Shape::Text { x: self.anchor.x, y: self.anchor.y, text: self.draft })
    }
}
