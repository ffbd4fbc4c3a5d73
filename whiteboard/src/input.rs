//! Input model: modifier keys, keyboard shortcuts, and the gesture state machine.
//!
//! `Modifiers` and `Key` capture a keyboard event as reported by the host.
//! `InputState` is the gesture tracked between pointer-down and pointer-up. It
//! records the tool the gesture started with, so switching tools mid-drag only
//! affects the next gesture.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::point::Point;
use crate::stroke::{Shape, Tool};

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// No modifier is held.
    #[must_use]
    pub fn is_empty(self) -> bool {
        !(self.shift || self.ctrl || self.alt || self.meta)
    }

    /// Ctrl alone is held.
    #[must_use]
    pub fn ctrl_only(self) -> bool {
        self.ctrl && !(self.shift || self.alt || self.meta)
    }
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"z"`, `"Enter"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The key as a single character, if it is one.
    #[must_use]
    pub fn as_char(&self) -> Option<char> {
        let mut chars = self.0.chars();
        let c = chars.next()?;
        chars.next().is_none().then_some(c)
    }

    #[must_use]
    pub fn is_enter(&self) -> bool {
        self.0 == "Enter"
    }
}

/// Board-level command bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Undo,
    Redo,
    SelectTool(Tool),
}

/// Resolve a key press to a shortcut.
///
/// Shortcuts are inactive while a text session has focus. `Ctrl+Z` and
/// `Ctrl+Y` are the only modifier combinations; tool letters fire only with no
/// modifier held.
#[must_use]
pub fn shortcut(key: &Key, modifiers: Modifiers, text_focused: bool) -> Option<Shortcut> {
    if text_focused {
        return None;
    }
    let c = key.as_char()?;
    if modifiers.ctrl_only() {
        return match c {
            'z' => Some(Shortcut::Undo),
            'y' => Some(Shortcut::Redo),
            _ => None,
        };
    }
    if !modifiers.is_empty() {
        return None;
    }
    Tool::from_shortcut(c).map(Shortcut::SelectTool)
}

/// Gesture state between pointer-down and pointer-up.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A freehand or shape gesture is in progress.
    Drawing {
        /// Tool captured at pointer-down.
        tool: Tool,
        /// Surface-local point where the gesture started.
        start: Point,
        /// Full path for freehand tools; only the latest point otherwise.
        current: Vec<Point>,
    },
}

impl InputState {
    /// Begin a gesture at `at`.
    #[must_use]
    pub fn begin(tool: Tool, at: Point) -> Self {
        Self::Drawing { tool, start: at, current: vec![at] }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Drawing { .. })
    }

    /// Record a pointer move. Returns `false` when no gesture is active.
    pub fn track(&mut self, at: Point) -> bool {
        let Self::Drawing { tool, current, .. } = self else {
            return false;
        };
        if tool.is_freehand() {
            current.push(at);
        } else {
            current.clear();
            current.push(at);
        }
        true
    }

    /// Geometry the gesture would commit right now.
    #[must_use]
    pub fn shape(&self) -> Option<Shape> {
        match self {
            Self::Idle => None,
            Self::Drawing { tool, start, current } => Shape::from_gesture(*tool, *start, current),
        }
    }

    /// End the gesture, returning its final geometry and resetting to idle.
    pub fn finish(&mut self) -> Option<Shape> {
        let shape = self.shape();
        *self = Self::Idle;
        shape
    }

    /// Tool the active gesture started with.
    #[must_use]
    pub fn tool(&self) -> Option<Tool> {
        match self {
            Self::Idle => None,
            Self::Drawing { tool, .. } => Some(*tool),
        }
    }
}
