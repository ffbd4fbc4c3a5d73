//! Stroke model: tools, the stroke sum type, and board scoping.
//!
//! A [`Stroke`] is one committed drawable unit. Its geometry lives in
//! [`Shape`], a tagged variant discriminated by `tool` on the wire, so the
//! render and history code match on it exhaustively. Style and provenance
//! fields are shared by every variant.
//!
//! Strokes flow into this layer from the input engine (pointer-up, text
//! submit) and from the network (board load). They are never mutated after
//! being committed.

#[cfg(test)]
#[path = "stroke_test.rs"]
mod stroke_test;

use serde::{Deserialize, Serialize};

use crate::point::Point;

/// Which drawing tool is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Freehand pen (default).
    #[default]
    Pen,
    /// Freehand stroke in the background color.
    Eraser,
    /// Axis-aligned rectangle between two corners.
    Rectangle,
    /// Ellipse inscribed in the drag box.
    Ellipse,
    /// Straight segment.
    Line,
    /// Straight segment with a filled head at the end point.
    Arrow,
    /// Text box anchored at the click point.
    Text,
}

impl Tool {
    /// Whether gestures with this tool accumulate a full pointer path.
    #[must_use]
    pub fn is_freehand(self) -> bool {
        matches!(self, Self::Pen | Self::Eraser)
    }

    /// Whether gestures with this tool are defined by a start and end point.
    #[must_use]
    pub fn is_shape(self) -> bool {
        matches!(self, Self::Rectangle | Self::Ellipse | Self::Line | Self::Arrow)
    }

    /// Tool selected by a single-letter keyboard shortcut.
    #[must_use]
    pub fn from_shortcut(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'p' => Some(Self::Pen),
            'e' => Some(Self::Eraser),
            'r' => Some(Self::Rectangle),
            'l' => Some(Self::Ellipse),
            'a' => Some(Self::Arrow),
            't' => Some(Self::Text),
            's' => Some(Self::Line),
            _ => None,
        }
    }

    /// Wire name of the tool.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pen => "pen",
            Self::Eraser => "eraser",
            Self::Rectangle => "rectangle",
            Self::Ellipse => "ellipse",
            Self::Line => "line",
            Self::Arrow => "arrow",
            Self::Text => "text",
        }
    }
}

/// Geometry of a stroke, tagged by tool.
///
/// Shape variants carry exactly `[start, end]`; freehand variants carry the
/// pointer path in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tool", rename_all = "lowercase")]
pub enum Shape {
    Pen { points: Vec<Point> },
    Eraser { points: Vec<Point> },
    Rectangle { points: [Point; 2] },
    Ellipse { points: [Point; 2] },
    Line { points: [Point; 2] },
    Arrow { points: [Point; 2] },
    Text { x: f64, y: f64, text: String },
}

impl Shape {
    /// Build the shape a gesture with `tool` produces.
    ///
    /// Freehand tools keep the whole `path`; shape tools keep `start` and the
    /// last point of `path` (or `start` again for a path-less click). Returns
    /// `None` for [`Tool::Text`], which never comes from a pointer gesture.
    #[must_use]
    pub fn from_gesture(tool: Tool, start: Point, path: &[Point]) -> Option<Self> {
        let end = path.last().copied().unwrap_or(start);
        let shape = match tool {
            Tool::Pen => Self::Pen { points: non_empty_path(start, path) },
            Tool::Eraser => Self::Eraser { points: non_empty_path(start, path) },
            Tool::Rectangle => Self::Rectangle { points: [start, end] },
            Tool::Ellipse => Self::Ellipse { points: [start, end] },
            Tool::Line => Self::Line { points: [start, end] },
            Tool::Arrow => Self::Arrow { points: [start, end] },
            Tool::Text => return None,
        };
        Some(shape)
    }

    /// The tool that produced this shape.
    #[must_use]
    pub fn tool(&self) -> Tool {
        match self {
            Self::Pen { .. } => Tool::Pen,
            Self::Eraser { .. } => Tool::Eraser,
            Self::Rectangle { .. } => Tool::Rectangle,
            Self::Ellipse { .. } => Tool::Ellipse,
            Self::Line { .. } => Tool::Line,
            Self::Arrow { .. } => Tool::Arrow,
            Self::Text { .. } => Tool::Text,
        }
    }

    /// The stroke's points. Text boxes report their anchor.
    #[must_use]
    pub fn points(&self) -> Vec<Point> {
        match self {
            Self::Pen { points } | Self::Eraser { points } => points.clone(),
            Self::Rectangle { points } | Self::Ellipse { points } | Self::Line { points } | Self::Arrow { points } => {
                points.to_vec()
            }
            Self::Text { x, y, .. } => vec![Point::new(*x, *y)],
        }
    }
}

fn non_empty_path(start: Point, path: &[Point]) -> Vec<Point> {
    if path.is_empty() { vec![start] } else { path.to_vec() }
}

/// The `(board, tenant)` pair every stroke is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardKey {
    pub board_id: String,
    pub tenant_id: String,
}

impl BoardKey {
    #[must_use]
    pub fn new(board_id: impl Into<String>, tenant_id: impl Into<String>) -> Self {
        Self { board_id: board_id.into(), tenant_id: tenant_id.into() }
    }
}

/// One committed drawable unit, as stored locally and on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stroke {
    /// Geometry, flattened so `tool` sits beside the common fields.
    #[serde(flatten)]
    pub shape: Shape,
    /// CSS color string.
    pub color: String,
    /// Line width, or font size for text.
    pub width: f64,
    /// Opaque id of the author.
    pub created_by: String,
    /// Milliseconds since the Unix epoch on the author's clock.
    pub created_at: i64,
    /// Board and tenant the stroke belongs to.
    #[serde(flatten)]
    pub board: BoardKey,
}

impl Stroke {
    #[must_use]
    pub fn tool(&self) -> Tool {
        self.shape.tool()
    }

    /// Whether this stroke belongs to `key`.
    #[must_use]
    pub fn belongs_to(&self, key: &BoardKey) -> bool {
        self.board == *key
    }

    /// Check the structural invariants a stroke from an untrusted source must
    /// satisfy before it is stored or rendered.
    ///
    /// Degenerate geometry (zero-length shapes, single-point paths) is valid.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), StrokeError> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(StrokeError::InvalidWidth(self.width));
        }
        if self.board.board_id.is_empty() || self.board.tenant_id.is_empty() {
            return Err(StrokeError::MissingBoard);
        }
        match &self.shape {
            Shape::Pen { points } | Shape::Eraser { points } if points.is_empty() => Err(StrokeError::EmptyPath),
            Shape::Text { text, .. } if text.trim().is_empty() => Err(StrokeError::EmptyText),
            shape => {
                if shape.points().iter().all(|p| p.x.is_finite() && p.y.is_finite()) {
                    Ok(())
                } else {
                    Err(StrokeError::NonFiniteCoordinate)
                }
            }
        }
    }
}

/// A stroke that violates the data-model invariants.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StrokeError {
    #[error("freehand stroke has no points")]
    EmptyPath,
    #[error("text stroke has no text")]
    EmptyText,
    #[error("stroke width must be positive, got {0}")]
    InvalidWidth(f64),
    #[error("stroke coordinates must be finite")]
    NonFiniteCoordinate,
    #[error("stroke is missing its board or tenant id")]
    MissingBoard,
}

/// Current wall-clock time in milliseconds since the Unix epoch.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn timestamp_ms() -> i64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now() as i64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or_default()
    }
}
