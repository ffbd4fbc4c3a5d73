//! Shared constants for the whiteboard crate.

use std::f64::consts::PI;

// ── Drawing defaults ────────────────────────────────────────────

/// Surface background; also the color eraser strokes are drawn with.
pub const BACKGROUND_COLOR: &str = "#ffffff";

/// Initial pen color for a new session.
pub const DEFAULT_COLOR: &str = "#000000";

/// Initial line width in pixels.
pub const DEFAULT_WIDTH: f64 = 3.0;

/// Initial text size in pixels.
pub const DEFAULT_TEXT_SIZE: f64 = 20.0;

// ── Rendering ───────────────────────────────────────────────────

/// Dash pattern (on, off) for in-progress shape previews.
pub const PREVIEW_DASH: [f64; 2] = [6.0, 4.0];

/// Arrowhead length before the stroke width is added.
pub const ARROW_HEAD_BASE: f64 = 10.0;

/// Arrowhead half-angle in radians (30°).
pub const ARROW_HEAD_ANGLE: f64 = PI / 6.0;

/// Font family used for text strokes.
pub const TEXT_FONT_FAMILY: &str = "sans-serif";
