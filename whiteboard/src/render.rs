//! Rendering: draws the full board to a [`Surface`].
//!
//! This module is the only place that issues drawing calls. It receives
//! read-only views of committed strokes and the in-progress preview and
//! produces pixels; it does not mutate any session state.
//!
//! Every frame is a full redraw. All fallible surface calls propagate the
//! surface's error type; the top-level caller handles the result.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::consts::{ARROW_HEAD_ANGLE, ARROW_HEAD_BASE, BACKGROUND_COLOR, PREVIEW_DASH, TEXT_FONT_FAMILY};
use crate::point::Point;
use crate::stroke::{Shape, Stroke};
use crate::surface::Surface;

/// Whether a stroke is drawn as committed or as a live preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Committed,
    Preview,
}

/// Draw the full scene: committed strokes in order, then the preview.
///
/// # Errors
///
/// Returns `Err` if any surface call fails.
pub fn render<'a, S: Surface>(
    surface: &mut S,
    width: f64,
    height: f64,
    committed: impl IntoIterator<Item = &'a Stroke>,
    preview: Option<&Stroke>,
) -> Result<(), S::Error> {
    surface.clear(width, height);

    for stroke in committed {
        draw_stroke(surface, stroke, Mode::Committed)?;
    }

    if let Some(stroke) = preview {
        draw_stroke(surface, stroke, Mode::Preview)?;
    }

    Ok(())
}

/// Draw one stroke with the primitive for its tool.
///
/// # Errors
///
/// Returns `Err` if any surface call fails.
pub fn draw_stroke<S: Surface>(surface: &mut S, stroke: &Stroke, mode: Mode) -> Result<(), S::Error> {
    match &stroke.shape {
        Shape::Pen { points } => {
            draw_freehand(surface, points, &stroke.color, stroke.width);
            Ok(())
        }
        Shape::Eraser { points } => {
            draw_freehand(surface, points, BACKGROUND_COLOR, stroke.width);
            Ok(())
        }
        Shape::Rectangle { points: [a, b] } => draw_rect(surface, *a, *b, &stroke.color, stroke.width, mode),
        Shape::Ellipse { points: [a, b] } => draw_ellipse(surface, *a, *b, &stroke.color, stroke.width, mode),
        Shape::Line { points: [a, b] } => draw_line(surface, *a, *b, &stroke.color, stroke.width, mode, false),
        Shape::Arrow { points: [a, b] } => draw_line(surface, *a, *b, &stroke.color, stroke.width, mode, true),
        Shape::Text { x, y, text } => draw_text(surface, Point::new(*x, *y), text, &stroke.color, stroke.width),
    }
}

// =============================================================
// Freehand
// =============================================================

fn draw_freehand<S: Surface>(surface: &mut S, points: &[Point], color: &str, width: f64) {
    let Some(first) = points.first() else {
        return;
    };

    surface.save();
    surface.set_stroke_color(color);
    surface.set_line_width(width);
    surface.set_line_cap("round");
    surface.set_line_join("round");

    surface.begin_path();
    surface.move_to(*first);
    // Starts with a zero-length segment so a single click still leaves a dot.
    for p in points {
        surface.line_to(*p);
    }
    surface.stroke();
    surface.restore();
}

// =============================================================
// Shapes
// =============================================================

fn draw_rect<S: Surface>(surface: &mut S, a: Point, b: Point, color: &str, width: f64, mode: Mode) -> Result<(), S::Error> {
    with_saved(surface, |surface| {
        begin_outline(surface, color, width, mode)?;

        // Normalized so every drag direction yields the same rectangle.
        surface.begin_path();
        surface.rect(a.x.min(b.x), a.y.min(b.y), (b.x - a.x).abs(), (b.y - a.y).abs());
        surface.stroke();
        Ok(())
    })
}

fn draw_ellipse<S: Surface>(surface: &mut S, a: Point, b: Point, color: &str, width: f64, mode: Mode) -> Result<(), S::Error> {
    with_saved(surface, |surface| {
        begin_outline(surface, color, width, mode)?;

        surface.begin_path();
        surface.ellipse(a.midpoint(b), (b.x - a.x).abs() / 2.0, (b.y - a.y).abs() / 2.0)?;
        surface.stroke();
        Ok(())
    })
}

// =============================================================
// Lines and arrows
// =============================================================

fn draw_line<S: Surface>(
    surface: &mut S,
    a: Point,
    b: Point,
    color: &str,
    width: f64,
    mode: Mode,
    arrowhead: bool,
) -> Result<(), S::Error> {
    with_saved(surface, |surface| {
        begin_outline(surface, color, width, mode)?;

        surface.begin_path();
        surface.move_to(a);
        surface.line_to(b);
        surface.stroke();

        if arrowhead {
            surface.set_fill_color(color);
            draw_arrowhead(surface, a, b, ARROW_HEAD_BASE + width);
        }
        Ok(())
    })
}

/// Filled triangle with its tip at `tip`, pointing away from `tail`.
fn draw_arrowhead<S: Surface>(surface: &mut S, tail: Point, tip: Point, length: f64) {
    let [left, right] = arrowhead_corners(tail, tip, length);

    surface.begin_path();
    surface.move_to(tip);
    surface.line_to(left);
    surface.line_to(right);
    surface.close_path();
    surface.fill();
}

/// The two base corners of an arrowhead of `length` at `tip`.
#[must_use]
pub fn arrowhead_corners(tail: Point, tip: Point, length: f64) -> [Point; 2] {
    let angle = (tip.y - tail.y).atan2(tip.x - tail.x);
    [
        Point::new(
            length.mul_add(-(angle - ARROW_HEAD_ANGLE).cos(), tip.x),
            length.mul_add(-(angle - ARROW_HEAD_ANGLE).sin(), tip.y),
        ),
        Point::new(
            length.mul_add(-(angle + ARROW_HEAD_ANGLE).cos(), tip.x),
            length.mul_add(-(angle + ARROW_HEAD_ANGLE).sin(), tip.y),
        ),
    ]
}

// =============================================================
// Text
// =============================================================

fn draw_text<S: Surface>(surface: &mut S, at: Point, text: &str, color: &str, size: f64) -> Result<(), S::Error> {
    with_saved(surface, |surface| {
        surface.set_fill_color(color);
        surface.set_font(&font_for(size));
        // The overlay is anchored by its top-left corner.
        surface.set_text_baseline("top");
        surface.fill_text(text, at)
    })
}

/// CSS font shorthand for a text stroke of `size` pixels.
#[must_use]
pub fn font_for(size: f64) -> String {
    format!("{size}px {TEXT_FONT_FAMILY}")
}

// =============================================================
// Helpers
// =============================================================

/// Run `draw` between `save` and `restore`. The state is restored even when
/// `draw` fails, so the surface's state stack stays balanced.
fn with_saved<S: Surface>(surface: &mut S, draw: impl FnOnce(&mut S) -> Result<(), S::Error>) -> Result<(), S::Error> {
    surface.save();
    let result = draw(surface);
    surface.restore();
    result
}

fn begin_outline<S: Surface>(surface: &mut S, color: &str, width: f64, mode: Mode) -> Result<(), S::Error> {
    surface.set_stroke_color(color);
    surface.set_line_width(width);
    match mode {
        Mode::Committed => surface.set_line_dash(&[]),
        Mode::Preview => surface.set_line_dash(&PREVIEW_DASH),
    }
}
