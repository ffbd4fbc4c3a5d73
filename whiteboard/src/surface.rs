//! Drawing surfaces.
//!
//! [`Surface`] is the narrow slice of the Canvas 2D API the renderer needs.
//! The browser implementation forwards to [`CanvasRenderingContext2d`];
//! [`Recorder`] captures the call sequence so rendering can be checked
//! natively.

use std::convert::Infallible;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::point::Point;

/// A 2D raster target. Paths and styles follow Canvas 2D semantics.
pub trait Surface {
    /// Error raised by fallible drawing calls.
    type Error;

    /// Erase the rectangle `[0, width] x [0, height]`.
    fn clear(&mut self, width: f64, height: f64);
    /// Push the current style state.
    fn save(&mut self);
    /// Pop the style state pushed by the matching [`Surface::save`].
    fn restore(&mut self);

    fn set_stroke_color(&mut self, color: &str);
    fn set_fill_color(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);
    fn set_line_cap(&mut self, cap: &str);
    fn set_line_join(&mut self, join: &str);
    /// Set the dash pattern; an empty slice draws solid lines.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the backend rejects the pattern.
    fn set_line_dash(&mut self, segments: &[f64]) -> Result<(), Self::Error>;
    fn set_font(&mut self, font: &str);
    fn set_text_baseline(&mut self, baseline: &str);

    fn begin_path(&mut self);
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    fn close_path(&mut self);
    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    /// Add a full axis-aligned ellipse to the current path.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the backend rejects the radii.
    fn ellipse(&mut self, center: Point, radius_x: f64, radius_y: f64) -> Result<(), Self::Error>;
    fn stroke(&mut self);
    fn fill(&mut self);
    /// Draw `text` with its baseline anchored at `at`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the backend fails to draw the text.
    fn fill_text(&mut self, text: &str, at: Point) -> Result<(), Self::Error>;
}

// =============================================================
// Browser canvas
// =============================================================

impl Surface for CanvasRenderingContext2d {
    type Error = JsValue;

    fn clear(&mut self, width: f64, height: f64) {
        self.clear_rect(0.0, 0.0, width, height);
    }

    fn save(&mut self) {
        CanvasRenderingContext2d::save(self);
    }

    fn restore(&mut self) {
        CanvasRenderingContext2d::restore(self);
    }

    fn set_stroke_color(&mut self, color: &str) {
        self.set_stroke_style_str(color);
    }

    fn set_fill_color(&mut self, color: &str) {
        self.set_fill_style_str(color);
    }

    fn set_line_width(&mut self, width: f64) {
        CanvasRenderingContext2d::set_line_width(self, width);
    }

    fn set_line_cap(&mut self, cap: &str) {
        CanvasRenderingContext2d::set_line_cap(self, cap);
    }

    fn set_line_join(&mut self, join: &str) {
        CanvasRenderingContext2d::set_line_join(self, join);
    }

    fn set_line_dash(&mut self, segments: &[f64]) -> Result<(), JsValue> {
        let dash = js_sys::Array::new();
        for seg in segments {
            dash.push(&(*seg).into());
        }
        CanvasRenderingContext2d::set_line_dash(self, &dash)
    }

    fn set_font(&mut self, font: &str) {
        CanvasRenderingContext2d::set_font(self, font);
    }

    fn set_text_baseline(&mut self, baseline: &str) {
        CanvasRenderingContext2d::set_text_baseline(self, baseline);
    }

    fn begin_path(&mut self) {
        CanvasRenderingContext2d::begin_path(self);
    }

    fn move_to(&mut self, p: Point) {
        CanvasRenderingContext2d::move_to(self, p.x, p.y);
    }

    fn line_to(&mut self, p: Point) {
        CanvasRenderingContext2d::line_to(self, p.x, p.y);
    }

    fn close_path(&mut self) {
        CanvasRenderingContext2d::close_path(self);
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        CanvasRenderingContext2d::rect(self, x, y, width, height);
    }

    fn ellipse(&mut self, center: Point, radius_x: f64, radius_y: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::ellipse(self, center.x, center.y, radius_x, radius_y, 0.0, 0.0, 2.0 * std::f64::consts::PI)
    }

    fn stroke(&mut self) {
        CanvasRenderingContext2d::stroke(self);
    }

    fn fill(&mut self) {
        CanvasRenderingContext2d::fill(self);
    }

    fn fill_text(&mut self, text: &str, at: Point) -> Result<(), JsValue> {
        CanvasRenderingContext2d::fill_text(self, text, at.x, at.y)
    }
}

// =============================================================
// Recorder
// =============================================================

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Clear { width: f64, height: f64 },
    Save,
    Restore,
    StrokeColor(String),
    FillColor(String),
    LineWidth(f64),
    LineCap(String),
    LineJoin(String),
    LineDash(Vec<f64>),
    Font(String),
    TextBaseline(String),
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    ClosePath,
    Rect { x: f64, y: f64, width: f64, height: f64 },
    Ellipse { center: Point, radius_x: f64, radius_y: f64 },
    Stroke,
    Fill,
    FillText { text: String, at: Point },
}

/// Surface that records every call instead of drawing.
///
/// Used for headless rendering checks; the op list is the full draw program
/// for one frame once [`Surface::clear`] starts it.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    pub ops: Vec<Op>,
}

impl Recorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded ops matching `pred`.
    pub fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }
}

impl Surface for Recorder {
    type Error = Infallible;

    fn clear(&mut self, width: f64, height: f64) {
        self.ops.clear();
        self.ops.push(Op::Clear { width, height });
    }

    fn save(&mut self) {
        self.ops.push(Op::Save);
    }

    fn restore(&mut self) {
        self.ops.push(Op::Restore);
    }

    fn set_stroke_color(&mut self, color: &str) {
        self.ops.push(Op::StrokeColor(color.to_owned()));
    }

    fn set_fill_color(&mut self, color: &str) {
        self.ops.push(Op::FillColor(color.to_owned()));
    }

    fn set_line_width(&mut self, width: f64) {
        self.ops.push(Op::LineWidth(width));
    }

    fn set_line_cap(&mut self, cap: &str) {
        self.ops.push(Op::LineCap(cap.to_owned()));
    }

    fn set_line_join(&mut self, join: &str) {
        self.ops.push(Op::LineJoin(join.to_owned()));
    }

    fn set_line_dash(&mut self, segments: &[f64]) -> Result<(), Infallible> {
        self.ops.push(Op::LineDash(segments.to_vec()));
        Ok(())
    }

    fn set_font(&mut self, font: &str) {
        self.ops.push(Op::Font(font.to_owned()));
    }

    fn set_text_baseline(&mut self, baseline: &str) {
        self.ops.push(Op::TextBaseline(baseline.to_owned()));
    }

    fn begin_path(&mut self) {
        self.ops.push(Op::BeginPath);
    }

    fn move_to(&mut self, p: Point) {
        self.ops.push(Op::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        self.ops.push(Op::LineTo(p));
    }

    fn close_path(&mut self) {
        self.ops.push(Op::ClosePath);
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(Op::Rect { x, y, width, height });
    }

    fn ellipse(&mut self, center: Point, radius_x: f64, radius_y: f64) -> Result<(), Infallible> {
        self.ops.push(Op::Ellipse { center, radius_x, radius_y });
        Ok(())
    }

    fn stroke(&mut self) {
        self.ops.push(Op::Stroke);
    }

    fn fill(&mut self) {
        self.ops.push(Op::Fill);
    }

    fn fill_text(&mut self, text: &str, at: Point) -> Result<(), Infallible> {
        self.ops.push(Op::FillText { text: text.to_owned(), at });
        Ok(())
    }
}
