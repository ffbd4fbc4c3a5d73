//! Browser binding: a [`WhiteboardSession`] attached to a canvas element.
//!
//! `Engine` measures the canvas on every pointer-down so surface-local
//! coordinates follow layout changes, and draws through the element's 2D
//! context. All board logic stays in the session so it can be tested without
//! a browser.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::input::{Key, Modifiers};
use crate::point::{Point, Viewport};
use crate::session::{Action, WhiteboardSession};
use crate::stroke::BoardKey;

/// The full whiteboard engine. Wraps a session and owns the canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub session: WhiteboardSession,
}

impl Engine {
    /// Create an engine bound to `canvas` for `user_id` on `board`.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, board: BoardKey, user_id: impl Into<String>) -> Self {
        let mut engine = Self { canvas, session: WhiteboardSession::new(board, user_id) };
        engine.measure();
        engine
    }

    /// Size the canvas backing store to its container and re-measure.
    pub fn fit_to(&mut self, width_css: u32, height_css: u32) -> Vec<Action> {
        self.canvas.set_width(width_css);
        self.canvas.set_height(height_css);
        self.measure()
    }

    fn measure(&mut self) -> Vec<Action> {
        let rect = self.canvas.get_bounding_client_rect();
        self.session
            .set_viewport(Viewport::new(rect.left(), rect.top(), rect.width(), rect.height()))
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, client_x: f64, client_y: f64) -> Vec<Action> {
        self.measure();
        self.session.pointer_down(Point::new(client_x, client_y))
    }

    pub fn on_pointer_move(&mut self, client_x: f64, client_y: f64) -> Vec<Action> {
        self.session.pointer_move(Point::new(client_x, client_y))
    }

    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.session.pointer_up()
    }

    pub fn on_key_down(&mut self, key: &str, modifiers: Modifiers) -> Vec<Action> {
        self.session.key_down(&Key::new(key), modifiers)
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a draw call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let mut ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        self.session.render(&mut ctx)
    }
}
