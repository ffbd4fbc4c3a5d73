//! Drawing and undo/redo engine for the shared whiteboard.
//!
//! This crate is compiled to WebAssembly and runs in the browser, but all of
//! its logic is plain Rust and testable natively. It owns the lifecycle of a
//! board on one client: translating raw pointer and keyboard events into
//! strokes, keeping the undo/redo history, and redrawing the surface. The host
//! layer wires DOM events to the engine and hands the resulting
//! [`session::Action`]s to the sync adapter for persistence.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`session`] | [`session::WhiteboardSession`], the single owner of board state |
//! | [`engine`] | Browser binding of a session to an `HtmlCanvasElement` |
//! | [`stroke`] | Stroke sum type, tools, and board scoping |
//! | [`history`] | Linear undo/redo history |
//! | [`input`] | Pointer gesture state machine and keyboard shortcuts |
//! | [`text`] | Text tool editing session |
//! | [`point`] | Points and the surface viewport |
//! | [`render`] | Render loop and per-tool draw primitives |
//! | [`surface`] | Drawing surface trait, browser and recording implementations |
//! | [`consts`] | Drawing defaults and render constants |

pub mod consts;
pub mod engine;
pub mod history;
pub mod input;
pub mod point;
pub mod render;
pub mod session;
pub mod stroke;
pub mod surface;
pub mod text;
