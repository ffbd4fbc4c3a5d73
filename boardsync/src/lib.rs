//! Sync adapter between a whiteboard session and the remote stroke log.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session produces [`whiteboard::session::Action`]s; this crate turns the
//! remote ones into calls on a [`stroke_log::StrokeLog`] and runs them on a single
//! background worker, so the drawing path never waits on the network. The
//! log is reached over HTTP ([`http::HttpStrokeLog`]) or kept in memory
//! ([`memory::MemoryStrokeLog`]) for offline use and tests.

pub mod adapter;
pub mod error;
pub mod http;
pub mod memory;
pub mod stroke_log;

pub use adapter::{SyncAdapter, SyncConfig};
pub use error::SyncError;
pub use stroke_log::StrokeLog;
