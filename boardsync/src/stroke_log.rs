//! The four operations the whiteboard needs from its persistence service.
//!
//! In the browser the HTTP client's futures are not `Send`, so on `wasm32`
//! the trait drops the `Send` bounds and the worker runs on the page's
//! single-threaded executor.

use async_trait::async_trait;
use whiteboard::stroke::{BoardKey, Stroke};

use crate::error::SyncError;

/// Append-only, per-board ordered stroke log.
///
/// Every call is scoped by `(board, tenant)`; implementations reject callers
/// that are not members of the tenant with [`SyncError::Unauthorized`].
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait StrokeLog: MaybeSendSync {
    /// Append `stroke` to the end of its board's log.
    async fn append(&self, stroke: &Stroke) -> Result<(), SyncError>;

    /// All strokes of the board in ascending append order.
    async fn list(&self, board: &BoardKey) -> Result<Vec<Stroke>, SyncError>;

    /// Remove the newest stroke of the board, whoever appended it.
    async fn delete_most_recent(&self, board: &BoardKey) -> Result<(), SyncError>;

    /// Remove every stroke of the board.
    async fn delete_all(&self, board: &BoardKey) -> Result<(), SyncError>;
}

/// `Send + Sync` natively; no bound on `wasm32`.
#[cfg(not(target_arch = "wasm32"))]
pub trait MaybeSendSync: Send + Sync {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: Send + Sync> MaybeSendSync for T {}

/// `Send + Sync` natively; no bound on `wasm32`.
#[cfg(target_arch = "wasm32")]
pub trait MaybeSendSync {}
#[cfg(target_arch = "wasm32")]
impl<T> MaybeSendSync for T {}
