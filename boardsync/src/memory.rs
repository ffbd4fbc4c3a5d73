//! In-process stroke log.
//!
//! Keeps each board's log in a `Vec` behind a tokio mutex. Tenant membership
//! can be restricted to mimic the service's authorization, and the log can be
//! switched into a failing mode to exercise best-effort sync.

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;
use whiteboard::stroke::{BoardKey, Stroke};

use crate::error::SyncError;
use crate::stroke_log::StrokeLog;

/// Stroke log held in memory. Clones share the same logs.
#[derive(Clone, Default)]
pub struct MemoryStrokeLog {
    boards: Arc<Mutex<HashMap<BoardKey, Vec<Stroke>>>>,
    tenants: Option<Arc<HashSet<String>>>,
    failing: Arc<AtomicBool>,
}

impl MemoryStrokeLog {
    /// A log open to every tenant.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A log that only accepts calls for the given tenants.
    #[must_use]
    pub fn for_tenants<I, S>(tenants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { tenants: Some(Arc::new(tenants.into_iter().map(Into::into).collect())), ..Self::default() }
    }

    /// Make every subsequent call fail with [`SyncError::Unavailable`].
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self, board: &BoardKey) -> Result<(), SyncError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(SyncError::Unavailable("memory log is failing".into()));
        }
        if let Some(tenants) = &self.tenants {
            if !tenants.contains(&board.tenant_id) {
                return Err(SyncError::Unauthorized(board.tenant_id.clone()));
            }
        }
        Ok(())
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl StrokeLog for MemoryStrokeLog {
    async fn append(&self, stroke: &Stroke) -> Result<(), SyncError> {
        self.check(&stroke.board)?;
        let mut boards = self.boards.lock().await;
        boards.entry(stroke.board.clone()).or_default().push(stroke.clone());
        Ok(())
    }

    async fn list(&self, board: &BoardKey) -> Result<Vec<Stroke>, SyncError> {
        self.check(board)?;
        let boards = self.boards.lock().await;
        Ok(boards.get(board).cloned().unwrap_or_default())
    }

    async fn delete_most_recent(&self, board: &BoardKey) -> Result<(), SyncError> {
        self.check(board)?;
        let mut boards = self.boards.lock().await;
        if let Some(strokes) = boards.get_mut(board) {
            strokes.pop();
        }
        Ok(())
    }

    async fn delete_all(&self, board: &BoardKey) -> Result<(), SyncError> {
        self.check(board)?;
        let mut boards = self.boards.lock().await;
        boards.remove(board);
        Ok(())
    }
}
