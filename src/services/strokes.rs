//! Stroke log service — append-only ordered stroke storage per board.
//!
//! DESIGN
//! ======
//! Every board is an ordered log of strokes keyed by `(tenant_id, board_id)`.
//! Order is arrival order at this service: Postgres assigns a `BIGSERIAL`
//! sequence, the memory store appends to a `Vec`. Nothing is ever reordered,
//! so a client that replays the list gets strokes in commit order.
//!
//! `delete_most_recent` removes whichever stroke arrived last, regardless of
//! who drew it. Concurrent clients can therefore undo each other's strokes;
//! there is no conflict detection.
//!
//! ERROR HANDLING
//! ==============
//! Storage failures surface as [`StoreError`] and map to `500`. Deleting from
//! an empty board is not an error.

#[cfg(test)]
#[path = "strokes_test.rs"]
mod strokes_test;

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::RwLock;
use uuid::Uuid;
use whiteboard::stroke::{BoardKey, Stroke};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("stroke encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    match std::env::var(key) {
        Ok(value) => value.parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}

/// Storage backend for board stroke logs.
#[async_trait]
pub trait StrokeStore: Send + Sync {
    /// Append `stroke` to the end of its board's log. Returns the new row id.
    async fn append(&self, stroke: &Stroke) -> Result<Uuid, StoreError>;

    /// All strokes of `board` in arrival order.
    async fn list(&self, board: &BoardKey) -> Result<Vec<Stroke>, StoreError>;

    /// Remove the last stroke of `board`. Returns whether one existed.
    async fn delete_most_recent(&self, board: &BoardKey) -> Result<bool, StoreError>;

    /// Remove every stroke of `board`. Returns how many were removed.
    async fn delete_all(&self, board: &BoardKey) -> Result<u64, StoreError>;
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// Process-local store. Used when no database is configured and in tests.
#[derive(Default)]
pub struct MemoryStore {
    boards: RwLock<HashMap<BoardKey, Vec<(Uuid, Stroke)>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StrokeStore for MemoryStore {
    async fn append(&self, stroke: &Stroke) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        let mut boards = self.boards.write().await;
        boards.entry(stroke.board.clone()).or_default().push((id, stroke.clone()));
        Ok(id)
    }

    async fn list(&self, board: &BoardKey) -> Result<Vec<Stroke>, StoreError> {
        let boards = self.boards.read().await;
        Ok(boards
            .get(board)
            .map(|rows| rows.iter().map(|(_, stroke)| stroke.clone()).collect())
            .unwrap_or_default())
    }

    async fn delete_most_recent(&self, board: &BoardKey) -> Result<bool, StoreError> {
        let mut boards = self.boards.write().await;
        Ok(boards.get_mut(board).and_then(Vec::pop).is_some())
    }

    async fn delete_all(&self, board: &BoardKey) -> Result<u64, StoreError> {
        let mut boards = self.boards.write().await;
        let removed = boards.remove(board).map_or(0, |rows| rows.len());
        Ok(u64::try_from(removed).unwrap_or(u64::MAX))
    }
}

// =============================================================================
// POSTGRES STORE
// =============================================================================

/// Store backed by the `strokes` table.
pub struct PgStrokeStore {
    pool: PgPool,
}

impl PgStrokeStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StrokeStore for PgStrokeStore {
    async fn append(&self, stroke: &Stroke) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        let body = serde_json::to_value(stroke)?;
        sqlx::query(
            "INSERT INTO strokes (id, tenant_id, board_id, created_by, created_at, stroke)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(id)
        .bind(&stroke.board.tenant_id)
        .bind(&stroke.board.board_id)
        .bind(&stroke.created_by)
        .bind(stroke.created_at)
        .bind(body)
        .execute(&self.pool)
        .await?;
        Ok(id)
    }

    async fn list(&self, board: &BoardKey) -> Result<Vec<Stroke>, StoreError> {
        let rows = sqlx::query_scalar::<_, serde_json::Value>(
            "SELECT stroke
             FROM strokes
             WHERE tenant_id = $1 AND board_id = $2
             ORDER BY seq ASC",
        )
        .bind(&board.tenant_id)
        .bind(&board.board_id)
        .fetch_all(&self.pool)
        .await?;

        let mut strokes = Vec::with_capacity(rows.len());
        for row in rows {
            strokes.push(serde_json::from_value(row)?);
        }
        Ok(strokes)
    }

    async fn delete_most_recent(&self, board: &BoardKey) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "DELETE FROM strokes
             WHERE id = (
                 SELECT id FROM strokes
                 WHERE tenant_id = $1 AND board_id = $2
                 ORDER BY seq DESC
                 LIMIT 1
             )",
        )
        .bind(&board.tenant_id)
        .bind(&board.board_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_all(&self, board: &BoardKey) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM strokes WHERE tenant_id = $1 AND board_id = $2")
            .bind(&board.tenant_id)
            .bind(&board.board_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
