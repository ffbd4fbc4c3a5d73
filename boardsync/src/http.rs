//! Stroke log client for the sketchboard service.
//!
//! Each operation maps to one request under
//! `/api/tenants/{tenant}/boards/{board}/strokes`. The caller's identity is
//! forwarded in the `x-user-id` and `x-tenant-ids` headers the service reads
//! from its identity gateway.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use whiteboard::stroke::{BoardKey, Stroke};

use crate::adapter::SyncConfig;
use crate::error::SyncError;
use crate::stroke_log::StrokeLog;

pub const USER_HEADER: &str = "x-user-id";
pub const TENANTS_HEADER: &str = "x-tenant-ids";

/// [`StrokeLog`] backed by the HTTP stroke log service.
#[derive(Clone, Debug)]
pub struct HttpStrokeLog {
    client: Client,
    base_url: Url,
    user_id: String,
    tenant_ids: Vec<String>,
}

impl HttpStrokeLog {
    /// Client for the service at `base_url`, acting as `user_id` with
    /// membership in `tenant_ids`.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidBaseUrl`] if `base_url` cannot be parsed
    /// or cannot carry a path.
    pub fn new(base_url: &str, user_id: impl Into<String>, tenant_ids: Vec<String>) -> Result<Self, SyncError> {
        let base_url = Url::parse(base_url).map_err(|e| SyncError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(SyncError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self { client: Client::new(), base_url, user_id: user_id.into(), tenant_ids })
    }

    /// Client for the service named by `config`.
    ///
    /// # Errors
    ///
    /// See [`HttpStrokeLog::new`].
    pub fn from_config(config: &SyncConfig, user_id: impl Into<String>, tenant_ids: Vec<String>) -> Result<Self, SyncError> {
        Self::new(&config.base_url, user_id, tenant_ids)
    }

    /// URL of the board's stroke collection, or of its latest stroke.
    pub(crate) fn strokes_url(&self, board: &BoardKey, latest: bool) -> Result<Url, SyncError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| SyncError::InvalidBaseUrl(self.base_url.to_string()))?;
            segments
                .pop_if_empty()
                .extend(["api", "tenants", board.tenant_id.as_str(), "boards", board.board_id.as_str(), "strokes"]);
            if latest {
                segments.push("latest");
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client
            .request(method, url)
            .header(USER_HEADER, &self.user_id)
            .header(TENANTS_HEADER, self.tenant_ids.join(","))
    }
}

/// Map a non-success response to [`SyncError`].
pub(crate) fn check_status(status: StatusCode, board: &BoardKey) -> Result<(), SyncError> {
    if status.is_success() {
        return Ok(());
    }
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(SyncError::Unauthorized(board.tenant_id.clone()));
    }
    Err(SyncError::Status(status.as_u16()))
}

fn checked(response: Response, board: &BoardKey) -> Result<Response, SyncError> {
    check_status(response.status(), board)?;
    Ok(response)
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl StrokeLog for HttpStrokeLog {
    async fn append(&self, stroke: &Stroke) -> Result<(), SyncError> {
        let url = self.strokes_url(&stroke.board, false)?;
        let response = self.request(Method::POST, url).json(stroke).send().await?;
        checked(response, &stroke.board)?;
        Ok(())
    }

    async fn list(&self, board: &BoardKey) -> Result<Vec<Stroke>, SyncError> {
        let url = self.strokes_url(board, false)?;
        let response = self.request(Method::GET, url).send().await?;
        let strokes = checked(response, board)?.json::<Vec<Stroke>>().await?;
        Ok(strokes)
    }

    async fn delete_most_recent(&self, board: &BoardKey) -> Result<(), SyncError> {
        let url = self.strokes_url(board, true)?;
        let response = self.request(Method::DELETE, url).send().await?;
        checked(response, board)?;
        Ok(())
    }

    async fn delete_all(&self, board: &BoardKey) -> Result<(), SyncError> {
        let url = self.strokes_url(board, false)?;
        let response = self.request(Method::DELETE, url).send().await?;
        checked(response, board)?;
        Ok(())
    }
}
