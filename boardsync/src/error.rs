//! Errors raised by stroke log calls.

/// A failed remote stroke log call.
///
/// None of these are surfaced to the drawing UI: the adapter logs them and
/// keeps local state as it is.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("not authorized for tenant {0}")]
    Unauthorized(String),
    #[error("stroke log returned status {0}")]
    Status(u16),
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("stroke log unavailable: {0}")]
    Unavailable(String),
}

impl SyncError {
    /// Whether the caller is not a member of the board's tenant.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}
