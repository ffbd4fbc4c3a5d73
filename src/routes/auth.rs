//! Caller identity, as asserted by the identity gateway in front of the service.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use axum::http::StatusCode;
use axum::http::request::Parts;

pub const USER_HEADER: &str = "x-user-id";
pub const TENANTS_HEADER: &str = "x-tenant-ids";

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated caller extracted from the gateway headers.
/// Use as a handler parameter to require authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: String,
    /// Tenants the caller is a member of.
    pub tenant_ids: Vec<String>,
}

impl AuthUser {
    /// Check membership of `tenant_id`.
    ///
    /// # Errors
    ///
    /// Returns `403` if the caller is not a member.
    pub fn require_tenant(&self, tenant_id: &str) -> Result<(), StatusCode> {
        if self.tenant_ids.iter().any(|t| t == tenant_id) {
            Ok(())
        } else {
            Err(StatusCode::FORBIDDEN)
        }
    }
}

fn header_str<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = header_str(parts, USER_HEADER).ok_or(StatusCode::UNAUTHORIZED)?;
        let tenant_ids = header_str(parts, TENANTS_HEADER)
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self { user_id: user_id.to_owned(), tenant_ids })
    }
}
