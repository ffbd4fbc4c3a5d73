//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the stroke log API under a single Axum router. Every
//! board route is tenant scoped; callers are identified by the gateway
//! headers read in [`auth::AuthUser`].

pub mod auth;
pub mod strokes;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{delete, get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the service router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/api/tenants/{tenant}/boards/{board}/strokes",
            get(strokes::list_strokes)
                .post(strokes::append_stroke)
                .delete(strokes::delete_all),
        )
        .route("/api/tenants/{tenant}/boards/{board}/strokes/latest", delete(strokes::delete_latest))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
