//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! only holds the stroke store; boards have no other server-side state.

use std::sync::Arc;

use crate::services::strokes::StrokeStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn StrokeStore>,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn StrokeStore>) -> Self {
        Self { store }
    }
}
