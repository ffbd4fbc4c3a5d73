//! Service layer.

pub mod strokes;
