//! Crate error type
//!
//! Only caller programming errors surface here. Frame overruns are absorbed by
//! the scheduler and asset failures belong to the host backend.

use thiserror::Error;

use crate::draw::DrawKind;

#[derive(Debug, Error)]
pub enum Error {
    /// Collision shape built from a value list of unsupported length
    #[error("invalid hit box: expected 2, 3, 4 or 6 values, got {len}")]
    InvalidHitBox { len: usize },

    /// Draw operation the stage does not implement
    #[error("unsupported draw operation: {0:?}")]
    UnsupportedDraw(DrawKind),

    /// Invalid stage settings
    #[error("invalid settings: {0}")]
    Config(String),

    #[error("settings json: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
