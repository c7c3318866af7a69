//! Image handles
//!
//! Pixel data lives in the host backend. The core only ever sees a handle
//! carrying the backend id and the image size.

use serde::{Deserialize, Serialize};

/// Non-owning reference to a backend image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageHandle {
    /// Backend-assigned id
    pub id: u32,
    pub width: u32,
    pub height: u32,
}

impl ImageHandle {
    pub const fn new(id: u32, width: u32, height: u32) -> Self {
        Self { id, width, height }
    }

    /// Default rotation/scale pivot (half width, half height)
    pub fn center(&self) -> (f32, f32) {
        ((self.width / 2) as f32, (self.height / 2) as f32)
    }
}
