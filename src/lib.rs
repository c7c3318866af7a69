//! Sprite Stage - a fixed-cadence 2D presentation layer
//!
//! Core modules:
//! - `scheduler`: Frame clock, FPS meter and the `Stage` tick context
//! - `input`: Tick-stamped keyboard/mouse/touch state
//! - `draw`: Z-ordered draw queue and the renderable surface contract
//! - `sprite`: Sprites, capability traits and SAT collision
//! - `target`: Offscreen render targets in a generation-checked arena
//! - `platform`: Browser host adapter (canvas 2D, requestAnimationFrame)

pub mod color;
pub mod draw;
pub mod error;
pub mod font;
pub mod image;
pub mod input;
pub mod platform;
pub mod scheduler;
pub mod settings;
pub mod sprite;
pub mod target;

#[cfg(test)]
pub(crate) mod test_utils;

pub use color::Color;
pub use draw::{Blend, Canvas, DrawEx, DrawQueue, Surface};
pub use error::{Error, Result};
pub use font::Font;
pub use image::ImageHandle;
pub use input::InputTracker;
pub use scheduler::{FrameOutcome, Stage};
pub use settings::Settings;
pub use sprite::{Collider, Drawable, HitBox, Reaction, Sprite, Updatable, Vanishable};
pub use target::{RenderTarget, RenderTargets, TargetHandle, TargetOwner};

/// Stage configuration constants
pub mod consts {
    /// Default target frame rate
    pub const DEFAULT_FPS: f64 = 60.0;
    /// Length of the achieved-FPS window in milliseconds
    pub const FPS_WINDOW_MS: f64 = 1000.0;

    /// Default canvas dimensions
    pub const DEFAULT_WIDTH: u32 = 640;
    pub const DEFAULT_HEIGHT: u32 = 480;

    /// Denominator guard for horizontal edges in the point-in-polygon ray cast
    pub const RAY_CAST_EPSILON: f32 = 1e-10;
}

/// Frame interval in milliseconds for a target frame rate
#[inline]
pub fn interval_ms(fps: f64) -> f64 {
    1000.0 / fps
}

