//! Platform abstraction layer
//!
//! The core only talks to `draw::Surface` and `InputTracker`. This layer
//! supplies both on the browser:
//! - Canvas 2D surface and offscreen image store
//! - Keyboard/mouse/touch listeners
//! - requestAnimationFrame driver
//!
//! Native builds run headless against `draw::NullSurface`.

#[cfg(target_arch = "wasm32")]
pub mod web;
