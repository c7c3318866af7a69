//! Fixed-cadence frame loop
//!
//! `clock` decides when a frame runs; `stage` runs it.

pub mod clock;
pub mod stage;

pub use clock::{FpsMeter, FrameClock, FrameTick, validate_fps};
pub use stage::{FrameOutcome, Stage, TickFn};
