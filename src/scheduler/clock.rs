//! Frame pacing
//!
//! The host calls in whenever it can paint (requestAnimationFrame on the web,
//! often 120-144 Hz). `FrameClock` turns that stream into a fixed cadence and
//! `FpsMeter` reports what was actually achieved.

use crate::consts::{DEFAULT_FPS, FPS_WINDOW_MS};
use crate::error::{Error, Result};
use crate::interval_ms;

/// A frame rate must be finite and positive
pub fn validate_fps(fps: f64) -> Result<()> {
    if fps.is_finite() && fps > 0.0 {
        Ok(())
    } else {
        Err(Error::Config(format!("fps must be positive, got {}", fps)))
    }
}

/// A paint opportunity that fired
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    /// Whole intervals consumed by this frame (0 on the very first frame)
    pub intervals: u32,
    /// Time since the previous fired frame's accounting point
    pub elapsed_ms: f64,
}

/// Fixed-interval frame gate with carry-over
#[derive(Debug, Clone)]
pub struct FrameClock {
    interval_ms: f64,
    last_time: Option<f64>,
    total_intervals: u64,
}

impl FrameClock {
    pub fn new(fps: f64) -> Result<Self> {
        validate_fps(fps)?;
        Ok(Self::with_interval(interval_ms(fps)))
    }

    fn with_interval(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_time: None,
            total_intervals: 0,
        }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Change the cadence. A rejected rate leaves the clock untouched.
    pub fn set_fps(&mut self, fps: f64) -> Result<()> {
        validate_fps(fps)?;
        self.interval_ms = interval_ms(fps);
        Ok(())
    }

    /// Intervals consumed since the clock started
    pub fn total_intervals(&self) -> u64 {
        self.total_intervals
    }

    /// Accounting point of the last fired frame
    pub fn last_time(&self) -> Option<f64> {
        self.last_time
    }

    /// Decide whether the frame at `now` runs.
    ///
    /// A frame that fires moves the accounting point forward by whole
    /// intervals only, keeping the remainder so late frames catch up instead
    /// of drifting.
    pub fn poll(&mut self, now: f64) -> Option<FrameTick> {
        let Some(last) = self.last_time else {
            self.last_time = Some(now);
            return Some(FrameTick {
                intervals: 0,
                elapsed_ms: 0.0,
            });
        };

        let elapsed = now - last;
        if elapsed < self.interval_ms {
            return None;
        }

        let remainder = elapsed % self.interval_ms;
        let intervals = ((elapsed - remainder) / self.interval_ms).round() as u32;
        self.last_time = Some(now - remainder);
        self.total_intervals += intervals as u64;

        Some(FrameTick {
            intervals,
            elapsed_ms: elapsed,
        })
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::with_interval(interval_ms(DEFAULT_FPS))
    }
}

/// Frames counted over a rolling one-second window
#[derive(Debug, Clone, Default)]
pub struct FpsMeter {
    window_start: Option<f64>,
    frames: u32,
    fps: u32,
}

impl FpsMeter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a fired frame. Returns the new value when the window closes.
    pub fn record(&mut self, now: f64) -> Option<u32> {
        let start = *self.window_start.get_or_insert(now);
        let mut closed = None;
        if now - start >= FPS_WINDOW_MS {
            self.fps = self.frames;
            self.frames = 0;
            self.window_start = Some(now);
            closed = Some(self.fps);
        }
        self.frames += 1;
        closed
    }

    /// Achieved frames per second over the last full window
    pub fn fps(&self) -> u32 {
        self.fps
    }
}
