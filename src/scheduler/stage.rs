//! The per-tick context
//!
//! `Stage` owns everything the loop touches: clock, input, the root draw
//! queue and the render-target arena. The host calls `step` on every paint
//! opportunity and the stage decides whether a frame runs.

use crate::color::Color;
use crate::draw::{Canvas, DrawQueue, Surface};
use crate::error::Result;
use crate::input::InputTracker;
use crate::settings::Settings;
use crate::target::{RenderTarget, RenderTargets, TargetOwner};

use super::clock::{FpsMeter, FrameClock};

/// User code run once per fired frame
pub type TickFn = Box<dyn FnMut(&mut Stage) -> Result<()>>;

/// What `Stage::step` did with a paint opportunity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// No callback installed yet
    Idle,
    /// Too early for the next frame
    Skipped,
    /// A full tick ran and painted
    Rendered { tick: u64 },
}

pub struct Stage {
    width: u32,
    height: u32,
    pub bgcolor: Color,
    clock: FrameClock,
    fps: FpsMeter,
    input: InputTracker,
    queue: DrawQueue,
    targets: RenderTargets,
    callback: Option<TickFn>,
    running: bool,
}

impl Stage {
    pub fn new(settings: &Settings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            width: settings.width,
            height: settings.height,
            bgcolor: settings.bgcolor,
            clock: FrameClock::new(settings.fps)?,
            fps: FpsMeter::new(),
            input: InputTracker::new(),
            queue: DrawQueue::new(),
            targets: RenderTargets::new(),
            callback: None,
            running: false,
        })
    }

    /// Install the tick callback and start the loop.
    ///
    /// Returns `false` if the loop was already running. The new callback
    /// replaces the old one either way, and no second loop starts.
    pub fn run<F>(&mut self, callback: F) -> bool
    where
        F: FnMut(&mut Stage) -> Result<()> + 'static,
    {
        self.callback = Some(Box::new(callback));
        if self.running {
            log::debug!("Stage already running, callback replaced");
            return false;
        }
        self.running = true;
        log::info!(
            "Stage running at {}x{}, {:.1}ms per frame",
            self.width,
            self.height,
            self.clock.interval_ms()
        );
        true
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Handle one paint opportunity at host time `now` (ms).
    ///
    /// On a fired frame: input advances, the root queue and every target
    /// queue are reset, the callback runs, the surface is sized and cleared to
    /// `bgcolor`, the queue is painted and the render targets are flushed. A
    /// callback error returns early and nothing of that frame is painted.
    pub fn step(&mut self, now: f64, surface: &mut dyn Surface) -> Result<FrameOutcome> {
        if !self.running {
            return Ok(FrameOutcome::Idle);
        }
        let Some(frame) = self.clock.poll(now) else {
            return Ok(FrameOutcome::Skipped);
        };
        if frame.intervals > 1 {
            log::trace!(
                "Frame late by {} interval(s) ({:.2}ms)",
                frame.intervals - 1,
                frame.elapsed_ms
            );
        }
        if let Some(fps) = self.fps.record(now) {
            log::debug!("FPS: {}", fps);
        }

        self.input.on_tick();
        self.queue.reset();
        // Leftovers from a frame whose callback failed
        self.targets.discard_pending();

        let result = match self.callback.take() {
            Some(mut callback) => {
                let result = callback(self);
                // The callback may have installed a replacement via `run`
                if self.callback.is_none() {
                    self.callback = Some(callback);
                }
                result
            }
            None => Ok(()),
        };
        result?;

        surface.resize(self.width, self.height);
        surface.fill(self.bgcolor);
        self.queue.drain(surface)?;
        self.targets.flush();

        Ok(FrameOutcome::Rendered {
            tick: self.input.tick(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// New canvas size, applied to the surface on the next fired frame
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    pub fn set_fps(&mut self, fps: f64) -> Result<()> {
        self.clock.set_fps(fps)?;
        log::debug!("Frame interval now {:.2}ms", self.clock.interval_ms());
        Ok(())
    }

    /// Frames actually run over the last full second
    pub fn real_fps(&self) -> u32 {
        self.fps.fps()
    }

    /// Ticks run so far
    pub fn tick(&self) -> u64 {
        self.input.tick()
    }

    pub fn input(&self) -> &InputTracker {
        &self.input
    }

    /// Event side of the input tracker, for host handlers
    pub fn input_mut(&mut self) -> &mut InputTracker {
        &mut self.input
    }

    pub fn targets(&self) -> &RenderTargets {
        &self.targets
    }

    pub fn targets_mut(&mut self) -> &mut RenderTargets {
        &mut self.targets
    }

    /// Register an offscreen target. Dropping the returned owner releases it.
    pub fn create_target(&mut self, target: RenderTarget) -> TargetOwner {
        let owner = self.targets.insert(target);
        log::debug!("Created render target {:?}", owner.handle());
        owner
    }
}

impl Canvas for Stage {
    fn queue_mut(&mut self) -> &mut DrawQueue {
        &mut self.queue
    }
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bgcolor", &self.bgcolor)
            .field("tick", &self.input.tick())
            .field("running", &self.running)
            .field("targets", &self.targets.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{C_BLUE, C_RED};
    use crate::draw::DEFAULT_Z;
    use crate::error::Error;
    use crate::image::ImageHandle;
    use crate::input::K_SPACE;
    use crate::test_utils::{Painted, RecordingSurface};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn stage() -> Stage {
        Stage::new(&Settings {
            bgcolor: C_BLUE,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_idle_until_run() {
        let mut stage = stage();
        let mut surface = RecordingSurface::new();
        assert_eq!(stage.step(0.0, &mut surface).unwrap(), FrameOutcome::Idle);
        assert!(surface.painted.is_empty());
    }

    #[test]
    fn test_frame_paints_background_then_queue_in_z_order() {
        let mut stage = stage();
        stage.run(|stage| {
            stage.draw(0.0, 0.0, ImageHandle::new(2, 4, 4), 5.0);
            stage.draw(0.0, 0.0, ImageHandle::new(1, 4, 4), 1.0);
            Ok(())
        });

        let mut surface = RecordingSurface::new();
        let outcome = stage.step(0.0, &mut surface).unwrap();
        assert!(matches!(outcome, FrameOutcome::Rendered { .. }));
        assert_eq!(surface.painted[1], Painted::Fill(C_BLUE));
        assert_eq!(surface.blit_ids(), vec![1, 2]);
    }

    #[test]
    fn test_frames_are_capped() {
        let mut stage = stage();
        let calls = Rc::new(RefCell::new(0));
        let counter = calls.clone();
        stage.run(move |_| {
            *counter.borrow_mut() += 1;
            Ok(())
        });

        let mut surface = RecordingSurface::new();
        stage.step(0.0, &mut surface).unwrap();
        assert_eq!(stage.step(8.0, &mut surface).unwrap(), FrameOutcome::Skipped);
        stage.step(17.0, &mut surface).unwrap();
        assert_eq!(*calls.borrow(), 2);
    }

    #[test]
    fn test_second_run_does_not_start_another_loop() {
        let mut stage = stage();
        assert!(stage.run(|_| Ok(())));
        assert!(!stage.run(|_| Ok(())));
        assert!(stage.is_running());
    }

    #[test]
    fn test_callback_error_skips_paint_and_flush() {
        let mut stage = stage();
        let rt = RenderTarget::new(ImageHandle::new(9, 8, 8), Box::new(RecordingSurface::new()));
        let owner = stage.create_target(rt);
        let handle = owner.handle();
        stage.run(move |stage| {
            if let Some(rt) = stage.targets_mut().get_mut(handle) {
                rt.draw_box_fill(0.0, 0.0, 1.0, 1.0, C_RED, DEFAULT_Z);
            }
            stage.draw_box_fill(0.0, 0.0, 1.0, 1.0, C_RED, DEFAULT_Z);
            Err(Error::Config("boom".into()))
        });

        let mut surface = RecordingSurface::new();
        assert!(stage.step(0.0, &mut surface).is_err());
        assert!(surface.painted.is_empty());
        assert_eq!(stage.targets().get(handle).map(|t| t.pending()), Some(1));
    }

    #[test]
    fn test_failed_frame_target_commands_do_not_leak_into_next_frame() {
        let mut stage = stage();
        let rt = RenderTarget::new(ImageHandle::new(9, 8, 8), Box::new(RecordingSurface::new()));
        let owner = stage.create_target(rt);
        let handle = owner.handle();
        let pending = Rc::new(RefCell::new(Vec::new()));
        let seen = pending.clone();
        let mut fail = true;
        stage.run(move |stage| {
            if let Some(rt) = stage.targets_mut().get_mut(handle) {
                rt.draw_box_fill(0.0, 0.0, 1.0, 1.0, C_RED, DEFAULT_Z);
                seen.borrow_mut().push(rt.pending());
            }
            if std::mem::take(&mut fail) {
                return Err(Error::Config("boom".into()));
            }
            Ok(())
        });

        let mut surface = RecordingSurface::new();
        assert!(stage.step(0.0, &mut surface).is_err());
        stage.step(20.0, &mut surface).unwrap();
        assert_eq!(*pending.borrow(), vec![1, 1]);
    }

    #[test]
    fn test_dropped_target_owner_is_reclaimed_after_one_frame() {
        let mut stage = stage();
        let rt = RenderTarget::new(ImageHandle::new(9, 8, 8), Box::new(RecordingSurface::new()));
        let owner = stage.create_target(rt);
        assert_eq!(stage.targets().len(), 1);
        stage.run(|_| Ok(()));

        drop(owner);
        let mut surface = RecordingSurface::new();
        stage.step(0.0, &mut surface).unwrap();
        assert_eq!(stage.targets().len(), 0);
    }

    #[test]
    fn test_resize_reaches_surface() {
        let mut stage = stage();
        stage.run(|_| Ok(()));
        stage.resize(100, 50);

        let mut surface = RecordingSurface::new();
        stage.step(0.0, &mut surface).unwrap();
        assert_eq!(
            surface.painted[0],
            Painted::Resize {
                width: 100,
                height: 50
            }
        );
        assert_eq!(surface.painted[1], Painted::Fill(C_BLUE));
    }

    #[test]
    fn test_invalid_fps_is_rejected() {
        let mut stage = stage();
        assert!(matches!(stage.set_fps(0.0), Err(Error::Config(_))));
        assert!(stage.set_fps(-1.0).is_err());
        assert!(stage.set_fps(f64::NAN).is_err());
        stage.set_fps(30.0).unwrap();

        let settings = Settings {
            fps: 0.0,
            ..Default::default()
        };
        assert!(matches!(Stage::new(&settings), Err(Error::Config(_))));
    }

    #[test]
    fn test_flush_discards_unpainted_target_commands() {
        let mut stage = stage();
        let rt = RenderTarget::new(ImageHandle::new(9, 8, 8), Box::new(RecordingSurface::new()));
        let owner = stage.create_target(rt);
        let handle = owner.handle();
        stage.run(move |stage| {
            if let Some(rt) = stage.targets_mut().get_mut(handle) {
                rt.draw_box(0.0, 0.0, 1.0, 1.0, C_RED, DEFAULT_Z);
            }
            Ok(())
        });

        let mut surface = RecordingSurface::new();
        stage.step(0.0, &mut surface).unwrap();
        assert_eq!(stage.targets().get(handle).map(|t| t.pending()), Some(0));
    }

    #[test]
    fn test_press_is_pushed_on_next_tick_only() {
        let mut stage = stage();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        stage.run(move |stage| {
            log.borrow_mut().push(stage.input().is_key_pushed(K_SPACE));
            Ok(())
        });

        let mut surface = RecordingSurface::new();
        stage.step(0.0, &mut surface).unwrap();
        stage.input_mut().press_key(K_SPACE, false);
        stage.step(20.0, &mut surface).unwrap();
        stage.step(40.0, &mut surface).unwrap();
        assert_eq!(*seen.borrow(), vec![false, true, false]);
    }

    #[test]
    fn test_tick_advances_once_per_fired_frame() {
        let mut stage = stage();
        stage.run(|_| Ok(()));
        let start = stage.tick();
        let mut surface = RecordingSurface::new();
        stage.step(0.0, &mut surface).unwrap();
        stage.step(1.0, &mut surface).unwrap();
        stage.step(20.0, &mut surface).unwrap();
        assert_eq!(stage.tick(), start + 2);
    }

    #[test]
    fn test_callback_can_replace_itself() {
        let mut stage = stage();
        let hits = Rc::new(RefCell::new(Vec::new()));
        let first = hits.clone();
        stage.run(move |stage| {
            first.borrow_mut().push("first");
            let second = first.clone();
            stage.run(move |_| {
                second.borrow_mut().push("second");
                Ok(())
            });
            Ok(())
        });

        let mut surface = RecordingSurface::new();
        stage.step(0.0, &mut surface).unwrap();
        stage.step(20.0, &mut surface).unwrap();
        assert_eq!(*hits.borrow(), vec!["first", "second"]);
    }
}
