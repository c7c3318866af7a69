//! Offscreen render targets
//!
//! Targets live in an arena. `insert` hands back a `TargetOwner`; dropping it
//! (or passing it to `release`) abandons the target. The per-frame sweep then
//! drops the target and any commands it never painted, and recycles the slot
//! with a bumped generation. `TargetHandle` is the cheap copyable alias that
//! sprites and scenes hold; once the slot is reclaimed it stops resolving.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::color::{C_DEFAULT, Color};
use crate::draw::{Canvas, DrawQueue, Surface};
use crate::error::Result;
use crate::image::ImageHandle;

/// Handle to a render target slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetHandle {
    index: u32,
    generation: u32,
}

/// Handles whose owners were dropped, waiting for the next sweep
type DroppedList = RefCell<Vec<TargetHandle>>;

/// Owning side of a render target. Dropping it releases the target.
#[must_use = "dropping the owner releases the render target"]
#[derive(Debug)]
pub struct TargetOwner {
    handle: TargetHandle,
    dropped: Weak<DroppedList>,
}

impl TargetOwner {
    pub fn handle(&self) -> TargetHandle {
        self.handle
    }
}

impl Drop for TargetOwner {
    fn drop(&mut self) {
        // Arena already gone: nothing left to reclaim
        if let Some(dropped) = self.dropped.upgrade() {
            dropped.borrow_mut().push(self.handle);
        }
    }
}

/// Offscreen surface with its own draw queue
pub struct RenderTarget {
    /// Image the backend exposes for the offscreen surface
    image: ImageHandle,
    pub bgcolor: Color,
    queue: DrawQueue,
    surface: Box<dyn Surface>,
}

impl RenderTarget {
    pub fn new(image: ImageHandle, surface: Box<dyn Surface>) -> Self {
        Self {
            image,
            bgcolor: C_DEFAULT,
            queue: DrawQueue::new(),
            surface,
        }
    }

    pub fn with_bgcolor(mut self, bgcolor: Color) -> Self {
        self.bgcolor = bgcolor;
        self
    }

    pub fn width(&self) -> u32 {
        self.image.width
    }

    pub fn height(&self) -> u32 {
        self.image.height
    }

    /// Image handle for blitting this target onto another canvas
    pub fn image(&self) -> ImageHandle {
        self.image
    }

    /// Repaint the offscreen surface: background, then queued commands.
    pub fn update(&mut self) -> Result<()> {
        self.surface.fill(self.bgcolor);
        self.queue.drain(self.surface.as_mut())
    }

    /// Drop commands queued since the last `update`
    pub fn discard_pending(&mut self) {
        self.queue.reset();
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl Canvas for RenderTarget {
    fn queue_mut(&mut self) -> &mut DrawQueue {
        &mut self.queue
    }
}

impl std::fmt::Debug for RenderTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderTarget")
            .field("image", &self.image)
            .field("bgcolor", &self.bgcolor)
            .field("pending", &self.queue.len())
            .finish()
    }
}

struct Slot {
    generation: u32,
    target: Option<RenderTarget>,
    /// Owner released the handle; reclaimed by the next sweep
    released: bool,
}

/// Arena of render targets
#[derive(Default)]
pub struct RenderTargets {
    slots: Vec<Slot>,
    free: Vec<u32>,
    dropped: Rc<DroppedList>,
}

impl RenderTargets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, target: RenderTarget) -> TargetOwner {
        let handle = if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.target = Some(target);
            slot.released = false;
            TargetHandle {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                target: Some(target),
                released: false,
            });
            TargetHandle {
                index,
                generation: 0,
            }
        };
        TargetOwner {
            handle,
            dropped: Rc::downgrade(&self.dropped),
        }
    }

    /// Owner dropped but not yet collected
    fn is_dropped(&self, handle: TargetHandle) -> bool {
        self.dropped.borrow().contains(&handle)
    }

    fn slot(&self, handle: TargetHandle) -> Option<&Slot> {
        self.slots
            .get(handle.index as usize)
            .filter(|s| s.generation == handle.generation && !s.released)
            .filter(|_| !self.is_dropped(handle))
    }

    pub fn is_alive(&self, handle: TargetHandle) -> bool {
        self.slot(handle).is_some_and(|s| s.target.is_some())
    }

    pub fn get(&self, handle: TargetHandle) -> Option<&RenderTarget> {
        self.slot(handle).and_then(|s| s.target.as_ref())
    }

    pub fn get_mut(&mut self, handle: TargetHandle) -> Option<&mut RenderTarget> {
        self.collect_dropped();
        self.slots
            .get_mut(handle.index as usize)
            .filter(|s| s.generation == handle.generation && !s.released)
            .and_then(|s| s.target.as_mut())
    }

    /// Owner gives the target up. Its resources go at the next sweep.
    pub fn release(&mut self, owner: TargetOwner) {
        drop(owner);
        self.collect_dropped();
    }

    /// Mark the slots of dropped owners as released
    fn collect_dropped(&mut self) {
        let dropped = std::mem::take(&mut *self.dropped.borrow_mut());
        for handle in dropped {
            match self.slots.get_mut(handle.index as usize) {
                Some(slot) if slot.generation == handle.generation => slot.released = true,
                _ => log::warn!("release of stale render target handle {:?}", handle),
            }
        }
    }

    /// Number of live targets
    pub fn len(&self) -> usize {
        let dropped = self.dropped.borrow();
        self.slots
            .iter()
            .enumerate()
            .filter(|(index, s)| {
                s.target.is_some()
                    && !s.released
                    && !dropped.contains(&TargetHandle {
                        index: *index as u32,
                        generation: s.generation,
                    })
            })
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reclaim released slots, including those whose owner was dropped.
    /// Returns how many were pruned.
    pub fn sweep(&mut self) -> usize {
        self.collect_dropped();
        let mut pruned = 0;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.released && slot.target.is_some() {
                slot.target = None;
                slot.released = false;
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index as u32);
                pruned += 1;
            }
        }
        if pruned > 0 {
            log::debug!("Pruned {} render target(s)", pruned);
        }
        pruned
    }

    /// Drop commands every live target queued but never painted
    pub fn discard_pending(&mut self) {
        for target in self.slots.iter_mut().filter_map(|s| s.target.as_mut()) {
            target.discard_pending();
        }
    }

    /// End-of-frame pass: sweep abandoned targets, then drop whatever live
    /// targets queued but never painted this frame.
    pub fn flush(&mut self) {
        self.sweep();
        self.discard_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{C_BLUE, C_RED};
    use crate::draw::DEFAULT_Z;
    use crate::test_utils::RecordingSurface;

    fn target(id: u32) -> RenderTarget {
        RenderTarget::new(
            ImageHandle::new(id, 64, 32),
            Box::new(RecordingSurface::new()),
        )
    }

    #[test]
    fn test_handle_resolves_until_released_and_swept() {
        let mut targets = RenderTargets::new();
        let owner = targets.insert(target(1));
        let h = owner.handle();
        assert!(targets.is_alive(h));
        assert_eq!(targets.get(h).map(|t| t.width()), Some(64));

        targets.release(owner);
        assert!(!targets.is_alive(h));
        assert!(targets.get_mut(h).is_none());
        assert_eq!(targets.sweep(), 1);
        assert!(targets.is_empty());
    }

    #[test]
    fn test_dropped_owner_is_reclaimed_by_sweep() {
        let mut targets = RenderTargets::new();
        let h = {
            let owner = targets.insert(target(1));
            owner.handle()
        };
        // Stops resolving as soon as the owner is gone
        assert!(!targets.is_alive(h));
        assert_eq!(targets.len(), 0);
        assert_eq!(targets.sweep(), 1);
        assert_eq!(targets.sweep(), 0);
    }

    #[test]
    fn test_recycled_slot_rejects_old_handle() {
        let mut targets = RenderTargets::new();
        let old = targets.insert(target(1));
        let old_handle = old.handle();
        targets.release(old);
        targets.sweep();

        let new = targets.insert(target(2));
        assert_ne!(old_handle, new.handle());
        assert!(!targets.is_alive(old_handle));
        assert_eq!(targets.get(new.handle()).map(|t| t.image().id), Some(2));
    }

    #[test]
    fn test_flush_discards_unpainted_commands() {
        let mut targets = RenderTargets::new();
        let owner = targets.insert(target(1));
        let rt = targets.get_mut(owner.handle()).unwrap();
        rt.draw_box_fill(0.0, 0.0, 1.0, 1.0, C_RED, DEFAULT_Z);
        assert_eq!(rt.pending(), 1);

        targets.flush();
        assert_eq!(targets.get(owner.handle()).map(|t| t.pending()), Some(0));
    }

    #[test]
    fn test_flush_prunes_released_before_live() {
        let mut targets = RenderTargets::new();
        let a = targets.insert(target(1));
        let b = targets.insert(target(2));
        let a_handle = a.handle();
        drop(a);
        targets.flush();
        assert!(!targets.is_alive(a_handle));
        assert!(targets.is_alive(b.handle()));
        assert_eq!(targets.len(), 1);
    }

    #[test]
    fn test_update_drains_queue() {
        let mut rt = target(1).with_bgcolor(C_BLUE);
        rt.draw_circle_fill(2.0, 2.0, 1.0, C_RED, DEFAULT_Z);
        rt.update().unwrap();
        assert_eq!(rt.pending(), 0);
    }

    #[test]
    fn test_owner_outliving_arena_is_harmless() {
        let mut targets = RenderTargets::new();
        let owner = targets.insert(target(1));
        drop(targets);
        drop(owner);
    }
}
