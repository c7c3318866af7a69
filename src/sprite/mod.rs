//! Sprites and the batch helpers that drive them
//!
//! Capabilities are traits: anything `Updatable` can be stepped by
//! `update_all`, anything `Drawable` can be painted by `draw_all`, anything
//! `Vanishable` can be pruned by `clean_all`. `Sprite` implements all of
//! them, and game types usually wrap a sprite and forward.

pub mod check;
pub mod hitbox;

pub use check::{Collider, Reaction, check, check_with, check_within};
pub use hitbox::{HitBox, WorldShape};

use glam::Vec2;

use crate::draw::{Blend, Canvas, DrawEx};
use crate::error::Result;
use crate::image::ImageHandle;
use crate::scheduler::Stage;
use crate::target::TargetHandle;

/// Has a per-tick update step
pub trait Updatable {
    fn update(&mut self);
}

/// Has a one-way "vanished" state
pub trait Vanishable {
    fn is_vanished(&self) -> bool;
    fn vanish(&mut self);
}

/// Can enqueue itself for painting
pub trait Drawable: Vanishable {
    fn z(&self) -> f32;
    fn draw(&self, stage: &mut Stage);
}

/// An empty slot counts as vanished
impl<T: Vanishable> Vanishable for Option<T> {
    fn is_vanished(&self) -> bool {
        self.as_ref().is_none_or(|v| v.is_vanished())
    }

    fn vanish(&mut self) {
        if let Some(v) = self {
            v.vanish();
        }
    }
}

impl<T: Updatable> Updatable for Option<T> {
    fn update(&mut self) {
        if let Some(v) = self {
            v.update();
        }
    }
}

impl<T: Drawable> Drawable for Option<T> {
    fn z(&self) -> f32 {
        self.as_ref().map_or(0.0, |v| v.z())
    }

    fn draw(&self, stage: &mut Stage) {
        if let Some(v) = self {
            v.draw(stage);
        }
    }
}

/// Positioned, transformable image with an optional hit box
#[derive(Debug)]
pub struct Sprite {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Rotation in degrees
    pub angle: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub alpha: u8,
    pub blend: Blend,
    pub visible: bool,
    pub collision_enable: bool,
    /// Draw into this render target instead of the stage
    pub target: Option<TargetHandle>,
    image: Option<ImageHandle>,
    center_x: f32,
    center_y: f32,
    /// Pivot was set by hand and no longer follows the image
    center_explicit: bool,
    hitbox: Option<HitBox>,
    vanished: bool,
}

impl Default for Sprite {
    fn default() -> Self {
        Self::new(0.0, 0.0, None)
    }
}

impl Sprite {
    pub fn new(x: f32, y: f32, image: Option<ImageHandle>) -> Self {
        let (center_x, center_y) = image.map_or((0.0, 0.0), |i| i.center());
        Self {
            x,
            y,
            z: 0.0,
            angle: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            alpha: 255,
            blend: Blend::Normal,
            visible: true,
            collision_enable: true,
            target: None,
            image,
            center_x,
            center_y,
            center_explicit: false,
            hitbox: None,
            vanished: false,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn image(&self) -> Option<ImageHandle> {
        self.image
    }

    /// Swap the image. The pivot follows the new image unless it was set by hand.
    pub fn set_image(&mut self, image: Option<ImageHandle>) {
        self.image = image;
        if !self.center_explicit {
            (self.center_x, self.center_y) = image.map_or((0.0, 0.0), |i| i.center());
        }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.center_x, self.center_y)
    }

    pub fn set_center(&mut self, center_x: f32, center_y: f32) {
        self.center_x = center_x;
        self.center_y = center_y;
        self.center_explicit = true;
    }

    /// Let the pivot follow the image again
    pub fn reset_center(&mut self) {
        self.center_explicit = false;
        (self.center_x, self.center_y) = self.image.map_or((0.0, 0.0), |i| i.center());
    }

    pub fn hitbox(&self) -> Option<HitBox> {
        self.hitbox
    }

    pub fn set_hitbox(&mut self, hitbox: Option<HitBox>) {
        self.hitbox = hitbox;
    }

    /// Set the hit box from a flat value list (2, 3, 4 or 6 values)
    pub fn set_collision(&mut self, values: &[f32]) -> Result<()> {
        self.hitbox = Some(HitBox::from_values(values)?);
        Ok(())
    }

    /// Explicit hit box, or the image rectangle when none was set
    pub fn effective_hitbox(&self) -> Option<HitBox> {
        self.hitbox.or_else(|| {
            self.image
                .map(|i| HitBox::rect(0.0, 0.0, i.width as f32, i.height as f32))
        })
    }

    /// Hit box placed at the sprite's position. Rotation and scale are not
    /// applied to hit boxes.
    pub fn world_shape(&self) -> Option<WorldShape> {
        self.effective_hitbox().map(|h| h.at(self.pos()))
    }

    /// Eligible for collision tests
    pub fn is_collidable(&self) -> bool {
        !self.vanished && self.collision_enable && self.effective_hitbox().is_some()
    }

    /// Overlap test against one other sprite
    pub fn collides(&self, other: &Sprite) -> bool {
        if !self.is_collidable() || !other.is_collidable() {
            return false;
        }
        match (self.world_shape(), other.world_shape()) {
            (Some(a), Some(b)) => a.collides(&b),
            _ => false,
        }
    }

    /// Members of `others` this sprite overlaps, in order
    pub fn touching<'a, C: Collider>(&self, others: &'a [C]) -> Vec<&'a C> {
        others
            .iter()
            .filter(|o| !std::ptr::eq(o.sprite(), self) && self.collides(o.sprite()))
            .collect()
    }

    /// Draw options for the current transform
    pub fn draw_options(&self) -> DrawEx {
        DrawEx {
            angle: self.angle,
            scale_x: self.scale_x,
            scale_y: self.scale_y,
            center_x: Some(self.center_x),
            center_y: Some(self.center_y),
            alpha: self.alpha,
            blend: self.blend,
            z: self.z,
        }
    }
}

impl Vanishable for Sprite {
    fn is_vanished(&self) -> bool {
        self.vanished
    }

    fn vanish(&mut self) {
        self.vanished = true;
    }
}

/// Plain sprites have nothing to step
impl Updatable for Sprite {
    fn update(&mut self) {}
}

impl Drawable for Sprite {
    fn z(&self) -> f32 {
        self.z
    }

    /// Enqueue one transformed blit, onto the sprite's render target when it
    /// still resolves, otherwise onto the stage.
    fn draw(&self, stage: &mut Stage) {
        if !self.visible || self.vanished {
            return;
        }
        let Some(image) = self.image else {
            return;
        };
        let ex = self.draw_options();

        if let Some(handle) = self.target {
            if let Some(target) = stage.targets_mut().get_mut(handle) {
                target.draw_ex(self.x, self.y, image, &ex);
                return;
            }
            log::trace!("sprite target {:?} is gone, drawing to stage", handle);
        }
        stage.draw_ex(self.x, self.y, image, &ex);
    }
}

/// Step every non-vanished item
pub fn update_all<T: Updatable + Vanishable>(items: &mut [T]) {
    for item in items.iter_mut().filter(|i| !i.is_vanished()) {
        item.update();
    }
}

/// Drop vanished items and empty slots in place, keeping order
pub fn clean_all<T: Vanishable>(items: &mut Vec<T>) {
    items.retain(|i| !i.is_vanished());
}

/// Draw everything in `items` in ascending z, ties in iteration order.
///
/// Groups of different types are passed by chaining iterators, e.g.
/// `players.iter().map(|p| p as &dyn Drawable).chain(...)`.
pub fn draw_all<'a, I>(stage: &mut Stage, items: I)
where
    I: IntoIterator<Item = &'a dyn Drawable>,
{
    let mut live: Vec<&dyn Drawable> = items.into_iter().filter(|d| !d.is_vanished()).collect();
    live.sort_by(|a, b| a.z().total_cmp(&b.z()));
    for item in live {
        item.draw(stage);
    }
}

/// `draw_all` for a single homogeneous group
pub fn draw_group<T: Drawable>(stage: &mut Stage, items: &[T]) {
    draw_all(stage, items.iter().map(|i| i as &dyn Drawable));
}
