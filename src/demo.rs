//! Demo scene shared by the web and headless entry points
//!
//! Arrow keys (or the left mouse button) steer the player; bouncing balls
//! vanish when caught and new ones spawn to keep the field full. Space
//! spawns a burst.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use sprite_stage::color::C_WHITE;
use sprite_stage::input::{K_SPACE, M_LBUTTON};
use sprite_stage::sprite::{
    Collider, Drawable, Reaction, Updatable, Vanishable, check, clean_all, draw_all, update_all,
};
use sprite_stage::{Canvas, Font, ImageHandle, Result, Settings, Sprite, Stage, TargetOwner};

const PLAYER_SPEED: f32 = 4.0;
const MIN_BALLS: usize = 8;
const BURST: usize = 5;
const HUD_Z: f32 = 100.0;

/// Images the scene draws with
#[derive(Debug, Clone, Copy)]
pub struct DemoImages {
    pub player: ImageHandle,
    pub ball: ImageHandle,
}

struct Ball {
    sprite: Sprite,
    vel: Vec2,
    bounds: Vec2,
}

impl Updatable for Ball {
    fn update(&mut self) {
        let s = &mut self.sprite;
        s.x += self.vel.x;
        s.y += self.vel.y;
        let max = self.bounds - Vec2::new(16.0, 16.0);
        if s.x < 0.0 || s.x > max.x {
            self.vel.x = -self.vel.x;
            s.x = s.x.clamp(0.0, max.x);
        }
        if s.y < 0.0 || s.y > max.y {
            self.vel.y = -self.vel.y;
            s.y = s.y.clamp(0.0, max.y);
        }
        s.angle = (s.angle + self.vel.length() * 3.0) % 360.0;
    }
}

impl Vanishable for Ball {
    fn is_vanished(&self) -> bool {
        self.sprite.is_vanished()
    }

    fn vanish(&mut self) {
        self.sprite.vanish();
    }
}

impl Drawable for Ball {
    fn z(&self) -> f32 {
        self.sprite.z
    }

    fn draw(&self, stage: &mut Stage) {
        self.sprite.draw(stage);
    }
}

impl Collider for Ball {
    fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    fn hit(&mut self, _other: &Sprite) -> Reaction {
        self.sprite.vanish();
        Reaction::Discard
    }
}

pub struct Demo {
    player: Sprite,
    balls: Vec<Ball>,
    images: DemoImages,
    hud: Option<TargetOwner>,
    font: Font,
    rng: Pcg32,
    bounds: Vec2,
    show_fps: bool,
    caught: u32,
}

impl Demo {
    pub fn new(seed: u64, images: DemoImages, hud: Option<TargetOwner>, settings: &Settings) -> Self {
        let bounds = Vec2::new(settings.width as f32, settings.height as f32);
        let mut player = Sprite::new(bounds.x / 2.0, bounds.y / 2.0, Some(images.player));
        player.z = 1.0;
        let mut demo = Self {
            player,
            balls: Vec::new(),
            images,
            hud,
            font: Font::new(16),
            rng: Pcg32::seed_from_u64(seed),
            bounds,
            show_fps: settings.show_fps,
            caught: 0,
        };
        demo.spawn(MIN_BALLS);
        log::info!("Demo scene ready, seed {}", seed);
        demo
    }

    pub fn caught(&self) -> u32 {
        self.caught
    }

    fn spawn(&mut self, count: usize) {
        for _ in 0..count {
            let pos = Vec2::new(
                self.rng.random_range(0.0..self.bounds.x - 16.0),
                self.rng.random_range(0.0..self.bounds.y - 16.0),
            );
            let vel = Vec2::new(
                self.rng.random_range(-3.0..3.0),
                self.rng.random_range(-3.0..3.0),
            );
            let mut sprite = Sprite::new(pos.x, pos.y, Some(self.images.ball));
            // Round hit box instead of the image rect
            sprite.set_hitbox(Some(sprite_stage::HitBox::circle(8.0, 8.0, 8.0)));
            self.balls.push(Ball {
                sprite,
                vel,
                bounds: self.bounds,
            });
        }
    }

    /// One frame of the scene
    pub fn tick(&mut self, stage: &mut Stage) -> Result<()> {
        let input = stage.input();
        let steer = Vec2::new(input.axis_x() as f32, input.axis_y() as f32);
        let mouse = input
            .is_mouse_down(M_LBUTTON)
            .then(|| Vec2::new(input.mouse_x() as f32, input.mouse_y() as f32));
        let touch = input.touch_pos();
        let burst = input.is_key_pushed(K_SPACE);

        if let Some(target) = mouse.or(touch.map(|(x, y)| Vec2::new(x as f32, y as f32))) {
            let (cx, cy) = self.player.center();
            self.player.x = target.x - cx;
            self.player.y = target.y - cy;
        } else {
            self.player.x += steer.x * PLAYER_SPEED;
            self.player.y += steer.y * PLAYER_SPEED;
        }
        if burst {
            self.spawn(BURST);
        }

        update_all(&mut self.balls);
        if check(std::slice::from_mut(&mut self.player), &mut self.balls) {
            let caught = self.balls.iter().filter(|b| b.is_vanished()).count() as u32;
            self.caught += caught;
            log::debug!("Caught {} ball(s), {} total", caught, self.caught);
        }
        clean_all(&mut self.balls);
        if self.balls.len() < MIN_BALLS {
            self.spawn(MIN_BALLS - self.balls.len());
        }

        draw_all(
            stage,
            std::iter::once(&self.player as &dyn Drawable)
                .chain(self.balls.iter().map(|b| b as &dyn Drawable)),
        );
        self.draw_hud(stage)
    }

    fn draw_hud(&self, stage: &mut Stage) -> Result<()> {
        let mut text = format!("caught {}", self.caught);
        if self.show_fps {
            text.push_str(&format!("  fps {}", stage.real_fps()));
        }

        // Prefer the offscreen HUD so it is painted once and blitted
        if let Some(owner) = &self.hud {
            if let Some(hud) = stage.targets_mut().get_mut(owner.handle()) {
                hud.draw_font(4.0, 4.0, &text, &self.font, C_WHITE, 0.0);
                hud.update()?;
                let image = hud.image();
                stage.draw(8.0, 8.0, image, HUD_Z);
                return Ok(());
            }
        }
        stage.draw_font(8.0, 8.0, &text, &self.font, C_WHITE, HUD_Z);
        Ok(())
    }
}
