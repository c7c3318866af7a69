//! Sprite Stage demo entry point
//!
//! Handles platform-specific initialization and runs the demo scene.

mod demo;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_main {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use sprite_stage::color::{C_CYAN, C_YELLOW, Color};
    use sprite_stage::draw::PaintStyle;
    use sprite_stage::platform::web::{
        CanvasSurface, ImageStore, SharedImages, attach_input, start_loop,
    };
    use sprite_stage::{RenderTarget, Settings, Stage, Surface};

    use crate::demo::{Demo, DemoImages};

    /// Paint a filled disc into a fresh offscreen image
    fn disc_image(
        images: &SharedImages,
        size: u32,
        color: Color,
    ) -> Result<sprite_stage::ImageHandle, JsValue> {
        let image = images.borrow_mut().create(size, size)?;
        let mut surface = CanvasSurface::for_image(&image, images.clone())?;
        let r = size as f32 / 2.0;
        surface.circle(Vec2::splat(r), r - 1.0, color, PaintStyle::Fill);
        Ok(image)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("logger init failed: {}", e).into());
        }

        log::info!("Sprite Stage starting...");

        let settings = Settings::load();
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(&settings.canvas_id)
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;

        let images: SharedImages = Rc::new(RefCell::new(ImageStore::new()));
        let demo_images = DemoImages {
            player: disc_image(&images, 32, C_CYAN)?,
            ball: disc_image(&images, 16, C_YELLOW)?,
        };

        let hud_image = images.borrow_mut().create(220, 28)?;
        let hud_surface = CanvasSurface::for_image(&hud_image, images.clone())?;
        let hud = RenderTarget::new(hud_image, Box::new(hud_surface))
            .with_bgcolor(Color::argb(128, 0, 0, 0));

        let surface = Rc::new(RefCell::new(CanvasSurface::new(&canvas, images.clone())?));
        let stage = Stage::new(&settings).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let stage = Rc::new(RefCell::new(stage));
        let hud = stage.borrow_mut().create_target(hud);

        let seed = js_sys::Date::now() as u64;
        let mut demo = Demo::new(seed, demo_images, Some(hud), &settings);
        stage.borrow_mut().run(move |stage| demo.tick(stage));

        attach_input(&canvas, stage.clone())?;
        canvas.focus()?;
        start_loop(stage, surface);

        log::info!("Sprite Stage running!");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    web_main::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Sprite Stage (native) starting...");
    log::info!("Native mode runs headless - use `trunk serve` for the web version");

    if let Err(e) = headless::run(600) {
        log::error!("Demo aborted: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive the demo with simulated 120 Hz paint opportunities and scripted input
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::cell::Cell;
    use std::rc::Rc;

    use sprite_stage::draw::NullSurface;
    use sprite_stage::input::{K_RIGHT, K_SPACE};
    use sprite_stage::{FrameOutcome, ImageHandle, RenderTarget, Result, Settings, Stage};

    use crate::demo::{Demo, DemoImages};

    const HOST_FRAME_MS: f64 = 1000.0 / 120.0;

    pub fn run(opportunities: u32) -> Result<()> {
        let settings = Settings::load();
        let mut stage = Stage::new(&settings)?;
        let images = DemoImages {
            player: ImageHandle::new(0, 32, 32),
            ball: ImageHandle::new(1, 16, 16),
        };
        let hud = stage.create_target(RenderTarget::new(
            ImageHandle::new(2, 220, 28),
            Box::new(NullSurface),
        ));

        let mut demo = Demo::new(42, images, Some(hud), &settings);
        let caught = Rc::new(Cell::new(0));
        let report = caught.clone();
        stage.run(move |stage| {
            demo.tick(stage)?;
            report.set(demo.caught());
            Ok(())
        });

        let mut surface = NullSurface;
        let mut rendered = 0u32;
        for i in 0..opportunities {
            match i {
                60 => stage.input_mut().press_key(K_RIGHT, false),
                240 => stage.input_mut().release_key(K_RIGHT),
                300 => stage.input_mut().press_key(K_SPACE, false),
                302 => stage.input_mut().release_key(K_SPACE),
                _ => {}
            }
            if let FrameOutcome::Rendered { .. } = stage.step(i as f64 * HOST_FRAME_MS, &mut surface)? {
                rendered += 1;
            }
        }

        log::info!(
            "Ran {} frames from {} opportunities, {} fps, caught {}",
            rendered,
            opportunities,
            stage.real_fps(),
            caught.get()
        );
        Ok(())
    }
}
