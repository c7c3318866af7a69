//! Browser host: canvas 2D surface, input listeners and the frame driver

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Document, Event, HtmlCanvasElement, KeyboardEvent, MouseEvent,
    TouchEvent,
};

use crate::color::Color;
use crate::draw::{Blend, BlitTransform, PaintStyle, Surface};
use crate::font::Font;
use crate::image::ImageHandle;
use crate::input::Touch;
use crate::scheduler::{FrameOutcome, Stage};

fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| JsValue::from_str("not a 2d context"))
}

/// Offscreen canvases addressed by `ImageHandle::id`
#[derive(Default)]
pub struct ImageStore {
    canvases: Vec<HtmlCanvasElement>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a blank offscreen canvas
    pub fn create(&mut self, width: u32, height: u32) -> Result<ImageHandle, JsValue> {
        let canvas: HtmlCanvasElement = document()?.create_element("canvas")?.dyn_into()?;
        canvas.set_width(width);
        canvas.set_height(height);
        Ok(self.insert(canvas))
    }

    /// Adopt an existing canvas as an image
    pub fn insert(&mut self, canvas: HtmlCanvasElement) -> ImageHandle {
        let handle = ImageHandle::new(self.canvases.len() as u32, canvas.width(), canvas.height());
        self.canvases.push(canvas);
        log::debug!("Registered image {:?}", handle);
        handle
    }

    pub fn get(&self, image: &ImageHandle) -> Option<&HtmlCanvasElement> {
        self.canvases.get(image.id as usize)
    }
}

pub type SharedImages = Rc<RefCell<ImageStore>>;

/// `Surface` painting onto a canvas 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    images: SharedImages,
}

impl CanvasSurface {
    pub fn new(canvas: &HtmlCanvasElement, images: SharedImages) -> Result<Self, JsValue> {
        Ok(Self {
            canvas: canvas.clone(),
            ctx: context_2d(canvas)?,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
            images,
        })
    }

    /// Surface over the offscreen canvas behind `image`
    pub fn for_image(image: &ImageHandle, images: SharedImages) -> Result<Self, JsValue> {
        let canvas = images
            .borrow()
            .get(image)
            .cloned()
            .ok_or_else(|| JsValue::from_str("unknown image"))?;
        Self::new(&canvas, images)
    }

    fn draw_canvas(&self, image: &ImageHandle, x: f64, y: f64) {
        let images = self.images.borrow();
        let Some(source) = images.get(image) else {
            log::warn!("Blit of unknown image {}", image.id);
            return;
        };
        if let Err(e) = self.ctx.draw_image_with_html_canvas_element(source, x, y) {
            log::warn!("drawImage failed: {:?}", e);
        }
    }

    fn finish_path(&self, color: Color, style: PaintStyle) {
        let css = color.to_css();
        match style {
            PaintStyle::Fill => {
                self.ctx.set_fill_style_str(&css);
                self.ctx.fill();
            }
            PaintStyle::Stroke => {
                self.ctx.set_stroke_style_str(&css);
                self.ctx.stroke();
            }
        }
    }
}

impl Surface for CanvasSurface {
    fn resize(&mut self, width: u32, height: u32) {
        // Setting the size clears the canvas, so only touch it on change
        if self.canvas.width() == width && self.canvas.height() == height {
            return;
        }
        log::debug!("Canvas resized to {}x{}", width, height);
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.width = width as f64;
        self.height = height as f64;
    }

    fn fill(&mut self, color: Color) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
    }

    fn blit(&mut self, image: &ImageHandle, pos: Vec2) {
        self.draw_canvas(image, pos.x as f64, pos.y as f64);
    }

    fn blit_ex(&mut self, image: &ImageHandle, pos: Vec2, transform: &BlitTransform) {
        let pivot = transform.pivot;
        self.ctx.save();
        let _ = self
            .ctx
            .translate((pos.x + pivot.x) as f64, (pos.y + pivot.y) as f64);
        let _ = self.ctx.rotate((transform.angle as f64).to_radians());
        let _ = self
            .ctx
            .scale(transform.scale.x as f64, transform.scale.y as f64);
        self.ctx.set_global_alpha(transform.alpha as f64 / 255.0);
        if transform.blend == Blend::Additive {
            let _ = self.ctx.set_global_composite_operation("lighter");
        }
        self.draw_canvas(image, -pivot.x as f64, -pivot.y as f64);
        self.ctx.restore();
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.finish_path(color, PaintStyle::Stroke);
    }

    fn rect(&mut self, min: Vec2, max: Vec2, color: Color, style: PaintStyle) {
        self.ctx.begin_path();
        self.ctx.rect(
            min.x as f64,
            min.y as f64,
            (max.x - min.x) as f64,
            (max.y - min.y) as f64,
        );
        self.finish_path(color, style);
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: Color, style: PaintStyle) {
        self.ctx.begin_path();
        if let Err(e) = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)
        {
            log::warn!("arc failed: {:?}", e);
            return;
        }
        self.finish_path(color, style);
    }

    fn triangle(&mut self, points: [Vec2; 3], color: Color, style: PaintStyle) {
        let [a, b, c] = points;
        self.ctx.begin_path();
        self.ctx.move_to(a.x as f64, a.y as f64);
        self.ctx.line_to(b.x as f64, b.y as f64);
        self.ctx.line_to(c.x as f64, c.y as f64);
        self.ctx.close_path();
        self.finish_path(color, style);
    }

    fn text(&mut self, text: &str, pos: Vec2, font: &Font, color: Color) {
        self.ctx.set_font(&font.to_css());
        self.ctx.set_text_baseline("top");
        self.ctx.set_fill_style_str(&color.to_css());
        if let Err(e) = self.ctx.fill_text(text, pos.x as f64, pos.y as f64) {
            log::warn!("fillText failed: {:?}", e);
        }
    }
}

/// Touch points relative to the canvas
fn canvas_touches(event: &TouchEvent, canvas: &HtmlCanvasElement) -> Vec<Touch> {
    let rect = canvas.get_bounding_client_rect();
    let list = event.touches();
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|t| Touch {
            x: (t.client_x() as f64 - rect.left()) as i32,
            y: (t.client_y() as f64 - rect.top()) as i32,
        })
        .collect()
}

/// Feed DOM input events into the stage's input tracker.
///
/// Handlers only write stamps; they never run while a frame is stepping, so
/// the borrow is always free. Keys are read from the canvas, which is made
/// focusable, and their browser defaults (scrolling, find-as-you-type) are
/// suppressed along with the context menu.
pub fn attach_input(canvas: &HtmlCanvasElement, stage: Rc<RefCell<Stage>>) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    canvas.set_attribute("tabindex", "0")?;

    // Keyboard
    {
        let stage = stage.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            stage
                .borrow_mut()
                .input_mut()
                .press_key(&event.code(), event.repeat());
            event.prevent_default();
            event.stop_propagation();
        });
        canvas.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let stage = stage.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            stage.borrow_mut().input_mut().release_key(&event.code());
            event.prevent_default();
            event.stop_propagation();
        });
        canvas.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Mouse
    {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: Event| {
            event.prevent_default();
        });
        canvas.add_event_listener_with_callback("contextmenu", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let stage = stage.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            stage
                .borrow_mut()
                .input_mut()
                .move_mouse(event.offset_x(), event.offset_y());
        });
        canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let stage = stage.clone();
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            // Keys are read from the canvas, so clicking it takes focus
            if let Err(e) = canvas_clone.focus() {
                log::debug!("canvas focus failed: {:?}", e);
            }
            let mut stage = stage.borrow_mut();
            stage
                .input_mut()
                .move_mouse(event.offset_x(), event.offset_y());
            stage.input_mut().press_button(event.button() as i32);
        });
        canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        // Released anywhere, not only over the canvas
        let stage = stage.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            stage
                .borrow_mut()
                .input_mut()
                .release_button(event.button() as i32);
        });
        window.add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Touch: every phase replaces the full point list
    for kind in ["touchstart", "touchmove", "touchend", "touchcancel"] {
        let stage = stage.clone();
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
            event.prevent_default();
            let points = canvas_touches(&event, &canvas_clone);
            stage.borrow_mut().input_mut().set_touches(points);
        });
        canvas.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}

/// Drive `Stage::step` from requestAnimationFrame.
///
/// A frame error is logged and ends the loop.
pub fn start_loop(stage: Rc<RefCell<Stage>>, surface: Rc<RefCell<CanvasSurface>>) {
    request_animation_frame(stage, surface);
}

fn request_animation_frame(stage: Rc<RefCell<Stage>>, surface: Rc<RefCell<CanvasSurface>>) {
    let Some(window) = web_sys::window() else {
        log::error!("No window, frame loop not started");
        return;
    };
    let closure = Closure::once(move |time: f64| {
        frame(stage, surface, time);
    });
    let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    closure.forget();
}

fn frame(stage: Rc<RefCell<Stage>>, surface: Rc<RefCell<CanvasSurface>>, time: f64) {
    let outcome = {
        let mut surface = surface.borrow_mut();
        stage.borrow_mut().step(time, &mut *surface)
    };
    match outcome {
        Ok(FrameOutcome::Rendered { tick }) => {
            log::trace!("Rendered tick {}", tick);
            request_animation_frame(stage, surface);
        }
        Ok(FrameOutcome::Idle | FrameOutcome::Skipped) => request_animation_frame(stage, surface),
        Err(e) => log::error!("Frame loop stopped: {}", e),
    }
}
