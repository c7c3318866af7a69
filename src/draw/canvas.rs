//! Draw-enqueue API shared by the stage and render targets

use glam::Vec2;

use super::command::{DrawEx, DrawKind, DrawOp, PaintStyle};
use super::queue::DrawQueue;
use crate::color::Color;
use crate::error::{Error, Result};
use crate::font::Font;
use crate::image::ImageHandle;

/// z used when the caller has no layer preference
pub const DEFAULT_Z: f32 = 0.0;

/// Anything owning a draw queue. Every method only enqueues; painting
/// happens when the owner drains.
pub trait Canvas {
    fn queue_mut(&mut self) -> &mut DrawQueue;

    fn draw(&mut self, x: f32, y: f32, image: ImageHandle, z: f32) {
        self.queue_mut().enqueue(
            z,
            DrawOp::Image {
                pos: Vec2::new(x, y),
                image,
            },
        );
    }

    fn draw_ex(&mut self, x: f32, y: f32, image: ImageHandle, ex: &DrawEx) {
        self.queue_mut().enqueue(
            ex.z,
            DrawOp::ImageEx {
                pos: Vec2::new(x, y),
                image,
                ex: *ex,
            },
        );
    }

    fn draw_font(&mut self, x: f32, y: f32, text: &str, font: &Font, color: Color, z: f32) {
        self.queue_mut().enqueue(
            z,
            DrawOp::Text {
                pos: Vec2::new(x, y),
                text: text.to_string(),
                font: font.clone(),
                color,
            },
        );
    }

    /// Single pixels are not supported by the surface contract.
    fn draw_pixel(&mut self, _x: f32, _y: f32, _color: Color, _z: f32) -> Result<()> {
        Err(Error::UnsupportedDraw(DrawKind::Pixel))
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Color, z: f32) {
        self.queue_mut().enqueue(
            z,
            DrawOp::Line {
                from: Vec2::new(x1, y1),
                to: Vec2::new(x2, y2),
                color,
            },
        );
    }

    fn draw_box(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Color, z: f32) {
        enqueue_rect(self.queue_mut(), x1, y1, x2, y2, color, PaintStyle::Stroke, z);
    }

    fn draw_box_fill(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Color, z: f32) {
        enqueue_rect(self.queue_mut(), x1, y1, x2, y2, color, PaintStyle::Fill, z);
    }

    fn draw_circle(&mut self, x: f32, y: f32, r: f32, color: Color, z: f32) {
        enqueue_circle(self.queue_mut(), x, y, r, color, PaintStyle::Stroke, z);
    }

    fn draw_circle_fill(&mut self, x: f32, y: f32, r: f32, color: Color, z: f32) {
        enqueue_circle(self.queue_mut(), x, y, r, color, PaintStyle::Fill, z);
    }

    fn draw_triangle(&mut self, points: [Vec2; 3], color: Color, z: f32) {
        self.queue_mut().enqueue(
            z,
            DrawOp::Triangle {
                points,
                color,
                style: PaintStyle::Stroke,
            },
        );
    }

    fn draw_triangle_fill(&mut self, points: [Vec2; 3], color: Color, z: f32) {
        self.queue_mut().enqueue(
            z,
            DrawOp::Triangle {
                points,
                color,
                style: PaintStyle::Fill,
            },
        );
    }
}

#[allow(clippy::too_many_arguments)]
fn enqueue_rect(
    queue: &mut DrawQueue,
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    color: Color,
    style: PaintStyle,
    z: f32,
) {
    queue.enqueue(
        z,
        DrawOp::Rect {
            min: Vec2::new(x1, y1),
            max: Vec2::new(x2, y2),
            color,
            style,
        },
    );
}

fn enqueue_circle(
    queue: &mut DrawQueue,
    x: f32,
    y: f32,
    radius: f32,
    color: Color,
    style: PaintStyle,
    z: f32,
) {
    queue.enqueue(
        z,
        DrawOp::Circle {
            center: Vec2::new(x, y),
            radius,
            color,
            style,
        },
    );
}
