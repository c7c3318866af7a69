//! Test helpers: a surface that records what it was asked to paint.

use glam::Vec2;

use crate::color::Color;
use crate::draw::{BlitTransform, PaintStyle, Surface};
use crate::font::Font;
use crate::image::ImageHandle;

/// One call received by `RecordingSurface`
#[derive(Debug, Clone, PartialEq)]
pub enum Painted {
    Resize {
        width: u32,
        height: u32,
    },
    Fill(Color),
    Blit {
        image: u32,
        pos: Vec2,
    },
    BlitEx {
        image: u32,
        pos: Vec2,
        transform: BlitTransform,
    },
    Line {
        from: Vec2,
        to: Vec2,
    },
    Rect {
        min: Vec2,
        max: Vec2,
        style: PaintStyle,
    },
    Circle {
        center: Vec2,
        radius: f32,
        style: PaintStyle,
    },
    Triangle {
        points: [Vec2; 3],
        style: PaintStyle,
    },
    Text {
        text: String,
        font: String,
        color: Color,
    },
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub painted: Vec<Painted>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Image ids of every blit, in paint order
    pub fn blit_ids(&self) -> Vec<u32> {
        self.painted
            .iter()
            .filter_map(|p| match p {
                Painted::Blit { image, .. } | Painted::BlitEx { image, .. } => Some(*image),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.painted.push(Painted::Resize { width, height });
    }

    fn fill(&mut self, color: Color) {
        self.painted.push(Painted::Fill(color));
    }

    fn blit(&mut self, image: &ImageHandle, pos: Vec2) {
        self.painted.push(Painted::Blit {
            image: image.id,
            pos,
        });
    }

    fn blit_ex(&mut self, image: &ImageHandle, pos: Vec2, transform: &BlitTransform) {
        self.painted.push(Painted::BlitEx {
            image: image.id,
            pos,
            transform: *transform,
        });
    }

    fn line(&mut self, from: Vec2, to: Vec2, _color: Color) {
        self.painted.push(Painted::Line { from, to });
    }

    fn rect(&mut self, min: Vec2, max: Vec2, _color: Color, style: PaintStyle) {
        self.painted.push(Painted::Rect { min, max, style });
    }

    fn circle(&mut self, center: Vec2, radius: f32, _color: Color, style: PaintStyle) {
        self.painted.push(Painted::Circle {
            center,
            radius,
            style,
        });
    }

    fn triangle(&mut self, points: [Vec2; 3], _color: Color, style: PaintStyle) {
        self.painted.push(Painted::Triangle { points, style });
    }

    fn text(&mut self, text: &str, _pos: Vec2, font: &Font, color: Color) {
        self.painted.push(Painted::Text {
            text: text.to_string(),
            font: font.to_css(),
            color,
        });
    }
}
