//! Draw commands and their operands

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::font::Font;
use crate::image::ImageHandle;

/// Compositing mode for transformed blits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Blend {
    /// Source-over alpha blending
    #[default]
    Normal,
    /// Additive ("lighter") blending
    Additive,
}

/// Stroke outline or fill interior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintStyle {
    Stroke,
    Fill,
}

/// Operation kind, used in errors and logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawKind {
    Image,
    ImageEx,
    Text,
    Pixel,
    Line,
    Rect,
    Circle,
    Triangle,
}

/// Options for a transformed image draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawEx {
    /// Rotation in degrees, clockwise on screen
    pub angle: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    /// Pivot relative to the image origin (None = half the image size)
    pub center_x: Option<f32>,
    pub center_y: Option<f32>,
    /// 0 = invisible, 255 = opaque
    pub alpha: u8,
    pub blend: Blend,
    pub z: f32,
}

impl Default for DrawEx {
    fn default() -> Self {
        Self {
            angle: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            center_x: None,
            center_y: None,
            alpha: 255,
            blend: Blend::Normal,
            z: 0.0,
        }
    }
}

impl DrawEx {
    /// Fix the pivot against a concrete image
    pub fn resolve(&self, image: &ImageHandle) -> BlitTransform {
        let (cx, cy) = image.center();
        BlitTransform {
            angle: self.angle,
            scale: Vec2::new(self.scale_x, self.scale_y),
            pivot: Vec2::new(self.center_x.unwrap_or(cx), self.center_y.unwrap_or(cy)),
            alpha: self.alpha,
            blend: self.blend,
        }
    }
}

/// Fully resolved transform handed to the surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlitTransform {
    pub angle: f32,
    pub scale: Vec2,
    pub pivot: Vec2,
    pub alpha: u8,
    pub blend: Blend,
}

/// A single queued paint operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Image {
        pos: Vec2,
        image: ImageHandle,
    },
    ImageEx {
        pos: Vec2,
        image: ImageHandle,
        ex: DrawEx,
    },
    Text {
        pos: Vec2,
        text: String,
        font: Font,
        color: Color,
    },
    /// Not implemented by any backend; draining it is an error
    Pixel {
        pos: Vec2,
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
    },
    Rect {
        min: Vec2,
        max: Vec2,
        color: Color,
        style: PaintStyle,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
        style: PaintStyle,
    },
    Triangle {
        points: [Vec2; 3],
        color: Color,
        style: PaintStyle,
    },
}

impl DrawOp {
    pub fn kind(&self) -> DrawKind {
        match self {
            DrawOp::Image { .. } => DrawKind::Image,
            DrawOp::ImageEx { .. } => DrawKind::ImageEx,
            DrawOp::Text { .. } => DrawKind::Text,
            DrawOp::Pixel { .. } => DrawKind::Pixel,
            DrawOp::Line { .. } => DrawKind::Line,
            DrawOp::Rect { .. } => DrawKind::Rect,
            DrawOp::Circle { .. } => DrawKind::Circle,
            DrawOp::Triangle { .. } => DrawKind::Triangle,
        }
    }
}

/// Queued operation tagged with paint order keys
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub z: f32,
    /// Insertion order within the current tick
    pub seq: u32,
    pub op: DrawOp,
}
