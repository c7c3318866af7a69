//! Renderable surface contract
//!
//! The host backend (canvas 2D, software rasterizer, ...) implements this.
//! Nothing in the core knows how pixels are produced.

use glam::Vec2;

use super::command::{BlitTransform, PaintStyle};
use crate::color::Color;
use crate::font::Font;
use crate::image::ImageHandle;

pub trait Surface {
    /// Match the backing size to the stage, called before every frame paint
    fn resize(&mut self, width: u32, height: u32);

    /// Replace every pixel with `color`
    fn fill(&mut self, color: Color);

    /// Untransformed image copy with its top-left at (x, y)
    fn blit(&mut self, image: &ImageHandle, pos: Vec2);

    /// Image copy rotated and scaled about `transform.pivot`, which is
    /// relative to the image origin placed at `pos`
    fn blit_ex(&mut self, image: &ImageHandle, pos: Vec2, transform: &BlitTransform);

    fn line(&mut self, from: Vec2, to: Vec2, color: Color);

    fn rect(&mut self, min: Vec2, max: Vec2, color: Color, style: PaintStyle);

    fn circle(&mut self, center: Vec2, radius: f32, color: Color, style: PaintStyle);

    fn triangle(&mut self, points: [Vec2; 3], color: Color, style: PaintStyle);

    fn text(&mut self, text: &str, pos: Vec2, font: &Font, color: Color);
}

/// Surface that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn resize(&mut self, _width: u32, _height: u32) {}
    fn fill(&mut self, _color: Color) {}
    fn blit(&mut self, _image: &ImageHandle, _pos: Vec2) {}
    fn blit_ex(&mut self, _image: &ImageHandle, _pos: Vec2, _transform: &BlitTransform) {}
    fn line(&mut self, _from: Vec2, _to: Vec2, _color: Color) {}
    fn rect(&mut self, _min: Vec2, _max: Vec2, _color: Color, _style: PaintStyle) {}
    fn circle(&mut self, _center: Vec2, _radius: f32, _color: Color, _style: PaintStyle) {}
    fn triangle(&mut self, _points: [Vec2; 3], _color: Color, _style: PaintStyle) {}
    fn text(&mut self, _text: &str, _pos: Vec2, _font: &Font, _color: Color) {}
}
