//! Draw pipeline
//!
//! Game code enqueues through `Canvas`, the owner drains its `DrawQueue` into a
//! host `Surface` once per tick.

pub mod canvas;
pub mod command;
pub mod queue;
pub mod surface;

pub use canvas::{Canvas, DEFAULT_Z};
pub use command::{Blend, BlitTransform, DrawCommand, DrawEx, DrawKind, DrawOp, PaintStyle};
pub use queue::DrawQueue;
pub use surface::{NullSurface, Surface};
