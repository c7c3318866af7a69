//! Z-ordered draw queue
//!
//! Commands collect during a tick and are painted once, lowest z first.
//! Equal z paints in enqueue order, so same-layer objects overlap the way
//! they were submitted.

use super::command::{DrawCommand, DrawOp};
use super::surface::Surface;
use crate::error::{Error, Result};

#[derive(Debug, Default)]
pub struct DrawQueue {
    commands: Vec<DrawCommand>,
    next_seq: u32,
}

impl DrawQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop pending commands and restart the insertion sequence
    pub fn reset(&mut self) {
        self.commands.clear();
        self.next_seq = 0;
    }

    pub fn enqueue(&mut self, z: f32, op: DrawOp) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.commands.push(DrawCommand { z, seq, op });
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Pending commands in submission order
    pub fn pending(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Paint every pending command onto `surface` in (z, seq) order and
    /// empty the queue.
    ///
    /// NaN z sorts after every finite value. An unsupported operation aborts
    /// the drain; the remaining commands are dropped with it.
    pub fn drain(&mut self, surface: &mut dyn Surface) -> Result<()> {
        let mut commands = std::mem::take(&mut self.commands);
        self.next_seq = 0;

        commands.sort_by(|a, b| a.z.total_cmp(&b.z).then(a.seq.cmp(&b.seq)));

        for cmd in &commands {
            execute(&cmd.op, surface)?;
        }
        Ok(())
    }
}

fn execute(op: &DrawOp, surface: &mut dyn Surface) -> Result<()> {
    match op {
        DrawOp::Image { pos, image } => surface.blit(image, *pos),
        DrawOp::ImageEx { pos, image, ex } => surface.blit_ex(image, *pos, &ex.resolve(image)),
        DrawOp::Text {
            pos,
            text,
            font,
            color,
        } => surface.text(text, *pos, font, *color),
        DrawOp::Pixel { .. } => return Err(Error::UnsupportedDraw(op.kind())),
        DrawOp::Line { from, to, color } => surface.line(*from, *to, *color),
        DrawOp::Rect {
            min,
            max,
            color,
            style,
        } => surface.rect(*min, *max, *color, *style),
        DrawOp::Circle {
            center,
            radius,
            color,
            style,
        } => surface.circle(*center, *radius, *color, *style),
        DrawOp::Triangle {
            points,
            color,
            style,
        } => surface.triangle(*points, *color, *style),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::C_WHITE;
    use crate::draw::command::{DrawKind, PaintStyle};
    use crate::image::ImageHandle;
    use crate::test_utils::{Painted, RecordingSurface};
    use glam::Vec2;
    use proptest::prelude::*;

    fn blit(id: u32) -> DrawOp {
        DrawOp::Image {
            pos: Vec2::ZERO,
            image: ImageHandle::new(id, 8, 8),
        }
    }

    #[test]
    fn test_lower_z_paints_first_regardless_of_order() {
        let mut queue = DrawQueue::new();
        queue.enqueue(5.0, blit(1));
        queue.enqueue(-1.0, blit(2));
        queue.enqueue(0.0, blit(3));

        let mut surface = RecordingSurface::new();
        queue.drain(&mut surface).unwrap();
        assert_eq!(surface.blit_ids(), vec![2, 3, 1]);
    }

    #[test]
    fn test_equal_z_keeps_enqueue_order() {
        let mut queue = DrawQueue::new();
        for id in 0..6 {
            queue.enqueue(1.0, blit(id));
        }
        let mut surface = RecordingSurface::new();
        queue.drain(&mut surface).unwrap();
        assert_eq!(surface.blit_ids(), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_drain_empties_queue_and_restarts_sequence() {
        let mut queue = DrawQueue::new();
        queue.enqueue(0.0, blit(1));
        queue.enqueue(0.0, blit(2));
        queue.drain(&mut RecordingSurface::new()).unwrap();
        assert!(queue.is_empty());

        queue.enqueue(0.0, blit(3));
        assert_eq!(queue.pending()[0].seq, 0);
    }

    #[test]
    fn test_reset_discards_pending() {
        let mut queue = DrawQueue::new();
        queue.enqueue(0.0, blit(1));
        queue.reset();
        let mut surface = RecordingSurface::new();
        queue.drain(&mut surface).unwrap();
        assert!(surface.painted.is_empty());
    }

    #[test]
    fn test_pixel_fails_loudly() {
        let mut queue = DrawQueue::new();
        queue.enqueue(0.0, blit(1));
        queue.enqueue(
            1.0,
            DrawOp::Pixel {
                pos: Vec2::ZERO,
                color: C_WHITE,
            },
        );
        let err = queue.drain(&mut RecordingSurface::new()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedDraw(DrawKind::Pixel)));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_shapes_reach_surface() {
        let mut queue = DrawQueue::new();
        queue.enqueue(
            0.0,
            DrawOp::Circle {
                center: Vec2::new(1.0, 2.0),
                radius: 3.0,
                color: C_WHITE,
                style: PaintStyle::Fill,
            },
        );
        queue.enqueue(
            0.0,
            DrawOp::Line {
                from: Vec2::ZERO,
                to: Vec2::ONE,
                color: C_WHITE,
            },
        );
        let mut surface = RecordingSurface::new();
        queue.drain(&mut surface).unwrap();
        assert_eq!(
            surface.painted,
            vec![
                Painted::Circle {
                    center: Vec2::new(1.0, 2.0),
                    radius: 3.0,
                    style: PaintStyle::Fill,
                },
                Painted::Line {
                    from: Vec2::ZERO,
                    to: Vec2::ONE,
                },
            ]
        );
    }

    proptest! {
        #[test]
        fn prop_paint_order_is_z_then_enqueue(zs in prop::collection::vec(-3i32..3, 0..40)) {
            let mut queue = DrawQueue::new();
            for (id, z) in zs.iter().enumerate() {
                queue.enqueue(*z as f32, blit(id as u32));
            }
            let mut surface = RecordingSurface::new();
            queue.drain(&mut surface).unwrap();

            let mut expected: Vec<(i32, u32)> =
                zs.iter().enumerate().map(|(id, z)| (*z, id as u32)).collect();
            expected.sort();
            let expected: Vec<u32> = expected.into_iter().map(|(_, id)| id).collect();
            prop_assert_eq!(surface.blit_ids(), expected);
        }
    }
}
