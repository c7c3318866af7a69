//! Collision shapes and overlap tests
//!
//! A `HitBox` is stored in sprite-local coordinates. `HitBox::at` places it at
//! the sprite's current position, producing a `WorldShape` that is thrown away
//! after the test, so nothing can go stale when the sprite moves.
//!
//! Rects and triangles become plain vertex lists in world space:
//! - polygon vs polygon: separating axis theorem over every edge normal
//! - polygon vs circle: edge normals plus the centre-to-nearest-vertex axis
//! - point vs polygon: horizontal ray cast, even-odd rule
//!
//! Point-on-edge rule: the ray cast treats a polygon as half-open. Points on
//! the minimum-x / minimum-y edges of an axis-aligned rect are inside, points
//! on the maximum-x / maximum-y edges are outside, so `[x1, x2) x [y1, y2)`.

use glam::Vec2;

use crate::consts::RAY_CAST_EPSILON;
use crate::error::{Error, Result};

/// Shape in sprite-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitBox {
    Point(Vec2),
    Circle { center: Vec2, radius: f32 },
    Rect { min: Vec2, max: Vec2 },
    Triangle([Vec2; 3]),
}

impl HitBox {
    pub fn point(x: f32, y: f32) -> Self {
        HitBox::Point(Vec2::new(x, y))
    }

    pub fn circle(x: f32, y: f32, radius: f32) -> Self {
        HitBox::Circle {
            center: Vec2::new(x, y),
            radius,
        }
    }

    pub fn rect(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        HitBox::Rect {
            min: Vec2::new(x1, y1),
            max: Vec2::new(x2, y2),
        }
    }

    pub fn triangle(x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32) -> Self {
        HitBox::Triangle([Vec2::new(x1, y1), Vec2::new(x2, y2), Vec2::new(x3, y3)])
    }

    /// Build from a flat value list by arity:
    /// 2 = point, 3 = circle, 4 = rect, 6 = triangle.
    pub fn from_values(values: &[f32]) -> Result<Self> {
        match *values {
            [x, y] => Ok(Self::point(x, y)),
            [x, y, r] => Ok(Self::circle(x, y, r)),
            [x1, y1, x2, y2] => Ok(Self::rect(x1, y1, x2, y2)),
            [x1, y1, x2, y2, x3, y3] => Ok(Self::triangle(x1, y1, x2, y2, x3, y3)),
            _ => Err(Error::InvalidHitBox { len: values.len() }),
        }
    }

    /// Place the shape with its local origin at `origin`
    pub fn at(&self, origin: Vec2) -> WorldShape {
        match *self {
            HitBox::Point(p) => WorldShape::Point(origin + p),
            HitBox::Circle { center, radius } => WorldShape::Circle {
                center: origin + center,
                radius,
            },
            HitBox::Rect { min, max } => WorldShape::Polygon(vec![
                origin + min,
                origin + Vec2::new(max.x, min.y),
                origin + max,
                origin + Vec2::new(min.x, max.y),
            ]),
            HitBox::Triangle(points) => {
                WorldShape::Polygon(points.iter().map(|p| origin + *p).collect())
            }
        }
    }
}

/// Shape in world coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum WorldShape {
    Point(Vec2),
    Circle { center: Vec2, radius: f32 },
    Polygon(Vec<Vec2>),
}

impl WorldShape {
    /// Overlap test. Symmetric for every pair of variants.
    pub fn collides(&self, other: &WorldShape) -> bool {
        use WorldShape::*;
        match (self, other) {
            (Point(a), Point(b)) => a == b,
            (Point(p), Circle { center, radius }) | (Circle { center, radius }, Point(p)) => {
                point_in_circle(*p, *center, *radius)
            }
            (Point(p), Polygon(poly)) | (Polygon(poly), Point(p)) => point_in_polygon(*p, poly),
            (
                Circle {
                    center: c1,
                    radius: r1,
                },
                Circle {
                    center: c2,
                    radius: r2,
                },
            ) => circles_collide(*c1, *r1, *c2, *r2),
            (Circle { center, radius }, Polygon(poly))
            | (Polygon(poly), Circle { center, radius }) => {
                polygon_circle_collide(poly, *center, *radius)
            }
            (Polygon(a), Polygon(b)) => polygons_collide(a, b),
        }
    }
}

/// Boundary-inclusive
#[inline]
pub fn circles_collide(c1: Vec2, r1: f32, c2: Vec2, r2: f32) -> bool {
    let sum = r1 + r2;
    c1.distance_squared(c2) <= sum * sum
}

/// Boundary-inclusive
#[inline]
pub fn point_in_circle(p: Vec2, center: Vec2, radius: f32) -> bool {
    p.distance_squared(center) <= radius * radius
}

/// Even-odd ray cast towards +x
pub fn point_in_polygon(p: Vec2, poly: &[Vec2]) -> bool {
    let mut inside = false;
    let mut prev = match poly.last() {
        Some(v) => *v,
        None => return false,
    };
    for &cur in poly {
        if (cur.y > p.y) != (prev.y > p.y) {
            let intersect_x =
                cur.x + (prev.x - cur.x) * (p.y - cur.y) / (prev.y - cur.y + RAY_CAST_EPSILON);
            if p.x < intersect_x {
                inside = !inside;
            }
        }
        prev = cur;
    }
    inside
}

/// Unit normal of the edge `from -> to`; zero for a degenerate edge
#[inline]
fn edge_axis(from: Vec2, to: Vec2) -> Vec2 {
    let edge = to - from;
    Vec2::new(-edge.y, edge.x).normalize_or_zero()
}

fn edges(poly: &[Vec2]) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
    poly.iter()
        .enumerate()
        .map(|(i, &p)| (p, poly[(i + 1) % poly.len()]))
}

/// (min, max) of the polygon's projection on `axis`
pub fn project_polygon(poly: &[Vec2], axis: Vec2) -> (f32, f32) {
    poly.iter()
        .map(|p| p.dot(axis))
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), d| {
            (lo.min(d), hi.max(d))
        })
}

#[inline]
fn project_circle(center: Vec2, radius: f32, axis: Vec2) -> (f32, f32) {
    let c = center.dot(axis);
    (c - radius, c + radius)
}

/// Closed intervals touch or overlap
#[inline]
fn overlap(a: (f32, f32), b: (f32, f32)) -> bool {
    !(a.1 < b.0 || b.1 < a.0)
}

/// SAT over the edge normals of both polygons
pub fn polygons_collide(a: &[Vec2], b: &[Vec2]) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    edges(a).chain(edges(b)).all(|(from, to)| {
        let axis = edge_axis(from, to);
        overlap(project_polygon(a, axis), project_polygon(b, axis))
    })
}

/// SAT with the polygon's edge normals and the axis from the circle centre to
/// the nearest vertex
pub fn polygon_circle_collide(poly: &[Vec2], center: Vec2, radius: f32) -> bool {
    let Some(nearest) = poly.iter().copied().min_by(|a, b| {
        a.distance_squared(center)
            .total_cmp(&b.distance_squared(center))
    }) else {
        return false;
    };

    let separated_on = |axis: Vec2| {
        !overlap(
            project_polygon(poly, axis),
            project_circle(center, radius, axis),
        )
    };

    if edges(poly).any(|(from, to)| separated_on(edge_axis(from, to))) {
        return false;
    }
    !separated_on((nearest - center).normalize_or_zero())
}
