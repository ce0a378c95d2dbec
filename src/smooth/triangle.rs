//! Solid anti-aliased triangles.

use super::{ceil_i16, floor_i16, with_alpha, SmoothKind, SmoothShape};
use crate::color::Rgba;
use crate::geometry::{FpPoint, Rect};

/// One edge as a point and a unit direction; the outward normal is
/// `(dy, -dx)`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Edge {
    x: f32,
    y: f32,
    dx: f32,
    dy: f32,
}

impl Edge {
    fn new(from: FpPoint, to: FpPoint) -> Self {
        let len = from.distance(to);
        Self {
            x: from.x,
            y: from.y,
            dx: (to.x - from.x) / len,
            dy: (to.y - from.y) / len,
        }
    }

    /// Signed distance of `(x, y)` outside this edge.
    #[inline]
    fn outside(&self, x: f32, y: f32) -> f32 {
        self.dy * (x - self.x) - self.dx * (y - self.y)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct TriangleShape {
    edges: [Edge; 3],
    color: Rgba,
}

pub(super) fn filled_triangle(a: FpPoint, b: FpPoint, c: FpPoint, color: Rgba) -> SmoothShape {
    let cross = (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);
    if cross == 0.0 || !cross.is_finite() {
        return SmoothShape::EMPTY;
    }
    // Clockwise on screen (y down), so every normal points outward.
    let (b, c) = if cross > 0.0 { (b, c) } else { (c, b) };
    let extents = Rect::new(
        floor_i16(a.x.min(b.x).min(c.x)),
        floor_i16(a.y.min(b.y).min(c.y)),
        ceil_i16(a.x.max(b.x).max(c.x)),
        ceil_i16(a.y.max(b.y).max(c.y)),
    );
    SmoothShape {
        extents,
        kind: SmoothKind::Triangle(TriangleShape {
            edges: [Edge::new(a, b), Edge::new(b, c), Edge::new(c, a)],
            color,
        }),
    }
}

impl TriangleShape {
    pub(super) fn color_at(&self, x: i16, y: i16) -> Rgba {
        let (x, y) = (f32::from(x), f32::from(y));
        let mut coverage = 1.0f32;
        let mut inside = true;
        for e in &self.edges {
            let n = e.outside(x, y);
            if n >= 0.5 {
                return Rgba::TRANSPARENT;
            }
            if n > -0.5 {
                inside = false;
                coverage *= (0.5 - n).min(1.0);
            }
        }
        if inside {
            return self.color;
        }
        with_alpha((f32::from(self.color.a) * coverage).round() as u8, self.color)
    }

    pub(super) fn uniform_color(&self, r: Rect) -> Option<Rgba> {
        let xs = [f32::from(r.x_min), f32::from(r.x_max)];
        let ys = [f32::from(r.y_min), f32::from(r.y_max)];
        let mut all_inside = true;
        for e in &self.edges {
            let mut beyond = true;
            for &x in &xs {
                for &y in &ys {
                    let n = e.outside(x, y);
                    all_inside &= n <= -0.5;
                    beyond &= n >= 0.5;
                }
            }
            if beyond {
                return Some(Rgba::TRANSPARENT);
            }
        }
        all_inside.then_some(self.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Drawable;
    use crate::raster::Rasterizable;

    fn p(x: f32, y: f32) -> FpPoint {
        FpPoint::new(x, y)
    }

    #[test]
    fn test_extents_round_outward() {
        let t = SmoothShape::filled_triangle(p(0.5, 0.2), p(9.7, 1.0), p(4.0, 8.3), Rgba::RED);
        assert_eq!(t.extents(), Rect::new(0, 0, 10, 9));
    }

    #[test]
    fn test_edge_pixels_half_covered() {
        let t = SmoothShape::filled_triangle(p(0.0, 0.0), p(20.0, 0.0), p(0.0, 20.0), Rgba::RED);
        // Centered on the top edge.
        assert_eq!(t.color_at(5, 0).a, 128);
        // On the top-left corner, two edges each take half.
        assert_eq!(t.color_at(0, 0).a, 64);
    }

    #[test]
    fn test_uniform_tiles() {
        let t = SmoothShape::filled_triangle(p(0.0, 0.0), p(40.0, 0.0), p(0.0, 40.0), Rgba::RED);
        let mut out = vec![Rgba::TRANSPARENT; 64];
        assert!(t.read_color_rect(Rect::new(2, 2, 9, 9), &mut out));
        assert_eq!(out[0], Rgba::RED);
        assert!(t.read_color_rect(Rect::new(30, 30, 37, 37), &mut out));
        assert_eq!(out[0], Rgba::TRANSPARENT);
        assert!(!t.read_color_rect(Rect::new(-2, 5, 5, 12), &mut out));
    }
}
