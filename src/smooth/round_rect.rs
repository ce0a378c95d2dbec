//! Rounded rectangles and circles with an outline band and an interior.

use std::f32::consts::PI;

use super::{ceil_i16, floor_i16, with_coverage, SmoothKind, SmoothShape};
use crate::color::{alpha_blend, Rgba};
use crate::geometry::Rect;

#[derive(Debug, Clone, PartialEq)]
pub(super) struct RingRect {
    /// The rectangle the corner centers lie on.
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    ro: f32,
    ri: f32,
    ro_sq_adj: f32,
    ri_sq_adj: f32,
    outline: Rgba,
    interior: Rgba,
    /// Pixels inside any of these are interior.
    inner_mid: Rect,
    inner_wide: Rect,
    inner_tall: Rect,
}

pub(super) fn thick_round_rect(
    mut x0: f32,
    mut y0: f32,
    mut x1: f32,
    mut y1: f32,
    radius: f32,
    thickness: f32,
    color: Rgba,
    interior: Rgba,
) -> SmoothShape {
    let thickness = thickness.max(0.0);
    if x1 < x0 {
        std::mem::swap(&mut x0, &mut x1);
    }
    if y1 < y0 {
        std::mem::swap(&mut y0, &mut y1);
    }
    let half = thickness * 0.5;
    x0 -= half;
    y0 -= half;
    x1 += half;
    y1 += half;
    let w = x1 - x0;
    let h = y1 - y0;
    let ro = (radius.max(0.0) + half).min(w.min(h) * 0.5);
    let ri = (ro - thickness).max(0.0);

    let extents = Rect::new(
        floor_i16(x0 + 0.5),
        floor_i16(y0 + 0.5),
        ceil_i16(x1 - 0.5),
        ceil_i16(y1 - 0.5),
    );
    if extents.x_min == extents.x_max && extents.y_min == extents.y_max {
        // Sub-pixel: a single pixel with the covered fractions of both colors.
        let corners = 4.0 - PI;
        let outer = (w * h - corners * ro * ro).clamp(0.0, 1.0);
        let inner = ((w - thickness) * (h - thickness) - corners * ri * ri).clamp(0.0, 1.0);
        let c = alpha_blend(with_coverage(color, outer), with_coverage(interior, inner));
        return SmoothShape::pixel(extents.x_min, extents.y_min, c);
    }

    let (x0, y0, x1, y1) = (x0 + ro, y0 + ro, x1 - ro, y1 - ro);
    let d = 0.5f32.sqrt() * ri;
    let inner_mid = Rect::new(
        ceil_i16(x0 - d + 0.5),
        ceil_i16(y0 - d + 0.5),
        floor_i16(x1 + d - 0.5),
        floor_i16(y1 + d - 0.5),
    );
    let inner_wide = Rect::new(
        ceil_i16(x0 - ri + 0.5),
        ceil_i16(y0 + 0.5),
        floor_i16(x1 + ri - 0.5),
        floor_i16(y1 - 0.5),
    );
    let inner_tall = Rect::new(
        ceil_i16(x0 + 0.5),
        ceil_i16(y0 - ri + 0.5),
        floor_i16(x1 - 0.5),
        floor_i16(y1 + ri - 0.5),
    );
    SmoothShape {
        extents,
        kind: SmoothKind::RoundRect(RingRect {
            x0,
            y0,
            x1,
            y1,
            ro,
            ri,
            ro_sq_adj: ro * ro + 0.25,
            ri_sq_adj: ri * ri + 0.25,
            outline: color,
            interior,
            inner_mid,
            inner_wide,
            inner_tall,
        }),
    }
}

impl RingRect {
    fn in_inner_boxes(&self, r: &Rect) -> bool {
        self.inner_mid.contains_rect(r)
            || self.inner_wide.contains_rect(r)
            || self.inner_tall.contains_rect(r)
    }

    /// Squared distance from `(x, y)` to the corner-center rectangle.
    fn dist_sq(&self, x: f32, y: f32) -> f32 {
        let dx = x - x.max(self.x0).min(self.x1);
        let dy = y - y.max(self.y0).min(self.y1);
        dx * dx + dy * dy
    }

    pub(super) fn color_at(&self, x: i16, y: i16) -> Rgba {
        if self.in_inner_boxes(&Rect::new(x, y, x, y)) {
            return self.interior;
        }
        let d_sq = self.dist_sq(f32::from(x), f32::from(y));
        if self.ri >= 0.5 && d_sq <= self.ri_sq_adj - self.ri {
            return self.interior;
        }
        if d_sq >= self.ro_sq_adj + self.ro {
            return Rgba::TRANSPARENT;
        }
        let within_outer = d_sq <= self.ro_sq_adj - self.ro;
        let outside_inner = self.ro == self.ri || d_sq >= self.ri_sq_adj + self.ri;
        if within_outer && outside_inner {
            return self.outline;
        }
        let d = d_sq.sqrt();
        if outside_inner {
            return with_coverage(self.outline, self.ro - d + 0.5);
        }
        if within_outer {
            let mut opacity = 1.0 - (self.ri - d + 0.5);
            // A hairline hole narrower than a pixel shows through twice.
            if self.ri < 0.5
                && ((self.x0 - self.ri).round() == (self.x1 + self.ri).round()
                    || (self.y0 - self.ri).round() == (self.y1 + self.ri).round())
            {
                opacity = (opacity * 2.0).min(1.0);
            }
            return alpha_blend(self.interior, with_coverage(self.outline, opacity));
        }
        let coverage = ((self.ro - d + 0.5) - (self.ri - d + 0.5)).max(0.0);
        alpha_blend(self.interior, with_coverage(self.outline, coverage))
    }

    pub(super) fn uniform_color(&self, r: Rect) -> Option<Rgba> {
        if self.in_inner_boxes(&r) {
            return Some(self.interior);
        }
        // Pixel-edge corners of the box.
        let bx0 = f32::from(r.x_min) - 0.5;
        let by0 = f32::from(r.y_min) - 0.5;
        let bx1 = f32::from(r.x_max) + 0.5;
        let by1 = f32::from(r.y_max) + 0.5;
        let tl = self.dist_sq(bx0, by0);
        let tr = self.dist_sq(bx1, by0);
        let bl = self.dist_sq(bx0, by1);
        let br = self.dist_sq(bx1, by1);

        let r_min_sq = self.ri_sq_adj - self.ri;
        if self.ri >= 0.5 && tl < r_min_sq && tr < r_min_sq && bl < r_min_sq && br < r_min_sq {
            return Some(self.interior);
        }

        // Entirely beyond one corner: the nearest box corner decides.
        let left = bx1 <= self.x0;
        let right = bx0 >= self.x1;
        let top = by1 <= self.y0;
        let bottom = by0 >= self.y1;
        let (near, far) = match (left, right, top, bottom) {
            (true, _, true, _) => (br, tl),
            (_, true, true, _) => (bl, tr),
            (true, _, _, true) => (tr, bl),
            (_, true, _, true) => (tl, br),
            _ => return None,
        };
        if near >= self.ro_sq_adj + self.ro {
            return Some(Rgba::TRANSPARENT);
        }
        // Entirely inside the outline band of that corner.
        let ring_max = self.ro_sq_adj - self.ro;
        let ring_min = self.ri_sq_adj + self.ri;
        if far < ring_max && near > ring_min {
            return Some(self.outline);
        }
        None
    }
}
