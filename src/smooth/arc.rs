//! Ring sectors: arcs, pies, and arcs drawn over their own background ring.
//!
//! Angles are measured in radians clockwise from 12 o'clock, so the point
//! at angle `a` on a circle of radius `r` is `(r·sin a, -r·cos a)`.
//!
//! The ring between the inner and outer radius is split by the arc's angular
//! range into an *active* part and an *inactive* part; the disc inside the
//! ring is the *interior*. For trimmed arcs the inactive part and the
//! interior are transparent.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use super::{ceil_i16, floor_i16, with_alpha, with_coverage, EndingStyle, SmoothKind, SmoothShape};
use crate::color::{alpha_blend, Rgba};
use crate::geometry::{FpPoint, Rect};

/// First angle of each quadrant, in tag-bit order: top-left, top-right,
/// bottom-left, bottom-right.
const QUADRANT_START: [f32; 4] = [-FRAC_PI_2, 0.0, PI, FRAC_PI_2];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct ArcColors {
    pub(super) active: Rgba,
    pub(super) inactive: Rgba,
    pub(super) interior: Rgba,
}

impl ArcColors {
    pub(super) const fn active(color: Rgba) -> Self {
        Self {
            active: color,
            inactive: Rgba::TRANSPARENT,
            interior: Rgba::TRANSPARENT,
        }
    }
}

/// Unit direction of a ray from the center.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Ray {
    x: f32,
    y: f32,
}

impl Ray {
    fn at(angle: f32) -> Self {
        Self {
            x: angle.sin(),
            y: -angle.cos(),
        }
    }
}

/// The wedge swept clockwise from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Wedge {
    start: Ray,
    end: Ray,
    /// At most half a turn: the wedge is the intersection of two
    /// half-planes rather than their union.
    sharp: bool,
}

impl Wedge {
    /// Signed distances outside the start and end boundaries.
    #[inline]
    fn sides(&self, dx: f32, dy: f32) -> (f32, f32) {
        (
            self.start.y * dx - self.start.x * dy,
            self.end.x * dy - self.end.y * dx,
        )
    }

    /// The complementary wedge, from `end` round to `start`.
    fn complement(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
            sharp: !self.sharp,
        }
    }

    /// Returns true if every point `corners` spans is at least half a pixel
    /// inside the wedge.
    fn contains_box(&self, corners: &[(f32, f32); 4]) -> bool {
        let mut in_start = true;
        let mut in_end = true;
        for &(dx, dy) in corners {
            let (n1, n2) = self.sides(dx, dy);
            in_start &= n1 <= -0.5;
            in_end &= n2 <= -0.5;
        }
        if self.sharp {
            in_start && in_end
        } else {
            // The union of two half-planes is not convex; one must hold the
            // whole box.
            in_start || in_end
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct ArcShape {
    xc: f32,
    yc: f32,
    ro: f32,
    ri: f32,
    ro_sq_adj: f32,
    ri_sq_adj: f32,
    /// Half the ring width, the radius of a rounded cap.
    rm: f32,
    rm_sq_adj: f32,
    /// Cap centers relative to the ring center.
    start_cap: (f32, f32),
    end_cap: (f32, f32),
    range: Wedge,
    /// The range widened by the caps.
    cutoff: Wedge,
    /// The widened range leaves part of the ring uncovered.
    nonempty_cutoff: bool,
    round: bool,
    active_quadrants: u8,
    inactive_quadrants: u8,
    colors: ArcColors,
    inner_mid: Rect,
}

/// Returns true if `theta`, or a whole turn away from it, lies in
/// `[start, end]`.
fn spans_angle(start: f32, end: f32, theta: f32) -> bool {
    theta + TAU * ((start - theta) / TAU).ceil() <= end
}

pub(super) fn thick_arc(
    center: FpPoint,
    radius: f32,
    thickness: f32,
    start: f32,
    end: f32,
    colors: ArcColors,
    ending: EndingStyle,
    trim: bool,
) -> SmoothShape {
    if radius <= 0.0 || thickness <= 0.0 || start == end {
        return SmoothShape::EMPTY;
    }
    let (start, end) = if end < start { (end, start) } else { (start, end) };
    let range = end - start;
    if range >= TAU {
        return SmoothShape::thick_circle(center, radius, thickness, colors.active, colors.interior);
    }
    let start_norm = (start + PI).rem_euclid(TAU) - PI;
    let (start, end) = (start_norm, start_norm + range);

    let ro = radius + thickness * 0.5;
    let ri = (ro - thickness).max(0.0);
    let rc = (ro + ri) * 0.5;
    let rm = (ro - ri) * 0.5;
    let round = ending == EndingStyle::Rounded;

    // Angular half-width of a cap as seen from the center.
    let cap = if round { (rm / rc).min(1.0).asin() } else { 0.0 };
    let nonempty_cutoff = range + 2.0 * cap < TAU;
    let (cut_start, cut_end) = (start - cap, end + cap);

    let mut active_quadrants = 0u8;
    let mut inactive_quadrants = 0u8;
    for (bit, &qa) in QUADRANT_START.iter().enumerate() {
        let lo = qa + TAU * ((start - qa) / TAU).ceil();
        if lo + FRAC_PI_2 <= end {
            active_quadrants |= 1 << bit;
            continue;
        }
        if nonempty_cutoff && !trim {
            let lo = qa + TAU * ((cut_start - qa - FRAC_PI_2) / TAU).ceil();
            if lo > cut_end {
                inactive_quadrants |= 1 << bit;
            }
        }
    }

    let (xc, yc) = (center.x, center.y);
    let start_cap = (rc * start.sin(), -rc * start.cos());
    let end_cap = (rc * end.sin(), -rc * end.cos());

    let full = Rect::new(
        floor_i16(xc - ro + 0.5),
        floor_i16(yc - ro + 0.5),
        ceil_i16(xc + ro - 0.5),
        ceil_i16(yc + ro - 0.5),
    );
    let extents = if trim {
        // Per side: the full radius if the arc crosses that side's extreme
        // angle, otherwise the farthest end.
        let (lo_x, hi_x, lo_y, hi_y) = if round {
            (
                floor_i16(xc + start_cap.0.min(end_cap.0) - rm + 0.5),
                ceil_i16(xc + start_cap.0.max(end_cap.0) + rm - 0.5),
                floor_i16(yc + start_cap.1.min(end_cap.1) - rm + 0.5),
                ceil_i16(yc + start_cap.1.max(end_cap.1) + rm - 0.5),
            )
        } else {
            let xs = [
                ro * start.sin(),
                ri * start.sin(),
                ro * end.sin(),
                ri * end.sin(),
            ];
            let ys = [
                -ro * start.cos(),
                -ri * start.cos(),
                -ro * end.cos(),
                -ri * end.cos(),
            ];
            let min = |v: &[f32; 4]| v.iter().copied().fold(f32::INFINITY, f32::min);
            let max = |v: &[f32; 4]| v.iter().copied().fold(f32::NEG_INFINITY, f32::max);
            (
                floor_i16(xc + min(&xs) - 0.5),
                ceil_i16(xc + max(&xs) + 0.5),
                floor_i16(yc + min(&ys) - 0.5),
                ceil_i16(yc + max(&ys) + 0.5),
            )
        };
        Rect::new(
            if spans_angle(start, end, -FRAC_PI_2) { full.x_min } else { lo_x.max(full.x_min) },
            if spans_angle(start, end, 0.0) { full.y_min } else { lo_y.max(full.y_min) },
            if spans_angle(start, end, FRAC_PI_2) { full.x_max } else { hi_x.min(full.x_max) },
            if spans_angle(start, end, PI) { full.y_max } else { hi_y.min(full.y_max) },
        )
    } else {
        full
    };

    let d = 0.5f32.sqrt() * ri;
    let inner_mid = Rect::new(
        ceil_i16(xc - d + 0.5),
        ceil_i16(yc - d + 0.5),
        floor_i16(xc + d - 0.5),
        floor_i16(yc + d - 0.5),
    );
    log::trace!("arc {start}..{end} r={ro}/{ri} quadrants {active_quadrants:04b}/{inactive_quadrants:04b}");

    SmoothShape {
        extents,
        kind: SmoothKind::Arc(ArcShape {
            xc,
            yc,
            ro,
            ri,
            ro_sq_adj: ro * ro + 0.25,
            ri_sq_adj: ri * ri + 0.25,
            rm,
            rm_sq_adj: rm * rm + 0.25,
            start_cap,
            end_cap,
            range: Wedge {
                start: Ray::at(start),
                end: Ray::at(end),
                sharp: range <= PI,
            },
            cutoff: Wedge {
                start: Ray::at(cut_start),
                end: Ray::at(cut_end),
                sharp: range + 2.0 * cap <= PI,
            },
            nonempty_cutoff,
            round,
            active_quadrants,
            inactive_quadrants,
            colors,
            inner_mid,
        }),
    }
}

/// Quadrant tag bits of the offsets `dx` and `dy` from the center: a
/// quadrant is tagged when it is within half a pixel.
#[inline]
fn quadrant_tags(dx_min: f32, dx_max: f32, dy_min: f32, dy_max: f32) -> u8 {
    let qx = u8::from(dx_min < 0.5) | (u8::from(dx_max > -0.5) << 1);
    let top = if dy_min < 0.5 { qx } else { 0 };
    let bottom = if dy_max > -0.5 { qx << 2 } else { 0 };
    top | bottom
}

impl ArcShape {
    /// Color of the ring at `(dx, dy)` from the center, ignoring the ring
    /// edges.
    fn band_color(&self, dx: f32, dy: f32) -> Rgba {
        let ArcColors {
            active, inactive, ..
        } = self.colors;
        let tags = quadrant_tags(dx, dx, dy, dy);
        if tags & self.active_quadrants == tags {
            return active;
        }
        if tags & self.inactive_quadrants == tags {
            return inactive;
        }
        let (n1, n2) = self.range.sides(dx, dy);
        let within = if self.range.sharp {
            n1 <= -0.5 && n2 <= -0.5
        } else {
            n1 <= -0.5 || n2 <= -0.5
        };
        if within {
            return active;
        }

        let coverage = if self.round {
            let dist_sq = |(cx, cy): (f32, f32)| (dx - cx) * (dx - cx) + (dy - cy) * (dy - cy);
            let d_sq = dist_sq(self.start_cap).min(dist_sq(self.end_cap));
            if d_sq > self.rm_sq_adj + self.rm {
                return inactive;
            }
            if d_sq < self.rm_sq_adj - self.rm {
                return active;
            }
            self.rm - d_sq.sqrt() + 0.5
        } else if self.range.sharp {
            if n1 >= 0.5 || n2 >= 0.5 {
                return inactive;
            }
            let (s, e) = (self.range.start, self.range.end);
            let mut alpha = 1.0;
            if n1 > -0.5 && s.x * dx + s.y * dy > 0.0 {
                alpha *= 1.0 - (n1 + 0.5);
            }
            if n2 > -0.5 && e.x * dx + e.y * dy >= 0.0 {
                alpha *= 1.0 - (n2 + 0.5);
            }
            alpha
        } else {
            let (s, e) = (self.range.start, self.range.end);
            let mut outside = 1.0;
            if n1 > -0.5 && n1 < 0.5 && s.y * dy + s.x * dx >= 0.0 {
                outside *= n1 + 0.5;
            }
            if n2 > -0.5 && n2 < 0.5 && e.x * dx + e.y * dy > 0.0 {
                outside *= n2 + 0.5;
            }
            1.0 - outside
        };
        let alpha = (0.5 + f32::from(active.a) * coverage) as u8;
        alpha_blend(inactive, with_alpha(alpha, active))
    }

    pub(super) fn color_at(&self, x: i16, y: i16) -> Rgba {
        if self.inner_mid.contains(x, y) {
            return self.colors.interior;
        }
        let dx = f32::from(x) - self.xc;
        let dy = f32::from(y) - self.yc;
        let d_sq = dx * dx + dy * dy;
        if self.ri >= 0.5 && d_sq <= self.ri_sq_adj - self.ri {
            return self.colors.interior;
        }
        if d_sq >= self.ro_sq_adj + self.ro {
            return Rgba::TRANSPARENT;
        }
        let color = self.band_color(dx, dy);
        let within_outer = d_sq <= self.ro_sq_adj - self.ro;
        let outside_inner =
            self.ro == self.ri || self.ri == 0.0 || d_sq >= self.ri_sq_adj + self.ri;
        if within_outer && outside_inner {
            return color;
        }
        let d = d_sq.sqrt();
        if outside_inner {
            return with_coverage(color, self.ro - d + 0.5);
        }
        let interior = self.colors.interior;
        if within_outer {
            return alpha_blend(interior, with_coverage(color, 1.0 - (self.ri - d + 0.5)));
        }
        let coverage = ((self.ro - d + 0.5) - (self.ri - d + 0.5)).max(0.0);
        alpha_blend(interior, with_coverage(color, coverage))
    }

    pub(super) fn uniform_color(&self, r: Rect) -> Option<Rgba> {
        if self.inner_mid.contains_rect(&r) {
            return Some(self.colors.interior);
        }
        // Pixel-center offsets of the box from the center.
        let x0 = f32::from(r.x_min) - self.xc;
        let y0 = f32::from(r.y_min) - self.yc;
        let x1 = f32::from(r.x_max) - self.xc;
        let y1 = f32::from(r.y_max) - self.yc;
        let corners = [(x0, y0), (x1, y0), (x0, y1), (x1, y1)];
        let far_sq = corners
            .iter()
            .map(|&(x, y)| x * x + y * y)
            .fold(0.0f32, f32::max);
        let nx = if x0 > 0.0 { x0 } else if x1 < 0.0 { x1 } else { 0.0 };
        let ny = if y0 > 0.0 { y0 } else if y1 < 0.0 { y1 } else { 0.0 };
        let near_sq = nx * nx + ny * ny;

        if self.ri >= 0.5 && far_sq < self.ri_sq_adj - self.ri {
            return Some(self.colors.interior);
        }
        if near_sq >= self.ro_sq_adj + self.ro {
            return Some(Rgba::TRANSPARENT);
        }
        // Only boxes entirely within the ring band can be uniform.
        if far_sq > self.ro_sq_adj - self.ro || near_sq < self.ri_sq_adj + self.ri {
            return None;
        }

        let tags = quadrant_tags(x0, x1, y0, y1);
        if tags & self.active_quadrants == tags {
            return Some(self.colors.active);
        }
        if tags & self.inactive_quadrants == tags {
            return Some(self.colors.inactive);
        }
        if self.range.contains_box(&corners) {
            return Some(self.colors.active);
        }
        if self.nonempty_cutoff {
            if self.cutoff.complement().contains_box(&corners) {
                return Some(self.colors.inactive);
            }
        }
        if self.round {
            let limit = self.rm_sq_adj - self.rm;
            for (cx, cy) in [self.start_cap, self.end_cap] {
                let inside = corners
                    .iter()
                    .all(|&(x, y)| (x - cx) * (x - cx) + (y - cy) * (y - cy) < limit);
                if inside {
                    return Some(self.colors.active);
                }
            }
        }
        None
    }
}
