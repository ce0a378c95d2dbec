//! Anti-aliased shapes.
//!
//! A [`SmoothShape`] is an immutable description of a line, wedge, rounded
//! rectangle, circle, arc or triangle in floating-point coordinates, with its
//! per-pixel coefficients precomputed at construction. It is drawn through
//! the [`Rasterizable`] blit: each pixel's color is a function of its
//! distance to the shape boundary.
//!
//! Coverage is approximated by a linear ramp across a one-pixel band around
//! the boundary (clamped to `[0, 1]`), not by exact area integration. For the
//! shapes here the error is below what 8-bit alpha can show.
//!
//! Rectangle queries try to prove a whole tile uniform (fully inside, fully
//! outside, or fully within a single-colored region) before falling back to
//! per-pixel evaluation. Any uniform answer equals what the per-pixel path
//! returns for every pixel of the rectangle.

mod arc;
mod round_rect;
mod triangle;
mod wedge;

use crate::color::Rgba;
use crate::geometry::{FpPoint, Rect};
use crate::raster::{draw_rasterizable, Rasterizable};
use crate::render::{Drawable, Surface};

use arc::ArcShape;
use round_rect::RingRect;
use triangle::TriangleShape;
use wedge::Wedge;

/// How the ends of lines and arcs are finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EndingStyle {
    /// Semicircular caps.
    #[default]
    Rounded,
    /// Cut square at the endpoint.
    Flat,
}

#[derive(Debug, Clone, PartialEq)]
enum SmoothKind {
    Empty,
    Pixel(Rgba),
    Wedge(Wedge),
    RoundRect(RingRect),
    Arc(ArcShape),
    Triangle(TriangleShape),
}

/// An anti-aliased shape.
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothShape {
    extents: Rect,
    kind: SmoothKind,
}

/// `color` with its alpha scaled by `coverage`, truncated. Zero alpha is
/// always [`Rgba::TRANSPARENT`].
#[inline]
fn with_coverage(color: Rgba, coverage: f32) -> Rgba {
    with_alpha((f32::from(color.a) * coverage) as u8, color)
}

#[inline]
fn with_alpha(alpha: u8, color: Rgba) -> Rgba {
    if alpha == 0 {
        Rgba::TRANSPARENT
    } else {
        color.with_alpha(alpha)
    }
}

#[inline]
fn floor_i16(v: f32) -> i16 {
    v.floor() as i16
}

#[inline]
fn ceil_i16(v: f32) -> i16 {
    v.ceil() as i16
}

impl SmoothShape {
    /// The shape that draws nothing.
    pub const EMPTY: Self = Self {
        extents: Rect::EMPTY,
        kind: SmoothKind::Empty,
    };

    fn pixel(x: i16, y: i16, color: Rgba) -> Self {
        if color.is_transparent() {
            return Self::EMPTY;
        }
        Self {
            extents: Rect::new(x, y, x, y),
            kind: SmoothKind::Pixel(color),
        }
    }

    /// Returns true if the shape draws nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self.kind, SmoothKind::Empty)
    }

    /// Color of the pixel `(x, y)`.
    fn color_at(&self, x: i16, y: i16) -> Rgba {
        match &self.kind {
            SmoothKind::Empty => Rgba::TRANSPARENT,
            SmoothKind::Pixel(c) => *c,
            SmoothKind::Wedge(w) => w.color_at(x, y),
            SmoothKind::RoundRect(r) => r.color_at(x, y),
            SmoothKind::Arc(a) => a.color_at(x, y),
            SmoothKind::Triangle(t) => t.color_at(x, y),
        }
    }

    /// A uniform color for `rect`, if one can be proven cheaply.
    fn uniform_color(&self, rect: Rect) -> Option<Rgba> {
        match &self.kind {
            SmoothKind::Empty => Some(Rgba::TRANSPARENT),
            SmoothKind::Pixel(c) => Some(*c),
            SmoothKind::Wedge(_) => None,
            SmoothKind::RoundRect(r) => r.uniform_color(rect),
            SmoothKind::Arc(a) => a.uniform_color(rect),
            SmoothKind::Triangle(t) => t.uniform_color(rect),
        }
    }

    // ------------------------------------------------------------------
    // Lines
    // ------------------------------------------------------------------

    /// A line from `a` to `b` whose width changes linearly from `width_a`
    /// to `width_b`.
    ///
    /// Negative widths count as 0. With rounded endings, a wedge whose
    /// smaller cap lies entirely inside the larger one is drawn as a circle.
    #[must_use]
    pub fn wedged_line(
        a: FpPoint,
        width_a: f32,
        b: FpPoint,
        width_b: f32,
        color: Rgba,
        ending: EndingStyle,
    ) -> Self {
        wedge::wedged_line(a, width_a, b, width_b, color, ending)
    }

    /// A line of constant `width`.
    #[must_use]
    pub fn thick_line(a: FpPoint, b: FpPoint, width: f32, color: Rgba, ending: EndingStyle) -> Self {
        Self::wedged_line(a, width, b, width, color, ending)
    }

    /// A one-pixel line with rounded endings.
    #[must_use]
    pub fn line(a: FpPoint, b: FpPoint, color: Rgba) -> Self {
        Self::thick_line(a, b, 1.0, color, EndingStyle::Rounded)
    }

    /// A filled `width` x `height` rectangle centered on `center`.
    ///
    /// At `angle == 0` the height runs along the y axis. Positive angles
    /// swing the `+y` end of that axis toward `+x`, so at `PI / 4` the long
    /// side follows the `x == y` diagonal through the center.
    #[must_use]
    pub fn rotated_filled_rect(
        center: FpPoint,
        width: f32,
        height: f32,
        angle: f32,
        color: Rgba,
    ) -> Self {
        if width <= 0.0 || height <= 0.0 {
            return Self::EMPTY;
        }
        let dx = angle.sin() * height * 0.5;
        let dy = angle.cos() * height * 0.5;
        Self::thick_line(
            FpPoint::new(center.x + dx, center.y + dy),
            FpPoint::new(center.x - dx, center.y - dy),
            width,
            color,
            EndingStyle::Flat,
        )
    }

    // ------------------------------------------------------------------
    // Rounded rectangles and circles
    // ------------------------------------------------------------------

    /// A rounded rectangle with a `thickness`-wide outline centered on the
    /// edges of `(x0, y0)..(x1, y1)`, filled with `interior`.
    ///
    /// The radius is clamped to half of the smaller side.
    #[must_use]
    pub fn thick_round_rect(
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        radius: f32,
        thickness: f32,
        color: Rgba,
        interior: Rgba,
    ) -> Self {
        round_rect::thick_round_rect(x0, y0, x1, y1, radius, thickness, color, interior)
    }

    /// A rounded rectangle with a one-pixel outline.
    #[must_use]
    pub fn round_rect(
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        radius: f32,
        color: Rgba,
        interior: Rgba,
    ) -> Self {
        Self::thick_round_rect(x0, y0, x1, y1, radius, 1.0, color, interior)
    }

    /// A solid rounded rectangle.
    #[must_use]
    pub fn filled_round_rect(x0: f32, y0: f32, x1: f32, y1: f32, radius: f32, color: Rgba) -> Self {
        Self::thick_round_rect(x0, y0, x1, y1, radius, 0.0, color, color)
    }

    /// A circle with a `thickness`-wide outline, filled with `interior`.
    #[must_use]
    pub fn thick_circle(
        center: FpPoint,
        radius: f32,
        thickness: f32,
        color: Rgba,
        interior: Rgba,
    ) -> Self {
        Self::thick_round_rect(
            center.x - radius,
            center.y - radius,
            center.x + radius,
            center.y + radius,
            radius,
            thickness,
            color,
            interior,
        )
    }

    /// A circle with a one-pixel outline.
    #[must_use]
    pub fn circle(center: FpPoint, radius: f32, color: Rgba, interior: Rgba) -> Self {
        Self::thick_circle(center, radius, 1.0, color, interior)
    }

    /// A solid disc.
    #[must_use]
    pub fn filled_circle(center: FpPoint, radius: f32, color: Rgba) -> Self {
        Self::thick_circle(center, radius, 0.0, color, color)
    }

    // ------------------------------------------------------------------
    // Arcs
    // ------------------------------------------------------------------

    /// A one-pixel arc with rounded endings.
    ///
    /// Angles are in radians, clockwise from 12 o'clock.
    #[must_use]
    pub fn arc(center: FpPoint, radius: f32, start: f32, end: f32, color: Rgba) -> Self {
        Self::thick_arc(center, radius, 1.0, start, end, color, EndingStyle::Rounded)
    }

    /// An arc of the given `thickness`.
    #[must_use]
    pub fn thick_arc(
        center: FpPoint,
        radius: f32,
        thickness: f32,
        start: f32,
        end: f32,
        color: Rgba,
        ending: EndingStyle,
    ) -> Self {
        arc::thick_arc(
            center,
            radius,
            thickness,
            start,
            end,
            arc::ArcColors::active(color),
            ending,
            true,
        )
    }

    /// A pie slice.
    #[must_use]
    pub fn pie(center: FpPoint, radius: f32, start: f32, end: f32, color: Rgba) -> Self {
        Self::thick_arc(
            center,
            radius * 0.5,
            radius,
            start,
            end,
            color,
            EndingStyle::Flat,
        )
    }

    /// An arc drawn over the rest of its ring, which gets `inactive`; the
    /// disc inside the ring gets `interior`.
    ///
    /// Extents always cover the full ring.
    #[must_use]
    pub fn thick_arc_with_background(
        center: FpPoint,
        radius: f32,
        thickness: f32,
        start: f32,
        end: f32,
        active: Rgba,
        inactive: Rgba,
        interior: Rgba,
        ending: EndingStyle,
    ) -> Self {
        arc::thick_arc(
            center,
            radius,
            thickness,
            start,
            end,
            arc::ArcColors {
                active,
                inactive,
                interior,
            },
            ending,
            false,
        )
    }

    // ------------------------------------------------------------------
    // Triangles
    // ------------------------------------------------------------------

    /// A solid triangle. Either winding is accepted; collinear vertices give
    /// the empty shape.
    #[must_use]
    pub fn filled_triangle(a: FpPoint, b: FpPoint, c: FpPoint, color: Rgba) -> Self {
        triangle::filled_triangle(a, b, c, color)
    }
}

impl Drawable for SmoothShape {
    fn extents(&self) -> Rect {
        self.extents
    }

    fn draw_to(&self, s: &mut Surface<'_>) {
        draw_rasterizable(self, s);
    }
}

impl Rasterizable for SmoothShape {
    fn read_colors(&self, xs: &[i16], ys: &[i16], out: &mut [Rgba]) {
        match &self.kind {
            SmoothKind::Empty => out.fill(Rgba::TRANSPARENT),
            SmoothKind::Pixel(c) => out.fill(*c),
            _ => {
                for ((&x, &y), o) in xs.iter().zip(ys).zip(out.iter_mut()) {
                    *o = self.color_at(x, y);
                }
            }
        }
    }

    fn read_color_rect(&self, rect: Rect, out: &mut [Rgba]) -> bool {
        if rect.is_empty() {
            return false;
        }
        if let Some(c) = self.uniform_color(rect) {
            out[0] = c;
            return true;
        }
        let mut n = 0;
        for y in rect.y_min..=rect.y_max {
            for x in rect.x_min..=rect.x_max {
                out[n] = self.color_at(x, y);
                n += 1;
            }
        }
        let first = out[0];
        out[1..n].iter().all(|&c| c == first)
    }
}
