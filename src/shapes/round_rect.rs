//! Rounded rectangles and circles.
//!
//! A circle is a rounded rectangle whose radius is half its (square) box, so
//! both families share the midpoint stepping below.

use super::{device_box, fill_spans, SpanSource};
use crate::color::{alpha_blend, Rgba};
use crate::geometry::{Point, Rect};
use crate::render::{erase_background, Drawable, FillMode, Filler, Surface};

/// Box plus corner radius, radius clamped to half the minor dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RoundedBox {
    bounds: Rect,
    radius: i16,
}

impl RoundedBox {
    fn new(x0: i16, y0: i16, x1: i16, y1: i16, radius: i16) -> Self {
        let bounds = Rect::new(x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1));
        let max_radius = (bounds.width().min(bounds.height()) / 2) as i16;
        Self {
            bounds,
            radius: radius.clamp(0, max_radius),
        }
    }

    fn circle(x0: i16, y0: i16, diameter: i16) -> Self {
        let x1 = i32::from(x0) + i32::from(diameter) - 1;
        let y1 = i32::from(y0) + i32::from(diameter) - 1;
        Self {
            bounds: Rect::from_i32(i32::from(x0), i32::from(y0), x1, y1),
            radius: diameter.max(0) >> 1,
        }
    }

    /// Spans of the given kind, translated onto `s`, plus their device box.
    fn spans(&self, s: &Surface<'_>, kind: CornerKind) -> (RoundSpans, Rect) {
        let b = self.bounds;
        let device = device_box(
            s,
            i32::from(b.x_min),
            i32::from(b.y_min),
            i32::from(b.x_max),
            i32::from(b.y_max),
        );
        let dx = i32::from(s.dx());
        let dy = i32::from(s.dy());
        let r = i32::from(self.radius);
        let spans = RoundSpans {
            x_min: i32::from(b.x_min) + dx,
            x_max: i32::from(b.x_max) + dx,
            x0: i32::from(b.x_min) + dx + r,
            y0: i32::from(b.y_min) + dy + r,
            x1: i32::from(b.x_max) + dx - r,
            y1: i32::from(b.y_max) + dy - r,
            r,
            kind,
        };
        (spans, device)
    }

    fn draw_outline(&self, s: &mut Surface<'_>, color: Rgba) {
        erase_background(s, self.bounds);
        let color = alpha_blend(s.bgcolor(), color);
        let (spans, device) = self.spans(s, CornerKind::Outline);
        if !s.clip_box().intersects(&device) {
            return;
        }
        fill_spans(s, color, device, &spans);
    }

    fn draw_filled(&self, s: &mut Surface<'_>, color: Rgba) {
        let color = alpha_blend(s.bgcolor(), color);
        let (spans, device) = self.spans(s, CornerKind::Filled);
        if !s.clip_box().intersects(&device) {
            return;
        }
        fill_spans(s, color, device, &spans);
        if s.fill_mode() == FillMode::Rectangle {
            let bg = s.bgcolor();
            let (outside, _) = self.spans(s, CornerKind::Outside);
            fill_spans(s, bg, device, &outside);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CornerKind {
    Outline,
    Filled,
    Outside,
}

/// Device-space stepping state. `(x0, y0)..(x1, y1)` are the corner centers.
struct RoundSpans {
    x_min: i32,
    x_max: i32,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    r: i32,
    kind: CornerKind,
}

impl RoundSpans {
    fn outline<F: Filler>(&self, f: &mut F) {
        let (x0, y0, x1, y1) = (self.x0, self.y0, self.x1, self.y1);
        let mut r = self.r;
        let mut err = 2 - r;
        let mut ddf_y = -2 * r;
        let mut ddf_x = 1;
        let mut xe = 0;
        while err < 0 {
            xe += 1;
            ddf_x += 2;
            err += ddf_x;
        }
        ddf_y += 2;
        err += ddf_y;
        f.fill_hline(x0 - xe, y1 + r, x1 + xe);
        f.fill_hline(x0 - xe, y0 - r, x1 + xe);
        f.fill_vline(x1 + r, y0 - xe, y1 + xe);
        f.fill_vline(x0 - r, y0 - xe, y1 + xe);

        loop {
            r -= 1;
            if xe >= r {
                break;
            }
            let xs = xe + 1;
            while err < 0 {
                xe += 1;
                ddf_x += 2;
                err += ddf_x;
            }
            ddf_y += 2;
            err += ddf_y;

            f.fill_hline(x0 - xe, y1 + r, x0 - xs);
            f.fill_hline(x0 - xe, y0 - r, x0 - xs);
            f.fill_hline(x1 + xs, y0 - r, x1 + xe);
            f.fill_hline(x1 + xs, y1 + r, x1 + xe);

            f.fill_vline(x1 + r, y1 + xs, y1 + xe);
            f.fill_vline(x1 + r, y0 - xe, y0 - xs);
            f.fill_vline(x0 - r, y0 - xe, y0 - xs);
            f.fill_vline(x0 - r, y1 + xs, y1 + xe);
        }
    }

    /// Midpoint stepping over one octant; calls `step(x, y, p)` after each
    /// advance.
    fn corners(&self, mut step: impl FnMut(i32, i32, i32)) {
        let mut x = 0;
        let mut y = self.r;
        let mut dx = 1;
        let mut dy = 2 * self.r;
        let mut p = -(self.r >> 1);
        while x < y {
            if p >= 0 {
                dy -= 2;
                p -= dy;
                y -= 1;
            }
            dx += 2;
            p += dx;
            x += 1;
            step(x, y, p);
        }
    }

    fn filled<F: Filler>(&self, f: &mut F) {
        let (x0, y0, x1, y1) = (self.x0, self.y0, self.x1, self.y1);
        if y0 <= y1 {
            f.fill_rect(self.x_min, y0, self.x_max, y1);
        }
        self.corners(|x, y, p| {
            f.fill_hline(x0 - y, y1 + x, x1 + y);
            f.fill_hline(x0 - y, y0 - x, x1 + y);
            if p >= 0 && x + 1 < y {
                f.fill_hline(x0 - x, y1 + y, x1 + x);
                f.fill_hline(x0 - x, y0 - y, x1 + x);
            }
        });
    }

    fn outside<F: Filler>(&self, f: &mut F) {
        let (x0, y0, x1, y1, r) = (self.x0, self.y0, self.x1, self.y1, self.r);
        self.corners(|x, y, p| {
            if y < r {
                f.fill_hline(x0 - r, y1 + x, x0 - y - 1);
                f.fill_hline(x1 + y + 1, y1 + x, x1 + r);
                f.fill_hline(x0 - r, y0 - x, x0 - y - 1);
                f.fill_hline(x1 + y + 1, y0 - x, x1 + r);
            }
            if p >= 0 && x + 1 < y {
                f.fill_hline(x0 - r, y1 + y, x0 - x - 1);
                f.fill_hline(x1 + x + 1, y1 + y, x1 + r);
                f.fill_hline(x0 - r, y0 - y, x0 - x - 1);
                f.fill_hline(x1 + x + 1, y0 - y, x1 + r);
            }
        });
    }
}

impl SpanSource for RoundSpans {
    fn emit<F: Filler>(&self, f: &mut F) {
        match self.kind {
            CornerKind::Outline => self.outline(f),
            CornerKind::Filled => self.filled(f),
            CornerKind::Outside => self.outside(f),
        }
    }
}

// ============================================================================
// Shapes
// ============================================================================

/// Outline of a rectangle with rounded corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundRect {
    shape: RoundedBox,
    color: Rgba,
}

impl RoundRect {
    /// Create a rounded rectangle outline. The radius is clamped to
    /// `0..=min(width, height) / 2`.
    #[must_use]
    pub fn new(x0: i16, y0: i16, x1: i16, y1: i16, radius: i16, color: Rgba) -> Self {
        Self {
            shape: RoundedBox::new(x0, y0, x1, y1, radius),
            color,
        }
    }

    /// Effective corner radius.
    #[must_use]
    pub const fn radius(&self) -> i16 {
        self.shape.radius
    }
}

impl Drawable for RoundRect {
    fn extents(&self) -> Rect {
        self.shape.bounds
    }

    fn draw_to(&self, s: &mut Surface<'_>) {
        self.shape.draw_outline(s, self.color);
    }
}

/// Solid rectangle with rounded corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilledRoundRect {
    shape: RoundedBox,
    color: Rgba,
}

impl FilledRoundRect {
    /// Create a filled rounded rectangle. The radius is clamped to
    /// `0..=min(width, height) / 2`.
    #[must_use]
    pub fn new(x0: i16, y0: i16, x1: i16, y1: i16, radius: i16, color: Rgba) -> Self {
        Self {
            shape: RoundedBox::new(x0, y0, x1, y1, radius),
            color,
        }
    }

    /// Effective corner radius.
    #[must_use]
    pub const fn radius(&self) -> i16 {
        self.shape.radius
    }
}

impl Drawable for FilledRoundRect {
    fn extents(&self) -> Rect {
        self.shape.bounds
    }

    fn draw_to(&self, s: &mut Surface<'_>) {
        self.shape.draw_filled(s, self.color);
    }
}

/// Circle outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Circle {
    shape: RoundedBox,
    color: Rgba,
}

impl Circle {
    /// Circle centered on `center`, with diameter `2 * radius + 1`.
    #[must_use]
    pub fn by_radius(center: Point, radius: i16, color: Rgba) -> Self {
        Self::by_extents(
            Point::new(center.x.saturating_sub(radius), center.y.saturating_sub(radius)),
            radius.saturating_mul(2).saturating_add(1),
            color,
        )
    }

    /// Circle inscribed in the square at `top_left` with side `diameter`.
    #[must_use]
    pub fn by_extents(top_left: Point, diameter: i16, color: Rgba) -> Self {
        Self {
            shape: RoundedBox::circle(top_left.x, top_left.y, diameter),
            color,
        }
    }
}

impl Drawable for Circle {
    fn extents(&self) -> Rect {
        self.shape.bounds
    }

    fn draw_to(&self, s: &mut Surface<'_>) {
        self.shape.draw_outline(s, self.color);
    }
}

/// Solid disc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilledCircle {
    shape: RoundedBox,
    color: Rgba,
}

impl FilledCircle {
    /// Disc centered on `center`, with diameter `2 * radius + 1`.
    #[must_use]
    pub fn by_radius(center: Point, radius: i16, color: Rgba) -> Self {
        Self::by_extents(
            Point::new(center.x.saturating_sub(radius), center.y.saturating_sub(radius)),
            radius.saturating_mul(2).saturating_add(1),
            color,
        )
    }

    /// Disc inscribed in the square at `top_left` with side `diameter`.
    #[must_use]
    pub fn by_extents(top_left: Point, diameter: i16, color: Rgba) -> Self {
        Self {
            shape: RoundedBox::circle(top_left.x, top_left.y, diameter),
            color,
        }
    }
}

impl Drawable for FilledCircle {
    fn extents(&self) -> Rect {
        self.shape.bounds
    }

    fn draw_to(&self, s: &mut Surface<'_>) {
        self.shape.draw_filled(s, self.color);
    }
}
