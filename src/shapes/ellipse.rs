//! Axis-aligned ellipse outline.

use super::{device_box, fill_spans, SpanSource};
use crate::color::{alpha_blend, Rgba};
use crate::geometry::{Point, Rect};
use crate::render::{erase_background, Drawable, Filler, Surface};

/// Ellipse outline around a center, with horizontal and vertical radii.
///
/// Midpoint stepping: the flat top and bottom are emitted as horizontal
/// runs, the steep sides pixel by pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ellipse {
    center: Point,
    rx: i16,
    ry: i16,
    color: Rgba,
}

impl Ellipse {
    /// Create an ellipse. Negative radii count as 0.
    #[must_use]
    pub fn new(center: Point, rx: i16, ry: i16, color: Rgba) -> Self {
        Self {
            center,
            rx: rx.max(0),
            ry: ry.max(0),
            color,
        }
    }
}

struct EllipsePixels {
    x0: i32,
    y0: i32,
    rx: i32,
    ry: i32,
}

impl EllipsePixels {
    fn plot4<F: Filler>(&self, f: &mut F, x: i32, y: i32) {
        f.fill_pixel(self.x0 + x, self.y0 + y);
        f.fill_pixel(self.x0 - x, self.y0 + y);
        f.fill_pixel(self.x0 - x, self.y0 - y);
        f.fill_pixel(self.x0 + x, self.y0 - y);
    }

    /// Row `y` from `xs` to `xe`, mirrored into all four quadrants.
    fn mirror_run<F: Filler>(&self, f: &mut F, xs: i32, xe: i32, y: i32) {
        let rows: &[i32] = if y == 0 { &[0] } else { &[y, -y] };
        for &row in rows {
            if xs == 0 {
                f.fill_hline(self.x0 - xe, self.y0 + row, self.x0 + xe);
            } else {
                f.fill_hline(self.x0 - xe, self.y0 + row, self.x0 - xs);
                f.fill_hline(self.x0 + xs, self.y0 + row, self.x0 + xe);
            }
        }
    }
}

impl SpanSource for EllipsePixels {
    fn emit<F: Filler>(&self, f: &mut F) {
        let (rx, ry) = (self.rx, self.ry);
        let rx2 = rx * rx;
        let ry2 = ry * ry;
        let fx2 = 4 * rx2;
        let fy2 = 4 * ry2;

        // Flat region: whole runs per row.
        let mut x = 0;
        let mut y = ry;
        let mut xs = 0;
        let mut s = 2 * ry2 + rx2 * (1 - 2 * ry);
        while ry2 * x <= rx2 * y {
            if s >= 0 {
                self.mirror_run(f, xs, x, y);
                s += fx2 * (1 - y);
                y -= 1;
                xs = x + 1;
            }
            s += ry2 * (4 * x + 6);
            x += 1;
        }
        if xs < x {
            self.mirror_run(f, xs, x - 1, y);
        }

        // Steep region: one pixel per row.
        let mut x = rx;
        let mut y = 0;
        let mut s = 2 * rx2 + ry2 * (1 - 2 * rx);
        while rx2 * y <= ry2 * x {
            self.plot4(f, x, y);
            if s >= 0 {
                s += fy2 * (1 - x);
                x -= 1;
            }
            s += rx2 * (4 * y + 6);
            y += 1;
        }
    }
}

impl Drawable for Ellipse {
    fn extents(&self) -> Rect {
        let (cx, cy) = (i32::from(self.center.x), i32::from(self.center.y));
        let (rx, ry) = (i32::from(self.rx), i32::from(self.ry));
        Rect::from_i32(cx - rx, cy - ry, cx + rx, cy + ry)
    }

    fn draw_to(&self, s: &mut Surface<'_>) {
        let ext = self.extents();
        erase_background(s, ext);
        let color = alpha_blend(s.bgcolor(), self.color);
        let bounds = device_box(
            s,
            i32::from(ext.x_min),
            i32::from(ext.y_min),
            i32::from(ext.x_max),
            i32::from(ext.y_max),
        );
        let pixels = EllipsePixels {
            x0: i32::from(self.center.x) + i32::from(s.dx()),
            y0: i32::from(self.center.y) + i32::from(s.dy()),
            rx: i32::from(self.rx),
            ry: i32::from(self.ry),
        };
        fill_spans(s, color, bounds, &pixels);
    }
}
