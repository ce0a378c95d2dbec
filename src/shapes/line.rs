//! One-pixel lines.

use super::{device_box, fill_spans, SpanSource};
use crate::color::{alpha_blend, Rgba};
use crate::geometry::{Point, Rect};
use crate::render::{Drawable, Filler, Surface};

/// Direction of a line across its bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagonal {
    /// From the top-left corner to the bottom-right corner.
    TopLeftToBottomRight,
    /// From the top-right corner to the bottom-left corner.
    TopRightToBottomLeft,
}

impl Diagonal {
    const fn flipped(self) -> Self {
        match self {
            Self::TopLeftToBottomRight => Self::TopRightToBottomLeft,
            Self::TopRightToBottomLeft => Self::TopLeftToBottomRight,
        }
    }
}

/// A line segment drawn with Bresenham stepping.
///
/// Endpoints are stored sorted (`x0 <= x1`, `y0 <= y1`); the original
/// direction is kept in [`Line::diagonal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    x0: i16,
    y0: i16,
    x1: i16,
    y1: i16,
    diagonal: Diagonal,
    color: Rgba,
}

impl Line {
    /// Create a line between `(x0, y0)` and `(x1, y1)` inclusive.
    #[must_use]
    pub fn new(x0: i16, y0: i16, x1: i16, y1: i16, color: Rgba) -> Self {
        let mut line = Self {
            x0,
            y0,
            x1,
            y1,
            diagonal: Diagonal::TopLeftToBottomRight,
            color,
        };
        if x1 < x0 {
            std::mem::swap(&mut line.x0, &mut line.x1);
            line.diagonal = line.diagonal.flipped();
        }
        if y1 < y0 {
            std::mem::swap(&mut line.y0, &mut line.y1);
            line.diagonal = line.diagonal.flipped();
        }
        line
    }

    /// Create a line between two points.
    #[must_use]
    pub fn between(a: Point, b: Point, color: Rgba) -> Self {
        Self::new(a.x, a.y, b.x, b.y, color)
    }

    /// Line color.
    #[must_use]
    pub const fn color(&self) -> Rgba {
        self.color
    }

    /// Direction across the bounding box.
    #[must_use]
    pub const fn diagonal(&self) -> Diagonal {
        self.diagonal
    }

    /// Returns true if the line is taller than it is wide.
    #[must_use]
    pub const fn is_steep(&self) -> bool {
        (self.y1 as i32 - self.y0 as i32) > (self.x1 as i32 - self.x0 as i32)
    }
}

struct LineSpans {
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    flip: bool,
}

impl SpanSource for LineSpans {
    fn emit<F: Filler>(&self, f: &mut F) {
        let (x0, y0, x1, y1) = (self.x0, self.y0, self.x1, self.y1);
        let dx = x1 - x0;
        let dy = y1 - y0;
        if dy > dx {
            let mut err = dy >> 1;
            let (mut x, step) = if self.flip { (x1, -1) } else { (x0, 1) };
            let mut ys = y0;
            let mut run = 0;
            for y in y0..=y1 {
                run += 1;
                err -= dx;
                if err < 0 {
                    err += dy;
                    f.fill_vline(x, ys, y);
                    run = 0;
                    x += step;
                    ys = y + 1;
                }
            }
            if run > 0 {
                f.fill_vline(x, ys, y1);
            }
        } else {
            let mut err = dx >> 1;
            let (mut y, step) = if self.flip { (y1, -1) } else { (y0, 1) };
            let mut xs = x0;
            let mut run = 0;
            for x in x0..=x1 {
                run += 1;
                err -= dy;
                if err < 0 {
                    err += dx;
                    f.fill_hline(xs, y, x);
                    run = 0;
                    y += step;
                    xs = x + 1;
                }
            }
            if run > 0 {
                f.fill_hline(xs, y, x1);
            }
        }
    }
}

impl Drawable for Line {
    fn extents(&self) -> Rect {
        Rect::new(self.x0, self.y0, self.x1, self.y1)
    }

    fn draw_to(&self, s: &mut Surface<'_>) {
        let color = alpha_blend(s.bgcolor(), self.color);
        let bounds = device_box(
            s,
            i32::from(self.x0),
            i32::from(self.y0),
            i32::from(self.x1),
            i32::from(self.y1),
        );
        if self.x0 == self.x1 || self.y0 == self.y1 {
            let span = s.clip_box().intersection(&bounds);
            let mode = s.blending_mode();
            s.out().fill_rect(mode, span, color);
            return;
        }
        let spans = LineSpans {
            x0: i32::from(bounds.x_min),
            y0: i32::from(bounds.y_min),
            x1: i32::from(bounds.x_max),
            y1: i32::from(bounds.y_max),
            flip: self.diagonal == Diagonal::TopRightToBottomLeft,
        };
        fill_spans(s, color, bounds, &spans);
    }
}
