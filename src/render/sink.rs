//! Pixel sink and pixel stream capabilities.

use crate::color::{BlendingMode, Rgba};
use crate::config::MAX_BATCH;
use crate::geometry::Rect;

/// Destination of all pixel writes.
///
/// Coordinates are device coordinates. Callers guarantee every write lies
/// within the clip box of the surface that issued it, so implementations
/// need not re-check bounds beyond their own physical limits.
pub trait PixelSink {
    /// Fill a batch of rectangles with one color.
    ///
    /// The four slices are parallel and have equal length. Bounds are
    /// inclusive.
    fn fill_rects(
        &mut self,
        mode: BlendingMode,
        color: Rgba,
        x0: &[i16],
        y0: &[i16],
        x1: &[i16],
        y1: &[i16],
    );

    /// Write a block of colors, row-major, covering `rect`.
    fn write_rect(&mut self, mode: BlendingMode, rect: Rect, colors: &[Rgba]);

    /// Write individual pixels, each with its own color.
    fn write_pixels(&mut self, mode: BlendingMode, colors: &[Rgba], xs: &[i16], ys: &[i16]);

    /// Fill a single rectangle.
    fn fill_rect(&mut self, mode: BlendingMode, rect: Rect, color: Rgba) {
        if rect.is_empty() {
            return;
        }
        self.fill_rects(
            mode,
            color,
            &[rect.x_min],
            &[rect.y_min],
            &[rect.x_max],
            &[rect.y_max],
        );
    }

    /// Fill individual pixels with one color.
    fn fill_pixels(&mut self, mode: BlendingMode, color: Rgba, xs: &[i16], ys: &[i16]) {
        self.fill_rects(mode, color, xs, ys, xs, ys);
    }
}

/// Sequential source of colors, consumed in row-major order.
pub trait PixelStream {
    /// Fill `buf` with the next `buf.len()` colors.
    fn read(&mut self, buf: &mut [Rgba]);

    /// Advance past `count` colors without producing them.
    fn skip(&mut self, count: usize);
}

/// A stream yielding one color forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantStream {
    color: Rgba,
}

impl ConstantStream {
    /// Create a stream of `color`.
    #[must_use]
    pub const fn new(color: Rgba) -> Self {
        Self { color }
    }
}

impl PixelStream for ConstantStream {
    fn read(&mut self, buf: &mut [Rgba]) {
        buf.fill(self.color);
    }

    // Position-independent.
    fn skip(&mut self, _count: usize) {}
}

/// Copy `rect.area()` colors from `stream` into `rect` of the sink, row by
/// row, in blocks of at most 64 pixels.
pub fn blit_stream(
    out: &mut dyn PixelSink,
    mode: BlendingMode,
    rect: Rect,
    stream: &mut dyn PixelStream,
) {
    if rect.is_empty() {
        return;
    }
    let mut buf = [Rgba::TRANSPARENT; MAX_BATCH];
    for y in rect.y_min..=rect.y_max {
        let mut x = i32::from(rect.x_min);
        while x <= i32::from(rect.x_max) {
            let n = (i32::from(rect.x_max) - x + 1).min(MAX_BATCH as i32);
            stream.read(&mut buf[..n as usize]);
            let row = Rect::from_i32(x, i32::from(y), x + n - 1, i32::from(y));
            out.write_rect(mode, row, &buf[..n as usize]);
            x += n;
        }
    }
}
