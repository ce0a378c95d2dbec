//! Buffered span fillers and pixel writers.
//!
//! Shapes rasterize into a [`Filler`], which batches spans and rectangles
//! into as few [`PixelSink`] calls as possible. Two strategies exist:
//!
//! - [`SpanFiller`]: no bounds checks, for shapes known to lie inside the
//!   clip box.
//! - [`ClippingFiller`]: clamps each request against a clip box and drops
//!   requests that fall entirely outside it.
//!
//! Coordinates are device coordinates in `i32`, so intermediate shape
//! arithmetic can overshoot the 16-bit domain before clipping.

use super::sink::PixelSink;
use crate::color::{BlendingMode, Rgba};
use crate::config::MAX_BATCH;
use crate::geometry::Rect;

/// Receiver of single-color spans, rectangles and pixels.
pub trait Filler {
    /// Fill the inclusive rectangle `(x0, y0)..=(x1, y1)`. No-op if inverted.
    fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32);

    /// Fill one pixel. Adjacent pixels in a row are coalesced into spans.
    fn fill_pixel(&mut self, x: i32, y: i32);

    /// Send everything buffered to the sink.
    fn flush(&mut self);

    /// Fill the horizontal span `x0..=x1` on row `y`.
    fn fill_hline(&mut self, x0: i32, y: i32, x1: i32) {
        self.fill_rect(x0, y, x1, y);
    }

    /// Fill the vertical span `y0..=y1` on column `x`.
    fn fill_vline(&mut self, x: i32, y0: i32, y1: i32) {
        self.fill_rect(x, y0, x, y1);
    }
}

// ============================================================================
// Unclipped Filler
// ============================================================================

/// Batching filler without bounds checks.
///
/// Every request must lie within the clip box of the drawing surface.
/// Buffered rectangles are flushed when the batch fills up, on
/// [`Filler::flush`], and on drop.
pub struct SpanFiller<'s> {
    out: &'s mut dyn PixelSink,
    mode: BlendingMode,
    color: Rgba,
    batch: usize,
    len: usize,
    x0: [i16; MAX_BATCH],
    y0: [i16; MAX_BATCH],
    x1: [i16; MAX_BATCH],
    y1: [i16; MAX_BATCH],
    // Pending run of single pixels: (y, x_start, x_end).
    run: Option<(i32, i32, i32)>,
}

impl<'s> SpanFiller<'s> {
    /// Create a filler writing `color` with `mode`, flushing every `batch`
    /// rectangles (clamped to `1..=64`).
    pub fn new(out: &'s mut dyn PixelSink, color: Rgba, mode: BlendingMode, batch: usize) -> Self {
        Self {
            out,
            mode,
            color,
            batch: batch.clamp(1, MAX_BATCH),
            len: 0,
            x0: [0; MAX_BATCH],
            y0: [0; MAX_BATCH],
            x1: [0; MAX_BATCH],
            y1: [0; MAX_BATCH],
            run: None,
        }
    }

    fn push(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        if self.len == self.batch {
            self.flush_rects();
        }
        let i = self.len;
        self.x0[i] = x0 as i16;
        self.y0[i] = y0 as i16;
        self.x1[i] = x1 as i16;
        self.y1[i] = y1 as i16;
        self.len += 1;
    }

    fn commit_run(&mut self) {
        if let Some((y, xs, xe)) = self.run.take() {
            self.push(xs, y, xe, y);
        }
    }

    fn flush_rects(&mut self) {
        if self.len == 0 {
            return;
        }
        let n = self.len;
        self.out.fill_rects(
            self.mode,
            self.color,
            &self.x0[..n],
            &self.y0[..n],
            &self.x1[..n],
            &self.y1[..n],
        );
        self.len = 0;
    }
}

impl Filler for SpanFiller<'_> {
    fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        if x0 > x1 || y0 > y1 {
            return;
        }
        self.commit_run();
        self.push(x0, y0, x1, y1);
    }

    fn fill_pixel(&mut self, x: i32, y: i32) {
        if let Some((ry, _, xe)) = &mut self.run {
            if *ry == y && *xe + 1 == x {
                *xe = x;
                return;
            }
        }
        self.commit_run();
        self.run = Some((y, x, x));
    }

    fn flush(&mut self) {
        self.commit_run();
        self.flush_rects();
    }
}

impl Drop for SpanFiller<'_> {
    fn drop(&mut self) {
        self.flush();
    }
}

// ============================================================================
// Clipping Filler
// ============================================================================

/// Batching filler that clips every request to a box.
pub struct ClippingFiller<'s> {
    inner: SpanFiller<'s>,
    clip: Rect,
}

impl<'s> ClippingFiller<'s> {
    /// Create a filler clipped to `clip`.
    pub fn new(
        out: &'s mut dyn PixelSink,
        color: Rgba,
        mode: BlendingMode,
        batch: usize,
        clip: Rect,
    ) -> Self {
        Self {
            inner: SpanFiller::new(out, color, mode, batch),
            clip,
        }
    }

    /// The clip box.
    #[must_use]
    pub fn clip_box(&self) -> Rect {
        self.clip
    }
}

impl Filler for ClippingFiller<'_> {
    fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        let c = self.clip;
        let x0 = x0.max(i32::from(c.x_min));
        let y0 = y0.max(i32::from(c.y_min));
        let x1 = x1.min(i32::from(c.x_max));
        let y1 = y1.min(i32::from(c.y_max));
        self.inner.fill_rect(x0, y0, x1, y1);
    }

    fn fill_pixel(&mut self, x: i32, y: i32) {
        let c = self.clip;
        if x >= i32::from(c.x_min)
            && x <= i32::from(c.x_max)
            && y >= i32::from(c.y_min)
            && y <= i32::from(c.y_max)
        {
            self.inner.fill_pixel(x, y);
        }
    }

    fn flush(&mut self) {
        self.inner.flush();
    }
}

// ============================================================================
// Pixel Writer
// ============================================================================

/// Buffered writer of individually colored pixels.
pub struct PixelWriter<'s> {
    out: &'s mut dyn PixelSink,
    mode: BlendingMode,
    batch: usize,
    len: usize,
    colors: [Rgba; MAX_BATCH],
    xs: [i16; MAX_BATCH],
    ys: [i16; MAX_BATCH],
}

impl<'s> PixelWriter<'s> {
    /// Create a writer flushing every `batch` pixels (clamped to `1..=64`).
    pub fn new(out: &'s mut dyn PixelSink, mode: BlendingMode, batch: usize) -> Self {
        Self {
            out,
            mode,
            batch: batch.clamp(1, MAX_BATCH),
            len: 0,
            colors: [Rgba::TRANSPARENT; MAX_BATCH],
            xs: [0; MAX_BATCH],
            ys: [0; MAX_BATCH],
        }
    }

    /// Queue one pixel.
    pub fn write_pixel(&mut self, x: i16, y: i16, color: Rgba) {
        if self.len == self.batch {
            self.flush();
        }
        let i = self.len;
        self.colors[i] = color;
        self.xs[i] = x;
        self.ys[i] = y;
        self.len += 1;
    }

    /// Send buffered pixels to the sink.
    pub fn flush(&mut self) {
        if self.len == 0 {
            return;
        }
        let n = self.len;
        self.out
            .write_pixels(self.mode, &self.colors[..n], &self.xs[..n], &self.ys[..n]);
        self.len = 0;
    }
}

impl Drop for PixelWriter<'_> {
    fn drop(&mut self) {
        self.flush();
    }
}
