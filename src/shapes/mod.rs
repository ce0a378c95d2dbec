//! Basic (aliased) shapes.
//!
//! Every shape is an immutable value normalized at construction and drawn
//! with incremental integer algorithms: Bresenham stepping for lines,
//! midpoint stepping for circles and rounded corners, and two-phase scanline
//! interpolation for triangles. Shape colors are pre-blended against the
//! surface background before any pixel is written.
//!
//! # References
//!
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."
//! - Van Aken, J. R. (1984). "An Efficient Ellipse-Drawing Algorithm." IEEE CG&A.

mod ellipse;
mod line;
mod rect;
mod round_rect;
mod triangle;

pub use ellipse::Ellipse;
pub use line::{Diagonal, Line};
pub use rect::{Border, FilledRect, OutlineRect};
pub use round_rect::{Circle, FilledCircle, FilledRoundRect, RoundRect};
pub use triangle::{FilledTriangle, Triangle};

use crate::color::Rgba;
use crate::geometry::Rect;
use crate::render::{ClippingFiller, Filler, SpanFiller, Surface};

/// Emits the spans of one shape, already translated to device coordinates.
pub(crate) trait SpanSource {
    /// Send all spans to `f`.
    fn emit<F: Filler>(&self, f: &mut F);
}

/// Rasterize `src` onto `s` in a single color.
///
/// `bounds` is the device-space box the spans stay within. When the clip box
/// contains it, the unclipped filler is used.
pub(crate) fn fill_spans<S: SpanSource>(s: &mut Surface<'_>, color: Rgba, bounds: Rect, src: &S) {
    let clip = s.clip_box();
    let mode = s.blending_mode();
    let batch = s.config().fill_batch;
    if clip.contains_rect(&bounds) {
        log::trace!("unclipped fill of {bounds:?}");
        let mut f = SpanFiller::new(s.out(), color, mode, batch);
        src.emit(&mut f);
    } else {
        let mut f = ClippingFiller::new(s.out(), color, mode, batch, clip);
        src.emit(&mut f);
    }
}

/// Device-space box of `(x0, y0)..=(x1, y1)` shifted by the surface offset.
pub(crate) fn device_box(s: &Surface<'_>, x0: i32, y0: i32, x1: i32, y1: i32) -> Rect {
    let dx = i32::from(s.dx());
    let dy = i32::from(s.dy());
    Rect::from_i32(x0 + dx, y0 + dy, x1 + dx, y1 + dy)
}
