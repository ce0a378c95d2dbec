//! Rendering plumbing: pixel sinks, drawing surfaces and fillers.
//!
//! Shapes never touch pixels directly. A shape is drawn onto a [`Surface`],
//! which carries the translation offset, clip box and background color, and
//! rasterizes into a [`Filler`] that batches spans into [`PixelSink`] calls.
//! Span coalescing keeps the number of sink calls proportional to the number
//! of spans rather than pixels, which matters on slow display buses.

mod filler;
mod sink;
mod surface;

#[cfg(test)]
pub(crate) mod testing;

pub use filler::{ClippingFiller, Filler, PixelWriter, SpanFiller};
pub use sink::{blit_stream, ConstantStream, PixelSink, PixelStream};
pub use surface::{draw_stream, erase_background, Drawable, FillMode, Streamable, Surface};
