//! Drawing surface and the drawable capability.

use super::sink::{PixelSink, PixelStream};
use crate::color::{BlendingMode, Rgba};
use crate::config::{RasterConfig, MAX_BATCH};
use crate::geometry::Rect;

/// Which pixels a drawable is responsible for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillMode {
    /// Only pixels the shape actually covers are written.
    #[default]
    Visible,
    /// The shape owns its whole (clipped) bounding rectangle and erases
    /// uncovered pixels with the background color.
    Rectangle,
}

/// Something that can draw itself onto a [`Surface`].
pub trait Drawable {
    /// Bounding box in object coordinates (before the surface offset).
    fn extents(&self) -> Rect;

    /// Draw onto `s`.
    ///
    /// Called through [`Surface::draw_object`], which has already narrowed
    /// the clip box to the translated extents.
    fn draw_to(&self, s: &mut Surface<'_>);
}

/// A drawable that can also emit its pixels as a row-major stream over its
/// extents.
pub trait Streamable: Drawable {
    /// Stream type.
    type Stream<'s>: PixelStream
    where
        Self: 's;

    /// Create a stream positioned at the top-left pixel of the extents.
    fn create_stream(&self) -> Self::Stream<'_>;
}

/// Drawing context: target sink plus offset, clip and background state.
pub struct Surface<'a> {
    out: &'a mut dyn PixelSink,
    dx: i16,
    dy: i16,
    clip_box: Rect,
    bgcolor: Rgba,
    fill_mode: FillMode,
    blending_mode: BlendingMode,
    config: RasterConfig,
}

impl<'a> Surface<'a> {
    /// Create a surface writing to `out`, clipped to `clip_box`, with no
    /// offset and a transparent background.
    pub fn new(out: &'a mut dyn PixelSink, clip_box: Rect) -> Self {
        Self {
            out,
            dx: 0,
            dy: 0,
            clip_box,
            bgcolor: Rgba::TRANSPARENT,
            fill_mode: FillMode::Visible,
            blending_mode: BlendingMode::SourceOver,
            config: RasterConfig::default(),
        }
    }

    /// Set the offset applied to drawn objects.
    #[must_use]
    pub fn with_offset(mut self, dx: i16, dy: i16) -> Self {
        self.dx = dx;
        self.dy = dy;
        self
    }

    /// Set the background color.
    ///
    /// An opaque background turns source-over blending into plain source
    /// writes, since every shape color is pre-blended against it.
    #[must_use]
    pub fn with_bgcolor(mut self, bgcolor: Rgba) -> Self {
        self.bgcolor = bgcolor;
        self.promote_blending_mode();
        self
    }

    /// Set the fill mode.
    #[must_use]
    pub fn with_fill_mode(mut self, fill_mode: FillMode) -> Self {
        self.fill_mode = fill_mode;
        self
    }

    /// Set the blending mode.
    #[must_use]
    pub fn with_blending_mode(mut self, blending_mode: BlendingMode) -> Self {
        self.blending_mode = blending_mode;
        self.promote_blending_mode();
        self
    }

    /// Set the raster configuration.
    #[must_use]
    pub fn with_config(mut self, config: RasterConfig) -> Self {
        self.config = config.sanitized();
        self
    }

    fn promote_blending_mode(&mut self) {
        if self.bgcolor.is_opaque()
            && matches!(
                self.blending_mode,
                BlendingMode::SourceOver | BlendingMode::SourceOverOpaque
            )
        {
            self.blending_mode = BlendingMode::Source;
        }
    }

    /// The target sink.
    pub fn out(&mut self) -> &mut dyn PixelSink {
        &mut *self.out
    }

    /// X offset applied to drawn objects.
    #[must_use]
    pub fn dx(&self) -> i16 {
        self.dx
    }

    /// Y offset applied to drawn objects.
    #[must_use]
    pub fn dy(&self) -> i16 {
        self.dy
    }

    /// Clip box in device coordinates (independent of the offset).
    #[must_use]
    pub fn clip_box(&self) -> Rect {
        self.clip_box
    }

    /// Background color shapes are pre-blended against.
    #[must_use]
    pub fn bgcolor(&self) -> Rgba {
        self.bgcolor
    }

    /// Fill mode drawables must observe.
    #[must_use]
    pub fn fill_mode(&self) -> FillMode {
        self.fill_mode
    }

    /// Default blending mode for writes.
    #[must_use]
    pub fn blending_mode(&self) -> BlendingMode {
        self.blending_mode
    }

    /// Batching and tiling parameters.
    #[must_use]
    pub fn config(&self) -> &RasterConfig {
        &self.config
    }

    /// Draw `object`, restricting the clip box to its translated extents.
    ///
    /// Re-entrant: a drawable may call this on the surface it was handed to
    /// draw its parts.
    pub fn draw_object(&mut self, object: &dyn Drawable) {
        let extents = object.extents().translate(self.dx, self.dy);
        let clip_box = self.clip_box.intersection(&extents);
        if clip_box.is_empty() {
            log::trace!("draw skipped: extents {extents:?} outside clip {:?}", self.clip_box);
            return;
        }
        let mut sub = Surface {
            out: &mut *self.out,
            dx: self.dx,
            dy: self.dy,
            clip_box,
            bgcolor: self.bgcolor,
            fill_mode: self.fill_mode,
            blending_mode: self.blending_mode,
            config: self.config,
        };
        object.draw_to(&mut sub);
    }
}

/// In [`FillMode::Rectangle`], overwrite the part of `extents` (object
/// coordinates) inside the clip box with the background color.
pub fn erase_background(s: &mut Surface<'_>, extents: Rect) {
    if s.fill_mode() != FillMode::Rectangle {
        return;
    }
    let area = s.clip_box().intersection(&extents.translate(s.dx(), s.dy()));
    let bg = s.bgcolor();
    s.out().fill_rect(BlendingMode::Source, area, bg);
}

/// Draw a [`Streamable`] by copying its stream into the clipped extents.
pub fn draw_stream<S: Streamable + ?Sized>(s: &mut Surface<'_>, object: &S) {
    let extents = object.extents().translate(s.dx(), s.dy());
    let clip = s.clip_box().intersection(&extents);
    if clip.is_empty() {
        return;
    }
    let full_width = extents.width() as usize;
    let clip_width = clip.width() as usize;
    let mode = s.blending_mode();
    let mut stream = object.create_stream();
    stream.skip(
        (clip.y_min - extents.y_min) as usize * full_width + (clip.x_min - extents.x_min) as usize,
    );
    let mut buf = [Rgba::TRANSPARENT; MAX_BATCH];
    for y in clip.y_min..=clip.y_max {
        let mut x = clip.x_min;
        let mut remaining = clip_width;
        while remaining > 0 {
            let n = remaining.min(MAX_BATCH);
            stream.read(&mut buf[..n]);
            let row = Rect::new(x, y, x + n as i16 - 1, y);
            s.out().write_rect(mode, row, &buf[..n]);
            x += n as i16;
            remaining -= n;
        }
        if y < clip.y_max {
            stream.skip(full_width - clip_width);
        }
    }
}
