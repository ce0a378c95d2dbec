//! Pixel sources queried by coordinate.
//!
//! A [`Rasterizable`] answers "what color is pixel (x, y)?" for any point in
//! its extents. Anti-aliased shapes, in-memory rasters, framebuffers and
//! transformed sources all implement it, and all draw through the same tiled
//! blit, [`draw_rasterizable`]:
//!
//! 1. The clip box is split into tiles of at most 64 pixels, aligned to a
//!    fixed grid.
//! 2. Each tile asks [`Rasterizable::read_color_rect`] for its colors; a
//!    uniform tile becomes a single rectangle fill.
//! 3. Non-uniform tiles are written as a color block (when the draw owns
//!    the whole rectangle) or as individual non-transparent pixels.

use crate::color::{alpha_blend, BlendingMode, Rgba};
use crate::config::MAX_BATCH;
use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::render::{
    Drawable, FillMode, PixelSink, PixelStream, PixelWriter, Streamable, Surface,
};

/// What kind of alpha values a source produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transparency {
    /// Every pixel is opaque.
    None,
    /// Pixels are either opaque or fully transparent.
    Binary,
    /// Any alpha value may occur.
    #[default]
    Gradual,
}

/// A source of pixel colors addressable by coordinate.
pub trait Rasterizable: Drawable {
    /// Colors of the points `(xs[i], ys[i])`, written to `out[i]`.
    ///
    /// Every point must lie within [`Drawable::extents`]; use
    /// [`Rasterizable::read_colors_or`] when that is not known.
    fn read_colors(&self, xs: &[i16], ys: &[i16], out: &mut [Rgba]);

    /// Colors of `rect` in row-major order.
    ///
    /// `out` must hold `rect.area()` colors. Returns true if the rectangle is
    /// uniform, in which case only `out[0]` is guaranteed to be written.
    fn read_color_rect(&self, rect: Rect, out: &mut [Rgba]) -> bool {
        let width = rect.width() as usize;
        let n = rect.area() as usize;
        if n == 0 {
            return false;
        }
        let mut xs = [0i16; MAX_BATCH];
        let mut ys = [0i16; MAX_BATCH];
        let mut start = 0;
        while start < n {
            let len = (n - start).min(MAX_BATCH);
            for i in 0..len {
                let offset = start + i;
                xs[i] = rect.x_min + (offset % width) as i16;
                ys[i] = rect.y_min + (offset / width) as i16;
            }
            self.read_colors(&xs[..len], &ys[..len], &mut out[start..start + len]);
            start += len;
        }
        let first = out[0];
        out[1..n].iter().all(|&c| c == first)
    }

    /// Hint about the alpha values this source produces.
    fn transparency(&self) -> Transparency {
        Transparency::Gradual
    }

    /// Like [`Rasterizable::read_colors`], but points outside the extents
    /// get `fallback`.
    fn read_colors_or(&self, xs: &[i16], ys: &[i16], out: &mut [Rgba], fallback: Rgba) {
        let bounds = self.extents();
        let mut bx = [0i16; MAX_BATCH];
        let mut by = [0i16; MAX_BATCH];
        let mut colors = [Rgba::TRANSPARENT; MAX_BATCH];
        let mut index = [0usize; MAX_BATCH];
        let mut base = 0;
        for (cx, cy) in xs.chunks(MAX_BATCH).zip(ys.chunks(MAX_BATCH)) {
            if cx.iter().zip(cy).all(|(&x, &y)| bounds.contains(x, y)) {
                self.read_colors(cx, cy, &mut out[base..base + cx.len()]);
                base += cx.len();
                continue;
            }
            let mut n = 0;
            for (i, (&x, &y)) in cx.iter().zip(cy).enumerate() {
                if bounds.contains(x, y) {
                    bx[n] = x;
                    by[n] = y;
                    index[n] = base + i;
                    n += 1;
                } else {
                    out[base + i] = fallback;
                }
            }
            if n > 0 {
                self.read_colors(&bx[..n], &by[..n], &mut colors[..n]);
                for (&i, &c) in index[..n].iter().zip(&colors[..n]) {
                    out[i] = c;
                }
            }
            base += cx.len();
        }
    }
}

// ============================================================================
// Tiled Blit
// ============================================================================

struct Blit {
    dx: i16,
    dy: i16,
    bgcolor: Rgba,
    mode: BlendingMode,
    replace: bool,
    pixel_batch: usize,
}

impl Blit {
    fn tile<R: Rasterizable + ?Sized>(&self, source: &R, out: &mut dyn PixelSink, tile: Rect) {
        let n = tile.area() as usize;
        let mut buf = [Rgba::TRANSPARENT; MAX_BATCH];
        let (dx, dy) = (i32::from(self.dx), i32::from(self.dy));
        let src = Rect::from_i32(
            i32::from(tile.x_min) - dx,
            i32::from(tile.y_min) - dy,
            i32::from(tile.x_max) - dx,
            i32::from(tile.y_max) - dy,
        );
        let uniform = source.read_color_rect(src, &mut buf[..n]);
        if uniform {
            let color = buf[0];
            if self.replace || !color.is_transparent() {
                out.fill_rect(self.mode, tile, alpha_blend(self.bgcolor, color));
            }
            return;
        }
        if self.replace {
            for c in &mut buf[..n] {
                *c = alpha_blend(self.bgcolor, *c);
            }
            out.write_rect(self.mode, tile, &buf[..n]);
            return;
        }
        let width = tile.width() as usize;
        let mut writer = PixelWriter::new(out, self.mode, self.pixel_batch);
        for (i, &c) in buf[..n].iter().enumerate() {
            if c.is_transparent() {
                continue;
            }
            let x = tile.x_min + (i % width) as i16;
            let y = tile.y_min + (i / width) as i16;
            writer.write_pixel(x, y, alpha_blend(self.bgcolor, c));
        }
    }
}

/// Draw a [`Rasterizable`] by querying it tile by tile.
///
/// In [`FillMode::Rectangle`], or for sources without transparency, every
/// pixel of the clipped extents is written; otherwise transparent pixels are
/// left untouched. Colors are blended over the surface background.
pub fn draw_rasterizable<R: Rasterizable + ?Sized>(source: &R, s: &mut Surface<'_>) {
    let extents = source.extents().translate(s.dx(), s.dy());
    let clip = s.clip_box().intersection(&extents);
    if clip.is_empty() {
        return;
    }
    let config = *s.config();
    let blit = Blit {
        dx: s.dx(),
        dy: s.dy(),
        bgcolor: s.bgcolor(),
        mode: s.blending_mode(),
        replace: s.fill_mode() == FillMode::Rectangle
            || source.transparency() == Transparency::None,
        pixel_batch: config.pixel_batch,
    };
    if clip.area() <= config.small_area {
        blit.tile(source, s.out(), clip);
        return;
    }

    let t = i32::from(config.tile_size);
    let (x_min, y_min) = (i32::from(clip.x_min), i32::from(clip.y_min));
    let (x_max, y_max) = (i32::from(clip.x_max), i32::from(clip.y_max));
    log::trace!("blit {clip:?} in {t}x{t} tiles");
    let mut y = y_min.div_euclid(t) * t;
    while y <= y_max {
        let mut x = x_min.div_euclid(t) * t;
        while x <= x_max {
            let tile = Rect::from_i32(
                x.max(x_min),
                y.max(y_min),
                (x + t - 1).min(x_max),
                (y + t - 1).min(y_max),
            );
            blit.tile(source, s.out(), tile);
            x += t;
        }
        y += t;
    }
}

// ============================================================================
// Streams
// ============================================================================

/// Row-major stream over a rectangle of a [`Rasterizable`].
pub struct RasterStream<'r, R: Rasterizable + ?Sized> {
    source: &'r R,
    bounds: Rect,
    x: i16,
    y: i16,
}

impl<'r, R: Rasterizable + ?Sized> RasterStream<'r, R> {
    /// Stream the whole extents of `source`.
    pub fn new(source: &'r R) -> Self {
        Self::with_bounds(source, source.extents())
    }

    /// Stream `bounds`, which must lie within the extents of `source`.
    pub fn with_bounds(source: &'r R, bounds: Rect) -> Self {
        Self {
            source,
            bounds,
            x: bounds.x_min,
            y: bounds.y_min,
        }
    }

    fn advance(&mut self) {
        if self.x < self.bounds.x_max {
            self.x += 1;
        } else {
            self.x = self.bounds.x_min;
            self.y = self.y.saturating_add(1);
        }
    }

    fn read_chunk(&mut self, buf: &mut [Rgba]) {
        let mut xs = [0i16; MAX_BATCH];
        let mut ys = [0i16; MAX_BATCH];
        let n = buf.len();
        for i in 0..n {
            xs[i] = self.x;
            ys[i] = self.y;
            self.advance();
        }
        if ys[0] == ys[n - 1] {
            let row = Rect::new(xs[0], ys[0], xs[n - 1], ys[0]);
            if self.source.read_color_rect(row, buf) {
                let first = buf[0];
                buf.fill(first);
            }
        } else {
            self.source.read_colors(&xs[..n], &ys[..n], buf);
        }
    }
}

impl<R: Rasterizable + ?Sized> PixelStream for RasterStream<'_, R> {
    fn read(&mut self, buf: &mut [Rgba]) {
        if self.bounds.is_empty() {
            buf.fill(Rgba::TRANSPARENT);
            return;
        }
        for chunk in buf.chunks_mut(MAX_BATCH) {
            self.read_chunk(chunk);
        }
    }

    fn skip(&mut self, count: usize) {
        let width = self.bounds.width() as usize;
        if width == 0 {
            return;
        }
        let col = (self.x - self.bounds.x_min) as usize + count % width;
        let rows = count / width + col / width;
        self.x = self.bounds.x_min + (col % width) as i16;
        self.y = self.y.saturating_add(rows.min(i16::MAX as usize) as i16);
    }
}

// ============================================================================
// In-Memory Raster
// ============================================================================

/// A borrowed block of colors placed at fixed extents.
#[derive(Debug, Clone, Copy)]
pub struct Raster<'a> {
    pixels: &'a [Rgba],
    extents: Rect,
    transparency: Transparency,
}

impl<'a> Raster<'a> {
    /// Wrap `pixels` (row-major) covering `extents`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `pixels` does not hold exactly
    /// `extents.area()` colors.
    pub fn new(pixels: &'a [Rgba], extents: Rect) -> Result<Self> {
        if pixels.len() != extents.area() as usize {
            return Err(Error::InvalidDimensions {
                width: extents.width() as u32,
                height: extents.height() as u32,
            });
        }
        let transparency = if pixels.iter().all(|c| c.is_opaque()) {
            Transparency::None
        } else if pixels.iter().all(|c| c.is_opaque() || c.is_transparent()) {
            Transparency::Binary
        } else {
            Transparency::Gradual
        };
        Ok(Self {
            pixels,
            extents,
            transparency,
        })
    }

    /// Wrap `pixels` as a `width`-wide block with its top-left at the origin.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if the width is zero or does not
    /// divide the pixel count.
    pub fn from_width(pixels: &'a [Rgba], width: u16) -> Result<Self> {
        let w = usize::from(width);
        if w == 0 || pixels.is_empty() || pixels.len() % w != 0 {
            return Err(Error::InvalidDimensions {
                width: u32::from(width),
                height: 0,
            });
        }
        let height = u16::try_from(pixels.len() / w).map_err(|_| Error::InvalidDimensions {
            width: u32::from(width),
            height: (pixels.len() / w) as u32,
        })?;
        Self::new(pixels, Rect::from_xywh(0, 0, width, height))
    }

    /// Color at `(x, y)`; transparent outside the extents.
    #[must_use]
    pub fn get(&self, x: i16, y: i16) -> Rgba {
        if !self.extents.contains(x, y) {
            return Rgba::TRANSPARENT;
        }
        self.pixels[self.offset(x, y)]
    }

    /// The underlying colors.
    #[must_use]
    pub fn pixels(&self) -> &'a [Rgba] {
        self.pixels
    }

    fn offset(&self, x: i16, y: i16) -> usize {
        let width = self.extents.width() as usize;
        (y - self.extents.y_min) as usize * width + (x - self.extents.x_min) as usize
    }
}

impl Drawable for Raster<'_> {
    fn extents(&self) -> Rect {
        self.extents
    }

    fn draw_to(&self, s: &mut Surface<'_>) {
        draw_rasterizable(self, s);
    }
}

impl Rasterizable for Raster<'_> {
    fn read_colors(&self, xs: &[i16], ys: &[i16], out: &mut [Rgba]) {
        for ((&x, &y), c) in xs.iter().zip(ys).zip(out.iter_mut()) {
            *c = self.pixels[self.offset(x, y)];
        }
    }

    fn read_color_rect(&self, rect: Rect, out: &mut [Rgba]) -> bool {
        if rect.is_empty() {
            return false;
        }
        let width = rect.width() as usize;
        let mut i = 0;
        for y in rect.y_min..=rect.y_max {
            let start = self.offset(rect.x_min, y);
            out[i..i + width].copy_from_slice(&self.pixels[start..start + width]);
            i += width;
        }
        let first = out[0];
        out[1..i].iter().all(|&c| c == first)
    }

    fn transparency(&self) -> Transparency {
        self.transparency
    }
}

impl Streamable for Raster<'_> {
    type Stream<'s>
        = RasterStream<'s, Self>
    where
        Self: 's;

    fn create_stream(&self) -> Self::Stream<'_> {
        RasterStream::new(self)
    }
}
