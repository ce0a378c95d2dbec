//! In-memory RGBA framebuffer.
//!
//! A SIMD-aligned pixel buffer that acts as a [`PixelSink`] for every shape
//! in the crate and, in turn, as a [`Rasterizable`] source, so a finished
//! frame can be drawn, transformed or encoded like any other raster.
//! Whole-buffer operations go through trueno vectors.

use crate::color::{BlendingMode, Rgba};
use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::raster::{draw_rasterizable, Rasterizable};
use crate::render::{Drawable, PixelSink, Surface};
use trueno::Vector;

/// Alignment for SIMD operations (64 bytes for AVX-512).
const SIMD_ALIGNMENT: usize = 64;

/// Largest width or height; device coordinates are `i16`.
pub const MAX_DIMENSION: u32 = i16::MAX as u32 + 1;

/// SIMD-aligned framebuffer addressed in device coordinates.
///
/// Pixel `(0, 0)` is the top-left corner; [`Drawable::extents`] is
/// `(0, 0, width - 1, height - 1)`. Writes outside the buffer are dropped.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    /// RGBA bytes, row-major, `stride` bytes per row.
    pixels: Vec<u8>,
    /// Row length in bytes, padded to [`SIMD_ALIGNMENT`].
    stride: usize,
}

impl Framebuffer {
    /// Create a transparent framebuffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if either dimension is zero or
    /// exceeds [`MAX_DIMENSION`].
    ///
    /// # Example
    ///
    /// ```
    /// use trueno_shapes::framebuffer::Framebuffer;
    ///
    /// let fb = Framebuffer::new(320, 240).unwrap();
    /// assert_eq!(fb.width(), 320);
    /// assert_eq!(fb.height(), 240);
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(Error::InvalidDimensions { width, height });
        }

        let row_bytes = (width as usize) * 4;
        let stride = (row_bytes + SIMD_ALIGNMENT - 1) & !(SIMD_ALIGNMENT - 1);
        let size = stride * (height as usize);

        let mut pixels = Vec::with_capacity(size + SIMD_ALIGNMENT);
        pixels.resize(size, 0);

        Ok(Self {
            width,
            height,
            pixels,
            stride,
        })
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Row length in bytes, including padding.
    #[must_use]
    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// Total number of pixels.
    #[must_use]
    pub const fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Raw bytes, including row padding.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Pixel bytes of row `y`, without padding.
    #[must_use]
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = (y as usize) * self.stride;
        Some(&self.pixels[start..start + (self.width as usize) * 4])
    }

    /// The whole buffer as a rectangle.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, (self.width - 1) as i16, (self.height - 1) as i16)
    }

    /// Set every pixel to `color`.
    pub fn clear(&mut self, color: Rgba) {
        let [r, g, b, a] = color.to_array();

        // 16 pixels per 64-byte chunk.
        let mut pattern = [0u8; 64];
        for px in pattern.chunks_exact_mut(4) {
            px.copy_from_slice(&[r, g, b, a]);
        }

        for y in 0..self.height {
            let row_start = (y as usize) * self.stride;
            let row_end = row_start + (self.width as usize) * 4;
            let row = &mut self.pixels[row_start..row_end];

            let mut chunks = row.chunks_exact_mut(64);
            for chunk in &mut chunks {
                chunk.copy_from_slice(&pattern);
            }
            for px in chunks.into_remainder().chunks_exact_mut(4) {
                px.copy_from_slice(&[r, g, b, a]);
            }
        }
    }

    /// Color at `(x, y)`, or `None` outside the buffer.
    #[must_use]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.load(self.pixel_index(x, y)))
    }

    /// Overwrite `(x, y)`. Out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = self.pixel_index(x, y);
        self.store(idx, color);
    }

    /// Combine `color` into `(x, y)` under `mode`.
    pub fn blend_pixel(&mut self, mode: BlendingMode, x: u32, y: u32, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = self.pixel_index(x, y);
        let dst = self.load(idx);
        self.store(idx, mode.blend(dst, color));
    }

    /// Mix `other` into this buffer, `alpha` parts `other` to `1 - alpha`
    /// parts self, channel by channel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if the sizes differ.
    pub fn blend_over(&mut self, other: &Framebuffer, alpha: f32) -> Result<()> {
        if self.width != other.width || self.height != other.height {
            return Err(Error::InvalidDimensions {
                width: other.width,
                height: other.height,
            });
        }

        let alpha = alpha.clamp(0.0, 1.0);
        let row_bytes = (self.width as usize) * 4;
        let src_weight = Vector::from_vec(vec![alpha; row_bytes]);
        let dst_weight = Vector::from_vec(vec![1.0 - alpha; row_bytes]);

        for y in 0..self.height as usize {
            let start = y * self.stride;
            let dst = &mut self.pixels[start..start + row_bytes];
            let src = &other.pixels[start..start + row_bytes];

            let dst_vec = Vector::from_vec(dst.iter().map(|&b| f32::from(b)).collect());
            let src_vec = Vector::from_vec(src.iter().map(|&b| f32::from(b)).collect());

            if let (Ok(s), Ok(d)) = (src_vec.mul(&src_weight), dst_vec.mul(&dst_weight)) {
                if let Ok(mixed) = s.add(&d) {
                    for (out, &v) in dst.iter_mut().zip(mixed.as_slice()) {
                        *out = v.round().clamp(0.0, 255.0) as u8;
                    }
                }
            }
        }
        Ok(())
    }

    /// `(min, max, mean)` BT.709 luminance over all pixels.
    #[must_use]
    pub fn luminance_stats(&self) -> (f32, f32, f32) {
        let mut luminances = Vec::with_capacity(self.pixel_count());
        for y in 0..self.height {
            if let Some(row) = self.row(y) {
                luminances.extend(row.chunks_exact(4).map(|px| {
                    0.2126 * f32::from(px[0]) + 0.7152 * f32::from(px[1]) + 0.0722 * f32::from(px[2])
                }));
            }
        }

        let vec = Vector::from_vec(luminances);
        let min = vec.min().unwrap_or(0.0);
        let max = vec.max().unwrap_or(0.0);
        let mean = vec.mean().unwrap_or(0.0);
        (min, max, mean)
    }

    /// Pixel bytes without row padding, as PNG expects.
    #[must_use]
    pub fn to_compact_pixels(&self) -> Vec<u8> {
        let row_bytes = (self.width as usize) * 4;
        if self.stride == row_bytes {
            return self.pixels[..row_bytes * (self.height as usize)].to_vec();
        }
        let mut compact = Vec::with_capacity(row_bytes * (self.height as usize));
        for y in 0..self.height as usize {
            let start = y * self.stride;
            compact.extend_from_slice(&self.pixels[start..start + row_bytes]);
        }
        compact
    }

    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * self.stride + (x as usize) * 4
    }

    /// Byte index of a device coordinate, if inside the buffer.
    #[inline]
    fn device_index(&self, x: i16, y: i16) -> Option<usize> {
        let (x, y) = (u32::try_from(x).ok()?, u32::try_from(y).ok()?);
        (x < self.width && y < self.height).then(|| self.pixel_index(x, y))
    }

    #[inline]
    fn load(&self, idx: usize) -> Rgba {
        Rgba::from_array([
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ])
    }

    #[inline]
    fn store(&mut self, idx: usize, color: Rgba) {
        self.pixels[idx..idx + 4].copy_from_slice(&color.to_array());
    }

    #[inline]
    fn put(&mut self, idx: usize, mode: BlendingMode, color: Rgba) {
        let out = match mode {
            BlendingMode::Source => color,
            _ => mode.blend(self.load(idx), color),
        };
        self.store(idx, out);
    }

    fn fill_clipped(&mut self, mode: BlendingMode, rect: Rect, color: Rgba) {
        let r = rect.intersection(&self.bounds());
        if r.is_empty() {
            return;
        }
        // Opaque source-over is a plain overwrite.
        let mode = if mode == BlendingMode::SourceOver && color.is_opaque() {
            BlendingMode::Source
        } else {
            mode
        };
        let (x0, x1) = (r.x_min as usize, r.x_max as usize);
        for y in r.y_min as usize..=r.y_max as usize {
            let start = y * self.stride;
            if mode == BlendingMode::Source {
                let row = &mut self.pixels[start + x0 * 4..start + (x1 + 1) * 4];
                for px in row.chunks_exact_mut(4) {
                    px.copy_from_slice(&color.to_array());
                }
            } else {
                for x in x0..=x1 {
                    self.put(start + x * 4, mode, color);
                }
            }
        }
    }
}

impl PixelSink for Framebuffer {
    fn fill_rects(
        &mut self,
        mode: BlendingMode,
        color: Rgba,
        x0: &[i16],
        y0: &[i16],
        x1: &[i16],
        y1: &[i16],
    ) {
        for i in 0..x0.len() {
            self.fill_clipped(mode, Rect::new(x0[i], y0[i], x1[i], y1[i]), color);
        }
    }

    fn write_rect(&mut self, mode: BlendingMode, rect: Rect, colors: &[Rgba]) {
        if rect.is_empty() {
            return;
        }
        let width = rect.width() as usize;
        for (i, &color) in colors.iter().take(rect.area() as usize).enumerate() {
            let x = rect.x_min + (i % width) as i16;
            let y = rect.y_min + (i / width) as i16;
            if let Some(idx) = self.device_index(x, y) {
                self.put(idx, mode, color);
            }
        }
    }

    fn write_pixels(&mut self, mode: BlendingMode, colors: &[Rgba], xs: &[i16], ys: &[i16]) {
        for ((&color, &x), &y) in colors.iter().zip(xs).zip(ys) {
            if let Some(idx) = self.device_index(x, y) {
                self.put(idx, mode, color);
            }
        }
    }
}

impl Drawable for Framebuffer {
    fn extents(&self) -> Rect {
        self.bounds()
    }

    fn draw_to(&self, s: &mut Surface<'_>) {
        draw_rasterizable(self, s);
    }
}

impl Rasterizable for Framebuffer {
    fn read_colors(&self, xs: &[i16], ys: &[i16], out: &mut [Rgba]) {
        for ((&x, &y), o) in xs.iter().zip(ys).zip(out.iter_mut()) {
            *o = self
                .device_index(x, y)
                .map_or(Rgba::TRANSPARENT, |idx| self.load(idx));
        }
    }
}
