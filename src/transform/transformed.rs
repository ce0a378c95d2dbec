//! Resampling a pixel source through a transformation.

use super::Transformation;
use crate::color::{interpolate, Rgba};
use crate::error::Result;
use crate::geometry::{FpPoint, Rect};
use crate::raster::{draw_rasterizable, Rasterizable};
use crate::render::{Drawable, Surface};

/// A [`Rasterizable`] seen through a [`Transformation`].
///
/// Each device pixel is mapped back into the source. A pixel landing exactly
/// on a source pixel takes its color; otherwise the up to four surrounding
/// source pixels are interpolated bilinearly, with samples outside the
/// source counting as transparent so edges fade out smoothly.
pub struct TransformedRaster<'a, R: Rasterizable + ?Sized> {
    source: &'a R,
    inverse: Transformation,
    extents: Rect,
}

impl<'a, R: Rasterizable + ?Sized> TransformedRaster<'a, R> {
    /// Wrap `source`, mapping it by `transform`.
    ///
    /// Fails if `transform` cannot be inverted.
    pub fn new(source: &'a R, transform: &Transformation) -> Result<Self> {
        let inverse = transform.inversion()?;
        let extents = transform.transform_extents(source.extents());
        log::trace!(
            "{:?} transform maps {:?} to {extents:?}",
            transform.kind(),
            source.extents()
        );
        Ok(Self {
            source,
            inverse,
            extents,
        })
    }

    /// The wrapped source.
    pub fn source(&self) -> &'a R {
        self.source
    }

    /// Source pixel `(x, y)`, transparent outside the source.
    fn sample(&self, bounds: &Rect, x: i32, y: i32) -> Rgba {
        let inside = i32::from(bounds.x_min) <= x
            && x <= i32::from(bounds.x_max)
            && i32::from(bounds.y_min) <= y
            && y <= i32::from(bounds.y_max);
        if !inside {
            return Rgba::TRANSPARENT;
        }
        let mut out = [Rgba::TRANSPARENT];
        self.source.read_colors(&[x as i16], &[y as i16], &mut out);
        out[0]
    }

    fn color_at(&self, bounds: &Rect, x: i16, y: i16) -> Rgba {
        let p = self
            .inverse
            .apply(FpPoint::new(f32::from(x), f32::from(y)));
        if !p.is_finite() {
            return Rgba::TRANSPARENT;
        }
        let (fx, fy) = (p.x.floor(), p.y.floor());
        let outside = fx + 1.0 < f32::from(bounds.x_min)
            || fx > f32::from(bounds.x_max)
            || fy + 1.0 < f32::from(bounds.y_min)
            || fy > f32::from(bounds.y_max);
        if outside {
            return Rgba::TRANSPARENT;
        }
        let (x0, y0) = (fx as i32, fy as i32);
        // Weights of the right and lower neighbors, out of 256.
        let wx = ((p.x - fx) * 256.0) as i16;
        let wy = ((p.y - fy) * 256.0) as i16;
        match (wx, wy) {
            (0, 0) => self.sample(bounds, x0, y0),
            (_, 0) => interpolate(
                self.sample(bounds, x0, y0),
                self.sample(bounds, x0 + 1, y0),
                wx,
            ),
            (0, _) => interpolate(
                self.sample(bounds, x0, y0),
                self.sample(bounds, x0, y0 + 1),
                wy,
            ),
            _ => {
                let top = interpolate(
                    self.sample(bounds, x0, y0),
                    self.sample(bounds, x0 + 1, y0),
                    wx,
                );
                let bottom = interpolate(
                    self.sample(bounds, x0, y0 + 1),
                    self.sample(bounds, x0 + 1, y0 + 1),
                    wx,
                );
                interpolate(top, bottom, wy)
            }
        }
    }
}

impl<R: Rasterizable + ?Sized> Drawable for TransformedRaster<'_, R> {
    fn extents(&self) -> Rect {
        self.extents
    }

    fn draw_to(&self, s: &mut Surface<'_>) {
        draw_rasterizable(self, s);
    }
}

impl<R: Rasterizable + ?Sized> Rasterizable for TransformedRaster<'_, R> {
    fn read_colors(&self, xs: &[i16], ys: &[i16], out: &mut [Rgba]) {
        let bounds = self.source.extents();
        for ((&x, &y), o) in xs.iter().zip(ys).zip(out.iter_mut()) {
            *o = self.color_at(&bounds, x, y);
        }
    }
}
