//! PNG encoding of framebuffers and other pixel sources.

use crate::color::Rgba;
use crate::config::MAX_BATCH;
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::raster::Rasterizable;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes 8-bit RGBA PNG images.
pub struct PngEncoder;

impl PngEncoder {
    /// Write a framebuffer to a PNG file.
    ///
    /// # Errors
    ///
    /// Returns an error if file creation or PNG encoding fails.
    pub fn write_to_file<P: AsRef<Path>>(fb: &Framebuffer, path: P) -> Result<()> {
        let path = path.as_ref();
        let writer = BufWriter::new(File::create(path)?);
        Self::encode(writer, fb.width(), fb.height(), &fb.to_compact_pixels())?;
        log::debug!("wrote {}x{} PNG to {}", fb.width(), fb.height(), path.display());
        Ok(())
    }

    /// Encode a framebuffer to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn to_bytes(fb: &Framebuffer) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        Self::encode(&mut buffer, fb.width(), fb.height(), &fb.to_compact_pixels())?;
        Ok(buffer)
    }

    /// Encode the extents of any pixel source to PNG bytes.
    ///
    /// The top-left pixel of the image is the top-left corner of
    /// `source.extents()`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] for a source with empty extents,
    /// or an error if PNG encoding fails.
    pub fn rasterizable_to_bytes<R: Rasterizable + ?Sized>(source: &R) -> Result<Vec<u8>> {
        let extents = source.extents();
        if extents.is_empty() {
            return Err(Error::InvalidDimensions {
                width: 0,
                height: 0,
            });
        }
        let (width, height) = (extents.width() as u32, extents.height() as u32);

        let mut data = Vec::with_capacity((width * height) as usize * 4);
        let mut xs = [0i16; MAX_BATCH];
        let mut colors = [Rgba::TRANSPARENT; MAX_BATCH];
        for y in extents.y_min..=extents.y_max {
            let ys = [y; MAX_BATCH];
            let mut x = i32::from(extents.x_min);
            while x <= i32::from(extents.x_max) {
                let len = (i32::from(extents.x_max) - x + 1).min(MAX_BATCH as i32) as usize;
                for (i, slot) in xs[..len].iter_mut().enumerate() {
                    *slot = (x + i as i32) as i16;
                }
                source.read_colors(&xs[..len], &ys[..len], &mut colors[..len]);
                data.extend(colors[..len].iter().flat_map(|c| c.to_array()));
                x += len as i32;
            }
        }

        let mut buffer = Vec::new();
        Self::encode(&mut buffer, width, height, &data)?;
        Ok(buffer)
    }

    fn encode<W: Write>(writer: W, width: u32, height: u32, data: &[u8]) -> Result<()> {
        let mut encoder = png::Encoder::new(writer, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::FpPoint;
    use crate::smooth::SmoothShape;

    const PNG_MAGIC: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

    #[test]
    fn test_png_to_bytes() {
        let mut fb = Framebuffer::new(10, 10).unwrap();
        fb.clear(Rgba::RED);

        let bytes = PngEncoder::to_bytes(&fb).unwrap();
        assert_eq!(&bytes[0..8], &PNG_MAGIC);
    }

    #[test]
    fn test_rasterizable_to_bytes() {
        let circle = SmoothShape::filled_circle(FpPoint::new(40.0, 40.0), 30.0, Rgba::BLUE);
        let bytes = PngEncoder::rasterizable_to_bytes(&circle).unwrap();
        assert_eq!(&bytes[0..8], &PNG_MAGIC);
    }

    #[test]
    fn test_empty_source_rejected() {
        let err = PngEncoder::rasterizable_to_bytes(&SmoothShape::EMPTY);
        assert!(matches!(err, Err(Error::InvalidDimensions { .. })));
    }
}
