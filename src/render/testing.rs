//! Recording sink for unit tests.

use super::sink::PixelSink;
use crate::color::{BlendingMode, Rgba};
use crate::geometry::Rect;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SinkCall {
    FillRect {
        mode: BlendingMode,
        color: Rgba,
        rect: Rect,
    },
    WriteRect {
        mode: BlendingMode,
        rect: Rect,
        colors: Vec<Rgba>,
    },
    WritePixel {
        mode: BlendingMode,
        x: i16,
        y: i16,
        color: Rgba,
    },
}

/// Records every call and the last color written to each pixel.
#[derive(Debug, Default)]
pub(crate) struct RecordingSink {
    pub(crate) calls: Vec<SinkCall>,
    pub(crate) batches: usize,
    pub(crate) pixels: BTreeMap<(i16, i16), Rgba>,
}

impl RecordingSink {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn pixel(&self, x: i16, y: i16) -> Option<Rgba> {
        self.pixels.get(&(x, y)).copied()
    }

    pub(crate) fn pixel_set(&self) -> BTreeSet<(i16, i16)> {
        self.pixels.keys().copied().collect()
    }

    pub(crate) fn covered_rect(&self) -> Option<Rect> {
        let mut it = self.pixels.keys();
        let &(x, y) = it.next()?;
        let mut r = Rect::new(x, y, x, y);
        for &(x, y) in it {
            r = r.extent(&Rect::new(x, y, x, y));
        }
        Some(r)
    }

    pub(crate) fn fill_rect_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, SinkCall::FillRect { .. }))
            .count()
    }

    /// Pixels in row `y`, in ascending x order.
    pub(crate) fn row(&self, y: i16) -> Vec<i16> {
        self.pixels
            .keys()
            .filter(|&&(_, py)| py == y)
            .map(|&(x, _)| x)
            .collect()
    }
}

impl PixelSink for RecordingSink {
    fn fill_rects(
        &mut self,
        mode: BlendingMode,
        color: Rgba,
        x0: &[i16],
        y0: &[i16],
        x1: &[i16],
        y1: &[i16],
    ) {
        self.batches += 1;
        for i in 0..x0.len() {
            let rect = Rect::new(x0[i], y0[i], x1[i], y1[i]);
            self.calls.push(SinkCall::FillRect { mode, color, rect });
            for y in rect.y_min..=rect.y_max {
                for x in rect.x_min..=rect.x_max {
                    self.pixels.insert((x, y), color);
                }
            }
        }
    }

    fn write_rect(&mut self, mode: BlendingMode, rect: Rect, colors: &[Rgba]) {
        self.batches += 1;
        let mut i = 0;
        for y in rect.y_min..=rect.y_max {
            for x in rect.x_min..=rect.x_max {
                self.pixels.insert((x, y), colors[i]);
                i += 1;
            }
        }
        self.calls.push(SinkCall::WriteRect {
            mode,
            rect,
            colors: colors.to_vec(),
        });
    }

    fn write_pixels(&mut self, mode: BlendingMode, colors: &[Rgba], xs: &[i16], ys: &[i16]) {
        self.batches += 1;
        for i in 0..colors.len() {
            self.pixels.insert((xs[i], ys[i]), colors[i]);
            self.calls.push(SinkCall::WritePixel {
                mode,
                x: xs[i],
                y: ys[i],
                color: colors[i],
            });
        }
    }
}
