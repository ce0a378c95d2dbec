//! Axis-aligned rectangles: outline, border and filled.

use super::device_box;
use crate::color::{alpha_blend, BlendingMode, Rgba};
use crate::geometry::Rect;
use crate::raster::{Rasterizable, Transparency};
use crate::render::{
    ClippingFiller, ConstantStream, Drawable, FillMode, Filler, Streamable, Surface,
};

/// Sorted corners of a rectangle, or an empty box.
fn sorted_box(x0: i16, y0: i16, x1: i16, y1: i16) -> Rect {
    Rect::new(x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1))
}

// ============================================================================
// Outline
// ============================================================================

/// One-pixel rectangle outline.
///
/// In [`FillMode::Rectangle`], the interior is erased with the background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutlineRect {
    bounds: Rect,
    color: Rgba,
}

impl OutlineRect {
    /// Create an outline through both corners (in any order).
    #[must_use]
    pub fn new(x0: i16, y0: i16, x1: i16, y1: i16, color: Rgba) -> Self {
        Self {
            bounds: sorted_box(x0, y0, x1, y1),
            color,
        }
    }

    /// Create an outline along the edge of `rect`. An empty box draws nothing.
    #[must_use]
    pub const fn from_rect(rect: Rect, color: Rgba) -> Self {
        Self {
            bounds: rect,
            color,
        }
    }

    /// Outline color.
    #[must_use]
    pub const fn color(&self) -> Rgba {
        self.color
    }
}

impl Drawable for OutlineRect {
    fn extents(&self) -> Rect {
        self.bounds
    }

    fn draw_to(&self, s: &mut Surface<'_>) {
        let b = self.bounds;
        if b.is_empty() {
            return;
        }
        let color = alpha_blend(s.bgcolor(), self.color);
        let (x0, y0, x1, y1) = (
            i32::from(b.x_min) + i32::from(s.dx()),
            i32::from(b.y_min) + i32::from(s.dy()),
            i32::from(b.x_max) + i32::from(s.dx()),
            i32::from(b.y_max) + i32::from(s.dy()),
        );
        let clip = s.clip_box();
        let mode = s.blending_mode();
        let batch = s.config().fill_batch;
        {
            let mut f = ClippingFiller::new(s.out(), color, mode, batch, clip);
            f.fill_hline(x0, y0, x1);
            f.fill_hline(x0, y1, x1);
            f.fill_vline(x0, y0 + 1, y1 - 1);
            f.fill_vline(x1, y0 + 1, y1 - 1);
        }
        if s.fill_mode() == FillMode::Rectangle && x1 - x0 >= 2 && y1 - y0 >= 2 {
            let interior = clip.intersection(&Rect::from_i32(x0 + 1, y0 + 1, x1 - 1, y1 - 1));
            let bg = s.bgcolor();
            s.out().fill_rect(BlendingMode::Source, interior, bg);
        }
    }
}

// ============================================================================
// Border
// ============================================================================

/// A rectangular frame with independent edge thicknesses.
///
/// If the edges would meet or overlap, the border degrades to one filled
/// rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Border {
    bounds: Rect,
    left: i16,
    top: i16,
    right: i16,
    bottom: i16,
    color: Rgba,
}

impl Border {
    /// Create a border with per-edge thicknesses (negative values count as 0).
    #[must_use]
    pub fn new(
        x0: i16,
        y0: i16,
        x1: i16,
        y1: i16,
        left: i16,
        top: i16,
        right: i16,
        bottom: i16,
        color: Rgba,
    ) -> Self {
        Self::with_bounds(sorted_box(x0, y0, x1, y1), left, top, right, bottom, color)
    }

    /// Create a border of the same thickness on every edge.
    #[must_use]
    pub fn uniform(x0: i16, y0: i16, x1: i16, y1: i16, border: i16, color: Rgba) -> Self {
        Self::new(x0, y0, x1, y1, border, border, border, border, color)
    }

    /// Create a border with horizontal (left/right) and vertical
    /// (top/bottom) thicknesses.
    #[must_use]
    pub fn symmetric(
        x0: i16,
        y0: i16,
        x1: i16,
        y1: i16,
        hborder: i16,
        vborder: i16,
        color: Rgba,
    ) -> Self {
        Self::new(x0, y0, x1, y1, hborder, vborder, hborder, vborder, color)
    }

    /// Create the border filling `outer` minus `inner`.
    #[must_use]
    pub fn between(outer: Rect, inner: Rect, color: Rgba) -> Self {
        Self::with_bounds(
            outer,
            inner.x_min.saturating_sub(outer.x_min),
            inner.y_min.saturating_sub(outer.y_min),
            outer.x_max.saturating_sub(inner.x_max),
            outer.y_max.saturating_sub(inner.y_max),
            color,
        )
    }

    fn with_bounds(
        bounds: Rect,
        left: i16,
        top: i16,
        right: i16,
        bottom: i16,
        color: Rgba,
    ) -> Self {
        let (mut left, mut top, mut right, mut bottom) =
            (left.max(0), top.max(0), right.max(0), bottom.max(0));
        let (x0, y0, x1, y1) = (
            i32::from(bounds.x_min),
            i32::from(bounds.y_min),
            i32::from(bounds.x_max),
            i32::from(bounds.y_max),
        );
        if x0 + i32::from(left) + 1 >= x1 - i32::from(right)
            || y0 + i32::from(top) + 1 >= y1 - i32::from(bottom)
        {
            left = (x1 - x0 + 1).clamp(0, i32::from(i16::MAX)) as i16;
            top = 0;
            right = 0;
            bottom = 0;
        }
        Self {
            bounds,
            left,
            top,
            right,
            bottom,
            color,
        }
    }

    /// Edge thicknesses as `(left, top, right, bottom)`.
    #[must_use]
    pub const fn edges(&self) -> (i16, i16, i16, i16) {
        (self.left, self.top, self.right, self.bottom)
    }
}

impl Drawable for Border {
    fn extents(&self) -> Rect {
        self.bounds
    }

    fn draw_to(&self, s: &mut Surface<'_>) {
        let b = self.bounds;
        if b.is_empty() {
            return;
        }
        let color = alpha_blend(s.bgcolor(), self.color);
        let mut x0 = i32::from(b.x_min) + i32::from(s.dx());
        let mut y0 = i32::from(b.y_min) + i32::from(s.dy());
        let mut x1 = i32::from(b.x_max) + i32::from(s.dx());
        let y1 = i32::from(b.y_max) + i32::from(s.dy());
        let (left, top, right, bottom) = (
            i32::from(self.left),
            i32::from(self.top),
            i32::from(self.right),
            i32::from(self.bottom),
        );
        let clip = s.clip_box();
        let mode = s.blending_mode();
        let batch = s.config().fill_batch;
        let mut f = ClippingFiller::new(s.out(), color, mode, batch, clip);
        f.fill_rect(x0, y0, x0 + left - 1, y1);
        x0 += left;
        f.fill_rect(x0, y0, x1, y0 + top - 1);
        y0 += top;
        f.fill_rect(x1 - right + 1, y0, x1, y1);
        x1 -= right;
        f.fill_rect(x0, y1 - bottom + 1, x1, y1);
    }
}

// ============================================================================
// Filled
// ============================================================================

/// A solid rectangle.
///
/// Also usable as a pixel source: it streams and rasterizes to one color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilledRect {
    bounds: Rect,
    color: Rgba,
}

impl FilledRect {
    /// Create a filled rectangle through both corners (in any order).
    #[must_use]
    pub fn new(x0: i16, y0: i16, x1: i16, y1: i16, color: Rgba) -> Self {
        Self {
            bounds: sorted_box(x0, y0, x1, y1),
            color,
        }
    }

    /// Create a filled rectangle covering `rect`. An empty box draws nothing.
    #[must_use]
    pub const fn from_rect(rect: Rect, color: Rgba) -> Self {
        Self {
            bounds: rect,
            color,
        }
    }

    /// Fill color.
    #[must_use]
    pub const fn color(&self) -> Rgba {
        self.color
    }
}

impl Drawable for FilledRect {
    fn extents(&self) -> Rect {
        self.bounds
    }

    fn draw_to(&self, s: &mut Surface<'_>) {
        if self.bounds.is_empty() {
            return;
        }
        let b = self.bounds;
        let area = s.clip_box().intersection(&device_box(
            s,
            i32::from(b.x_min),
            i32::from(b.y_min),
            i32::from(b.x_max),
            i32::from(b.y_max),
        ));
        let color = alpha_blend(s.bgcolor(), self.color);
        let mode = s.blending_mode();
        s.out().fill_rect(mode, area, color);
    }
}

impl Streamable for FilledRect {
    type Stream<'s> = ConstantStream;

    fn create_stream(&self) -> ConstantStream {
        ConstantStream::new(self.color)
    }
}

impl Rasterizable for FilledRect {
    fn read_colors(&self, _xs: &[i16], _ys: &[i16], out: &mut [Rgba]) {
        out.fill(self.color);
    }

    fn read_color_rect(&self, _rect: Rect, out: &mut [Rgba]) -> bool {
        if let Some(first) = out.first_mut() {
            *first = self.color;
        }
        true
    }

    fn transparency(&self) -> Transparency {
        if self.color.is_opaque() {
            Transparency::None
        } else {
            Transparency::Gradual
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::RecordingSink;
    use crate::render::draw_stream;

    fn draw(d: &dyn Drawable, clip: Rect, mode: FillMode) -> RecordingSink {
        let mut sink = RecordingSink::new();
        {
            let mut s = Surface::new(&mut sink, clip)
                .with_bgcolor(Rgba::BLUE)
                .with_fill_mode(mode);
            s.draw_object(d);
        }
        sink
    }

    #[test]
    fn test_outline_rect() {
        let sink = draw(
            &OutlineRect::new(5, 5, 0, 0, Rgba::RED),
            Rect::MAXIMUM,
            FillMode::Visible,
        );
        assert_eq!(sink.pixel_set().len(), 20);
        assert_eq!(sink.pixel(0, 3), Some(Rgba::RED));
        assert_eq!(sink.pixel(2, 2), None);
    }

    #[test]
    fn test_outline_rect_erases_interior() {
        let sink = draw(
            &OutlineRect::new(0, 0, 5, 5, Rgba::RED),
            Rect::MAXIMUM,
            FillMode::Rectangle,
        );
        assert_eq!(sink.pixel_set().len(), 36);
        assert_eq!(sink.pixel(2, 2), Some(Rgba::BLUE));
        assert_eq!(sink.pixel(5, 5), Some(Rgba::RED));
    }

    #[test]
    fn test_empty_rect_draws_nothing() {
        let empty = Rect::new(5, 5, 4, 10);
        for d in [
            &OutlineRect::from_rect(empty, Rgba::RED) as &dyn Drawable,
            &FilledRect::from_rect(empty, Rgba::RED),
            &Border::between(empty, empty, Rgba::RED),
        ] {
            let sink = draw(d, Rect::MAXIMUM, FillMode::Rectangle);
            assert!(sink.calls.is_empty());
        }
    }

    #[test]
    fn test_border_strips() {
        let border = Border::new(0, 0, 9, 9, 1, 2, 3, 1, Rgba::RED);
        let sink = draw(&border, Rect::MAXIMUM, FillMode::Visible);
        assert_eq!(sink.fill_rect_count(), 4);
        // Interior x in 1..=6, y in 2..=8.
        assert_eq!(sink.pixel_set().len(), 100 - 6 * 7);
        assert_eq!(sink.pixel(3, 5), None);
        assert_eq!(sink.pixel(0, 9), Some(Rgba::RED));
        assert_eq!(sink.pixel(7, 5), Some(Rgba::RED));
    }

    #[test]
    fn test_border_degrades_to_filled() {
        let border = Border::uniform(0, 0, 5, 5, 3, Rgba::RED);
        assert_eq!(border.edges(), (6, 0, 0, 0));
        let sink = draw(&border, Rect::MAXIMUM, FillMode::Visible);
        assert_eq!(sink.pixel_set().len(), 36);
    }

    #[test]
    fn test_border_between() {
        let border = Border::between(Rect::new(0, 0, 9, 9), Rect::new(2, 2, 7, 7), Rgba::RED);
        assert_eq!(border.edges(), (2, 2, 2, 2));
        let negative = Border::symmetric(0, 0, 9, 9, -4, 1, Rgba::RED);
        assert_eq!(negative.edges(), (0, 1, 0, 1));
    }

    #[test]
    fn test_filled_rect_clipped() {
        let sink = draw(
            &FilledRect::new(-5, -5, 5, 5, Rgba::RED),
            Rect::new(0, 0, 100, 100),
            FillMode::Visible,
        );
        assert_eq!(sink.covered_rect(), Some(Rect::new(0, 0, 5, 5)));
        assert_eq!(sink.fill_rect_count(), 1);
    }

    #[test]
    fn test_filled_rect_stream() {
        let rect = FilledRect::new(0, 0, 99, 2, Rgba::GREEN);
        let mut sink = RecordingSink::new();
        {
            let mut s = Surface::new(&mut sink, Rect::new(10, 1, 200, 200));
            draw_stream(&mut s, &rect);
        }
        assert_eq!(sink.covered_rect(), Some(Rect::new(10, 1, 99, 2)));
        assert!(sink.pixels.values().all(|&c| c == Rgba::GREEN));
    }

    #[test]
    fn test_filled_rect_rasterizable() {
        let rect = FilledRect::new(0, 0, 3, 3, Rgba::RED.with_alpha(10));
        let mut out = [Rgba::TRANSPARENT; 4];
        assert!(rect.read_color_rect(Rect::new(0, 0, 1, 1), &mut out));
        assert_eq!(out[0], Rgba::RED.with_alpha(10));
        assert_eq!(rect.transparency(), Transparency::Gradual);
        assert_eq!(
            FilledRect::new(0, 0, 1, 1, Rgba::RED).transparency(),
            Transparency::None
        );
    }
}
