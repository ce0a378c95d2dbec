//! Triangles: outline and scanline fill.

use super::{device_box, fill_spans, Line, SpanSource};
use crate::color::{alpha_blend, Rgba};
use crate::geometry::{Point, Rect};
use crate::render::{erase_background, Drawable, Filler, Surface};

/// Three vertices sorted by ascending y; equal y keeps argument order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SortedVertices([Point; 3]);

impl SortedVertices {
    fn new(a: Point, b: Point, c: Point) -> Self {
        let mut v = [a, b, c];
        if v[0].y > v[1].y {
            v.swap(0, 1);
        }
        if v[1].y > v[2].y {
            v.swap(1, 2);
        }
        if v[0].y > v[1].y {
            v.swap(0, 1);
        }
        Self(v)
    }

    fn extents(&self) -> Rect {
        let [a, b, c] = self.0;
        Rect::new(
            a.x.min(b.x).min(c.x),
            a.y,
            a.x.max(b.x).max(c.x),
            c.y,
        )
    }
}

/// Triangle outline, drawn as three lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    vertices: SortedVertices,
    color: Rgba,
}

impl Triangle {
    /// Create a triangle outline.
    #[must_use]
    pub fn new(a: Point, b: Point, c: Point, color: Rgba) -> Self {
        Self {
            vertices: SortedVertices::new(a, b, c),
            color,
        }
    }

    /// Vertices, sorted by ascending y.
    #[must_use]
    pub const fn vertices(&self) -> [Point; 3] {
        self.vertices.0
    }
}

impl Drawable for Triangle {
    fn extents(&self) -> Rect {
        self.vertices.extents()
    }

    fn draw_to(&self, s: &mut Surface<'_>) {
        erase_background(s, self.extents());
        let [a, b, c] = self.vertices.0;
        // Each line blends against the background itself.
        s.draw_object(&Line::between(a, b, self.color));
        s.draw_object(&Line::between(b, c, self.color));
        s.draw_object(&Line::between(a, c, self.color));
    }
}

/// Solid triangle, filled one scanline at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilledTriangle {
    vertices: SortedVertices,
    color: Rgba,
}

impl FilledTriangle {
    /// Create a filled triangle.
    #[must_use]
    pub fn new(a: Point, b: Point, c: Point, color: Rgba) -> Self {
        Self {
            vertices: SortedVertices::new(a, b, c),
            color,
        }
    }

    /// Vertices, sorted by ascending y.
    #[must_use]
    pub const fn vertices(&self) -> [Point; 3] {
        self.vertices.0
    }
}

struct TriangleSpans {
    v: [(i32, i32); 3],
}

impl SpanSource for TriangleSpans {
    fn emit<F: Filler>(&self, f: &mut F) {
        let [(x0, y0), (x1, y1), (x2, y2)] = self.v;
        if y0 == y2 {
            let a = x0.min(x1).min(x2);
            let b = x0.max(x1).max(x2);
            f.fill_hline(a, y0, b);
            return;
        }
        let (dx01, dy01) = (x1 - x0, y1 - y0);
        let (dx02, dy02) = (x2 - x0, y2 - y0);
        let (dx12, dy12) = (x2 - x1, y2 - y1);
        let mut sa = 0;
        let mut sb = 0;

        // Flat-bottomed triangles include row y1 here; otherwise it belongs
        // to the lower half, which also keeps dy01 == 0 out of the division.
        let last = if y1 == y2 { y1 } else { y1 - 1 };
        let mut y = y0;
        while y <= last {
            let a = x0 + sa / dy01;
            let b = x0 + sb / dy02;
            sa += dx01;
            sb += dx02;
            f.fill_hline(a.min(b), y, a.max(b));
            y += 1;
        }

        sa = dx12 * (y - y1);
        sb = dx02 * (y - y0);
        while y <= y2 {
            let a = x1 + sa / dy12;
            let b = x0 + sb / dy02;
            sa += dx12;
            sb += dx02;
            f.fill_hline(a.min(b), y, a.max(b));
            y += 1;
        }
    }
}

impl Drawable for FilledTriangle {
    fn extents(&self) -> Rect {
        self.vertices.extents()
    }

    fn draw_to(&self, s: &mut Surface<'_>) {
        erase_background(s, self.extents());
        let color = alpha_blend(s.bgcolor(), self.color);
        let ext = self.extents();
        let bounds = device_box(
            s,
            i32::from(ext.x_min),
            i32::from(ext.y_min),
            i32::from(ext.x_max),
            i32::from(ext.y_max),
        );
        let dx = i32::from(s.dx());
        let dy = i32::from(s.dy());
        let spans = TriangleSpans {
            v: self
                .vertices
                .0
                .map(|p| (i32::from(p.x) + dx, i32::from(p.y) + dy)),
        };
        fill_spans(s, color, bounds, &spans);
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::render::testing::RecordingSink;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Every row between the top and bottom vertex gets exactly one span
        /// inside the extents.
        #[test]
        fn prop_one_span_per_row(
            a in (-40i16..40, -40i16..40),
            b in (-40i16..40, -40i16..40),
            c in (-40i16..40, -40i16..40),
        ) {
            let t = FilledTriangle::new(
                Point::new(a.0, a.1), Point::new(b.0, b.1), Point::new(c.0, c.1), Rgba::RED,
            );
            let mut sink = RecordingSink::new();
            {
                let mut s = Surface::new(&mut sink, Rect::MAXIMUM);
                s.draw_object(&t);
            }
            let ext = t.extents();
            prop_assert_eq!(sink.fill_rect_count() as i32, ext.height());
            for &(x, y) in sink.pixels.keys() {
                prop_assert!(ext.contains(x, y));
            }
        }
    }
}
