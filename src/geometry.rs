//! Geometric primitives for rasterization.
//!
//! Integer points and boxes live in the 16-bit device coordinate domain.
//! Floating-point points are used by the anti-aliased shape engine and the
//! transform algebra.

/// A 2D point with integer device coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    /// X coordinate.
    pub x: i16,
    /// Y coordinate.
    pub y: i16,
}

impl Point {
    /// Origin point (0, 0).
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Create a new point.
    #[must_use]
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

/// A 2D point with floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FpPoint {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl FpPoint {
    /// Origin point (0, 0).
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Calculate the distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Returns true if both coordinates are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<Point> for FpPoint {
    fn from(p: Point) -> Self {
        Self::new(f32::from(p.x), f32::from(p.y))
    }
}

/// An axis-aligned box of integer pixels, bounds inclusive.
///
/// A box is either well-formed (`x_min <= x_max` and `y_min <= y_max`) or
/// empty. Construction normalizes an inverted axis to `max = min - 1`, so
/// every empty box reports zero width or height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Leftmost column.
    pub x_min: i16,
    /// Topmost row.
    pub y_min: i16,
    /// Rightmost column.
    pub x_max: i16,
    /// Bottom row.
    pub y_max: i16,
}

impl Default for Rect {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Rect {
    /// The canonical empty box.
    pub const EMPTY: Self = Self {
        x_min: 0,
        y_min: 0,
        x_max: -1,
        y_max: -1,
    };

    /// The largest box any shape or clip region may occupy.
    pub const MAXIMUM: Self = Self {
        x_min: -16384,
        y_min: -16384,
        x_max: 16383,
        y_max: 16383,
    };

    /// Create a new box from inclusive bounds.
    #[must_use]
    pub const fn new(x_min: i16, y_min: i16, x_max: i16, y_max: i16) -> Self {
        let x_max = if x_max < x_min { x_min - 1 } else { x_max };
        let y_max = if y_max < y_min { y_min - 1 } else { y_max };
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Create a box from its top-left corner and size.
    #[must_use]
    pub fn from_xywh(x: i16, y: i16, width: u16, height: u16) -> Self {
        let x_max = i32::from(x) + i32::from(width) - 1;
        let y_max = i32::from(y) + i32::from(height) - 1;
        Self::new(x, y, clamp_i16(x_max), clamp_i16(y_max))
    }

    /// Create a box from `i32` bounds, clamping each bound into the 16-bit domain.
    #[must_use]
    pub fn from_i32(x_min: i32, y_min: i32, x_max: i32, y_max: i32) -> Self {
        Self::new(
            clamp_i16(x_min),
            clamp_i16(y_min),
            clamp_i16(x_max),
            clamp_i16(y_max),
        )
    }

    /// Width in pixels (0 when empty).
    #[must_use]
    pub const fn width(&self) -> i32 {
        let w = self.x_max as i32 - self.x_min as i32 + 1;
        if w < 0 {
            0
        } else {
            w
        }
    }

    /// Height in pixels (0 when empty).
    #[must_use]
    pub const fn height(&self) -> i32 {
        let h = self.y_max as i32 - self.y_min as i32 + 1;
        if h < 0 {
            0
        } else {
            h
        }
    }

    /// Number of pixels covered.
    #[must_use]
    pub const fn area(&self) -> u32 {
        (self.width() as u32) * (self.height() as u32)
    }

    /// Returns true if the box covers no pixels.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.x_max < self.x_min || self.y_max < self.y_min
    }

    /// Returns true if the pixel lies inside the box.
    #[must_use]
    pub const fn contains(&self, x: i16, y: i16) -> bool {
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }

    /// Returns true if `other` lies entirely within this box.
    ///
    /// An empty `other` is contained in every box.
    #[must_use]
    pub const fn contains_rect(&self, other: &Self) -> bool {
        other.is_empty()
            || (other.x_min >= self.x_min
                && other.x_max <= self.x_max
                && other.y_min >= self.y_min
                && other.y_max <= self.y_max)
    }

    /// Returns true if the boxes share at least one pixel.
    #[must_use]
    pub const fn intersects(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x_min <= other.x_max
            && other.x_min <= self.x_max
            && self.y_min <= other.y_max
            && other.y_min <= self.y_max
    }

    /// The pixels shared by both boxes.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        Self::new(
            self.x_min.max(other.x_min),
            self.y_min.max(other.y_min),
            self.x_max.min(other.x_max),
            self.y_max.min(other.y_max),
        )
    }

    /// The smallest box covering both boxes.
    #[must_use]
    pub fn extent(&self, other: &Self) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Self::new(
            self.x_min.min(other.x_min),
            self.y_min.min(other.y_min),
            self.x_max.max(other.x_max),
            self.y_max.max(other.y_max),
        )
    }

    /// The box shifted by `(dx, dy)`, saturating at the 16-bit domain.
    #[must_use]
    pub fn translate(&self, dx: i16, dy: i16) -> Self {
        if self.is_empty() {
            return *self;
        }
        Self::new(
            self.x_min.saturating_add(dx),
            self.y_min.saturating_add(dy),
            self.x_max.saturating_add(dx),
            self.y_max.saturating_add(dy),
        )
    }
}

/// Clamp an `i32` coordinate into the 16-bit device domain.
#[inline]
#[must_use]
pub fn clamp_i16(v: i32) -> i16 {
    v.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_distance() {
        let p1 = FpPoint::new(0.0, 0.0);
        let p2 = FpPoint::new(3.0, 4.0);
        assert!((p1.distance(p2) - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_point_conversion() {
        let p: FpPoint = Point::new(-3, 7).into();
        assert_eq!(p, FpPoint::new(-3.0, 7.0));
    }

    #[test]
    fn test_rect_normalizes_empty() {
        let r = Rect::new(10, 10, 5, 20);
        assert!(r.is_empty());
        assert_eq!(r.x_max, 9);
        assert_eq!(r.width(), 0);
        assert_eq!(r.area(), 0);
    }

    #[test]
    fn test_rect_dimensions() {
        let r = Rect::new(0, 0, 9, 4);
        assert_eq!(r.width(), 10);
        assert_eq!(r.height(), 5);
        assert_eq!(r.area(), 50);
        assert_eq!(Rect::from_xywh(0, 0, 10, 5), r);
    }

    #[test]
    fn test_rect_contains() {
        let r = Rect::new(0, 0, 10, 10);
        assert!(r.contains(5, 5));
        assert!(r.contains(10, 10));
        assert!(!r.contains(11, 5));
        assert!(r.contains_rect(&Rect::new(1, 1, 9, 9)));
        assert!(!r.contains_rect(&Rect::new(1, 1, 11, 9)));
        assert!(r.contains_rect(&Rect::EMPTY));
    }

    #[test]
    fn test_rect_intersection() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, -5, 15, 5);
        assert!(a.intersects(&b));
        assert_eq!(a.intersection(&b), Rect::new(5, 0, 10, 5));

        let c = Rect::new(20, 20, 30, 30);
        assert!(!a.intersects(&c));
        assert!(a.intersection(&c).is_empty());
    }

    #[test]
    fn test_rect_extent() {
        let a = Rect::new(0, 0, 2, 2);
        let b = Rect::new(5, -1, 6, 1);
        assert_eq!(a.extent(&b), Rect::new(0, -1, 6, 2));
        assert_eq!(Rect::EMPTY.extent(&b), b);
        assert_eq!(a.extent(&Rect::EMPTY), a);
    }

    #[test]
    fn test_rect_translate() {
        let r = Rect::new(0, 0, 2, 2).translate(3, -1);
        assert_eq!(r, Rect::new(3, -1, 5, 1));
        assert!(Rect::EMPTY.translate(5, 5).is_empty());
    }

    #[test]
    fn test_from_i32_clamps() {
        let r = Rect::from_i32(-100_000, 0, 100_000, 10);
        assert_eq!(r.x_min, i16::MIN);
        assert_eq!(r.x_max, i16::MAX);
    }
}
