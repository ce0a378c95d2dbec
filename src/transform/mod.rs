//! 2D transformation algebra.
//!
//! A [`Transformation`] is one of six kinds, from the identity up to a full
//! projective (homogeneous 3×3) mapping. Values are immutable; composing two
//! transformations with [`Transformation::then`] yields a new value of the
//! least general kind that represents the combination exactly:
//!
//! | first \ then  | Identity    | Translation | Scaling | Rotation | Affine     | Projective |
//! |---------------|-------------|-------------|---------|----------|------------|------------|
//! | Identity      | Identity    | Translation | Scaling | Rotation | Affine     | Projective |
//! | Translation   | Translation | Translation | Affine  | Affine   | Affine     | Projective |
//! | Scaling       | Scaling     | Affine      | Scaling | Affine   | Affine     | Projective |
//! | Rotation      | Rotation    | Affine      | Affine  | Rotation | Affine     | Projective |
//! | Affine        | Affine      | Affine      | Affine  | Affine   | Affine     | Projective |
//! | Projective    | Projective  | Projective  | Projective | Projective | Projective | Projective |
//!
//! Rotation angles are in radians; positive angles turn clockwise on a
//! y-down screen.

mod transformed;

pub use transformed::TransformedRaster;

use std::f32::consts::FRAC_PI_2;

use crate::error::{Error, Result};
use crate::geometry::{FpPoint, Rect};

/// The kind of a [`Transformation`], from least to most general.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TransformKind {
    /// Maps every point to itself.
    Identity,
    /// Shift.
    Translation,
    /// Axis-aligned scaling about the origin.
    Scaling,
    /// Rotation about the origin.
    Rotation,
    /// Linear map plus translation.
    Affine,
    /// Homogeneous 3×3 map.
    Projective,
}

/// A rotation with its sine and cosine cached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    theta: f32,
    sin: f32,
    cos: f32,
}

impl Rotation {
    /// Rotation by `theta` radians, clockwise on screen.
    #[must_use]
    pub fn new(theta: f32) -> Self {
        Self {
            theta,
            sin: theta.sin(),
            cos: theta.cos(),
        }
    }

    /// The angle in radians.
    #[must_use]
    pub const fn theta(&self) -> f32 {
        self.theta
    }
}

/// `(x, y) -> (a11·x + a12·y + tx, a21·x + a22·y + ty)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[allow(missing_docs)]
pub struct Affine {
    pub a11: f32,
    pub a12: f32,
    pub a21: f32,
    pub a22: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Affine {
    const IDENTITY: Self = Self {
        a11: 1.0,
        a12: 0.0,
        a21: 0.0,
        a22: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    /// The map applying `first`, then `self`.
    fn after(&self, first: &Self) -> Self {
        Self {
            a11: self.a11 * first.a11 + self.a12 * first.a21,
            a12: self.a11 * first.a12 + self.a12 * first.a22,
            a21: self.a21 * first.a11 + self.a22 * first.a21,
            a22: self.a21 * first.a12 + self.a22 * first.a22,
            tx: self.a11 * first.tx + self.a12 * first.ty + self.tx,
            ty: self.a21 * first.tx + self.a22 * first.ty + self.ty,
        }
    }

    fn determinant(&self) -> f32 {
        self.a11 * self.a22 - self.a12 * self.a21
    }
}

/// Homogeneous matrix, row-major; points are column vectors `(x, y, 1)`.
pub type Matrix3 = [[f32; 3]; 3];

fn mul(b: &Matrix3, a: &Matrix3) -> Matrix3 {
    let mut m = [[0.0; 3]; 3];
    for (i, row) in m.iter_mut().enumerate() {
        for (j, v) in row.iter_mut().enumerate() {
            *v = b[i][0] * a[0][j] + b[i][1] * a[1][j] + b[i][2] * a[2][j];
        }
    }
    m
}

fn determinant3(m: &Matrix3) -> f32 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

fn singular(determinant: f32) -> Error {
    log::debug!("transformation not invertible: determinant {determinant}");
    Error::SingularTransform { determinant }
}

/// A 2D point mapping.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Transformation {
    /// Maps every point to itself.
    #[default]
    Identity,
    /// `(x + dx, y + dy)`.
    Translation {
        /// Horizontal shift.
        dx: f32,
        /// Vertical shift.
        dy: f32,
    },
    /// `(x·sx, y·sy)`.
    Scaling {
        /// Horizontal factor.
        sx: f32,
        /// Vertical factor.
        sy: f32,
    },
    /// Rotation about the origin.
    Rotation(Rotation),
    /// Linear map plus translation.
    Affine(Affine),
    /// Homogeneous map; results are divided by `w = m31·x + m32·y + m33`.
    Projective(Matrix3),
}

impl Transformation {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Shift by `(dx, dy)`.
    #[must_use]
    pub const fn translate(dx: f32, dy: f32) -> Self {
        Self::Translation { dx, dy }
    }

    /// Scale about the origin.
    #[must_use]
    pub const fn scale(sx: f32, sy: f32) -> Self {
        Self::Scaling { sx, sy }
    }

    /// Scale about `center`.
    #[must_use]
    pub fn scale_about(sx: f32, sy: f32, center: FpPoint) -> Self {
        Self::about(Self::scale(sx, sy), center)
    }

    /// Rotate clockwise by `angle` radians about the origin.
    #[must_use]
    pub fn rotate_right(angle: f32) -> Self {
        Self::Rotation(Rotation::new(angle))
    }

    /// Rotate clockwise by `angle` radians about `center`.
    #[must_use]
    pub fn rotate_right_about(angle: f32, center: FpPoint) -> Self {
        Self::about(Self::rotate_right(angle), center)
    }

    /// Rotate counter-clockwise by `angle` radians about the origin.
    #[must_use]
    pub fn rotate_left(angle: f32) -> Self {
        Self::rotate_right(-angle)
    }

    /// Rotate counter-clockwise by `angle` radians about `center`.
    #[must_use]
    pub fn rotate_left_about(angle: f32, center: FpPoint) -> Self {
        Self::about(Self::rotate_left(angle), center)
    }

    /// A quarter turn clockwise.
    #[must_use]
    pub fn quarter_turn() -> Self {
        Self::rotate_right(FRAC_PI_2)
    }

    /// General affine map.
    #[must_use]
    pub const fn affine(a11: f32, a12: f32, a21: f32, a22: f32, tx: f32, ty: f32) -> Self {
        Self::Affine(Affine {
            a11,
            a12,
            a21,
            a22,
            tx,
            ty,
        })
    }

    /// Shear along both axes: a vertical shear by `sy` followed by a
    /// horizontal shear by `sx`.
    #[must_use]
    pub fn shear(sx: f32, sy: f32) -> Self {
        Self::affine(1.0 + sx * sy, sx, sy, 1.0, 0.0, 0.0)
    }

    /// [`Transformation::shear`] about `base`, which stays fixed.
    #[must_use]
    pub fn shear_about(sx: f32, sy: f32, base: FpPoint) -> Self {
        Self::about(Self::shear(sx, sy), base)
    }

    /// `(x + sx·y, y)`.
    #[must_use]
    pub fn shear_horizontally(sx: f32) -> Self {
        Self::affine(1.0, sx, 0.0, 1.0, 0.0, 0.0)
    }

    /// Horizontal shear keeping `base` fixed.
    #[must_use]
    pub fn shear_horizontally_about(sx: f32, base: FpPoint) -> Self {
        Self::about(Self::shear_horizontally(sx), base)
    }

    /// `(x, y + sy·x)`.
    #[must_use]
    pub fn shear_vertically(sy: f32) -> Self {
        Self::affine(1.0, 0.0, sy, 1.0, 0.0, 0.0)
    }

    /// Vertical shear keeping `base` fixed.
    #[must_use]
    pub fn shear_vertically_about(sy: f32, base: FpPoint) -> Self {
        Self::about(Self::shear_vertically(sy), base)
    }

    /// Perspective divide by `w = px·x + py·y + 1`.
    #[must_use]
    pub fn perspective(px: f32, py: f32) -> Self {
        Self::Projective([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [px, py, 1.0]])
    }

    /// Perspective with `center` as the fixed point.
    #[must_use]
    pub fn perspective_about(px: f32, py: f32, center: FpPoint) -> Self {
        Self::about(Self::perspective(px, py), center)
    }

    /// General projective map from a row-major homogeneous matrix.
    #[must_use]
    pub const fn projective(m: Matrix3) -> Self {
        Self::Projective(m)
    }

    /// `t` conjugated by a translation moving `center` to the origin.
    fn about(t: Self, center: FpPoint) -> Self {
        Self::translate(-center.x, -center.y)
            .then(&t)
            .then(&Self::translate(center.x, center.y))
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// The kind of this transformation.
    #[must_use]
    pub const fn kind(&self) -> TransformKind {
        match self {
            Self::Identity => TransformKind::Identity,
            Self::Translation { .. } => TransformKind::Translation,
            Self::Scaling { .. } => TransformKind::Scaling,
            Self::Rotation(_) => TransformKind::Rotation,
            Self::Affine(_) => TransformKind::Affine,
            Self::Projective(_) => TransformKind::Projective,
        }
    }

    /// The same mapping as an affine one, unless it is projective.
    fn as_affine(&self) -> Option<Affine> {
        let a = match *self {
            Self::Identity => Affine::IDENTITY,
            Self::Translation { dx, dy } => Affine {
                tx: dx,
                ty: dy,
                ..Affine::IDENTITY
            },
            Self::Scaling { sx, sy } => Affine {
                a11: sx,
                a22: sy,
                ..Affine::IDENTITY
            },
            Self::Rotation(r) => Affine {
                a11: r.cos,
                a12: -r.sin,
                a21: r.sin,
                a22: r.cos,
                ..Affine::IDENTITY
            },
            Self::Affine(a) => a,
            Self::Projective(_) => return None,
        };
        Some(a)
    }

    /// The homogeneous matrix of this transformation.
    #[must_use]
    pub fn matrix(&self) -> Matrix3 {
        if let Self::Projective(m) = self {
            return *m;
        }
        let a = self.as_affine().unwrap_or(Affine::IDENTITY);
        [[a.a11, a.a12, a.tx], [a.a21, a.a22, a.ty], [0.0, 0.0, 1.0]]
    }

    /// Map a point.
    #[must_use]
    pub fn apply(&self, p: FpPoint) -> FpPoint {
        let (x, y) = (p.x, p.y);
        match self {
            Self::Identity => p,
            Self::Translation { dx, dy } => FpPoint::new(x + dx, y + dy),
            Self::Scaling { sx, sy } => FpPoint::new(x * sx, y * sy),
            Self::Rotation(r) => FpPoint::new(x * r.cos - y * r.sin, x * r.sin + y * r.cos),
            Self::Affine(a) => FpPoint::new(
                a.a11 * x + a.a12 * y + a.tx,
                a.a21 * x + a.a22 * y + a.ty,
            ),
            Self::Projective(m) => {
                let w = m[2][0] * x + m[2][1] * y + m[2][2];
                FpPoint::new(
                    (m[0][0] * x + m[0][1] * y + m[0][2]) / w,
                    (m[1][0] * x + m[1][1] * y + m[1][2]) / w,
                )
            }
        }
    }

    // ------------------------------------------------------------------
    // Algebra
    // ------------------------------------------------------------------

    /// The transformation applying `self` first, then `next`.
    #[must_use]
    pub fn then(&self, next: &Self) -> Self {
        match (*self, *next) {
            (Self::Identity, t) | (t, Self::Identity) => t,
            (Self::Translation { dx: a, dy: b }, Self::Translation { dx: c, dy: d }) => {
                Self::translate(a + c, b + d)
            }
            (Self::Scaling { sx: a, sy: b }, Self::Scaling { sx: c, sy: d }) => {
                Self::scale(a * c, b * d)
            }
            (Self::Rotation(a), Self::Rotation(b)) => Self::rotate_right(a.theta + b.theta),
            _ => match (self.as_affine(), next.as_affine()) {
                (Some(first), Some(second)) => Self::Affine(second.after(&first)),
                _ => Self::Projective(mul(&next.matrix(), &self.matrix())),
            },
        }
    }

    /// The inverse mapping.
    ///
    /// Fails with [`Error::SingularTransform`] when the determinant is zero
    /// or not finite.
    pub fn inversion(&self) -> Result<Self> {
        match *self {
            Self::Identity => Ok(Self::Identity),
            Self::Translation { dx, dy } => Ok(Self::translate(-dx, -dy)),
            Self::Scaling { sx, sy } => {
                let det = sx * sy;
                if det == 0.0 || !det.is_finite() {
                    return Err(singular(det));
                }
                Ok(Self::scale(1.0 / sx, 1.0 / sy))
            }
            Self::Rotation(r) => Ok(Self::Rotation(Rotation {
                theta: -r.theta,
                sin: -r.sin,
                cos: r.cos,
            })),
            Self::Affine(a) => {
                let det = a.determinant();
                if det == 0.0 || !det.is_finite() {
                    return Err(singular(det));
                }
                let (a11, a12) = (a.a22 / det, -a.a12 / det);
                let (a21, a22) = (-a.a21 / det, a.a11 / det);
                Ok(Self::affine(
                    a11,
                    a12,
                    a21,
                    a22,
                    -(a11 * a.tx + a12 * a.ty),
                    -(a21 * a.tx + a22 * a.ty),
                ))
            }
            Self::Projective(m) => {
                let det = determinant3(&m);
                if det == 0.0 || !det.is_finite() {
                    return Err(singular(det));
                }
                let cof = |r0: usize, r1: usize, c0: usize, c1: usize| {
                    m[r0][c0] * m[r1][c1] - m[r0][c1] * m[r1][c0]
                };
                // Adjugate (transposed cofactors) over the determinant.
                let inv = [
                    [cof(1, 2, 1, 2) / det, -cof(0, 2, 1, 2) / det, cof(0, 1, 1, 2) / det],
                    [-cof(1, 2, 0, 2) / det, cof(0, 2, 0, 2) / det, -cof(0, 1, 0, 2) / det],
                    [cof(1, 2, 0, 1) / det, -cof(0, 2, 0, 1) / det, cof(0, 1, 0, 1) / det],
                ];
                Ok(Self::Projective(inv))
            }
        }
    }

    /// The smallest box containing the image of every point of `rect`.
    ///
    /// Corners are mapped and rounded outward. A mapping that sends a
    /// corner to a non-finite point yields [`Rect::MAXIMUM`].
    #[must_use]
    pub fn transform_extents(&self, rect: Rect) -> Rect {
        if rect.is_empty() {
            return rect;
        }
        let (x0, y0) = (f32::from(rect.x_min), f32::from(rect.y_min));
        let (x1, y1) = (f32::from(rect.x_max), f32::from(rect.y_max));
        let mut min = FpPoint::new(f32::INFINITY, f32::INFINITY);
        let mut max = FpPoint::new(f32::NEG_INFINITY, f32::NEG_INFINITY);
        for (x, y) in [(x0, y0), (x1, y0), (x0, y1), (x1, y1)] {
            let p = self.apply(FpPoint::new(x, y));
            if !p.is_finite() {
                log::debug!("{:?} sends ({x}, {y}) to a non-finite point", self.kind());
                return Rect::MAXIMUM;
            }
            min = FpPoint::new(min.x.min(p.x), min.y.min(p.y));
            max = FpPoint::new(max.x.max(p.x), max.y.max(p.y));
        }
        Rect::new(
            min.x.floor() as i16,
            min.y.floor() as i16,
            max.x.ceil() as i16,
            max.y.ceil() as i16,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::PI;

    fn p(x: f32, y: f32) -> FpPoint {
        FpPoint::new(x, y)
    }

    fn assert_maps(t: &Transformation, from: FpPoint, to: FpPoint) {
        let got = t.apply(from);
        assert_relative_eq!(got.x, to.x, epsilon = 1e-4);
        assert_relative_eq!(got.y, to.y, epsilon = 1e-4);
    }

    #[test]
    fn test_translate_then_scale() {
        let t = Transformation::translate(1.0, 2.0).then(&Transformation::scale(3.0, 4.0));
        assert_eq!(t.kind(), TransformKind::Affine);
        assert_maps(&t, p(5.0, 6.0), p(18.0, 32.0));
    }

    #[test]
    fn test_scale_then_rotate() {
        let t = Transformation::scale(2.0, 3.0).then(&Transformation::rotate_right(PI / 2.0));
        assert_maps(&t, p(1.0, 2.0), p(-6.0, 2.0));
    }

    #[test]
    fn test_perspective() {
        let t = Transformation::perspective(0.25, 0.1);
        assert_maps(&t, p(2.0, 4.0), p(1.052_631_6, 2.105_263_2));
    }

    #[test]
    fn test_perspective_about() {
        let t = Transformation::perspective_about(0.1, 0.0, p(3.0, 0.0));
        assert_eq!(t.kind(), TransformKind::Projective);
        assert_maps(&t, p(4.0, 2.0), p(3.909_091, 1.818_181_8));
        assert_maps(&t, p(3.0, 0.0), p(3.0, 0.0));
    }

    #[test]
    fn test_projective() {
        let t = Transformation::projective([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.1, 0.0, 1.0]]);
        assert_maps(&t, p(2.0, 1.0), p(1.666_666_6, 0.833_333_3));
    }

    #[test]
    fn test_same_kind_compositions_stay_simple() {
        let t = Transformation::translate(1.0, 2.0).then(&Transformation::translate(3.0, -1.0));
        assert_eq!(t, Transformation::translate(4.0, 1.0));
        let s = Transformation::scale(2.0, 3.0).then(&Transformation::scale(0.5, 2.0));
        assert_eq!(s, Transformation::scale(1.0, 6.0));
        let r = Transformation::rotate_right(0.3).then(&Transformation::rotate_left(0.1));
        assert_eq!(r.kind(), TransformKind::Rotation);
        assert_maps(&r, p(1.0, 0.0), p(0.2f32.cos(), 0.2f32.sin()));
        let i = Transformation::Identity.then(&Transformation::shear(0.5, 0.0));
        assert_eq!(i, Transformation::shear(0.5, 0.0));
    }

    #[test]
    fn test_translation_then_affine_maps_y() {
        let a = Transformation::affine(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        let t = Transformation::translate(1.5, -2.0).then(&a);
        // Same as applying both in turn.
        assert_maps(&t, p(2.0, 3.0), a.apply(p(3.5, 1.0)));
    }

    #[test]
    fn test_about_helpers_keep_center_fixed() {
        let c = p(7.0, -3.0);
        for t in [
            Transformation::scale_about(2.0, 0.5, c),
            Transformation::rotate_right_about(1.1, c),
            Transformation::rotate_left_about(0.4, c),
            Transformation::shear_about(0.3, -0.2, c),
            Transformation::shear_horizontally_about(0.7, c),
            Transformation::shear_vertically_about(-0.7, c),
        ] {
            assert_maps(&t, c, c);
        }
    }

    #[test]
    fn test_shears() {
        assert_maps(&Transformation::shear_horizontally(0.5), p(2.0, 4.0), p(4.0, 4.0));
        assert_maps(&Transformation::shear_vertically(0.5), p(2.0, 4.0), p(2.0, 5.0));
        let both = Transformation::shear_vertically(0.25).then(&Transformation::shear_horizontally(0.5));
        assert_maps(&Transformation::shear(0.5, 0.25), p(2.0, 4.0), both.apply(p(2.0, 4.0)));
    }

    #[test]
    fn test_rotate_left_undoes_right() {
        let t = Transformation::rotate_right(0.7).then(&Transformation::rotate_left(0.7));
        assert_maps(&t, p(3.0, -4.0), p(3.0, -4.0));
        assert_maps(&Transformation::quarter_turn(), p(1.0, 0.0), p(0.0, 1.0));
    }

    #[test]
    fn test_singular_inversion_fails() {
        for t in [
            Transformation::scale(0.0, 2.0),
            Transformation::affine(1.0, 2.0, 2.0, 4.0, 0.0, 0.0),
            Transformation::projective([[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [0.0, 0.0, 1.0]]),
            Transformation::affine(f32::NAN, 0.0, 0.0, 1.0, 0.0, 0.0),
        ] {
            let err = t.inversion();
            assert!(matches!(err, Err(Error::SingularTransform { .. })), "{t:?}");
        }
    }

    #[test]
    fn test_inversions_round_trip() {
        let q = p(3.5, -1.25);
        for t in [
            Transformation::Identity,
            Transformation::translate(4.0, -2.0),
            Transformation::scale(2.0, -0.5),
            Transformation::rotate_right(0.9),
            Transformation::affine(1.0, 0.5, -0.25, 2.0, 3.0, 1.0),
            Transformation::perspective_about(0.02, -0.01, p(1.0, 1.0)),
        ] {
            let inv = t.inversion().expect("invertible");
            assert_eq!(inv.kind(), t.kind());
            assert_maps(&inv, t.apply(q), q);
        }
    }

    #[test]
    fn test_extents_round_outward() {
        let t = Transformation::translate(0.5, -0.25);
        assert_eq!(t.transform_extents(Rect::new(0, 0, 10, 4)), Rect::new(0, -1, 11, 4));
        let s = Transformation::scale(2.0, -1.0);
        assert_eq!(s.transform_extents(Rect::new(0, 0, 10, 4)), Rect::new(0, -4, 20, 0));
        assert_eq!(t.transform_extents(Rect::EMPTY), Rect::EMPTY);
    }

    #[test]
    fn test_extents_non_finite_is_maximum() {
        // w = 0 at x = -1.
        let t = Transformation::perspective(1.0, 0.0);
        assert_eq!(t.transform_extents(Rect::new(-1, 0, 5, 5)), Rect::MAXIMUM);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_transform() -> impl Strategy<Value = Transformation> {
        prop_oneof![
            Just(Transformation::Identity),
            (-50.0f32..50.0, -50.0f32..50.0).prop_map(|(dx, dy)| Transformation::translate(dx, dy)),
            (-4.0f32..4.0, -4.0f32..4.0).prop_map(|(sx, sy)| Transformation::scale(sx, sy)),
            (-7.0f32..7.0).prop_map(Transformation::rotate_right),
            (
                -3.0f32..3.0,
                -3.0f32..3.0,
                -3.0f32..3.0,
                -3.0f32..3.0,
                -20.0f32..20.0,
                -20.0f32..20.0
            )
                .prop_map(|(a, b, c, d, e, f)| Transformation::affine(a, b, c, d, e, f)),
            (-0.002f32..0.002, -0.002f32..0.002, -10.0f32..10.0, -10.0f32..10.0)
                .prop_map(|(px, py, x, y)| Transformation::perspective_about(px, py, FpPoint::new(x, y))),
        ]
    }

    fn close(a: FpPoint, b: FpPoint, rel: f32) -> bool {
        let tol = |v: f32| rel * v.abs().max(1.0);
        (a.x - b.x).abs() <= tol(b.x) && (a.y - b.y).abs() <= tol(b.y)
    }

    proptest! {
        /// Composition agrees with applying both in turn, for every pair of
        /// kinds.
        #[test]
        fn prop_then_matches_sequential_apply(
            a in arb_transform(),
            b in arb_transform(),
            x in -20.0f32..20.0,
            y in -20.0f32..20.0,
        ) {
            let q = FpPoint::new(x, y);
            let expected = b.apply(a.apply(q));
            prop_assume!(expected.is_finite());
            let got = a.then(&b).apply(q);
            prop_assert!(close(got, expected, 1e-3), "{:?} then {:?}: {:?} vs {:?}", a, b, got, expected);
        }

        /// Inverses undo their transformation.
        #[test]
        fn prop_inversion_round_trip(
            t in arb_transform(),
            x in -20.0f32..20.0,
            y in -20.0f32..20.0,
        ) {
            let det = determinant3(&t.matrix());
            prop_assume!(det.abs() > 0.5);
            let inv = t.inversion().expect("non-singular");
            let q = FpPoint::new(x, y);
            let back = inv.apply(t.apply(q));
            prop_assert!(close(back, q, 5e-3), "{:?}: {:?} -> {:?}", t, q, back);
        }

        /// The mapped extents contain the image of every interior point.
        #[test]
        fn prop_extents_contain_samples(
            t in arb_transform(),
            x0 in -30i16..30,
            y0 in -30i16..30,
            w in 0i16..40,
            h in 0i16..40,
            fx in 0.0f32..=1.0,
            fy in 0.0f32..=1.0,
        ) {
            let rect = Rect::new(x0, y0, x0 + w, y0 + h);
            let ext = t.transform_extents(rect);
            let q = FpPoint::new(
                f32::from(x0) + fx * f32::from(w),
                f32::from(y0) + fy * f32::from(h),
            );
            let m = t.apply(q);
            prop_assume!(m.is_finite() && ext != Rect::MAXIMUM);
            let slack = 1e-3 * m.x.abs().max(m.y.abs()).max(1.0);
            prop_assert!(m.x >= f32::from(ext.x_min) - slack && m.x <= f32::from(ext.x_max) + slack);
            prop_assert!(m.y >= f32::from(ext.y_min) - slack && m.y <= f32::from(ext.y_max) + slack);
        }
    }
}
