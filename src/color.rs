//! Color types and compositing.
//!
//! Provides the straight-alpha [`Rgba`] color, the integer source-over blend
//! used by every shape draw, the alpha-weighted interpolation used for
//! bilinear resampling, and the Porter-Duff [`BlendingMode`] set applied by
//! pixel sinks.
//!
//! # References
//!
//! - Porter, T., & Duff, T. (1984). "Compositing Digital Images."
//!   SIGGRAPH '84.

/// RGBA color with 8-bit components (straight, not premultiplied, alpha).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(C)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Opaque red.
    pub const RED: Self = Self::new(255, 0, 0, 255);
    /// Opaque green.
    pub const GREEN: Self = Self::new(0, 255, 0, 255);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0, 0, 255, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create a color with modified alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Returns true if alpha is 255.
    #[must_use]
    pub const fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// Returns true if alpha is 0.
    #[must_use]
    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Convert to array representation.
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Create from array representation.
    #[must_use]
    pub const fn from_array(arr: [u8; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }
}

// ============================================================================
// Integer Source-Over
// ============================================================================

#[inline]
const fn div255(x: u32) -> u32 {
    (x * 257) >> 16
}

#[inline]
const fn div255_round(x: u32) -> u32 {
    div255(x + 128)
}

#[inline]
const fn div65280_round(x: u32) -> u32 {
    let x = x + 32640;
    ((x >> 8) + (x >> 16)) >> 8
}

/// Composite `src` over `dst` (source-over), in integer arithmetic.
///
/// Fully opaque and fully transparent operands short-circuit. An opaque
/// destination stays opaque.
#[must_use]
pub fn alpha_blend(dst: Rgba, src: Rgba) -> Rgba {
    if src.a == 255 {
        return src;
    }
    if src.a == 0 {
        return dst;
    }
    let sa = u32::from(src.a);
    if dst.a == 255 {
        let mix = |s: u8, d: u8| -> u8 {
            div255_round(sa * u32::from(s) + (255 - sa) * u32::from(d)) as u8
        };
        return Rgba::new(mix(src.r, dst.r), mix(src.g, dst.g), mix(src.b, dst.b), 255);
    }
    if dst.a == 0 {
        return src;
    }
    let da = u32::from(dst.a);
    let a16 = da * 255 + sa * (255 - da);
    let alpha = div255_round(a16) as u8;
    // Source weight out of 65280 (256 * 255).
    let cs = ((65280u64 * 255 * u64::from(sa) + u64::from(a16 / 2) + 1) / u64::from(a16))
        .min(65280) as u32;
    let cd = 65280 - cs;
    let mix = |s: u8, d: u8| -> u8 { div65280_round(cs * u32::from(s) + cd * u32::from(d)) as u8 };
    Rgba::new(mix(src.r, dst.r), mix(src.g, dst.g), mix(src.b, dst.b), alpha)
}

/// Interpolate between two colors, weighting by alpha.
///
/// `fraction` is the weight of `c2` out of 256 and is clamped to `0..=256`.
/// A fully transparent endpoint contributes alpha but not color, so blending
/// toward transparency does not darken edges.
#[must_use]
pub fn interpolate(c1: Rgba, c2: Rgba, fraction: i16) -> Rgba {
    let mut f2 = i32::from(fraction).clamp(0, 256) as u32;
    let mut f1 = 256 - f2;
    let a1 = u32::from(c1.a);
    let a2 = u32::from(c2.a);
    let a_mult = a1 * f1 + a2 * f2;
    let alpha = (a_mult >> 8) as u8;
    if a1 != a2 {
        if a1 == 0 {
            f1 = 0;
            f2 = 256;
        } else if a2 == 0 {
            f1 = 256;
            f2 = 0;
        } else {
            f2 = 256 * f2 * a2 / a_mult;
            f1 = 256 - f2;
        }
    }
    let mix = |x: u8, y: u8| -> u8 { ((u32::from(x) * f1 + u32::from(y) * f2) >> 8) as u8 };
    Rgba::new(mix(c1.r, c2.r), mix(c1.g, c2.g), mix(c1.b, c2.b), alpha)
}

// ============================================================================
// Blending Modes
// ============================================================================

/// How a written color combines with the existing destination pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendingMode {
    /// Replace the destination.
    Source,
    /// Composite the source over the destination.
    #[default]
    SourceOver,
    /// Source-over, assuming the destination is opaque.
    SourceOverOpaque,
    /// Source where the destination is present.
    SourceIn,
    /// Source where the destination is absent.
    SourceOut,
    /// Source inside the destination, destination elsewhere.
    SourceAtop,
    /// Keep the destination.
    Destination,
    /// Composite the destination over the source.
    DestinationOver,
    /// Destination where the source is present.
    DestinationIn,
    /// Destination where the source is absent.
    DestinationOut,
    /// Destination inside the source, source elsewhere.
    DestinationAtop,
    /// Clear to transparent.
    Clear,
    /// Source and destination where they do not overlap.
    Xor,
}

impl BlendingMode {
    /// Combine `src` with `dst` under this mode.
    #[must_use]
    pub fn blend(self, dst: Rgba, src: Rgba) -> Rgba {
        match self {
            Self::Source => src,
            Self::Destination => dst,
            Self::Clear => Rgba::TRANSPARENT,
            Self::SourceOver => alpha_blend(dst, src),
            Self::SourceOverOpaque => alpha_blend(dst.with_alpha(255), src),
            Self::DestinationOver => alpha_blend(src, dst),
            _ => self.porter_duff(dst, src),
        }
    }

    /// Generic Porter-Duff evaluation with per-operand weights.
    fn porter_duff(self, dst: Rgba, src: Rgba) -> Rgba {
        let sa = f32::from(src.a) / 255.0;
        let da = f32::from(dst.a) / 255.0;
        let (fs, fd) = match self {
            Self::SourceIn => (da, 0.0),
            Self::SourceOut => (1.0 - da, 0.0),
            Self::SourceAtop => (da, 1.0 - sa),
            Self::DestinationIn => (0.0, sa),
            Self::DestinationOut => (0.0, 1.0 - sa),
            Self::DestinationAtop => (1.0 - da, sa),
            Self::Xor => (1.0 - da, 1.0 - sa),
            Self::Source => (1.0, 0.0),
            Self::Destination => (0.0, 1.0),
            Self::Clear => (0.0, 0.0),
            Self::SourceOver | Self::SourceOverOpaque => (1.0, 1.0 - sa),
            Self::DestinationOver => (1.0 - da, 1.0),
        };
        let out_a = fs * sa + fd * da;
        if out_a <= 0.0 {
            return Rgba::TRANSPARENT;
        }
        let mix = |s: u8, d: u8| -> u8 {
            let v = (fs * sa * f32::from(s) + fd * da * f32::from(d)) / out_a;
            v.round().clamp(0.0, 255.0) as u8
        };
        Rgba::new(
            mix(src.r, dst.r),
            mix(src.g, dst.g),
            mix(src.b, dst.b),
            (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_constants() {
        assert_eq!(Rgba::BLACK, Rgba::rgb(0, 0, 0));
        assert_eq!(Rgba::WHITE, Rgba::rgb(255, 255, 255));
        assert_eq!(Rgba::RED.r, 255);
        assert_eq!(Rgba::GREEN.g, 255);
        assert_eq!(Rgba::BLUE.b, 255);
        assert!(Rgba::TRANSPARENT.is_transparent());
        assert!(Rgba::RED.is_opaque());
    }

    #[test]
    fn test_array_conversion() {
        let c = Rgba::new(1, 2, 3, 4);
        assert_eq!(Rgba::from_array(c.to_array()), c);
    }

    #[test]
    fn test_alpha_blend_short_circuits() {
        let dst = Rgba::new(10, 20, 30, 40);
        assert_eq!(alpha_blend(dst, Rgba::RED), Rgba::RED);
        assert_eq!(alpha_blend(dst, Rgba::TRANSPARENT), dst);
        let src = Rgba::new(200, 100, 50, 128);
        assert_eq!(alpha_blend(Rgba::TRANSPARENT, src), src);
    }

    #[test]
    fn test_alpha_blend_over_opaque() {
        let c = alpha_blend(Rgba::BLACK, Rgba::WHITE.with_alpha(128));
        assert_eq!(c.a, 255);
        assert_eq!(c.r, 128);
        assert_eq!(c.g, 128);
    }

    #[test]
    fn test_alpha_blend_translucent_both() {
        let c = alpha_blend(Rgba::BLUE.with_alpha(128), Rgba::RED.with_alpha(128));
        // 1 - (1 - 0.5)^2 = 0.75
        assert!((i32::from(c.a) - 191).abs() <= 1);
        assert!(c.r > c.b);
    }

    #[test]
    fn test_interpolate_endpoints() {
        let a = Rgba::new(0, 0, 0, 255);
        let b = Rgba::new(200, 100, 50, 255);
        assert_eq!(interpolate(a, b, 0), a);
        let end = interpolate(a, b, 256);
        assert_eq!(end, b);
        let mid = interpolate(a, b, 128);
        assert_eq!(mid, Rgba::new(100, 50, 25, 255));
    }

    #[test]
    fn test_interpolate_toward_transparent_keeps_color() {
        let c = interpolate(Rgba::RED, Rgba::TRANSPARENT, 128);
        assert_eq!(c.r, 255);
        assert_eq!(c.g, 0);
        assert_eq!(c.a, 127);
    }

    #[test]
    fn test_blending_modes_basic() {
        let dst = Rgba::BLUE;
        let src = Rgba::RED.with_alpha(128);
        assert_eq!(BlendingMode::Source.blend(dst, src), src);
        assert_eq!(BlendingMode::Destination.blend(dst, src), dst);
        assert_eq!(BlendingMode::Clear.blend(dst, src), Rgba::TRANSPARENT);
        assert_eq!(
            BlendingMode::SourceOver.blend(dst, src),
            alpha_blend(dst, src)
        );
        assert_eq!(
            BlendingMode::SourceOverOpaque.blend(dst.with_alpha(0), src).a,
            255
        );
    }

    #[test]
    fn test_porter_duff_modes() {
        let dst = Rgba::BLUE;
        let src = Rgba::RED;
        assert_eq!(BlendingMode::SourceIn.blend(dst, src), Rgba::RED);
        assert_eq!(BlendingMode::SourceIn.blend(Rgba::TRANSPARENT, src).a, 0);
        assert_eq!(BlendingMode::SourceOut.blend(dst, src).a, 0);
        assert_eq!(BlendingMode::SourceAtop.blend(dst, src), Rgba::RED);
        assert_eq!(BlendingMode::DestinationIn.blend(dst, src), Rgba::BLUE);
        assert_eq!(BlendingMode::DestinationOut.blend(dst, src).a, 0);
        assert_eq!(BlendingMode::DestinationAtop.blend(dst, src), Rgba::BLUE);
        assert_eq!(BlendingMode::Xor.blend(dst, src).a, 0);
        assert_eq!(
            BlendingMode::DestinationOver.blend(Rgba::TRANSPARENT, src),
            src
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn rgba() -> impl Strategy<Value = Rgba> {
        any::<[u8; 4]>().prop_map(Rgba::from_array)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        /// Source-over never lowers coverage.
        #[test]
        fn prop_blend_alpha_monotone(dst in rgba(), src in rgba()) {
            let out = alpha_blend(dst, src);
            prop_assert!(out.a >= dst.a.max(src.a).saturating_sub(1));
        }

        /// Blending over an opaque destination stays opaque.
        #[test]
        fn prop_blend_over_opaque(dst in rgba(), src in rgba()) {
            let out = alpha_blend(dst.with_alpha(255), src);
            prop_assert_eq!(out.a, 255);
        }

        /// Interpolated alpha lies between the endpoint alphas.
        #[test]
        fn prop_interpolate_alpha_bounded(c1 in rgba(), c2 in rgba(), f in 0i16..=256) {
            let out = interpolate(c1, c2, f);
            prop_assert!(out.a >= c1.a.min(c2.a).saturating_sub(1));
            prop_assert!(out.a <= c1.a.max(c2.a));
        }
    }
}
