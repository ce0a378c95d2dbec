//! Lines whose width varies linearly between the endpoints.

use super::{ceil_i16, floor_i16, with_alpha, EndingStyle, SmoothKind, SmoothShape};
use crate::color::Rgba;
use crate::geometry::{FpPoint, Rect};

#[derive(Debug, Clone, PartialEq)]
pub(super) struct Wedge {
    ax: f32,
    ay: f32,
    /// Outer radius at `a`, including the half-pixel band.
    r: f32,
    /// Radius decrease from `a` to `b`.
    dr: f32,
    bax: f32,
    bay: f32,
    /// Squared segment length.
    hd: f32,
    sqrt_hd: f32,
    color: Rgba,
    round: bool,
}

pub(super) fn wedged_line(
    a: FpPoint,
    width_a: f32,
    b: FpPoint,
    width_b: f32,
    color: Rgba,
    ending: EndingStyle,
) -> SmoothShape {
    let width_a = width_a.max(0.0);
    let width_b = width_b.max(0.0);
    if width_a == 0.0 && width_b == 0.0 {
        return SmoothShape::EMPTY;
    }
    let ar = width_a * 0.5;
    let br = width_b * 0.5;
    let round = ending == EndingStyle::Rounded;
    if round {
        let dist = a.distance(b);
        if ar + dist <= br {
            return SmoothShape::filled_circle(b, br, color);
        }
        if br + dist <= ar {
            return SmoothShape::filled_circle(a, ar, color);
        }
    }
    if a == b {
        return SmoothShape::EMPTY;
    }

    // Pixel centers farther than r + 0.5 from the axis get no coverage.
    let (ae, be) = (ar - 0.5, br - 0.5);
    let extents = Rect::new(
        floor_i16((a.x - ae).min(b.x - be)),
        floor_i16((a.y - ae).min(b.y - be)),
        ceil_i16((a.x + ae).max(b.x + be)),
        ceil_i16((a.y + ae).max(b.y + be)),
    );
    let bax = b.x - a.x;
    let bay = b.y - a.y;
    let hd = bax * bax + bay * bay;
    SmoothShape {
        extents,
        kind: SmoothKind::Wedge(Wedge {
            ax: a.x,
            ay: a.y,
            r: ar + 0.5,
            dr: ar - br,
            bax,
            bay,
            hd,
            sqrt_hd: hd.sqrt(),
            color,
            round,
        }),
    }
}

impl Wedge {
    pub(super) fn color_at(&self, x: i16, y: i16) -> Rgba {
        let alpha = self.alpha(f32::from(x) - self.ax, f32::from(y) - self.ay);
        with_alpha(alpha, self.color)
    }

    /// Alpha at the offset `(xpax, ypay)` from `a`.
    fn alpha(&self, xpax: f32, ypay: f32) -> u8 {
        let max = f32::from(self.color.a);
        let hn = xpax * self.bax + ypay * self.bay;
        let t = hn / self.hd;
        let h = t.clamp(0.0, 1.0);
        let dx = xpax - self.bax * h;
        let dy = ypay - self.bay * h;
        let l_sq = dx * dx + dy * dy;
        let adj = self.r - h * self.dr;
        if adj * adj < l_sq {
            return 0;
        }
        if !self.round {
            // Distance past each flat end, along the axis.
            for d in [t * self.sqrt_hd, (1.0 - t) * self.sqrt_hd] {
                if d < 0.5 {
                    if d < -0.5 {
                        return 0;
                    }
                    return ((adj - l_sq.sqrt()).min(d + 0.5) * max) as u8;
                }
            }
        }
        if adj < 1.0 {
            // Thinner than a pixel: coverage is bounded by the width.
            let l = l_sq.sqrt();
            let d = if l + adj < 1.0 { 2.0 * adj - 1.0 } else { adj - l };
            return (d.max(0.0) * max) as u8;
        }
        if adj * adj - 2.0 * adj + 1.0 > l_sq {
            return self.color.a;
        }
        ((adj - l_sq.sqrt()) * max) as u8
    }
}
