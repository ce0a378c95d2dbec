//! Transformed pixel sources drawn into framebuffers.
//!
//! Run: cargo test --test transform_raster_test

#![allow(clippy::unwrap_used)]

use approx::assert_relative_eq;
use proptest::prelude::*;
use std::f32::consts::FRAC_PI_2;
use trueno_shapes::prelude::*;
use trueno_shapes::transform::TransformKind;

fn draw_into(fb: &mut Framebuffer, object: &dyn Drawable, dx: i16, dy: i16) {
    let bounds = fb.bounds();
    Surface::new(fb, bounds).with_offset(dx, dy).draw_object(object);
}

fn checkerboard(width: u32, height: u32) -> Framebuffer {
    let mut fb = Framebuffer::new(width, height).unwrap();
    for y in 0..height {
        for x in 0..width {
            let c = if (x + y) % 2 == 0 {
                Rgba::rgb((x * 20) as u8, (y * 20) as u8, 255)
            } else {
                Rgba::BLACK
            };
            fb.set_pixel(x, y, c);
        }
    }
    fb
}

#[test]
fn test_integer_translation_matches_offset_draw() {
    let shape = SmoothShape::thick_arc(
        FpPoint::new(12.0, 12.0),
        9.0,
        3.0,
        -1.0,
        2.0,
        Rgba::RED,
        EndingStyle::Rounded,
    );
    let moved = TransformedRaster::new(&shape, &Transformation::translate(7.0, 4.0)).unwrap();

    let mut via_transform = Framebuffer::new(40, 40).unwrap();
    draw_into(&mut via_transform, &moved, 0, 0);
    let mut via_offset = Framebuffer::new(40, 40).unwrap();
    draw_into(&mut via_offset, &shape, 7, 4);

    assert_eq!(via_transform.pixels(), via_offset.pixels());
}

#[test]
fn test_mirror_framebuffer() {
    let src = checkerboard(6, 4);
    let flip = Transformation::scale(-1.0, 1.0).then(&Transformation::translate(5.0, 0.0));
    assert_eq!(flip.kind(), TransformKind::Affine);

    let mirrored = TransformedRaster::new(&src, &flip).unwrap();
    assert_eq!(mirrored.extents(), src.extents());

    let mut dst = Framebuffer::new(6, 4).unwrap();
    draw_into(&mut dst, &mirrored, 0, 0);
    for y in 0..4 {
        for x in 0..6 {
            assert_eq!(dst.get_pixel(x, y), src.get_pixel(5 - x, y), "({x}, {y})");
        }
    }
}

#[test]
fn test_composed_quarter_turns_return_home() {
    let center = FpPoint::new(10.0, 10.0);
    let quarter = Transformation::rotate_right_about(FRAC_PI_2, center);
    let full = quarter.then(&quarter).then(&quarter).then(&quarter);
    for p in [FpPoint::new(3.0, 4.0), FpPoint::new(17.5, -2.0), center] {
        let q = full.apply(p);
        assert_relative_eq!(q.x, p.x, epsilon = 1e-3);
        assert_relative_eq!(q.y, p.y, epsilon = 1e-3);
    }
}

#[test]
fn test_scaled_shape_covers_scaled_extents() {
    let disc = SmoothShape::filled_circle(FpPoint::new(5.0, 5.0), 4.0, Rgba::BLUE);
    let zoom = Transformation::scale(3.0, 3.0);
    let big = TransformedRaster::new(&disc, &zoom).unwrap();
    assert_eq!(big.extents(), zoom.transform_extents(disc.extents()));

    let mut fb = Framebuffer::new(40, 40).unwrap();
    draw_into(&mut fb, &big, 0, 0);
    assert_eq!(fb.get_pixel(15, 15), Some(Rgba::BLUE));
    assert_eq!(fb.get_pixel(39, 39), Some(Rgba::TRANSPARENT));
    assert_eq!(fb.get_pixel(1, 1), Some(Rgba::TRANSPARENT));
}

#[test]
fn test_perspective_source_stays_within_extents() {
    let src = checkerboard(12, 12);
    let t = Transformation::perspective_about(0.01, 0.0, FpPoint::new(6.0, 6.0))
        .then(&Transformation::translate(10.0, 10.0));
    let warped = TransformedRaster::new(&src, &t).unwrap();
    let extents = warped.extents();

    let mut fb = Framebuffer::new(48, 48).unwrap();
    draw_into(&mut fb, &warped, 0, 0);
    for y in 0..48u32 {
        for x in 0..48u32 {
            if fb.get_pixel(x, y) != Some(Rgba::TRANSPARENT) {
                assert!(extents.contains(x as i16, y as i16), "({x}, {y})");
            }
        }
    }
}

#[test]
fn test_singular_transform_is_rejected() {
    let src = checkerboard(4, 4);
    let flat = Transformation::affine(1.0, 2.0, 2.0, 4.0, 0.0, 0.0);
    assert!(matches!(
        TransformedRaster::new(&src, &flat),
        Err(Error::SingularTransform { .. })
    ));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_integer_translation_is_exact(dx in -8i16..8, dy in -8i16..8) {
        let src = checkerboard(8, 8);
        let moved = TransformedRaster::new(
            &src,
            &Transformation::translate(f32::from(dx), f32::from(dy)),
        ).unwrap();
        let mut c = [Rgba::TRANSPARENT];
        for y in 0..8i16 {
            for x in 0..8i16 {
                moved.read_colors(&[x + dx], &[y + dy], &mut c);
                prop_assert_eq!(Some(c[0]), src.get_pixel(x as u32, y as u32));
            }
        }
    }

    #[test]
    fn prop_inverse_undoes_composition(
        a in -2.0f32..2.0, b in -2.0f32..2.0,
        tx in -20.0f32..20.0, ty in -20.0f32..20.0,
        theta in -3.0f32..3.0,
    ) {
        let t = Transformation::affine(1.5 + a.abs(), b * 0.2, a * 0.2, 1.5 + b.abs(), tx, ty)
            .then(&Transformation::rotate_left(theta));
        let inv = t.inversion().unwrap();
        let p = FpPoint::new(7.0, -3.0);
        let q = t.then(&inv).apply(p);
        prop_assert!((q.x - p.x).abs() < 1e-2 && (q.y - p.y).abs() < 1e-2, "{q:?}");
    }
}
