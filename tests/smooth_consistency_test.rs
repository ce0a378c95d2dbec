//! Anti-aliased shapes: the tiled blit must agree with per-pixel queries.
//!
//! Run: cargo test --test smooth_consistency_test

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use std::f32::consts::PI;
use trueno_shapes::color::alpha_blend;
use trueno_shapes::prelude::*;

const SIZE: u32 = 64;

fn render(shape: &SmoothShape, config: RasterConfig, dx: i16, dy: i16) -> Framebuffer {
    let mut fb = Framebuffer::new(SIZE, SIZE).unwrap();
    fb.clear(Rgba::WHITE);
    let bounds = fb.bounds();
    {
        let mut s = Surface::new(&mut fb, bounds)
            .with_offset(dx, dy)
            .with_config(config);
        s.draw_object(shape);
    }
    fb
}

/// Every framebuffer pixel equals white with the shape's own per-pixel
/// color composited on top.
fn assert_matches_per_pixel(shape: &SmoothShape, fb: &Framebuffer, dx: i16, dy: i16) {
    for y in 0..SIZE as i16 {
        for x in 0..SIZE as i16 {
            let mut c = [Rgba::TRANSPARENT];
            shape.read_colors_or(&[x - dx], &[y - dy], &mut c, Rgba::TRANSPARENT);
            let expected = alpha_blend(Rgba::WHITE, c[0]);
            assert_eq!(
                fb.get_pixel(x as u32, y as u32),
                Some(expected),
                "pixel ({x}, {y})"
            );
        }
    }
}

fn gallery() -> Vec<SmoothShape> {
    let c = FpPoint::new(32.0, 32.0);
    let red = Rgba::RED;
    let blue = Rgba::new(0, 0, 255, 200);
    vec![
        SmoothShape::filled_circle(c, 20.0, red),
        SmoothShape::thick_circle(c, 18.0, 5.0, blue, Rgba::GREEN),
        SmoothShape::circle(c, 10.5, red, Rgba::TRANSPARENT),
        SmoothShape::line(FpPoint::new(3.0, 5.0), FpPoint::new(60.0, 41.0), red),
        SmoothShape::thick_line(
            FpPoint::new(8.0, 56.0),
            FpPoint::new(50.0, 10.0),
            7.0,
            blue,
            EndingStyle::Rounded,
        ),
        SmoothShape::wedged_line(
            FpPoint::new(10.0, 32.0),
            12.0,
            FpPoint::new(54.0, 30.0),
            2.0,
            red,
            EndingStyle::Flat,
        ),
        SmoothShape::rotated_filled_rect(c, 30.0, 14.0, 0.4, red),
        SmoothShape::thick_round_rect(6.0, 8.0, 58.0, 50.0, 9.0, 4.0, red, Rgba::BLUE),
        SmoothShape::filled_round_rect(10.5, 12.5, 40.2, 55.7, 6.0, blue),
        SmoothShape::arc(c, 24.0, -PI / 3.0, 2.0 * PI / 3.0, red),
        SmoothShape::thick_arc(c, 22.0, 8.0, 0.3, 4.0, blue, EndingStyle::Rounded),
        SmoothShape::pie(c, 25.0, 1.0, 2.5, red),
        SmoothShape::thick_arc_with_background(
            c,
            26.0,
            6.0,
            -1.0,
            1.5,
            red,
            Rgba::new(200, 200, 200, 255),
            Rgba::TRANSPARENT,
            EndingStyle::Flat,
        ),
        SmoothShape::filled_triangle(
            FpPoint::new(4.0, 60.0),
            FpPoint::new(31.5, 3.2),
            FpPoint::new(60.0, 48.0),
            red,
        ),
    ]
}

#[test]
fn test_gallery_matches_per_pixel() {
    for shape in gallery() {
        let fb = render(&shape, RasterConfig::default(), 0, 0);
        assert_matches_per_pixel(&shape, &fb, 0, 0);
    }
}

#[test]
fn test_gallery_with_offset() {
    for shape in gallery() {
        let fb = render(&shape, RasterConfig::default(), -7, 5);
        assert_matches_per_pixel(&shape, &fb, -7, 5);
    }
}

#[test]
fn test_config_does_not_change_output() {
    let small = RasterConfig::new()
        .with_tile_size(3)
        .with_pixel_batch(5)
        .with_fill_batch(2);
    for shape in gallery() {
        let default = render(&shape, RasterConfig::default(), 0, 0);
        let tuned = render(&shape, small, 0, 0);
        assert_eq!(default.pixels(), tuned.pixels());
    }
}

#[test]
fn test_rectangle_mode_owns_extents() {
    let shape = SmoothShape::filled_circle(FpPoint::new(20.0, 20.0), 8.0, Rgba::RED);
    let mut fb = Framebuffer::new(SIZE, SIZE).unwrap();
    fb.clear(Rgba::BLACK);
    {
        let mut s = Surface::new(&mut fb, Rect::new(0, 0, 63, 63))
            .with_bgcolor(Rgba::WHITE)
            .with_fill_mode(FillMode::Rectangle);
        s.draw_object(&shape);
    }
    let e = shape.extents();
    assert_eq!(fb.get_pixel(e.x_min as u32, e.y_min as u32), Some(Rgba::WHITE));
    assert_eq!(fb.get_pixel(20, 20), Some(Rgba::RED));
    assert_eq!(fb.get_pixel(e.x_max as u32 + 1, 20), Some(Rgba::BLACK));
}

#[test]
fn test_empty_shapes_draw_nothing() {
    let shapes = [
        SmoothShape::EMPTY,
        SmoothShape::thick_line(
            FpPoint::new(5.0, 5.0),
            FpPoint::new(5.0, 5.0),
            3.0,
            Rgba::RED,
            EndingStyle::Flat,
        ),
        SmoothShape::thick_line(
            FpPoint::new(5.0, 5.0),
            FpPoint::new(30.0, 9.0),
            0.0,
            Rgba::RED,
            EndingStyle::Rounded,
        ),
        SmoothShape::filled_triangle(
            FpPoint::new(0.0, 0.0),
            FpPoint::new(10.0, 10.0),
            FpPoint::new(20.0, 20.0),
            Rgba::RED,
        ),
    ];
    for shape in &shapes {
        assert!(shape.is_empty());
        let fb = render(shape, RasterConfig::default(), 0, 0);
        let mut blank = Framebuffer::new(SIZE, SIZE).unwrap();
        blank.clear(Rgba::WHITE);
        assert_eq!(fb.pixels(), blank.pixels());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_circles_match_per_pixel(
        cx in 0.0f32..64.0, cy in 0.0f32..64.0,
        r in 0.5f32..30.0, t in 0.5f32..10.0,
    ) {
        let shape = SmoothShape::thick_circle(
            FpPoint::new(cx, cy), r, t, Rgba::BLUE, Rgba::new(255, 0, 0, 90));
        let fb = render(&shape, RasterConfig::default(), 0, 0);
        assert_matches_per_pixel(&shape, &fb, 0, 0);
    }

    #[test]
    fn prop_arcs_match_per_pixel(
        r in 2.0f32..30.0, t in 0.5f32..12.0,
        start in -7.0f32..7.0, sweep in 0.0f32..7.0,
        round in any::<bool>(),
    ) {
        let ending = if round { EndingStyle::Rounded } else { EndingStyle::Flat };
        let shape = SmoothShape::thick_arc(
            FpPoint::new(32.0, 32.0), r, t, start, start + sweep, Rgba::RED, ending);
        let fb = render(&shape, RasterConfig::default(), 0, 0);
        assert_matches_per_pixel(&shape, &fb, 0, 0);
    }

    #[test]
    fn prop_lines_match_per_pixel(
        ax in -10.0f32..74.0, ay in -10.0f32..74.0,
        bx in -10.0f32..74.0, by in -10.0f32..74.0,
        w in 0.2f32..12.0,
    ) {
        let shape = SmoothShape::thick_line(
            FpPoint::new(ax, ay), FpPoint::new(bx, by), w, Rgba::GREEN, EndingStyle::Rounded);
        let fb = render(&shape, RasterConfig::default(), 0, 0);
        assert_matches_per_pixel(&shape, &fb, 0, 0);
    }
}
