#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Benchmark for transform algebra and resampling.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use trueno_shapes::color::Rgba;
use trueno_shapes::framebuffer::Framebuffer;
use trueno_shapes::geometry::{FpPoint, Rect};
use trueno_shapes::render::Surface;
use trueno_shapes::smooth::SmoothShape;
use trueno_shapes::transform::{Transformation, TransformedRaster};

fn algebra_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform_algebra");
    let center = FpPoint::new(100.0, 80.0);
    let chain = [
        Transformation::translate(3.0, -2.0),
        Transformation::rotate_right_about(0.3, center),
        Transformation::scale(1.5, 0.75),
        Transformation::shear(0.1, 0.2),
        Transformation::perspective_about(0.001, 0.002, center),
    ];

    group.bench_function("compose_chain", |b| {
        b.iter(|| {
            chain
                .iter()
                .fold(Transformation::Identity, |acc, t| acc.then(black_box(t)))
        });
    });

    let composed = chain.iter().fold(Transformation::Identity, |acc, t| acc.then(t));
    group.bench_function("inversion_projective", |b| {
        b.iter(|| black_box(&composed).inversion().unwrap());
    });
    group.bench_function("apply_1000", |b| {
        b.iter(|| {
            (0..1000).fold(0.0f32, |acc, i| {
                let p = composed.apply(FpPoint::new(i as f32, (i * 3) as f32));
                acc + p.x
            })
        });
    });
    group.bench_function("transform_extents", |b| {
        b.iter(|| composed.transform_extents(black_box(Rect::new(0, 0, 199, 159))));
    });

    group.finish();
}

fn resample_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform_resample");
    let disc = SmoothShape::filled_circle(FpPoint::new(60.0, 60.0), 50.0, Rgba::BLUE);
    let mut fb = Framebuffer::new(320, 240).unwrap();

    for (name, t) in [
        ("translate_integer", Transformation::translate(40.0, 20.0)),
        ("translate_fractional", Transformation::translate(40.5, 20.25)),
        ("rotate", Transformation::rotate_right_about(0.5, FpPoint::new(60.0, 60.0))),
        ("scale_2x", Transformation::scale(2.0, 2.0)),
    ] {
        let raster = TransformedRaster::new(&disc, &t).unwrap();
        group.bench_function(name, |b| {
            b.iter(|| {
                let bounds = fb.bounds();
                Surface::new(&mut fb, bounds).draw_object(black_box(&raster));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, algebra_benchmark, resample_benchmark);
criterion_main!(benches);
