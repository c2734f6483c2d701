//! Benchmarks for the drawing primitives.
//!
//! Run with: cargo bench --package renderer --bench primitives_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;

use osd_common::{Color, CompassAngle};
use renderer::primitives::{
    draw_arc, draw_circle_outline, draw_ellipse_outline, draw_ellipse_wedge_filled,
    draw_filled_circle, draw_line, draw_wedge_filled,
};
use renderer::Framebuffer;

const WIDTH: u32 = 1920;
const HEIGHT: u32 = 1080;

fn framebuffer() -> Framebuffer {
    Framebuffer::new(WIDTH, HEIGHT).unwrap()
}

// =============================================================================
// FRAMEBUFFER
// =============================================================================

fn bench_clear(c: &mut Criterion) {
    let mut fb = framebuffer();
    c.bench_function("framebuffer_clear_1080p", |b| b.iter(|| fb.clear()));
}

// =============================================================================
// LINES
// =============================================================================

fn bench_lines(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw_line");
    let mut rng = rand::thread_rng();
    let segments: Vec<(i32, i32, i32, i32)> = (0..256)
        .map(|_| {
            (
                rng.gen_range(0..WIDTH as i32),
                rng.gen_range(0..HEIGHT as i32),
                rng.gen_range(0..WIDTH as i32),
                rng.gen_range(0..HEIGHT as i32),
            )
        })
        .collect();

    for thickness in [1.0f32, 2.0, 4.0] {
        let mut fb = framebuffer();
        group.bench_with_input(BenchmarkId::new("random_256", thickness), &thickness, |b, &t| {
            b.iter(|| {
                for &(x0, y0, x1, y1) in &segments {
                    draw_line(&mut fb, x0, y0, x1, y1, Color::RED, black_box(t));
                }
            });
        });
    }

    group.finish();
}

// =============================================================================
// CIRCLES AND ARCS
// =============================================================================

fn bench_circles(c: &mut Criterion) {
    let mut group = c.benchmark_group("circles");
    let mut fb = framebuffer();

    for radius in [5.0f32, 15.0, 60.0] {
        group.bench_with_input(BenchmarkId::new("filled", radius), &radius, |b, &r| {
            b.iter(|| draw_filled_circle(&mut fb, 960, 540, black_box(r), Color::GREEN));
        });
        group.bench_with_input(BenchmarkId::new("outline", radius), &radius, |b, &r| {
            b.iter(|| draw_circle_outline(&mut fb, 960, 540, black_box(r), Color::GREEN, 2.0));
        });
    }

    group.bench_function("arc_wraparound", |b| {
        b.iter(|| {
            draw_arc(
                &mut fb,
                960,
                540,
                100.0,
                CompassAngle(black_box(330.0)),
                CompassAngle(30.0),
                Color::WHITE,
                2.0,
                0,
            )
        });
    });

    group.finish();
}

// =============================================================================
// RADAR SHAPES
// =============================================================================

fn bench_radar_shapes(c: &mut Criterion) {
    let mut group = c.benchmark_group("radar_shapes");
    let mut fb = framebuffer();
    let fill = Color::GREEN.with_alpha(0x30);

    group.bench_function("ellipse_outline_150x75", |b| {
        b.iter(|| draw_ellipse_outline(&mut fb, 960, 805, black_box(150.0), 75.0, Color::WHITE, 1.5));
    });

    for fov in [10.0f32, 45.0, 120.0] {
        group.bench_with_input(BenchmarkId::new("ellipse_wedge_fill", fov), &fov, |b, &fov| {
            b.iter(|| {
                draw_ellipse_wedge_filled(
                    &mut fb,
                    960,
                    805,
                    150.0,
                    75.0,
                    CompassAngle(-fov / 2.0),
                    CompassAngle(fov / 2.0),
                    fill,
                )
            });
        });
    }

    group.bench_function("circular_wedge_fill_r100", |b| {
        b.iter(|| {
            draw_wedge_filled(
                &mut fb,
                960,
                540,
                black_box(100.0),
                CompassAngle(-22.5),
                CompassAngle(22.5),
                fill,
            )
        });
    });

    group.finish();
}

criterion_group!(benches, bench_clear, bench_lines, bench_circles, bench_radar_shapes);
criterion_main!(benches);
