use bevy::math::Vec2;
use bevy::render::color::Color;
use criterion::{black_box, criterion_group, Criterion};
use canvas_gallery::render::canvas::{BlendMode, Canvas, CanvasSize};

fn get_canvas() -> Canvas {
    Canvas::new(CanvasSize::new(1280, 720)).expect("canvas is not empty")
}

fn bench_fade(c: &mut Criterion) {
    let mut canvas = get_canvas();
    c.bench_function("canvas_fade", |b| {
        b.iter(|| canvas.fade(black_box(Color::rgba(0.0, 0.0, 0.0, 0.1))))
    });
}

fn bench_vertical_gradient(c: &mut Criterion) {
    let mut canvas = get_canvas();
    c.bench_function("canvas_vertical_gradient", |b| {
        b.iter(|| {
            canvas.fill_vertical_gradient(
                black_box(Color::rgb(0.0, 0.0, 0.2)),
                black_box(Color::rgb(0.0, 0.3, 0.5)),
            )
        })
    });
}

fn bench_radial_gradient(c: &mut Criterion) {
    let mut canvas = get_canvas();
    c.bench_function("canvas_radial_gradient", |b| {
        b.iter(|| {
            canvas.fill_radial_gradient(
                black_box(Vec2::new(640.0, 360.0)),
                black_box(120.0),
                Color::rgba(1.0, 0.5, 0.0, 0.9),
                Color::rgba(1.0, 0.2, 0.0, 0.0),
                BlendMode::Lighter,
            )
        })
    });
}

fn bench_upload(c: &mut Criterion) {
    let canvas = get_canvas();
    let mut image = canvas.to_bevy_image();
    c.bench_function("canvas_copy_into_image", |b| {
        b.iter(|| canvas.copy_into(black_box(&mut image)))
    });
}

criterion_group!(
    benches,
    bench_fade,
    bench_vertical_gradient,
    bench_radial_gradient,
    bench_upload
);
