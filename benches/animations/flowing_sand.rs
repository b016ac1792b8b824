use criterion::{black_box, criterion_group, Criterion};
use canvas_gallery::animations::flowing_sand::{config::SandConfigBuilder, FlowingSand};
use canvas_gallery::animations::Animation;
use canvas_gallery::render::canvas::{Canvas, CanvasSize};

/// A sand pile that has been running long enough to have settled grains and avalanches
fn get_warm_sand() -> FlowingSand {
    let config = SandConfigBuilder::new()
        .build()
        .expect("default sand config is valid");
    let mut sand = FlowingSand::new(7, config);
    sand.init(CanvasSize::new(800, 600))
        .expect("canvas is not empty");
    for _ in 0..600 {
        sand.step(1.0 / 60.0);
    }
    sand
}

fn bench_sand_step(c: &mut Criterion) {
    let sand = get_warm_sand();
    c.bench_function("flowing_sand_step", |b| {
        b.iter_batched(
            || sand.clone(),
            |mut sand| sand.step(black_box(1.0 / 60.0)),
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_sand_draw(c: &mut Criterion) {
    let sand = get_warm_sand();
    let mut canvas = Canvas::new(CanvasSize::new(800, 600)).expect("canvas is not empty");
    c.bench_function("flowing_sand_draw", |b| {
        b.iter(|| sand.draw(black_box(&mut canvas)))
    });
}

criterion_group!(benches, bench_sand_step, bench_sand_draw);
