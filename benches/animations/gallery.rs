use std::time::Duration;

use criterion::{black_box, criterion_group, Criterion};
use canvas_gallery::animations::AnimationRegistry;
use canvas_gallery::gallery::Gallery;
use canvas_gallery::render::canvas::{Canvas, CanvasSize};
use canvas_gallery::util::clock::Clock;

/// One frame of every built-in animation through the gallery
fn bench_gallery_ticks(c: &mut Criterion) {
    let registry = AnimationRegistry::builtin();
    let titles: Vec<&'static str> = registry.iter().map(|entry| entry.metadata.title).collect();
    let canvas = Canvas::new(CanvasSize::new(640, 480)).expect("canvas is not empty");
    let mut gallery = Gallery::new(registry, canvas, 0).expect("registry is not empty");
    let mut group = c.benchmark_group("gallery_tick");
    for (index, title) in titles.into_iter().enumerate() {
        gallery.show(index);
        let mut clock = Clock::default();
        group.bench_function(title, |b| {
            b.iter(|| {
                clock.update(Duration::from_millis(16));
                black_box(gallery.tick(&clock));
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_gallery_ticks);
