use criterion::criterion_main;

mod animations;
mod render;

criterion_main! {
    animations::flowing_sand::benches,
    animations::gallery::benches,
    render::canvas::benches,
}
