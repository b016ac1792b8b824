//! Swaying curtains of light over a star field.

use std::f32::consts::TAU;

use bevy::{math::Vec2, render::color::Color};
use rand::{rngs::StdRng, Rng, SeedableRng};

use super::{ensure_drawable, Animation, AnimationError, Metadata};
use crate::render::canvas::{BlendMode, Canvas, CanvasSize};
use crate::util::{clock::Clock, functions::wrap};

pub const METADATA: Metadata = Metadata {
    title: "Aurora Borealis",
    description: "Curtains of green and violet light drifting across the polar sky.",
    author: "Canvas Gallery",
    date: "2024-02-03",
};

const NUM_CURTAINS: usize = 6;
const NUM_STARS: usize = 120;
/// How far down the sky the curtains reach, as a fraction of the height
const CURTAIN_DEPTH: f32 = 0.75;

#[derive(Debug, Clone)]
struct Curtain {
    /// Horizontal anchor
    x: f32,
    hue: f32,
    half_width: f32,
    amplitude: f32,
    frequency: f32,
    speed: f32,
    drift: f32,
    phase: f32,
    intensity: f32,
}

impl Curtain {
    /// Center of the curtain at height y, wrapped onto the canvas
    fn center_at(&self, y: f32, width: f32) -> f32 {
        wrap(
            self.x + self.amplitude * (y * self.frequency + self.phase).sin(),
            width,
        )
    }
}

#[derive(Debug, Clone)]
struct Star {
    pos: Vec2,
    brightness: f32,
    twinkle: f32,
}

pub struct Aurora {
    rng: StdRng,
    size: CanvasSize,
    time: f32,
    curtains: Vec<Curtain>,
    stars: Vec<Star>,
}

impl Aurora {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            size: CanvasSize::default(),
            time: 0.0,
            curtains: Vec::new(),
            stars: Vec::new(),
        }
    }
}

impl Animation for Aurora {
    fn metadata(&self) -> Metadata {
        METADATA
    }

    fn init(&mut self, size: CanvasSize) -> Result<(), AnimationError> {
        ensure_drawable(size)?;
        self.size = size;
        let (width, height) = (size.width as f32, size.height as f32);
        self.curtains = (0..NUM_CURTAINS)
            .map(|_| Curtain {
                x: self.rng.gen_range(0.0..width),
                hue: if self.rng.gen_bool(0.7) {
                    self.rng.gen_range(110.0..160.0)
                } else {
                    self.rng.gen_range(260.0..300.0)
                },
                half_width: width * self.rng.gen_range(0.03..0.08),
                amplitude: width * self.rng.gen_range(0.05..0.15),
                frequency: self.rng.gen_range(0.005..0.015),
                speed: self.rng.gen_range(0.005..0.02),
                drift: self.rng.gen_range(-0.3..0.3),
                phase: self.rng.gen_range(0.0..TAU),
                intensity: self.rng.gen_range(0.05..0.12),
            })
            .collect();
        self.stars = (0..NUM_STARS)
            .map(|_| Star {
                pos: Vec2::new(
                    self.rng.gen_range(0.0..width),
                    self.rng.gen_range(0.0..height),
                ),
                brightness: self.rng.gen_range(0.2..0.9),
                twinkle: self.rng.gen_range(0.0..TAU),
            })
            .collect();
        Ok(())
    }

    fn update(&mut self, clock: &Clock) {
        let dt = clock.frame_scale();
        let width = self.size.width as f32;
        self.time += dt / 60.0;
        for curtain in &mut self.curtains {
            curtain.phase = (curtain.phase + curtain.speed * dt) % TAU;
            curtain.x = wrap(curtain.x + curtain.drift * dt, width);
        }
    }

    fn draw(&self, canvas: &mut Canvas) {
        canvas.fill_vertical_gradient(Color::rgb(0.0, 0.02, 0.08), Color::rgb(0.02, 0.08, 0.15));
        for star in &self.stars {
            let alpha = star.brightness * (0.6 + 0.4 * (self.time * 2.0 + star.twinkle).sin());
            canvas.blend_pixel(
                star.pos.x as i32,
                star.pos.y as i32,
                Color::rgba(1.0, 1.0, 1.0, alpha),
                BlendMode::Lighter,
            );
        }

        let width = canvas.width() as f32;
        let depth = canvas.height() as f32 * CURTAIN_DEPTH;
        for curtain in &self.curtains {
            for y in 0..depth as i32 {
                // Bright near the top, fading out towards the bottom of the curtain
                let fall_off = 1.0 - y as f32 / depth;
                let center = curtain.center_at(y as f32, width);
                let half = curtain.half_width.max(1.0);
                for dx in -(half as i32)..=(half as i32) {
                    let across = 1.0 - (dx as f32).abs() / half;
                    let alpha = curtain.intensity * across * fall_off;
                    let x = wrap(center + dx as f32, width) as i32;
                    canvas.blend_pixel(
                        x,
                        y,
                        Color::hsla(curtain.hue, 0.9, 0.55, alpha),
                        BlendMode::Lighter,
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_records_in_bounds_after_resize() {
        let mut aurora = Aurora::new(9);
        aurora.init(CanvasSize::new(1024, 768)).unwrap();
        let size = CanvasSize::new(120, 80);
        aurora.resize(size).unwrap();
        assert_eq!(aurora.stars.len(), NUM_STARS);
        assert!(aurora.stars.iter().all(|s| size.contains(s.pos)));
        assert!(aurora
            .curtains
            .iter()
            .all(|c| c.x >= 0.0 && c.x < size.width as f32));
    }

    #[test]
    fn test_curtains_wrap_while_drifting() {
        let size = CanvasSize::new(100, 100);
        let mut aurora = Aurora::new(1);
        aurora.init(size).unwrap();
        let mut clock = Clock::default();
        for _ in 0..2000 {
            clock.update(Duration::from_millis(16));
            aurora.update(&clock);
        }
        for curtain in &aurora.curtains {
            assert!(curtain.x >= 0.0 && curtain.x < 100.0);
            for y in 0..75 {
                let c = curtain.center_at(y as f32, 100.0);
                assert!((0.0..100.0).contains(&c));
            }
        }
    }
}
