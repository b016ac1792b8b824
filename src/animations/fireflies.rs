//! Wandering fireflies pulsing in a summer night.

use std::f32::consts::TAU;

use bevy::{math::Vec2, render::color::Color};
use rand::{rngs::StdRng, Rng, SeedableRng};

use super::{ensure_drawable, Animation, AnimationError, Metadata};
use crate::render::canvas::{BlendMode, Canvas, CanvasSize};
use crate::util::{clock::Clock, functions::bounce_inside};

pub const METADATA: Metadata = Metadata {
    title: "Fireflies",
    description: "Soft lights drifting and pulsing over a dark meadow.",
    author: "Canvas Gallery",
    date: "2024-03-16",
};

const NUM_FIREFLIES: usize = 60;
const MAX_SPEED: f32 = 1.2;
const JITTER: f32 = 0.08;

#[derive(Debug, Clone)]
struct Firefly {
    pos: Vec2,
    vel: Vec2,
    phase: f32,
    pulse_speed: f32,
    glow_radius: f32,
    hue: f32,
}

impl Firefly {
    /// 0 when dark, 1 at the peak of a pulse
    fn glow(&self) -> f32 {
        0.5 + 0.5 * self.phase.sin()
    }
}

pub struct Fireflies {
    rng: StdRng,
    size: CanvasSize,
    fireflies: Vec<Firefly>,
}

impl Fireflies {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            size: CanvasSize::default(),
            fireflies: Vec::new(),
        }
    }
}

impl Animation for Fireflies {
    fn metadata(&self) -> Metadata {
        METADATA
    }

    fn init(&mut self, size: CanvasSize) -> Result<(), AnimationError> {
        ensure_drawable(size)?;
        self.size = size;
        self.fireflies = (0..NUM_FIREFLIES)
            .map(|_| Firefly {
                pos: Vec2::new(
                    self.rng.gen_range(0.0..size.width as f32),
                    self.rng.gen_range(0.0..size.height as f32),
                ),
                vel: Vec2::new(self.rng.gen_range(-0.5..0.5), self.rng.gen_range(-0.5..0.5)),
                phase: self.rng.gen_range(0.0..TAU),
                pulse_speed: self.rng.gen_range(0.02..0.06),
                glow_radius: self.rng.gen_range(8.0..20.0),
                hue: self.rng.gen_range(50.0..90.0),
            })
            .collect();
        Ok(())
    }

    fn update(&mut self, clock: &Clock) {
        let dt = clock.frame_scale();
        let (width, height) = (self.size.width as f32, self.size.height as f32);
        for firefly in &mut self.fireflies {
            let nudge = Vec2::new(
                self.rng.gen_range(-JITTER..JITTER),
                self.rng.gen_range(-JITTER..JITTER),
            );
            firefly.vel = (firefly.vel + nudge).clamp_length_max(MAX_SPEED);
            firefly.pos += firefly.vel * dt;
            bounce_inside(&mut firefly.pos, &mut firefly.vel, width, height);
            firefly.phase = (firefly.phase + firefly.pulse_speed * dt) % TAU;
        }
    }

    fn draw(&self, canvas: &mut Canvas) {
        canvas.fade(Color::rgba(0.01, 0.03, 0.02, 0.3));
        for firefly in &self.fireflies {
            let glow = firefly.glow();
            canvas.fill_radial_gradient(
                firefly.pos,
                firefly.glow_radius * (0.6 + 0.4 * glow),
                Color::hsla(firefly.hue, 1.0, 0.6, 0.8 * glow),
                Color::hsla(firefly.hue, 1.0, 0.4, 0.0),
                BlendMode::Lighter,
            );
            canvas.fill_circle(
                firefly.pos,
                1.5,
                Color::hsla(firefly.hue, 1.0, 0.85, glow),
                BlendMode::Lighter,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_fireflies_stay_in_bounds() {
        let mut fireflies = Fireflies::new(21);
        fireflies.init(CanvasSize::new(640, 480)).unwrap();
        let size = CanvasSize::new(50, 40);
        fireflies.resize(size).unwrap();
        assert!(fireflies.fireflies.iter().all(|f| size.contains(f.pos)));

        let mut clock = Clock::default();
        for _ in 0..400 {
            clock.update(Duration::from_millis(16));
            fireflies.update(&clock);
        }
        assert!(fireflies.fireflies.iter().all(|f| size.contains(f.pos)));
        assert!(fireflies
            .fireflies
            .iter()
            .all(|f| (0.0..=1.0).contains(&f.glow())));
    }
}
