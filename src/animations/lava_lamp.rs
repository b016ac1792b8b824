//! Glowing blobs pulled toward the middle and pushing each other apart.

use std::f32::consts::TAU;

use bevy::{math::Vec2, render::color::Color};
use itertools::Itertools;
use rand::{rngs::StdRng, Rng, SeedableRng};

use super::{ensure_drawable, Animation, AnimationError, Metadata};
use crate::render::canvas::{BlendMode, Canvas, CanvasSize};
use crate::util::{clock::Clock, functions::bounce_inside};

pub const METADATA: Metadata = Metadata {
    title: "Lava Lamp",
    description: "Warm blobs rising, sinking and jostling for space.",
    author: "Canvas Gallery",
    date: "2024-03-30",
};

const NUM_BLOBS: usize = 12;
const ATTRACTION: f32 = 0.0004;
const REPULSION: f32 = 0.02;
const DAMPING: f32 = 0.985;
const MAX_SPEED: f32 = 2.0;

#[derive(Debug, Clone)]
struct Blob {
    pos: Vec2,
    vel: Vec2,
    radius: f32,
    hue: f32,
    /// Offset for the vertical bobbing
    phase: f32,
}

pub struct LavaLamp {
    rng: StdRng,
    size: CanvasSize,
    time: f32,
    blobs: Vec<Blob>,
}

impl LavaLamp {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            size: CanvasSize::default(),
            time: 0.0,
            blobs: Vec::new(),
        }
    }
}

impl Animation for LavaLamp {
    fn metadata(&self) -> Metadata {
        METADATA
    }

    fn init(&mut self, size: CanvasSize) -> Result<(), AnimationError> {
        ensure_drawable(size)?;
        self.size = size;
        let scale = size.width.min(size.height) as f32;
        self.blobs = (0..NUM_BLOBS)
            .map(|_| Blob {
                pos: Vec2::new(
                    self.rng.gen_range(0.0..size.width as f32),
                    self.rng.gen_range(0.0..size.height as f32),
                ),
                vel: Vec2::ZERO,
                radius: (scale * self.rng.gen_range(0.06..0.14)).max(2.0),
                hue: self.rng.gen_range(0.0..45.0),
                phase: self.rng.gen_range(0.0..TAU),
            })
            .collect();
        Ok(())
    }

    fn update(&mut self, clock: &Clock) {
        let dt = clock.frame_scale();
        self.time += dt / 60.0;
        let center = self.size.center();

        let mut forces: Vec<Vec2> = self
            .blobs
            .iter()
            .map(|blob| {
                let bob = Vec2::new(0.0, (self.time + blob.phase).sin() * 0.03);
                (center - blob.pos) * ATTRACTION + bob
            })
            .collect();
        for (i, j) in (0..self.blobs.len()).tuple_combinations() {
            let offset = self.blobs[i].pos - self.blobs[j].pos;
            let distance = offset.length();
            let reach = self.blobs[i].radius + self.blobs[j].radius;
            if distance > 0.0 && distance < reach {
                let force = offset / distance * (reach - distance) * REPULSION;
                forces[i] += force;
                forces[j] -= force;
            }
        }

        let (width, height) = (self.size.width as f32, self.size.height as f32);
        for (blob, force) in self.blobs.iter_mut().zip(forces) {
            blob.vel = ((blob.vel + force * dt) * DAMPING).clamp_length_max(MAX_SPEED);
            blob.pos += blob.vel * dt;
            bounce_inside(&mut blob.pos, &mut blob.vel, width, height);
        }
    }

    fn draw(&self, canvas: &mut Canvas) {
        canvas.fill_vertical_gradient(Color::rgb(0.12, 0.0, 0.1), Color::rgb(0.3, 0.02, 0.05));
        for blob in &self.blobs {
            canvas.fill_radial_gradient(
                blob.pos,
                blob.radius * 1.6,
                Color::hsla(blob.hue, 1.0, 0.55, 0.9),
                Color::hsla(blob.hue + 20.0, 1.0, 0.4, 0.0),
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
    fn test_blobs_in_bounds_after_resize_and_updates() {
        let mut lamp = LavaLamp::new(13);
        lamp.init(CanvasSize::new(800, 800)).unwrap();
        let size = CanvasSize::new(90, 160);
        lamp.resize(size).unwrap();
        assert!(lamp.blobs.iter().all(|b| size.contains(b.pos)));

        let mut clock = Clock::default();
        for _ in 0..600 {
            clock.update(Duration::from_millis(16));
            lamp.update(&clock);
        }
        assert!(lamp.blobs.iter().all(|b| size.contains(b.pos)));
    }

    #[test]
    fn test_overlapping_blobs_are_pushed_apart() {
        let mut lamp = LavaLamp::new(13);
        lamp.init(CanvasSize::new(400, 400)).unwrap();
        lamp.blobs.truncate(2);
        lamp.blobs[0].pos = Vec2::new(195.0, 200.0);
        lamp.blobs[1].pos = Vec2::new(205.0, 200.0);
        let before = lamp.blobs[0].pos.distance(lamp.blobs[1].pos);
        let mut clock = Clock::default();
        for _ in 0..10 {
            clock.update(Duration::from_millis(16));
            lamp.update(&clock);
        }
        assert!(lamp.blobs[0].pos.distance(lamp.blobs[1].pos) > before);
    }
}
