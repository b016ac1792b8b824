//! Drifting particles linked by faint lines when they come close to each other.

use bevy::{math::Vec2, render::color::Color};
use itertools::Itertools;
use rand::{rngs::StdRng, Rng, SeedableRng};

use super::{ensure_drawable, Animation, AnimationError, Metadata};
use crate::render::canvas::{BlendMode, Canvas, CanvasSize};
use crate::util::{clock::Clock, functions::bounce_inside};

pub const METADATA: Metadata = Metadata {
    title: "Particle Network",
    description: "Drifting particles that link up with their neighbours.",
    author: "Canvas Gallery",
    date: "2024-01-12",
};

/// Roughly one particle per this many square pixels
const AREA_PER_PARTICLE: f32 = 9000.0;
const MIN_PARTICLES: usize = 20;
const MAX_PARTICLES: usize = 150;
const LINK_DISTANCE: f32 = 110.0;
const REPULSION_DISTANCE: f32 = 24.0;
const REPULSION_STRENGTH: f32 = 0.02;
const MAX_SPEED: f32 = 1.5;

#[derive(Debug, Clone)]
struct Particle {
    pos: Vec2,
    vel: Vec2,
    radius: f32,
    color: Color,
}

pub struct ParticleNetwork {
    rng: StdRng,
    size: CanvasSize,
    particles: Vec<Particle>,
}

impl ParticleNetwork {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            size: CanvasSize::default(),
            particles: Vec::new(),
        }
    }

    fn particle_count(size: CanvasSize) -> usize {
        let area = size.width as f32 * size.height as f32;
        ((area / AREA_PER_PARTICLE) as usize).clamp(MIN_PARTICLES, MAX_PARTICLES)
    }

    fn spawn(&mut self) -> Particle {
        let angle = self.rng.gen_range(0.0..std::f32::consts::TAU);
        let speed = self.rng.gen_range(0.2..0.8);
        Particle {
            pos: Vec2::new(
                self.rng.gen_range(0.0..self.size.width as f32),
                self.rng.gen_range(0.0..self.size.height as f32),
            ),
            vel: Vec2::from_angle(angle) * speed,
            radius: self.rng.gen_range(1.5..3.5),
            color: Color::hsla(self.rng.gen_range(180.0..260.0), 0.7, 0.65, 1.0),
        }
    }
}

impl Animation for ParticleNetwork {
    fn metadata(&self) -> Metadata {
        METADATA
    }

    fn init(&mut self, size: CanvasSize) -> Result<(), AnimationError> {
        ensure_drawable(size)?;
        self.size = size;
        let count = Self::particle_count(size);
        self.particles = (0..count).map(|_| self.spawn()).collect();
        Ok(())
    }

    fn update(&mut self, clock: &Clock) {
        let dt = clock.frame_scale();

        // Push apart anything that gets too close
        let mut push = vec![Vec2::ZERO; self.particles.len()];
        for (i, j) in (0..self.particles.len()).tuple_combinations() {
            let offset = self.particles[i].pos - self.particles[j].pos;
            let distance = offset.length();
            if distance > 0.0 && distance < REPULSION_DISTANCE {
                let force = offset / distance * (REPULSION_DISTANCE - distance) * REPULSION_STRENGTH;
                push[i] += force;
                push[j] -= force;
            }
        }

        let (width, height) = (self.size.width as f32, self.size.height as f32);
        for (particle, push) in self.particles.iter_mut().zip(push) {
            particle.vel = (particle.vel + push).clamp_length_max(MAX_SPEED);
            particle.pos += particle.vel * dt;
            bounce_inside(&mut particle.pos, &mut particle.vel, width, height);
        }
    }

    fn draw(&self, canvas: &mut Canvas) {
        canvas.clear(Color::rgb(0.03, 0.04, 0.09));
        for (a, b) in self.particles.iter().tuple_combinations() {
            let distance = a.pos.distance(b.pos);
            if distance < LINK_DISTANCE {
                let alpha = (1.0 - distance / LINK_DISTANCE) * 0.5;
                canvas.draw_line(
                    a.pos,
                    b.pos,
                    Color::rgba(0.6, 0.75, 1.0, alpha),
                    BlendMode::SourceOver,
                );
            }
        }
        for particle in &self.particles {
            canvas.fill_circle(
                particle.pos,
                particle.radius,
                particle.color,
                BlendMode::SourceOver,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_particle_count_scales_with_area() {
        assert_eq!(
            ParticleNetwork::particle_count(CanvasSize::new(10, 10)),
            MIN_PARTICLES
        );
        assert_eq!(
            ParticleNetwork::particle_count(CanvasSize::new(4000, 4000)),
            MAX_PARTICLES
        );
        assert_eq!(ParticleNetwork::particle_count(CanvasSize::new(900, 600)), 60);
    }

    #[test]
    fn test_resize_keeps_particles_in_bounds() {
        let mut network = ParticleNetwork::new(3);
        network.init(CanvasSize::new(1200, 800)).unwrap();
        let small = CanvasSize::new(200, 100);
        network.resize(small).unwrap();
        assert!(network.particles.iter().all(|p| small.contains(p.pos)));
    }

    #[test]
    fn test_particles_stay_in_bounds() {
        let size = CanvasSize::new(300, 200);
        let mut network = ParticleNetwork::new(11);
        network.init(size).unwrap();
        let mut clock = Clock::default();
        for _ in 0..300 {
            clock.update(Duration::from_millis(16));
            network.update(&clock);
        }
        assert!(network.particles.iter().all(|p| size.contains(p.pos)));
        assert!(network
            .particles
            .iter()
            .all(|p| p.vel.length() <= MAX_SPEED + 1e-4));
    }
}
