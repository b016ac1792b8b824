//! Stars streaming toward the viewer through a slowly twisting tunnel.

use std::f32::consts::TAU;

use bevy::{math::Vec2, render::color::Color};
use rand::{rngs::StdRng, Rng, SeedableRng};

use super::{ensure_drawable, Animation, AnimationError, Metadata};
use crate::render::canvas::{BlendMode, Canvas, CanvasSize};
use crate::util::clock::Clock;

pub const METADATA: Metadata = Metadata {
    title: "Star Tunnel",
    description: "A warp through a twisting corridor of stars.",
    author: "Canvas Gallery",
    date: "2024-03-02",
};

const NUM_STARS: usize = 400;
const FAR_PLANE: f32 = 1000.0;
const NEAR_PLANE: f32 = 8.0;
const FOCAL_LENGTH: f32 = 128.0;
const TWIST: f32 = 0.002;

#[derive(Debug, Clone)]
struct TunnelStar {
    angle: f32,
    /// Distance from the tunnel axis in world units
    radius: f32,
    z: f32,
    speed: f32,
    hue: f32,
}

impl TunnelStar {
    fn project_at(&self, z: f32, center: Vec2) -> Vec2 {
        center + Vec2::from_angle(self.angle) * self.radius * FOCAL_LENGTH / z
    }

    fn project(&self, center: Vec2) -> Vec2 {
        self.project_at(self.z, center)
    }
}

pub struct StarTunnel {
    rng: StdRng,
    size: CanvasSize,
    stars: Vec<TunnelStar>,
}

impl StarTunnel {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            size: CanvasSize::default(),
            stars: Vec::new(),
        }
    }

    /// Pick where the star should appear on screen first, then back out the world radius.
    /// That way every fresh star is guaranteed to be visible.
    fn spawn(&mut self, z: f32) -> TunnelStar {
        let max_screen_radius = (self.size.width.min(self.size.height) as f32 * 0.5 - 1.0).max(0.0);
        let screen_radius = self.rng.gen_range(0.0..=max_screen_radius);
        TunnelStar {
            angle: self.rng.gen_range(0.0..TAU),
            radius: screen_radius * z / FOCAL_LENGTH,
            z,
            speed: self.rng.gen_range(2.0..8.0),
            hue: self.rng.gen_range(180.0..280.0),
        }
    }
}

impl Animation for StarTunnel {
    fn metadata(&self) -> Metadata {
        METADATA
    }

    fn init(&mut self, size: CanvasSize) -> Result<(), AnimationError> {
        ensure_drawable(size)?;
        self.size = size;
        self.stars = (0..NUM_STARS)
            .map(|_| {
                let z = self.rng.gen_range(FOCAL_LENGTH..FAR_PLANE);
                self.spawn(z)
            })
            .collect();
        Ok(())
    }

    fn update(&mut self, clock: &Clock) {
        let dt = clock.frame_scale();
        let center = self.size.center();
        for i in 0..self.stars.len() {
            let star = &mut self.stars[i];
            star.z -= star.speed * dt;
            star.angle = (star.angle + TWIST * dt) % TAU;
            let gone = star.z < NEAR_PLANE || !self.size.contains(star.project(center));
            if gone {
                self.stars[i] = self.spawn(FAR_PLANE);
            }
        }
    }

    fn draw(&self, canvas: &mut Canvas) {
        canvas.fade(Color::rgba(0.0, 0.0, 0.02, 0.35));
        let center = self.size.center();
        for star in &self.stars {
            let depth = 1.0 - star.z / FAR_PLANE;
            let head = star.project(center);
            let tail = star.project_at((star.z + star.speed * 4.0).min(FAR_PLANE), center);
            let color = Color::hsla(star.hue, 0.6, 0.5 + depth * 0.5, depth);
            canvas.draw_line(tail, head, color.with_a(depth * 0.5), BlendMode::Lighter);
            canvas.fill_circle(head, depth * 2.5, color, BlendMode::Lighter);
        }
    }
}
