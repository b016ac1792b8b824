//! Counter rotating rings of petals leaving colored trails.

use std::f32::consts::TAU;

use bevy::{math::Vec2, render::color::Color};
use rand::{rngs::StdRng, Rng, SeedableRng};

use super::{ensure_drawable, Animation, AnimationError, Metadata};
use crate::render::canvas::{BlendMode, Canvas, CanvasSize};
use crate::util::clock::Clock;

pub const METADATA: Metadata = Metadata {
    title: "Sacred Mandala",
    description: "Rings of petals turning against each other in slow symmetry.",
    author: "Canvas Gallery",
    date: "2024-02-17",
};

const NUM_RINGS: usize = 6;
/// Outer ring radius as a fraction of the smaller canvas dimension
const OUTER_RADIUS: f32 = 0.4;

#[derive(Debug, Clone)]
struct Ring {
    radius: f32,
    petals: u32,
    petal_radius: f32,
    rotation: f32,
    rotation_speed: f32,
    hue: f32,
}

impl Ring {
    fn petal_centers(&self, center: Vec2) -> impl Iterator<Item = Vec2> + '_ {
        (0..self.petals).map(move |k| {
            let angle = self.rotation + k as f32 * TAU / self.petals as f32;
            center + Vec2::from_angle(angle) * self.radius
        })
    }
}

pub struct Mandala {
    rng: StdRng,
    size: CanvasSize,
    hue_shift: f32,
    rings: Vec<Ring>,
}

impl Mandala {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            size: CanvasSize::default(),
            hue_shift: 0.0,
            rings: Vec::new(),
        }
    }
}

impl Animation for Mandala {
    fn metadata(&self) -> Metadata {
        METADATA
    }

    fn init(&mut self, size: CanvasSize) -> Result<(), AnimationError> {
        ensure_drawable(size)?;
        self.size = size;
        let max_radius = size.width.min(size.height) as f32 * OUTER_RADIUS;
        self.rings = (0..NUM_RINGS)
            .map(|i| {
                let radius = max_radius * (i + 1) as f32 / NUM_RINGS as f32;
                // Alternate the direction of every other ring
                let direction = if i % 2 == 0 { 1.0 } else { -1.0 };
                Ring {
                    radius,
                    petals: 6 + 2 * i as u32,
                    petal_radius: (max_radius / NUM_RINGS as f32 * 0.45).max(1.0),
                    rotation: self.rng.gen_range(0.0..TAU),
                    rotation_speed: direction * self.rng.gen_range(0.004..0.012),
                    hue: self.rng.gen_range(0.0..360.0),
                }
            })
            .collect();
        Ok(())
    }

    fn update(&mut self, clock: &Clock) {
        let dt = clock.frame_scale();
        self.hue_shift = (self.hue_shift + 0.3 * dt) % 360.0;
        for ring in &mut self.rings {
            ring.rotation = (ring.rotation + ring.rotation_speed * dt) % TAU;
        }
    }

    fn draw(&self, canvas: &mut Canvas) {
        canvas.fade(Color::rgba(0.02, 0.0, 0.05, 0.15));
        let center = self.size.center();
        for ring in &self.rings {
            let hue = (ring.hue + self.hue_shift) % 360.0;
            let color = Color::hsla(hue, 0.8, 0.6, 0.5);
            let mut previous: Option<Vec2> = None;
            for petal in ring.petal_centers(center) {
                canvas.fill_circle(petal, ring.petal_radius, color, BlendMode::Lighter);
                if let Some(prev) = previous {
                    canvas.draw_line(prev, petal, color.with_a(0.25), BlendMode::Lighter);
                }
                previous = Some(petal);
            }
        }
        canvas.fill_radial_gradient(
            center,
            self.size.width.min(self.size.height) as f32 * 0.06,
            Color::hsla(self.hue_shift, 0.9, 0.8, 0.8),
            Color::hsla(self.hue_shift, 0.9, 0.5, 0.0),
            BlendMode::Lighter,
        );
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn assert_petals_inside(mandala: &Mandala, size: CanvasSize) {
        let center = size.center();
        for ring in &mandala.rings {
            for petal in ring.petal_centers(center) {
                assert!(size.contains(petal), "{petal:?} outside {size:?}");
            }
        }
    }

    #[test]
    fn test_petals_inside_after_resize() {
        let mut mandala = Mandala::new(4);
        mandala.init(CanvasSize::new(900, 900)).unwrap();
        let size = CanvasSize::new(300, 120);
        mandala.resize(size).unwrap();
        assert_petals_inside(&mandala, size);

        let mut clock = Clock::default();
        for _ in 0..100 {
            clock.update(Duration::from_millis(16));
            mandala.update(&clock);
        }
        assert_petals_inside(&mandala, size);
    }

    #[test]
    fn test_neighbouring_rings_turn_opposite_ways() {
        let mut mandala = Mandala::new(4);
        mandala.init(CanvasSize::new(200, 200)).unwrap();
        for pair in mandala.rings.windows(2) {
            assert!(pair[0].rotation_speed * pair[1].rotation_speed < 0.0);
        }
    }
}
