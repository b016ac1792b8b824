//! Layered sine waves rolling under a dusk sky.

use std::f32::consts::TAU;

use bevy::render::color::Color;
use rand::{rngs::StdRng, Rng, SeedableRng};

use super::{ensure_drawable, Animation, AnimationError, Metadata};
use crate::render::canvas::{BlendMode, Canvas, CanvasSize};
use crate::util::clock::Clock;

pub const METADATA: Metadata = Metadata {
    title: "Ocean Waves",
    description: "Translucent swells layered from the horizon to the shore.",
    author: "Canvas Gallery",
    date: "2024-01-19",
};

const NUM_WAVES: usize = 5;

#[derive(Debug, Clone)]
struct Wave {
    /// Resting height of the surface
    baseline: f32,
    amplitude: f32,
    wavelength: f32,
    speed: f32,
    phase: f32,
    color: Color,
}

impl Wave {
    /// Height of the surface at column x
    fn surface_at(&self, x: f32) -> f32 {
        let primary = (x / self.wavelength * TAU + self.phase).sin();
        let ripple = (x / (self.wavelength * 0.37) * TAU - self.phase * 1.7).sin() * 0.25;
        self.baseline + self.amplitude * (primary + ripple) / 1.25
    }
}

pub struct OceanWaves {
    rng: StdRng,
    size: CanvasSize,
    waves: Vec<Wave>,
}

impl OceanWaves {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            size: CanvasSize::default(),
            waves: Vec::new(),
        }
    }
}

impl Animation for OceanWaves {
    fn metadata(&self) -> Metadata {
        METADATA
    }

    fn init(&mut self, size: CanvasSize) -> Result<(), AnimationError> {
        ensure_drawable(size)?;
        self.size = size;
        let height = size.height as f32;
        let width = size.width as f32;
        self.waves = (0..NUM_WAVES)
            .map(|i| {
                // Back waves sit higher, are smaller and darker
                let depth = i as f32 / (NUM_WAVES - 1) as f32;
                Wave {
                    baseline: height * (0.45 + depth * 0.35),
                    amplitude: height * self.rng.gen_range(0.02..0.05) * (0.6 + depth),
                    wavelength: width * self.rng.gen_range(0.3..0.7),
                    speed: self.rng.gen_range(0.01..0.03) * (1.0 + depth),
                    phase: self.rng.gen_range(0.0..TAU),
                    color: Color::hsla(200.0 + depth * 15.0, 0.7, 0.25 + depth * 0.2, 0.35),
                }
            })
            .collect();
        Ok(())
    }

    fn update(&mut self, clock: &Clock) {
        let dt = clock.frame_scale();
        for wave in &mut self.waves {
            wave.phase = (wave.phase + wave.speed * dt) % TAU;
        }
    }

    fn draw(&self, canvas: &mut Canvas) {
        canvas.fill_vertical_gradient(Color::rgb(0.07, 0.05, 0.2), Color::rgb(0.95, 0.55, 0.4));
        for wave in &self.waves {
            for x in 0..canvas.width() {
                let top = wave.surface_at(x as f32);
                canvas.fill_column(x as i32, top, wave.color, BlendMode::SourceOver);
            }
        }
    }
}
