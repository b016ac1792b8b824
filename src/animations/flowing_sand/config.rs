//! Tunables for the sand simulation

use crate::animations::AnimationError;

/// Everything that shapes how the sand behaves.
/// Velocities and accelerations are in pixels per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SandConfig {
    pub cell_size: f32,
    pub gravity: f32,
    pub wind_strength: f32,
    /// Wind oscillations per second
    pub wind_frequency: f32,
    pub friction: f32,
    pub spawn_per_frame: usize,
    pub max_particles: usize,
    /// Multiplier applied to a settled grain's life every frame
    pub life_decay: f32,
    pub life_threshold: f32,
    /// Chance per frame that a grain under the life threshold disappears
    pub removal_chance: f64,
    /// Chance per frame of an avalanche
    pub avalanche_chance: f64,
    pub avalanche_half_width: usize,
    pub avalanche_half_height: usize,
    /// Emitter sweeps per second
    pub emitter_speed: f32,
}

/// A builder for SandConfig
#[derive(Debug, Clone)]
pub struct SandConfigBuilder {
    config: SandConfig,
}

impl Default for SandConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SandConfigBuilder {
    /// Start here
    pub fn new() -> Self {
        Self {
            config: SandConfig {
                cell_size: 4.0,
                gravity: 0.15,
                wind_strength: 0.03,
                wind_frequency: 0.1,
                friction: 0.98,
                spawn_per_frame: 4,
                max_particles: 4000,
                life_decay: 0.998,
                life_threshold: 0.05,
                removal_chance: 0.01,
                avalanche_chance: 0.003,
                avalanche_half_width: 6,
                avalanche_half_height: 3,
                emitter_speed: 0.05,
            },
        }
    }
    /// Side length of one grid cell in pixels
    pub fn cell_size(mut self, cell_size: f32) -> Self {
        self.config.cell_size = cell_size;
        self
    }
    pub fn gravity(mut self, gravity: f32) -> Self {
        self.config.gravity = gravity;
        self
    }
    pub fn wind(mut self, strength: f32, frequency: f32) -> Self {
        self.config.wind_strength = strength;
        self.config.wind_frequency = frequency;
        self
    }
    /// Velocity multiplier per frame, 1.0 means no friction
    pub fn friction(mut self, friction: f32) -> Self {
        self.config.friction = friction;
        self
    }
    /// How many grains the emitter drops per frame, and the cap on live grains
    pub fn spawning(mut self, spawn_per_frame: usize, max_particles: usize) -> Self {
        self.config.spawn_per_frame = spawn_per_frame;
        self.config.max_particles = max_particles;
        self
    }
    /// How settled grains wear away
    pub fn life(mut self, decay: f32, threshold: f32, removal_chance: f64) -> Self {
        self.config.life_decay = decay;
        self.config.life_threshold = threshold;
        self.config.removal_chance = removal_chance;
        self
    }
    /// How often avalanches happen and the half extents of the cleared region in cells
    pub fn avalanche(mut self, chance: f64, half_width: usize, half_height: usize) -> Self {
        self.config.avalanche_chance = chance;
        self.config.avalanche_half_width = half_width;
        self.config.avalanche_half_height = half_height;
        self
    }
    pub fn emitter_speed(mut self, emitter_speed: f32) -> Self {
        self.config.emitter_speed = emitter_speed;
        self
    }

    pub fn build(self) -> Result<SandConfig, AnimationError> {
        let c = self.config;
        if !(c.cell_size.is_finite() && c.cell_size >= 1.0) {
            return Err(AnimationError::InvalidConfig(format!(
                "cell size must be at least one pixel, got {}",
                c.cell_size
            )));
        }
        if !(c.friction > 0.0 && c.friction <= 1.0) {
            return Err(AnimationError::InvalidConfig(format!(
                "friction must be in (0, 1], got {}",
                c.friction
            )));
        }
        if !(c.life_decay > 0.0 && c.life_decay <= 1.0) {
            return Err(AnimationError::InvalidConfig(format!(
                "life decay must be in (0, 1], got {}",
                c.life_decay
            )));
        }
        for (name, p) in [
            ("removal chance", c.removal_chance),
            ("avalanche chance", c.avalanche_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(AnimationError::InvalidConfig(format!(
                    "{name} must be a probability, got {p}"
                )));
            }
        }
        Ok(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(SandConfigBuilder::new().build().is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            SandConfigBuilder::new().cell_size(0.0).build(),
            Err(AnimationError::InvalidConfig(_))
        ));
        assert!(SandConfigBuilder::new().friction(1.5).build().is_err());
        assert!(SandConfigBuilder::new().life(0.0, 0.1, 0.5).build().is_err());
        assert!(SandConfigBuilder::new().avalanche(2.0, 1, 1).build().is_err());
        assert!(SandConfigBuilder::new().life(0.9, 0.1, -0.1).build().is_err());
    }
}
