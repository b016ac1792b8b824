use std::{fmt::Debug, time::Duration};

use bevy::{core::FrameCount, time::Time};

/// The per frame clock handed to every animation
#[derive(Default, Clone, Copy)]
pub struct Clock {
    time: Time,
    frame: FrameCount,
}

impl Debug for Clock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Clock")
            .field("elapsed", &self.time.elapsed())
            .field("delta", &self.time.delta())
            .field("frame", &self.frame.0)
            .finish()
    }
}

impl Clock {
    pub fn new(time: Time, frame: FrameCount) -> Self {
        Self { time, frame }
    }
    pub fn get_last_delta(&self) -> Duration {
        self.time.delta()
    }
    pub fn get_current_frame(&self) -> u32 {
        self.frame.0
    }
    /// The last frame delta expressed in 60Hz frames.
    /// Animations are tuned per frame, this keeps them speed independent of the refresh rate.
    /// Clamped so a stalled window doesn't teleport everything on the next frame.
    pub fn frame_scale(&self) -> f32 {
        (self.time.delta_seconds() * 60.0).clamp(0.0, 3.0)
    }
    /// Mostly used for testing
    pub fn update(&mut self, delta: Duration) {
        self.time.advance_by(delta);
        self.frame.0 += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_advances_time_and_frame() {
        let mut clock = Clock::default();
        clock.update(Duration::from_millis(16));
        clock.update(Duration::from_millis(16));
        assert_eq!(clock.get_current_frame(), 2);
        assert_eq!(clock.get_last_delta(), Duration::from_millis(16));
    }

    #[test]
    fn test_frame_scale_is_clamped() {
        let mut clock = Clock::default();
        clock.update(Duration::from_secs(5));
        assert_eq!(clock.frame_scale(), 3.0);
    }
}
