//! Every animation in the gallery and the interface they share.
//!
//! Animations never talk to each other or to the window. Each one owns its own records,
//! advances them in [`Animation::update`] and paints them in [`Animation::draw`].

use bevy::log::debug;
use strum_macros::{EnumIter, IntoStaticStr};
use thiserror::Error;

use crate::render::canvas::{Canvas, CanvasError, CanvasSize};
use crate::util::clock::Clock;

pub mod aurora;
pub mod fireflies;
pub mod flowing_sand;
pub mod lava_lamp;
pub mod mandala;
pub mod ocean_waves;
pub mod particle_network;
pub mod star_tunnel;

/// Describes an animation for display in the gallery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metadata {
    pub title: &'static str,
    pub description: &'static str,
    pub author: &'static str,
    pub date: &'static str,
}

#[derive(Debug, Error)]
pub enum AnimationError {
    #[error("cannot initialise an animation on an empty {width}x{height} canvas")]
    EmptyCanvas { width: u32, height: u32 },
    #[error("invalid animation configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Canvas(#[from] CanvasError),
}

/// Fails with [`AnimationError::EmptyCanvas`] if there is nothing to draw on
pub fn ensure_drawable(size: CanvasSize) -> Result<(), AnimationError> {
    if size.is_empty() {
        return Err(AnimationError::EmptyCanvas {
            width: size.width,
            height: size.height,
        });
    }
    Ok(())
}

/// The capabilities every effect provides to the gallery
pub trait Animation: Send + Sync {
    fn metadata(&self) -> Metadata;

    /// Build the records for a canvas of this size.
    /// Called once before the first frame.
    fn init(&mut self, size: CanvasSize) -> Result<(), AnimationError>;

    /// The canvas changed size. Every record must end up inside the new bounds.
    fn resize(&mut self, size: CanvasSize) -> Result<(), AnimationError> {
        self.init(size)
    }

    /// Advance one frame
    fn update(&mut self, clock: &Clock);

    /// Paint the current state
    fn draw(&self, canvas: &mut Canvas);
}

/// Builds a fresh animation from a seed
pub type AnimationFactory =
    Box<dyn Fn(u64) -> Result<Box<dyn Animation>, AnimationError> + Send + Sync>;

/// A registered animation: what to show in the UI and how to build it
pub struct AnimationEntry {
    pub metadata: Metadata,
    factory: AnimationFactory,
}

impl AnimationEntry {
    pub fn new<F>(metadata: Metadata, factory: F) -> Self
    where
        F: Fn(u64) -> Result<Box<dyn Animation>, AnimationError> + Send + Sync + 'static,
    {
        Self {
            metadata,
            factory: Box::new(factory),
        }
    }

    pub fn build(&self, seed: u64) -> Result<Box<dyn Animation>, AnimationError> {
        (self.factory)(seed)
    }
}

/// The built in animations, in gallery order
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, IntoStaticStr)]
pub enum AnimationKind {
    ParticleNetwork,
    OceanWaves,
    Aurora,
    Mandala,
    StarTunnel,
    Fireflies,
    LavaLamp,
    FlowingSand,
}

impl AnimationKind {
    pub fn metadata(self) -> Metadata {
        match self {
            AnimationKind::ParticleNetwork => particle_network::METADATA,
            AnimationKind::OceanWaves => ocean_waves::METADATA,
            AnimationKind::Aurora => aurora::METADATA,
            AnimationKind::Mandala => mandala::METADATA,
            AnimationKind::StarTunnel => star_tunnel::METADATA,
            AnimationKind::Fireflies => fireflies::METADATA,
            AnimationKind::LavaLamp => lava_lamp::METADATA,
            AnimationKind::FlowingSand => flowing_sand::METADATA,
        }
    }

    pub fn build(self, seed: u64) -> Result<Box<dyn Animation>, AnimationError> {
        let name: &'static str = self.into();
        debug!(name, seed, "Building animation");
        Ok(match self {
            AnimationKind::ParticleNetwork => {
                Box::new(particle_network::ParticleNetwork::new(seed))
            }
            AnimationKind::OceanWaves => Box::new(ocean_waves::OceanWaves::new(seed)),
            AnimationKind::Aurora => Box::new(aurora::Aurora::new(seed)),
            AnimationKind::Mandala => Box::new(mandala::Mandala::new(seed)),
            AnimationKind::StarTunnel => Box::new(star_tunnel::StarTunnel::new(seed)),
            AnimationKind::Fireflies => Box::new(fireflies::Fireflies::new(seed)),
            AnimationKind::LavaLamp => Box::new(lava_lamp::LavaLamp::new(seed)),
            AnimationKind::FlowingSand => Box::new(flowing_sand::FlowingSand::new(
                seed,
                flowing_sand::SandConfigBuilder::new().build()?,
            )),
        })
    }

    pub fn entry(self) -> AnimationEntry {
        AnimationEntry::new(self.metadata(), move |seed| self.build(seed))
    }
}

/// The ordered list of animations the gallery can show
#[derive(Default)]
pub struct AnimationRegistry {
    entries: Vec<AnimationEntry>,
}

impl AnimationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every built in animation
    pub fn builtin() -> Self {
        use strum::IntoEnumIterator;
        let mut registry = Self::new();
        for kind in AnimationKind::iter() {
            registry.register(kind.entry());
        }
        registry
    }

    pub fn register(&mut self, entry: AnimationEntry) -> &mut Self {
        self.entries.push(entry);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&AnimationEntry> {
        self.entries.get(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnimationEntry> {
        self.entries.iter()
    }

    /// Index of the first animation whose title contains `needle`, ignoring case
    pub fn find_by_title(&self, needle: &str) -> Option<usize> {
        let needle = needle.to_lowercase();
        self.entries
            .iter()
            .position(|entry| entry.metadata.title.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_builtin_registry_order() {
        let registry = AnimationRegistry::builtin();
        assert_eq!(registry.len(), AnimationKind::iter().count());
        assert_eq!(registry.get(2).unwrap().metadata, aurora::METADATA);
        assert_eq!(
            registry.get(registry.len() - 1).unwrap().metadata,
            flowing_sand::METADATA
        );
    }

    #[test]
    fn test_find_by_title_ignores_case() {
        let registry = AnimationRegistry::builtin();
        assert_eq!(registry.find_by_title("AURORA"), Some(2));
        assert_eq!(registry.find_by_title("sand"), Some(registry.len() - 1));
        assert_eq!(registry.find_by_title("no such thing"), None);
    }

    #[test]
    fn test_titles_are_unique() {
        let titles: Vec<_> = AnimationKind::iter().map(|k| k.metadata().title).collect();
        let mut deduped = titles.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(titles.len(), deduped.len());
    }

    #[test]
    fn test_every_animation_runs_and_draws() {
        let size = CanvasSize::new(160, 120);
        let mut canvas = Canvas::new(size).unwrap();
        let mut clock = Clock::default();
        for kind in AnimationKind::iter() {
            let mut animation = kind.build(7).unwrap();
            assert_eq!(animation.metadata(), kind.metadata());
            animation.init(size).unwrap();
            for _ in 0..5 {
                clock.update(Duration::from_millis(16));
                animation.update(&clock);
                animation.draw(&mut canvas);
            }
            let shrunk = CanvasSize::new(40, 30);
            animation.resize(shrunk).unwrap();
            canvas.resize(shrunk).unwrap();
            animation.update(&clock);
            animation.draw(&mut canvas);
            canvas.resize(size).unwrap();
        }
    }

    #[test]
    fn test_every_animation_rejects_empty_canvas() {
        for kind in AnimationKind::iter() {
            let mut animation = kind.build(1).unwrap();
            let err = animation.init(CanvasSize::new(0, 100)).unwrap_err();
            assert!(matches!(err, AnimationError::EmptyCanvas { .. }), "{:?}", kind);
        }
    }
}
