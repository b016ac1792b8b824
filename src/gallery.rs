//! The gallery controller.
//!
//! Holds the registry and the one animation currently on screen. It draws onto a canvas it is
//! handed and publishes what the UI should display through [`GalleryLabels`], so it never
//! needs to know about windows, widgets or input devices.

use bevy::{
    ecs::system::Resource,
    log::{info, trace, warn},
    render::color::Color,
};
use thiserror::Error;

use crate::animations::{Animation, AnimationError, AnimationRegistry};
use crate::render::canvas::{Canvas, CanvasError, CanvasSize};
use crate::util::clock::Clock;

pub mod scheduler;
pub mod selection;

use scheduler::{FrameScheduler, FrameToken};
use selection::AnimationSelector;

pub const ERROR_TITLE: &str = "Error loading animation";
pub const ERROR_DESCRIPTION: &str = "Please try again or pick another animation.";

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("the gallery needs at least one registered animation")]
    EmptyRegistry,
    #[error(transparent)]
    Canvas(#[from] CanvasError),
}

/// Everything the UI shows about the current animation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GalleryLabels {
    pub title: String,
    pub description: String,
    pub byline: String,
    /// `"3 / 8"`
    pub counter: String,
    pub can_go_previous: bool,
    pub can_go_next: bool,
}

#[derive(Resource)]
pub struct Gallery {
    registry: AnimationRegistry,
    seed: u64,
    index: usize,
    active: Option<Box<dyn Animation>>,
    token: Option<FrameToken>,
    scheduler: FrameScheduler,
    canvas: Canvas,
    labels: GalleryLabels,
    /// The canvas changed outside of a frame and has to be shown once
    needs_upload: bool,
}

impl Gallery {
    /// Nothing is shown until [`Gallery::start`] or [`Gallery::show`] is called
    pub fn new(registry: AnimationRegistry, canvas: Canvas, seed: u64) -> Result<Self, GalleryError> {
        if registry.is_empty() {
            return Err(GalleryError::EmptyRegistry);
        }
        Ok(Self {
            registry,
            seed,
            index: 0,
            active: None,
            token: None,
            scheduler: FrameScheduler::new(),
            canvas,
            labels: GalleryLabels::default(),
            needs_upload: false,
        })
    }

    /// Show whichever animation the selector resolves to
    pub fn start(&mut self, selector: &AnimationSelector) -> bool {
        let index = selector.resolve(&self.registry);
        info!(?selector, index, "Starting gallery");
        self.show(index)
    }

    /// Stop the current animation and load another one.
    /// A failure is logged and shown in the labels, returns whether the animation is running.
    pub fn show(&mut self, index: usize) -> bool {
        if index >= self.registry.len() {
            warn!(index, len = self.registry.len(), "No animation at this index");
            return false;
        }
        self.stop();
        self.index = index;
        let loaded = match self.load(index) {
            Ok(()) => true,
            Err(error) => {
                let title = self.registry.get(index).map(|e| e.metadata.title);
                warn!(%error, ?title, "Failed to load animation");
                self.show_error();
                false
            }
        };
        self.refresh_navigation();
        loaded
    }

    fn load(&mut self, index: usize) -> Result<(), AnimationError> {
        let Some(entry) = self.registry.get(index) else {
            return Ok(());
        };
        let metadata = entry.metadata;
        let mut animation = entry.build(self.seed)?;
        animation.init(self.canvas.size())?;

        info!(title = metadata.title, "Showing animation");
        self.labels.title = metadata.title.to_owned();
        self.labels.description = metadata.description.to_owned();
        self.labels.byline = format!("by {}, {}", metadata.author, metadata.date);
        self.canvas.clear(Color::BLACK);
        self.active = Some(animation);
        self.token = Some(self.scheduler.request_frames());
        Ok(())
    }

    /// Blank the canvas and put the error message in the labels
    fn show_error(&mut self) {
        self.labels.title = ERROR_TITLE.to_owned();
        self.labels.description = ERROR_DESCRIPTION.to_owned();
        self.labels.byline.clear();
        self.canvas.clear(Color::BLACK);
        self.needs_upload = true;
    }

    /// Cancel the frame registration and drop the current animation
    pub fn stop(&mut self) {
        if let Some(token) = self.token.take() {
            self.scheduler.cancel(token);
        }
        self.active = None;
    }

    fn refresh_navigation(&mut self) {
        self.labels.counter = format!("{} / {}", self.index + 1, self.registry.len());
        self.labels.can_go_previous = self.can_go_previous();
        self.labels.can_go_next = self.can_go_next();
    }

    pub fn can_go_previous(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.index + 1 < self.registry.len()
    }

    /// Does nothing on the first animation, returns whether we moved
    pub fn previous(&mut self) -> bool {
        if !self.can_go_previous() {
            return false;
        }
        self.show(self.index - 1);
        true
    }

    /// Does nothing on the last animation, returns whether we moved
    pub fn next(&mut self) -> bool {
        if !self.can_go_next() {
            return false;
        }
        self.show(self.index + 1);
        true
    }

    /// Resize the canvas and rebuild the animation's records for the new size.
    /// Empty sizes, such as a minimised window, are ignored.
    pub fn resize(&mut self, size: CanvasSize) -> Result<(), GalleryError> {
        if size.is_empty() || size == self.canvas.size() {
            return Ok(());
        }
        self.canvas.resize(size)?;
        if let Some(animation) = self.active.as_mut() {
            if let Err(error) = animation.resize(size) {
                warn!(%error, "Animation could not be resized");
                self.stop();
                self.show_error();
            }
        }
        Ok(())
    }

    /// The render callback: advance and draw the active animation if it is registered for frames.
    /// Returns whether the canvas has to be uploaded.
    pub fn tick(&mut self, clock: &Clock) -> bool {
        let pending = std::mem::take(&mut self.needs_upload);
        let Some(token) = self.token else {
            return pending;
        };
        if !self.scheduler.is_active(token) {
            return pending;
        }
        trace!(frame = clock.get_current_frame(), %token, "Frame");
        match self.active.as_mut() {
            Some(animation) => {
                animation.update(clock);
                animation.draw(&mut self.canvas);
                true
            }
            None => pending,
        }
    }
}

/* ======================================
 * Simple Getters
 * ====================================== */
impl Gallery {
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }
    pub fn labels(&self) -> &GalleryLabels {
        &self.labels
    }
    pub fn index(&self) -> usize {
        self.index
    }
    pub fn len(&self) -> usize {
        self.registry.len()
    }
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
    pub fn active_token(&self) -> Option<FrameToken> {
        self.token
    }
    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }
}
