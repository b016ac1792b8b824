//! A gallery of decorative 2D animations.
//!
//! * [`animations`] holds the effects and the interface they share.
//! * [`render`] is the software canvas they draw on.
//! * [`gallery`] switches between animations and drives the active one.
//! * [`gui`] wires all of that into bevy and egui.

pub mod animations;
pub mod config;
pub mod gallery;
pub mod gui;
pub mod render;
pub mod util;
