//! Small engine agnostic helpers shared by the animations and the gallery.

pub mod clock;
pub mod functions;
pub mod grid;
