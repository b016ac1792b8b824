//! The drawing surface animations paint onto.
//!
//! Kept free of any window or asset handling so animations can be tested headless.
//! Only the conversion to a bevy image touches the renderer.

pub mod canvas;
