//! This module contains all the bevy and egui wiring.
//! Things that are drawn in screen coordinates or react to window and keyboard events.

use bevy::app::{PluginGroup, PluginGroupBuilder};

pub mod canvas_sprite;
pub mod gallery_panel;

pub struct GuiPluginGroup;

impl PluginGroup for GuiPluginGroup {
    fn build(self) -> PluginGroupBuilder {
        PluginGroupBuilder::start::<Self>()
            .add(canvas_sprite::CanvasSpritePlugin)
            .add(gallery_panel::GalleryPanelPlugin)
    }
}
