use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::window::{Window, WindowPlugin};
use bevy::{log::LogPlugin, prelude::*};
use bevy_egui::EguiPlugin;
use clap::Parser;

use canvas_gallery::animations::AnimationRegistry;
use canvas_gallery::config::Cli;
use canvas_gallery::gallery::{Gallery, GalleryError};
use canvas_gallery::gui::gallery_panel::InitialSelection;
use canvas_gallery::gui::GuiPluginGroup;
use canvas_gallery::render::canvas::{Canvas, CanvasSize};

fn main() -> Result<(), GalleryError> {
    let cli = Cli::parse();
    let canvas = Canvas::new(CanvasSize::new(cli.width, cli.height))?;
    let gallery = Gallery::new(AnimationRegistry::builtin(), canvas, cli.seed)?;

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(LogPlugin {
                    level: cli.log_level.into(),
                    ..Default::default()
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Canvas Gallery".into(),
                        resolution: (cli.width as f32, cli.height as f32).into(),
                        ..Default::default()
                    }),
                    ..Default::default()
                })
                .set(ImagePlugin::default_nearest()),
        )
        .add_plugins(EguiPlugin)
        .add_plugins(FrameTimeDiagnosticsPlugin)
        .insert_resource(gallery)
        .insert_resource(InitialSelection(cli.selector()))
        .add_plugins(GuiPluginGroup)
        .run();
    Ok(())
}
