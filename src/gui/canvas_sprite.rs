//! Shows the gallery canvas as a full window sprite and keeps it the size of the window

use bevy::{
    app::{App, Plugin, Startup, Update},
    asset::{Assets, Handle},
    core::FrameCount,
    core_pipeline::{
        clear_color::ClearColorConfig,
        core_2d::{Camera2d, Camera2dBundle},
    },
    ecs::{
        component::Component,
        event::EventReader,
        query::With,
        schedule::IntoSystemConfigs,
        system::{Commands, Query, Res, ResMut, Resource},
    },
    log::{debug, warn},
    math::Vec2,
    render::{color::Color, texture::Image},
    sprite::{Sprite, SpriteBundle},
    time::Time,
    window::WindowResized,
};

use crate::gallery::Gallery;
use crate::render::canvas::CanvasSize;
use crate::util::clock::Clock;

/// The image asset the canvas is uploaded into every frame
#[derive(Resource, Debug, Clone)]
pub struct CanvasImage(pub Handle<Image>);

/// Marks the sprite that displays the canvas
#[derive(Component, Debug, Default)]
pub struct CanvasSprite;

pub struct CanvasSpritePlugin;

impl Plugin for CanvasSpritePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, Self::setup);
        app.add_systems(
            Update,
            (Self::resize_system, Self::render_system).chain(),
        );
    }
}

/// Bevy Systems
impl CanvasSpritePlugin {
    /// Spawn the camera and the sprite the canvas is shown on
    pub fn setup(mut commands: Commands, mut images: ResMut<Assets<Image>>, gallery: Res<Gallery>) {
        commands.spawn(Camera2dBundle {
            camera_2d: Camera2d {
                clear_color: ClearColorConfig::Custom(Color::rgb(0.0, 0.0, 0.0)),
            },
            ..Default::default()
        });

        let canvas = gallery.canvas();
        let handle = images.add(canvas.to_bevy_image());
        commands.spawn((
            SpriteBundle {
                texture: handle.clone(),
                sprite: Sprite {
                    custom_size: Some(canvas.size().as_vec2()),
                    ..Default::default()
                },
                ..Default::default()
            },
            CanvasSprite,
        ));
        commands.insert_resource(CanvasImage(handle));
    }

    /// Follow the window size, only the latest resize of the frame matters
    pub fn resize_system(
        mut resize_events: EventReader<WindowResized>,
        mut gallery: ResMut<Gallery>,
        mut sprites: Query<&mut Sprite, With<CanvasSprite>>,
    ) {
        let Some(event) = resize_events.read().last() else {
            return;
        };
        let size = CanvasSize::new(event.width.round() as u32, event.height.round() as u32);
        debug!(?size, "Window resized");
        if let Err(error) = gallery.resize(size) {
            warn!(%error, "Could not resize the canvas");
            return;
        }
        for mut sprite in sprites.iter_mut() {
            sprite.custom_size = Some(Vec2::new(event.width, event.height));
        }
    }

    /// The per refresh render callback, uploads the canvas whenever it changed
    pub fn render_system(
        time: Res<Time>,
        frame: Res<FrameCount>,
        mut gallery: ResMut<Gallery>,
        canvas_image: Option<Res<CanvasImage>>,
        mut images: ResMut<Assets<Image>>,
    ) {
        let clock = Clock::new(time.as_generic(), frame.as_ref().to_owned());
        if !gallery.tick(&clock) {
            return;
        }
        let Some(canvas_image) = canvas_image else {
            return;
        };
        if let Some(image) = images.get_mut(&canvas_image.0) {
            gallery.canvas().copy_into(image);
        }
    }
}
