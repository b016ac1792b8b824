//! The navigation panel and arrow key navigation

use bevy::{
    app::{App, Plugin, Startup, Update},
    diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin},
    ecs::system::{Res, ResMut, Resource},
    input::{keyboard::KeyCode, Input},
};
use bevy_egui::{
    egui::{self, Button},
    EguiContexts,
};

use crate::gallery::{selection::AnimationSelector, Gallery};

/// Which animation to open with, usually from the command line
#[derive(Resource, Debug, Clone, Default)]
pub struct InitialSelection(pub AnimationSelector);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Navigation {
    Previous,
    Next,
}

pub struct GalleryPanelPlugin;

impl Plugin for GalleryPanelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InitialSelection>();
        app.add_systems(Startup, Self::start_gallery_system);
        app.add_systems(
            Update,
            (Self::keyboard_navigation_system, Self::gallery_panel_system),
        );
    }
}

/// Bevy Systems
impl GalleryPanelPlugin {
    pub fn start_gallery_system(selection: Res<InitialSelection>, mut gallery: ResMut<Gallery>) {
        gallery.start(&selection.0);
    }

    /// Left and right arrows move through the gallery
    pub fn keyboard_navigation_system(keys: Res<Input<KeyCode>>, mut gallery: ResMut<Gallery>) {
        if keys.just_pressed(KeyCode::Left) {
            gallery.previous();
        } else if keys.just_pressed(KeyCode::Right) {
            gallery.next();
        }
    }

    pub fn gallery_panel_system(
        mut contexts: EguiContexts,
        diagnostics: Res<DiagnosticsStore>,
        mut gallery: ResMut<Gallery>,
    ) {
        let fps = diagnostics
            .get(FrameTimeDiagnosticsPlugin::FPS)
            .and_then(|fps| fps.smoothed())
            .unwrap_or(0.0);
        let labels = gallery.labels().clone();
        let mut navigation = None;

        egui::TopBottomPanel::bottom("gallery_panel").show(contexts.ctx_mut(), |ui| {
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(labels.can_go_previous, Button::new("< Previous"))
                    .clicked()
                {
                    navigation = Some(Navigation::Previous);
                }
                ui.label(labels.counter.as_str());
                if ui
                    .add_enabled(labels.can_go_next, Button::new("Next >"))
                    .clicked()
                {
                    navigation = Some(Navigation::Next);
                }
                ui.separator();
                ui.vertical(|ui| {
                    ui.heading(labels.title.as_str());
                    ui.label(labels.description.as_str());
                    if !labels.byline.is_empty() {
                        ui.small(labels.byline.as_str());
                    }
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("FPS: {:.0}", fps));
                });
            });
        });

        match navigation {
            Some(Navigation::Previous) => {
                gallery.previous();
            }
            Some(Navigation::Next) => {
                gallery.next();
            }
            None => {}
        }
    }
}
