//! Main visualization plugin that ties all systems together.

use bevy::prelude::*;

use crate::camera::CameraPlugin;
use crate::overlay::OverlayPlugin;
use crate::sync::SyncPlugin;

/// Main plugin for the rescue board viewer.
///
/// Sets up the window and adds the camera, sync and overlay plugins.
/// Insert [`crate::settings::ClientSettings`] and
/// [`crate::settings::LevelSource`] before adding it to override defaults.
pub struct RescueVizPlugin;

impl Plugin for RescueVizPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Castle Rescue".into(),
                resolution: (1280., 720.).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::srgb(0.08, 0.09, 0.11)))
        .add_plugins((SyncPlugin, CameraPlugin, OverlayPlugin));
    }
}
