//! Camera system: a fixed view framing the board, plus lighting.

use bevy::prelude::*;
use rescue_sync::GridLayout;

use crate::settings::{ClientSettings, LevelSource};

/// Plugin for the board camera and scene lighting.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(AmbientLight {
            color: Color::WHITE,
            brightness: 400.0,
        })
        .add_systems(Startup, setup_camera);
    }
}

/// Where the camera sits relative to the board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardFraming {
    /// World point the camera looks at.
    pub focus: Vec3,
    /// Distance from the focus.
    pub distance: f32,
    /// Angle above the board plane, in radians.
    pub pitch: f32,
}

impl BoardFraming {
    /// Framing for a `width` x `height` board.
    pub fn new(layout: &GridLayout, width: i32, height: i32) -> Self {
        let first = Vec3::from_array(layout.cell_translation(0, 0));
        let last = Vec3::from_array(
            layout.cell_translation(width.max(1) as usize - 1, height.max(1) as usize - 1),
        );
        let span = (width.max(height).max(1) as f32) * layout.cell_size;
        Self {
            focus: (first + last) / 2.0,
            distance: span * 1.3,
            pitch: 0.9,
        }
    }

    /// Camera position, looking down the board from its near edge.
    pub fn eye(&self) -> Vec3 {
        self.focus
            + Vec3::new(
                0.0,
                self.distance * self.pitch.sin(),
                self.distance * self.pitch.cos(),
            )
    }
}

/// System to spawn the camera and a sun light.
fn setup_camera(mut commands: Commands, settings: Res<ClientSettings>, level: Res<LevelSource>) {
    let (width, height) = level.extents();
    let framing = BoardFraming::new(&settings.config.layout, width, height);

    commands.spawn(Camera3dBundle {
        transform: Transform::from_translation(framing.eye()).looking_at(framing.focus, Vec3::Y),
        ..default()
    });

    commands.spawn(DirectionalLightBundle {
        directional_light: DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        transform: Transform::from_xyz(30.0, 80.0, 40.0).looking_at(framing.focus, Vec3::Y),
        ..default()
    });
}
