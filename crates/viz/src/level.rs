//! Level spawning and structural discovery.
//!
//! Walls and doors are spawned once from the [`LevelSource`], tagged and
//! labeled with their edge key. Discovery then walks the tagged entities and
//! fills the applier's registry, the same way a hand-authored scene would be
//! picked up.

use bevy::prelude::*;
use rescue_events::DoorState;
use rescue_sync::{Prefab, Scene};

use crate::settings::{ClientSettings, LevelSource};
use crate::sync::SyncState;
use crate::world_scene::WorldScene;

/// Marks a wall placed at level load.
#[derive(Component, Debug, Clone, Copy)]
pub struct WallTag;

/// Marks a door placed at level load, with its authored state.
#[derive(Component, Debug, Clone, Copy)]
pub struct DoorTag {
    pub state: DoorState,
}

/// Exclusive system to spawn the level's walls and doors.
pub fn spawn_level(world: &mut World) {
    let level = world
        .get_resource::<LevelSource>()
        .cloned()
        .unwrap_or_default();
    let layout = world
        .get_resource::<ClientSettings>()
        .map(|settings| settings.config.layout)
        .unwrap_or_default();

    let mut scene = WorldScene::new(world);
    for wall in &level.layout.walls {
        let key = wall.key();
        let entity = scene.spawn(Prefab::Wall, layout.edge_placement(&key));
        scene.set_label(entity, &key.label());
        scene.insert(entity, WallTag);
    }
    for door in &level.layout.doors {
        let key = door.key();
        let prefab = match door.state {
            DoorState::Closed => Prefab::DoorClosed,
            DoorState::Open => Prefab::DoorOpen,
        };
        let entity = scene.spawn(prefab, layout.edge_placement(&key));
        scene.set_label(entity, &key.label());
        scene.insert(entity, DoorTag { state: door.state });
    }

    tracing::info!(
        "Spawned level: {} walls, {} doors",
        level.layout.walls.len(),
        level.layout.doors.len()
    );
}

/// System to register tagged walls and doors by label.
pub fn discover_structures(
    walls: Query<(Entity, &Name), With<WallTag>>,
    doors: Query<(Entity, &Name, &DoorTag)>,
    mut state: ResMut<SyncState>,
) {
    let registry = state.applier.registry_mut();
    let walls_found = walls
        .iter()
        .filter(|(entity, name)| registry.discover_wall(*entity, name.as_str()))
        .count();
    let doors_found = doors
        .iter()
        .filter(|(entity, name, tag)| registry.discover_door(*entity, name.as_str(), tag.state))
        .count();

    tracing::info!("Discovered {} walls and {} doors", walls_found, doors_found);
}
