//! Prefab meshes and materials.
//!
//! Every [`Prefab`] the applier can ask for maps to a mesh/material pair built
//! once at startup from simple primitives.

use bevy::prelude::*;
use rescue_sync::{Prefab, WallMaterial};

use crate::settings::ClientSettings;

/// Agent colors, one per slot; slots beyond the list reuse it cyclically.
const AGENT_COLORS: [(f32, f32, f32); 6] = [
    (0.20, 0.45, 0.90),
    (0.15, 0.70, 0.35),
    (0.85, 0.75, 0.15),
    (0.65, 0.30, 0.80),
    (0.10, 0.75, 0.80),
    (0.90, 0.45, 0.65),
];

/// Mesh and material for one prefab.
#[derive(Clone, Default, Debug)]
pub struct PrefabVisual {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}

/// Resource holding every prefab's visual.
#[derive(Resource, Clone, Default, Debug)]
pub struct PrefabAssets {
    pub fire: PrefabVisual,
    pub smoke: PrefabVisual,
    pub poi: PrefabVisual,
    /// Visual per agent slot.
    pub agents: Vec<PrefabVisual>,
    pub door_open: PrefabVisual,
    pub door_closed: PrefabVisual,
    pub wall_mesh: Handle<Mesh>,
    pub wall_base: Handle<StandardMaterial>,
    pub wall_damaged: Handle<StandardMaterial>,
}

impl PrefabAssets {
    /// Mesh and material for a prefab.
    pub fn visual(&self, prefab: Prefab) -> PrefabVisual {
        match prefab {
            Prefab::Fire => self.fire.clone(),
            Prefab::Smoke => self.smoke.clone(),
            Prefab::Poi => self.poi.clone(),
            Prefab::Agent(slot) => self.agents.get(slot).cloned().unwrap_or_default(),
            Prefab::DoorOpen => self.door_open.clone(),
            Prefab::DoorClosed => self.door_closed.clone(),
            Prefab::Wall => PrefabVisual {
                mesh: self.wall_mesh.clone(),
                material: self.wall_base.clone(),
            },
        }
    }

    pub fn wall_material(&self, material: WallMaterial) -> Handle<StandardMaterial> {
        match material {
            WallMaterial::Base => self.wall_base.clone(),
            WallMaterial::Damaged => self.wall_damaged.clone(),
        }
    }
}

/// System to build prefab assets sized to the configured grid.
pub fn build_prefabs(
    mut commands: Commands,
    settings: Res<ClientSettings>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let cell = settings.config.layout.cell_size;
    let mut flat = |color: Color| {
        materials.add(StandardMaterial {
            base_color: color,
            perceptual_roughness: 0.8,
            ..default()
        })
    };

    let wall_base = flat(Color::srgb(0.55, 0.52, 0.48));
    let wall_damaged = flat(Color::srgb(0.45, 0.22, 0.18));
    let door_open_material = flat(Color::srgb(0.35, 0.65, 0.30));
    let door_closed_material = flat(Color::srgb(0.45, 0.28, 0.12));
    let poi_material = flat(Color::srgb(0.95, 0.95, 0.95));
    let agent_materials: Vec<_> = (0..settings.config.agents.count)
        .map(|slot| {
            let (r, g, b) = AGENT_COLORS[slot % AGENT_COLORS.len()];
            flat(Color::srgb(r, g, b))
        })
        .collect();

    let fire_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.95, 0.35, 0.05),
        emissive: LinearRgba::rgb(6.0, 1.5, 0.2),
        ..default()
    });
    let smoke_material = materials.add(StandardMaterial {
        base_color: Color::srgba(0.35, 0.35, 0.38, 0.6),
        alpha_mode: AlphaMode::Blend,
        ..default()
    });

    let agent_mesh = meshes.add(Capsule3d::new(cell * 0.15, cell * 0.35));
    let door_open_mesh = meshes.add(Cuboid::new(cell * 0.1, cell * 0.6, cell * 0.6));
    let door_closed_mesh = meshes.add(Cuboid::new(cell * 0.6, cell * 0.6, cell * 0.1));

    let assets = PrefabAssets {
        fire: PrefabVisual {
            mesh: meshes.add(Cuboid::new(cell * 0.5, cell * 0.3, cell * 0.5)),
            material: fire_material,
        },
        smoke: PrefabVisual {
            mesh: meshes.add(Sphere::new(cell * 0.3)),
            material: smoke_material,
        },
        poi: PrefabVisual {
            mesh: meshes.add(Cylinder::new(cell * 0.15, cell * 0.5)),
            material: poi_material,
        },
        agents: agent_materials
            .into_iter()
            .map(|material| PrefabVisual {
                mesh: agent_mesh.clone(),
                material,
            })
            .collect(),
        door_open: PrefabVisual {
            mesh: door_open_mesh,
            material: door_open_material,
        },
        door_closed: PrefabVisual {
            mesh: door_closed_mesh,
            material: door_closed_material,
        },
        wall_mesh: meshes.add(Cuboid::new(cell, cell * 0.6, cell * 0.08)),
        wall_base,
        wall_damaged,
    };

    commands.insert_resource(assets);
}
