//! [`Scene`] over a Bevy [`World`].
//!
//! Spawned entities carry a PBR bundle built from [`PrefabAssets`] and a
//! [`SceneVisual`] marker naming their prefab. Labels live in [`Name`].

use bevy::math::EulerRot;
use bevy::prelude::*;
use rescue_sync::{Placement, Prefab, Scene, WallMaterial};

use crate::prefabs::PrefabAssets;

/// Prefab an entity was spawned from.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneVisual(pub Prefab);

/// Borrowed world acting as the applier's scene.
pub struct WorldScene<'w> {
    world: &'w mut World,
}

impl<'w> WorldScene<'w> {
    pub fn new(world: &'w mut World) -> Self {
        Self { world }
    }

    /// Adds components to a live entity.
    pub fn insert<B: Bundle>(&mut self, entity: Entity, bundle: B) {
        if let Some(mut entity) = self.world.get_entity_mut(entity) {
            entity.insert(bundle);
        }
    }
}

pub fn placement_transform(placement: Placement) -> Transform {
    Transform::from_translation(Vec3::from_array(placement.translation))
        .with_rotation(Quat::from_rotation_y(placement.yaw_degrees.to_radians()))
}

pub fn transform_placement(transform: &Transform) -> Placement {
    let (yaw, _, _) = transform.rotation.to_euler(EulerRot::YXZ);
    Placement::new(transform.translation.to_array(), yaw.to_degrees())
}

impl Scene for WorldScene<'_> {
    type Handle = Entity;

    fn spawn(&mut self, prefab: Prefab, placement: Placement) -> Entity {
        let visual = self
            .world
            .get_resource::<PrefabAssets>()
            .map(|assets| assets.visual(prefab))
            .unwrap_or_default();

        self.world
            .spawn((
                PbrBundle {
                    mesh: visual.mesh,
                    material: visual.material,
                    transform: placement_transform(placement),
                    ..default()
                },
                SceneVisual(prefab),
            ))
            .id()
    }

    fn despawn(&mut self, entity: Entity) {
        if self.world.get_entity(entity).is_some() {
            self.world.despawn(entity);
        }
    }

    fn set_translation(&mut self, entity: Entity, translation: [f32; 3]) {
        if let Some(mut transform) = self.world.get_mut::<Transform>(entity) {
            transform.translation = Vec3::from_array(translation);
        }
    }

    fn set_visible(&mut self, entity: Entity, visible: bool) {
        if let Some(mut visibility) = self.world.get_mut::<Visibility>(entity) {
            *visibility = if visible {
                Visibility::Inherited
            } else {
                Visibility::Hidden
            };
        }
    }

    fn set_wall_material(&mut self, entity: Entity, material: WallMaterial) {
        let Some(handle) = self
            .world
            .get_resource::<PrefabAssets>()
            .map(|assets| assets.wall_material(material))
        else {
            return;
        };
        if let Some(mut current) = self.world.get_mut::<Handle<StandardMaterial>>(entity) {
            *current = handle;
        }
    }

    fn placement(&self, entity: Entity) -> Option<Placement> {
        self.world.get::<Transform>(entity).map(transform_placement)
    }

    fn set_label(&mut self, entity: Entity, label: &str) {
        self.insert(entity, Name::new(label.to_string()));
    }

    fn label(&self, entity: Entity) -> Option<String> {
        self.world.get::<Name>(entity).map(|name| name.as_str().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_and_read_back() {
        let mut world = World::new();
        let mut scene = WorldScene::new(&mut world);

        let entity = scene.spawn(Prefab::Fire, Placement::new([10.0, 0.0, -20.0], 180.0));
        scene.set_label(entity, "fire");

        let placement = scene.placement(entity).unwrap();
        assert_eq!(placement.translation, [10.0, 0.0, -20.0]);
        assert!((placement.yaw_degrees.abs() - 180.0).abs() < 1e-3);
        assert_eq!(scene.label(entity).as_deref(), Some("fire"));
        assert_eq!(world.get::<SceneVisual>(entity), Some(&SceneVisual(Prefab::Fire)));
    }

    #[test]
    fn test_visibility_and_translation() {
        let mut world = World::new();
        let mut scene = WorldScene::new(&mut world);
        let entity = scene.spawn(Prefab::Agent(0), Placement::default());

        scene.set_visible(entity, false);
        scene.set_translation(entity, [1.0, 2.0, 3.0]);

        assert_eq!(world.get::<Visibility>(entity), Some(&Visibility::Hidden));
        assert_eq!(
            world.get::<Transform>(entity).unwrap().translation,
            Vec3::new(1.0, 2.0, 3.0)
        );
    }

    #[test]
    fn test_wall_material_swap() {
        let mut world = World::new();
        world.insert_resource(PrefabAssets {
            wall_base: Handle::weak_from_u128(1),
            wall_damaged: Handle::weak_from_u128(2),
            ..default()
        });
        let mut scene = WorldScene::new(&mut world);
        let wall = scene.spawn(Prefab::Wall, Placement::default());

        scene.set_wall_material(wall, WallMaterial::Damaged);

        assert_eq!(
            world.get::<Handle<StandardMaterial>>(wall),
            Some(&Handle::weak_from_u128(2))
        );
    }

    #[test]
    fn test_operations_on_despawned_entity_are_noops() {
        let mut world = World::new();
        let mut scene = WorldScene::new(&mut world);
        let entity = scene.spawn(Prefab::Smoke, Placement::default());

        scene.despawn(entity);
        scene.despawn(entity);
        scene.set_visible(entity, true);
        scene.set_label(entity, "gone");

        assert!(scene.placement(entity).is_none());
        assert!(scene.label(entity).is_none());
    }
}
