//! In-memory scene.
//!
//! Tracks entities in a map so the applier can run without an engine. Used
//! by the headless runner and throughout the tests.

use std::collections::BTreeMap;

use crate::scene::{Placement, Prefab, Scene, WallMaterial};

/// One live entity in a [`MemoryScene`].
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryEntity {
    pub prefab: Prefab,
    pub placement: Placement,
    pub visible: bool,
    pub material: WallMaterial,
    pub label: Option<String>,
}

/// A [`Scene`] backed by a map of entities.
#[derive(Debug, Default)]
pub struct MemoryScene {
    entities: BTreeMap<u64, MemoryEntity>,
    next_id: u64,
    spawned_total: usize,
    despawned_total: usize,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns a labeled entity, the way a level author would place one.
    pub fn spawn_labeled(&mut self, prefab: Prefab, placement: Placement, label: &str) -> u64 {
        let id = self.spawn(prefab, placement);
        self.set_label(id, label);
        id
    }

    pub fn get(&self, handle: u64) -> Option<&MemoryEntity> {
        self.entities.get(&handle)
    }

    pub fn contains(&self, handle: u64) -> bool {
        self.entities.contains_key(&handle)
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Number of live entities of the given prefab.
    pub fn count(&self, prefab: Prefab) -> usize {
        self.entities.values().filter(|e| e.prefab == prefab).count()
    }

    /// Live entities of the given prefab, in spawn order.
    pub fn entities_of(&self, prefab: Prefab) -> impl Iterator<Item = (u64, &MemoryEntity)> {
        self.entities
            .iter()
            .filter(move |(_, e)| e.prefab == prefab)
            .map(|(id, e)| (*id, e))
    }

    /// Finds a live entity by label.
    pub fn find_by_label(&self, label: &str) -> Option<u64> {
        self.entities
            .iter()
            .find(|(_, e)| e.label.as_deref() == Some(label))
            .map(|(id, _)| *id)
    }

    /// Total spawns since creation.
    pub fn spawned_total(&self) -> usize {
        self.spawned_total
    }

    /// Total despawns since creation.
    pub fn despawned_total(&self) -> usize {
        self.despawned_total
    }
}

impl Scene for MemoryScene {
    type Handle = u64;

    fn spawn(&mut self, prefab: Prefab, placement: Placement) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.spawned_total += 1;
        self.entities.insert(
            id,
            MemoryEntity {
                prefab,
                placement,
                visible: true,
                material: WallMaterial::Base,
                label: None,
            },
        );
        id
    }

    fn despawn(&mut self, handle: u64) {
        if self.entities.remove(&handle).is_some() {
            self.despawned_total += 1;
        }
    }

    fn set_translation(&mut self, handle: u64, translation: [f32; 3]) {
        if let Some(entity) = self.entities.get_mut(&handle) {
            entity.placement.translation = translation;
        }
    }

    fn set_visible(&mut self, handle: u64, visible: bool) {
        if let Some(entity) = self.entities.get_mut(&handle) {
            entity.visible = visible;
        }
    }

    fn set_wall_material(&mut self, handle: u64, material: WallMaterial) {
        if let Some(entity) = self.entities.get_mut(&handle) {
            entity.material = material;
        }
    }

    fn placement(&self, handle: u64) -> Option<Placement> {
        self.entities.get(&handle).map(|e| e.placement)
    }

    fn set_label(&mut self, handle: u64, label: &str) {
        if let Some(entity) = self.entities.get_mut(&handle) {
            entity.label = Some(label.to_string());
        }
    }

    fn label(&self, handle: u64) -> Option<String> {
        self.entities.get(&handle).and_then(|e| e.label.clone())
    }
}
