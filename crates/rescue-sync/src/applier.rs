//! Scene diff applier.
//!
//! Reconciles the scene against each decoded step:
//!
//! - fire, smoke and POI visuals are thrown away and respawned every step
//! - agent visuals are created once per slot and moved afterwards
//! - walls are never spawned, only shown, hidden or re-materialed
//! - doors are swapped for the other prefab when their state changes

use std::fmt::Debug;

use rescue_events::{
    DoorDescriptor, DoorState, FireState, StepSnapshot, WallDescriptor, WallState,
};

use crate::config::ClientConfig;
use crate::layout::GridLayout;
use crate::registry::{DoorEntry, StructuralRegistry};
use crate::scene::{Prefab, Scene, WallMaterial};

/// Owns the transient entity list and agent slot table for one scene.
#[derive(Debug, Clone)]
pub struct SceneDiffApplier<H> {
    layout: GridLayout,
    registry: StructuralRegistry<H>,
    /// Fire, smoke and POI entities spawned for the current step.
    transients: Vec<H>,
    /// Agent entity per zero-based slot.
    agent_slots: Vec<Option<H>>,
    /// Hide agents that are missing from a step instead of leaving them
    /// at their last position.
    hide_absent_agents: bool,
}

impl<H: Copy + Eq + Debug> SceneDiffApplier<H> {
    /// Creates an applier with `agent_count` empty slots.
    pub fn new(layout: GridLayout, agent_count: usize) -> Self {
        Self {
            layout,
            registry: StructuralRegistry::new(),
            transients: Vec::new(),
            agent_slots: vec![None; agent_count],
            hide_absent_agents: false,
        }
    }

    /// Creates an applier from client configuration.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.layout, config.agents.count)
            .with_hide_absent_agents(config.agents.hide_absent)
    }

    pub fn with_hide_absent_agents(mut self, hide: bool) -> Self {
        self.hide_absent_agents = hide;
        self
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn registry(&self) -> &StructuralRegistry<H> {
        &self.registry
    }

    /// Mutable registry access for structural discovery.
    pub fn registry_mut(&mut self) -> &mut StructuralRegistry<H> {
        &mut self.registry
    }

    /// Transient entities spawned by the last step.
    pub fn transients(&self) -> &[H] {
        &self.transients
    }

    /// Entity bound to a zero-based agent slot.
    pub fn agent_slot(&self, slot: usize) -> Option<H> {
        self.agent_slots.get(slot).copied().flatten()
    }

    pub fn agent_slot_count(&self) -> usize {
        self.agent_slots.len()
    }

    /// Destroys every tracked transient entity.
    pub fn clear_transient<S: Scene<Handle = H>>(&mut self, scene: &mut S) {
        for handle in self.transients.drain(..) {
            scene.despawn(handle);
        }
    }

    /// Spawns fire, smoke and POI visuals and places agents.
    pub fn apply_grid<S: Scene<Handle = H>>(&mut self, scene: &mut S, snapshot: &StepSnapshot) {
        let mut placed = vec![false; self.agent_slots.len()];

        for cell in snapshot.cells() {
            let placement = self.layout.cell_placement(cell.x, cell.y);

            match cell.fire {
                FireState::Fire => self.transients.push(scene.spawn(Prefab::Fire, placement)),
                FireState::Smoke => self.transients.push(scene.spawn(Prefab::Smoke, placement)),
                FireState::None => {}
            }

            if cell.poi {
                self.transients.push(scene.spawn(Prefab::Poi, placement));
            }

            let Some(agent_id) = cell.agent else {
                continue;
            };
            let slot = agent_id as usize - 1;
            let Some(entry) = self.agent_slots.get_mut(slot) else {
                tracing::debug!(
                    "Ignoring agent {} at ({}, {}): only {} slots",
                    agent_id,
                    cell.x,
                    cell.y,
                    placed.len()
                );
                continue;
            };
            placed[slot] = true;

            match *entry {
                Some(handle) => {
                    scene.set_translation(handle, placement.translation);
                    scene.set_visible(handle, true);
                }
                None => {
                    *entry = Some(scene.spawn(Prefab::Agent(slot), placement));
                }
            }
        }

        if self.hide_absent_agents {
            for (slot, handle) in self.agent_slots.iter().enumerate() {
                if let (Some(handle), false) = (handle, placed[slot]) {
                    scene.set_visible(*handle, false);
                }
            }
        }
    }

    /// Updates wall visibility and material. Unknown keys are ignored.
    pub fn apply_walls<S: Scene<Handle = H>>(&self, scene: &mut S, walls: &[WallDescriptor]) {
        for wall in walls {
            let Some(handle) = self.registry.wall(&wall.key) else {
                continue;
            };

            match wall.state {
                WallState::Destroyed => scene.set_visible(handle, false),
                WallState::Damaged => {
                    scene.set_visible(handle, true);
                    scene.set_wall_material(handle, WallMaterial::Damaged);
                }
                WallState::Intact => {
                    scene.set_visible(handle, true);
                    scene.set_wall_material(handle, WallMaterial::Base);
                }
            }
        }
    }

    /// Swaps door entities whose state changed. Returns the number of swaps.
    pub fn apply_doors<S: Scene<Handle = H>>(
        &mut self,
        scene: &mut S,
        doors: &[DoorDescriptor],
    ) -> usize {
        let mut swaps = 0;

        for door in doors {
            let Some(entry) = self.registry.door(&door.key) else {
                continue;
            };
            let Some(target) = door.state else {
                tracing::debug!("Door {} reports no open/closed state, leaving it", door.key);
                continue;
            };
            if entry.state == target {
                continue;
            }

            let placement = scene.placement(entry.handle).unwrap_or_else(|| {
                tracing::warn!("Door {} entity is gone, placing by layout", door.key);
                self.layout.edge_placement(&door.key)
            });
            let label = scene
                .label(entry.handle)
                .unwrap_or_else(|| door.key.label());

            let prefab = match target {
                DoorState::Closed => Prefab::DoorClosed,
                DoorState::Open => Prefab::DoorOpen,
            };
            let replacement = scene.spawn(prefab, placement);
            scene.set_label(replacement, &label);
            scene.despawn(entry.handle);

            self.registry.replace_door(
                door.key,
                DoorEntry {
                    handle: replacement,
                    state: target,
                },
            );
            tracing::debug!("Door {} now {:?}", door.key, target);
            swaps += 1;
        }

        swaps
    }

    /// Applies a full step: transient refresh, grid, walls, then doors.
    pub fn apply_step<S: Scene<Handle = H>>(&mut self, scene: &mut S, snapshot: &StepSnapshot) {
        self.clear_transient(scene);
        self.apply_grid(scene, snapshot);
        self.apply_walls(scene, snapshot.walls());
        let swaps = self.apply_doors(scene, snapshot.doors());

        tracing::debug!(
            "Applied step: {} transients, {} door swaps",
            self.transients.len(),
            swaps
        );
    }

    /// Shows every registered wall with its base material.
    pub fn restore_walls<S: Scene<Handle = H>>(&self, scene: &mut S) {
        for handle in self.registry.wall_handles() {
            scene.set_visible(handle, true);
            scene.set_wall_material(handle, WallMaterial::Base);
        }
    }
}
