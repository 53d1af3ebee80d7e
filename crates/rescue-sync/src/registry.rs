//! Lookup tables for walls and doors.
//!
//! Structural entities exist in the scene before the first step arrives. The
//! host discovers them once at startup and registers each one under its
//! [`EdgeKey`]; the applier only ever mutates what is registered here.

use std::collections::HashMap;

use rescue_events::{DoorState, EdgeKey};

/// A registered door and the state its current entity shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoorEntry<H> {
    pub handle: H,
    pub state: DoorState,
}

/// Wall and door lookup keyed by edge.
#[derive(Debug, Clone)]
pub struct StructuralRegistry<H> {
    walls: HashMap<EdgeKey, H>,
    doors: HashMap<EdgeKey, DoorEntry<H>>,
}

impl<H> Default for StructuralRegistry<H> {
    fn default() -> Self {
        Self {
            walls: HashMap::new(),
            doors: HashMap::new(),
        }
    }
}

impl<H: Copy> StructuralRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a wall entity. A later registration for the same key wins.
    pub fn register_wall(&mut self, key: EdgeKey, handle: H) {
        self.walls.insert(key, handle);
    }

    /// Registers a door entity showing `state`.
    pub fn register_door(&mut self, key: EdgeKey, handle: H, state: DoorState) {
        self.doors.insert(key, DoorEntry { handle, state });
    }

    /// Registers a wall from its scene label. Returns false if the label is
    /// not an edge key.
    pub fn discover_wall(&mut self, handle: H, label: &str) -> bool {
        match EdgeKey::from_label(label) {
            Ok(key) => {
                self.register_wall(key, handle);
                true
            }
            Err(e) => {
                tracing::warn!("Skipping wall '{}': {}", label, e);
                false
            }
        }
    }

    /// Registers a door from its scene label. Returns false if the label is
    /// not an edge key.
    pub fn discover_door(&mut self, handle: H, label: &str, state: DoorState) -> bool {
        match EdgeKey::from_label(label) {
            Ok(key) => {
                self.register_door(key, handle, state);
                true
            }
            Err(e) => {
                tracing::warn!("Skipping door '{}': {}", label, e);
                false
            }
        }
    }

    pub fn wall(&self, key: &EdgeKey) -> Option<H> {
        self.walls.get(key).copied()
    }

    pub fn door(&self, key: &EdgeKey) -> Option<DoorEntry<H>> {
        self.doors.get(key).copied()
    }

    /// Points a door key at a replacement entity.
    pub fn replace_door(&mut self, key: EdgeKey, entry: DoorEntry<H>) {
        self.doors.insert(key, entry);
    }

    /// All registered wall handles.
    pub fn wall_handles(&self) -> impl Iterator<Item = H> + '_ {
        self.walls.values().copied()
    }

    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }

    pub fn door_count(&self) -> usize {
        self.doors.len()
    }

    /// Forgets every registration.
    pub fn clear(&mut self) {
        self.walls.clear();
        self.doors.clear();
    }
}
