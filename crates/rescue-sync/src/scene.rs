//! The engine seam.
//!
//! [`Scene`] is everything the diff applier needs from a host renderer:
//! spawning prefabs, moving and toggling entities, swapping wall materials,
//! and reading back an entity's placement and label. Hosts implement it over
//! their own entity model (Bevy's `World`, or [`crate::MemoryScene`]).

use std::fmt::Debug;

/// Where an entity sits in the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// World-space translation `[x, y, z]`, with `y` up.
    pub translation: [f32; 3],
    /// Rotation about the vertical axis, in degrees.
    pub yaw_degrees: f32,
}

impl Placement {
    pub fn new(translation: [f32; 3], yaw_degrees: f32) -> Self {
        Self {
            translation,
            yaw_degrees,
        }
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::new([0.0; 3], 0.0)
    }
}

/// Kinds of entity the applier can instantiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prefab {
    Fire,
    Smoke,
    Poi,
    /// Agent visual for the given zero-based slot.
    Agent(usize),
    DoorOpen,
    DoorClosed,
    /// Wall segment; only spawned by hosts when building a level.
    Wall,
}

impl Prefab {
    /// Fire, smoke and POI visuals are respawned every step.
    pub fn is_transient(&self) -> bool {
        matches!(self, Prefab::Fire | Prefab::Smoke | Prefab::Poi)
    }
}

/// Material applied to a standing wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WallMaterial {
    #[default]
    Base,
    Damaged,
}

/// Host scene operations used by the diff applier.
///
/// Operations on a handle that no longer exists are no-ops.
pub trait Scene {
    /// Identifier of a live scene entity.
    type Handle: Copy + Eq + Debug;

    /// Instantiates a prefab.
    fn spawn(&mut self, prefab: Prefab, placement: Placement) -> Self::Handle;

    /// Destroys an entity immediately.
    fn despawn(&mut self, handle: Self::Handle);

    /// Moves an entity, keeping its rotation.
    fn set_translation(&mut self, handle: Self::Handle, translation: [f32; 3]);

    fn set_visible(&mut self, handle: Self::Handle, visible: bool);

    fn set_wall_material(&mut self, handle: Self::Handle, material: WallMaterial);

    /// Current placement, or `None` if the entity is gone.
    fn placement(&self, handle: Self::Handle) -> Option<Placement>;

    fn set_label(&mut self, handle: Self::Handle, label: &str);

    fn label(&self, handle: Self::Handle) -> Option<String>;
}
