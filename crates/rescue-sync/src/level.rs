//! Board description.
//!
//! Structural entities exist before the first step is fetched. A level file
//! lists them so a host can place labeled wall and door entities, which the
//! registry then discovers by label.
//!
//! ```toml
//! [[walls]]
//! x = 3
//! y = 2
//! direction = "N"
//!
//! [[doors]]
//! x = 4
//! y = 3
//! direction = "E"
//! state = "closed"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use rescue_events::{Direction, DoorState, EdgeKey};

use crate::applier::SceneDiffApplier;
use crate::scene::{Prefab, Scene};

/// Wall placed at level load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelWall {
    pub x: i32,
    pub y: i32,
    pub direction: Direction,
}

impl LevelWall {
    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.x, self.y, self.direction)
    }
}

/// Door placed at level load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDoor {
    pub x: i32,
    pub y: i32,
    pub direction: Direction,
    #[serde(default = "default_door_state")]
    pub state: DoorState,
}

fn default_door_state() -> DoorState {
    DoorState::Closed
}

impl LevelDoor {
    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.x, self.y, self.direction)
    }
}

/// Walls and doors present when the scene starts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    #[serde(default)]
    pub walls: Vec<LevelWall>,
    #[serde(default)]
    pub doors: Vec<LevelDoor>,
}

impl LevelLayout {
    /// Loads a level from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, LevelError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, LevelError> {
        Ok(toml::from_str(content)?)
    }

    /// Walls along the outside of a `width` x `height` board.
    pub fn perimeter(width: i32, height: i32) -> Self {
        let mut walls = Vec::new();
        for x in 0..width {
            walls.push(LevelWall {
                x,
                y: 0,
                direction: Direction::North,
            });
            walls.push(LevelWall {
                x,
                y: height - 1,
                direction: Direction::South,
            });
        }
        for y in 0..height {
            walls.push(LevelWall {
                x: 0,
                y,
                direction: Direction::West,
            });
            walls.push(LevelWall {
                x: width - 1,
                y,
                direction: Direction::East,
            });
        }
        Self {
            walls,
            doors: Vec::new(),
        }
    }

    /// Spawns labeled entities for every wall and door and registers them.
    ///
    /// Hosts with their own discovery step (e.g. tag queries) only need the
    /// spawning half; this covers scenes with no separate authoring.
    pub fn populate<S: Scene>(&self, scene: &mut S, applier: &mut SceneDiffApplier<S::Handle>) {
        let layout = *applier.layout();

        for wall in &self.walls {
            let key = wall.key();
            let handle = scene.spawn(Prefab::Wall, layout.edge_placement(&key));
            scene.set_label(handle, &key.label());
            applier.registry_mut().register_wall(key, handle);
        }

        for door in &self.doors {
            let key = door.key();
            let prefab = match door.state {
                DoorState::Closed => Prefab::DoorClosed,
                DoorState::Open => Prefab::DoorOpen,
            };
            let handle = scene.spawn(prefab, layout.edge_placement(&key));
            scene.set_label(handle, &key.label());
            applier.registry_mut().register_door(key, handle, door.state);
        }

        tracing::info!(
            "Level populated: {} walls, {} doors",
            self.walls.len(),
            self.doors.len()
        );
    }
}

/// Errors that can occur during level loading.
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
