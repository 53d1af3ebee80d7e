//! Grid-to-world placement.

use serde::{Deserialize, Serialize};

use rescue_events::{Direction, EdgeKey};

use crate::scene::Placement;

/// Maps grid cells onto world space.
///
/// Cell `(x, y)` lands at `origin + (x * cell_size, 0, -y * cell_size)`, so
/// grid rows run toward negative `z`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridLayout {
    /// World units per cell
    pub cell_size: f32,
    /// World position of cell (0, 0)
    pub origin: [f32; 3],
    /// Yaw applied to every grid-spawned entity
    pub facing_yaw_degrees: f32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            cell_size: 10.0,
            origin: [-10.0, 0.0, 10.0],
            facing_yaw_degrees: 180.0,
        }
    }
}

impl GridLayout {
    /// World translation of a cell's center.
    pub fn cell_translation(&self, x: usize, y: usize) -> [f32; 3] {
        [
            self.origin[0] + x as f32 * self.cell_size,
            self.origin[1],
            self.origin[2] - y as f32 * self.cell_size,
        ]
    }

    /// Placement for an entity spawned on a cell.
    pub fn cell_placement(&self, x: usize, y: usize) -> Placement {
        Placement::new(self.cell_translation(x, y), self.facing_yaw_degrees)
    }

    /// Placement for a wall or door on the given cell edge.
    ///
    /// The entity sits half a cell from the center toward its side and is
    /// rotated to face that side.
    pub fn edge_placement(&self, key: &EdgeKey) -> Placement {
        let [cx, cy, cz] = self.cell_translation(key.x.max(0) as usize, key.y.max(0) as usize);
        let half = self.cell_size / 2.0;
        let translation = match key.direction {
            Direction::North => [cx, cy, cz + half],
            Direction::South => [cx, cy, cz - half],
            Direction::East => [cx + half, cy, cz],
            Direction::West => [cx - half, cy, cz],
        };
        Placement::new(translation, key.direction.yaw_degrees())
    }
}
