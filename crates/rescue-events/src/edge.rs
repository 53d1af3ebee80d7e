//! Edge identity for structural board elements.
//!
//! Walls and doors sit on the edge of a grid cell and are identified by the
//! cell coordinates plus the side of the cell they occupy. Scene entities
//! carry this identity as a `"x,y,D"` label (e.g. `"3,2,N"`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Side of a cell an edge element occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "E")]
    East,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "W")]
    West,
}

impl Direction {
    /// All directions, clockwise from north.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Single-letter wire form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::North => "N",
            Direction::East => "E",
            Direction::South => "S",
            Direction::West => "W",
        }
    }

    /// Rotation about the vertical axis for an element facing this side.
    pub fn yaw_degrees(&self) -> f32 {
        match self {
            Direction::North => 0.0,
            Direction::East => 90.0,
            Direction::South => 180.0,
            Direction::West => 270.0,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "N" | "n" => Ok(Direction::North),
            "E" | "e" => Ok(Direction::East),
            "S" | "s" => Ok(Direction::South),
            "W" | "w" => Ok(Direction::West),
            other => Err(ParseKeyError::InvalidDirection(other.to_string())),
        }
    }
}

/// Composite key identifying a wall or door.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeKey {
    pub x: i32,
    pub y: i32,
    pub direction: Direction,
}

impl EdgeKey {
    /// Creates a new key.
    pub fn new(x: i32, y: i32, direction: Direction) -> Self {
        Self { x, y, direction }
    }

    /// Parses a scene label of the form `"x,y,D"`.
    pub fn from_label(label: &str) -> Result<Self, ParseKeyError> {
        label.parse()
    }

    /// Returns the scene label for this key.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.direction)
    }
}

impl FromStr for EdgeKey {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',');
        let (Some(x), Some(y), Some(direction), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(ParseKeyError::InvalidFormat(s.to_string()));
        };

        let x = x
            .trim()
            .parse()
            .map_err(|_| ParseKeyError::InvalidCoordinate(x.to_string()))?;
        let y = y
            .trim()
            .parse()
            .map_err(|_| ParseKeyError::InvalidCoordinate(y.to_string()))?;

        Ok(Self {
            x,
            y,
            direction: direction.parse()?,
        })
    }
}

/// Error parsing a direction or an edge label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseKeyError {
    #[error("invalid edge label '{0}', expected 'x,y,D'")]
    InvalidFormat(String),
    #[error("invalid coordinate '{0}'")]
    InvalidCoordinate(String),
    #[error("invalid direction '{0}', expected one of N, E, S, W")]
    InvalidDirection(String),
}

/// Condition of a wall segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WallState {
    #[default]
    Intact,
    Damaged,
    Destroyed,
}

impl WallState {
    /// Maps the wire value: 1 is destroyed, 2 is damaged, anything else intact.
    pub fn from_wire(state: i64) -> Self {
        match state {
            1 => WallState::Destroyed,
            2 => WallState::Damaged,
            _ => WallState::Intact,
        }
    }

    /// Whether the wall is still standing.
    pub fn is_standing(&self) -> bool {
        !matches!(self, WallState::Destroyed)
    }
}

/// Position of a door.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoorState {
    Closed,
    Open,
}

impl DoorState {
    /// Maps the wire value: 1 is closed, 2 is open.
    pub fn from_wire(state: i64) -> Option<Self> {
        match state {
            1 => Some(DoorState::Closed),
            2 => Some(DoorState::Open),
            _ => None,
        }
    }

    /// Wire value for this state.
    pub fn to_wire(&self) -> i64 {
        match self {
            DoorState::Closed => 1,
            DoorState::Open => 2,
        }
    }
}
