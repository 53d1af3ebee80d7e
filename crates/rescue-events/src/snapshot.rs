//! Snapshot Types
//!
//! A [`StepSnapshot`] is one simulation tick's full grid state after
//! validation. Cell arrays are row-major: the cell at `(x, y)` lives at
//! index `y * width + x`.
//!
//! Only the payload's shape is validated. Cell and door values the client
//! has no visual for decode to "nothing there" rather than failing the step.

use serde::Serialize;

use crate::edge::{Direction, DoorState, EdgeKey, WallState};
use crate::payload::{EdgePayload, StepPayload};

/// Fire layer value of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FireState {
    #[default]
    None,
    Smoke,
    Fire,
}

impl FireState {
    /// Maps the wire value: 2 is fire, 1 is smoke, anything else none.
    pub fn from_wire(value: i64) -> Self {
        match value {
            1 => FireState::Smoke,
            2 => FireState::Fire,
            _ => FireState::None,
        }
    }
}

/// Reported game status.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    #[default]
    Unknown,
    InProgress,
    Finished,
    /// Any other value the server chose to send, in JSON text form.
    Reported(String),
}

impl GameStatus {
    /// Interprets the free-form `gameStatus` field.
    pub fn from_value(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => GameStatus::Unknown,
            serde_json::Value::Bool(true) => GameStatus::Finished,
            serde_json::Value::Bool(false) => GameStatus::InProgress,
            serde_json::Value::String(s) => GameStatus::Reported(s.clone()),
            other => GameStatus::Reported(other.to_string()),
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, GameStatus::Finished)
    }
}

/// Desired state of one wall segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WallDescriptor {
    pub key: EdgeKey,
    pub state: WallState,
}

/// Desired state of one door.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DoorDescriptor {
    pub key: EdgeKey,
    /// `None` when the wire state is neither closed nor open; the door is
    /// then left as it is.
    pub state: Option<DoorState>,
}

/// One decoded grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
    pub fire: FireState,
    /// Agent id occupying the cell, if any.
    pub agent: Option<u32>,
    pub poi: bool,
}

/// Validated state of one simulation step.
///
/// Built only by decoding, so the cell arrays always hold `width * height`
/// entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepSnapshot {
    width: usize,
    height: usize,
    fire: Vec<FireState>,
    /// Agent id per cell, 0 for empty.
    agents: Vec<u32>,
    pois: Vec<bool>,
    walls: Vec<WallDescriptor>,
    doors: Vec<DoorDescriptor>,
    game_status: GameStatus,
}

impl StepSnapshot {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Fire layer, row-major.
    pub fn fire(&self) -> &[FireState] {
        &self.fire
    }

    /// Agent id per cell, row-major; 0 for empty.
    pub fn agents(&self) -> &[u32] {
        &self.agents
    }

    /// POI flag per cell, row-major.
    pub fn pois(&self) -> &[bool] {
        &self.pois
    }

    pub fn walls(&self) -> &[WallDescriptor] {
        &self.walls
    }

    pub fn doors(&self) -> &[DoorDescriptor] {
        &self.doors
    }

    pub fn game_status(&self) -> &GameStatus {
        &self.game_status
    }

    /// Number of cells (`width * height`).
    pub fn cell_count(&self) -> usize {
        self.fire.len()
    }

    /// Iterates cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let width = self.width;
        (0..self.cell_count()).map(move |index| Cell {
            x: index % width,
            y: index / width,
            fire: self.fire[index],
            agent: match self.agents[index] {
                0 => None,
                id => Some(id),
            },
            poi: self.pois[index],
        })
    }

    pub fn fire_count(&self) -> usize {
        self.fire.iter().filter(|f| **f == FireState::Fire).count()
    }

    pub fn smoke_count(&self) -> usize {
        self.fire.iter().filter(|f| **f == FireState::Smoke).count()
    }

    pub fn poi_count(&self) -> usize {
        self.pois.iter().filter(|p| **p).count()
    }

    /// Number of cells holding an agent.
    pub fn occupied_agent_cells(&self) -> usize {
        self.agents.iter().filter(|a| **a > 0).count()
    }
}

impl TryFrom<StepPayload> for StepSnapshot {
    type Error = DecodeError;

    fn try_from(payload: StepPayload) -> Result<Self, Self::Error> {
        let width = payload.width as usize;
        let height = payload.height as usize;
        let expected = width
            .checked_mul(height)
            .ok_or(DecodeError::DimensionsOverflow { width, height })?;

        check_len("fire", expected, payload.fire.len())?;
        check_len("agents", expected, payload.agents.len())?;
        check_len("pois", expected, payload.pois.len())?;

        let fire = payload.fire.iter().map(|&value| FireState::from_wire(value)).collect();
        // Only positive ids occupy a cell
        let agents = payload
            .agents
            .iter()
            .map(|&value| u32::try_from(value).unwrap_or(0))
            .collect();
        let pois = payload.pois.iter().map(|&value| value == 1).collect();

        let walls = payload
            .walls
            .iter()
            .map(|wall| {
                Ok(WallDescriptor {
                    key: edge_key(wall)?,
                    state: WallState::from_wire(wall.state),
                })
            })
            .collect::<Result<Vec<_>, DecodeError>>()?;

        let doors = payload
            .doors
            .iter()
            .map(|door| {
                Ok(DoorDescriptor {
                    key: edge_key(door)?,
                    state: DoorState::from_wire(door.state),
                })
            })
            .collect::<Result<Vec<_>, DecodeError>>()?;

        Ok(StepSnapshot {
            width,
            height,
            fire,
            agents,
            pois,
            walls,
            doors,
            game_status: GameStatus::from_value(&payload.game_status),
        })
    }
}

fn check_len(field: &'static str, expected: usize, actual: usize) -> Result<(), DecodeError> {
    if expected == actual {
        Ok(())
    } else {
        Err(DecodeError::LengthMismatch {
            field,
            expected,
            actual,
        })
    }
}

fn edge_key(edge: &EdgePayload) -> Result<EdgeKey, DecodeError> {
    let direction: Direction = edge
        .direction
        .parse()
        .map_err(|_| DecodeError::UnknownDirection(edge.direction.clone()))?;
    Ok(EdgeKey::new(edge.x, edge.y, direction))
}

/// Decodes a raw JSON step body.
pub fn decode_step(json: &str) -> Result<StepSnapshot, DecodeError> {
    let payload: StepPayload = serde_json::from_str(json)?;
    StepSnapshot::try_from(payload)
}

/// Errors produced while decoding a step payload.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed step payload: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("grid dimensions {width}x{height} overflow")]
    DimensionsOverflow { width: usize, height: usize },
    #[error("'{field}' has {actual} entries, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("unknown edge direction '{0}'")]
    UnknownDirection(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_step() -> &'static str {
        r#"{
            "width": 2, "height": 1,
            "fire": [0, 2], "agents": [0, 1], "pois": [0, 0],
            "walls": [{"x": 3, "y": 2, "direction": "N", "state": 2}],
            "doors": [{"x": 1, "y": 0, "direction": "E", "state": 1}],
            "gameStatus": false
        }"#
    }

    #[test]
    fn test_decode_small_step() {
        let snapshot = decode_step(small_step()).unwrap();
        assert_eq!(snapshot.width(), 2);
        assert_eq!(snapshot.height(), 1);
        assert_eq!(snapshot.fire(), &[FireState::None, FireState::Fire]);
        assert_eq!(snapshot.agents(), &[0, 1]);
        assert_eq!(snapshot.walls()[0].key, EdgeKey::new(3, 2, Direction::North));
        assert_eq!(snapshot.walls()[0].state, WallState::Damaged);
        assert_eq!(snapshot.doors()[0].state, Some(DoorState::Closed));
        assert_eq!(*snapshot.game_status(), GameStatus::InProgress);
    }

    #[test]
    fn test_cells_row_major() {
        let json = r#"{"width":3,"height":2,"fire":[0,0,0,0,1,0],
            "agents":[0,0,0,0,0,4],"pois":[1,0,0,0,0,0]}"#;
        let snapshot = decode_step(json).unwrap();
        let cells: Vec<Cell> = snapshot.cells().collect();

        assert_eq!(cells.len(), 6);
        assert_eq!((cells[0].x, cells[0].y), (0, 0));
        assert!(cells[0].poi);
        assert_eq!((cells[4].x, cells[4].y), (1, 1));
        assert_eq!(cells[4].fire, FireState::Smoke);
        assert_eq!((cells[5].x, cells[5].y), (2, 1));
        assert_eq!(cells[5].agent, Some(4));
        assert_eq!(cells[3].agent, None);
    }

    #[test]
    fn test_counts() {
        let json = r#"{"width":2,"height":2,"fire":[2,1,2,0],"agents":[1,0,3,0],"pois":[0,1,1,1]}"#;
        let snapshot = decode_step(json).unwrap();
        assert_eq!(snapshot.fire_count(), 2);
        assert_eq!(snapshot.smoke_count(), 1);
        assert_eq!(snapshot.poi_count(), 3);
        assert_eq!(snapshot.occupied_agent_cells(), 2);
    }

    #[test]
    fn test_length_mismatch() {
        let json = r#"{"width":2,"height":2,"fire":[0,0,0],"agents":[0,0,0,0],"pois":[0,0,0,0]}"#;
        let err = decode_step(json).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::LengthMismatch {
                field: "fire",
                expected: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            decode_step("{\"width\": 2"),
            Err(DecodeError::Malformed(_))
        ));
        // Required cell arrays missing
        assert!(matches!(
            decode_step(r#"{"width":1,"height":1}"#),
            Err(DecodeError::Malformed(_))
        ));
    }

    #[test]
    fn test_unknown_cell_values_decode_as_empty() {
        let json = r#"{"width":3,"height":1,"fire":[3,-1,2],"agents":[-1,0,1],"pois":[2,-4,1]}"#;
        let snapshot = decode_step(json).unwrap();

        assert_eq!(snapshot.fire(), &[FireState::None, FireState::None, FireState::Fire]);
        assert_eq!(snapshot.agents(), &[0, 0, 1]);
        assert_eq!(snapshot.pois(), &[false, false, true]);
        assert_eq!(snapshot.occupied_agent_cells(), 1);
        assert_eq!(snapshot.cells().filter(|c| c.agent.is_some()).count(), 1);
    }

    #[test]
    fn test_unknown_direction_is_rejected() {
        let direction = r#"{"width":1,"height":1,"fire":[0],"agents":[0],"pois":[0],
            "walls":[{"x":0,"y":0,"direction":"NE","state":0}]}"#;
        assert!(matches!(
            decode_step(direction),
            Err(DecodeError::UnknownDirection(d)) if d == "NE"
        ));
    }

    #[test]
    fn test_unknown_door_state_keeps_step() {
        let json = r#"{"width":2,"height":1,"fire":[0,2],"agents":[0,1],"pois":[0,0],
            "doors":[{"x":4,"y":3,"direction":"E","state":3},
                     {"x":6,"y":5,"direction":"S","state":2}]}"#;
        let snapshot = decode_step(json).unwrap();

        assert_eq!(snapshot.doors().len(), 2);
        assert_eq!(snapshot.doors()[0].key, EdgeKey::new(4, 3, Direction::East));
        assert_eq!(snapshot.doors()[0].state, None);
        assert_eq!(snapshot.doors()[1].state, Some(DoorState::Open));
        assert_eq!(snapshot.fire_count(), 1);
    }

    #[test]
    fn test_empty_grid() {
        let json = r#"{"width":0,"height":5,"fire":[],"agents":[],"pois":[]}"#;
        let snapshot = decode_step(json).unwrap();
        assert_eq!(snapshot.cell_count(), 0);
        assert_eq!(snapshot.cells().count(), 0);
    }

    #[test]
    fn test_game_status_variants() {
        assert_eq!(
            GameStatus::from_value(&serde_json::Value::Bool(true)),
            GameStatus::Finished
        );
        assert_eq!(
            GameStatus::from_value(&serde_json::json!("reset")),
            GameStatus::Reported("reset".to_string())
        );
        assert_eq!(
            GameStatus::from_value(&serde_json::json!({"win": true})),
            GameStatus::Reported(r#"{"win":true}"#.to_string())
        );
        assert!(!GameStatus::Unknown.is_finished());
    }
}
