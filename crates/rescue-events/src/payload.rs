//! Raw step payload as served by the simulation's `/step` endpoint.
//!
//! These structs mirror the JSON one-to-one and perform no validation.
//! Use [`crate::decode_step`] to obtain a checked [`crate::StepSnapshot`].

use serde::{Deserialize, Serialize};

/// One simulation tick as it appears on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepPayload {
    pub width: u32,
    pub height: u32,
    /// Per-cell fire value: 0 none, 1 smoke, 2 fire.
    pub fire: Vec<i64>,
    /// Per-cell agent id, 0 for an empty cell.
    pub agents: Vec<i64>,
    /// Per-cell point-of-interest flag.
    pub pois: Vec<i64>,
    #[serde(default)]
    pub walls: Vec<EdgePayload>,
    #[serde(default)]
    pub doors: Vec<EdgePayload>,
    /// Free-form status; the reference server sends a finished flag.
    #[serde(default)]
    pub game_status: serde_json::Value,
}

/// Wall or door entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgePayload {
    pub x: i32,
    pub y: i32,
    pub direction: String,
    pub state: i64,
}
