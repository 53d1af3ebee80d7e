//! Sample data fixtures for testing.
//!
//! Enable the `test-fixtures` feature to access these helpers.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // rescue-events = { workspace = true, features = ["test-fixtures"] }
//!
//! use rescue_events::fixtures;
//!
//! let snapshot = fixtures::sample_step();
//! ```

use crate::{decode_step, StepSnapshot};

/// Raw JSON of the sample step.
pub const SAMPLE_STEP_JSON: &str = include_str!("../tests/fixtures/sample_step.json");

/// Returns the sample step, decoded.
///
/// A 10x8 board with:
/// - 5 fire cells and 6 smoke cells
/// - 3 points of interest
/// - agents 1..=6 on the board
/// - 21 walls (one destroyed, two damaged, including `3,2,N`)
/// - 2 doors (`4,3,E` closed, `6,5,S` open)
pub fn sample_step() -> StepSnapshot {
    decode_step(SAMPLE_STEP_JSON).expect("Failed to parse sample_step.json")
}

/// Returns a snapshot built from inline cell arrays with no walls or doors.
pub fn grid_step(
    width: u32,
    height: u32,
    fire: &[i64],
    agents: &[i64],
    pois: &[i64],
) -> StepSnapshot {
    let json = serde_json::json!({
        "width": width,
        "height": height,
        "fire": fire,
        "agents": agents,
        "pois": pois,
    });
    decode_step(&json.to_string()).expect("Failed to build grid step")
}
