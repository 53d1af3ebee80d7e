//! Wire types and decoding for the fire-rescue simulation step feed.
//!
//! This crate contains pure data structures with no scene logic.
//! It is a dependency for all other crates in the workspace.

pub mod edge;
pub mod payload;
pub mod snapshot;

#[cfg(feature = "test-fixtures")]
pub mod fixtures;

pub use edge::{Direction, DoorState, EdgeKey, ParseKeyError, WallState};
pub use payload::{EdgePayload, StepPayload};
pub use snapshot::{
    decode_step, Cell, DecodeError, DoorDescriptor, FireState, GameStatus, StepSnapshot,
    WallDescriptor,
};
