//! Step synchronization and incremental scene diffing.
//!
//! This crate sits between the simulation server and whatever engine renders
//! the board. It fetches steps, decodes them, and reconciles a [`Scene`]
//! against each new snapshot.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐   GET /step    ┌────────────┐  apply_step   ┌─────────┐
//! │ sim server │ ─────────────▶ │ StepDriver │ ────────────▶ │  Scene  │
//! └────────────┘  POST /reset   └────────────┘               └─────────┘
//! ```
//!
//! # Modules
//!
//! - [`scene`]: The engine seam and entity vocabulary
//! - [`memory`]: An in-memory [`Scene`] for headless runs and tests
//! - [`layout`]: Grid cell to world placement
//! - [`registry`]: Lookup of pre-existing walls and doors
//! - [`applier`]: The scene diff applier
//! - [`driver`]: Step and reset state machine
//! - [`client`]: HTTP access to the simulation server
//! - [`config`]: TOML client configuration
//! - [`level`]: Board description used to create structural entities

pub mod applier;
pub mod client;
pub mod config;
pub mod driver;
pub mod layout;
pub mod level;
pub mod memory;
pub mod registry;
pub mod scene;
pub mod summary;

pub use applier::SceneDiffApplier;
pub use client::{ClientError, HttpSimServer, SimServer};
pub use config::{AgentConfig, ClientConfig, ConfigError, ServerConfig};
pub use driver::{AdvanceOutcome, DriverPhase, RequestKind, ResetOutcome, StepDriver};
pub use layout::GridLayout;
pub use level::{LevelDoor, LevelError, LevelLayout, LevelWall};
pub use memory::{MemoryEntity, MemoryScene};
pub use registry::{DoorEntry, StructuralRegistry};
pub use scene::{Placement, Prefab, Scene, WallMaterial};
pub use summary::StepSummary;
