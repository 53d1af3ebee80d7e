//! Visualization layer: Bevy-based board viewer.

pub mod camera;
pub mod level;
pub mod net;
pub mod overlay;
pub mod plugin;
pub mod prefabs;
pub mod settings;
pub mod sync;
pub mod world_scene;

pub use plugin::RescueVizPlugin;
