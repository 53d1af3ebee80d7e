//! Startup resources handed over from the command line.

use bevy::prelude::*;
use rescue_sync::{ClientConfig, LevelLayout};
use std::time::Duration;

/// Client configuration for the running app.
#[derive(Resource, Clone, Debug, Default)]
pub struct ClientSettings {
    pub config: ClientConfig,
}

/// Walls and doors to place before the first step.
#[derive(Resource, Clone, Debug)]
pub struct LevelSource {
    pub layout: LevelLayout,
}

impl Default for LevelSource {
    fn default() -> Self {
        Self {
            layout: LevelLayout::perimeter(10, 8),
        }
    }
}

impl LevelSource {
    /// Board size in cells, taken from the furthest structural edge.
    pub fn extents(&self) -> (i32, i32) {
        let xs = self.layout.walls.iter().map(|w| w.x).chain(self.layout.doors.iter().map(|d| d.x));
        let ys = self.layout.walls.iter().map(|w| w.y).chain(self.layout.doors.iter().map(|d| d.y));
        match (xs.max(), ys.max()) {
            (Some(x), Some(y)) => (x + 1, y + 1),
            _ => (10, 8),
        }
    }
}

/// Automatic stepping, in addition to the N key.
#[derive(Resource, Debug, Default)]
pub struct AutoAdvance {
    pub timer: Option<Timer>,
}

impl AutoAdvance {
    pub fn every(interval: Duration) -> Self {
        Self {
            timer: Some(Timer::new(interval, TimerMode::Repeating)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level_extents() {
        assert_eq!(LevelSource::default().extents(), (10, 8));
    }

    #[test]
    fn test_empty_level_falls_back_to_default_extents() {
        let source = LevelSource {
            layout: LevelLayout::default(),
        };
        assert_eq!(source.extents(), (10, 8));
    }

    #[test]
    fn test_auto_advance_repeats() {
        let auto = AutoAdvance::every(Duration::from_millis(250));
        let timer = auto.timer.unwrap();
        assert_eq!(timer.mode(), TimerMode::Repeating);
        assert_eq!(timer.duration(), Duration::from_millis(250));
    }
}
