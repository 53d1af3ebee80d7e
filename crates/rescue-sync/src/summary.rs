//! Per-step summary shown to the user after each render.

use std::fmt;

use rescue_events::StepSnapshot;
use serde::Serialize;

/// Counts describing one rendered step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StepSummary {
    pub step: u64,
    pub fires: usize,
    pub smoke: usize,
    pub pois: usize,
    /// Cells holding an agent.
    pub agents: usize,
}

impl StepSummary {
    pub fn from_snapshot(step: u64, snapshot: &StepSnapshot) -> Self {
        Self {
            step,
            fires: snapshot.fire_count(),
            smoke: snapshot.smoke_count(),
            pois: snapshot.poi_count(),
            agents: snapshot.occupied_agent_cells(),
        }
    }
}

impl fmt::Display for StepSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Step: {}\nFires: {}\nSmoke: {}\nPOIs: {}\nAgents: {}",
            self.step, self.fires, self.smoke, self.pois, self.agents
        )
    }
}
