//! Step and reset drivers.
//!
//! The driver walks `Idle -> Requesting -> (rendered | failed) -> Idle` for
//! each request. Only one request may be in flight; a second `advance` or
//! `reset` while one is pending is skipped.
//!
//! Hosts that run I/O on their own thread use the split API
//! (`begin_*` / `finish_*`); everything else can call the async
//! [`StepDriver::advance`] and [`StepDriver::reset`] directly.

use rescue_events::decode_step;

use crate::applier::SceneDiffApplier;
use crate::client::{ClientError, SimServer};
use crate::scene::Scene;
use crate::summary::StepSummary;

/// What an in-flight request is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Step,
    Reset,
}

/// Driver state between requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverPhase {
    #[default]
    Idle,
    Requesting(RequestKind),
}

/// Result of one advance attempt.
#[derive(Debug)]
pub enum AdvanceOutcome {
    /// The step was decoded and applied.
    Rendered(StepSummary),
    /// Nothing changed; the error was logged.
    Failed(ClientError),
    /// Another request was already in flight.
    Skipped,
}

impl AdvanceOutcome {
    pub fn summary(&self) -> Option<&StepSummary> {
        match self {
            AdvanceOutcome::Rendered(summary) => Some(summary),
            _ => None,
        }
    }
}

/// Result of one reset attempt.
#[derive(Debug)]
pub enum ResetOutcome {
    /// Walls restored and step counter zeroed.
    Restored,
    /// Scene left untouched; the error was logged.
    Failed(ClientError),
    /// Another request was already in flight.
    Skipped,
}

/// Step counter and request state machine.
#[derive(Debug, Default)]
pub struct StepDriver {
    step: u64,
    phase: DriverPhase,
    /// Whether the last rendered step reported a finished game.
    finished: bool,
}

impl StepDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of steps rendered since start or the last reset.
    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn phase(&self) -> DriverPhase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase != DriverPhase::Idle
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Marks a step request as in flight. Returns false if one is pending.
    pub fn begin_advance(&mut self) -> bool {
        self.begin(RequestKind::Step)
    }

    /// Marks a reset request as in flight. Returns false if one is pending.
    pub fn begin_reset(&mut self) -> bool {
        self.begin(RequestKind::Reset)
    }

    fn begin(&mut self, kind: RequestKind) -> bool {
        if let DriverPhase::Requesting(pending) = self.phase {
            tracing::debug!("Ignoring {:?} request: {:?} still in flight", kind, pending);
            return false;
        }
        self.phase = DriverPhase::Requesting(kind);
        true
    }

    /// Drops an in-flight request whose response will never arrive.
    pub fn cancel(&mut self) {
        if let DriverPhase::Requesting(kind) = self.phase {
            tracing::warn!("Abandoning {:?} request", kind);
        }
        self.phase = DriverPhase::Idle;
    }

    /// Completes a step request with the fetched body.
    pub fn finish_advance<S: Scene>(
        &mut self,
        body: Result<String, ClientError>,
        applier: &mut SceneDiffApplier<S::Handle>,
        scene: &mut S,
    ) -> AdvanceOutcome {
        self.phase = DriverPhase::Idle;

        let snapshot = match body.and_then(|body| decode_step(&body).map_err(ClientError::from)) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::error!("Step {} failed: {}", self.step + 1, e);
                return AdvanceOutcome::Failed(e);
            }
        };

        self.step += 1;
        applier.apply_step(scene, &snapshot);

        let finished = snapshot.game_status().is_finished();
        if finished && !self.finished {
            tracing::info!("Simulation reports the game finished at step {}", self.step);
        }
        self.finished = finished;

        let summary = StepSummary::from_snapshot(self.step, &snapshot);
        tracing::info!(
            step = summary.step,
            fires = summary.fires,
            smoke = summary.smoke,
            pois = summary.pois,
            agents = summary.agents,
            "Rendered step"
        );
        AdvanceOutcome::Rendered(summary)
    }

    /// Completes a reset request.
    ///
    /// On success every wall is restored and the counter zeroed; the caller
    /// follows up with one advance to repopulate the scene.
    pub fn finish_reset<S: Scene>(
        &mut self,
        result: Result<(), ClientError>,
        applier: &SceneDiffApplier<S::Handle>,
        scene: &mut S,
    ) -> ResetOutcome {
        self.phase = DriverPhase::Idle;

        match result {
            Ok(()) => {
                applier.restore_walls(scene);
                self.step = 0;
                self.finished = false;
                tracing::info!("Simulation reset");
                ResetOutcome::Restored
            }
            Err(e) => {
                tracing::error!("Reset failed: {}", e);
                ResetOutcome::Failed(e)
            }
        }
    }

    /// Fetches, decodes and applies the next step.
    pub async fn advance<C: SimServer, S: Scene>(
        &mut self,
        server: &C,
        applier: &mut SceneDiffApplier<S::Handle>,
        scene: &mut S,
    ) -> AdvanceOutcome {
        if !self.begin_advance() {
            return AdvanceOutcome::Skipped;
        }
        let body = server.fetch_step().await;
        self.finish_advance(body, applier, scene)
    }

    /// Resets the simulation and, on success, renders its first step.
    pub async fn reset<C: SimServer, S: Scene>(
        &mut self,
        server: &C,
        applier: &mut SceneDiffApplier<S::Handle>,
        scene: &mut S,
    ) -> (ResetOutcome, Option<AdvanceOutcome>) {
        if !self.begin_reset() {
            return (ResetOutcome::Skipped, None);
        }
        let result = server.reset().await;
        let outcome = self.finish_reset(result, applier, scene);

        if matches!(outcome, ResetOutcome::Restored) {
            let advance = self.advance(server, applier, scene).await;
            (outcome, Some(advance))
        } else {
            (outcome, None)
        }
    }
}
