//! Step synchronization inside the Bevy app.
//!
//! Keyboard and timer input start requests on the [`StepDriver`]; responses
//! from the network worker are applied to the world by an exclusive system
//! so the diff applier can spawn and despawn entities directly.

use bevy::prelude::*;
use rescue_sync::{
    AdvanceOutcome, ClientConfig, ResetOutcome, SceneDiffApplier, StepDriver, StepSummary,
};

use crate::level::{discover_structures, spawn_level};
use crate::net::{NetBridge, NetRequest, NetResponse};
use crate::prefabs::build_prefabs;
use crate::settings::{AutoAdvance, ClientSettings, LevelSource};
use crate::world_scene::WorldScene;

/// Plugin for fetching steps and applying them to the world.
pub struct SyncPlugin;

impl Plugin for SyncPlugin {
    fn build(&self, app: &mut App) {
        // Settings should be inserted by main.rs; fall back to defaults
        if !app.world().contains_resource::<ClientSettings>() {
            app.init_resource::<ClientSettings>();
        }
        if !app.world().contains_resource::<LevelSource>() {
            app.init_resource::<LevelSource>();
        }
        if !app.world().contains_resource::<AutoAdvance>() {
            app.init_resource::<AutoAdvance>();
        }

        let config = app.world().resource::<ClientSettings>().config.clone();
        match NetBridge::spawn(&config.server) {
            Ok(bridge) => {
                app.insert_resource(bridge);
            }
            Err(e) => tracing::error!("Failed to start network worker: {:#}", e),
        }

        app.insert_resource(SyncState::new(&config))
            .add_event::<StepRendered>()
            .add_systems(
                Startup,
                (build_prefabs, spawn_level, discover_structures, request_first_step).chain(),
            )
            .add_systems(Update, (handle_step_input, apply_net_responses).chain());
    }
}

/// Driver and applier for the live scene.
#[derive(Resource)]
pub struct SyncState {
    pub driver: StepDriver,
    pub applier: SceneDiffApplier<Entity>,
}

impl SyncState {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            driver: StepDriver::new(),
            applier: SceneDiffApplier::from_config(config),
        }
    }
}

/// Event emitted after a step has been applied.
#[derive(Event, Debug, Clone, Copy)]
pub struct StepRendered(pub StepSummary);

/// Starts a request on the driver and hands it to the worker.
///
/// Returns false when the driver is busy or the worker is unavailable.
fn start_request(driver: &mut StepDriver, bridge: Option<&NetBridge>, request: NetRequest) -> bool {
    let Some(bridge) = bridge else {
        tracing::warn!("No network worker; ignoring {:?} request", request);
        return false;
    };

    let started = match request {
        NetRequest::Step => driver.begin_advance(),
        NetRequest::Reset => driver.begin_reset(),
    };
    if !started {
        return false;
    }
    if !bridge.send(request) {
        driver.cancel();
        return false;
    }
    true
}

/// System to fetch the first step once the level is in place.
fn request_first_step(mut state: ResMut<SyncState>, bridge: Option<Res<NetBridge>>) {
    start_request(&mut state.driver, bridge.as_deref(), NetRequest::Step);
}

/// System to handle N (next step), R (reset) and the auto-advance timer.
fn handle_step_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut auto: ResMut<AutoAdvance>,
    mut state: ResMut<SyncState>,
    bridge: Option<Res<NetBridge>>,
) {
    let bridge = bridge.as_deref();

    if keyboard.just_pressed(KeyCode::KeyR) {
        start_request(&mut state.driver, bridge, NetRequest::Reset);
        return;
    }

    let mut wants_step = keyboard.just_pressed(KeyCode::KeyN);
    if let Some(timer) = auto.timer.as_mut() {
        if timer.tick(time.delta()).just_finished() && !state.driver.is_finished() {
            wants_step = true;
        }
    }
    if wants_step {
        start_request(&mut state.driver, bridge, NetRequest::Step);
    }
}

/// Exclusive system to apply completed requests to the world.
pub fn apply_net_responses(world: &mut World) {
    let responses = match world.get_resource::<NetBridge>() {
        Some(bridge) => bridge.drain(),
        None => return,
    };
    if responses.is_empty() || !world.contains_resource::<SyncState>() {
        return;
    }

    world.resource_scope(|world, mut state: Mut<SyncState>| {
        let state = &mut *state;
        let mut rendered = Vec::new();
        let mut restored = false;

        for response in responses {
            let mut scene = WorldScene::new(world);
            match response {
                NetResponse::Step(body) => {
                    let outcome = state.driver.finish_advance(body, &mut state.applier, &mut scene);
                    if let AdvanceOutcome::Rendered(summary) = outcome {
                        rendered.push(summary);
                    }
                }
                NetResponse::Reset(result) => {
                    let outcome = state.driver.finish_reset(result, &state.applier, &mut scene);
                    restored |= matches!(outcome, ResetOutcome::Restored);
                }
            }
        }

        if restored {
            start_request(&mut state.driver, world.get_resource::<NetBridge>(), NetRequest::Step);
        }
        for summary in rendered {
            world.send_event(StepRendered(summary));
        }
    });
}
