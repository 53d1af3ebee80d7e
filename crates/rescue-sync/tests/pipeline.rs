//! Integration tests for the full step pipeline.
//!
//! These tests use the sample step and board fixtures to verify decoding,
//! level population and scene diffing work together.

use rescue_events::fixtures;
use rescue_events::{decode_step, Direction, DoorState, EdgeKey};
use rescue_sync::{
    ClientConfig, LevelLayout, MemoryScene, Prefab, Scene, SceneDiffApplier, StepDriver,
    WallMaterial,
};
use std::path::Path;

fn load_board() -> LevelLayout {
    LevelLayout::from_file(Path::new("tests/fixtures/board.toml")).expect("Failed to load board")
}

fn populated() -> (MemoryScene, SceneDiffApplier<u64>) {
    let mut scene = MemoryScene::new();
    let mut applier = SceneDiffApplier::from_config(&ClientConfig::default());
    load_board().populate(&mut scene, &mut applier);
    (scene, applier)
}

fn wall(applier: &SceneDiffApplier<u64>, x: i32, y: i32, direction: Direction) -> u64 {
    applier
        .registry()
        .wall(&EdgeKey::new(x, y, direction))
        .expect("wall registered")
}

/// Test that the board fixture loads.
#[test]
fn test_board_loads() {
    let board = load_board();
    assert_eq!(board.walls.len(), 4);
    assert_eq!(board.doors.len(), 2);
}

/// Test applying the sample step to the sample board.
#[test]
fn test_sample_step_on_board() {
    let (mut scene, mut applier) = populated();
    let snapshot = fixtures::sample_step();

    applier.apply_step(&mut scene, &snapshot);

    // Walls: 1,0,N damaged; 2,7,S destroyed; 3,2,N damaged; 5,5,E untouched
    let damaged = scene.get(wall(&applier, 1, 0, Direction::North)).unwrap();
    assert!(damaged.visible);
    assert_eq!(damaged.material, WallMaterial::Damaged);
    assert!(!scene.get(wall(&applier, 2, 7, Direction::South)).unwrap().visible);
    assert_eq!(
        scene.get(wall(&applier, 3, 2, Direction::North)).unwrap().material,
        WallMaterial::Damaged
    );
    let untouched = scene.get(wall(&applier, 5, 5, Direction::East)).unwrap();
    assert!(untouched.visible);
    assert_eq!(untouched.material, WallMaterial::Base);

    // Door 4,3,E was open and the step closes it; 6,5,S stays open
    assert_eq!(scene.count(Prefab::DoorClosed), 1);
    assert_eq!(scene.count(Prefab::DoorOpen), 1);
    let door = applier
        .registry()
        .door(&EdgeKey::new(4, 3, Direction::East))
        .unwrap();
    assert_eq!(door.state, DoorState::Closed);
    assert_eq!(scene.label(door.handle).as_deref(), Some("4,3,E"));

    // Transients and agents
    assert_eq!(scene.count(Prefab::Fire), 5);
    assert_eq!(scene.count(Prefab::Smoke), 6);
    assert_eq!(scene.count(Prefab::Poi), 3);
    for slot in 0..6 {
        assert!(applier.agent_slot(slot).is_some());
    }
}

/// Test that re-applying the same step only churns transients.
#[test]
fn test_repeated_step_only_churns_transients() {
    let (mut scene, mut applier) = populated();
    let snapshot = fixtures::sample_step();

    applier.apply_step(&mut scene, &snapshot);
    let spawned = scene.spawned_total();
    let live = scene.len();

    applier.apply_step(&mut scene, &snapshot);

    // Only fire, smoke and POI visuals were respawned
    assert_eq!(scene.spawned_total() - spawned, 5 + 6 + 3);
    assert_eq!(scene.len(), live);
}

/// Test that reset restores damage done by a step.
#[test]
fn test_reset_after_damage() {
    let (mut scene, mut applier) = populated();
    let mut driver = StepDriver::new();

    driver.begin_advance();
    driver.finish_advance(
        Ok(fixtures::SAMPLE_STEP_JSON.to_string()),
        &mut applier,
        &mut scene,
    );
    driver.begin_reset();
    driver.finish_reset(Ok(()), &applier, &mut scene);

    assert_eq!(driver.step(), 0);
    for handle in applier.registry().wall_handles() {
        let entity = scene.get(handle).unwrap();
        assert!(entity.visible);
        assert_eq!(entity.material, WallMaterial::Base);
    }
}

/// Test a step whose grid is smaller than the board's agent slots.
#[test]
fn test_inline_step() {
    let (mut scene, mut applier) = populated();
    let snapshot = decode_step(
        r#"{"width":2,"height":1,"fire":[1,0],"agents":[0,6],"pois":[1,0],
            "walls":[{"x":5,"y":5,"direction":"E","state":1}],"doors":[]}"#,
    )
    .unwrap();

    applier.apply_step(&mut scene, &snapshot);

    assert_eq!(scene.count(Prefab::Smoke), 1);
    assert_eq!(scene.count(Prefab::Poi), 1);
    assert_eq!(scene.count(Prefab::Agent(5)), 1);
    assert!(!scene.get(wall(&applier, 5, 5, Direction::East)).unwrap().visible);
}
