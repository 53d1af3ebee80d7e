//! Integration tests for decoding the step feed.

use rescue_events::{decode_step, Direction, DoorState, EdgeKey, FireState, WallState};

fn load_sample() -> String {
    std::fs::read_to_string("tests/fixtures/sample_step.json").expect("Failed to read sample step")
}

/// Test that the sample step decodes and its counts line up.
#[test]
fn test_sample_step_counts() {
    let snapshot = decode_step(&load_sample()).unwrap();

    assert_eq!(snapshot.width(), 10);
    assert_eq!(snapshot.height(), 8);
    assert_eq!(snapshot.cell_count(), 80);
    assert_eq!(snapshot.fire_count(), 5);
    assert_eq!(snapshot.smoke_count(), 6);
    assert_eq!(snapshot.poi_count(), 3);
    assert_eq!(snapshot.occupied_agent_cells(), 6);
    assert!(!snapshot.game_status().is_finished());
}

/// Test the structural lists of the sample step.
#[test]
fn test_sample_step_structures() {
    let snapshot = decode_step(&load_sample()).unwrap();

    assert_eq!(snapshot.walls().len(), 21);
    let destroyed = snapshot
        .walls()
        .iter()
        .filter(|w| w.state == WallState::Destroyed)
        .count();
    assert_eq!(destroyed, 1);

    let damaged = snapshot
        .walls()
        .iter()
        .find(|w| w.key == EdgeKey::new(3, 2, Direction::North))
        .unwrap();
    assert_eq!(damaged.state, WallState::Damaged);

    assert_eq!(snapshot.doors().len(), 2);
    assert_eq!(snapshot.doors()[0].key.label(), "4,3,E");
    assert_eq!(snapshot.doors()[0].state, Some(DoorState::Closed));
    assert_eq!(snapshot.doors()[1].state, Some(DoorState::Open));
}

/// Test that every fire value lands on the expected cell.
#[test]
fn test_sample_step_cells() {
    let snapshot = decode_step(&load_sample()).unwrap();

    let fires: Vec<(usize, usize)> = snapshot
        .cells()
        .filter(|c| c.fire == FireState::Fire)
        .map(|c| (c.x, c.y))
        .collect();
    assert_eq!(fires, vec![(2, 1), (3, 1), (3, 2), (5, 4), (6, 4)]);

    let last = snapshot.cells().last().unwrap();
    assert_eq!((last.x, last.y), (9, 7));
    assert_eq!(last.agent, Some(6));
}
