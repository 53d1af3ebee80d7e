//! UI overlay: step summary, request status and key hints.

use bevy::prelude::*;
use rescue_sync::{DriverPhase, RequestKind, StepDriver, StepSummary};

use crate::sync::{StepRendered, SyncState};

/// Plugin for the summary overlay.
pub struct OverlayPlugin;

impl Plugin for OverlayPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LastSummary>()
            .add_systems(Startup, setup_overlay)
            .add_systems(Update, (record_summary, update_summary_text, update_status_text));
    }
}

/// Most recent step summary, if any step has rendered.
#[derive(Resource, Default, Debug)]
pub struct LastSummary(pub Option<StepSummary>);

/// Component for the summary text.
#[derive(Component)]
pub struct SummaryText;

/// Component for the request status line.
#[derive(Component)]
pub struct StatusText;

const KEY_HINTS: &str = "N: next step   R: reset";

/// System to set up the overlay UI.
fn setup_overlay(mut commands: Commands) {
    commands
        .spawn(NodeBundle {
            style: Style {
                position_type: PositionType::Absolute,
                top: Val::Px(10.0),
                left: Val::Px(10.0),
                padding: UiRect::all(Val::Px(10.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(6.0),
                ..default()
            },
            background_color: Color::srgba(0.0, 0.0, 0.0, 0.7).into(),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                TextBundle::from_section(
                    "Waiting for first step",
                    TextStyle {
                        font_size: 16.0,
                        color: Color::srgb(0.95, 0.95, 0.95),
                        ..default()
                    },
                ),
                SummaryText,
            ));
            parent.spawn((
                TextBundle::from_section(
                    "",
                    TextStyle {
                        font_size: 13.0,
                        color: Color::srgb(0.9, 0.8, 0.3),
                        ..default()
                    },
                ),
                StatusText,
            ));
            parent.spawn(TextBundle::from_section(
                KEY_HINTS,
                TextStyle {
                    font_size: 12.0,
                    color: Color::srgb(0.7, 0.7, 0.7),
                    ..default()
                },
            ));
        });
}

fn record_summary(mut events: EventReader<StepRendered>, mut last: ResMut<LastSummary>) {
    if let Some(StepRendered(summary)) = events.read().last() {
        last.0 = Some(*summary);
    }
}

fn update_summary_text(last: Res<LastSummary>, mut texts: Query<&mut Text, With<SummaryText>>) {
    if !last.is_changed() {
        return;
    }
    let Some(summary) = last.0 else {
        return;
    };
    for mut text in texts.iter_mut() {
        text.sections[0].value = summary.to_string();
    }
}

fn update_status_text(state: Res<SyncState>, mut texts: Query<&mut Text, With<StatusText>>) {
    if !state.is_changed() {
        return;
    }
    let status = status_line(&state.driver);
    for mut text in texts.iter_mut() {
        if text.sections[0].value != status {
            text.sections[0].value = status.clone();
        }
    }
}

/// One-line description of what the driver is doing.
pub fn status_line(driver: &StepDriver) -> String {
    match driver.phase() {
        DriverPhase::Requesting(RequestKind::Step) => "Fetching step...".to_string(),
        DriverPhase::Requesting(RequestKind::Reset) => "Resetting...".to_string(),
        DriverPhase::Idle if driver.is_finished() => "Game finished".to_string(),
        DriverPhase::Idle => String::new(),
    }
}
