//! Heads-up display: speed, camera alert, nearest-camera distance and the
//! reset button.

use bevy::prelude::*;

use crate::simulation::engine::{VehicleSnapshot, DISTANCE_PLACEHOLDER};
use crate::simulation::vehicles::{ResetVehicle, VehicleSet, VehicleUpdated};
use crate::simulation::{SimulationConfig, SimulationStats};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_hud).add_systems(
            Update,
            (
                update_drive_readout.after(VehicleSet),
                update_sim_status,
                handle_reset_button,
                refresh_button_visuals,
            ),
        );
    }
}

/// Text entity showing one field of the latest snapshot.
#[derive(Component, Clone, Copy)]
enum Readout {
    Speed,
    Alert,
    Distance,
}

/// Marker for simulation status text.
#[derive(Component)]
struct SimStatusText;

/// Marker for the reset button.
#[derive(Component)]
struct ResetButton;

// UI Colors
const PANEL_BG: Color = Color::srgba(0.04, 0.05, 0.06, 0.9);
const BORDER: Color = Color::srgb(0.0, 0.75, 0.35);
const TITLE_COLOR: Color = Color::srgb(1.0, 0.6, 0.2);
const SPEED_COLOR: Color = Color::srgb(0.4, 0.95, 0.6);
const ALERT_COLOR: Color = Color::srgb(1.0, 0.3, 0.25);
const TEXT_COLOR: Color = Color::srgb(0.8, 0.95, 0.85);
const MUTED_TEXT: Color = Color::srgb(0.6, 0.7, 0.65);
const BUTTON_IDLE: Color = Color::srgba(0.1, 0.12, 0.11, 0.95);
const BUTTON_HOVER: Color = Color::srgba(0.15, 0.18, 0.16, 0.95);
const BUTTON_PRESSED: Color = Color::srgba(0.2, 0.4, 0.3, 0.95);

pub fn speed_label(speed_kmh: u32) -> String {
    format!("Speed: {} km/h", speed_kmh)
}

pub fn distance_label(distance: &str) -> String {
    format!("Distance to next camera: {}", distance)
}

pub fn status_label(config: &SimulationConfig, ticks: u64) -> String {
    let state = if config.paused { "PAUSED" } else { "LIVE" };
    format!("SIM: {:.1}x | TICK: {} | STATE: {}", config.speed, ticks, state)
}

fn setup_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(10.0),
                left: Val::Px(10.0),
                padding: UiRect::axes(Val::Px(12.0), Val::Px(10.0)),
                border: UiRect::all(Val::Px(1.0)),
                row_gap: Val::Px(6.0),
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(PANEL_BG),
            BorderColor(BORDER),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("AI Camera in Bangalore-Mysore Highway"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(TITLE_COLOR),
            ));

            parent.spawn((
                Text::new(speed_label(0)),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(SPEED_COLOR),
                Readout::Speed,
            ));

            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(ALERT_COLOR),
                Readout::Alert,
            ));

            parent.spawn((
                Text::new(distance_label(DISTANCE_PLACEHOLDER)),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(TEXT_COLOR),
                Readout::Distance,
            ));

            parent.spawn((
                Text::new(status_label(&SimulationConfig::default(), 0)),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(MUTED_TEXT),
                SimStatusText,
            ));

            parent
                .spawn((
                    Button,
                    Node {
                        padding: UiRect::axes(Val::Px(10.0), Val::Px(6.0)),
                        border: UiRect::all(Val::Px(1.0)),
                        justify_content: JustifyContent::Center,
                        ..default()
                    },
                    BackgroundColor(BUTTON_IDLE),
                    BorderColor(BORDER),
                    ResetButton,
                ))
                .with_children(|button| {
                    button.spawn((
                        Text::new("Reset Position"),
                        TextFont {
                            font_size: 16.0,
                            ..default()
                        },
                        TextColor(TEXT_COLOR),
                    ));
                });
        });

    // Bottom control reminder
    commands.spawn((
        Text::new("SPACE: Pause | 1-4 / +/-: Speed | R: Reset | M: Mute | WASD: Pan | Scroll: Zoom"),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(MUTED_TEXT),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
    ));
}

fn update_drive_readout(
    mut updates: EventReader<VehicleUpdated>,
    mut readouts: Query<(&mut Text, &Readout)>,
) {
    // Only the newest snapshot matters for display.
    let Some(VehicleUpdated(snapshot)) = updates.read().last().copied() else {
        return;
    };

    for (mut text, readout) in &mut readouts {
        **text = readout_text(*readout, &snapshot);
    }
}

fn readout_text(readout: Readout, snapshot: &VehicleSnapshot) -> String {
    match readout {
        Readout::Speed => speed_label(snapshot.speed_kmh),
        Readout::Alert => snapshot.alert_message().to_string(),
        Readout::Distance => distance_label(&snapshot.distance_label()),
    }
}

fn update_sim_status(
    config: Res<SimulationConfig>,
    stats: Res<SimulationStats>,
    mut query: Query<&mut Text, With<SimStatusText>>,
) {
    if config.is_changed() || stats.is_changed() {
        for mut text in &mut query {
            **text = status_label(&config, stats.total_ticks);
        }
    }
}

fn handle_reset_button(
    interactions: Query<&Interaction, (Changed<Interaction>, With<ResetButton>)>,
    mut resets: EventWriter<ResetVehicle>,
) {
    for interaction in &interactions {
        if *interaction == Interaction::Pressed {
            resets.send(ResetVehicle);
        }
    }
}

fn refresh_button_visuals(
    mut buttons: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<Button>)>,
) {
    for (interaction, mut bg) in &mut buttons {
        bg.0 = match interaction {
            Interaction::Pressed => BUTTON_PRESSED,
            Interaction::Hovered => BUTTON_HOVER,
            Interaction::None => BUTTON_IDLE,
        };
    }
}
