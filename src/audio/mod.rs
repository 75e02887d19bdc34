//! Alert chime for camera proximity.
//!
//! Listens for `CameraAlert` events and plays the alert sound. Playback
//! needs the `audio` cargo feature; without it the chime is only logged so
//! the app runs on machines without an audio stack.

use bevy::prelude::*;

use crate::simulation::engine::format_distance;
use crate::simulation::vehicles::{CameraAlert, VehicleSet};

pub struct AudioPlugin;

impl Plugin for AudioPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AlertAudioConfig>()
            .init_resource::<AlertAudioState>()
            .add_systems(Update, (toggle_alert_audio, play_alert_chime).after(VehicleSet));
    }
}

/// Configuration for the alert chime.
#[derive(Resource)]
pub struct AlertAudioConfig {
    /// Whether the chime is enabled.
    pub enabled: bool,
    /// Playback volume (0.0 to 1.0).
    pub volume: f32,
    /// Asset path of the chime.
    pub sound_path: String,
}

impl Default for AlertAudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: 0.8,
            sound_path: "audio/alert-sound.mp3".to_string(),
        }
    }
}

/// Bookkeeping for played chimes.
#[derive(Resource, Default)]
pub struct AlertAudioState {
    /// Chimes played since startup.
    pub chimes_played: u32,
    /// Engine tick of the most recent chime.
    pub last_chime_tick: Option<u64>,
}

/// M mutes and unmutes the chime.
fn toggle_alert_audio(
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    mut config: ResMut<AlertAudioConfig>,
) {
    if keyboard.is_some_and(|k| k.just_pressed(KeyCode::KeyM)) {
        config.enabled = !config.enabled;
        info!(
            "Alert chime: {}",
            if config.enabled { "ON" } else { "OFF" }
        );
    }
}

fn play_alert_chime(
    mut commands: Commands,
    mut alerts: EventReader<CameraAlert>,
    config: Res<AlertAudioConfig>,
    mut state: ResMut<AlertAudioState>,
    asset_server: Option<Res<AssetServer>>,
) {
    // Only one chime per frame even if several ticks were processed.
    let Some(alert) = alerts.read().last() else {
        return;
    };

    if !config.enabled {
        return;
    }

    state.chimes_played += 1;
    state.last_chime_tick = Some(alert.tick);
    info!(
        "Camera alert at tick {} (camera {:?}, {})",
        alert.tick,
        alert.camera,
        format_distance(alert.distance_km)
    );

    spawn_chime(&mut commands, &config, asset_server.as_deref());
}

#[cfg(feature = "audio")]
fn spawn_chime(
    commands: &mut Commands,
    config: &AlertAudioConfig,
    asset_server: Option<&AssetServer>,
) {
    use bevy::audio::Volume;

    let Some(asset_server) = asset_server else {
        warn!("No asset server, cannot play {}", config.sound_path);
        return;
    };

    commands.spawn((
        AudioPlayer::new(asset_server.load(config.sound_path.clone())),
        PlaybackSettings::DESPAWN.with_volume(Volume::new(config.volume)),
    ));
}

#[cfg(not(feature = "audio"))]
fn spawn_chime(
    _commands: &mut Commands,
    config: &AlertAudioConfig,
    _asset_server: Option<&AssetServer>,
) {
    debug!("Audio disabled at build time, skipping {}", config.sound_path);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::route::RouteConfig;
    use crate::simulation::vehicles::VehiclePlugin;
    use crate::simulation::SimulationTick;

    fn audio_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(RouteConfig {
                alert_threshold_km: 1.5,
                seed: Some(3),
                ..default()
            })
            .add_event::<SimulationTick>()
            .add_plugins(VehiclePlugin)
            .add_plugins(AudioPlugin);
        app.update();
        app
    }

    fn drive(app: &mut App, ticks: u64) {
        for tick in 1..=ticks {
            app.world_mut().send_event(SimulationTick { tick, delta: 2.0 });
            app.update();
        }
    }

    #[test]
    fn chime_plays_once_per_approach() {
        let mut app = audio_app();
        // Cameras at ticks 20 and 40 are in range for three ticks each.
        drive(&mut app, 45);

        let state = app.world().resource::<AlertAudioState>();
        assert_eq!(state.chimes_played, 2);
        assert_eq!(state.last_chime_tick, Some(39));
    }

    #[test]
    fn muted_chime_is_not_counted() {
        let mut app = audio_app();
        app.world_mut().resource_mut::<AlertAudioConfig>().enabled = false;
        drive(&mut app, 25);
        assert_eq!(app.world().resource::<AlertAudioState>().chimes_played, 0);
    }
}
