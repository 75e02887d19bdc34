//! Simulation clock and the highway drive.
//!
//! The simulation runs on a fixed interval (default every 2 seconds)
//! decoupled from rendering. Each interval emits a `SimulationTick` event
//! which the vehicle systems turn into a new `VehicleSnapshot`.

use bevy::prelude::*;

pub mod engine;
pub mod route;
pub mod vehicles;

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationConfig>()
            .init_resource::<SimulationStats>()
            .add_event::<SimulationTick>()
            .add_plugins(vehicles::VehiclePlugin)
            .add_systems(
                Update,
                (simulation_controls, simulation_tick_system)
                    .chain()
                    .before(vehicles::VehicleSet),
            );
    }
}

/// Configuration for the simulation clock.
#[derive(Resource)]
pub struct SimulationConfig {
    /// Seconds of simulated time between ticks.
    pub tick_interval_secs: f32,
    /// Current simulation speed multiplier (0.5x to 4x).
    pub speed: f32,
    /// Whether simulation is paused.
    pub paused: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_interval_secs: 2.0,
            speed: 1.0,
            paused: false,
        }
    }
}

/// Event sent each simulation tick.
#[derive(Event, Clone, Copy, Debug)]
pub struct SimulationTick {
    /// The tick number since simulation start.
    pub tick: u64,
    /// Simulated seconds covered by this tick.
    pub delta: f32,
}

/// Statistics about the simulation.
#[derive(Resource, Default)]
pub struct SimulationStats {
    /// Total ticks since simulation start.
    pub total_ticks: u64,
    /// Accumulated time for fixed timestep.
    pub accumulator: f32,
}

/// System that generates simulation ticks at fixed intervals.
fn simulation_tick_system(
    config: Res<SimulationConfig>,
    mut stats: ResMut<SimulationStats>,
    time: Res<Time>,
    mut tick_events: EventWriter<SimulationTick>,
) {
    if config.paused {
        return;
    }

    let tick_duration = config.tick_interval_secs;
    if tick_duration <= 0.0 {
        return;
    }

    stats.accumulator += time.delta_secs() * config.speed;

    // Process accumulated time, sending tick events
    while stats.accumulator >= tick_duration {
        stats.accumulator -= tick_duration;
        stats.total_ticks += 1;

        tick_events.send(SimulationTick {
            tick: stats.total_ticks,
            delta: tick_duration,
        });
    }
}

/// Keyboard controls for simulation speed and pause.
fn simulation_controls(
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    mut config: ResMut<SimulationConfig>,
) {
    let Some(keyboard) = keyboard else {
        return;
    };

    // Space: Toggle pause
    if keyboard.just_pressed(KeyCode::Space) {
        config.paused = !config.paused;
        if config.paused {
            info!("Simulation PAUSED");
        } else {
            info!("Simulation RESUMED ({}x speed)", config.speed);
        }
    }

    // Number keys for speed presets
    for (key, preset) in [
        (KeyCode::Digit1, 1.0),
        (KeyCode::Digit2, 2.0),
        (KeyCode::Digit3, 3.0),
        (KeyCode::Digit4, 4.0),
    ] {
        if keyboard.just_pressed(key) {
            config.speed = preset;
            info!("Simulation speed: {}x", config.speed);
        }
    }

    // +/- for speed adjustment
    if keyboard.just_pressed(KeyCode::Equal) || keyboard.just_pressed(KeyCode::NumpadAdd) {
        config.speed = (config.speed + 0.5).min(4.0);
        info!("Simulation speed: {}x", config.speed);
    }
    if keyboard.just_pressed(KeyCode::Minus) || keyboard.just_pressed(KeyCode::NumpadSubtract) {
        config.speed = (config.speed - 0.5).max(0.5);
        info!("Simulation speed: {}x", config.speed);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::time::TimeUpdateStrategy;

    use super::*;

    fn clock_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(250)))
            .init_resource::<ButtonInput<KeyCode>>()
            .add_plugins(SimulationPlugin);
        app
    }

    #[test]
    fn clock_ticks_every_interval() {
        let mut app = clock_app();
        // 250 ms per update; the first update only initializes the clock.
        for _ in 0..17 {
            app.update();
        }
        assert_eq!(app.world().resource::<SimulationStats>().total_ticks, 2);
    }

    #[test]
    fn speed_multiplier_shortens_interval() {
        let mut app = clock_app();
        app.world_mut().resource_mut::<SimulationConfig>().speed = 4.0;
        for _ in 0..9 {
            app.update();
        }
        assert_eq!(app.world().resource::<SimulationStats>().total_ticks, 4);
    }

    #[test]
    fn paused_clock_does_not_tick() {
        let mut app = clock_app();
        app.world_mut().resource_mut::<SimulationConfig>().paused = true;
        for _ in 0..20 {
            app.update();
        }
        assert_eq!(app.world().resource::<SimulationStats>().total_ticks, 0);
    }

    #[test]
    fn space_toggles_pause() {
        let mut app = clock_app();
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Space);
        app.update();
        assert!(app.world().resource::<SimulationConfig>().paused);
    }
}
