//! The simulated vehicle: turns clock ticks into published snapshots.

use bevy::prelude::*;

use crate::simulation::engine::{SimulationEngine, VehicleSnapshot};
use crate::simulation::route::RouteConfig;
use crate::simulation::SimulationTick;

pub struct VehiclePlugin;

impl Plugin for VehiclePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RouteConfig>()
            .init_resource::<LatestSnapshot>()
            .add_event::<VehicleUpdated>()
            .add_event::<CameraAlert>()
            .add_event::<ResetVehicle>()
            .add_systems(Startup, setup_engine)
            .add_systems(
                Update,
                (reset_shortcut, handle_reset, advance_vehicle)
                    .chain()
                    .in_set(VehicleSet),
            );
    }
}

/// Systems that mutate the engine. Readers of [`VehicleUpdated`] and
/// [`CameraAlert`] should run after this set.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct VehicleSet;

/// Published after every tick and every reset.
#[derive(Event, Clone, Copy, Debug)]
pub struct VehicleUpdated(pub VehicleSnapshot);

/// Fired when the alert side effect (chime) should play.
#[derive(Event, Clone, Copy, Debug)]
pub struct CameraAlert {
    pub tick: u64,
    pub camera: Option<usize>,
    pub distance_km: Option<f64>,
}

/// Request to move the vehicle back to the start of the route.
#[derive(Event, Clone, Copy, Debug, Default)]
pub struct ResetVehicle;

/// Most recent snapshot, for systems that only need the current state.
#[derive(Resource, Default)]
pub struct LatestSnapshot(pub Option<VehicleSnapshot>);

fn setup_engine(mut commands: Commands, config: Res<RouteConfig>) {
    let engine = SimulationEngine::new(&config);
    info!(
        "Highway route ready: {:.1} km, {} cameras, alert radius {:.2} km",
        engine.route().length_km(),
        engine.waypoints().len(),
        engine.alert_threshold_km()
    );
    commands.insert_resource(engine);
}

/// Keyboard shortcut: R resets the vehicle.
fn reset_shortcut(
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    mut resets: EventWriter<ResetVehicle>,
) {
    if keyboard.is_some_and(|k| k.just_pressed(KeyCode::KeyR)) {
        resets.send(ResetVehicle);
    }
}

fn handle_reset(
    mut requests: EventReader<ResetVehicle>,
    mut engine: ResMut<SimulationEngine>,
    mut latest: ResMut<LatestSnapshot>,
    mut updates: EventWriter<VehicleUpdated>,
) {
    // Several requests in one frame collapse into a single reset.
    if requests.read().count() == 0 {
        return;
    }

    let snapshot = engine.reset();
    info!("Vehicle reset to route start");
    latest.0 = Some(snapshot);
    updates.send(VehicleUpdated(snapshot));
}

fn advance_vehicle(
    mut ticks: EventReader<SimulationTick>,
    mut engine: ResMut<SimulationEngine>,
    mut latest: ResMut<LatestSnapshot>,
    mut updates: EventWriter<VehicleUpdated>,
    mut alerts: EventWriter<CameraAlert>,
) {
    for tick in ticks.read() {
        let snapshot = engine.step();
        debug!(
            "Tick {}: progress {:.2}, {} km/h, nearest camera {}",
            tick.tick,
            snapshot.progress,
            snapshot.speed_kmh,
            snapshot.distance_label()
        );

        if snapshot.alert_raised {
            alerts.send(CameraAlert {
                tick: snapshot.tick,
                camera: snapshot.nearest_camera,
                distance_km: snapshot.nearest_km,
            });
        }

        latest.0 = Some(snapshot);
        updates.send(VehicleUpdated(snapshot));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::engine::AlertState;
    use crate::simulation::route::BANGALORE;

    #[derive(Resource, Default)]
    struct FiredAlerts(Vec<u64>);

    fn record_alerts(mut alerts: EventReader<CameraAlert>, mut fired: ResMut<FiredAlerts>) {
        fired.0.extend(alerts.read().map(|alert| alert.tick));
    }

    fn vehicle_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(RouteConfig {
                seed: Some(42),
                ..default()
            })
            .init_resource::<FiredAlerts>()
            .add_event::<SimulationTick>()
            .add_plugins(VehiclePlugin)
            .add_systems(Update, record_alerts.after(VehicleSet));
        // Run startup so the engine exists.
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
    fn tick_publishes_snapshot() {
        let mut app = vehicle_app();
        drive(&mut app, 3);

        let snapshot = app.world().resource::<LatestSnapshot>().0.unwrap();
        assert_eq!(snapshot.tick, 3);
        assert!((snapshot.progress - 0.03).abs() < 1e-12);
        assert!((20..=120).contains(&snapshot.speed_kmh));

        let engine = app.world().resource::<SimulationEngine>();
        assert_eq!(engine.position(), snapshot.position);
    }

    #[test]
    fn camera_alert_fires_on_rising_edge() {
        let mut app = vehicle_app();
        drive(&mut app, 45);
        assert_eq!(app.world().resource::<FiredAlerts>().0, vec![20, 40]);
    }

    #[test]
    fn reset_event_restores_start() {
        let mut app = vehicle_app();
        drive(&mut app, 20);
        let before = app.world().resource::<LatestSnapshot>().0.unwrap();
        assert_eq!(before.alert, AlertState::Active);

        app.world_mut().send_event(ResetVehicle);
        app.update();

        let after = app.world().resource::<LatestSnapshot>().0.unwrap();
        assert_eq!(after.progress, 0.0);
        assert_eq!(after.speed_kmh, 0);
        assert_eq!(after.position, BANGALORE);
        assert_eq!(after.alert_message(), "");
        assert_eq!(after.distance_label(), "- km");
    }

    #[test]
    fn r_key_requests_reset() {
        let mut app = vehicle_app();
        app.init_resource::<ButtonInput<KeyCode>>();
        drive(&mut app, 5);

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::KeyR);
        app.update();

        let engine = app.world().resource::<SimulationEngine>();
        assert_eq!(engine.progress(), 0.0);
    }
}
