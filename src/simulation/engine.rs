//! Position and proximity engine for the simulated drive.
//!
//! The engine owns the only mutable drive state (progress along the route,
//! current speed, alert state). Every tick produces an immutable
//! [`VehicleSnapshot`] that the rest of the app consumes.

use std::ops::RangeInclusive;

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geo::GeoPoint;
use crate::simulation::route::{AlertPolicy, Route, RouteConfig, Waypoints};

/// Message shown while any camera is within the alert radius.
pub const ALERT_MESSAGE: &str = "⚠ Traffic Enforcement Cameras Ahead!";

/// Distance label shown before the first proximity check and after a reset.
pub const DISTANCE_PLACEHOLDER: &str = "- km";

// Absorbs rounding when the increment divides 1.0 in exact arithmetic only.
const LAP_EPSILON: f64 = 1e-9;

/// Whether the proximity alert is currently active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlertState {
    #[default]
    Inactive,
    Active,
}

impl AlertState {
    pub fn is_active(self) -> bool {
        self == AlertState::Active
    }

    /// Text for the HUD. Empty when inactive.
    pub fn message(self) -> &'static str {
        match self {
            AlertState::Inactive => "",
            AlertState::Active => ALERT_MESSAGE,
        }
    }
}

/// Format a nearest-camera distance with two decimals.
pub fn format_distance(km: Option<f64>) -> String {
    match km {
        Some(d) if d.is_finite() => format!("{:.2} km", d),
        _ => DISTANCE_PLACEHOLDER.to_string(),
    }
}

/// Index and distance of the waypoint closest to `position`.
///
/// Returns `None` for an empty waypoint set.
pub fn nearest_waypoint(position: GeoPoint, waypoints: &[GeoPoint]) -> Option<(usize, f64)> {
    waypoints
        .iter()
        .map(|w| position.distance_km(*w))
        .enumerate()
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

/// Result of advancing the vehicle by one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickOutcome {
    pub progress: f64,
    pub position: GeoPoint,
    pub speed_kmh: u32,
}

/// Result of a proximity check against the camera set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProximityReport {
    pub alert: AlertState,
    /// Distance to the closest camera. `None` when there are no cameras.
    pub nearest_km: Option<f64>,
    pub nearest_camera: Option<usize>,
    /// True when the alert side effect (chime, banner flash) should fire.
    pub alert_raised: bool,
}

impl ProximityReport {
    pub fn distance_label(&self) -> String {
        format_distance(self.nearest_km)
    }
}

/// Immutable view of the drive after a tick or reset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VehicleSnapshot {
    /// Engine ticks processed since startup (not cleared by reset).
    pub tick: u64,
    pub progress: f64,
    pub position: GeoPoint,
    pub speed_kmh: u32,
    pub alert: AlertState,
    pub nearest_km: Option<f64>,
    pub nearest_camera: Option<usize>,
    pub alert_raised: bool,
}

impl VehicleSnapshot {
    pub fn alert_message(&self) -> &'static str {
        self.alert.message()
    }

    pub fn distance_label(&self) -> String {
        format_distance(self.nearest_km)
    }
}

/// The simulated vehicle and its camera proximity state.
#[derive(Resource)]
pub struct SimulationEngine {
    route: Route,
    waypoints: Waypoints,
    alert_threshold_km: f64,
    progress_increment: f64,
    speed_range: RangeInclusive<u32>,
    alert_policy: AlertPolicy,
    rng: StdRng,

    /// Increments taken in the current lap. Progress is derived from this
    /// so repeated additions never accumulate error.
    lap_step: u64,
    ticks: u64,
    progress: f64,
    position: GeoPoint,
    speed_kmh: u32,
    alert: AlertState,
    nearest_km: Option<f64>,
    nearest_camera: Option<usize>,
    alert_raised: bool,
}

impl SimulationEngine {
    /// Build an engine with cameras placed per `config.camera_fractions`.
    pub fn new(config: &RouteConfig) -> Self {
        Self::with_waypoints(config, config.waypoints())
    }

    /// Build an engine with an explicit camera set.
    pub fn with_waypoints(config: &RouteConfig, waypoints: Waypoints) -> Self {
        let defaults = RouteConfig::default();

        let progress_increment =
            if config.progress_increment.is_finite() && config.progress_increment > 0.0 {
                config.progress_increment
            } else {
                warn!(
                    "Invalid progress increment {}, using {}",
                    config.progress_increment, defaults.progress_increment
                );
                defaults.progress_increment
            };

        let speed_range = if config.min_speed_kmh <= config.max_speed_kmh {
            config.min_speed_kmh..=config.max_speed_kmh
        } else {
            warn!(
                "Speed range {}..={} is inverted, swapping bounds",
                config.min_speed_kmh, config.max_speed_kmh
            );
            config.max_speed_kmh..=config.min_speed_kmh
        };

        if waypoints.is_empty() {
            warn!("No cameras configured, proximity alerts are disabled");
        }
        if config.route.is_degenerate() {
            warn!("Route start and end coincide, the vehicle will not move");
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            route: config.route,
            waypoints,
            alert_threshold_km: config.alert_threshold_km,
            progress_increment,
            speed_range,
            alert_policy: config.alert_policy,
            rng,
            lap_step: 0,
            ticks: 0,
            progress: 0.0,
            position: config.route.start,
            speed_kmh: 0,
            alert: AlertState::Inactive,
            nearest_km: None,
            nearest_camera: None,
            alert_raised: false,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn waypoints(&self) -> &[GeoPoint] {
        &self.waypoints
    }

    pub fn alert_threshold_km(&self) -> f64 {
        self.alert_threshold_km
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn position(&self) -> GeoPoint {
        self.position
    }

    pub fn speed_kmh(&self) -> u32 {
        self.speed_kmh
    }

    pub fn alert(&self) -> AlertState {
        self.alert
    }

    /// Advance progress by one increment and sample a new speed.
    ///
    /// Reaching the end of the route restarts the drive from the start.
    /// The returned position always matches the stored progress.
    pub fn tick(&mut self) -> TickOutcome {
        self.ticks += 1;
        self.lap_step += 1;

        let mut progress = self.lap_step as f64 * self.progress_increment;
        if progress >= 1.0 - LAP_EPSILON {
            self.lap_step = 0;
            progress = 0.0;
        }

        self.progress = progress;
        self.position = self.route.position_at(progress);
        self.speed_kmh = self.rng.gen_range(self.speed_range.clone());

        TickOutcome {
            progress: self.progress,
            position: self.position,
            speed_kmh: self.speed_kmh,
        }
    }

    /// Compare `position` against every camera and update the alert state.
    pub fn check_proximity(&mut self, position: GeoPoint) -> ProximityReport {
        let nearest = nearest_waypoint(position, &self.waypoints);

        let alert = match nearest {
            Some((_, d)) if d < self.alert_threshold_km => AlertState::Active,
            _ => AlertState::Inactive,
        };

        let alert_raised = match self.alert_policy {
            AlertPolicy::OnRisingEdge => alert.is_active() && !self.alert.is_active(),
            AlertPolicy::EveryTick => alert.is_active(),
        };

        self.alert = alert;
        self.nearest_camera = nearest.map(|(i, _)| i);
        self.nearest_km = nearest.map(|(_, d)| d);
        self.alert_raised = alert_raised;

        ProximityReport {
            alert,
            nearest_km: self.nearest_km,
            nearest_camera: self.nearest_camera,
            alert_raised,
        }
    }

    /// One full simulation step: move, then check cameras at the new position.
    pub fn step(&mut self) -> VehicleSnapshot {
        let outcome = self.tick();
        self.check_proximity(outcome.position);
        self.snapshot()
    }

    /// Put the vehicle back at the route start with a clear display.
    pub fn reset(&mut self) -> VehicleSnapshot {
        self.lap_step = 0;
        self.progress = 0.0;
        self.position = self.route.start;
        self.speed_kmh = 0;
        self.alert = AlertState::Inactive;
        self.nearest_km = None;
        self.nearest_camera = None;
        self.alert_raised = false;
        self.snapshot()
    }

    pub fn snapshot(&self) -> VehicleSnapshot {
        VehicleSnapshot {
            tick: self.ticks,
            progress: self.progress,
            position: self.position,
            speed_kmh: self.speed_kmh,
            alert: self.alert,
            nearest_km: self.nearest_km,
            nearest_camera: self.nearest_camera,
            alert_raised: self.alert_raised,
        }
    }
}
