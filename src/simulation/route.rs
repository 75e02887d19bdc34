//! Fixed highway route and AI-camera placement.

use bevy::prelude::*;
use smallvec::SmallVec;

use crate::geo::GeoPoint;

/// Bangalore city center.
pub const BANGALORE: GeoPoint = GeoPoint::new(12.9716, 77.5946);
/// Mysore city center.
pub const MYSORE: GeoPoint = GeoPoint::new(12.2958, 76.6394);

/// Camera positions along the route, as fractions of its length.
pub const DEFAULT_CAMERA_FRACTIONS: [f64; 4] = [0.2, 0.4, 0.6, 0.8];

/// Camera waypoints. Four inline slots cover the stock highway layout.
pub type Waypoints = SmallVec<[GeoPoint; 4]>;

/// Straight two-point route the vehicle follows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Route {
    pub start: GeoPoint,
    pub end: GeoPoint,
}

impl Route {
    pub const fn new(start: GeoPoint, end: GeoPoint) -> Self {
        Self { start, end }
    }

    /// Position at `progress` (0.0 = start, 1.0 = end).
    pub fn position_at(&self, progress: f64) -> GeoPoint {
        self.start.lerp(self.end, progress)
    }

    /// Great-circle length of the route.
    pub fn length_km(&self) -> f64 {
        self.start.distance_km(self.end)
    }

    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// Midpoint in degree space, used to center the map.
    pub fn midpoint(&self) -> GeoPoint {
        self.position_at(0.5)
    }

    /// Place waypoints at the given fractions of the route.
    ///
    /// Fractions outside [0, 1] are clamped onto the route.
    pub fn waypoints_at(&self, fractions: &[f64]) -> Waypoints {
        fractions
            .iter()
            .map(|&f| {
                if !(0.0..=1.0).contains(&f) {
                    warn!("Camera fraction {} lies off the route, clamping", f);
                }
                self.position_at(f.clamp(0.0, 1.0))
            })
            .collect()
    }
}

impl Default for Route {
    fn default() -> Self {
        Self::new(BANGALORE, MYSORE)
    }
}

/// How often a camera alert fires its side effect while the vehicle
/// stays inside the alert radius.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlertPolicy {
    /// Fire once when the alert goes from inactive to active.
    #[default]
    OnRisingEdge,
    /// Fire on every tick the alert is active.
    EveryTick,
}

/// Configuration for the simulated drive.
#[derive(Resource, Clone, Debug)]
pub struct RouteConfig {
    pub route: Route,
    /// Camera positions as fractions of the route.
    pub camera_fractions: Vec<f64>,
    /// Distance under which a camera triggers the alert (km).
    pub alert_threshold_km: f64,
    /// Progress added per tick.
    pub progress_increment: f64,
    /// Inclusive speed range sampled each tick (km/h).
    pub min_speed_kmh: u32,
    pub max_speed_kmh: u32,
    /// Fixed seed for reproducible speed samples. `None` seeds from entropy.
    pub seed: Option<u64>,
    pub alert_policy: AlertPolicy,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            route: Route::default(),
            camera_fractions: DEFAULT_CAMERA_FRACTIONS.to_vec(),
            alert_threshold_km: 1.0,
            progress_increment: 0.01,
            min_speed_kmh: 20,
            max_speed_kmh: 120,
            seed: None,
            alert_policy: AlertPolicy::OnRisingEdge,
        }
    }
}

impl RouteConfig {
    pub fn waypoints(&self) -> Waypoints {
        self.route.waypoints_at(&self.camera_fractions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cameras_sit_evenly_along_route() {
        let route = Route::default();
        let cameras = route.waypoints_at(&DEFAULT_CAMERA_FRACTIONS);
        assert_eq!(cameras.len(), 4);
        assert!(!cameras.spilled());

        let expected_lat = BANGALORE.lat + 0.2 * (MYSORE.lat - BANGALORE.lat);
        let expected_lon = BANGALORE.lon + 0.2 * (MYSORE.lon - BANGALORE.lon);
        assert!((cameras[0].lat - expected_lat).abs() < 1e-12);
        assert!((cameras[0].lon - expected_lon).abs() < 1e-12);

        // Consecutive cameras are a fifth of the route apart.
        let spacing = cameras[0].distance_km(cameras[1]);
        assert!((spacing - route.length_km() / 5.0).abs() < 0.1);
    }

    #[test]
    fn off_route_fractions_are_clamped() {
        let route = Route::default();
        let cameras = route.waypoints_at(&[-0.5, 1.5]);
        assert_eq!(cameras[0], route.start);
        assert_eq!(cameras[1], route.position_at(1.0));
    }

    #[test]
    fn zero_length_route_is_degenerate() {
        let route = Route::new(MYSORE, MYSORE);
        assert!(route.is_degenerate());
        assert_eq!(route.length_km(), 0.0);
        assert_eq!(route.position_at(0.42), MYSORE);
        assert!(!Route::default().is_degenerate());
    }
}
