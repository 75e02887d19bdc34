//! Equirectangular projection from latitude/longitude to screen space.

use bevy::prelude::*;

use crate::geo::GeoPoint;

/// Maps geographic points onto the 2D world plane.
///
/// Longitude is scaled by `cos(center.lat)` so distances near the center
/// keep their proportions. North is +Y, east is +X.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct MapProjection {
    pub center: GeoPoint,
    /// World units per degree of latitude.
    pub units_per_degree: f64,
}

impl MapProjection {
    pub fn new(center: GeoPoint, units_per_degree: f64) -> Self {
        Self {
            center,
            units_per_degree,
        }
    }

    /// Projection that fits the box spanned by `a` and `b` into
    /// `extent` world units on its longest side.
    pub fn fit(a: GeoPoint, b: GeoPoint, extent: f64) -> Self {
        let center = a.lerp(b, 0.5);
        let lon_scale = center.lat.to_radians().cos();
        let span = (a.lat - b.lat)
            .abs()
            .max((a.lon - b.lon).abs() * lon_scale);
        // A zero span (both points equal) falls back to one degree.
        let span = if span > 0.0 { span } else { 1.0 };
        Self::new(center, extent / span)
    }

    pub fn project(&self, point: GeoPoint) -> Vec2 {
        let lon_scale = self.center.lat.to_radians().cos();
        let x = (point.lon - self.center.lon) * lon_scale * self.units_per_degree;
        let y = (point.lat - self.center.lat) * self.units_per_degree;
        Vec2::new(x as f32, y as f32)
    }

    /// World units covered by `km` kilometers near the center.
    pub fn km_to_units(&self, km: f64) -> f32 {
        let km_per_degree = crate::geo::EARTH_RADIUS_KM.to_radians();
        (km / km_per_degree * self.units_per_degree) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::route::{BANGALORE, MYSORE};

    #[test]
    fn center_projects_to_origin() {
        let projection = MapProjection::new(BANGALORE, 100.0);
        assert_eq!(projection.project(BANGALORE), Vec2::ZERO);
    }

    #[test]
    fn north_is_up_and_east_is_right() {
        let projection = MapProjection::new(GeoPoint::new(0.0, 0.0), 10.0);
        let north = projection.project(GeoPoint::new(1.0, 0.0));
        let east = projection.project(GeoPoint::new(0.0, 1.0));
        assert!((north - Vec2::new(0.0, 10.0)).length() < 1e-4);
        assert!((east - Vec2::new(10.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn fit_keeps_route_inside_extent() {
        let projection = MapProjection::fit(BANGALORE, MYSORE, 500.0);
        let a = projection.project(BANGALORE);
        let b = projection.project(MYSORE);
        // Endpoints are symmetric around the center.
        assert!((a + b).length() < 1e-3);
        let longest = (a - b).x.abs().max((a - b).y.abs());
        assert!((longest - 500.0).abs() < 1e-2);
    }

    #[test]
    fn fit_of_single_point_is_finite() {
        let projection = MapProjection::fit(MYSORE, MYSORE, 500.0);
        assert!(projection.units_per_degree.is_finite());
        assert_eq!(projection.project(MYSORE), Vec2::ZERO);
    }

    #[test]
    fn km_scale_matches_latitude_degrees() {
        let projection = MapProjection::new(GeoPoint::new(0.0, 0.0), 100.0);
        let one_degree_km = crate::geo::EARTH_RADIUS_KM.to_radians();
        assert!((projection.km_to_units(one_degree_km) - 100.0).abs() < 1e-3);
    }
}
