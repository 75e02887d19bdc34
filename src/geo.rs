//! Geographic primitives: latitude/longitude points, linear interpolation,
//! and great-circle (haversine) distance.

/// Mean Earth radius used for all distance calculations.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Component-wise linear interpolation in degree space.
    ///
    /// This is not a geodesic; along a short highway the error is
    /// negligible for display purposes.
    pub fn lerp(self, other: GeoPoint, t: f64) -> GeoPoint {
        GeoPoint {
            lat: self.lat + t * (other.lat - self.lat),
            lon: self.lon + t * (other.lon - self.lon),
        }
    }

    /// Great-circle distance to `other` in kilometers.
    pub fn distance_km(self, other: GeoPoint) -> f64 {
        haversine_km(self, other)
    }
}

/// Haversine distance between two points on a sphere of radius
/// [`EARTH_RADIUS_KM`].
pub fn haversine_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lon = (to.lon - from.lon).to_radians();
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // atan2 form keeps `c` finite even if rounding pushes `a` slightly past 1
    let c = 2.0 * a.sqrt().atan2((1.0 - a).max(0.0).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    const BANGALORE: GeoPoint = GeoPoint::new(12.9716, 77.5946);
    const MYSORE: GeoPoint = GeoPoint::new(12.2958, 76.6394);

    #[test]
    fn self_distance_is_zero() {
        assert_eq!(haversine_km(BANGALORE, BANGALORE), 0.0);
        let equator = GeoPoint::new(0.0, 0.0);
        assert_eq!(equator.distance_km(equator), 0.0);
    }

    #[test]
    fn bangalore_to_mysore_is_about_128_km() {
        let d = haversine_km(BANGALORE, MYSORE);
        assert!(d > 120.0 && d < 130.0, "unexpected distance {d}");
        assert!((d - 128.0).abs() < 0.5, "unexpected distance {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let there = haversine_km(BANGALORE, MYSORE);
        let back = haversine_km(MYSORE, BANGALORE);
        assert!((there - back).abs() < 1e-9);
    }

    #[test]
    fn one_degree_of_latitude() {
        let d = haversine_km(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 0.0));
        let expected = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;
        assert!((d - expected).abs() < 1e-9);
    }

    #[test]
    fn lerp_hits_endpoints() {
        assert_eq!(BANGALORE.lerp(MYSORE, 0.0), BANGALORE);
        let end = BANGALORE.lerp(MYSORE, 1.0);
        assert!((end.lat - MYSORE.lat).abs() < 1e-12);
        assert!((end.lon - MYSORE.lon).abs() < 1e-12);
    }

    #[test]
    fn lerp_of_degenerate_segment_is_constant() {
        for t in [0.0, 0.3, 0.99] {
            assert_eq!(MYSORE.lerp(MYSORE, t), MYSORE);
        }
    }
}
