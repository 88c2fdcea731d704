//! Coordinates, the Surabaya bounding box and great-circle distance.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Mean Earth radius in kilometres (for the Haversine formula)
pub const EARTH_RADIUS_KM: f64 = 6_371.0;

pub const MIN_LATITUDE: f64 = -7.4;
pub const MAX_LATITUDE: f64 = -7.1;
pub const MIN_LONGITUDE: f64 = 112.6;
pub const MAX_LONGITUDE: f64 = 112.8;

/// Map center used when the user's location is unknown
pub const FALLBACK_CENTER: Coordinate = Coordinate {
    lat: -7.2575,
    lng: 112.7521,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Inside the Surabaya bounding box, edges inclusive. NaN never is.
    pub fn in_bounds(&self) -> bool {
        (MIN_LATITUDE..=MAX_LATITUDE).contains(&self.lat)
            && (MIN_LONGITUDE..=MAX_LONGITUDE).contains(&self.lng)
    }
}

/// Great-circle distance in kilometres
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().min(1.0).asin();

    EARTH_RADIUS_KM * c
}

/// Two-decimal rounding used for distances shown to clients
pub fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_edges_are_inclusive() {
        for (lat, lng) in [
            (-7.4, 112.7),
            (-7.1, 112.7),
            (-7.25, 112.6),
            (-7.25, 112.8),
            (-7.4, 112.6),
            (-7.1, 112.8),
        ] {
            assert!(Coordinate::new(lat, lng).in_bounds(), "({}, {})", lat, lng);
        }
    }

    #[test]
    fn test_just_outside_bounding_box() {
        for (lat, lng) in [
            (-7.4001, 112.7),
            (-7.0999, 112.7),
            (-7.25, 112.5999),
            (-7.25, 112.8001),
            (f64::NAN, 112.7),
            (-7.25, f64::NAN),
        ] {
            assert!(!Coordinate::new(lat, lng).in_bounds(), "({}, {})", lat, lng);
        }
    }

    #[test]
    fn test_haversine_same_point_is_zero() {
        let p = Coordinate::new(-7.27, 112.75);
        assert_eq!(haversine_km(p, p), 0.0);
    }

    #[test]
    fn test_haversine_symmetric() {
        let points = [
            Coordinate::new(-7.27, 112.75),
            Coordinate::new(-7.2575, 112.7521),
            Coordinate::new(-7.1, 112.6),
            Coordinate::new(-7.4, 112.8),
        ];
        for a in points {
            for b in points {
                assert_eq!(haversine_km(a, b), haversine_km(b, a));
            }
        }
    }

    #[test]
    fn test_haversine_known_distance() {
        // Jakarta to Bandung, roughly 116 km as the crow flies
        let jakarta = Coordinate::new(-6.2088, 106.8456);
        let bandung = Coordinate::new(-6.9175, 107.6191);
        let d = haversine_km(jakarta, bandung);
        assert!(d > 110.0 && d < 125.0, "got {}", d);
    }

    #[test]
    fn test_round_km() {
        assert_eq!(round_km(1.23456), 1.23);
        assert_eq!(round_km(1.235001), 1.24);
        assert_eq!(round_km(0.0), 0.0);
    }

    #[test]
    fn test_fallback_center_in_bounds() {
        assert!(FALLBACK_CENTER.in_bounds());
    }
}
