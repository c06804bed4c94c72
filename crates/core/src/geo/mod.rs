//! Geodesy utilities
//!
//! Pure functions for great-circle calculations on a spherical Earth.
//! All coordinates are WGS84 degrees; all distances are meters.

use libm::{asin, atan2, cos, sin, sqrt};

/// Mean Earth radius used by every distance calculation (meters)
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

const DEG_TO_RAD: f64 = core::f64::consts::PI / 180.0;
const RAD_TO_DEG: f64 = 180.0 / core::f64::consts::PI;

/// Geographic coordinate
///
/// Used for routing input, step anchors and device positions alike.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Waypoint {
    /// Latitude in degrees (-90 to +90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to +180)
    pub longitude: f64,
}

impl Waypoint {
    /// Create a new waypoint
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Create a waypoint from a GeoJSON-ordered `[longitude, latitude]` pair
    pub const fn from_lon_lat(pair: [f64; 2]) -> Self {
        Self {
            latitude: pair[1],
            longitude: pair[0],
        }
    }

    /// GeoJSON-ordered `[longitude, latitude]` pair
    pub const fn to_lon_lat(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }

    /// Check that both components are finite and inside WGS84 bounds
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Great-circle distance between two positions using the Haversine formula
///
/// ```text
/// a = sin²(Δφ/2) + cos(φ1)·cos(φ2)·sin²(Δλ/2)
/// c = 2·atan2(√a, √(1-a))
/// d = R·c
/// ```
pub fn haversine_distance(from: &Waypoint, to: &Waypoint) -> f64 {
    let lat1_rad = from.latitude * DEG_TO_RAD;
    let lat2_rad = to.latitude * DEG_TO_RAD;
    let delta_lat = (to.latitude - from.latitude) * DEG_TO_RAD;
    let delta_lon = (to.longitude - from.longitude) * DEG_TO_RAD;

    let sin_dlat = sin(delta_lat / 2.0);
    let sin_dlon = sin(delta_lon / 2.0);
    let a = sin_dlat * sin_dlat + cos(lat1_rad) * cos(lat2_rad) * sin_dlon * sin_dlon;
    // Rounding can push `a` a hair outside [0, 1] for antipodal points
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * atan2(sqrt(a), sqrt(1.0 - a));

    EARTH_RADIUS_M * c
}

/// Initial bearing (forward azimuth) from `from` to `to`
///
/// Returns degrees in the range [0, 360), 0 = true north.
pub fn initial_bearing(from: &Waypoint, to: &Waypoint) -> f64 {
    let lat1_rad = from.latitude * DEG_TO_RAD;
    let lat2_rad = to.latitude * DEG_TO_RAD;
    let delta_lon = (to.longitude - from.longitude) * DEG_TO_RAD;

    let y = sin(delta_lon) * cos(lat2_rad);
    let x = cos(lat1_rad) * sin(lat2_rad) - sin(lat1_rad) * cos(lat2_rad) * cos(delta_lon);

    normalize_heading(atan2(y, x) * RAD_TO_DEG)
}

/// Position reached by travelling `distance_m` from `from` along `bearing_deg`
pub fn destination_point(from: &Waypoint, bearing_deg: f64, distance_m: f64) -> Waypoint {
    let lat1 = from.latitude * DEG_TO_RAD;
    let lon1 = from.longitude * DEG_TO_RAD;
    let bearing = bearing_deg * DEG_TO_RAD;
    let angular = distance_m / EARTH_RADIUS_M;

    let lat2 = asin(sin(lat1) * cos(angular) + cos(lat1) * sin(angular) * cos(bearing));
    let lon2 = lon1
        + atan2(
            sin(bearing) * sin(angular) * cos(lat1),
            cos(angular) - sin(lat1) * sin(lat2),
        );

    Waypoint::new(lat2 * RAD_TO_DEG, normalize_angle(lon2 * RAD_TO_DEG))
}

/// Normalize angle to -180 to +180 range
pub fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle % 360.0;
    if a > 180.0 {
        a -= 360.0;
    } else if a < -180.0 {
        a += 360.0;
    }
    a
}

/// Normalize a compass heading to the range [0, 360)
pub fn normalize_heading(heading: f64) -> f64 {
    let h = heading % 360.0;
    if h < 0.0 {
        h + 360.0
    } else {
        h
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_identical_points_is_zero() {
        let points = [
            Waypoint::new(0.0, 0.0),
            Waypoint::new(40.0, -75.0),
            Waypoint::new(-33.8688, 151.2093),
            Waypoint::new(89.9, 179.9),
        ];
        for p in points {
            assert_eq!(haversine_distance(&p, &p), 0.0);
        }
    }

    #[test]
    fn test_distance_is_symmetric() {
        let pairs = [
            (Waypoint::new(0.0, 0.0), Waypoint::new(0.0, 1.0)),
            (Waypoint::new(40.0, -75.0), Waypoint::new(40.001, -75.001)),
            (Waypoint::new(35.6762, 139.6503), Waypoint::new(-33.8688, 151.2093)),
            (Waypoint::new(51.5, -0.12), Waypoint::new(48.85, 2.35)),
        ];
        for (a, b) in pairs {
            let ab = haversine_distance(&a, &b);
            let ba = haversine_distance(&b, &a);
            assert!((ab - ba).abs() < 1e-6, "{ab} != {ba}");
        }
    }

    #[test]
    fn test_distance_one_degree_longitude_at_equator() {
        let d = haversine_distance(&Waypoint::new(0.0, 0.0), &Waypoint::new(0.0, 1.0));
        assert!((d - 111_195.0).abs() < 1_111.95, "got {d}");
    }

    #[test]
    fn test_distance_one_degree_latitude() {
        // ~111km per degree of latitude
        let d = haversine_distance(&Waypoint::new(35.0, 139.0), &Waypoint::new(36.0, 139.0));
        assert!((d - 111_195.0).abs() < 1000.0);
    }

    #[test]
    fn test_distance_short_walk() {
        // 0.0001 degree of latitude is ~11.1m
        let d = haversine_distance(
            &Waypoint::new(40.0, -75.0),
            &Waypoint::new(40.0001, -75.0),
        );
        assert!((d - 11.12).abs() < 0.05);
    }

    #[test]
    fn test_bearing_cardinal_directions() {
        let origin = Waypoint::new(35.0, 139.0);
        let north = initial_bearing(&origin, &Waypoint::new(36.0, 139.0));
        let east = initial_bearing(&origin, &Waypoint::new(35.0, 140.0));
        let south = initial_bearing(&Waypoint::new(36.0, 139.0), &origin);
        let west = initial_bearing(&Waypoint::new(35.0, 140.0), &origin);

        assert!(north.abs() < 1.0 || (north - 360.0).abs() < 1.0);
        assert!((east - 90.0).abs() < 1.0);
        assert!((south - 180.0).abs() < 1.0);
        assert!((west - 270.0).abs() < 1.0);
    }

    #[test]
    fn test_destination_point_round_trip_distance() {
        let origin = Waypoint::new(40.0, -75.0);
        let dest = destination_point(&origin, 45.0, 250.0);
        let d = haversine_distance(&origin, &dest);
        assert!((d - 250.0).abs() < 0.01);
        assert!((initial_bearing(&origin, &dest) - 45.0).abs() < 0.1);
    }

    #[test]
    fn test_lon_lat_ordering() {
        let wp = Waypoint::from_lon_lat([-75.001, 40.001]);
        assert_eq!(wp.latitude, 40.001);
        assert_eq!(wp.longitude, -75.001);
        assert_eq!(wp.to_lon_lat(), [-75.001, 40.001]);
    }

    #[test]
    fn test_waypoint_validity() {
        assert!(Waypoint::new(40.0, -75.0).is_valid());
        assert!(!Waypoint::new(91.0, 0.0).is_valid());
        assert!(!Waypoint::new(0.0, 181.0).is_valid());
        assert!(!Waypoint::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_normalize_angle() {
        assert!((normalize_angle(0.0) - 0.0).abs() < 0.001);
        assert!((normalize_angle(180.0) - 180.0).abs() < 0.001);
        assert!((normalize_angle(270.0) - (-90.0)).abs() < 0.001);
        assert!((normalize_angle(-270.0) - 90.0).abs() < 0.001);
        assert!((normalize_angle(450.0) - 90.0).abs() < 0.001);
    }

    #[test]
    fn test_normalize_heading() {
        assert!((normalize_heading(-90.0) - 270.0).abs() < 0.001);
        assert!((normalize_heading(360.0) - 0.0).abs() < 0.001);
        assert!((normalize_heading(725.0) - 5.0).abs() < 0.001);
    }
}
