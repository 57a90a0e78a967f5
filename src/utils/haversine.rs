//! Great-circle distance between two [`Geolocation`]s.

use crate::location::Geolocation;

/// Mean radius of the earth in meters.
pub const RADIUS_EARTH_METERS: f64 = 6_371_000.0;

/// Compute the straight-line distance in meters between two
/// geolocations using the
/// [haversine formula](https://en.wikipedia.org/wiki/Haversine_formula).
///
/// The result is symmetric in its arguments.
pub fn distance(from: &Geolocation, to: &Geolocation) -> f64 {
    let (lon1, lat1) = (from.longitude.0.to_radians(), from.latitude.0.to_radians());
    let (lon2, lat2) = (to.longitude.0.to_radians(), to.latitude.0.to_radians());

    let delta_lon = lon2 - lon1;
    let delta_lat = lat2 - lat1;
    let haversine =
        (delta_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);

    2.0 * RADIUS_EARTH_METERS * haversine.sqrt().asin()
}

#[cfg(test)]
mod haversine_tests {
    use super::*;
    use crate::location::UNIT_DELTA;
    use approx::assert_relative_eq;

    #[test]
    fn test_same_point_is_zero() {
        let p = Geolocation::new(37.7749, -122.4194);
        assert_eq!(distance(&p, &p), 0.0);
    }

    #[test]
    fn test_symmetric() {
        let sf = Geolocation::new(37.777843, -122.468207);
        let ny = Geolocation::new(40.738820, -73.990440);
        assert_eq!(distance(&sf, &ny), distance(&ny, &sf));
        // Roughly 4,130 km.
        assert!((4_100_000.0..4_160_000.0).contains(&distance(&sf, &ny)));
    }

    #[test]
    fn test_grid_diagonal() {
        let origin = Geolocation::new(0.0, 0.0);
        let two_two = Geolocation::new(2.0 * UNIT_DELTA, 2.0 * UNIT_DELTA);
        assert_relative_eq!(
            distance(&origin, &two_two),
            3.145067466556296,
            max_relative = 1e-12
        );
    }
}
