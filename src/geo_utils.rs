//! Geographic utilities: great-circle distance and cumulative path distance.
//!
//! All distances are in kilometers. The haversine formula with a mean Earth
//! radius of 6371 km is used everywhere so distances stay numerically
//! reproducible across callers.

use crate::Coordinate;

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points in kilometers.
///
/// # Example
/// ```
/// use migration_paths::haversine_distance;
///
/// // London to Paris is roughly 343 km
/// let d = haversine_distance(51.5074, -0.1278, 48.8566, 2.3522);
/// assert!((d - 343.5).abs() < 2.0);
/// ```
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin() * (d_lat / 2.0).sin()
        + lat1.to_radians().cos()
            * lat2.to_radians().cos()
            * (d_lon / 2.0).sin()
            * (d_lon / 2.0).sin();

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Total great-circle length of a polyline in kilometers.
///
/// Returns 0 for fewer than 2 points.
pub fn path_distance(coordinates: &[Coordinate]) -> f64 {
    coordinates
        .windows(2)
        .map(|w| haversine_distance(w[0].lat, w[0].lon, w[1].lat, w[1].lon))
        .sum()
}
