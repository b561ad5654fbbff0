//! Position interpolation along a path for animation playback.
//!
//! The path is treated as N-1 equal parametric segments: segment boundaries
//! sit at `progress = k / (N-1)` regardless of how long each segment is on
//! the ground. Longitude and latitude are interpolated linearly and
//! independently, which is a planar approximation, not a geodesic one. That
//! matches how markers have always animated; switching to geodesic
//! interpolation would subtly change playback on long segments.

use crate::Coordinate;

/// Position at fractional `progress` in [0, 1] along a polyline.
///
/// Returns `None` for an empty path and the point itself for a single-point
/// path. Progress at or beyond 1 clamps to the last point. Values outside
/// [0, 1] are not validated; callers clamp before calling.
///
/// # Example
/// ```
/// use migration_paths::{interpolate_position, Coordinate};
///
/// let path = vec![
///     Coordinate::new(0.0, 0.0),
///     Coordinate::new(10.0, 0.0),
///     Coordinate::new(10.0, 10.0),
/// ];
///
/// // Two segments, so progress 0.5 lands exactly on the middle vertex
/// let mid = interpolate_position(&path, 0.5).unwrap();
/// assert_eq!(mid, Coordinate::new(10.0, 0.0));
/// ```
pub fn interpolate_position(coordinates: &[Coordinate], progress: f64) -> Option<Coordinate> {
    match coordinates {
        [] => None,
        [only] => Some(*only),
        _ => {
            let segments = (coordinates.len() - 1) as f64;
            let scaled = progress * segments;
            let index = scaled.floor() as usize;

            if index >= coordinates.len() - 1 {
                return coordinates.last().copied();
            }

            let local = scaled - index as f64;
            let a = coordinates[index];
            let b = coordinates[index + 1];

            Some(Coordinate::new(
                a.lon + (b.lon - a.lon) * local,
                a.lat + (b.lat - a.lat) * local,
            ))
        }
    }
}
