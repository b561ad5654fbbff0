//! Ramer-Douglas-Peucker polyline simplification.
//!
//! Dense tracks are thinned before rendering: the point furthest from the
//! chord between a span's endpoints is kept if it deviates more than the
//! tolerance, and the span is split there; otherwise the whole span collapses
//! to its endpoints. Distances are planar, computed directly on (lon, lat)
//! degrees, so the tolerance is in degrees as well. An explicit work stack
//! replaces recursion so very long tracks cannot exhaust the call stack.

use crate::Coordinate;

/// Simplify a polyline with the Ramer-Douglas-Peucker algorithm.
///
/// `tolerance` is the maximum allowed perpendicular deviation in degrees.
/// Paths of 2 points or fewer are returned unchanged; the first and last
/// point are always preserved. The operation is deterministic and
/// idempotent.
///
/// # Example
/// ```
/// use migration_paths::{simplify_path, Coordinate};
///
/// // Three collinear points collapse to the endpoints
/// let path = vec![
///     Coordinate::new(0.0, 0.0),
///     Coordinate::new(1.0, 1.0),
///     Coordinate::new(2.0, 2.0),
/// ];
/// let simplified = simplify_path(&path, 0.01);
/// assert_eq!(simplified.len(), 2);
/// ```
pub fn simplify_path(coordinates: &[Coordinate], tolerance: f64) -> Vec<Coordinate> {
    if coordinates.len() <= 2 {
        return coordinates.to_vec();
    }

    let mut keep = vec![false; coordinates.len()];
    keep[0] = true;
    keep[coordinates.len() - 1] = true;

    let mut spans = vec![(0, coordinates.len() - 1)];
    while let Some((start, end)) = spans.pop() {
        if end <= start + 1 {
            continue;
        }

        let mut max_distance = 0.0;
        let mut max_index = start;
        for i in (start + 1)..end {
            let distance =
                perpendicular_distance(coordinates[i], coordinates[start], coordinates[end]);
            if distance > max_distance {
                max_distance = distance;
                max_index = i;
            }
        }

        if max_distance > tolerance {
            keep[max_index] = true;
            spans.push((start, max_index));
            spans.push((max_index, end));
        }
    }

    coordinates
        .iter()
        .zip(&keep)
        .filter(|(_, &kept)| kept)
        .map(|(&c, _)| c)
        .collect()
}

/// Planar perpendicular distance from `point` to the chord `start`-`end`.
///
/// A zero-length chord would make the denominator 0; in that case the
/// distance to the chord's start point is used instead, so identical-point
/// runs collapse cleanly and closed loops still keep their far vertices.
fn perpendicular_distance(point: Coordinate, start: Coordinate, end: Coordinate) -> f64 {
    let dx = end.lon - start.lon;
    let dy = end.lat - start.lat;
    let denominator = (dx * dx + dy * dy).sqrt();

    if denominator == 0.0 {
        let px = point.lon - start.lon;
        let py = point.lat - start.lat;
        return (px * px + py * py).sqrt();
    }

    let numerator =
        (dy * point.lon - dx * point.lat + end.lon * start.lat - end.lat * start.lon).abs();
    numerator / denominator
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_paths_unchanged() {
        let empty: Vec<Coordinate> = vec![];
        assert_eq!(simplify_path(&empty, 1.0), empty);

        let one = vec![Coordinate::new(1.0, 2.0)];
        assert_eq!(simplify_path(&one, 1.0), one);

        let two = vec![Coordinate::new(0.0, 0.0), Coordinate::new(5.0, 5.0)];
        assert_eq!(simplify_path(&two, 1.0), two);
    }

    #[test]
    fn test_collinear_points_collapse() {
        let path = vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(5.0, 5.0),
            Coordinate::new(10.0, 10.0),
        ];
        let simplified = simplify_path(&path, 0.1);
        assert_eq!(simplified, vec![path[0], path[2]]);
    }

    #[test]
    fn test_right_angle_is_retained() {
        let path = vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(10.0, 0.0),
            Coordinate::new(10.0, 10.0),
        ];
        let simplified = simplify_path(&path, 0.001);
        assert_eq!(simplified, path);
    }

    #[test]
    fn test_endpoints_always_preserved() {
        let path = vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(1.0, 0.2),
            Coordinate::new(2.0, -0.1),
            Coordinate::new(3.0, 0.15),
            Coordinate::new(4.0, 0.0),
        ];
        for tolerance in [0.0, 0.05, 0.5, 10.0] {
            let simplified = simplify_path(&path, tolerance);
            assert_eq!(simplified.first(), path.first());
            assert_eq!(simplified.last(), path.last());
        }
    }

    #[test]
    fn test_idempotent() {
        let path = vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(1.0, 0.2),
            Coordinate::new(2.0, -0.1),
            Coordinate::new(3.0, 0.15),
            Coordinate::new(4.0, 0.0),
        ];
        for tolerance in [0.0, 0.05, 0.12, 1.0] {
            let once = simplify_path(&path, tolerance);
            let twice = simplify_path(&once, tolerance);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_tolerance_controls_detail() {
        let path = vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(1.0, 0.5),
            Coordinate::new(2.0, 0.0),
            Coordinate::new(3.0, 0.5),
            Coordinate::new(4.0, 0.0),
        ];
        let coarse = simplify_path(&path, 1.0);
        let fine = simplify_path(&path, 0.01);
        assert!(coarse.len() < fine.len());
        assert_eq!(fine, path);
    }

    #[test]
    fn test_identical_points_collapse_without_nan() {
        let p = Coordinate::new(3.0, 3.0);
        let path = vec![p, p, p, p];
        let simplified = simplify_path(&path, 0.1);
        assert_eq!(simplified, vec![p, p]);
    }

    #[test]
    fn test_closed_loop_keeps_far_vertices() {
        // Start and end coincide; the loop's interior must survive
        let path = vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(10.0, 0.0),
            Coordinate::new(10.0, 10.0),
            Coordinate::new(0.0, 10.0),
            Coordinate::new(0.0, 0.0),
        ];
        let simplified = simplify_path(&path, 0.1);
        assert!(simplified.len() >= 4);
        assert!(simplified.contains(&Coordinate::new(10.0, 10.0)));
        for c in &simplified {
            assert!(c.lon.is_finite() && c.lat.is_finite());
        }
    }
}
