//! # Migration Paths
//!
//! Geospatial path processing for animated wildlife migration tracks.
//!
//! This library turns raw, possibly unsorted movement samples into renderable
//! per-animal paths:
//! - Grouping samples into tracks keyed by (species, animal)
//! - Time-window filtering as a percentage of each track's elapsed duration
//! - Great-circle (haversine) distances and cumulative path distance
//! - Fractional-progress interpolation along a polyline for animation
//! - Ramer-Douglas-Peucker polyline simplification before rendering
//! - Bounding-box and map-view computation for centering on species data
//!
//! ## Features
//!
//! - **`parallel`** - Enable parallel path processing with rayon
//!
//! ## Quick Start
//!
//! ```rust
//! use migration_paths::{process_paths, MovementSample, TimeWindow};
//!
//! let samples = vec![
//!     MovementSample::new("s1", "arctic-tern", "arctic-tern-1",
//!         "2024-03-01T00:00:00Z", 71.0, -8.0),
//!     MovementSample::new("s2", "arctic-tern", "arctic-tern-1",
//!         "2024-03-15T00:00:00Z", 60.0, -3.0),
//!     MovementSample::new("s3", "arctic-tern", "arctic-tern-1",
//!         "2024-04-01T00:00:00Z", 45.0, -10.0),
//! ];
//!
//! let paths = process_paths(&samples, &TimeWindow::full()).unwrap();
//! assert_eq!(paths.len(), 1);
//! assert_eq!(paths[0].coordinates.len(), 3);
//! assert!(paths[0].total_distance_km > 0.0);
//! ```

use chrono::DateTime;
use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{PathError, Result};

// Geographic utilities (haversine, cumulative path distance)
pub mod geo_utils;
pub use geo_utils::{haversine_distance, path_distance};

// Track grouping, sorting and time-window filtering
pub mod processor;
#[cfg(feature = "parallel")]
pub use processor::process_paths_parallel;
pub use processor::{process_paths, process_paths_at};

// Position interpolation along a path (animation playhead)
pub mod interpolate;
pub use interpolate::interpolate_position;

// Ramer-Douglas-Peucker polyline simplification
pub mod simplify;
pub use simplify::simplify_path;

// Bounding boxes and map-view heuristics
pub mod viewport;
pub use viewport::{compute_bounds, optimal_view, species_view, GeoBounds, MapView};

// Aggregate statistics over a sample set
pub mod stats;
pub use stats::{compute_stats, MigrationStats};

// LRU memoization of processed path sets
pub mod cache;
pub use cache::PathCache;

// Algorithm toolbox - flat access to all algorithms
pub mod algorithms;

// ============================================================================
// Core Types
// ============================================================================

/// A geographic coordinate stored as (longitude, latitude) degrees.
///
/// Serializes as a `[lon, lat]` two-element array, the shape map and chart
/// layers consume.
///
/// # Example
/// ```
/// use migration_paths::Coordinate;
/// let point = Coordinate::new(-0.1278, 51.5074); // London
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    /// Create a new coordinate from longitude and latitude.
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Check that the coordinate is finite and within geographic range.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && self.lat >= -90.0
            && self.lat <= 90.0
            && self.lon >= -180.0
            && self.lon <= 180.0
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from(pair: [f64; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(c: Coordinate) -> Self {
        [c.lon, c.lat]
    }
}

/// A single raw movement sample for one tracked animal.
///
/// Samples arrive in arbitrary order; the timestamp is an ISO-8601 string as
/// delivered by tracking feeds. Optional telemetry fields are passed through
/// untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementSample {
    pub id: String,
    pub species_id: String,
    pub animal_id: String,
    /// ISO-8601 timestamp, e.g. `2024-03-01T00:00:00Z`
    pub timestamp: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
}

impl MovementSample {
    /// Create a sample with the required fields; telemetry defaults to `None`.
    pub fn new(
        id: &str,
        species_id: &str,
        animal_id: &str,
        timestamp: &str,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            id: id.to_string(),
            species_id: species_id.to_string(),
            animal_id: animal_id.to_string(),
            timestamp: timestamp.to_string(),
            latitude,
            longitude,
            altitude: None,
            speed: None,
            heading: None,
            accuracy: None,
        }
    }

    /// The sample position as a (lon, lat) coordinate.
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.longitude, self.latitude)
    }

    /// The composite key identifying this sample's track.
    pub fn track_key(&self) -> TrackKey {
        TrackKey {
            species_id: self.species_id.clone(),
            animal_id: self.animal_id.clone(),
        }
    }

    /// Parse the timestamp into epoch milliseconds.
    ///
    /// Returns [`PathError::MalformedTimestamp`] for anything RFC 3339 cannot
    /// parse, so garbage never reaches the windowing arithmetic.
    pub fn timestamp_millis(&self) -> Result<i64> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .map(|dt| dt.timestamp_millis())
            .map_err(|_| PathError::MalformedTimestamp {
                sample_id: self.id.clone(),
                timestamp: self.timestamp.clone(),
            })
    }

    /// Check that the sample's coordinates are geographically valid.
    pub fn is_valid(&self) -> bool {
        self.coordinate().is_valid()
    }
}

/// Composite key identifying one animal's track.
///
/// A structural key rather than a joined string, so IDs containing any
/// separator character cannot collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackKey {
    pub species_id: String,
    pub animal_id: String,
}

impl TrackKey {
    pub fn new(species_id: &str, animal_id: &str) -> Self {
        Self {
            species_id: species_id.to_string(),
            animal_id: animal_id.to_string(),
        }
    }
}

/// A processed, windowed, renderable track.
///
/// Coordinates and timestamps are parallel vectors ordered by ascending
/// timestamp. An empty path means "nothing to draw", not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationPath {
    pub species_id: String,
    pub animal_id: String,
    pub coordinates: Vec<Coordinate>,
    /// ISO-8601 timestamps parallel to `coordinates`
    pub timestamps: Vec<String>,
    /// Sum of consecutive great-circle segment lengths in kilometers
    #[serde(rename = "totalDistance")]
    pub total_distance_km: f64,
    /// Elapsed milliseconds between first and last point, 0 for fewer than 2
    #[serde(rename = "duration")]
    pub duration_ms: i64,
}

impl MigrationPath {
    /// Key of the track this path was derived from.
    pub fn track_key(&self) -> TrackKey {
        TrackKey {
            species_id: self.species_id.clone(),
            animal_id: self.animal_id.clone(),
        }
    }

    /// True when the window filtered every sample out.
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }
}

/// A percentage window into a track's elapsed duration.
///
/// `start` and `end` are percentages in [0, 100] of the track's own total
/// duration, not calendar time. An inverted window (`start > end`) selects
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: f64,
    pub end: f64,
}

impl TimeWindow {
    /// Create a window without validation.
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// The full track: 0% to 100%.
    pub fn full() -> Self {
        Self {
            start: 0.0,
            end: 100.0,
        }
    }

    /// Create a window, rejecting out-of-range or inverted bounds.
    pub fn validated(start: f64, end: f64) -> Result<Self> {
        let in_range = |v: f64| v.is_finite() && (0.0..=100.0).contains(&v);
        if !in_range(start) || !in_range(end) || start > end {
            return Err(PathError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// True when the window selects nothing because `start > end`.
    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self::full()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_validation() {
        assert!(Coordinate::new(-0.1278, 51.5074).is_valid());
        assert!(!Coordinate::new(0.0, 91.0).is_valid());
        assert!(!Coordinate::new(181.0, 0.0).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_coordinate_serializes_as_pair() {
        let c = Coordinate::new(10.0, -5.0);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "[10.0,-5.0]");

        let back: Coordinate = serde_json::from_str("[10.0,-5.0]").unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn test_sample_deserializes_from_camel_case() {
        let json = r#"{
            "id": "s1",
            "speciesId": "gray-whale",
            "animalId": "gray-whale-1",
            "timestamp": "2024-03-01T00:00:00Z",
            "latitude": 60.0,
            "longitude": -165.0,
            "speed": 7.5
        }"#;
        let sample: MovementSample = serde_json::from_str(json).unwrap();
        assert_eq!(sample.species_id, "gray-whale");
        assert_eq!(sample.speed, Some(7.5));
        assert_eq!(sample.altitude, None);
        assert!(sample.is_valid());
    }

    #[test]
    fn test_timestamp_parsing() {
        let sample = MovementSample::new("s1", "sp", "a", "2024-03-01T00:00:00Z", 0.0, 0.0);
        assert!(sample.timestamp_millis().is_ok());

        let bad = MovementSample::new("s2", "sp", "a", "not-a-date", 0.0, 0.0);
        assert!(matches!(
            bad.timestamp_millis(),
            Err(PathError::MalformedTimestamp { .. })
        ));
    }

    #[test]
    fn test_track_key_equality() {
        let a = TrackKey::new("arctic-tern", "arctic-tern-1");
        let b = TrackKey::new("arctic-tern", "arctic-tern-1");
        let c = TrackKey::new("arctic", "tern-arctic-tern-1");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_time_window_validated() {
        assert!(TimeWindow::validated(0.0, 100.0).is_ok());
        assert!(TimeWindow::validated(25.0, 75.0).is_ok());
        assert!(TimeWindow::validated(75.0, 25.0).is_err());
        assert!(TimeWindow::validated(-1.0, 50.0).is_err());
        assert!(TimeWindow::validated(0.0, 101.0).is_err());
    }

    #[test]
    fn test_path_serializes_with_wire_names() {
        let path = MigrationPath {
            species_id: "caribou".to_string(),
            animal_id: "caribou-1".to_string(),
            coordinates: vec![Coordinate::new(-133.0, 68.0)],
            timestamps: vec!["2024-03-01T00:00:00Z".to_string()],
            total_distance_km: 0.0,
            duration_ms: 0,
        };
        let json = serde_json::to_string(&path).unwrap();
        assert!(json.contains("\"totalDistance\":0.0"));
        assert!(json.contains("\"duration\":0"));
        assert!(json.contains("\"speciesId\":\"caribou\""));
    }
}
