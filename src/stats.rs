//! Aggregate statistics over a sample set.
//!
//! Dashboard-level numbers derived from the raw samples: record count,
//! distinct track count, total great-circle distance travelled and mean
//! reported speed. These are aggregates over whatever the caller passes in,
//! so the function never fails; samples with unparseable timestamps simply
//! keep their input order within a track.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geo_utils::haversine_distance;
use crate::{MovementSample, TrackKey};

/// Summary statistics for a set of movement samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationStats {
    /// Number of samples
    pub total_records: usize,
    /// Sum of per-track consecutive great-circle distances in kilometers
    pub total_distance_km: f64,
    /// Number of distinct (species, animal) tracks
    pub active_tracks: usize,
    /// Mean of the `speed` fields that are present, 0 when none are
    pub average_speed: f64,
}

/// Compute summary statistics over a sample set.
///
/// Distance is accumulated per track over timestamp-sorted consecutive
/// samples, so interleaved input does not create phantom cross-animal legs.
///
/// # Example
/// ```
/// use migration_paths::{compute_stats, MovementSample};
///
/// let samples = vec![
///     MovementSample::new("s1", "gray-whale", "gray-whale-1",
///         "2024-01-01T00:00:00Z", 60.0, -165.0),
///     MovementSample::new("s2", "gray-whale", "gray-whale-1",
///         "2024-02-01T00:00:00Z", 55.0, -160.0),
/// ];
///
/// let stats = compute_stats(&samples);
/// assert_eq!(stats.total_records, 2);
/// assert_eq!(stats.active_tracks, 1);
/// assert!(stats.total_distance_km > 0.0);
/// ```
pub fn compute_stats(samples: &[MovementSample]) -> MigrationStats {
    let mut tracks: BTreeMap<TrackKey, Vec<&MovementSample>> = BTreeMap::new();
    for sample in samples {
        tracks.entry(sample.track_key()).or_default().push(sample);
    }

    let mut total_distance_km = 0.0;
    for group in tracks.values_mut() {
        // Unparseable timestamps sort to the front but keep input order
        group.sort_by_key(|s| s.timestamp_millis().unwrap_or(i64::MIN));

        total_distance_km += group
            .windows(2)
            .map(|w| haversine_distance(w[0].latitude, w[0].longitude, w[1].latitude, w[1].longitude))
            .sum::<f64>();
    }

    let speeds: Vec<f64> = samples.iter().filter_map(|s| s.speed).collect();
    let average_speed = if speeds.is_empty() {
        0.0
    } else {
        speeds.iter().sum::<f64>() / speeds.len() as f64
    };

    MigrationStats {
        total_records: samples.len(),
        total_distance_km,
        active_tracks: tracks.len(),
        average_speed,
    }
}
