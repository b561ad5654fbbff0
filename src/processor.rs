//! Track grouping and time-window filtering.
//!
//! This module turns a flat slice of movement samples into per-animal
//! [`MigrationPath`]s:
//! 1. Group samples by [`TrackKey`] (species + animal)
//! 2. Sort each group by timestamp (stable, so ties keep input order)
//! 3. Map the percentage window onto the group's own elapsed duration
//! 4. Keep the samples inside the window and emit one path per group
//!
//! The window is a percentage of each track's total duration, not calendar
//! time: two animals tracked over different seasons both show their first
//! half for `start: 0, end: 50`.

use std::collections::BTreeMap;

use log::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::geo_utils::path_distance;
use crate::{MigrationPath, MovementSample, Result, TimeWindow, TrackKey};

/// A sample paired with its parsed epoch milliseconds.
struct TimedSample<'a> {
    millis: i64,
    sample: &'a MovementSample,
}

/// Process samples into one windowed path per track.
///
/// Groups with no input samples are never produced; a group emptied by the
/// window is still emitted with empty coordinate/timestamp vectors so callers
/// can keep stable track lists while scrubbing.
///
/// Returns [`crate::PathError::MalformedTimestamp`] if any sample carries a
/// timestamp RFC 3339 cannot parse.
///
/// # Example
/// ```
/// use migration_paths::{process_paths, MovementSample, TimeWindow};
///
/// let samples = vec![
///     MovementSample::new("s1", "caribou", "caribou-1",
///         "2024-05-01T00:00:00Z", 68.0, -133.0),
///     MovementSample::new("s2", "caribou", "caribou-1",
///         "2024-06-01T00:00:00Z", 65.0, -125.0),
/// ];
///
/// let paths = process_paths(&samples, &TimeWindow::full()).unwrap();
/// assert_eq!(paths[0].coordinates.len(), 2);
/// ```
pub fn process_paths(samples: &[MovementSample], window: &TimeWindow) -> Result<Vec<MigrationPath>> {
    process_windowed(samples, window, None)
}

/// Process samples like [`process_paths`], but cap the window at a playhead.
///
/// `playhead_percent` in [0, 100] restricts the upper bound to the visible
/// prefix of the windowed range, which is the "scrub to current time"
/// behavior animation loops need.
pub fn process_paths_at(
    samples: &[MovementSample],
    window: &TimeWindow,
    playhead_percent: f64,
) -> Result<Vec<MigrationPath>> {
    process_windowed(samples, window, Some(playhead_percent))
}

/// Parallel variant of [`process_paths`].
///
/// Same contract and output order; groups are processed with rayon.
#[cfg(feature = "parallel")]
pub fn process_paths_parallel(
    samples: &[MovementSample],
    window: &TimeWindow,
) -> Result<Vec<MigrationPath>> {
    process_windowed_parallel(samples, window, None)
}

/// Parallel variant of [`process_paths_at`].
#[cfg(feature = "parallel")]
pub fn process_paths_parallel_at(
    samples: &[MovementSample],
    window: &TimeWindow,
    playhead_percent: f64,
) -> Result<Vec<MigrationPath>> {
    process_windowed_parallel(samples, window, Some(playhead_percent))
}

fn process_windowed(
    samples: &[MovementSample],
    window: &TimeWindow,
    playhead: Option<f64>,
) -> Result<Vec<MigrationPath>> {
    if window.is_inverted() {
        debug!(
            "inverted time window [{}, {}] selects nothing",
            window.start, window.end
        );
    }

    let groups = group_by_track(samples)?;
    Ok(groups
        .into_iter()
        .map(|(key, group)| build_path(key, group, window, playhead))
        .collect())
}

#[cfg(feature = "parallel")]
fn process_windowed_parallel(
    samples: &[MovementSample],
    window: &TimeWindow,
    playhead: Option<f64>,
) -> Result<Vec<MigrationPath>> {
    if window.is_inverted() {
        debug!(
            "inverted time window [{}, {}] selects nothing",
            window.start, window.end
        );
    }

    let groups: Vec<(TrackKey, Vec<TimedSample<'_>>)> =
        group_by_track(samples)?.into_iter().collect();
    Ok(groups
        .into_par_iter()
        .map(|(key, group)| build_path(key, group, window, playhead))
        .collect())
}

/// Group samples by track key, parsing timestamps up front.
///
/// A BTreeMap keeps the output order deterministic (ascending key) no matter
/// how the input slice is arranged.
fn group_by_track(samples: &[MovementSample]) -> Result<BTreeMap<TrackKey, Vec<TimedSample<'_>>>> {
    let mut groups: BTreeMap<TrackKey, Vec<TimedSample>> = BTreeMap::new();
    for sample in samples {
        let millis = sample.timestamp_millis()?;
        groups
            .entry(sample.track_key())
            .or_default()
            .push(TimedSample { millis, sample });
    }
    Ok(groups)
}

/// Sort one group, map the percentage window onto its duration and emit the
/// filtered path. `group` is non-empty by construction.
fn build_path(
    key: TrackKey,
    mut group: Vec<TimedSample>,
    window: &TimeWindow,
    playhead: Option<f64>,
) -> MigrationPath {
    // Stable sort: duplicate timestamps keep input order
    group.sort_by_key(|t| t.millis);

    let first = group.first().map(|t| t.millis).unwrap_or(0);
    let last = group.last().map(|t| t.millis).unwrap_or(0);
    let total_duration = (last - first) as f64;

    let range_start = first as f64 + total_duration * window.start / 100.0;
    let range_end = first as f64 + total_duration * window.end / 100.0;
    let upper = match playhead {
        Some(p) => range_start + (range_end - range_start) * p / 100.0,
        None => range_end,
    };

    let selected: Vec<&TimedSample> = group
        .iter()
        .filter(|t| {
            let millis = t.millis as f64;
            millis >= range_start && millis <= upper
        })
        .collect();

    let coordinates: Vec<_> = selected.iter().map(|t| t.sample.coordinate()).collect();
    let timestamps: Vec<_> = selected.iter().map(|t| t.sample.timestamp.clone()).collect();
    let duration_ms = match (selected.first(), selected.last()) {
        (Some(first), Some(last)) if selected.len() > 1 => last.millis - first.millis,
        _ => 0,
    };
    let total_distance_km = path_distance(&coordinates);

    MigrationPath {
        species_id: key.species_id,
        animal_id: key.animal_id,
        coordinates,
        timestamps,
        total_distance_km,
        duration_ms,
    }
}
