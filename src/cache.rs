//! LRU memoization of processed path sets.
//!
//! Animation loops recompute paths on every frame even though the window
//! often repeats (scrub back and forth, pause, loop). [`PathCache`] memoizes
//! [`process_paths`] results per exact window/playhead value with
//! least-recently-used eviction. The caller owns invalidation: call
//! [`PathCache::invalidate_all`] whenever the sample set changes.
//!
//! For typical capacities (a few hundred windows) the linear eviction scan
//! is cheaper than maintaining a linked list.

use std::collections::HashMap;

use crate::processor::{process_paths, process_paths_at};
use crate::{MigrationPath, MovementSample, Result, TimeWindow};

/// Cache key built from the exact f64 bit patterns of window and playhead,
/// so two windows hit the same entry only when they are bit-identical.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct WindowKey {
    start: u64,
    end: u64,
    playhead: Option<u64>,
}

impl WindowKey {
    fn new(window: &TimeWindow, playhead: Option<f64>) -> Self {
        Self {
            start: window.start.to_bits(),
            end: window.end.to_bits(),
            playhead: playhead.map(f64::to_bits),
        }
    }
}

#[derive(Debug)]
struct CacheEntry {
    paths: Vec<MigrationPath>,
    last_access: u64,
}

/// An LRU cache of processed path sets keyed by window and playhead.
#[derive(Debug)]
pub struct PathCache {
    capacity: usize,
    entries: HashMap<WindowKey, CacheEntry>,
    access_counter: u64,
}

impl PathCache {
    /// Create a cache holding up to `capacity` processed window results.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
            access_counter: 0,
        }
    }

    /// Cached paths for the window, processing the samples on a miss.
    ///
    /// The cache does not watch the sample slice; call
    /// [`invalidate_all`](Self::invalidate_all) when the samples change.
    pub fn get_or_compute(
        &mut self,
        samples: &[MovementSample],
        window: &TimeWindow,
        playhead: Option<f64>,
    ) -> Result<Vec<MigrationPath>> {
        let key = WindowKey::new(window, playhead);

        if let Some(entry) = self.entries.get_mut(&key) {
            self.access_counter += 1;
            entry.last_access = self.access_counter;
            return Ok(entry.paths.clone());
        }

        let paths = match playhead {
            Some(p) => process_paths_at(samples, window, p)?,
            None => process_paths(samples, window)?,
        };

        if self.entries.len() >= self.capacity {
            self.evict_oldest();
        }
        self.access_counter += 1;
        self.entries.insert(
            key,
            CacheEntry {
                paths: paths.clone(),
                last_access: self.access_counter,
            },
        );

        Ok(paths)
    }

    /// Drop every cached result. Required after the sample set changes.
    pub fn invalidate_all(&mut self) {
        self.entries.clear();
        self.access_counter = 0;
    }

    /// Number of cached window results.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn evict_oldest(&mut self) {
        let oldest_key = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_access)
            .map(|(k, _)| k.clone());

        if let Some(key) = oldest_key {
            self.entries.remove(&key);
        }
    }
}

impl Default for PathCache {
    fn default() -> Self {
        Self::new(128)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<MovementSample> {
        vec![
            MovementSample::new("s1", "sp", "a", "2024-03-01T00:00:00.000Z", 0.0, 0.0),
            MovementSample::new("s2", "sp", "a", "2024-03-01T00:00:00.050Z", 1.0, 1.0),
            MovementSample::new("s3", "sp", "a", "2024-03-01T00:00:00.100Z", 2.0, 2.0),
        ]
    }

    #[test]
    fn test_hit_returns_same_result() {
        let mut cache = PathCache::new(8);
        let samples = samples();
        let window = TimeWindow::full();

        let first = cache.get_or_compute(&samples, &window, None).unwrap();
        assert_eq!(cache.len(), 1);

        let second = cache.get_or_compute(&samples, &window, None).unwrap();
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_playhead_values_are_distinct_entries() {
        let mut cache = PathCache::new(8);
        let samples = samples();
        let window = TimeWindow::full();

        let full = cache.get_or_compute(&samples, &window, None).unwrap();
        let half = cache.get_or_compute(&samples, &window, Some(50.0)).unwrap();
        assert_eq!(cache.len(), 2);
        assert_eq!(full[0].coordinates.len(), 3);
        assert_eq!(half[0].coordinates.len(), 2);
    }

    #[test]
    fn test_eviction_at_capacity() {
        let mut cache = PathCache::new(2);
        let samples = samples();

        cache
            .get_or_compute(&samples, &TimeWindow::new(0.0, 100.0), None)
            .unwrap();
        cache
            .get_or_compute(&samples, &TimeWindow::new(0.0, 50.0), None)
            .unwrap();
        cache
            .get_or_compute(&samples, &TimeWindow::new(50.0, 100.0), None)
            .unwrap();

        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_invalidate_all() {
        let mut cache = PathCache::new(8);
        let samples = samples();

        cache
            .get_or_compute(&samples, &TimeWindow::full(), None)
            .unwrap();
        cache.invalidate_all();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_errors_are_not_cached() {
        let mut cache = PathCache::new(8);
        let bad = vec![MovementSample::new("s1", "sp", "a", "garbage", 0.0, 0.0)];

        assert!(cache.get_or_compute(&bad, &TimeWindow::full(), None).is_err());
        assert!(cache.is_empty());
    }
}
