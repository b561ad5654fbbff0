//! Bounding boxes and map-view heuristics.
//!
//! Computes the geographic extent of coordinate sets and derives a center
//! plus integer zoom level for framing them on a map. The zoom heuristic is
//! tuned for web-mercator tile maps: `14 - log2(max_span * 2)`, clamped to
//! [1, 18] and backed off by one level for padding.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{Coordinate, MovementSample};

/// Geographic extent in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl GeoBounds {
    /// Bounds of a coordinate set, or `None` for empty input.
    pub fn from_coordinates(coordinates: &[Coordinate]) -> Option<Self> {
        if coordinates.is_empty() {
            return None;
        }

        let mut north = f64::MIN;
        let mut south = f64::MAX;
        let mut east = f64::MIN;
        let mut west = f64::MAX;

        for c in coordinates {
            north = north.max(c.lat);
            south = south.min(c.lat);
            east = east.max(c.lon);
            west = west.min(c.lon);
        }

        Some(Self {
            north,
            south,
            east,
            west,
        })
    }

    /// Smallest bounds covering both `self` and `other`.
    pub fn merge(&self, other: &GeoBounds) -> GeoBounds {
        GeoBounds {
            north: self.north.max(other.north),
            south: self.south.min(other.south),
            east: self.east.max(other.east),
            west: self.west.min(other.west),
        }
    }

    /// Midpoint of the bounds.
    pub fn center(&self) -> Coordinate {
        Coordinate::new((self.east + self.west) / 2.0, (self.north + self.south) / 2.0)
    }

    /// Larger of the latitude and longitude spans, in degrees.
    pub fn max_span(&self) -> f64 {
        (self.north - self.south).max(self.east - self.west)
    }
}

/// A map center and integer zoom level for framing data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: u8,
}

impl MapView {
    /// The whole-world fallback view: mid-latitudes, zoom 2.
    pub fn world() -> Self {
        Self {
            center: Coordinate::new(0.0, 20.0),
            zoom: 2,
        }
    }
}

/// Bounds of a coordinate set, or `None` for empty input.
///
/// # Example
/// ```
/// use migration_paths::{compute_bounds, Coordinate};
///
/// let bounds = compute_bounds(&[
///     Coordinate::new(0.0, 0.0),
///     Coordinate::new(10.0, 5.0),
///     Coordinate::new(-5.0, -5.0),
/// ]).unwrap();
/// assert_eq!(bounds.north, 5.0);
/// assert_eq!(bounds.east, 10.0);
/// ```
pub fn compute_bounds(coordinates: &[Coordinate]) -> Option<GeoBounds> {
    GeoBounds::from_coordinates(coordinates)
}

/// Merge bounding boxes into one envelope and frame it.
///
/// The center is the envelope midpoint; zoom comes from
/// `14 - log2(max_span * 2)` clamped to [1, 18], then reduced by one level
/// for padding. An empty slice yields the world view.
pub fn optimal_view(boxes: &[GeoBounds]) -> MapView {
    let mut iter = boxes.iter();
    let Some(first) = iter.next() else {
        return MapView::world();
    };
    let envelope = iter.fold(*first, |acc, b| acc.merge(b));

    let span = envelope.max_span();
    // log2(0) is -inf for a single point; the clamp turns that into max zoom
    let zoom = (14.0 - (span * 2.0).log2()).floor().clamp(1.0, 18.0) as u8;

    MapView {
        center: envelope.center(),
        zoom: zoom.saturating_sub(1),
    }
}

/// Frame all samples belonging to the given species.
///
/// Falls back to the world view when no sample matches.
pub fn species_view(samples: &[MovementSample], species_ids: &[String]) -> MapView {
    let coordinates: Vec<Coordinate> = samples
        .iter()
        .filter(|s| species_ids.iter().any(|id| *id == s.species_id))
        .map(|s| s.coordinate())
        .collect();

    match compute_bounds(&coordinates) {
        Some(bounds) => optimal_view(&[bounds]),
        None => {
            debug!("no samples for species {:?}, using world view", species_ids);
            MapView::world()
        }
    }
}
