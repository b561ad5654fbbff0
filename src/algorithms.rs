//! # Algorithm Toolbox
//!
//! Flat access to every algorithm in the crate, for callers that want a
//! single algorithm without the rest of the processing pipeline.
//!
//! ## Core Algorithms
//!
//! - **Path Processing**: grouping, sorting and time-window filtering
//! - **Haversine Distance**: great-circle distance between points
//! - **Path Interpolation**: fractional-progress position along a polyline
//! - **Ramer-Douglas-Peucker**: polyline simplification
//! - **Viewport Framing**: bounding boxes and map-view heuristics
//!
//! # Example
//!
//! ```rust
//! use migration_paths::algorithms::haversine_distance;
//!
//! // Distance between two stopover sites
//! let serengeti_to_mara = haversine_distance(-1.5, 34.8, -1.3, 35.0);
//! assert!(serengeti_to_mara < 35.0);
//! ```

// =============================================================================
// Core Types (re-exported from lib)
// =============================================================================

pub use crate::{Coordinate, MigrationPath, MovementSample, TimeWindow, TrackKey};

// =============================================================================
// Path Processing
// =============================================================================

#[cfg(feature = "parallel")]
pub use crate::processor::{process_paths_parallel, process_paths_parallel_at};
pub use crate::processor::{process_paths, process_paths_at};

// =============================================================================
// Geographic Utilities
// =============================================================================

pub use crate::geo_utils::{haversine_distance, path_distance};

// =============================================================================
// Interpolation and Simplification
// =============================================================================

pub use crate::interpolate::interpolate_position;
pub use crate::simplify::simplify_path;

// =============================================================================
// Viewport Framing
// =============================================================================

pub use crate::viewport::{compute_bounds, optimal_view, species_view, GeoBounds, MapView};

// =============================================================================
// Statistics
// =============================================================================

pub use crate::stats::{compute_stats, MigrationStats};
