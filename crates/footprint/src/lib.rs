//! Spatial footprints for gridded ocean, wave and atmosphere datasets.
//!
//! A dataset's 2-D latitude/longitude grid is reduced to a small polygon in
//! two steps:
//!
//! ```text
//! CoordinateGrid (R x C)
//!      │
//!      ▼
//! perimeter::walk          top ─► right ─► bottom ─► left, 2(R+C) points
//!      │
//!      ▼
//! decimate::decimate       one global step, ~target points
//!      │
//!      ▼
//! BoundaryPolygon          latitudes[] / longitudes[]
//! ```
//!
//! Everything here is synchronous and pure: the same grid and options always
//! produce the same polygon.
//!
//! # Example
//!
//! ```
//! use footprint::{extract_footprint, CoordinateGrid, FootprintOptions};
//!
//! let lats: Vec<f64> = (0..50).map(|i| 55.0 + i as f64 * 0.1).collect();
//! let lons: Vec<f64> = (0..80).map(|j| -5.0 + j as f64 * 0.1).collect();
//! let grid = CoordinateGrid::from_axes(&lats, &lons).unwrap();
//!
//! let polygon = extract_footprint(&grid, &FootprintOptions::default()).unwrap();
//! assert!(polygon.len() >= 8);
//! ```

pub mod decimate;
pub mod error;
pub mod grid;
pub mod perimeter;
pub mod polygon;

pub use decimate::{decimate, decimation_step};
pub use error::{FootprintError, Result};
pub use grid::{CoordinateGrid, GridShape};
pub use perimeter::{walk, BoundarySide, PerimeterWalk, Side};
pub use polygon::{BoundaryPolygon, Extent};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default number of boundary points kept per dataset.
pub const DEFAULT_TARGET_POINTS: usize = 100;

/// Options controlling footprint extraction for one dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FootprintOptions {
    /// Approximate number of points in the output polygon
    pub target_points: usize,
    /// Skip extraction entirely and emit an empty polygon
    pub drop_coordinates: bool,
}

impl Default for FootprintOptions {
    fn default() -> Self {
        Self {
            target_points: DEFAULT_TARGET_POINTS,
            drop_coordinates: false,
        }
    }
}

impl FootprintOptions {
    pub fn with_target_points(mut self, target_points: usize) -> Self {
        self.target_points = target_points;
        self
    }

    pub fn with_drop_coordinates(mut self, drop_coordinates: bool) -> Self {
        self.drop_coordinates = drop_coordinates;
        self
    }
}

/// Walk the perimeter of `grid` and decimate it to the configured target.
///
/// With `drop_coordinates` set the grid is not inspected and the polygon is
/// empty.
pub fn extract_footprint(grid: &CoordinateGrid, options: &FootprintOptions) -> Result<BoundaryPolygon> {
    if options.drop_coordinates {
        debug!("Boundary extraction disabled, emitting empty polygon");
        return Ok(BoundaryPolygon::empty());
    }

    let walk = perimeter::walk(grid);
    debug!(
        rows = grid.rows(),
        cols = grid.cols(),
        total = walk.total_points(),
        "Walked grid perimeter"
    );

    decimate::decimate(&walk, options.target_points)
}
