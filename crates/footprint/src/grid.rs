//! Coordinate grids for curvilinear and rectilinear model output.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{FootprintError, Result};

/// Smallest extent along either axis that still has a perimeter.
pub const MIN_GRID_EXTENT: usize = 2;

/// Shape of a 2-D coordinate array as (rows, columns).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridShape {
    /// Number of rows (first array dimension)
    pub rows: usize,
    /// Number of columns (second array dimension)
    pub cols: usize,
}

impl GridShape {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Number of cells visited by a perimeter walk, corners counted twice.
    pub fn perimeter_len(&self) -> usize {
        2 * (self.rows + self.cols)
    }

    /// Row-major flat index of (row, col).
    #[inline]
    pub fn flat_index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }
}

impl fmt::Display for GridShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.rows, self.cols)
    }
}

/// Paired latitude/longitude arrays of identical shape, stored row-major.
///
/// `latitude(r, c)` and `longitude(r, c)` always describe the same physical
/// grid cell. Values are kept verbatim, including NaN fill values.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateGrid {
    shape: GridShape,
    latitudes: Vec<f64>,
    longitudes: Vec<f64>,
}

impl CoordinateGrid {
    /// Build a grid from two row-major arrays and their declared shapes.
    ///
    /// Fails with `ShapeMismatch` when the shapes differ, `LengthMismatch` when
    /// an array does not hold `rows * cols` values, and `DegenerateGrid` when
    /// either axis is shorter than [`MIN_GRID_EXTENT`].
    pub fn new(
        latitude_shape: GridShape,
        latitudes: Vec<f64>,
        longitude_shape: GridShape,
        longitudes: Vec<f64>,
    ) -> Result<Self> {
        if latitude_shape != longitude_shape {
            return Err(FootprintError::shape_mismatch(
                latitude_shape,
                longitude_shape,
            ));
        }
        let shape = latitude_shape;

        check_len("latitude", shape, latitudes.len())?;
        check_len("longitude", shape, longitudes.len())?;

        if shape.rows < MIN_GRID_EXTENT || shape.cols < MIN_GRID_EXTENT {
            return Err(FootprintError::degenerate(format!(
                "grid shape {} has no perimeter, need at least {}x{}",
                shape, MIN_GRID_EXTENT, MIN_GRID_EXTENT
            )));
        }

        Ok(Self {
            shape,
            latitudes,
            longitudes,
        })
    }

    /// Build a grid from nested rows, e.g. `[[0, 0, 0], [1, 1, 1]]`.
    ///
    /// Ragged rows are reported as a shape mismatch against the first row.
    pub fn from_rows(latitude_rows: &[Vec<f64>], longitude_rows: &[Vec<f64>]) -> Result<Self> {
        let (lat_shape, latitudes) = flatten_rows(latitude_rows)?;
        let (lon_shape, longitudes) = flatten_rows(longitude_rows)?;
        Self::new(lat_shape, latitudes, lon_shape, longitudes)
    }

    /// Expand 1-D latitude and longitude axes into a rectilinear grid.
    ///
    /// Rows follow the latitude axis and columns follow the longitude axis.
    pub fn from_axes(latitude_axis: &[f64], longitude_axis: &[f64]) -> Result<Self> {
        let shape = GridShape::new(latitude_axis.len(), longitude_axis.len());
        let mut latitudes = Vec::with_capacity(shape.len());
        let mut longitudes = Vec::with_capacity(shape.len());

        for &lat in latitude_axis {
            for &lon in longitude_axis {
                latitudes.push(lat);
                longitudes.push(lon);
            }
        }

        Self::new(shape, latitudes, shape, longitudes)
    }

    pub fn shape(&self) -> GridShape {
        self.shape
    }

    pub fn rows(&self) -> usize {
        self.shape.rows
    }

    pub fn cols(&self) -> usize {
        self.shape.cols
    }

    /// Latitude of cell (row, col). Panics when out of range.
    #[inline]
    pub fn latitude(&self, row: usize, col: usize) -> f64 {
        self.latitudes[self.shape.flat_index(row, col)]
    }

    /// Longitude of cell (row, col). Panics when out of range.
    #[inline]
    pub fn longitude(&self, row: usize, col: usize) -> f64 {
        self.longitudes[self.shape.flat_index(row, col)]
    }

    /// (latitude, longitude) of cell (row, col).
    #[inline]
    pub fn point(&self, row: usize, col: usize) -> (f64, f64) {
        (self.latitude(row, col), self.longitude(row, col))
    }

    /// Raw row-major latitude values.
    pub fn latitudes(&self) -> &[f64] {
        &self.latitudes
    }

    /// Raw row-major longitude values.
    pub fn longitudes(&self) -> &[f64] {
        &self.longitudes
    }
}

fn check_len(field: &'static str, shape: GridShape, actual: usize) -> Result<()> {
    if actual != shape.len() {
        return Err(FootprintError::LengthMismatch {
            field,
            shape,
            expected: shape.len(),
            actual,
        });
    }
    Ok(())
}

fn flatten_rows(rows: &[Vec<f64>]) -> Result<(GridShape, Vec<f64>)> {
    let cols = rows.first().map(|r| r.len()).unwrap_or(0);
    let shape = GridShape::new(rows.len(), cols);

    if let Some(ragged) = rows.iter().find(|r| r.len() != cols) {
        return Err(FootprintError::shape_mismatch(
            shape,
            GridShape::new(rows.len(), ragged.len()),
        ));
    }

    Ok((shape, rows.iter().flatten().copied().collect()))
}
