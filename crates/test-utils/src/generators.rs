//! Synthetic coordinate grids for footprint tests.
//!
//! Every generator returns a [`SyntheticGrid`]: row-major latitude and
//! longitude arrays plus their shape. The arrays are plain vectors so this
//! crate stays independent of the crates it helps test.

/// Row-major latitude/longitude arrays of one shape.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticGrid {
    pub rows: usize,
    pub cols: usize,
    pub latitudes: Vec<f64>,
    pub longitudes: Vec<f64>,
}

impl SyntheticGrid {
    /// (latitude, longitude) of cell (row, col).
    pub fn point(&self, row: usize, col: usize) -> (f64, f64) {
        let i = row * self.cols + col;
        (self.latitudes[i], self.longitudes[i])
    }

    /// Latitudes as nested rows.
    pub fn latitude_rows(&self) -> Vec<Vec<f64>> {
        to_rows(&self.latitudes, self.cols)
    }

    /// Longitudes as nested rows.
    pub fn longitude_rows(&self) -> Vec<Vec<f64>> {
        to_rows(&self.longitudes, self.cols)
    }
}

/// Creates a grid whose coordinates are its own indices.
///
/// `latitude = row`, `longitude = col`, which makes it trivial to check which
/// cell a boundary point came from.
///
/// # Example
///
/// ```
/// use test_utils::create_index_grid;
///
/// let grid = create_index_grid(3, 4);
/// assert_eq!(grid.latitudes.len(), 12);
/// assert_eq!(grid.point(2, 3), (2.0, 3.0));
/// ```
pub fn create_index_grid(rows: usize, cols: usize) -> SyntheticGrid {
    let mut latitudes = Vec::with_capacity(rows * cols);
    let mut longitudes = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            latitudes.push(row as f64);
            longitudes.push(col as f64);
        }
    }
    SyntheticGrid {
        rows,
        cols,
        latitudes,
        longitudes,
    }
}

/// Creates a regular lat/lon grid starting at (`lat0`, `lon0`).
///
/// Row `r` sits at `lat0 + r * dlat`, column `c` at `lon0 + c * dlon`. A
/// negative `dlat` produces the north-to-south ordering common in model files.
pub fn create_regular_grid(
    rows: usize,
    cols: usize,
    lat0: f64,
    lon0: f64,
    dlat: f64,
    dlon: f64,
) -> SyntheticGrid {
    let mut latitudes = Vec::with_capacity(rows * cols);
    let mut longitudes = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            latitudes.push(lat0 + row as f64 * dlat);
            longitudes.push(lon0 + col as f64 * dlon);
        }
    }
    SyntheticGrid {
        rows,
        cols,
        latitudes,
        longitudes,
    }
}

/// Creates a curvilinear grid rotated around its center.
///
/// Mimics coastal ocean model grids (e.g. a rotated polar-stereographic
/// domain) whose rows do not follow parallels. `spacing` is in degrees and
/// `rotation_deg` turns the grid counter-clockwise.
pub fn create_rotated_grid(
    rows: usize,
    cols: usize,
    center_lat: f64,
    center_lon: f64,
    spacing: f64,
    rotation_deg: f64,
) -> SyntheticGrid {
    let (sin, cos) = rotation_deg.to_radians().sin_cos();
    let half_rows = (rows as f64 - 1.0) / 2.0;
    let half_cols = (cols as f64 - 1.0) / 2.0;

    let mut latitudes = Vec::with_capacity(rows * cols);
    let mut longitudes = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            let y = (row as f64 - half_rows) * spacing;
            let x = (col as f64 - half_cols) * spacing;
            latitudes.push(center_lat + x * sin + y * cos);
            longitudes.push(center_lon + x * cos - y * sin);
        }
    }
    SyntheticGrid {
        rows,
        cols,
        latitudes,
        longitudes,
    }
}

/// Replaces the listed cells with NaN in both arrays.
pub fn with_nan_cells(mut grid: SyntheticGrid, cells: &[(usize, usize)]) -> SyntheticGrid {
    for &(row, col) in cells {
        let i = row * grid.cols + col;
        if i < grid.latitudes.len() {
            grid.latitudes[i] = f64::NAN;
            grid.longitudes[i] = f64::NAN;
        }
    }
    grid
}

fn to_rows(values: &[f64], cols: usize) -> Vec<Vec<f64>> {
    if cols == 0 {
        return Vec::new();
    }
    values.chunks(cols).map(<[f64]>::to_vec).collect()
}
