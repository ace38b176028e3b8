//! Error types for footprint extraction.

use thiserror::Error;

use crate::grid::GridShape;

/// Result type for footprint operations.
pub type Result<T> = std::result::Result<T, FootprintError>;

/// Errors raised by the perimeter walk and the point decimation.
///
/// All variants describe caller errors: the core never retries and never
/// degrades silently.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FootprintError {
    /// Latitude and longitude arrays do not describe the same grid.
    #[error("latitude grid {latitude} does not match longitude grid {longitude}")]
    ShapeMismatch {
        latitude: GridShape,
        longitude: GridShape,
    },

    /// A coordinate array holds a different number of values than its shape.
    #[error("{field} array has {actual} values, shape {shape} needs {expected}")]
    LengthMismatch {
        field: &'static str,
        shape: GridShape,
        expected: usize,
        actual: usize,
    },

    /// The grid is too small to have a perimeter, or no boundary points exist.
    #[error("degenerate grid: {0}")]
    DegenerateGrid(String),

    /// The decimation target cannot produce a polygon.
    #[error("invalid decimation target: {0}")]
    InvalidTarget(String),
}

impl FootprintError {
    /// Create a ShapeMismatch error.
    pub fn shape_mismatch(latitude: GridShape, longitude: GridShape) -> Self {
        Self::ShapeMismatch {
            latitude,
            longitude,
        }
    }

    /// Create a DegenerateGrid error.
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::DegenerateGrid(msg.into())
    }

    /// Create an InvalidTarget error.
    pub fn invalid_target(msg: impl Into<String>) -> Self {
        Self::InvalidTarget(msg.into())
    }
}
