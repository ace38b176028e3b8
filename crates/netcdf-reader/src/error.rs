//! Error types for NetCDF dataset access.

use footprint::FootprintError;
use thiserror::Error;

/// Result type for NetCDF reader operations.
pub type NetCdfResult<T> = Result<T, NetCdfError>;

/// Error types for NetCDF dataset access.
#[derive(Error, Debug)]
pub enum NetCdfError {
    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The dataset could not be opened (missing file, unreachable server)
    #[error("failed to open dataset {location}: {message}")]
    OpenFailed { location: String, message: String },

    /// Missing required variable or attribute
    #[error("Missing required data: {0}")]
    MissingData(String),

    /// Invalid data format
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    /// Coordinates were read but do not form a usable grid
    #[error("invalid coordinate grid: {0}")]
    Grid(#[from] FootprintError),
}

impl NetCdfError {
    pub fn open_failed(location: impl Into<String>, message: impl ToString) -> Self {
        Self::OpenFailed {
            location: location.into(),
            message: message.to_string(),
        }
    }
}
