//! NetCDF access for footprint extraction.
//!
//! Reads latitude/longitude variables into a [`footprint::CoordinateGrid`]
//! and collects the descriptive metadata that goes into catalog records.
//! Datasets can be opened from a local path, an OPeNDAP URL, or raw bytes.
//!
//! ```no_run
//! use netcdf_reader::NetCdfDataset;
//!
//! let dataset = NetCdfDataset::open("testdata/wave_subset.nc")?;
//! let grid = dataset.coordinate_grid("latitude", "longitude")?;
//! println!("{} x {}", grid.rows(), grid.cols());
//! # Ok::<(), netcdf_reader::NetCdfError>(())
//! ```

use std::sync::Once;

pub mod coords;
pub mod dataset;
pub mod error;
pub mod metadata;
pub mod temp;

pub use coords::{assemble_grid, unpack, RawCoordinate};
pub use dataset::NetCdfDataset;
pub use error::{NetCdfError, NetCdfResult};
pub use metadata::{DatasetMetadata, VariableInfo};

/// Silence HDF5's automatic error printing to stderr.
///
/// HDF5 reports every failed attribute lookup on stderr even when the caller
/// handles it. Call once early in `main()`; later calls are no-ops.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: null handler and client data disable automatic printing.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}
