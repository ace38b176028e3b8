//! Access to a single NetCDF dataset (local file, OPeNDAP URL or bytes).

use footprint::CoordinateGrid;
use netcdf::AttributeValue;
use tracing::{debug, instrument};

use crate::coords::{assemble_grid, unpack, RawCoordinate};
use crate::error::{NetCdfError, NetCdfResult};
use crate::metadata::{DatasetMetadata, VariableInfo};
use crate::silence_hdf5_errors;
use crate::temp::ScratchFile;

/// An open NetCDF dataset.
///
/// Not `Sync`: libnetcdf handles must stay on the thread that reads them.
pub struct NetCdfDataset {
    file: netcdf::File,
    location: String,
    // Declared after `file` so the handle closes before the scratch file goes.
    _scratch: Option<ScratchFile>,
}

impl std::fmt::Debug for NetCdfDataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetCdfDataset")
            .field("location", &self.location)
            .finish()
    }
}

impl NetCdfDataset {
    /// Open a local path or an OPeNDAP URL.
    #[instrument(level = "debug")]
    pub fn open(location: &str) -> NetCdfResult<Self> {
        silence_hdf5_errors();

        let file = netcdf::open(location).map_err(|e| NetCdfError::open_failed(location, e))?;
        debug!(location, "Opened dataset");

        Ok(Self {
            file,
            location: location.to_string(),
            _scratch: None,
        })
    }

    /// Open a dataset from an in-memory payload, e.g. a downloaded file.
    ///
    /// `label` is only used in logs and errors.
    #[instrument(level = "debug", skip(data), fields(bytes = data.len()))]
    pub fn open_bytes(data: &[u8], label: &str) -> NetCdfResult<Self> {
        silence_hdf5_errors();

        let scratch = ScratchFile::write(data)?;
        let file =
            netcdf::open(scratch.path()).map_err(|e| NetCdfError::open_failed(label, e))?;

        Ok(Self {
            file,
            location: label.to_string(),
            _scratch: Some(scratch),
        })
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Read one coordinate variable, unpacked to f64 with fill values as NaN.
    pub fn read_coordinate(&self, name: &str) -> NetCdfResult<RawCoordinate> {
        let var = self.file.variable(name).ok_or_else(|| {
            NetCdfError::MissingData(format!("variable '{}' in {}", name, self.location))
        })?;

        let dims: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
        let mut values: Vec<f64> = var.get_values(..).map_err(|e| {
            NetCdfError::InvalidFormat(format!("failed to read '{}': {}", name, e))
        })?;

        unpack(
            &mut values,
            var_f64_attr(&var, "scale_factor"),
            var_f64_attr(&var, "add_offset"),
            var_f64_attr(&var, "_FillValue"),
        );

        Ok(RawCoordinate::new(name, dims, values))
    }

    /// Read the latitude and longitude variables and build the grid.
    #[instrument(level = "debug", skip(self), fields(location = %self.location))]
    pub fn coordinate_grid(&self, lat_name: &str, lon_name: &str) -> NetCdfResult<CoordinateGrid> {
        let latitude = self.read_coordinate(lat_name)?;
        let longitude = self.read_coordinate(lon_name)?;
        let grid = assemble_grid(latitude, longitude)?;

        debug!(rows = grid.rows(), cols = grid.cols(), "Read coordinate grid");
        Ok(grid)
    }

    /// Global string attribute, if present.
    pub fn global_attribute(&self, name: &str) -> Option<String> {
        if !self.file.attributes().any(|attr| attr.name() == name) {
            return None;
        }
        let value = self.file.attribute(name)?.value().ok()?;
        attribute_string(value)
    }

    /// `title` and `summary` joined by a blank line.
    pub fn description(&self) -> Option<String> {
        DatasetMetadata {
            title: self.global_attribute("title"),
            summary: self.global_attribute("summary"),
            variables: Vec::new(),
        }
        .description()
    }

    /// Every variable with its descriptive attributes, in file order.
    pub fn variables(&self) -> Vec<VariableInfo> {
        self.file
            .variables()
            .map(|var| VariableInfo {
                name: var.name(),
                dimensions: var.dimensions().iter().map(|d| d.name()).collect(),
                long_name: var_string_attr(&var, "long_name"),
                standard_name: var_string_attr(&var, "standard_name"),
                units: var_string_attr(&var, "units"),
            })
            .collect()
    }

    /// Title, summary and variables in one pass.
    pub fn metadata(&self) -> DatasetMetadata {
        DatasetMetadata {
            title: self.global_attribute("title"),
            summary: self.global_attribute("summary"),
            variables: self.variables(),
        }
    }
}

// =============================================================================
// Attribute helpers
// =============================================================================

/// Check before reading; a failed lookup makes HDF5 print a diagnostic.
fn has_attr(var: &netcdf::Variable, name: &str) -> bool {
    var.attributes().any(|attr| attr.name() == name)
}

fn var_f64_attr(var: &netcdf::Variable, name: &str) -> Option<f64> {
    if !has_attr(var, name) {
        return None;
    }
    let value = var.attribute_value(name)?.ok()?;
    f64::try_from(value).ok()
}

fn var_string_attr(var: &netcdf::Variable, name: &str) -> Option<String> {
    if !has_attr(var, name) {
        return None;
    }
    let value = var.attribute_value(name)?.ok()?;
    attribute_string(value)
}

fn attribute_string(value: AttributeValue) -> Option<String> {
    match value {
        AttributeValue::Str(s) => Some(s),
        AttributeValue::Strs(parts) => Some(parts.join(",")),
        _ => None,
    }
}
