//! Conversion of raw coordinate variables into a [`CoordinateGrid`].
//!
//! Curvilinear products (ocean and wave models on rotated grids) store 2-D
//! latitude/longitude variables that are used as-is. Regular products store
//! 1-D axes, which are expanded into a rectilinear grid.

use footprint::{CoordinateGrid, GridShape};

use crate::error::{NetCdfError, NetCdfResult};

/// A coordinate variable as read from the file, already unpacked to f64.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCoordinate {
    /// Variable name in the dataset
    pub name: String,
    /// Dimension lengths, outermost first
    pub dims: Vec<usize>,
    /// Values in storage order
    pub values: Vec<f64>,
}

impl RawCoordinate {
    pub fn new(name: impl Into<String>, dims: Vec<usize>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            dims,
            values,
        }
    }

    fn rank(&self) -> usize {
        self.dims.len()
    }
}

/// Build a grid from the latitude and longitude variables.
///
/// Both 2-D: used directly, shapes must agree. Both 1-D: expanded with rows
/// along latitude and columns along longitude. Any other combination is an
/// `InvalidFormat` error naming both ranks.
pub fn assemble_grid(latitude: RawCoordinate, longitude: RawCoordinate) -> NetCdfResult<CoordinateGrid> {
    match (latitude.rank(), longitude.rank()) {
        (2, 2) => {
            let lat_shape = GridShape::new(latitude.dims[0], latitude.dims[1]);
            let lon_shape = GridShape::new(longitude.dims[0], longitude.dims[1]);
            Ok(CoordinateGrid::new(
                lat_shape,
                latitude.values,
                lon_shape,
                longitude.values,
            )?)
        }
        (1, 1) => Ok(CoordinateGrid::from_axes(&latitude.values, &longitude.values)?),
        (lat_rank, lon_rank) => Err(NetCdfError::InvalidFormat(format!(
            "coordinates '{}' ({}-D) and '{}' ({}-D) must both be 1-D or both be 2-D",
            latitude.name, lat_rank, longitude.name, lon_rank
        ))),
    }
}

/// Apply CF packing attributes: fill values become NaN, then
/// `value * scale_factor + add_offset`.
pub fn unpack(values: &mut [f64], scale_factor: Option<f64>, add_offset: Option<f64>, fill_value: Option<f64>) {
    let scale = scale_factor.unwrap_or(1.0);
    let offset = add_offset.unwrap_or(0.0);
    if scale == 1.0 && offset == 0.0 && fill_value.is_none() {
        return;
    }

    for v in values.iter_mut() {
        if fill_value == Some(*v) {
            *v = f64::NAN;
        } else {
            *v = *v * scale + offset;
        }
    }
}
