//! Test helpers shared by the footprint workspace crates.
//!
//! [`generators`] builds synthetic coordinate grids, [`fixtures`] holds model
//! domains and product YAML, and [`paths`] locates optional NetCDF samples.
//! Pulled in as a dev-dependency only.

pub mod fixtures;
pub mod generators;
pub mod paths;

pub use fixtures::*;
pub use generators::*;
pub use paths::*;

/// Resolve a NetCDF sample with [`find_test_file`], or return from the
/// calling test when the sample is not available.
///
/// ```ignore
/// #[test]
/// fn test_wave_subset_boundary() {
///     let path = test_utils::require_test_file!("wave_subset.nc");
///     let dataset = netcdf_reader::NetCdfDataset::open(path.to_str().unwrap()).unwrap();
/// }
/// ```
#[macro_export]
macro_rules! require_test_file {
    ($name:expr) => {{
        let name: &str = $name;
        match $crate::find_test_file(name) {
            Some(path) => path,
            None => {
                eprintln!("skipping: sample {} not found (set {})", name, $crate::SAMPLE_DIR_ENV);
                return;
            }
        }
    }};
}

/// Assert `|left - right| <= tolerance`, comparing as f64.
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $tolerance:expr) => {{
        let (left, right, tolerance) = ($left as f64, $right as f64, $tolerance as f64);
        assert!(
            (left - right).abs() <= tolerance,
            "values differ by more than {}: {} vs {}",
            tolerance,
            left,
            right
        );
    }};
}

/// [`assert_approx_eq!`] on both halves of a (latitude, longitude) pair.
#[macro_export]
macro_rules! assert_coords_approx_eq {
    (($lat:expr, $lon:expr), ($expected_lat:expr, $expected_lon:expr), $tolerance:expr) => {{
        $crate::assert_approx_eq!($lat, $expected_lat, $tolerance);
        $crate::assert_approx_eq!($lon, $expected_lon, $tolerance);
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_approx_eq_within_tolerance() {
        assert_approx_eq!(60.0004, 60.0, 0.001);
        assert_approx_eq!(-5.25_f32, -5.25, 0.0);
    }

    #[test]
    #[should_panic(expected = "values differ")]
    fn test_approx_eq_outside_tolerance() {
        assert_approx_eq!(60.1, 60.0, 0.001);
    }

    #[test]
    #[should_panic(expected = "values differ")]
    fn test_coords_compare_longitude() {
        assert_coords_approx_eq!((60.0, 5.5), (60.0, 5.0), 0.1);
    }
}
