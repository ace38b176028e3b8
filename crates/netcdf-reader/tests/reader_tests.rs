//! Reader tests against small NetCDF files written on the fly, plus real
//! product samples when they are present in testdata/.

use std::path::Path;

use footprint::{extract_footprint, FootprintOptions, GridShape};
use netcdf_reader::{NetCdfDataset, NetCdfError};
use test_utils::{assert_approx_eq, create_rotated_grid, require_test_file, temp_test_dir};

/// Curvilinear file with 2-D coordinates, packed latitude and a data variable.
fn write_curvilinear(path: &Path, rows: usize, cols: usize) {
    let grid = create_rotated_grid(rows, cols, 64.0, 8.0, 0.02, 30.0);
    let mut file = netcdf::create(path).unwrap();
    file.add_dimension("time", 1).unwrap();
    file.add_dimension("rlat", rows).unwrap();
    file.add_dimension("rlon", cols).unwrap();
    file.add_attribute("title", "Synthetic wave hindcast").unwrap();
    file.add_attribute("summary", "Rotated grid used by reader tests")
        .unwrap();

    {
        let mut lat = file.add_variable::<f64>("latitude", &["rlat", "rlon"]).unwrap();
        lat.put_attribute("units", "degrees_north").unwrap();
        lat.put_attribute("standard_name", "latitude").unwrap();
        lat.put_values(&grid.latitudes, ..).unwrap();
    }
    {
        let mut lon = file.add_variable::<f64>("longitude", &["rlat", "rlon"]).unwrap();
        lon.put_attribute("units", "degrees_east").unwrap();
        lon.put_attribute("standard_name", "longitude").unwrap();
        lon.put_values(&grid.longitudes, ..).unwrap();
    }
    {
        let mut hs = file.add_variable::<f32>("hs", &["time", "rlat", "rlon"]).unwrap();
        hs.put_attribute("long_name", "Significant wave height").unwrap();
        hs.put_attribute("standard_name", "sea_surface_wave_significant_height")
            .unwrap();
        hs.put_attribute("units", "m").unwrap();
    }
}

/// Regular file with 1-D axes and packed short latitude values.
fn write_regular(path: &Path) {
    let mut file = netcdf::create(path).unwrap();
    file.add_dimension("latitude", 3).unwrap();
    file.add_dimension("longitude", 4).unwrap();

    {
        let mut lat = file.add_variable::<i16>("latitude", &["latitude"]).unwrap();
        lat.put_attribute("scale_factor", 0.01f64).unwrap();
        lat.put_attribute("add_offset", 60.0f64).unwrap();
        lat.put_values(&[0i16, 100, 200], ..).unwrap();
    }
    {
        let mut lon = file.add_variable::<f64>("longitude", &["longitude"]).unwrap();
        lon.put_values(&[0.0, 0.5, 1.0, 1.5], ..).unwrap();
    }
}

#[test]
fn test_curvilinear_grid_and_metadata() {
    let dir = temp_test_dir();
    let path = dir.path().join("curvilinear.nc");
    write_curvilinear(&path, 30, 20);

    let dataset = NetCdfDataset::open(path.to_str().unwrap()).unwrap();
    let grid = dataset.coordinate_grid("latitude", "longitude").unwrap();
    assert_eq!(grid.shape(), GridShape::new(30, 20));

    assert_eq!(
        dataset.description().as_deref(),
        Some("Synthetic wave hindcast\n\nRotated grid used by reader tests")
    );

    let variables = dataset.variables();
    let names: Vec<&str> = variables.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["latitude", "longitude", "hs"]);

    let hs = &variables[2];
    assert_eq!(hs.dimensions_label().as_deref(), Some("time,rlat,rlon"));
    assert_eq!(
        hs.description().as_deref(),
        Some("Significant wave height,sea_surface_wave_significant_height")
    );
    assert_eq!(hs.units.as_deref(), Some("m"));
}

#[test]
fn test_regular_axes_are_unpacked_and_expanded() {
    let dir = temp_test_dir();
    let path = dir.path().join("regular.nc");
    write_regular(&path);

    let dataset = NetCdfDataset::open(path.to_str().unwrap()).unwrap();
    let grid = dataset.coordinate_grid("latitude", "longitude").unwrap();

    assert_eq!(grid.shape(), GridShape::new(3, 4));
    assert_approx_eq!(grid.latitude(0, 0), 60.0, 1e-9);
    assert_approx_eq!(grid.latitude(2, 3), 62.0, 1e-9);
    assert_approx_eq!(grid.longitude(2, 3), 1.5, 1e-9);
    assert_eq!(dataset.description(), None);
}

#[test]
fn test_open_bytes_matches_open_path() {
    let dir = temp_test_dir();
    let path = dir.path().join("curvilinear.nc");
    write_curvilinear(&path, 12, 9);

    let bytes = std::fs::read(&path).unwrap();
    let from_bytes = NetCdfDataset::open_bytes(&bytes, "download").unwrap();
    let from_path = NetCdfDataset::open(path.to_str().unwrap()).unwrap();

    let options = FootprintOptions::default().with_target_points(10);
    let a = extract_footprint(&from_bytes.coordinate_grid("latitude", "longitude").unwrap(), &options)
        .unwrap();
    let b = extract_footprint(&from_path.coordinate_grid("latitude", "longitude").unwrap(), &options)
        .unwrap();
    assert_eq!(a, b);
    assert_eq!(from_bytes.location(), "download");
}

#[test]
fn test_missing_coordinate_variable() {
    let dir = temp_test_dir();
    let path = dir.path().join("curvilinear.nc");
    write_curvilinear(&path, 4, 4);

    let dataset = NetCdfDataset::open(path.to_str().unwrap()).unwrap();
    let err = dataset.coordinate_grid("lat_rho", "lon_rho").unwrap_err();
    assert!(matches!(err, NetCdfError::MissingData(_)));
    assert!(err.to_string().contains("lat_rho"));
}

#[test]
fn test_mixed_rank_coordinates_rejected() {
    let dir = temp_test_dir();
    let path = dir.path().join("mixed.nc");
    {
        let mut file = netcdf::create(&path).unwrap();
        file.add_dimension("y", 3).unwrap();
        file.add_dimension("x", 3).unwrap();
        let mut lat = file.add_variable::<f64>("lat", &["y"]).unwrap();
        lat.put_values(&[0.0, 1.0, 2.0], ..).unwrap();
        let mut lon = file.add_variable::<f64>("lon", &["y", "x"]).unwrap();
        lon.put_values(&[0.0; 9], ..).unwrap();
    }

    let dataset = NetCdfDataset::open(path.to_str().unwrap()).unwrap();
    let err = dataset.coordinate_grid("lat", "lon").unwrap_err();
    assert!(matches!(err, NetCdfError::InvalidFormat(_)));
}

#[test]
fn test_real_wave_sample() {
    let path = require_test_file!("wave_subset.nc");

    let dataset = NetCdfDataset::open(path.to_str().unwrap()).unwrap();
    let grid = dataset.coordinate_grid("latitude", "longitude").unwrap();
    let polygon = extract_footprint(&grid, &FootprintOptions::default()).unwrap();

    assert!(polygon.len() >= 8);
    assert!(polygon.len() <= 108);
}
