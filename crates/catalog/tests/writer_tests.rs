//! Filesystem tests for the catalog writer.

use catalog::{read_json, CatalogWriter, DatasetRecord, PortalCatalog, ProviderRecord, VariableRecord};
use chrono::NaiveDate;
use footprint::BoundaryPolygon;
use test_utils::temp_test_dir;

fn record(name: &str) -> DatasetRecord {
    DatasetRecord::new(
        name,
        NaiveDate::from_ymd_opt(2017, 1, 2).unwrap(),
        "https://thredds.met.no/thredds/catalog/nora3_subset_ocean/catalog.html",
    )
    .with_to_date(NaiveDate::from_ymd_opt(2018, 12, 31))
    .with_variables(vec![VariableRecord {
        name: "temperature".to_string(),
        dimensions: Some("time,depth,Y,X".to_string()),
        description: Some("sea water temperature,sea_water_temperature".to_string()),
        unit: Some("degC".to_string()),
    }])
    .with_footprint(BoundaryPolygon::from_points([
        (58.0, 4.0),
        (58.0, 12.0),
        (71.0, 30.0),
        (71.0, 5.0),
    ]))
}

#[test]
fn test_write_dataset_creates_product_directory() {
    let dir = temp_test_dir();
    let writer = CatalogWriter::new(dir.path());

    let path = writer.write_dataset(&record("NorkystDA_surface")).unwrap();
    assert_eq!(
        path,
        dir.path().join("NorkystDA_surface").join("NorkystDA_surface.json")
    );
    assert!(path.exists());
    assert!(!path.with_extension("json.tmp").exists());

    let back = writer.read_dataset("NorkystDA_surface").unwrap();
    assert_eq!(back, record("NorkystDA_surface"));
}

#[test]
fn test_rewrite_replaces_previous_record() {
    let dir = temp_test_dir();
    let writer = CatalogWriter::new(dir.path());

    writer.write_dataset(&record("NORKYST800")).unwrap();
    let empty = record("NORKYST800").with_footprint(BoundaryPolygon::empty());
    writer.write_dataset(&empty).unwrap();

    let back = writer.read_dataset("NORKYST800").unwrap();
    assert!(back.footprint.is_empty());
}

#[test]
fn test_portal_preserves_dataset_order() {
    let dir = temp_test_dir();
    let writer = CatalogWriter::new(dir.path().join("output"));
    let portal_path = dir.path().join("public").join("portal.json");

    let portal = PortalCatalog::single(ProviderRecord::new(
        "met.no",
        vec![record("B_second"), record("A_first")],
    ));
    writer.write_portal(&portal_path, &portal).unwrap();

    let back: PortalCatalog = read_json(&portal_path).unwrap();
    let names: Vec<&str> = back.providers[0]
        .datasets
        .iter()
        .map(|d| d.name.as_str())
        .collect();
    assert_eq!(names, vec!["B_second", "A_first"]);
    assert_eq!(back.providers[0].name, "met.no");
}

#[test]
fn test_record_with_missing_coordinates_reads_back() {
    let dir = temp_test_dir();
    let writer = CatalogWriter::new(dir.path());
    let gappy = record("NORA3_stormsurge").with_footprint(BoundaryPolygon::from_points([
        (f64::NAN, 1.0),
        (2.0, 3.0),
        (4.0, f64::NAN),
    ]));

    let path = writer.write_dataset(&gappy).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains(r#""latitudes":[null,2.0,4.0]"#));
    assert!(text.contains(r#""longitudes":[1.0,3.0,null]"#));

    let back = writer.read_dataset("NORA3_stormsurge").unwrap();
    let points: Vec<(f64, f64)> = back.footprint.points().collect();
    assert_eq!(points.len(), 3);
    assert!(points[0].0.is_nan());
    assert_eq!(points[0].1, 1.0);
    assert_eq!(points[1], (2.0, 3.0));
    assert!(points[2].1.is_nan());
    assert_eq!(back.name, "NORA3_stormsurge");
    assert_eq!(back.variables, gappy.variables);
}

#[test]
fn test_pretty_output_is_indented() {
    let dir = temp_test_dir();
    let writer = CatalogWriter::new(dir.path()).pretty(true);

    let path = writer.write_dataset(&record("NORA3_atm_sub")).unwrap();
    let text = std::fs::read_to_string(path).unwrap();
    assert!(text.contains("\n  \"name\": \"NORA3_atm_sub\""));
}

#[test]
fn test_read_missing_record() {
    let dir = temp_test_dir();
    let writer = CatalogWriter::new(dir.path());
    let err = writer.read_dataset("absent").unwrap_err();
    assert!(err.to_string().contains("absent.json"));
}
