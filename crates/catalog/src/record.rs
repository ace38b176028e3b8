//! Catalog records as published to the portal.
//!
//! Field names and order follow the portal's JSON contract (camelCase,
//! optional fields omitted rather than null).

use chrono::NaiveDate;
use footprint::BoundaryPolygon;
use serde::{Deserialize, Serialize};

/// One variable of a dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableRecord {
    pub name: String,
    /// Dimension names joined by `,`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    /// `long_name` and `standard_name` joined by `,`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// A dataset's identity, coverage, variables and footprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetRecord {
    pub name: String,
    pub from_date: NaiveDate,
    /// Catalog page of the product
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub variables: Vec<VariableRecord>,
    /// Serialized as the `latitudes` / `longitudes` arrays.
    #[serde(flatten)]
    pub footprint: BoundaryPolygon,
}

impl DatasetRecord {
    pub fn new(name: impl Into<String>, from_date: NaiveDate, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            from_date,
            url: url.into(),
            to_date: None,
            description: None,
            variables: Vec::new(),
            footprint: BoundaryPolygon::empty(),
        }
    }

    pub fn with_to_date(mut self, to_date: Option<NaiveDate>) -> Self {
        self.to_date = to_date;
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn with_variables(mut self, variables: Vec<VariableRecord>) -> Self {
        self.variables = variables;
        self
    }

    pub fn with_footprint(mut self, footprint: BoundaryPolygon) -> Self {
        self.footprint = footprint;
        self
    }
}

/// Datasets published under one data provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderRecord {
    pub name: String,
    pub datasets: Vec<DatasetRecord>,
}

impl ProviderRecord {
    pub fn new(name: impl Into<String>, datasets: Vec<DatasetRecord>) -> Self {
        Self {
            name: name.into(),
            datasets,
        }
    }
}

/// Top-level portal document: `{"providers": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortalCatalog {
    pub providers: Vec<ProviderRecord>,
}

impl PortalCatalog {
    pub fn single(provider: ProviderRecord) -> Self {
        Self {
            providers: vec![provider],
        }
    }

    pub fn dataset_count(&self) -> usize {
        self.providers.iter().map(|p| p.datasets.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_minimal_record_omits_optional_fields() {
        let record = DatasetRecord::new("NORKYST800", date(2016, 9, 14), "https://example.org/catalog.html");
        let json = serde_json::to_string(&record).unwrap();

        assert_eq!(
            json,
            r#"{"name":"NORKYST800","fromDate":"2016-09-14","url":"https://example.org/catalog.html","variables":[],"latitudes":[],"longitudes":[]}"#
        );
    }

    #[test]
    fn test_full_record_field_order() {
        let record = DatasetRecord::new("NORA3_wave_sub", date(1976, 1, 1), "https://example.org")
            .with_to_date(Some(date(2024, 5, 31)))
            .with_description(Some("Title\n\nSummary".to_string()))
            .with_variables(vec![VariableRecord {
                name: "hs".to_string(),
                dimensions: Some("time".to_string()),
                description: None,
                unit: Some("m".to_string()),
            }])
            .with_footprint(BoundaryPolygon::from_points([(60.0, 5.0), (61.0, 6.0)]));

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"name":"NORA3_wave_sub","fromDate":"1976-01-01","url":"https://example.org","#,
                r#""toDate":"2024-05-31","description":"Title\n\nSummary","#,
                r#""variables":[{"name":"hs","dimensions":"time","unit":"m"}],"#,
                r#""latitudes":[60.0,61.0],"longitudes":[5.0,6.0]}"#
            )
        );
    }

    #[test]
    fn test_record_reads_back() {
        let record = DatasetRecord::new("NORAC_wave", date(2017, 1, 1), "https://example.org")
            .with_footprint(BoundaryPolygon::from_points([(1.0, 2.0)]));
        let json = serde_json::to_string(&record).unwrap();

        let parsed: DatasetRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_portal_shape() {
        let portal = PortalCatalog::single(ProviderRecord::new("met.no", Vec::new()));
        assert_eq!(
            serde_json::to_string(&portal).unwrap(),
            r#"{"providers":[{"name":"met.no","datasets":[]}]}"#
        );
        assert_eq!(portal.dataset_count(), 0);
    }
}
