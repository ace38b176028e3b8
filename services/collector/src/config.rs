//! Collector configuration.
//!
//! `collector.yaml` holds the global settings; each product lives in its own
//! file under the products directory. Both are loaded by
//! [`crate::config_loader`].

use std::path::PathBuf;

use chrono::NaiveDate;
use footprint::{FootprintOptions, DEFAULT_TARGET_POINTS};
use map_render::RendererKind;
use serde::{Deserialize, Serialize};

// ============================================================================
// Global configuration (collector.yaml)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    pub provider: ProviderConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub footprint: FootprintConfig,
    #[serde(default)]
    pub collection: CollectionConfig,
    #[serde(default)]
    pub maps: MapsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// The data provider all products are published under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Root for `<dir>/<product>/<product>.json` and map artifacts
    pub dir: PathBuf,
    /// Portal catalog document
    pub portal_file: PathBuf,
    /// Indented JSON
    #[serde(default)]
    pub pretty: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FootprintConfig {
    #[serde(default = "default_target_points")]
    pub target_points: usize,
}

impl Default for FootprintConfig {
    fn default() -> Self {
        Self {
            target_points: default_target_points(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Product files, relative to the config directory unless absolute
    #[serde(default = "default_products_dir")]
    pub products_dir: PathBuf,
    /// Product ids in publication order; unlisted products follow by file name
    #[serde(default)]
    pub order: Vec<String>,
    /// Products processed concurrently
    #[serde(default = "default_parallel")]
    pub parallel: usize,
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            products_dir: default_products_dir(),
            order: Vec::new(),
            parallel: default_parallel(),
            http_timeout_secs: default_http_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapsConfig {
    #[serde(default = "default_renderers")]
    pub renderers: Vec<RendererKind>,
}

impl Default for MapsConfig {
    fn default() -> Self {
        Self {
            renderers: default_renderers(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_target_points() -> usize {
    DEFAULT_TARGET_POINTS
}

fn default_products_dir() -> PathBuf {
    PathBuf::from("products")
}

fn default_parallel() -> usize {
    4
}

fn default_http_timeout_secs() -> u64 {
    300
}

fn default_renderers() -> Vec<RendererKind> {
    vec![RendererKind::Html]
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

// ============================================================================
// Product configuration (products/*.yaml)
// ============================================================================

/// How the dataset location is opened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessMode {
    /// Open the URL directly through libnetcdf's DAP client
    #[default]
    Opendap,
    /// Fetch the whole file over HTTP first
    Download,
    /// Local path
    Local,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductConfig {
    /// Product name, also the record name and output directory
    pub id: String,
    /// Human-facing catalog page published in the record
    pub url: String,
    /// Dataset location template, e.g. `.../{date:%Y%m}.nc`
    pub dataset: String,
    #[serde(default)]
    pub access: AccessMode,
    pub from_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_date: Option<NaiveDate>,
    #[serde(default = "default_latitude")]
    pub latitude: String,
    #[serde(default = "default_longitude")]
    pub longitude: String,
    /// Publish the record without a footprint
    #[serde(default)]
    pub drop_coordinates: bool,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl ProductConfig {
    pub fn footprint_options(&self, target_points: usize) -> FootprintOptions {
        FootprintOptions::default()
            .with_target_points(target_points)
            .with_drop_coordinates(self.drop_coordinates)
    }
}

fn default_latitude() -> String {
    "latitude".to_string()
}

fn default_longitude() -> String {
    "longitude".to_string()
}

fn default_enabled() -> bool {
    true
}

// ============================================================================
// Command-line overrides
// ============================================================================

/// Values given on the command line take precedence over the YAML.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub output_dir: Option<PathBuf>,
    pub portal_file: Option<PathBuf>,
    pub target_points: Option<usize>,
    pub parallel: Option<usize>,
    pub no_map: bool,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
}

impl ConfigOverrides {
    pub fn apply(self, config: &mut CollectorConfig) {
        if let Some(dir) = self.output_dir {
            config.output.dir = dir;
        }
        if let Some(portal_file) = self.portal_file {
            config.output.portal_file = portal_file;
        }
        if let Some(target_points) = self.target_points {
            config.footprint.target_points = target_points;
        }
        if let Some(parallel) = self.parallel {
            config.collection.parallel = parallel;
        }
        if self.no_map {
            config.maps.renderers.clear();
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }
        if let Some(format) = self.log_format {
            config.logging.format = format;
        }
    }
}
