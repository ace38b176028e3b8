//! Configuration loader for the collector.
//!
//! Loads and validates:
//! - global settings (`collector.yaml`)
//! - product definitions (`products/*.yaml`, one product per file)
//!
//! Supports environment variable substitution using `${VAR}` and
//! `${VAR:-default}` syntax, and `~` in output paths.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::warn;

use crate::config::{CollectorConfig, ProductConfig};
use crate::sources::expand_dataset_template;

pub const COLLECTOR_CONFIG_FILE: &str = "collector.yaml";

/// Global settings plus products in publication order.
#[derive(Debug, Clone)]
pub struct AllConfigs {
    pub collector: CollectorConfig,
    pub products: Vec<ProductConfig>,
}

impl AllConfigs {
    /// Keep only the named product. Errors when it is not configured.
    pub fn select_product(&mut self, id: &str) -> Result<()> {
        self.products.retain(|p| p.id == id);
        anyhow::ensure!(!self.products.is_empty(), "Product '{}' is not configured", id);
        Ok(())
    }
}

// ============================================================================
// Loading Functions
// ============================================================================

/// Load `collector.yaml` and every product it points at.
pub fn load_all_configs<P: AsRef<Path>>(config_dir: P) -> Result<AllConfigs> {
    let base = config_dir.as_ref();

    let collector = load_collector_config(base.join(COLLECTOR_CONFIG_FILE))?;

    let products_dir = if collector.collection.products_dir.is_absolute() {
        collector.collection.products_dir.clone()
    } else {
        base.join(&collector.collection.products_dir)
    };
    let products = load_product_configs(&products_dir, &collector.collection.order)?;

    Ok(AllConfigs {
        collector,
        products,
    })
}

/// Load and validate `collector.yaml` with environment variable substitution.
pub fn load_collector_config<P: AsRef<Path>>(path: P) -> Result<CollectorConfig> {
    let content = fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read collector config from {:?}", path.as_ref()))?;
    parse_collector_config(&content)
        .with_context(|| format!("Invalid collector config {:?}", path.as_ref()))
}

pub fn parse_collector_config(content: &str) -> Result<CollectorConfig> {
    let expanded = expand_env_vars(content)?;
    let mut config: CollectorConfig =
        serde_yaml::from_str(&expanded).context("Failed to parse collector config YAML")?;

    config.output.dir = expand_home(&config.output.dir);
    config.output.portal_file = expand_home(&config.output.portal_file);

    validate_collector_config(&config)?;
    Ok(config)
}

/// Load and validate one product file.
pub fn load_product_config<P: AsRef<Path>>(path: P) -> Result<ProductConfig> {
    let content = fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read product config from {:?}", path.as_ref()))?;
    parse_product_config(&content)
        .with_context(|| format!("Invalid product config {:?}", path.as_ref()))
}

pub fn parse_product_config(content: &str) -> Result<ProductConfig> {
    let expanded = expand_env_vars(content)?;
    let config: ProductConfig =
        serde_yaml::from_str(&expanded).context("Failed to parse product config YAML")?;
    validate_product_config(&config)?;
    Ok(config)
}

/// Load every `*.yaml` / `*.yml` product in `products_dir`.
///
/// Products named in `order` come first, in that order; the rest follow
/// sorted by file name. Duplicate ids and unknown ids in `order` are errors.
pub fn load_product_configs<P: AsRef<Path>>(products_dir: P, order: &[String]) -> Result<Vec<ProductConfig>> {
    let entries = fs::read_dir(products_dir.as_ref())
        .with_context(|| format!("Failed to read products directory {:?}", products_dir.as_ref()))?;

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let ext = path.extension().and_then(|s| s.to_str());
        if matches!(ext, Some("yaml") | Some("yml")) {
            paths.push(path);
        }
    }
    paths.sort();

    let mut products = Vec::with_capacity(paths.len());
    let mut seen = HashSet::new();
    for path in &paths {
        let product = load_product_config(path)?;
        anyhow::ensure!(
            seen.insert(product.id.clone()),
            "Duplicate product id '{}' in {:?}",
            product.id,
            path
        );
        products.push(product);
    }

    apply_order(products, order)
}

fn apply_order(mut products: Vec<ProductConfig>, order: &[String]) -> Result<Vec<ProductConfig>> {
    if order.is_empty() {
        return Ok(products);
    }

    let mut listed = HashSet::new();
    for id in order {
        anyhow::ensure!(listed.insert(id), "Product '{}' is listed more than once in collection.order", id);
    }

    let mut ordered = Vec::with_capacity(products.len());
    for id in order {
        let index = products
            .iter()
            .position(|p| &p.id == id)
            .with_context(|| format!("Product '{}' listed in collection.order has no config file", id))?;
        ordered.push(products.remove(index));
    }

    for unlisted in &products {
        warn!(product = %unlisted.id, "Product not listed in collection.order, appending");
    }
    ordered.extend(products);
    Ok(ordered)
}

fn expand_home(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(s) => PathBuf::from(shellexpand::tilde(s).into_owned()),
        None => path.to_path_buf(),
    }
}

// ============================================================================
// Environment Variable Expansion
// ============================================================================

/// Expand `${VAR}` and `${VAR:-default}` in YAML content.
///
/// Only `${` starts a substitution, so `{date:%Y%m}` templates pass through.
fn expand_env_vars(content: &str) -> Result<String> {
    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && chars.peek() == Some(&'{') {
            chars.next(); // consume '{'

            let mut var_expr = String::new();
            let mut depth = 1;
            while depth > 0 {
                match chars.next() {
                    Some('{') => {
                        depth += 1;
                        var_expr.push('{');
                    }
                    Some('}') => {
                        depth -= 1;
                        if depth > 0 {
                            var_expr.push('}');
                        }
                    }
                    Some(c) => var_expr.push(c),
                    None => anyhow::bail!("Unclosed variable substitution: ${{{}", var_expr),
                }
            }

            result.push_str(&resolve_var_expr(&var_expr)?);
        } else {
            result.push(ch);
        }
    }

    Ok(result)
}

/// `VAR` must be set; `VAR:-default` falls back when unset or empty.
fn resolve_var_expr(expr: &str) -> Result<String> {
    match expr.split_once(":-") {
        Some((name, default)) => match std::env::var(name.trim()) {
            Ok(val) if !val.is_empty() => Ok(val),
            _ => Ok(default.to_string()),
        },
        None => std::env::var(expr.trim())
            .with_context(|| format!("Environment variable {} not set", expr)),
    }
}

// ============================================================================
// Validation
// ============================================================================

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const VALID_LOG_FORMATS: [&str; 2] = ["json", "pretty"];

pub fn validate_collector_config(config: &CollectorConfig) -> Result<()> {
    anyhow::ensure!(
        !config.provider.name.trim().is_empty(),
        "Provider name cannot be empty"
    );
    anyhow::ensure!(
        !config.output.dir.as_os_str().is_empty(),
        "Output directory cannot be empty"
    );
    anyhow::ensure!(
        !config.output.portal_file.as_os_str().is_empty(),
        "Portal file cannot be empty"
    );
    anyhow::ensure!(
        config.footprint.target_points > 0,
        "footprint.target_points must be greater than 0"
    );
    anyhow::ensure!(
        config.collection.parallel > 0,
        "collection.parallel must be greater than 0"
    );
    anyhow::ensure!(
        VALID_LOG_LEVELS.contains(&config.logging.level.as_str()),
        "Invalid log level: {}. Must be one of: {:?}",
        config.logging.level,
        VALID_LOG_LEVELS
    );
    anyhow::ensure!(
        VALID_LOG_FORMATS.contains(&config.logging.format.as_str()),
        "Invalid log format: {}. Must be one of: {:?}",
        config.logging.format,
        VALID_LOG_FORMATS
    );
    Ok(())
}

fn validate_product_config(config: &ProductConfig) -> Result<()> {
    anyhow::ensure!(!config.id.trim().is_empty(), "Product id cannot be empty");
    anyhow::ensure!(
        !config.id.contains(['/', '\\']) && config.id != "." && config.id != "..",
        "Product id '{}' cannot be used as a directory name",
        config.id
    );
    anyhow::ensure!(!config.url.trim().is_empty(), "Product {} has no url", config.id);
    anyhow::ensure!(
        !config.latitude.is_empty() && !config.longitude.is_empty(),
        "Product {} has an empty coordinate variable name",
        config.id
    );
    if let Some(to_date) = config.to_date {
        anyhow::ensure!(
            to_date >= config.from_date,
            "Product {}: toDate {} is before fromDate {}",
            config.id,
            to_date,
            config.from_date
        );
    }
    check_template(&config.dataset, config.from_date)
        .with_context(|| format!("Product {} has an invalid dataset template", config.id))?;
    Ok(())
}

fn check_template(template: &str, date: NaiveDate) -> Result<()> {
    anyhow::ensure!(!template.trim().is_empty(), "Dataset template is empty");
    expand_dataset_template(template, date).map(|_| ())
}
