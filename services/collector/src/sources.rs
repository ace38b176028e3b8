//! Dataset access for products.
//!
//! A product's `dataset` template is expanded with its start date into a
//! location, which is then opened according to the product's access mode.
//! NetCDF handles are not thread-safe, so every open/read sequence runs on
//! one blocking thread and hands back a plain [`DatasetSnapshot`].

use std::fmt::Write as _;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use chrono::NaiveDate;
use footprint::CoordinateGrid;
use netcdf_reader::{NetCdfDataset, VariableInfo};
use reqwest::Client;
use tracing::{debug, info, instrument};

use crate::config::{AccessMode, ProductConfig};

/// Format used for a bare `{date}` placeholder.
pub const DEFAULT_DATE_FORMAT: &str = "%Y%m%d";

/// Expand `{date}` and `{date:<strftime>}` placeholders with `date`.
///
/// Any other `{...}` placeholder is an error, as is an unclosed brace.
pub fn expand_dataset_template(template: &str, date: NaiveDate) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let end = after
            .find('}')
            .ok_or_else(|| anyhow!("Unclosed placeholder in dataset template: {}", template))?;
        let placeholder = &after[..end];

        let format = match placeholder.split_once(':') {
            None if placeholder == "date" => DEFAULT_DATE_FORMAT,
            Some(("date", format)) if !format.is_empty() => format,
            _ => bail!("Unknown placeholder {{{}}} in dataset template", placeholder),
        };
        // write! surfaces bad strftime items as an error instead of a panic
        write!(out, "{}", date.format(format))
            .map_err(|_| anyhow!("Invalid date format '{}' in dataset template", format))?;

        rest = &after[end + 1..];
    }
    out.push_str(rest);

    Ok(out)
}

/// Everything the collector needs from one dataset.
#[derive(Debug, Clone)]
pub struct DatasetSnapshot {
    /// Where the dataset was read from
    pub location: String,
    pub description: Option<String>,
    pub variables: Vec<VariableInfo>,
    /// `None` when the product drops its coordinates
    pub grid: Option<CoordinateGrid>,
}

/// Reads dataset snapshots for products.
#[async_trait]
pub trait DatasetReader: Send + Sync {
    /// Read metadata, and the coordinate grid unless `with_coordinates` is false.
    async fn read(
        &self,
        product: &ProductConfig,
        location: &str,
        with_coordinates: bool,
    ) -> Result<DatasetSnapshot>;
}

/// NetCDF reader for OPeNDAP URLs, HTTP downloads and local files.
pub struct NetCdfReader {
    client: Client,
}

impl NetCdfReader {
    pub fn new(http_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(http_timeout)
            .user_agent(concat!("metocean-footprint/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client })
    }

    #[instrument(skip(self))]
    async fn download(&self, url: &str) -> Result<Bytes> {
        debug!("Downloading dataset");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        if !response.status().is_success() {
            bail!("Download of {} failed: {}", url, response.status());
        }

        let bytes = response.bytes().await?;
        info!(size = bytes.len(), "Downloaded dataset");
        Ok(bytes)
    }
}

#[async_trait]
impl DatasetReader for NetCdfReader {
    #[instrument(skip(self, product), fields(product = %product.id, access = ?product.access))]
    async fn read(
        &self,
        product: &ProductConfig,
        location: &str,
        with_coordinates: bool,
    ) -> Result<DatasetSnapshot> {
        let payload = match product.access {
            AccessMode::Download => Some(self.download(location).await?),
            AccessMode::Opendap | AccessMode::Local => None,
        };

        let location = location.to_string();
        let lat_name = product.latitude.clone();
        let lon_name = product.longitude.clone();

        tokio::task::spawn_blocking(move || {
            let dataset = match &payload {
                Some(bytes) => NetCdfDataset::open_bytes(bytes, &location)?,
                None => NetCdfDataset::open(&location)?,
            };
            snapshot(&dataset, &lat_name, &lon_name, with_coordinates)
        })
        .await
        .context("Dataset read task failed")?
    }
}

fn snapshot(
    dataset: &NetCdfDataset,
    lat_name: &str,
    lon_name: &str,
    with_coordinates: bool,
) -> Result<DatasetSnapshot> {
    let grid = if with_coordinates {
        Some(dataset.coordinate_grid(lat_name, lon_name)?)
    } else {
        None
    };

    Ok(DatasetSnapshot {
        location: dataset.location().to_string(),
        description: dataset.description(),
        variables: dataset.variables(),
        grid,
    })
}
