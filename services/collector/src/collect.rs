//! Collection pipeline: read each product, extract its footprint, write its
//! record and maps, then publish the portal catalog.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use catalog::{CatalogWriter, DatasetRecord, PortalCatalog, ProviderRecord, VariableRecord};
use footprint::{extract_footprint, BoundaryPolygon};
use futures::future::join_all;
use map_render::{build_renderers, MapRenderer};
use netcdf_reader::VariableInfo;
use tokio::sync::Semaphore;
use tracing::{debug, info, instrument, warn};

use crate::config::{CollectorConfig, ProductConfig};
use crate::report::{CollectionReport, Outcome, ProductOutcome};
use crate::sources::{expand_dataset_template, DatasetReader};

/// Main collection pipeline.
pub struct Collector {
    config: CollectorConfig,
    reader: Arc<dyn DatasetReader>,
    writer: CatalogWriter,
    renderers: Vec<Arc<dyn MapRenderer>>,
    semaphore: Arc<Semaphore>,
}

impl Collector {
    /// Renderers are built from `config.maps`.
    pub fn new(config: CollectorConfig, reader: Arc<dyn DatasetReader>) -> Self {
        let writer = CatalogWriter::new(&config.output.dir).pretty(config.output.pretty);
        let renderers = build_renderers(&config.maps.renderers);
        let semaphore = Arc::new(Semaphore::new(config.collection.parallel.max(1)));

        Self {
            config,
            reader,
            writer,
            renderers,
            semaphore,
        }
    }

    pub fn with_renderers(mut self, renderers: Vec<Arc<dyn MapRenderer>>) -> Self {
        self.renderers = renderers;
        self
    }

    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// Collect every enabled product and publish the portal catalog.
    ///
    /// A failing product is recorded in the report and does not stop the
    /// others. The portal lists the successful products in the given order;
    /// it is left untouched when nothing succeeded.
    #[instrument(skip(self, products), fields(provider = %self.config.provider.name))]
    pub async fn run(&self, products: &[ProductConfig]) -> Result<CollectionReport> {
        let enabled: Vec<&ProductConfig> = products.iter().filter(|p| p.enabled).collect();
        for skipped in products.iter().filter(|p| !p.enabled) {
            debug!(product = %skipped.id, "Product disabled, skipping");
        }
        info!(products = enabled.len(), parallel = self.config.collection.parallel, "Starting collection");

        // join_all keeps input order; the semaphore bounds concurrency.
        let results = join_all(enabled.iter().map(|product| async move {
            let _permit = self.semaphore.acquire().await?;
            self.collect_product(product).await
        }))
        .await;

        let mut report = CollectionReport::default();
        let mut records = Vec::new();
        for (product, result) in enabled.iter().zip(results) {
            let outcome = match result {
                Ok((record, record_path)) => {
                    let points = record.footprint.len();
                    records.push(record);
                    Outcome::Collected {
                        points,
                        record_path,
                    }
                }
                Err(e) => Outcome::Failed {
                    error: format!("{:#}", e),
                },
            };
            report.outcomes.push(ProductOutcome {
                product: product.id.clone(),
                outcome,
            });
        }

        if records.is_empty() {
            warn!("No product succeeded, portal catalog not written");
        } else {
            let portal = PortalCatalog::single(ProviderRecord::new(
                self.config.provider.name.clone(),
                records,
            ));
            let portal_file = &self.config.output.portal_file;
            self.writer
                .write_portal(portal_file, &portal)
                .with_context(|| format!("Failed to write portal catalog {:?}", portal_file))?;
            report.portal_file = Some(portal_file.clone());
        }

        Ok(report)
    }

    /// Read, extract, write and render one product.
    #[instrument(skip(self, product), fields(product = %product.id))]
    pub async fn collect_product(&self, product: &ProductConfig) -> Result<(DatasetRecord, PathBuf)> {
        let location = expand_dataset_template(&product.dataset, product.from_date)?;
        debug!(location = %location, "Resolved dataset location");

        let snapshot = self
            .reader
            .read(product, &location, !product.drop_coordinates)
            .await
            .with_context(|| format!("Failed to read {}", location))?;

        let footprint = if product.drop_coordinates {
            BoundaryPolygon::empty()
        } else {
            let grid = snapshot
                .grid
                .with_context(|| format!("No coordinate grid read from {}", location))?;
            let options = product.footprint_options(self.config.footprint.target_points);
            tokio::task::spawn_blocking(move || extract_footprint(&grid, &options))
                .await
                .context("Footprint task failed")??
        };

        let record = DatasetRecord::new(&product.id, product.from_date, &product.url)
            .with_to_date(product.to_date)
            .with_description(snapshot.description)
            .with_variables(snapshot.variables.into_iter().map(variable_record).collect())
            .with_footprint(footprint);

        let record_path = self.writer.write_dataset(&record)?;
        self.render_maps(&record)?;

        info!(
            points = record.footprint.len(),
            variables = record.variables.len(),
            path = %record_path.display(),
            "Collected product"
        );
        Ok((record, record_path))
    }

    /// Map artifacts are for debugging; a renderer failure is only logged.
    fn render_maps(&self, record: &DatasetRecord) -> Result<()> {
        let dir = self.writer.dataset_dir(&record.name)?;
        for renderer in &self.renderers {
            match renderer.render(&record.name, &record.footprint, &dir) {
                Ok(Some(path)) => debug!(renderer = renderer.name(), path = %path.display(), "Rendered map"),
                Ok(None) => {}
                Err(e) => warn!(renderer = renderer.name(), error = %e, "Map rendering failed"),
            }
        }
        Ok(())
    }
}

fn variable_record(info: VariableInfo) -> VariableRecord {
    VariableRecord {
        dimensions: info.dimensions_label(),
        description: info.description(),
        unit: info.units,
        name: info.name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_record_fields() {
        let info = VariableInfo {
            name: "lat_rho".to_string(),
            dimensions: vec!["eta_rho".to_string(), "xi_rho".to_string()],
            long_name: Some("latitude of RHO-points".to_string()),
            standard_name: None,
            units: Some("degree_north".to_string()),
        };
        let record = variable_record(info);

        assert_eq!(record.name, "lat_rho");
        assert_eq!(record.dimensions.as_deref(), Some("eta_rho,xi_rho"));
        assert_eq!(record.description.as_deref(), Some("latitude of RHO-points"));
        assert_eq!(record.unit.as_deref(), Some("degree_north"));
    }
}
