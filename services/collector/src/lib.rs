//! Footprint collector service.
//!
//! Reads each configured product's dataset, extracts its boundary polygon,
//! and publishes per-product records plus a portal catalog.

pub mod collect;
pub mod config;
pub mod config_loader;
pub mod report;
pub mod sources;

pub use collect::Collector;
pub use config::{AccessMode, CollectorConfig, ConfigOverrides, ProductConfig};
pub use config_loader::{load_all_configs, AllConfigs};
pub use report::{CollectionReport, Outcome, ProductOutcome};
pub use sources::{expand_dataset_template, DatasetReader, DatasetSnapshot, NetCdfReader};
