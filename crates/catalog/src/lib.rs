//! Dataset catalog records and their JSON persistence.
//!
//! A [`DatasetRecord`] is written per product; successful records are then
//! grouped under a [`ProviderRecord`] into the [`PortalCatalog`] document
//! consumed by the web portal.

pub mod error;
pub mod record;
pub mod writer;

pub use error::{CatalogError, CatalogResult};
pub use record::{DatasetRecord, PortalCatalog, ProviderRecord, VariableRecord};
pub use writer::{read_json, CatalogWriter};
