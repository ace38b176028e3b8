//! JSON catalog files on the local filesystem.
//!
//! Layout under the output directory:
//!
//! ```text
//! <output>/<dataset>/<dataset>.json
//! <output>/<dataset>/map.html          (written by map renderers)
//! ```
//!
//! The portal document goes to its own configured path.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::{CatalogError, CatalogResult};
use crate::record::{DatasetRecord, PortalCatalog};

/// Writes dataset records and the portal catalog as JSON.
#[derive(Debug, Clone)]
pub struct CatalogWriter {
    output_dir: PathBuf,
    pretty: bool,
}

impl CatalogWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            pretty: false,
        }
    }

    /// Indent output instead of writing compact JSON.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Directory holding a dataset's record and map artifacts.
    pub fn dataset_dir(&self, name: &str) -> CatalogResult<PathBuf> {
        validate_name(name)?;
        Ok(self.output_dir.join(name))
    }

    /// Path of a dataset's JSON record.
    pub fn dataset_path(&self, name: &str) -> CatalogResult<PathBuf> {
        Ok(self.dataset_dir(name)?.join(format!("{}.json", name)))
    }

    /// Write `<output>/<name>/<name>.json`, creating directories as needed.
    #[instrument(skip(self, record), fields(dataset = %record.name))]
    pub fn write_dataset(&self, record: &DatasetRecord) -> CatalogResult<PathBuf> {
        let path = self.dataset_path(&record.name)?;
        self.write_json(&path, record)?;
        debug!(path = %path.display(), points = record.footprint.len(), "Wrote dataset record");
        Ok(path)
    }

    /// Write the portal document to `path`.
    #[instrument(skip(self, portal), fields(datasets = portal.dataset_count()))]
    pub fn write_portal(&self, path: &Path, portal: &PortalCatalog) -> CatalogResult<()> {
        self.write_json(path, portal)?;
        debug!(path = %path.display(), "Wrote portal catalog");
        Ok(())
    }

    /// Read a previously written dataset record.
    pub fn read_dataset(&self, name: &str) -> CatalogResult<DatasetRecord> {
        read_json(&self.dataset_path(name)?)
    }

    fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> CatalogResult<()> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(value)?
        } else {
            serde_json::to_vec(value)?
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| CatalogError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        // Write then rename so readers never see a partial file.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &bytes).map_err(|source| CatalogError::Write {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, path).map_err(|source| CatalogError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Read any catalog JSON document.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> CatalogResult<T> {
    let bytes = std::fs::read(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn validate_name(name: &str) -> CatalogResult<()> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\']);
    if bad {
        return Err(CatalogError::InvalidName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_paths() {
        let writer = CatalogWriter::new("/srv/output");
        assert_eq!(
            writer.dataset_path("NORA3_wave_sub").unwrap(),
            PathBuf::from("/srv/output/NORA3_wave_sub/NORA3_wave_sub.json")
        );
    }

    #[test]
    fn test_rejects_path_like_names() {
        let writer = CatalogWriter::new("/srv/output");
        for name in ["", ".", "..", "a/b", "..\\x"] {
            assert!(
                matches!(writer.dataset_dir(name), Err(CatalogError::InvalidName(_))),
                "name {:?}",
                name
            );
        }
    }
}
