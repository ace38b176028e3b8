//! Locating workspace directories and optional NetCDF samples.

use std::path::PathBuf;

/// Environment variable naming an extra directory to search for samples.
pub const SAMPLE_DIR_ENV: &str = "FOOTPRINT_SAMPLE_DIR";

/// The directory holding the workspace `Cargo.toml`.
pub fn workspace_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    // crates/test-utils -> workspace root
    manifest_dir
        .ancestors()
        .nth(2)
        .map(PathBuf::from)
        .unwrap_or(manifest_dir)
}

/// `crates/<crate_name>/testdata`.
pub fn crate_testdata_dir(crate_name: &str) -> PathBuf {
    workspace_root().join("crates").join(crate_name).join("testdata")
}

/// First existing `name` in `$FOOTPRINT_SAMPLE_DIR`, the reader crate's
/// testdata, or the workspace `testdata`. Samples are large and not checked
/// in, so `None` is normal.
pub fn find_test_file(name: &str) -> Option<PathBuf> {
    let from_env = std::env::var_os(SAMPLE_DIR_ENV).map(|dir| PathBuf::from(dir).join(name));
    let in_tree = [
        crate_testdata_dir("netcdf-reader").join(name),
        workspace_root().join("testdata").join(name),
    ];

    from_env.into_iter().chain(in_tree).find(|path| path.is_file())
}

/// Fresh directory for catalog and map output, removed on drop.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("create temporary directory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_root_has_config() {
        let root = workspace_root();
        assert!(root.join("Cargo.toml").is_file(), "{:?}", root);
        assert!(root.join("config").join("collector.yaml").is_file(), "{:?}", root);
    }

    #[test]
    fn test_crate_testdata_dir_layout() {
        let dir = crate_testdata_dir("catalog");
        assert!(dir.ends_with("crates/catalog/testdata"));
    }

    #[test]
    fn test_unknown_sample_not_found() {
        assert_eq!(find_test_file("no_such_sample_7f3a.nc"), None);
    }

    #[test]
    fn test_temp_test_dir_is_empty() {
        let dir = temp_test_dir();
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
