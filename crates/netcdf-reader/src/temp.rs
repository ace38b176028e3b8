//! Scratch files for datasets that arrive as bytes.
//!
//! libnetcdf needs a path, so downloaded payloads are written to disk before
//! opening. On Linux `/dev/shm` is preferred to keep the round trip in memory.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::warn;

/// A file that is removed when dropped.
#[derive(Debug)]
pub struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    /// Write `data` to a fresh file in the scratch directory.
    pub fn write(data: &[u8]) -> std::io::Result<Self> {
        Self::create_in(&scratch_dir(), |file| {
            file.write_all(data)?;
            file.sync_all()
        })
    }

    /// Create a file in `dir` and fill it. A partial file is removed if
    /// `fill` fails.
    fn create_in<F>(dir: &Path, fill: F) -> std::io::Result<Self>
    where
        F: FnOnce(&mut File) -> std::io::Result<()>,
    {
        let path = dir.join(scratch_filename());
        let mut file = File::create(&path)?;
        let scratch = Self { path };
        fill(&mut file)?;
        Ok(scratch)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            warn!(path = %self.path.display(), error = %e, "Failed to remove scratch file");
        }
    }
}

/// `/dev/shm` when writable, otherwise the system temp directory.
pub(crate) fn scratch_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        let shm_path = Path::new("/dev/shm");
        if shm_path.is_dir() {
            let probe = shm_path.join(format!(".footprint_probe_{}", std::process::id()));
            if std::fs::write(&probe, b"probe").is_ok() {
                let _ = std::fs::remove_file(&probe);
                return shm_path.to_path_buf();
            }
        }
    }

    std::env::temp_dir()
}

/// Unique per process, thread and call.
pub(crate) fn scratch_filename() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let pid = std::process::id();
    let tid = std::thread::current().id();
    let count = COUNTER.fetch_add(1, Ordering::Relaxed);

    format!("footprint_{}_{:?}_{}.nc", pid, tid, count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scratch_dir_exists() {
        assert!(scratch_dir().exists());
    }

    #[test]
    fn test_scratch_filenames_are_unique() {
        assert_ne!(scratch_filename(), scratch_filename());
    }

    #[test]
    fn test_scratch_file_removed_on_drop() {
        let scratch = ScratchFile::write(b"CDF\x01").unwrap();
        let path = scratch.path().to_path_buf();
        assert_eq!(std::fs::read(&path).unwrap(), b"CDF\x01");

        drop(scratch);
        assert!(!path.exists());
    }

    #[test]
    fn test_partial_file_removed_when_fill_fails() {
        let dir = test_utils::temp_test_dir();
        let result = ScratchFile::create_in(dir.path(), |file| {
            file.write_all(b"CDF\x01 truncated")?;
            Err(std::io::Error::new(std::io::ErrorKind::Other, "no space left on device"))
        });

        let err = result.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::Other);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
