//! Scratch directory housekeeping.

use std::io;
use std::path::{Path, PathBuf};

/// Default scratch directory name.
pub const DEFAULT_SCRATCH_DIR: &str = "temp_pptx_extracted";

/// A scratch directory that is removed, if present, when the guard drops.
///
/// Removal is idempotent: a directory that was never created, or was
/// already removed, is not an error.
#[derive(Debug)]
pub struct ScratchDir {
    path: PathBuf,
    cleaned: bool,
}

impl ScratchDir {
    /// Guard the given directory path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cleaned: false,
        }
    }

    /// The guarded path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the directory tree now, reporting whether anything was removed.
    pub fn cleanup(&mut self) -> io::Result<bool> {
        self.cleaned = true;
        remove_dir_if_exists(&self.path)
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if self.cleaned {
            return;
        }
        if let Err(e) = self.cleanup() {
            log::warn!(
                "Failed to remove temporary folder '{}': {}",
                self.path.display(),
                e
            );
        }
    }
}

/// Remove a directory tree if it exists.
pub fn remove_dir_if_exists(path: &Path) -> io::Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    std::fs::remove_dir_all(path)?;
    log::info!("Temporary folder '{}' has been removed.", path.display());
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleanup_removes_tree() {
        let root = tempfile::tempdir().unwrap();
        let scratch_path = root.path().join("scratch");
        std::fs::create_dir_all(scratch_path.join("nested")).unwrap();
        std::fs::write(scratch_path.join("nested/file.txt"), b"x").unwrap();

        let mut scratch = ScratchDir::new(&scratch_path);
        assert!(scratch.cleanup().unwrap());
        assert!(!scratch_path.exists());

        // Second run is a no-op.
        assert!(!scratch.cleanup().unwrap());
    }

    #[test]
    fn test_missing_dir_is_not_an_error() {
        let root = tempfile::tempdir().unwrap();
        assert!(!remove_dir_if_exists(&root.path().join("never-created")).unwrap());
    }

    #[test]
    fn test_drop_cleans_up() {
        let root = tempfile::tempdir().unwrap();
        let scratch_path = root.path().join(DEFAULT_SCRATCH_DIR);
        std::fs::create_dir(&scratch_path).unwrap();

        {
            let scratch = ScratchDir::new(&scratch_path);
            assert_eq!(scratch.path(), scratch_path.as_path());
        }
        assert!(!scratch_path.exists());
    }
}
