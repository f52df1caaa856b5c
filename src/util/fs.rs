//! Filesystem utilities.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Get the relative path from `base` to `path`.
///
/// Falls back to `path` unchanged when no relative form exists (e.g. the
/// path is already relative while the base is absolute).
pub fn relative_path(base: &Path, path: &Path) -> PathBuf {
    pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf())
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Remove a file, if it exists.
pub fn remove_file_if_exists(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path)
            .with_context(|| format!("failed to remove file: {}", path.display()))?;
    }
    Ok(())
}

/// Remove a directory and all its contents, if it exists.
pub fn remove_dir_all_if_exists(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path)
            .with_context(|| format!("failed to remove directory: {}", path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_relative_path_between_siblings() {
        let rel = relative_path(Path::new("/ws/app"), Path::new("/ws/lib/include"));
        assert_eq!(rel, PathBuf::from("../lib/include"));
    }

    #[test]
    fn test_relative_path_keeps_relative_input() {
        let rel = relative_path(Path::new("/ws/app"), Path::new("src/main.c"));
        assert_eq!(rel, PathBuf::from("src/main.c"));
    }

    #[test]
    fn test_ensure_and_remove_dir() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("a/b");

        ensure_dir(&dir).unwrap();
        assert!(dir.is_dir());

        remove_dir_all_if_exists(&tmp.path().join("a")).unwrap();
        assert!(!dir.exists());

        // Removing again is a no-op.
        remove_dir_all_if_exists(&tmp.path().join("a")).unwrap();
    }

    #[test]
    fn test_remove_file_if_exists() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("gen.make");

        remove_file_if_exists(&file).unwrap();
        fs::write(&file, "x").unwrap();
        remove_file_if_exists(&file).unwrap();
        assert!(!file.exists());
    }
}
