//! Filesystem utilities.

use std::fs;
use std::path::{Path, PathBuf};

use glob::glob;

use crate::error::{Error, Result};

/// Normalize a path to absolute, resolving against the current directory.
///
/// The path does not have to exist.
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path)
        .map_err(Error::io(format!("failed to absolutize: {}", path.display())))
}

/// Copy a single file into a directory, keeping its file name.
///
/// Returns the destination path.
pub fn copy_into(file: &Path, dir: &Path) -> Result<PathBuf> {
    let name = file.file_name().ok_or_else(|| {
        Error::InvalidInput(format!("path has no file name: {}", file.display()))
    })?;
    let dest = dir.join(name);
    fs::copy(file, &dest).map_err(Error::io(format!(
        "failed to copy {} to {}",
        file.display(),
        dest.display()
    )))?;
    Ok(dest)
}

/// Remove a file if it exists.
pub fn remove_file_if_exists(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path)
            .map_err(Error::io(format!("failed to remove: {}", path.display())))?;
    }
    Ok(())
}

/// Find files matching a glob pattern relative to a base directory.
pub fn glob_files(base: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let full_pattern = base.join(pattern);
    let pattern_str = full_pattern.to_string_lossy();

    let entries = glob(&pattern_str)
        .map_err(|e| Error::InvalidInput(format!("invalid glob pattern `{}`: {}", pattern, e)))?;

    let mut results = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) => {
                if path.is_file() {
                    results.push(path);
                }
            }
            Err(e) => {
                tracing::warn!("glob error: {}", e);
            }
        }
    }

    results.sort();
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_absolutize_relative_path() {
        let abs = absolutize(Path::new("some/file.cpp")).unwrap();
        assert!(abs.is_absolute());
        assert!(abs.ends_with("some/file.cpp"));
    }

    #[test]
    fn test_copy_into() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("a.txt");
        let dst_dir = tmp.path().join("out");
        fs::write(&src, "content").unwrap();
        fs::create_dir(&dst_dir).unwrap();

        let dest = copy_into(&src, &dst_dir).unwrap();

        assert_eq!(dest, dst_dir.join("a.txt"));
        assert_eq!(fs::read_to_string(dest).unwrap(), "content");
    }

    #[test]
    fn test_copy_into_missing_source() {
        let tmp = TempDir::new().unwrap();
        let err = copy_into(&tmp.path().join("nope.txt"), tmp.path()).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_remove_file_if_exists() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("stale");
        fs::write(&path, "x").unwrap();

        remove_file_if_exists(&path).unwrap();
        assert!(!path.exists());

        // absent path is not an error
        remove_file_if_exists(&path).unwrap();
    }

    #[test]
    fn test_glob_files() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("A.java"), "").unwrap();
        fs::write(tmp.path().join("B.java"), "").unwrap();
        fs::write(tmp.path().join("notes.txt"), "").unwrap();

        let files = glob_files(tmp.path(), "*.java").unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("A.java"));
        assert!(files[1].ends_with("B.java"));
    }
}
