//! Staged build workspaces.
//!
//! Multi-step builds run inside a fresh temporary directory so that
//! intermediates never touch the caller's working directory. The
//! directory is exclusive to one invocation and is removed when the
//! workspace is dropped, on success and failure alike.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::{Error, Result};
use crate::util::fs::{copy_into, glob_files};

/// An ephemeral, exclusive directory for build intermediates.
pub struct StagedWorkspace {
    dir: TempDir,
}

impl StagedWorkspace {
    /// Create a fresh, empty workspace.
    pub fn create() -> Result<Self> {
        let dir = TempDir::new().map_err(Error::io("failed to create staged workspace"))?;
        tracing::debug!("staged workspace at {}", dir.path().display());
        Ok(StagedWorkspace { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Copy a generator input into the workspace.
    pub fn stage(&self, file: &Path) -> Result<PathBuf> {
        copy_into(file, self.path())
    }

    /// Copy a produced artifact back out by name.
    pub fn harvest(&self, name: &str, dest_dir: &Path) -> Result<PathBuf> {
        copy_into(&self.path().join(name), dest_dir)
    }

    /// Copy every produced artifact matching `pattern` back out.
    pub fn harvest_glob(&self, pattern: &str, dest_dir: &Path) -> Result<Vec<PathBuf>> {
        let mut copied = Vec::new();
        for file in glob_files(self.path(), pattern)? {
            copied.push(copy_into(&file, dest_dir)?);
        }
        Ok(copied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_workspace_starts_empty() {
        let ws = StagedWorkspace::create().unwrap();
        assert!(ws.path().is_dir());
        assert_eq!(fs::read_dir(ws.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_stage_and_harvest() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("Interface.h");
        fs::write(&input, "// header").unwrap();

        let ws = StagedWorkspace::create().unwrap();
        ws.stage(&input).unwrap();
        assert!(ws.path().join("Interface.h").exists());

        fs::write(ws.path().join("module.so"), "artifact").unwrap();
        let out = ws.harvest("module.so", tmp.path()).unwrap();
        assert_eq!(fs::read_to_string(out).unwrap(), "artifact");
    }

    #[test]
    fn test_harvest_glob_copies_all_matches() {
        let tmp = TempDir::new().unwrap();
        let ws = StagedWorkspace::create().unwrap();
        fs::write(ws.path().join("A.java"), "").unwrap();
        fs::write(ws.path().join("B.java"), "").unwrap();
        fs::write(ws.path().join("wrap.o"), "").unwrap();

        let copied = ws.harvest_glob("*.java", tmp.path()).unwrap();

        assert_eq!(copied.len(), 2);
        assert!(tmp.path().join("A.java").exists());
        assert!(tmp.path().join("B.java").exists());
        assert!(!tmp.path().join("wrap.o").exists());
    }

    #[test]
    fn test_harvest_missing_artifact_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let ws = StagedWorkspace::create().unwrap();
        assert!(ws.harvest("ghost.so", tmp.path()).is_err());
    }

    #[test]
    fn test_workspace_deleted_on_drop() {
        let ws = StagedWorkspace::create().unwrap();
        let path = ws.path().to_path_buf();
        fs::write(path.join("intermediate.o"), "").unwrap();

        drop(ws);

        assert!(!path.exists());
    }
}
