//! Per-run directory layout handed to the protocol by the host.

use protenix_common::ProtenixError;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::Result;

pub const EXTRA_DIR: &str = "extra";
pub const OUTPUT_DIR: &str = "protenix_output";
pub const ARCHIVE_NAME: &str = "protenix_output.tar.gz";
pub const REGISTRY_FILE: &str = "outputs.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunPaths {
    pub run_dir: PathBuf,
    /// Downloaded and staged input files
    pub extra_dir: PathBuf,
    /// Converted JSON and prediction results; cwd of both subprocesses
    pub output_dir: PathBuf,
}

impl RunPaths {
    /// Standard layout under `run_dir`. Paths are made absolute because the
    /// subprocesses run with `output_dir` as their working directory.
    pub fn new<P: AsRef<Path>>(run_dir: P) -> Result<Self> {
        let run_dir = absolutize(run_dir.as_ref())?;
        Ok(Self {
            extra_dir: run_dir.join(EXTRA_DIR),
            output_dir: run_dir.join(OUTPUT_DIR),
            run_dir,
        })
    }

    pub fn archive_path(&self) -> PathBuf {
        self.run_dir.join(ARCHIVE_NAME)
    }

    pub fn registry_path(&self) -> PathBuf {
        self.run_dir.join(REGISTRY_FILE)
    }

    /// Create the layout. `output_dir` must be empty: conversion picks up
    /// whatever JSON sits there, so results of an earlier run would be
    /// predicted in place of this run's input.
    pub async fn create_all(&self) -> Result<()> {
        fs::create_dir_all(&self.extra_dir).await?;
        fs::create_dir_all(&self.output_dir).await?;

        let mut entries = fs::read_dir(&self.output_dir).await?;
        if let Some(entry) = entries.next_entry().await? {
            return Err(ProtenixError::Pipeline(format!(
                "output directory {} already holds {:?} from an earlier run; use a new run directory",
                self.output_dir.display(),
                entry.file_name()
            )));
        }
        Ok(())
    }
}

/// Absolute form of `path` without touching the filesystem.
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    Ok(std::path::absolute(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_is_absolute() {
        let paths = RunPaths::new("runs/001").unwrap();
        assert!(paths.run_dir.is_absolute());
        assert!(paths.extra_dir.ends_with("runs/001/extra"));
        assert!(paths.output_dir.ends_with("runs/001/protenix_output"));
        assert!(paths.archive_path().ends_with("protenix_output.tar.gz"));
    }

    #[tokio::test]
    async fn test_create_all() {
        let dir = tempfile::tempdir().unwrap();
        let paths = RunPaths::new(dir.path().join("run")).unwrap();
        paths.create_all().await.unwrap();
        assert!(paths.extra_dir.is_dir());
        assert!(paths.output_dir.is_dir());

        // staged inputs may be overwritten, so a populated extra/ is fine
        std::fs::write(paths.extra_dir.join("7PZB.pdb"), "ATOM").unwrap();
        paths.create_all().await.unwrap();
    }

    #[tokio::test]
    async fn test_create_all_refuses_used_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let paths = RunPaths::new(dir.path().join("run")).unwrap();
        paths.create_all().await.unwrap();
        std::fs::write(paths.output_dir.join("1abc.json"), "[]").unwrap();

        let err = paths.create_all().await.unwrap_err();
        assert!(matches!(err, ProtenixError::Pipeline(ref m) if m.contains("1abc.json")));
    }
}
