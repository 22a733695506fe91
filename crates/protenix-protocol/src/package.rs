//! Packaging the prediction output directory as a gzipped tarball.

use flate2::write::GzEncoder;
use flate2::Compression;
use protenix_common::ProtenixError;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::Result;

/// Archive `src_dir` into `archive`, with entries rooted under the directory's own name.
pub fn archive_dir(src_dir: &Path, archive: &Path) -> Result<PathBuf> {
    let root = src_dir
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("output"));

    let encoder = GzEncoder::new(File::create(archive)?, Compression::default());
    let mut builder = tar::Builder::new(encoder);
    builder.append_dir_all(&root, src_dir)?;
    builder.into_inner()?.finish()?;

    Ok(archive.to_path_buf())
}

/// Async wrapper around [`archive_dir`]; the archiving runs on the blocking pool.
pub async fn package_output(src_dir: &Path, archive: &Path) -> Result<PathBuf> {
    info!("Packaging {:?} into {:?}", src_dir, archive);
    let (src, dest) = (src_dir.to_path_buf(), archive.to_path_buf());
    tokio::task::spawn_blocking(move || archive_dir(&src, &dest))
        .await
        .map_err(|e| ProtenixError::Pipeline(format!("packaging task failed: {}", e)))?
}
