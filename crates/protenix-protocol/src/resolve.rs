//! Turning a `SourceSelection` into a local structure file.

use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::pdb::StructureFetcher;
use crate::source::SourceSelection;
use crate::Result;

pub struct SourceResolver {
    fetcher: StructureFetcher,
}

impl SourceResolver {
    pub fn new(fetcher: StructureFetcher) -> Self {
        Self { fetcher }
    }

    /// Accession IDs are downloaded; uploaded files pass through unchanged.
    pub async fn resolve(&self, selection: &SourceSelection) -> Result<PathBuf> {
        let path = match selection {
            SourceSelection::AccessionId(id) => self.fetcher.fetch_pdb(id).await?,
            SourceSelection::CifFile(path)
            | SourceSelection::PdbFile(path)
            | SourceSelection::JsonFile(path) => passthrough(path),
        };
        info!("Resolved {} source to {:?}", selection.kind(), path);
        Ok(path)
    }
}

fn passthrough(path: &Path) -> PathBuf {
    if !path.exists() {
        warn!("Uploaded file {:?} does not exist; passing it through", path);
    }
    path.to_path_buf()
}
