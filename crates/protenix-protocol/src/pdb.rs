//! PDB structure fetching from the RCSB file server.

use protenix_common::sandbox::SandboxClient as Client;
use protenix_common::{FetchConfig, ProtenixError};
use reqwest::StatusCode;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::{debug, info, instrument};

use crate::source::is_file_safe_id;
use crate::Result;

/// Client for downloading PDB entries into a run's staging directory.
pub struct StructureFetcher {
    client: Client,
    base_url: String,
    dest_dir: PathBuf,
}

impl StructureFetcher {
    /// Create a fetcher writing into `dest_dir`. The configured base URL's
    /// host is added to the sandbox allowlist.
    pub fn new<P: AsRef<Path>>(config: &FetchConfig, dest_dir: P) -> Result<Self> {
        let mut client = Client::with_timeout(Duration::from_secs(config.timeout_secs))?;
        client.allow_url_host(&config.rcsb_base_url)?;

        Ok(Self {
            client,
            base_url: config.rcsb_base_url.trim_end_matches('/').to_string(),
            dest_dir: dest_dir.as_ref().to_path_buf(),
        })
    }

    pub fn download_url(&self, pdb_id: &str) -> String {
        format!("{}/download/{}.pdb", self.base_url, pdb_id)
    }

    /// Fetch a PDB file by its ID into `<dest_dir>/<id>.pdb`.
    /// Anything but HTTP 200 is a `RemoteFetch` error and nothing is written.
    #[instrument(skip(self))]
    pub async fn fetch_pdb(&self, pdb_id: &str) -> Result<PathBuf> {
        if !is_file_safe_id(pdb_id) {
            return Err(ProtenixError::Validation(vec![format!(
                "PDB ID {:?} must not contain path separators.",
                pdb_id
            )]));
        }
        let url = self.download_url(pdb_id);
        info!("Fetching PDB {} from {}", pdb_id, url);

        let response = self.client.get(&url)?.send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(ProtenixError::RemoteFetch {
                id: pdb_id.to_string(),
                status: status.as_u16(),
            });
        }
        let content = response.bytes().await?;

        fs::create_dir_all(&self.dest_dir).await?;
        let file_path = self.dest_dir.join(format!("{}.pdb", pdb_id));
        fs::write(&file_path, &content).await?;

        debug!("Wrote {} bytes to {:?}", content.len(), file_path);
        Ok(file_path)
    }
}
