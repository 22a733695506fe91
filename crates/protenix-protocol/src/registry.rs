//! Output registration: the host-side service that records a finished run's
//! artifact. Injected into the protocol so it never looks the host up itself.

use async_trait::async_trait;
use protenix_common::ProtenixError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tokio::fs;
use tracing::info;

use crate::Result;

/// Name the prediction output is registered under.
pub const OUTPUT_NAME: &str = "outputFile";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Directory,
    Archive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputArtifact {
    pub path: PathBuf,
    pub kind: ArtifactKind,
}

#[async_trait]
pub trait OutputRegistry: Send + Sync {
    async fn register(&self, name: &str, artifact: &OutputArtifact) -> Result<()>;
}

/// Keeps registrations in a JSON object file (name → artifact), rewriting it
/// on every registration.
pub struct JsonFileRegistry {
    path: PathBuf,
}

impl JsonFileRegistry {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<BTreeMap<String, OutputArtifact>> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl OutputRegistry for JsonFileRegistry {
    async fn register(&self, name: &str, artifact: &OutputArtifact) -> Result<()> {
        let mut outputs = self.load().await?;
        outputs.insert(name.to_string(), artifact.clone());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&outputs)?).await?;

        info!("Registered output {} -> {:?}", name, artifact.path);
        Ok(())
    }
}

/// In-process registry for embedding hosts and tests.
#[derive(Default)]
pub struct MemoryRegistry {
    entries: Mutex<Vec<(String, OutputArtifact)>>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(String, OutputArtifact)> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl OutputRegistry for MemoryRegistry {
    async fn register(&self, name: &str, artifact: &OutputArtifact) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| ProtenixError::Pipeline("output registry lock poisoned".to_string()))?;
        entries.push((name.to_string(), artifact.clone()));
        Ok(())
    }
}
