//! Run configuration for the Protenix protocol.
//! Reads protenix.toml from the current directory or the path in PROTENIX_CONFIG.
//! A missing file is not an error: every field has a default that reproduces
//! the stock `protenix` invocation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{ProtenixError, Result};

pub const CONFIG_ENV_VAR: &str = "PROTENIX_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "protenix.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProtenixConfig {
    #[serde(default)]
    pub executable: ExecutableConfig,
    #[serde(default)]
    pub predict: PredictConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

// ── External program ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutableConfig {
    /// Program name or absolute path of the Protenix CLI.
    #[serde(default = "default_program")]
    pub path: PathBuf,

    /// Exported as CUDA_VISIBLE_DEVICES for both subcommands when set.
    #[serde(default)]
    pub gpu_id: Option<String>,
}

fn default_program() -> PathBuf { PathBuf::from("protenix") }

impl Default for ExecutableConfig {
    fn default() -> Self {
        Self {
            path: default_program(),
            gpu_id: None,
        }
    }
}

// ── Prediction flags ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictConfig {
    #[serde(default = "default_seeds")]
    pub seeds: Vec<u32>,

    #[serde(default = "default_true")]
    pub use_msa_server: bool,
}

fn default_seeds() -> Vec<u32> { vec![101] }
fn default_true() -> bool { true }

impl Default for PredictConfig {
    fn default() -> Self {
        Self {
            seeds: default_seeds(),
            use_msa_server: true,
        }
    }
}

impl PredictConfig {
    /// Seeds rendered the way `protenix predict --seeds` expects them.
    pub fn seeds_arg(&self) -> String {
        self.seeds
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}

// ── Remote fetch ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_rcsb_base_url")]
    pub rcsb_base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_rcsb_base_url() -> String { "https://files.rcsb.org".to_string() }
fn default_timeout_secs() -> u64 { 30 }

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            rcsb_base_url: default_rcsb_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

// ── Output ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Archive the output directory as protenix_output.tar.gz and register
    /// the archive instead of the directory.
    #[serde(default)]
    pub package: bool,
}

// ── Loading ───────────────────────────────────────────────────────────────────

impl ProtenixConfig {
    /// Load configuration.
    /// Checks PROTENIX_CONFIG env var first, then protenix.toml in the current directory.
    pub fn load() -> Result<Self> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) => Self::from_file(&path),
            Err(_) if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE),
            Err(_) => {
                debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                Ok(Self::default())
            }
        }
    }

    /// Load from an explicit TOML file. The file must exist.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ProtenixError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ProtenixError::Config(e.to_string()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
