//! Configuration for the protenix-em binary.
//! File config (see `ProtenixConfig::load`) with command-line overrides on top.

use protenix_common::ProtenixConfig;
use std::path::Path;

use crate::cli::RunArgs;


/// Load the file config: an explicit `--config` must exist, otherwise
/// PROTENIX_CONFIG / ./protenix.toml / defaults.
pub fn load(path: Option<&Path>) -> anyhow::Result<ProtenixConfig> {
    let config = match path {
        Some(p) => ProtenixConfig::from_file(p)?,
        None => ProtenixConfig::load()?,
    };
    Ok(config)
}

/// Apply `run` flags over the file config.
pub fn apply_overrides(mut config: ProtenixConfig, args: &RunArgs) -> ProtenixConfig {
    if let Some(ref program) = args.protenix {
        config.executable.path = program.clone();
    }
    if let Some(ref gpu) = args.gpu {
        config.executable.gpu_id = Some(gpu.clone());
    }
    if args.package {
        config.output.package = true;
    }
    config
}
