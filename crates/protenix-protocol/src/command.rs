//! Launching the `protenix` CLI.

use protenix_common::{ExecutableConfig, ProtenixError};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Output;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::Result;

/// Wrapper for `protenix <subcommand>` execution. Every invocation drops
/// PYTHONPATH from the child environment and pins CUDA_VISIBLE_DEVICES when
/// a GPU is configured.
#[derive(Debug, Clone)]
pub struct ProtenixCommand {
    program: PathBuf,
    gpu_id: Option<String>,
}

impl ProtenixCommand {
    pub fn new<P: AsRef<Path>>(program: P) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            gpu_id: None,
        }
    }

    pub fn from_config(config: &ExecutableConfig) -> Self {
        Self::new(&config.path).with_gpu(config.gpu_id.clone())
    }

    pub fn with_gpu(mut self, gpu_id: Option<String>) -> Self {
        self.gpu_id = gpu_id;
        self
    }

    /// Build the command without running it.
    pub fn command<I, S>(&self, subcommand: &str, args: I, cwd: &Path) -> Command
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = Command::new(&self.program);
        cmd.arg(subcommand)
            .args(args)
            .current_dir(cwd)
            .env_remove("PYTHONPATH");
        if let Some(gpu) = &self.gpu_id {
            cmd.env("CUDA_VISIBLE_DEVICES", gpu);
        }
        cmd
    }

    /// Run to completion, capturing output. A non-zero exit becomes
    /// `ExternalProcess` carrying the tool's stderr.
    pub async fn run<I, S>(&self, subcommand: &str, args: I, cwd: &Path) -> Result<Output>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = self.command(subcommand, args, cwd);
        info!("Running {:?} in {:?}", cmd.as_std(), cwd);

        let output = cmd.output().await.map_err(|e| {
            ProtenixError::Pipeline(format!(
                "failed to launch {} {}: {}",
                self.program.display(),
                subcommand,
                e
            ))
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            debug!("protenix {} stdout:\n{}", subcommand, stdout.trim_end());
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim_end().to_string();
            warn!("protenix {} failed ({}): {}", subcommand, output.status, stderr);
            return Err(ProtenixError::ExternalProcess {
                program: self.program.display().to_string(),
                subcommand: subcommand.to_string(),
                code: output.status.code(),
                stderr,
            });
        }

        Ok(output)
    }
}
