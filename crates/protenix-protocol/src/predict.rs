//! Structure prediction with `protenix predict`.

use protenix_common::PredictConfig;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

use crate::command::ProtenixCommand;
use crate::paths::absolutize;
use crate::Result;

pub struct PredictRunner {
    command: ProtenixCommand,
    config: PredictConfig,
}

impl PredictRunner {
    pub fn new(command: ProtenixCommand, config: PredictConfig) -> Self {
        Self { command, config }
    }

    pub fn arguments(&self, input: &Path, out_dir: &Path) -> Result<Vec<OsString>> {
        let mut args: Vec<OsString> = vec![
            "--input".into(),
            absolutize(input)?.into_os_string(),
            "--out_dir".into(),
            out_dir.as_os_str().to_owned(),
            "--seeds".into(),
            self.config.seeds_arg().into(),
        ];
        if self.config.use_msa_server {
            args.push("--use_msa_server".into());
        }
        Ok(args)
    }

    /// Run the prediction once. Results land in `out_dir`, which is returned.
    #[instrument(skip(self))]
    pub async fn run(&self, input: &Path, out_dir: &Path) -> Result<PathBuf> {
        info!("Running Protenix prediction on {:?}", input);
        let args = self.arguments(input, out_dir)?;

        self.command.run("predict", &args, out_dir).await?;

        debug!("Protenix prediction completed. Output in {:?}", out_dir);
        Ok(out_dir.to_path_buf())
    }
}
