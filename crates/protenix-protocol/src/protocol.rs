//! Orchestrator for one Protenix protocol run.
//!
//! `Idle → SourceResolved → (Converted) → Predicted → OutputRegistered`,
//! or `Failed` on the first download, conversion or subprocess error.
//! A failed run is not resumed; build a new protocol and start from `Idle`.

use protenix_common::{ProtenixConfig, ProtenixError};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

use crate::command::ProtenixCommand;
use crate::convert::{InputFormat, ToJsonConverter};
use crate::package::package_output;
use crate::paths::RunPaths;
use crate::pdb::StructureFetcher;
use crate::predict::PredictRunner;
use crate::registry::{ArtifactKind, OutputArtifact, OutputRegistry, OUTPUT_NAME};
use crate::resolve::SourceResolver;
use crate::source::{ProtocolForm, SourceKind, SourceSelection};
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Idle,
    SourceResolved,
    Converted,
    Predicted,
    OutputRegistered,
    Failed,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RunState::Idle => "idle",
            RunState::SourceResolved => "source_resolved",
            RunState::Converted => "converted",
            RunState::Predicted => "predicted",
            RunState::OutputRegistered => "output_registered",
            RunState::Failed => "failed",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub source: SourceKind,
    /// Structure file after download / upload pass-through
    pub input_path: PathBuf,
    /// JSON document handed to `protenix predict`
    pub prediction_input: PathBuf,
    pub converted: bool,
    pub artifact: OutputArtifact,
    pub state: RunState,
    pub elapsed_ms: u64,
}

pub struct ProtenixProtocol {
    config: ProtenixConfig,
    paths: RunPaths,
    registry: Arc<dyn OutputRegistry>,
    state: RunState,
}

impl ProtenixProtocol {
    pub fn new(config: ProtenixConfig, paths: RunPaths, registry: Arc<dyn OutputRegistry>) -> Self {
        Self {
            config,
            paths,
            registry,
            state: RunState::Idle,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn paths(&self) -> &RunPaths {
        &self.paths
    }

    /// Execute the protocol for `form`.
    ///
    /// Validation runs first and leaves the protocol `Idle` on failure; every
    /// later error moves it to `Failed`.
    pub async fn run(&mut self, form: &ProtocolForm) -> Result<RunReport> {
        if self.state != RunState::Idle {
            return Err(ProtenixError::Pipeline(format!(
                "protocol already ran (state: {}); start a new run",
                self.state
            )));
        }

        let selection = form.selection()?;
        info!("Running Protenix protocol with {} source", selection.kind());

        let start = Instant::now();
        match self.execute(&selection, start).await {
            Ok(report) => Ok(report),
            Err(e) => {
                error!("Protenix protocol failed after {}: {}", self.state, e);
                self.state = RunState::Failed;
                Err(e)
            }
        }
    }

    async fn execute(&mut self, selection: &SourceSelection, start: Instant) -> Result<RunReport> {
        self.paths.create_all().await?;
        let command = ProtenixCommand::from_config(&self.config.executable);

        let fetcher = StructureFetcher::new(&self.config.fetch, &self.paths.extra_dir)?;
        let input_path = SourceResolver::new(fetcher).resolve(selection).await?;
        self.advance(RunState::SourceResolved);

        let converted = needs_conversion(selection, &input_path)?;
        let prediction_input = if converted {
            let json = ToJsonConverter::new(command.clone())
                .convert(&input_path, &self.paths.output_dir)
                .await?;
            self.advance(RunState::Converted);
            json
        } else {
            input_path.clone()
        };

        PredictRunner::new(command, self.config.predict.clone())
            .run(&prediction_input, &self.paths.output_dir)
            .await?;
        self.advance(RunState::Predicted);

        let artifact = if self.config.output.package {
            OutputArtifact {
                path: package_output(&self.paths.output_dir, &self.paths.archive_path()).await?,
                kind: ArtifactKind::Archive,
            }
        } else {
            OutputArtifact {
                path: self.paths.output_dir.clone(),
                kind: ArtifactKind::Directory,
            }
        };
        self.registry.register(OUTPUT_NAME, &artifact).await?;
        self.advance(RunState::OutputRegistered);

        let elapsed_ms = start.elapsed().as_millis() as u64;
        info!("Protenix protocol finished in {}ms, output {:?}", elapsed_ms, artifact.path);

        Ok(RunReport {
            source: selection.kind(),
            input_path,
            prediction_input,
            converted,
            artifact,
            state: self.state,
            elapsed_ms,
        })
    }

    fn advance(&mut self, next: RunState) {
        debug!("Protocol state {} -> {}", self.state, next);
        self.state = next;
    }

    pub fn is_finished(&self) -> bool {
        self.state == RunState::OutputRegistered
    }

    pub fn summary(&self) -> Vec<String> {
        if self.is_finished() {
            vec!["Protenix has processed the input and generated the output file.".to_string()]
        } else {
            Vec::new()
        }
    }

    pub fn methods(&self) -> Vec<String> {
        if self.is_finished() {
            vec!["Protenix was run with the specified input and generated the output file.".to_string()]
        } else {
            Vec::new()
        }
    }
}

/// Downloads are always PDB and JSON uploads are already the tool's input;
/// only structure uploads are dispatched on their extension.
fn needs_conversion(selection: &SourceSelection, input_path: &Path) -> Result<bool> {
    match selection {
        SourceSelection::AccessionId(_) => Ok(true),
        SourceSelection::JsonFile(_) => Ok(false),
        SourceSelection::CifFile(_) | SourceSelection::PdbFile(_) => InputFormat::from_path(input_path)
            .map(|format| format.needs_conversion())
            .ok_or_else(|| ProtenixError::UnsupportedInput(input_path.to_path_buf())),
    }
}
