//! PDB / mmCIF to Protenix JSON conversion via `protenix tojson`.

use protenix_common::ProtenixError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument};

use crate::command::ProtenixCommand;
use crate::paths::absolutize;
use crate::Result;

/// Input file formats the protocol accepts, keyed on extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Pdb,
    Cif,
    Json,
}

impl InputFormat {
    /// Extension match is case-insensitive.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdb" => Some(InputFormat::Pdb),
            "cif" => Some(InputFormat::Cif),
            "json" => Some(InputFormat::Json),
            _ => None,
        }
    }

    pub fn needs_conversion(&self) -> bool {
        !matches!(self, InputFormat::Json)
    }
}

pub struct ToJsonConverter {
    command: ProtenixCommand,
}

impl ToJsonConverter {
    pub fn new(command: ProtenixCommand) -> Self {
        Self { command }
    }

    pub fn arguments(&self, input: &Path, out_dir: &Path) -> Result<Vec<OsString>> {
        Ok(vec![
            "--input".into(),
            absolutize(input)?.into_os_string(),
            "--out_dir".into(),
            out_dir.as_os_str().to_owned(),
        ])
    }

    /// Run `tojson` into `out_dir` and return the generated JSON file.
    #[instrument(skip(self))]
    pub async fn convert(&self, input: &Path, out_dir: &Path) -> Result<PathBuf> {
        info!("Converting {:?} to Protenix JSON", input);
        let args = self.arguments(input, out_dir)?;
        debug!("tojson args: {:?}", args);

        self.command.run("tojson", &args, out_dir).await?;

        let json = find_json_file(out_dir, input).await?;
        debug!("tojson produced {:?}", json);
        Ok(json)
    }
}

/// The JSON `tojson` wrote for `input`: `<stem>.json` when present,
/// otherwise the first `.json` file in `dir` by file name order.
pub async fn find_json_file(dir: &Path, input: &Path) -> Result<PathBuf> {
    if let Some(stem) = input.file_stem() {
        let mut name = stem.to_os_string();
        name.push(".json");
        let expected = dir.join(name);
        if fs::metadata(&expected).await.map(|m| m.is_file()).unwrap_or(false) {
            return Ok(expected);
        }
    }

    let mut candidates = Vec::new();
    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if entry.file_type().await?.is_file() && InputFormat::from_path(&path) == Some(InputFormat::Json) {
            candidates.push(path);
        }
    }

    candidates.sort();
    candidates.into_iter().next().ok_or_else(|| {
        ProtenixError::Conversion(format!(
            "No JSON file found in {}",
            dir.display()
        ))
    })
}
