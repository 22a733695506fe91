//! Structure source selection and the pre-run validation check.

use protenix_common::ProtenixError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::Result;

/// Which form field supplies the structure. Discriminants follow the host
/// form's enum indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Cif = 0,
    PdbFile = 1,
    #[default]
    PdbId = 2,
    Json = 3,
}

impl SourceKind {
    pub const ALL: [SourceKind; 4] = [
        SourceKind::Cif,
        SourceKind::PdbFile,
        SourceKind::PdbId,
        SourceKind::Json,
    ];

    /// Label shown on the form selector.
    pub fn label(&self) -> &'static str {
        match self {
            SourceKind::Cif => ".CIF",
            SourceKind::PdbFile => "PDB file",
            SourceKind::PdbId => "PDB ID",
            SourceKind::Json => ".JSON",
        }
    }

    /// Message reported when the field backing this source is empty.
    pub fn missing_message(&self) -> &'static str {
        match self {
            SourceKind::Cif => "CIF file must be provided.",
            SourceKind::PdbFile => "PDB file must be provided.",
            SourceKind::PdbId => "PDB ID must be provided.",
            SourceKind::Json => "JSON file must be provided.",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The raw protocol form: one selector plus one optional field per source.
/// Only the field matching `source` is read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProtocolForm {
    #[serde(default)]
    pub source: SourceKind,
    /// PDB ID, e.g. "7PZB" or "2HBS"
    pub pdb_id: Option<String>,
    pub cif_file: Option<PathBuf>,
    /// Form field `PDBfile`
    pub pdb_file: Option<PathBuf>,
    pub json_file: Option<PathBuf>,
}

/// A validated source: exactly one variant per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceSelection {
    AccessionId(String),
    CifFile(PathBuf),
    PdbFile(PathBuf),
    JsonFile(PathBuf),
}

impl SourceSelection {
    pub fn kind(&self) -> SourceKind {
        match self {
            SourceSelection::AccessionId(_) => SourceKind::PdbId,
            SourceSelection::CifFile(_) => SourceKind::Cif,
            SourceSelection::PdbFile(_) => SourceKind::PdbFile,
            SourceSelection::JsonFile(_) => SourceKind::Json,
        }
    }
}

impl ProtocolForm {
    pub fn accession(id: impl Into<String>) -> Self {
        Self {
            source: SourceKind::PdbId,
            pdb_id: Some(id.into()),
            ..Default::default()
        }
    }

    pub fn cif_file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: SourceKind::Cif,
            cif_file: Some(path.into()),
            ..Default::default()
        }
    }

    pub fn pdb_file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: SourceKind::PdbFile,
            pdb_file: Some(path.into()),
            ..Default::default()
        }
    }

    pub fn json_file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: SourceKind::Json,
            json_file: Some(path.into()),
            ..Default::default()
        }
    }

    /// Host-style validation: returns the list of error messages, empty when
    /// the form can run. At most one message is produced since only the
    /// selected field is checked.
    pub fn validate(&self) -> Vec<String> {
        match self.selected() {
            Some(SourceSelection::AccessionId(id)) if !is_file_safe_id(&id) => {
                vec![format!("PDB ID {:?} must not contain path separators.", id)]
            }
            Some(_) => Vec::new(),
            None => vec![self.source.missing_message().to_string()],
        }
    }

    /// Turns the form into a `SourceSelection`, or a `Validation` error.
    pub fn selection(&self) -> Result<SourceSelection> {
        let errors = self.validate();
        let selection = match self.selected() {
            Some(selection) if errors.is_empty() => selection,
            _ => return Err(ProtenixError::Validation(errors)),
        };

        if let SourceSelection::AccessionId(id) = &selection {
            if !is_conventional_pdb_id(id) {
                warn!(
                    "PDB ID {:?} is not 4 alphanumeric characters; requesting it anyway",
                    id
                );
            }
        }
        Ok(selection)
    }

    fn selected(&self) -> Option<SourceSelection> {
        match self.source {
            SourceKind::PdbId => self
                .pdb_id
                .as_deref()
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(|id| SourceSelection::AccessionId(id.to_string())),
            SourceKind::Cif => non_empty_path(&self.cif_file).map(SourceSelection::CifFile),
            SourceKind::PdbFile => non_empty_path(&self.pdb_file).map(SourceSelection::PdbFile),
            SourceKind::Json => non_empty_path(&self.json_file).map(SourceSelection::JsonFile),
        }
    }
}

fn non_empty_path(path: &Option<PathBuf>) -> Option<PathBuf> {
    path.as_deref()
        .filter(|p| *p != Path::new(""))
        .map(Path::to_path_buf)
}

/// The ID names the downloaded file, so it must stay a single path component.
pub fn is_file_safe_id(id: &str) -> bool {
    !id.contains(['/', '\\'])
}

/// PDB IDs are documented as 4 alphanumeric characters. Advisory only.
pub fn is_conventional_pdb_id(id: &str) -> bool {
    id.len() == 4 && id.chars().all(|c| c.is_ascii_alphanumeric())
}
