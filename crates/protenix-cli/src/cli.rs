//! Command-line form for the protocol.

use clap::{Args, Parser, Subcommand, ValueEnum};
use protenix_protocol::{ProtocolForm, SourceKind};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "protenix-em", version, about = "Run the Protenix structure prediction protocol")]
pub struct Cli {
    /// TOML config file (defaults to $PROTENIX_CONFIG, then ./protenix.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the input, run protenix and register the output
    Run(RunArgs),
    /// Only check that the selected source has a value
    Validate(FormArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceArg {
    Cif,
    PdbFile,
    PdbId,
    Json,
}

impl From<SourceArg> for SourceKind {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Cif => SourceKind::Cif,
            SourceArg::PdbFile => SourceKind::PdbFile,
            SourceArg::PdbId => SourceKind::PdbId,
            SourceArg::Json => SourceKind::Json,
        }
    }
}

#[derive(Args, Debug)]
pub struct FormArgs {
    /// Upload structure to predict
    #[arg(long, value_enum, default_value_t = SourceArg::PdbId)]
    pub source: SourceArg,

    /// PDB ID (4 alphanumeric characters, e.g. 7PZB); see https://www.rcsb.org/
    #[arg(long)]
    pub pdb_id: Option<String>,

    /// mmCIF structure file (.cif)
    #[arg(long)]
    pub cif_file: Option<PathBuf>,

    /// PDB structure file (.pdb)
    #[arg(long)]
    pub pdb_file: Option<PathBuf>,

    /// Protenix / AlphaFold3-style input file (.json)
    #[arg(long)]
    pub json_file: Option<PathBuf>,
}

impl FormArgs {
    pub fn to_form(&self) -> ProtocolForm {
        ProtocolForm {
            source: self.source.into(),
            pdb_id: self.pdb_id.clone(),
            cif_file: self.cif_file.clone(),
            pdb_file: self.pdb_file.clone(),
            json_file: self.json_file.clone(),
        }
    }
}

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub form: FormArgs,

    /// Directory holding extra/, protenix_output/ and outputs.json
    #[arg(long, default_value = "protenix_run")]
    pub run_dir: PathBuf,

    /// Path to the protenix executable
    #[arg(long)]
    pub protenix: Option<PathBuf>,

    /// GPU to expose through CUDA_VISIBLE_DEVICES
    #[arg(long)]
    pub gpu: Option<String>,

    /// Archive the output directory as protenix_output.tar.gz
    #[arg(long)]
    pub package: bool,
}
