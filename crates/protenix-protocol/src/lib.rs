//! Protenix Protocol - structure prediction through the external `protenix` CLI.
//!
//! One protocol run walks these steps in order:
//! 1. Validating the form and picking the structure source
//! 2. Resolving it to a local file (RCSB download or uploaded file)
//! 3. Converting PDB / mmCIF input with `protenix tojson`
//! 4. Running `protenix predict`
//! 5. Registering (and optionally packaging) the output directory

pub mod command;
pub mod convert;
pub mod package;
pub mod paths;
pub mod pdb;
pub mod predict;
pub mod protocol;
pub mod registry;
pub mod resolve;
pub mod source;

pub use paths::RunPaths;
pub use protocol::{ProtenixProtocol, RunReport, RunState};
pub use registry::{ArtifactKind, JsonFileRegistry, MemoryRegistry, OutputArtifact, OutputRegistry};
pub use source::{ProtocolForm, SourceKind, SourceSelection};

pub type Result<T> = protenix_common::Result<T>;
