//! protenix-common — Shared error type, run configuration and the sandboxed
//! HTTP client used by the Protenix protocol crates.

pub mod config;
pub mod error;
pub mod sandbox;

// Re-export commonly used types
pub use config::{ExecutableConfig, FetchConfig, OutputConfig, PredictConfig, ProtenixConfig};
pub use error::{ProtenixError, Result};
