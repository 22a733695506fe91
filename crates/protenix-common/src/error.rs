use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtenixError {
    #[error("Validation failed: {}", .0.join(" "))]
    Validation(Vec<String>),

    #[error("Failed to download PDB file for ID {id} (HTTP {status})")]
    RemoteFetch { id: String, status: u16 },

    #[error("Conversion error: {0}")]
    Conversion(String),

    #[error("{program} {subcommand} exited with {}: {stderr}", exit_label(.code))]
    ExternalProcess {
        program: String,
        subcommand: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Unsupported input file (expected .pdb, .cif or .json): {0}")]
    UnsupportedInput(PathBuf),

    #[error("Pipeline error: {0}")]
    Pipeline(String),

    #[error("Security error: {0}")]
    Security(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("status {c}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, ProtenixError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_joins_errors() {
        let err = ProtenixError::Validation(vec![
            "PDB ID must be provided.".to_string(),
        ]);
        assert_eq!(err.to_string(), "Validation failed: PDB ID must be provided.");
    }

    #[test]
    fn test_external_process_message_includes_stderr() {
        let err = ProtenixError::ExternalProcess {
            program: "protenix".to_string(),
            subcommand: "predict".to_string(),
            code: Some(2),
            stderr: "CUDA out of memory".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("protenix predict"));
        assert!(msg.contains("status 2"));
        assert!(msg.contains("CUDA out of memory"));
    }

    #[test]
    fn test_signal_exit_label() {
        let err = ProtenixError::ExternalProcess {
            program: "protenix".to_string(),
            subcommand: "tojson".to_string(),
            code: None,
            stderr: String::new(),
        };
        assert!(err.to_string().contains("terminated by signal"));
    }
}
