//! Error types for tfvars generation

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for generator operations
pub type Result<T> = std::result::Result<T, TfvarsError>;

/// Every way a run can fail. All of them are fatal.
#[derive(Error, Debug)]
pub enum TfvarsError {
    /// Required environment variable is not set
    #[error("Required environment variable '{name}' is not set.")]
    MissingVariable { name: String },

    /// CORAX_NODES is not a valid node list
    #[error("Failed to parse {name} JSON: {source}")]
    MalformedInput {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// Neither the key file nor USER_PUBLIC_KEY provided a key
    #[error("Could not find public key at {} and USER_PUBLIC_KEY env var is not set.", display_path(.path))]
    MissingPublicKey { path: Option<PathBuf> },

    /// A value rendered unquoted is not a number
    #[error("Environment variable '{name}' must be numeric, got '{value}'")]
    InvalidNumber { name: String, value: String },

    /// Role filter matched nothing and the all-nodes fallback is disabled
    #[error("No nodes with '{role}' role found in CORAX_NODES")]
    NoBrokers { role: String },

    /// Configuration file could not be read or parsed
    #[error("Invalid configuration {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    /// Filesystem failure while reading the key or writing output
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TfvarsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

fn display_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => p.display().to_string(),
        None => "~/.ssh/id_rsa_corax.pub (HOME not set)".to_string(),
    }
}
