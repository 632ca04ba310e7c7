//! Common error types for Log Pose

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for Log Pose operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across Log Pose crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error on a specific path
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML content could not be parsed into the expected shape
    #[error("YAML error in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn yaml(path: impl Into<PathBuf>, source: serde_yaml_ng::Error) -> Self {
        Error::Yaml {
            path: path.into(),
            source,
        }
    }

    /// True when the error means "the thing asked for does not exist"
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::NotFound(_) => true,
            Error::Io { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}
