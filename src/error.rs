//! Error types for hexspot.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HexspotError>;

#[derive(Debug, Error)]
pub enum HexspotError {
    /// A run parameter is out of range (e.g. a non-positive hex radius).
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Unsupported coordinate reference '{crs}' in {}", path.display())]
    UnsupportedCrs { path: PathBuf, crs: String },

    /// No usable point survived loading. Terminal for a run.
    #[error("No point data found. Checked: {checked:?}")]
    NoPoints { checked: Vec<PathBuf> },

    #[error("Serialization error: {0}")]
    SerializationErrorWithContext(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl HexspotError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }
}
