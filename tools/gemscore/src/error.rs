//! Error types for reading rankings exports and tool configuration

use std::path::PathBuf;
use thiserror::Error;

/// Dataset and configuration error type
#[derive(Error, Debug)]
pub enum DatasetError {
    /// I/O error
    #[error("I/O error on '{path}': {source}")]
    Io {
        /// File being read or written
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File ended before all header rows were read
    #[error("Expected {expected} header rows, found {found}")]
    MissingHeader {
        /// Configured number of header rows
        expected: usize,
        /// Rows actually present
        found: usize,
    },

    /// A required column label is absent from the header
    #[error("Required column '{label}' not found in header")]
    MissingColumn {
        /// Header label that was searched for
        label: String,
    },

    /// Configuration file could not be parsed
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration parsed but holds an unusable value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DatasetError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DatasetError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for dataset operations
pub type Result<T> = std::result::Result<T, DatasetError>;
