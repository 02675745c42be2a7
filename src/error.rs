//! Error types for fastfile

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for fastfile operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for fastfile
#[derive(Error, Debug)]
pub enum Error {
    /// I/O errors (file system operations)
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// File not found, or path is not a regular file
    #[error("File not found: {path}")]
    NotFound { path: PathBuf },

    /// Permission denied
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Requested range extends past the end of the file
    #[error(
        "Range out of bounds for {path}: offset {offset} + length {length} exceeds file size {file_size}"
    )]
    OutOfRange {
        path: PathBuf,
        offset: u64,
        length: u64,
        file_size: u64,
    },

    /// The memory-mapping primitive itself failed after a valid open
    #[error("Mapping failed: {message}")]
    MappingFailed {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Classify a failed open/stat of `path` into the error taxonomy.
    pub fn open(path: &Path, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound {
                path: path.to_path_buf(),
            },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => Self::io(format!("opening {}", path.display()), source),
        }
    }

    /// Create a mapping error with context
    pub fn mapping(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::MappingFailed {
            message: message.into(),
            source,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Config {
            message: format!("TOML parse error: {}", err),
        }
    }
}
