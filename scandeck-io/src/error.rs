//! Error types for I/O operations

use thiserror::Error;

/// Errors that can occur while reading or writing scandeck files
#[derive(Error, Debug)]
pub enum IoError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },
    
    #[error("Timed out reading {path} after {millis} ms")]
    Timeout { path: String, millis: u64 },
    
    #[error("Parse error in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<IoError> for scandeck_core::Error {
    fn from(err: IoError) -> Self {
        let message = err.to_string();
        match err {
            IoError::Io(e) => scandeck_core::Error::Io(e),
            IoError::Timeout { path, millis } => scandeck_core::Error::Timeout { what: path, millis },
            IoError::Json { .. } => scandeck_core::Error::InvalidConfig(message),
            IoError::FileNotFound { .. } => scandeck_core::Error::InvalidData(message),
        }
    }
}
