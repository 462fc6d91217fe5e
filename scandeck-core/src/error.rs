//! Error types for scandeck

use thiserror::Error;

/// Main error type for scandeck operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    
    #[error("Invalid data: {0}")]
    InvalidData(String),
    
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    
    #[error("Timed out after {millis} ms: {what}")]
    Timeout { what: String, millis: u64 },
    
    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}

/// Result type alias for scandeck operations
pub type Result<T> = std::result::Result<T, Error>;
