//! Error types
//!
//! Defines domain-specific error types for each layer of the grid filesystem.

use std::fmt;
use std::io;

/// Metadata codec errors
#[derive(Debug)]
pub enum CodecError {
    Truncated { expected: usize, actual: usize },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::Truncated { expected, actual } => write!(
                f,
                "Truncated metadata record: expected {} bytes, got {}",
                expected, actual
            ),
        }
    }
}

impl std::error::Error for CodecError {}

/// External store errors
#[derive(Debug)]
pub enum StoreError {
    Unavailable(String),
    Corrupt { key: String, reason: CodecError },
    Unsupported(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable(msg) => write!(f, "Store unavailable: {}", msg),
            StoreError::Corrupt { key, reason } => {
                write!(f, "Corrupt record at {}: {}", key, reason)
            }
            StoreError::Unsupported(msg) => write!(f, "Unsupported store operation: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Corrupt { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

/// Hierarchy and facade errors
#[derive(Debug)]
pub enum GridError {
    MalformedPath(String),
    AncestorIsFile { path: String, ancestor: String },
    AncestorMissing { path: String, ancestor: String },
    AlreadyExists(String),
    Store(StoreError),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::MalformedPath(p) => write!(f, "Malformed path: {:?}", p),
            GridError::AncestorIsFile { path, ancestor } => write!(
                f,
                "Cannot create {} as component {} is a file",
                path, ancestor
            ),
            GridError::AncestorMissing { path, ancestor } => write!(
                f,
                "Cannot create {} as directory {} does not exist",
                path, ancestor
            ),
            GridError::AlreadyExists(p) => write!(f, "Already exists: {}", p),
            GridError::Store(e) => write!(f, "Store error: {}", e),
        }
    }
}

impl std::error::Error for GridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GridError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for GridError {
    fn from(error: StoreError) -> Self {
        GridError::Store(error)
    }
}

/// Front-end server errors
#[derive(Debug)]
pub enum ServerError {
    Config(config::ConfigError),
    IoError(io::Error),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::Config(e) => write!(f, "Configuration error: {}", e),
            ServerError::IoError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ServerError {}

impl From<config::ConfigError> for ServerError {
    fn from(error: config::ConfigError) -> Self {
        ServerError::Config(error)
    }
}

impl From<io::Error> for ServerError {
    fn from(error: io::Error) -> Self {
        ServerError::IoError(error)
    }
}
