//! Error types for the Merkle DAG.

use crate::tree::node::NodeKind;
use thiserror::Error;

/// Key-value store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Store backend error: {0}")]
    Backend(String),

    #[error("Store rejected write for key {key}: {reason}")]
    WriteRejected { key: String, reason: String },
}

impl From<sled::Error> for StoreError {
    fn from(err: sled::Error) -> Self {
        match err {
            sled::Error::Io(io) => StoreError::IoError(io),
            other => StoreError::Backend(other.to_string()),
        }
    }
}

/// DAG construction errors
#[derive(Debug, Error)]
pub enum DagError {
    #[error("Unsupported node kind: {0}")]
    UnsupportedNodeKind(NodeKind),

    #[error("Unknown node kind: {0}")]
    UnknownNodeKind(NodeKind),

    #[error("Store write failed: {0}")]
    StoreWriteFailure(#[from] StoreError),

    #[error("Merkle reduction requires at least one digest")]
    EmptyInput,

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<config::ConfigError> for DagError {
    fn from(err: config::ConfigError) -> Self {
        DagError::ConfigError(err.to_string())
    }
}
