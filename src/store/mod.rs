//! Key-value store abstraction
//!
//! The DAG only needs `put` and `get`. Durability and error semantics belong to
//! the implementation.

pub mod memory;
pub mod persistence;

pub use memory::MemoryStore;
pub use persistence::SledStore;

use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Key-value store interface
pub trait KvStore {
    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
}

/// Store backend selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    #[default]
    Sled,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Memory => f.write_str("memory"),
            StorageBackend::Sled => f.write_str("sled"),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Database directory (sled backend only)
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

fn default_store_path() -> PathBuf {
    PathBuf::from(".merkledag/store")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_store_path(),
        }
    }
}

/// Open the store described by `config`
pub fn open_store(config: &StorageConfig) -> Result<Box<dyn KvStore + Send + Sync>, StoreError> {
    match config.backend {
        StorageBackend::Memory => Ok(Box::new(MemoryStore::new())),
        StorageBackend::Sled => Ok(Box::new(SledStore::open(&config.path)?)),
    }
}
