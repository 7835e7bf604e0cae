//! Configuration System
//!
//! Layered configuration for the hash algorithm, the store backend, the
//! filesystem loader and logging. Sources, lowest precedence first: built-in
//! defaults, the global config file, the workspace `config/` files, then
//! `MERKLEDAG__*` environment variables.

use crate::error::DagError;
use crate::logging::LoggingConfig;
use crate::store::{StorageBackend, StorageConfig};
use crate::tree::hasher::HashAlgorithm;
use crate::tree::walker::WalkerConfig;
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DagConfig {
    #[serde(default)]
    pub hash: HashConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub walker: WalkerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Hash provider selection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HashConfig {
    #[serde(default)]
    pub algorithm: HashAlgorithm,
}

impl DagConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), DagError> {
        let mut errors = Vec::new();

        if self.storage.backend == StorageBackend::Sled && self.storage.path.as_os_str().is_empty() {
            errors.push("storage.path cannot be empty for the sled backend".to_string());
        }

        if self.walker.ignore_patterns.iter().any(|p| p.is_empty()) {
            errors.push("walker.ignore_patterns cannot contain empty patterns".to_string());
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            errors.push(format!(
                "logging.format must be 'text' or 'json', got '{}'",
                self.logging.format
            ));
        }

        if let Err(e) = crate::logging::parse_output(&self.logging.output) {
            errors.push(format!("logging.output: {}", e));
        }

        if let Err(e) = crate::logging::parse_level(&self.logging.level) {
            errors.push(format!("logging.level: {}", e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(DagError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                errors.join("\n")
            )))
        }
    }
}
