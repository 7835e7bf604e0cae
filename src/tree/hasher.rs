//! Hash providers for content digests
//!
//! SHA-256 is the default because root digests must match other
//! implementations bit-for-bit. BLAKE3 is available for stores that only ever
//! talk to themselves.

use crate::types::Hash;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// A 256-bit digest function
pub trait HashProvider: Send + Sync {
    /// Which algorithm this provider implements
    fn algorithm(&self) -> HashAlgorithm;

    /// Digest arbitrary bytes
    fn digest(&self, data: &[u8]) -> Hash;

    /// Digest arbitrary bytes and render as lowercase hex
    fn digest_hex(&self, data: &[u8]) -> String {
        hex::encode(self.digest(data))
    }
}

/// SHA-256 provider
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Provider;

impl HashProvider for Sha256Provider {
    fn algorithm(&self) -> HashAlgorithm {
        HashAlgorithm::Sha256
    }

    fn digest(&self, data: &[u8]) -> Hash {
        let output = Sha256::digest(data);
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&output);
        hash
    }
}

/// BLAKE3 provider
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3Provider;

impl HashProvider for Blake3Provider {
    fn algorithm(&self) -> HashAlgorithm {
        HashAlgorithm::Blake3
    }

    fn digest(&self, data: &[u8]) -> Hash {
        *blake3::hash(data).as_bytes()
    }
}

/// Hash algorithm selector (configuration-facing)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Blake3,
}

impl HashAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Blake3 => "blake3",
        }
    }

    /// Build a provider for this algorithm
    pub fn provider(self) -> Box<dyn HashProvider> {
        match self {
            HashAlgorithm::Sha256 => Box::new(Sha256Provider),
            HashAlgorithm::Blake3 => Box::new(Blake3Provider),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
