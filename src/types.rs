//! Core types for the Merkle DAG.

use std::fmt;

/// Hash: raw 256-bit digest produced by a hash provider
pub type Hash = [u8; 32];

/// StorageKey: the key under which a node's serialized bytes live in the store
///
/// Derived from a node's kind and content, so identical content always maps to
/// the same key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    pub(crate) fn from_parts(prefix: &str, body: &str) -> Self {
        let mut key = String::with_capacity(prefix.len() + body.len());
        key.push_str(prefix);
        key.push_str(body);
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StorageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
