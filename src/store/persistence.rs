//! Persistent store backed by sled

use crate::error::StoreError;
use crate::store::KvStore;
use std::path::Path;

/// Sled-based implementation of KvStore
pub struct SledStore {
    db: sled::Db,
}

impl SledStore {
    /// Open (or create) a sled database at the given directory
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = sled::open(path.as_ref()).map_err(|e| {
            StoreError::Backend(format!(
                "Failed to open sled database at {:?}: {}",
                path.as_ref(),
                e
            ))
        })?;
        Ok(Self { db })
    }

    /// Get the underlying sled database (for advanced operations)
    pub fn db(&self) -> &sled::Db {
        &self.db
    }

    /// Check if a key exists in the store
    pub fn contains(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.db.contains_key(key.as_bytes())?)
    }

    pub fn len(&self) -> usize {
        self.db.len()
    }

    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }

    /// Flush all pending writes to disk
    pub fn flush(&self) -> Result<(), StoreError> {
        self.db.flush()?;
        Ok(())
    }
}

impl KvStore for SledStore {
    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.db.insert(key.as_bytes(), value)?;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.db.get(key.as_bytes())?.map(|value| value.to_vec()))
    }
}
