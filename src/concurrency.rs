//! Serialized access for concurrent adds
//!
//! The builder itself holds no locks. `SharedDag` wraps a store with a single
//! write lock so that adds issued from several threads never interleave their
//! writes. Clones share the store and the lock.

use crate::error::DagError;
use crate::store::KvStore;
use crate::tree::builder::DagBuilder;
use crate::tree::hasher::HashAlgorithm;
use crate::tree::node::Node;
use parking_lot::Mutex;
use std::sync::Arc;

/// A store shared between threads, with one writer at a time
pub struct SharedDag<S: KvStore + Send + Sync + ?Sized> {
    store: Arc<S>,
    write_lock: Arc<Mutex<()>>,
    algorithm: HashAlgorithm,
}

impl<S: KvStore + Send + Sync + ?Sized> SharedDag<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
            algorithm: HashAlgorithm::default(),
        }
    }

    pub fn with_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Add `node` while holding the write lock for the whole traversal
    pub fn add(&self, node: &Node) -> Result<String, DagError> {
        let _guard = self.write_lock.lock();
        DagBuilder::new(self.store.as_ref())
            .with_algorithm(self.algorithm)
            .add(node)
    }

    /// Root digest without writing; takes no lock
    pub fn root_digest(&self, node: &Node) -> Result<String, DagError> {
        DagBuilder::new(self.store.as_ref())
            .with_algorithm(self.algorithm)
            .root_digest(node)
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }
}

impl<S: KvStore + Send + Sync + ?Sized> Clone for SharedDag<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            write_lock: Arc::clone(&self.write_lock),
            algorithm: self.algorithm,
        }
    }
}
