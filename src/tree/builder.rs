//! DAG builder: stores every subtree and returns the committed root digest

use crate::error::DagError;
use crate::store::KvStore;
use crate::tree::hasher::{HashAlgorithm, HashProvider};
use crate::tree::key;
use crate::tree::node::Node;
use crate::tree::reducer::MerkleReducer;
use crate::tree::serializer;
use crate::types::StorageKey;
use std::time::Instant;
use tracing::{debug, info, instrument, trace};

/// A subtree whose bytes, digest and key are computed but not yet written
#[derive(Debug)]
struct StagedNode {
    key: StorageKey,
    bytes: Vec<u8>,
    digest: String,
    children: Vec<StagedNode>,
}

impl StagedNode {
    fn count(&self) -> usize {
        1 + self.children.iter().map(StagedNode::count).sum::<usize>()
    }
}

/// Builds Merkle DAGs into a key-value store
///
/// `add` runs in two passes. The staging pass computes every subtree's
/// serialized bytes, digest and key without touching the store, so an
/// unsupported node anywhere in the tree fails before the first write. The
/// write pass then puts each subtree in depth-first pre-order and stops at the
/// first store error; entries written before it are left in place.
pub struct DagBuilder<'s, S: KvStore + ?Sized> {
    store: &'s S,
    hasher: Box<dyn HashProvider>,
}

impl<'s, S: KvStore + ?Sized> DagBuilder<'s, S> {
    /// Create a builder writing to `store` with SHA-256
    pub fn new(store: &'s S) -> Self {
        Self {
            store,
            hasher: HashAlgorithm::default().provider(),
        }
    }

    pub fn with_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.hasher = algorithm.provider();
        self
    }

    pub fn with_hasher(mut self, hasher: Box<dyn HashProvider>) -> Self {
        self.hasher = hasher;
        self
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.hasher.algorithm()
    }

    /// Store `node` and all of its descendants, returning the root digest hex
    #[instrument(skip(self, node), fields(kind = %node.kind(), algorithm = %self.hasher.algorithm()))]
    pub fn add(&self, node: &Node) -> Result<String, DagError> {
        let start = Instant::now();

        let staged = self.stage(node)?;
        let entry_count = staged.count();
        debug!(entry_count, "Staged subtree");

        self.write(&staged)?;

        info!(
            root = %staged.digest,
            entries_written = entry_count,
            duration_ms = start.elapsed().as_millis(),
            "DAG add completed"
        );

        Ok(staged.digest)
    }

    /// Compute the root digest `add` would return, without writing
    pub fn root_digest(&self, node: &Node) -> Result<String, DagError> {
        self.reducer().node_digest(node)
    }

    fn reducer(&self) -> MerkleReducer<'_> {
        MerkleReducer::new(self.hasher.as_ref())
    }

    fn stage(&self, node: &Node) -> Result<StagedNode, DagError> {
        match node {
            Node::File(file) => Ok(StagedNode {
                key: key::file_key(file),
                bytes: file.bytes().to_vec(),
                digest: self.hasher.digest_hex(file.bytes()),
                children: Vec::new(),
            }),
            Node::Directory(dir) => {
                let children = dir
                    .children()
                    .map(|child| self.stage(child))
                    .collect::<Result<Vec<_>, _>>()?;

                let child_digests: Vec<&str> = children.iter().map(|c| c.digest.as_str()).collect();
                let child_keys: Vec<&StorageKey> = children.iter().map(|c| &c.key).collect();
                let child_bytes: Vec<&[u8]> = children.iter().map(|c| c.bytes.as_slice()).collect();

                Ok(StagedNode {
                    key: key::directory_key(&child_keys, self.hasher.as_ref()),
                    bytes: serializer::directory_bytes(&child_bytes),
                    digest: self.reducer().directory_digest(&child_digests)?,
                    children,
                })
            }
            Node::Symlink(_) => Err(DagError::UnsupportedNodeKind(node.kind())),
        }
    }

    fn write(&self, staged: &StagedNode) -> Result<(), DagError> {
        self.store.put(staged.key.as_str(), &staged.bytes)?;
        trace!(key = %staged.key, size = staged.bytes.len(), "Stored subtree");

        for child in &staged.children {
            self.write(child)?;
        }
        Ok(())
    }
}

/// Store `node` into `store` with SHA-256 and return the root digest hex
pub fn add<S: KvStore + ?Sized>(store: &S, node: &Node) -> Result<String, DagError> {
    DagBuilder::new(store).add(node)
}
