//! Merkledag: content-addressed Merkle DAGs over a pluggable key-value store
//!
//! Files and directories are stored as addressable blobs, and a single root
//! digest commits to the entire tree's content and structure.
//!
//! ```
//! use merkledag::{add, MemoryStore, Node};
//!
//! let store = MemoryStore::new();
//! let tree = Node::directory(vec![Node::file(b"A".to_vec()), Node::file(b"B".to_vec())]);
//! let root = add(&store, &tree).unwrap();
//! assert_eq!(root.len(), 64);
//! assert_eq!(store.len(), 3);
//! ```

pub mod concurrency;
pub mod config;
pub mod error;
pub mod logging;
pub mod store;
pub mod tree;
pub mod types;

pub use concurrency::SharedDag;
pub use error::{DagError, StoreError};
pub use store::{open_store, KvStore, MemoryStore, SledStore};
pub use tree::builder::{add, DagBuilder};
pub use tree::hasher::{HashAlgorithm, HashProvider};
pub use tree::node::{DirectoryNode, FileNode, Node, NodeKind};
pub use tree::reducer::{reduce, MerkleReducer};
pub use types::{Hash, StorageKey};
