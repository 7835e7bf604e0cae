//! Merkle DAG over node trees
//!
//! Serialization, key derivation and Merkle reduction for file and directory
//! nodes, plus the builder that ties them to a key-value store.

pub mod builder;
pub mod hasher;
pub mod key;
pub mod node;
pub mod path;
pub mod reducer;
pub mod serializer;
pub mod walker;
