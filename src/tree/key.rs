//! Storage key derivation
//!
//! File keys embed the payload directly: `file_` + hex(bytes).
//! Directory keys hash the concatenation of their children's keys:
//! `dir_` + hex(hash(key_1 ++ key_2 ++ ...)). Child keys carry the arity and
//! nesting of the subtree, which the padded Merkle digest does not.

use crate::error::DagError;
use crate::tree::hasher::HashProvider;
use crate::tree::node::{FileNode, Node};
use crate::types::StorageKey;

pub const FILE_KEY_PREFIX: &str = "file_";
pub const DIR_KEY_PREFIX: &str = "dir_";

/// Key for a file node
pub fn file_key(file: &FileNode) -> StorageKey {
    StorageKey::from_parts(FILE_KEY_PREFIX, &hex::encode(file.bytes()))
}

/// Key for a directory whose children's keys are already known
pub fn directory_key<K: AsRef<str>>(child_keys: &[K], hasher: &dyn HashProvider) -> StorageKey {
    let mut joined = String::with_capacity(child_keys.iter().map(|k| k.as_ref().len()).sum());
    for key in child_keys {
        joined.push_str(key.as_ref());
    }
    StorageKey::from_parts(DIR_KEY_PREFIX, &hasher.digest_hex(joined.as_bytes()))
}

/// Derive the storage key for any node
///
/// Directory keys require every child key, so this walks the directory.
pub fn derive_key(node: &Node, hasher: &dyn HashProvider) -> Result<StorageKey, DagError> {
    match node {
        Node::File(file) => Ok(file_key(file)),
        Node::Directory(dir) => {
            let child_keys = dir
                .children()
                .map(|child| derive_key(child, hasher))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(directory_key(&child_keys, hasher))
        }
        Node::Symlink(_) => Err(DagError::UnknownNodeKind(node.kind())),
    }
}
