//! Structural serialization of node subtrees
//!
//! The byte stream feeds key derivation and storage. It is not meant to be
//! parsed back into a tree: directory boundaries are not encoded.

use crate::error::DagError;
use crate::tree::node::Node;

/// Serialize a subtree depth-first, pre-order
///
/// Files serialize to their payload; directories to the concatenation of their
/// children's serializations in stored order.
pub fn serialize(node: &Node) -> Result<Vec<u8>, DagError> {
    match node {
        Node::File(file) => Ok(file.bytes().to_vec()),
        Node::Directory(dir) => {
            let children = dir
                .children()
                .map(serialize)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(directory_bytes(&children))
        }
        Node::Symlink(_) => Err(DagError::UnsupportedNodeKind(node.kind())),
    }
}

/// Directory serialization from its children's already serialized bytes
pub fn directory_bytes<B: AsRef<[u8]>>(children: &[B]) -> Vec<u8> {
    let mut out = Vec::with_capacity(children.iter().map(|c| c.as_ref().len()).sum());
    for child in children {
        out.extend_from_slice(child.as_ref());
    }
    out
}
