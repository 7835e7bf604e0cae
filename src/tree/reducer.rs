//! Merkle reduction of ordered digest sequences
//!
//! Each pass pairs consecutive digests and replaces every pair `(a, b)` with
//! `hex(hash(a ++ b))`, where `a` and `b` are the hex texts and `++` is plain
//! concatenation. Odd-length levels duplicate their last digest before pairing.
//! Passes repeat until one digest remains.
//!
//! The framing (hex text, no separator, no length prefix) is fixed: changing it
//! changes every root digest.

use crate::error::DagError;
use crate::tree::hasher::HashProvider;
use crate::tree::node::Node;

/// Reduces digest sequences with a given hash provider
#[derive(Clone, Copy)]
pub struct MerkleReducer<'h> {
    hasher: &'h dyn HashProvider,
}

impl<'h> MerkleReducer<'h> {
    pub fn new(hasher: &'h dyn HashProvider) -> Self {
        Self { hasher }
    }

    /// Reduce an ordered sequence of hex digests to one root digest
    ///
    /// A single digest is returned unchanged. An empty sequence is an error.
    pub fn reduce<S: AsRef<str>>(&self, digests: &[S]) -> Result<String, DagError> {
        match digests {
            [] => return Err(DagError::EmptyInput),
            [single] => return Ok(single.as_ref().to_owned()),
            _ => {}
        }

        let mut level: Vec<String> = digests.iter().map(|d| d.as_ref().to_owned()).collect();
        while level.len() > 1 {
            level = self.reduce_pass(level);
        }

        level.pop().ok_or(DagError::EmptyInput)
    }

    /// Hash one pair: `hex(hash(left ++ right))`
    pub fn combine(&self, left: &str, right: &str) -> String {
        let mut framed = String::with_capacity(left.len() + right.len());
        framed.push_str(left);
        framed.push_str(right);
        self.hasher.digest_hex(framed.as_bytes())
    }

    fn reduce_pass(&self, mut level: Vec<String>) -> Vec<String> {
        if level.len() % 2 != 0 {
            if let Some(last) = level.last().cloned() {
                level.push(last);
            }
        }

        level
            .chunks_exact(2)
            .map(|pair| self.combine(&pair[0], &pair[1]))
            .collect()
    }

    /// Digest of a subtree
    ///
    /// Files digest their payload. Directories go through `directory_digest`.
    pub fn node_digest(&self, node: &Node) -> Result<String, DagError> {
        match node {
            Node::File(file) => Ok(self.hasher.digest_hex(file.bytes())),
            Node::Directory(dir) => {
                let child_digests = dir
                    .children()
                    .map(|child| self.node_digest(child))
                    .collect::<Result<Vec<_>, _>>()?;
                self.directory_digest(&child_digests)
            }
            Node::Symlink(_) => Err(DagError::UnsupportedNodeKind(node.kind())),
        }
    }

    /// Digest of a directory from its children's digests in stored order
    ///
    /// An empty directory digests the empty byte string.
    pub fn directory_digest<S: AsRef<str>>(&self, child_digests: &[S]) -> Result<String, DagError> {
        if child_digests.is_empty() {
            return Ok(self.hasher.digest_hex(&[]));
        }
        self.reduce(child_digests)
    }
}

/// Reduce an ordered sequence of hex digests with the given provider
pub fn reduce<S: AsRef<str>>(hasher: &dyn HashProvider, digests: &[S]) -> Result<String, DagError> {
    MerkleReducer::new(hasher).reduce(digests)
}
