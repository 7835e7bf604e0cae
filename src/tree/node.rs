//! Node types for the tree being committed

use std::fmt;
use std::path::{Path, PathBuf};

/// Node kind discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    File,
    Directory,
    Symlink,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::File => "file",
            NodeKind::Directory => "directory",
            NodeKind::Symlink => "symlink",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File node: an immutable byte payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    bytes: Vec<u8>,
}

impl FileNode {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Directory node: an ordered collection of children
///
/// Child order is part of the committed content; reordering children changes
/// the directory's digest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryNode {
    children: Vec<Node>,
}

impl DirectoryNode {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }

    /// Append a child, consuming the directory (construction only)
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Iterate children in stored order
    ///
    /// Each call starts a fresh pass over the same children.
    pub fn children(&self) -> std::slice::Iter<'_, Node> {
        self.children.iter()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Aggregate byte count of every file payload beneath this directory
    ///
    /// A coarse fingerprint only. Storage keys never depend on it.
    pub fn size(&self) -> u64 {
        self.children.iter().map(Node::content_size).sum()
    }
}

/// Symbolic link recorded by the filesystem loader
///
/// The DAG does not commit links; serialization and key derivation reject them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymlinkNode {
    target: PathBuf,
}

impl SymlinkNode {
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
        }
    }

    pub fn target(&self) -> &Path {
        &self.target
    }
}

/// Tree node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    File(FileNode),
    Directory(DirectoryNode),
    Symlink(SymlinkNode),
}

impl Node {
    pub fn file(bytes: impl Into<Vec<u8>>) -> Self {
        Node::File(FileNode::new(bytes))
    }

    pub fn directory(children: Vec<Node>) -> Self {
        Node::Directory(DirectoryNode::new(children))
    }

    pub fn symlink(target: impl Into<PathBuf>) -> Self {
        Node::Symlink(SymlinkNode::new(target))
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::File(_) => NodeKind::File,
            Node::Directory(_) => NodeKind::Directory,
            Node::Symlink(_) => NodeKind::Symlink,
        }
    }

    pub fn as_file(&self) -> Option<&FileNode> {
        match self {
            Node::File(file) => Some(file),
            _ => None,
        }
    }

    pub fn as_directory(&self) -> Option<&DirectoryNode> {
        match self {
            Node::Directory(dir) => Some(dir),
            _ => None,
        }
    }

    fn content_size(&self) -> u64 {
        match self {
            Node::File(file) => file.len() as u64,
            Node::Directory(dir) => dir.size(),
            Node::Symlink(_) => 0,
        }
    }
}

impl From<FileNode> for Node {
    fn from(file: FileNode) -> Self {
        Node::File(file)
    }
}

impl From<DirectoryNode> for Node {
    fn from(dir: DirectoryNode) -> Self {
        Node::Directory(dir)
    }
}
