//! Filesystem loader: builds a node tree from a path on disk

use crate::error::DagError;
use crate::tree::node::Node;
use crate::tree::path;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, trace};
use walkdir::{DirEntry, WalkDir};

/// Filesystem walker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkerConfig {
    /// Whether to follow symbolic links (default: false for determinism)
    #[serde(default)]
    pub follow_symlinks: bool,
    /// Keep unfollowed links as symlink nodes instead of skipping them
    #[serde(default)]
    pub record_symlinks: bool,
    /// Path components to skip (e.g., ".git", "target", "node_modules")
    #[serde(default = "default_ignore_patterns")]
    pub ignore_patterns: Vec<String>,
    /// Maximum depth to traverse (None = unlimited)
    #[serde(default)]
    pub max_depth: Option<usize>,
}

fn default_ignore_patterns() -> Vec<String> {
    vec![
        ".git".to_string(),
        "target".to_string(),
        "node_modules".to_string(),
    ]
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            record_symlinks: false,
            ignore_patterns: default_ignore_patterns(),
            max_depth: None,
        }
    }
}

/// Filesystem walker
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given root path
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            config: WalkerConfig::default(),
        }
    }

    /// Create a walker with custom configuration
    pub fn with_config(root: impl Into<PathBuf>, config: WalkerConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Load the tree rooted at this walker's path
    ///
    /// Directory children are ordered by NFC-normalized name. A regular file
    /// root yields a single file node.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn load(&self) -> Result<Node, DagError> {
        let root = path::canonicalize_path(&self.root)?;

        if fs::metadata(&root)?.is_file() {
            return Ok(Node::file(fs::read(&root)?));
        }

        let walker = WalkDir::new(&root)
            .follow_links(self.config.follow_symlinks)
            .max_depth(self.config.max_depth.unwrap_or(usize::MAX))
            .sort_by(|a, b| path::normalize_name(a.file_name()).cmp(&path::normalize_name(b.file_name())));

        // One open frame per directory on the current path; frame i holds the
        // children collected so far for the directory at depth i.
        let mut frames: Vec<Vec<Node>> = Vec::new();
        let mut file_count = 0usize;

        for entry in walker
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !self.should_ignore(e))
        {
            let entry = entry.map_err(|e| {
                DagError::IoError(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    format!("Failed to walk directory: {}", e),
                ))
            })?;

            while frames.len() > entry.depth() {
                close_frame(&mut frames);
            }

            let file_type = entry.file_type();
            if file_type.is_dir() {
                frames.push(Vec::new());
            } else if file_type.is_file() {
                trace!(path = %entry.path().display(), "Reading file");
                let bytes = fs::read(entry.path())?;
                push_child(&mut frames, Node::file(bytes), entry.path())?;
                file_count += 1;
            } else if file_type.is_symlink() && self.config.record_symlinks {
                let target = fs::read_link(entry.path())?;
                push_child(&mut frames, Node::symlink(target), entry.path())?;
            }
        }

        while frames.len() > 1 {
            close_frame(&mut frames);
        }

        let children = frames
            .pop()
            .ok_or_else(|| DagError::InvalidPath(format!("Nothing to load at {:?}", root)))?;
        debug!(file_count, "Loaded tree from filesystem");
        Ok(Node::directory(children))
    }

    /// Check if an entry should be ignored based on ignore patterns
    fn should_ignore(&self, entry: &DirEntry) -> bool {
        let name = path::normalize_name(entry.file_name());
        self.config
            .ignore_patterns
            .iter()
            .any(|pattern| pattern.as_str() == name)
    }
}

fn close_frame(frames: &mut Vec<Vec<Node>>) {
    if let Some(children) = frames.pop() {
        if let Some(parent) = frames.last_mut() {
            parent.push(Node::directory(children));
        } else {
            frames.push(children);
        }
    }
}

fn push_child(frames: &mut [Vec<Node>], node: Node, path: &Path) -> Result<(), DagError> {
    frames
        .last_mut()
        .map(|frame| frame.push(node))
        .ok_or_else(|| DagError::InvalidPath(format!("Entry outside of root: {:?}", path)))
}
