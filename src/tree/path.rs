//! Path canonicalization and name normalization

use crate::error::DagError;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

/// Canonicalize a path for filesystem access
///
/// The result keeps the on-disk bytes of every component. Names are only
/// NFC-normalized where they are compared, see `normalize_name`.
pub fn canonicalize_path(path: &Path) -> Result<PathBuf, DagError> {
    dunce::canonicalize(path).map_err(|e| {
        DagError::InvalidPath(format!("Failed to canonicalize {:?}: {}", path, e))
    })
}

/// NFC-normalized file name, used to order directory children
///
/// Platforms disagree on the normalization form they hand back from directory
/// listings, so ordering by the raw bytes would not be stable.
pub fn normalize_name(name: &OsStr) -> String {
    name.to_string_lossy().nfc().collect()
}
