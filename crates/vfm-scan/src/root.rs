//! Root validation shared by the tree scanner and the file lister.

use std::path::{Path, PathBuf};

use vfm_core::{ScanError, is_path_valid, normalize_volume_root};

/// Validate a scan root and return its normalized form.
///
/// This is the only place a scan can abort; everything below the root is
/// best effort.
pub(crate) fn resolve_root(root: &Path) -> Result<PathBuf, ScanError> {
    let raw = root.to_string_lossy();
    if !is_path_valid(&raw) {
        return Err(ScanError::PathInvalid {
            path: raw.into_owned(),
        });
    }

    let normalized = PathBuf::from(normalize_volume_root(&raw));
    match std::fs::metadata(&normalized) {
        Ok(meta) if meta.is_dir() => Ok(normalized),
        Ok(_) => Err(ScanError::NotADirectory { path: normalized }),
        Err(_) => Err(ScanError::NotFound { path: normalized }),
    }
}
