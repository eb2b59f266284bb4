//! Precondition checks run before any byte is written.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use vfm_core::ErrorKind;

use crate::OperationError;

/// A reason an operation refuses to start.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Conflict {
    /// Source is absent or of the wrong type.
    #[error("Source is missing: {}", .0.display())]
    SourceMissing(PathBuf),

    /// Something already exists at the destination.
    #[error("Destination already exists: {}", .0.display())]
    DestinationExists(PathBuf),

    /// Target directory lies inside the source directory.
    #[error("Cannot copy or move {} into itself ({})", .src.display(), .dst.display())]
    DestinationInsideSource { src: PathBuf, dst: PathBuf },

    /// Path to delete does not exist.
    #[error("Path not found: {}", .0.display())]
    NotFound(PathBuf),
}

impl Conflict {
    /// The taxonomy entry for this conflict.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SourceMissing(_) => ErrorKind::SourceMissing,
            Self::DestinationExists(_) => ErrorKind::DestinationAlreadyExists,
            Self::DestinationInsideSource { .. } => ErrorKind::IoFailure,
            Self::NotFound(_) => ErrorKind::PathNotFound,
        }
    }

    fn path(&self) -> &Path {
        match self {
            Self::SourceMissing(path) | Self::DestinationExists(path) | Self::NotFound(path) => path,
            Self::DestinationInsideSource { src, .. } => src,
        }
    }
}

impl From<Conflict> for OperationError {
    fn from(conflict: Conflict) -> Self {
        OperationError::new(conflict.path().to_path_buf(), conflict.kind(), conflict.to_string())
    }
}

/// Whether anything, including a dangling symlink, sits at `path`.
pub(crate) fn occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// `src` must be an existing regular file (symlinks to files count).
pub(crate) fn require_file(src: &Path) -> Result<u64, Conflict> {
    match fs::metadata(src) {
        Ok(meta) if meta.is_file() => Ok(meta.len()),
        _ => Err(Conflict::SourceMissing(src.to_path_buf())),
    }
}

/// `src` must be something other than a directory; the link itself is enough.
pub(crate) fn require_movable(src: &Path) -> Result<u64, Conflict> {
    match fs::symlink_metadata(src) {
        Ok(meta) if !meta.is_dir() => Ok(meta.len()),
        _ => Err(Conflict::SourceMissing(src.to_path_buf())),
    }
}

/// `src` must be an existing directory.
pub(crate) fn require_dir(src: &Path) -> Result<(), Conflict> {
    match fs::symlink_metadata(src) {
        Ok(meta) if meta.is_dir() => Ok(()),
        _ => Err(Conflict::SourceMissing(src.to_path_buf())),
    }
}

/// `dst` must be free.
pub(crate) fn require_vacant(dst: &Path) -> Result<(), Conflict> {
    if occupied(dst) {
        Err(Conflict::DestinationExists(dst.to_path_buf()))
    } else {
        Ok(())
    }
}

/// `dst` must not be `src` or lie below it.
pub(crate) fn require_outside(src: &Path, dst: &Path) -> Result<(), Conflict> {
    let src = resolve_lenient(src);
    let dst = resolve_lenient(dst);
    if dst.starts_with(&src) {
        Err(Conflict::DestinationInsideSource { src, dst })
    } else {
        Ok(())
    }
}

/// Canonicalize the longest existing ancestor of `path` and re-append the rest.
fn resolve_lenient(path: &Path) -> PathBuf {
    let mut existing = path;
    let mut rest = Vec::new();
    loop {
        if let Ok(canonical) = existing.canonicalize() {
            return rest.iter().rev().fold(canonical, |acc, part| acc.join(part));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                rest.push(name.to_os_string());
                existing = parent;
            }
            _ => return path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_destination_inside_source() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        fs::create_dir(&src).unwrap();

        let err = require_outside(&src, &src.join("nested").join("deeper")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IoFailure);
        assert!(require_outside(&src, &src).is_err());
        assert!(require_outside(&src, &temp.path().join("srcs")).is_ok());
    }

    #[test]
    fn test_relative_components_are_resolved() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("a");
        fs::create_dir(&src).unwrap();

        let sneaky = temp.path().join("a").join("..").join("a").join("inner");
        assert!(require_outside(&src, &sneaky).is_err());
    }

    #[test]
    fn test_source_checks() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("f");
        fs::write(&file, "abc").unwrap();

        assert_eq!(require_file(&file), Ok(3));
        assert!(require_dir(&file).is_err());
        assert!(require_dir(temp.path()).is_ok());
        assert_eq!(
            require_file(&temp.path().join("missing")).unwrap_err().kind(),
            ErrorKind::SourceMissing
        );
    }

    #[test]
    fn test_conflict_into_operation_error() {
        let err: OperationError = Conflict::DestinationExists(PathBuf::from("/x")).into();
        assert_eq!(err.kind, ErrorKind::DestinationAlreadyExists);
        assert_eq!(err.path, PathBuf::from("/x"));
    }
}
