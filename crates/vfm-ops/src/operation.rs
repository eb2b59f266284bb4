//! Per-path error records.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use vfm_core::ErrorKind;

/// An error that occurred on one path during an operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationError {
    /// The path that caused the error.
    pub path: PathBuf,
    /// Classification of the failure.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
}

impl OperationError {
    /// Create a new operation error.
    pub fn new(path: impl Into<PathBuf>, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            message: message.into(),
        }
    }

    /// Wrap an I/O error, classifying it with [`ErrorKind::from_io`].
    pub fn io(path: impl Into<PathBuf>, context: &str, error: &std::io::Error) -> Self {
        Self::new(path, ErrorKind::from_io(error), format!("{context}: {error}"))
    }
}

impl std::fmt::Display for OperationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}
