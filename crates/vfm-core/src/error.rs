//! Error types shared by the scanner, the mutation engine and the settings layer.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classification of every failure the browser can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// The path string contains characters that are illegal in a path.
    PathInvalid,
    /// The resolved path does not exist.
    PathNotFound,
    /// The destination of a copy/move is already taken.
    DestinationAlreadyExists,
    /// The source of a copy/move/delete is missing or has the wrong type.
    SourceMissing,
    /// Permission, lock or device error.
    IoFailure,
    /// A directory could not be listed.
    EnumerationFailure,
}

impl ErrorKind {
    /// Classify an I/O error.
    pub fn from_io(error: &std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => Self::PathNotFound,
            std::io::ErrorKind::AlreadyExists => Self::DestinationAlreadyExists,
            std::io::ErrorKind::InvalidInput => Self::PathInvalid,
            _ => Self::IoFailure,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PathInvalid => write!(f, "Invalid path"),
            Self::PathNotFound => write!(f, "Path not found"),
            Self::DestinationAlreadyExists => write!(f, "Destination already exists"),
            Self::SourceMissing => write!(f, "Source is missing"),
            Self::IoFailure => write!(f, "I/O failure"),
            Self::EnumerationFailure => write!(f, "Directory could not be listed"),
        }
    }
}

/// Errors that abort a scan or listing before any line is produced.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Root path string is empty or contains illegal characters.
    #[error("Invalid path: {path:?}")]
    PathInvalid { path: String },

    /// Root path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Root path is not a directory.
    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },
}

impl ScanError {
    /// The taxonomy entry for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::PathInvalid { .. } => ErrorKind::PathInvalid,
            Self::NotFound { .. } | Self::NotADirectory { .. } => ErrorKind::PathNotFound,
        }
    }
}

/// Non-fatal problem met while scanning; the affected branch is skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanWarning {
    /// Path that could not be enumerated.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Always [`ErrorKind::EnumerationFailure`] for now.
    pub kind: ErrorKind,
}

impl ScanWarning {
    /// Create a warning for a directory that could not be listed.
    pub fn enumeration(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        Self {
            path: path.into(),
            message: format!("Cannot list directory: {error}"),
            kind: ErrorKind::EnumerationFailure,
        }
    }
}

impl std::fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}

/// Errors from loading or saving the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// No usable configuration directory on this platform.
    #[error("No configuration directory available")]
    NoConfigDir,

    /// Reading or writing the file failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for the settings schema.
    #[error("Malformed settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Settings could not be serialized.
    #[error("Cannot serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}
