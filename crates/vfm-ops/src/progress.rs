//! Progress reporting types for file operations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The type of operation being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationType {
    Copy,
    Move,
    Delete,
}

impl OperationType {
    /// Past-tense verb used in summaries.
    pub fn past_tense(self) -> &'static str {
        match self {
            Self::Copy => "Copied",
            Self::Move => "Moved",
            Self::Delete => "Deleted",
        }
    }
}

impl std::fmt::Display for OperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Copy => write!(f, "Copy"),
            Self::Move => write!(f, "Move"),
            Self::Delete => write!(f, "Delete"),
        }
    }
}

/// Progress information for an ongoing operation.
#[derive(Debug, Clone)]
pub struct OperationProgress {
    /// The type of operation.
    pub operation_type: OperationType,
    /// Number of files completed.
    pub files_completed: usize,
    /// Total number of files to process.
    pub files_total: usize,
    /// Number of bytes processed so far.
    pub bytes_processed: u64,
    /// Total bytes to process (0 if unknown).
    pub bytes_total: u64,
    /// The file currently being processed.
    pub current_file: Option<PathBuf>,
}

impl OperationProgress {
    /// Create a new progress tracker for an operation.
    pub fn new(operation_type: OperationType, files_total: usize, bytes_total: u64) -> Self {
        Self {
            operation_type,
            files_completed: 0,
            files_total,
            bytes_processed: 0,
            bytes_total,
            current_file: None,
        }
    }

    /// Get the progress as a percentage (0.0 to 100.0).
    pub fn percentage(&self) -> f64 {
        let ratio = if self.bytes_total > 0 {
            self.bytes_processed as f64 / self.bytes_total as f64
        } else if self.files_total > 0 {
            self.files_completed as f64 / self.files_total as f64
        } else {
            0.0
        };
        (ratio * 100.0).min(100.0)
    }

    /// Update the current file being processed.
    pub fn set_current_file(&mut self, path: Option<PathBuf>) {
        self.current_file = path;
    }

    /// Add bytes streamed for the current file.
    pub fn add_bytes(&mut self, bytes: u64) {
        self.bytes_processed += bytes;
    }

    /// Increment the completed count.
    pub fn complete_file(&mut self) {
        self.files_completed += 1;
    }
}

/// Receives progress updates while an operation runs.
pub trait ProgressObserver {
    /// Called after every chunk and every completed file.
    fn update(&mut self, progress: &OperationProgress);
}

impl<F> ProgressObserver for F
where
    F: FnMut(&OperationProgress),
{
    fn update(&mut self, progress: &OperationProgress) {
        self(progress)
    }
}

/// Observer that ignores every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn update(&mut self, _progress: &OperationProgress) {}
}
