//! File operations engine for vfm.
//!
//! This crate copies, moves and deletes single files and whole directory
//! trees. Every operation runs synchronously to completion and reports an
//! [`OperationOutcome`]; I/O failures never escape as errors. Progress is
//! pushed to a [`ProgressObserver`], which any `FnMut(&OperationProgress)`
//! closure implements.
//!
//! ```rust,no_run
//! use std::path::Path;
//! use vfm_ops::{MutationEngine, NoProgress};
//!
//! let engine = MutationEngine::new();
//! let outcome = engine.copy_or_move_directory(
//!     Path::new("/tmp/photos"),
//!     Path::new("/mnt/backup/photos"),
//!     false,
//!     &mut NoProgress,
//! );
//! if !outcome.succeeded {
//!     eprintln!("{}", outcome.message);
//! }
//! ```

mod conflict;
mod copy;
mod delete;
mod engine;
mod listing;
mod move_op;
mod operation;
mod outcome;
mod progress;

pub use conflict::Conflict;
pub use engine::{DEFAULT_BUFFER_SIZE, MutationEngine};
pub use operation::OperationError;
pub use outcome::OperationOutcome;
pub use progress::{NoProgress, OperationProgress, OperationType, ProgressObserver};

// Re-export the error taxonomy for convenience
pub use vfm_core::ErrorKind;
