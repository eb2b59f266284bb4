//! The public entry points of the mutation engine.

use std::fs;
use std::path::Path;

use crate::conflict::{Conflict, require_dir, require_outside};
use crate::listing::calculate_dir_totals;
use crate::{
    OperationError, OperationOutcome, OperationProgress, OperationType, ProgressObserver, copy,
    delete, move_op,
};

/// Default size of the copy buffer.
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// State threaded through one operation.
pub(crate) struct Job<'a> {
    pub buffer: Vec<u8>,
    pub progress: OperationProgress,
    pub outcome: OperationOutcome,
    observer: &'a mut dyn ProgressObserver,
}

impl Job<'_> {
    /// Push the current progress to the observer.
    pub fn notify(&mut self) {
        self.observer.update(&self.progress);
    }

    /// Record the result of one item.
    pub fn record(&mut self, result: Result<u64, OperationError>) {
        match result {
            Ok(bytes) => self.outcome.record_success(bytes),
            Err(err) => self.outcome.record_failure(err),
        }
    }

    fn finish(self) -> OperationOutcome {
        let outcome = self.outcome.finish();
        if outcome.succeeded {
            tracing::info!(operation = %outcome.kind, "{}", outcome.message);
        } else {
            tracing::warn!(
                operation = %outcome.kind,
                failed = outcome.failed,
                "{}",
                outcome.message
            );
        }
        outcome
    }
}

/// Copies, moves and deletes files and directory trees.
///
/// No method returns an error: every failure ends up in the returned
/// [`OperationOutcome`]. Nothing is transactional; a failed directory
/// operation leaves whatever was already done in place.
#[derive(Debug, Clone)]
pub struct MutationEngine {
    buffer_size: usize,
}

impl Default for MutationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MutationEngine {
    /// Create an engine with the default buffer size.
    pub fn new() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    /// Create an engine that copies through a buffer of `size` bytes.
    pub fn with_buffer_size(size: usize) -> Self {
        Self {
            buffer_size: size.max(1),
        }
    }

    /// Size of the copy buffer.
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    fn job<'a>(
        &self,
        kind: OperationType,
        files_total: usize,
        bytes_total: u64,
        observer: &'a mut dyn ProgressObserver,
    ) -> Job<'a> {
        Job {
            buffer: vec![0; self.buffer_size],
            progress: OperationProgress::new(kind, files_total, bytes_total),
            outcome: OperationOutcome::new(kind),
            observer,
        }
    }

    /// Copy a single file to `dst`, which must not exist.
    pub fn copy_file(
        &self,
        src: &Path,
        dst: &Path,
        observer: &mut dyn ProgressObserver,
    ) -> OperationOutcome {
        let size = fs::metadata(src).map(|m| m.len()).unwrap_or(0);
        let mut job = self.job(OperationType::Copy, 1, size, observer);
        let result = copy::copy_file(&mut job, src, dst);
        job.record(result);
        job.finish()
    }

    /// Move a single file to `dst`, which must not exist.
    pub fn move_file(
        &self,
        src: &Path,
        dst: &Path,
        observer: &mut dyn ProgressObserver,
    ) -> OperationOutcome {
        let size = fs::symlink_metadata(src).map(|m| m.len()).unwrap_or(0);
        let mut job = self.job(OperationType::Move, 1, size, observer);
        let result = move_op::move_file(&mut job, src, dst);
        job.record(result);
        job.finish()
    }

    /// Delete a single file.
    pub fn delete_file(&self, path: &Path, observer: &mut dyn ProgressObserver) -> OperationOutcome {
        let mut job = self.job(OperationType::Delete, 1, 0, observer);
        let result = delete::delete_file(&mut job, path);
        job.record(result);
        job.finish()
    }

    /// Copy (or move, when `is_move`) the directory `src` to `dst`.
    ///
    /// `dst` is the new directory itself, not its parent. It must not be
    /// `src` or lie inside it.
    pub fn copy_or_move_directory(
        &self,
        src: &Path,
        dst: &Path,
        is_move: bool,
        observer: &mut dyn ProgressObserver,
    ) -> OperationOutcome {
        let kind = if is_move {
            OperationType::Move
        } else {
            OperationType::Copy
        };

        if let Err(conflict) = require_dir(src).and_then(|()| require_outside(src, dst)) {
            return OperationOutcome::rejected(kind, conflict);
        }

        let (files_total, bytes_total) = calculate_dir_totals(src);
        let mut job = self.job(kind, files_total, bytes_total, observer);
        copy::transfer_dir(&mut job, src, dst, is_move);
        job.finish()
    }

    /// Delete the directory `path` and everything below it.
    pub fn delete_directory(
        &self,
        path: &Path,
        observer: &mut dyn ProgressObserver,
    ) -> OperationOutcome {
        match fs::symlink_metadata(path) {
            Err(_) => {
                return OperationOutcome::rejected(
                    OperationType::Delete,
                    Conflict::NotFound(path.to_path_buf()),
                );
            }
            Ok(meta) if !meta.is_dir() => {
                return OperationOutcome::rejected(
                    OperationType::Delete,
                    Conflict::SourceMissing(path.to_path_buf()),
                );
            }
            Ok(_) => {}
        }

        let (files_total, _) = calculate_dir_totals(path);
        let mut job = self.job(OperationType::Delete, files_total, 0, observer);
        delete::delete_dir(&mut job, path);
        job.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NoProgress;
    use tempfile::TempDir;
    use vfm_core::ErrorKind;

    #[test]
    fn test_copy_file_streams_in_chunks() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src.bin");
        let dst = temp.path().join("out").join("dst.bin");
        let data: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
        fs::write(&src, &data).unwrap();

        let mut updates = 0;
        let engine = MutationEngine::with_buffer_size(1024);
        let outcome = engine.copy_file(&src, &dst, &mut |_: &OperationProgress| updates += 1);

        assert!(outcome.succeeded, "{}", outcome.message);
        assert_eq!(fs::read(&dst).unwrap(), data);
        assert!(updates >= 10);
        assert_eq!(outcome.bytes_processed, 10_000);
    }

    #[test]
    fn test_copy_file_refuses_existing_destination() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("a");
        let dst = temp.path().join("b");
        fs::write(&src, "new").unwrap();
        fs::write(&dst, "old").unwrap();

        let outcome = MutationEngine::new().copy_file(&src, &dst, &mut NoProgress);
        assert!(!outcome.succeeded);
        assert_eq!(outcome.error_kind, Some(ErrorKind::DestinationAlreadyExists));
        assert_eq!(fs::read_to_string(&dst).unwrap(), "old");
    }

    #[test]
    fn test_copy_missing_source() {
        let temp = TempDir::new().unwrap();
        let outcome = MutationEngine::new().copy_file(
            &temp.path().join("missing"),
            &temp.path().join("dst"),
            &mut NoProgress,
        );
        assert_eq!(outcome.error_kind, Some(ErrorKind::SourceMissing));
        assert!(!temp.path().join("dst").exists());
    }

    #[test]
    fn test_copy_directory_as_file_is_rejected() {
        let temp = TempDir::new().unwrap();
        let outcome = MutationEngine::new().copy_file(
            temp.path(),
            &temp.path().join("dst"),
            &mut NoProgress,
        );
        assert_eq!(outcome.error_kind, Some(ErrorKind::SourceMissing));
    }

    #[test]
    fn test_delete_file_missing() {
        let temp = TempDir::new().unwrap();
        let outcome =
            MutationEngine::new().delete_file(&temp.path().join("missing"), &mut NoProgress);
        assert!(!outcome.succeeded);
        assert_eq!(outcome.error_kind, Some(ErrorKind::SourceMissing));
    }

    #[test]
    fn test_directory_into_itself_is_rejected() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("tree");
        fs::create_dir(&src).unwrap();
        fs::write(src.join("f"), "x").unwrap();

        let outcome = MutationEngine::new().copy_or_move_directory(
            &src,
            &src.join("tree"),
            false,
            &mut NoProgress,
        );
        assert!(!outcome.succeeded);
        assert_eq!(outcome.error_kind, Some(ErrorKind::IoFailure));
        assert!(!src.join("tree").exists());
    }

    #[test]
    fn test_delete_directory_on_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("f");
        fs::write(&file, "x").unwrap();

        let outcome = MutationEngine::new().delete_directory(&file, &mut NoProgress);
        assert_eq!(outcome.error_kind, Some(ErrorKind::SourceMissing));
        assert!(file.exists());
    }

    #[test]
    fn test_zero_buffer_size_is_clamped() {
        assert_eq!(MutationEngine::with_buffer_size(0).buffer_size(), 1);
    }
}
