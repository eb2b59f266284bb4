//! File and recursive directory deletion.

use std::fs;
use std::path::Path;

use crate::OperationError;
use crate::conflict::require_movable;
use crate::engine::Job;
use crate::listing::read_entries;

/// Delete one file (or symlink).
pub(crate) fn delete_file(job: &mut Job<'_>, path: &Path) -> Result<u64, OperationError> {
    require_movable(path)?;
    job.progress.set_current_file(Some(path.to_path_buf()));
    fs::remove_file(path).map_err(|e| OperationError::io(path, "Failed to delete", &e))?;

    job.progress.complete_file();
    job.notify();
    Ok(0)
}

/// Delete subdirectories, then files, then `dir` itself.
///
/// `dir` is left in place if anything below it could not be deleted.
pub(crate) fn delete_dir(job: &mut Job<'_>, dir: &Path) {
    let failures_before = job.outcome.failed;

    let (dirs, others) = match read_entries(dir) {
        Ok(entries) => entries,
        Err(err) => {
            job.outcome.record_failure(err);
            return;
        }
    };

    for entry in dirs {
        delete_dir(job, &entry.path);
    }
    for entry in others {
        let result = delete_file(job, &entry.path);
        job.record(result);
    }

    if job.outcome.failed > failures_before {
        return;
    }
    if let Err(e) = fs::remove_dir(dir) {
        job.outcome
            .record_failure(OperationError::io(dir, "Failed to remove directory", &e));
    }
}
