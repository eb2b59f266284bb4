//! File move: rename first, copy and delete when rename is refused.

use std::fs;
use std::path::Path;

use crate::OperationError;
use crate::conflict::{require_movable, require_vacant};
use crate::copy::{create_parent, stream};
use crate::engine::Job;

/// Move one file. `dst` must not exist; its parent is created.
pub(crate) fn move_file(job: &mut Job<'_>, src: &Path, dst: &Path) -> Result<u64, OperationError> {
    let size = require_movable(src)?;
    require_vacant(dst)?;
    create_parent(dst)?;

    job.progress.set_current_file(Some(src.to_path_buf()));
    match fs::rename(src, dst) {
        Ok(()) => job.progress.add_bytes(size),
        Err(err) => {
            tracing::debug!(
                src = %src.display(),
                dst = %dst.display(),
                "Rename failed ({err}), copying instead"
            );
            stream(job, src, dst)?;
            fs::remove_file(src)
                .map_err(|e| OperationError::io(src, "Copied but could not remove source", &e))?;
        }
    }

    job.progress.complete_file();
    job.notify();
    Ok(size)
}
