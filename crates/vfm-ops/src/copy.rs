//! Streaming file copy and recursive directory transfer.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::Path;

use crate::OperationError;
use crate::conflict::{require_file, require_vacant};
use crate::engine::Job;
use crate::listing::read_entries;
use crate::move_op::move_file;

/// Copy one file. `dst` must not exist; its parent is created.
pub(crate) fn copy_file(job: &mut Job<'_>, src: &Path, dst: &Path) -> Result<u64, OperationError> {
    require_file(src)?;
    require_vacant(dst)?;
    create_parent(dst)?;

    job.progress.set_current_file(Some(src.to_path_buf()));
    let bytes = stream(job, src, dst)?;
    job.progress.complete_file();
    job.notify();
    Ok(bytes)
}

/// Recreate the symlink `src` at `dst` without following it.
pub(crate) fn copy_link(job: &mut Job<'_>, src: &Path, dst: &Path) -> Result<u64, OperationError> {
    require_vacant(dst)?;
    create_parent(dst)?;

    job.progress.set_current_file(Some(src.to_path_buf()));
    let target =
        fs::read_link(src).map_err(|e| OperationError::io(src, "Failed to read link", &e))?;
    make_link(&target, dst).map_err(|e| OperationError::io(dst, "Failed to create link", &e))?;

    job.progress.complete_file();
    job.notify();
    Ok(0)
}

#[cfg(unix)]
fn make_link(target: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, dst)
}

#[cfg(windows)]
fn make_link(target: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(target, dst)
}

#[cfg(not(any(unix, windows)))]
fn make_link(_target: &Path, _dst: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "symlinks are not supported on this platform",
    ))
}

/// Create the parent directories of `path`.
pub(crate) fn create_parent(path: &Path) -> Result<(), OperationError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
            .map_err(|e| OperationError::io(parent, "Failed to create directory", &e)),
        _ => Ok(()),
    }
}

/// Stream `src` into a new file at `dst`.
///
/// A partially written destination is removed before the error is returned.
pub(crate) fn stream(job: &mut Job<'_>, src: &Path, dst: &Path) -> Result<u64, OperationError> {
    let mut reader =
        File::open(src).map_err(|e| OperationError::io(src, "Failed to open source", &e))?;
    let mut writer = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(dst)
        .map_err(|e| OperationError::io(dst, "Failed to create destination", &e))?;

    let result = pump(job, &mut reader, &mut writer, src, dst);
    drop(writer);

    match result {
        Ok(bytes) => {
            copy_permissions(src, dst);
            Ok(bytes)
        }
        Err(err) => {
            if let Err(cleanup) = fs::remove_file(dst) {
                tracing::debug!(path = %dst.display(), "Could not remove partial copy: {cleanup}");
            }
            Err(err)
        }
    }
}

fn pump(
    job: &mut Job<'_>,
    reader: &mut File,
    writer: &mut File,
    src: &Path,
    dst: &Path,
) -> Result<u64, OperationError> {
    let mut total = 0u64;
    loop {
        let read = match reader.read(&mut job.buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(OperationError::io(src, "Failed to read", &e)),
        };
        writer
            .write_all(&job.buffer[..read])
            .map_err(|e| OperationError::io(dst, "Failed to write", &e))?;

        total += read as u64;
        job.progress.add_bytes(read as u64);
        job.notify();
    }
    writer
        .flush()
        .map_err(|e| OperationError::io(dst, "Failed to write", &e))?;
    Ok(total)
}

fn copy_permissions(src: &Path, dst: &Path) {
    let result = fs::metadata(src).and_then(|meta| fs::set_permissions(dst, meta.permissions()));
    if let Err(err) = result {
        tracing::debug!(path = %dst.display(), "Permissions not copied: {err}");
    }
}

/// Copy or move the contents of `src` into `dst`, recursively.
///
/// Files go first, then subdirectories. Symlinks to directories are never
/// followed: a copy recreates the link. When moving, `src` is removed only if
/// nothing below it failed.
pub(crate) fn transfer_dir(job: &mut Job<'_>, src: &Path, dst: &Path, is_move: bool) {
    let failures_before = job.outcome.failed;

    if let Err(e) = fs::create_dir_all(dst) {
        job.outcome
            .record_failure(OperationError::io(dst, "Failed to create directory", &e));
        return;
    }

    let (dirs, others) = match read_entries(src) {
        Ok(entries) => entries,
        Err(err) => {
            job.outcome.record_failure(err);
            return;
        }
    };

    for entry in others {
        let target = dst.join(&entry.name);
        let result = if is_move {
            move_file(job, &entry.path, &target)
        } else if entry.is_opaque_link() {
            copy_link(job, &entry.path, &target)
        } else {
            copy_file(job, &entry.path, &target)
        };
        job.record(result);
    }

    for entry in dirs {
        transfer_dir(job, &entry.path, &dst.join(&entry.name), is_move);
    }

    if !is_move {
        return;
    }
    if job.outcome.failed > failures_before {
        tracing::debug!(path = %src.display(), "Keeping source directory after failures");
        return;
    }
    if let Err(e) = fs::remove_dir(src) {
        job.outcome
            .record_failure(OperationError::io(src, "Failed to remove source directory", &e));
    }
}
