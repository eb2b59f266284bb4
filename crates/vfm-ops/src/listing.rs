//! Directory enumeration shared by the recursive operations.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use vfm_core::ErrorKind;

use crate::OperationError;

/// One entry of a directory.
#[derive(Debug)]
pub(crate) struct Entry {
    pub path: PathBuf,
    pub name: OsString,
    /// Real directory; a symlink to a directory is not one.
    pub is_dir: bool,
    pub is_symlink: bool,
}

impl Entry {
    /// A symlink whose target is not a regular file: a directory, or nothing.
    pub fn is_opaque_link(&self) -> bool {
        self.is_symlink && !fs::metadata(&self.path).is_ok_and(|meta| meta.is_file())
    }
}

/// List `dir`, split into subdirectories and everything else.
pub(crate) fn read_entries(dir: &Path) -> Result<(Vec<Entry>, Vec<Entry>), OperationError> {
    let fail = |err: std::io::Error| {
        OperationError::new(
            dir,
            ErrorKind::EnumerationFailure,
            format!("Failed to read directory: {err}"),
        )
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(fail)? {
        let entry = entry.map_err(fail)?;
        let file_type = entry.file_type().map_err(fail)?;
        entries.push(Entry {
            path: entry.path(),
            name: entry.file_name(),
            is_dir: file_type.is_dir(),
            is_symlink: file_type.is_symlink(),
        });
    }
    Ok(entries.into_iter().partition(|e| e.is_dir))
}

/// Count files and bytes below `dir`. Unreadable branches count as empty.
pub(crate) fn calculate_dir_totals(dir: &Path) -> (usize, u64) {
    let mut files = 0;
    let mut bytes = 0u64;

    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            if file_type.is_dir() {
                let (f, b) = calculate_dir_totals(&entry.path());
                files += f;
                bytes += b;
            } else if let Ok(metadata) = entry.metadata() {
                files += 1;
                bytes += metadata.len();
            }
        }
    }

    (files, bytes)
}
