//! Metadata summary for a single file or directory.

use std::fs::{self, Metadata};
use std::io;
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Local};
use humansize::{BINARY, format_size};
use vfm_core::{DisplayLine, LineBuffer};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Recursive totals for a directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirTotals {
    /// Sum of regular file sizes.
    pub bytes: u64,
    /// Regular files below the directory.
    pub files: u64,
    /// Subdirectories below the directory.
    pub dirs: u64,
}

/// Walk `dir` and add up file sizes. Unreadable branches are skipped.
pub fn dir_totals(dir: &Path) -> DirTotals {
    let mut totals = DirTotals::default();
    accumulate(dir, &mut totals);
    totals
}

fn accumulate(dir: &Path, totals: &mut DirTotals) {
    let Ok(entries) = fs::read_dir(dir) else {
        tracing::debug!(path = %dir.display(), "Skipping unreadable directory in totals");
        return;
    };

    for entry in entries.flatten() {
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if file_type.is_dir() {
            totals.dirs += 1;
            accumulate(&entry.path(), totals);
        } else if file_type.is_file() {
            totals.files += 1;
            totals.bytes += entry.metadata().map(|m| m.len()).unwrap_or(0);
        }
    }
}

/// Describe `path`.
///
/// Files and directories get a header naming them followed by labelled
/// lines; anything else gets an `Info` header and a single
/// `path does not exist` line.
pub fn get_info(path: &Path) -> LineBuffer {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => describe(path, &meta, false),
        Ok(meta) if meta.is_dir() => describe(path, &meta, true),
        _ => {
            let mut buffer = LineBuffer::new("Info");
            buffer.push("path does not exist");
            buffer
        }
    }
}

fn describe(path: &Path, meta: &Metadata, is_dir: bool) -> LineBuffer {
    let name = display_name(path);
    let header = if is_dir {
        format!("Directory info: {name}")
    } else {
        format!("File info: {name}")
    };

    let mut buffer = LineBuffer::new(header);
    buffer.push(labelled("Path", path.to_string_lossy()));
    buffer.push(labelled("Created", format_time(meta.created())));
    buffer.push(labelled("Modified", format_time(meta.modified())));
    buffer.push(labelled("Attributes", attributes(path, meta)));

    if is_dir {
        let totals = dir_totals(path);
        buffer.push(labelled("Size", format_bytes(totals.bytes)));
        buffer.push(labelled(
            "Contains",
            format!("{} files, {} directories", totals.files, totals.dirs),
        ));
    } else {
        buffer.push(labelled("Size", format_bytes(meta.len())));
    }
    buffer
}

fn labelled(label: &str, value: impl AsRef<str>) -> DisplayLine {
    DisplayLine::new()
        .command(format!("{label}: "))
        .standard(value)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

fn format_time(time: io::Result<SystemTime>) -> String {
    match time {
        Ok(time) => DateTime::<Local>::from(time).format(TIME_FORMAT).to_string(),
        Err(_) => "unavailable".to_string(),
    }
}

fn format_bytes(bytes: u64) -> String {
    format!("{bytes} Bytes ({})", format_size(bytes, BINARY))
}

fn attributes(path: &Path, meta: &Metadata) -> String {
    let mut attrs = Vec::new();

    let is_symlink = fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_symlink());
    attrs.push(if is_symlink {
        "symlink"
    } else if meta.is_dir() {
        "directory"
    } else {
        "file"
    }
    .to_string());

    if meta.permissions().readonly() {
        attrs.push("read-only".to_string());
    }
    if path
        .file_name()
        .is_some_and(|n| n.to_string_lossy().starts_with('.'))
    {
        attrs.push("hidden".to_string());
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        attrs.push(format!("mode {:o}", meta.permissions().mode() & 0o7777));
    }

    attrs.join(", ")
}
