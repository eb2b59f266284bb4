//! Single-level file listing.

use std::fs;
use std::path::Path;

use vfm_core::{DisplayLine, LineBuffer, ScanError, ScanOptions, ScanWarning};

use crate::root::resolve_root;

/// Result of a file listing.
#[derive(Debug, Clone)]
pub struct FileListing {
    /// Header (the directory) followed by one line per file.
    pub lines: LineBuffer,
    /// Set when the directory could not be listed.
    pub warnings: Vec<ScanWarning>,
}

/// Lists the regular files directly inside a directory.
#[derive(Debug, Clone, Default)]
pub struct FileLister {
    options: ScanOptions,
}

impl FileLister {
    /// Create a lister with the given options.
    pub fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    /// List the files in `dir`. Subdirectories are not listed or entered.
    ///
    /// A directory that exists but cannot be read yields the header alone
    /// plus a warning.
    pub fn list(&self, dir: &Path) -> Result<FileListing, ScanError> {
        let dir = resolve_root(dir)?;
        let mut listing = FileListing {
            lines: LineBuffer::new(DisplayLine::plain(dir.to_string_lossy())),
            warnings: Vec::new(),
        };

        match self.file_names(&dir) {
            Ok(names) => listing
                .lines
                .extend(names.into_iter().map(|name| DisplayLine::new().standard(name))),
            Err(warning) => {
                tracing::debug!("Cannot list files: {warning}");
                listing.warnings.push(warning);
            }
        }
        Ok(listing)
    }

    fn file_names(&self, dir: &Path) -> Result<Vec<String>, ScanWarning> {
        let warn = |err: std::io::Error| ScanWarning::enumeration(dir, &err);

        let mut names = Vec::new();
        for entry in fs::read_dir(dir).map_err(warn)? {
            let entry = entry.map_err(warn)?;
            // Follows symlinks so a link to a file is listed as a file.
            let is_file = fs::metadata(entry.path()).is_ok_and(|meta| meta.is_file());
            if !is_file {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            if self.options.should_skip_hidden(&name) {
                continue;
            }
            names.push(name);
        }

        if self.options.sort_by_name {
            names.sort();
        }
        Ok(names)
    }
}
