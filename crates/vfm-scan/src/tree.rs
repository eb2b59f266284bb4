//! Depth-limited directory tree rendered with box-drawing prefixes.

use std::fs;
use std::path::{Path, PathBuf};

use itertools::{Itertools, Position};
use vfm_core::{DisplayLine, LineBuffer, ScanError, ScanOptions, ScanWarning};

use crate::root::resolve_root;

/// Corner for a sibling that has siblings after it.
pub const BRANCH: &str = "├──";
/// Corner for the last sibling.
pub const LAST_BRANCH: &str = "└──";
/// Continuation below a sibling that is not last.
pub const PIPE_PREFIX: &str = "│  ";
/// Continuation below the last sibling.
pub const BLANK_PREFIX: &str = "   ";

/// Result of a tree scan.
#[derive(Debug, Clone)]
pub struct TreeScan {
    /// Header (the root) followed by one line per directory.
    pub lines: LineBuffer,
    /// Branches that could not be listed and were skipped.
    pub warnings: Vec<ScanWarning>,
}

impl TreeScan {
    /// Whether every directory in the tree could be listed.
    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// A subdirectory found while listing a branch.
#[derive(Debug)]
struct Subdir {
    name: String,
    path: PathBuf,
}

/// Recursive, depth-limited scanner of subdirectories.
#[derive(Debug, Clone, Default)]
pub struct TreeScanner {
    options: ScanOptions,
}

impl TreeScanner {
    /// Create a scanner with the given options.
    pub fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    /// Options in use.
    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Scan `root` down to `max_depth` levels (0 means the configured default).
    ///
    /// Line 0 is the root itself. Each directory line is the argument-colored
    /// prefix and corner followed by the standard-colored name. A branch that
    /// cannot be listed is skipped and reported in [`TreeScan::warnings`].
    pub fn scan(&self, root: &Path, max_depth: usize) -> Result<TreeScan, ScanError> {
        let root = resolve_root(root)?;
        let max_depth = self.options.effective_depth(max_depth);

        let mut result = TreeScan {
            lines: LineBuffer::new(DisplayLine::plain(root.to_string_lossy())),
            warnings: Vec::new(),
        };
        self.walk(&root, "", 1, max_depth, &mut result);

        tracing::debug!(
            root = %root.display(),
            lines = result.lines.len(),
            warnings = result.warnings.len(),
            "Tree scan finished"
        );
        Ok(result)
    }

    fn walk(&self, dir: &Path, prefix: &str, depth: usize, max_depth: usize, out: &mut TreeScan) {
        let subdirs = match self.list_subdirs(dir) {
            Ok(subdirs) => subdirs,
            Err(warning) => {
                tracing::debug!("Skipping branch: {warning}");
                out.warnings.push(warning);
                return;
            }
        };

        for (position, subdir) in subdirs.into_iter().with_position() {
            let is_last = matches!(position, Position::Last | Position::Only);
            let corner = if is_last { LAST_BRANCH } else { BRANCH };

            out.lines.push(
                DisplayLine::new()
                    .argument(format!("{prefix}{corner}"))
                    .standard(&subdir.name),
            );

            if depth < max_depth {
                let continuation = if is_last { BLANK_PREFIX } else { PIPE_PREFIX };
                let child_prefix = format!("{prefix}{continuation}");
                self.walk(&subdir.path, &child_prefix, depth + 1, max_depth, out);
            }
        }
    }

    /// Immediate subdirectories of `dir`. Symlinks are not followed.
    fn list_subdirs(&self, dir: &Path) -> Result<Vec<Subdir>, ScanWarning> {
        let warn = |err: std::io::Error| ScanWarning::enumeration(dir, &err);

        let mut subdirs = Vec::new();
        for entry in fs::read_dir(dir).map_err(warn)? {
            let entry = entry.map_err(warn)?;
            let file_type = entry.file_type().map_err(warn)?;
            if !file_type.is_dir() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            if self.options.should_skip_hidden(&name) {
                continue;
            }

            subdirs.push(Subdir {
                name,
                path: entry.path(),
            });
        }

        if self.options.sort_by_name {
            subdirs.sort_by(|a, b| a.name.cmp(&b.name));
        }
        Ok(subdirs)
    }
}
