//! Directory scanning for vfm.
//!
//! Three read-only producers of [`LineBuffer`]s:
//!
//! - [`TreeScanner`] renders a depth-limited tree of subdirectories with
//!   box-drawing prefixes
//! - [`FileLister`] lists the files directly inside one directory
//! - [`get_info`] summarizes the metadata of a file or directory
//!
//! Only an invalid or missing root aborts a scan. Branches that cannot be
//! listed are skipped and reported as [`ScanWarning`]s.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use vfm_scan::{ScanOptions, TreeScanner};
//!
//! let scanner = TreeScanner::new(ScanOptions::default());
//! let scan = scanner.scan(Path::new("/tmp"), 2).unwrap();
//! for line in &scan.lines {
//!     println!("{line}");
//! }
//! ```

mod files;
mod info;
mod root;
mod tree;

pub use files::{FileLister, FileListing};
pub use info::{DirTotals, dir_totals, get_info};
pub use tree::{BLANK_PREFIX, BRANCH, LAST_BRANCH, PIPE_PREFIX, TreeScan, TreeScanner};

// Re-export core types for convenience
pub use vfm_core::{DisplayLine, LineBuffer, ScanError, ScanOptions, ScanWarning};
