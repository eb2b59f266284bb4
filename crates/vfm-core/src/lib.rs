//! Core types for vfm.
//!
//! This crate provides the pieces shared by the scanner, the mutation engine
//! and the terminal front end: colored display lines, path resolution, the
//! error taxonomy and persistent settings.

mod config;
mod error;
mod line;
mod path;
mod settings;

pub use config::{DEFAULT_MAX_DEPTH, ScanOptions, ScanOptionsBuilder};
pub use error::{ErrorKind, ScanError, ScanWarning, SettingsError};
pub use line::{ColorMarker, DisplayLine, LineBuffer, Segments};
pub use path::{
    UP_TOKEN, VALUE_FLAGS, find_path, is_absolute_token, is_dots_and_slashes_only,
    is_path_valid, is_up_token, make_full_path, normalize_volume_root,
};
pub use settings::{LayoutConfig, MIN_LINE_ROWS, MIN_PANE_ROWS, Settings};
