//! Terminal user interface for vfm.
//!
//! The screen is split into a directory tree, a file list, an info pane, a
//! message line and a command prompt, all inside one double-line frame.
//! Everything is driven by commands typed at the prompt; long listings are
//! paged.
//!
//! # Usage
//!
//! ```rust,no_run
//! use vfm_core::Settings;
//! use vfm_tui::TuiConfig;
//!
//! let config = TuiConfig::new(Settings::default());
//! vfm_tui::run(config).unwrap();
//! ```
//!
//! # Commands
//!
//! - `dir [path] [-p page] [-l levels]` - Directory tree
//! - `files [path] [-p page]` - Files of a directory
//! - `info [path]` - File or directory details
//! - `copy`/`move <file> <dir>` - Copy or move a file into a directory
//! - `dcopy`/`dmove <dir> <dir>` - Copy or move a directory into another
//! - `del <file>`, `ddel <dir>` - Delete
//! - `help`, `log`, `version`, `exit`
//!
//! # Keyboard
//!
//! - `Up`/`Down` - Command history
//! - `Ctrl-C` - Quit
//!
//! While a pane is paged:
//!
//! - `PageUp`/`PageDown`, arrows, `k`/`j` - Change pages
//! - `q`/`Esc` - Stop paging

pub mod app;
pub mod commands;
mod event;
pub mod input;
mod messages;
pub mod pager;
mod theme;
pub mod ui;

use std::path::PathBuf;

use vfm_core::Settings;

pub use app::{App, AppResult, Screen};
pub use input::{CrosstermKeys, InputEvent, KeySource, ScriptedKeys};
pub use messages::Message;
pub use theme::Theme;

/// Configuration for a TUI session.
#[derive(Debug, Clone)]
pub struct TuiConfig {
    /// Settings to start from.
    pub settings: Settings,
    /// Where settings are saved; `None` keeps them in memory.
    pub settings_path: Option<PathBuf>,
    /// The log file shown by the `log` command.
    pub log_path: Option<PathBuf>,
}

impl TuiConfig {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            settings_path: None,
            log_path: None,
        }
    }

    /// Persist settings to `path`.
    pub fn with_settings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_path = Some(path.into());
        self
    }

    /// Show `path` from the `log` command.
    pub fn with_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = Some(path.into());
        self
    }
}

/// Run the TUI application.
pub fn run(config: TuiConfig) -> AppResult<()> {
    let mut terminal = ratatui::try_init()?;
    let mut keys = CrosstermKeys;
    let result = App::new(config).run(&mut terminal, &mut keys);
    ratatui::restore();
    result
}
