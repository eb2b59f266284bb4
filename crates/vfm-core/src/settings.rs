//! Persistent user settings stored as TOML.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_MAX_DEPTH, ScanOptions};
use crate::error::SettingsError;

/// Smallest pane that can show a header, one body line and a page indicator.
pub const MIN_PANE_ROWS: u16 = 3;

/// Smallest one-line pane (text row plus separator).
pub const MIN_LINE_ROWS: u16 = 2;

/// Narrowest usable screen.
pub const MIN_SCREEN_WIDTH: u16 = 40;

/// Heights of the screen panes, in rows, counting each pane's bottom separator.
///
/// The directory pane is not listed: it takes whatever is left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// File list pane.
    pub file_list_rows: u16,
    /// Info pane.
    pub info_rows: u16,
    /// Message line above the prompt.
    pub command_info_rows: u16,
    /// Command prompt.
    pub command_rows: u16,
    /// Narrowest terminal the layout is drawn on.
    pub min_width: u16,
    /// Shortest terminal the layout is drawn on.
    pub min_height: u16,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            file_list_rows: 10,
            info_rows: 5,
            command_info_rows: 2,
            command_rows: 2,
            min_width: 80,
            min_height: 24,
        }
    }
}

impl LayoutConfig {
    /// Rows taken by everything except the directory pane, top border included.
    pub fn fixed_rows(&self) -> u16 {
        1 + self.file_list_rows + self.info_rows + self.command_info_rows + self.command_rows
    }

    /// Clamp every value to something drawable.
    pub fn validate(&mut self) {
        self.file_list_rows = self.file_list_rows.max(MIN_PANE_ROWS);
        self.info_rows = self.info_rows.max(MIN_PANE_ROWS);
        self.command_info_rows = self.command_info_rows.max(MIN_LINE_ROWS);
        self.command_rows = self.command_rows.max(MIN_LINE_ROWS);
        self.min_width = self.min_width.max(MIN_SCREEN_WIDTH);
        self.min_height = self.min_height.max(self.fixed_rows() + MIN_PANE_ROWS);
    }
}

/// Persistent user settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory shown on startup and used to resolve relative paths.
    pub last_path: PathBuf,
    /// Tree depth when a `dir` command does not pass `-l`.
    pub max_depth_default: usize,
    /// Show dot-directories and dot-files.
    pub show_hidden: bool,
    /// List siblings alphabetically instead of in directory order.
    pub sort_by_name: bool,
    /// Pane sizes.
    pub layout: LayoutConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            last_path: dirs::home_dir().unwrap_or_else(|| PathBuf::from("/")),
            max_depth_default: DEFAULT_MAX_DEPTH,
            show_hidden: true,
            sort_by_name: true,
            layout: LayoutConfig::default(),
        }
    }
}

impl Settings {
    /// Default location of the settings file.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("vfm").join("settings.toml"))
    }

    /// Load settings from `path`.
    ///
    /// A missing file yields defaults, which are written back so the user has
    /// a file to edit.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            let settings = Self::default();
            settings.save(path)?;
            return Ok(settings);
        }

        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut settings: Self = toml::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.validate();
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any error.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(err) => {
                tracing::warn!("Using default settings: {err}");
                Self::default()
            }
        }
    }

    /// Save settings to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let io_err = |source: std::io::Error| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(io_err)
    }

    /// Clamp out-of-range values.
    pub fn validate(&mut self) {
        self.max_depth_default = self.max_depth_default.max(1);
        self.layout.validate();
    }

    /// Scan options derived from these settings.
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            default_max_depth: self.max_depth_default,
            include_hidden: self.show_hidden,
            sort_by_name: self.sort_by_name,
        }
    }
}
