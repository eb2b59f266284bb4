//! Scan configuration types.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Depth used when a scan asks for depth 0.
pub const DEFAULT_MAX_DEPTH: usize = 2;

/// Options shared by the tree scanner and the file lister.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ScanOptions {
    /// Depth used when the caller passes 0.
    #[builder(default = "DEFAULT_MAX_DEPTH")]
    #[serde(default = "default_max_depth")]
    pub default_max_depth: usize,

    /// Sort siblings by name instead of keeping enumeration order.
    #[builder(default = "false")]
    #[serde(default)]
    pub sort_by_name: bool,

    /// Include entries whose name starts with a dot.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub include_hidden: bool,
}

fn default_true() -> bool {
    true
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl ScanOptionsBuilder {
    fn validate(&self) -> Result<(), String> {
        if self.default_max_depth == Some(0) {
            return Err("Default depth must be at least 1".to_string());
        }
        Ok(())
    }
}

impl ScanOptions {
    /// Create a new builder.
    pub fn builder() -> ScanOptionsBuilder {
        ScanOptionsBuilder::default()
    }

    /// Resolve a requested depth, substituting the default for 0.
    pub fn effective_depth(&self, requested: usize) -> usize {
        if requested == 0 {
            self.default_max_depth
        } else {
            requested
        }
    }

    /// Check if a name should be skipped as hidden.
    pub fn should_skip_hidden(&self, name: &str) -> bool {
        !self.include_hidden && name.starts_with('.')
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            default_max_depth: DEFAULT_MAX_DEPTH,
            sort_by_name: false,
            include_hidden: true,
        }
    }
}
