//! Log file setup.

use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{Context, Result, eyre};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding a log filter such as `debug` or `vfm_ops=trace`.
pub const LOG_ENV: &str = "VFM_LOG";

/// Where the log goes when `--log-file` is not given.
pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("vfm")
        .join("vfm.log")
}

/// Send all tracing output to `path`, truncating the file first.
///
/// Call once near the start of `main`.
pub fn init(path: &Path) -> Result<()> {
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| eyre!("Log path has no file name: {}", path.display()))?;

    fs::create_dir_all(dir)
        .wrap_err_with(|| format!("Cannot create log directory {}", dir.display()))?;
    fs::File::create(path)
        .wrap_err_with(|| format!("Cannot create log file {}", path.display()))?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(dir)
        .wrap_err("Cannot open log file")?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = fmt::layer().with_writer(appender).with_ansi(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .wrap_err("Failed to install the log subscriber")
}
