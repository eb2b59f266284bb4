//! vfm - a paged, screen-oriented file browser for the terminal.
//!
//! Usage:
//!   vfm [PATH]              Launch the interactive TUI
//!   vfm tree [PATH]         Print the directory tree
//!   vfm files [PATH]        Print the files of a directory
//!   vfm info PATH           Print details of a file or directory
//!   vfm --help              Show help

mod logging;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context, Result, bail};

use vfm_core::{LineBuffer, ScanOptions, Settings};
use vfm_scan::{FileLister, TreeScanner, get_info};
use vfm_tui::TuiConfig;

#[derive(Parser)]
#[command(
    name = "vfm",
    version,
    about = "A paged, screen-oriented file browser",
    long_about = "vfm shows a directory tree, a file list and file details in one \
                  framed screen and is driven by typed commands.\n\n\
                  Launch the interactive TUI by running `vfm [PATH]`, or use \
                  subcommands to print listings."
)]
struct Cli {
    /// Directory to open (defaults to the last one visited)
    path: Option<PathBuf>,

    /// Settings file to use instead of the default location
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log file, truncated on start
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the directory tree
    Tree {
        /// Directory to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Levels to descend (0 uses the configured default)
        #[arg(short = 'l', long, default_value = "0")]
        depth: usize,

        /// Sort siblings by name even if the settings say otherwise
        #[arg(long)]
        sorted: bool,
    },

    /// Print the files of a directory
    Files {
        /// Directory to list
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Print details of a file or directory
    Info {
        /// File or directory
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let log_path = cli.log_file.clone().unwrap_or_else(logging::default_log_path);
    logging::init(&log_path)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Application start");

    let settings_path = cli.config.clone().or_else(Settings::config_path);
    let settings = settings_path
        .as_deref()
        .map(Settings::load_or_default)
        .unwrap_or_default();

    let result = match cli.command {
        Some(Command::Tree {
            path,
            depth,
            sorted,
        }) => run_tree(&path, depth, sorted, &settings),
        Some(Command::Files { path }) => run_files(&path, &settings),
        Some(Command::Info { path }) => run_info(&path),
        None => run_tui(cli.path, settings, settings_path, log_path),
    };

    if let Err(err) = &result {
        tracing::error!("{err:#}");
    }
    tracing::info!("Application shutdown");
    result
}

/// Launch the interactive TUI.
fn run_tui(
    path: Option<PathBuf>,
    mut settings: Settings,
    settings_path: Option<PathBuf>,
    log_path: PathBuf,
) -> Result<()> {
    if let Some(path) = path {
        settings.last_path = path.canonicalize().context("Invalid path")?;
    }

    let mut config = TuiConfig::new(settings).with_log_path(log_path);
    if let Some(settings_path) = settings_path {
        config = config.with_settings_path(settings_path);
    }
    vfm_tui::run(config)
}

/// Print the directory tree of `path`.
fn run_tree(path: &Path, depth: usize, sorted: bool, settings: &Settings) -> Result<()> {
    let options = ScanOptions::builder()
        .default_max_depth(settings.max_depth_default)
        .sort_by_name(sorted || settings.sort_by_name)
        .include_hidden(settings.show_hidden)
        .build()?;

    let scan = TreeScanner::new(options)
        .scan(path, depth)
        .context("Scan failed")?;
    print_lines(&scan.lines);
    report_warnings(scan.warnings.len());
    Ok(())
}

/// Print the files of `path`.
fn run_files(path: &Path, settings: &Settings) -> Result<()> {
    let listing = FileLister::new(settings.scan_options())
        .list(path)
        .context("Listing failed")?;
    print_lines(&listing.lines);
    report_warnings(listing.warnings.len());
    Ok(())
}

/// Print details of `path`.
fn run_info(path: &Path) -> Result<()> {
    if fs::symlink_metadata(path).is_err() {
        bail!("Path not found: {}", path.display());
    }
    print_lines(&get_info(path));
    Ok(())
}

fn print_lines(buffer: &LineBuffer) {
    for line in buffer.plain_lines() {
        println!("{line}");
    }
}

fn report_warnings(count: usize) {
    if count > 0 {
        eprintln!();
        eprintln!("{count} branch(es) could not be read");
    }
}
