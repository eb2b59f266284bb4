//! Command dispatch.
//!
//! Relative paths resolve against the current directory. Listing commands
//! page their result interactively; mutations run to completion, report on
//! the message line and refresh every pane.

use std::fs;
use std::path::{Path, PathBuf};

use vfm_core::{
    DisplayLine, LineBuffer, ScanError, ScanWarning, find_path, is_dots_and_slashes_only,
    make_full_path,
};
use vfm_ops::{MutationEngine, OperationOutcome, OperationProgress, ProgressObserver};
use vfm_scan::get_info;

use super::{App, AppResult, Overlay, Pane, Screen};
use crate::commands::{Command, Flag, find_flag, tokenize};
use crate::input::KeySource;
use crate::messages::{Message, manual, version_line};
use crate::pager::PagedView;
use crate::ui::{Area, format_size};

/// Header of the `log` listing.
const LOG_HEADER: &str = "Log file contents:";

impl App {
    /// Run one command line.
    pub(super) fn execute(
        &mut self,
        line: &str,
        screen: &mut dyn Screen,
        keys: &mut dyn KeySource,
    ) -> AppResult<()> {
        let words = tokenize(line);
        let Some(first) = words.first() else {
            return Ok(());
        };
        let command = Command::parse(first);
        if command.is_mutation() {
            tracing::info!(?command, line, "Executing command");
        } else {
            tracing::debug!(?command, line, "Executing command");
        }
        if command == Command::Exit {
            self.running = false;
            return Ok(());
        }
        self.status = Message::Greeting.line();

        match command {
            Command::Help => self.show_paged(Area::DirList, manual(), 1, screen, keys)?,
            Command::Dir => self.list_dirs(&words, screen, keys)?,
            Command::Files => self.list_files(&words, screen, keys)?,
            Command::Info => self.show_info(&words, screen, keys)?,
            Command::Copy | Command::Move => {
                self.transfer_file(&words, command == Command::Move, screen)
            }
            Command::DirCopy | Command::DirMove => {
                self.transfer_dir(&words, command == Command::DirMove, screen)
            }
            Command::Delete => self.delete_file(&words, screen),
            Command::DirDelete => self.delete_dir(&words, screen),
            Command::Log => self.show_log(screen, keys)?,
            Command::Version => self.status = version_line(),
            Command::Exit => {}
            Command::Unknown => self.status = Message::WrongCommand.line(),
        }
        Ok(())
    }

    fn resolve(&self, words: &[String], ordinal: usize) -> PathBuf {
        let token = find_path(words, ordinal).unwrap_or_default();
        self.full_path(&token)
    }

    fn full_path(&self, token: &str) -> PathBuf {
        make_full_path(&self.settings.last_path, token)
    }

    fn fail(&mut self, message: Message) {
        tracing::debug!("{message}");
        self.status = message.line();
    }

    /// Put `buffer` in `area` and page through it until the user quits.
    fn show_paged(
        &mut self,
        area: Area,
        buffer: LineBuffer,
        start_page: i64,
        screen: &mut dyn Screen,
        keys: &mut dyn KeySource,
    ) -> AppResult<()> {
        let len = buffer.len();
        if let Some(pane) = self.panes.get_mut(area) {
            *pane = Pane::new(buffer);
        }
        let height = self
            .layout(screen)?
            .map_or(0, |layout| layout.pane(area).height);
        let hint = Message::ListHint.line();

        let this = &*self;
        let state = PagedView::new(len, height, start_page, true).run(keys, |state| {
            if let Some(layout) = this.layout(screen)? {
                state.resize(layout.pane(area).height);
            }
            this.draw(
                screen,
                Overlay {
                    paging: Some((area, &*state)),
                    status: Some(&hint),
                },
            )
        })?;

        if let Some(pane) = self.panes.get_mut(area) {
            pane.page = state.current_page();
        }
        Ok(())
    }

    fn list_dirs(
        &mut self,
        words: &[String],
        screen: &mut dyn Screen,
        keys: &mut dyn KeySource,
    ) -> AppResult<()> {
        let page = find_flag(words, Flag::Page);
        let depth = usize::try_from(find_flag(words, Flag::Level)).unwrap_or(0);
        let path = self.resolve(words, 1);

        let scan = match self.scanner.scan(&path, depth) {
            Ok(scan) => scan,
            Err(err) => {
                tracing::debug!("dir rejected: {err}");
                self.fail(Message::WrongPath);
                return Ok(());
            }
        };
        log_warnings(&scan.warnings);

        self.settings.last_path = path;
        self.save_settings();
        self.refresh_side_panes();
        self.show_paged(Area::DirList, scan.lines, page, screen, keys)
    }

    fn list_files(
        &mut self,
        words: &[String],
        screen: &mut dyn Screen,
        keys: &mut dyn KeySource,
    ) -> AppResult<()> {
        let page = find_flag(words, Flag::Page);
        let path = self.resolve(words, 1);

        match self.lister.list(&path) {
            Ok(listing) => {
                log_warnings(&listing.warnings);
                self.show_paged(Area::FileList, listing.lines, page, screen, keys)
            }
            Err(err) => {
                tracing::debug!("files rejected: {err}");
                self.fail(Message::WrongPath);
                Ok(())
            }
        }
    }

    fn show_info(
        &mut self,
        words: &[String],
        screen: &mut dyn Screen,
        keys: &mut dyn KeySource,
    ) -> AppResult<()> {
        let path = self.resolve(words, 1);
        if fs::symlink_metadata(&path).is_err() {
            self.fail(Message::WrongPath);
            return Ok(());
        }
        self.show_paged(Area::Info, get_info(&path), 1, screen, keys)
    }

    fn show_log(&mut self, screen: &mut dyn Screen, keys: &mut dyn KeySource) -> AppResult<()> {
        let mut buffer = LineBuffer::new(LOG_HEADER);
        match self.log_path.as_deref().map(fs::read_to_string) {
            Some(Ok(text)) => buffer.extend(text.lines().map(DisplayLine::plain)),
            Some(Err(err)) => {
                tracing::debug!("Log file unreadable: {err}");
                buffer.push(DisplayLine::new().argument("The log file could not be read."));
            }
            None => buffer.push(DisplayLine::new().argument("Logging to a file is disabled.")),
        }
        self.show_paged(Area::DirList, buffer, 1, screen, keys)
    }

    /// `copy`/`move <file> <destination dir>`
    fn transfer_file(&mut self, words: &[String], is_move: bool, screen: &mut dyn Screen) {
        let Some([src, dest_dir]) = path_args::<2>(words) else {
            return self.fail(Message::WrongArguments);
        };
        let src = self.full_path(&src);
        let dest_dir = self.full_path(&dest_dir);

        let Some(name) = src.file_name().filter(|_| is_file_like(&src)) else {
            return self.fail(Message::WrongSourcePath);
        };
        if dest_dir.exists() && !dest_dir.is_dir() {
            return self.fail(Message::WrongDestinationPath);
        }
        let dst = dest_dir.join(name);
        if exists(&dst) {
            return self.fail(Message::FileExists);
        }

        let outcome = self.with_progress(screen, |engine, observer| {
            if is_move {
                engine.move_file(&src, &dst, observer)
            } else {
                engine.copy_file(&src, &dst, observer)
            }
        });
        self.finish_mutation(outcome);
    }

    /// `dcopy`/`dmove <dir> <destination dir>`
    fn transfer_dir(&mut self, words: &[String], is_move: bool, screen: &mut dyn Screen) {
        let Some([src, dest_dir]) = path_args::<2>(words) else {
            return self.fail(Message::WrongArguments);
        };
        if is_dots_and_slashes_only(&src) || is_dots_and_slashes_only(&dest_dir) {
            return self.fail(Message::WrongPath);
        }
        let src = self.full_path(&src);
        let dest_dir = self.full_path(&dest_dir);

        let Some(name) = src.file_name().filter(|_| is_real_dir(&src)) else {
            return self.fail(Message::WrongSourcePath);
        };
        if dest_dir.exists() && !dest_dir.is_dir() {
            return self.fail(Message::WrongDestinationPath);
        }
        let dst = dest_dir.join(name);
        if dst == src || exists(&dst) {
            return self.fail(Message::DirExists);
        }

        let outcome = self.with_progress(screen, |engine, observer| {
            engine.copy_or_move_directory(&src, &dst, is_move, observer)
        });
        self.finish_mutation(outcome);
    }

    /// `del <file>`
    fn delete_file(&mut self, words: &[String], screen: &mut dyn Screen) {
        let Some([path]) = path_args::<1>(words) else {
            return self.fail(Message::WrongArguments);
        };
        let path = self.full_path(&path);
        if !is_file_like(&path) {
            return self.fail(Message::WrongSourcePath);
        }

        let outcome = self.with_progress(screen, |engine, observer| {
            engine.delete_file(&path, observer)
        });
        self.finish_mutation(outcome);
    }

    /// `ddel <dir>`
    fn delete_dir(&mut self, words: &[String], screen: &mut dyn Screen) {
        let Some([path]) = path_args::<1>(words) else {
            return self.fail(Message::WrongArguments);
        };
        if is_dots_and_slashes_only(&path) {
            return self.fail(Message::WrongPath);
        }
        let path = self.full_path(&path);
        if !is_real_dir(&path) {
            return self.fail(Message::WrongSourcePath);
        }

        let outcome = self.with_progress(screen, |engine, observer| {
            engine.delete_directory(&path, observer)
        });
        self.finish_mutation(outcome);
    }

    /// Run a mutation, redrawing the message line as whole percents pass.
    fn with_progress<F>(&self, screen: &mut dyn Screen, operation: F) -> OperationOutcome
    where
        F: FnOnce(&MutationEngine, &mut dyn ProgressObserver) -> OperationOutcome,
    {
        let mut shown = None;
        let mut observer = |progress: &OperationProgress| {
            let percent = progress.percentage() as u8;
            if shown == Some(percent) {
                return;
            }
            shown = Some(percent);
            let line = progress_line(progress);
            let overlay = Overlay {
                paging: None,
                status: Some(&line),
            };
            if let Err(err) = self.draw(screen, overlay) {
                tracing::debug!("Progress redraw failed: {err}");
            }
        };
        operation(&self.engine, &mut observer)
    }

    fn finish_mutation(&mut self, outcome: OperationOutcome) {
        self.status = if outcome.succeeded {
            Message::Success.line()
        } else if outcome.message.is_empty() {
            Message::Failure.line()
        } else {
            DisplayLine::new().argument(&outcome.message)
        };
        self.refresh();
    }

    /// Rebuild every pane for the current directory.
    ///
    /// When the current directory is gone, the nearest surviving ancestor
    /// takes its place.
    pub(super) fn refresh(&mut self) {
        let root = nearest_existing_dir(&self.settings.last_path);
        if root != self.settings.last_path {
            tracing::info!(
                from = %self.settings.last_path.display(),
                to = %root.display(),
                "Current directory is gone, moving up"
            );
            self.settings.last_path = root;
        }

        let lines = match self.scanner.scan(&self.settings.last_path, 0) {
            Ok(scan) => {
                log_warnings(&scan.warnings);
                scan.lines
            }
            Err(err) => error_buffer(&self.settings.last_path, &err),
        };
        self.panes.dirs = Pane::new(lines);
        self.refresh_side_panes();
    }

    fn refresh_side_panes(&mut self) {
        let root = &self.settings.last_path;
        let files = match self.lister.list(root) {
            Ok(listing) => {
                log_warnings(&listing.warnings);
                listing.lines
            }
            Err(err) => error_buffer(root, &err),
        };
        self.panes.files = Pane::new(files);
        self.panes.info = Pane::new(get_info(root));
    }
}

/// The first `N` path arguments, flags and their values skipped.
fn path_args<const N: usize>(words: &[String]) -> Option<[String; N]> {
    let mut args: [String; N] = std::array::from_fn(|_| String::new());
    for (ordinal, arg) in (1..).zip(args.iter_mut()) {
        *arg = find_path(words, ordinal)?;
    }
    Some(args)
}

fn exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Files and symlinks; anything that is not a directory.
fn is_file_like(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok_and(|meta| !meta.is_dir())
}

/// A directory that is not reached through a symlink.
fn is_real_dir(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok_and(|meta| meta.is_dir())
}

fn nearest_existing_dir(path: &Path) -> PathBuf {
    path.ancestors()
        .find(|candidate| candidate.is_dir())
        .map_or_else(|| path.to_path_buf(), Path::to_path_buf)
}

fn error_buffer(root: &Path, err: &ScanError) -> LineBuffer {
    let mut buffer = LineBuffer::new(root.display().to_string());
    buffer.push(DisplayLine::new().argument(err.to_string()));
    buffer
}

fn log_warnings(warnings: &[ScanWarning]) {
    for warning in warnings {
        tracing::warn!("{warning}");
    }
}

fn progress_line(progress: &OperationProgress) -> DisplayLine {
    let mut line = DisplayLine::new()
        .command(format!("{} ", progress.operation_type))
        .argument(format!("{:.0}%", progress.percentage()));
    if progress.bytes_total > 0 {
        line = line.standard(format!(
            " ({} of {})",
            format_size(progress.bytes_processed),
            format_size(progress.bytes_total)
        ));
    }
    if let Some(name) = progress.current_file.as_deref().and_then(Path::file_name) {
        line = line.standard(format!(" {}", name.to_string_lossy()));
    }
    line
}
