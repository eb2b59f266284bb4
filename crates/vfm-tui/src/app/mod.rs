//! Main application state and the command loop.

mod handlers;
mod render;

use std::path::{Path, PathBuf};

use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};
use vfm_core::{DisplayLine, LineBuffer, Settings};
use vfm_ops::MutationEngine;
use vfm_scan::{FileLister, TreeScanner};

use crate::TuiConfig;
use crate::commands::{CommandInput, CommandKeyResult};
use crate::event::is_force_quit;
use crate::input::{InputEvent, KeySource};
use crate::messages::Message;
use crate::theme::Theme;
use crate::ui::{Area, PageState, ScreenLayout};

/// Application result type.
pub type AppResult<T> = color_eyre::Result<T>;

/// Something the application can draw frames on.
pub trait Screen {
    /// The drawable area.
    fn area(&self) -> AppResult<Rect>;

    /// Draw one frame.
    fn draw_frame(&mut self, render: &mut dyn FnMut(&mut Frame)) -> AppResult<()>;
}

impl<B> Screen for Terminal<B>
where
    B: Backend,
    B::Error: std::error::Error + Send + Sync + 'static,
{
    fn area(&self) -> AppResult<Rect> {
        let size = self.size()?;
        Ok(Rect::new(0, 0, size.width, size.height))
    }

    fn draw_frame(&mut self, render: &mut dyn FnMut(&mut Frame)) -> AppResult<()> {
        self.draw(|frame| render(frame))?;
        Ok(())
    }
}

/// A pane's lines and the page it was last left on.
#[derive(Debug, Clone)]
struct Pane {
    buffer: LineBuffer,
    page: usize,
}

impl Pane {
    fn new(buffer: LineBuffer) -> Self {
        Self { buffer, page: 1 }
    }

    fn state(&self, height: u16) -> PageState {
        PageState::new(self.buffer.len(), height, self.page as i64)
    }
}

/// The three paged panes.
#[derive(Debug, Clone)]
struct Panes {
    dirs: Pane,
    files: Pane,
    info: Pane,
}

impl Panes {
    fn new() -> Self {
        Self {
            dirs: Pane::new(LineBuffer::new("")),
            files: Pane::new(LineBuffer::new("")),
            info: Pane::new(LineBuffer::new("")),
        }
    }

    fn get_mut(&mut self, area: Area) -> Option<&mut Pane> {
        match area {
            Area::DirList => Some(&mut self.dirs),
            Area::FileList => Some(&mut self.files),
            Area::Info => Some(&mut self.info),
            Area::CommandInfo | Area::CommandLine => None,
        }
    }

    fn iter(&self) -> impl Iterator<Item = (Area, &Pane)> {
        [
            (Area::DirList, &self.dirs),
            (Area::FileList, &self.files),
            (Area::Info, &self.info),
        ]
        .into_iter()
    }
}

/// What a frame shows instead of the stored state.
#[derive(Debug, Default, Clone, Copy)]
struct Overlay<'a> {
    /// A pane being paged and its live page.
    paging: Option<(Area, &'a PageState)>,
    /// Replacement for the message line.
    status: Option<&'a DisplayLine>,
}

/// Main application state.
pub struct App {
    settings: Settings,
    settings_path: Option<PathBuf>,
    log_path: Option<PathBuf>,
    theme: Theme,
    scanner: TreeScanner,
    lister: FileLister,
    engine: MutationEngine,
    panes: Panes,
    /// Message line contents.
    status: DisplayLine,
    input: CommandInput,
    running: bool,
}

impl App {
    /// Create the application from its configuration.
    pub fn new(config: TuiConfig) -> Self {
        let options = config.settings.scan_options();
        Self {
            scanner: TreeScanner::new(options.clone()),
            lister: FileLister::new(options),
            engine: MutationEngine::new(),
            settings: config.settings,
            settings_path: config.settings_path,
            log_path: config.log_path,
            theme: Theme::default(),
            panes: Panes::new(),
            status: Message::Greeting.line(),
            input: CommandInput::new(),
            running: true,
        }
    }

    /// The current settings, including the directory commands resolve against.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The current message line.
    pub fn status(&self) -> &DisplayLine {
        &self.status
    }

    /// Whether the command loop is still going.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Directory the next relative path resolves against.
    pub fn current_dir(&self) -> &Path {
        &self.settings.last_path
    }

    /// Lines currently held by a paged pane.
    pub fn pane_lines(&self, area: Area) -> Option<&LineBuffer> {
        self.panes
            .iter()
            .find(|(candidate, _)| *candidate == area)
            .map(|(_, pane)| &pane.buffer)
    }

    /// Run the command loop until `exit` or Ctrl-C.
    pub fn run(&mut self, screen: &mut dyn Screen, keys: &mut dyn KeySource) -> AppResult<()> {
        tracing::info!(root = %self.settings.last_path.display(), "Session started");
        self.running = true;
        self.refresh();

        while self.running {
            self.draw(screen, Overlay::default())?;
            match keys.next_input()? {
                InputEvent::Resize(..) => {}
                InputEvent::Key(key) if is_force_quit(&key) => self.running = false,
                InputEvent::Key(key) => {
                    if let CommandKeyResult::Execute(line) = self.input.handle_key(key) {
                        self.execute(&line, screen, keys)?;
                    }
                }
            }
        }

        self.save_settings();
        tracing::info!("Session ended");
        Ok(())
    }

    fn layout(&self, screen: &dyn Screen) -> AppResult<Option<ScreenLayout>> {
        Ok(ScreenLayout::new(screen.area()?, &self.settings.layout))
    }

    fn draw(&self, screen: &mut dyn Screen, overlay: Overlay<'_>) -> AppResult<()> {
        screen.draw_frame(&mut |frame| self.render(frame, overlay))
    }

    fn save_settings(&self) {
        let Some(path) = &self.settings_path else {
            return;
        };
        match self.settings.save(path) {
            Ok(()) => tracing::debug!(path = %path.display(), "Settings saved"),
            Err(err) => tracing::warn!("Failed to save settings: {err}"),
        }
    }
}
