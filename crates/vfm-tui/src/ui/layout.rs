//! Row allocation for the five screen panes.
//!
//! Panes are stacked top to bottom below the frame's top border. Each one
//! ends with a separator row of the frame, so a pane of height `h` has `h - 1`
//! rows for text. Every pane except the directory list has a fixed height;
//! the directory list takes what is left.

use ratatui::layout::Rect;
use strum::{EnumCount, EnumIter, IntoEnumIterator};
use vfm_core::{LayoutConfig, MIN_PANE_ROWS};

/// A region of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount)]
pub enum Area {
    DirList,
    FileList,
    Info,
    CommandInfo,
    CommandLine,
}

/// The rows of every pane for one terminal size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    screen: Rect,
    panes: [Rect; Area::COUNT],
}

impl ScreenLayout {
    /// Allocate rows inside `screen`.
    ///
    /// Returns `None` when the screen is smaller than the configured minimum
    /// or too short for the fixed panes plus a usable directory pane.
    pub fn new(screen: Rect, config: &LayoutConfig) -> Option<Self> {
        if screen.width < config.min_width.max(3) || screen.height < config.min_height {
            return None;
        }
        if screen.height < config.fixed_rows() + MIN_PANE_ROWS {
            return None;
        }

        let mut panes = [Rect::default(); Area::COUNT];
        let mut bottom = screen.bottom();
        for (area, rows) in [
            (Area::CommandLine, config.command_rows),
            (Area::CommandInfo, config.command_info_rows),
            (Area::Info, config.info_rows),
            (Area::FileList, config.file_list_rows),
        ] {
            let top = bottom - rows;
            panes[area as usize] = Rect::new(screen.x, top, screen.width, rows);
            bottom = top;
        }

        let first = screen.y + 1;
        panes[Area::DirList as usize] = Rect::new(screen.x, first, screen.width, bottom - first);

        Some(Self { screen, panes })
    }

    /// The full screen the layout was computed for.
    pub fn screen(&self) -> Rect {
        self.screen
    }

    /// Rows of `area`, frame columns and bottom separator included.
    pub fn pane(&self, area: Area) -> Rect {
        self.panes[area as usize]
    }

    /// The first text row of `area`, inside the frame columns.
    pub fn text_row(&self, area: Area) -> Rect {
        let pane = self.pane(area);
        Rect::new(pane.x + 1, pane.y, pane.width.saturating_sub(2), 1)
    }

    /// Rows that close a pane, top to bottom.
    pub fn separators(&self) -> impl Iterator<Item = u16> + '_ {
        Area::iter().map(|area| self.pane(area).bottom() - 1)
    }
}
