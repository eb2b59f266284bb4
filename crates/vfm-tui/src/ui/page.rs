//! Page arithmetic and the widget that draws one page of a pane.

use std::ops::Range;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthStr;
use vfm_core::LineBuffer;

use super::{clear_row, markup::to_line};
use crate::theme::Theme;

/// Which slice of a buffer's body is visible in a pane.
///
/// A pane of height `h` shows the header, `h - 2` body lines and the page
/// indicator on its separator row. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    current_page: usize,
    lines_per_page: usize,
    total_pages: usize,
    body_len: usize,
}

impl PageState {
    /// Page through `buffer_len` lines (header included) in a pane of
    /// `viewport_height` rows, starting at `requested`.
    ///
    /// Requests below 1 start at the first page; requests past the end start
    /// at the last one.
    pub fn new(buffer_len: usize, viewport_height: u16, requested: i64) -> Self {
        let mut state = Self {
            current_page: 1,
            lines_per_page: 1,
            total_pages: 1,
            body_len: buffer_len.saturating_sub(1),
        };
        state.resize(viewport_height);
        state.current_page = requested.clamp(1, state.total_pages as i64) as usize;
        state
    }

    /// Recompute the page size for a new viewport height, keeping the
    /// current page in range.
    pub fn resize(&mut self, viewport_height: u16) {
        self.lines_per_page = usize::from(viewport_height.saturating_sub(2)).max(1);
        self.total_pages = self.body_len.div_ceil(self.lines_per_page).max(1);
        self.current_page = self.current_page.clamp(1, self.total_pages);
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn lines_per_page(&self) -> usize {
        self.lines_per_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Whether paging could show anything else.
    pub fn is_single_page(&self) -> bool {
        self.total_pages == 1
    }

    /// Advance one page. Returns false on the last page.
    pub fn next(&mut self) -> bool {
        if self.current_page < self.total_pages {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page. Returns false on the first page.
    pub fn prev(&mut self) -> bool {
        if self.current_page > 1 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    /// Indices into the buffer body shown on the current page.
    pub fn body_range(&self) -> Range<usize> {
        let start = (self.current_page - 1) * self.lines_per_page;
        let end = (start + self.lines_per_page).min(self.body_len);
        start.min(end)..end
    }

    /// Text drawn on the pane's separator row.
    pub fn indicator(&self) -> String {
        format!(" page {} from {} ", self.current_page, self.total_pages)
    }
}

/// Draws the header, one page of body lines and the page indicator.
///
/// The area is a whole pane: frame columns are left alone and its last row
/// is the separator that carries the indicator.
pub struct PageView<'a> {
    buffer: &'a LineBuffer,
    state: PageState,
    theme: &'a Theme,
}

impl<'a> PageView<'a> {
    pub fn new(buffer: &'a LineBuffer, state: PageState, theme: &'a Theme) -> Self {
        Self {
            buffer,
            state,
            theme,
        }
    }
}

impl Widget for PageView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        if area.width < 3 || area.height < 2 {
            return;
        }

        let x = area.x + 1;
        let width = area.width - 2;
        let blank = self.theme.blank_style();

        clear_row(buf, x, area.y, width, blank);
        buf.set_stringn(
            x,
            area.y,
            self.buffer.header().plain_text(),
            usize::from(width),
            self.theme.header_style(),
        );

        let body = &self.buffer.body()[self.state.body_range()];
        let separator = area.bottom() - 1;
        for (row, y) in (area.y + 1..separator).enumerate() {
            clear_row(buf, x, y, width, blank);
            if let Some(line) = body.get(row) {
                buf.set_line(x, y, &to_line(line, self.theme), width);
            }
        }

        let indicator = self.state.indicator();
        let indicator_width = indicator.width() as u16;
        if indicator_width <= width {
            let start = x + (width - indicator_width) / 2;
            buf.set_string(start, separator, indicator, self.theme.frame_style());
        }
    }
}
