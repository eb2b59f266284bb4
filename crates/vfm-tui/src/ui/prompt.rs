//! One-line panes: the message line and the command prompt.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthStr;
use vfm_core::DisplayLine;

use super::{clear_row, markup::to_line};
use crate::theme::Theme;

/// A single colored line, cleared to the end of the row.
pub struct StatusLine<'a> {
    line: &'a DisplayLine,
    theme: &'a Theme,
}

impl<'a> StatusLine<'a> {
    pub fn new(line: &'a DisplayLine, theme: &'a Theme) -> Self {
        Self { line, theme }
    }
}

impl Widget for StatusLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        if area.is_empty() {
            return;
        }
        clear_row(buf, area.x, area.y, area.width, self.theme.blank_style());
        buf.set_line(area.x, area.y, &to_line(self.line, self.theme), area.width);
    }
}

/// The prompt followed by the text being edited and a block cursor.
pub struct PromptLine<'a> {
    prompt: &'a str,
    input: &'a str,
    cursor: usize,
    theme: &'a Theme,
}

impl<'a> PromptLine<'a> {
    /// `cursor` counts characters, not bytes.
    pub fn new(prompt: &'a str, input: &'a str, cursor: usize, theme: &'a Theme) -> Self {
        Self {
            prompt,
            input,
            cursor,
            theme,
        }
    }
}

impl Widget for PromptLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        if area.is_empty() {
            return;
        }
        clear_row(buf, area.x, area.y, area.width, self.theme.blank_style());

        let (x, _) = buf.set_stringn(
            area.x,
            area.y,
            self.prompt,
            usize::from(area.width),
            self.theme.prompt_style(),
        );
        let room = area.right().saturating_sub(x);
        if room == 0 {
            return;
        }

        // Keep the cursor visible by dropping characters from the left.
        let before: String = self.input.chars().take(self.cursor).collect();
        let skip = before.width().saturating_sub(usize::from(room) - 1);
        let visible: String = self
            .input
            .chars()
            .scan(0usize, |width, c| {
                *width += c.to_string().width();
                Some((*width, c))
            })
            .filter(|(width, _)| *width > skip)
            .map(|(_, c)| c)
            .collect();
        buf.set_stringn(
            x,
            area.y,
            &visible,
            usize::from(room),
            self.theme.marker_style(vfm_core::ColorMarker::Standard),
        );

        let cursor_x = x + (before.width() - skip) as u16;
        if cursor_x < area.right() {
            buf[(cursor_x, area.y)].set_style(self.theme.cursor_style());
        }
    }
}
