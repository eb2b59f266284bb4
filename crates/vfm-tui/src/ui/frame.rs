//! The double-line frame around all panes.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthStr;

/// Border glyphs.
const TOP_LEFT: char = '╔';
const TOP_RIGHT: char = '╗';
const BOTTOM_LEFT: char = '╚';
const BOTTOM_RIGHT: char = '╝';
const HORIZONTAL: char = '═';
const VERTICAL: char = '║';
const TEE_LEFT: char = '╠';
const TEE_RIGHT: char = '╣';

/// Outer border plus one horizontal separator below each pane.
///
/// The last row of the area is always drawn as the bottom border; other
/// separator rows become `╠═╣`.
pub struct MainFrame<'a> {
    title: &'a str,
    separators: Vec<u16>,
    style: Style,
}

impl<'a> MainFrame<'a> {
    pub fn new(title: &'a str, separators: impl IntoIterator<Item = u16>) -> Self {
        Self {
            title,
            separators: separators.into_iter().collect(),
            style: Style::default(),
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    fn horizontal(&self, buf: &mut Buffer, area: Rect, y: u16, left: char, right: char) {
        let last = area.right() - 1;
        for x in area.x..area.right() {
            let glyph = match x {
                _ if x == area.x => left,
                _ if x == last => right,
                _ => HORIZONTAL,
            };
            buf[(x, y)].set_char(glyph).set_style(self.style);
        }
    }
}

impl Widget for MainFrame<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        if area.width < 2 || area.height < 2 {
            return;
        }

        let bottom = area.bottom() - 1;
        for y in area.y + 1..bottom {
            if self.separators.contains(&y) {
                self.horizontal(buf, area, y, TEE_LEFT, TEE_RIGHT);
            } else {
                buf[(area.x, y)].set_char(VERTICAL).set_style(self.style);
                buf[(area.right() - 1, y)].set_char(VERTICAL).set_style(self.style);
            }
        }
        self.horizontal(buf, area, area.y, TOP_LEFT, TOP_RIGHT);
        self.horizontal(buf, area, bottom, BOTTOM_LEFT, BOTTOM_RIGHT);

        let title_width = self.title.width() as u16;
        if title_width + 2 <= area.width {
            let x = area.x + (area.width - title_width) / 2;
            buf.set_string(x, area.y, self.title, self.style);
        }
    }
}
