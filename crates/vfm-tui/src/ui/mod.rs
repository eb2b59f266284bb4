//! UI components and widgets.

mod frame;
mod layout;
mod markup;
mod page;
mod prompt;

pub use frame::MainFrame;
pub use layout::{Area, ScreenLayout};
pub use markup::to_line;
pub use page::{PageState, PageView};
pub use prompt::{PromptLine, StatusLine};

use ratatui::buffer::Buffer;
use ratatui::style::Style;

/// Blank `width` cells of row `y` starting at `x`.
pub(crate) fn clear_row(buf: &mut Buffer, x: u16, y: u16, width: u16, style: Style) {
    for col in x..x.saturating_add(width) {
        buf[(col, y)].set_char(' ').set_style(style);
    }
}

/// Format a byte size in human-readable form.
pub fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_binary_units() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2 KiB");
    }
}
