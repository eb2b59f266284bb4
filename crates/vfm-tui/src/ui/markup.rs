//! Conversion of marker-carrying lines into styled ratatui lines.

use ratatui::text::{Line, Span};
use vfm_core::DisplayLine;

use crate::theme::Theme;

/// Style every colored run of `line` with the theme's marker colors.
///
/// The markers themselves never reach the screen.
pub fn to_line<'a>(line: &'a DisplayLine, theme: &Theme) -> Line<'a> {
    line.segments()
        .filter(|(_, text)| !text.is_empty())
        .map(|(marker, text)| Span::styled(text, theme.marker_style(marker)))
        .collect::<Vec<_>>()
        .into()
}
