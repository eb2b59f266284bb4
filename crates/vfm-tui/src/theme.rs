//! Color theme for the TUI.
//!
//! The palette is fixed: a green double-line frame on black, gray text, and
//! two shades of yellow for the command and argument markers.

use ratatui::style::{Color, Modifier, Style};
use vfm_core::ColorMarker;

/// Color theme for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub background: Color,
    pub frame: Color,

    // Marker colors
    pub standard: Color,
    pub command: Color,
    pub argument: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::Black,
            frame: Color::Green,
            standard: Color::Gray,
            command: Color::LightYellow,
            argument: Color::Yellow,
        }
    }
}

impl Theme {
    /// Style for text following `marker`.
    pub fn marker_style(&self, marker: ColorMarker) -> Style {
        let fg = match marker {
            ColorMarker::Standard => self.standard,
            ColorMarker::Command => self.command,
            ColorMarker::Argument => self.argument,
        };
        Style::default().fg(fg).bg(self.background)
    }

    /// Style of the frame lines.
    pub fn frame_style(&self) -> Style {
        Style::default().fg(self.frame).bg(self.background)
    }

    /// Pane headers are drawn inverted.
    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.background)
            .bg(self.command)
            .add_modifier(Modifier::BOLD)
    }

    /// Style of the prompt marker.
    pub fn prompt_style(&self) -> Style {
        self.marker_style(ColorMarker::Command)
    }

    /// Style of the block cursor in the prompt.
    pub fn cursor_style(&self) -> Style {
        Style::default().fg(self.background).bg(self.standard)
    }

    /// Blank cell style.
    pub fn blank_style(&self) -> Style {
        self.marker_style(ColorMarker::Standard)
    }
}
