//! Display lines with embedded color markers, and the buffers that hold them.
//!
//! A [`DisplayLine`] is plain text with up to three reserved control characters
//! mixed in. Each marker switches the color used for the text that follows it;
//! the renderer strips the markers while painting. Markers live in the ASCII
//! control range, which [`crate::is_path_valid`] rejects, so they never clash
//! with a legal path.

use std::fmt;

/// Color switch embedded in a [`DisplayLine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorMarker {
    /// Standard text color.
    #[default]
    Standard,
    /// Command highlight color.
    Command,
    /// Argument highlight color (also used for tree glyphs).
    Argument,
}

impl ColorMarker {
    /// The reserved character for this marker.
    pub const fn as_char(self) -> char {
        match self {
            Self::Standard => '\u{1}',
            Self::Command => '\u{2}',
            Self::Argument => '\u{3}',
        }
    }

    /// Decode a reserved character.
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '\u{1}' => Some(Self::Standard),
            '\u{2}' => Some(Self::Command),
            '\u{3}' => Some(Self::Argument),
            _ => None,
        }
    }

    fn is_marker(c: char) -> bool {
        Self::from_char(c).is_some()
    }
}

/// Replacement for marker characters found inside untrusted text.
const REPLACEMENT: char = '\u{FFFD}';

/// One line of text destined for a pane, possibly carrying color markers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DisplayLine(String);

impl DisplayLine {
    /// Create an empty line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a line from untrusted text, neutralizing any marker characters.
    pub fn plain(text: impl AsRef<str>) -> Self {
        let mut line = Self::new();
        line.push_text(text.as_ref());
        line
    }

    /// Append a color marker.
    pub fn push_marker(&mut self, marker: ColorMarker) {
        self.0.push(marker.as_char());
    }

    /// Append text, replacing any embedded marker characters.
    pub fn push_text(&mut self, text: &str) {
        self.0.extend(
            text.chars()
                .map(|c| if ColorMarker::is_marker(c) { REPLACEMENT } else { c }),
        );
    }

    /// Append a marker followed by text.
    pub fn push_colored(&mut self, marker: ColorMarker, text: &str) {
        self.push_marker(marker);
        self.push_text(text);
    }

    /// Builder form of [`push_colored`](Self::push_colored) with the standard color.
    pub fn standard(mut self, text: impl AsRef<str>) -> Self {
        self.push_colored(ColorMarker::Standard, text.as_ref());
        self
    }

    /// Builder form with the command color.
    pub fn command(mut self, text: impl AsRef<str>) -> Self {
        self.push_colored(ColorMarker::Command, text.as_ref());
        self
    }

    /// Builder form with the argument color.
    pub fn argument(mut self, text: impl AsRef<str>) -> Self {
        self.push_colored(ColorMarker::Argument, text.as_ref());
        self
    }

    /// Raw contents, markers included.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Contents with every marker removed.
    pub fn plain_text(&self) -> String {
        self.0.chars().filter(|c| !ColorMarker::is_marker(*c)).collect()
    }

    /// Iterate over colored runs. Text before the first marker is standard.
    pub fn segments(&self) -> Segments<'_> {
        Segments {
            rest: &self.0,
            current: ColorMarker::Standard,
        }
    }
}

impl From<&str> for DisplayLine {
    fn from(text: &str) -> Self {
        Self::plain(text)
    }
}

impl From<String> for DisplayLine {
    fn from(text: String) -> Self {
        Self::plain(text)
    }
}

impl fmt::Display for DisplayLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.plain_text())
    }
}

/// Iterator over `(color, text)` runs of a [`DisplayLine`].
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    rest: &'a str,
    current: ColorMarker,
}

impl<'a> Iterator for Segments<'a> {
    type Item = (ColorMarker, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut chars = self.rest.chars();
            let first = chars.next()?;
            if let Some(marker) = ColorMarker::from_char(first) {
                self.current = marker;
                self.rest = chars.as_str();
                continue;
            }

            let end = self
                .rest
                .find(ColorMarker::is_marker)
                .unwrap_or(self.rest.len());
            let (run, rest) = self.rest.split_at(end);
            self.rest = rest;
            return Some((self.current, run));
        }
    }
}

/// Ordered lines for a pane: element 0 is the header, the rest is the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<DisplayLine>,
}

impl LineBuffer {
    /// Create a buffer holding only its header.
    pub fn new(header: impl Into<DisplayLine>) -> Self {
        Self {
            lines: vec![header.into()],
        }
    }

    /// Append a body line.
    pub fn push(&mut self, line: impl Into<DisplayLine>) {
        self.lines.push(line.into());
    }

    /// The header line.
    pub fn header(&self) -> &DisplayLine {
        &self.lines[0]
    }

    /// Body lines (everything after the header).
    pub fn body(&self) -> &[DisplayLine] {
        &self.lines[1..]
    }

    /// Total number of lines including the header.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Always false: a buffer owns at least its header.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// All lines, header first.
    pub fn lines(&self) -> &[DisplayLine] {
        &self.lines
    }

    /// All lines with markers stripped, header first.
    pub fn plain_lines(&self) -> Vec<String> {
        self.lines.iter().map(DisplayLine::plain_text).collect()
    }
}

impl Extend<DisplayLine> for LineBuffer {
    fn extend<T: IntoIterator<Item = DisplayLine>>(&mut self, iter: T) {
        self.lines.extend(iter);
    }
}

impl<'a> IntoIterator for &'a LineBuffer {
    type Item = &'a DisplayLine;
    type IntoIter = std::slice::Iter<'a, DisplayLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
