//! Command line parsing and the prompt editor.

use std::mem;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use strum::{AsRefStr, EnumIter, EnumString};

/// Commands remembered by the prompt.
const HISTORY_LIMIT: usize = 50;

/// Split a command line into words.
///
/// Words are separated by whitespace. A double-quoted segment is a single
/// word and may contain spaces; an unterminated quote runs to the end of the
/// line. Empty quotes produce no word.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => {
                if !current.is_empty() {
                    words.push(mem::take(&mut current));
                }
                in_quotes = !in_quotes;
            }
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    words.push(mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// A command name typed at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter, AsRefStr)]
#[strum(ascii_case_insensitive)]
pub enum Command {
    #[strum(serialize = "help")]
    Help,
    #[strum(to_string = "dir", serialize = "dirs")]
    Dir,
    #[strum(serialize = "files")]
    Files,
    #[strum(serialize = "info")]
    Info,
    #[strum(serialize = "copy")]
    Copy,
    #[strum(serialize = "move")]
    Move,
    #[strum(serialize = "dcopy")]
    DirCopy,
    #[strum(serialize = "dmove")]
    DirMove,
    #[strum(serialize = "del")]
    Delete,
    #[strum(serialize = "ddel")]
    DirDelete,
    #[strum(serialize = "log")]
    Log,
    #[strum(serialize = "version")]
    Version,
    #[strum(serialize = "exit")]
    Exit,
    #[strum(disabled)]
    Unknown,
}

impl Command {
    /// Look up a command word. Unrecognized words map to [`Command::Unknown`].
    pub fn parse(word: &str) -> Self {
        word.parse().unwrap_or(Self::Unknown)
    }

    /// Whether the command changes the filesystem.
    pub fn is_mutation(self) -> bool {
        matches!(
            self,
            Self::Copy
                | Self::Move
                | Self::DirCopy
                | Self::DirMove
                | Self::Delete
                | Self::DirDelete
        )
    }
}

/// Flags that take an integer value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
pub enum Flag {
    /// Page to open a pane on.
    #[strum(serialize = "-p")]
    Page,
    /// Tree depth.
    #[strum(serialize = "-l")]
    Level,
}

/// The integer following `flag`, or 0 when the flag is absent or its value
/// is not a number.
pub fn find_flag(words: &[String], flag: Flag) -> i64 {
    words
        .iter()
        .position(|word| word == flag.as_ref())
        .and_then(|i| words.get(i + 1))
        .and_then(|value| value.parse().ok())
        .unwrap_or(0)
}

/// Result of handling a key in the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandKeyResult {
    /// Keep editing.
    Continue,
    /// The line was discarded.
    Cancel,
    /// Run this line.
    Execute(String),
}

/// Command input state.
///
/// The cursor counts characters, so multi-byte input edits correctly.
#[derive(Debug, Clone, Default)]
pub struct CommandInput {
    /// Input buffer.
    buffer: String,
    /// Cursor position.
    cursor: usize,
    /// Previously executed lines, oldest first.
    history: Vec<String>,
    /// Entry of `history` being shown, if browsing.
    history_index: Option<usize>,
}

impl CommandInput {
    /// Create a new empty command input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the input buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.history_index = None;
    }

    /// Get the current input buffer.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Get the cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Lines executed so far, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    fn char_count(&self) -> usize {
        self.buffer.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_index)
            .map_or(self.buffer.len(), |(i, _)| i)
    }

    fn load(&mut self, index: Option<usize>) {
        self.history_index = index;
        self.buffer = index
            .and_then(|i| self.history.get(i).cloned())
            .unwrap_or_default();
        self.cursor = self.char_count();
    }

    fn remember(&mut self, line: &str) {
        if line.trim().is_empty() || self.history.last().is_some_and(|last| last == line) {
            return;
        }
        self.history.push(line.to_string());
        if self.history.len() > HISTORY_LIMIT {
            self.history.remove(0);
        }
    }

    /// Handle a key event, returning whether to execute the command.
    pub fn handle_key(&mut self, key: KeyEvent) -> CommandKeyResult {
        match (key.code, key.modifiers) {
            // Execute command on Enter
            (KeyCode::Enter, _) => {
                let cmd = mem::take(&mut self.buffer);
                self.clear();
                self.remember(&cmd);
                CommandKeyResult::Execute(cmd)
            }
            // Cancel on Escape
            (KeyCode::Esc, _) => {
                self.clear();
                CommandKeyResult::Cancel
            }
            // Delete char before cursor
            (KeyCode::Backspace, _) => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_index(self.cursor);
                    self.buffer.remove(at);
                    CommandKeyResult::Continue
                } else if self.buffer.is_empty() {
                    CommandKeyResult::Cancel
                } else {
                    CommandKeyResult::Continue
                }
            }
            // Delete char at cursor
            (KeyCode::Delete, _) => {
                if self.cursor < self.char_count() {
                    let at = self.byte_index(self.cursor);
                    self.buffer.remove(at);
                }
                CommandKeyResult::Continue
            }
            // Move cursor
            (KeyCode::Left, _) => {
                self.cursor = self.cursor.saturating_sub(1);
                CommandKeyResult::Continue
            }
            (KeyCode::Right, _) => {
                self.cursor = (self.cursor + 1).min(self.char_count());
                CommandKeyResult::Continue
            }
            (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
                self.cursor = 0;
                CommandKeyResult::Continue
            }
            (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                self.cursor = self.char_count();
                CommandKeyResult::Continue
            }
            // History
            (KeyCode::Up, _) => {
                let previous = match self.history_index {
                    _ if self.history.is_empty() => None,
                    None => Some(self.history.len() - 1),
                    Some(i) => Some(i.saturating_sub(1)),
                };
                if previous.is_some() {
                    self.load(previous);
                }
                CommandKeyResult::Continue
            }
            (KeyCode::Down, _) => {
                if let Some(i) = self.history_index {
                    let next = (i + 1 < self.history.len()).then_some(i + 1);
                    self.load(next);
                }
                CommandKeyResult::Continue
            }
            // Clear line
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                self.clear();
                CommandKeyResult::Continue
            }
            // Type character
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                let at = self.byte_index(self.cursor);
                self.buffer.insert(at, c);
                self.cursor += 1;
                CommandKeyResult::Continue
            }
            _ => CommandKeyResult::Continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn type_text(input: &mut CommandInput, text: &str) {
        for c in text.chars() {
            input.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
    }

    fn press(input: &mut CommandInput, code: KeyCode) -> CommandKeyResult {
        input.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_tokenize_plain_words() {
        assert_eq!(tokenize("  copy  a.txt   backup "), words(&["copy", "a.txt", "backup"]));
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_tokenize_quotes() {
        assert_eq!(
            tokenize(r#"copy "my file.txt" "/mnt/back up""#),
            words(&["copy", "my file.txt", "/mnt/back up"])
        );
        assert_eq!(tokenize(r#"info """#), words(&["info"]));
        assert_eq!(tokenize(r#"dir "Program Files"#), words(&["dir", "Program Files"]));
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("dir"), Command::Dir);
        assert_eq!(Command::parse("dirs"), Command::Dir);
        assert_eq!(Command::parse("DCOPY"), Command::DirCopy);
        assert_eq!(Command::parse("Exit"), Command::Exit);
        assert_eq!(Command::parse("rm"), Command::Unknown);
        assert_eq!(Command::parse("Unknown"), Command::Unknown);
    }

    #[test]
    fn test_mutations() {
        assert!(Command::DirDelete.is_mutation());
        assert!(!Command::Info.is_mutation());
    }

    #[test]
    fn test_find_flag() {
        let line = words(&["dir", "/tmp", "-p", "3", "-l", "x"]);
        assert_eq!(find_flag(&line, Flag::Page), 3);
        assert_eq!(find_flag(&line, Flag::Level), 0);
        assert_eq!(find_flag(&words(&["dir", "-p"]), Flag::Page), 0);
        assert_eq!(find_flag(&words(&["dir", "-p", "-2"]), Flag::Page), -2);
    }

    #[test]
    fn test_input_editing() {
        let mut input = CommandInput::new();
        type_text(&mut input, "dr");
        press(&mut input, KeyCode::Left);
        type_text(&mut input, "i");
        assert_eq!(input.buffer(), "dir");
        assert_eq!(input.cursor(), 2);

        press(&mut input, KeyCode::Home);
        press(&mut input, KeyCode::Delete);
        assert_eq!(input.buffer(), "ir");

        press(&mut input, KeyCode::End);
        press(&mut input, KeyCode::Backspace);
        assert_eq!(input.buffer(), "i");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = CommandInput::new();
        type_text(&mut input, "info Документы");
        press(&mut input, KeyCode::Backspace);
        press(&mut input, KeyCode::Left);
        press(&mut input, KeyCode::Backspace);
        assert_eq!(input.buffer(), "info Докумет");
        assert_eq!(input.cursor(), 11);
    }

    #[test]
    fn test_enter_executes_and_clears() {
        let mut input = CommandInput::new();
        type_text(&mut input, "files -p 2");
        assert_eq!(
            press(&mut input, KeyCode::Enter),
            CommandKeyResult::Execute("files -p 2".into())
        );
        assert_eq!(input.buffer(), "");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_backspace_on_empty_cancels() {
        let mut input = CommandInput::new();
        assert_eq!(press(&mut input, KeyCode::Backspace), CommandKeyResult::Cancel);
        type_text(&mut input, "x");
        assert_eq!(press(&mut input, KeyCode::Esc), CommandKeyResult::Cancel);
        assert_eq!(input.buffer(), "");
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut input = CommandInput::new();
        type_text(&mut input, "ddel junk");
        input.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(input.buffer(), "");
    }

    #[test]
    fn test_history_browsing() {
        let mut input = CommandInput::new();
        for line in ["dir", "files", "files", "info"] {
            type_text(&mut input, line);
            press(&mut input, KeyCode::Enter);
        }
        assert_eq!(input.history(), &words(&["dir", "files", "info"])[..]);

        press(&mut input, KeyCode::Up);
        assert_eq!(input.buffer(), "info");
        press(&mut input, KeyCode::Up);
        press(&mut input, KeyCode::Up);
        press(&mut input, KeyCode::Up);
        assert_eq!(input.buffer(), "dir");
        assert_eq!(input.cursor(), 3);

        press(&mut input, KeyCode::Down);
        assert_eq!(input.buffer(), "files");
        press(&mut input, KeyCode::Down);
        press(&mut input, KeyCode::Down);
        assert_eq!(input.buffer(), "");
    }

    #[test]
    fn test_blank_lines_are_not_remembered() {
        let mut input = CommandInput::new();
        type_text(&mut input, "   ");
        press(&mut input, KeyCode::Enter);
        assert!(input.history().is_empty());
        press(&mut input, KeyCode::Up);
        assert_eq!(input.buffer(), "");
    }
}
