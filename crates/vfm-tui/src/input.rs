//! Terminal input.
//!
//! Everything the UI waits for comes through a [`KeySource`]. The production
//! source blocks on crossterm's event queue; [`ScriptedKeys`] replays a fixed
//! sequence and drives headless runs.

use std::collections::VecDeque;
use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// One input event relevant to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A key press.
    Key(KeyEvent),
    /// The terminal was resized to `(columns, rows)`.
    Resize(u16, u16),
}

impl InputEvent {
    /// A key press without modifiers.
    pub fn key(code: KeyCode) -> Self {
        Self::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    /// A character key press.
    pub fn char(c: char) -> Self {
        Self::key(KeyCode::Char(c))
    }
}

/// A blocking supplier of input events.
pub trait KeySource {
    /// Wait for the next event.
    fn next_input(&mut self) -> io::Result<InputEvent>;
}

/// Reads from the terminal through crossterm.
#[derive(Debug, Default)]
pub struct CrosstermKeys;

impl KeySource for CrosstermKeys {
    fn next_input(&mut self) -> io::Result<InputEvent> {
        loop {
            match event::read()? {
                // Only handle key press events (not release)
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    return Ok(InputEvent::Key(key));
                }
                Event::Resize(w, h) => return Ok(InputEvent::Resize(w, h)),
                _ => {}
            }
        }
    }
}

/// Replays a fixed sequence of events.
///
/// Once the script is exhausted every read fails with
/// [`io::ErrorKind::UnexpectedEof`].
#[derive(Debug, Default, Clone)]
pub struct ScriptedKeys {
    events: VecDeque<InputEvent>,
}

impl ScriptedKeys {
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    /// Queue one event.
    pub fn push(&mut self, event: InputEvent) -> &mut Self {
        self.events.push_back(event);
        self
    }

    /// Queue `text` typed character by character, followed by Enter.
    pub fn type_line(&mut self, text: &str) -> &mut Self {
        self.events.extend(text.chars().map(InputEvent::char));
        self.events.push_back(InputEvent::key(KeyCode::Enter));
        self
    }

    /// Events not consumed yet.
    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl KeySource for ScriptedKeys {
    fn next_input(&mut self) -> io::Result<InputEvent> {
        self.events
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "input script exhausted"))
    }
}
