//! Key mapping for the pager and the prompt.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::input::InputEvent;

/// What a key means while a pane is being paged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerAction {
    PreviousPage,
    NextPage,
    Quit,
    Redraw,
    Ignore,
}

impl PagerAction {
    /// Map an input event to a pager action.
    pub fn from_input(event: InputEvent) -> Self {
        match event {
            InputEvent::Resize(..) => Self::Redraw,
            InputEvent::Key(key) => Self::from_key_event(key),
        }
    }

    /// Map a key event to a pager action.
    pub fn from_key_event(event: KeyEvent) -> Self {
        match (event.code, event.modifiers) {
            (KeyCode::Char('q' | 'Q'), KeyModifiers::NONE | KeyModifiers::SHIFT) => Self::Quit,
            (KeyCode::Esc, _) => Self::Quit,

            (KeyCode::Up | KeyCode::PageUp, _) => Self::PreviousPage,
            (KeyCode::Char('k'), KeyModifiers::NONE) => Self::PreviousPage,

            (KeyCode::Down | KeyCode::PageDown, _) => Self::NextPage,
            (KeyCode::Char('j'), KeyModifiers::NONE) => Self::NextPage,

            _ => Self::Ignore,
        }
    }
}

/// Ctrl-C leaves the application from the prompt.
pub fn is_force_quit(event: &KeyEvent) -> bool {
    event.code == KeyCode::Char('c') && event.modifiers.contains(KeyModifiers::CONTROL)
}
