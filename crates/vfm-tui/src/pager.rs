//! Interactive paging of one pane.
//!
//! A [`PagedView`] alternates between drawing the current page and waiting
//! for a key until the user quits. The key read is the only place it blocks.

use crate::app::AppResult;
use crate::event::PagerAction;
use crate::input::{InputEvent, KeySource};
use crate::ui::PageState;

/// Where the pager loop is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerPhase {
    /// The current page must be drawn.
    Rendering,
    /// Blocked on the next key.
    AwaitingKey,
    /// Paging is over.
    Done,
}

/// Drives a [`PageState`] from key input.
#[derive(Debug, Clone)]
pub struct PagedView {
    state: PageState,
    interactive: bool,
    phase: PagerPhase,
}

impl PagedView {
    /// A view over `buffer_len` lines (header included) in a pane of
    /// `viewport_height` rows. A non-interactive view renders once.
    pub fn new(buffer_len: usize, viewport_height: u16, start_page: i64, interactive: bool) -> Self {
        Self {
            state: PageState::new(buffer_len, viewport_height, start_page),
            interactive,
            phase: PagerPhase::Rendering,
        }
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn phase(&self) -> PagerPhase {
        self.phase
    }

    /// Apply one input event and return the next phase.
    pub fn handle(&mut self, event: InputEvent) -> PagerPhase {
        self.phase = match PagerAction::from_input(event) {
            PagerAction::PreviousPage if self.state.prev() => PagerPhase::Rendering,
            PagerAction::NextPage if self.state.next() => PagerPhase::Rendering,
            PagerAction::Redraw => PagerPhase::Rendering,
            PagerAction::Quit => PagerPhase::Done,
            _ => PagerPhase::AwaitingKey,
        };
        self.phase
    }

    /// Run until the user quits, calling `render` whenever the page changes.
    ///
    /// `render` may resize the state when the pane height changed. The final
    /// state is returned so the caller can remember the page.
    pub fn run<K, F>(mut self, keys: &mut K, mut render: F) -> AppResult<PageState>
    where
        K: KeySource + ?Sized,
        F: FnMut(&mut PageState) -> AppResult<()>,
    {
        loop {
            match self.phase {
                PagerPhase::Rendering => {
                    render(&mut self.state)?;
                    self.phase = if self.interactive && !self.state.is_single_page() {
                        PagerPhase::AwaitingKey
                    } else {
                        PagerPhase::Done
                    };
                }
                PagerPhase::AwaitingKey => {
                    let event = keys.next_input()?;
                    self.handle(event);
                }
                PagerPhase::Done => return Ok(self.state),
            }
        }
    }
}
