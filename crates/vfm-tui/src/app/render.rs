//! Drawing the whole screen.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;

use super::{App, Overlay};
use crate::messages::Message;
use crate::ui::{Area, MainFrame, PageView, PromptLine, ScreenLayout, StatusLine};

impl App {
    pub(super) fn render(&self, frame: &mut Frame, overlay: Overlay<'_>) {
        let screen = frame.area();
        let buf = frame.buffer_mut();
        buf.set_style(screen, self.theme.blank_style());

        let Some(layout) = ScreenLayout::new(screen, &self.settings.layout) else {
            let notice = Message::TooSmall.line();
            StatusLine::new(&notice, &self.theme)
                .render(Rect::new(screen.x, screen.y, screen.width, 1), buf);
            return;
        };

        let title = Message::AppName.to_string();
        MainFrame::new(&title, layout.separators())
            .style(self.theme.frame_style())
            .render(screen, buf);

        for (area, pane) in self.panes.iter() {
            let rect = layout.pane(area);
            let state = match overlay.paging {
                Some((paged, state)) if paged == area => *state,
                _ => pane.state(rect.height),
            };
            PageView::new(&pane.buffer, state, &self.theme).render(rect, buf);
        }

        let status = overlay.status.unwrap_or(&self.status);
        StatusLine::new(status, &self.theme).render(layout.text_row(Area::CommandInfo), buf);

        let prompt = Message::Prompt.to_string();
        PromptLine::new(
            &prompt,
            self.input.buffer(),
            self.input.cursor(),
            &self.theme,
        )
        .render(layout.text_row(Area::CommandLine), buf);
    }
}
