use crate::{tui::message_frame, ui_state::UiState};
use ratatui::{
    layout::Alignment,
    style::Stylize,
    text::Line,
    widgets::{BorderType, Paragraph, StatefulWidget, Widget},
};

const KEY_HINTS: &str = " ␣ play/pause · j/k scrub · s speed · m mute · d save · q quit ";

/// The scrolling message. Rows above `scroll_row` have already rolled past.
pub struct MessageWindow;
impl StatefulWidget for MessageWindow {
    type State = UiState;
    fn render(
        self,
        area: ratatui::prelude::Rect,
        buf: &mut ratatui::prelude::Buffer,
        state: &mut Self::State,
    ) {
        let block = message_frame()
            .border_type(BorderType::Rounded)
            .border_style(state.theme.dimmed)
            .title_bottom(Line::from(KEY_HINTS).alignment(Alignment::Center))
            .bg(state.theme.bg);

        let inner = block.inner(area);
        state.set_message_area(inner);

        let lines = state
            .message
            .lines()
            .iter()
            .map(|l| Line::from(l.as_str()))
            .collect::<Vec<_>>();

        Paragraph::new(lines)
            .fg(state.theme.text)
            .block(block)
            .scroll((state.playback.scroll_row, 0))
            .render(area, buf);
    }
}
