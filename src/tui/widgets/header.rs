use crate::ui_state::UiState;
use ratatui::{
    style::{Modifier, Stylize},
    text::Line,
    widgets::{StatefulWidget, Widget},
};

pub struct Header;
impl StatefulWidget for Header {
    type State = UiState;
    fn render(
        self,
        area: ratatui::prelude::Rect,
        buf: &mut ratatui::prelude::Buffer,
        state: &mut Self::State,
    ) {
        Line::from(state.title.as_str())
            .centered()
            .fg(state.theme.accent)
            .add_modifier(Modifier::BOLD)
            .render(area, buf);
    }
}
