use super::{AppLayout, Controls, ErrorMsg, Header, MessageWindow, Progress};
use crate::ui_state::UiState;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Stylize,
    widgets::{Block, Clear, StatefulWidget, Widget},
};

pub fn render(f: &mut Frame, state: &mut UiState) {
    let layout = AppLayout::new(f.area());

    Block::new()
        .bg(state.theme.bg)
        .render(f.area(), f.buffer_mut());

    Header.render(layout.header, f.buffer_mut(), state);
    MessageWindow.render(layout.message, f.buffer_mut(), state);
    Progress.render(layout.progress_bar, f.buffer_mut(), state);
    Controls.render(layout.controls, f.buffer_mut(), state);

    if state.popup_open() {
        let popup_rect = centered_rect(40, 30, f.area());

        Clear.render(popup_rect, f.buffer_mut());
        ErrorMsg.render(popup_rect, f.buffer_mut(), state);
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}
