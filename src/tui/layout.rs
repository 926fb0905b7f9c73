use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Padding},
};

static MESSAGE_PADDING: Padding = Padding {
    left: 3,
    right: 3,
    top: 1,
    bottom: 1,
};

pub struct AppLayout {
    pub header: Rect,
    pub message: Rect,
    pub progress_bar: Rect,
    pub controls: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let [header, message, progress_bar, controls] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .areas(area);

        AppLayout {
            header,
            message,
            progress_bar,
            controls,
        }
    }

    /// Where the message text actually lands, inside borders and padding
    pub fn message_viewport(&self) -> Rect {
        message_frame().inner(self.message)
    }
}

/// Border and padding around the message. Styling is left to the widget.
pub fn message_frame() -> Block<'static> {
    Block::bordered().padding(MESSAGE_PADDING)
}
