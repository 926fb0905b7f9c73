use super::DUR_WIDTH;
use crate::{DurationStyle, get_readable_duration, ui_state::UiState};
use ratatui::{
    layout::{Constraint, Layout},
    style::Stylize,
    text::Text,
    widgets::{LineGauge, StatefulWidget, Widget},
};

const BAR_ACTIVE: &str = "━";
const BAR_INACTIVE: &str = "─";

/// Elapsed timer, gauge, total timer
pub struct Progress;
impl StatefulWidget for Progress {
    type State = UiState;
    fn render(
        self,
        area: ratatui::prelude::Rect,
        buf: &mut ratatui::prelude::Buffer,
        state: &mut Self::State,
    ) {
        let theme = &state.theme;
        let playback = &state.playback;

        let [_, elapsed_area, _, bar_area, _, duration_area, _] = Layout::horizontal([
            Constraint::Length(1),
            Constraint::Length(DUR_WIDTH),
            Constraint::Length(2),
            Constraint::Fill(1),
            Constraint::Length(2),
            Constraint::Length(DUR_WIDTH),
            Constraint::Length(1),
        ])
        .areas(area);

        Text::from(get_readable_duration(playback.elapsed, DurationStyle::Compact))
            .fg(theme.dimmed)
            .right_aligned()
            .render(elapsed_area, buf);

        Text::from(get_readable_duration(playback.duration, DurationStyle::Compact))
            .fg(theme.dimmed)
            .render(duration_area, buf);

        LineGauge::default()
            .filled_style(theme.progress)
            .unfilled_style(theme.progress_track)
            .filled_symbol(BAR_ACTIVE)
            .unfilled_symbol(BAR_INACTIVE)
            .label("")
            .ratio(playback.progress.clamp(0.0, 1.0))
            .render(bar_area, buf);
    }
}
