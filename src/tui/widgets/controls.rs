use crate::{
    key_handler::{Action, MoveDirection},
    presentation::PlaybackState,
    ui_state::UiState,
};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{StatefulWidget, Widget},
};

const GAP: u16 = 3;
const LEFT_MARGIN: u16 = 2;

/// Clickable buttons on the left, status on the right.
///
/// Every button registers its area with the state so that a mouse click
/// resolves to the same action as its keyboard binding.
pub struct Controls;
impl StatefulWidget for Controls {
    type State = UiState;
    fn render(self, area: Rect, buf: &mut ratatui::prelude::Buffer, state: &mut Self::State) {
        state.clear_controls();

        let theme = &state.theme;
        let button = Style::new().fg(theme.text);
        let highlight = Style::new().fg(theme.accent).add_modifier(Modifier::BOLD);

        let (play_label, play_action) = match state.get_state() {
            PlaybackState::Idle | PlaybackState::Paused => ("▶ Play", Action::Play),
            PlaybackState::Playing => ("⏸ Pause", Action::TogglePause),
            PlaybackState::Finished => ("↺ Replay", Action::Replay),
        };

        let speed_label = format!("◂ {} ▸", state.get_tier().label());

        let mute_label = match state.is_muted() {
            true => "✕ Muted",
            false => "♪ Sound",
        };

        let (save_label, save_style) = match state.show_saved() {
            true => ("✓ Saved", highlight),
            false => ("⤓ Download", button),
        };

        let buttons = [
            (Span::styled(play_label, highlight), play_action),
            (
                Span::styled(speed_label, button),
                Action::CycleSpeed(MoveDirection::Down),
            ),
            (Span::styled(mute_label, button), Action::ToggleMute),
            (Span::styled(save_label, save_style), Action::Download),
        ];

        let status = Line::from(vec![
            Span::from(state.get_state().label()).fg(status_color(state)),
            Span::from(format!("  {:>3}%", percent(state.playback.progress))).fg(theme.dimmed),
        ]);

        let status_width = status.width() as u16;
        let status_x = area.right().saturating_sub(status_width + LEFT_MARGIN);
        let mut x = area.x + LEFT_MARGIN;

        for (span, action) in buttons {
            let width = span.width() as u16;
            if x + width > status_x {
                break;
            }

            let button_area = Rect::new(x, area.y, width, 1);
            span.render(button_area, buf);
            state.push_control(button_area, action);

            x += width + GAP;
        }

        status.render(
            Rect::new(status_x, area.y, status_width.min(area.width), 1),
            buf,
        );
    }
}

fn status_color(state: &UiState) -> Color {
    match state.get_state() {
        PlaybackState::Playing => state.theme.accent,
        PlaybackState::Finished => state.theme.progress,
        _ => state.theme.dimmed,
    }
}

fn percent(progress: f64) -> u8 {
    (progress.clamp(0.0, 1.0) * 100.0).round() as u8
}
