use crate::{
    REFRESH_RATE,
    app_core::Scrollcard,
    key_handler::*,
    ui_state::UiState,
};
use anyhow::Result;
use ratatui::crossterm::event::{
    self, Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind,
};
use std::time::{Duration, Instant};

use KeyCode::*;

pub fn handle_key_event(key_event: KeyEvent, state: &UiState) -> Option<Action> {
    if let Some(action) = global_commands(&key_event) {
        return Some(action);
    }

    match state.popup_open() {
        true => Some(Action::ClosePopup),
        false => handle_presentation(&key_event, state),
    }
}

fn global_commands(key: &KeyEvent) -> Option<Action> {
    match (key.modifiers, key.code) {
        (C, Char('c')) => Some(Action::QUIT),
        (X, Char('q')) => Some(Action::QUIT),
        _ => None,
    }
}

fn handle_presentation(key: &KeyEvent, state: &UiState) -> Option<Action> {
    let page = state.page_rows().max(1);

    match (key.modifiers, key.code) {
        // PLAYBACK COMMANDS
        (X, Char(' ')) => Some(Action::TogglePause),
        (X, Enter) | (X, Char('p')) => Some(Action::Play),
        (X, Char('r')) => Some(Action::Replay),

        (X, Char('s')) => Some(Action::CycleSpeed(MoveDirection::Down)),
        (S, Char('S')) => Some(Action::CycleSpeed(MoveDirection::Up)),
        (X, Char('1')) => Some(Action::SetSpeed(SpeedTier::Slow)),
        (X, Char('2')) => Some(Action::SetSpeed(SpeedTier::Normal)),
        (X, Char('3')) => Some(Action::SetSpeed(SpeedTier::Fast)),
        (X, Char('4')) => Some(Action::SetSpeed(SpeedTier::VeryFast)),

        (X, Char('m')) => Some(Action::ToggleMute),
        (X, Char('d')) => Some(Action::Download),

        // SCRUBBING
        (X, Char('j')) | (X, Down) => Some(Action::Scroll(Director::Down(SCRUB_SMALL))),
        (X, Char('k')) | (X, Up) => Some(Action::Scroll(Director::Up(SCRUB_SMALL))),
        (X, PageDown) => Some(Action::Scroll(Director::Down(page))),
        (X, PageUp) => Some(Action::Scroll(Director::Up(page))),
        (X, Char('g')) | (X, Home) => Some(Action::Scroll(Director::Top)),
        (S, Char('G')) | (X, End) => Some(Action::Scroll(Director::Bottom)),

        _ => None,
    }
}

pub fn handle_mouse_event(mouse: MouseEvent, state: &UiState) -> Option<Action> {
    let (col, row) = (mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) if state.popup_open() => Some(Action::ClosePopup),
        MouseEventKind::Down(MouseButton::Left) => match state.control_at(col, row) {
            Some(action) => Some(action),
            None if state.in_message(col, row) => Some(Action::BeginDrag(row)),
            None => None,
        },
        MouseEventKind::Drag(MouseButton::Left) => Some(Action::DragTo(row)),
        MouseEventKind::Up(MouseButton::Left) => Some(Action::EndDrag),
        MouseEventKind::ScrollDown => Some(Action::Scroll(Director::Down(SCRUB_WHEEL))),
        MouseEventKind::ScrollUp => Some(Action::Scroll(Director::Up(SCRUB_WHEEL))),
        _ => None,
    }
}

pub fn next_event() -> Result<Option<Event>> {
    match event::poll(Duration::from_millis(REFRESH_RATE))? {
        true => Ok(Some(event::read()?)),
        false => Ok(None),
    }
}

impl Scrollcard {
    #[rustfmt::skip]
    pub fn handle_action(&mut self, action: Action) -> Result<()> {
        let now = Instant::now();
        let ctl = &mut self.controller;

        match action {
            // Playback
            Action::Play            => ctl.play(now),
            Action::TogglePause     => ctl.toggle_playback(now),
            Action::Replay          => ctl.replay(),
            Action::SetSpeed(t)     => ctl.set_speed(t, now),
            Action::CycleSpeed(d)   => ctl.cycle_speed(d, now),
            Action::ToggleMute      => ctl.toggle_mute(),

            // Message
            Action::Scroll(Director::Down(n)) => ctl.manual_scrub(n as f64, now),
            Action::Scroll(Director::Up(n))   => ctl.manual_scrub(-(n as f64), now),
            Action::Scroll(Director::Top)     => ctl.scrub_to_start(now),
            Action::Scroll(Director::Bottom)  => ctl.scrub_to_end(now),
            Action::BeginDrag(row)  => ctl.begin_drag(row, now),
            Action::DragTo(row)     => ctl.drag_to(row, now),
            Action::EndDrag         => ctl.end_drag(),
            Action::Download        => self.download(now)?,

            // Ops
            Action::ClosePopup      => self.ui.close_popup(),
            Action::QUIT            => self.ui.quit(),
        }
        Ok(())
    }
}
