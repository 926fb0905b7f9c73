mod action;

pub use action::{handle_key_event, handle_mouse_event, next_event};

use crate::presentation::SpeedTier;
use ratatui::crossterm::event::KeyModifiers;

const X: KeyModifiers = KeyModifiers::NONE;
const S: KeyModifiers = KeyModifiers::SHIFT;
const C: KeyModifiers = KeyModifiers::CONTROL;

const SCRUB_SMALL: usize = 1;
const SCRUB_WHEEL: usize = 3;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Action {
    // Playback
    Play,
    TogglePause,
    Replay,
    SetSpeed(SpeedTier),
    CycleSpeed(MoveDirection),
    ToggleMute,

    // Message
    Scroll(Director),
    BeginDrag(u16),
    DragTo(u16),
    EndDrag,
    Download,

    // Ops
    ClosePopup,
    QUIT,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Director {
    Up(usize),
    Down(usize),
    Top,
    Bottom,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum MoveDirection {
    Up,
    Down,
}
