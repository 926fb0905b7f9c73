mod message;

pub use message::{MessageView, wrap_text};

use crate::{
    config::{Config, ThemeConfig},
    download::DownloadFeedback,
    key_handler::Action,
    presentation::{PlaybackSnapshot, PlaybackState, SpeedTier},
};
use anyhow::Error;
use ratatui::layout::{Position, Rect};
use std::time::{Duration, Instant};

pub struct UiState {
    pub(crate) title: String,
    pub(crate) message: MessageView,
    pub(crate) theme: ThemeConfig,

    pub(crate) playback: PlaybackSnapshot,
    pub(crate) feedback: DownloadFeedback,
    saved_visible: bool,

    // Filled in while rendering, read back by the mouse handler
    message_area: Rect,
    controls: Vec<(Rect, Action)>,

    error: Option<String>,
    quit: bool,
}

impl UiState {
    pub fn new(config: &Config) -> Self {
        UiState {
            title: config.title.clone(),
            message: MessageView::new(&config.message),
            theme: config.theme.clone(),

            playback: PlaybackSnapshot {
                state: PlaybackState::Idle,
                progress: 0.0,
                scroll_row: 0,
                elapsed: Duration::ZERO,
                duration: config.speeds.duration(config.speed),
                tier: config.speed,
                muted: false,
            },
            feedback: DownloadFeedback::default(),
            saved_visible: false,

            message_area: Rect::default(),
            controls: Vec::new(),

            error: None,
            quit: false,
        }
    }

    pub fn sync_playback(&mut self, snapshot: PlaybackSnapshot, now: Instant) {
        self.playback = snapshot;
        self.saved_visible = self.feedback.is_showing(now);
    }
}

// ===============
//    PLAYBACK
// ===============
impl UiState {
    pub fn get_state(&self) -> PlaybackState {
        self.playback.state
    }

    pub fn get_tier(&self) -> SpeedTier {
        self.playback.tier
    }

    pub fn is_muted(&self) -> bool {
        self.playback.muted
    }

    pub fn show_saved(&self) -> bool {
        self.saved_visible
    }
}

// ===============
//    HIT AREAS
// ===============
impl UiState {
    pub fn set_message_area(&mut self, area: Rect) {
        self.message_area = area;
    }

    pub fn clear_controls(&mut self) {
        self.controls.clear();
    }

    pub fn push_control(&mut self, area: Rect, action: Action) {
        self.controls.push((area, action));
    }

    pub fn control_at(&self, col: u16, row: u16) -> Option<Action> {
        self.controls
            .iter()
            .find(|(area, _)| area.contains(Position::new(col, row)))
            .map(|(_, action)| *action)
    }

    pub fn in_message(&self, col: u16, row: u16) -> bool {
        self.message_area.contains(Position::new(col, row))
    }

    pub fn page_rows(&self) -> usize {
        self.message_area.height as usize
    }
}

// =============
//    OTHERS
// =============
impl UiState {
    pub fn set_error(&mut self, e: Error) {
        self.error = Some(format!("{e:#}"));
    }

    pub fn get_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn popup_open(&self) -> bool {
        self.error.is_some()
    }

    pub fn close_popup(&mut self) {
        self.error = None;
    }

    pub fn quit(&mut self) {
        self.quit = true;
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }
}
