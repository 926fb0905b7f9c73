mod bounds;
mod controller;
mod scheduler;
mod speed;

pub use bounds::ScrollBounds;
pub use controller::{PlaybackController, PlaybackSnapshot};
pub use scheduler::{FrameHandle, FrameScheduler};
pub use speed::{SpeedTable, SpeedTier};

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum PlaybackState {
    Idle,
    Playing,
    Paused,
    Finished,
}

impl PlaybackState {
    /// Status word shown under the controls
    pub fn label(&self) -> &'static str {
        match self {
            // A fresh card reads the same as a paused one
            PlaybackState::Idle | PlaybackState::Paused => "Paused",
            PlaybackState::Playing => "Playing",
            PlaybackState::Finished => "Finished",
        }
    }
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaybackState::Idle => write!(f, "idle"),
            PlaybackState::Playing => write!(f, "playing"),
            PlaybackState::Paused => write!(f, "paused"),
            PlaybackState::Finished => write!(f, "finished"),
        }
    }
}
