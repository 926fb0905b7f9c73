mod backend_rodio;
mod core;
mod handle;

pub use backend_rodio::{RodioBackend, SilentBackend};
pub use handle::AudioHandle;

use anyhow::Result;
use std::path::PathBuf;

pub(crate) const VOLUME_FULL: f32 = 1.0;
pub(crate) const VOLUME_MUTED: f32 = 0.0;

/// What the playback controller drives. Best effort: nothing the audio side
/// does may influence the visual state machine.
pub trait AudioOutput {
    /// Starts or resumes the track. Only synchronous failures are reported here.
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self);
    /// Pauses and rewinds to the start of the track
    fn stop(&mut self);
    fn set_volume(&mut self, volume: f32);
}

/// Device-level playback, owned by the audio thread
pub trait AudioBackend {
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self);
    fn rewind(&mut self) -> Result<()>;
    fn set_volume(&mut self, volume: f32);
    fn track_ended(&self) -> bool;
}

pub enum AudioCommand {
    Play,
    Pause,
    Stop,
    SetVolume(f32),
}

#[derive(Debug, PartialEq)]
pub enum AudioEvent {
    Started,
    Ended,
    Error(String),
}

/// Where the background track comes from
#[derive(Debug, Clone, PartialEq)]
pub enum AudioSource {
    File(PathBuf),
    Silent,
}
