use crate::player::{AudioCommand, AudioEvent, AudioOutput, AudioSource, core::AudioCore};
use anyhow::Result;
use crossbeam_channel::{Receiver, Sender};
use std::thread::JoinHandle;

pub struct AudioHandle {
    commands: Sender<AudioCommand>,
    events: Receiver<AudioEvent>,
    _thread_handle: JoinHandle<()>,
}

impl AudioHandle {
    pub fn spawn(source: AudioSource) -> Self {
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded();
        let (evt_tx, evt_rx) = crossbeam_channel::unbounded();

        let thread_handle = AudioCore::spawn(source, cmd_rx, evt_tx);

        AudioHandle {
            commands: cmd_tx,
            events: evt_rx,
            _thread_handle: thread_handle,
        }
    }

    /// Events are only a read-only feed; the caller decides what to log
    pub fn events(&self) -> Receiver<AudioEvent> {
        self.events.clone()
    }

    fn send(&self, cmd: AudioCommand) {
        // A dead audio thread must not take the presentation down with it
        let _ = self.commands.send(cmd);
    }
}

impl AudioOutput for AudioHandle {
    fn play(&mut self) -> Result<()> {
        self.commands.send(AudioCommand::Play)?;
        Ok(())
    }

    fn pause(&mut self) {
        self.send(AudioCommand::Pause);
    }

    fn stop(&mut self) {
        self.send(AudioCommand::Stop);
    }

    fn set_volume(&mut self, volume: f32) {
        self.send(AudioCommand::SetVolume(volume));
    }
}
