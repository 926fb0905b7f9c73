use crate::{
    REFRESH_RATE,
    player::{AudioBackend, AudioCommand, AudioEvent, AudioSource, RodioBackend, SilentBackend},
};
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use std::{
    thread::{self, JoinHandle},
    time::Duration,
};
use tracing::{info, warn};

pub(super) struct AudioCore {
    backend: Box<dyn AudioBackend>,
    commands: Receiver<AudioCommand>,
    events: Sender<AudioEvent>,
    active: bool,
}

impl AudioCore {
    pub(super) fn spawn(
        source: AudioSource,
        commands: Receiver<AudioCommand>,
        events: Sender<AudioEvent>,
    ) -> JoinHandle<()> {
        thread::spawn(move || {
            // The output stream cannot leave the thread that opened it
            let backend = open_backend(&source, &events);
            let mut core = AudioCore::new(backend, commands, events);

            core.run();
        })
    }

    fn new(
        backend: Box<dyn AudioBackend>,
        commands: Receiver<AudioCommand>,
        events: Sender<AudioEvent>,
    ) -> Self {
        AudioCore {
            backend,
            commands,
            events,
            active: false,
        }
    }

    fn run(&mut self) {
        while self.process_commands() {
            self.check_track_end();
            thread::sleep(Duration::from_millis(REFRESH_RATE));
        }
        info!("audio thread stopped");
    }

    /// Returns false once every handle has been dropped
    fn process_commands(&mut self) -> bool {
        loop {
            match self.commands.try_recv() {
                Ok(cmd) => match cmd {
                    AudioCommand::Play => self.play(),
                    AudioCommand::Pause => self.pause(),
                    AudioCommand::Stop => self.stop(),
                    AudioCommand::SetVolume(v) => self.backend.set_volume(v),
                },
                Err(TryRecvError::Empty) => return true,
                Err(TryRecvError::Disconnected) => return false,
            }
        }
    }

    fn check_track_end(&mut self) {
        // Checking `active` ensures the end is reported once
        if self.active && self.backend.track_ended() {
            self.active = false;
            self.emit(AudioEvent::Ended);
        }
    }

    fn play(&mut self) {
        match self.backend.play() {
            Ok(()) => {
                self.active = true;
                self.emit(AudioEvent::Started);
            }
            Err(e) => {
                warn!("Background audio rejected play: {e}");
                self.emit(AudioEvent::Error(e.to_string()));
            }
        }
    }

    fn pause(&mut self) {
        self.backend.pause();
    }

    fn stop(&mut self) {
        self.active = false;
        if let Err(e) = self.backend.rewind() {
            warn!("Background audio could not rewind: {e}");
        }
    }

    fn emit(&self, event: AudioEvent) {
        let _ = self.events.send(event);
    }
}

fn open_backend(source: &AudioSource, events: &Sender<AudioEvent>) -> Box<dyn AudioBackend> {
    match source {
        AudioSource::File(path) => match RodioBackend::new(path.clone()) {
            Ok(backend) => {
                info!(path = %path.display(), "audio output opened");
                Box::new(backend)
            }
            Err(e) => {
                warn!("No audio output, continuing silently: {e}");
                let _ = events.send(AudioEvent::Error(e.to_string()));
                Box::new(SilentBackend)
            }
        },
        AudioSource::Silent => Box::new(SilentBackend),
    }
}
