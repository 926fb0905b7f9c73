use crate::player::AudioBackend;
use anyhow::Result;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};
use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    time::Duration,
};

pub struct RodioBackend {
    sink: Sink,
    path: PathBuf,
    loaded: bool,
    _stream: OutputStream,
}

impl RodioBackend {
    pub fn new(path: PathBuf) -> Result<Self> {
        let mut stream = OutputStreamBuilder::open_default_stream()?;
        stream.log_on_drop(false);
        let sink = Sink::connect_new(stream.mixer());
        sink.pause();

        Ok(Self {
            sink,
            path,
            loaded: false,
            _stream: stream,
        })
    }
}

impl AudioBackend for RodioBackend {
    fn play(&mut self) -> Result<()> {
        // The track does not loop; once drained it is queued again from the top
        if !self.loaded || self.sink.empty() {
            let source = decode(&self.path)?;
            self.sink.clear();
            self.sink.append(source);
            self.loaded = true;
        }

        self.sink.play();
        Ok(())
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn rewind(&mut self) -> Result<()> {
        self.sink.pause();

        if !self.loaded || self.sink.empty() {
            self.loaded = false;
            return Ok(());
        }

        if let Err(e) = self.sink.try_seek(Duration::ZERO) {
            // Decoders without seek support get reloaded on the next play
            self.sink.clear();
            self.loaded = false;
            return Err(anyhow::anyhow!("{e}"));
        }

        Ok(())
    }

    fn set_volume(&mut self, volume: f32) {
        self.sink.set_volume(volume);
    }

    fn track_ended(&self) -> bool {
        self.loaded && self.sink.empty()
    }
}

/// Stand-in when no track is configured or no output device is available
#[derive(Default)]
pub struct SilentBackend;

impl AudioBackend for SilentBackend {
    fn play(&mut self) -> Result<()> {
        Ok(())
    }

    fn pause(&mut self) {}

    fn rewind(&mut self) -> Result<()> {
        Ok(())
    }

    fn set_volume(&mut self, _volume: f32) {}

    fn track_ended(&self) -> bool {
        false
    }
}

fn decode(song: &Path) -> Result<Decoder<BufReader<File>>> {
    let file = File::open(song)?;
    let len = file.metadata()?.len();

    let mut builder = Decoder::builder()
        .with_data(BufReader::new(file))
        .with_byte_len(len)
        .with_coarse_seek(true)
        .with_seekable(true);

    if let Some(ext) = song.extension().and_then(|e| e.to_str()) {
        let hint = match ext {
            "adif" | "adts" => "aac",
            "m4a" | "m4b" | "mp4" => "audio/mp4",
            "bit" | "mpga" => "mp3",
            "oga" | "ogx" | "spx" => "audio/ogg",
            "wave" => "wav",
            _ => ext,
        };
        builder = builder.with_hint(hint);
    }

    Ok(builder.build()?)
}
