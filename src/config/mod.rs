mod config_import;
mod theme_config;
mod theme_utils;

pub use theme_config::ThemeConfig;

use crate::{
    CONFIG_DIRECTORY, CONFIG_FILE,
    download::{DownloadSource, Downloader},
    expand_tilde,
    player::AudioSource,
    presentation::{SpeedTable, SpeedTier},
};
use anyhow::{Context, Result, bail};
use config_import::ConfigImport;
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

const DEFAULT_TITLE: &str = "A message for you";
const DEFAULT_FILE_NAME: &str = "message.txt";
const DEFAULT_SCROLL_PADDING: u16 = 2;

const DEFAULT_MESSAGE: &str = "\
Dear friend,

Some messages are too long for a card and too important for a text, so this one \
gets a little stage of its own. Sit back, let it roll, and take your time.

Thank you for every late-night conversation, every terrible joke you laughed at \
anyway, and every time you showed up without being asked. You made the ordinary \
days feel like something worth remembering.

Whatever comes next, I hope it is kind to you. I hope the coffee is strong, the \
trains are on time, and the people around you know how lucky they are.

If this scrolled by too fast, press space to pause, or drag it back with the mouse. \
If it scrolled by too slow, press s. Either way, it will still be here.

With love,
me";

pub struct Config {
    pub title: String,
    pub message: String,
    pub audio: AudioSource,

    pub speed: SpeedTier,
    pub speeds: SpeedTable,
    pub scroll_padding: u16,
    pub rescale_on_speed_change: bool,

    pub downloader: Downloader,
    pub theme: ThemeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            title: DEFAULT_TITLE.to_string(),
            message: DEFAULT_MESSAGE.to_string(),
            audio: AudioSource::Silent,

            speed: SpeedTier::default(),
            speeds: SpeedTable::default(),
            scroll_padding: DEFAULT_SCROLL_PADDING,
            rescale_on_speed_change: false,

            downloader: Downloader::new(
                DownloadSource::MessageText,
                None,
                DEFAULT_FILE_NAME.to_string(),
            ),
            theme: ThemeConfig::default(),
        }
    }
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIRECTORY).join(CONFIG_FILE))
    }

    /// Loads `path`, or the default location when none is given.
    /// A missing default file means every setting keeps its default.
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        match path {
            Some(path) => {
                let path = expand_tilde(path)?;
                if !path.exists() {
                    bail!("Config file not found: {}", path.display());
                }
                Self::load_from_file(&path)
            }
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_from_file(&path),
                _ => Ok(Config::default()),
            },
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file_str = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&file_str)
            .with_context(|| format!("Invalid config: {}", path.as_ref().display()))
    }

    pub fn from_toml(s: &str) -> Result<Self> {
        let import = toml::from_str::<ConfigImport>(s)?;
        Self::try_from(&import)
    }
}

impl TryFrom<&ConfigImport> for Config {
    type Error = anyhow::Error;

    fn try_from(config: &ConfigImport) -> Result<Self> {
        let defaults = Config::default();

        let message = match &config.message {
            Some(path) => {
                let path = expand_tilde(path)?;
                std::fs::read_to_string(&path)
                    .with_context(|| format!("Could not read message: {}", path.display()))?
            }
            None => defaults.message,
        };

        let audio = match &config.audio {
            Some(path) => AudioSource::File(expand_tilde(path)?),
            None => AudioSource::Silent,
        };

        let speed = match &config.speed {
            Some(s) => s.parse::<SpeedTier>()?,
            None => defaults.speed,
        };

        let fallback = defaults.speeds;
        let ms = |raw: Option<u64>, tier: SpeedTier| match raw {
            Some(ms) => Duration::from_millis(ms),
            None => fallback.duration(tier),
        };
        let speeds = SpeedTable::new(
            ms(config.speeds.slow, SpeedTier::Slow),
            ms(config.speeds.normal, SpeedTier::Normal),
            ms(config.speeds.fast, SpeedTier::Fast),
            ms(config.speeds.veryfast, SpeedTier::VeryFast),
        )?;

        let source = match &config.download.document {
            Some(path) => DownloadSource::Document(expand_tilde(path)?),
            None => DownloadSource::MessageText,
        };
        let directory = match &config.download.directory {
            Some(dir) => Some(expand_tilde(dir)?),
            None => None,
        };
        let file_name = config
            .download
            .file_name
            .clone()
            .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string());

        Ok(Config {
            title: config.title.clone().unwrap_or(defaults.title),
            message,
            audio,

            speed,
            speeds,
            scroll_padding: config.scroll_padding.unwrap_or(DEFAULT_SCROLL_PADDING),
            rescale_on_speed_change: config.preserve_progress_on_speed_change.unwrap_or(false),

            downloader: Downloader::new(source, directory, file_name),
            theme: ThemeConfig::try_from(&config.colors)?,
        })
    }
}
