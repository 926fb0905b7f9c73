use anyhow::{Result, anyhow, bail};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

pub mod app_core;
pub mod config;
pub mod download;
pub mod key_handler;
pub mod logging;
pub mod player;
pub mod presentation;
pub mod tui;
pub mod ui_state;

pub use config::Config;
pub use presentation::PlaybackController;

// ~30fps
pub const REFRESH_RATE: u64 = 33;

pub const CONFIG_DIRECTORY: &str = "scrollcard";
pub const CONFIG_FILE: &str = "config.toml";
pub const LOG_FILE: &str = "scrollcard.log";

pub enum DurationStyle {
    Clean,
    Compact,
}

pub fn get_readable_duration(duration: Duration, style: DurationStyle) -> String {
    let mut secs = duration.as_secs();
    let mins = secs / 60;
    secs %= 60;

    match style {
        DurationStyle::Clean => match mins {
            0 => format!("{secs:02}s"),
            _ => format!("{mins}m {secs:02}s"),
        },
        DurationStyle::Compact => format!("{mins}:{secs:02}"),
    }
}

pub fn expand_tilde<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    let path_str = path.to_string_lossy();

    if !path_str.starts_with('~') {
        return Ok(path.to_path_buf());
    }

    if path_str != "~" && !path_str.starts_with("~/") && !path_str.starts_with("~\\") {
        bail!("Error reading path with tilde (~): {path_str}");
    }

    let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory!"))?;
    match path_str.get(2..) {
        Some(rest) if !rest.is_empty() => Ok(home.join(rest)),
        _ => Ok(home),
    }
}
