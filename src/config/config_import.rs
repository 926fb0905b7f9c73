use serde::Deserialize;
use std::path::PathBuf;

/// Raw shape of `config.toml`. Every key is optional.
#[derive(Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigImport {
    pub title: Option<String>,
    pub message: Option<PathBuf>,
    pub audio: Option<PathBuf>,
    pub speed: Option<String>,
    pub scroll_padding: Option<u16>,
    pub preserve_progress_on_speed_change: Option<bool>,

    pub speeds: SpeedsImport,
    pub download: DownloadImport,
    pub colors: ColorsImport,
}

/// Milliseconds per full traversal
#[derive(Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct SpeedsImport {
    pub slow: Option<u64>,
    pub normal: Option<u64>,
    pub fast: Option<u64>,
    pub veryfast: Option<u64>,
}

#[derive(Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct DownloadImport {
    pub file_name: Option<String>,
    pub document: Option<PathBuf>,
    pub directory: Option<PathBuf>,
}

#[derive(Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct ColorsImport {
    pub background: Option<String>,
    pub text: Option<String>,
    pub accent: Option<String>,
    pub dimmed: Option<String>,
    pub progress: Option<String>,
    pub progress_track: Option<String>,
    pub error: Option<String>,
}
