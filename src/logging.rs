use crate::{CONFIG_DIRECTORY, LOG_FILE};
use anyhow::{Result, anyhow};
use std::{fs::OpenOptions, path::PathBuf, sync::Mutex};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Log file under the platform data directory
pub fn log_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join(CONFIG_DIRECTORY).join(LOG_FILE))
}

/// Routes `tracing` output to a file. Stdout belongs to the terminal UI.
///
/// The filter comes from `RUST_LOG`, falling back to `info`.
pub fn init() -> Result<PathBuf> {
    let path = log_path().ok_or_else(|| anyhow!("Could not determine data directory!"))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("Could not install logger: {e}"))?;

    Ok(path)
}
