use anyhow::{Context, Result, anyhow};
use std::{
    path::{Path, PathBuf},
    time::{Duration, Instant},
};
use tracing::info;

/// How long the download control shows its confirmation
pub const FEEDBACK_DURATION: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, PartialEq)]
pub enum DownloadSource {
    /// Serialise the message itself to a plain-text file
    MessageText,
    /// Hand out a fixed file that ships alongside the message
    Document(PathBuf),
}

pub struct Downloader {
    source: DownloadSource,
    directory: PathBuf,
    file_name: String,
}

impl Downloader {
    /// `directory` falls back to the platform download directory, then the
    /// working directory.
    pub fn new(source: DownloadSource, directory: Option<PathBuf>, file_name: String) -> Self {
        let directory = directory
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        Downloader {
            source,
            directory,
            file_name,
        }
    }

    pub fn source(&self) -> &DownloadSource {
        &self.source
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Writes the download and returns where it landed. Never overwrites.
    pub fn save(&self, message: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.directory).with_context(|| {
            format!("Could not create directory: {}", self.directory.display())
        })?;

        let target = match &self.source {
            DownloadSource::MessageText => {
                let target = unique_path(&self.directory, &self.file_name);
                std::fs::write(&target, message)?;
                target
            }
            DownloadSource::Document(doc) => {
                let name = doc
                    .file_name()
                    .and_then(|n| n.to_str())
                    .ok_or_else(|| anyhow!("Not a file: {}", doc.display()))?;
                let target = unique_path(&self.directory, name);
                std::fs::copy(doc, &target)
                    .with_context(|| format!("Could not copy {}", doc.display()))?;
                target
            }
        };

        info!(path = %target.display(), "download saved");
        Ok(target)
    }
}

/// `name`, then `name (1)`, `name (2)`, ... until nothing is in the way
fn unique_path(dir: &Path, name: &str) -> PathBuf {
    let first = dir.join(name);
    if !first.exists() {
        return first;
    }

    let as_path = Path::new(name);
    let stem = as_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name);
    let ext = as_path.extension().and_then(|e| e.to_str());

    (1..)
        .map(|n| match ext {
            Some(ext) => dir.join(format!("{stem} ({n}).{ext}")),
            None => dir.join(format!("{stem} ({n})")),
        })
        .find(|candidate| !candidate.exists())
        .unwrap_or(first)
}

/// Transient confirmation on the download control
#[derive(Debug, Default)]
pub struct DownloadFeedback {
    shown_at: Option<Instant>,
}

impl DownloadFeedback {
    pub fn confirm(&mut self, now: Instant) {
        self.shown_at = Some(now);
    }

    pub fn is_showing(&self, now: Instant) -> bool {
        self.shown_at
            .is_some_and(|at| now.saturating_duration_since(at) < FEEDBACK_DURATION)
    }
}
