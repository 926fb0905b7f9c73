use crate::key_handler::MoveDirection;
use anyhow::{Result, anyhow, bail};
use std::{str::FromStr, time::Duration};

const SLOW_MS: u64 = 280_000;
const NORMAL_MS: u64 = 90_000;
const FAST_MS: u64 = 40_000;
const VERYFAST_MS: u64 = 25_000;

#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Hash)]
pub enum SpeedTier {
    #[default]
    Slow,
    Normal,
    Fast,
    VeryFast,
}

impl SpeedTier {
    pub const ALL: [SpeedTier; 4] = [
        SpeedTier::Slow,
        SpeedTier::Normal,
        SpeedTier::Fast,
        SpeedTier::VeryFast,
    ];

    pub fn cycle(self, dir: MoveDirection) -> SpeedTier {
        let len = Self::ALL.len();
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        let new_idx = match dir {
            MoveDirection::Up => (idx + len - 1) % len,
            MoveDirection::Down => (idx + 1) % len,
        };
        Self::ALL[new_idx]
    }

    pub fn label(&self) -> &'static str {
        match self {
            SpeedTier::Slow => "Slow",
            SpeedTier::Normal => "Normal",
            SpeedTier::Fast => "Fast",
            SpeedTier::VeryFast => "Very fast",
        }
    }
}

impl FromStr for SpeedTier {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "slow" => Ok(SpeedTier::Slow),
            "normal" => Ok(SpeedTier::Normal),
            "fast" => Ok(SpeedTier::Fast),
            "veryfast" | "very_fast" | "very-fast" => Ok(SpeedTier::VeryFast),
            _ => Err(anyhow!(
                "Unknown speed: {s}\nExpected one of \"slow\", \"normal\", \"fast\", \"veryfast\""
            )),
        }
    }
}

impl std::fmt::Display for SpeedTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpeedTier::Slow => write!(f, "slow"),
            SpeedTier::Normal => write!(f, "normal"),
            SpeedTier::Fast => write!(f, "fast"),
            SpeedTier::VeryFast => write!(f, "veryfast"),
        }
    }
}

/// Full-traversal duration for every tier
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct SpeedTable {
    slow: Duration,
    normal: Duration,
    fast: Duration,
    veryfast: Duration,
}

impl Default for SpeedTable {
    fn default() -> Self {
        SpeedTable {
            slow: Duration::from_millis(SLOW_MS),
            normal: Duration::from_millis(NORMAL_MS),
            fast: Duration::from_millis(FAST_MS),
            veryfast: Duration::from_millis(VERYFAST_MS),
        }
    }
}

impl SpeedTable {
    pub fn new(slow: Duration, normal: Duration, fast: Duration, veryfast: Duration) -> Result<Self> {
        let table = SpeedTable {
            slow,
            normal,
            fast,
            veryfast,
        };

        for tier in SpeedTier::ALL {
            if table.duration(tier).is_zero() {
                bail!("Speed \"{tier}\" must last longer than 0ms");
            }
        }

        Ok(table)
    }

    pub fn duration(&self, tier: SpeedTier) -> Duration {
        match tier {
            SpeedTier::Slow => self.slow,
            SpeedTier::Normal => self.normal,
            SpeedTier::Fast => self.fast,
            SpeedTier::VeryFast => self.veryfast,
        }
    }
}
