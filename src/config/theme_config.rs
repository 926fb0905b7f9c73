use crate::config::{config_import::ColorsImport, theme_utils::parse_color};
use anyhow::{Context, Result};
use ratatui::style::Color;

const DARK_WHITE: Color = Color::Rgb(210, 210, 210);
const MID_GRAY: Color = Color::Rgb(100, 100, 100);
const DARK_GRAY: Color = Color::Rgb(25, 25, 25);
const DARK_GRAY_FADED: Color = Color::Rgb(45, 45, 45);
const GOOD_RED: Color = Color::Rgb(255, 70, 70);
const GOLD: Color = Color::Rgb(220, 220, 100);

#[derive(Debug, Clone, PartialEq)]
pub struct ThemeConfig {
    pub bg: Color,
    pub text: Color,
    pub accent: Color,
    pub dimmed: Color,
    pub progress: Color,
    pub progress_track: Color,
    pub error: Color,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig {
            bg: DARK_GRAY,
            text: DARK_WHITE,
            accent: GOLD,
            dimmed: MID_GRAY,
            progress: GOOD_RED,
            progress_track: DARK_GRAY_FADED,
            error: Color::LightRed,
        }
    }
}

impl TryFrom<&ColorsImport> for ThemeConfig {
    type Error = anyhow::Error;

    fn try_from(colors: &ColorsImport) -> Result<Self> {
        let fallback = ThemeConfig::default();

        let pick = |name: &str, raw: &Option<String>, default: Color| -> Result<Color> {
            match raw {
                Some(s) => parse_color(s).with_context(|| format!("In [colors] {name}")),
                None => Ok(default),
            }
        };

        Ok(ThemeConfig {
            bg: pick("background", &colors.background, fallback.bg)?,
            text: pick("text", &colors.text, fallback.text)?,
            accent: pick("accent", &colors.accent, fallback.accent)?,
            dimmed: pick("dimmed", &colors.dimmed, fallback.dimmed)?,
            progress: pick("progress", &colors.progress, fallback.progress)?,
            progress_track: pick(
                "progress_track",
                &colors.progress_track,
                fallback.progress_track,
            )?,
            error: pick("error", &colors.error, fallback.error)?,
        })
    }
}
