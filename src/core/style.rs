//! Writing surface style: theme, font family and font size.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const MIN_FONT_SIZE: u32 = 8;
pub const MAX_FONT_SIZE: u32 = 48;
pub const DEFAULT_FONT_SIZE: u32 = 20;
pub const DEFAULT_FONT: &str = "serif";

/// Fonts offered directly in the footer
pub const FONT_PRESETS: [&str; 3] = ["Serif", "Sans-serif", "Monospace"];

/// Pool for the "surprise me" font picker
pub const RANDOM_FONTS: [&str; 6] = [
    "Cursive",
    "Verdana",
    "Georgia",
    "Courier New",
    "Ubuntu",
    "Ubuntu Mono",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(format!("Unknown theme: {}", s)),
        }
    }
}

pub fn clamp_font_size(size: i64) -> u32 {
    size.clamp(MIN_FONT_SIZE as i64, MAX_FONT_SIZE as i64) as u32
}

/// Live style controls for one editing session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    pub theme: Theme,
    pub font: String,
    font_size: u32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            font: DEFAULT_FONT.to_string(),
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl Style {
    pub fn new(theme: Theme, font: impl Into<String>, font_size: i64) -> Self {
        Self {
            theme,
            font: font.into(),
            font_size: clamp_font_size(font_size),
        }
    }

    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    pub fn set_font_size(&mut self, size: i64) {
        self.font_size = clamp_font_size(size);
    }

    /// Step the font size, staying inside the allowed range
    pub fn adjust_font_size(&mut self, delta: i64) {
        self.set_font_size(self.font_size as i64 + delta);
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    /// Pick a font from the random pool using `seed`, never repeating the current one
    pub fn pick_random_font(&mut self, seed: u64) {
        let start = (seed % RANDOM_FONTS.len() as u64) as usize;
        let choice = (0..RANDOM_FONTS.len())
            .map(|i| RANDOM_FONTS[(start + i) % RANDOM_FONTS.len()])
            .find(|f| *f != self.font)
            .unwrap_or(RANDOM_FONTS[start]);
        self.font = choice.to_string();
    }
}

/// Style values given explicitly on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleOverrides {
    pub theme: Option<Theme>,
    pub font: Option<String>,
    pub font_size: Option<i64>,
}

impl StyleOverrides {
    pub fn is_empty(&self) -> bool {
        self.theme.is_none() && self.font.is_none() && self.font_size.is_none()
    }

    pub fn apply(&self, style: &mut Style) {
        if let Some(theme) = self.theme {
            style.theme = theme;
        }
        if let Some(font) = &self.font {
            style.font = font.clone();
        }
        if let Some(size) = self.font_size {
            style.set_font_size(size);
        }
    }
}
