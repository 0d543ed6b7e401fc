//! Process-wide preferences: last theme, font, size and the unsaved draft.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{StorageResult, write_atomic};
use crate::core::style::{DEFAULT_FONT, DEFAULT_FONT_SIZE, Style, Theme};

pub const PREFERENCES_FILE: &str = "preferences.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub theme: Theme,
    pub font: String,
    pub font_size: u32,
    /// Text of the buffer when the editor last closed
    pub draft: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            font: DEFAULT_FONT.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            draft: String::new(),
        }
    }
}

impl Preferences {
    pub fn style(&self) -> Style {
        Style::new(self.theme, self.font.clone(), self.font_size as i64)
    }
}

#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(PREFERENCES_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load preferences, falling back to defaults when missing or unreadable
    pub fn load(&self) -> Preferences {
        self.load_or(Preferences::default())
    }

    /// Load preferences; `fallback` stands in for a missing or unreadable file
    pub fn load_or(&self, fallback: Preferences) -> Preferences {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return fallback,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "cannot read preferences");
                return fallback;
            }
        };

        serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "corrupt preferences, using defaults");
            fallback
        })
    }

    pub fn save(&self, prefs: &Preferences) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let bytes = serde_json::to_vec_pretty(prefs)?;
        write_atomic(&self.path, &bytes)?;
        tracing::debug!(path = %self.path.display(), "preferences saved");
        Ok(())
    }
}
