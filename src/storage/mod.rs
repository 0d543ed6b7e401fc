//! Persistence for named writing sessions and editor preferences.
//!
//! Sessions are stored one JSON document per name under `<data_dir>/user_data`.
//! Every write goes through a temp file in the target directory followed by an
//! atomic rename.

mod preferences;

pub use preferences::{PreferenceStore, Preferences};

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::core::style::Theme;

/// Subdirectory of the data dir holding session files
pub const SESSION_DIR: &str = "user_data";

const SESSION_EXT: &str = "json";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("File not found: {0}")]
    NotFound(String),
    #[error("Invalid session name: {0:?}")]
    InvalidName(String),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Malformed session data: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// One saved writing session: the text plus the style it was written in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WritingFile {
    pub name: String,
    pub text: String,
    pub font: String,
    pub font_size: u32,
    pub theme: Theme,
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Store rooted at `<data_dir>/user_data`; the directory is created on first save
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            dir: data_dir.as_ref().join(SESSION_DIR),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> StorageResult<PathBuf> {
        validate_name(name)?;
        Ok(self.dir.join(format!("{}.{}", name, SESSION_EXT)))
    }

    pub fn save(&self, file: &WritingFile) -> StorageResult<String> {
        let path = self.path_for(&file.name)?;
        fs::create_dir_all(&self.dir)?;

        let serialized = serde_json::to_vec(file)?;
        write_atomic(&path, &serialized).inspect_err(|e| {
            tracing::error!(name = %file.name, error = %e, "failed to save session");
        })?;

        tracing::info!(name = %file.name, bytes = serialized.len(), "session saved");
        Ok(format!("File '{}' saved successfully!", file.name))
    }

    pub fn load(&self, name: &str) -> StorageResult<WritingFile> {
        let path = self.path_for(name)?;
        if !path.exists() {
            return Err(StorageError::NotFound(name.to_string()));
        }

        let contents = fs::read_to_string(&path)?;
        let file: WritingFile = serde_json::from_str(&contents).inspect_err(|e| {
            tracing::warn!(name, error = %e, "session file is malformed");
        })?;

        tracing::info!(name, "session loaded");
        Ok(file)
    }

    /// Names of all saved sessions, sorted
    pub fn list(&self) -> StorageResult<Vec<String>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(SESSION_EXT) {
                continue;
            }
            if let Some(stem) = path.file_stem() {
                names.push(stem.to_string_lossy().to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn delete(&self, name: &str) -> StorageResult<String> {
        let path = self.path_for(name)?;
        if !path.exists() {
            return Err(StorageError::NotFound(name.to_string()));
        }
        fs::remove_file(&path)?;
        tracing::info!(name, "session deleted");
        Ok(format!("File '{}' deleted successfully!", name))
    }
}

/// Reject names that would escape the session directory or hide the file
pub fn validate_name(name: &str) -> StorageResult<()> {
    let bad = name.trim().is_empty()
        || name.starts_with('.')
        || name.contains(&['/', '\\', '\0'][..])
        || name.contains(std::path::MAIN_SEPARATOR);
    if bad {
        return Err(StorageError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Write `bytes` to `path` via a synced temp file and rename
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let parent = path.parent().unwrap_or(Path::new("."));
    let mut temp_file = NamedTempFile::new_in(parent)?;
    temp_file.write_all(bytes)?;
    temp_file.flush()?;
    temp_file.as_file().sync_all()?;
    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(name: &str) -> WritingFile {
        WritingFile {
            name: name.to_string(),
            text: "# Morning pages\n- one".to_string(),
            font: "Georgia".to_string(),
            font_size: 22,
            theme: Theme::Dark,
        }
    }

    #[test]
    fn test_save_load_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());

        let msg = store.save(&sample("journal")).unwrap();
        assert_eq!(msg, "File 'journal' saved successfully!");
        assert!(store.dir().join("journal.json").exists());

        assert_eq!(store.load("journal").unwrap(), sample("journal"));

        store.delete("journal").unwrap();
        assert!(matches!(
            store.load("journal"),
            Err(StorageError::NotFound(_))
        ));
        assert!(matches!(
            store.delete("journal"),
            Err(StorageError::NotFound(_))
        ));
    }

    #[test]
    fn test_list_is_sorted_and_skips_other_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        assert!(store.list().unwrap().is_empty());

        store.save(&sample("zeta")).unwrap();
        store.save(&sample("alpha")).unwrap();
        fs::write(store.dir().join("notes.txt"), "x").unwrap();

        assert_eq!(store.list().unwrap(), vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_overwrite_keeps_latest() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        store.save(&sample("draft")).unwrap();

        let mut updated = sample("draft");
        updated.text = "rewritten".to_string();
        store.save(&updated).unwrap();

        assert_eq!(store.load("draft").unwrap().text, "rewritten");
    }

    #[test]
    fn test_wire_format_matches_saved_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        fs::create_dir_all(store.dir()).unwrap();
        fs::write(
            store.dir().join("old.json"),
            r#"{"name":"old","text":"hi","font":"serif","font_size":20,"theme":"light"}"#,
        )
        .unwrap();

        let file = store.load("old").unwrap();
        assert_eq!(file.theme, Theme::Light);
        assert_eq!(file.font_size, 20);
    }

    #[test]
    fn test_invalid_names_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        for name in ["", "  ", "../escape", "a/b", ".hidden"] {
            assert!(
                matches!(store.save(&sample(name)), Err(StorageError::InvalidName(_))),
                "{:?} should be rejected",
                name
            );
        }
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        fs::create_dir_all(store.dir()).unwrap();
        fs::write(store.dir().join("broken.json"), "{not json").unwrap();
        assert!(matches!(store.load("broken"), Err(StorageError::Json(_))));
    }
}
