// Configuration module
// Internal representation of user configuration

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Directory name under the XDG base dirs
pub const APP_NAME: &str = "quillpad";

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone)]
pub struct Config {
    pub keybindings: HashMap<String, String>,
    pub settings: HashMap<String, ConfigValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    String(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// On-disk shape of `config.toml`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    settings: HashMap<String, toml::Value>,
    keybindings: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            keybindings: HashMap::new(),
            settings: HashMap::new(),
        }
    }

    /// Bind a key to a command
    pub fn bind(&mut self, key: &str, command: &str) {
        self.keybindings
            .insert(key.to_string(), command.to_string());
    }

    /// Set a configuration value
    pub fn set<V: Into<ConfigValue>>(&mut self, key: &str, value: V) {
        self.settings.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.settings.get(key)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| match v {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        })
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|v| match v {
            ConfigValue::Int(i) => Some(*i),
            _ => None,
        })
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| match v {
            ConfigValue::String(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Overlay settings and bindings from TOML text
    pub fn apply_toml(&mut self, text: &str) -> Result<(), ConfigError> {
        let file: ConfigFile = toml::from_str(text)?;

        for (key, value) in file.settings {
            match value {
                toml::Value::Boolean(b) => self.set(&key, b),
                toml::Value::Integer(i) => self.set(&key, i),
                toml::Value::String(s) => self.set(&key, s),
                other => {
                    tracing::warn!(key = %key, kind = other.type_str(), "unsupported setting type, ignored");
                }
            }
        }
        for (key, command) in file.keybindings {
            self.bind(&key, &command);
        }
        Ok(())
    }

    /// Overlay a config file if it exists. Returns whether one was read.
    pub fn load_file(&mut self, path: &Path) -> Result<bool, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        self.apply_toml(&text)?;
        tracing::debug!(path = %path.display(), "config file applied");
        Ok(true)
    }

    /// Where sessions, preferences and the log live
    pub fn data_dir(&self) -> PathBuf {
        match self.get_string("data_dir") {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => default_data_dir(),
        }
    }
}

/// `$XDG_DATA_HOME/quillpad`, or `./.quillpad` when XDG dirs are unavailable
pub fn default_data_dir() -> PathBuf {
    match xdg::BaseDirectories::with_prefix(APP_NAME) {
        Ok(dirs) => dirs.get_data_home(),
        Err(e) => {
            tracing::warn!(error = %e, "no XDG data dir, using working directory");
            PathBuf::from(format!(".{}", APP_NAME))
        }
    }
}

/// `$XDG_CONFIG_HOME/quillpad/config.toml`, if XDG dirs are available
pub fn default_config_path() -> Option<PathBuf> {
    xdg::BaseDirectories::with_prefix(APP_NAME)
        .ok()
        .map(|dirs| dirs.get_config_home().join(CONFIG_FILE))
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<i64> for ConfigValue {
    fn from(i: i64) -> Self {
        ConfigValue::Int(i)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}
