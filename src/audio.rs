//! Background music through the platform's command-line player.
//!
//! One track plays at a time. The player process is owned by `AudioPlayer`
//! and killed when a new track starts, on `stop()`, or on drop.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio file not found: {}", .0.display())]
    MissingFile(PathBuf),
    #[error("cannot start {program}: {source}")]
    Spawn {
        program: &'static str,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Debug, Default)]
pub struct AudioPlayer {
    child: Option<Child>,
    track: Option<PathBuf>,
}

impl AudioPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start playing `path`, replacing the current track
    pub fn play(&mut self, path: impl AsRef<Path>) -> Result<(), AudioError> {
        let path = path.as_ref();
        if !path.is_file() {
            tracing::warn!(path = %path.display(), "audio file missing");
            return Err(AudioError::MissingFile(path.to_path_buf()));
        }

        self.stop()?;

        let (program, mut command) = player_command(path);
        let child = command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| {
                tracing::error!(program, error = %source, "audio player failed to start");
                AudioError::Spawn { program, source }
            })?;

        tracing::info!(path = %path.display(), program, pid = child.id(), "music started");
        self.child = Some(child);
        self.track = Some(path.to_path_buf());
        Ok(())
    }

    /// Stop the current track, if any
    pub fn stop(&mut self) -> Result<(), AudioError> {
        if let Some(mut child) = self.child.take() {
            match child.try_wait()? {
                Some(_) => {}
                None => {
                    child.kill()?;
                    child.wait()?;
                }
            }
            tracing::info!("music stopped");
        }
        self.track = None;
        Ok(())
    }

    /// Whether the player process is still running
    pub fn is_playing(&mut self) -> bool {
        let finished = match self.child.as_mut() {
            None => return false,
            Some(child) => !matches!(child.try_wait(), Ok(None)),
        };
        if finished {
            self.child = None;
            self.track = None;
        }
        !finished
    }

    pub fn track(&self) -> Option<&Path> {
        self.track.as_deref()
    }
}

impl Drop for AudioPlayer {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

#[cfg(target_os = "macos")]
fn player_command(path: &Path) -> (&'static str, Command) {
    let mut command = Command::new("afplay");
    command.arg(path);
    ("afplay", command)
}

#[cfg(target_os = "windows")]
fn player_command(path: &Path) -> (&'static str, Command) {
    let script = format!(
        "(New-Object Media.SoundPlayer '{}').PlaySync();",
        path.display().to_string().replace('\'', "''")
    );
    let mut command = Command::new("powershell");
    command.args(["-NoProfile", "-Command", &script]);
    ("powershell", command)
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn player_command(path: &Path) -> (&'static str, Command) {
    let mut command = Command::new("ffplay");
    command
        .args(["-nodisp", "-autoexit", "-loglevel", "quiet"])
        .arg(path);
    ("ffplay", command)
}
