//! This module defines `App`, the interactive writing workbench a host drives.
//!
//! The host feeds it input events and clock ticks; the app routes keys to the
//! active prompt, a bound command, or the editing session, and reports results
//! through the notification queue. Nothing here touches the terminal.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use crate::audio::AudioPlayer;
use crate::config::Config;
use crate::core::input::{InputEvent, Keymap};
use crate::core::keystroke;
use crate::core::notify::{NotificationKind, NotificationQueue};
use crate::core::prompt::{Prompt, PromptAction, PromptResult};
use crate::core::quotes;
use crate::core::session::{EditingSession, SessionEvent};
use crate::core::style::{DEFAULT_FONT, DEFAULT_FONT_SIZE, StyleOverrides, Theme};
use crate::core::timer::{CountdownTimer, DEFAULT_MINUTES, TimerEvent};
use crate::storage::{PreferenceStore, Preferences, SessionStore, StorageResult};

/// Commands a key can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    NewSession,
    LoadSession,
    DeleteSession,
    ListSessions,
    TogglePreview,
    ToggleTimer,
    ToggleTheme,
    FontSmaller,
    FontLarger,
    TimerShorter,
    TimerLonger,
    RandomFont,
    ToggleMusic,
    Quit,
}

impl Command {
    pub const ALL: [Command; 14] = [
        Command::NewSession,
        Command::LoadSession,
        Command::DeleteSession,
        Command::ListSessions,
        Command::TogglePreview,
        Command::ToggleTimer,
        Command::ToggleTheme,
        Command::FontSmaller,
        Command::FontLarger,
        Command::TimerShorter,
        Command::TimerLonger,
        Command::RandomFont,
        Command::ToggleMusic,
        Command::Quit,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Command::NewSession => "new-session",
            Command::LoadSession => "load-session",
            Command::DeleteSession => "delete-session",
            Command::ListSessions => "list-sessions",
            Command::TogglePreview => "toggle-preview",
            Command::ToggleTimer => "toggle-timer",
            Command::ToggleTheme => "toggle-theme",
            Command::FontSmaller => "font-smaller",
            Command::FontLarger => "font-larger",
            Command::TimerShorter => "timer-shorter",
            Command::TimerLonger => "timer-longer",
            Command::RandomFont => "random-font",
            Command::ToggleMusic => "toggle-music",
            Command::Quit => "quit",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| format!("Unknown command: {}", s))
    }
}

pub struct App {
    pub session: EditingSession,
    pub timer: CountdownTimer,
    pub notifications: NotificationQueue,
    pub prompt: Option<Prompt>,
    /// Show rendered blocks instead of raw text
    pub preview: bool,
    /// Shown while the document is empty
    placeholder: &'static str,
    keymap: Keymap,
    sessions: SessionStore,
    preferences: PreferenceStore,
    audio: AudioPlayer,
    music: Option<PathBuf>,
    last_tick: Option<Instant>,
    seed: u64,
    quit: bool,
}

impl App {
    /// Build the workbench from configuration.
    ///
    /// Stored preferences win over configured defaults, and `overrides` win
    /// over both. The unsaved draft from the last run is restored.
    pub fn new(config: &Config, overrides: &StyleOverrides) -> Self {
        let data_dir = config.data_dir();
        let preferences = PreferenceStore::new(&data_dir);
        let prefs = preferences.load_or(configured_preferences(config));

        let mut style = prefs.style();
        overrides.apply(&mut style);

        let mut session = EditingSession::new(style);
        if !prefs.draft.is_empty() {
            session.load_buffer(&prefs.draft);
        }

        let mut keymap = Keymap::new();
        for (key, command) in &config.keybindings {
            if command.parse::<Command>().is_err() {
                tracing::warn!(key = %key, command = %command, "binding names an unknown command");
            }
            keymap.bind(key, command.as_str());
        }

        let music = config
            .get_string("music")
            .filter(|m| !m.is_empty())
            .map(PathBuf::from);

        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x5eed);

        tracing::debug!(
            data_dir = %data_dir.display(),
            bindings = keymap.len(),
            "workbench ready"
        );

        Self {
            session,
            timer: CountdownTimer::new(
                config
                    .get_int("timer_minutes")
                    .unwrap_or(DEFAULT_MINUTES as i64),
            ),
            notifications: NotificationQueue::default(),
            prompt: None,
            preview: false,
            placeholder: quotes::pick(seed >> 33),
            keymap,
            sessions: SessionStore::new(&data_dir),
            preferences,
            audio: AudioPlayer::new(),
            music,
            last_tick: None,
            seed,
            quit: false,
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn placeholder(&self) -> &str {
        self.placeholder
    }

    pub fn is_quitting(&self) -> bool {
        self.quit
    }

    pub fn music_playing(&mut self) -> bool {
        self.audio.is_playing()
    }

    /// Route one key: prompt first, then bindings, then the editing session
    pub fn handle_input(&mut self, event: &InputEvent, now: Instant) {
        if let Some(prompt) = self.prompt.as_mut() {
            let action = prompt.action;
            match prompt.handle_key(event) {
                PromptResult::Pending => {}
                PromptResult::Cancel => {
                    self.prompt = None;
                    self.notify(NotificationKind::Info, "Cancelled", now);
                }
                PromptResult::Submit(name) => {
                    self.prompt = None;
                    self.finish_prompt(action, &name, now);
                }
            }
            return;
        }

        // The save accelerator cannot be shadowed by a binding
        if keystroke::is_save_shortcut(event) {
            self.request_save();
            return;
        }

        if let Some(name) = self.keymap.lookup(event) {
            match name.parse::<Command>() {
                Ok(command) => self.execute(command, now),
                Err(e) => self.notify(NotificationKind::Error, e, now),
            }
            return;
        }

        if self.session.handle_key(event) == SessionEvent::SaveRequested {
            self.request_save();
        }
    }

    /// Ask for a name, prefilled with the current one
    fn request_save(&mut self) {
        let current = self.session.name().unwrap_or("").to_string();
        self.prompt = Some(Prompt::with_input(PromptAction::SaveSession, &current));
    }

    pub fn execute(&mut self, command: Command, now: Instant) {
        tracing::debug!(%command, "command");
        match command {
            Command::NewSession => {
                self.session.clear_buffer();
                self.notify(NotificationKind::Info, "New session", now);
            }
            Command::LoadSession => self.prompt = Some(Prompt::new(PromptAction::LoadSession)),
            Command::DeleteSession => {
                self.prompt = Some(Prompt::new(PromptAction::DeleteSession))
            }
            Command::ListSessions => match self.sessions.list() {
                Ok(names) if names.is_empty() => {
                    self.notify(NotificationKind::Info, "No saved sessions", now)
                }
                Ok(names) => self.notify(
                    NotificationKind::Info,
                    format!("Saved sessions: {}", names.join(", ")),
                    now,
                ),
                Err(e) => self.notify(
                    NotificationKind::Error,
                    format!("Error listing files: {}", e),
                    now,
                ),
            },
            Command::TogglePreview => self.preview = !self.preview,
            Command::ToggleTimer => {
                self.timer.toggle();
                let message = if self.timer.is_running() {
                    format!("Timer started: {} minutes", self.timer.minutes())
                } else {
                    "Timer stopped".to_string()
                };
                self.notify(NotificationKind::Info, message, now);
            }
            Command::ToggleTheme => self.session.style.toggle_theme(),
            Command::FontSmaller => self.session.style.adjust_font_size(-1),
            Command::FontLarger => self.session.style.adjust_font_size(1),
            Command::TimerShorter => self.timer.adjust(-1),
            Command::TimerLonger => self.timer.adjust(1),
            Command::RandomFont => {
                self.seed = self
                    .seed
                    .wrapping_mul(6364136223846793005)
                    .wrapping_add(1442695040888963407);
                self.session.style.pick_random_font(self.seed >> 33);
            }
            Command::ToggleMusic => self.toggle_music(now),
            Command::Quit => self.quit = true,
        }
    }

    /// Advance the timer and drop expired toasts
    pub fn tick(&mut self, now: Instant) {
        let elapsed = match self.last_tick {
            Some(last) => now.saturating_duration_since(last),
            None => Default::default(),
        };
        self.last_tick = Some(now);

        if let Some(TimerEvent::Finished) = self.timer.tick(elapsed) {
            self.notify(NotificationKind::Success, "Time's up! Take a break.", now);
        }
        self.notifications.expire(now);
    }

    /// Load a saved session by name
    pub fn open_session(&mut self, name: &str, now: Instant) {
        match self.sessions.load(name) {
            Ok(file) => {
                self.session.open_writing_file(file);
                self.notify(NotificationKind::Success, format!("Loaded '{}'", name), now);
            }
            Err(e) => self.notify(
                NotificationKind::Error,
                format!("Error loading file: {}", e),
                now,
            ),
        }
    }

    /// Persist style and draft, stop music
    pub fn shutdown(&mut self) -> StorageResult<()> {
        if let Err(e) = self.audio.stop() {
            tracing::warn!(error = %e, "cannot stop music");
        }
        let prefs = Preferences {
            theme: self.session.style.theme,
            font: self.session.style.font.clone(),
            font_size: self.session.style.font_size(),
            draft: self.session.buffer().text(),
        };
        self.preferences.save(&prefs)
    }

    fn finish_prompt(&mut self, action: PromptAction, name: &str, now: Instant) {
        if name.is_empty() {
            self.notify(NotificationKind::Info, "Cancelled", now);
            return;
        }

        match action {
            PromptAction::SaveSession => {
                let file = self.session.to_writing_file(name);
                match self.sessions.save(&file) {
                    Ok(message) => {
                        self.session.mark_saved(name);
                        self.notify(NotificationKind::Success, message, now);
                    }
                    Err(e) => self.notify(
                        NotificationKind::Error,
                        format!("Error saving file: {}", e),
                        now,
                    ),
                }
            }
            PromptAction::LoadSession => self.open_session(name, now),
            PromptAction::DeleteSession => match self.sessions.delete(name) {
                Ok(message) => self.notify(NotificationKind::Success, message, now),
                Err(e) => self.notify(
                    NotificationKind::Error,
                    format!("Error deleting file: {}", e),
                    now,
                ),
            },
        }
    }

    fn toggle_music(&mut self, now: Instant) {
        if self.audio.is_playing() {
            if let Err(e) = self.audio.stop() {
                self.notify(NotificationKind::Error, e.to_string(), now);
            }
            return;
        }

        let Some(track) = self.music.clone() else {
            self.notify(NotificationKind::Info, "No music file configured", now);
            return;
        };
        match self.audio.play(&track) {
            Ok(()) => self.notify(NotificationKind::Info, "Music on", now),
            Err(e) => self.notify(NotificationKind::Error, e.to_string(), now),
        }
    }

    fn notify(&mut self, kind: NotificationKind, message: impl Into<String>, now: Instant) {
        self.notifications.push(kind, message, now);
    }
}

/// Preferences implied by configuration alone, used before any are stored
fn configured_preferences(config: &Config) -> Preferences {
    let theme = match config.get_string("theme") {
        Some(name) => name.parse().unwrap_or_else(|e: String| {
            tracing::warn!(error = %e, "bad theme setting, using light");
            Theme::default()
        }),
        None => Theme::default(),
    };
    Preferences {
        theme,
        font: config.get_string("font").unwrap_or(DEFAULT_FONT).to_string(),
        font_size: config
            .get_int("font_size")
            .map(crate::core::style::clamp_font_size)
            .unwrap_or(DEFAULT_FONT_SIZE),
        draft: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::Key;
    use crate::user_config;
    use std::time::Duration;

    fn app_in(dir: &std::path::Path) -> App {
        let mut config = Config::default();
        user_config::configure(&mut config);
        config.set("data_dir", dir.to_string_lossy().to_string());
        App::new(&config, &StyleOverrides::default())
    }

    fn type_str(app: &mut App, s: &str, now: Instant) {
        for c in s.chars() {
            let key = match c {
                '\n' => Key::Enter,
                c => Key::Char(c),
            };
            app.handle_input(&InputEvent::plain(key), now);
        }
    }

    fn latest(app: &App) -> (NotificationKind, String) {
        let n = app.notifications.latest().expect("a notification");
        (n.kind, n.message.clone())
    }

    #[test]
    fn test_command_names_roundtrip() {
        for command in Command::ALL {
            assert_eq!(command.name().parse::<Command>(), Ok(command));
        }
        assert!("launch-rockets".parse::<Command>().is_err());
    }

    #[test]
    fn test_save_prompt_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let now = Instant::now();
        let mut app = app_in(dir.path());

        type_str(&mut app, "# Title\n- one\n", now);
        app.handle_input(&InputEvent::ctrl('s'), now);
        assert_eq!(
            app.prompt.as_ref().map(|p| p.action),
            Some(PromptAction::SaveSession)
        );
        type_str(&mut app, "draft", now);
        app.handle_input(&InputEvent::plain(Key::Enter), now);

        assert!(app.prompt.is_none());
        assert_eq!(
            latest(&app),
            (
                NotificationKind::Success,
                "File 'draft' saved successfully!".to_string()
            )
        );
        assert_eq!(app.session.name(), Some("draft"));

        app.execute(Command::NewSession, now);
        assert!(app.session.buffer().is_empty());

        app.execute(Command::LoadSession, now);
        type_str(&mut app, "draft\n", now);
        assert_eq!(app.session.buffer().text(), "# Title\n- one\n- ");
    }

    #[test]
    fn test_save_prompt_prefills_current_name() {
        let dir = tempfile::tempdir().unwrap();
        let now = Instant::now();
        let mut app = app_in(dir.path());
        app.session.mark_saved("journal");

        app.handle_input(&InputEvent::ctrl('s'), now);
        assert_eq!(app.prompt.as_ref().map(|p| p.input()), Some("journal".to_string()));
    }

    #[test]
    fn test_save_accelerator_wins_over_binding() {
        let dir = tempfile::tempdir().unwrap();
        let now = Instant::now();
        let mut config = Config::default();
        user_config::configure(&mut config);
        config.set("data_dir", dir.path().to_string_lossy().to_string());
        config.bind("^S", "toggle-theme");
        let mut app = App::new(&config, &StyleOverrides::default());
        let theme = app.session.style.theme;

        app.handle_input(&InputEvent::ctrl('s'), now);
        assert_eq!(
            app.prompt.as_ref().map(|p| p.action),
            Some(PromptAction::SaveSession)
        );
        assert_eq!(app.session.style.theme, theme);
    }

    #[test]
    fn test_load_missing_session_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let now = Instant::now();
        let mut app = app_in(dir.path());
        app.open_session("ghost", now);
        let (kind, message) = latest(&app);
        assert_eq!(kind, NotificationKind::Error);
        assert!(message.contains("File not found"));
    }

    #[test]
    fn test_empty_prompt_answer_cancels() {
        let dir = tempfile::tempdir().unwrap();
        let now = Instant::now();
        let mut app = app_in(dir.path());
        app.execute(Command::DeleteSession, now);
        app.handle_input(&InputEvent::plain(Key::Enter), now);
        assert_eq!(latest(&app), (NotificationKind::Info, "Cancelled".to_string()));
    }

    #[test]
    fn test_bound_keys_run_commands() {
        let dir = tempfile::tempdir().unwrap();
        let now = Instant::now();
        let mut app = app_in(dir.path());

        app.handle_input(&InputEvent::ctrl('p'), now);
        assert!(app.preview);
        app.handle_input(&InputEvent::ctrl('d'), now);
        assert_eq!(app.session.style.theme, Theme::Dark);
        app.handle_input(&InputEvent::plain(Key::F(3)), now);
        assert_eq!(app.session.style.font_size(), 21);
        app.handle_input(&InputEvent::plain(Key::F(5)), now);
        assert_eq!(app.timer.minutes(), 16);
        app.handle_input(&InputEvent::ctrl('q'), now);
        assert!(app.is_quitting());
        assert!(app.session.buffer().is_empty());
    }

    #[test]
    fn test_list_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let now = Instant::now();
        let mut app = app_in(dir.path());
        app.execute(Command::ListSessions, now);
        assert_eq!(
            latest(&app),
            (NotificationKind::Info, "No saved sessions".to_string())
        );

        for name in ["b", "a"] {
            let file = app.session.to_writing_file(name);
            app.sessions().save(&file).unwrap();
        }
        app.execute(Command::ListSessions, now);
        assert_eq!(
            latest(&app),
            (NotificationKind::Info, "Saved sessions: a, b".to_string())
        );
    }

    #[test]
    fn test_timer_finishes_with_toast() {
        let dir = tempfile::tempdir().unwrap();
        let start = Instant::now();
        let mut app = app_in(dir.path());
        for _ in 0..14 {
            app.execute(Command::TimerShorter, start);
        }
        assert_eq!(app.timer.minutes(), 1);

        app.execute(Command::ToggleTimer, start);
        app.tick(start);
        app.tick(start + Duration::from_secs(61));
        assert!(!app.timer.is_running());
        assert!(app
            .notifications
            .iter()
            .any(|n| n.message.starts_with("Time's up")));

        app.tick(start + Duration::from_secs(70));
        assert!(app.notifications.is_empty());
    }

    #[test]
    fn test_music_without_track() {
        let dir = tempfile::tempdir().unwrap();
        let now = Instant::now();
        let mut app = app_in(dir.path());
        app.execute(Command::ToggleMusic, now);
        assert_eq!(
            latest(&app),
            (NotificationKind::Info, "No music file configured".to_string())
        );
        assert!(!app.music_playing());
    }

    #[test]
    fn test_random_font_changes_font() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        let before = app.session.style.font.clone();
        app.execute(Command::RandomFont, Instant::now());
        assert_ne!(app.session.style.font, before);
    }

    #[test]
    fn test_preferences_and_draft_survive_restart() {
        let dir = tempfile::tempdir().unwrap();
        let now = Instant::now();
        {
            let mut app = app_in(dir.path());
            type_str(&mut app, "1. first", now);
            app.execute(Command::ToggleTheme, now);
            app.execute(Command::FontSmaller, now);
            app.shutdown().unwrap();
        }

        let app = app_in(dir.path());
        assert_eq!(app.session.buffer().text(), "1. first");
        assert_eq!(app.session.style.theme, Theme::Dark);
        assert_eq!(app.session.style.font_size(), 19);
    }

    #[test]
    fn test_cli_overrides_beat_preferences() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        user_config::configure(&mut config);
        config.set("data_dir", dir.path().to_string_lossy().to_string());
        config.set("theme", "dark");

        let app = App::new(&config, &StyleOverrides::default());
        assert_eq!(app.session.style.theme, Theme::Dark);

        let overrides = StyleOverrides {
            theme: Some(Theme::Light),
            font: Some("Monospace".to_string()),
            font_size: None,
        };
        let app = App::new(&config, &overrides);
        assert_eq!(app.session.style.theme, Theme::Light);
        assert_eq!(app.session.style.font, "Monospace");
    }
}
