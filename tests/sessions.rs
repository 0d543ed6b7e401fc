//! Session workflow tests
//!
//! Exercise the workbench end to end against a temporary data directory:
//! configuration layering, saving and reloading sessions, and preferences
//! that survive a restart.

use std::fs;
use std::path::Path;
use std::time::Instant;

use quillpad::config::Config;
use quillpad::core::app::{App, Command};
use quillpad::core::input::{InputEvent, Key};
use quillpad::core::notify::NotificationKind;
use quillpad::core::style::{StyleOverrides, Theme};
use quillpad::storage::{SESSION_DIR, SessionStore, StorageError};
use quillpad::user_config;

fn config_for(dir: &Path) -> Config {
    let mut config = Config::default();
    user_config::configure(&mut config);
    config.set("data_dir", dir.to_string_lossy().to_string());
    config
}

fn keys(app: &mut App, text: &str) {
    let now = Instant::now();
    for c in text.chars() {
        let key = match c {
            '\n' => Key::Enter,
            '\t' => Key::Tab,
            c => Key::Char(c),
        };
        app.handle_input(&InputEvent::plain(key), now);
    }
}

fn save_as(app: &mut App, name: &str) {
    app.handle_input(&InputEvent::ctrl('s'), Instant::now());
    // Clear any pre-filled name
    for _ in 0..64 {
        app.handle_input(&InputEvent::plain(Key::Backspace), Instant::now());
    }
    keys(app, name);
    keys(app, "\n");
}

// =============================================================================
// SAVE / LOAD / DELETE
// =============================================================================

#[test]
fn save_writes_json_with_style() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = App::new(&config_for(dir.path()), &StyleOverrides::default());

    keys(&mut app, "# Monday\n- wake\n");
    app.execute(Command::ToggleTheme, Instant::now());
    save_as(&mut app, "monday");

    let path = dir.path().join(SESSION_DIR).join("monday.json");
    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(json["name"], "monday");
    assert_eq!(json["text"], "# Monday\n- wake\n- ");
    assert_eq!(json["theme"], "dark");
    assert_eq!(json["font"], "serif");
    assert_eq!(json["font_size"], 20);

    let latest = app.notifications.latest().unwrap();
    assert_eq!(latest.kind, NotificationKind::Success);
    assert_eq!(latest.message, "File 'monday' saved successfully!");
}

#[test]
fn loading_restores_text_and_style() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());

    {
        let mut app = App::new(&config, &StyleOverrides::default());
        keys(&mut app, "1. draft");
        app.execute(Command::FontLarger, Instant::now());
        app.execute(Command::FontLarger, Instant::now());
        save_as(&mut app, "essay");
    }

    let mut app = App::new(&config, &StyleOverrides::default());
    app.execute(Command::NewSession, Instant::now());
    app.open_session("essay", Instant::now());

    assert_eq!(app.session.buffer().text(), "1. draft");
    assert_eq!(app.session.style.font_size(), 22);
    assert_eq!(app.session.name(), Some("essay"));
    assert!(!app.session.is_modified());

    // Cursor sits at the end: Enter continues the list
    keys(&mut app, "\n");
    assert_eq!(app.session.buffer().text(), "1. draft\n2. ");
}

#[test]
fn delete_through_prompt() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = App::new(&config_for(dir.path()), &StyleOverrides::default());
    save_as(&mut app, "scratch");

    app.execute(Command::DeleteSession, Instant::now());
    keys(&mut app, "scratch\n");
    assert_eq!(
        app.notifications.latest().map(|n| n.message.as_str()),
        Some("File 'scratch' deleted successfully!")
    );

    let store = SessionStore::new(dir.path());
    assert!(store.list().unwrap().is_empty());
    assert!(matches!(store.load("scratch"), Err(StorageError::NotFound(_))));
}

#[test]
fn path_like_names_are_refused() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = App::new(&config_for(dir.path()), &StyleOverrides::default());
    keys(&mut app, "secret");
    save_as(&mut app, "../escape");

    let latest = app.notifications.latest().unwrap();
    assert_eq!(latest.kind, NotificationKind::Error);
    assert!(!dir.path().join("escape.json").exists());
    assert_eq!(app.session.name(), None);
}

// =============================================================================
// CONFIGURATION AND PREFERENCES
// =============================================================================

#[test]
fn toml_overrides_defaults_until_preferences_exist() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        "[settings]\ntheme = \"dark\"\nfont = \"Ubuntu\"\ntimer_minutes = 25\n\n[keybindings]\n\"F9\" = \"toggle-preview\"\n",
    )
    .unwrap();

    let mut config = config_for(dir.path());
    assert!(config.load_file(&config_path).unwrap());

    let mut app = App::new(&config, &StyleOverrides::default());
    assert_eq!(app.session.style.theme, Theme::Dark);
    assert_eq!(app.session.style.font, "Ubuntu");
    assert_eq!(app.timer.minutes(), 25);

    app.handle_input(&InputEvent::plain(Key::F(9)), Instant::now());
    assert!(app.preview);

    // Stored preferences take over on the next start
    app.execute(Command::ToggleTheme, Instant::now());
    app.shutdown().unwrap();
    let app = App::new(&config, &StyleOverrides::default());
    assert_eq!(app.session.style.theme, Theme::Light);
}

#[test]
fn draft_survives_restart_without_saving() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());

    let mut app = App::new(&config, &StyleOverrides::default());
    keys(&mut app, "- unsaved thought");
    app.execute(Command::Quit, Instant::now());
    assert!(app.is_quitting());
    app.shutdown().unwrap();

    let app = App::new(&config, &StyleOverrides::default());
    assert_eq!(app.session.buffer().text(), "- unsaved thought");
    assert_eq!(app.session.name(), None);
}
