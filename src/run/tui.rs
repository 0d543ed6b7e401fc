//! Terminal (TUI) mode implementation.

use std::io;
use std::time::{Duration, Instant};

use quillpad::config::Config;
use quillpad::core::app::App;
use quillpad::core::style::StyleOverrides;
use quillpad::terminal::display::Display;
use quillpad::terminal::events::{EditorEvent, EventHandler};
use quillpad::terminal::raw::RawMode;
use quillpad::terminal::render::render_display_to_terminal;

/// How often the clock is checked while idle
const TICK: Duration = Duration::from_millis(100);

/// Run in terminal (TUI) mode.
pub fn run_terminal_mode(
    session: Option<&str>,
    config: &Config,
    overrides: &StyleOverrides,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(config, overrides);
    if let Some(name) = session {
        app.open_session(name, Instant::now());
    }

    let mut display = Display::new_terminal()?;
    let _raw_mode = RawMode::new()?;
    let (cols, rows) = display.terminal_size;
    let truecolor = display.truecolor;
    tracing::info!(cols, rows, truecolor, "terminal mode started");

    let result = event_loop(&mut app, &mut display);
    finish(&mut app, result)?;
    tracing::info!("terminal mode finished");
    Ok(())
}

/// Save preferences and the draft whatever the loop returned, then report
/// the loop's error first
fn finish(app: &mut App, result: io::Result<()>) -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = &result {
        tracing::error!(error = %e, "terminal loop failed");
    }
    let saved = app.shutdown();
    if let Err(e) = &saved {
        tracing::error!(error = %e, "failed to save preferences");
    }
    result?;
    saved?;
    Ok(())
}

fn event_loop(app: &mut App, display: &mut Display) -> io::Result<()> {
    let mut stdout = io::stdout();
    let mut event_handler = EventHandler::new();
    let mut dirty = true;
    let mut last_status = String::new();

    while !app.is_quitting() {
        if dirty {
            display.draw(app);
            render_display_to_terminal(display, &mut stdout)?;
            display.swap_buffers();
            dirty = false;
        }

        if event_handler.poll(TICK)? {
            match event_handler.read()? {
                EditorEvent::Input(input) => {
                    app.handle_input(&input, Instant::now());
                    dirty = true;
                }
                EditorEvent::Resize(cols, rows) => {
                    display.update_size(cols, rows);
                    dirty = true;
                }
                EditorEvent::None => {}
            }
        }

        // Redraw on clock changes: timer seconds, toast expiry
        let before = app.notifications.len();
        app.tick(Instant::now());
        let status = app.timer.display();
        if status != last_status || app.notifications.len() != before {
            last_status = status;
            dirty = true;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quillpad::core::input::{InputEvent, Key};
    use quillpad::storage::PreferenceStore;

    #[test]
    fn test_draft_saved_when_loop_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.set("data_dir", dir.path().to_string_lossy().to_string());
        let mut app = App::new(&config, &StyleOverrides::default());
        let now = Instant::now();
        for c in "unsaved".chars() {
            app.handle_input(&InputEvent::plain(Key::Char(c)), now);
        }

        let failure = io::Error::new(io::ErrorKind::BrokenPipe, "terminal went away");
        let err = finish(&mut app, Err(failure)).unwrap_err();
        assert!(err.to_string().contains("terminal went away"));

        let prefs = PreferenceStore::new(dir.path()).load();
        assert_eq!(prefs.draft, "unsaved");
    }
}
