use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::input::{InputEvent, Key};

/// Events the terminal loop cares about
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    Input(InputEvent),
    Resize(u16, u16),
    None,
}

#[derive(Debug, Default)]
pub struct EventHandler;

impl EventHandler {
    pub fn new() -> Self {
        Self
    }

    /// Check for available events with a timeout
    pub fn poll(&self, timeout: Duration) -> io::Result<bool> {
        event::poll(timeout)
    }

    /// Read the next event; call after `poll` reports one is ready
    pub fn read(&mut self) -> io::Result<EditorEvent> {
        Ok(match event::read()? {
            Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
                match crossterm_key_to_input(key_event) {
                    Some(input) => EditorEvent::Input(input),
                    None => EditorEvent::None,
                }
            }
            Event::Resize(cols, rows) => EditorEvent::Resize(cols, rows),
            _ => EditorEvent::None,
        })
    }
}

/// Normalize a crossterm key into the editor's representation.
/// Super/Command is reported as `meta` so it can act as the save accelerator.
pub fn crossterm_key_to_input(key_event: KeyEvent) -> Option<InputEvent> {
    let modifiers = key_event.modifiers;
    let shift = modifiers.contains(KeyModifiers::SHIFT);
    let alt = modifiers.contains(KeyModifiers::ALT);
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    let meta = modifiers.intersects(KeyModifiers::SUPER | KeyModifiers::META);

    let key = match key_event.code {
        KeyCode::Char(c) => {
            if ctrl && !alt {
                Key::Ctrl(c.to_ascii_lowercase())
            } else if alt && !ctrl {
                Key::Alt(c)
            } else {
                Key::Char(c)
            }
        }
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Enter => Key::Enter,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Tab => Key::Tab,
        KeyCode::Delete => Key::Delete,
        KeyCode::F(n) => Key::F(n),
        KeyCode::Esc => Key::Esc,
        _ => return None,
    };

    Some(InputEvent {
        key,
        shift,
        alt,
        ctrl,
        meta,
    })
}
