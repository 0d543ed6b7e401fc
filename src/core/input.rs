use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Native key representation for quillpad
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Ctrl(char),
    Alt(char),
    F(u8),
    Esc,
    Enter,
    Backspace,
    Tab,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
    Null,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{}", c),
            Key::Ctrl(c) => write!(f, "C-{}", c),
            Key::Alt(c) => write!(f, "M-{}", c),
            Key::F(n) => write!(f, "F{}", n),
            Key::Esc => write!(f, "ESC"),
            Key::Enter => write!(f, "RET"),
            Key::Backspace => write!(f, "BS"),
            Key::Tab => write!(f, "TAB"),
            Key::Delete => write!(f, "DEL"),
            Key::Home => write!(f, "Home"),
            Key::End => write!(f, "End"),
            Key::PageUp => write!(f, "PgUp"),
            Key::PageDown => write!(f, "PgDn"),
            Key::Up => write!(f, "↑"),
            Key::Down => write!(f, "↓"),
            Key::Left => write!(f, "←"),
            Key::Right => write!(f, "→"),
            Key::Null => write!(f, "NUL"),
        }
    }
}

impl FromStr for Key {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();

        // Ctrl notation: ^X or C-x
        if let (Some('^'), Some(c), None) = (chars.next(), chars.next(), chars.next()) {
            return Ok(Key::Ctrl(c.to_ascii_lowercase()));
        }
        if let Some(rest) = s.strip_prefix("C-") {
            if let Some(c) = single_char(rest) {
                return Ok(Key::Ctrl(c.to_ascii_lowercase()));
            }
        }

        // Alt/Meta notation: M-x or ESC-x
        if let Some(rest) = s.strip_prefix("M-").or_else(|| s.strip_prefix("ESC-")) {
            if let Some(c) = single_char(rest) {
                return Ok(Key::Alt(c.to_ascii_lowercase()));
            }
        }

        match s.to_ascii_uppercase().as_str() {
            "ENTER" | "RET" => Ok(Key::Enter),
            "TAB" => Ok(Key::Tab),
            "BACKSPACE" | "BS" => Ok(Key::Backspace),
            "ESC" => Ok(Key::Esc),
            "DELETE" | "DEL" => Ok(Key::Delete),
            "HOME" => Ok(Key::Home),
            "END" => Ok(Key::End),
            "PAGEUP" | "PGUP" => Ok(Key::PageUp),
            "PAGEDOWN" | "PGDN" => Ok(Key::PageDown),
            "UP" => Ok(Key::Up),
            "DOWN" => Ok(Key::Down),
            "LEFT" => Ok(Key::Left),
            "RIGHT" => Ok(Key::Right),
            "NUL" | "NULL" => Ok(Key::Null),
            _ => {
                // Function keys F1-F24
                if let Some(num) = s.strip_prefix('F') {
                    if let Ok(n) = num.parse::<u8>() {
                        if (1..=24).contains(&n) {
                            return Ok(Key::F(n));
                        }
                    }
                }

                // Raw characters keep their case
                if let Some(c) = single_char(s) {
                    return Ok(Key::Char(c));
                }

                Err(format!("Unknown key: {}", s))
            }
        }
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Native input event representation for quillpad
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputEvent {
    pub key: Key,
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
    /// Super / Command key
    pub meta: bool,
}

impl InputEvent {
    /// Event for a key with no modifiers held
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            shift: false,
            alt: false,
            ctrl: false,
            meta: false,
        }
    }

    /// Event for a Ctrl chord, e.g. `InputEvent::ctrl('s')`
    pub fn ctrl(c: char) -> Self {
        Self {
            key: Key::Ctrl(c),
            shift: false,
            alt: false,
            ctrl: true,
            meta: false,
        }
    }

    /// True when the platform accelerator (Ctrl or Command) is held
    pub fn accelerator(&self) -> bool {
        self.ctrl || self.meta || matches!(self.key, Key::Ctrl(_))
    }

    /// The character this key produces, ignoring modifiers
    pub fn base_char(&self) -> Option<char> {
        match self.key {
            Key::Char(c) | Key::Ctrl(c) | Key::Alt(c) => Some(c),
            _ => None,
        }
    }
}

/// Normalized key input for binding lookups
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyInput {
    pub key: Key,
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl KeyInput {
    pub fn from_event(event: &InputEvent) -> Self {
        // Bindings are case-insensitive so caps lock doesn't change behavior.
        // Command is folded into Ctrl so "^S" matches on every platform.
        let ctrl = event.ctrl || event.meta;
        let key = match &event.key {
            Key::Char(c) if ctrl => Key::Ctrl(c.to_ascii_lowercase()),
            Key::Char(c) => Key::Char(c.to_ascii_lowercase()),
            Key::Alt(c) => Key::Alt(c.to_ascii_lowercase()),
            Key::Ctrl(c) => Key::Ctrl(c.to_ascii_lowercase()),
            other => other.clone(),
        };
        let ctrl = ctrl || matches!(key, Key::Ctrl(_));
        let alt = event.alt || matches!(key, Key::Alt(_));

        // Shift is implicit in the character for Char keys
        let shift = event.shift && !matches!(key, Key::Char(_) | Key::Ctrl(_) | Key::Alt(_));

        Self {
            key,
            shift,
            ctrl,
            alt,
        }
    }

    /// Parse a binding string like "^S", "ESC-f" or "S-Tab"
    pub fn parse(s: &str) -> Option<Self> {
        let (shift, key_str) = match s.strip_prefix("S-") {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        Key::from_str(key_str).ok().map(|key| {
            let ctrl = matches!(key, Key::Ctrl(_));
            let alt = matches!(key, Key::Alt(_));
            Self {
                key,
                shift,
                ctrl,
                alt,
            }
        })
    }
}

impl fmt::Display for KeyInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.shift {
            write!(f, "S-")?;
        }
        write!(f, "{}", self.key)
    }
}

/// Single-stroke key binding table
#[derive(Debug, Default, Clone)]
pub struct Keymap {
    bindings: HashMap<KeyInput, String>,
}

impl Keymap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a key string to a command name. Returns false for unparseable keys.
    pub fn bind(&mut self, key: &str, command: impl Into<String>) -> bool {
        match KeyInput::parse(key) {
            Some(input) => {
                self.bindings.insert(input, command.into());
                true
            }
            None => {
                tracing::warn!(key, "ignoring binding for unknown key");
                false
            }
        }
    }

    /// Command bound to this event, if any
    pub fn lookup(&self, event: &InputEvent) -> Option<&str> {
        self.bindings
            .get(&KeyInput::from_event(event))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
