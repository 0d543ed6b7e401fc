//! EditingSession: one open document with its style and cursor.
//!
//! Every key goes through the keystroke interpreter first. Synthesized edits
//! replace the buffer; pass-through keys get the native edit a plain text field
//! would apply.

use crate::core::buffer::{Buffer, Placement};
use crate::core::input::{InputEvent, Key};
use crate::core::keystroke::{self, KeyOutcome};
use crate::core::markdown::{self, BlockNode};
use crate::core::style::Style;
use crate::storage::WritingFile;

/// What a key did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Text changed; the preview needs a fresh render
    Edited,
    /// Only the cursor moved
    Moved,
    /// Host should persist the buffer under a session name
    SaveRequested,
    /// Key had no effect on the session
    Ignored,
}

#[derive(Debug, Default)]
pub struct EditingSession {
    buffer: Buffer,
    pub style: Style,
    /// Name the session was last saved or loaded under
    name: Option<String>,
}

impl EditingSession {
    pub fn new(style: Style) -> Self {
        Self {
            buffer: Buffer::new(),
            style,
            name: None,
        }
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_modified(&self) -> bool {
        self.buffer.modified
    }

    pub fn handle_key(&mut self, event: &InputEvent) -> SessionEvent {
        let text = self.buffer.text();
        let cursor = self.buffer.cursor();

        match keystroke::interpret(&text, cursor.start, cursor.end, event) {
            KeyOutcome::RequestSave => SessionEvent::SaveRequested,
            KeyOutcome::Transform { text, cursor } => {
                self.buffer.apply_transform(&text, cursor);
                SessionEvent::Edited
            }
            KeyOutcome::PassThrough => self.apply_native(event),
        }
    }

    /// The edit a plain text field applies for keys the interpreter passes on
    fn apply_native(&mut self, event: &InputEvent) -> SessionEvent {
        if event.ctrl || event.alt || event.meta {
            return SessionEvent::Ignored;
        }

        match event.key {
            Key::Char(c) => self.buffer.insert_char(c),
            Key::Enter => self.buffer.insert_char('\n'),
            Key::Backspace => self.buffer.backspace(),
            Key::Delete => self.buffer.delete_forward(),
            Key::Left => {
                self.buffer.move_left();
                return SessionEvent::Moved;
            }
            Key::Right => {
                self.buffer.move_right();
                return SessionEvent::Moved;
            }
            Key::Up => {
                self.buffer.move_up();
                return SessionEvent::Moved;
            }
            Key::Down => {
                self.buffer.move_down();
                return SessionEvent::Moved;
            }
            Key::Home => {
                self.buffer.move_home();
                return SessionEvent::Moved;
            }
            Key::End => {
                self.buffer.move_end();
                return SessionEvent::Moved;
            }
            _ => return SessionEvent::Ignored,
        }
        SessionEvent::Edited
    }

    /// Replace the document after a session load; cursor goes to the end
    pub fn load_buffer(&mut self, text: &str) {
        self.buffer.replace(text, Placement::End);
        self.buffer.mark_saved();
    }

    /// Start a fresh, unnamed document; cursor goes to the start
    pub fn clear_buffer(&mut self) {
        self.buffer.clear();
        self.buffer.mark_saved();
        self.name = None;
    }

    /// Current block structure of the document
    pub fn render(&self) -> Vec<BlockNode> {
        markdown::render(&self.buffer.text())
    }

    /// Snapshot for persisting under `name`
    pub fn to_writing_file(&self, name: &str) -> WritingFile {
        WritingFile {
            name: name.to_string(),
            text: self.buffer.text(),
            font: self.style.font.clone(),
            font_size: self.style.font_size(),
            theme: self.style.theme,
        }
    }

    /// Record a successful save
    pub fn mark_saved(&mut self, name: &str) {
        self.name = Some(name.to_string());
        self.buffer.mark_saved();
    }

    /// Adopt a loaded session: text, style and name together
    pub fn open_writing_file(&mut self, file: WritingFile) {
        self.load_buffer(&file.text);
        self.style = Style::new(file.theme, file.font, file.font_size as i64);
        self.name = Some(file.name);
    }
}
