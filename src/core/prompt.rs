//! Single-line prompt used to ask for a session name.

use crate::core::input::{InputEvent, Key};

/// What the answer to a prompt will be used for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAction {
    SaveSession,
    LoadSession,
    DeleteSession,
}

impl PromptAction {
    pub fn label(self) -> &'static str {
        match self {
            PromptAction::SaveSession => "Save session as: ",
            PromptAction::LoadSession => "Load session: ",
            PromptAction::DeleteSession => "Delete session: ",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResult {
    Pending,
    Submit(String),
    Cancel,
}

#[derive(Debug, Clone)]
pub struct Prompt {
    pub action: PromptAction,
    input: Vec<char>,
    /// Char index into `input`
    cursor: usize,
}

impl Prompt {
    pub fn new(action: PromptAction) -> Self {
        Self::with_input(action, "")
    }

    /// Prompt pre-filled with `initial`, cursor at its end
    pub fn with_input(action: PromptAction, initial: &str) -> Self {
        let input: Vec<char> = initial.chars().collect();
        let cursor = input.len();
        Self {
            action,
            input,
            cursor,
        }
    }

    pub fn input(&self) -> String {
        self.input.iter().collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn handle_key(&mut self, event: &InputEvent) -> PromptResult {
        match event.key {
            Key::Enter => return PromptResult::Submit(self.input().trim().to_string()),
            Key::Esc | Key::Ctrl('g') => return PromptResult::Cancel,
            Key::Char(c) if !event.ctrl && !event.alt && !event.meta => {
                self.input.insert(self.cursor, c);
                self.cursor += 1;
            }
            Key::Backspace if self.cursor > 0 => {
                self.cursor -= 1;
                self.input.remove(self.cursor);
            }
            Key::Delete if self.cursor < self.input.len() => {
                self.input.remove(self.cursor);
            }
            Key::Left => self.cursor = self.cursor.saturating_sub(1),
            Key::Right => self.cursor = (self.cursor + 1).min(self.input.len()),
            Key::Home | Key::Ctrl('a') => self.cursor = 0,
            Key::End | Key::Ctrl('e') => self.cursor = self.input.len(),
            _ => {}
        }
        PromptResult::Pending
    }
}
