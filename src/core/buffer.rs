//! Buffer: the document text and the cursor into it.
//!
//! Text lives in a ropey `Rope`; all offsets are char offsets. The cursor is
//! always clamped to the current text, and wholesale replacement swaps text and
//! cursor together so no caller can observe one without the other.

use ropey::{Rope, RopeSlice};

use crate::core::utf8::{first_grapheme_chars, last_grapheme_chars};

/// Selection `[start, end)` in char offsets. `start == end` is a caret.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub start: usize,
    pub end: usize,
}

impl Cursor {
    pub fn at(pos: usize) -> Self {
        Self { start: pos, end: pos }
    }

    pub fn is_caret(&self) -> bool {
        self.start == self.end
    }
}

/// Where the cursor lands after the text is replaced wholesale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Start,
    End,
}

#[derive(Debug)]
pub struct Buffer {
    rope: Rope,
    cursor: Cursor,
    /// Dirty flag (true if buffer has changes not yet saved)
    pub modified: bool,
    /// Bumped on every text change
    pub version: u64,
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Buffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self {
            rope: Rope::new(),
            cursor: Cursor::default(),
            modified: false,
            version: 0,
        }
    }

    /// Create a buffer from a string, cursor at the end
    pub fn from_string(content: impl AsRef<str>) -> Self {
        let rope = Rope::from_str(content.as_ref());
        let end = rope.len_chars();
        Self {
            rope,
            cursor: Cursor::at(end),
            modified: false,
            version: 0,
        }
    }

    /// Length in chars
    pub fn len(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Full text as an owned string
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Line text without its trailing line break
    pub fn line(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let slice = self.rope.line(line_idx);
        let len = slice.len_chars() - line_break_len(slice);
        Some(slice.slice(..len).to_string())
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// (line, column) of the caret, both zero-based, column in chars
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let pos = self.cursor.start;
        let line = self.rope.char_to_line(pos);
        (line, pos - self.rope.line_to_char(line))
    }

    /// Move the caret, clamped to the text
    pub fn set_cursor(&mut self, pos: usize) {
        self.cursor = Cursor::at(pos.min(self.len()));
    }

    /// Select `[start, end)`, clamped and normalized
    pub fn select(&mut self, start: usize, end: usize) {
        let len = self.len();
        let (a, b) = (start.min(len), end.min(len));
        self.cursor = Cursor {
            start: a.min(b),
            end: a.max(b),
        };
    }

    // ==================== Wholesale replacement ====================

    /// Replace text and cursor in one step
    pub fn replace(&mut self, text: &str, placement: Placement) {
        let rope = Rope::from_str(text);
        let pos = match placement {
            Placement::Start => 0,
            Placement::End => rope.len_chars(),
        };
        self.rope = rope;
        self.cursor = Cursor::at(pos);
        self.mark_modified();
    }

    pub fn clear(&mut self) {
        self.replace("", Placement::Start);
    }

    /// Install a synthesized edit. The cursor is clamped to the new text.
    pub fn apply_transform(&mut self, text: &str, cursor: usize) {
        self.rope = Rope::from_str(text);
        self.cursor = Cursor::at(cursor.min(self.rope.len_chars()));
        self.mark_modified();
    }

    // ==================== Native edits ====================

    /// Insert text at the caret, replacing any selection
    pub fn insert(&mut self, text: &str) {
        self.delete_selection();
        let pos = self.cursor.start;
        self.rope.insert(pos, text);
        self.cursor = Cursor::at(pos + text.chars().count());
        self.mark_modified();
    }

    pub fn insert_char(&mut self, ch: char) {
        let mut tmp = [0u8; 4];
        self.insert(ch.encode_utf8(&mut tmp));
    }

    /// Delete the selection, or the grapheme before the caret
    pub fn backspace(&mut self) {
        if self.delete_selection() {
            return;
        }
        let pos = self.cursor.start;
        if pos == 0 {
            return;
        }
        let line = self.rope.char_to_line(pos);
        let line_start = self.rope.line_to_char(line);
        let n = if pos == line_start {
            // Join with the previous line, removing its whole break
            line_break_len(self.rope.line(line - 1)).max(1)
        } else {
            let head = self.rope.slice(line_start..pos).to_string();
            last_grapheme_chars(&head).max(1)
        };
        self.rope.remove(pos - n..pos);
        self.cursor = Cursor::at(pos - n);
        self.mark_modified();
    }

    /// Delete the selection, or the grapheme after the caret
    pub fn delete_forward(&mut self) {
        if self.delete_selection() {
            return;
        }
        let pos = self.cursor.start;
        if pos >= self.len() {
            return;
        }
        let line = self.rope.char_to_line(pos);
        let line_end = self.line_end(line);
        let n = if pos == line_end {
            line_break_len(self.rope.line(line)).max(1)
        } else {
            let tail = self.rope.slice(pos..line_end).to_string();
            first_grapheme_chars(&tail).max(1)
        };
        self.rope.remove(pos..(pos + n).min(self.len()));
        self.mark_modified();
    }

    fn delete_selection(&mut self) -> bool {
        if self.cursor.is_caret() {
            return false;
        }
        let Cursor { start, end } = self.cursor;
        self.rope.remove(start..end);
        self.cursor = Cursor::at(start);
        self.mark_modified();
        true
    }

    // ==================== Motion ====================

    pub fn move_left(&mut self) {
        let pos = self.cursor.start;
        if !self.cursor.is_caret() {
            self.set_cursor(pos);
            return;
        }
        if pos == 0 {
            return;
        }
        let line = self.rope.char_to_line(pos);
        let line_start = self.rope.line_to_char(line);
        let n = if pos == line_start {
            line_break_len(self.rope.line(line - 1)).max(1)
        } else {
            let head = self.rope.slice(line_start..pos).to_string();
            last_grapheme_chars(&head).max(1)
        };
        self.set_cursor(pos - n);
    }

    pub fn move_right(&mut self) {
        if !self.cursor.is_caret() {
            self.set_cursor(self.cursor.end);
            return;
        }
        let pos = self.cursor.start;
        if pos >= self.len() {
            return;
        }
        let line = self.rope.char_to_line(pos);
        let line_end = self.line_end(line);
        let n = if pos == line_end {
            line_break_len(self.rope.line(line)).max(1)
        } else {
            let tail = self.rope.slice(pos..line_end).to_string();
            first_grapheme_chars(&tail).max(1)
        };
        self.set_cursor(pos + n);
    }

    pub fn move_up(&mut self) {
        let (line, col) = self.cursor_line_col();
        if line == 0 {
            self.set_cursor(0);
        } else {
            self.move_to_line_col(line - 1, col);
        }
    }

    pub fn move_down(&mut self) {
        let (line, col) = self.cursor_line_col();
        if line + 1 >= self.rope.len_lines() {
            self.set_cursor(self.len());
        } else {
            self.move_to_line_col(line + 1, col);
        }
    }

    pub fn move_home(&mut self) {
        let (line, _) = self.cursor_line_col();
        self.set_cursor(self.rope.line_to_char(line));
    }

    pub fn move_end(&mut self) {
        let (line, _) = self.cursor_line_col();
        self.set_cursor(self.line_end(line));
    }

    fn move_to_line_col(&mut self, line: usize, col: usize) {
        let start = self.rope.line_to_char(line);
        let end = self.line_end(line);
        self.set_cursor(start + col.min(end - start));
    }

    /// Char offset of the end of `line`, before its line break
    fn line_end(&self, line: usize) -> usize {
        let slice = self.rope.line(line);
        self.rope.line_to_char(line) + slice.len_chars() - line_break_len(slice)
    }

    // ==================== State Management ====================

    /// Called after a successful save
    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    fn mark_modified(&mut self) {
        self.modified = true;
        self.version += 1;
    }
}

/// Chars taken by the break ending `line`: two for CRLF, one for any other
/// break ropey recognizes, zero on the last line
fn line_break_len(line: RopeSlice) -> usize {
    let len = line.len_chars();
    if len == 0 {
        return 0;
    }
    match line.char(len - 1) {
        '\n' if len > 1 && line.char(len - 2) == '\r' => 2,
        '\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}' => 1,
        _ => 0,
    }
}
