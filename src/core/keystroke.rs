//! Keystroke interpretation for markdown-aware authoring.
//!
//! Decides, per key event, whether the host should apply its native edit or
//! whether a synthesized edit replaces it: Tab inserts a fixed indent unit,
//! Enter on a list line continues the list, and the save accelerator is
//! turned into a save request. Offsets are char offsets into the text.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::input::{InputEvent, Key};
use crate::core::utf8::{char_count, char_to_byte};

/// Inserted on Tab in place of a hard tab character
pub const INDENT_UNIT: &str = "  ";

static UNORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)([-*])\s+").expect("unordered item pattern"));

static ORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)([0-9]+)\.\s+").expect("ordered item pattern"));

/// What the host should do with a key event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Apply the native edit for this key
    PassThrough,
    /// Suppress the key and persist the buffer; the text is unchanged
    RequestSave,
    /// Suppress the key and replace the text, placing the cursor at `cursor`
    Transform { text: String, cursor: usize },
}

/// Interpret `event` against `text` with the selection `[start, end)`.
///
/// Offsets past the end of `text` are clamped. A reversed selection is
/// normalized before use.
pub fn interpret(text: &str, start: usize, end: usize, event: &InputEvent) -> KeyOutcome {
    let (start, end) = (start.min(end), start.max(end));

    if is_save_shortcut(event) {
        tracing::debug!("save accelerator");
        return KeyOutcome::RequestSave;
    }

    match event.key {
        Key::Tab => insert_indent(text, start, end),
        Key::Enter => continue_list(text, start).unwrap_or(KeyOutcome::PassThrough),
        _ => KeyOutcome::PassThrough,
    }
}

/// Ctrl-S or Command-S; the shifted chord is left alone
pub fn is_save_shortcut(event: &InputEvent) -> bool {
    event.accelerator() && !event.shift && event.base_char() == Some('s')
}

fn insert_indent(text: &str, start: usize, end: usize) -> KeyOutcome {
    let start_byte = char_to_byte(text, start);
    let end_byte = char_to_byte(text, end);

    let mut out = String::with_capacity(text.len() + INDENT_UNIT.len());
    out.push_str(&text[..start_byte]);
    out.push_str(INDENT_UNIT);
    out.push_str(&text[end_byte..]);

    // Cursor is measured against the new text, so clamp to its length
    let cursor = (char_count(&text[..start_byte]) + char_count(INDENT_UNIT)).min(char_count(&out));
    tracing::debug!(start, end, cursor, "tab inserts indent unit");

    KeyOutcome::Transform { text: out, cursor }
}

/// Text of the line holding `offset`, from the last line break up to `offset`
pub fn current_line(text: &str, offset: usize) -> &str {
    let head = &text[..char_to_byte(text, offset)];
    match head.rfind('\n') {
        Some(nl) => &head[nl + 1..],
        None => head,
    }
}

/// The marker Enter inserts after a list line, or `None` for a non-list line
pub fn continuation_marker(line: &str) -> Option<String> {
    if let Some(caps) = ORDERED_ITEM.captures(line) {
        let indent = &caps[1];
        let next = increment_decimal(&caps[2]);
        return Some(format!("{}{}. ", indent, next));
    }

    if let Some(caps) = UNORDERED_ITEM.captures(line) {
        return Some(format!("{}{} ", &caps[1], &caps[2]));
    }

    None
}

fn continue_list(text: &str, start: usize) -> Option<KeyOutcome> {
    let marker = continuation_marker(current_line(text, start))?;

    let start_byte = char_to_byte(text, start);
    let mut out = String::with_capacity(text.len() + marker.len() + 1);
    out.push_str(&text[..start_byte]);
    out.push('\n');
    out.push_str(&marker);
    out.push_str(&text[start_byte..]);

    let cursor = (char_count(&text[..start_byte]) + 1 + char_count(&marker)).min(char_count(&out));
    tracing::debug!(start, cursor, marker = %marker.trim_end(), "continuing list");

    Some(KeyOutcome::Transform { text: out, cursor })
}

/// Add one to a run of ASCII digits without a fixed-width integer.
/// Leading zeros are dropped: "007" becomes "8".
fn increment_decimal(digits: &str) -> String {
    let trimmed = digits.trim_start_matches('0');
    let mut out: Vec<u8> = trimmed.bytes().collect();

    let mut carry = true;
    for b in out.iter_mut().rev() {
        if !carry {
            break;
        }
        if *b == b'9' {
            *b = b'0';
        } else {
            *b += 1;
            carry = false;
        }
    }
    if carry {
        out.insert(0, b'1');
    }

    out.into_iter().map(char::from).collect()
}
