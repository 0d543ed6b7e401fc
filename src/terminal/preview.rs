//! Maps rendered blocks onto terminal rows.
//!
//! Headings get a setext-style rule under levels 1 and 2, list items are
//! indented by nesting depth with a bullet or a per-list number, and long
//! lines are word-wrapped to the screen width.

use crate::core::markdown::{BlockNode, ListKind};
use crate::core::utf8;

const BULLET: &str = "• ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Heading(u8),
    /// Underline drawn beneath a heading
    Rule,
    Body,
    Item,
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewLine {
    pub role: Role,
    /// Columns of leading space
    pub indent: usize,
    /// Bullet or number, drawn in the accent color
    pub marker: String,
    pub text: String,
}

impl PreviewLine {
    fn new(role: Role, indent: usize, marker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            role,
            indent,
            marker: marker.into(),
            text: text.into(),
        }
    }
}

/// Lay the block sequence out as unwrapped rows
pub fn layout(nodes: &[BlockNode]) -> Vec<PreviewLine> {
    // (kind, items seen) per open list, innermost last
    let mut lists: Vec<(ListKind, usize)> = Vec::new();
    let mut lines = Vec::new();

    for node in nodes {
        match node {
            BlockNode::Heading { level, text } => {
                let text = text.trim_end();
                lines.push(PreviewLine::new(Role::Heading(*level), 0, "", text));
                let rule = match level {
                    1 => Some('='),
                    2 => Some('-'),
                    _ => None,
                };
                if let Some(ch) = rule {
                    let width = utf8::visual_width(text, 1).max(1);
                    lines.push(PreviewLine::new(
                        Role::Rule,
                        0,
                        "",
                        ch.to_string().repeat(width),
                    ));
                }
            }
            BlockNode::Paragraph(text) => {
                lines.push(PreviewLine::new(Role::Body, 0, "", text.as_str()));
            }
            BlockNode::Break => lines.push(PreviewLine::new(Role::Blank, 0, "", "")),
            BlockNode::ListOpen(kind) => lists.push((*kind, 0)),
            BlockNode::ListClose(_) => {
                lists.pop();
            }
            BlockNode::ListItem(text) => {
                let depth = lists.len().saturating_sub(1);
                let marker = match lists.last_mut() {
                    Some((ListKind::Ordered, seen)) => {
                        *seen += 1;
                        format!("{}. ", seen)
                    }
                    _ => BULLET.to_string(),
                };
                lines.push(PreviewLine::new(Role::Item, depth * 2, marker, text.as_str()));
            }
        }
    }
    lines
}

/// Word-wrap `text` into rows no wider than `width` columns
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![String::new()];
    }

    let mut rows = Vec::new();
    let mut row = String::new();
    let mut row_width = 0;

    for word in text.split(' ') {
        let word_width = utf8::visual_width(word, 1);
        let sep = usize::from(!row.is_empty());

        if row_width + sep + word_width <= width {
            if sep == 1 {
                row.push(' ');
            }
            row.push_str(word);
            row_width += sep + word_width;
            continue;
        }

        if !row.is_empty() {
            rows.push(std::mem::take(&mut row));
        }

        // Words longer than a row are split at the width
        let mut rest = word;
        while utf8::visual_width(rest, 1) > width {
            let head = utf8::truncate_to_width(rest, width);
            if head.is_empty() {
                break;
            }
            rows.push(head.to_string());
            rest = &rest[head.len()..];
        }
        row.push_str(rest);
        row_width = utf8::visual_width(rest, 1);
    }
    rows.push(row);
    rows
}
