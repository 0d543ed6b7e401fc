//! Line-oriented markdown block renderer.
//!
//! Turns raw buffer text into a flat sequence of [`BlockNode`]s in which every
//! [`BlockNode::ListOpen`] is matched by exactly one [`BlockNode::ListClose`],
//! closed innermost first. Rendering is pure: the list stack lives only for
//! the duration of one call.
//!
//! Supported block grammar, checked in this order on each line:
//!
//! | line (after trimming)     | result                          |
//! |---------------------------|---------------------------------|
//! | `#`..`###` then text      | heading, closes all open lists  |
//! | digits `.` whitespace     | ordered list item               |
//! | `-` or `*` whitespace     | unordered list item             |
//! | empty                     | break, closes all open lists    |
//! | anything else             | paragraph, closes all open lists|

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Columns of leading whitespace per nesting level
pub const INDENT_WIDTH: usize = 2;

/// Deepest heading level; longer hash runs render at this level
pub const MAX_HEADING_LEVEL: u8 = 3;

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,3})\s*").expect("heading pattern"));

static ORDERED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.\s+").expect("ordered marker pattern"));

static UNORDERED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*]\s+").expect("unordered marker pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Ordered,
    Unordered,
}

impl ListKind {
    /// HTML element name for this list kind
    pub fn tag(self) -> &'static str {
        match self {
            ListKind::Ordered => "ol",
            ListKind::Unordered => "ul",
        }
    }
}

/// One open list context during a render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListFrame {
    pub kind: ListKind,
    pub indent_level: usize,
}

/// One structural unit of rendered output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockNode {
    Heading { level: u8, text: String },
    Paragraph(String),
    Break,
    ListOpen(ListKind),
    ListItem(String),
    ListClose(ListKind),
}

impl fmt::Display for BlockNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockNode::Heading { level, text } => write!(f, "Heading({}, {:?})", level, text),
            BlockNode::Paragraph(text) => write!(f, "Paragraph({:?})", text),
            BlockNode::Break => write!(f, "Break"),
            BlockNode::ListOpen(kind) => write!(f, "ListOpen({:?})", kind),
            BlockNode::ListItem(text) => write!(f, "ListItem({:?})", text),
            BlockNode::ListClose(kind) => write!(f, "ListClose({:?})", kind),
        }
    }
}

/// A source line with the measurements every rule needs
struct Line<'a> {
    raw: &'a str,
    trimmed: &'a str,
    indent_level: usize,
}

impl<'a> Line<'a> {
    fn new(raw: &'a str) -> Self {
        let leading = raw.chars().take_while(|c| c.is_whitespace()).count();
        Self {
            raw,
            trimmed: raw.trim(),
            indent_level: leading / INDENT_WIDTH,
        }
    }
}

/// A line classifier paired with the handler that renders matching lines
struct LineRule {
    name: &'static str,
    matches: fn(&Line<'_>) -> bool,
    apply: fn(&mut RenderPass, &Line<'_>),
}

/// Evaluated top to bottom; the first match wins. The last rule matches everything.
const LINE_RULES: &[LineRule] = &[
    LineRule {
        name: "heading",
        matches: |line| HEADING.is_match(line.trimmed),
        apply: RenderPass::heading,
    },
    LineRule {
        name: "ordered-item",
        matches: |line| ORDERED_MARKER.is_match(line.trimmed),
        apply: |pass, line| {
            let text = ORDERED_MARKER.replace(line.trimmed, "");
            pass.list_item(ListKind::Ordered, line.indent_level, &text);
        },
    },
    LineRule {
        name: "unordered-item",
        matches: |line| UNORDERED_MARKER.is_match(line.trimmed),
        apply: |pass, line| {
            let text = UNORDERED_MARKER.replace(line.trimmed, "");
            pass.list_item(ListKind::Unordered, line.indent_level, &text);
        },
    },
    LineRule {
        name: "blank",
        matches: |line| line.trimmed.is_empty(),
        apply: |pass, _| {
            pass.close_all();
            pass.out.push(BlockNode::Break);
        },
    },
    LineRule {
        name: "paragraph",
        matches: |_| true,
        apply: |pass, line| {
            pass.close_all();
            pass.out.push(BlockNode::Paragraph(line.raw.to_string()));
        },
    },
];

/// State for a single top-to-bottom scan
struct RenderPass {
    stack: Vec<ListFrame>,
    out: Vec<BlockNode>,
}

impl RenderPass {
    fn new() -> Self {
        Self {
            stack: Vec::new(),
            out: Vec::new(),
        }
    }

    fn heading(&mut self, line: &Line<'_>) {
        self.close_all();

        // The pattern only matched if there is a hash run of 1..=3
        let Some(caps) = HEADING.captures(line.trimmed) else {
            return;
        };
        let level = caps[1].len() as u8;
        let text = line.trimmed[caps[0].len()..].to_string();
        self.out.push(BlockNode::Heading {
            level: level.min(MAX_HEADING_LEVEL),
            text,
        });
    }

    fn list_item(&mut self, kind: ListKind, indent_level: usize, text: &str) {
        // Frames at or deeper than this level are finished
        while let Some(top) = self.stack.last().copied() {
            if top.indent_level < indent_level {
                break;
            }
            self.close_top();
        }

        match self.stack.last().copied() {
            None => self.open(kind, indent_level),
            Some(top) if top.indent_level < indent_level => self.open(kind, indent_level),
            // Same depth, different kind: replace the frame
            Some(top) if top.kind != kind => {
                self.close_top();
                self.open(kind, indent_level);
            }
            Some(_) => {}
        }

        self.out.push(BlockNode::ListItem(text.to_string()));
    }

    fn open(&mut self, kind: ListKind, indent_level: usize) {
        self.stack.push(ListFrame { kind, indent_level });
        self.out.push(BlockNode::ListOpen(kind));
    }

    fn close_top(&mut self) {
        if let Some(frame) = self.stack.pop() {
            self.out.push(BlockNode::ListClose(frame.kind));
        }
    }

    fn close_all(&mut self) {
        while !self.stack.is_empty() {
            self.close_top();
        }
    }

    fn finish(mut self) -> Vec<BlockNode> {
        self.close_all();
        self.out
    }
}

/// Render the whole buffer into block nodes
pub fn render(text: &str) -> Vec<BlockNode> {
    let mut pass = RenderPass::new();

    for raw in text.split('\n') {
        let line = Line::new(raw);
        if let Some(rule) = LINE_RULES.iter().find(|rule| (rule.matches)(&line)) {
            tracing::trace!(rule = rule.name, line = raw, "classified");
            (rule.apply)(&mut pass, &line);
        }
    }

    let nodes = pass.finish();
    tracing::debug!(nodes = nodes.len(), bytes = text.len(), "render pass complete");
    nodes
}
