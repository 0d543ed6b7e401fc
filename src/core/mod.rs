//! The headless authoring engine of quillpad.
//! It holds the document buffer and cursor, interprets keystrokes into
//! markdown-aware edits, renders the buffer into block structure, and keeps the
//! small pieces of session state (style, sprint timer, toasts) a host displays.

pub mod app;
pub mod buffer;
pub mod html;
pub mod input;
pub mod keystroke;
pub mod markdown;
pub mod notify;
pub mod prompt;
pub mod quotes;
pub mod session;
pub mod style;
pub mod timer;
pub mod utf8;
