//! Application execution modes for quillpad.
//!
//! - Render mode prints a document as HTML or as its block tree
//! - Session modes list or delete saved sessions
//! - Terminal mode runs the interactive writing pad

mod render;
mod sessions;
mod tui;

use std::path::PathBuf;

pub use render::run_render_mode;
pub use sessions::{run_delete_mode, run_list_mode};
pub use tui::run_terminal_mode;

use crate::cli::Cli;

/// Editor execution mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Render { source: PathBuf, tree: bool },
    List,
    Delete(String),
    Terminal,
}

impl EditorMode {
    pub fn from_cli(cli: &Cli) -> Self {
        if let Some(source) = &cli.render {
            EditorMode::Render {
                source: source.clone(),
                tree: cli.tree,
            }
        } else if cli.list {
            EditorMode::List
        } else if let Some(name) = &cli.delete {
            EditorMode::Delete(name.clone())
        } else {
            EditorMode::Terminal
        }
    }

    /// Terminal mode owns the screen, so its log goes to a file
    pub fn logs_to_file(&self) -> bool {
        matches!(self, EditorMode::Terminal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mode(args: &[&str]) -> EditorMode {
        let cli = Cli::parse_from(args.iter().map(|s| s.to_string())).unwrap();
        EditorMode::from_cli(&cli)
    }

    #[test]
    fn test_mode_selection() {
        assert_eq!(mode(&[]), EditorMode::Terminal);
        assert_eq!(mode(&["draft"]), EditorMode::Terminal);
        assert_eq!(mode(&["-l"]), EditorMode::List);
        assert_eq!(mode(&["--delete", "old"]), EditorMode::Delete("old".to_string()));
        assert_eq!(
            mode(&["-r", "a.md", "--tree"]),
            EditorMode::Render {
                source: PathBuf::from("a.md"),
                tree: true
            }
        );
    }

    #[test]
    fn test_render_wins_over_list() {
        assert!(matches!(mode(&["-l", "-r", "-"]), EditorMode::Render { .. }));
        assert!(EditorMode::Terminal.logs_to_file());
        assert!(!EditorMode::List.logs_to_file());
    }
}
