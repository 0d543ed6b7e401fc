//! Command-line argument parsing for quillpad.
//!
//! This module provides the `Cli` struct which encapsulates all command-line
//! options and methods for applying them over the configuration.

use std::path::PathBuf;

use quillpad::config::Config;
use quillpad::core::style::{StyleOverrides, Theme};

pub const USAGE: &str = "\
quillpad - a distraction-free markdown writing pad

Usage: quillpad [OPTIONS] [SESSION]

Opens the writing pad, loading SESSION if given.

Options:
  -h, --help            Show this help message
  -r, --render FILE     Print FILE rendered as HTML (- reads stdin)
      --tree            With --render, print one block per line instead
  -l, --list            List saved sessions
      --delete NAME     Delete a saved session
  -t, --theme NAME      Theme: light or dark
      --font NAME       Font family
      --font-size N     Font size (8-48)
      --data-dir DIR    Where sessions and preferences are kept
  -v, --verbose         More logging (repeat for trace)";

/// Command-line interface configuration.
#[derive(Debug, Default, PartialEq)]
pub struct Cli {
    /// Session to open in the writing pad
    pub session: Option<String>,

    /// Render this file and exit ("-" for stdin)
    pub render: Option<PathBuf>,

    /// Print block nodes instead of HTML
    pub tree: bool,

    pub list: bool,

    pub delete: Option<String>,

    pub theme: Option<Theme>,

    pub font: Option<String>,

    pub font_size: Option<i64>,

    pub data_dir: Option<PathBuf>,

    /// Number of -v flags
    pub verbose: u8,

    pub help: bool,
}

impl Cli {
    /// Parse the process arguments.
    pub fn parse() -> Result<Self, Box<dyn std::error::Error>> {
        Self::parse_from(std::env::args().skip(1))
    }

    /// Parse an argument list (without the program name).
    pub fn parse_from<I>(args: I) -> Result<Self, Box<dyn std::error::Error>>
    where
        I: IntoIterator<Item = String>,
    {
        let mut cli = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => cli.help = true,
                "-r" | "--render" => {
                    cli.render = Some(PathBuf::from(value(&mut args, "--render")?));
                }
                "--tree" => cli.tree = true,
                "-l" | "--list" => cli.list = true,
                "--delete" => cli.delete = Some(value(&mut args, "--delete")?),
                "-t" | "--theme" => {
                    cli.theme = Some(value(&mut args, "--theme")?.parse::<Theme>()?);
                }
                "--font" => cli.font = Some(value(&mut args, "--font")?),
                "--font-size" => {
                    let raw = value(&mut args, "--font-size")?;
                    let size = raw
                        .parse::<i64>()
                        .map_err(|_| format!("--font-size expects a number, got {}", raw))?;
                    cli.font_size = Some(size);
                }
                "--data-dir" => cli.data_dir = Some(PathBuf::from(value(&mut args, "--data-dir")?)),
                "-v" | "--verbose" => cli.verbose = cli.verbose.saturating_add(1),
                "-vv" => cli.verbose = cli.verbose.saturating_add(2),
                "-" => return Err("Unexpected '-'. Use --render - to read stdin.".into()),
                flag if flag.starts_with('-') => {
                    return Err(format!("Unknown flag: {}. Use --help for usage.", flag).into());
                }
                _ => {
                    if cli.session.is_some() {
                        return Err(format!("Unexpected argument: {}", arg).into());
                    }
                    cli.session = Some(arg);
                }
            }
        }

        if cli.tree && cli.render.is_none() {
            return Err("--tree only applies with --render".into());
        }

        Ok(cli)
    }

    /// Apply CLI overrides to a configuration object.
    pub fn apply_to_config(&self, config: &mut Config) {
        if let Some(theme) = self.theme {
            config.set("theme", theme.as_str());
        }
        if let Some(font) = &self.font {
            config.set("font", font.as_str());
        }
        if let Some(size) = self.font_size {
            config.set("font_size", size);
        }
        if let Some(dir) = &self.data_dir {
            config.set("data_dir", dir.to_string_lossy().to_string());
        }
        match self.verbose {
            0 => {}
            1 => config.set("log_level", "debug"),
            _ => config.set("log_level", "trace"),
        }
    }

    /// Style flags that win over stored preferences
    pub fn style_overrides(&self) -> StyleOverrides {
        StyleOverrides {
            theme: self.theme,
            font: self.font.clone(),
            font_size: self.font_size,
        }
    }
}

fn value<I: Iterator<Item = String>>(
    args: &mut I,
    flag: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    args.next()
        .ok_or_else(|| format!("{} requires a value", flag).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, Box<dyn std::error::Error>> {
        Cli::parse_from(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_no_arguments() {
        assert_eq!(parse(&[]).unwrap(), Cli::default());
    }

    #[test]
    fn test_session_and_style_flags() {
        let cli = parse(&["-t", "dark", "--font", "Georgia", "--font-size", "30", "notes"]).unwrap();
        assert_eq!(cli.session.as_deref(), Some("notes"));
        assert_eq!(cli.theme, Some(Theme::Dark));

        let overrides = cli.style_overrides();
        assert_eq!(overrides.font.as_deref(), Some("Georgia"));
        assert_eq!(overrides.font_size, Some(30));
    }

    #[test]
    fn test_render_modes() {
        let cli = parse(&["--render", "-", "--tree"]).unwrap();
        assert_eq!(cli.render, Some(PathBuf::from("-")));
        assert!(cli.tree);

        assert!(parse(&["--tree"]).is_err());
        assert!(parse(&["-r"]).is_err());
    }

    #[test]
    fn test_bad_values() {
        assert!(parse(&["--theme", "sepia"]).is_err());
        assert!(parse(&["--font-size", "big"]).is_err());
        assert!(parse(&["--bogus"]).is_err());
        assert!(parse(&["one", "two"]).is_err());
    }

    #[test]
    fn test_apply_to_config() {
        let cli = parse(&["-v", "-v", "--data-dir", "/tmp/q", "-t", "light"]).unwrap();
        let mut config = Config::default();
        cli.apply_to_config(&mut config);
        assert_eq!(config.get_string("log_level"), Some("trace"));
        assert_eq!(config.get_string("data_dir"), Some("/tmp/q"));
        assert_eq!(config.get_string("theme"), Some("light"));
    }
}
