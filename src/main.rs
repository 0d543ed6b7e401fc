//! quillpad - a distraction-free markdown writing pad
//!
//! This is the main entry point. It parses CLI arguments, layers the
//! configuration, installs logging, and delegates to the mode runner.

mod cli;
mod run;

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use quillpad::config::{self, Config};
use quillpad::user_config;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

const LOG_FILE: &str = "quillpad.log";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let cli = cli::Cli::parse()?;
    if cli.help {
        println!("{}", cli::USAGE);
        return Ok(());
    }

    // Compiled-in defaults, then the config file, then CLI overrides
    let mut config = Config::default();
    user_config::configure(&mut config);
    let config_path = config::default_config_path();
    let config_found = match &config_path {
        Some(path) => config.load_file(path)?,
        None => false,
    };
    cli.apply_to_config(&mut config);

    let mode = run::EditorMode::from_cli(&cli);
    init_logging(&config, mode.logs_to_file())?;
    tracing::debug!(?mode, ?config_path, config_found, "starting");

    match mode {
        run::EditorMode::Render { source, tree } => run::run_render_mode(&source, tree)?,
        run::EditorMode::List => run::run_list_mode(&config)?,
        run::EditorMode::Delete(name) => run::run_delete_mode(&config, &name)?,
        run::EditorMode::Terminal => {
            run::run_terminal_mode(cli.session.as_deref(), &config, &cli.style_overrides())?
        }
    }

    Ok(())
}

/// Install the global subscriber. Terminal mode logs to a file in the data
/// directory; the other modes log to stderr.
fn init_logging(config: &Config, to_file: bool) -> Result<(), Box<dyn std::error::Error>> {
    let level = config
        .get_string("log_level")
        .and_then(|l| l.parse::<Level>().ok())
        .unwrap_or(Level::INFO);

    if to_file {
        let dir = config.data_dir();
        fs::create_dir_all(&dir)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(LOG_FILE))?;
        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }
    Ok(())
}
