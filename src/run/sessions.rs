//! Non-interactive session management: list and delete.

use std::io::{self, Write};

use quillpad::config::Config;
use quillpad::storage::SessionStore;

pub fn run_list_mode(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = SessionStore::new(config.data_dir());
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for name in store.list()? {
        writeln!(out, "{}", name)?;
    }
    out.flush()?;
    Ok(())
}

pub fn run_delete_mode(config: &Config, name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let store = SessionStore::new(config.data_dir());
    let message = store.delete(name)?;
    println!("{}", message);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quillpad::core::style::Theme;
    use quillpad::storage::WritingFile;

    #[test]
    fn test_delete_mode() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.set("data_dir", dir.path().to_string_lossy().to_string());

        let store = SessionStore::new(config.data_dir());
        store
            .save(&WritingFile {
                name: "old".to_string(),
                text: "bye".to_string(),
                font: "serif".to_string(),
                font_size: 20,
                theme: Theme::Light,
            })
            .unwrap();

        run_delete_mode(&config, "old").unwrap();
        assert!(store.list().unwrap().is_empty());
        assert!(run_delete_mode(&config, "old").is_err());
    }
}
