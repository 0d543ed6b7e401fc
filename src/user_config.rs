// quillpad Configuration
// Compiled-in defaults. Override them in $XDG_CONFIG_HOME/quillpad/config.toml

use crate::config::Config;

/// User configuration function
pub fn configure(config: &mut Config) {
    // Keybindings
    // The save accelerator (^S, or Command-S) is not bound here. It is checked
    // before bindings, so binding ^S has no effect.

    // Sessions
    config.bind("^N", "new-session");
    config.bind("^O", "load-session");
    config.bind("^K", "delete-session");
    config.bind("^L", "list-sessions");

    // View
    config.bind("^P", "toggle-preview");
    config.bind("^D", "toggle-theme");
    config.bind("F2", "font-smaller");
    config.bind("F3", "font-larger");
    config.bind("F6", "random-font");

    // Sprint timer
    config.bind("^T", "toggle-timer");
    config.bind("F4", "timer-shorter");
    config.bind("F5", "timer-longer");

    // Music
    config.bind("F7", "toggle-music");

    config.bind("^Q", "quit");

    // =========================================================================
    // EDITOR SETTINGS
    // =========================================================================
    // Theme: "light" | "dark"
    config.set("theme", "light");

    // Preview font family and size (8..=48). The terminal host shows these in
    // the status line and stores them with every saved session.
    config.set("font", "serif");
    config.set("font_size", 20);

    // Sprint length in minutes (1..=120)
    config.set("timer_minutes", 15);

    // Where sessions and preferences are kept. Empty = $XDG_DATA_HOME/quillpad
    config.set("data_dir", "");

    // Log verbosity for quillpad.log: "error" | "warn" | "info" | "debug" | "trace"
    config.set("log_level", "info");

    // Audio file played by toggle-music. Empty = no music.
    config.set("music", "");
}
