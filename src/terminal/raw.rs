use std::io;
use std::panic::PanicHookInfo;
use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::{cursor, execute, terminal};

static TERMINAL_ACTIVE: AtomicBool = AtomicBool::new(false);

type PanicHook = Box<dyn Fn(&PanicHookInfo<'_>) + Sync + Send + 'static>;

/// RAII guard for raw mode and the alternate screen.
/// The terminal is restored on drop, and also before a panic message prints.
pub struct RawMode {
    original_hook: Option<PanicHook>,
}

impl RawMode {
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            terminal::Clear(terminal::ClearType::All)
        )?;
        TERMINAL_ACTIVE.store(true, Ordering::SeqCst);

        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(|info| {
            restore_terminal();
            eprintln!("{}", info);
        }));

        tracing::debug!("terminal in raw mode");
        Ok(Self {
            original_hook: Some(original_hook),
        })
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        restore_terminal();
        if let Some(hook) = self.original_hook.take() {
            std::panic::set_hook(hook);
        }
    }
}

fn restore_terminal() {
    if TERMINAL_ACTIVE.swap(false, Ordering::SeqCst) {
        let _ = execute!(
            io::stdout(),
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0),
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Entering raw mode would disturb the test runner's terminal, so only the
    // idle restore path is exercised here.
    #[test]
    fn test_restore_without_activation_is_noop() {
        assert!(!TERMINAL_ACTIVE.load(Ordering::SeqCst));
        restore_terminal();
        let guard = RawMode {
            original_hook: None,
        };
        drop(guard);
        assert!(!TERMINAL_ACTIVE.load(Ordering::SeqCst));
    }
}
