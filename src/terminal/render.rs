//! Terminal output: writes the display's back buffer to the terminal,
//! diffing against the front buffer so only changed cells are sent.

use std::io::{self, Write};

use crossterm::{QueueableCommand, cursor};

use crate::terminal::display::Display;

pub fn render_display_to_terminal<W: Write>(display: &Display, out: &mut W) -> io::Result<()> {
    // Hide cursor during update to prevent flickering
    out.queue(cursor::Hide)?;

    let needs_full = display.needs_full_redraw;
    if needs_full {
        write!(out, "\x1b[2J\x1b[H")?;
    }

    let front = &display.front_buffer;
    let back = &display.back_buffer;

    let mut last_sgr = String::new();
    let mut wrote_any = false;

    for y in 0..display.terminal_size.1 {
        for x in 0..display.terminal_size.0 {
            let Some(cell) = back.get(x, y) else {
                continue;
            };
            if !needs_full && front.get(x, y) == Some(cell) {
                continue;
            }
            if cell.hidden {
                continue;
            }

            write!(out, "\x1b[{};{}H", y + 1, x + 1)?;
            wrote_any = true;

            let (fg, bg) = if display.truecolor {
                (cell.fg, cell.bg)
            } else {
                (cell.fg.to_ansi_fallback(), cell.bg.to_ansi_fallback())
            };
            let sgr = format!(
                "{};{};{}",
                if cell.bold { "1" } else { "22" },
                fg.to_ansi_fg_code(),
                bg.to_ansi_bg_code()
            );
            if sgr != last_sgr {
                write!(out, "\x1b[{}m", sgr)?;
                last_sgr = sgr;
            }

            write!(out, "{}", cell.ch)?;
        }
    }

    if wrote_any {
        write!(out, "\x1b[0m")?;
    }

    if let Some((cx, cy)) = display.cursor_pos {
        out.queue(cursor::MoveTo(cx, cy))?;
        out.queue(cursor::Show)?;
    }

    out.flush()
}
