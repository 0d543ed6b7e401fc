//! Screen model for terminal mode: a double-buffered cell grid that the
//! workbench state is drawn into.
//!
//! Layout, top to bottom: the writing area (raw text or preview), a status
//! line, and a message line that shows the prompt or the newest toast.

use crate::core::app::App;
use crate::core::utf8;
use crate::terminal::color::{Color, Palette};
use crate::terminal::preview::{self, Role};

pub const TAB_WIDTH: usize = 4;

/// Left margin of the writing area
const MARGIN: u16 = 2;

const HINT: &str = "^S save  ^O open  ^P preview  ^N new  ^Q quit";

/// Represents a single cell on the terminal screen
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
    /// Covered by the previous wide character and skipped on output
    pub hidden: bool,
}

impl Cell {
    pub fn new(ch: char, fg: Color, bg: Color) -> Self {
        Self {
            ch,
            fg,
            bg,
            bold: false,
            hidden: false,
        }
    }

    pub fn empty() -> Self {
        Self::new(' ', Color::Reset, Color::Reset)
    }
}

#[derive(Clone, Debug)]
pub struct ScreenBuffer {
    pub cells: Vec<Cell>,
    pub width: u16,
    pub height: u16,
}

impl ScreenBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            cells: vec![Cell::empty(); (width as usize) * (height as usize)],
            width,
            height,
        }
    }

    fn fill(&mut self, cell: Cell) {
        for c in &mut self.cells {
            *c = cell;
        }
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if x < self.width && y < self.height {
            let idx = (y as usize) * (self.width as usize) + (x as usize);
            self.cells[idx] = cell;
        }
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if x < self.width && y < self.height {
            Some(&self.cells[(y as usize) * (self.width as usize) + (x as usize)])
        } else {
            None
        }
    }

    /// Text of one row, hidden cells skipped
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter(|c| !c.hidden)
            .map(|c| c.ch)
            .collect()
    }
}

/// Pen used while drawing a run of text
#[derive(Clone, Copy)]
struct Pen {
    fg: Color,
    bg: Color,
    bold: bool,
}

pub struct Display {
    /// Terminal dimensions (cols, rows)
    pub terminal_size: (u16, u16),
    /// Whether a full screen clear is needed (e.g. after resize)
    pub needs_full_redraw: bool,
    /// Currently on screen
    pub front_buffer: ScreenBuffer,
    /// Being drawn to
    pub back_buffer: ScreenBuffer,
    /// Where the terminal cursor goes after output
    pub cursor_pos: Option<(u16, u16)>,
    /// Emit 24-bit colors; otherwise fall back to basic ANSI
    pub truecolor: bool,
    scroll_top: usize,
    hscroll: usize,
}

impl Display {
    pub fn new(width: u16, height: u16, truecolor: bool) -> Self {
        Self {
            terminal_size: (width, height),
            needs_full_redraw: true,
            front_buffer: ScreenBuffer::new(width, height),
            back_buffer: ScreenBuffer::new(width, height),
            cursor_pos: None,
            truecolor,
            scroll_top: 0,
            hscroll: 0,
        }
    }

    /// Size from the live terminal, color depth from the environment
    pub fn new_terminal() -> std::io::Result<Self> {
        let (cols, rows) = crossterm::terminal::size()?;
        let truecolor = detect_truecolor(|k| std::env::var(k));
        Ok(Self::new(cols, rows, truecolor))
    }

    pub fn update_size(&mut self, cols: u16, rows: u16) {
        if cols == 0 || rows == 0 {
            return;
        }
        self.terminal_size = (cols, rows);
        self.front_buffer = ScreenBuffer::new(cols, rows);
        self.back_buffer = ScreenBuffer::new(cols, rows);
        self.needs_full_redraw = true;
    }

    /// Rows available to the writing area
    fn text_rows(&self) -> usize {
        (self.terminal_size.1 as usize).saturating_sub(2)
    }

    fn text_cols(&self) -> usize {
        (self.terminal_size.0.saturating_sub(MARGIN * 2)) as usize
    }

    /// Draw the whole workbench into the back buffer
    pub fn draw(&mut self, app: &mut App) {
        let palette = Palette::for_theme(app.session.style.theme);
        self.back_buffer.fill(Cell::new(' ', palette.fg, palette.bg));
        self.cursor_pos = None;

        if app.preview {
            self.draw_preview(app, &palette);
        } else {
            self.draw_text(app, &palette);
        }
        self.draw_status(app, &palette);
        self.draw_message(app, &palette);
    }

    fn draw_text(&mut self, app: &App, palette: &Palette) {
        let rows = self.text_rows();
        let cols = self.text_cols();
        if rows == 0 || cols == 0 {
            return;
        }

        let buffer = app.session.buffer();
        let (cursor_line, cursor_col) = buffer.cursor_line_col();

        if cursor_line < self.scroll_top {
            self.scroll_top = cursor_line;
        } else if cursor_line >= self.scroll_top + rows {
            self.scroll_top = cursor_line + 1 - rows;
        }

        let cursor_text = buffer.line(cursor_line).unwrap_or_default();
        let cursor_prefix = &cursor_text[..utf8::char_to_byte(&cursor_text, cursor_col)];
        let cursor_x = utf8::visual_width(cursor_prefix, TAB_WIDTH);
        if cursor_x < self.hscroll {
            self.hscroll = cursor_x;
        } else if cursor_x >= self.hscroll + cols {
            self.hscroll = cursor_x + 1 - cols;
        }

        let pen = Pen {
            fg: palette.fg,
            bg: palette.bg,
            bold: false,
        };
        if buffer.is_empty() {
            let hint = Pen {
                fg: palette.muted,
                ..pen
            };
            self.put_line(MARGIN, 0, app.placeholder(), 0, cols, hint);
        } else {
            for row in 0..rows {
                let Some(line) = buffer.line(self.scroll_top + row) else {
                    break;
                };
                self.put_line(MARGIN, row as u16, &line, self.hscroll, cols, pen);
            }
        }

        self.cursor_pos = Some((
            MARGIN + (cursor_x - self.hscroll) as u16,
            (cursor_line - self.scroll_top) as u16,
        ));
    }

    fn draw_preview(&mut self, app: &App, palette: &Palette) {
        let rows = self.text_rows();
        let cols = self.text_cols();
        if rows == 0 || cols == 0 {
            return;
        }

        let mut y = 0usize;
        for line in preview::layout(&app.session.render()) {
            let (fg, bold) = match line.role {
                Role::Heading(_) => (palette.accent, true),
                Role::Rule => (palette.muted, false),
                _ => (palette.fg, false),
            };
            let lead = line.indent + utf8::visual_width(&line.marker, 1);
            let body_cols = cols.saturating_sub(lead).max(1);

            for (i, part) in preview::wrap(&line.text, body_cols).iter().enumerate() {
                if y >= rows {
                    return;
                }
                let x = MARGIN + line.indent as u16;
                let mut text_x = x;
                if i == 0 && !line.marker.is_empty() {
                    let marker_pen = Pen {
                        fg: palette.accent,
                        bg: palette.bg,
                        bold: false,
                    };
                    text_x = self.put_line(x, y as u16, &line.marker, 0, cols, marker_pen);
                } else if !line.marker.is_empty() {
                    text_x = x + utf8::visual_width(&line.marker, 1) as u16;
                }
                let pen = Pen {
                    fg,
                    bg: palette.bg,
                    bold,
                };
                self.put_line(text_x, y as u16, part, 0, body_cols, pen);
                y += 1;
            }
        }
    }

    fn draw_status(&mut self, app: &mut App, palette: &Palette) {
        let (width, height) = self.terminal_size;
        let Some(y) = height.checked_sub(2) else {
            return;
        };

        let music = if app.music_playing() { "  ♪" } else { "" };
        let style = &app.session.style;
        let name = app.session.name().unwrap_or("[untitled]");
        let dirty = if app.session.is_modified() { "*" } else { "" };
        let mode = if app.preview { "PREVIEW" } else { "WRITE" };
        let timer = if app.timer.is_running() {
            format!("⏱ {}", app.timer.display())
        } else {
            format!("timer {}", app.timer.display())
        };

        let left = format!(
            " {}{}  {}  {}  {} {}px  {}{}",
            name,
            dirty,
            mode,
            style.theme,
            style.font,
            style.font_size(),
            timer,
            music
        );
        let (line, col) = app.session.buffer().cursor_line_col();
        let right = format!("Ln {}, Col {} ", line + 1, col + 1);

        let pen = Pen {
            fg: palette.status_fg,
            bg: palette.status_bg,
            bold: false,
        };
        for x in 0..width {
            self.back_buffer.set(x, y, Cell::new(' ', pen.fg, pen.bg));
        }
        self.put_line(0, y, &left, 0, width as usize, pen);

        let right_width = utf8::visual_width(&right, 1) as u16;
        let left_width = utf8::visual_width(&left, 1) as u16;
        if left_width + right_width < width {
            self.put_line(width - right_width, y, &right, 0, right_width as usize, pen);
        }
    }

    fn draw_message(&mut self, app: &App, palette: &Palette) {
        let (width, height) = self.terminal_size;
        let Some(y) = height.checked_sub(1) else {
            return;
        };
        let cols = width as usize;

        if let Some(prompt) = &app.prompt {
            let pen = Pen {
                fg: palette.fg,
                bg: palette.bg,
                bold: true,
            };
            let label = prompt.action.label();
            let x = self.put_line(0, y, label, 0, cols, pen);
            let input = prompt.input();
            let pen = Pen { bold: false, ..pen };
            self.put_line(x, y, &input, 0, cols.saturating_sub(x as usize), pen);

            let before: String = input.chars().take(prompt.cursor()).collect();
            let cx = x as usize + utf8::visual_width(&before, 1);
            self.cursor_pos = Some(((cx.min(cols.saturating_sub(1))) as u16, y));
            return;
        }

        let (text, fg) = match app.notifications.latest() {
            Some(n) => (n.message.as_str(), palette.notification(n.kind)),
            None => (HINT, palette.muted),
        };
        let pen = Pen {
            fg,
            bg: palette.bg,
            bold: false,
        };
        self.put_line(0, y, text, 0, cols, pen);
    }

    /// Draw `text` at (x, y), skipping the first `skip` columns and drawing at
    /// most `max_cols` columns. Returns the column after the last cell drawn.
    fn put_line(&mut self, x: u16, y: u16, text: &str, skip: usize, max_cols: usize, pen: Pen) -> u16 {
        let mut col = 0usize;
        let mut screen_x = x;
        let limit = skip + max_cols;

        for ch in text.chars() {
            if ch == '\t' {
                let next = (col / TAB_WIDTH + 1) * TAB_WIDTH;
                while col < next {
                    if col >= skip && col < limit {
                        self.back_buffer.set(screen_x, y, pen_cell(' ', pen));
                        screen_x += 1;
                    }
                    col += 1;
                }
                continue;
            }

            let w = utf8::char_width(ch);
            if w == 0 {
                continue;
            }
            if col + w > limit {
                break;
            }
            if col >= skip {
                self.back_buffer.set(screen_x, y, pen_cell(ch, pen));
                if w == 2 {
                    let mut hidden = pen_cell(' ', pen);
                    hidden.hidden = true;
                    self.back_buffer.set(screen_x + 1, y, hidden);
                }
                screen_x += w as u16;
            }
            col += w;
        }
        screen_x
    }

    pub fn swap_buffers(&mut self) {
        std::mem::swap(&mut self.front_buffer, &mut self.back_buffer);
        self.needs_full_redraw = false;
    }
}

fn pen_cell(ch: char, pen: Pen) -> Cell {
    let mut cell = Cell::new(ch, pen.fg, pen.bg);
    cell.bold = pen.bold;
    cell
}

/// Whether the terminal advertises 24-bit color
pub fn detect_truecolor<F>(get_env: F) -> bool
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    if let Ok(colorterm) = get_env("COLORTERM") {
        if colorterm.contains("truecolor") || colorterm.contains("24bit") {
            return true;
        }
    }
    if let Ok(term) = get_env("TERM") {
        if term.contains("24bit") || term.contains("truecolor") || term.starts_with("xterm-kitty") {
            return true;
        }
    }
    get_env("TERM_PROGRAM").is_ok_and(|tp| {
        tp == "iTerm.app" || tp == "WezTerm" || tp == "vscode"
    })
}
