//! Terminal colors, ANSI conversion, and the light/dark palettes.

use crate::core::notify::NotificationKind;
use crate::core::style::Theme;

/// Terminal color - Reset, RGB, or a 16-color ANSI fallback
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Color {
    Reset,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightWhite,
    Rgb { r: u8, g: u8, b: u8 },
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb { r, g, b }
    }

    /// ANSI SGR parameters for this color as foreground
    pub fn to_ansi_fg_code(self) -> String {
        match self {
            Color::Reset => "39".to_string(),
            Color::Black => "30".to_string(),
            Color::Red => "31".to_string(),
            Color::Green => "32".to_string(),
            Color::Yellow => "33".to_string(),
            Color::Blue => "34".to_string(),
            Color::Magenta => "35".to_string(),
            Color::Cyan => "36".to_string(),
            Color::White => "37".to_string(),
            Color::BrightBlack => "90".to_string(),
            Color::BrightWhite => "97".to_string(),
            Color::Rgb { r, g, b } => format!("38;2;{};{};{}", r, g, b),
        }
    }

    /// ANSI SGR parameters for this color as background
    pub fn to_ansi_bg_code(self) -> String {
        match self {
            Color::Reset => "49".to_string(),
            Color::Black => "40".to_string(),
            Color::Red => "41".to_string(),
            Color::Green => "42".to_string(),
            Color::Yellow => "43".to_string(),
            Color::Blue => "44".to_string(),
            Color::Magenta => "45".to_string(),
            Color::Cyan => "46".to_string(),
            Color::White => "47".to_string(),
            Color::BrightBlack => "100".to_string(),
            Color::BrightWhite => "107".to_string(),
            Color::Rgb { r, g, b } => format!("48;2;{};{};{}", r, g, b),
        }
    }

    /// Nearest basic color, for terminals without truecolor
    pub fn to_ansi_fallback(self) -> Self {
        match self {
            Color::Rgb { r, g, b } => {
                let luminance = (r as u32 + g as u32 + b as u32) / 3;
                let threshold = 85;
                match (r > threshold, g > threshold, b > threshold) {
                    (false, false, false) if luminance > 40 => Color::BrightBlack,
                    (false, false, false) => Color::Black,
                    (true, false, false) => Color::Red,
                    (false, true, false) => Color::Green,
                    (true, true, false) => Color::Yellow,
                    (false, false, true) => Color::Blue,
                    (true, false, true) => Color::Magenta,
                    (false, true, true) => Color::Cyan,
                    (true, true, true) if luminance > 200 => Color::BrightWhite,
                    (true, true, true) => Color::White,
                }
            }
            other => other,
        }
    }
}

/// Colors for one theme
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    /// Headings and list markers in the preview
    pub accent: Color,
    pub muted: Color,
    pub status_fg: Color,
    pub status_bg: Color,
    pub success: Color,
    pub error: Color,
    pub info: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Palette {
                fg: Color::rgb(0x2b, 0x2b, 0x2b),
                bg: Color::rgb(0xfa, 0xf8, 0xf3),
                accent: Color::rgb(0x8a, 0x4b, 0x2d),
                muted: Color::rgb(0x8c, 0x86, 0x7a),
                status_fg: Color::rgb(0x2b, 0x2b, 0x2b),
                status_bg: Color::rgb(0xe8, 0xe3, 0xd8),
                success: Color::rgb(0x2e, 0x7d, 0x32),
                error: Color::rgb(0xc6, 0x28, 0x28),
                info: Color::rgb(0x15, 0x65, 0xc0),
            },
            Theme::Dark => Palette {
                fg: Color::rgb(0xe6, 0xe1, 0xd6),
                bg: Color::rgb(0x1c, 0x1c, 0x1e),
                accent: Color::rgb(0xe0, 0xa4, 0x6c),
                muted: Color::rgb(0x7a, 0x76, 0x70),
                status_fg: Color::rgb(0xe6, 0xe1, 0xd6),
                status_bg: Color::rgb(0x2c, 0x2c, 0x30),
                success: Color::rgb(0x81, 0xc7, 0x84),
                error: Color::rgb(0xef, 0x9a, 0x9a),
                info: Color::rgb(0x90, 0xca, 0xf9),
            },
        }
    }

    pub fn notification(&self, kind: NotificationKind) -> Color {
        match kind {
            NotificationKind::Success => self.success,
            NotificationKind::Error => self.error,
            NotificationKind::Info => self.info,
        }
    }
}
