use nu_ansi_term::{Color, Style};
use tracing::warn;

use crate::config::ColorSection;

pub mod catppuccin {
    use nu_ansi_term::Color;
    pub struct Mocha;
    impl Mocha {
        pub const SURFACE2: Color = Color::Rgb(108, 112, 134); // Subtle dim

        // Accents
        pub const RED: Color = Color::Rgb(243, 139, 168);
        pub const GREEN: Color = Color::Rgb(166, 227, 161);
        pub const YELLOW: Color = Color::Rgb(249, 226, 175);
        pub const MAUVE: Color = Color::Rgb(203, 166, 247);
        pub const PEACH: Color = Color::Rgb(250, 179, 135);
        pub const TEAL: Color = Color::Rgb(148, 226, 213);
        pub const SKY: Color = Color::Rgb(137, 220, 235);
    }
}

/// Highlight styles for each instruction class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub increment: Style,
    pub decrement: Style,
    pub right: Style,
    pub left: Style,
    pub output: Style,
    pub input: Style,
    pub block: Style,
    pub comment: Style,
}

impl Default for Palette {
    fn default() -> Self {
        use catppuccin::Mocha as P;

        // > <   => SKY/TEAL (movement)
        // + -   => GREEN/RED (data modification)
        // . ,   => YELLOW/PEACH (I/O)
        // [ ]   => MAUVE (flow control)
        Self {
            increment: Style::new().fg(P::GREEN).bold(),
            decrement: Style::new().fg(P::RED).bold(),
            right: Style::new().fg(P::SKY).bold(),
            left: Style::new().fg(P::TEAL).bold(),
            output: Style::new().fg(P::YELLOW).bold(),
            input: Style::new().fg(P::PEACH).bold(),
            block: Style::new().fg(P::MAUVE).bold(),
            comment: Style::new().fg(P::SURFACE2),
        }
    }
}

impl Palette {
    /// Default palette with any configured colors applied.
    ///
    /// Colors that fail to parse are logged and skipped.
    pub fn from_config(colors: &ColorSection) -> Self {
        let mut palette = Self::default();

        macro_rules! set {
            ($field:ident) => {
                if let Some(raw) = colors.$field.as_deref() {
                    match parse_color(raw) {
                        Some(color) => palette.$field = palette.$field.fg(color),
                        None => {
                            warn!(key = stringify!($field), value = raw, "ignoring unknown color")
                        }
                    }
                }
            };
        }

        set!(increment);
        set!(decrement);
        set!(right);
        set!(left);
        set!(output);
        set!(input);
        set!(block);
        set!(comment);

        palette
    }

    #[inline]
    pub fn style_for(&self, ch: char) -> Style {
        match ch {
            '+' => self.increment,
            '-' => self.decrement,
            '>' => self.right,
            '<' => self.left,
            '.' => self.output,
            ',' => self.input,
            '[' | ']' => self.block,
            _ => self.comment,
        }
    }
}

/// Parse `"#RRGGBB"` or a color name.
pub fn parse_color(value: &str) -> Option<Color> {
    let s = value.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        return Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?));
    }

    let name = s.to_ascii_lowercase().replace(['_', ' '], "");
    Some(match name.as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" | "purple" => Color::Purple,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "gray" | "grey" | "darkgray" | "darkgrey" => Color::DarkGray,
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "lightyellow" => Color::LightYellow,
        "lightblue" => Color::LightBlue,
        "lightmagenta" | "lightpurple" => Color::LightPurple,
        "lightcyan" => Color::LightCyan,
        _ => return None,
    })
}
