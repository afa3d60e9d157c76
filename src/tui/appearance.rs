//! # Appearance
//!
//! Theme, font and debug-grid state for the terminal. This is where the
//! action bar's [`Command`](crate::core::action::Command)s land: the core
//! hands over a class name and this module decides what it looks like.
//!
//! A terminal cannot switch fonts, so the font class only changes the name
//! shown in the status line.

use log::info;
use ratatui::style::Color;

use crate::core::action::Effects;

/// Colours for one theme class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub accent: Color,
    pub muted: Color,
}

impl Palette {
    pub fn for_theme(class: &str) -> Palette {
        let (background, foreground, accent, muted) = match class {
            "" => (Color::White, Color::Black, Color::DarkGray, Color::Gray),
            "theme-orange" => (
                Color::Rgb(24, 12, 0),
                Color::Rgb(255, 226, 196),
                Color::Rgb(255, 140, 0),
                Color::Rgb(128, 80, 40),
            ),
            "theme-dark" => (
                Color::Rgb(8, 8, 24),
                Color::Gray,
                Color::LightBlue,
                Color::Rgb(60, 60, 90),
            ),
            "theme-black-red" => (Color::Black, Color::White, Color::Red, Color::DarkGray),
            "theme-black-teal" => (Color::Black, Color::White, Color::Cyan, Color::DarkGray),
            "theme-blue" => (Color::Blue, Color::White, Color::LightCyan, Color::LightBlue),
            "theme-green" => (
                Color::Rgb(0, 32, 0),
                Color::LightGreen,
                Color::Green,
                Color::Rgb(0, 96, 0),
            ),
            "theme-black-green" => (Color::Black, Color::Green, Color::LightGreen, Color::DarkGray),
            // theme-black-pink, and anything unknown
            _ => (Color::Black, Color::White, Color::LightMagenta, Color::DarkGray),
        };
        Palette {
            background,
            foreground,
            accent,
            muted,
        }
    }
}

/// Display name for a font class.
pub fn font_name(class: &str) -> &str {
    match class {
        "" => "Departure Mono",
        "font-use-geist-mono" => "Geist Mono",
        "font-use-server-mono" => "Server Mono",
        "font-use-berkeley-mono" => "TX-02 Berkeley Mono",
        other => other,
    }
}

/// Current look of the UI, mutated by action-bar commands.
#[derive(Debug, Clone, PartialEq)]
pub struct Appearance {
    pub theme: String,
    pub font: String,
    pub show_grid: bool,
    pub should_quit: bool,
}

impl Appearance {
    pub fn new(theme: impl Into<String>, font: impl Into<String>, show_grid: bool) -> Self {
        Self {
            theme: theme.into(),
            font: font.into(),
            show_grid,
            should_quit: false,
        }
    }

    pub fn palette(&self) -> Palette {
        Palette::for_theme(&self.theme)
    }

    pub fn font_name(&self) -> &str {
        font_name(&self.font)
    }
}

impl Effects for Appearance {
    fn set_theme(&mut self, class: &str) {
        info!("Theme -> '{}'", class);
        self.theme = class.to_string();
    }

    fn set_font(&mut self, class: &str) {
        info!("Font -> '{}'", class);
        self.font = class.to_string();
    }

    fn toggle_grid(&mut self) {
        self.show_grid = !self.show_grid;
        info!("Grid {}", if self.show_grid { "on" } else { "off" });
    }

    fn quit(&mut self) {
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::Command;

    #[test]
    fn test_commands_update_appearance() {
        let mut look = Appearance::new("theme-black-pink", "", false);
        Command::SetTheme("theme-blue".into()).apply(&mut look);
        Command::SetFont("font-use-geist-mono".into()).apply(&mut look);
        Command::ToggleGrid.apply(&mut look);
        assert_eq!(look.theme, "theme-blue");
        assert_eq!(look.font_name(), "Geist Mono");
        assert!(look.show_grid);
        assert!(!look.should_quit);
    }

    #[test]
    fn test_unknown_theme_uses_default_palette() {
        assert_eq!(
            Palette::for_theme("theme-does-not-exist"),
            Palette::for_theme("theme-black-pink")
        );
        assert_ne!(Palette::for_theme(""), Palette::for_theme("theme-black-pink"));
    }

    #[test]
    fn test_font_names() {
        assert_eq!(font_name(""), "Departure Mono");
        assert_eq!(font_name("font-use-berkeley-mono"), "TX-02 Berkeley Mono");
        assert_eq!(font_name("custom"), "custom");
    }
}
