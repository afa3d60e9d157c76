//! # StatusLine Component
//!
//! Bottom line showing the current theme, font and focused element.
//!
//! ## Conditional Formatting
//!
//! 1. **Focus**: `"keynav | theme: theme-dark | font: Geist Mono | focus: Theme"`
//! 2. **No focus**: `"keynav | theme: theme-dark | font: Geist Mono"`
//!
//! The default theme class is the empty string, shown as `default`.

use crate::tui::appearance::Palette;
use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;

/// Props-only status line.
pub struct StatusLine {
    pub theme: String,
    pub font_name: String,
    pub focused: Option<String>,
    pub palette: Palette,
}

impl StatusLine {
    pub fn new(
        theme: String,
        font_name: String,
        focused: Option<String>,
        palette: Palette,
    ) -> Self {
        Self {
            theme,
            font_name,
            focused,
            palette,
        }
    }

    fn text(&self) -> String {
        let theme = if self.theme.is_empty() {
            "default"
        } else {
            &self.theme
        };
        match &self.focused {
            Some(label) => format!(
                "keynav | theme: {} | font: {} | focus: {}",
                theme, self.font_name, label
            ),
            None => format!("keynav | theme: {} | font: {}", theme, self.font_name),
        }
    }
}

impl Component for StatusLine {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = Style::default()
            .bg(self.palette.muted)
            .fg(self.palette.foreground);
        let line = format!("{:<width$}", self.text(), width = area.width as usize);
        frame.render_widget(Span::styled(line, style), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(mut status: StatusLine) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                status.render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_status_with_focus() {
        let text = rendered(StatusLine::new(
            "theme-dark".to_string(),
            "Geist Mono".to_string(),
            Some("Theme".to_string()),
            Palette::for_theme("theme-dark"),
        ));
        assert!(text.contains("theme: theme-dark"));
        assert!(text.contains("font: Geist Mono"));
        assert!(text.contains("focus: Theme"));
    }

    #[test]
    fn test_status_without_focus_and_default_theme() {
        let text = rendered(StatusLine::new(
            String::new(),
            "Departure Mono".to_string(),
            None,
            Palette::for_theme(""),
        ));
        assert!(text.contains("theme: default"));
        assert!(!text.contains("focus:"));
    }
}
