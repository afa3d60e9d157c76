use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};

use crate::core::action_bar::ActionBar;
use crate::tui::appearance::Appearance;
use crate::tui::component::Component;
use crate::tui::components::{ActionBarView, GridOverlay, StatusLine};

const HELP: [&str; 5] = [
    "←/↑  previous      →/↓  next",
    "Enter / Space       activate",
    "Esc                 close menu",
    "⌃O font  ⌃T theme  ⌃G grid",
    "q / ⌃C              quit",
];

pub fn draw_ui(frame: &mut Frame, bar: &ActionBar, look: &Appearance) {
    use Constraint::{Length, Min};
    let palette = look.palette();
    let layout = Layout::vertical([Min(1), Length(1)]);
    let [main_area, status_area] = layout.areas(frame.area());

    frame.render_widget(
        Block::default().style(Style::default().bg(palette.background).fg(palette.foreground)),
        main_area,
    );

    let body = Rect {
        y: main_area.y.saturating_add(2),
        height: main_area.height.saturating_sub(2),
        ..main_area
    };
    let help: Vec<Line> = HELP.iter().map(|l| Line::from(*l)).collect();
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(palette.muted)),
        body,
    );

    if look.show_grid {
        GridOverlay { palette }.render(frame, body);
    }

    // The menu dropdown overlaps the body, so the bar renders last.
    ActionBarView::new(bar, palette).render(frame, main_area);

    StatusLine::new(
        look.theme.clone(),
        look.font_name().to_string(),
        bar.focused_label().map(str::to_string),
        palette,
    )
    .render(frame, status_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action_bar::default_action_bar;
    use crate::core::keymap::Keymap;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_draw_ui_composes_bar_help_and_status() {
        let keymap = Keymap::new();
        let bar = ActionBar::mount(default_action_bar(Vec::new()), &keymap);
        let look = Appearance::new("theme-black-pink", "", true);
        let mut terminal = Terminal::new(TestBackend::new(70, 12)).unwrap();
        terminal.draw(|f| draw_ui(f, &bar, &look)).unwrap();

        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("⌃+O Font"));
        assert!(text.contains("activate"));
        assert!(text.contains("focus: Font"));
        assert!(text.contains("·"));
    }
}
