//! # Grid Overlay
//!
//! Debug grid toggled with `ctrl+g`: a dot at every cell on a fixed
//! spacing, drawn in the muted palette colour over the body area. Only
//! blank cells are touched so text stays readable.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::tui::appearance::Palette;
use crate::tui::component::Component;

pub const GRID_COLUMNS: u16 = 4;
pub const GRID_ROWS: u16 = 2;

pub struct GridOverlay {
    pub palette: Palette,
}

impl Component for GridOverlay {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = Style::default().fg(self.palette.muted);
        let buffer = frame.buffer_mut();
        for y in (area.top()..area.bottom()).step_by(GRID_ROWS as usize) {
            for x in (area.left()..area.right()).step_by(GRID_COLUMNS as usize) {
                if let Some(cell) = buffer.cell_mut((x, y))
                    && cell.symbol() == " "
                {
                    cell.set_symbol("·").set_style(style);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::text::Span;

    #[test]
    fn test_grid_marks_blank_cells_on_spacing() {
        let backend = TestBackend::new(9, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                f.render_widget(Span::raw("ab"), Rect::new(0, 0, 2, 1));
                GridOverlay {
                    palette: Palette::for_theme(""),
                }
                .render(f, f.area());
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        // Text wins over the grid.
        assert_eq!(buffer[(0, 0)].symbol(), "a");
        assert_eq!(buffer[(4, 0)].symbol(), "·");
        assert_eq!(buffer[(8, 2)].symbol(), "·");
        assert_eq!(buffer[(1, 1)].symbol(), " ");
        assert_eq!(buffer[(4, 1)].symbol(), " ");
    }
}
