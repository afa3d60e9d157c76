//! # ActionBar Component
//!
//! Renders the row of action-bar buttons and, when one is open, its
//! dropdown menu.
//!
//! ```text
//!  ⌃+O Font   ⌃+T Theme   ⌃+G Grid
//! ┌──────────────────────────────────┐
//! │ ⊹ Departure Mono [MIT] [DEFAULT] │   ← focused entry highlighted
//! │ ⊹ Geist Mono [OFL]               │
//! └──────────────────────────────────┘
//! ```
//!
//! Stateless: the focused node and the open menu come from the core
//! [`ActionBar`]. The view only maps them to styles.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::action_bar::ActionBar;
use crate::core::tree::TreeView;
use crate::tui::appearance::Palette;
use crate::tui::component::Component;

const GAP: u16 = 1;

pub struct ActionBarView<'a> {
    pub bar: &'a ActionBar,
    pub palette: Palette,
}

impl<'a> ActionBarView<'a> {
    pub fn new(bar: &'a ActionBar, palette: Palette) -> Self {
        Self { bar, palette }
    }

    fn button_text(&self, index: usize) -> String {
        let item = &self.bar.items()[index];
        if item.selected {
            format!(" {} {} ● ", item.hotkey, item.body)
        } else {
            format!(" {} {} ", item.hotkey, item.body)
        }
    }

    /// Column offset and width of each button, relative to the bar's left edge.
    pub fn button_columns(&self) -> Vec<(u16, u16)> {
        let mut x = 0u16;
        (0..self.bar.items().len())
            .map(|i| {
                let width = self.button_text(i).width() as u16;
                let column = (x, width);
                x = x.saturating_add(width + GAP);
                column
            })
            .collect()
    }

    fn button_style(&self, index: usize) -> Style {
        let p = self.palette;
        let node = self.bar.button(index);
        let base = Style::default().bg(p.background).fg(p.foreground);
        match node {
            Some(id) if self.bar.focused() == Some(id) => base
                .bg(p.accent)
                .fg(p.background)
                .add_modifier(Modifier::BOLD),
            Some(id) if !self.bar.document().is_focusable(id) => base.fg(p.muted),
            _ if self.bar.open_menu() == Some(index) => base.fg(p.accent),
            _ => base,
        }
    }

    fn render_menu(&self, frame: &mut Frame, area: Rect, index: usize, column: u16) {
        let item = &self.bar.items()[index];
        let p = self.palette;

        let lines: Vec<Line> = item
            .items
            .iter()
            .zip(self.bar.entries(index))
            .map(|(entry, &node)| {
                let text = format!("{} {}", entry.icon, entry.label);
                let style = if self.bar.focused() == Some(node) {
                    Style::default()
                        .bg(p.accent)
                        .fg(p.background)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(p.foreground)
                };
                Line::from(Span::styled(text, style))
            })
            .collect();

        let content_width = lines.iter().map(|l| l.width()).max().unwrap_or(0) as u16;
        let x = area.x.saturating_add(column);
        let y = area.y.saturating_add(1);
        let max_width = area.right().saturating_sub(x);
        let max_height = area.bottom().saturating_sub(y);
        let menu_area = Rect::new(
            x,
            y,
            (content_width + 2).min(max_width),
            (lines.len() as u16 + 2).min(max_height),
        );
        if menu_area.width < 3 || menu_area.height < 3 {
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(p.accent))
            .style(Style::default().bg(p.background));
        frame.render_widget(Clear, menu_area);
        frame.render_widget(Paragraph::new(lines).block(block), menu_area);
    }
}

impl Component for ActionBarView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if area.height == 0 {
            return;
        }
        let columns = self.button_columns();
        let spans: Vec<Span> = columns
            .iter()
            .enumerate()
            .flat_map(|(i, _)| {
                [
                    Span::styled(self.button_text(i), self.button_style(i)),
                    Span::raw(" ".repeat(GAP as usize)),
                ]
            })
            .collect();
        let row = Rect::new(area.x, area.y, area.width, 1);
        frame.render_widget(
            Paragraph::new(Line::from(spans))
                .style(Style::default().bg(self.palette.background)),
            row,
        );

        if let Some(open) = self.bar.open_menu()
            && let Some(&(column, _)) = columns.get(open)
        {
            self.render_menu(frame, area, open, column);
        }
    }
}
