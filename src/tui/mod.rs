//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the action
//! bar, and turns keyboard events into chords for the core dispatcher.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event loop
//!
//! Single-threaded: each key event is dispatched to completion before the
//! next one is read, so the focus tree never changes under a traversal.
//! The loop redraws only after an event (or a resize) and otherwise
//! sleeps in `poll` for up to 500ms.

pub mod appearance;
mod component;
pub mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::action::{Action, Command};
use crate::core::action_bar::{ActionBar, default_action_bar};
use crate::core::chord::{Chord, Key};
use crate::core::config::ResolvedConfig;
use crate::core::keymap::{Keymap, Subscription};
use crate::tui::appearance::Appearance;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Disambiguated escape codes let ctrl+letter chords arrive intact.
        // Terminals without the protocol ignore the request.
        execute!(
            stdout(),
            Hide,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        info!("Terminal modes enabled (hidden cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), PopKeyboardEnhancementFlags, Show);
    }
}

/// Application-wide chords that are not part of the bar.
fn app_bindings(keymap: &Keymap) -> Subscription {
    keymap.subscribe(
        "app",
        [(Chord::key(Key::Char('q')), Action::Run(Command::Quit))],
    )
}

/// Keep the Grid button's selected marker in step with the grid itself.
fn sync_selection(bar: &mut ActionBar, look: &Appearance) {
    let grid_items: Vec<usize> = bar
        .items()
        .iter()
        .enumerate()
        .filter(|(_, item)| item.command == Some(Command::ToggleGrid))
        .map(|(i, _)| i)
        .collect();
    for i in grid_items {
        bar.set_selected(i, look.show_grid);
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let keymap = Keymap::new();
    let _app_scope = app_bindings(&keymap);
    let mut bar = ActionBar::mount(default_action_bar(config.items), &keymap);
    let mut look = Appearance::new(config.theme, config.font, config.show_grid);
    sync_selection(&mut bar, &look);

    let mut terminal = ratatui::init();
    let terminal_mode_guard = match TerminalModeGuard::new() {
        Ok(guard) => Some(guard),
        Err(e) => {
            warn!("Could not enable terminal modes: {}", e);
            None
        }
    };

    let mut needs_redraw = true;
    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &bar, &look))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(Duration::from_millis(500));
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Drain everything pending before the next draw, one event at a time.
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match event {
                TuiEvent::Resize => {}
                TuiEvent::ForceQuit => look.should_quit = true,
                TuiEvent::Key(chord) => {
                    let outcome = bar.handle_key(chord, &mut look);
                    debug!("{} -> {:?}, focus {:?}", chord, outcome, bar.focused_label());
                    sync_selection(&mut bar, &look);
                }
            }
            if look.should_quit {
                break;
            }
        }

        if look.should_quit {
            break;
        }
    }

    info!("Shutting down (theme '{}', font '{}')", look.theme, look.font);
    drop(terminal_mode_guard);
    ratatui::restore();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_q_quits_through_the_keymap() {
        let keymap = Keymap::new();
        let _app = app_bindings(&keymap);
        let mut bar = ActionBar::mount(default_action_bar(Vec::new()), &keymap);
        let mut look = Appearance::new("", "", false);
        bar.handle_key(Chord::key(Key::Char('q')), &mut look);
        assert!(look.should_quit);
    }

    #[test]
    fn test_grid_selection_follows_appearance() {
        let keymap = Keymap::new();
        let mut bar = ActionBar::mount(default_action_bar(Vec::new()), &keymap);
        let mut look = Appearance::new("", "", false);
        bar.handle_key(Chord::ctrl('g'), &mut look);
        sync_selection(&mut bar, &look);
        assert!(bar.items()[2].selected);
        bar.handle_key(Chord::ctrl('g'), &mut look);
        sync_selection(&mut bar, &look);
        assert!(!bar.items()[2].selected);
    }
}
