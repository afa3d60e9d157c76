use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, warn};

use crate::core::chord::{Chord, Key, Modifiers};

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    /// A key press, as a chord for the keymap.
    Key(Chord),
    /// Ctrl+C, always quits.
    ForceQuit,
    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`.
///
/// Terminal read errors are logged and treated as "no event".
pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            warn!("Failed to poll terminal events: {}", e);
            return None;
        }
    }
    match event::read() {
        Ok(Event::Key(key_event)) => translate_key(key_event),
        Ok(Event::Resize(_, _)) => Some(TuiEvent::Resize),
        Ok(_) => None,
        Err(e) => {
            warn!("Failed to read terminal event: {}", e);
            None
        }
    }
}

fn translate_key(key_event: KeyEvent) -> Option<TuiEvent> {
    // Enhanced keyboard protocols also report releases and repeats.
    if key_event.kind == KeyEventKind::Release {
        return None;
    }
    debug!(
        "Key event: {:?} with modifiers {:?}",
        key_event.code, key_event.modifiers
    );
    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(TuiEvent::ForceQuit);
    }
    chord_from_key(key_event).map(TuiEvent::Key)
}

/// Convert a crossterm key event into a [`Chord`].
///
/// Letters are lowercased; Shift stays in the modifiers so `A` becomes
/// `shift+a`.
pub fn chord_from_key(key_event: KeyEvent) -> Option<Chord> {
    let key = match key_event.code {
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Char(c) => Key::Char(c.to_ascii_lowercase()),
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Tab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Up => Key::ArrowUp,
        KeyCode::Down => Key::ArrowDown,
        KeyCode::Left => Key::ArrowLeft,
        KeyCode::Right => Key::ArrowRight,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::F(n) => Key::F(n),
        _ => return None,
    };
    let m = key_event.modifiers;
    let modifiers = Modifiers {
        ctrl: m.contains(KeyModifiers::CONTROL),
        alt: m.contains(KeyModifiers::ALT),
        shift: m.contains(KeyModifiers::SHIFT),
        meta: m.contains(KeyModifiers::SUPER) || m.contains(KeyModifiers::META),
    };
    Some(Chord::new(key, modifiers))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_arrows_and_activation_keys() {
        let down = chord_from_key(press(KeyCode::Down, KeyModifiers::NONE));
        assert_eq!(down, Some(Chord::key(Key::ArrowDown)));
        let space = chord_from_key(press(KeyCode::Char(' '), KeyModifiers::NONE));
        assert_eq!(space, Some(Chord::key(Key::Space)));
        let enter = chord_from_key(press(KeyCode::Enter, KeyModifiers::NONE));
        assert_eq!(enter, Some(Chord::key(Key::Enter)));
    }

    #[test]
    fn test_ctrl_letter_matches_parsed_hotkey() {
        let chord = chord_from_key(press(KeyCode::Char('g'), KeyModifiers::CONTROL));
        assert_eq!(chord, Some("ctrl+g".parse().unwrap()));
    }

    #[test]
    fn test_uppercase_letter_keeps_shift() {
        let chord = chord_from_key(press(KeyCode::Char('A'), KeyModifiers::SHIFT)).unwrap();
        assert_eq!(chord.key, Key::Char('a'));
        assert!(chord.modifiers.shift);
    }

    #[test]
    fn test_ctrl_c_is_force_quit() {
        let event = translate_key(press(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(event, Some(TuiEvent::ForceQuit));
    }

    #[test]
    fn test_release_is_dropped() {
        let mut release = press(KeyCode::Down, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(translate_key(release), None);
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(chord_from_key(press(KeyCode::Insert, KeyModifiers::NONE)), None);
    }
}
