//! # Key Chords
//!
//! A `Chord` is one key plus the modifiers held with it. Chords are written
//! as hotkey strings, the same way they are shown in the action bar:
//!
//! | String        | Chord              |
//! |---------------|--------------------|
//! | `"ArrowDown"` | Down arrow         |
//! | `" "`         | Space              |
//! | `"ctrl+g"`    | Ctrl + G           |
//! | `"⌃+O"`       | Ctrl + O (display) |
//!
//! Parsing is case-insensitive for modifier and named keys. Letter keys are
//! normalised to lowercase so `"ctrl+G"` and `"ctrl+g"` are the same chord.
//! A lone capital letter is the exception: `"Q"` means `shift+q`, matching
//! what the terminal reports for Shift+Q.

use std::fmt;
use std::str::FromStr;

/// Modifier keys held with a chord.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        alt: false,
        shift: false,
        meta: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        alt: false,
        shift: false,
        meta: false,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    F(u8),
}

impl Key {
    fn from_name(name: &str) -> Option<Key> {
        let lower = name.to_ascii_lowercase();
        let key = match lower.as_str() {
            "space" | "spacebar" => Key::Space,
            "enter" | "return" => Key::Enter,
            "escape" | "esc" => Key::Escape,
            "tab" => Key::Tab,
            "backspace" => Key::Backspace,
            "arrowup" | "up" => Key::ArrowUp,
            "arrowdown" | "down" => Key::ArrowDown,
            "arrowleft" | "left" => Key::ArrowLeft,
            "arrowright" | "right" => Key::ArrowRight,
            "home" => Key::Home,
            "end" => Key::End,
            _ => {
                let mut chars = name.chars();
                return match (chars.next(), chars.next()) {
                    (Some(' '), None) => Some(Key::Space),
                    (Some(c), None) => Some(Key::Char(c.to_ascii_lowercase())),
                    _ => lower
                        .strip_prefix('f')
                        .and_then(|n| n.parse::<u8>().ok())
                        .filter(|n| (1..=24).contains(n))
                        .map(Key::F),
                };
            }
        };
        Some(key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{c}"),
            Key::Space => f.write_str("Space"),
            Key::Enter => f.write_str("Enter"),
            Key::Escape => f.write_str("Escape"),
            Key::Tab => f.write_str("Tab"),
            Key::Backspace => f.write_str("Backspace"),
            Key::ArrowUp => f.write_str("ArrowUp"),
            Key::ArrowDown => f.write_str("ArrowDown"),
            Key::ArrowLeft => f.write_str("ArrowLeft"),
            Key::ArrowRight => f.write_str("ArrowRight"),
            Key::Home => f.write_str("Home"),
            Key::End => f.write_str("End"),
            Key::F(n) => write!(f, "F{n}"),
        }
    }
}

/// A key combination bound to an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Chord {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl Chord {
    pub const fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub const fn key(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(Key::Char(c), Modifiers::CTRL)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChordParseError {
    Empty,
    UnknownModifier(String),
    UnknownKey(String),
}

impl fmt::Display for ChordParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChordParseError::Empty => write!(f, "empty key chord"),
            ChordParseError::UnknownModifier(m) => write!(f, "unknown modifier '{m}'"),
            ChordParseError::UnknownKey(k) => write!(f, "unknown key '{k}'"),
        }
    }
}

impl std::error::Error for ChordParseError {}

impl FromStr for Chord {
    type Err = ChordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ChordParseError::Empty);
        }
        // A bare space is the Space key, not whitespace to trim.
        if s == " " {
            return Ok(Chord::key(Key::Space));
        }
        let s = s.trim();
        if s.is_empty() {
            return Err(ChordParseError::Empty);
        }

        // "ctrl++" binds the plus key itself.
        let (mods, key_part) = match s.strip_suffix("++") {
            Some(rest) => (rest, "+"),
            None => match s.rsplit_once('+') {
                Some((mods, key)) => (mods, key),
                None => ("", s),
            },
        };

        let mut modifiers = Modifiers::NONE;
        for part in mods.split('+').filter(|p| !p.is_empty()) {
            match part.trim().to_ascii_lowercase().as_str() {
                "ctrl" | "control" | "⌃" => modifiers.ctrl = true,
                "alt" | "option" | "⌥" => modifiers.alt = true,
                "shift" | "⇧" => modifiers.shift = true,
                "meta" | "cmd" | "super" | "⌘" => modifiers.meta = true,
                other => return Err(ChordParseError::UnknownModifier(other.to_string())),
            }
        }

        let key_name = key_part.trim();
        let key = Key::from_name(key_name)
            .ok_or_else(|| ChordParseError::UnknownKey(key_part.to_string()))?;
        // A bare capital is what Shift types. With other modifiers letters
        // are case-folded, so "⌃+O" stays ctrl+o.
        if modifiers == Modifiers::NONE
            && key_name.chars().count() == 1
            && key_name.chars().all(|c| c.is_ascii_uppercase())
        {
            modifiers.shift = true;
        }
        Ok(Chord { key, modifiers })
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.ctrl {
            f.write_str("ctrl+")?;
        }
        if self.modifiers.alt {
            f.write_str("alt+")?;
        }
        if self.modifiers.shift {
            f.write_str("shift+")?;
        }
        if self.modifiers.meta {
            f.write_str("meta+")?;
        }
        write!(f, "{}", self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_keys() {
        assert_eq!("ArrowDown".parse::<Chord>().unwrap(), Chord::key(Key::ArrowDown));
        assert_eq!("arrowleft".parse::<Chord>().unwrap(), Chord::key(Key::ArrowLeft));
        assert_eq!("Enter".parse::<Chord>().unwrap(), Chord::key(Key::Enter));
        assert_eq!("F5".parse::<Chord>().unwrap(), Chord::key(Key::F(5)));
    }

    #[test]
    fn test_bare_space_is_space_key() {
        assert_eq!(" ".parse::<Chord>().unwrap(), Chord::key(Key::Space));
        assert_eq!("Space".parse::<Chord>().unwrap(), Chord::key(Key::Space));
    }

    #[test]
    fn test_parse_modifiers() {
        assert_eq!("ctrl+g".parse::<Chord>().unwrap(), Chord::ctrl('g'));
        assert_eq!("Ctrl+G".parse::<Chord>().unwrap(), Chord::ctrl('g'));
        assert_eq!("⌃+O".parse::<Chord>().unwrap(), Chord::ctrl('o'));

        let chord: Chord = "ctrl+shift+k".parse().unwrap();
        assert!(chord.modifiers.ctrl && chord.modifiers.shift);
        assert!(!chord.modifiers.alt);
        assert_eq!(chord.key, Key::Char('k'));
    }

    #[test]
    fn test_bare_capital_letter_implies_shift() {
        let chord: Chord = "Q".parse().unwrap();
        assert_eq!(chord.key, Key::Char('q'));
        assert!(chord.modifiers.shift);
        assert_eq!(chord.to_string(), "shift+q");
        assert_eq!("q".parse::<Chord>().unwrap(), Chord::key(Key::Char('q')));
        // Named keys and modified letters are not affected.
        assert_eq!("F5".parse::<Chord>().unwrap(), Chord::key(Key::F(5)));
        assert_eq!("⌃+O".parse::<Chord>().unwrap(), Chord::ctrl('o'));
    }

    #[test]
    fn test_plus_key() {
        let chord: Chord = "ctrl++".parse().unwrap();
        assert_eq!(chord, Chord::new(Key::Char('+'), Modifiers::CTRL));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Chord>(), Err(ChordParseError::Empty));
        assert_eq!("   ".parse::<Chord>(), Err(ChordParseError::Empty));
        assert_eq!(
            "hyper+x".parse::<Chord>(),
            Err(ChordParseError::UnknownModifier("hyper".to_string()))
        );
        assert!(matches!(
            "ctrl+banana".parse::<Chord>(),
            Err(ChordParseError::UnknownKey(_))
        ));
        assert!(matches!("F99".parse::<Chord>(), Err(ChordParseError::UnknownKey(_))));
    }

    #[test]
    fn test_display_is_canonical() {
        assert_eq!(Chord::ctrl('g').to_string(), "ctrl+g");
        assert_eq!(Chord::key(Key::ArrowUp).to_string(), "ArrowUp");
        let parsed: Chord = Chord::ctrl('t').to_string().parse().unwrap();
        assert_eq!(parsed, Chord::ctrl('t'));
    }
}
