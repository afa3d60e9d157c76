//! # Actions
//!
//! Everything a key chord can trigger becomes an `Action`.
//! Arrow keys? `Action::FocusNext` / `Action::FocusPrevious`.
//! Enter or Space? `Action::Activate`.
//! `ctrl+t`? `Action::OpenMenu(1)`.
//!
//! Menu entries carry a [`Command`]: the opaque side effect to run when the
//! entry is activated. Commands are applied through the [`Effects`] trait so
//! the core never knows what a theme or a font actually is.
//!
//! ```text
//! Chord  →  Keymap  →  Action  →  Dispatcher  →  FocusHost / Effects
//! ```

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

/// What a bound chord asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Move focus forward in document order.
    FocusNext,
    /// Move focus backward in document order.
    FocusPrevious,
    /// Activate (click) the focused element.
    Activate,
    /// Close whatever menu is open.
    Dismiss,
    /// Toggle the menu of the action-bar entry at this index.
    OpenMenu(usize),
    /// Run a command directly, without a focus target.
    Run(Command),
}

impl Action {
    /// Actions that act on the event target and need it to be focusable.
    pub fn needs_target(&self) -> bool {
        matches!(self, Action::FocusNext | Action::FocusPrevious | Action::Activate)
    }
}

/// Receiver of command side effects.
pub trait Effects {
    fn set_theme(&mut self, class: &str);
    fn set_font(&mut self, class: &str);
    fn toggle_grid(&mut self);
    fn quit(&mut self);
}

/// A caller-supplied side effect with no arguments.
#[derive(Clone)]
pub struct Callback(Rc<dyn Fn()>);

impl Callback {
    pub fn new(f: impl Fn() + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self) {
        (self.0)()
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(..)")
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Side effect attached to an action-bar entry or menu item.
///
/// Commands are fire-and-forget: they are applied once and never retried.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Switch the colour theme. An empty class is the default theme.
    SetTheme(String),
    /// Switch the font. An empty class is the default font.
    SetFont(String),
    ToggleGrid,
    Quit,
    Callback(Callback),
}

impl Command {
    pub fn apply(&self, effects: &mut dyn Effects) {
        match self {
            Command::SetTheme(class) => effects.set_theme(class),
            Command::SetFont(class) => effects.set_font(class),
            Command::ToggleGrid => effects.toggle_grid(),
            Command::Quit => effects.quit(),
            Command::Callback(callback) => callback.call(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandParseError(pub String);

impl fmt::Display for CommandParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown command '{}' (expected theme:<class>, font:<class>, grid or quit)",
            self.0
        )
    }
}

impl std::error::Error for CommandParseError {}

/// Parses the config form: `theme:<class>`, `font:<class>`, `grid`, `quit`.
impl FromStr for Command {
    type Err = CommandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(class) = s.strip_prefix("theme:") {
            return Ok(Command::SetTheme(class.trim().to_string()));
        }
        if let Some(class) = s.strip_prefix("font:") {
            return Ok(Command::SetFont(class.trim().to_string()));
        }
        match s {
            "grid" => Ok(Command::ToggleGrid),
            "quit" => Ok(Command::Quit),
            _ => Err(CommandParseError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    struct Recorder {
        theme: Option<String>,
        font: Option<String>,
        grid_toggles: u32,
        quit: bool,
    }

    impl Effects for Recorder {
        fn set_theme(&mut self, class: &str) {
            self.theme = Some(class.to_string());
        }
        fn set_font(&mut self, class: &str) {
            self.font = Some(class.to_string());
        }
        fn toggle_grid(&mut self) {
            self.grid_toggles += 1;
        }
        fn quit(&mut self) {
            self.quit = true;
        }
    }

    #[test]
    fn test_commands_reach_effects() {
        let mut rec = Recorder::default();
        Command::SetTheme("theme-dark".into()).apply(&mut rec);
        Command::SetFont("font-use-geist-mono".into()).apply(&mut rec);
        Command::ToggleGrid.apply(&mut rec);
        Command::ToggleGrid.apply(&mut rec);
        assert_eq!(rec.theme.as_deref(), Some("theme-dark"));
        assert_eq!(rec.font.as_deref(), Some("font-use-geist-mono"));
        assert_eq!(rec.grid_toggles, 2);
        assert!(!rec.quit);
        Command::Quit.apply(&mut rec);
        assert!(rec.quit);
    }

    #[test]
    fn test_callback_runs_once_per_apply() {
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let command = Command::Callback(Callback::new(move || counter.set(counter.get() + 1)));
        command.apply(&mut Recorder::default());
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "theme:theme-blue".parse::<Command>(),
            Ok(Command::SetTheme("theme-blue".into()))
        );
        assert_eq!("font:".parse::<Command>(), Ok(Command::SetFont(String::new())));
        assert_eq!("grid".parse::<Command>(), Ok(Command::ToggleGrid));
        assert_eq!(" quit ".parse::<Command>(), Ok(Command::Quit));
        assert!("reboot".parse::<Command>().is_err());
    }

    #[test]
    fn test_only_focus_actions_need_a_target() {
        assert!(Action::FocusNext.needs_target());
        assert!(Action::Activate.needs_target());
        assert!(!Action::OpenMenu(0).needs_target());
        assert!(!Action::Run(Command::ToggleGrid).needs_target());
    }
}
