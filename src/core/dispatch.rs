//! # Dispatcher
//!
//! Thin adapter between raw key input and the focus traversal. It owns no
//! traversal logic: it looks the chord up in the [`Keymap`], checks the
//! event target, and calls into [`crate::core::focus`] or the
//! [`FocusHost`].
//!
//! ```text
//! KeyInput { chord, target }
//!   ├─ unbound chord                         → Unbound
//!   ├─ focus action, target not focusable    → Ignored (default untouched)
//!   ├─ FocusNext / FocusPrevious             → prevent default, navigate,
//!   │                                          host.focus(found) or stay put
//!   ├─ Activate                              → prevent default, host.click(target)
//!   └─ anything else                         → prevent default, host.perform(action)
//! ```

use log::debug;

use crate::core::action::Action;
use crate::core::chord::Chord;
use crate::core::focus::{Direction, find_next_focusable};
use crate::core::keymap::Keymap;
use crate::core::tree::TreeView;

/// Side effects the dispatcher invokes on the tree owner.
pub trait FocusHost<Id> {
    /// Transfer input focus to `node`.
    fn focus(&mut self, node: Id);
    /// Synthesize an activation of `node`.
    fn click(&mut self, node: Id);
    /// Run an action that is not tied to the event target.
    fn perform(&mut self, action: &Action);
}

/// One key press, as seen by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput<Id> {
    pub chord: Chord,
    /// The element the event was delivered to. `None` when the target is not
    /// an element of the tree.
    pub target: Option<Id>,
    default_prevented: bool,
}

impl<Id> KeyInput<Id> {
    pub fn new(chord: Chord, target: Option<Id>) -> Self {
        Self {
            chord,
            target,
            default_prevented: false,
        }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether a handler claimed the key, so the host should skip its own
    /// default handling.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// What happened to a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched<Id> {
    /// No binding for the chord.
    Unbound,
    /// Bound, but the target could not take the action.
    Ignored,
    /// Focus moved to this node.
    Moved(Id),
    /// Navigation found nothing; focus stays where it was.
    Stayed,
    /// The target was activated.
    Activated(Id),
    /// A target-independent action ran.
    Performed,
}

pub struct Dispatcher {
    keymap: Keymap,
}

impl Dispatcher {
    pub fn new(keymap: Keymap) -> Self {
        Self { keymap }
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    /// Route one key press. Each call handles the event to completion.
    pub fn dispatch<T, H>(
        &self,
        tree: &T,
        host: &mut H,
        input: &mut KeyInput<T::Id>,
    ) -> Dispatched<T::Id>
    where
        T: TreeView,
        H: FocusHost<T::Id>,
    {
        let Some(action) = self.keymap.lookup(&input.chord) else {
            return Dispatched::Unbound;
        };
        debug!("Dispatch: {} -> {:?} (target {:?})", input.chord, action, input.target);

        if !action.needs_target() {
            input.prevent_default();
            host.perform(&action);
            return Dispatched::Performed;
        }

        let Some(target) = input.target.filter(|&t| tree.is_focusable(t)) else {
            return Dispatched::Ignored;
        };
        input.prevent_default();

        let direction = match action {
            Action::FocusNext => Direction::Next,
            Action::FocusPrevious => Direction::Previous,
            _ => {
                host.click(target);
                return Dispatched::Activated(target);
            }
        };

        match find_next_focusable(tree, target, direction) {
            Some(found) => {
                host.focus(found);
                Dispatched::Moved(found)
            }
            None => Dispatched::Stayed,
        }
    }
}
