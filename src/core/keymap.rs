//! # Keymap
//!
//! The chord table: which [`Action`] each [`Chord`] triggers.
//!
//! Bindings are registered per scope. `subscribe` returns a
//! [`Subscription`] guard and dropping the guard removes the scope again,
//! so a view registers its chords when it mounts and releases them when it
//! goes away:
//!
//! ```rust,ignore
//! let keymap = Keymap::new();
//! {
//!     let _nav = keymap.subscribe("navigation", [(Chord::key(Key::ArrowDown), Action::FocusNext)]);
//!     assert!(keymap.lookup(&Chord::key(Key::ArrowDown)).is_some());
//! }
//! assert!(keymap.lookup(&Chord::key(Key::ArrowDown)).is_none());
//! ```
//!
//! When two live scopes bind the same chord, the most recently mounted one
//! wins. Everything is single-threaded, hence `Rc<RefCell<_>>`.

use log::debug;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::core::action::Action;
use crate::core::chord::Chord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeId(u64);

#[derive(Debug)]
struct Scope {
    id: ScopeId,
    name: String,
    bindings: Vec<(Chord, Action)>,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    /// Mount order, oldest first.
    scopes: Vec<Scope>,
}

/// Shared chord table. Cloning yields another handle to the same table.
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    inner: Rc<RefCell<Inner>>,
}

impl Keymap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scope of bindings. They stay active until the returned
    /// guard is dropped.
    #[must_use = "dropping the subscription immediately unregisters its bindings"]
    pub fn subscribe(
        &self,
        name: impl Into<String>,
        bindings: impl IntoIterator<Item = (Chord, Action)>,
    ) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = ScopeId(inner.next_id);
        inner.next_id += 1;
        let scope = Scope {
            id,
            name: name.into(),
            bindings: bindings.into_iter().collect(),
        };
        debug!(
            "Keymap: mounted scope '{}' with {} bindings",
            scope.name,
            scope.bindings.len()
        );
        inner.scopes.push(scope);
        Subscription {
            keymap: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// The action bound to `chord`, newest scope first.
    pub fn lookup(&self, chord: &Chord) -> Option<Action> {
        let inner = self.inner.borrow();
        inner.scopes.iter().rev().find_map(|scope| {
            scope
                .bindings
                .iter()
                .find(|(bound, _)| bound == chord)
                .map(|(_, action)| action.clone())
        })
    }

    /// Number of mounted scopes.
    pub fn scope_count(&self) -> usize {
        self.inner.borrow().scopes.len()
    }

    /// Effective bindings (shadowed entries removed), oldest scope first.
    pub fn bindings(&self) -> Vec<(Chord, Action)> {
        let inner = self.inner.borrow();
        let mut effective: Vec<(Chord, Action)> = Vec::new();
        for scope in inner.scopes.iter().rev() {
            for (chord, action) in &scope.bindings {
                if !effective.iter().any(|(c, _)| c == chord) {
                    effective.push((*chord, action.clone()));
                }
            }
        }
        effective.reverse();
        effective
    }

    fn unsubscribe(inner: &RefCell<Inner>, id: ScopeId) {
        let mut inner = inner.borrow_mut();
        if let Some(pos) = inner.scopes.iter().position(|s| s.id == id) {
            let scope = inner.scopes.remove(pos);
            debug!("Keymap: unmounted scope '{}'", scope.name);
        }
    }
}

/// Guard for a mounted scope of bindings.
#[derive(Debug)]
pub struct Subscription {
    keymap: Weak<RefCell<Inner>>,
    id: ScopeId,
}

impl Subscription {
    pub fn id(&self) -> ScopeId {
        self.id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        // The keymap may already be gone; nothing left to clean up then.
        if let Some(inner) = self.keymap.upgrade() {
            Keymap::unsubscribe(&inner, self.id);
        }
    }
}
