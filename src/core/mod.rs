//! # Core Focus Logic
//!
//! This module contains keynav's focus model and key routing.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Document (tree)      │
//!                    │  • focus traversal      │
//!                    │  • Keymap + Dispatcher  │
//!                    │                         │
//!                    │  No terminal, no UI.    │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │   Other    │      │   Tests    │
//!     │  Adapter   │      │   hosts    │      │            │
//!     │ (ratatui)  │      │ (TreeView) │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`tree`]: `Document` arena and the `TreeView` trait
//! - [`focus`]: next/previous focus traversal
//! - [`chord`]: key chords and their string form
//! - [`action`]: `Action` and `Command`, what chords trigger
//! - [`keymap`]: chord table with scoped subscriptions
//! - [`dispatch`]: routes a key press to traversal or activation
//! - [`action_bar`]: the Font / Theme / Grid bar and its menus
//! - [`config`]: `~/.keynav/config.toml` loading and resolution

pub mod action;
pub mod action_bar;
pub mod chord;
pub mod config;
pub mod dispatch;
pub mod focus;
pub mod keymap;
pub mod tree;
