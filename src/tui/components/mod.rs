//! # TUI Components
//!
//! All UI components for the terminal interface. Every component here is
//! props-based: it borrows what it needs from the core `ActionBar` or the
//! `Appearance` and renders it. None of them handle keys; the dispatcher
//! in `core` does that.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── action_bar.rs    (Buttons row + open dropdown menu)
//! ├── status_line.rs   (Bottom line: theme, font, focus)
//! └── grid.rs          (Debug grid overlay)
//! ```

pub mod action_bar;
pub mod grid;
pub mod status_line;

pub use action_bar::ActionBarView;
pub use grid::GridOverlay;
pub use status_line::StatusLine;
