//! keynav library exports for testing

pub mod core;
pub mod tui;

pub use crate::core::focus::{Direction, find_focusable_parent, find_next_focusable};
pub use crate::core::tree::{Document, Element, NodeId, Role, TreeView};
