//! # Focus Tree
//!
//! An arena-backed element tree plus the read-only [`TreeView`] trait the
//! traversal code in [`crate::core::focus`] is written against.
//!
//! ```text
//! Document
//! ├── nodes: Vec<Element>      // indexed by NodeId
//! └── root: NodeId             // always index 0, never focusable
//!
//! Element
//! ├── role: Role               // interactive or structural
//! ├── label: String
//! ├── parent: Option<NodeId>
//! ├── children: Vec<NodeId>    // document order
//! ├── disabled / hidden: bool
//! └── tab_index: Option<i32>
//! ```
//!
//! The document owner (the TUI host) builds and mutates the tree. The
//! traversal only reads it.

use std::fmt;

/// Read-only view over a tree of elements.
///
/// Sibling links have default implementations derived from the parent's
/// child order, so an implementor only needs `parent`, `children` and
/// `is_focusable`.
pub trait TreeView {
    type Id: Copy + Eq + fmt::Debug;

    fn parent(&self, node: Self::Id) -> Option<Self::Id>;

    fn children(&self, node: Self::Id) -> &[Self::Id];

    /// Whether the node may receive input focus right now.
    ///
    /// Must return `false` (never panic) for unknown or detached nodes.
    fn is_focusable(&self, node: Self::Id) -> bool;

    fn next_sibling(&self, node: Self::Id) -> Option<Self::Id> {
        let siblings = self.children(self.parent(node)?);
        let index = siblings.iter().position(|&id| id == node)?;
        siblings.get(index + 1).copied()
    }

    fn previous_sibling(&self, node: Self::Id) -> Option<Self::Id> {
        let siblings = self.children(self.parent(node)?);
        let index = siblings.iter().position(|&id| id == node)?;
        index.checked_sub(1).map(|i| siblings[i])
    }
}

/// Handle into a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What kind of element a node is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Root,
    /// Structural grouping with no input behaviour of its own.
    Group,
    Text,
    Button,
    MenuItem,
    Link,
    Input,
}

impl Role {
    /// Roles that take focus without an explicit tab index.
    pub fn is_interactive(self) -> bool {
        matches!(self, Role::Button | Role::MenuItem | Role::Link | Role::Input)
    }
}

#[derive(Debug, Clone)]
pub struct Element {
    pub role: Role,
    pub label: String,
    pub disabled: bool,
    pub hidden: bool,
    pub tab_index: Option<i32>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    pub fn new(role: Role, label: impl Into<String>) -> Self {
        Self {
            role,
            label: label.into(),
            disabled: false,
            hidden: false,
            tab_index: None,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn tab_index(mut self, tab_index: i32) -> Self {
        self.tab_index = Some(tab_index);
        self
    }

    /// Tab reachability from role and tab index alone.
    fn is_tab_reachable(&self) -> bool {
        match self.tab_index {
            Some(index) => index >= 0,
            None => self.role.is_interactive(),
        }
    }
}

/// Arena of elements rooted at a single [`Role::Root`] node.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Element>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Element::new(Role::Root, "root")],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn get(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node.0)
    }

    pub fn get_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(node.0)
    }

    /// Label of a node, or an empty string for unknown handles.
    pub fn label(&self, node: NodeId) -> &str {
        self.get(node).map(|e| e.label.as_str()).unwrap_or("")
    }

    /// Append `element` as the last child of `parent`.
    ///
    /// An unknown parent leaves the new node detached.
    pub fn append(&mut self, parent: NodeId, element: Element) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(element);
        if let Some(p) = self.nodes.get_mut(parent.0) {
            p.children.push(id);
            self.nodes[id.0].parent = Some(parent);
        }
        id
    }

    /// Remove `node` (and with it its subtree) from its parent.
    ///
    /// The arena slot stays allocated; the node simply becomes unreachable
    /// from the root and therefore unfocusable.
    pub fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.get(node).and_then(|e| e.parent) else {
            return;
        };
        if let Some(p) = self.nodes.get_mut(parent.0) {
            p.children.retain(|&c| c != node);
        }
        self.nodes[node.0].parent = None;
    }

    pub fn set_hidden(&mut self, node: NodeId, hidden: bool) {
        if let Some(e) = self.get_mut(node) {
            e.hidden = hidden;
        }
    }

    pub fn set_disabled(&mut self, node: NodeId, disabled: bool) {
        if let Some(e) = self.get_mut(node) {
            e.disabled = disabled;
        }
    }

    /// True when walking parents from `node` reaches the root.
    pub fn is_connected(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        // A chain longer than the arena means a corrupted parent link.
        for _ in 0..=self.nodes.len() {
            match current {
                Some(id) if id == self.root() => return true,
                Some(id) => current = self.get(id).and_then(|e| e.parent),
                None => return false,
            }
        }
        false
    }

    /// False when `node` or one of its ancestors is hidden.
    fn is_rendered(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            match self.get(id) {
                Some(e) if e.hidden => return false,
                Some(e) => current = e.parent,
                None => return false,
            }
        }
        true
    }

    /// All nodes in document (pre-order) order, root first.
    pub fn document_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.children(id).iter().rev());
        }
        order
    }

    /// Focusable nodes in document order.
    pub fn focus_stops(&self) -> Vec<NodeId> {
        self.document_order()
            .into_iter()
            .filter(|&id| self.is_focusable(id))
            .collect()
    }

    /// Indented dump of the tree in document order. Focusable nodes are
    /// marked with `*`, hidden ones with `(hidden)`.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![(self.root(), 0usize)];
        while let Some((id, depth)) = stack.pop() {
            let Some(element) = self.get(id) else {
                continue;
            };
            let marker = if self.is_focusable(id) { '*' } else { ' ' };
            out.push_str(&format!(
                "{marker} {}{:?} \"{}\"",
                "  ".repeat(depth),
                element.role,
                element.label
            ));
            if element.hidden {
                out.push_str(" (hidden)");
            }
            out.push('\n');
            stack.extend(self.children(id).iter().rev().map(|&c| (c, depth + 1)));
        }
        out
    }
}

impl TreeView for Document {
    type Id = NodeId;

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node)?.parent
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        self.get(node).map(|e| e.children.as_slice()).unwrap_or(&[])
    }

    fn is_focusable(&self, node: NodeId) -> bool {
        let Some(element) = self.get(node) else {
            return false;
        };
        element.role != Role::Root
            && !element.disabled
            && element.is_tab_reachable()
            && self.is_connected(node)
            && self.is_rendered(node)
    }
}
