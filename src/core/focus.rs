//! # Focus Traversal
//!
//! Finds the element that should receive focus after the current one.
//!
//! ```text
//! find_next_focusable(node, dir)
//!   1. sibling chain:  node.sibling(dir), then its sibling, ...
//!        focusable sibling      → return it (shallowest match)
//!        focusable descendant   → return it
//!   2. ancestor chain: parent, grandparent, ... up to the root
//!        run the sibling chain from each ancestor
//!   3. nothing         → None (no wrap-around)
//! ```
//!
//! Everything here is a pure function of the [`TreeView`]. Focusability is
//! re-evaluated on every call because disabled and hidden state can change
//! between key presses.

use log::trace;

use crate::core::tree::TreeView;

/// Traversal direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

impl Direction {
    fn sibling<T: TreeView>(self, tree: &T, node: T::Id) -> Option<T::Id> {
        match self {
            Direction::Next => tree.next_sibling(node),
            Direction::Previous => tree.previous_sibling(node),
        }
    }
}

/// First focusable strict descendant of `node` in `direction` order.
///
/// `Next` walks document order, `Previous` walks reverse document order
/// (the last node of a pre-order walk comes first). `exclude` and its
/// whole subtree are skipped.
pub fn find_focusable_descendant<T: TreeView>(
    tree: &T,
    node: T::Id,
    exclude: Option<T::Id>,
    direction: Direction,
) -> Option<T::Id> {
    // (node, children_pushed). Reverse order visits a node after its subtree.
    let mut stack: Vec<(T::Id, bool)> = Vec::new();
    push_children(tree, node, direction, &mut stack);

    while let Some((id, expanded)) = stack.pop() {
        if Some(id) == exclude {
            continue;
        }
        match direction {
            Direction::Next => {
                if tree.is_focusable(id) {
                    return Some(id);
                }
                push_children(tree, id, direction, &mut stack);
            }
            Direction::Previous if expanded => {
                if tree.is_focusable(id) {
                    return Some(id);
                }
            }
            Direction::Previous => {
                stack.push((id, true));
                push_children(tree, id, direction, &mut stack);
            }
        }
    }
    None
}

fn push_children<T: TreeView>(
    tree: &T,
    node: T::Id,
    direction: Direction,
    stack: &mut Vec<(T::Id, bool)>,
) {
    let children = tree.children(node);
    match direction {
        // Last pushed is popped first: push reversed to visit first child first.
        Direction::Next => stack.extend(children.iter().rev().map(|&c| (c, false))),
        Direction::Previous => stack.extend(children.iter().map(|&c| (c, false))),
    }
}

/// Walk the sibling chain of `node` in `direction`.
///
/// A focusable sibling wins over its own descendants.
pub fn find_next_focusable_sibling<T: TreeView>(
    tree: &T,
    node: T::Id,
    direction: Direction,
) -> Option<T::Id> {
    let mut sibling = direction.sibling(tree, node);

    while let Some(candidate) = sibling {
        if tree.is_focusable(candidate) {
            return Some(candidate);
        }
        if let Some(found) = find_focusable_descendant(tree, candidate, None, direction) {
            return Some(found);
        }
        sibling = direction.sibling(tree, candidate);
    }

    None
}

/// Run the sibling chain from each ancestor of `node`, innermost first.
pub fn find_next_focusable_ancestor<T: TreeView>(
    tree: &T,
    node: T::Id,
    direction: Direction,
) -> Option<T::Id> {
    let mut ancestor = tree.parent(node);

    while let Some(current) = ancestor {
        if let Some(found) = find_next_focusable_sibling(tree, current, direction) {
            return Some(found);
        }
        ancestor = tree.parent(current);
    }

    None
}

/// The node that should take focus after `node` when moving in `direction`.
///
/// Returns `None` at either end of the tree; focus does not wrap.
pub fn find_next_focusable<T: TreeView>(
    tree: &T,
    node: T::Id,
    direction: Direction,
) -> Option<T::Id> {
    let found = find_next_focusable_sibling(tree, node, direction)
        .or_else(|| find_next_focusable_ancestor(tree, node, direction));
    trace!("find_next_focusable({:?}, {:?}) -> {:?}", node, direction, found);
    found
}

/// Nearest strict ancestor of `node` that is itself focusable.
///
/// Used to find the enclosing focus container, e.g. the button that owns an
/// open menu.
pub fn find_focusable_parent<T: TreeView>(tree: &T, node: T::Id) -> Option<T::Id> {
    let mut ancestor = tree.parent(node);
    while let Some(current) = ancestor {
        if tree.is_focusable(current) {
            return Some(current);
        }
        ancestor = tree.parent(current);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tree::{Document, Element, NodeId, Role};

    fn button(doc: &mut Document, parent: NodeId, label: &str) -> NodeId {
        doc.append(parent, Element::new(Role::Button, label))
    }

    fn group(doc: &mut Document, parent: NodeId, label: &str) -> NodeId {
        doc.append(parent, Element::new(Role::Group, label))
    }

    /// Root[ButtonA, Group[ButtonB, ButtonC], ButtonD]
    fn scenario() -> (Document, [NodeId; 4]) {
        let mut doc = Document::new();
        let root = doc.root();
        let a = button(&mut doc, root, "A");
        let g = group(&mut doc, root, "Group");
        let b = button(&mut doc, g, "B");
        let c = button(&mut doc, g, "C");
        let d = button(&mut doc, root, "D");
        (doc, [a, b, c, d])
    }

    #[test]
    fn test_scenario_forward() {
        let (doc, [a, b, c, d]) = scenario();
        assert_eq!(find_next_focusable(&doc, a, Direction::Next), Some(b));
        assert_eq!(find_next_focusable(&doc, b, Direction::Next), Some(c));
        assert_eq!(find_next_focusable(&doc, c, Direction::Next), Some(d));
        assert_eq!(find_next_focusable(&doc, d, Direction::Next), None);
    }

    #[test]
    fn test_scenario_backward() {
        let (doc, [a, b, c, d]) = scenario();
        assert_eq!(find_next_focusable(&doc, d, Direction::Previous), Some(c));
        assert_eq!(find_next_focusable(&doc, c, Direction::Previous), Some(b));
        assert_eq!(find_next_focusable(&doc, b, Direction::Previous), Some(a));
        assert_eq!(find_next_focusable(&doc, a, Direction::Previous), None);
    }

    #[test]
    fn test_disabled_button_is_skipped() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = button(&mut doc, root, "A");
        let b = doc.append(root, Element::new(Role::Button, "B").disabled(true));
        let c = button(&mut doc, root, "C");
        assert_eq!(find_next_focusable(&doc, a, Direction::Next), Some(c));
        assert_eq!(find_next_focusable(&doc, c, Direction::Previous), Some(a));
        assert_ne!(find_next_focusable(&doc, a, Direction::Next), Some(b));
    }

    #[test]
    fn test_focusable_sibling_wins_over_its_descendants() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = button(&mut doc, root, "A");
        let panel = doc.append(root, Element::new(Role::Group, "panel").tab_index(0));
        let inner = button(&mut doc, panel, "inner");
        assert_eq!(find_next_focusable(&doc, a, Direction::Next), Some(panel));
        // The descendant is reached from inside, not skipped forever.
        assert_eq!(find_next_focusable(&doc, inner, Direction::Previous), Some(a));
    }

    #[test]
    fn test_ancestor_escape_into_next_container() {
        let mut doc = Document::new();
        let root = doc.root();
        let left = group(&mut doc, root, "left");
        let _first = button(&mut doc, left, "first");
        let last = button(&mut doc, left, "last");
        let right = group(&mut doc, root, "right");
        let spacer = group(&mut doc, right, "spacer");
        let target = button(&mut doc, spacer, "target");
        assert_eq!(find_next_focusable(&doc, last, Direction::Next), Some(target));
    }

    #[test]
    fn test_escape_through_several_levels() {
        let mut doc = Document::new();
        let root = doc.root();
        let outer = group(&mut doc, root, "outer");
        let middle = group(&mut doc, outer, "middle");
        let deep = button(&mut doc, middle, "deep");
        let after = button(&mut doc, root, "after");
        let empty = group(&mut doc, root, "empty");
        assert_eq!(find_next_focusable(&doc, deep, Direction::Next), Some(after));
        assert_eq!(find_next_focusable(&doc, after, Direction::Previous), Some(deep));
        assert_eq!(find_next_focusable(&doc, after, Direction::Next), None);
        assert_eq!(find_focusable_descendant(&doc, empty, None, Direction::Next), None);
    }

    #[test]
    fn test_previous_descends_in_reverse_document_order() {
        let mut doc = Document::new();
        let root = doc.root();
        let g = group(&mut doc, root, "g");
        let x = button(&mut doc, g, "x");
        let inner = group(&mut doc, g, "inner");
        let y = button(&mut doc, inner, "y");
        let z = button(&mut doc, inner, "z");
        let end = button(&mut doc, root, "end");

        assert_eq!(find_focusable_descendant(&doc, g, None, Direction::Next), Some(x));
        assert_eq!(find_focusable_descendant(&doc, g, None, Direction::Previous), Some(z));
        assert_eq!(find_next_focusable(&doc, end, Direction::Previous), Some(z));
        assert_eq!(find_next_focusable(&doc, y, Direction::Previous), Some(x));
    }

    #[test]
    fn test_descendant_search_honours_exclude() {
        let mut doc = Document::new();
        let root = doc.root();
        let g = group(&mut doc, root, "g");
        let first = group(&mut doc, g, "first");
        let _hidden_away = button(&mut doc, first, "inside-first");
        let second = button(&mut doc, g, "second");
        assert_eq!(
            find_focusable_descendant(&doc, g, Some(first), Direction::Next),
            Some(second)
        );
        let found = find_focusable_descendant(&doc, g, Some(second), Direction::Previous);
        assert_eq!(found.map(|id| doc.label(id)), Some("inside-first"));
    }

    #[test]
    fn test_descendant_search_excludes_the_start_node() {
        let mut doc = Document::new();
        let root = doc.root();
        let lone = button(&mut doc, root, "lone");
        assert_eq!(find_focusable_descendant(&doc, lone, None, Direction::Next), None);
        assert_eq!(find_focusable_descendant(&doc, lone, None, Direction::Previous), None);
    }

    #[test]
    fn test_never_returns_self_or_unfocusable() {
        let (mut doc, [_a, b, c, _d]) = scenario();
        doc.set_hidden(c, true);
        for id in doc.document_order() {
            for dir in [Direction::Next, Direction::Previous] {
                if let Some(found) = find_next_focusable(&doc, id, dir) {
                    assert_ne!(found, id);
                    assert!(doc.is_focusable(found));
                }
            }
        }
        assert_ne!(find_next_focusable(&doc, b, Direction::Next), Some(c));
    }

    #[test]
    fn test_is_idempotent() {
        let (doc, [a, _b, c, _d]) = scenario();
        let first = find_next_focusable(&doc, c, Direction::Next);
        let second = find_next_focusable(&doc, c, Direction::Next);
        assert_eq!(first, second);
        assert_eq!(
            find_next_focusable(&doc, a, Direction::Previous),
            find_next_focusable(&doc, a, Direction::Previous)
        );
    }

    #[test]
    fn test_root_and_detached_nodes_yield_none() {
        let (mut doc, [a, _b, _c, d]) = scenario();
        assert_eq!(find_next_focusable(&doc, doc.root(), Direction::Next), None);
        doc.detach(d);
        assert_eq!(find_next_focusable(&doc, d, Direction::Previous), None);
        assert_eq!(find_focusable_parent(&doc, a), None);
    }

    #[test]
    fn test_find_focusable_parent() {
        let mut doc = Document::new();
        let root = doc.root();
        let menu_button = button(&mut doc, root, "Font");
        let list = group(&mut doc, menu_button, "list");
        let item = doc.append(list, Element::new(Role::MenuItem, "Geist Mono"));
        assert_eq!(find_focusable_parent(&doc, item), Some(menu_button));
        assert_eq!(find_focusable_parent(&doc, list), Some(menu_button));
        assert_eq!(find_focusable_parent(&doc, menu_button), None);
    }
}
