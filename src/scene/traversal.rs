//! Typed lookups over the scene tree.
//!
//! None of these treat "nothing found" as a failure: lookups return `None`
//! and collectors leave the output untouched.

use super::tree::SceneTree;
use crate::{
    core::node::{Node, NodeClass},
    utils::allocator::NodeId,
};

/// First child of `node` matching `T`. Direct children are checked before
/// any grandchild; with `nested`, each child's subtree is then searched in
/// order using the same rule.
pub fn get_first_child<T: NodeClass>(
    tree: &SceneTree,
    node: NodeId,
    nested: bool,
) -> Option<NodeId> {
    find_first_child(tree, node, nested, |n| T::matches(&n.kind))
}

/// Nearest ancestor matching `T`, optionally testing `node` itself first.
pub fn get_first_parent<T: NodeClass>(
    tree: &SceneTree,
    node: NodeId,
    include_self: bool,
) -> Option<NodeId> {
    find_first_parent(tree, node, include_self, |n| T::matches(&n.kind))
}

/// Appends every child matching `T` to `out`, in pre-order. Existing entries
/// in `out` are kept.
pub fn get_children<T: NodeClass>(
    tree: &SceneTree,
    node: NodeId,
    out: &mut Vec<NodeId>,
    nested: bool,
) {
    collect_children(tree, node, out, nested, |n| T::matches(&n.kind));
}

pub fn find_first_child<F>(
    tree: &SceneTree,
    node: NodeId,
    nested: bool,
    predicate: F,
) -> Option<NodeId>
where
    F: Fn(&Node) -> bool,
{
    // Each popped node has its direct children checked as a group before
    // any of their subtrees; children go on the stack reversed so the first
    // child's subtree is exhausted before the second one's.
    let mut pending = vec![node];
    while let Some(current) = pending.pop() {
        let children = tree.children(current);
        let direct = children
            .iter()
            .copied()
            .find(|child| tree.get(*child).is_some_and(&predicate));
        if direct.is_some() {
            return direct;
        }
        if nested {
            pending.extend(children.iter().rev().copied());
        }
    }
    None
}

pub fn find_first_parent<F>(
    tree: &SceneTree,
    node: NodeId,
    include_self: bool,
    predicate: F,
) -> Option<NodeId>
where
    F: Fn(&Node) -> bool,
{
    let mut cursor = if include_self {
        Some(node)
    } else {
        tree.parent(node)
    };

    while let Some(id) = cursor {
        let current = tree.get(id)?;
        if predicate(current) {
            return Some(id);
        }
        cursor = current.parent();
    }
    None
}

pub fn collect_children<F>(
    tree: &SceneTree,
    node: NodeId,
    out: &mut Vec<NodeId>,
    nested: bool,
    predicate: F,
) where
    F: Fn(&Node) -> bool,
{
    let mut pending: Vec<NodeId> = tree.children(node).iter().rev().copied().collect();
    while let Some(child) = pending.pop() {
        if tree.get(child).is_some_and(&predicate) {
            out.push(child);
        }
        if nested {
            pending.extend(tree.children(child).iter().rev().copied());
        }
    }
}
