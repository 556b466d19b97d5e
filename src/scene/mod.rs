//! Scene graph context and traversal helpers.

pub mod traversal;
pub mod tree;

pub use traversal::{
    collect_children, find_first_child, find_first_parent, get_children, get_first_child,
    get_first_parent,
};
pub use tree::{ParentSlot, SceneTree};
