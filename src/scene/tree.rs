use glam::Affine3A;
use log::debug;

use crate::{
    config::ROOT_NODE_NAME,
    core::node::{Node, NodePayload},
    error::{SceneError, SceneResult},
    utils::allocator::{NodeArena, NodeId},
};

/// Where a newly instantiated node is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentSlot {
    Explicit(NodeId),
    SceneRoot,
}

/// Scene graph context passed to every helper. Owns all nodes; the root
/// always exists and cannot be removed.
pub struct SceneTree {
    nodes: NodeArena<Node>,
    root: NodeId,
}

impl Default for SceneTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneTree {
    pub fn new() -> Self {
        let mut nodes = NodeArena::new();
        let root = nodes.insert(Node::plain(ROOT_NODE_NAME));
        Self { nodes, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains(id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Typed view of a node's payload, `None` on a kind mismatch.
    pub fn get_as<T: NodePayload>(&self, id: NodeId) -> Option<&T> {
        self.get(id).and_then(|node| T::downcast(&node.kind))
    }

    pub fn get_as_mut<T: NodePayload>(&mut self, id: NodeId) -> Option<&mut T> {
        self.get_mut(id).and_then(|node| T::downcast_mut(&mut node.kind))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(Node::parent)
    }

    /// Children in insertion order; empty for stale ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(Node::children).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes.iter()
    }

    /// Attaches `node` under `slot` and returns its handle.
    pub fn instantiate(&mut self, slot: ParentSlot, node: Node) -> SceneResult<NodeId> {
        let parent = match slot {
            ParentSlot::Explicit(parent) => parent,
            ParentSlot::SceneRoot => self.root,
        };
        self.add_child(parent, node)
    }

    pub fn add_child(&mut self, parent: NodeId, mut node: Node) -> SceneResult<NodeId> {
        if !self.contains(parent) {
            return Err(SceneError::InvalidNode(parent));
        }
        node.parent = Some(parent);
        node.children.clear();
        let id = self.nodes.insert(node);
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.push(id);
        }
        Ok(id)
    }

    /// Removes `id` and its whole subtree, returning the detached node
    /// itself. Descendant handles become stale.
    pub fn remove(&mut self, id: NodeId) -> SceneResult<Node> {
        if id == self.root {
            return Err(SceneError::CannotRemoveRoot);
        }
        let mut node = self.nodes.remove(id).ok_or(SceneError::InvalidNode(id))?;

        if let Some(parent) = node.parent.and_then(|p| self.nodes.get_mut(p)) {
            parent.children.retain(|child| *child != id);
        }

        let mut pending = std::mem::take(&mut node.children);
        let mut freed = 1usize;
        while let Some(child) = pending.pop() {
            if let Some(removed) = self.nodes.remove(child) {
                pending.extend(removed.children);
                freed += 1;
            }
        }
        debug!("removed '{}' ({:?}) with {} node(s)", node.name, id, freed);

        node.parent = None;
        Ok(node)
    }

    /// World-space transform. A spatial node whose parent is not spatial is
    /// placed relative to the world; plain nodes report identity.
    pub fn global_transform(&self, id: NodeId) -> Option<Affine3A> {
        let node = self.get(id)?;
        if !node.kind.is_spatial() {
            return Some(Affine3A::IDENTITY);
        }

        let mut global = node.transform.to_affine();
        let mut cursor = node.parent;
        while let Some(parent) = cursor.and_then(|p| self.get(p)) {
            if !parent.kind.is_spatial() {
                break;
            }
            global = parent.transform.to_affine() * global;
            cursor = parent.parent;
        }
        Some(global)
    }

    /// Resolves a `/`-separated path of child names relative to `from`.
    /// `..` steps to the parent and `.` stays put. Absolute paths start with
    /// the root's own name, as produced by [`SceneTree::path_of`].
    pub fn find_by_path(&self, from: NodeId, path: &str) -> Option<NodeId> {
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let mut cursor = if path.starts_with('/') {
            let root_name = &self.get(self.root)?.name;
            if segments.next() != Some(root_name.as_str()) {
                return None;
            }
            self.root
        } else {
            from
        };
        if !self.contains(cursor) {
            return None;
        }

        for segment in segments {
            cursor = match segment {
                "." => cursor,
                ".." => self.parent(cursor)?,
                name => *self
                    .children(cursor)
                    .iter()
                    .find(|child| self.get(**child).is_some_and(|n| n.name == name))?,
            };
        }
        Some(cursor)
    }

    /// Slash-separated path from the root, e.g. `/root/Player/Hull`.
    pub fn path_of(&self, id: NodeId) -> Option<String> {
        let mut names = Vec::new();
        let mut cursor = Some(id);
        while let Some(node) = cursor.and_then(|c| self.get(c)) {
            names.push(node.name.as_str());
            cursor = node.parent;
        }
        if names.is_empty() {
            return None;
        }
        names.reverse();
        Some(format!("/{}", names.join("/")))
    }
}
