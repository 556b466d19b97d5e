use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Generational handle to a node stored in a [`NodeArena`].
///
/// A handle stays valid until its node is freed; after that the slot's
/// generation is bumped and the old handle resolves to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    pub const NULL: NodeId = NodeId {
        index: u32::MAX,
        generation: 0,
    };

    pub fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub fn index(&self) -> usize {
        self.index as usize
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn is_null(&self) -> bool {
        self.index == u32::MAX
    }

    /// Packs the handle into a single integer, generation in the high bits.
    pub fn to_bits(&self) -> u64 {
        (u64::from(self.generation) << 32) | u64::from(self.index)
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::NULL
    }
}

/// Slot arena for scene nodes.
pub struct NodeArena<T> {
    slots: Vec<Option<T>>,
    generations: Vec<u32>,
    free_list: VecDeque<usize>,
}

impl<T> Default for NodeArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NodeArena<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            generations: Vec::new(),
            free_list: VecDeque::new(),
        }
    }

    pub fn insert(&mut self, item: T) -> NodeId {
        if let Some(index) = self.free_list.pop_front() {
            self.slots[index] = Some(item);
            return NodeId::new(index as u32, self.generations[index]);
        }

        let index = self.slots.len();
        self.slots.push(Some(item));
        self.generations.push(0);
        NodeId::new(index as u32, 0)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: NodeId) -> Option<&T> {
        if self.is_current(id) {
            self.slots.get(id.index()).and_then(|slot| slot.as_ref())
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        if self.is_current(id) {
            self.slots.get_mut(id.index()).and_then(|slot| slot.as_mut())
        } else {
            None
        }
    }

    /// Frees the slot behind `id`. Stale handles are ignored.
    pub fn remove(&mut self, id: NodeId) -> Option<T> {
        if !self.is_current(id) {
            return None;
        }
        let slot = self.slots.get_mut(id.index())?;
        let item = slot.take()?;
        self.generations[id.index()] = self.generations[id.index()].wrapping_add(1);
        self.free_list.push_back(id.index());
        Some(item)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &T)> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.as_ref()
                .map(|item| (NodeId::new(index as u32, self.generations[index]), item))
        })
    }

    pub fn len(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_current(&self, id: NodeId) -> bool {
        self.generations
            .get(id.index())
            .map(|generation| *generation == id.generation())
            .unwrap_or(false)
    }
}
