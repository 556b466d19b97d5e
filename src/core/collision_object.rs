use glam::Affine3A;
use serde::{Deserialize, Serialize};

use super::shape::Shape;
use crate::{
    config::{DEFAULT_COLLISION_LAYER, DEFAULT_COLLISION_MASK},
    utils::allocator::NodeId,
};

/// Aggregation slot inside a body or area grouping shapes under one
/// transform and enabled flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeOwner {
    pub id: u32,
    /// Node the shapes were taken from, reported back by ray hits.
    pub source: NodeId,
    /// Placement relative to the owning collision object.
    pub transform: Affine3A,
    pub disabled: bool,
    pub shapes: Vec<Shape>,
}

/// Shape-owner table and filtering state shared by bodies and areas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollisionObject {
    pub collision_layer: u32,
    pub collision_mask: u32,
    owners: Vec<ShapeOwner>,
    next_owner_id: u32,
}

impl Default for CollisionObject {
    fn default() -> Self {
        Self {
            collision_layer: DEFAULT_COLLISION_LAYER,
            collision_mask: DEFAULT_COLLISION_MASK,
            owners: Vec::new(),
            next_owner_id: 0,
        }
    }
}

impl CollisionObject {
    /// Opens a new, empty, enabled owner with identity transform.
    pub fn create_shape_owner(&mut self, source: NodeId) -> u32 {
        let id = self.next_owner_id;
        self.next_owner_id += 1;
        self.owners.push(ShapeOwner {
            id,
            source,
            transform: Affine3A::IDENTITY,
            disabled: false,
            shapes: Vec::new(),
        });
        id
    }

    /// Returns `false` when `owner` does not exist.
    pub fn shape_owner_add_shape(&mut self, owner: u32, shape: Shape) -> bool {
        self.owner_mut(owner).map(|o| o.shapes.push(shape)).is_some()
    }

    pub fn shape_owner_set_transform(&mut self, owner: u32, transform: Affine3A) -> bool {
        self.owner_mut(owner).map(|o| o.transform = transform).is_some()
    }

    pub fn shape_owner_set_disabled(&mut self, owner: u32, disabled: bool) -> bool {
        self.owner_mut(owner).map(|o| o.disabled = disabled).is_some()
    }

    pub fn shape_owner(&self, owner: u32) -> Option<&ShapeOwner> {
        self.owners.iter().find(|o| o.id == owner)
    }

    pub fn shape_owners(&self) -> &[ShapeOwner] {
        &self.owners
    }

    pub fn shape_owner_count(&self) -> usize {
        self.owners.len()
    }

    /// Flattened shape list in owner order, paired with the owner and the
    /// body-wide shape index.
    pub fn shapes(&self) -> impl Iterator<Item = (usize, &ShapeOwner, &Shape)> + '_ {
        self.owners
            .iter()
            .flat_map(|owner| owner.shapes.iter().map(move |shape| (owner, shape)))
            .enumerate()
            .map(|(index, (owner, shape))| (index, owner, shape))
    }

    fn owner_mut(&mut self, owner: u32) -> Option<&mut ShapeOwner> {
        self.owners.iter_mut().find(|o| o.id == owner)
    }
}
