use thiserror::Error;

use crate::utils::allocator::NodeId;

/// Failures raised by scene helpers. Lookups that simply find nothing
/// return `None` instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// A required ancestor is missing from the caller's chain.
    #[error("node '{name}' ({node:?}) has no {expected} ancestor")]
    ParentNotFound {
        node: NodeId,
        name: String,
        expected: &'static str,
    },

    /// Handle is stale or was never part of this tree.
    #[error("node {0:?} is not in the scene tree")]
    InvalidNode(NodeId),

    #[error("node {0:?} is not a physics body or area")]
    NotACollisionObject(NodeId),

    #[error("node {0:?} is not a physics body")]
    NotAPhysicsBody(NodeId),

    #[error("node {0:?} is not a joint")]
    NotAJoint(NodeId),

    #[error("the scene root cannot be removed")]
    CannotRemoveRoot,
}

pub type SceneResult<T> = Result<T, SceneError>;
