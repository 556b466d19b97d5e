//! Core types describing scene nodes, their payloads, and shared data.

pub mod collision_object;
pub mod joint;
pub mod node;
pub mod shape;
pub mod types;

pub use collision_object::{CollisionObject, ShapeOwner};
pub use joint::{AxisParams, Generic6DofJoint, JointBinding, JointEndpoint};
pub use node::{
    class, Area, BodyMode, CollisionShape, Node, NodeClass, NodeKind, NodePayload, PhysicsBody,
};
pub use shape::Shape;
pub use types::Transform;
