//! Particle Scene – scene-graph helpers for Rust.
//!
//! A thin utility layer over an explicit scene tree: typed node lookup,
//! collision-shape composition into physics bodies, 6-DOF joint
//! construction and single-hit ray queries. The tree is always passed in
//! by the caller; nothing here keeps global state.

pub mod config;
pub mod core;
pub mod error;
pub mod physics;
pub mod scene;
pub mod utils;

pub use glam::{Affine3A, Quat, Vec3};

pub use self::core::{
    class, Area, AxisParams, BodyMode, CollisionObject, CollisionShape, Generic6DofJoint,
    JointBinding, JointEndpoint, Node, NodeClass, NodeKind, NodePayload, PhysicsBody, Shape,
    ShapeOwner, Transform,
};
pub use error::{SceneError, SceneResult};
pub use physics::{
    add_nested_shapes_to_body, add_nested_shapes_to_first_parent_body, create_fixed_joint,
    create_joint, detach_joint, intersect_ray, raycast, ColliderRid, JointOptions, Ray, RayQuery,
    RaycastHit,
};
pub use scene::{
    collect_children, find_first_child, find_first_parent, get_children, get_first_child,
    get_first_parent, ParentSlot, SceneTree,
};
pub use utils::allocator::NodeId;
