//! Physics helpers: shape composition, joint construction, ray queries.

pub mod composition;
pub mod joints;
pub mod raycast;

pub use composition::{add_nested_shapes_to_body, add_nested_shapes_to_first_parent_body};
pub use joints::{create_fixed_joint, create_joint, detach_joint, JointOptions};
pub use raycast::{intersect_ray, raycast, ColliderRid, Ray, RayQuery, RaycastHit};
