//! Global configuration constants for Particle Scene.

/// Name given to the root node of every new scene tree.
pub const ROOT_NODE_NAME: &str = "root";

/// Collision layer assigned to new bodies and areas.
pub const DEFAULT_COLLISION_LAYER: u32 = 1;

/// Collision mask assigned to new bodies and areas.
pub const DEFAULT_COLLISION_MASK: u32 = 1;

/// Layers a ray query tests when the caller does not narrow it.
pub const DEFAULT_RAY_COLLISION_MASK: u32 = u32::MAX;

/// Tolerance used by ray/shape intersection tests.
pub const GEOMETRY_EPSILON: f32 = 1e-6;

/// Damping applied to joint springs when only a stiffness is supplied.
pub const DEFAULT_SPRING_DAMPING: f32 = 1.0;
