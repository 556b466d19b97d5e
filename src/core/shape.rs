use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Collision geometry carried by a collision-shape node. Capsules and
/// cylinders are aligned with the local Y axis; `height` is the full height
/// including capsule caps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Sphere { radius: f32 },
    Box { half_extents: Vec3 },
    Capsule { radius: f32, height: f32 },
    Cylinder { radius: f32, height: f32 },
}

impl Shape {
    pub fn sphere(radius: f32) -> Self {
        Shape::Sphere { radius }
    }

    pub fn cuboid(half_extents: Vec3) -> Self {
        Shape::Box { half_extents }
    }

    pub fn capsule(radius: f32, height: f32) -> Self {
        Shape::Capsule { radius, height }
    }

    pub fn cylinder(radius: f32, height: f32) -> Self {
        Shape::Cylinder { radius, height }
    }

    /// Whether a point in the shape's local space lies inside it.
    pub fn contains_local(&self, point: Vec3) -> bool {
        match self {
            Shape::Sphere { radius } => point.length_squared() <= radius * radius,
            Shape::Box { half_extents } => {
                let d = point.abs();
                d.x <= half_extents.x && d.y <= half_extents.y && d.z <= half_extents.z
            }
            Shape::Capsule { radius, height } => {
                let half_segment = (height * 0.5 - radius).max(0.0);
                let axis_point = Vec3::new(0.0, point.y.clamp(-half_segment, half_segment), 0.0);
                point.distance_squared(axis_point) <= radius * radius
            }
            Shape::Cylinder { radius, height } => {
                point.y.abs() <= height * 0.5
                    && point.x * point.x + point.z * point.z <= radius * radius
            }
        }
    }
}
