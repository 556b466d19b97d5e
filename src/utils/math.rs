//! Small vector and transform helpers layered on top of `glam`.

use glam::{Affine3A, Vec3};

/// Drops the vertical component of a vector.
pub fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Returns `v` with its Y component replaced.
pub fn with_y(v: Vec3, y: f32) -> Vec3 {
    Vec3::new(v.x, y, v.z)
}

/// Unit vector pointing from `from` to `to`, or zero when they coincide.
pub fn direction_to(from: Vec3, to: Vec3) -> Vec3 {
    (to - from).normalize_or_zero()
}

/// Expresses `target` in the space of `reference`: `inverse(reference) * target`.
pub fn relative_transform(reference: &Affine3A, target: &Affine3A) -> Affine3A {
    reference.inverse() * *target
}
