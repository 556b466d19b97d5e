use glam::{Affine3A, Vec3};
use log::trace;
use serde::{Deserialize, Serialize};

use crate::{
    config::{DEFAULT_RAY_COLLISION_MASK, GEOMETRY_EPSILON},
    core::{node::NodeKind, shape::Shape},
    scene::tree::SceneTree,
    utils::{allocator::NodeId, logging::ScopedTimer},
};

/// Segment from `origin` to `origin + direction`. The direction is not
/// normalized: its length is the reach of the ray.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    pub fn end(&self) -> Vec3 {
        self.origin + self.direction
    }
}

/// Full set of ray query parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RayQuery {
    pub ray: Ray,
    pub collision_mask: u32,
    pub collide_with_bodies: bool,
    pub collide_with_areas: bool,
    /// Report shapes that contain the origin, at the origin with a zero normal.
    pub hit_from_inside: bool,
    pub exclude: Vec<NodeId>,
}

impl RayQuery {
    pub fn new(ray: Ray) -> Self {
        Self {
            ray,
            collision_mask: DEFAULT_RAY_COLLISION_MASK,
            collide_with_bodies: true,
            collide_with_areas: false,
            hit_from_inside: false,
            exclude: Vec::new(),
        }
    }

    pub fn with_mask(mut self, mask: u32) -> Self {
        self.collision_mask = mask;
        self
    }

    pub fn with_areas(mut self, collide_with_areas: bool) -> Self {
        self.collide_with_areas = collide_with_areas;
        self
    }

    pub fn with_bodies(mut self, collide_with_bodies: bool) -> Self {
        self.collide_with_bodies = collide_with_bodies;
        self
    }

    pub fn hit_from_inside(mut self, enabled: bool) -> Self {
        self.hit_from_inside = enabled;
        self
    }

    pub fn excluding(mut self, node: NodeId) -> Self {
        self.exclude.push(node);
        self
    }
}

/// Opaque handle of the collision object that was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ColliderRid(u64);

impl ColliderRid {
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl From<NodeId> for ColliderRid {
    fn from(id: NodeId) -> Self {
        Self(id.to_bits())
    }
}

/// Nearest intersection reported by [`raycast`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RaycastHit {
    pub point: Vec3,
    pub normal: Vec3,
    /// Body or area that owns the hit shape.
    pub collider: NodeId,
    /// Index into the collider's flattened shape list.
    pub shape: usize,
    /// Node the hit shape was composed from.
    pub shape_owner_node: NodeId,
    pub rid: ColliderRid,
    /// World-space distance from the ray origin.
    pub distance: f32,
    pub metadata: Option<String>,
}

/// Casts `ray` through the physics world `node` lives in and returns the
/// nearest hit on a body (and on an area when `collide_with_areas`).
///
/// Misses yield `None`; use `unwrap_or_default()` for an empty record.
pub fn raycast(
    tree: &SceneTree,
    node: NodeId,
    ray: &Ray,
    collide_with_areas: bool,
) -> Option<RaycastHit> {
    intersect_ray(tree, node, &RayQuery::new(*ray).with_areas(collide_with_areas))
}

pub fn intersect_ray(tree: &SceneTree, node: NodeId, query: &RayQuery) -> Option<RaycastHit> {
    if !tree.contains(node) {
        trace!("raycast from {:?} skipped: node is not in the tree", node);
        return None;
    }
    let ray = query.ray;
    if ray.direction.length_squared() < GEOMETRY_EPSILON * GEOMETRY_EPSILON {
        log::warn!("zero-length ray from {:?} ignored", ray.origin);
        return None;
    }

    let mut timer = ScopedTimer::new("raycast::intersect");
    let mut best: Option<(f32, RaycastHit)> = None;

    for (id, candidate) in tree.iter() {
        let (collision, is_area) = match &candidate.kind {
            NodeKind::Body(body) => (&body.collision, false),
            NodeKind::Area(area) => (&area.collision, true),
            _ => continue,
        };
        let wanted = if is_area {
            query.collide_with_areas
        } else {
            query.collide_with_bodies
        };
        if !wanted
            || collision.collision_layer & query.collision_mask == 0
            || query.exclude.contains(&id)
        {
            continue;
        }
        let Some(object_global) = tree.global_transform(id) else {
            continue;
        };

        for (index, owner, shape) in collision.shapes() {
            if owner.disabled {
                continue;
            }
            timer.record(1);
            let world = object_global * owner.transform;
            let Some((t, normal)) = cast_against_shape(&ray, shape, &world, query.hit_from_inside)
            else {
                continue;
            };
            if best.as_ref().is_some_and(|(best_t, _)| *best_t <= t) {
                continue;
            }
            best = Some((
                t,
                RaycastHit {
                    point: ray.origin + ray.direction * t,
                    normal,
                    collider: id,
                    shape: index,
                    shape_owner_node: owner.source,
                    rid: ColliderRid::from(id),
                    distance: ray.direction.length() * t,
                    metadata: candidate.metadata.clone(),
                },
            ));
        }
    }

    best.map(|(_, hit)| hit)
}

/// Segment parameter in `[0, 1]` and world-space normal of the first
/// contact between `ray` and `shape` placed at `world`.
fn cast_against_shape(
    ray: &Ray,
    shape: &Shape,
    world: &Affine3A,
    hit_from_inside: bool,
) -> Option<(f32, Vec3)> {
    let inverse = world.inverse();
    let from = inverse.transform_point3(ray.origin);
    let delta = inverse.transform_point3(ray.end()) - from;

    if shape.contains_local(from) {
        return hit_from_inside.then_some((0.0, Vec3::ZERO));
    }

    let (t, local_normal) = match shape {
        Shape::Sphere { radius } => segment_sphere(from, delta, Vec3::ZERO, *radius),
        Shape::Box { half_extents } => segment_box(from, delta, *half_extents),
        Shape::Cylinder { radius, height } => segment_cylinder(from, delta, *radius, height * 0.5),
        Shape::Capsule { radius, height } => segment_capsule(from, delta, *radius, height * 0.5),
    }?;

    // Normals transform with the inverse transpose of the linear part.
    let normal = inverse.matrix3.transpose().mul_vec3(local_normal).normalize_or_zero();
    Some((t, normal))
}

fn within_segment(t: f32) -> bool {
    (0.0..=1.0).contains(&t)
}

fn closest((t_a, n_a): (f32, Vec3), other: Option<(f32, Vec3)>) -> (f32, Vec3) {
    match other {
        Some((t_b, n_b)) if t_b < t_a => (t_b, n_b),
        _ => (t_a, n_a),
    }
}

fn segment_sphere(from: Vec3, delta: Vec3, center: Vec3, radius: f32) -> Option<(f32, Vec3)> {
    let offset = from - center;
    let a = delta.length_squared();
    let b = 2.0 * offset.dot(delta);
    let c = offset.length_squared() - radius * radius;
    let discriminant = b * b - 4.0 * a * c;
    if a < GEOMETRY_EPSILON * GEOMETRY_EPSILON || discriminant < 0.0 {
        return None;
    }
    let t = (-b - discriminant.sqrt()) / (2.0 * a);
    if !within_segment(t) {
        return None;
    }
    let normal = (offset + delta * t).normalize_or_zero();
    Some((t, normal))
}

fn segment_box(from: Vec3, delta: Vec3, half_extents: Vec3) -> Option<(f32, Vec3)> {
    let mut t_min = 0.0_f32;
    let mut t_max = 1.0_f32;
    let mut normal = Vec3::ZERO;

    for axis in 0..3 {
        let start = from[axis];
        let step = delta[axis];
        let (min, max) = (-half_extents[axis], half_extents[axis]);

        if step.abs() < GEOMETRY_EPSILON {
            if start < min || start > max {
                return None;
            }
            continue;
        }

        let inv = 1.0 / step;
        let mut t_near = (min - start) * inv;
        let mut t_far = (max - start) * inv;
        let mut axis_normal = Vec3::ZERO;
        axis_normal[axis] = -1.0;
        if t_near > t_far {
            std::mem::swap(&mut t_near, &mut t_far);
            axis_normal = -axis_normal;
        }

        if t_near > t_min {
            t_min = t_near;
            normal = axis_normal;
        }
        t_max = t_max.min(t_far);
        if t_min > t_max {
            return None;
        }
    }

    (normal != Vec3::ZERO).then_some((t_min, normal))
}

/// Side wall of a Y-aligned cylinder clipped to `|y| <= half_height`.
fn segment_tube(from: Vec3, delta: Vec3, radius: f32, half_height: f32) -> Option<(f32, Vec3)> {
    let a = delta.x * delta.x + delta.z * delta.z;
    if a < GEOMETRY_EPSILON * GEOMETRY_EPSILON {
        return None;
    }
    let b = 2.0 * (from.x * delta.x + from.z * delta.z);
    let c = from.x * from.x + from.z * from.z - radius * radius;
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }
    let t = (-b - discriminant.sqrt()) / (2.0 * a);
    let point = from + delta * t;
    if !within_segment(t) || point.y.abs() > half_height {
        return None;
    }
    Some((t, Vec3::new(point.x, 0.0, point.z).normalize_or_zero()))
}

fn segment_cylinder(from: Vec3, delta: Vec3, radius: f32, half_height: f32) -> Option<(f32, Vec3)> {
    let mut best = segment_tube(from, delta, radius, half_height);

    if delta.y.abs() >= GEOMETRY_EPSILON {
        for cap in [half_height, -half_height] {
            let t = (cap - from.y) / delta.y;
            let point = from + delta * t;
            if within_segment(t) && point.x * point.x + point.z * point.z <= radius * radius {
                let candidate = (t, Vec3::new(0.0, cap.signum(), 0.0));
                best = Some(match best {
                    Some(current) => closest(current, Some(candidate)),
                    None => candidate,
                });
            }
        }
    }
    best
}

fn segment_capsule(from: Vec3, delta: Vec3, radius: f32, half_height: f32) -> Option<(f32, Vec3)> {
    let half_segment = (half_height - radius).max(0.0);
    [
        segment_tube(from, delta, radius, half_segment),
        segment_sphere(from, delta, Vec3::new(0.0, half_segment, 0.0), radius),
        segment_sphere(from, delta, Vec3::new(0.0, -half_segment, 0.0), radius),
    ]
    .into_iter()
    .flatten()
    .reduce(|current, candidate| closest(current, Some(candidate)))
}
