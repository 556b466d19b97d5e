use glam::{Quat, Vec3};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    config::DEFAULT_SPRING_DAMPING,
    core::{
        joint::{AxisParams, Generic6DofJoint, JointEndpoint},
        node::{Node, NodeClass, NodePayload, PhysicsBody},
        types::Transform,
    },
    error::{SceneError, SceneResult},
    scene::tree::{ParentSlot, SceneTree},
    utils::allocator::NodeId,
};

/// Declarative configuration consumed once by [`create_joint`]. Angles are
/// in radians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JointOptions {
    pub anchor_position: Vec3,
    pub anchor_rotation: Quat,
    /// Parent the joint to the scene root instead of the first body, so the
    /// anchor is expressed in world space.
    pub anchor_in_world_space: bool,
    pub angular_lower_limit: Vec3,
    pub angular_upper_limit: Vec3,
    pub unlimited_angular: bool,
    /// Springs are enabled on all three rotational axes when positive.
    pub angular_spring_stiffness: f32,
    pub angular_spring_damping: f32,
    pub linear_lower_limit: Vec3,
    pub linear_upper_limit: Vec3,
    pub unlimited_linear: bool,
    /// Springs are enabled on all three translational axes when positive.
    pub linear_spring_stiffness: f32,
    pub linear_spring_damping: f32,
}

impl Default for JointOptions {
    fn default() -> Self {
        Self {
            anchor_position: Vec3::ZERO,
            anchor_rotation: Quat::IDENTITY,
            anchor_in_world_space: false,
            angular_lower_limit: Vec3::ZERO,
            angular_upper_limit: Vec3::ZERO,
            unlimited_angular: false,
            angular_spring_stiffness: 0.0,
            angular_spring_damping: DEFAULT_SPRING_DAMPING,
            linear_lower_limit: Vec3::ZERO,
            linear_upper_limit: Vec3::ZERO,
            unlimited_linear: false,
            linear_spring_stiffness: 0.0,
            linear_spring_damping: DEFAULT_SPRING_DAMPING,
        }
    }
}

impl JointOptions {
    pub fn anchor(mut self, position: Vec3, rotation: Quat) -> Self {
        self.anchor_position = position;
        self.anchor_rotation = rotation;
        self
    }

    pub fn in_world_space(mut self, world: bool) -> Self {
        self.anchor_in_world_space = world;
        self
    }

    pub fn angular_limits(mut self, lower: Vec3, upper: Vec3) -> Self {
        self.angular_lower_limit = lower;
        self.angular_upper_limit = upper;
        self
    }

    pub fn linear_limits(mut self, lower: Vec3, upper: Vec3) -> Self {
        self.linear_lower_limit = lower;
        self.linear_upper_limit = upper;
        self
    }

    pub fn unlimited_angular(mut self) -> Self {
        self.unlimited_angular = true;
        self
    }

    pub fn unlimited_linear(mut self) -> Self {
        self.unlimited_linear = true;
        self
    }

    pub fn angular_spring(mut self, stiffness: f32, damping: f32) -> Self {
        self.angular_spring_stiffness = stiffness;
        self.angular_spring_damping = damping;
        self
    }

    pub fn linear_spring(mut self, stiffness: f32, damping: f32) -> Self {
        self.linear_spring_stiffness = stiffness;
        self.linear_spring_damping = damping;
        self
    }
}

/// Spawns a 6-DOF joint between `body` and `other_body` (the world when
/// `None`) and configures it from `options`. Returns the joint node.
pub fn create_joint(
    tree: &mut SceneTree,
    body: NodeId,
    other_body: Option<NodeId>,
    options: &JointOptions,
) -> SceneResult<NodeId> {
    ensure_body(tree, body)?;
    if let Some(other) = other_body {
        ensure_body(tree, other)?;
    }

    let slot = if options.anchor_in_world_space {
        ParentSlot::SceneRoot
    } else {
        ParentSlot::Explicit(body)
    };
    let joint_id = tree.instantiate(slot, Node::joint("Joint", Generic6DofJoint::new()))?;

    let node = tree
        .get_mut(joint_id)
        .ok_or(SceneError::InvalidNode(joint_id))?;
    node.transform = Transform::IDENTITY;
    node.transform.position = options.anchor_position;
    node.transform.rotation = options.anchor_rotation;

    let joint = Generic6DofJoint::downcast_mut(&mut node.kind)
        .ok_or(SceneError::NotAJoint(joint_id))?;
    configure(joint, options);
    let endpoint = other_body.map_or(JointEndpoint::World, JointEndpoint::Body);
    joint.bind(body, endpoint);

    debug!(
        "created joint {:?} between {:?} and {:?} ({:?})",
        joint_id, body, endpoint, slot
    );
    Ok(joint_id)
}

/// Rigidly welds `body` to `other_body`, or to the world when `None`.
pub fn create_fixed_joint(
    tree: &mut SceneTree,
    body: NodeId,
    other_body: Option<NodeId>,
) -> SceneResult<NodeId> {
    create_joint(tree, body, other_body, &JointOptions::default())
}

/// Clears both endpoints of the joint node `joint`.
pub fn detach_joint(tree: &mut SceneTree, joint: NodeId) -> SceneResult<()> {
    if !tree.contains(joint) {
        return Err(SceneError::InvalidNode(joint));
    }
    let payload = tree
        .get_as_mut::<Generic6DofJoint>(joint)
        .ok_or(SceneError::NotAJoint(joint))?;
    payload.detach();
    Ok(())
}

fn ensure_body(tree: &SceneTree, id: NodeId) -> SceneResult<()> {
    match tree.get(id) {
        None => Err(SceneError::InvalidNode(id)),
        Some(node) if PhysicsBody::matches(&node.kind) => Ok(()),
        Some(_) => Err(SceneError::NotAPhysicsBody(id)),
    }
}

fn configure(joint: &mut Generic6DofJoint, options: &JointOptions) {
    for axis in 0..3 {
        let angular = &mut joint.angular[axis];
        angular.lower_limit = options.angular_lower_limit[axis];
        angular.upper_limit = options.angular_upper_limit[axis];
        if options.unlimited_angular {
            angular.limit_enabled = false;
        }
        apply_spring(
            angular,
            options.angular_spring_stiffness,
            options.angular_spring_damping,
        );

        let linear = &mut joint.linear[axis];
        linear.lower_limit = options.linear_lower_limit[axis];
        linear.upper_limit = options.linear_upper_limit[axis];
        if options.unlimited_linear {
            linear.limit_enabled = false;
        }
        apply_spring(
            linear,
            options.linear_spring_stiffness,
            options.linear_spring_damping,
        );
    }
}

fn apply_spring(axis: &mut AxisParams, stiffness: f32, damping: f32) {
    if stiffness > 0.0 {
        axis.spring_enabled = true;
        axis.spring_stiffness = stiffness;
        axis.spring_damping = damping;
    }
}
