use serde::{Deserialize, Serialize};

use crate::utils::allocator::NodeId;

/// Limit and spring settings for one translational or rotational axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisParams {
    pub limit_enabled: bool,
    pub lower_limit: f32,
    pub upper_limit: f32,
    pub spring_enabled: bool,
    pub spring_stiffness: f32,
    pub spring_damping: f32,
    /// Rest offset the host solver pulls toward. Stored, never read here.
    pub spring_equilibrium: f32,
}

impl Default for AxisParams {
    /// A locked axis: limits on, both at zero, no spring.
    fn default() -> Self {
        Self {
            limit_enabled: true,
            lower_limit: 0.0,
            upper_limit: 0.0,
            spring_enabled: false,
            spring_stiffness: 0.0,
            spring_damping: 0.0,
            spring_equilibrium: 0.0,
        }
    }
}

/// Second endpoint of a bound joint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JointEndpoint {
    Body(NodeId),
    World,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JointBinding {
    #[default]
    Unbound,
    Bound {
        node_a: NodeId,
        node_b: JointEndpoint,
    },
}

/// Six-degree-of-freedom constraint. Axis arrays are indexed X, Y, Z.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Generic6DofJoint {
    pub linear: [AxisParams; 3],
    pub angular: [AxisParams; 3],
    /// Read by the host solver when the joint is bound; on for every joint
    /// built by `new`.
    pub exclude_nodes_from_collision: bool,
    binding: JointBinding,
}

impl Generic6DofJoint {
    pub fn new() -> Self {
        Self {
            exclude_nodes_from_collision: true,
            ..Self::default()
        }
    }

    pub fn binding(&self) -> JointBinding {
        self.binding
    }

    pub fn is_bound(&self) -> bool {
        matches!(self.binding, JointBinding::Bound { .. })
    }

    pub fn bind(&mut self, node_a: NodeId, node_b: JointEndpoint) {
        self.binding = JointBinding::Bound { node_a, node_b };
    }

    /// Clears both endpoints. Calling it on an unbound joint is a no-op.
    pub fn detach(&mut self) {
        self.binding = JointBinding::Unbound;
    }
}
