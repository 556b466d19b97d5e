use serde::{Deserialize, Serialize};

use super::{
    collision_object::CollisionObject, joint::Generic6DofJoint, shape::Shape, types::Transform,
};
use crate::utils::allocator::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BodyMode {
    Static,
    #[default]
    Rigid,
    Kinematic,
    Character,
}

/// Physics body payload. Simulation is out of scope; the body only carries
/// its mode and shape owners.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhysicsBody {
    pub mode: BodyMode,
    pub collision: CollisionObject,
}

impl PhysicsBody {
    pub fn new(mode: BodyMode) -> Self {
        Self {
            mode,
            collision: CollisionObject::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Area {
    /// Overlap reporting flag for the host. Ray queries ignore it.
    pub monitoring: bool,
    pub collision: CollisionObject,
}

/// Collision-shape node payload; placement comes from the node's transform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollisionShape {
    pub shape: Option<Shape>,
    pub disabled: bool,
}

impl CollisionShape {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape: Some(shape),
            disabled: false,
        }
    }
}

/// Typed variant of a scene node.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub enum NodeKind {
    /// Non-spatial node; its transform is ignored.
    #[default]
    Plain,
    Spatial,
    Body(PhysicsBody),
    Area(Area),
    CollisionShape(CollisionShape),
    Joint(Generic6DofJoint),
}

impl NodeKind {
    pub fn is_spatial(&self) -> bool {
        !matches!(self, NodeKind::Plain)
    }

    pub fn collision_object(&self) -> Option<&CollisionObject> {
        match self {
            NodeKind::Body(body) => Some(&body.collision),
            NodeKind::Area(area) => Some(&area.collision),
            _ => None,
        }
    }

    pub fn collision_object_mut(&mut self) -> Option<&mut CollisionObject> {
        match self {
            NodeKind::Body(body) => Some(&mut body.collision),
            NodeKind::Area(area) => Some(&mut area.collision),
            _ => None,
        }
    }
}

/// Element of the scene tree. Links are maintained by the tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    pub kind: NodeKind,
    pub metadata: Option<String>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            transform: Transform::IDENTITY,
            kind,
            metadata: None,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn plain(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Plain)
    }

    pub fn spatial(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Spatial)
    }

    pub fn body(name: impl Into<String>, mode: BodyMode) -> Self {
        Self::new(name, NodeKind::Body(PhysicsBody::new(mode)))
    }

    pub fn area(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Area(Area::default()))
    }

    pub fn collision_shape(name: impl Into<String>, shape: Shape) -> Self {
        Self::new(name, NodeKind::CollisionShape(CollisionShape::new(shape)))
    }

    pub fn joint(name: impl Into<String>, joint: Generic6DofJoint) -> Self {
        Self::new(name, NodeKind::Joint(joint))
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_metadata(mut self, metadata: impl Into<String>) -> Self {
        self.metadata = Some(metadata.into());
        self
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is<T: NodeClass>(&self) -> bool {
        T::matches(&self.kind)
    }
}

/// Type predicate over node variants, used by typed traversal helpers.
pub trait NodeClass {
    /// Human-readable class name for diagnostics.
    const NAME: &'static str;

    fn matches(kind: &NodeKind) -> bool;
}

/// Node classes that also hand out their payload.
pub trait NodePayload: NodeClass {
    fn downcast(kind: &NodeKind) -> Option<&Self>;
    fn downcast_mut(kind: &mut NodeKind) -> Option<&mut Self>;
}

macro_rules! payload_class {
    ($ty:ty, $variant:ident, $name:literal) => {
        impl NodeClass for $ty {
            const NAME: &'static str = $name;

            fn matches(kind: &NodeKind) -> bool {
                matches!(kind, NodeKind::$variant(_))
            }
        }

        impl NodePayload for $ty {
            fn downcast(kind: &NodeKind) -> Option<&Self> {
                match kind {
                    NodeKind::$variant(payload) => Some(payload),
                    _ => None,
                }
            }

            fn downcast_mut(kind: &mut NodeKind) -> Option<&mut Self> {
                match kind {
                    NodeKind::$variant(payload) => Some(payload),
                    _ => None,
                }
            }
        }
    };
}

payload_class!(PhysicsBody, Body, "physics body");
payload_class!(Area, Area, "area");
payload_class!(CollisionShape, CollisionShape, "collision shape");
payload_class!(Generic6DofJoint, Joint, "joint");

/// Abstract classes that group several variants.
pub mod class {
    use super::{BodyMode, NodeClass, NodeKind};

    /// Matches every node.
    pub struct AnyNode;

    /// Matches every node with a transform.
    pub struct Spatial;

    /// Matches bodies and areas.
    pub struct CollisionObject;

    /// Matches bodies in [`BodyMode::Rigid`] only.
    pub struct RigidBody;

    impl NodeClass for AnyNode {
        const NAME: &'static str = "node";

        fn matches(_: &NodeKind) -> bool {
            true
        }
    }

    impl NodeClass for Spatial {
        const NAME: &'static str = "spatial";

        fn matches(kind: &NodeKind) -> bool {
            kind.is_spatial()
        }
    }

    impl NodeClass for CollisionObject {
        const NAME: &'static str = "collision object";

        fn matches(kind: &NodeKind) -> bool {
            kind.collision_object().is_some()
        }
    }

    impl NodeClass for RigidBody {
        const NAME: &'static str = "rigid body";

        fn matches(kind: &NodeKind) -> bool {
            matches!(kind, NodeKind::Body(body) if body.mode == BodyMode::Rigid)
        }
    }
}
