use log::{debug, trace, warn};

use crate::{
    core::node::{CollisionShape, NodeClass, PhysicsBody},
    error::{SceneError, SceneResult},
    scene::{
        traversal::{get_children, get_first_parent},
        tree::SceneTree,
    },
    utils::{allocator::NodeId, logging::ScopedTimer, math::relative_transform},
};

/// Registers every collision shape nested under `node` as a new shape owner
/// on `body`, placed at `inverse(body.global) * shape.global` and inheriting
/// the shape's disabled flag. Returns the created owner ids in traversal
/// order.
///
/// `body` may be a physics body or an area.
pub fn add_nested_shapes_to_body(
    tree: &mut SceneTree,
    node: NodeId,
    body: NodeId,
) -> SceneResult<Vec<u32>> {
    if !tree.contains(node) {
        return Err(SceneError::InvalidNode(node));
    }
    let body_global = tree
        .global_transform(body)
        .ok_or(SceneError::InvalidNode(body))?;
    if tree
        .get(body)
        .and_then(|b| b.kind.collision_object())
        .is_none()
    {
        return Err(SceneError::NotACollisionObject(body));
    }

    let mut timer = ScopedTimer::new("composition::nested_shapes");
    let mut shape_nodes = Vec::new();
    get_children::<CollisionShape>(tree, node, &mut shape_nodes, true);
    timer.record(shape_nodes.len());

    // Snapshot first: the body payload is borrowed mutably below.
    let mut pending = Vec::with_capacity(shape_nodes.len());
    for shape_node in shape_nodes {
        let (Some(payload), Some(global)) = (
            tree.get_as::<CollisionShape>(shape_node),
            tree.global_transform(shape_node),
        ) else {
            continue;
        };
        pending.push((
            shape_node,
            payload.shape.clone(),
            payload.disabled,
            relative_transform(&body_global, &global),
        ));
    }

    let collision = tree
        .get_mut(body)
        .and_then(|b| b.kind.collision_object_mut())
        .ok_or(SceneError::NotACollisionObject(body))?;

    let mut owners = Vec::with_capacity(pending.len());
    for (source, shape, disabled, transform) in pending {
        let owner = collision.create_shape_owner(source);
        match shape {
            Some(shape) => {
                collision.shape_owner_add_shape(owner, shape);
            }
            None => warn!("collision shape {:?} has no shape; owner {} left empty", source, owner),
        }
        collision.shape_owner_set_transform(owner, transform);
        collision.shape_owner_set_disabled(owner, disabled);
        trace!("owner {} <- {:?} (disabled: {})", owner, source, disabled);
        owners.push(owner);
    }

    debug!(
        "composed {} shape(s) under {:?} into body {:?}",
        owners.len(),
        node,
        body
    );
    Ok(owners)
}

/// Same as [`add_nested_shapes_to_body`] targeting the nearest physics body
/// at or above `node`.
///
/// Fails with [`SceneError::ParentNotFound`] when there is none.
pub fn add_nested_shapes_to_first_parent_body(
    tree: &mut SceneTree,
    node: NodeId,
) -> SceneResult<Vec<u32>> {
    let name = tree
        .get(node)
        .map(|n| n.name.clone())
        .ok_or(SceneError::InvalidNode(node))?;

    let body = get_first_parent::<PhysicsBody>(tree, node, true).ok_or_else(|| {
        SceneError::ParentNotFound {
            node,
            name,
            expected: PhysicsBody::NAME,
        }
    })?;
    add_nested_shapes_to_body(tree, node, body)
}
