use glam::{Quat, Vec3};
use particle_scene::*;

fn two_bodies() -> (SceneTree, NodeId, NodeId) {
    let mut tree = SceneTree::new();
    let root = tree.root();
    let a = tree
        .add_child(
            root,
            Node::body("A", BodyMode::Rigid)
                .with_transform(Transform::from_position(Vec3::new(0.0, 2.0, 0.0))),
        )
        .unwrap();
    let b = tree
        .add_child(
            root,
            Node::body("B", BodyMode::Rigid)
                .with_transform(Transform::from_position(Vec3::new(0.0, 4.0, 0.0))),
        )
        .unwrap();
    (tree, a, b)
}

fn joint_of(tree: &SceneTree, id: NodeId) -> &Generic6DofJoint {
    tree.get_as::<Generic6DofJoint>(id).expect("joint payload")
}

#[test]
fn fixed_joint_welds_two_bodies() {
    let (mut tree, a, b) = two_bodies();
    let joint_id = create_fixed_joint(&mut tree, a, Some(b)).unwrap();

    assert_eq!(tree.parent(joint_id), Some(a));
    assert_eq!(tree.get(joint_id).unwrap().transform, Transform::IDENTITY);

    let joint = joint_of(&tree, joint_id);
    assert_eq!(
        joint.binding(),
        JointBinding::Bound {
            node_a: a,
            node_b: JointEndpoint::Body(b),
        }
    );
    for axis in joint.linear.iter().chain(joint.angular.iter()) {
        assert!(axis.limit_enabled);
        assert_eq!((axis.lower_limit, axis.upper_limit), (0.0, 0.0));
        assert!(!axis.spring_enabled);
    }
}

#[test]
fn fixed_joint_without_partner_binds_to_world() {
    let (mut tree, a, _) = two_bodies();
    let joint_id = create_fixed_joint(&mut tree, a, None).unwrap();
    assert_eq!(
        joint_of(&tree, joint_id).binding(),
        JointBinding::Bound {
            node_a: a,
            node_b: JointEndpoint::World,
        }
    );
}

#[test]
fn detach_twice_leaves_joint_unbound() {
    let (mut tree, a, b) = two_bodies();
    let joint_id = create_fixed_joint(&mut tree, a, Some(b)).unwrap();

    detach_joint(&mut tree, joint_id).unwrap();
    assert_eq!(joint_of(&tree, joint_id).binding(), JointBinding::Unbound);

    detach_joint(&mut tree, joint_id).unwrap();
    assert!(!joint_of(&tree, joint_id).is_bound());

    assert_eq!(
        detach_joint(&mut tree, a).unwrap_err(),
        SceneError::NotAJoint(a)
    );
}

#[test]
fn options_configure_limits_and_springs() {
    let (mut tree, a, b) = two_bodies();
    let anchor_rotation = Quat::from_rotation_x(0.25);
    let options = JointOptions::default()
        .anchor(Vec3::new(0.0, 1.0, 0.0), anchor_rotation)
        .angular_limits(Vec3::new(-0.5, -1.0, -1.5), Vec3::new(0.5, 1.0, 1.5))
        .angular_spring(40.0, 2.0)
        .unlimited_linear()
        .linear_spring(0.0, 9.0);

    let joint_id = create_joint(&mut tree, a, Some(b), &options).unwrap();
    let node = tree.get(joint_id).unwrap();
    assert_eq!(node.transform.position, Vec3::new(0.0, 1.0, 0.0));
    assert_eq!(node.transform.rotation, anchor_rotation);

    let joint = joint_of(&tree, joint_id);
    for (axis, params) in joint.angular.iter().enumerate() {
        assert!(params.limit_enabled);
        assert_eq!(params.lower_limit, options.angular_lower_limit[axis]);
        assert_eq!(params.upper_limit, options.angular_upper_limit[axis]);
        assert!(params.spring_enabled);
        assert_eq!(params.spring_stiffness, 40.0);
        assert_eq!(params.spring_damping, 2.0);
    }
    for params in &joint.linear {
        assert!(!params.limit_enabled);
        assert!(!params.spring_enabled, "zero stiffness keeps springs off");
    }
}

#[test]
fn unlimited_angular_disables_every_rotational_limit() {
    let (mut tree, a, b) = two_bodies();
    let options = JointOptions::default().unlimited_angular();
    let joint_id = create_joint(&mut tree, a, Some(b), &options).unwrap();

    let joint = joint_of(&tree, joint_id);
    assert!(joint.angular.iter().all(|axis| !axis.limit_enabled));
    assert!(joint.linear.iter().all(|axis| axis.limit_enabled));
}

#[test]
fn world_space_anchor_parents_joint_to_scene_root() {
    let (mut tree, a, b) = two_bodies();
    let options = JointOptions::default()
        .in_world_space(true)
        .anchor(Vec3::new(0.0, 3.0, 0.0), Quat::IDENTITY);
    let joint_id = create_joint(&mut tree, a, Some(b), &options).unwrap();

    assert_eq!(tree.parent(joint_id), Some(tree.root()));
    let global = tree.global_transform(joint_id).unwrap();
    assert!(global.translation.abs_diff_eq(Vec3::new(0.0, 3.0, 0.0).into(), 1e-6));
}

#[test]
fn body_space_anchor_follows_the_body() {
    let (mut tree, a, b) = two_bodies();
    let options = JointOptions::default().anchor(Vec3::new(0.0, 1.0, 0.0), Quat::IDENTITY);
    let joint_id = create_joint(&mut tree, a, Some(b), &options).unwrap();

    let global = tree.global_transform(joint_id).unwrap();
    assert!(global.translation.abs_diff_eq(Vec3::new(0.0, 3.0, 0.0).into(), 1e-6));
}

#[test]
fn joints_require_physics_bodies() {
    let (mut tree, a, _) = two_bodies();
    let root = tree.root();
    let marker = tree.add_child(root, Node::spatial("Marker")).unwrap();

    assert_eq!(
        create_fixed_joint(&mut tree, marker, None).unwrap_err(),
        SceneError::NotAPhysicsBody(marker)
    );
    assert_eq!(
        create_fixed_joint(&mut tree, a, Some(marker)).unwrap_err(),
        SceneError::NotAPhysicsBody(marker)
    );
    assert_eq!(
        create_fixed_joint(&mut tree, NodeId::NULL, None).unwrap_err(),
        SceneError::InvalidNode(NodeId::NULL)
    );
}

#[test]
fn joint_options_deserialize_with_missing_fields() {
    // Serde's default attribute fills every omitted field.
    let options: JointOptions = serde::de::Deserialize::deserialize(
        serde::de::value::MapDeserializer::<_, serde::de::value::Error>::new(
            [("unlimited_linear", true)].into_iter(),
        ),
    )
    .unwrap();
    assert!(options.unlimited_linear);
    assert_eq!(options.anchor_rotation, Quat::IDENTITY);
    assert_eq!(options.linear_spring_damping, JointOptions::default().linear_spring_damping);
}
