use approx::assert_relative_eq;
use particle_scene::*;

/// Adds a body at `position` carrying one composed shape.
fn add_body_with_shape(tree: &mut SceneTree, name: &str, position: Vec3, shape: Shape) -> NodeId {
    let root = tree.root();
    let body = tree
        .add_child(
            root,
            Node::body(name, BodyMode::Static).with_transform(Transform::from_position(position)),
        )
        .unwrap();
    tree.add_child(body, Node::collision_shape(format!("{name}Shape"), shape))
        .unwrap();
    add_nested_shapes_to_body(tree, body, body).unwrap();
    body
}

#[test]
fn empty_world_always_misses() {
    let tree = SceneTree::new();
    let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 100.0));

    for collide_with_areas in [false, true] {
        let hit = raycast(&tree, tree.root(), &ray, collide_with_areas);
        assert!(hit.is_none());
        assert_eq!(hit.unwrap_or_default(), RaycastHit::default());
    }
}

#[test]
fn nearest_hit_is_reported_with_full_record() {
    let mut tree = SceneTree::new();
    let far = add_body_with_shape(&mut tree, "Far", Vec3::new(0.0, 0.0, 10.0), Shape::sphere(0.5));
    let near = add_body_with_shape(&mut tree, "Near", Vec3::new(0.0, 0.0, 4.0), Shape::sphere(0.5));
    tree.get_mut(near).unwrap().metadata = Some("target".into());

    let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 20.0));
    let hit = raycast(&tree, far, &ray, false).expect("ray should hit");

    assert_eq!(hit.collider, near);
    assert_eq!(hit.shape, 0);
    assert_eq!(tree.get(hit.shape_owner_node).unwrap().name, "NearShape");
    assert_eq!(hit.rid, ColliderRid::from(near));
    assert_eq!(hit.metadata.as_deref(), Some("target"));
    assert_relative_eq!(hit.point.z, 3.5, epsilon = 1e-4);
    assert_relative_eq!(hit.distance, 3.5, epsilon = 1e-4);
    assert!(hit.normal.abs_diff_eq(-Vec3::Z, 1e-4));
}

#[test]
fn direction_length_is_the_ray_reach() {
    let mut tree = SceneTree::new();
    add_body_with_shape(&mut tree, "Wall", Vec3::new(0.0, 0.0, 5.0), Shape::cuboid(Vec3::ONE));
    let root = tree.root();

    // Unit direction: the segment ends at z = 1, well short of the wall.
    let short = Ray::new(Vec3::ZERO, Vec3::Z);
    assert!(raycast(&tree, root, &short, false).is_none());

    let long = Ray::new(Vec3::ZERO, Vec3::Z * 8.0);
    let hit = raycast(&tree, root, &long, false).unwrap();
    assert_relative_eq!(hit.point.z, 4.0, epsilon = 1e-4);
}

#[test]
fn areas_only_hit_when_requested() {
    let mut tree = SceneTree::new();
    let root = tree.root();
    let area = tree
        .add_child(
            root,
            Node::area("Zone").with_transform(Transform::from_position(Vec3::new(0.0, 0.0, 3.0))),
        )
        .unwrap();
    tree.add_child(area, Node::collision_shape("ZoneShape", Shape::sphere(1.0)))
        .unwrap();
    add_nested_shapes_to_body(&mut tree, area, area).unwrap();
    let body = add_body_with_shape(&mut tree, "Rock", Vec3::new(0.0, 0.0, 8.0), Shape::sphere(1.0));

    let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 20.0));
    assert_eq!(raycast(&tree, root, &ray, false).unwrap().collider, body);
    assert_eq!(raycast(&tree, root, &ray, true).unwrap().collider, area);
}

#[test]
fn disabled_owners_masks_and_exclusions_are_skipped() {
    let mut tree = SceneTree::new();
    let root = tree.root();
    let near = add_body_with_shape(&mut tree, "Near", Vec3::new(0.0, 0.0, 3.0), Shape::sphere(0.5));
    let far = add_body_with_shape(&mut tree, "Far", Vec3::new(0.0, 0.0, 6.0), Shape::sphere(0.5));
    let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0));

    let excluded = RayQuery::new(ray).excluding(near);
    assert_eq!(intersect_ray(&tree, root, &excluded).unwrap().collider, far);

    tree.get_as_mut::<PhysicsBody>(near).unwrap().collision.collision_layer = 0b10;
    let masked = RayQuery::new(ray).with_mask(0b01);
    assert_eq!(intersect_ray(&tree, root, &masked).unwrap().collider, far);

    let collision = &mut tree.get_as_mut::<PhysicsBody>(far).unwrap().collision;
    collision.shape_owner_set_disabled(0, true);
    assert!(intersect_ray(&tree, root, &masked).is_none());
    assert_eq!(raycast(&tree, root, &ray, false).unwrap().collider, near);
}

#[test]
fn composed_offset_and_rotation_are_honoured() {
    let mut tree = SceneTree::new();
    let root = tree.root();
    let body = tree
        .add_child(
            root,
            Node::body("Turret", BodyMode::Kinematic).with_transform(
                Transform::from_position_rotation(
                    Vec3::new(0.0, 0.0, 10.0),
                    Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
                ),
            ),
        )
        .unwrap();
    // Local +X of the rotated body points along world -Z.
    tree.add_child(
        body,
        Node::collision_shape("Barrel", Shape::sphere(1.0))
            .with_transform(Transform::from_position(Vec3::new(4.0, 0.0, 0.0))),
    )
    .unwrap();
    add_nested_shapes_to_body(&mut tree, body, body).unwrap();

    let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 20.0));
    let hit = raycast(&tree, root, &ray, false).unwrap();
    assert_relative_eq!(hit.point.z, 5.0, epsilon = 1e-4);
}

#[test]
fn origin_inside_shape_reports_only_with_hit_from_inside() {
    let mut tree = SceneTree::new();
    let root = tree.root();
    let body = add_body_with_shape(&mut tree, "Box", Vec3::ZERO, Shape::cuboid(Vec3::splat(2.0)));
    let ray = Ray::new(Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0));

    assert!(raycast(&tree, root, &ray, false).is_none());

    let hit = intersect_ray(&tree, root, &RayQuery::new(ray).hit_from_inside(true)).unwrap();
    assert_eq!(hit.collider, body);
    assert_eq!(hit.point, Vec3::ZERO);
    assert_eq!(hit.normal, Vec3::ZERO);
}

#[test]
fn stale_query_node_misses() {
    let mut tree = SceneTree::new();
    add_body_with_shape(&mut tree, "Rock", Vec3::new(0.0, 0.0, 2.0), Shape::sphere(1.0));
    let root = tree.root();
    let probe = tree.add_child(root, Node::spatial("Probe")).unwrap();
    tree.remove(probe).unwrap();

    let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 5.0));
    assert!(raycast(&tree, probe, &ray, false).is_none());
    assert!(raycast(&tree, root, &ray, false).is_some());
}
