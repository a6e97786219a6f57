use tumble3d::math::{Point, Real, Rotation, Vector};
use tumble3d::pipeline::{ColliderBuilder, ColliderFlags, CollisionGroups, CollisionWorld, Group};
use tumble3d::shape::{SharedShape, TriMesh};

fn world_with_ground() -> CollisionWorld {
    let mut world = CollisionWorld::default();
    let _ = world.add_collider(
        ColliderBuilder::cuboid(10.0, 0.5, 10.0)
            .fixed()
            .friction(0.8),
    );
    world
}

#[test]
fn sphere_sweep_lands_on_ground() {
    let world = world_with_ground();
    let hit = world.sphere_sweep(
        &Point::new(0.0, 5.0, 0.0),
        &Point::new(0.0, -5.0, 0.0),
        0.5,
        CollisionGroups::all(),
    );

    assert!(hit.has_hit);
    assert_relative_eq!(hit.distance, 4.0, epsilon = 1.0e-3);
    assert_relative_eq!(hit.normal, Vector::y(), epsilon = 1.0e-3);
    assert_relative_eq!(hit.point, Point::new(0.0, 0.5, 0.0), epsilon = 1.0e-3);
    assert_relative_eq!(hit.position, Point::new(0.0, 1.0, 0.0), epsilon = 1.0e-3);
    assert_relative_eq!(hit.friction, 0.8);
}

#[test]
fn capsule_sweep_lands_on_ground() {
    let world = world_with_ground();
    let hit = world.capsule_sweep(
        &Point::new(1.0, 5.0, -2.0),
        &Point::new(1.0, -5.0, -2.0),
        0.5,
        0.25,
        &Rotation::identity(),
        CollisionGroups::all(),
    );

    assert!(hit.has_hit);
    assert_relative_eq!(hit.distance, 3.75, epsilon = 1.0e-3);
    assert_relative_eq!(hit.normal, Vector::y(), epsilon = 1.0e-3);
    assert_relative_eq!(hit.point.y, 0.5, epsilon = 1.0e-3);
    assert_relative_eq!(hit.position, Point::new(1.0, 1.25, -2.0), epsilon = 1.0e-3);

    // Lying on its side, the capsule only needs its radius of clearance.
    let lying = Rotation::from_axis_angle(&Vector::z_axis(), std::f32::consts::FRAC_PI_2 as Real);
    let hit = world.capsule_sweep(
        &Point::new(1.0, 5.0, -2.0),
        &Point::new(1.0, -5.0, -2.0),
        0.5,
        0.25,
        &lying,
        CollisionGroups::all(),
    );

    assert!(hit.has_hit);
    assert_relative_eq!(hit.distance, 4.25, epsilon = 1.0e-3);
    assert_relative_eq!(hit.position, Point::new(1.0, 0.75, -2.0), epsilon = 1.0e-3);
}

#[test]
fn sweeps_that_fall_short_miss() {
    let world = world_with_ground();
    let hit = world.sphere_sweep(
        &Point::new(0.0, 5.0, 0.0),
        &Point::new(0.0, 2.0, 0.0),
        0.5,
        CollisionGroups::all(),
    );

    assert!(!hit.has_hit);
    assert_eq!(hit.collider, None);
    assert_eq!(hit.position, Point::origin());

    // Passing beside the ground.
    let hit = world.sphere_sweep(
        &Point::new(12.0, 5.0, 0.0),
        &Point::new(12.0, -5.0, 0.0),
        0.5,
        CollisionGroups::all(),
    );
    assert!(!hit.has_hit);
}

#[test]
fn sweeps_skip_probes_and_filtered_groups() {
    let mut world = world_with_ground();
    let _probe = world.add_collider(
        ColliderBuilder::ball(1.0)
            .fixed()
            .flags(ColliderFlags::PROBE)
            .translation(Vector::new(0.0, 3.0, 0.0)),
    );
    let platform = world.add_collider(
        ColliderBuilder::cuboid(1.0, 0.1, 1.0)
            .fixed()
            .translation(Vector::new(0.0, 2.0, 0.0))
            .collision_groups(CollisionGroups::new(Group::GROUP_2, Group::ALL)),
    );

    let from = Point::new(0.0, 5.0, 0.0);
    let to = Point::new(0.0, -5.0, 0.0);

    // The platform is hit first when its group is accepted.
    let hit = world.sphere_sweep(&from, &to, 0.5, CollisionGroups::all());
    assert_eq!(hit.collider, Some(platform));
    assert_relative_eq!(hit.distance, 2.4, epsilon = 1.0e-3);

    // Otherwise the sweep goes through it and lands on the ground.
    let groups = CollisionGroups::new(Group::ALL, Group::GROUP_1);
    let hit = world.sphere_sweep(&from, &to, 0.5, groups);
    assert!(hit.has_hit);
    assert_ne!(hit.collider, Some(platform));
    assert_relative_eq!(hit.distance, 4.0, epsilon = 1.0e-3);
}

#[test]
fn sphere_sweep_against_mesh() {
    let mut world = CollisionWorld::default();
    let vertices = vec![
        Point::new(-5.0, 0.0, -5.0),
        Point::new(5.0, 0.0, -5.0),
        Point::new(5.0, 0.0, 5.0),
        Point::new(-5.0, 0.0, 5.0),
    ];
    let mesh = TriMesh::new(vertices, vec![[0, 2, 1], [0, 3, 2]]).unwrap();
    let ground = world.add_collider(ColliderBuilder::new(SharedShape::new(mesh)).fixed());

    let hit = world.sphere_sweep(
        &Point::new(1.0, 3.0, 2.0),
        &Point::new(1.0, -3.0, 2.0),
        0.25,
        CollisionGroups::all(),
    );

    assert_eq!(hit.collider, Some(ground));
    assert_relative_eq!(hit.distance, 2.75, epsilon = 1.0e-3);
    assert_relative_eq!(hit.normal, Vector::y(), epsilon = 1.0e-3);
    assert_relative_eq!(hit.point, Point::new(1.0, 0.0, 2.0), epsilon = 1.0e-3);
    assert_relative_eq!(hit.position, Point::new(1.0, 0.25, 2.0), epsilon = 1.0e-3);
}
