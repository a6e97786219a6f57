use tumble3d::math::{Point, Real, Rotation, Vector};
use tumble3d::pipeline::{ColliderBuilder, ColliderHandle, CollisionWorld};
use tumble3d::shape::SharedShape;

const DT: Real = 1.0 / 60.0;

/// A flat square mesh at `y = 0` made of two triangles sharing the diagonal `x = z`.
fn world_with_mesh_ground() -> (CollisionWorld, ColliderHandle) {
    let mut world = CollisionWorld::default();
    let vertices = vec![
        Point::new(-5.0, 0.0, -5.0),
        Point::new(5.0, 0.0, -5.0),
        Point::new(5.0, 0.0, 5.0),
        Point::new(-5.0, 0.0, 5.0),
    ];
    let shape = SharedShape::trimesh(vertices, vec![[0, 2, 1], [0, 3, 2]]).unwrap();
    let ground = world.add_collider(ColliderBuilder::new(shape).fixed());
    (world, ground)
}

fn run_and_check_normals(world: &mut CollisionWorld, body: ColliderHandle, steps: usize) -> usize {
    let mut contact_steps = 0;

    for _ in 0..steps {
        world.step(DT);
        let mut touching = false;

        for manifold in world.contacts_with(body) {
            assert_eq!(manifold.collider_a, body);

            for pt in &manifold.points {
                touching = true;
                assert!(
                    pt.normal_b.y > 0.9,
                    "Mesh contact normal {:?} does not point up.",
                    pt.normal_b
                );
            }
        }

        if touching {
            contact_steps += 1;
        }
    }

    contact_steps
}

#[test]
fn capsule_rests_on_mesh() {
    let (mut world, _ground) = world_with_mesh_ground();
    let lying = Rotation::from_axis_angle(&Vector::z_axis(), std::f32::consts::FRAC_PI_2 as Real);
    let capsule = world.add_collider(
        ColliderBuilder::capsule_y(0.5, 0.25)
            .translation(Vector::new(0.3, 0.4, -0.2))
            .rotation(lying),
    );

    let contact_steps = run_and_check_normals(&mut world, capsule, 120);
    assert!(contact_steps > 60);

    let capsule = world.collider(capsule).unwrap();
    let height = capsule.position().translation.vector.y;
    assert!((height - 0.25).abs() < 0.03, "height = {}", height);
    assert!(capsule.linvel.norm() < 0.1, "linvel = {}", capsule.linvel);
}

#[test]
fn box_over_the_shared_edge_only_sees_face_normals() {
    let (mut world, _ground) = world_with_mesh_ground();
    // Centered on the diagonal shared by both triangles.
    let cube = world.add_collider(
        ColliderBuilder::cuboid(0.5, 0.5, 0.5).translation(Vector::new(1.0, 0.55, 1.0)),
    );

    let contact_steps = run_and_check_normals(&mut world, cube, 90);
    assert!(contact_steps > 45);

    let cube = world.collider(cube).unwrap();
    let height = cube.position().translation.vector.y;
    assert!((height - 0.5).abs() < 0.03, "height = {}", height);
}

#[test]
fn ball_rolls_across_the_shared_edge() {
    let (mut world, _ground) = world_with_mesh_ground();
    let ball = world.add_collider(
        ColliderBuilder::ball(0.3)
            .translation(Vector::new(-1.0, 0.299, 1.0))
            .linvel(Vector::new(2.0, 0.0, -2.0)),
    );

    let _ = run_and_check_normals(&mut world, ball, 60);

    // The ball crossed the diagonal without being kicked upward.
    let ball = world.collider(ball).unwrap();
    assert!(ball.position().translation.vector.x > 0.0);
    assert!(ball.position().translation.vector.y < 0.4);
}
