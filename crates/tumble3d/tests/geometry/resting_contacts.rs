use tumble3d::math::{Point, Real, Vector};
use tumble3d::pipeline::{
    ColliderBuilder, ColliderFlags, CollisionWorld, DebugColor, DebugDrawFlags, DebugDrawSink,
    WorldSettings,
};

const DT: Real = 1.0 / 60.0;

#[test]
fn overlapping_spheres_contact() {
    let mut world = CollisionWorld::new(WorldSettings {
        gravity: Vector::zeros(),
        ..WorldSettings::default()
    });
    let a = world.add_collider(ColliderBuilder::ball(0.5).flags(ColliderFlags::NO_RESPONSE));
    let b = world.add_collider(
        ColliderBuilder::ball(0.5)
            .translation(Vector::new(0.9, 0.0, 0.0))
            .flags(ColliderFlags::NO_RESPONSE),
    );
    world.step(DT);

    let manifolds = world.manifolds();
    assert_eq!(manifolds.len(), 1);
    let manifold = &manifolds[0];
    assert_eq!((manifold.collider_a, manifold.collider_b), (a, b));
    assert_eq!(manifold.points.len(), 1);

    let pt = &manifold.points[0];
    assert_relative_eq!(pt.depth, 0.1, epsilon = 1.0e-4);
    assert_relative_eq!(*pt.normal_a, Vector::x(), epsilon = 1.0e-4);
    assert_relative_eq!(*pt.normal_b, -Vector::x(), epsilon = 1.0e-4);
    assert_relative_eq!(manifold.max_depth, 0.1, epsilon = 1.0e-4);

    // Contacts without response are reported but never resolved.
    assert_eq!(world.collider(a).unwrap().linvel, Vector::zeros());
}

#[test]
fn resting_sphere_does_not_sink() {
    let mut world = CollisionWorld::default();
    let _ground = world.add_collider(ColliderBuilder::cuboid(10.0, 0.5, 10.0).fixed());
    let ball = world.add_collider(
        ColliderBuilder::ball(0.5).translation(Vector::new(0.0, 1.2, 0.0)),
    );

    for _ in 0..90 {
        world.step(DT);

        for manifold in world.contacts_with(ball) {
            let a = world.collider(manifold.collider_a).unwrap();
            let b = world.collider(manifold.collider_b).unwrap();

            for pt in &manifold.points {
                let n = pt.solver_normal();
                let vn = (b.velocity_at_point(&pt.world_b) - a.velocity_at_point(&pt.world_a))
                    .dot(&n);
                assert!(vn >= -1.0e-3, "Approaching contact after the solver: vn = {}", vn);
            }
        }
    }

    let ball = world.collider(ball).unwrap();
    let height = ball.position().translation.vector.y;
    assert!((height - 1.0).abs() < 0.02, "height = {}", height);
    assert!(ball.linvel.norm() < 0.05, "linvel = {}", ball.linvel);
}

#[test]
fn resting_box_stays_still() {
    let mut world = CollisionWorld::default();
    let _ground = world.add_collider(ColliderBuilder::cuboid(10.0, 0.5, 10.0).fixed());
    let cube = world.add_collider(
        ColliderBuilder::cuboid(0.5, 0.5, 0.5)
            .translation(Vector::new(0.0, 1.0, 0.0))
            .mass(2.0),
    );

    for _ in 0..60 {
        world.step(DT);
    }

    let collider = world.collider(cube).unwrap();
    let height = collider.position().translation.vector.y;
    assert!(collider.linvel.y.abs() < 0.05, "linvel = {}", collider.linvel);
    assert!(collider.angvel.norm() < 0.1, "angvel = {}", collider.angvel);
    assert!(height > 0.97 && height < 1.01, "height = {}", height);

    let max_depth = world
        .contacts_with(cube)
        .map(|m| m.max_depth)
        .fold(0.0, Real::max);
    assert!(max_depth < 0.02, "depth = {}", max_depth);
}

#[test]
fn stacked_boxes_settle() {
    let mut world = CollisionWorld::default();
    let _ground = world.add_collider(ColliderBuilder::cuboid(10.0, 0.5, 10.0).fixed());
    let boxes: Vec<_> = (0..3)
        .map(|i| {
            world.add_collider(
                ColliderBuilder::cuboid(0.5, 0.5, 0.5)
                    .translation(Vector::new(0.0, 1.0 + i as Real * 1.0, 0.0)),
            )
        })
        .collect();

    for _ in 0..120 {
        world.step(DT);
    }

    for (i, handle) in boxes.iter().enumerate() {
        let collider = world.collider(*handle).unwrap();
        let expected = 1.0 + i as Real;
        let height = collider.position().translation.vector.y;
        assert!((height - expected).abs() < 0.05, "box {}: height = {}", i, height);
        assert!(collider.linvel.norm() < 0.1, "box {}: linvel = {}", i, collider.linvel);
    }
}

#[test]
fn falling_ball_lands_on_ground() {
    let mut world = CollisionWorld::default();
    let ground = world.add_collider(ColliderBuilder::cuboid(10.0, 0.5, 10.0).fixed());
    let ball = world.add_collider(
        ColliderBuilder::ball(0.5).translation(Vector::new(0.0, 3.0, 0.0)),
    );

    let mut steps = 0;
    for _ in 0..30 {
        steps += world.step_fixed(0.05);
    }
    assert!(steps >= 85, "steps = {}", steps);

    let collider = world.collider(ball).unwrap();
    let height = collider.position().translation.vector.y;
    assert!(height > 0.95 && height < 1.05, "height = {}", height);
    assert!(world.contacts_with(ground).count() <= 1);
    assert_eq!(world.collider(ground).unwrap().position().translation.vector, Vector::zeros());
}

#[derive(Default)]
struct Recorder {
    lines: usize,
    contacts: usize,
}

impl DebugDrawSink for Recorder {
    fn draw_line(&mut self, _: &Point<Real>, _: &Point<Real>, _: DebugColor) {
        self.lines += 1;
    }

    fn draw_contact(&mut self, _: &Point<Real>, _: &Vector<Real>, _: Real) {
        self.contacts += 1;
    }
}

#[test]
fn debug_draw_visits_requested_primitives() {
    let mut world = CollisionWorld::default();
    let _ground = world.add_collider(ColliderBuilder::cuboid(10.0, 0.5, 10.0).fixed());
    let _ball = world.add_collider(
        ColliderBuilder::ball(0.5).translation(Vector::new(0.0, 0.95, 0.0)),
    );
    world.step(DT);

    let mut sink = Recorder::default();
    world.debug_draw(&mut sink, DebugDrawFlags::COLLIDER_AABBS);
    assert_eq!(sink.lines, 2 * 12);
    assert_eq!(sink.contacts, 0);

    let mut sink = Recorder::default();
    world.debug_draw(&mut sink, DebugDrawFlags::ALL);
    // Two collider AABBs, plus two leaves and one branch in the tree.
    assert_eq!(sink.lines, 5 * 12);
    assert!(sink.contacts >= 1);
}
