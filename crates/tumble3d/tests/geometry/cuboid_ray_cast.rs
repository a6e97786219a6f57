use tumble3d::bounding_volume::Aabb;
use tumble3d::math::{Isometry, Point, Real, Rotation, Vector};
use tumble3d::pipeline::{ColliderBuilder, ColliderFlags, CollisionGroups, CollisionWorld, Group};
use tumble3d::query::{Ray, RayCast};
use tumble3d::shape::{Cuboid, FeatureId};

#[test]
fn ray_hits_aabb_face() {
    let aabb = Aabb::new(Point::new(-1.0, -1.0, -1.0), Point::new(1.0, 1.0, 1.0));
    let ray = Ray::new(Point::new(-5.0, 0.0, 0.0), Vector::x());
    let hit = aabb
        .cast_local_ray_and_get_normal(&ray, Real::MAX, true)
        .unwrap();

    assert_relative_eq!(hit.time_of_impact, 4.0);
    assert_relative_eq!(ray.point_at(hit.time_of_impact), Point::new(-1.0, 0.0, 0.0));
    assert_relative_eq!(hit.normal, -Vector::x());
}

#[test]
fn world_ray_test_returns_closest_hit() {
    let mut world = CollisionWorld::default();
    let near = world.add_collider(ColliderBuilder::cuboid(1.0, 1.0, 1.0).fixed().friction(0.3));
    let _far = world.add_collider(
        ColliderBuilder::cuboid(1.0, 1.0, 1.0)
            .fixed()
            .translation(Vector::new(5.0, 0.0, 0.0)),
    );

    let hit = world.ray_test(
        &Point::new(-5.0, 0.0, 0.0),
        &Point::new(10.0, 0.0, 0.0),
        CollisionGroups::all(),
    );

    assert!(hit.has_hit);
    assert_eq!(hit.collider, Some(near));
    assert_relative_eq!(hit.distance, 4.0, epsilon = 1.0e-4);
    assert_relative_eq!(hit.point, Point::new(-1.0, 0.0, 0.0), epsilon = 1.0e-4);
    assert_relative_eq!(hit.normal, -Vector::x(), epsilon = 1.0e-4);
    assert_relative_eq!(hit.friction, 0.3);
    assert!(matches!(hit.feature, FeatureId::Face(_)));

    // Too short to reach the box.
    let miss = world.ray_test(
        &Point::new(-5.0, 0.0, 0.0),
        &Point::new(-2.0, 0.0, 0.0),
        CollisionGroups::all(),
    );
    assert!(!miss.has_hit);
    assert_eq!(miss.collider, None);
}

#[test]
fn ray_test_skips_filtered_colliders_and_probes() {
    let mut world = CollisionWorld::default();
    let _probe = world.add_collider(
        ColliderBuilder::ball(1.0)
            .fixed()
            .flags(ColliderFlags::PROBE | ColliderFlags::STATIC),
    );
    let _other_layer = world.add_collider(
        ColliderBuilder::ball(1.0)
            .fixed()
            .translation(Vector::new(3.0, 0.0, 0.0))
            .collision_groups(CollisionGroups::new(Group::GROUP_2, Group::ALL)),
    );
    let target = world.add_collider(
        ColliderBuilder::ball(1.0)
            .fixed()
            .translation(Vector::new(6.0, 0.0, 0.0)),
    );

    let groups = CollisionGroups::new(Group::ALL, Group::GROUP_1);
    let hit = world.ray_test(&Point::new(-5.0, 0.0, 0.0), &Point::new(10.0, 0.0, 0.0), groups);

    assert_eq!(hit.collider, Some(target));
    assert_relative_eq!(hit.distance, 10.0, epsilon = 1.0e-4);
}

#[test]
fn random_rays_hit_rotated_cuboid_surface() {
    let mut rng = oorandom::Rand32::new(42);
    let cuboid = Cuboid::new(Vector::new(1.0, 0.5, 0.75));

    for _ in 0..500 {
        let origin = Point::from(
            Vector::new(
                rng.rand_float() as Real - 0.5,
                rng.rand_float() as Real - 0.5,
                rng.rand_float() as Real - 0.5,
            )
            .try_normalize(1.0e-3)
            .unwrap_or(Vector::x())
                * 5.0,
        );
        let ray = Ray::new(origin, Point::origin() - origin);
        let rotation = Rotation::from_scaled_axis(Vector::new(
            rng.rand_float() as Real * 3.0,
            rng.rand_float() as Real * 3.0,
            rng.rand_float() as Real * 3.0,
        ));
        let position = Isometry::from_parts(Vector::zeros().into(), rotation);

        let hit = cuboid
            .cast_ray_and_get_normal(&position, &ray, Real::MAX, true)
            .unwrap_or_else(|| panic!("Ray {:?} missed the cuboid.", ray));

        // The hit point lies on the surface: on the boundary of the local box.
        let local = position.inverse_transform_point(&ray.point_at(hit.time_of_impact));
        let excess = (local.coords.abs() - cuboid.half_extents).max();
        assert!(excess.abs() < 1.0e-3, "Hit point {:?} is off the surface.", local);
        assert!(hit.normal.dot(&ray.dir) < 0.0);
    }
}
