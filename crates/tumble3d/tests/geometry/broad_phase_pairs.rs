use std::collections::BTreeSet;

use tumble3d::bounding_volume::BoundingVolume;
use tumble3d::math::{Real, Vector};
use tumble3d::pipeline::{
    ColliderBuilder, ColliderFlags, ColliderHandle, CollisionGroups, CollisionWorld, Group,
    WorldSettings,
};

fn random_world(seed: u64, gravity: Vector<Real>) -> CollisionWorld {
    let mut rng = oorandom::Rand32::new(seed);
    let mut world = CollisionWorld::new(WorldSettings {
        gravity,
        ..WorldSettings::default()
    });

    for i in 0..150 {
        let pos = Vector::new(
            rng.rand_float() as Real * 12.0,
            rng.rand_float() as Real * 12.0,
            rng.rand_float() as Real * 12.0,
        );
        let size = 0.2 + rng.rand_float() as Real * 0.6;
        let builder = match i % 3 {
            0 => ColliderBuilder::ball(size),
            1 => ColliderBuilder::cuboid(size, size * 0.5, size),
            _ => ColliderBuilder::capsule_y(size, size * 0.5),
        };
        let mut builder = builder.translation(pos).flags(ColliderFlags::NO_RESPONSE);

        if i % 7 == 0 {
            builder = builder.fixed().flags(ColliderFlags::NO_RESPONSE | ColliderFlags::STATIC);
        }

        if i % 5 == 0 {
            builder =
                builder.collision_groups(CollisionGroups::new(Group::GROUP_2, Group::GROUP_3));
        }

        let _ = world.add_collider(builder);
    }

    world
}

fn brute_force_pairs(world: &CollisionWorld) -> BTreeSet<(ColliderHandle, ColliderHandle)> {
    let prediction = world.settings().contact_prediction;
    let colliders: Vec<_> = world.colliders().iter().collect();
    let mut result = BTreeSet::new();

    for (i, (h1, c1)) in colliders.iter().enumerate() {
        for (h2, c2) in &colliders[i + 1..] {
            if c1.is_static() && c2.is_static() {
                continue;
            }

            if !c1.groups.test(c2.groups) {
                continue;
            }

            let aabb1 = c1.compute_aabb().loosened(prediction);
            let aabb2 = c2.compute_aabb().loosened(prediction);

            if aabb1.intersects(&aabb2) {
                let _ = result.insert((*h1.min(h2), *h1.max(h2)));
            }
        }
    }

    result
}

fn world_pairs(world: &CollisionWorld) -> BTreeSet<(ColliderHandle, ColliderHandle)> {
    let mut result = BTreeSet::new();

    for pair in world.pairs() {
        let key = (pair.first.min(pair.second), pair.first.max(pair.second));
        // Each pair is reported only once.
        assert!(result.insert(key), "Duplicate pair {:?}", key);
    }

    result
}

#[test]
fn tree_pairs_match_brute_force() {
    let mut world = random_world(42, Vector::zeros());

    for _ in 0..3 {
        world.step(1.0 / 60.0);
        let expected = brute_force_pairs(&world);
        assert!(!expected.is_empty());
        assert_eq!(world_pairs(&world), expected);
    }
}

#[test]
fn tree_tracks_moving_colliders() {
    let mut world = random_world(7, Vector::new(0.0, -9.81, 0.0));
    let prediction = world.settings().contact_prediction;

    for _ in 0..30 {
        world.step(1.0 / 60.0);
        world.tree().assert_well_formed();
        assert_eq!(world.tree().leaf_count(), world.colliders().len());

        for (_, collider) in world.colliders().iter() {
            let slot = collider.tree_slot().unwrap();
            let leaf = world.tree().leaf_aabb(slot).unwrap();
            let expected = collider.compute_aabb().loosened(prediction);
            assert_relative_eq!(leaf.mins, expected.mins, epsilon = 1.0e-5);
            assert_relative_eq!(leaf.maxs, expected.maxs, epsilon = 1.0e-5);
        }
    }

    // The static colliders did not fall.
    for (_, collider) in world.colliders().iter() {
        if collider.is_static() {
            assert!(collider.linvel.norm() == 0.0);
        }
    }
}

#[test]
fn removed_colliders_leave_the_tree() {
    let mut world = random_world(3, Vector::zeros());
    world.step(1.0 / 60.0);

    let handles: Vec<_> = world.colliders().iter().map(|(h, _)| h).step_by(2).collect();
    for handle in &handles {
        assert!(world.remove_collider(*handle).is_some());
    }

    world.tree().assert_well_formed();
    assert_eq!(world.tree().leaf_count(), world.colliders().len());

    world.step(1.0 / 60.0);
    let pairs = world_pairs(&world);
    assert!(pairs
        .iter()
        .all(|(h1, h2)| !handles.contains(h1) && !handles.contains(h2)));
    assert_eq!(pairs, brute_force_pairs(&world));
}
