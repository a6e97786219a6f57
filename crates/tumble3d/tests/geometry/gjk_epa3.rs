use tumble3d::math::{Isometry, Real, Rotation, Vector};
use tumble3d::query::details::contact_support_map_support_map;
use tumble3d::query::epa::Epa;
use tumble3d::query::gjk;
use tumble3d::shape::{Ball, Capsule, Cuboid};

fn random_vector(rng: &mut oorandom::Rand32, scale: Real) -> Vector<Real> {
    Vector::new(
        (rng.rand_float() as Real - 0.5) * scale,
        (rng.rand_float() as Real - 0.5) * scale,
        (rng.rand_float() as Real - 0.5) * scale,
    )
}

fn random_cuboid(rng: &mut oorandom::Rand32) -> Cuboid {
    Cuboid::new(Vector::new(
        0.2 + rng.rand_float() as Real,
        0.2 + rng.rand_float() as Real,
        0.2 + rng.rand_float() as Real,
    ))
}

/// The largest separation of two boxes along the 15 separating axis candidates.
///
/// Negative iff the boxes overlap.
fn sat_separation(pos12: &Isometry<Real>, c1: &Cuboid, c2: &Cuboid) -> Real {
    let axes1 = [Vector::x(), Vector::y(), Vector::z()];
    let axes2 = axes1.map(|a| pos12.rotation * a);
    let mut candidates = Vec::with_capacity(15);
    candidates.extend_from_slice(&axes1);
    candidates.extend_from_slice(&axes2);

    for a1 in &axes1 {
        for a2 in &axes2 {
            if let Some(axis) = a1.cross(a2).try_normalize(1.0e-4) {
                candidates.push(axis);
            }
        }
    }

    let t = pos12.translation.vector;
    candidates
        .iter()
        .map(|axis| {
            let r1: Real = (0..3)
                .map(|i| c1.half_extents[i] * axes1[i].dot(axis).abs())
                .sum();
            let r2: Real = (0..3)
                .map(|i| c2.half_extents[i] * axes2[i].dot(axis).abs())
                .sum();
            t.dot(axis).abs() - r1 - r2
        })
        .fold(Real::MIN, Real::max)
}

#[test]
fn gjk_agrees_with_sat_on_boxes() {
    let mut rng = oorandom::Rand32::new(1234);
    let mut overlaps = 0;
    let mut tested = 0;

    for _ in 0..2000 {
        let c1 = random_cuboid(&mut rng);
        let c2 = random_cuboid(&mut rng);
        let pos12 = Isometry::from_parts(
            random_vector(&mut rng, 4.0).into(),
            Rotation::from_scaled_axis(random_vector(&mut rng, 6.0)),
        );

        let separation = sat_separation(&pos12, &c1, &c2);
        if separation.abs() < 1.0e-2 {
            // Touching boxes may be reported either way.
            continue;
        }

        tested += 1;
        let sat = separation < 0.0;
        let overlap = gjk::intersect(&pos12, &c1, &c2).is_some();
        assert_eq!(overlap, sat, "separation: {}, pos12: {:?}", separation, pos12);

        if sat {
            overlaps += 1;
        }
    }

    assert!(tested > 1500);
    assert!(overlaps > 100 && overlaps < tested - 100);
}

#[test]
fn epa_points_are_separated_by_the_depth() {
    let mut rng = oorandom::Rand32::new(99);
    let mut epa = Epa::new();
    let mut checked = 0;

    for _ in 0..500 {
        let c1 = random_cuboid(&mut rng);
        let c2 = random_cuboid(&mut rng);
        let pos12 = Isometry::from_parts(
            random_vector(&mut rng, 2.0).into(),
            Rotation::from_scaled_axis(random_vector(&mut rng, 6.0)),
        );

        let Some(simplex) = gjk::intersect(&pos12, &c1, &c2) else {
            continue;
        };
        let Some((p1, p2, n, depth)) = epa.closest_points(&pos12, &c1, &c2, &simplex) else {
            continue;
        };

        checked += 1;
        assert!(depth >= 0.0);
        assert_relative_eq!((p1 - p2).dot(&n), depth, epsilon = 1.0e-3);
        // The depth never exceeds the SAT estimate of the penetration.
        let sat_depth = -sat_separation(&pos12, &c1, &c2);
        assert!(depth <= sat_depth + 1.0e-2, "EPA {} vs SAT {}", depth, sat_depth);
    }

    assert!(checked > 100);
}

#[test]
fn cuboid_cuboid_epa_depth() {
    let c = Cuboid::new(Vector::new(2.0, 1.0, 1.0));
    let pos12 = Isometry::translation(-3.5, 0.0, 0.0);
    let contact = contact_support_map_support_map(&pos12, &c, &c, 0.0).unwrap();

    assert_relative_eq!(contact.dist, -0.5, epsilon = 1.0e-4);
    assert_relative_eq!(*contact.normal1, -Vector::x(), epsilon = 1.0e-4);
    assert_relative_eq!(*contact.normal2, Vector::x(), epsilon = 1.0e-4);

    let pos12 = Isometry::translation(0.0, -0.2, 0.0);
    let contact = contact_support_map_support_map(&pos12, &c, &c, 0.0).unwrap();
    assert_relative_eq!(contact.dist, -1.8, epsilon = 1.0e-4);
    assert_relative_eq!(*contact.normal1, -Vector::y(), epsilon = 1.0e-4);
}

#[test]
fn contact_normals_are_opposite() {
    let mut rng = oorandom::Rand32::new(7);
    let ball = Ball::new(0.6);
    let capsule = Capsule::new_y(0.5, 0.3);
    let cuboid = Cuboid::new(Vector::new(0.5, 0.7, 0.4));

    for _ in 0..300 {
        let pos12 = Isometry::from_parts(
            random_vector(&mut rng, 1.5).into(),
            Rotation::from_scaled_axis(random_vector(&mut rng, 6.0)),
        );

        let contacts = [
            contact_support_map_support_map(&pos12, &ball, &cuboid, 0.0),
            contact_support_map_support_map(&pos12, &capsule, &cuboid, 0.0),
            contact_support_map_support_map(&pos12, &cuboid, &capsule, 0.0),
        ];

        for contact in contacts.into_iter().flatten() {
            assert!(contact.dist <= 1.0e-4);
            // normal2 is expressed in the frame of the second shape.
            let normal2_in_1 = pos12 * contact.normal2;
            assert_relative_eq!(*normal2_in_1, -*contact.normal1, epsilon = 1.0e-3);
        }
    }
}
