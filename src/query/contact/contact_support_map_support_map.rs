use crate::math::{Isometry, Point, Real, UnitVector};
use crate::query::epa::Epa;
use crate::query::gjk::{self, DilatedShape};
use crate::query::Contact;
use crate::shape::SupportMap;

/// Contact between support-mapped shapes (`Cuboid`, `ConvexPolyhedron`, etc.)
///
/// GJK decides whether the shapes overlap and EPA computes the penetration depth, normal and
/// contact points. A positive `prediction` also reports shapes closer than that distance, by
/// running both algorithms with the first shape dilated by `prediction`.
pub fn contact_support_map_support_map<G1, G2>(
    pos12: &Isometry<Real>,
    g1: &G1,
    g2: &G2,
    prediction: Real,
) -> Option<Contact>
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    let mut epa = Epa::new();
    contact_support_map_support_map_with_params(pos12, g1, g2, prediction, &mut epa)
}

/// Same as [`contact_support_map_support_map`] but reuses the buffers of `epa`.
pub fn contact_support_map_support_map_with_params<G1, G2>(
    pos12: &Isometry<Real>,
    g1: &G1,
    g2: &G2,
    prediction: Real,
    epa: &mut Epa,
) -> Option<Contact>
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    if prediction > 0.0 {
        let dilated = DilatedShape::new(g1, prediction);
        let (p1, p2_1, n1, depth) = penetration(pos12, &dilated, g2, epa)?;
        // Undo the dilation: the shapes are `depth - prediction` deep.
        let p1 = p1 - *n1 * prediction;
        Some(make_contact(pos12, p1, p2_1, n1, prediction - depth))
    } else {
        let (p1, p2_1, n1, depth) = penetration(pos12, g1, g2, epa)?;
        Some(make_contact(pos12, p1, p2_1, n1, -depth))
    }
}

fn penetration<G1, G2>(
    pos12: &Isometry<Real>,
    g1: &G1,
    g2: &G2,
    epa: &mut Epa,
) -> Option<(Point<Real>, Point<Real>, UnitVector<Real>, Real)>
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    let simplex = gjk::intersect(pos12, g1, g2)?;
    epa.closest_points(pos12, g1, g2, &simplex)
}

fn make_contact(
    pos12: &Isometry<Real>,
    p1: Point<Real>,
    p2_1: Point<Real>,
    normal1: UnitVector<Real>,
    dist: Real,
) -> Contact {
    let point2 = pos12.inverse_transform_point(&p2_1);
    let normal2 = pos12.inverse_transform_unit_vector(&-normal1);
    Contact::new(p1, point2, normal1, normal2, dist)
}

#[cfg(test)]
mod test {
    use super::contact_support_map_support_map;
    use crate::math::{Isometry, Real, Vector};
    use crate::shape::{Ball, Cuboid};

    #[test]
    fn ball_resting_on_cuboid() {
        let cuboid = Cuboid::new(Vector::new(2.0, 0.5, 2.0));
        let ball = Ball::new(0.5);
        let pos12 = Isometry::translation(0.3, 0.95, -0.2);
        let contact = contact_support_map_support_map(&pos12, &cuboid, &ball, 0.0).unwrap();

        assert_relative_eq!(contact.dist, -0.05 as Real, epsilon = 1.0e-3);
        assert_relative_eq!(*contact.normal1, Vector::y(), epsilon = 1.0e-3);
        assert_relative_eq!(*contact.normal2, -Vector::y(), epsilon = 1.0e-3);
        assert_relative_eq!(contact.point1.y, 0.5, epsilon = 1.0e-3);
        assert_relative_eq!(contact.point2.y, -0.5, epsilon = 1.0e-3);
    }

    #[test]
    fn prediction_reports_close_shapes() {
        let cuboid = Cuboid::new(Vector::new(0.5, 0.5, 0.5));
        let pos12 = Isometry::translation(0.0, 1.05, 0.0);

        assert!(contact_support_map_support_map(&pos12, &cuboid, &cuboid, 0.0).is_none());
        let contact = contact_support_map_support_map(&pos12, &cuboid, &cuboid, 0.1).unwrap();
        assert_relative_eq!(contact.dist, 0.05 as Real, epsilon = 1.0e-3);
        assert_relative_eq!(*contact.normal1, Vector::y(), epsilon = 1.0e-3);
    }
}
