use crate::math::{Isometry, Real, Vector};
use crate::query::details::closest_points_segment_segment_with_locations;
use crate::query::Contact;
use crate::shape::Capsule;
use crate::utils::WBasis;
use na::Unit;

/// Contact between two capsules.
///
/// The closest points between the two axis segments are pushed apart by the capsule radii.
pub fn contact_capsule_capsule(
    pos12: &Isometry<Real>,
    capsule1: &Capsule,
    capsule2: &Capsule,
    prediction: Real,
) -> Option<Contact> {
    let seg1 = capsule1.segment;
    let seg2_1 = capsule2.segment.transformed(pos12);
    let (loc1, loc2) = closest_points_segment_segment_with_locations(&seg1, &seg2_1);
    let p1 = seg1.point_at(&loc1);
    let p2_1 = seg2_1.point_at(&loc2);

    let (normal1, axis_dist) = match Unit::try_new_and_get(p2_1 - p1, 0.0) {
        Some(res) => res,
        None => (fallback_normal(pos12, capsule1, &seg2_1.scaled_direction()), 0.0),
    };

    let dist = axis_dist - capsule1.radius - capsule2.radius;

    if dist > prediction {
        return None;
    }

    let point1 = p1 + *normal1 * capsule1.radius;
    let point2 = pos12.inverse_transform_point(&(p2_1 - *normal1 * capsule2.radius));
    let normal2 = pos12.inverse_transform_unit_vector(&-normal1);

    Some(Contact::new(point1, point2, normal1, normal2, dist))
}

/// Normal used when the two axes intersect.
fn fallback_normal(
    pos12: &Isometry<Real>,
    capsule1: &Capsule,
    dir2: &Vector<Real>,
) -> Unit<Vector<Real>> {
    let dir1 = capsule1.segment.scaled_direction();

    Unit::try_new(dir1.cross(dir2), 1.0e-6)
        .or_else(|| Unit::try_new(pos12.translation.vector, 1.0e-6))
        .unwrap_or_else(|| {
            let axis = Unit::try_new(dir1, 0.0).map_or_else(Vector::y, |d| d.into_inner());
            Unit::new_normalize(axis.orthonormal_basis()[0])
        })
}
