use crate::math::{Isometry, Point, Real, Vector};
use crate::query::Contact;
use crate::shape::{Ball, Capsule};
use crate::utils::WBasis;
use na::Unit;

/// Contact between a ball and a capsule.
///
/// `pos12` is the position of the capsule relative to the ball.
pub fn contact_ball_capsule(
    pos12: &Isometry<Real>,
    ball: &Ball,
    capsule: &Capsule,
    prediction: Real,
) -> Option<Contact> {
    let center2 = pos12.inverse_transform_point(&Point::origin());
    let (proj, _) = capsule
        .segment
        .project_local_point_and_get_location(&center2);

    let (normal2, center_dist) = match Unit::try_new_and_get(center2 - proj, 0.0) {
        Some(res) => res,
        None => {
            // The ball center lies on the capsule axis: any direction orthogonal to it works.
            let axis = capsule
                .segment
                .direction()
                .map(|d| d.into_inner())
                .unwrap_or_else(Vector::y);
            (Unit::new_normalize(axis.orthonormal_basis()[0]), 0.0)
        }
    };

    let dist = center_dist - ball.radius - capsule.radius;

    if dist > prediction {
        return None;
    }

    let normal1 = pos12 * -normal2;
    let point1 = Point::from(*normal1 * ball.radius);
    let point2 = proj + *normal2 * capsule.radius;

    Some(Contact::new(point1, point2, normal1, normal2, dist))
}
