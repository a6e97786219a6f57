use crate::math::{Isometry, Point, Real, Vector};
use crate::query::Contact;
use crate::shape::Ball;

/// Contact between two balls, the second one placed at `pos12` relative to the first.
///
/// Concentric balls are separated along `+x` of the first ball.
#[inline]
pub fn contact_ball_ball(
    pos12: &Isometry<Real>,
    b1: &Ball,
    b2: &Ball,
    prediction: Real,
) -> Option<Contact> {
    let center2 = pos12.translation.vector;
    let center_dist = center2.norm();
    let dist = center_dist - b1.radius - b2.radius;

    if dist > prediction {
        return None;
    }

    let normal1 = center2
        .try_normalize(0.0)
        .map_or_else(Vector::x_axis, na::Unit::new_unchecked);
    let normal2 = pos12.inverse_transform_unit_vector(&-normal1);

    Some(Contact::new(
        Point::from(normal1.into_inner() * b1.radius),
        Point::from(normal2.into_inner() * b2.radius),
        normal1,
        normal2,
        dist,
    ))
}
