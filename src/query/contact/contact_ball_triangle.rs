use crate::math::{Isometry, Point, Real};
use crate::query::{Contact, ContactKind};
use crate::shape::{Ball, Triangle, TrianglePointLocation};
use na::Unit;

/// Contact between a ball and a two-sided triangle.
///
/// `pos12` is the position of the triangle's frame relative to the ball. Degenerate triangles
/// yield no contact.
pub fn contact_ball_triangle(
    pos12: &Isometry<Real>,
    ball: &Ball,
    triangle: &Triangle,
    prediction: Real,
) -> Option<Contact> {
    let face_normal = triangle.normal().filter(|_| !triangle.is_degenerate())?;
    let center2 = pos12.inverse_transform_point(&Point::origin());
    let (proj, location) = triangle.project_local_point_and_get_location(&center2);

    let (normal2, center_dist) = match Unit::try_new_and_get(center2 - proj, 0.0) {
        Some(res) => res,
        None => (face_normal, 0.0),
    };

    let dist = center_dist - ball.radius;

    if dist > prediction {
        return None;
    }

    let kind = match location {
        TrianglePointLocation::OnFace(_) => ContactKind::Face,
        TrianglePointLocation::OnEdge(..) => ContactKind::Edge,
        TrianglePointLocation::OnVertex(_) => ContactKind::Corner,
    };

    let normal1 = pos12 * -normal2;
    let point1 = Point::from(*normal1 * ball.radius);

    Some(Contact::new(point1, proj, normal1, normal2, dist).with_kind(kind))
}
