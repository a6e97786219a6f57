use crate::math::{Isometry, Point, Real, Vector, DIM};
use crate::query::{Contact, ContactKind};
use crate::shape::{Ball, Cuboid};
use na::Unit;

/// Contact between a ball and a cuboid.
///
/// `pos12` is the position of the cuboid relative to the ball. The closest point of the cuboid
/// to the ball center is found by clamping. If the center is inside of the cuboid, the face with
/// the smallest penetration is used instead.
pub fn contact_ball_cuboid(
    pos12: &Isometry<Real>,
    ball: &Ball,
    cuboid: &Cuboid,
    prediction: Real,
) -> Option<Contact> {
    let he = cuboid.half_extents;
    let center2 = pos12.inverse_transform_point(&Point::origin());

    let mut closest = center2;
    let mut num_clamped = 0;

    for i in 0..DIM {
        if closest[i] > he[i] {
            closest[i] = he[i];
            num_clamped += 1;
        } else if closest[i] < -he[i] {
            closest[i] = -he[i];
            num_clamped += 1;
        }
    }

    let (point2, normal2, dist, kind) = if num_clamped > 0 {
        let (normal2, center_dist) = Unit::try_new_and_get(center2 - closest, 0.0)?;
        let dist = center_dist - ball.radius;

        if dist > prediction {
            return None;
        }

        let kind = match num_clamped {
            1 => ContactKind::Face,
            2 => ContactKind::Edge,
            _ => ContactKind::Corner,
        };

        (closest, normal2, dist, kind)
    } else {
        // The center is inside: push it out through the closest face.
        let (axis, gap) = (0..DIM)
            .map(|i| (i, he[i] - center2[i].abs()))
            .min_by(|a, b| a.1.total_cmp(&b.1))?;
        let sign = if center2[axis] < 0.0 { -1.0 } else { 1.0 };

        let mut normal = Vector::zeros();
        normal[axis] = sign;
        let mut point2 = center2;
        point2[axis] = he[axis] * sign;

        (
            point2,
            Unit::new_unchecked(normal),
            -gap - ball.radius,
            ContactKind::Face,
        )
    };

    let normal1 = pos12 * -normal2;
    let point1 = Point::from(*normal1 * ball.radius);

    Some(Contact::new(point1, point2, normal1, normal2, dist).with_kind(kind))
}

#[cfg(test)]
mod test {
    use super::contact_ball_cuboid;
    use crate::math::{Isometry, Point, Real, Vector};
    use crate::query::ContactKind;
    use crate::shape::{Ball, Cuboid};

    #[test]
    fn ball_resting_on_face() {
        let ball = Ball::new(0.5);
        let cuboid = Cuboid::new(Vector::new(1.0, 1.0, 1.0));
        // Ball center at y = 1.4 above the cuboid center.
        let pos12 = Isometry::translation(0.2, -1.4, 0.0);
        let contact = contact_ball_cuboid(&pos12, &ball, &cuboid, 0.0).unwrap();

        assert_eq!(contact.kind, ContactKind::Face);
        assert_relative_eq!(contact.dist, -0.1 as Real, epsilon = 1.0e-6);
        assert_relative_eq!(*contact.normal2, Vector::y(), epsilon = 1.0e-6);
        assert_relative_eq!(*contact.normal1, -Vector::y(), epsilon = 1.0e-6);
        assert_relative_eq!(contact.point2, Point::new(-0.2, 1.0, 0.0), epsilon = 1.0e-6);
    }

    #[test]
    fn ball_near_corner() {
        let ball = Ball::new(0.5);
        let cuboid = Cuboid::new(Vector::new(1.0, 1.0, 1.0));
        let pos12 = Isometry::translation(-1.2, -1.2, -1.2);
        let contact = contact_ball_cuboid(&pos12, &ball, &cuboid, 0.0).unwrap();

        assert_eq!(contact.kind, ContactKind::Corner);
        let expected = (3.0 as Real * 0.04).sqrt() - 0.5;
        assert_relative_eq!(contact.dist, expected, epsilon = 1.0e-5);
    }

    #[test]
    fn center_inside_uses_shallowest_face() {
        let ball = Ball::new(0.25);
        let cuboid = Cuboid::new(Vector::new(2.0, 1.0, 2.0));
        // Center at (0.5, 0.8, 0.0) in the cuboid frame.
        let pos12 = Isometry::translation(-0.5, -0.8, 0.0);
        let contact = contact_ball_cuboid(&pos12, &ball, &cuboid, 0.0).unwrap();

        assert_relative_eq!(*contact.normal2, Vector::y(), epsilon = 1.0e-6);
        assert_relative_eq!(contact.dist, -0.45 as Real, epsilon = 1.0e-6);
    }

    #[test]
    fn separated() {
        let ball = Ball::new(0.5);
        let cuboid = Cuboid::new(Vector::new(1.0, 1.0, 1.0));
        let pos12 = Isometry::translation(0.0, -2.0, 0.0);
        assert!(contact_ball_cuboid(&pos12, &ball, &cuboid, 0.0).is_none());
    }
}
