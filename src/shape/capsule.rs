use crate::math::{Isometry, Point, Real, UnitVector, Vector};
use crate::shape::{Segment, SupportMap};

/// The set of points within `radius` of a segment.
///
/// Capsules built with [`Capsule::new_y`] stand along their local `y` axis, which is how the
/// swept capsules of scene queries and the capsule colliders are oriented.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Capsule {
    /// The inner segment joining the centers of both hemispheres.
    pub segment: Segment,
    /// The radius of the hemispheres and cylinder.
    pub radius: Real,
}

impl Capsule {
    /// A capsule with its inner segment going from `-half_height` to `half_height` along `x`.
    pub fn new_x(half_height: Real, radius: Real) -> Self {
        Self::along(Vector::x() * half_height, radius)
    }

    /// A capsule with its inner segment going from `-half_height` to `half_height` along `y`.
    pub fn new_y(half_height: Real, radius: Real) -> Self {
        Self::along(Vector::y() * half_height, radius)
    }

    /// A capsule with its inner segment going from `-half_height` to `half_height` along `z`.
    pub fn new_z(half_height: Real, radius: Real) -> Self {
        Self::along(Vector::z() * half_height, radius)
    }

    fn along(half_axis: Vector<Real>, radius: Real) -> Self {
        Self::new(Point::from(-half_axis), Point::from(half_axis), radius)
    }

    /// A capsule around the segment `[a, b]`.
    pub fn new(a: Point<Real>, b: Point<Real>, radius: Real) -> Self {
        Self {
            segment: Segment::new(a, b),
            radius,
        }
    }

    /// Half the length of the inner segment. The hemispheres are not included.
    pub fn half_height(&self) -> Real {
        self.segment.length() * 0.5
    }

    /// The midpoint of the inner segment.
    pub fn center(&self) -> Point<Real> {
        self.segment.a + (self.segment.b - self.segment.a) * 0.5
    }

    /// This capsule with its inner segment moved by `pos`.
    pub fn transform_by(&self, pos: &Isometry<Real>) -> Self {
        Self::new(pos * self.segment.a, pos * self.segment.b, self.radius)
    }
}

impl SupportMap for Capsule {
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        let end = self.segment.local_support_point(dir);

        match dir.try_normalize(0.0) {
            Some(n) => end + n * self.radius,
            None => end,
        }
    }

    fn local_support_point_toward(&self, dir: &UnitVector<Real>) -> Point<Real> {
        self.segment.local_support_point(dir) + dir.into_inner() * self.radius
    }
}

#[cfg(test)]
mod test {
    use super::Capsule;
    use crate::math::{Isometry, Point, Vector};
    use crate::shape::SupportMap;

    #[test]
    fn support_points_lie_on_hemispheres() {
        let capsule = Capsule::new_y(1.0, 0.5);
        assert_relative_eq!(capsule.half_height(), 1.0);

        let top = capsule.local_support_point(&Vector::new(0.0, 3.0, 0.0));
        assert_relative_eq!(top, Point::new(0.0, 1.5, 0.0));

        let side = capsule.local_support_point(&Vector::new(1.0, -1.0, 0.0));
        let expected = Point::new(0.0, -1.0, 0.0) + Vector::new(1.0, -1.0, 0.0).normalize() * 0.5;
        assert_relative_eq!(side, expected, epsilon = 1.0e-6);
    }

    #[test]
    fn transformed_capsule_keeps_its_center() {
        let capsule = Capsule::new_x(1.0, 0.2);
        let pos = Isometry::new(Vector::new(1.0, 2.0, 3.0), Vector::new(0.3, 0.0, 1.2));
        let moved = capsule.transform_by(&pos);

        assert_relative_eq!(moved.center(), Point::new(1.0, 2.0, 3.0), epsilon = 1.0e-6);
        assert_relative_eq!(moved.half_height(), 1.0, epsilon = 1.0e-6);
    }
}
