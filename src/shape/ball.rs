use crate::math::{Point, Real, UnitVector, Vector};
use crate::shape::SupportMap;

/// A sphere centered at the origin of its local frame.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Ball {
    /// The radius of the sphere.
    pub radius: Real,
}

impl Ball {
    /// Creates a sphere of the given radius.
    #[inline]
    pub fn new(radius: Real) -> Ball {
        Ball { radius }
    }
}

impl SupportMap for Ball {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        // Any boundary point is a support point along a zero direction.
        match dir.try_normalize(0.0) {
            Some(n) => Point::from(n * self.radius),
            None => Point::new(0.0, self.radius, 0.0),
        }
    }

    #[inline]
    fn local_support_point_toward(&self, dir: &UnitVector<Real>) -> Point<Real> {
        Point::from(dir.into_inner() * self.radius)
    }
}
