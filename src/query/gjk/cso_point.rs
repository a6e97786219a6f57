use crate::math::{Isometry, Point, Real, Vector};
use crate::shape::SupportMap;

/// A point of the Minkowski difference `g1 - pos12 * g2`.
///
/// The support points of both shapes it was built from are kept, so a point found with
/// barycentric coordinates on a simplex or polytope face maps back to a witness point on each
/// shape. `point` starts as `orig1 - orig2` but may later be translated on its own.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CSOPoint {
    /// The point of the Minkowski difference.
    pub point: Point<Real>,
    /// The support point of the first shape, in its local-space.
    pub orig1: Point<Real>,
    /// The support point of the second shape, in the local-space of the first shape.
    pub orig2: Point<Real>,
}

impl CSOPoint {
    /// A point built from a single support point, the second shape being the origin.
    pub fn single_point(point: Point<Real>) -> Self {
        CSOPoint {
            point,
            orig1: point,
            orig2: Point::origin(),
        }
    }

    /// The support point of `g1 - pos12 * g2` along `dir`.
    ///
    /// `dir` is expressed in the local-space of `g1` and does not need to be normalized.
    pub fn from_shapes<G1, G2>(pos12: &Isometry<Real>, g1: &G1, g2: &G2, dir: &Vector<Real>) -> Self
    where
        G1: ?Sized + SupportMap,
        G2: ?Sized + SupportMap,
    {
        let orig1 = g1.local_support_point(dir);
        let orig2 = g2.support_point(pos12, &-dir);

        CSOPoint {
            point: Point::from(orig1 - orig2),
            orig1,
            orig2,
        }
    }

    /// This point with `point` moved by `shift`, the witness points being unchanged.
    #[must_use]
    pub fn translate(&self, shift: &Vector<Real>) -> Self {
        let mut result = *self;
        result.translate_mut(shift);
        result
    }

    /// Moves `point` by `shift`, leaving the witness points unchanged.
    pub fn translate_mut(&mut self, shift: &Vector<Real>) {
        self.point += shift;
    }
}
