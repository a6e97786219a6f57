//! Convex shapes described by their support function.

use crate::math::{Isometry, Point, Real, UnitVector, Vector};
use na::Unit;

/// A convex shape described by its support function.
///
/// The support function maps a direction to a point of the shape that is the furthest along
/// that direction. GJK, EPA and the GJK-based ray and sweep casts only ever query shapes
/// through it.
pub trait SupportMap {
    /// The support point along `dir`, in the local frame. `dir` may have any non-negative
    /// length; for a zero direction any boundary point is acceptable.
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real>;

    /// The support point along the unit direction `dir`, in the local frame.
    fn local_support_point_toward(&self, dir: &UnitVector<Real>) -> Point<Real> {
        self.local_support_point(dir.as_ref())
    }

    /// The support point along the world-space `dir` of this shape placed at `pos`.
    fn support_point(&self, pos: &Isometry<Real>, dir: &Vector<Real>) -> Point<Real> {
        pos * self.local_support_point(&pos.inverse_transform_vector(dir))
    }

    /// The support point along the world-space unit direction `dir` of this shape placed at
    /// `pos`.
    fn support_point_toward(&self, pos: &Isometry<Real>, dir: &UnitVector<Real>) -> Point<Real> {
        pos * self.local_support_point_toward(&Unit::new_unchecked(pos.inverse_transform_vector(dir)))
    }
}
