//! Small geometric helpers shared by the shapes and queries.

use crate::math::{Isometry, Point, Real, UnitVector, Vector, DEFAULT_EPSILON};

/// The unit normal of the triangle `pts`, oriented by the right-hand rule.
///
/// Returns `None` if the triangle is degenerate.
#[inline]
pub fn ccw_face_normal([a, b, c]: [&Point<Real>; 3]) -> Option<UnitVector<Real>> {
    UnitVector::try_new((b - a).cross(&(c - a)), DEFAULT_EPSILON)
}

/// The point of `points` furthest along `dir`, or the origin if `points` is empty.
#[inline]
pub fn point_cloud_support_point(dir: &Vector<Real>, points: &[Point<Real>]) -> Point<Real> {
    points
        .iter()
        .max_by(|p1, p2| p1.coords.dot(dir).total_cmp(&p2.coords.dot(dir)))
        .copied()
        .unwrap_or_else(Point::origin)
}

/// Extra operations with isometries.
pub trait IsometryOps {
    /// Applies the rotation part of `self`, with every matrix entry replaced by its
    /// absolute value, to `v`.
    ///
    /// Maps the half-extents of a box to the half-extents of the box bounding its rotation.
    fn absolute_transform_vector(&self, v: &Vector<Real>) -> Vector<Real>;
}

impl IsometryOps for Isometry<Real> {
    #[inline]
    fn absolute_transform_vector(&self, v: &Vector<Real>) -> Vector<Real> {
        self.rotation.to_rotation_matrix().matrix().abs() * v
    }
}

/// Orthonormal completion of a unit vector.
pub trait WBasis: Sized {
    /// Two unit vectors orthogonal to `self` and to each other.
    fn orthonormal_basis(self) -> [Self; 2];
}

impl WBasis for Vector<Real> {
    // Duff et al., "Building an Orthonormal Basis, Revisited" (2017).
    fn orthonormal_basis(self) -> [Vector<Real>; 2] {
        let sign = (1.0 as Real).copysign(self.z);
        let a = -1.0 / (sign + self.z);
        let b = self.x * self.y * a;

        [
            Vector::new(1.0 + sign * self.x * self.x * a, sign * b, -sign * self.x),
            Vector::new(b, sign + self.y * self.y * a, -self.y),
        ]
    }
}
