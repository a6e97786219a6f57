use crate::math::Real;

/// A coarse volume enclosing a shape, cheap to test and to combine.
///
/// The broadphase tree and the triangle tree of meshes are generic over nothing but this
/// interface of their node volumes.
pub trait BoundingVolume: Sized {
    /// Do the two volumes overlap? Touching volumes overlap.
    fn intersects(&self, other: &Self) -> bool;

    /// Is `other` entirely inside of `self`?
    fn contains(&self, other: &Self) -> bool;

    /// The smallest volume enclosing both `self` and `other`.
    fn merged(&self, other: &Self) -> Self;

    /// This volume enlarged by `margin` in every direction.
    ///
    /// # Panics
    /// If `margin` is negative.
    fn loosened(&self, margin: Real) -> Self;
}
