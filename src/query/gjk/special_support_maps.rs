use crate::math::{Point, Real, UnitVector, Vector};
use crate::shape::SupportMap;

/// The single point at the origin of its frame.
///
/// The Minkowski difference `g - ConstantOrigin` is `g` itself, so GJK ray casts use it to
/// cast rays on a lone shape.
#[derive(Copy, Clone, Debug, Default)]
pub struct ConstantOrigin;

impl SupportMap for ConstantOrigin {
    #[inline]
    fn local_support_point(&self, _: &Vector<Real>) -> Point<Real> {
        Point::origin()
    }
}

/// A shape grown by a ball: the Minkowski sum of `shape` and a ball of radius `radius`.
///
/// Sweeping a sphere is casting a ray on the swept-against shape dilated by the sphere, and
/// contacts with a prediction distance test overlap against a dilated shape.
#[derive(Copy, Clone, Debug)]
pub struct DilatedShape<'a, S: ?Sized> {
    /// The shape being grown.
    pub shape: &'a S,
    /// The radius of the ball added to it.
    pub radius: Real,
}

impl<'a, S: ?Sized + SupportMap> DilatedShape<'a, S> {
    /// Grows `shape` by `radius`.
    pub fn new(shape: &'a S, radius: Real) -> Self {
        Self { shape, radius }
    }
}

impl<S: ?Sized + SupportMap> SupportMap for DilatedShape<'_, S> {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        UnitVector::try_new(*dir, 0.0).map_or_else(
            || self.shape.local_support_point(dir),
            |unit| self.local_support_point_toward(&unit),
        )
    }

    #[inline]
    fn local_support_point_toward(&self, dir: &UnitVector<Real>) -> Point<Real> {
        self.shape.local_support_point_toward(dir) + dir.into_inner() * self.radius
    }
}

#[cfg(test)]
mod test {
    use super::DilatedShape;
    use crate::math::{Isometry, Point, Vector};
    use crate::shape::{Cuboid, SupportMap};

    #[test]
    fn dilated_cuboid_support() {
        let cuboid = Cuboid::new(Vector::new(1.0, 2.0, 3.0));
        let dilated = DilatedShape::new(&cuboid, 0.5);

        assert_relative_eq!(
            dilated.local_support_point(&Vector::x()),
            Point::new(1.5, 2.0, 3.0)
        );

        let pos = Isometry::translation(0.0, 10.0, 0.0);
        assert_relative_eq!(dilated.support_point(&pos, &-Vector::y()).y, 7.5);
    }
}
