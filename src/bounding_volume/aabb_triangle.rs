use crate::bounding_volume::Aabb;
use crate::math::{Isometry, Real};
use crate::shape::Triangle;

impl Triangle {
    /// The world-space box of this triangle placed at `pos`.
    #[inline]
    pub fn aabb(&self, pos: &Isometry<Real>) -> Aabb {
        self.transformed(pos).local_aabb()
    }

    /// The box of the three vertices of this triangle.
    #[inline]
    pub fn local_aabb(&self) -> Aabb {
        Aabb::new(
            self.a.inf(&self.b).inf(&self.c),
            self.a.sup(&self.b).sup(&self.c),
        )
    }
}

#[cfg(test)]
mod test {
    use crate::math::{Isometry, Point, Real, Vector};
    use crate::shape::Triangle;

    #[test]
    fn triangle_aabb_bounds_its_vertices() {
        let t = Triangle::new(
            Point::new(0.3, -0.1, 0.2),
            Point::new(-0.7, 1.0, 0.0),
            Point::new(-0.7, 1.5, 0.0),
        );
        let local = t.local_aabb();
        assert_eq!(local.mins, Point::new(-0.7, -0.1, 0.0));
        assert_eq!(local.maxs, Point::new(0.3, 1.5, 0.2));

        // A quarter turn around `y` maps `x` to `-z`.
        let pos = Isometry::new(
            Vector::new(0.0, 5.0, 0.0),
            Vector::y() * std::f32::consts::FRAC_PI_2 as Real,
        );
        let world = t.aabb(&pos);
        assert_relative_eq!(world.mins, Point::new(0.0, 4.9, -0.3), epsilon = 1.0e-5);
        assert_relative_eq!(world.maxs, Point::new(0.2, 6.5, 0.7), epsilon = 1.0e-5);
    }
}
