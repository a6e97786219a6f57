use crate::math::Real;
use crate::query::{Ray, RayCast, RayIntersection};
use crate::shape::Cuboid;

/// A cuboid is cast as its local AABB. Face ids follow the AABB convention: `i` for the face
/// with normal `-e_i`, `i + 3` for the face with normal `+e_i`.
impl RayCast for Cuboid {
    #[inline]
    fn cast_local_ray(&self, ray: &Ray, max_toi: Real, solid: bool) -> Option<Real> {
        self.local_aabb().cast_local_ray(ray, max_toi, solid)
    }

    #[inline]
    fn cast_local_ray_and_get_normal(
        &self,
        ray: &Ray,
        max_toi: Real,
        solid: bool,
    ) -> Option<RayIntersection> {
        self.local_aabb()
            .cast_local_ray_and_get_normal(ray, max_toi, solid)
    }
}

#[cfg(test)]
mod test {
    use crate::math::{Isometry, Point, Real, Vector};
    use crate::query::{Ray, RayCast};
    use crate::shape::{Cuboid, FeatureId};

    #[test]
    fn ray_hits_top_face_of_rotated_cuboid() {
        let cuboid = Cuboid::new(Vector::new(2.0, 0.5, 1.0));
        // A quarter turn around `x` brings a local `z` face on top.
        let pos = Isometry::new(
            Vector::new(0.0, 1.0, 0.0),
            Vector::x() * std::f32::consts::FRAC_PI_2 as Real,
        );
        let ray = Ray::new(Point::new(0.5, 10.0, 0.0), -Vector::y());
        let hit = cuboid
            .cast_ray_and_get_normal(&pos, &ray, Real::MAX, true)
            .unwrap();

        assert_relative_eq!(hit.time_of_impact, 8.0, epsilon = 1.0e-5);
        assert_relative_eq!(hit.normal, Vector::y(), epsilon = 1.0e-5);
        assert!(matches!(hit.feature, FeatureId::Face(_)));
    }
}
