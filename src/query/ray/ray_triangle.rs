use crate::math::{Real, Vector};
use crate::query::{Ray, RayCast, RayIntersection};
use crate::shape::{FeatureId, Triangle};

impl RayCast for Triangle {
    /// Triangles are two-sided: the returned normal faces the ray origin, and `solid` has no
    /// effect.
    #[inline]
    fn cast_local_ray_and_get_normal(
        &self,
        ray: &Ray,
        max_toi: Real,
        _solid: bool,
    ) -> Option<RayIntersection> {
        local_ray_intersection_with_triangle(self, ray)
            .map(|(inter, _)| inter)
            .filter(|inter| inter.time_of_impact <= max_toi)
    }
}

/// Intersects a ray with a triangle, using the Möller-Trumbore formulation.
///
/// Returns the intersection and the barycentric coordinates of the hit point on `a`, `b`, `c`.
/// The feature is `FeatureId::Face(0)` when the ray hits the counter-clockwise side of the
/// triangle and `FeatureId::Face(1)` otherwise. Rays lying in the plane of the triangle miss.
pub fn local_ray_intersection_with_triangle(
    tri: &Triangle,
    ray: &Ray,
) -> Option<(RayIntersection, [Real; 3])> {
    let ab = tri.b - tri.a;
    let ac = tri.c - tri.a;
    let p = ray.dir.cross(&ac);
    let det = ab.dot(&p);

    if det == 0.0 {
        return None;
    }

    let inv_det = 1.0 / det;
    let ao = ray.origin - tri.a;
    let v = ao.dot(&p) * inv_det;

    if !(0.0..=1.0).contains(&v) {
        return None;
    }

    let q = ao.cross(&ab);
    let w = ray.dir.dot(&q) * inv_det;

    if w < 0.0 || v + w > 1.0 {
        return None;
    }

    let toi = ac.dot(&q) * inv_det;

    if toi < 0.0 {
        return None;
    }

    let normal: Vector<Real> = ab.cross(&ac).normalize();
    // `det` has the sign of `-dir . normal`: positive rays come from the front side.
    let (normal, face) = if det > 0.0 { (normal, 0) } else { (-normal, 1) };

    Some((
        RayIntersection::new(toi, normal, FeatureId::Face(face)),
        [1.0 - v - w, v, w],
    ))
}

#[cfg(test)]
mod test {
    use super::local_ray_intersection_with_triangle;
    use crate::math::{Point, Vector};
    use crate::query::{Ray, RayCast};
    use crate::shape::{FeatureId, Triangle};

    #[test]
    fn triangle_is_two_sided() {
        let tri = Triangle::new(
            Point::new(-1.0, 0.0, -1.0),
            Point::new(0.0, 0.0, 1.0),
            Point::new(1.0, 0.0, -1.0),
        );

        let down = Ray::new(Point::new(0.0, 2.0, 0.0), -Vector::y());
        let hit = tri.cast_local_ray_and_get_normal(&down, 10.0, true).unwrap();
        assert_relative_eq!(hit.time_of_impact, 2.0);
        assert_relative_eq!(hit.normal, Vector::y());
        assert_eq!(hit.feature, FeatureId::Face(0));

        let up = Ray::new(Point::new(0.0, -3.0, 0.0), Vector::y());
        let hit = tri.cast_local_ray_and_get_normal(&up, 10.0, true).unwrap();
        assert_relative_eq!(hit.time_of_impact, 3.0);
        assert_relative_eq!(hit.normal, -Vector::y());
        assert_eq!(hit.feature, FeatureId::Face(1));

        let miss = Ray::new(Point::new(5.0, 2.0, 0.0), -Vector::y());
        assert!(tri.cast_local_ray(&miss, 10.0, true).is_none());
        assert!(tri.cast_local_ray(&down, 1.0, true).is_none());
    }

    #[test]
    fn barycentric_coordinates_of_hit() {
        let tri = Triangle::new(
            Point::new(0.0, 0.0, 0.0),
            Point::new(2.0, 0.0, 0.0),
            Point::new(0.0, 2.0, 0.0),
        );
        let ray = Ray::new(Point::new(0.5, 0.5, 4.0), Vector::new(0.0, 0.0, -2.0));
        let (inter, bcoords) = local_ray_intersection_with_triangle(&tri, &ray).unwrap();

        assert_relative_eq!(inter.time_of_impact, 2.0);
        assert_relative_eq!(bcoords[0], 0.5);
        assert_relative_eq!(bcoords[1], 0.25);
        assert_relative_eq!(bcoords[2], 0.25);
    }
}
