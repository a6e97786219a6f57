use crate::math::Real;
use crate::query::{Ray, RayCast, RayIntersection};
use crate::shape::{FeatureId, Shape, TriMesh};

impl RayCast for TriMesh {
    /// Casts a ray on the triangles of this mesh, returning the closest hit.
    ///
    /// Triangles are two-sided so `solid` has no effect. The reported feature is
    /// `FeatureId::Face(i)` where `i` is the index of the triangle hit.
    fn cast_local_ray_and_get_normal(
        &self,
        ray: &Ray,
        max_toi: Real,
        _solid: bool,
    ) -> Option<RayIntersection> {
        let mut best: Option<RayIntersection> = None;

        self.tree().traverse_ray(ray, max_toi, |i| {
            if self.is_degenerate(i) {
                return;
            }

            let max_toi = best.map(|b| b.time_of_impact).unwrap_or(max_toi);

            if let Some(mut hit) = self
                .triangle(i)
                .cast_local_ray_and_get_normal(ray, max_toi, true)
            {
                if best.map(|b| hit.time_of_impact < b.time_of_impact) != Some(false) {
                    hit.feature = FeatureId::Face(i);
                    best = Some(hit);
                }
            }
        });

        best
    }
}

impl RayCast for Shape {
    fn cast_local_ray(&self, ray: &Ray, max_toi: Real, solid: bool) -> Option<Real> {
        match self {
            Shape::Ball(s) => s.cast_local_ray(ray, max_toi, solid),
            Shape::Cuboid(s) => s.cast_local_ray(ray, max_toi, solid),
            Shape::Capsule(s) => s.cast_local_ray(ray, max_toi, solid),
            Shape::ConvexPolyhedron(s) => s.cast_local_ray(ray, max_toi, solid),
            Shape::TriMesh(s) => s.cast_local_ray(ray, max_toi, solid),
        }
    }

    fn cast_local_ray_and_get_normal(
        &self,
        ray: &Ray,
        max_toi: Real,
        solid: bool,
    ) -> Option<RayIntersection> {
        match self {
            Shape::Ball(s) => s.cast_local_ray_and_get_normal(ray, max_toi, solid),
            Shape::Cuboid(s) => s.cast_local_ray_and_get_normal(ray, max_toi, solid),
            Shape::Capsule(s) => s.cast_local_ray_and_get_normal(ray, max_toi, solid),
            Shape::ConvexPolyhedron(s) => s.cast_local_ray_and_get_normal(ray, max_toi, solid),
            Shape::TriMesh(s) => s.cast_local_ray_and_get_normal(ray, max_toi, solid),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::math::{Isometry, Point, Real, Vector};
    use crate::query::{Ray, RayCast};
    use crate::shape::{FeatureId, Shape, TriMesh};

    fn stairs() -> TriMesh {
        // Two horizontal quads, the second one higher and further along +x.
        let vertices = vec![
            Point::new(0.0, 0.0, -1.0),
            Point::new(2.0, 0.0, -1.0),
            Point::new(2.0, 0.0, 1.0),
            Point::new(0.0, 0.0, 1.0),
            Point::new(2.0, 1.0, -1.0),
            Point::new(4.0, 1.0, -1.0),
            Point::new(4.0, 1.0, 1.0),
            Point::new(2.0, 1.0, 1.0),
        ];
        let indices = vec![[0, 2, 1], [0, 3, 2], [4, 6, 5], [4, 7, 6]];
        TriMesh::new(vertices, indices).unwrap()
    }

    #[test]
    fn ray_hits_closest_triangle() {
        let mesh = stairs();
        let ray = Ray::new(Point::new(3.0, 5.0, 0.1), -Vector::y());
        let hit = mesh
            .cast_local_ray_and_get_normal(&ray, Real::MAX, true)
            .unwrap();

        assert_relative_eq!(hit.time_of_impact, 4.0, epsilon = 1.0e-5);
        assert_relative_eq!(hit.normal, Vector::y(), epsilon = 1.0e-5);
        assert!(matches!(hit.feature, FeatureId::Face(2) | FeatureId::Face(3)));

        let short = mesh.cast_local_ray(&ray, 3.0, true);
        assert!(short.is_none());
    }

    #[test]
    fn ray_from_below_gets_flipped_normal() {
        let mesh = stairs();
        let ray = Ray::new(Point::new(1.0, -2.0, 0.0), Vector::y());
        let hit = mesh
            .cast_local_ray_and_get_normal(&ray, Real::MAX, true)
            .unwrap();

        assert_relative_eq!(hit.time_of_impact, 2.0, epsilon = 1.0e-5);
        assert_relative_eq!(hit.normal, -Vector::y(), epsilon = 1.0e-5);
    }

    #[test]
    fn shape_dispatch_applies_position() {
        let shape = Shape::from(crate::shape::Ball::new(1.0));
        let pos = Isometry::translation(0.0, 0.0, 10.0);
        let ray = Ray::new(Point::origin(), Vector::z());
        let toi = shape.cast_ray(&pos, &ray, Real::MAX, true).unwrap();
        assert_relative_eq!(toi, 9.0, epsilon = 1.0e-5);
    }
}
