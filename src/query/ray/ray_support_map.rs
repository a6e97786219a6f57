use crate::math::{Real, Vector};
use crate::query::gjk::{self, CSOPoint, VoronoiSimplex};
use crate::query::{Ray, RayCast, RayIntersection};
use crate::shape::{Capsule, ConvexPolyhedron, FeatureId, SupportMap};

/// How far past the far side of the shape a ray starting inside is restarted from.
const EXIT_CAST_OFFSET: Real = 1.0e-3;

/// Casts a ray on a convex shape with GJK.
///
/// A ray starting inside of the shape hits it at time zero when `solid` is `true`. Otherwise
/// the hit is where the ray leaves the shape.
pub fn local_ray_intersection_with_support_map<G: ?Sized + SupportMap>(
    shape: &G,
    simplex: &mut VoronoiSimplex,
    ray: &Ray,
    max_toi: Real,
    solid: bool,
) -> Option<RayIntersection> {
    let (toi, normal) = cast_from_support(shape, simplex, ray, max_toi)?;

    if solid || toi > 0.0 {
        return Some(RayIntersection::new(toi, normal, FeatureId::Unknown));
    }

    // Restart beyond the far side of the shape and cast back toward the origin.
    let dir = ray.dir.normalize();
    let far = shape.local_support_point(&dir);
    let back_off = (far - ray.origin).dot(&dir) + EXIT_CAST_OFFSET;
    let back_ray = Ray::new(ray.origin + dir * back_off, -ray.dir);
    let (back_toi, normal) =
        cast_from_support(shape, simplex, &back_ray, back_off + EXIT_CAST_OFFSET)?;

    let toi = back_off - back_toi;
    (toi <= max_toi).then(|| RayIntersection::new(toi, normal, FeatureId::Unknown))
}

fn cast_from_support<G: ?Sized + SupportMap>(
    shape: &G,
    simplex: &mut VoronoiSimplex,
    ray: &Ray,
    max_toi: Real,
) -> Option<(Real, Vector<Real>)> {
    let start = shape.local_support_point(&-ray.dir);
    simplex.reset(CSOPoint::single_point(start - ray.origin.coords));
    gjk::cast_local_ray(shape, simplex, ray, max_toi)
}

impl RayCast for Capsule {
    fn cast_local_ray_and_get_normal(
        &self,
        ray: &Ray,
        max_toi: Real,
        solid: bool,
    ) -> Option<RayIntersection> {
        let mut simplex = VoronoiSimplex::new();
        local_ray_intersection_with_support_map(self, &mut simplex, ray, max_toi, solid)
    }
}

impl RayCast for ConvexPolyhedron {
    fn cast_local_ray_and_get_normal(
        &self,
        ray: &Ray,
        max_toi: Real,
        solid: bool,
    ) -> Option<RayIntersection> {
        let mut simplex = VoronoiSimplex::new();
        local_ray_intersection_with_support_map(self, &mut simplex, ray, max_toi, solid)
    }
}
