use crate::math::{Point, Real};
use crate::query::{Ray, RayCast, RayIntersection};
use crate::shape::{Ball, FeatureId};

impl RayCast for Ball {
    #[inline]
    fn cast_local_ray_and_get_normal(
        &self,
        ray: &Ray,
        max_toi: Real,
        solid: bool,
    ) -> Option<RayIntersection> {
        ray_intersection_with_ball(&Point::origin(), self.radius, ray, solid)
            .filter(|inter| inter.time_of_impact <= max_toi)
    }
}

/// Intersects `ray` with the ball of the given `center` and `radius`.
///
/// Solves `|origin + t * dir - center|² = radius²` for the smallest non-negative `t`. A ray
/// starting inside of the ball hits at `t = 0` if `solid` is set, and otherwise exits through
/// the ball surface with an inward normal. The only feature of a ball is `FeatureId::Face(0)`.
pub fn ray_intersection_with_ball(
    center: &Point<Real>,
    radius: Real,
    ray: &Ray,
    solid: bool,
) -> Option<RayIntersection> {
    let rel = ray.origin - center;
    let a = ray.dir.norm_squared();
    let half_b = rel.dot(&ray.dir);
    let c = rel.norm_squared() - radius * radius;
    let starts_inside = c <= 0.0;

    if starts_inside && (solid || a == 0.0) {
        let normal = rel.try_normalize(0.0).unwrap_or_else(|| -ray.dir);
        return Some(RayIntersection::new(0.0, normal, FeatureId::Face(0)));
    }

    if a == 0.0 || (!starts_inside && half_b > 0.0) {
        // Outside and motionless, or moving away.
        return None;
    }

    let discriminant = half_b * half_b - a * c;

    if discriminant < 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    let (t, sign): (Real, Real) = if starts_inside {
        ((-half_b + root) / a, -1.0)
    } else {
        ((-half_b - root) / a, 1.0)
    };

    let normal = (ray.point_at(t) - center)
        .try_normalize(0.0)
        .unwrap_or_else(|| -ray.dir);
    Some(RayIntersection::new(t, normal * sign, FeatureId::Face(0)))
}
