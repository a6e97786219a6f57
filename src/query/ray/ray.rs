//! Rays and the trait of shapes that can be ray-cast.

use crate::math::{Isometry, Point, Real, Vector};
use crate::shape::FeatureId;

/// A half-line starting at `origin` and extending along `dir`.
///
/// `dir` is not required to be unit-length. Times of impact are expressed as multiples of
/// `dir`: casting the segment `a -> b` is done with `Ray::new(a, b - a)` and a maximum time of
/// impact of `1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Ray {
    /// Starting point of the ray.
    pub origin: Point<Real>,
    /// Direction of the ray.
    pub dir: Vector<Real>,
}

impl Ray {
    /// Creates a new ray.
    pub fn new(origin: Point<Real>, dir: Vector<Real>) -> Ray {
        Ray { origin, dir }
    }

    /// Expresses this ray in the local-space of a shape placed at `pos`.
    #[inline]
    pub fn inverse_transform_by(&self, pos: &Isometry<Real>) -> Self {
        Self::new(
            pos.inverse_transform_point(&self.origin),
            pos.inverse_transform_vector(&self.dir),
        )
    }

    /// The point `origin + dir * t`.
    #[inline]
    pub fn point_at(&self, t: Real) -> Point<Real> {
        self.origin + self.dir * t
    }
}

/// A successful ray cast.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct RayIntersection {
    /// The hit point is `ray.point_at(time_of_impact)`.
    pub time_of_impact: Real,
    /// The outward normal of the surface at the hit point. Not meaningful for rays starting
    /// inside of a solid shape.
    pub normal: Vector<Real>,
    /// The shape feature that was hit.
    pub feature: FeatureId,
}

impl RayIntersection {
    /// Creates a new ray intersection.
    #[inline]
    pub fn new(time_of_impact: Real, normal: Vector<Real>, feature: FeatureId) -> RayIntersection {
        RayIntersection {
            time_of_impact,
            normal,
            feature,
        }
    }
}

/// Shapes that can be intersected with a ray.
///
/// Implementors provide [`RayCast::cast_local_ray_and_get_normal`] for rays expressed in their
/// local-space. Setting `solid` makes a ray starting inside of the shape hit it immediately;
/// otherwise the ray hits the boundary on its way out.
pub trait RayCast {
    /// Time of impact of a local-space ray on this shape, if smaller than `max_time_of_impact`.
    fn cast_local_ray(&self, ray: &Ray, max_time_of_impact: Real, solid: bool) -> Option<Real> {
        self.cast_local_ray_and_get_normal(ray, max_time_of_impact, solid)
            .map(|inter| inter.time_of_impact)
    }

    /// Time of impact, normal and feature of a local-space ray on this shape.
    fn cast_local_ray_and_get_normal(
        &self,
        ray: &Ray,
        max_time_of_impact: Real,
        solid: bool,
    ) -> Option<RayIntersection>;

    /// Does the local-space ray hit this solid shape before `max_time_of_impact`?
    #[inline]
    fn intersects_local_ray(&self, ray: &Ray, max_time_of_impact: Real) -> bool {
        self.cast_local_ray(ray, max_time_of_impact, true).is_some()
    }

    /// Time of impact of a world-space ray on this shape placed at `pos`.
    fn cast_ray(
        &self,
        pos: &Isometry<Real>,
        ray: &Ray,
        max_time_of_impact: Real,
        solid: bool,
    ) -> Option<Real> {
        self.cast_local_ray(&ray.inverse_transform_by(pos), max_time_of_impact, solid)
    }

    /// Like [`RayCast::cast_ray`], with the hit normal expressed in world-space.
    fn cast_ray_and_get_normal(
        &self,
        pos: &Isometry<Real>,
        ray: &Ray,
        max_time_of_impact: Real,
        solid: bool,
    ) -> Option<RayIntersection> {
        let local_ray = ray.inverse_transform_by(pos);
        let mut inter =
            self.cast_local_ray_and_get_normal(&local_ray, max_time_of_impact, solid)?;
        inter.normal = pos * inter.normal;
        Some(inter)
    }
}
