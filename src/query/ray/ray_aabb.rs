use crate::bounding_volume::Aabb;
use crate::math::{Real, Vector, DIM};
use crate::query::{Ray, RayCast, RayIntersection};
use crate::shape::FeatureId;
use num::Zero;
use std::mem;

impl RayCast for Aabb {
    fn cast_local_ray(&self, ray: &Ray, max_toi: Real, solid: bool) -> Option<Real> {
        ray_aabb(self, ray, max_toi, solid).map(|(t, _, _)| t)
    }

    #[inline]
    fn cast_local_ray_and_get_normal(
        &self,
        ray: &Ray,
        max_toi: Real,
        solid: bool,
    ) -> Option<RayIntersection> {
        ray_aabb(self, ray, max_toi, solid).map(|(t, n, face)| {
            RayIntersection::new(t, n, face.map(FeatureId::Face).unwrap_or_default())
        })
    }
}

/// Slab test. Returns the time of impact, the outward normal of the face hit, and the id of that
/// face: `i` for the face with normal `-e_i`, `i + 3` for `+e_i`.
fn ray_aabb(
    aabb: &Aabb,
    ray: &Ray,
    max_toi: Real,
    solid: bool,
) -> Option<(Real, Vector<Real>, Option<u32>)> {
    let mut tmin: Real = 0.0;
    let mut tmax: Real = max_toi;
    let mut near_face = None;
    let mut far_face = None;

    for i in 0usize..DIM {
        if ray.dir[i].is_zero() {
            if ray.origin[i] < aabb.mins[i] || ray.origin[i] > aabb.maxs[i] {
                return None;
            }
        } else {
            let denom = 1.0 / ray.dir[i];
            let mut inter_with_near_halfspace = (aabb.mins[i] - ray.origin[i]) * denom;
            let mut inter_with_far_halfspace = (aabb.maxs[i] - ray.origin[i]) * denom;
            let (mut near_id, mut far_id) = (i as u32, i as u32 + 3);

            if inter_with_near_halfspace > inter_with_far_halfspace {
                mem::swap(
                    &mut inter_with_near_halfspace,
                    &mut inter_with_far_halfspace,
                );
                mem::swap(&mut near_id, &mut far_id);
            }

            if inter_with_near_halfspace > tmin {
                tmin = inter_with_near_halfspace;
                near_face = Some(near_id);
            }

            if inter_with_far_halfspace < tmax {
                tmax = inter_with_far_halfspace;
                far_face = Some(far_id);
            }

            if tmin > tmax {
                // This covers the case where tmax is negative because tmin is
                // initialized at zero.
                return None;
            }
        }
    }

    let face_normal = |face: Option<u32>| {
        let mut n = Vector::zeros();
        if let Some(id) = face {
            let axis = id as usize % 3;
            n[axis] = if id < 3 { -1.0 } else { 1.0 };
        }
        n
    };

    if near_face.is_none() {
        // The ray starts inside of the box.
        if solid {
            Some((0.0, Vector::zeros(), None))
        } else {
            far_face.map(|_| (tmax, -face_normal(far_face), far_face))
        }
    } else {
        Some((tmin, face_normal(near_face), near_face))
    }
}
