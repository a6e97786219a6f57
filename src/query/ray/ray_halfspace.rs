use crate::math::{Point, Real, Vector};
use crate::query::Ray;

/// Parameter at which `ray` crosses the plane through `point` with the given `normal`.
///
/// Returns `None` if the ray is parallel to the plane or crosses it behind its origin. The
/// normal does not need to be unit-length.
#[inline]
pub fn ray_toi_with_plane(point: &Point<Real>, normal: &Vector<Real>, ray: &Ray) -> Option<Real> {
    let denom = normal.dot(&ray.dir);

    if relative_eq!(denom, 0.0) {
        return None;
    }

    let t = normal.dot(&(point - ray.origin)) / denom;
    (t >= 0.0).then_some(t)
}
