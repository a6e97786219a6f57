//! The Gilbert-Johnson-Keerthi algorithm.
//!
//! Two flavors are implemented here. [`intersect`] is the boolean test used by the
//! narrowphase: it grows a simplex of the Minkowski difference toward the origin and, on
//! overlap, returns the tetrahedron enclosing the origin so EPA can compute the penetration.
//! [`minkowski_ray_cast`] is the distance-based variant that casts a ray on the Minkowski
//! difference; sweep queries and convex ray casts are built on it.

use na::{ComplexField, Unit};

use crate::math::{Isometry, Real, Vector, DEFAULT_EPSILON, DIM};
use crate::query::gjk::{CSOPoint, ConstantOrigin, Simplex, VoronoiSimplex};
use crate::query::{self, Ray};
use crate::shape::SupportMap;

use num::Bounded;

/// Maximum number of support points fetched by [`intersect`] before giving up.
pub const MAX_GJK_ITERATIONS: usize = 64;

/// Maximum number of iterations of [`minkowski_ray_cast`].
const MAX_RAY_CAST_ITERATIONS: usize = 100;

/// The absolute tolerance used by the GJK algorithm.
pub fn eps_tol() -> Real {
    DEFAULT_EPSILON * 10.0
}

/// Tests whether the shapes `g1` and `pos12 * g2` overlap.
///
/// On overlap, returns the terminal simplex: four points of the Minkowski difference
/// `g1 - pos12 * g2` (expressed in the local-space of `g1`) forming a tetrahedron that encloses
/// the origin. Shapes for which the iteration limit is reached are reported as disjoint, and
/// shapes that exactly touch may be reported either way, with a zero penetration.
pub fn intersect<G1, G2>(pos12: &Isometry<Real>, g1: &G1, g2: &G2) -> Option<Simplex>
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    let eps = eps_tol();
    let mut dir = if pos12.translation.vector.norm_squared() > eps * eps {
        pos12.translation.vector
    } else {
        Vector::x()
    };

    let first = CSOPoint::from_shapes(pos12, g1, g2, &dir);
    let mut simplex = Simplex::new(first);
    dir = -first.point.coords;

    for _ in 0..MAX_GJK_ITERATIONS {
        if dir.norm_squared() <= eps * eps {
            // The origin lies on the current simplex: the shapes touch or overlap. Inflate the
            // simplex to a tetrahedron so the penetration can still be measured.
            return simplex
                .complete_tetrahedron(pos12, g1, g2)
                .then_some(simplex);
        }

        let support = CSOPoint::from_shapes(pos12, g1, g2, &dir);

        if support.point.coords.dot(&dir) <= 0.0 {
            // The support point did not pass the origin: it can't be enclosed.
            return None;
        }

        simplex.push(support);

        if simplex.contains_origin(&mut dir) {
            return Some(simplex);
        }
    }

    log::debug!("GJK reached its iteration limit; assuming no overlap.");
    None
}

/// Casts a ray on a shape using the GJK algorithm.
///
/// The ray is expressed in the local-space of `shape`. Returns the time of impact and the
/// outward normal at the hit point. A ray starting inside of the shape hits at time zero.
pub fn cast_local_ray<G: ?Sized + SupportMap>(
    shape: &G,
    simplex: &mut VoronoiSimplex,
    ray: &Ray,
    max_time_of_impact: Real,
) -> Option<(Real, Vector<Real>)> {
    let g2 = ConstantOrigin;
    minkowski_ray_cast(
        &Isometry::identity(),
        shape,
        &g2,
        ray,
        max_time_of_impact,
        simplex,
    )
}

/// Casts a ray on the Minkowski difference `g1 - pos12 * g2`.
///
/// Casting the ray `(0, dir)` on that difference computes how far `g2` can travel along
/// `dir` (or equivalently `g1` along `-dir`) before the two shapes touch. The returned normal
/// is the outward normal of `g1` at the first contact, expressed in the local-space of `g1`.
pub fn minkowski_ray_cast<G1, G2>(
    pos12: &Isometry<Real>,
    g1: &G1,
    g2: &G2,
    ray: &Ray,
    max_time_of_impact: Real,
    simplex: &mut VoronoiSimplex,
) -> Option<(Real, Vector<Real>)>
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    let eps_tol = eps_tol();
    let eps_rel = ComplexField::sqrt(eps_tol);

    let ray_length = ray.dir.norm();

    if relative_eq!(ray_length, 0.0) {
        return None;
    }

    let mut ltoi = 0.0;
    let mut curr_ray = Ray::new(ray.origin, ray.dir / ray_length);
    let dir = -curr_ray.dir;
    let mut ldir = dir;

    // Initialize the simplex.
    let support_point = CSOPoint::from_shapes(pos12, g1, g2, &dir);
    simplex.reset(support_point.translate(&-curr_ray.origin.coords));

    let mut proj = simplex.project_origin_and_reduce();
    let mut max_bound = Real::max_value();
    let mut dir;
    let mut last_chance = false;

    for _ in 0..MAX_RAY_CAST_ITERATIONS {
        let old_max_bound = max_bound;

        if let Some((new_dir, dist)) = Unit::try_new_and_get(-proj.coords, eps_tol) {
            dir = new_dir;
            max_bound = dist;
        } else {
            return Some((ltoi / ray_length, ldir));
        }

        let support_point = if max_bound >= old_max_bound {
            // Upper bounds inconsistencies. Consider the projection as a valid support point.
            last_chance = true;
            CSOPoint::single_point(proj + curr_ray.origin.coords)
        } else {
            CSOPoint::from_shapes(pos12, g1, g2, &dir)
        };

        if last_chance && ltoi > 0.0 {
            return Some((ltoi / ray_length, ldir));
        }

        // Clip the ray on the support halfspace (None <=> t < 0)
        // The configurations are:
        //   dir.dot(curr_ray.dir)  |   t   |               Action
        // −−−−−−−−−−−−−−−−−−−−-----+−−−−−−−+−−−−−−−−−−−−−−−−−−−−−−−−−−−−−−−−−−−−
        //          < 0             |  < 0  | Continue.
        //          < 0             |  > 0  | New lower bound, move the origin.
        //          > 0             |  < 0  | Miss. No intersection.
        //          > 0             |  > 0  | New higher bound.
        match query::details::ray_toi_with_plane(&support_point.point, &dir, &curr_ray) {
            Some(t) => {
                if dir.dot(&curr_ray.dir) < 0.0 && t > 0.0 {
                    // new lower bound
                    ldir = *dir;
                    ltoi += t;

                    // Compare after dividing so an infinite `max_time_of_impact` can't overflow.
                    if ltoi / ray_length > max_time_of_impact {
                        return None;
                    }

                    let shift = curr_ray.dir * t;
                    curr_ray.origin += shift;
                    max_bound = Real::max_value();
                    simplex.modify_pnts(&|pt| pt.translate_mut(&-shift));
                    last_chance = false;
                }
            }
            None => {
                if dir.dot(&curr_ray.dir) > eps_tol {
                    // miss
                    return None;
                }
            }
        }

        if last_chance {
            return None;
        }

        let min_bound = -dir.dot(&(support_point.point.coords - curr_ray.origin.coords));

        if !min_bound.is_finite() || max_bound - min_bound <= eps_rel * max_bound {
            return None;
        }

        let _ = simplex.add_point(support_point.translate(&-curr_ray.origin.coords));
        proj = simplex.project_origin_and_reduce();

        if simplex.dimension() == DIM {
            if min_bound >= eps_tol {
                return None;
            } else {
                return Some((ltoi / ray_length, ldir)); // Point inside of the cso.
            }
        }
    }

    None
}

#[cfg(test)]
mod test {
    use super::{cast_local_ray, intersect, minkowski_ray_cast};
    use crate::math::{Isometry, Point, Real, Vector};
    use crate::query::gjk::VoronoiSimplex;
    use crate::query::Ray;
    use crate::shape::{Ball, Cuboid};

    #[test]
    fn overlapping_balls_intersect() {
        let ball = Ball::new(0.5);
        let pos12 = Isometry::translation(0.9, 0.0, 0.0);
        let simplex = intersect(&pos12, &ball, &ball).unwrap();
        assert_eq!(simplex.points().len(), 4);

        let far = Isometry::translation(1.1, 0.0, 0.0);
        assert!(intersect(&far, &ball, &ball).is_none());
    }

    #[test]
    fn concentric_shapes_intersect() {
        let cuboid = Cuboid::new(Vector::new(1.0, 1.0, 1.0));
        let simplex = intersect(&Isometry::identity(), &cuboid, &cuboid).unwrap();
        assert_eq!(simplex.points().len(), 4);
    }

    #[test]
    fn rotated_cuboids() {
        let cuboid = Cuboid::new(Vector::new(0.5, 0.5, 0.5));
        let rot = Vector::new(0.0, 0.0, std::f64::consts::FRAC_PI_4 as Real);
        // The rotated corner reaches 0.5 * sqrt(2) along x.
        let touching = 0.5 + 0.5 * (2.0 as Real).sqrt();

        let overlap = Isometry::new(Vector::new(touching - 0.05, 0.0, 0.0), rot);
        assert!(intersect(&overlap, &cuboid, &cuboid).is_some());

        let apart = Isometry::new(Vector::new(touching + 0.05, 0.0, 0.0), rot);
        assert!(intersect(&apart, &cuboid, &cuboid).is_none());
    }

    #[test]
    fn ray_cast_on_cuboid() {
        let cuboid = Cuboid::new(Vector::new(1.0, 1.0, 1.0));
        let ray = Ray::new(Point::new(-5.0, 0.3, 0.2), Vector::x());
        let (toi, normal) =
            cast_local_ray(&cuboid, &mut VoronoiSimplex::new(), &ray, Real::MAX).unwrap();

        assert_relative_eq!(toi, 4.0, epsilon = 1.0e-4);
        assert_relative_eq!(normal.normalize(), -Vector::x(), epsilon = 1.0e-4);

        let short = cast_local_ray(&cuboid, &mut VoronoiSimplex::new(), &ray, 3.0);
        assert!(short.is_none());
    }

    #[test]
    fn minkowski_cast_between_balls() {
        let ball = Ball::new(0.5);
        // The second ball is 5 units away along +x and moves toward the first one.
        let pos12 = Isometry::translation(5.0, 0.0, 0.0);
        let ray = Ray::new(Point::origin(), -Vector::x());
        let (toi, normal) = minkowski_ray_cast(
            &pos12,
            &ball,
            &ball,
            &ray,
            Real::MAX,
            &mut VoronoiSimplex::new(),
        )
        .unwrap();

        assert_relative_eq!(toi, 4.0, epsilon = 1.0e-3);
        assert!(normal.normalize().dot(&Vector::x()) > 0.99);
    }
}
