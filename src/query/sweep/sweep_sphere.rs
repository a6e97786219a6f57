use crate::math::{Isometry, Point, Real, Vector};
use crate::query::details::{local_ray_intersection_with_support_map, ray_intersection_with_ball};
use crate::query::gjk::{DilatedShape, VoronoiSimplex};
use crate::query::sweep::SweepIntersection;
use crate::query::{Ray, RayIntersection};
use crate::shape::{Capsule, FeatureId, Shape, SupportMap};
use na::Unit;

/// Sweeps a sphere of the given `radius` from `start` along `motion` against `shape`.
///
/// `shape_pos` is the world position of the target shape. The time of impact is a fraction of
/// `motion`, at most `max_toi`. Balls are handled analytically by inflating their radius, the
/// other convex shapes by a GJK ray cast on the shape dilated by the sphere, and triangle meshes
/// triangle by triangle.
pub fn sweep_sphere(
    shape_pos: &Isometry<Real>,
    shape: &Shape,
    start: &Point<Real>,
    motion: &Vector<Real>,
    radius: Real,
    max_toi: Real,
) -> Option<SweepIntersection> {
    let ray = Ray::new(*start, *motion).inverse_transform_by(shape_pos);

    let inter = match shape {
        Shape::Ball(ball) => {
            ray_intersection_with_ball(&Point::origin(), ball.radius + radius, &ray, true)
                .filter(|inter| inter.time_of_impact <= max_toi)
        }
        Shape::Capsule(capsule) => {
            let inflated = Capsule {
                segment: capsule.segment,
                radius: capsule.radius + radius,
            };
            cast_dilated(&inflated, 0.0, &ray, max_toi)
        }
        Shape::Cuboid(cuboid) => cast_dilated(cuboid, radius, &ray, max_toi),
        Shape::ConvexPolyhedron(poly) => cast_dilated(poly, radius, &ray, max_toi),
        Shape::TriMesh(mesh) => {
            let mut best: Option<RayIntersection> = None;

            mesh.tree()
                .traverse_sweep(&ray, max_toi, radius, |i| {
                    if mesh.is_degenerate(i) {
                        return;
                    }

                    let limit = best.map_or(max_toi, |b| b.time_of_impact);
                    let tri = mesh.triangle(i);

                    if let Some(mut inter) = cast_dilated(&tri, radius, &ray, limit) {
                        if best.map_or(true, |b| inter.time_of_impact < b.time_of_impact) {
                            inter.feature = FeatureId::Face(i);
                            best = Some(inter);
                        }
                    }
                });

            best
        }
    }?;

    let local_normal = Unit::try_new(inter.normal, 1.0e-6)
        .or_else(|| Unit::try_new(-ray.dir, 1.0e-6))
        .unwrap_or_else(Vector::y_axis);
    let center = ray.point_at(inter.time_of_impact);
    let local_point = center - *local_normal * radius;

    Some(SweepIntersection {
        time_of_impact: inter.time_of_impact,
        point: shape_pos * local_point,
        normal: shape_pos * local_normal,
        feature: inter.feature,
    })
}

fn cast_dilated<S: ?Sized + SupportMap>(
    shape: &S,
    radius: Real,
    ray: &Ray,
    max_toi: Real,
) -> Option<RayIntersection> {
    let dilated = DilatedShape::new(shape, radius);
    local_ray_intersection_with_support_map(
        &dilated,
        &mut VoronoiSimplex::new(),
        ray,
        max_toi,
        true,
    )
}
