use crate::math::{Isometry, Point, Real, Translation, UnitVector, Vector};
use crate::query::gjk::{minkowski_ray_cast, VoronoiSimplex};
use crate::query::sweep::SweepIntersection;
use crate::query::Ray;
use crate::shape::{Capsule, FeatureId, Shape, SupportMap, TriMesh};
use na::Unit;

/// Sweeps `capsule`, starting at `capsule_pos`, along `motion` against `shape`.
///
/// `shape_pos` is the world position of the target shape. The time of impact is a fraction of
/// `motion`, at most `max_toi`. The capsule keeps its orientation during the sweep. Convex
/// targets are handled by a GJK ray cast on their Minkowski difference with the capsule;
/// triangle meshes are swept triangle by triangle.
pub fn sweep_capsule(
    shape_pos: &Isometry<Real>,
    shape: &Shape,
    capsule: &Capsule,
    capsule_pos: &Isometry<Real>,
    motion: &Vector<Real>,
    max_toi: Real,
) -> Option<SweepIntersection> {
    let pos12 = shape_pos.inv_mul(capsule_pos);
    let local_motion = shape_pos.inverse_transform_vector(motion);
    let ray = Ray::new(Point::origin(), local_motion);
    let mut simplex = VoronoiSimplex::new();

    let (toi, normal, feature) = match shape {
        Shape::TriMesh(mesh) => sweep_capsule_trimesh(&pos12, mesh, capsule, &ray, max_toi)?,
        _ => {
            let target = shape.as_support_map()?;
            let (toi, normal) =
                minkowski_ray_cast(&pos12, target, capsule, &ray, max_toi, &mut simplex)?;
            (toi, normal, FeatureId::Unknown)
        }
    };

    let normal = Unit::try_new(normal, 1.0e-6)
        .or_else(|| Unit::try_new(-local_motion, 1.0e-6))
        .unwrap_or_else(Vector::y_axis);
    let point = swept_support_point(&pos12, capsule, &local_motion, toi, &normal);

    Some(SweepIntersection {
        time_of_impact: toi,
        point: shape_pos * point,
        normal: shape_pos * normal,
        feature,
    })
}

fn sweep_capsule_trimesh(
    pos12: &Isometry<Real>,
    mesh: &TriMesh,
    capsule: &Capsule,
    ray: &Ray,
    max_toi: Real,
) -> Option<(Real, Vector<Real>, FeatureId)> {
    let center_ray = Ray::new(pos12 * capsule.center(), ray.dir);
    let bounding_radius = capsule.half_height() + capsule.radius;
    let mut simplex = VoronoiSimplex::new();
    let mut best: Option<(Real, Vector<Real>, FeatureId)> = None;

    mesh.tree()
        .traverse_sweep(&center_ray, max_toi, bounding_radius, |i| {
            if mesh.is_degenerate(i) {
                return;
            }

            let limit = best.map_or(max_toi, |b| b.0);
            let tri = mesh.triangle(i);

            if let Some((toi, normal)) =
                minkowski_ray_cast(pos12, &tri, capsule, ray, limit, &mut simplex)
            {
                if best.map_or(true, |b| toi < b.0) {
                    best = Some((toi, normal, FeatureId::Face(i)));
                }
            }
        });

    best
}

/// The point of the capsule, moved by `motion * toi`, that touches the target.
fn swept_support_point(
    pos12: &Isometry<Real>,
    capsule: &Capsule,
    motion: &Vector<Real>,
    toi: Real,
    normal: &UnitVector<Real>,
) -> Point<Real> {
    let moved = Isometry::from_parts(
        Translation::from(pos12.translation.vector + motion * toi),
        pos12.rotation,
    );
    capsule.support_point_toward(&moved, &-*normal)
}
