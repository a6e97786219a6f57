use crate::math::{Isometry, Point, Real, Rotation, Vector};
use crate::pipeline::{Collider, ColliderFlags, ColliderHandle, CollisionGroups, CollisionWorld};
use crate::query::{sweep_capsule, sweep_sphere, Ray, RayCast, SweepIntersection};
use crate::shape::{Capsule, FeatureId};

/// The closest hit of a ray cast on a world.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RayHit {
    /// Did the ray hit anything?
    pub has_hit: bool,
    /// The hit point, in world-space.
    pub point: Point<Real>,
    /// The outward normal of the hit surface, in world-space.
    pub normal: Vector<Real>,
    /// The collider that was hit.
    pub collider: Option<ColliderHandle>,
    /// The friction coefficient of the collider that was hit.
    pub friction: Real,
    /// The feature of the collider shape that was hit.
    pub feature: FeatureId,
    /// The distance from the ray origin to the hit point.
    pub distance: Real,
}

impl Default for RayHit {
    fn default() -> Self {
        Self {
            has_hit: false,
            point: Point::origin(),
            normal: Vector::zeros(),
            collider: None,
            friction: 0.0,
            feature: FeatureId::Unknown,
            distance: Real::MAX,
        }
    }
}

/// The closest hit of a sphere or capsule swept through a world.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SweepHit {
    /// Did the swept shape hit anything?
    pub has_hit: bool,
    /// The contact point on the surface that was hit, in world-space.
    pub point: Point<Real>,
    /// The center of the swept shape at the time of impact, in world-space.
    pub position: Point<Real>,
    /// The outward normal of the surface that was hit, in world-space.
    pub normal: Vector<Real>,
    /// The collider that was hit.
    pub collider: Option<ColliderHandle>,
    /// The friction coefficient of the collider that was hit.
    pub friction: Real,
    /// The feature of the collider shape that was hit.
    pub feature: FeatureId,
    /// The distance travelled by the swept shape before the hit.
    pub distance: Real,
}

impl Default for SweepHit {
    fn default() -> Self {
        Self {
            has_hit: false,
            point: Point::origin(),
            position: Point::origin(),
            normal: Vector::zeros(),
            collider: None,
            friction: 0.0,
            feature: FeatureId::Unknown,
            distance: Real::MAX,
        }
    }
}

impl SweepHit {
    fn new(
        handle: ColliderHandle,
        collider: &Collider,
        inter: &SweepIntersection,
        from: &Point<Real>,
        motion: &Vector<Real>,
    ) -> Self {
        Self {
            has_hit: true,
            point: inter.point,
            position: from + motion * inter.time_of_impact,
            normal: inter.normal.into_inner(),
            collider: Some(handle),
            friction: collider.friction,
            feature: inter.feature,
            distance: inter.time_of_impact * motion.norm(),
        }
    }
}

/// Can a scene query with the given groups hit `collider`?
fn accepts(collider: &Collider, groups: CollisionGroups) -> bool {
    !collider.flags.contains(ColliderFlags::PROBE) && groups.test(collider.groups)
}

impl CollisionWorld {
    /// Casts a ray from `from` to `to` and returns the closest hit.
    ///
    /// Probes and colliders filtered out by `groups` are ignored. A ray starting inside of a
    /// collider hits it at distance zero.
    pub fn ray_test(&self, from: &Point<Real>, to: &Point<Real>, groups: CollisionGroups) -> RayHit {
        let ray = Ray::new(*from, to - from);
        let length = ray.dir.norm();
        let mut best = RayHit::default();
        let mut best_toi = Real::MAX;

        self.tree.traverse_ray(&ray, 1.0, |handle| {
            let Some(collider) = self.colliders.get(handle) else {
                return;
            };

            if !accepts(collider, groups) {
                return;
            }

            let Some(inter) =
                collider
                    .shape
                    .cast_ray_and_get_normal(&collider.shape_position(), &ray, 1.0, true)
            else {
                return;
            };

            if inter.time_of_impact < best_toi {
                best_toi = inter.time_of_impact;
                best = RayHit {
                    has_hit: true,
                    point: ray.point_at(inter.time_of_impact),
                    normal: inter.normal,
                    collider: Some(handle),
                    friction: collider.friction,
                    feature: inter.feature,
                    distance: inter.time_of_impact * length,
                };
            }
        });

        best
    }

    /// Sweeps a sphere of the given `radius` from `from` to `to` and returns the closest hit.
    pub fn sphere_sweep(
        &self,
        from: &Point<Real>,
        to: &Point<Real>,
        radius: Real,
        groups: CollisionGroups,
    ) -> SweepHit {
        let motion = to - from;
        let ray = Ray::new(*from, motion);
        let mut best: Option<(ColliderHandle, SweepIntersection)> = None;

        self.tree.traverse_sweep(&ray, 1.0, radius, |handle| {
            let Some(collider) = self.colliders.get(handle) else {
                return;
            };

            if !accepts(collider, groups) {
                return;
            }

            if let Some(inter) = sweep_sphere(
                &collider.shape_position(),
                &collider.shape,
                from,
                &motion,
                radius,
                1.0,
            ) {
                keep_closest(&mut best, handle, inter);
            }
        });

        self.sweep_hit(best, from, &motion)
    }

    /// Sweeps a capsule from `from` to `to` and returns the closest hit.
    ///
    /// The capsule axis is the `y` axis rotated by `rotation`, and it keeps that orientation
    /// along the motion.
    pub fn capsule_sweep(
        &self,
        from: &Point<Real>,
        to: &Point<Real>,
        half_height: Real,
        radius: Real,
        rotation: &Rotation<Real>,
        groups: CollisionGroups,
    ) -> SweepHit {
        let motion = to - from;
        let ray = Ray::new(*from, motion);
        let capsule = Capsule::new_y(half_height, radius);
        let capsule_pos = Isometry::from_parts(from.coords.into(), *rotation);
        let mut best: Option<(ColliderHandle, SweepIntersection)> = None;

        self.tree
            .traverse_sweep(&ray, 1.0, half_height + radius, |handle| {
                let Some(collider) = self.colliders.get(handle) else {
                    return;
                };

                if !accepts(collider, groups) {
                    return;
                }

                if let Some(inter) = sweep_capsule(
                    &collider.shape_position(),
                    &collider.shape,
                    &capsule,
                    &capsule_pos,
                    &motion,
                    1.0,
                ) {
                    keep_closest(&mut best, handle, inter);
                }
            });

        self.sweep_hit(best, from, &motion)
    }

    fn sweep_hit(
        &self,
        best: Option<(ColliderHandle, SweepIntersection)>,
        from: &Point<Real>,
        motion: &Vector<Real>,
    ) -> SweepHit {
        best.and_then(|(handle, inter)| {
            let collider = self.colliders.get(handle)?;
            Some(SweepHit::new(handle, collider, &inter, from, motion))
        })
        .unwrap_or_default()
    }
}

fn keep_closest(
    best: &mut Option<(ColliderHandle, SweepIntersection)>,
    handle: ColliderHandle,
    inter: SweepIntersection,
) {
    if best
        .as_ref()
        .map_or(true, |(_, b)| inter.time_of_impact < b.time_of_impact)
    {
        *best = Some((handle, inter));
    }
}
