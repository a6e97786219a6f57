use crate::math::{AngularInertia, Point, Real, Vector};
use crate::pipeline::{Collider, ColliderSet, CollisionManifold, WorldSettings};
use crate::utils::WBasis;

/// Mass data of the two colliders of a manifold, cached for the duration of a step.
#[derive(Copy, Clone, Debug)]
struct ManifoldConstraint {
    manifold: usize,
    inv_mass_a: Real,
    inv_mass_b: Real,
    inv_inertia_a: AngularInertia<Real>,
    inv_inertia_b: AngularInertia<Real>,
}

/// A sequential-impulse solver for contact and friction constraints.
#[derive(Clone, Debug, Default)]
pub struct VelocitySolver {
    constraints: Vec<ManifoldConstraint>,
}

/// Does the contact between `a` and `b` take part in contact resolution?
pub(crate) fn resolves_contacts(a: &Collider, b: &Collider) -> bool {
    a.has_response() && b.has_response() && !(a.is_static() && b.is_static())
}

fn effective_mass(
    inv_mass: Real,
    inv_inertia_a: &AngularInertia<Real>,
    r_a: &Vector<Real>,
    inv_inertia_b: &AngularInertia<Real>,
    r_b: &Vector<Real>,
    dir: &Vector<Real>,
) -> Real {
    let ang_a = (inv_inertia_a * r_a.cross(dir)).cross(r_a).dot(dir);
    let ang_b = (inv_inertia_b * r_b.cross(dir)).cross(r_b).dot(dir);
    let k = inv_mass + ang_a + ang_b;

    if k > 1.0e-8 {
        1.0 / k
    } else {
        0.0
    }
}

impl VelocitySolver {
    /// A solver without constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of manifolds handled by the last call to [`VelocitySolver::init`].
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Computes the lever arms, effective masses, tangent bases and biases of the contacts.
    ///
    /// Manifolds involving a collider without response, or between two immovable colliders,
    /// are skipped.
    pub fn init(
        &mut self,
        manifolds: &mut [CollisionManifold],
        colliders: &ColliderSet,
        settings: &WorldSettings,
        dt: Real,
    ) {
        self.constraints.clear();
        let inv_dt = if dt > 0.0 { 1.0 / dt } else { 0.0 };

        for (i, manifold) in manifolds.iter_mut().enumerate() {
            let (Some(a), Some(b)) = (
                colliders.get(manifold.collider_a),
                colliders.get(manifold.collider_b),
            ) else {
                continue;
            };

            if !resolves_contacts(a, b) {
                continue;
            }

            let constraint = ManifoldConstraint {
                manifold: i,
                inv_mass_a: a.inv_mass(),
                inv_mass_b: b.inv_mass(),
                inv_inertia_a: a.inverse_world_inertia_tensor(),
                inv_inertia_b: b.inverse_world_inertia_tensor(),
            };
            let inv_mass = constraint.inv_mass_a + constraint.inv_mass_b;
            let com_a = a.center_of_mass();
            let com_b = b.center_of_mass();

            for pt in &mut manifold.points {
                let n = pt.solver_normal().into_inner();
                let r_a = pt.world_a - com_a;
                let r_b = pt.world_b - com_b;
                let tangents = n.orthonormal_basis();

                let mass = |dir: &Vector<Real>| {
                    effective_mass(
                        inv_mass,
                        &constraint.inv_inertia_a,
                        &r_a,
                        &constraint.inv_inertia_b,
                        &r_b,
                        dir,
                    )
                };
                pt.normal_mass = mass(&n);
                pt.tangent_masses = [mass(&tangents[0]), mass(&tangents[1])];
                pt.r_a = r_a;
                pt.r_b = r_b;
                pt.tangents = tangents;
                pt.velocity_bias = settings.baumgarte_factor
                    * (settings.allowed_penetration - pt.depth).min(0.0)
                    * inv_dt;
            }

            self.constraints.push(constraint);
        }
    }

    /// Applies the impulses the contacts inherited from the previous step.
    pub fn warm_start(&self, manifolds: &[CollisionManifold], colliders: &mut ColliderSet) {
        for constraint in &self.constraints {
            let manifold = &manifolds[constraint.manifold];
            let Some((a, b)) = colliders.get_pair_mut(manifold.collider_a, manifold.collider_b)
            else {
                continue;
            };

            for pt in &manifold.points {
                let n = pt.solver_normal().into_inner();
                let impulse = n * pt.normal_impulse
                    + pt.tangents[0] * pt.tangent_impulses[0]
                    + pt.tangents[1] * pt.tangent_impulses[1];
                constraint.apply(a, b, &pt.r_a, &pt.r_b, &impulse);
            }
        }
    }

    /// Runs `iterations` passes over the contacts, in manifold then point order.
    pub fn solve(
        &self,
        manifolds: &mut [CollisionManifold],
        colliders: &mut ColliderSet,
        iterations: usize,
    ) {
        for _ in 0..iterations {
            for constraint in &self.constraints {
                let manifold = &mut manifolds[constraint.manifold];
                let friction = manifold.friction;
                let Some((a, b)) =
                    colliders.get_pair_mut(manifold.collider_a, manifold.collider_b)
                else {
                    continue;
                };

                for pt in &mut manifold.points {
                    let n = pt.solver_normal().into_inner();

                    // Non-penetration.
                    let vn = relative_velocity(a, b, &pt.r_a, &pt.r_b).dot(&n);
                    let delta = -(vn + pt.velocity_bias) * pt.normal_mass;
                    let new_impulse = (pt.normal_impulse + delta).max(0.0);
                    let dlambda = new_impulse - pt.normal_impulse;
                    pt.normal_impulse = new_impulse;
                    constraint.apply(a, b, &pt.r_a, &pt.r_b, &(n * dlambda));

                    // Friction.
                    let dv = relative_velocity(a, b, &pt.r_a, &pt.r_b);
                    let old = pt.tangent_impulses;
                    let mut new = [
                        old[0] - dv.dot(&pt.tangents[0]) * pt.tangent_masses[0],
                        old[1] - dv.dot(&pt.tangents[1]) * pt.tangent_masses[1],
                    ];
                    let limit = friction * pt.normal_impulse;
                    let norm = (new[0] * new[0] + new[1] * new[1]).sqrt();

                    if norm > limit {
                        let scale = if norm > 0.0 { limit / norm } else { 0.0 };
                        new = [new[0] * scale, new[1] * scale];
                    }

                    pt.tangent_impulses = new;
                    let impulse = pt.tangents[0] * (new[0] - old[0])
                        + pt.tangents[1] * (new[1] - old[1]);
                    constraint.apply(a, b, &pt.r_a, &pt.r_b, &impulse);
                }
            }
        }
    }
}

impl ManifoldConstraint {
    /// Applies `-impulse` to `a` and `impulse` to `b`.
    fn apply(
        &self,
        a: &mut Collider,
        b: &mut Collider,
        r_a: &Vector<Real>,
        r_b: &Vector<Real>,
        impulse: &Vector<Real>,
    ) {
        a.linvel -= impulse * self.inv_mass_a;
        a.angvel -= self.inv_inertia_a * r_a.cross(impulse);
        b.linvel += impulse * self.inv_mass_b;
        b.angvel += self.inv_inertia_b * r_b.cross(impulse);
    }
}

/// The velocity of the contact point on `b` relative to the one on `a`.
fn relative_velocity(
    a: &Collider,
    b: &Collider,
    r_a: &Vector<Real>,
    r_b: &Vector<Real>,
) -> Vector<Real> {
    let com_a: Point<Real> = a.center_of_mass();
    let com_b: Point<Real> = b.center_of_mass();
    b.velocity_at_point(&(com_b + r_b)) - a.velocity_at_point(&(com_a + r_a))
}

#[cfg(test)]
mod test {
    use super::VelocitySolver;
    use crate::math::{Real, Vector};
    use crate::pipeline::{
        ColliderBuilder, ColliderSet, CollisionManifold, ContactPoint, IdAllocator, WorldSettings,
    };
    use crate::query::Contact;

    #[test]
    fn resting_ball_stops_sinking() {
        let mut ids = IdAllocator::new();
        let mut colliders = ColliderSet::new();
        let mut ground = ColliderBuilder::cuboid(5.0, 0.5, 5.0).fixed().build();
        ground.id = ids.allocate();
        let mut ball = ColliderBuilder::ball(0.5)
            .translation(Vector::new(0.0, 0.99, 0.0))
            .linvel(Vector::new(1.0, -2.0, 0.0))
            .friction(1.0)
            .build();
        ball.id = ids.allocate();
        let ball_handle = colliders.insert(ball);
        let ground_handle = colliders.insert(ground);

        // Ball first: its kind is lower.
        let contact = Contact::new(
            [0.0, -0.5, 0.0].into(),
            [0.0, 0.5, 0.0].into(),
            -Vector::y_axis(),
            Vector::y_axis(),
            -0.01,
        );
        let mut manifold = CollisionManifold::new(
            ball_handle,
            &colliders[ball_handle],
            ground_handle,
            &colliders[ground_handle],
        );
        manifold.points.push(ContactPoint::from_contact(
            &contact,
            &colliders[ball_handle],
            &colliders[ground_handle],
        ));
        let mut manifolds = vec![manifold];

        let settings = WorldSettings::default();
        let mut solver = VelocitySolver::new();
        solver.init(&mut manifolds, &colliders, &settings, 1.0 / 60.0);
        solver.warm_start(&manifolds, &mut colliders);
        solver.solve(&mut manifolds, &mut colliders, settings.velocity_iterations);

        assert_eq!(solver.num_constraints(), 1);
        let ball = &colliders[ball_handle];
        let pt = &manifolds[0].points[0];
        let vn = (colliders[ground_handle].velocity_at_point(&pt.world_b)
            - ball.velocity_at_point(&pt.world_a))
        .dot(&pt.solver_normal());
        // The ball no longer moves into the ground.
        assert!(vn >= -1.0e-4 as Real, "vn = {}", vn);
        assert!(pt.normal_impulse > 0.0);
        // Friction is bounded by the normal impulse.
        let tangent = (pt.tangent_impulses[0].powi(2) + pt.tangent_impulses[1].powi(2)).sqrt();
        assert!(tangent <= manifolds[0].friction * pt.normal_impulse + 1.0e-5);
        // The ground did not move.
        assert_eq!(colliders[ground_handle].linvel, Vector::zeros());
    }

    #[test]
    fn probes_are_not_solved() {
        let mut ids = IdAllocator::new();
        let mut colliders = ColliderSet::new();
        let mut probe = ColliderBuilder::ball(0.5)
            .flags(crate::pipeline::ColliderFlags::PROBE)
            .linvel(-Vector::y())
            .build();
        probe.id = ids.allocate();
        let mut ground = ColliderBuilder::cuboid(5.0, 0.5, 5.0).fixed().build();
        ground.id = ids.allocate();
        let h1 = colliders.insert(probe);
        let h2 = colliders.insert(ground);

        let mut manifold = CollisionManifold::new(h1, &colliders[h1], h2, &colliders[h2]);
        let contact = Contact::new(
            [0.0, -0.5, 0.0].into(),
            [0.0, 0.4, 0.0].into(),
            -Vector::y_axis(),
            Vector::y_axis(),
            -0.1,
        );
        manifold.points.push(ContactPoint::from_contact(
            &contact,
            &colliders[h1],
            &colliders[h2],
        ));
        let mut manifolds = vec![manifold];

        let mut solver = VelocitySolver::new();
        solver.init(&mut manifolds, &colliders, &WorldSettings::default(), 1.0 / 60.0);
        solver.solve(&mut manifolds, &mut colliders, 10);
        assert_eq!(solver.num_constraints(), 0);
        assert_eq!(colliders[h1].linvel, -Vector::y());
    }
}
