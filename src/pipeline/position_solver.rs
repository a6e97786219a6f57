use crate::math::{Real, Vector};
use crate::pipeline::{ColliderSet, CollisionManifold, WorldSettings};
use crate::pipeline::velocity_solver::resolves_contacts;
use ordered_float::OrderedFloat;

/// Pushes overlapping colliders apart by translating them.
///
/// The corrections are accumulated over `position_iterations` passes then committed to the
/// collider positions. Only the penetration in excess of `penetration_slack` is corrected.
#[derive(Clone, Debug, Default)]
pub struct PositionSolver {
    corrections: Vec<Vector<Real>>,
    order: Vec<usize>,
}

impl PositionSolver {
    /// A position solver with empty buffers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Corrects the penetrations of the points of `manifolds`.
    ///
    /// Each point depth must be up to date with the current positions. Immovable colliders get a
    /// zero weight, so a dynamic collider touching a static one takes the whole correction.
    pub fn solve(
        &mut self,
        manifolds: &[CollisionManifold],
        colliders: &mut ColliderSet,
        settings: &WorldSettings,
    ) {
        self.corrections.clear();
        self.corrections
            .resize(colliders.index_bound(), Vector::zeros());

        for _ in 0..settings.position_iterations {
            for manifold in manifolds {
                let (Some(a), Some(b)) = (
                    colliders.get(manifold.collider_a),
                    colliders.get(manifold.collider_b),
                ) else {
                    continue;
                };

                if !resolves_contacts(a, b) {
                    continue;
                }

                let w_a: Real = if a.is_dynamic() { 1.0 } else { 0.0 };
                let w_b: Real = if b.is_dynamic() { 1.0 } else { 0.0 };
                let (w_a, w_b) = (w_a / (w_a + w_b), w_b / (w_a + w_b));
                let ia = manifold.collider_a.index as usize;
                let ib = manifold.collider_b.index as usize;

                // Face contacts first, then the deepest ones.
                self.order.clear();
                self.order.extend(0..manifold.points.len());
                self.order.sort_by_key(|i| {
                    let pt = &manifold.points[*i];
                    (pt.kind, OrderedFloat(-pt.depth))
                });

                for i in &self.order {
                    let pt = &manifold.points[*i];
                    let n = pt.solver_normal().into_inner();
                    let depth =
                        pt.depth - (self.corrections[ib] - self.corrections[ia]).dot(&n);

                    if depth > settings.penetration_slack {
                        let excess = depth - settings.penetration_slack;
                        self.corrections[ia] -= n * (excess * w_a);
                        self.corrections[ib] += n * (excess * w_b);
                    }
                }
            }
        }

        for (handle, collider) in colliders.iter_mut() {
            if collider.is_dynamic() {
                collider.position.translation.vector += self.corrections[handle.index as usize];
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::PositionSolver;
    use crate::math::Vector;
    use crate::pipeline::{
        ColliderBuilder, ColliderSet, CollisionManifold, ContactPoint, IdAllocator, WorldSettings,
    };
    use crate::query::Contact;

    #[test]
    fn dynamic_collider_takes_the_whole_correction() {
        let mut ids = IdAllocator::new();
        let mut colliders = ColliderSet::new();
        let mut ball = ColliderBuilder::ball(0.5)
            .translation(Vector::new(0.0, 0.8, 0.0))
            .build();
        ball.id = ids.allocate();
        let mut ground = ColliderBuilder::cuboid(5.0, 0.5, 5.0).fixed().build();
        ground.id = ids.allocate();
        let h1 = colliders.insert(ball);
        let h2 = colliders.insert(ground);

        let contact = Contact::new(
            [0.0, -0.5, 0.0].into(),
            [0.0, 0.5, 0.0].into(),
            -Vector::y_axis(),
            Vector::y_axis(),
            -0.2,
        );
        let mut manifold = CollisionManifold::new(h1, &colliders[h1], h2, &colliders[h2]);
        manifold.points.push(ContactPoint::from_contact(
            &contact,
            &colliders[h1],
            &colliders[h2],
        ));

        let settings = WorldSettings::default();
        PositionSolver::new().solve(&[manifold], &mut colliders, &settings);

        let y = colliders[h1].position().translation.vector.y;
        assert_relative_eq!(y, 0.8 + 0.2 - settings.penetration_slack, epsilon = 1.0e-5);
        assert_eq!(colliders[h2].position().translation.vector, Vector::zeros());
    }

    #[test]
    fn two_dynamic_colliders_share_the_correction() {
        let mut ids = IdAllocator::new();
        let mut colliders = ColliderSet::new();
        let mut a = ColliderBuilder::ball(0.5).build();
        a.id = ids.allocate();
        let mut b = ColliderBuilder::ball(0.5)
            .translation(Vector::new(0.9, 0.0, 0.0))
            .build();
        b.id = ids.allocate();
        let ha = colliders.insert(a);
        let hb = colliders.insert(b);

        let contact = Contact::new(
            [0.5, 0.0, 0.0].into(),
            [-0.5, 0.0, 0.0].into(),
            Vector::x_axis(),
            -Vector::x_axis(),
            -0.1,
        );
        let mut manifold = CollisionManifold::new(ha, &colliders[ha], hb, &colliders[hb]);
        manifold.points.push(ContactPoint::from_contact(
            &contact,
            &colliders[ha],
            &colliders[hb],
        ));

        let settings = WorldSettings {
            penetration_slack: 0.0,
            ..WorldSettings::default()
        };
        PositionSolver::new().solve(&[manifold], &mut colliders, &settings);

        let xa = colliders[ha].position().translation.vector.x;
        let xb = colliders[hb].position().translation.vector.x;
        assert_relative_eq!(xa, -0.05, epsilon = 1.0e-5);
        assert_relative_eq!(xb, 0.95, epsilon = 1.0e-5);
    }
}
