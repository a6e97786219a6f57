use crate::math::{Isometry, Point, Real, UnitVector, Vector};
use crate::pipeline::{Collider, ColliderHandle};
use crate::query::{Contact, ContactKind};
use na::Unit;
use smallvec::SmallVec;

/// A contact point between two colliders, with its solver state.
///
/// The geometric data are refreshed once per step after integration from the body-local anchors.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug)]
pub struct ContactPoint {
    /// The contact point on the first collider, in world-space.
    pub world_a: Point<Real>,
    /// The contact point on the second collider, in world-space.
    pub world_b: Point<Real>,
    /// The outward normal of the first collider at the contact, in world-space.
    pub normal_a: UnitVector<Real>,
    /// The outward normal of the second collider at the contact, in world-space.
    ///
    /// Equal to `-normal_a` except for contacts on mesh seams, where the mesh normal is
    /// corrected toward the face normal.
    pub normal_b: UnitVector<Real>,
    /// The contact point on the first collider, in its body frame.
    pub local_a: Point<Real>,
    /// The contact point on the second collider, in its body frame.
    pub local_b: Point<Real>,
    /// The normal of the first collider, in its body frame.
    pub local_normal_a: UnitVector<Real>,
    /// The normal of the second collider, in its body frame.
    pub local_normal_b: UnitVector<Real>,
    /// The penetration depth. Positive when the colliders overlap.
    pub depth: Real,
    /// The features the contact was generated from.
    pub kind: ContactKind,

    /// The impulse accumulated along the normal.
    pub normal_impulse: Real,
    /// The impulses accumulated along the two tangents.
    pub tangent_impulses: [Real; 2],
    /// The effective mass along the normal.
    pub normal_mass: Real,
    /// The effective masses along the two tangents.
    pub tangent_masses: [Real; 2],
    /// The tangent basis used for friction.
    pub tangents: [Vector<Real>; 2],
    /// The velocity bias pushing the colliders apart.
    pub velocity_bias: Real,
    /// The lever arm of the contact on the first collider.
    pub r_a: Vector<Real>,
    /// The lever arm of the contact on the second collider.
    pub r_b: Vector<Real>,
}

impl ContactPoint {
    /// Converts a contact computed between the shapes of `collider_a` and `collider_b`.
    ///
    /// The solver state starts at zero.
    pub fn from_contact(contact: &Contact, collider_a: &Collider, collider_b: &Collider) -> Self {
        let local_a = collider_a.local_offset * contact.point1;
        let local_b = collider_b.local_offset * contact.point2;
        let local_normal_a = collider_a.local_offset * contact.normal1;
        let local_normal_b = collider_b.local_offset * contact.normal2;

        ContactPoint {
            world_a: collider_a.position * local_a,
            world_b: collider_b.position * local_b,
            normal_a: collider_a.position * local_normal_a,
            normal_b: collider_b.position * local_normal_b,
            local_a,
            local_b,
            local_normal_a,
            local_normal_b,
            depth: -contact.dist,
            kind: contact.kind,
            normal_impulse: 0.0,
            tangent_impulses: [0.0; 2],
            normal_mass: 0.0,
            tangent_masses: [0.0; 2],
            tangents: [Vector::zeros(); 2],
            velocity_bias: 0.0,
            r_a: Vector::zeros(),
            r_b: Vector::zeros(),
        }
    }

    /// Recomputes the world-space data and the depth from the body-local anchors.
    ///
    /// The depth is `(world_a - world_b) · normal_a`.
    pub fn refresh(&mut self, pos_a: &Isometry<Real>, pos_b: &Isometry<Real>) {
        self.world_a = pos_a * self.local_a;
        self.world_b = pos_b * self.local_b;
        self.normal_a = pos_a * self.local_normal_a;
        self.normal_b = pos_b * self.local_normal_b;
        self.depth = (self.world_a - self.world_b).dot(&self.normal_a);
    }

    /// The normal along which the solvers push the colliders, pointing from the first collider
    /// toward the second one.
    pub fn solver_normal(&self) -> UnitVector<Real> {
        Unit::try_new(self.normal_a.into_inner() - self.normal_b.into_inner(), 1.0e-6)
            .unwrap_or(self.normal_a)
    }
}

/// The contact points between two colliders.
#[derive(Clone, Debug)]
pub struct CollisionManifold {
    /// The first collider, with the lower shape kind.
    pub collider_a: ColliderHandle,
    /// The second collider.
    pub collider_b: ColliderHandle,
    /// The contact points.
    pub points: SmallVec<[ContactPoint; 4]>,
    /// The average of the normals of the points, pointing from the first collider toward the
    /// second one.
    pub normal: Vector<Real>,
    /// The depth of the deepest point.
    pub max_depth: Real,
    /// The combined friction coefficient of the two colliders.
    pub friction: Real,
}

impl CollisionManifold {
    /// An empty manifold between two colliders.
    pub fn new(
        collider_a: ColliderHandle,
        a: &Collider,
        collider_b: ColliderHandle,
        b: &Collider,
    ) -> Self {
        Self {
            collider_a,
            collider_b,
            points: SmallVec::new(),
            normal: Vector::zeros(),
            max_depth: 0.0,
            friction: (a.friction * b.friction).max(0.0).sqrt(),
        }
    }

    /// Recomputes the aggregate normal and the maximum depth from the points.
    pub fn update_aggregates(&mut self) {
        let sum: Vector<Real> = self
            .points
            .iter()
            .map(|pt| pt.solver_normal().into_inner())
            .sum();
        self.normal = sum.try_normalize(1.0e-6).unwrap_or(sum);
        self.max_depth = self
            .points
            .iter()
            .map(|pt| pt.depth)
            .fold(Real::MIN, Real::max);
    }

    /// Refreshes all the points of this manifold after the colliders moved.
    pub fn refresh(&mut self, pos_a: &Isometry<Real>, pos_b: &Isometry<Real>) {
        for pt in &mut self.points {
            pt.refresh(pos_a, pos_b);
        }
        self.update_aggregates();
    }

    /// Copies the accumulated impulses of the matching points of `previous`, scaled by `factor`.
    ///
    /// A point matches if its anchor on the first collider lies within `max_dist` of the anchor
    /// of a point of `previous`. Each previous point is inherited at most once.
    pub fn warm_start_from(&mut self, previous: &CollisionManifold, factor: Real, max_dist: Real) {
        let mut taken: SmallVec<[bool; 4]> = SmallVec::from_elem(false, previous.points.len());

        for pt in &mut self.points {
            let best = previous
                .points
                .iter()
                .enumerate()
                .filter(|(i, _)| !taken[*i])
                .map(|(i, old)| (i, na::distance_squared(&old.local_a, &pt.local_a)))
                .filter(|(_, dist)| *dist <= max_dist * max_dist)
                .min_by(|a, b| a.1.total_cmp(&b.1));

            if let Some((i, _)) = best {
                taken[i] = true;
                let old = &previous.points[i];
                pt.normal_impulse = old.normal_impulse * factor;
                pt.tangent_impulses = [
                    old.tangent_impulses[0] * factor,
                    old.tangent_impulses[1] * factor,
                ];
            }
        }
    }
}
