use crate::math::{AngularInertia, Isometry, Point, Real, Rotation};
use num::Zero;

const EPSILON: Real = f32::EPSILON as Real;

/// The local mass properties of a rigid-body.
///
/// Unlike a density-based description, these are built from the total mass of the body: a
/// collider only declares how heavy it is and its shape distributes that mass. A zero mass
/// describes an immovable body and yields zero inverse mass and inertia.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct MassProperties {
    /// The center of mass expressed in the local-space of the shape.
    pub local_com: Point<Real>,
    /// The mass.
    pub mass: Real,
    /// The inverse of the mass, zero for immovable bodies.
    pub inv_mass: Real,
    /// The angular inertia tensor, relative to the center of mass, in the shape local-space.
    pub inertia: AngularInertia<Real>,
    /// The inverse of `inertia`, zero for immovable bodies.
    pub inv_inertia: AngularInertia<Real>,
}

impl Default for MassProperties {
    fn default() -> Self {
        Self::zero()
    }
}

impl MassProperties {
    /// Initializes the mass properties from the given center-of-mass, mass, and inertia tensor.
    pub fn new(local_com: Point<Real>, mass: Real, inertia: AngularInertia<Real>) -> Self {
        if mass <= EPSILON || !mass.is_finite() {
            return Self {
                local_com,
                ..Self::zero()
            };
        }

        let inv_inertia = inertia.try_inverse().unwrap_or_else(AngularInertia::zeros);

        Self {
            local_com,
            mass,
            inv_mass: 1.0 / mass,
            inertia,
            inv_inertia,
        }
    }

    /// The mass properties of an immovable body.
    pub fn zero() -> Self {
        Self {
            local_com: Point::origin(),
            mass: 0.0,
            inv_mass: 0.0,
            inertia: AngularInertia::zeros(),
            inv_inertia: AngularInertia::zeros(),
        }
    }

    /// Does this describe an immovable body?
    pub fn is_zero(&self) -> bool {
        self.inv_mass.is_zero()
    }

    /// The world-space center of mass of the rigid-body.
    pub fn world_com(&self, pos: &Isometry<Real>) -> Point<Real> {
        pos * self.local_com
    }

    /// The world-space inverse inertia tensor `R · I⁻¹ · Rᵀ`.
    pub fn world_inv_inertia(&self, rot: &Rotation<Real>) -> AngularInertia<Real> {
        if self.inv_inertia.is_zero() {
            return AngularInertia::zeros();
        }

        let r = rot.to_rotation_matrix().into_inner();
        r * self.inv_inertia * r.transpose()
    }

    /// Rotates the inertia tensor and moves the center of mass by `m`.
    pub fn transform_by(&self, m: &Isometry<Real>) -> Self {
        let r = m.rotation.to_rotation_matrix().into_inner();
        Self::new(m * self.local_com, self.mass, r * self.inertia * r.transpose())
    }
}
