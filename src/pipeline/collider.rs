use crate::bounding_volume::Aabb;
use crate::math::{AngularInertia, Isometry, Point, Real, Rotation, Vector};
use crate::partitioning::TreeSlot;
use crate::pipeline::{ColliderId, CollisionGroups};
use crate::shape::SharedShape;

/// Flags altering how a collider takes part in the simulation.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ColliderFlags(u8);

bitflags::bitflags! {
    impl ColliderFlags: u8 {
        /// The collider never moves and is never integrated. Pairs of static colliders are
        /// never tested.
        const STATIC = 1;
        /// Contacts involving this collider are detected but never resolved by the solvers.
        const NO_RESPONSE = 1 << 1;
        /// The collider only reports overlaps: it is ignored by the solvers and by scene
        /// queries.
        const PROBE = 1 << 2;
    }
}

/// A positioned and oriented instance of a shared shape, with its mass and velocity state.
///
/// The shape is placed at `position * local_offset`. The origin of `position` is the center of
/// mass used by the solvers. A collider with a zero mass is immovable for the solvers even if it
/// is not flagged [`ColliderFlags::STATIC`].
#[derive(Clone, Debug)]
pub struct Collider {
    pub(crate) shape: SharedShape,
    pub(crate) position: Isometry<Real>,
    pub(crate) local_offset: Isometry<Real>,
    pub(crate) prev_position: Isometry<Real>,
    pub(crate) mass: Real,
    pub(crate) inv_mass: Real,
    pub(crate) local_inertia: AngularInertia<Real>,
    pub(crate) local_inv_inertia: AngularInertia<Real>,
    /// The linear velocity of this collider.
    pub linvel: Vector<Real>,
    /// The angular velocity of this collider.
    pub angvel: Vector<Real>,
    /// The friction coefficient of this collider.
    pub friction: Real,
    /// The multiplier applied to the world gravity for this collider.
    pub gravity_scale: Real,
    /// The collision groups of this collider.
    pub groups: CollisionGroups,
    /// The flags of this collider.
    pub flags: ColliderFlags,
    pub(crate) id: ColliderId,
    pub(crate) tree_slot: Option<TreeSlot>,
    pub(crate) dirty_index: Option<usize>,
}

impl Collider {
    /// The shape of this collider.
    pub fn shape(&self) -> &SharedShape {
        &self.shape
    }

    /// The position of the body frame of this collider.
    pub fn position(&self) -> &Isometry<Real> {
        &self.position
    }

    /// The position of the shape, relative to the body frame.
    pub fn local_offset(&self) -> &Isometry<Real> {
        &self.local_offset
    }

    /// The world position of the shape: `position * local_offset`.
    pub fn shape_position(&self) -> Isometry<Real> {
        self.position * self.local_offset
    }

    /// The position of this collider at the beginning of the last step.
    pub fn previous_position(&self) -> &Isometry<Real> {
        &self.prev_position
    }

    /// The center of mass of this collider, in world-space.
    pub fn center_of_mass(&self) -> Point<Real> {
        self.position.translation.vector.into()
    }

    /// The mass of this collider.
    pub fn mass(&self) -> Real {
        self.mass
    }

    /// The inverse mass of this collider. Zero for immovable colliders.
    pub fn inv_mass(&self) -> Real {
        self.inv_mass
    }

    /// The identifier assigned by the world this collider was added to.
    pub fn id(&self) -> ColliderId {
        self.id
    }

    /// The slot of this collider in the broadphase tree, if it is registered in a world.
    pub fn tree_slot(&self) -> Option<TreeSlot> {
        self.tree_slot
    }

    /// Is this collider immovable for the solvers?
    pub fn is_static(&self) -> bool {
        self.flags.contains(ColliderFlags::STATIC) || self.inv_mass == 0.0
    }

    /// Is this collider moved by the simulation?
    pub fn is_dynamic(&self) -> bool {
        !self.is_static()
    }

    /// Does this collider take part in contact resolution?
    pub fn has_response(&self) -> bool {
        !self
            .flags
            .intersects(ColliderFlags::NO_RESPONSE | ColliderFlags::PROBE)
    }

    /// The world-space AABB of the shape of this collider.
    pub fn compute_aabb(&self) -> Aabb {
        self.shape.compute_aabb(&self.shape_position())
    }

    /// Computes the local-space inertia tensor of this collider from its shape and mass.
    ///
    /// Returns a zero tensor for a zero mass.
    pub fn calc_inertia_tensor(&self) -> AngularInertia<Real> {
        if self.mass > 0.0 {
            self.shape.inertia_tensor(self.mass)
        } else {
            AngularInertia::zeros()
        }
    }

    /// Recomputes the mass-dependent quantities of this collider.
    pub(crate) fn update_mass_properties(&mut self) {
        let dynamic = self.mass > 0.0 && !self.flags.contains(ColliderFlags::STATIC);

        if dynamic {
            self.inv_mass = 1.0 / self.mass;
            self.local_inertia = self.calc_inertia_tensor();
            self.local_inv_inertia = self
                .local_inertia
                .try_inverse()
                .unwrap_or_else(AngularInertia::zeros);
        } else {
            self.inv_mass = 0.0;
            self.local_inertia = AngularInertia::zeros();
            self.local_inv_inertia = AngularInertia::zeros();
        }
    }

    /// The local-space inertia tensor computed when this collider was added to a world.
    pub fn local_inertia(&self) -> &AngularInertia<Real> {
        &self.local_inertia
    }

    /// The world-space inverse inertia tensor `R · I⁻¹ · Rᵀ`. Zero for immovable colliders.
    pub fn inverse_world_inertia_tensor(&self) -> AngularInertia<Real> {
        if self.is_static() {
            return AngularInertia::zeros();
        }

        let rot = self.position.rotation.to_rotation_matrix();
        rot.matrix() * self.local_inv_inertia * rot.matrix().transpose()
    }

    /// The velocity of the material point of this collider located at `point`.
    pub fn velocity_at_point(&self, point: &Point<Real>) -> Vector<Real> {
        self.linvel + self.angvel.cross(&(point - self.center_of_mass()))
    }
}

/// A builder of [`Collider`]s.
#[derive(Clone, Debug)]
#[must_use = "Builder functions return the updated builder"]
pub struct ColliderBuilder {
    shape: SharedShape,
    position: Isometry<Real>,
    local_offset: Isometry<Real>,
    mass: Real,
    linvel: Vector<Real>,
    angvel: Vector<Real>,
    friction: Real,
    gravity_scale: Real,
    groups: CollisionGroups,
    flags: ColliderFlags,
}

impl ColliderBuilder {
    /// The default friction coefficient.
    pub const DEFAULT_FRICTION: Real = 0.5;

    /// A builder of a dynamic collider with a unit mass and the given shape.
    pub fn new(shape: SharedShape) -> Self {
        Self {
            shape,
            position: Isometry::identity(),
            local_offset: Isometry::identity(),
            mass: 1.0,
            linvel: Vector::zeros(),
            angvel: Vector::zeros(),
            friction: Self::DEFAULT_FRICTION,
            gravity_scale: 1.0,
            groups: CollisionGroups::default(),
            flags: ColliderFlags::empty(),
        }
    }

    /// A builder of a ball collider.
    pub fn ball(radius: Real) -> Self {
        Self::new(SharedShape::ball(radius))
    }

    /// A builder of a cuboid collider with the given half-extents.
    pub fn cuboid(hx: Real, hy: Real, hz: Real) -> Self {
        Self::new(SharedShape::cuboid(hx, hy, hz))
    }

    /// A builder of a capsule collider aligned with the `y` axis.
    pub fn capsule_y(half_height: Real, radius: Real) -> Self {
        Self::new(SharedShape::capsule_y(half_height, radius))
    }

    /// Sets the position of the body frame.
    pub fn position(mut self, position: Isometry<Real>) -> Self {
        self.position = position;
        self
    }

    /// Sets the translational part of the body position.
    pub fn translation(mut self, translation: Vector<Real>) -> Self {
        self.position.translation.vector = translation;
        self
    }

    /// Sets the rotational part of the body position.
    pub fn rotation(mut self, rotation: Rotation<Real>) -> Self {
        self.position.rotation = rotation;
        self
    }

    /// Sets the position of the shape relative to the body frame.
    pub fn local_offset(mut self, offset: Isometry<Real>) -> Self {
        self.local_offset = offset;
        self
    }

    /// Sets the mass. A zero mass makes the collider immovable.
    pub fn mass(mut self, mass: Real) -> Self {
        self.mass = mass.max(0.0);
        self
    }

    /// Sets the initial linear velocity.
    pub fn linvel(mut self, linvel: Vector<Real>) -> Self {
        self.linvel = linvel;
        self
    }

    /// Sets the initial angular velocity.
    pub fn angvel(mut self, angvel: Vector<Real>) -> Self {
        self.angvel = angvel;
        self
    }

    /// Sets the friction coefficient.
    pub fn friction(mut self, friction: Real) -> Self {
        self.friction = friction;
        self
    }

    /// Sets the gravity scale.
    pub fn gravity_scale(mut self, scale: Real) -> Self {
        self.gravity_scale = scale;
        self
    }

    /// Sets the collision groups.
    pub fn collision_groups(mut self, groups: CollisionGroups) -> Self {
        self.groups = groups;
        self
    }

    /// Sets the flags.
    pub fn flags(mut self, flags: ColliderFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Makes the collider static.
    pub fn fixed(mut self) -> Self {
        self.flags |= ColliderFlags::STATIC;
        self
    }

    /// Builds the collider.
    ///
    /// Its identifier and inertia are assigned when it is added to a world.
    pub fn build(&self) -> Collider {
        let mut collider = Collider {
            shape: self.shape.clone(),
            position: self.position,
            local_offset: self.local_offset,
            prev_position: self.position,
            mass: self.mass,
            inv_mass: 0.0,
            local_inertia: AngularInertia::zeros(),
            local_inv_inertia: AngularInertia::zeros(),
            linvel: self.linvel,
            angvel: self.angvel,
            friction: self.friction,
            gravity_scale: self.gravity_scale,
            groups: self.groups,
            flags: self.flags,
            id: ColliderId::INVALID,
            tree_slot: None,
            dirty_index: None,
        };
        collider.update_mass_properties();
        collider
    }
}

impl From<ColliderBuilder> for Collider {
    fn from(val: ColliderBuilder) -> Collider {
        val.build()
    }
}
