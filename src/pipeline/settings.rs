use crate::math::{Real, Vector};

/// Parameters of a [`CollisionWorld`](crate::pipeline::CollisionWorld).
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WorldSettings {
    /// The gravity applied to every dynamic collider, scaled by its gravity scale.
    pub gravity: Vector<Real>,
    /// The timestep used by [`CollisionWorld::step_fixed`](crate::pipeline::CollisionWorld::step_fixed).
    pub fixed_dt: Real,
    /// The maximum number of steps run by one call to `step_fixed`.
    pub max_substeps: usize,
    /// The number of passes of the velocity solver.
    pub velocity_iterations: usize,
    /// The number of passes of the position solver.
    pub position_iterations: usize,
    /// The fraction of the penetration error fed back into the velocity solver each step.
    pub baumgarte_factor: Real,
    /// The penetration depth below which the velocity solver applies no bias.
    pub allowed_penetration: Real,
    /// The penetration depth the position solver leaves uncorrected.
    pub penetration_slack: Real,
    /// The linear velocity damping coefficient.
    pub linear_damping: Real,
    /// The angular velocity damping coefficient.
    pub angular_damping: Real,
    /// Do contacts inherit the impulses of the matching contacts of the previous step?
    pub warm_start: bool,
    /// The multiplier applied to the inherited impulses.
    pub warm_start_factor: Real,
    /// The maximum distance between the body-local anchors of two contacts considered to be
    /// the same contact across steps.
    pub warm_start_distance: Real,
    /// The margin added to the broadphase AABBs of the colliders.
    pub contact_prediction: Real,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            gravity: Vector::new(0.0, -9.81, 0.0),
            fixed_dt: 1.0 / 60.0,
            max_substeps: 4,
            velocity_iterations: 20,
            position_iterations: 4,
            baumgarte_factor: 0.2,
            allowed_penetration: 0.01,
            penetration_slack: 0.005,
            linear_damping: 0.0,
            angular_damping: 0.05,
            warm_start: true,
            warm_start_factor: 0.85,
            warm_start_distance: 0.05,
            contact_prediction: 0.02,
        }
    }
}
