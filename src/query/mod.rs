//! Non-persistent geometric queries.
//!
//! # General cases
//! The narrowphase of the collision pipeline is built on the functions of the [`contact`]
//! module, which compute the contacts between two given shapes. Overlap between convex shapes
//! is detected by [`gjk::intersect`] and measured by [`epa::Epa`].
//!
//! Ray-casting is achieved by importing the [`RayCast`] trait, and sphere or capsule sweeps
//! against a single shape are computed by [`sweep_sphere`] and [`sweep_capsule`].
//!
//! # Specific cases
//! The functions exported by the `details` submodule are more specific versions of the ones
//! described above. They have the form `[operation]_[shape1]_[shape2]()` where:
//!
//! * `[operation]` can be `closest_points` or `contact`.
//! * `[shape1]` is the type of the first shape passed to the function, e.g., `ball`, or
//!   `capsule`. Can also identify a trait implemented by supported shapes, e.g., `support_map`.
//! * `[shape2]` is the type of the second shape passed to the function.

pub use self::contact::{Contact, ContactKind};
pub use self::ray::{Ray, RayCast, RayIntersection};
pub use self::sweep::{sweep_capsule, sweep_sphere, SweepIntersection};

mod closest_points;
pub mod contact;
pub mod epa;
pub mod gjk;
mod ray;
pub mod sweep;

/// Queries dedicated to specific pairs of shapes.
pub mod details {
    pub use super::closest_points::*;
    pub use super::contact::{
        contact_ball_ball, contact_ball_capsule, contact_ball_cuboid, contact_ball_triangle,
        contact_capsule_capsule, contact_capsule_triangle, contact_pfm_pfm,
        contact_pfm_pfm_shapes, contact_support_map_support_map,
        contact_support_map_support_map_with_params, InternalEdgesFixer,
    };
    pub use super::ray::details::*;
}
