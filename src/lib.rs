/*!
tumble3d
========

**tumble3d** is a 3-dimensional rigid-body collision detection and contact
resolution library written with the rust programming language.

It combines a dynamic AABB tree broadphase, analytic and GJK/EPA
narrowphase routines, persistent contact manifolds and a sequential-impulse
solver behind the [`pipeline::CollisionWorld`] type.

*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.
#![allow(clippy::type_complexity)] // Complains about closures that are fairly simple.
#![deny(unused_qualifications)]

#[cfg(all(feature = "f32", feature = "f64"))]
core::compile_error!("The `f32` and `f64` features are mutually exclusive.");

#[cfg(feature = "serde-serialize")]
#[macro_use]
extern crate serde;
#[macro_use]
extern crate approx;
extern crate num_traits as num;

pub extern crate nalgebra as na;

pub mod bounding_volume;
pub mod mass_properties;
pub mod partitioning;
pub mod pipeline;
pub mod query;
pub mod shape;
pub mod utils;

/// Scalar, vector and transform aliases selected by the `f32`/`f64` features.
pub mod math {
    #[cfg(feature = "f32")]
    /// The scalar type used throughout this crate.
    pub type Real = f32;
    #[cfg(feature = "f64")]
    /// The scalar type used throughout this crate.
    pub type Real = f64;

    /// Tolerance under which lengths and determinants are treated as zero.
    pub const DEFAULT_EPSILON: Real = Real::EPSILON;
    /// Every shape and query lives in 3D.
    pub const DIM: usize = 3;

    /// A point in 3D.
    pub type Point<N> = na::Point3<N>;
    /// A displacement or direction in 3D.
    pub type Vector<N> = na::Vector3<N>;
    /// A vector known to have unit length.
    pub type UnitVector<N> = na::UnitVector3<N>;
    /// Angular velocities and torques.
    pub type AngVector<N> = na::Vector3<N>;
    /// A 3x3 matrix.
    pub type Matrix<N> = na::Matrix3<N>;
    /// A rigid placement: a rotation followed by a translation.
    pub type Isometry<N> = na::Isometry3<N>;
    /// Orientations are unit quaternions.
    pub type Rotation<N> = na::UnitQuaternion<N>;
    /// A pure translation.
    pub type Translation<N> = na::Translation3<N>;
    /// An inertia tensor about the center of mass, in body space.
    pub type AngularInertia<N> = na::Matrix3<N>;
}
