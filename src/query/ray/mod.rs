//! Ray-casting related definitions and implementations.

pub use self::ray::{Ray, RayCast, RayIntersection};

/// Free functions for the analytic ray casts used by sweep queries.
pub mod details {
    pub use super::ray_ball::ray_intersection_with_ball;
    pub use super::ray_halfspace::ray_toi_with_plane;
    pub use super::ray_support_map::local_ray_intersection_with_support_map;
    pub use super::ray_triangle::local_ray_intersection_with_triangle;
}

mod ray;
mod ray_aabb;
mod ray_ball;
mod ray_cuboid;
mod ray_halfspace;
mod ray_shape;
mod ray_support_map;
mod ray_triangle;
