//! Bounding volumes.

pub use self::aabb::Aabb;
pub use self::bounding_volume::BoundingVolume;

pub mod aabb;
pub mod bounding_volume;
mod aabb_shapes;
mod aabb_triangle;

/// Free functions for bounding-volume computations not tied to a shape.
pub mod details {
    pub use super::aabb_shapes::transformed_points_aabb;
}
