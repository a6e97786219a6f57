//! Sphere and capsule sweeps against a single positioned shape.

pub use self::sweep::SweepIntersection;
pub use self::sweep_capsule::sweep_capsule;
pub use self::sweep_sphere::sweep_sphere;

mod sweep;
mod sweep_capsule;
mod sweep_sphere;
