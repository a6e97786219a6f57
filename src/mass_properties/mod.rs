//! Mass, center of mass and angular inertia of the supported shapes.

pub use self::mass_properties::MassProperties;

mod mass_properties;
mod mass_properties_convex_polyhedron;
mod mass_properties_primitives;

/// Free functions used to integrate the inertia of polyhedra.
pub mod details {
    pub use super::mass_properties_convex_polyhedron::tetrahedron_unit_inertia_tensor_wrt_point;
}
