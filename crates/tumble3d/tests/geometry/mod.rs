#[macro_use]
extern crate approx;

mod broad_phase_pairs;
mod cuboid_ray_cast;
mod gjk_epa3;
mod resting_contacts;
mod sweeps;
mod trimesh_contacts;
