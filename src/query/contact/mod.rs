//! Implementation details of the contact computation between two shapes.

pub use self::contact::{Contact, ContactKind};
pub use self::contact_ball_ball::contact_ball_ball;
pub use self::contact_ball_capsule::contact_ball_capsule;
pub use self::contact_ball_cuboid::contact_ball_cuboid;
pub use self::contact_ball_triangle::contact_ball_triangle;
pub use self::contact_capsule_capsule::contact_capsule_capsule;
pub use self::contact_capsule_triangle::contact_capsule_triangle;
pub use self::contact_pfm_pfm::{contact_pfm_pfm, contact_pfm_pfm_shapes};
pub use self::internal_edges_fixer::InternalEdgesFixer;
pub use self::contact_support_map_support_map::{
    contact_support_map_support_map, contact_support_map_support_map_with_params,
};

mod contact;
mod contact_ball_ball;
mod contact_ball_capsule;
mod contact_ball_cuboid;
mod contact_ball_triangle;
mod contact_capsule_capsule;
mod contact_capsule_triangle;
mod contact_pfm_pfm;
mod contact_support_map_support_map;
mod internal_edges_fixer;
