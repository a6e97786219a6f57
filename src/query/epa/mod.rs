//! The Expanding Polytope Algorithm for penetration depth computation.

pub use self::epa::{Epa, EPA_TOLERANCE, MAX_EPA_ITERATIONS};

mod epa;
