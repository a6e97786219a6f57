//! The Gilbert-Johnson-Keerthi algorithm: boolean overlap test and ray casting on Minkowski
//! differences.

pub use self::cso_point::CSOPoint;
pub use self::gjk::{cast_local_ray, eps_tol, intersect, minkowski_ray_cast, MAX_GJK_ITERATIONS};
pub use self::simplex::Simplex;
pub use self::special_support_maps::{ConstantOrigin, DilatedShape};
pub use self::voronoi_simplex::VoronoiSimplex;

mod cso_point;
mod gjk;
mod simplex;
mod special_support_maps;
mod voronoi_simplex;
