//! The collision pipeline: colliders, broadphase, narrowphase, contact solvers, and the world
//! driving them.

pub use self::broad_phase::{BroadPhase, ColliderPair};
pub use self::collider::{Collider, ColliderBuilder, ColliderFlags};
pub use self::collider_set::{ColliderHandle, ColliderSet};
pub use self::collision_groups::{CollisionGroups, Group};
pub use self::contact_manifold::{CollisionManifold, ContactPoint};
pub use self::debug_draw::{DebugColor, DebugDrawFlags, DebugDrawSink};
pub use self::id_allocator::{ColliderId, IdAllocator};
pub use self::narrow_phase::{ContactFn, NarrowPhase};
pub use self::position_solver::PositionSolver;
pub use self::queries::{RayHit, SweepHit};
pub use self::settings::WorldSettings;
pub use self::velocity_solver::VelocitySolver;
pub use self::world::CollisionWorld;

mod broad_phase;
mod collider;
mod collider_set;
mod collision_groups;
mod contact_manifold;
mod debug_draw;
mod id_allocator;
mod narrow_phase;
mod position_solver;
mod queries;
mod settings;
mod velocity_solver;
mod world;
