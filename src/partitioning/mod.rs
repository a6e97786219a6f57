//! Spatial partitioning tools.

pub use self::aabb_tree::{AabbTree, TreeSlot};

mod aabb_tree;
