pub use self::tree::{AabbTree, TreeSlot};

mod tree;
mod tree_build;
mod tree_queries;
mod tree_validation;
