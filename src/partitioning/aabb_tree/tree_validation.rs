use super::tree::{AabbTree, NodeKind};
use crate::bounding_volume::BoundingVolume;
use std::collections::HashSet;

impl<T: Copy> AabbTree<T> {
    /// Panics if the tree isn’t well-formed.
    ///
    /// The tree is well-formed if it is topologically correct (every node is reachable exactly
    /// once from the root, parent links match child links) and geometrically correct (the AABB
    /// of each branch is the union of the AABBs of its children and no branch is left dirty).
    ///
    /// This must be called after [`AabbTree::update`].
    pub fn assert_well_formed(&self) {
        let Some(root) = self.root else {
            assert!(self.nodes.is_empty(), "An empty tree must not own any node.");
            return;
        };

        assert!(self.nodes[root].parent.is_none());

        let mut visited = HashSet::new();
        let mut stack = vec![root];

        while let Some(id) = stack.pop() {
            assert!(visited.insert(id), "Loop detected at node {}.", id);
            let node = &self.nodes[id];

            if let NodeKind::Branch { left, right } = node.kind {
                assert!(!node.dirty, "Branch {} is still dirty.", id);
                assert_eq!(self.nodes[left].parent, Some(id));
                assert_eq!(self.nodes[right].parent, Some(id));

                let union = self.nodes[left].aabb.merged(&self.nodes[right].aabb);
                assert_eq!(node.aabb, union, "Branch {} is not the union of its children.", id);

                stack.push(right);
                stack.push(left);
            }
        }

        assert_eq!(
            visited.len(),
            self.nodes.len(),
            "Some nodes are not reachable from the root."
        );
    }

    /// The depth of the deepest leaf of this tree (zero for a tree with a single leaf).
    pub fn depth(&self) -> usize {
        let mut result = 0;
        self.for_each_node(|_, depth, is_leaf| {
            if is_leaf {
                result = result.max(depth);
            }
        });
        result
    }
}
