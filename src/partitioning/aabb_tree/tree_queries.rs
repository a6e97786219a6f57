use super::tree::{AabbTree, NodeKind};
use crate::bounding_volume::{Aabb, BoundingVolume};
use crate::math::Real;
use crate::query::{Ray, RayCast};

/// Traversal stack. Deep trees spill to the heap.
type Stack = smallvec::SmallVec<[usize; 64]>;

impl<T: Copy> AabbTree<T> {
    /// Calls `f` with the payload of every leaf whose AABB intersects `aabb`.
    ///
    /// Leaves are visited in depth-first order, left child first.
    pub fn for_each_overlap(&self, aabb: &Aabb, mut f: impl FnMut(T)) {
        self.traverse(|node_aabb| node_aabb.intersects(aabb), &mut f)
    }

    /// Calls `f` with the payload of every leaf whose AABB is hit by `ray` with a
    /// time-of-impact smaller than `max_toi`.
    pub fn traverse_ray(&self, ray: &Ray, max_toi: Real, mut f: impl FnMut(T)) {
        self.traverse(|node_aabb| node_aabb.intersects_local_ray(ray, max_toi), &mut f)
    }

    /// Calls `f` with the payload of every leaf whose AABB may be hit by a sphere of radius
    /// `radius` moving along `ray` up to `max_toi`.
    ///
    /// Node AABBs are inflated by `radius` before being tested against the ray, which is
    /// conservative for any swept shape bounded by that sphere.
    pub fn traverse_sweep(&self, ray: &Ray, max_toi: Real, radius: Real, mut f: impl FnMut(T)) {
        let radius = radius.max(0.0);
        self.traverse(
            |node_aabb| {
                node_aabb
                    .loosened(radius)
                    .intersects_local_ray(ray, max_toi)
            },
            &mut f,
        )
    }

    /// Calls `f` on each node of this tree with its AABB, its depth, and whether it is a leaf.
    pub fn for_each_node(&self, mut f: impl FnMut(&Aabb, usize, bool)) {
        let Some(root) = self.root else {
            return;
        };

        let mut stack = vec![(root, 0)];

        while let Some((id, depth)) = stack.pop() {
            let node = &self.nodes[id];
            match node.kind {
                NodeKind::Leaf { .. } => f(&node.aabb, depth, true),
                NodeKind::Branch { left, right } => {
                    f(&node.aabb, depth, false);
                    stack.push((right, depth + 1));
                    stack.push((left, depth + 1));
                }
            }
        }
    }

    fn traverse(&self, mut test: impl FnMut(&Aabb) -> bool, f: &mut impl FnMut(T)) {
        let Some(root) = self.root else {
            return;
        };

        let mut stack = Stack::new();
        stack.push(root);

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];

            if !test(&node.aabb) {
                continue;
            }

            match node.kind {
                NodeKind::Leaf { payload } => f(payload),
                NodeKind::Branch { left, right } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
    }
}
