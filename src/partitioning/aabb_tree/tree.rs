use crate::bounding_volume::{Aabb, BoundingVolume};
use crate::math::Real;
use slab::Slab;

/// The handle of a leaf inserted into an [`AabbTree`].
///
/// A slot stays valid (and keeps designating the same element) until it is passed to
/// [`AabbTree::remove`], no matter how many other elements are inserted or removed.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TreeSlot(pub(super) usize);

#[derive(Copy, Clone, Debug)]
pub(super) enum NodeKind<T> {
    Leaf { payload: T },
    Branch { left: usize, right: usize },
}

#[derive(Copy, Clone, Debug)]
pub(super) struct TreeNode<T> {
    pub aabb: Aabb,
    pub parent: Option<usize>,
    pub dirty: bool,
    pub kind: NodeKind<T>,
}

/// A dynamic binary bounding-volume hierarchy of axis-aligned bounding boxes.
///
/// Each leaf stores one element AABB together with a small `Copy` payload (the collider
/// handle in the broadphase, the triangle index in a mesh). Branch AABBs are only guaranteed to
/// enclose their children after [`AabbTree::update`]: insertions, removals and leaf updates
/// only mark the path from the modified leaf to the root as dirty, and `update` refits all the
/// dirty branches at once.
///
/// Nodes are allocated in a [`Slab`] so freed nodes are recycled by later insertions.
#[derive(Clone, Debug)]
pub struct AabbTree<T> {
    pub(super) nodes: Slab<TreeNode<T>>,
    pub(super) root: Option<usize>,
}

impl<T: Copy> Default for AabbTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy> AabbTree<T> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Slab::new(),
            root: None,
        }
    }

    /// Is this tree empty?
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The number of leaves of this tree.
    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|(_, n)| matches!(n.kind, NodeKind::Leaf { .. }))
            .count()
    }

    /// The AABB of the root of this tree, if it is not empty.
    ///
    /// This is only up-to-date after [`AabbTree::update`].
    pub fn root_aabb(&self) -> Option<Aabb> {
        self.root.map(|r| self.nodes[r].aabb)
    }

    /// The payload of the leaf at `slot`, if it is live.
    pub fn payload(&self, slot: TreeSlot) -> Option<T> {
        match self.nodes.get(slot.0)?.kind {
            NodeKind::Leaf { payload } => Some(payload),
            NodeKind::Branch { .. } => None,
        }
    }

    /// The AABB of the leaf at `slot`, if it is live.
    pub fn leaf_aabb(&self, slot: TreeSlot) -> Option<Aabb> {
        let node = self.nodes.get(slot.0)?;
        matches!(node.kind, NodeKind::Leaf { .. }).then_some(node.aabb)
    }

    /// Inserts a new leaf with the given AABB and payload.
    ///
    /// The new leaf is paired with the existing leaf reached by descending, at each branch,
    /// into the child whose surface area grows the least when merged with `aabb`. Ties go
    /// left. Surface area keeps a meaningful cost for flat boxes, which have no volume.
    pub fn add(&mut self, aabb: Aabb, payload: T) -> TreeSlot {
        let leaf = self.nodes.insert(TreeNode {
            aabb,
            parent: None,
            dirty: false,
            kind: NodeKind::Leaf { payload },
        });

        let Some(root) = self.root else {
            self.root = Some(leaf);
            return TreeSlot(leaf);
        };

        let mut curr = root;

        while let NodeKind::Branch { left, right } = self.nodes[curr].kind {
            let left_cost = area_growth(&self.nodes[left].aabb, &aabb);
            let right_cost = area_growth(&self.nodes[right].aabb, &aabb);
            curr = if left_cost <= right_cost { left } else { right };
        }

        // `curr` is the sibling leaf. Replace it by a branch holding both leaves.
        let parent = self.nodes[curr].parent;
        let branch = self.nodes.insert(TreeNode {
            aabb: self.nodes[curr].aabb.merged(&aabb),
            parent,
            dirty: true,
            kind: NodeKind::Branch {
                left: curr,
                right: leaf,
            },
        });

        self.nodes[curr].parent = Some(branch);
        self.nodes[leaf].parent = Some(branch);
        self.replace_child(parent, curr, branch);
        self.mark_dirty(parent);

        TreeSlot(leaf)
    }

    /// Removes the leaf at `slot` and returns its payload.
    ///
    /// # Panics
    /// Panics if `slot` is not a live leaf of this tree.
    pub fn remove(&mut self, slot: TreeSlot) -> T {
        let payload = match self.nodes.get(slot.0).map(|n| n.kind) {
            Some(NodeKind::Leaf { payload }) => payload,
            _ => panic!("Attempted to remove a tree slot that is not a live leaf."),
        };

        let leaf = self.nodes.remove(slot.0);

        let Some(parent) = leaf.parent else {
            self.root = None;
            return payload;
        };

        let sibling = match self.nodes[parent].kind {
            NodeKind::Branch { left, right } => {
                if left == slot.0 {
                    right
                } else {
                    left
                }
            }
            NodeKind::Leaf { .. } => unreachable!(),
        };

        // Promote the sibling into the parent's position.
        let grand_parent = self.nodes[parent].parent;
        let _ = self.nodes.remove(parent);
        self.nodes[sibling].parent = grand_parent;
        self.replace_child(grand_parent, parent, sibling);
        self.mark_dirty(grand_parent);

        payload
    }

    /// Replaces the AABB of the leaf at `slot` and marks its ancestors dirty.
    ///
    /// # Panics
    /// Panics if `slot` is not a live leaf of this tree.
    pub fn set_leaf_aabb(&mut self, slot: TreeSlot, aabb: Aabb) {
        let node = &mut self.nodes[slot.0];
        assert!(
            matches!(node.kind, NodeKind::Leaf { .. }),
            "Attempted to update a tree slot that is not a leaf."
        );
        node.aabb = aabb;
        let parent = node.parent;
        self.mark_dirty(parent);
    }

    /// Recomputes the AABB of every dirty branch, children first, and clears the dirty flags.
    pub fn update(&mut self) {
        let Some(root) = self.root else {
            return;
        };

        // Post-order walk of the dirty branches. The flag tells whether the children of the
        // node have been refitted already.
        let mut stack = vec![(root, false)];

        while let Some((id, children_done)) = stack.pop() {
            let node = &self.nodes[id];
            let NodeKind::Branch { left, right } = node.kind else {
                continue;
            };

            if !node.dirty {
                continue;
            }

            if children_done {
                let aabb = self.nodes[left].aabb.merged(&self.nodes[right].aabb);
                let node = &mut self.nodes[id];
                node.aabb = aabb;
                node.dirty = false;
            } else {
                stack.push((id, true));
                stack.push((right, false));
                stack.push((left, false));
            }
        }
    }

    fn replace_child(&mut self, parent: Option<usize>, old: usize, new: usize) {
        match parent {
            None => self.root = Some(new),
            Some(p) => {
                if let NodeKind::Branch { left, right } = &mut self.nodes[p].kind {
                    if *left == old {
                        *left = new;
                    } else {
                        debug_assert_eq!(*right, old);
                        *right = new;
                    }
                }
            }
        }
    }

    fn mark_dirty(&mut self, mut curr: Option<usize>) {
        while let Some(id) = curr {
            let node = &mut self.nodes[id];
            if node.dirty {
                // The rest of the path is already dirty.
                break;
            }
            node.dirty = true;
            curr = node.parent;
        }
    }
}

/// Half the surface area of `aabb`.
fn half_area(aabb: &Aabb) -> Real {
    let e = aabb.extents();
    e.x * e.y + e.y * e.z + e.z * e.x
}

fn area_growth(node: &Aabb, new: &Aabb) -> Real {
    half_area(&node.merged(new)) - half_area(node)
}
