use crate::bounding_volume::{Aabb, BoundingVolume};
use crate::math::Real;
use crate::partitioning::AabbTree;
use crate::pipeline::{Collider, ColliderHandle, ColliderSet};
use crate::shape::ShapeKind;

/// A pair of colliders whose broadphase AABBs overlap.
///
/// The collider with the lower shape kind comes first, ties being broken by collider id, so the
/// narrowphase can rely on a fixed argument order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColliderPair {
    /// The shape kinds of the first and second collider.
    pub kinds: (ShapeKind, ShapeKind),
    /// The first collider of the pair.
    pub first: ColliderHandle,
    /// The second collider of the pair.
    pub second: ColliderHandle,
}

impl ColliderPair {
    /// Creates the pair of `h1` and `h2` in canonical order.
    pub fn new(h1: ColliderHandle, c1: &Collider, h2: ColliderHandle, c2: &Collider) -> Self {
        let k1 = c1.shape.kind();
        let k2 = c2.shape.kind();

        if (k1, c1.id) <= (k2, c2.id) {
            Self {
                kinds: (k1, k2),
                first: h1,
                second: h2,
            }
        } else {
            Self {
                kinds: (k2, k1),
                first: h2,
                second: h1,
            }
        }
    }
}

/// Tracks the colliders that moved and finds the pairs they may form.
///
/// The dirty colliders are kept in a compact array; each collider stores its index in that
/// array so it can be found and removed in constant time.
#[derive(Clone, Debug, Default)]
pub struct BroadPhase {
    dirty: Vec<ColliderHandle>,
}

impl BroadPhase {
    /// A broadphase with no dirty collider.
    pub fn new() -> Self {
        Self::default()
    }

    /// The colliders marked as dirty since the last call to [`BroadPhase::clear`].
    pub fn dirty(&self) -> &[ColliderHandle] {
        &self.dirty
    }

    /// Marks a collider as moved. Does nothing if it is already marked.
    pub fn mark_dirty(&mut self, handle: ColliderHandle, colliders: &mut ColliderSet) {
        if let Some(collider) = colliders.get_mut(handle) {
            if collider.dirty_index.is_none() {
                collider.dirty_index = Some(self.dirty.len());
                self.dirty.push(handle);
            }
        }
    }

    /// Removes a collider from the dirty set, e.g., before removing it from the world.
    pub fn unmark(&mut self, handle: ColliderHandle, colliders: &mut ColliderSet) {
        let Some(index) = colliders
            .get_mut(handle)
            .and_then(|collider| collider.dirty_index.take())
        else {
            return;
        };

        debug_assert_eq!(self.dirty[index], handle, "Inconsistent dirty index.");
        let _ = self.dirty.swap_remove(index);

        if let Some(moved) = self.dirty.get(index).copied() {
            if let Some(collider) = colliders.get_mut(moved) {
                collider.dirty_index = Some(index);
            }
        }
    }

    /// Empties the dirty set.
    pub fn clear(&mut self, colliders: &mut ColliderSet) {
        for handle in self.dirty.drain(..) {
            if let Some(collider) = colliders.get_mut(handle) {
                collider.dirty_index = None;
            }
        }
    }

    /// Refits the leaves of the dirty colliders to their current AABB enlarged by `margin`,
    /// then refits the tree.
    pub fn update_tree(
        &self,
        colliders: &ColliderSet,
        tree: &mut AabbTree<ColliderHandle>,
        margin: Real,
    ) {
        for handle in &self.dirty {
            if let Some(collider) = colliders.get(*handle) {
                if let Some(slot) = collider.tree_slot {
                    tree.set_leaf_aabb(slot, collider.compute_aabb().loosened(margin));
                }
            }
        }

        tree.update();
    }

    /// Finds the pairs formed by the dirty colliders, using the tree.
    ///
    /// Pairs are pushed in dirty-array order then tree traversal order.
    pub fn find_pairs(
        &self,
        colliders: &ColliderSet,
        tree: &AabbTree<ColliderHandle>,
        out: &mut Vec<ColliderPair>,
    ) {
        for handle1 in &self.dirty {
            let Some((collider1, aabb1)) = leaf(colliders, tree, *handle1) else {
                continue;
            };

            tree.for_each_overlap(&aabb1, |handle2| {
                if let Some(collider2) = colliders.get(handle2) {
                    if accept_pair(collider1, collider2) {
                        out.push(ColliderPair::new(*handle1, collider1, handle2, collider2));
                    }
                }
            });
        }
    }

    /// Finds the same pairs as [`BroadPhase::find_pairs`] by testing each dirty collider
    /// against every other collider.
    pub fn find_pairs_brute_force(
        &self,
        colliders: &ColliderSet,
        tree: &AabbTree<ColliderHandle>,
        out: &mut Vec<ColliderPair>,
    ) {
        for handle1 in &self.dirty {
            let Some((collider1, aabb1)) = leaf(colliders, tree, *handle1) else {
                continue;
            };

            for (handle2, collider2) in colliders.iter() {
                let Some((_, aabb2)) = leaf(colliders, tree, handle2) else {
                    continue;
                };

                if aabb1.intersects(&aabb2) && accept_pair(collider1, collider2) {
                    out.push(ColliderPair::new(*handle1, collider1, handle2, collider2));
                }
            }
        }
    }
}

fn leaf<'a>(
    colliders: &'a ColliderSet,
    tree: &AabbTree<ColliderHandle>,
    handle: ColliderHandle,
) -> Option<(&'a Collider, Aabb)> {
    let collider = colliders.get(handle)?;
    let aabb = tree.leaf_aabb(collider.tree_slot?)?;
    Some((collider, aabb))
}

/// Filters applied to a candidate pair found from the dirty collider `c1`.
fn accept_pair(c1: &Collider, c2: &Collider) -> bool {
    if c1.id == c2.id || (c1.is_static() && c2.is_static()) {
        return false;
    }

    // Between two dirty colliders, only the one with the lower id reports the pair.
    if c2.dirty_index.is_some() && c2.id < c1.id {
        return false;
    }

    c1.groups.test(c2.groups)
}
