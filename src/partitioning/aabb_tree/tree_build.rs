use super::tree::{AabbTree, NodeKind, TreeNode};
use crate::bounding_volume::Aabb;

impl<T: Copy> AabbTree<T> {
    /// Builds a balanced tree over a known set of leaves.
    ///
    /// Leaves are split recursively at the median of their centers along the longest axis of
    /// the centers' bounds, so the depth is `ceil(log2(n))` whatever the input order. Payloads
    /// are the only handle on the leaves built this way: no [`TreeSlot`](super::TreeSlot) is
    /// returned.
    pub fn from_leaves(leaves: impl IntoIterator<Item = (Aabb, T)>) -> Self {
        let mut tree = Self::new();
        let mut items: Vec<(Aabb, usize)> = leaves
            .into_iter()
            .map(|(aabb, payload)| {
                let id = tree.nodes.insert(TreeNode {
                    aabb,
                    parent: None,
                    dirty: false,
                    kind: NodeKind::Leaf { payload },
                });
                (aabb, id)
            })
            .collect();

        if items.is_empty() {
            return tree;
        }

        // Each entry is a range of `items` and the branch slot it must be attached to.
        let mut stack = vec![(0, items.len(), None)];

        while let Some((start, end, attach_to)) = stack.pop() {
            let id = if end - start == 1 {
                items[start].1
            } else {
                let range = &mut items[start..end];
                let centers = range.iter().fold(Aabb::new_invalid(), |mut acc, (aabb, _)| {
                    acc.take_point(aabb.center());
                    acc
                });
                let axis = centers.extents().imax();
                let mid = range.len() / 2;
                let _ = range.select_nth_unstable_by(mid, |a, b| {
                    a.0.center()[axis].total_cmp(&b.0.center()[axis])
                });

                let branch = tree.nodes.insert(TreeNode {
                    aabb: Aabb::new_invalid(),
                    parent: None,
                    dirty: true,
                    kind: NodeKind::Branch {
                        left: usize::MAX,
                        right: usize::MAX,
                    },
                });
                stack.push((start + mid, end, Some((branch, false))));
                stack.push((start, start + mid, Some((branch, true))));
                branch
            };

            match attach_to {
                None => tree.root = Some(id),
                Some((parent, is_left)) => {
                    tree.nodes[id].parent = Some(parent);
                    if let NodeKind::Branch { left, right } = &mut tree.nodes[parent].kind {
                        if is_left {
                            *left = id;
                        } else {
                            *right = id;
                        }
                    }
                }
            }
        }

        tree.update();
        tree
    }
}
