use crate::pipeline::{Collider, ColliderId};
use slab::Slab;

/// The handle of a collider registered in a [`ColliderSet`].
///
/// A handle stays valid until its collider is removed. Because the storage index of a removed
/// collider can be reused, a handle also carries the collider id and lookups with a stale
/// handle fail instead of returning another collider.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColliderHandle {
    pub(crate) index: u32,
    pub(crate) id: ColliderId,
}

impl ColliderHandle {
    /// The id of the collider this handle refers to.
    pub fn id(self) -> ColliderId {
        self.id
    }

    /// The storage index of the collider this handle refers to.
    pub fn index(self) -> u32 {
        self.index
    }
}

/// The storage of the colliders of a world.
#[derive(Clone, Debug, Default)]
pub struct ColliderSet {
    colliders: Slab<Collider>,
}

impl ColliderSet {
    /// An empty collider set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of colliders in this set.
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// Is this set empty?
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// An upper bound of the storage indices of the colliders of this set.
    pub fn index_bound(&self) -> usize {
        self.colliders.capacity()
    }

    pub(crate) fn insert(&mut self, collider: Collider) -> ColliderHandle {
        let id = collider.id;
        let index = self.colliders.insert(collider);
        ColliderHandle {
            index: index as u32,
            id,
        }
    }

    pub(crate) fn remove(&mut self, handle: ColliderHandle) -> Option<Collider> {
        let _ = self.get(handle)?;
        Some(self.colliders.remove(handle.index as usize))
    }

    /// Does `handle` refer to a collider of this set?
    pub fn contains(&self, handle: ColliderHandle) -> bool {
        self.get(handle).is_some()
    }

    /// The collider referred to by `handle`.
    pub fn get(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.colliders
            .get(handle.index as usize)
            .filter(|c| c.id == handle.id)
    }

    /// The collider referred to by `handle`.
    pub fn get_mut(&mut self, handle: ColliderHandle) -> Option<&mut Collider> {
        self.colliders
            .get_mut(handle.index as usize)
            .filter(|c| c.id == handle.id)
    }

    /// Mutable references to two distinct colliders.
    ///
    /// Returns `None` if `h1 == h2` or if either handle is invalid.
    pub fn get_pair_mut(
        &mut self,
        h1: ColliderHandle,
        h2: ColliderHandle,
    ) -> Option<(&mut Collider, &mut Collider)> {
        if h1.index == h2.index {
            return None;
        }

        let (c1, c2) = self
            .colliders
            .get2_mut(h1.index as usize, h2.index as usize)?;
        (c1.id == h1.id && c2.id == h2.id).then_some((c1, c2))
    }

    /// Iterates through all the colliders of this set, in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (ColliderHandle, &Collider)> {
        self.colliders.iter().map(|(i, c)| {
            (
                ColliderHandle {
                    index: i as u32,
                    id: c.id,
                },
                c,
            )
        })
    }

    /// Iterates mutably through all the colliders of this set, in storage order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ColliderHandle, &mut Collider)> {
        self.colliders.iter_mut().map(|(i, c)| {
            (
                ColliderHandle {
                    index: i as u32,
                    id: c.id,
                },
                c,
            )
        })
    }
}

impl core::ops::Index<ColliderHandle> for ColliderSet {
    type Output = Collider;

    #[track_caller]
    fn index(&self, handle: ColliderHandle) -> &Collider {
        match self.get(handle) {
            Some(collider) => collider,
            None => panic!("Invalid collider handle {:?}.", handle),
        }
    }
}
