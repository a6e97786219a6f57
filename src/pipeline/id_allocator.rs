/// The unique identifier of a collider.
///
/// Identifiers are assigned in increasing order by the world a collider is added to, and are
/// never reused. They give a stable order to colliders for pair de-duplication.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColliderId(pub u64);

impl ColliderId {
    /// The identifier of a collider not registered in any world.
    pub const INVALID: Self = ColliderId(u64::MAX);
}

/// A monotonic generator of collider identifiers.
#[derive(Clone, Debug, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    /// An allocator whose first identifier is zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a fresh identifier, greater than every identifier returned before.
    pub fn allocate(&mut self) -> ColliderId {
        let id = ColliderId(self.next);
        self.next += 1;
        id
    }
}
