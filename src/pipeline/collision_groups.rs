/// A bit mask identifying groups of colliders.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Group(u32);

bitflags::bitflags! {
    impl Group: u32 {
        /// The group n°1.
        const GROUP_1 = 1 << 0;
        /// The group n°2.
        const GROUP_2 = 1 << 1;
        /// The group n°3.
        const GROUP_3 = 1 << 2;
        /// The group n°4.
        const GROUP_4 = 1 << 3;
        /// The group n°5.
        const GROUP_5 = 1 << 4;
        /// The group n°6.
        const GROUP_6 = 1 << 5;
        /// The group n°7.
        const GROUP_7 = 1 << 6;
        /// The group n°8.
        const GROUP_8 = 1 << 7;
        /// The group n°9.
        const GROUP_9 = 1 << 8;
        /// The group n°10.
        const GROUP_10 = 1 << 9;
        /// The group n°11.
        const GROUP_11 = 1 << 10;
        /// The group n°12.
        const GROUP_12 = 1 << 11;
        /// The group n°13.
        const GROUP_13 = 1 << 12;
        /// The group n°14.
        const GROUP_14 = 1 << 13;
        /// The group n°15.
        const GROUP_15 = 1 << 14;
        /// The group n°16.
        const GROUP_16 = 1 << 15;
        /// The group n°17.
        const GROUP_17 = 1 << 16;
        /// The group n°18.
        const GROUP_18 = 1 << 17;
        /// The group n°19.
        const GROUP_19 = 1 << 18;
        /// The group n°20.
        const GROUP_20 = 1 << 19;
        /// The group n°21.
        const GROUP_21 = 1 << 20;
        /// The group n°22.
        const GROUP_22 = 1 << 21;
        /// The group n°23.
        const GROUP_23 = 1 << 22;
        /// The group n°24.
        const GROUP_24 = 1 << 23;
        /// The group n°25.
        const GROUP_25 = 1 << 24;
        /// The group n°26.
        const GROUP_26 = 1 << 25;
        /// The group n°27.
        const GROUP_27 = 1 << 26;
        /// The group n°28.
        const GROUP_28 = 1 << 27;
        /// The group n°29.
        const GROUP_29 = 1 << 28;
        /// The group n°30.
        const GROUP_30 = 1 << 29;
        /// The group n°31.
        const GROUP_31 = 1 << 30;
        /// The group n°32.
        const GROUP_32 = 1 << 31;

        /// All of the groups.
        const ALL = u32::MAX;
        /// None of the groups.
        const NONE = 0;
    }
}

/// Pairwise filtering using bit masks.
///
/// Two colliders interact only if each one is a member of a group allowed by the filter of
/// the other.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CollisionGroups {
    /// Groups this collider is part of.
    pub memberships: Group,
    /// Groups this collider can interact with.
    pub filter: Group,
}

impl Default for CollisionGroups {
    fn default() -> Self {
        Self::all()
    }
}

impl CollisionGroups {
    /// Collision groups that are members of, and interact with, every group.
    pub const fn all() -> Self {
        Self::new(Group::ALL, Group::ALL)
    }

    /// Creates new collision groups.
    pub const fn new(memberships: Group, filter: Group) -> Self {
        Self {
            memberships,
            filter,
        }
    }

    /// Can two colliders with these groups interact?
    #[inline]
    pub const fn test(self, other: Self) -> bool {
        (self.memberships.bits() & other.filter.bits()) != 0
            && (other.memberships.bits() & self.filter.bits()) != 0
    }
}

#[cfg(test)]
mod test {
    use super::{CollisionGroups, Group};

    #[test]
    fn test_is_symmetric() {
        let player = CollisionGroups::new(Group::GROUP_1, Group::GROUP_2);
        let wall = CollisionGroups::new(Group::GROUP_2, Group::ALL);
        let ghost = CollisionGroups::new(Group::GROUP_3, Group::GROUP_3);

        assert!(player.test(wall) && wall.test(player));
        assert!(!player.test(ghost) && !ghost.test(player));
        // The wall accepts the ghost but the ghost filters the wall out.
        assert!(!wall.test(ghost));
        assert!(CollisionGroups::default().test(wall));
    }
}
