use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};

/// An RGBA color with components in `[0, 1]`.
pub type DebugColor = [f32; 4];

/// Flags selecting what [`CollisionWorld::debug_draw`](crate::pipeline::CollisionWorld::debug_draw)
/// renders.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct DebugDrawFlags(u8);

bitflags::bitflags! {
    impl DebugDrawFlags: u8 {
        /// Draw the world-space AABB of each collider.
        const COLLIDER_AABBS = 1;
        /// Draw every node of the broadphase tree.
        const TREE_NODES = 1 << 1;
        /// Draw the contact points and normals of the manifolds.
        const CONTACTS = 1 << 2;
        /// Draw everything.
        const ALL = Self::COLLIDER_AABBS.bits() | Self::TREE_NODES.bits() | Self::CONTACTS.bits();
    }
}

/// A receiver of debug-rendering primitives.
///
/// Every method does nothing by default, so implementors only override what they can render.
pub trait DebugDrawSink {
    /// Draws a line segment.
    fn draw_line(&mut self, _a: &Point<Real>, _b: &Point<Real>, _color: DebugColor) {}

    /// Draws the twelve edges of an AABB.
    fn draw_aabb(&mut self, aabb: &Aabb, color: DebugColor) {
        const EDGES: [(usize, usize); 12] = [
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 0),
            (4, 5),
            (5, 6),
            (6, 7),
            (7, 4),
            (0, 4),
            (1, 5),
            (2, 6),
            (3, 7),
        ];

        let vtx = aabb.vertices();
        for (i, j) in EDGES {
            self.draw_line(&vtx[i], &vtx[j], color);
        }
    }

    /// Draws a contact point with its normal and penetration depth.
    fn draw_contact(&mut self, _point: &Point<Real>, _normal: &Vector<Real>, _depth: Real) {}
}
