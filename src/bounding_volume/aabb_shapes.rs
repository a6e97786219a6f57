use crate::bounding_volume::{Aabb, BoundingVolume};
use crate::math::{Isometry, Point, Real, Vector};
use crate::shape::{Ball, Capsule, ConvexPolyhedron, Cuboid, TriMesh};

/// The smallest box containing every point of `pts`, each moved by `pos` first.
///
/// An empty iterator yields an invalid box.
pub fn transformed_points_aabb<'a>(
    pos: &Isometry<Real>,
    pts: impl IntoIterator<Item = &'a Point<Real>>,
) -> Aabb {
    pts.into_iter().fold(Aabb::new_invalid(), |mut aabb, pt| {
        aabb.take_point(pos * pt);
        aabb
    })
}

impl Ball {
    /// The world-space box of this ball centered at `pos`.
    #[inline]
    pub fn aabb(&self, pos: &Isometry<Real>) -> Aabb {
        let radius = Vector::repeat(self.radius);
        Aabb::from_half_extents(pos.translation.vector.into(), radius)
    }

    /// The box of this ball centered at the origin.
    #[inline]
    pub fn local_aabb(&self) -> Aabb {
        Aabb::from_half_extents(Point::origin(), Vector::repeat(self.radius))
    }
}

impl Cuboid {
    /// The world-space box of this cuboid placed at `pos`.
    #[inline]
    pub fn aabb(&self, pos: &Isometry<Real>) -> Aabb {
        self.local_aabb().transform_by(pos)
    }

    /// The box spanned by the half-extents.
    #[inline]
    pub fn local_aabb(&self) -> Aabb {
        Aabb::from_half_extents(Point::origin(), self.half_extents)
    }
}

impl Capsule {
    /// The world-space box of this capsule placed at `pos`.
    #[inline]
    pub fn aabb(&self, pos: &Isometry<Real>) -> Aabb {
        self.transform_by(pos).local_aabb()
    }

    /// The box of the segment, grown by the radius.
    #[inline]
    pub fn local_aabb(&self) -> Aabb {
        let Self { segment, radius } = self;
        let core = Aabb::new(segment.a.inf(&segment.b), segment.a.sup(&segment.b));
        core.loosened(*radius)
    }
}

impl ConvexPolyhedron {
    /// The world-space box of this polyhedron placed at `pos`, computed from its
    /// transformed vertices.
    #[inline]
    pub fn aabb(&self, pos: &Isometry<Real>) -> Aabb {
        transformed_points_aabb(pos, self.points())
    }

    /// The box of the vertices.
    #[inline]
    pub fn local_aabb(&self) -> Aabb {
        transformed_points_aabb(&Isometry::identity(), self.points())
    }
}

impl TriMesh {
    /// The world-space box of this mesh placed at `pos`.
    ///
    /// This bounds the rotated local box, so it may be larger than the box of the
    /// transformed vertices.
    #[inline]
    pub fn aabb(&self, pos: &Isometry<Real>) -> Aabb {
        self.local_aabb().transform_by(pos)
    }

    /// The root box of the triangle tree.
    #[inline]
    pub fn local_aabb(&self) -> Aabb {
        self.tree().root_aabb().unwrap_or_else(Aabb::new_invalid)
    }
}
