use crate::math::{Point, Real, Vector};
use na::Unit;
use std::mem;

/// The pair of features a contact was generated from.
///
/// Contacts against polyhedral faces are the most reliable; the position solver processes them
/// first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum ContactKind {
    /// A contact computed on smooth or generic convex geometry (spheres, GJK/EPA).
    #[default]
    Convex,
    /// A contact against the interior of a face.
    Face,
    /// A contact against the interior of an edge.
    Edge,
    /// A contact against a vertex.
    Corner,
}

/// A single contact between two shapes, in their local frames.
///
/// `normal1` points from the first shape toward the second one and `normal2` the other way,
/// so that `pos12 * normal2 == -normal1`.
#[derive(Debug, PartialEq, Copy, Clone)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Contact {
    /// The contact point on the first shape, in its local frame.
    pub point1: Point<Real>,
    /// The contact point on the second shape, in its local frame.
    pub point2: Point<Real>,
    /// The outward normal of the first shape at `point1`, in its local frame.
    pub normal1: Unit<Vector<Real>>,
    /// The outward normal of the second shape at `point2`, in its local frame.
    pub normal2: Unit<Vector<Real>>,
    /// Signed distance between the contact points along `normal1`. Negative when the shapes
    /// penetrate.
    pub dist: Real,
    /// The features this contact was generated from.
    pub kind: ContactKind,
}

impl Contact {
    /// Creates a new contact of kind [`ContactKind::Convex`].
    #[inline]
    pub fn new(
        point1: Point<Real>,
        point2: Point<Real>,
        normal1: Unit<Vector<Real>>,
        normal2: Unit<Vector<Real>>,
        dist: Real,
    ) -> Self {
        Contact {
            point1,
            point2,
            normal1,
            normal2,
            dist,
            kind: ContactKind::Convex,
        }
    }

    /// This contact with its kind set to `kind`.
    #[inline]
    pub fn with_kind(self, kind: ContactKind) -> Self {
        Contact { kind, ..self }
    }

    /// Are all the points, normals and the distance finite?
    pub fn is_finite(&self) -> bool {
        let all_finite = |v: &Vector<Real>| v.iter().all(|x| x.is_finite());
        self.dist.is_finite()
            && all_finite(&self.point1.coords)
            && all_finite(&self.point2.coords)
            && all_finite(self.normal1.as_ref())
            && all_finite(self.normal2.as_ref())
    }

    /// Exchanges the roles of both shapes.
    #[inline]
    pub fn flip(&mut self) {
        mem::swap(&mut self.point1, &mut self.point2);
        mem::swap(&mut self.normal1, &mut self.normal2);
    }

    /// This contact seen from the second shape.
    #[inline]
    pub fn flipped(mut self) -> Self {
        self.flip();
        self
    }
}
