use crate::math::{Point, Real, Vector};
use crate::shape::{
    Ball, Capsule, ConvexPolyhedron, Cuboid, Shape, ShapeBuildError, TriMesh,
};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// The shape of a collider, shared read-only between any number of colliders.
#[derive(Clone)]
pub struct SharedShape(pub Arc<Shape>);

impl Deref for SharedShape {
    type Target = Shape;
    fn deref(&self) -> &Shape {
        &self.0
    }
}

impl AsRef<Shape> for SharedShape {
    fn as_ref(&self) -> &Shape {
        &self.0
    }
}

impl fmt::Debug for SharedShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedShape ( Arc<{:?}> )", self.0.kind())
    }
}

impl SharedShape {
    /// Wraps the given shape as a shared shape.
    pub fn new(shape: impl Into<Shape>) -> Self {
        Self(Arc::new(shape.into()))
    }

    /// Initialize a ball shape defined by its radius.
    pub fn ball(radius: Real) -> Self {
        Self::new(Ball::new(radius))
    }

    /// Initialize a cuboid shape defined by its half-extents.
    pub fn cuboid(hx: Real, hy: Real, hz: Real) -> Self {
        Self::new(Cuboid::new(Vector::new(hx, hy, hz)))
    }

    /// Initialize a capsule shape aligned with the `y` axis.
    pub fn capsule_y(half_height: Real, radius: Real) -> Self {
        Self::new(Capsule::new_y(half_height, radius))
    }

    /// Initialize a capsule shape from its endpoints and radius.
    pub fn capsule(a: Point<Real>, b: Point<Real>, radius: Real) -> Self {
        Self::new(Capsule::new(a, b, radius))
    }

    /// Initializes a convex polyhedron from its vertices and triangle indices.
    pub fn convex_mesh(
        points: Vec<Point<Real>>,
        indices: Vec<[u32; 3]>,
    ) -> Result<Self, ShapeBuildError> {
        ConvexPolyhedron::new(points, indices).map(Self::new)
    }

    /// Initializes a triangle mesh shape defined by its vertex and index buffers.
    pub fn trimesh(
        vertices: Vec<Point<Real>>,
        indices: Vec<[u32; 3]>,
    ) -> Result<Self, ShapeBuildError> {
        TriMesh::new(vertices, indices).map(Self::new)
    }

    /// Initializes a triangle mesh shape from flat buffers.
    pub fn trimesh_from_raw_buffers(
        vertices: &[Real],
        indices: &[u32],
    ) -> Result<Self, ShapeBuildError> {
        TriMesh::from_raw_buffers(vertices, indices).map(Self::new)
    }
}
