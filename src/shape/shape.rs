use crate::bounding_volume::Aabb;
use crate::mass_properties::MassProperties;
use crate::math::{Isometry, Matrix, Point, Real, Vector};
use crate::shape::{
    Ball, Capsule, ConvexPolyhedron, Cuboid, PolygonalFeatureMap, SupportMap, TriMesh,
};

/// The fieldless tag of a [`Shape`].
///
/// The discriminant order is the order used to sort the two colliders of a pair before
/// narrowphase dispatch: the collider with the lower kind always comes first.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShapeKind {
    /// A ball shape.
    Ball = 0,
    /// A cuboid shape.
    Cuboid = 1,
    /// A capsule shape.
    Capsule = 2,
    /// A convex polyhedron shape.
    ConvexPolyhedron = 3,
    /// A triangle mesh shape.
    TriMesh = 4,
}

impl ShapeKind {
    /// The number of shape kinds.
    pub const COUNT: usize = 5;

    /// The index of this kind in the narrowphase dispatch table.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A shape, as attached to a collider.
///
/// Shapes are immutable geometric parameters without any transform. They are shared between
/// colliders through [`SharedShape`](crate::shape::SharedShape).
#[derive(Clone, Debug)]
pub enum Shape {
    /// A ball.
    Ball(Ball),
    /// A box.
    Cuboid(Cuboid),
    /// A capsule.
    Capsule(Capsule),
    /// A convex polyhedron.
    ConvexPolyhedron(ConvexPolyhedron),
    /// A triangle mesh.
    TriMesh(TriMesh),
}

impl Shape {
    /// The kind of this shape.
    #[inline]
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Ball(_) => ShapeKind::Ball,
            Shape::Cuboid(_) => ShapeKind::Cuboid,
            Shape::Capsule(_) => ShapeKind::Capsule,
            Shape::ConvexPolyhedron(_) => ShapeKind::ConvexPolyhedron,
            Shape::TriMesh(_) => ShapeKind::TriMesh,
        }
    }

    /// Computes the [`Aabb`] of this shape transformed by `position`.
    pub fn compute_aabb(&self, position: &Isometry<Real>) -> Aabb {
        match self {
            Shape::Ball(s) => s.aabb(position),
            Shape::Cuboid(s) => s.aabb(position),
            Shape::Capsule(s) => s.aabb(position),
            Shape::ConvexPolyhedron(s) => s.aabb(position),
            Shape::TriMesh(s) => s.aabb(position),
        }
    }

    /// Computes the [`Aabb`] of this shape in its local-space.
    pub fn compute_local_aabb(&self) -> Aabb {
        match self {
            Shape::Ball(s) => s.local_aabb(),
            Shape::Cuboid(s) => s.local_aabb(),
            Shape::Capsule(s) => s.local_aabb(),
            Shape::ConvexPolyhedron(s) => s.local_aabb(),
            Shape::TriMesh(s) => s.local_aabb(),
        }
    }

    /// The mass properties of this shape for the given total `mass`.
    pub fn mass_properties(&self, mass: Real) -> MassProperties {
        match self {
            Shape::Ball(s) => MassProperties::from_ball(mass, s.radius),
            Shape::Cuboid(s) => MassProperties::from_cuboid(mass, s.half_extents),
            Shape::Capsule(s) => MassProperties::from_capsule(mass, s),
            Shape::ConvexPolyhedron(s) => MassProperties::from_convex_polyhedron(mass, s),
            Shape::TriMesh(s) => {
                MassProperties::from_cuboid(mass, s.local_aabb().half_extents())
            }
        }
    }

    /// The local-space inertia tensor of this shape for the given total `mass`.
    ///
    /// Returns the zero matrix for a zero mass.
    pub fn inertia_tensor(&self, mass: Real) -> Matrix<Real> {
        self.mass_properties(mass).inertia
    }

    /// Converts this shape to a support map, if it is convex.
    ///
    /// Triangle meshes are not convex and return `None`: query their triangles instead.
    pub fn as_support_map(&self) -> Option<&dyn SupportMap> {
        match self {
            Shape::Ball(s) => Some(s as &dyn SupportMap),
            Shape::Cuboid(s) => Some(s as &dyn SupportMap),
            Shape::Capsule(s) => Some(s as &dyn SupportMap),
            Shape::ConvexPolyhedron(s) => Some(s as &dyn SupportMap),
            Shape::TriMesh(_) => None,
        }
    }

    /// Converts this shape to a polygonal feature-map, if it is convex, together with its
    /// border radius.
    pub fn as_polygonal_feature_map(&self) -> Option<(&dyn PolygonalFeatureMap, Real)> {
        match self {
            Shape::Cuboid(s) => Some((s as &dyn PolygonalFeatureMap, 0.0)),
            Shape::Capsule(s) => Some((&s.segment as &dyn PolygonalFeatureMap, s.radius)),
            Shape::ConvexPolyhedron(s) => Some((s as &dyn PolygonalFeatureMap, 0.0)),
            Shape::Ball(_) | Shape::TriMesh(_) => None,
        }
    }

    /// The ball, if this shape is one.
    pub fn as_ball(&self) -> Option<&Ball> {
        match self {
            Shape::Ball(s) => Some(s),
            _ => None,
        }
    }

    /// The cuboid, if this shape is one.
    pub fn as_cuboid(&self) -> Option<&Cuboid> {
        match self {
            Shape::Cuboid(s) => Some(s),
            _ => None,
        }
    }

    /// The capsule, if this shape is one.
    pub fn as_capsule(&self) -> Option<&Capsule> {
        match self {
            Shape::Capsule(s) => Some(s),
            _ => None,
        }
    }

    /// The convex polyhedron, if this shape is one.
    pub fn as_convex_polyhedron(&self) -> Option<&ConvexPolyhedron> {
        match self {
            Shape::ConvexPolyhedron(s) => Some(s),
            _ => None,
        }
    }

    /// The triangle mesh, if this shape is one.
    pub fn as_trimesh(&self) -> Option<&TriMesh> {
        match self {
            Shape::TriMesh(s) => Some(s),
            _ => None,
        }
    }
}

impl SupportMap for Shape {
    /// Support point of this shape. For a triangle mesh this is the support point of the
    /// convex hull of its vertices.
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        match self {
            Shape::Ball(s) => s.local_support_point(dir),
            Shape::Cuboid(s) => s.local_support_point(dir),
            Shape::Capsule(s) => s.local_support_point(dir),
            Shape::ConvexPolyhedron(s) => s.local_support_point(dir),
            Shape::TriMesh(s) => s.local_support_point(dir),
        }
    }
}

macro_rules! impl_from_shape(
    ($($variant: ident),*) => {$(
        impl From<$variant> for Shape {
            fn from(s: $variant) -> Self {
                Shape::$variant(s)
            }
        }
    )*}
);

impl_from_shape!(Ball, Cuboid, Capsule, ConvexPolyhedron, TriMesh);
