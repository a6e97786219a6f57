//! Shapes supported by tumble3d.

pub use self::ball::Ball;
pub use self::capsule::Capsule;
pub use self::convex_polyhedron::ConvexPolyhedron;
pub use self::cuboid::Cuboid;
pub use self::error::ShapeBuildError;
pub use self::feature_id::FeatureId;
pub use self::polygonal_feature::{PolygonalFeature, PolygonalFeatureMap};
pub use self::segment::{Segment, SegmentPointLocation};
pub use self::shape::{Shape, ShapeKind};
pub use self::shared_shape::SharedShape;
pub use self::support_map::SupportMap;
pub use self::triangle::{Triangle, TrianglePointLocation};
pub use self::trimesh::TriMesh;

mod ball;
mod capsule;
mod convex_polyhedron;
mod cuboid;
mod error;
mod feature_id;
mod polygonal_feature;
mod segment;
mod shape;
mod shared_shape;
mod support_map;
mod triangle;
mod trimesh;
