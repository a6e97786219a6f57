use crate::math::{Point, Real, UnitVector, Vector};
use crate::shape::{PolygonalFeature, PolygonalFeatureMap, ShapeBuildError, SupportMap};
use crate::utils;

/// A convex polyhedron given by its vertices and triangular faces.
///
/// The faces are expected to be counter-clockwise when seen from outside. Convexity is not
/// checked: the support function only looks at the vertices, so a non-convex input behaves
/// like its convex hull.
#[derive(PartialEq, Debug, Clone)]
pub struct ConvexPolyhedron {
    points: Vec<Point<Real>>,
    faces: Vec<[u32; 3]>,
    face_normals: Vec<Option<UnitVector<Real>>>,
}

impl ConvexPolyhedron {
    /// Builds a convex polyhedron from its vertices and triangle indices.
    pub fn new(points: Vec<Point<Real>>, faces: Vec<[u32; 3]>) -> Result<Self, ShapeBuildError> {
        super::trimesh::validate_buffers(&points, &faces)?;

        let face_normals = faces
            .iter()
            .map(|f| {
                utils::ccw_face_normal([
                    &points[f[0] as usize],
                    &points[f[1] as usize],
                    &points[f[2] as usize],
                ])
            })
            .collect();

        Ok(ConvexPolyhedron {
            points,
            faces,
            face_normals,
        })
    }

    /// Builds a convex polyhedron from flat buffers of coordinates and indices.
    pub fn from_raw_buffers(vertices: &[Real], indices: &[u32]) -> Result<Self, ShapeBuildError> {
        let (points, faces) = super::trimesh::split_raw_buffers(vertices, indices)?;
        Self::new(points, faces)
    }

    /// The vertices of this convex polyhedron.
    #[inline]
    pub fn points(&self) -> &[Point<Real>] {
        &self.points[..]
    }

    /// The triangular faces of this convex polyhedron.
    #[inline]
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces[..]
    }

    /// The outward normal of each face, `None` for degenerate faces.
    #[inline]
    pub fn face_normals(&self) -> &[Option<UnitVector<Real>>] {
        &self.face_normals[..]
    }

    /// The vertices of the `i`-th face.
    #[inline]
    pub fn face_vertices(&self, i: usize) -> [Point<Real>; 3] {
        let f = self.faces[i];
        [
            self.points[f[0] as usize],
            self.points[f[1] as usize],
            self.points[f[2] as usize],
        ]
    }

    /// The volume and center of mass of this polyhedron, computed by tetrahedral decomposition
    /// around its vertex centroid.
    pub fn volume_and_center_of_mass(&self) -> (Real, Point<Real>) {
        let origin = self
            .points
            .iter()
            .fold(Vector::zeros(), |acc, p| acc + p.coords)
            / self.points.len().max(1) as Real;
        let origin = Point::from(origin);

        let mut volume = 0.0;
        let mut com = Vector::zeros();

        for i in 0..self.faces.len() {
            let [a, b, c] = self.face_vertices(i);
            let tetra_volume = (a - origin).dot(&(b - origin).cross(&(c - origin))) / 6.0;
            volume += tetra_volume;
            com += (origin.coords + a.coords + b.coords + c.coords) * (tetra_volume / 4.0);
        }

        if volume.abs() > crate::math::DEFAULT_EPSILON {
            (volume, Point::from(com / volume))
        } else {
            (volume, origin)
        }
    }
}

impl SupportMap for ConvexPolyhedron {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        utils::point_cloud_support_point(dir, self.points())
    }
}

impl PolygonalFeatureMap for ConvexPolyhedron {
    fn local_support_feature(&self, dir: &UnitVector<Real>, out_feature: &mut PolygonalFeature) {
        let mut best_face = None;
        let mut best_dot = -Real::MAX;

        for (i, n) in self.face_normals.iter().enumerate() {
            if let Some(n) = n {
                let dot = n.dot(dir);
                if dot > best_dot {
                    best_dot = dot;
                    best_face = Some((i, *n));
                }
            }
        }

        match best_face {
            Some((i, normal)) => {
                let [a, b, c] = self.face_vertices(i);
                out_feature.vertices = [a, b, c, c];
                out_feature.num_vertices = 3;
                out_feature.normal = Some(normal);
            }
            None => out_feature.set_point(self.local_support_point(dir)),
        }
    }
}
