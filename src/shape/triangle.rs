//! Definition of the triangle shape.

use crate::math::{Isometry, Point, Real, UnitVector, Vector};
use crate::shape::{PolygonalFeature, PolygonalFeatureMap, SupportMap};
use crate::utils;

/// Triangles with an area smaller than this are considered degenerate and ignored by contact
/// generation.
pub const DEGENERATE_TRIANGLE_AREA: Real = 1.0e-7;

/// Below this cosine between the query direction and the triangle normal, the support feature
/// of a triangle is one of its edges instead of its face.
const FACE_FEATURE_COS_THRESHOLD: Real = 0.7;

/// A triangle shape.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
#[repr(C)]
pub struct Triangle {
    /// The triangle first point.
    pub a: Point<Real>,
    /// The triangle second point.
    pub b: Point<Real>,
    /// The triangle third point.
    pub c: Point<Real>,
}

/// Description of the location of a point on a triangle.
///
/// Edge `i` joins the vertices `i` and `(i + 1) % 3`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TrianglePointLocation {
    /// The point lies on a vertex.
    OnVertex(u32),
    /// The point lies on the interior of an edge, with the barycentric coordinates of its two
    /// endpoints.
    OnEdge(u32, [Real; 2]),
    /// The point lies on the triangle interior, with the given barycentric coordinates.
    OnFace([Real; 3]),
}

impl TrianglePointLocation {
    /// The barycentric coordinates corresponding to this point location.
    pub fn barycentric_coordinates(&self) -> [Real; 3] {
        let mut bcoords = [0.0; 3];

        match self {
            TrianglePointLocation::OnVertex(i) => bcoords[*i as usize] = 1.0,
            TrianglePointLocation::OnEdge(i, uv) => {
                let i = *i as usize;
                bcoords[i] = uv[0];
                bcoords[(i + 1) % 3] = uv[1];
            }
            TrianglePointLocation::OnFace(uvw) => bcoords = *uvw,
        }

        bcoords
    }
}

impl Triangle {
    /// Creates a triangle from three points.
    #[inline]
    pub fn new(a: Point<Real>, b: Point<Real>, c: Point<Real>) -> Triangle {
        Triangle { a, b, c }
    }

    /// The three vertices of this triangle.
    #[inline]
    pub fn vertices(&self) -> [Point<Real>; 3] {
        [self.a, self.b, self.c]
    }

    /// The three edges of this triangle: [AB, BC, CA].
    #[inline]
    pub fn edges(&self) -> [(Point<Real>, Point<Real>); 3] {
        [(self.a, self.b), (self.b, self.c), (self.c, self.a)]
    }

    /// Returns a new triangle with vertices transformed by `m`.
    #[inline]
    pub fn transformed(&self, m: &Isometry<Real>) -> Self {
        Triangle::new(m * self.a, m * self.b, m * self.c)
    }

    /// A vector normal of this triangle, scaled by twice its area.
    #[inline]
    pub fn scaled_normal(&self) -> Vector<Real> {
        let ab = self.b - self.a;
        let ac = self.c - self.a;
        ab.cross(&ac)
    }

    /// The normal of this triangle assuming it is oriented counter-clockwise.
    ///
    /// Returns `None` if the triangle is degenerate.
    #[inline]
    pub fn normal(&self) -> Option<UnitVector<Real>> {
        utils::ccw_face_normal([&self.a, &self.b, &self.c])
    }

    /// The area of this triangle.
    #[inline]
    pub fn area(&self) -> Real {
        self.scaled_normal().norm() * 0.5
    }

    /// Is this triangle too thin to have a reliable normal?
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.area() <= DEGENERATE_TRIANGLE_AREA
    }

    /// The geometric center of this triangle.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        Point::from((self.a.coords + self.b.coords + self.c.coords) / 3.0)
    }

    /// Computes the point at the given location.
    pub fn point_at(&self, location: &TrianglePointLocation) -> Point<Real> {
        let bcoords = location.barycentric_coordinates();
        Point::from(
            self.a.coords * bcoords[0] + self.b.coords * bcoords[1] + self.c.coords * bcoords[2],
        )
    }

    /// Projects `pt` on this triangle, returning the projection and its location.
    ///
    /// This is the Voronoi-region walk from Christer Ericson's "Real-Time Collision Detection".
    pub fn project_local_point_and_get_location(
        &self,
        pt: &Point<Real>,
    ) -> (Point<Real>, TrianglePointLocation) {
        let ab = self.b - self.a;
        let ac = self.c - self.a;
        let ap = pt - self.a;

        let d1 = ab.dot(&ap);
        let d2 = ac.dot(&ap);
        if d1 <= 0.0 && d2 <= 0.0 {
            return (self.a, TrianglePointLocation::OnVertex(0));
        }

        let bp = pt - self.b;
        let d3 = ab.dot(&bp);
        let d4 = ac.dot(&bp);
        if d3 >= 0.0 && d4 <= d3 {
            return (self.b, TrianglePointLocation::OnVertex(1));
        }

        let vc = d1 * d4 - d3 * d2;
        if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
            let v = d1 / (d1 - d3);
            return (
                self.a + ab * v,
                TrianglePointLocation::OnEdge(0, [1.0 - v, v]),
            );
        }

        let cp = pt - self.c;
        let d5 = ab.dot(&cp);
        let d6 = ac.dot(&cp);
        if d6 >= 0.0 && d5 <= d6 {
            return (self.c, TrianglePointLocation::OnVertex(2));
        }

        let vb = d5 * d2 - d1 * d6;
        if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
            let w = d2 / (d2 - d6);
            return (
                self.a + ac * w,
                TrianglePointLocation::OnEdge(2, [w, 1.0 - w]),
            );
        }

        let va = d3 * d6 - d5 * d4;
        if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
            let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
            return (
                self.b + (self.c - self.b) * w,
                TrianglePointLocation::OnEdge(1, [1.0 - w, w]),
            );
        }

        let denom = 1.0 / (va + vb + vc);
        let v = vb * denom;
        let w = vc * denom;
        (
            self.a + ab * v + ac * w,
            TrianglePointLocation::OnFace([1.0 - v - w, v, w]),
        )
    }
}

impl SupportMap for Triangle {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        let d1 = self.a.coords.dot(dir);
        let d2 = self.b.coords.dot(dir);
        let d3 = self.c.coords.dot(dir);

        if d1 > d2 {
            if d1 > d3 {
                self.a
            } else {
                self.c
            }
        } else if d2 > d3 {
            self.b
        } else {
            self.c
        }
    }
}

impl PolygonalFeatureMap for Triangle {
    fn local_support_feature(&self, dir: &UnitVector<Real>, out_feature: &mut PolygonalFeature) {
        let Some(normal) = self.normal() else {
            out_feature.set_point(self.local_support_point(dir));
            return;
        };

        let cos = normal.dot(dir);

        if cos >= FACE_FEATURE_COS_THRESHOLD {
            out_feature.vertices = [self.a, self.b, self.c, self.c];
            out_feature.num_vertices = 3;
            out_feature.normal = Some(normal);
        } else if cos <= -FACE_FEATURE_COS_THRESHOLD {
            out_feature.vertices = [self.a, self.c, self.b, self.b];
            out_feature.num_vertices = 3;
            out_feature.normal = Some(-normal);
        } else {
            let mut verts = self.vertices();
            verts.sort_by(|p, q| q.coords.dot(dir).total_cmp(&p.coords.dot(dir)));
            out_feature.vertices = [verts[0], verts[1], verts[1], verts[1]];
            out_feature.num_vertices = 2;
            out_feature.normal = None;
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Triangle, TrianglePointLocation};
    use crate::math::Point;

    fn tri() -> Triangle {
        Triangle::new(
            Point::new(0.0, 0.0, 0.0),
            Point::new(2.0, 0.0, 0.0),
            Point::new(0.0, 2.0, 0.0),
        )
    }

    #[test]
    fn projection_regions() {
        let t = tri();

        let (p, loc) = t.project_local_point_and_get_location(&Point::new(0.5, 0.5, 3.0));
        assert_relative_eq!(p, Point::new(0.5, 0.5, 0.0));
        assert!(matches!(loc, TrianglePointLocation::OnFace(_)));
        assert_relative_eq!(t.point_at(&loc), p, epsilon = 1.0e-6);

        let (p, loc) = t.project_local_point_and_get_location(&Point::new(1.0, -1.0, 0.0));
        assert_relative_eq!(p, Point::new(1.0, 0.0, 0.0));
        assert!(matches!(loc, TrianglePointLocation::OnEdge(0, _)));

        let (p, loc) = t.project_local_point_and_get_location(&Point::new(-1.0, 1.0, 0.0));
        assert_relative_eq!(p, Point::new(0.0, 1.0, 0.0));
        assert!(matches!(loc, TrianglePointLocation::OnEdge(2, _)));
        assert_relative_eq!(t.point_at(&loc), p, epsilon = 1.0e-6);

        let (p, loc) = t.project_local_point_and_get_location(&Point::new(2.0, 2.0, 0.0));
        assert_relative_eq!(p, Point::new(1.0, 1.0, 0.0));
        assert!(matches!(loc, TrianglePointLocation::OnEdge(1, _)));

        let (p, loc) = t.project_local_point_and_get_location(&Point::new(3.0, -1.0, 1.0));
        assert_eq!(p, t.b);
        assert_eq!(loc, TrianglePointLocation::OnVertex(1));
    }

    #[test]
    fn degenerate_triangle_has_no_normal() {
        let t = Triangle::new(
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(2.0, 0.0, 0.0),
        );
        assert!(t.is_degenerate());
        assert!(t.normal().is_none());
        assert!(!tri().is_degenerate());
    }
}
