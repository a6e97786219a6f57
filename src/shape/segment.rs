//! Line segments: the core of capsules and the edges of triangles.

use crate::math::{Isometry, Point, Real, UnitVector, Vector, DEFAULT_EPSILON};
use crate::shape::{PolygonalFeature, PolygonalFeatureMap, SupportMap};

use na::Unit;

/// The segment between the points `a` and `b`.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Segment {
    /// The first endpoint.
    pub a: Point<Real>,
    /// The second endpoint.
    pub b: Point<Real>,
}

/// Where a projected point landed on a segment.
#[derive(PartialEq, Debug, Clone, Copy)]
pub enum SegmentPointLocation {
    /// On the endpoint `a` (`0`) or `b` (`1`).
    OnVertex(u32),
    /// Strictly between the endpoints, with the weights of `a` and `b`.
    OnEdge([Real; 2]),
}

impl Segment {
    /// Creates the segment `[a, b]`.
    #[inline]
    pub fn new(a: Point<Real>, b: Point<Real>) -> Segment {
        Segment { a, b }
    }

    /// `b - a`.
    pub fn scaled_direction(&self) -> Vector<Real> {
        self.b - self.a
    }

    /// The distance between both endpoints.
    pub fn length(&self) -> Real {
        na::distance(&self.a, &self.b)
    }

    /// The unit direction from `a` to `b`, or `None` if both endpoints coincide.
    pub fn direction(&self) -> Option<UnitVector<Real>> {
        Unit::try_new(self.scaled_direction(), DEFAULT_EPSILON)
    }

    /// This segment with both endpoints moved by `pos`.
    pub fn transformed(&self, pos: &Isometry<Real>) -> Self {
        Segment::new(pos * self.a, pos * self.b)
    }

    /// The point of this segment described by `location`.
    pub fn point_at(&self, location: &SegmentPointLocation) -> Point<Real> {
        match location {
            SegmentPointLocation::OnVertex(0) => self.a,
            SegmentPointLocation::OnVertex(_) => self.b,
            SegmentPointLocation::OnEdge([wa, wb]) => {
                Point::from(self.a.coords * *wa + self.b.coords * *wb)
            }
        }
    }

    /// The point of this segment closest to `pt`, and where it lies.
    ///
    /// A degenerate segment projects everything on `a`.
    pub fn project_local_point_and_get_location(
        &self,
        pt: &Point<Real>,
    ) -> (Point<Real>, SegmentPointLocation) {
        let ab = self.scaled_direction();
        let len_sq = ab.norm_squared();
        let along = ab.dot(&(pt - self.a));

        if along <= 0.0 || len_sq <= DEFAULT_EPSILON {
            (self.a, SegmentPointLocation::OnVertex(0))
        } else if along >= len_sq {
            (self.b, SegmentPointLocation::OnVertex(1))
        } else {
            let t = along / len_sq;
            (self.a + ab * t, SegmentPointLocation::OnEdge([1.0 - t, t]))
        }
    }
}

impl SupportMap for Segment {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        if self.b.coords.dot(dir) >= self.a.coords.dot(dir) {
            self.b
        } else {
            self.a
        }
    }
}

impl PolygonalFeatureMap for Segment {
    fn local_support_feature(&self, _: &UnitVector<Real>, out_feature: &mut PolygonalFeature) {
        out_feature.vertices = [self.a, self.b, self.b, self.b];
        out_feature.num_vertices = 2;
        out_feature.normal = None;
    }
}

#[cfg(test)]
mod test {
    use super::{Segment, SegmentPointLocation};
    use crate::math::{Isometry, Point, Vector};

    #[test]
    fn project_point_on_segment_regions() {
        let seg = Segment::new(Point::new(0.0, 0.0, 0.0), Point::new(2.0, 0.0, 0.0));

        let (p, loc) = seg.project_local_point_and_get_location(&Point::new(-1.0, 1.0, 0.0));
        assert_eq!(p, seg.a);
        assert_eq!(loc, SegmentPointLocation::OnVertex(0));

        let (p, loc) = seg.project_local_point_and_get_location(&Point::new(0.5, 3.0, -1.0));
        assert_relative_eq!(p, Point::new(0.5, 0.0, 0.0));
        assert_eq!(loc, SegmentPointLocation::OnEdge([0.75, 0.25]));
        assert_relative_eq!(seg.point_at(&loc), p);

        let (p, _) = seg.project_local_point_and_get_location(&Point::new(4.0, 0.0, 0.0));
        assert_eq!(p, seg.b);
    }

    #[test]
    fn transformed_segment_keeps_its_length() {
        let seg = Segment::new(Point::new(1.0, 0.0, 0.0), Point::new(1.0, 3.0, 4.0));
        let pos = Isometry::new(Vector::new(-2.0, 1.0, 0.5), Vector::new(0.4, -0.2, 0.9));

        assert_relative_eq!(seg.transformed(&pos).length(), 5.0, epsilon = 1.0e-5);
        assert!(Segment::new(seg.a, seg.a).direction().is_none());
    }
}
