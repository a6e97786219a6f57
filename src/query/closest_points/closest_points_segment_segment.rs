use crate::math::{Isometry, Point, Real, DEFAULT_EPSILON};
use crate::shape::{Segment, SegmentPointLocation};

/// Closest points between two segments.
///
/// `seg2` is transformed by `pos12`. Both returned points are expressed in the local-space of
/// `seg1`.
#[inline]
pub fn closest_points_segment_segment(
    pos12: &Isometry<Real>,
    seg1: &Segment,
    seg2: &Segment,
) -> (Point<Real>, Point<Real>) {
    let seg2_1 = seg2.transformed(pos12);
    let (loc1, loc2) = closest_points_segment_segment_with_locations(seg1, &seg2_1);
    (seg1.point_at(&loc1), seg2_1.point_at(&loc2))
}

/// Locations of the closest points between two segments expressed in the same space.
///
/// Parallel segments yield one of their pairs of closest points. Zero-length segments are
/// treated as points.
pub fn closest_points_segment_segment_with_locations(
    seg1: &Segment,
    seg2: &Segment,
) -> (SegmentPointLocation, SegmentPointLocation) {
    // Minimizes |seg1.a + s d1 - seg2.a - t d2|² over the unit square, as in Ericson's
    // "Real-Time Collision Detection", 5.1.9.
    let d1 = seg1.scaled_direction();
    let d2 = seg2.scaled_direction();
    let r = seg1.a - seg2.a;
    let len1 = d1.norm_squared();
    let len2 = d2.norm_squared();
    let f = d2.dot(&r);
    let clamp01 = |x: Real| x.clamp(0.0, 1.0);

    let (s, t) = match (len1 <= DEFAULT_EPSILON, len2 <= DEFAULT_EPSILON) {
        (true, true) => (0.0, 0.0),
        (true, false) => (0.0, clamp01(f / len2)),
        (false, true) => (clamp01(-d1.dot(&r) / len1), 0.0),
        (false, false) => {
            let b = d1.dot(&d2);
            let c = d1.dot(&r);
            let denom = len1 * len2 - b * b;

            // Parallel segments start from `seg1.a`.
            let s = if denom > DEFAULT_EPSILON * len1 * len2 {
                clamp01((b * f - c * len2) / denom)
            } else {
                0.0
            };
            let t = (b * s + f) / len2;

            if t < 0.0 {
                (clamp01(-c / len1), 0.0)
            } else if t > 1.0 {
                (clamp01((b - c) / len1), 1.0)
            } else {
                (s, t)
            }
        }
    };

    (location(s), location(t))
}

fn location(s: Real) -> SegmentPointLocation {
    if s <= 0.0 {
        SegmentPointLocation::OnVertex(0)
    } else if s >= 1.0 {
        SegmentPointLocation::OnVertex(1)
    } else {
        SegmentPointLocation::OnEdge([1.0 - s, s])
    }
}
