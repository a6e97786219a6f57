use crate::math::{Isometry, Point, Real, UnitVector};
use crate::query::details::closest_points_segment_segment_with_locations;
use crate::query::{Contact, ContactKind};
use crate::shape::{Capsule, Segment, SegmentPointLocation, Triangle, TrianglePointLocation};
use na::Unit;

/// Contact between a capsule and a two-sided triangle of a mesh.
///
/// `pos12` is the position of the triangle's frame relative to the capsule. `internal_edges[k]`
/// tells whether the edge `k` (joining vertices `k` and `k + 1`) is shared with another
/// triangle of the mesh.
///
/// The contact is classified by the first matching region: the triangle face, then its edges,
/// then its vertices. At internal edges (and at vertices where both adjacent edges are internal)
/// the triangle-side normal is blended with the face normal so a capsule sliding across the seam
/// does not catch on it. That blended normal is the only case where `normal1` and `normal2`
/// are not opposite.
pub fn contact_capsule_triangle(
    pos12: &Isometry<Real>,
    capsule: &Capsule,
    triangle: &Triangle,
    internal_edges: [bool; 3],
    prediction: Real,
) -> Option<Contact> {
    let face_normal = triangle.normal().filter(|_| !triangle.is_degenerate())?;
    let radius = capsule.radius;
    let limit = radius + prediction;
    let seg = capsule.segment.transformed(&pos12.inverse());

    // Orient the face toward the capsule center.
    let center_height = (na::center(&seg.a, &seg.b) - triangle.a).dot(&face_normal);
    let n = if center_height < 0.0 {
        -face_normal
    } else {
        face_normal
    };

    let (on_capsule, on_triangle, normal2, kind) = face_region(&seg, triangle, &n, limit)
        .or_else(|| edge_region(&seg, triangle, &n, internal_edges, limit))
        .or_else(|| corner_region(&seg, triangle, &n, internal_edges, limit))?;

    let dist = (on_capsule - on_triangle).dot(&normal2.separation) - radius;
    let point1 = pos12 * (on_capsule - *normal2.separation * radius);
    let normal1 = pos12 * -normal2.separation;

    Some(Contact::new(point1, on_triangle, normal1, normal2.reported, dist).with_kind(kind))
}

struct RegionNormal {
    /// The direction along which the two shapes are separated.
    separation: UnitVector<Real>,
    /// The normal reported on the triangle side, possibly blended at seams.
    reported: UnitVector<Real>,
}

impl RegionNormal {
    fn new(separation: UnitVector<Real>, face: &UnitVector<Real>, blend: bool) -> Self {
        let reported = if blend {
            Unit::try_new(*separation + **face, 1.0e-6).unwrap_or(separation)
        } else {
            separation
        };

        RegionNormal {
            separation,
            reported,
        }
    }
}

type Region = (Point<Real>, Point<Real>, RegionNormal, ContactKind);

fn face_region(
    seg: &Segment,
    triangle: &Triangle,
    n: &UnitVector<Real>,
    limit: Real,
) -> Option<Region> {
    let height = |p: &Point<Real>| (p - triangle.a).dot(n);
    let (ha, hb) = (height(&seg.a), height(&seg.b));
    let (deepest, h) = if ha <= hb { (seg.a, ha) } else { (seg.b, hb) };

    if h >= limit {
        return None;
    }

    let on_plane = deepest - **n * h;
    match triangle.project_local_point_and_get_location(&on_plane).1 {
        TrianglePointLocation::OnFace(_) => Some((
            deepest,
            on_plane,
            RegionNormal::new(*n, n, false),
            ContactKind::Face,
        )),
        _ => None,
    }
}

fn edge_region(
    seg: &Segment,
    triangle: &Triangle,
    n: &UnitVector<Real>,
    internal_edges: [bool; 3],
    limit: Real,
) -> Option<Region> {
    let mut best: Option<(Real, Region)> = None;

    for (k, (a, b)) in triangle.edges().into_iter().enumerate() {
        let edge = Segment::new(a, b);
        let (loc_seg, loc_edge) = closest_points_segment_segment_with_locations(seg, &edge);

        if !matches!(loc_edge, SegmentPointLocation::OnEdge(_)) {
            continue;
        }

        let on_capsule = seg.point_at(&loc_seg);
        let on_edge = edge.point_at(&loc_edge);
        let (separation, dist) =
            Unit::try_new_and_get(on_capsule - on_edge, 0.0).unwrap_or((*n, 0.0));

        if dist < limit && best.as_ref().map_or(true, |(d, _)| dist < *d) {
            let normal = RegionNormal::new(separation, n, internal_edges[k]);
            best = Some((dist, (on_capsule, on_edge, normal, ContactKind::Edge)));
        }
    }

    best.map(|(_, region)| region)
}

fn corner_region(
    seg: &Segment,
    triangle: &Triangle,
    n: &UnitVector<Real>,
    internal_edges: [bool; 3],
    limit: Real,
) -> Option<Region> {
    let mut best: Option<(Real, Region)> = None;

    for (k, vertex) in triangle.vertices().into_iter().enumerate() {
        let (on_capsule, _) = seg.project_local_point_and_get_location(&vertex);
        let (separation, dist) =
            Unit::try_new_and_get(on_capsule - vertex, 0.0).unwrap_or((*n, 0.0));

        if dist < limit && best.as_ref().map_or(true, |(d, _)| dist < *d) {
            // Vertex `k` is shared by the edges `k` and `k + 2`.
            let blend = internal_edges[k] && internal_edges[(k + 2) % 3];
            let normal = RegionNormal::new(separation, n, blend);
            best = Some((dist, (on_capsule, vertex, normal, ContactKind::Corner)));
        }
    }

    best.map(|(_, region)| region)
}
