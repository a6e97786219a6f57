use crate::math::{Isometry, Point, Real, UnitVector, Vector};
use crate::query::{Contact, ContactKind};
use crate::shape::SupportMap;
use arrayvec::ArrayVec;

/// The reference face must be at least this aligned with the contact normal for clipping to be
/// attempted. Below that, the single contact found by EPA is kept.
const MIN_REFERENCE_FACE_ALIGNMENT: Real = 0.9;

/// Maximum number of contacts kept after clipping two polygonal features.
pub const MAX_CLIPPED_CONTACTS: usize = 4;

type ClipBuffer = ArrayVec<Point<Real>, 12>;

/// A polygonal feature (vertex, segment, triangle or quad) of a polyhedral shape.
///
/// Features are computed in the local-space of their shape. Round shapes (capsules) expose the
/// feature of their core segment and report their radius separately.
#[derive(Debug, Clone)]
pub struct PolygonalFeature {
    /// Up to four vertices forming this polygonal feature.
    pub vertices: [Point<Real>; 4],
    /// The number of vertices of this feature that are actually used.
    pub num_vertices: usize,
    /// The outward normal of this feature, if it is a face (three or four vertices).
    pub normal: Option<UnitVector<Real>>,
}

impl Default for PolygonalFeature {
    fn default() -> Self {
        Self {
            vertices: [Point::origin(); 4],
            num_vertices: 0,
            normal: None,
        }
    }
}

/// Trait implemented by convex shapes with features with polyhedral approximations.
pub trait PolygonalFeatureMap: SupportMap {
    /// Compute the support polygonal face of `self` towards the `dir`.
    fn local_support_feature(&self, dir: &UnitVector<Real>, out_feature: &mut PolygonalFeature);
}

impl PolygonalFeature {
    /// Creates a new empty polygonal feature.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets this feature to a single vertex.
    pub fn set_point(&mut self, pt: Point<Real>) {
        self.vertices = [pt; 4];
        self.num_vertices = 1;
        self.normal = None;
    }

    /// The vertices actually used by this feature.
    pub fn points(&self) -> &[Point<Real>] {
        &self.vertices[..self.num_vertices]
    }

    /// Transform each vertex (and the normal) of this feature by `pos`.
    pub fn transform_by(&mut self, pos: &Isometry<Real>) {
        for p in &mut self.vertices[0..self.num_vertices] {
            *p = pos * *p;
        }

        self.normal = self.normal.map(|n| pos * n);
    }

    fn is_face(&self) -> bool {
        self.num_vertices >= 3 && self.normal.is_some()
    }

    /// Computes the contacts between two polygonal features by clipping one against the side
    /// planes of the other.
    ///
    /// `feature1` is expressed in the local-space of the first shape, `feature2` in the
    /// local-space of the second shape, and `normal1` is the contact normal (pointing from the
    /// first shape toward the second) expressed in the first shape's local-space. `radius1` and
    /// `radius2` are the border radii of round shapes.
    ///
    /// Returns the number of contacts pushed to `out`. Zero means the features could not be
    /// clipped and the caller should keep its single contact.
    pub fn contacts(
        pos12: &Isometry<Real>,
        normal1: &UnitVector<Real>,
        feature1: &Self,
        radius1: Real,
        feature2: &Self,
        radius2: Real,
        prediction: Real,
        out: &mut Vec<Contact>,
    ) -> usize {
        let mut feature2_1 = feature2.clone();
        feature2_1.transform_by(pos12);

        let score1 = feature1
            .normal
            .filter(|_| feature1.is_face())
            .map(|n| n.dot(normal1));
        let score2 = feature2_1
            .normal
            .filter(|_| feature2_1.is_face())
            .map(|n| -n.dot(normal1));

        let reference_is_1 = match (score1, score2) {
            (Some(s1), Some(s2)) => s1 >= s2,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => return 0,
        };

        let (reference, incident, ref_radius, inc_radius) = if reference_is_1 {
            (feature1, &feature2_1, radius1, radius2)
        } else {
            (&feature2_1, feature1, radius2, radius1)
        };

        let Some(ref_normal) = reference.normal else {
            return 0;
        };
        let alignment = if reference_is_1 {
            ref_normal.dot(normal1)
        } else {
            -ref_normal.dot(normal1)
        };

        if alignment < MIN_REFERENCE_FACE_ALIGNMENT {
            return 0;
        }

        let ref_pts = reference.points();
        let ref_center = ref_pts
            .iter()
            .fold(Vector::zeros(), |acc, p| acc + p.coords)
            / ref_pts.len() as Real;

        let mut clipped: ClipBuffer = incident.points().iter().copied().collect();

        for k in 0..ref_pts.len() {
            let a = ref_pts[k];
            let b = ref_pts[(k + 1) % ref_pts.len()];
            let mut side = (b - a).cross(&ref_normal);

            if side.dot(&(ref_center - a.coords)) > 0.0 {
                side = -side;
            }

            clipped = clip_against_plane(&clipped, &a, &side);

            if clipped.is_empty() {
                return 0;
            }
        }

        let mut candidates = ArrayVec::<Contact, 12>::new();

        for p in &clipped {
            let height = (p - ref_pts[0]).dot(&ref_normal);
            let depth = ref_radius + inc_radius - height;

            if depth + prediction < 0.0 {
                continue;
            }

            let on_reference = p - *ref_normal * (height - ref_radius);
            let on_incident = p - *ref_normal * inc_radius;

            let (point1, point2_1, n1) = if reference_is_1 {
                (on_reference, on_incident, ref_normal)
            } else {
                (on_incident, on_reference, -ref_normal)
            };

            let point2 = pos12.inverse_transform_point(&point2_1);
            let normal2 = pos12.inverse_transform_unit_vector(&-n1);
            let contact =
                Contact::new(point1, point2, n1, normal2, -depth).with_kind(ContactKind::Face);

            if candidates.try_push(contact).is_err() {
                break;
            }
        }

        let num_kept = reduce_contacts(&mut candidates, &ref_normal);
        out.extend(candidates.iter().take(num_kept).copied());
        num_kept
    }
}

fn clip_against_plane(
    poly: &ClipBuffer,
    plane_point: &Point<Real>,
    plane_normal: &Vector<Real>,
) -> ClipBuffer {
    let mut result = ClipBuffer::new();
    let dist = |p: &Point<Real>| (p - plane_point).dot(plane_normal);

    match poly.len() {
        0 => {}
        1 => {
            if dist(&poly[0]) <= 0.0 {
                result.push(poly[0]);
            }
        }
        2 => {
            let (a, b) = (poly[0], poly[1]);
            let (da, db) = (dist(&a), dist(&b));

            if da <= 0.0 && db <= 0.0 {
                result.push(a);
                result.push(b);
            } else if da <= 0.0 || db <= 0.0 {
                let inter = a + (b - a) * (da / (da - db));
                if da <= 0.0 {
                    result.push(a);
                    result.push(inter);
                } else {
                    result.push(inter);
                    result.push(b);
                }
            }
        }
        n => {
            // Sutherland-Hodgman.
            for i in 0..n {
                let prev = poly[(i + n - 1) % n];
                let curr = poly[i];
                let (dp, dc) = (dist(&prev), dist(&curr));

                if dc <= 0.0 {
                    if dp > 0.0 {
                        let _ = result.try_push(prev + (curr - prev) * (dp / (dp - dc)));
                    }
                    let _ = result.try_push(curr);
                } else if dp <= 0.0 {
                    let _ = result.try_push(prev + (curr - prev) * (dp / (dp - dc)));
                }
            }
        }
    }

    result
}

/// Reorders `contacts` so that its first elements are the (at most four) most relevant ones:
/// the deepest, the one furthest from it, and the two spanning the largest area on each side.
///
/// Returns the number of contacts to keep.
fn reduce_contacts(contacts: &mut ArrayVec<Contact, 12>, normal: &UnitVector<Real>) -> usize {
    if contacts.len() <= MAX_CLIPPED_CONTACTS {
        return contacts.len();
    }

    let deepest = (0..contacts.len())
        .min_by(|&i, &j| contacts[i].dist.total_cmp(&contacts[j].dist))
        .unwrap_or(0);
    contacts.swap(0, deepest);

    let p0 = contacts[0].point1;
    let furthest = (1..contacts.len())
        .max_by(|&i, &j| {
            let di = (contacts[i].point1 - p0).norm_squared();
            let dj = (contacts[j].point1 - p0).norm_squared();
            di.total_cmp(&dj)
        })
        .unwrap_or(1);
    contacts.swap(1, furthest);

    let p1 = contacts[1].point1;
    let signed_area = |p: &Point<Real>| (p1 - p0).cross(&(p - p0)).dot(normal);

    let third = (2..contacts.len())
        .max_by(|&i, &j| {
            let ai = signed_area(&contacts[i].point1).abs();
            let aj = signed_area(&contacts[j].point1).abs();
            ai.total_cmp(&aj)
        })
        .unwrap_or(2);
    contacts.swap(2, third);

    let side = signed_area(&contacts[2].point1);
    let fourth = (3..contacts.len()).max_by(|&i, &j| {
        let ai = -side.signum() * signed_area(&contacts[i].point1);
        let aj = -side.signum() * signed_area(&contacts[j].point1);
        ai.total_cmp(&aj)
    });

    match fourth {
        Some(k) if -side.signum() * signed_area(&contacts[k].point1) > 0.0 => {
            contacts.swap(3, k);
            4
        }
        _ => 3,
    }
}
