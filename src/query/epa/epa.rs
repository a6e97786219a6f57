//! Three-dimensional penetration depth queries using the Expanding Polytope Algorithm.

use crate::math::{Isometry, Point, Real, UnitVector, Vector};
use crate::query::gjk::{eps_tol, CSOPoint, Simplex};
use crate::shape::{SupportMap, Triangle};
use na::Unit;

/// A support point closer than this to the plane of the closest face ends the expansion.
pub const EPA_TOLERANCE: Real = 1.0e-4;

/// Maximum number of polytope expansions.
pub const MAX_EPA_ITERATIONS: usize = 100;

#[derive(Copy, Clone, Debug)]
struct Face {
    pts: [usize; 3],
    normal: Vector<Real>,
    dist: Real,
    valid: bool,
}

impl Face {
    fn new(vertices: &[CSOPoint], pts: [usize; 3]) -> Self {
        let a = vertices[pts[0]].point;
        let b = vertices[pts[1]].point;
        let c = vertices[pts[2]].point;
        let n = (b - a).cross(&(c - a));

        match n.try_normalize(eps_tol() * eps_tol()) {
            Some(normal) => Face {
                pts,
                normal,
                dist: normal.dot(&a.coords),
                valid: true,
            },
            None => Face {
                pts,
                normal: Vector::zeros(),
                dist: Real::MAX,
                valid: false,
            },
        }
    }

    fn flipped(self, vertices: &[CSOPoint]) -> Self {
        Face::new(vertices, [self.pts[0], self.pts[2], self.pts[1]])
    }

    fn can_be_seen_by(&self, vertices: &[CSOPoint], pt: &Point<Real>) -> bool {
        self.valid && self.normal.dot(&(pt - vertices[self.pts[0]].point)) > 0.0
    }
}

/// The Expanding Polytope Algorithm in 3D.
///
/// The buffers are kept between calls to avoid allocations.
#[derive(Default)]
pub struct Epa {
    vertices: Vec<CSOPoint>,
    faces: Vec<Face>,
    horizon: Vec<(usize, usize)>,
}

impl Epa {
    /// Creates a new instance of the 3D Expanding Polytope Algorithm.
    pub fn new() -> Self {
        Self::default()
    }

    fn reset(&mut self) {
        self.vertices.clear();
        self.faces.clear();
        self.horizon.clear();
    }

    /// Projects the origin on the boundary of the Minkowski difference `g1 - pos12 * g2`.
    ///
    /// `simplex` must be the terminal simplex returned by [`gjk::intersect`](crate::query::gjk::intersect).
    /// Returns the deepest point of `g1`, the deepest point of `g2` (both in the local-space of
    /// `g1`), the contact normal pointing from `g1` toward `g2` (also in the local-space of
    /// `g1`), and the non-negative penetration depth.
    pub fn closest_points<G1, G2>(
        &mut self,
        pos12: &Isometry<Real>,
        g1: &G1,
        g2: &G2,
        simplex: &Simplex,
    ) -> Option<(Point<Real>, Point<Real>, UnitVector<Real>, Real)>
    where
        G1: ?Sized + SupportMap,
        G2: ?Sized + SupportMap,
    {
        self.reset();

        if simplex.points().len() != 4 {
            return None;
        }

        self.vertices.extend_from_slice(simplex.points());

        // Orient the four faces of the initial tetrahedron outward.
        for (pts, opposite) in [
            ([0, 1, 2], 3),
            ([0, 3, 1], 2),
            ([0, 2, 3], 1),
            ([1, 3, 2], 0),
        ] {
            let mut face = Face::new(&self.vertices, pts);
            if face.can_be_seen_by(&self.vertices, &self.vertices[opposite].point) {
                face = face.flipped(&self.vertices);
            }
            self.faces.push(face);
        }

        let mut best = self.closest_face()?;

        for _ in 0..MAX_EPA_ITERATIONS {
            let face = self.faces[best];
            let support = CSOPoint::from_shapes(pos12, g1, g2, &face.normal);
            let support_dist = support.point.coords.dot(&face.normal);

            if support_dist - face.dist < EPA_TOLERANCE {
                return Some(self.result(&face));
            }

            let new_id = self.vertices.len();
            self.vertices.push(support);

            // Remove every face visible from the new point and collect the boundary of the
            // removed region. An edge shared by two removed faces appears in both orientations
            // and cancels out.
            self.horizon.clear();
            let vertices = &self.vertices;
            let horizon = &mut self.horizon;

            self.faces.retain(|f| {
                if !f.can_be_seen_by(vertices, &support.point) {
                    return true;
                }

                for k in 0..3 {
                    let edge = (f.pts[k], f.pts[(k + 1) % 3]);

                    if let Some(i) = horizon.iter().position(|e| *e == (edge.1, edge.0)) {
                        let _ = horizon.swap_remove(i);
                    } else {
                        horizon.push(edge);
                    }
                }

                false
            });

            if self.horizon.is_empty() {
                log::debug!("EPA found no horizon; returning the closest face found so far.");
                return Some(self.result(&face));
            }

            for (a, b) in self.horizon.iter().copied() {
                self.faces.push(Face::new(&self.vertices, [a, b, new_id]));
            }

            best = match self.closest_face() {
                Some(best) => best,
                None => {
                    log::debug!("EPA polytope became degenerate.");
                    return Some(self.result(&face));
                }
            };
        }

        log::debug!("EPA did not converge after {} iterations.", MAX_EPA_ITERATIONS);
        let face = self.faces[best];
        Some(self.result(&face))
    }

    fn closest_face(&self) -> Option<usize> {
        self.faces
            .iter()
            .enumerate()
            .filter(|(_, f)| f.valid)
            .min_by(|(_, f1), (_, f2)| f1.dist.total_cmp(&f2.dist))
            .map(|(i, _)| i)
    }

    fn result(&self, face: &Face) -> (Point<Real>, Point<Real>, UnitVector<Real>, Real) {
        let [a, b, c] = face.pts.map(|i| self.vertices[i]);
        let tri = Triangle::new(a.point, b.point, c.point);
        let proj = Point::from(face.normal * face.dist);
        let (_, location) = tri.project_local_point_and_get_location(&proj);
        let bcoords = location.barycentric_coordinates();

        let p1 = a.orig1 * bcoords[0] + b.orig1.coords * bcoords[1] + c.orig1.coords * bcoords[2];
        let p2 = a.orig2 * bcoords[0] + b.orig2.coords * bcoords[1] + c.orig2.coords * bcoords[2];

        (
            p1,
            p2,
            Unit::new_unchecked(face.normal),
            face.dist.max(0.0),
        )
    }
}
