use crate::math::{Point, Real};
use crate::query::gjk::{self, CSOPoint};
use crate::shape::{Segment, SegmentPointLocation, Triangle, TrianglePointLocation};

/// A simplex of dimension up to 3 that projects the origin with a Voronoi-region walk.
///
/// After [`VoronoiSimplex::project_origin_and_reduce`], only the vertices of the smallest
/// sub-simplex containing the projection are kept, and [`VoronoiSimplex::proj_coord`] gives the
/// barycentric coordinates of the projection on them.
#[derive(Clone, Debug)]
pub struct VoronoiSimplex {
    vertices: [CSOPoint; 4],
    proj: [Real; 4],
    dim: usize,
}

impl Default for VoronoiSimplex {
    fn default() -> Self {
        Self::new()
    }
}

impl VoronoiSimplex {
    /// Creates a new empty simplex.
    pub fn new() -> VoronoiSimplex {
        let origin = CSOPoint::single_point(Point::origin());
        VoronoiSimplex {
            vertices: [origin; 4],
            proj: [1.0, 0.0, 0.0, 0.0],
            dim: 0,
        }
    }

    /// Resets this simplex to a single point.
    pub fn reset(&mut self, pt: CSOPoint) {
        self.dim = 0;
        self.vertices[0] = pt;
        self.proj[0] = 1.0;
    }

    /// Add a point to this simplex.
    ///
    /// Returns `false` if the point is too close to one of the vertices already there, in
    /// which case it is not added.
    pub fn add_point(&mut self, pt: CSOPoint) -> bool {
        if self.dim == 3 {
            return false;
        }

        let eps = gjk::eps_tol();

        for i in 0..self.dim + 1 {
            if (self.vertices[i].point - pt.point).norm_squared() < eps * eps {
                return false;
            }
        }

        self.dim += 1;
        self.vertices[self.dim] = pt;
        true
    }

    /// The dimension of this simplex: `0` for a point, `3` for a tetrahedron.
    pub fn dimension(&self) -> usize {
        self.dim
    }

    /// Retrieves the i-th vertex of this simplex.
    pub fn point(&self, i: usize) -> &CSOPoint {
        assert!(i <= self.dim, "Index out of bounds.");
        &self.vertices[i]
    }

    /// The barycentric coordinate of the last origin projection on the i-th vertex.
    pub fn proj_coord(&self, i: usize) -> Real {
        assert!(i <= self.dim, "Index out of bounds.");
        self.proj[i]
    }

    /// Apply a function to all the vertices of this simplex.
    pub fn modify_pnts(&mut self, f: &dyn Fn(&mut CSOPoint)) {
        for pt in &mut self.vertices[..self.dim + 1] {
            f(pt)
        }
    }

    /// Projects the origin on this simplex and keeps only the vertices of the sub-simplex the
    /// projection lies on.
    ///
    /// If the simplex is a tetrahedron containing the origin, it is left unchanged and the
    /// origin is returned.
    pub fn project_origin_and_reduce(&mut self) -> Point<Real> {
        match self.dim {
            0 => {
                self.proj[0] = 1.0;
                self.vertices[0].point
            }
            1 => self.project_on_segment([0, 1]),
            2 => self.project_on_triangle([0, 1, 2]),
            _ => self.project_on_tetrahedron(),
        }
    }

    fn keep(&mut self, ids: &[usize], coords: &[Real]) {
        let old = self.vertices;

        for (k, (id, coord)) in ids.iter().zip(coords.iter()).enumerate() {
            self.vertices[k] = old[*id];
            self.proj[k] = *coord;
        }

        self.dim = ids.len() - 1;
    }

    fn project_on_segment(&mut self, ids: [usize; 2]) -> Point<Real> {
        let seg = Segment::new(self.vertices[ids[0]].point, self.vertices[ids[1]].point);
        let (proj, location) = seg.project_local_point_and_get_location(&Point::origin());

        match location {
            SegmentPointLocation::OnVertex(i) => self.keep(&[ids[i as usize]], &[1.0]),
            SegmentPointLocation::OnEdge(uv) => self.keep(&ids, &uv),
        }

        proj
    }

    fn project_on_triangle(&mut self, ids: [usize; 3]) -> Point<Real> {
        let tri = Triangle::new(
            self.vertices[ids[0]].point,
            self.vertices[ids[1]].point,
            self.vertices[ids[2]].point,
        );

        if tri.scaled_normal().norm_squared() <= gjk::eps_tol() * gjk::eps_tol() {
            // Flat triangle: the origin projects on one of its edges.
            let best = (0..3)
                .map(|k| [ids[k], ids[(k + 1) % 3]])
                .min_by(|e1, e2| {
                    let d1 = self.segment_sq_dist(*e1);
                    let d2 = self.segment_sq_dist(*e2);
                    d1.total_cmp(&d2)
                })
                .unwrap_or([ids[0], ids[1]]);
            return self.project_on_segment(best);
        }

        let (proj, location) = tri.project_local_point_and_get_location(&Point::origin());

        match location {
            TrianglePointLocation::OnVertex(i) => self.keep(&[ids[i as usize]], &[1.0]),
            TrianglePointLocation::OnEdge(i, uv) => {
                let i = i as usize;
                self.keep(&[ids[i], ids[(i + 1) % 3]], &uv)
            }
            TrianglePointLocation::OnFace(uvw) => self.keep(&ids, &uvw),
        }

        proj
    }

    fn segment_sq_dist(&self, ids: [usize; 2]) -> Real {
        let seg = Segment::new(self.vertices[ids[0]].point, self.vertices[ids[1]].point);
        seg.project_local_point_and_get_location(&Point::origin())
            .0
            .coords
            .norm_squared()
    }

    fn triangle_sq_dist(&self, ids: [usize; 3]) -> Real {
        let tri = Triangle::new(
            self.vertices[ids[0]].point,
            self.vertices[ids[1]].point,
            self.vertices[ids[2]].point,
        );

        if tri.scaled_normal().norm_squared() <= gjk::eps_tol() * gjk::eps_tol() {
            (0..3)
                .map(|k| self.segment_sq_dist([ids[k], ids[(k + 1) % 3]]))
                .fold(Real::MAX, Real::min)
        } else {
            tri.project_local_point_and_get_location(&Point::origin())
                .0
                .coords
                .norm_squared()
        }
    }

    fn project_on_tetrahedron(&mut self) -> Point<Real> {
        // Face `k` is the face opposite to the vertex `k`.
        const FACES: [[usize; 3]; 4] = [[1, 2, 3], [0, 3, 2], [0, 1, 3], [0, 2, 1]];

        let pts = [
            self.vertices[0].point,
            self.vertices[1].point,
            self.vertices[2].point,
            self.vertices[3].point,
        ];
        let volume = (pts[1] - pts[0])
            .cross(&(pts[2] - pts[0]))
            .dot(&(pts[3] - pts[0]));
        let degenerate = volume.abs() <= gjk::eps_tol() * gjk::eps_tol();

        let mut coords = [0.0; 4];
        let mut candidates = [false; 4];
        let mut inside = !degenerate;

        for (k, face) in FACES.iter().enumerate() {
            let [a, b, c] = [pts[face[0]], pts[face[1]], pts[face[2]]];
            let n = (b - a).cross(&(c - a));
            let side_vertex = n.dot(&(pts[k] - a));
            let side_origin = -n.dot(&a.coords);

            if degenerate || side_vertex * side_origin < 0.0 {
                candidates[k] = true;
                inside = false;
            } else if !degenerate {
                coords[k] = side_origin / side_vertex;
            }
        }

        if inside {
            self.proj = coords;
            return Point::origin();
        }

        let best = (0..4)
            .filter(|k| candidates[*k])
            .map(|k| FACES[k])
            .min_by(|f1, f2| {
                self.triangle_sq_dist(*f1)
                    .total_cmp(&self.triangle_sq_dist(*f2))
            })
            .unwrap_or(FACES[0]);

        self.project_on_triangle(best)
    }
}
