use crate::math::{Isometry, Real, Vector};
use crate::query::gjk::{eps_tol, CSOPoint};
use crate::shape::SupportMap;
use crate::utils::WBasis;
use arrayvec::ArrayVec;

/// The simplex grown by the boolean GJK test.
///
/// The last point pushed is always the newest support point, and is the only one known to lie
/// past the origin along the previous search direction. [`Simplex::contains_origin`] uses that
/// to only test the Voronoi regions that can still contain the origin.
#[derive(Clone, Debug)]
pub struct Simplex {
    points: ArrayVec<CSOPoint, 4>,
}

impl Simplex {
    /// A simplex made of a single point.
    pub fn new(first: CSOPoint) -> Self {
        let mut points = ArrayVec::new();
        points.push(first);
        Simplex { points }
    }

    /// The points of this simplex, oldest first.
    pub fn points(&self) -> &[CSOPoint] {
        &self.points
    }

    pub(crate) fn push(&mut self, pt: CSOPoint) {
        if self.points.is_full() {
            let _ = self.points.remove(0);
        }
        self.points.push(pt);
    }

    fn set(&mut self, pts: &[CSOPoint]) {
        self.points.clear();
        self.points.extend(pts.iter().copied());
    }

    /// Determines whether this simplex encloses the origin.
    ///
    /// If it does not, the simplex is reduced to the sub-simplex closest to the origin and `dir`
    /// is set to the next search direction. A zero `dir` means the origin lies on the simplex.
    pub fn contains_origin(&mut self, dir: &mut Vector<Real>) -> bool {
        match self.points.len() {
            2 => {
                let [b, a] = [self.points[0], self.points[1]];
                self.line(b, a, dir);
                false
            }
            3 => {
                let [c, b, a] = [self.points[0], self.points[1], self.points[2]];
                self.triangle(c, b, a, dir);
                false
            }
            4 => {
                let [d, c, b, a] = [
                    self.points[0],
                    self.points[1],
                    self.points[2],
                    self.points[3],
                ];
                self.tetrahedron(d, c, b, a, dir)
            }
            _ => {
                *dir = -self.points[0].point.coords;
                false
            }
        }
    }

    fn line(&mut self, b: CSOPoint, a: CSOPoint, dir: &mut Vector<Real>) {
        let ab = b.point - a.point;
        let ao = -a.point.coords;

        if ab.dot(&ao) > 0.0 {
            self.set(&[b, a]);
            *dir = ab.cross(&ao).cross(&ab);
        } else {
            self.set(&[a]);
            *dir = ao;
        }
    }

    fn triangle(&mut self, c: CSOPoint, b: CSOPoint, a: CSOPoint, dir: &mut Vector<Real>) {
        let ab = b.point - a.point;
        let ac = c.point - a.point;
        let ao = -a.point.coords;
        let abc = ab.cross(&ac);

        if abc.norm_squared() <= eps_tol() * eps_tol() {
            // Flat triangle: forget the oldest point.
            self.line(b, a, dir);
            return;
        }

        if abc.cross(&ac).dot(&ao) > 0.0 {
            if ac.dot(&ao) > 0.0 {
                self.set(&[c, a]);
                *dir = ac.cross(&ao).cross(&ac);
            } else {
                self.line(b, a, dir);
            }
        } else if ab.cross(&abc).dot(&ao) > 0.0 {
            self.line(b, a, dir);
        } else if abc.dot(&ao) >= 0.0 {
            // The origin is above the triangle, or in its plane, in which case any normal works.
            self.set(&[c, b, a]);
            *dir = abc;
        } else {
            self.set(&[b, c, a]);
            *dir = -abc;
        }
    }

    fn tetrahedron(
        &mut self,
        d: CSOPoint,
        c: CSOPoint,
        b: CSOPoint,
        a: CSOPoint,
        dir: &mut Vector<Real>,
    ) -> bool {
        let ab = b.point - a.point;
        let ac = c.point - a.point;
        let ad = d.point - a.point;
        let ao = -a.point.coords;

        if ab.cross(&ac).dot(&ad).abs() <= eps_tol() * eps_tol() {
            // Flat tetrahedron: forget the oldest point.
            self.triangle(c, b, a, dir);
            return false;
        }

        let outward = |n: Vector<Real>, inner: &Vector<Real>| {
            if n.dot(inner) > 0.0 {
                -n
            } else {
                n
            }
        };

        let abc = outward(ab.cross(&ac), &ad);
        let acd = outward(ac.cross(&ad), &ab);
        let adb = outward(ad.cross(&ab), &ac);

        if abc.dot(&ao) > 0.0 {
            self.triangle(c, b, a, dir);
            false
        } else if acd.dot(&ao) > 0.0 {
            self.triangle(d, c, a, dir);
            false
        } else if adb.dot(&ao) > 0.0 {
            self.triangle(b, d, a, dir);
            false
        } else {
            true
        }
    }

    /// Adds support points until this simplex is a non-flat tetrahedron.
    ///
    /// Used when the origin lies on a lower-dimensional simplex (touching or exactly aligned
    /// shapes). Returns `false` if the Minkowski difference is itself flat.
    pub(crate) fn complete_tetrahedron<G1, G2>(
        &mut self,
        pos12: &Isometry<Real>,
        g1: &G1,
        g2: &G2,
    ) -> bool
    where
        G1: ?Sized + SupportMap,
        G2: ?Sized + SupportMap,
    {
        let eps = eps_tol();

        while self.points.len() < 4 {
            let candidates: ArrayVec<Vector<Real>, 6> = match self.points.len() {
                1 => [
                    Vector::x(),
                    -Vector::x(),
                    Vector::y(),
                    -Vector::y(),
                    Vector::z(),
                    -Vector::z(),
                ]
                .into_iter()
                .collect(),
                2 => {
                    let ab = self.points[1].point - self.points[0].point;
                    let [t1, t2] = ab.normalize().orthonormal_basis();
                    [t1, -t1, t2, -t2].into_iter().collect()
                }
                _ => {
                    let ab = self.points[1].point - self.points[0].point;
                    let ac = self.points[2].point - self.points[0].point;
                    let n = ab.cross(&ac);
                    [n, -n].into_iter().collect()
                }
            };

            let mut added = false;

            for dir in candidates {
                let support = CSOPoint::from_shapes(pos12, g1, g2, &dir);

                if self.affine_distance(&support) > eps {
                    self.points.push(support);
                    added = true;
                    break;
                }
            }

            if !added {
                return false;
            }
        }

        true
    }

    /// Distance from `pt` to the affine hull of this simplex.
    fn affine_distance(&self, pt: &CSOPoint) -> Real {
        let a = self.points[0].point;
        let ap = pt.point - a;

        match self.points.len() {
            1 => ap.norm(),
            2 => {
                let ab = self.points[1].point - a;
                let sq = ab.norm_squared();
                if sq <= eps_tol() * eps_tol() {
                    ap.norm()
                } else {
                    (ap - ab * (ap.dot(&ab) / sq)).norm()
                }
            }
            _ => {
                let n = (self.points[1].point - a).cross(&(self.points[2].point - a));
                match n.try_normalize(eps_tol() * eps_tol()) {
                    Some(n) => ap.dot(&n).abs(),
                    None => ap.norm(),
                }
            }
        }
    }
}
