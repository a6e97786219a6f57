use crate::mass_properties::MassProperties;
use crate::math::{Matrix, Point, Real, Vector, DEFAULT_EPSILON};
use crate::shape::ConvexPolyhedron;

impl MassProperties {
    /// Computes the mass properties of a solid convex polyhedron of the given `mass`.
    ///
    /// The polyhedron is split into tetrahedra joining each face to the center of mass. A flat
    /// or empty polyhedron falls back to the mass properties of its bounding box.
    pub fn from_convex_polyhedron(mass: Real, poly: &ConvexPolyhedron) -> Self {
        let (volume, com) = poly.volume_and_center_of_mass();

        if volume.abs() <= DEFAULT_EPSILON {
            let aabb = poly.local_aabb();
            let props = Self::from_cuboid(mass, aabb.half_extents());
            return Self::new(aabb.center(), mass, props.inertia);
        }

        let mut itot = Matrix::zeros();

        for i in 0..poly.faces().len() {
            let [a, b, c] = poly.face_vertices(i);
            let vol = (a - com).dot(&(b - com).cross(&(c - com))) / 6.0;
            itot += tetrahedron_unit_inertia_tensor_wrt_point(&com, &com, &a, &b, &c) * vol;
        }

        Self::new(com, mass, itot * (mass / volume))
    }
}

/// The inertia tensor, relative to `point`, of the tetrahedron `p1 p2 p3 p4` with unit density,
/// divided by its volume.
///
/// The second moment of a tetrahedron with vertices `q_i` relative to `point`, divided by its
/// volume, is `(Σ q_i q_iᵀ + (Σ q_i)(Σ q_i)ᵀ) / 20`. The inertia tensor is derived from it as
/// `tr(C) I - C`.
pub fn tetrahedron_unit_inertia_tensor_wrt_point(
    point: &Point<Real>,
    p1: &Point<Real>,
    p2: &Point<Real>,
    p3: &Point<Real>,
    p4: &Point<Real>,
) -> Matrix<Real> {
    let rel = [p1 - point, p2 - point, p3 - point, p4 - point];
    let sum: Vector<Real> = rel.iter().sum();
    let mut second_moment = sum * sum.transpose();

    for q in &rel {
        second_moment += q * q.transpose();
    }

    second_moment *= 0.05;
    Matrix::identity() * second_moment.trace() - second_moment
}
