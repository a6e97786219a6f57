use crate::mass_properties::MassProperties;
use crate::math::{AngularInertia, Point, Real, Rotation, Vector};
use crate::shape::Capsule;
use na::RealField;

/// Volume of a ball, and its inertia about any axis through its center per unit mass.
fn ball_volume_and_unit_inertia(radius: Real) -> (Real, Real) {
    let r2 = radius * radius;
    (Real::pi() * r2 * radius * 4.0 / 3.0, r2 * 0.4)
}

impl MassProperties {
    /// A solid ball of the given `mass`, centered at the origin.
    pub fn from_ball(mass: Real, radius: Real) -> Self {
        let (_, unit_inertia) = ball_volume_and_unit_inertia(radius);
        let inertia = AngularInertia::from_diagonal_element(mass * unit_inertia);
        Self::new(Point::origin(), mass, inertia)
    }

    /// A solid box of the given `mass`, centered at the origin.
    pub fn from_cuboid(mass: Real, half_extents: Vector<Real>) -> Self {
        // Each axis gets the squared half-extents of the two other axes.
        let sq = half_extents.component_mul(&half_extents);
        let diag = Vector::new(sq.y + sq.z, sq.x + sq.z, sq.x + sq.y) * (mass / 3.0);
        Self::new(Point::origin(), mass, AngularInertia::from_diagonal(&diag))
    }

    /// A solid capsule of the given `mass`.
    ///
    /// The mass is shared between the cylinder and the two hemispheres in proportion to their
    /// volumes. The hemispheres contribute with their own inertia shifted to the cylinder ends.
    pub fn from_capsule(mass: Real, capsule: &Capsule) -> Self {
        let radius = capsule.radius;
        let r2 = radius * radius;
        let h = capsule.half_height() * 2.0;

        let cylinder_volume = Real::pi() * r2 * h;
        let (ball_volume, ball_unit_inertia) = ball_volume_and_unit_inertia(radius);
        let volume = cylinder_volume + ball_volume;

        if volume <= 0.0 {
            return Self::new(capsule.center(), mass, AngularInertia::zeros());
        }

        let cylinder_mass = mass * cylinder_volume / volume;
        let ball_mass = mass - cylinder_mass;

        let along_axis = cylinder_mass * r2 * 0.5 + ball_mass * ball_unit_inertia;
        let across_axis = cylinder_mass * (3.0 * r2 + h * h) / 12.0
            + ball_mass * (ball_unit_inertia + h * h * 0.25 + h * radius * 3.0 / 8.0);
        let local = AngularInertia::from_diagonal(&Vector::new(across_axis, along_axis, across_axis));

        // Rotate the inertia of a `y`-aligned capsule onto the actual axis.
        let axis_rotation = capsule
            .segment
            .direction()
            .and_then(|dir| Rotation::rotation_between(&Vector::y(), &dir.into_inner()))
            .unwrap_or_else(Rotation::identity)
            .to_rotation_matrix();
        let r = axis_rotation.matrix();

        Self::new(capsule.center(), mass, r * local * r.transpose())
    }
}
