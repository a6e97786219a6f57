//! Support mapping based Cuboid shape.

use crate::math::{Point, Real, UnitVector, Vector};
use crate::shape::{PolygonalFeature, PolygonalFeatureMap, SupportMap};
use na::Unit;

/// Shape of a box.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
#[repr(C)]
pub struct Cuboid {
    /// The half-extents of the cuboid.
    pub half_extents: Vector<Real>,
}

impl Cuboid {
    /// Creates a new box from its half-extents. Half-extents are the box half-width along each
    /// axis. Each half-extent must be positive.
    #[inline]
    pub fn new(half_extents: Vector<Real>) -> Cuboid {
        Cuboid { half_extents }
    }

    /// The vertices of the face of this cuboid with outward normal `sign * e_axis`, in
    /// counter-clockwise order when seen from outside.
    pub fn face_vertices(&self, axis: usize, sign: Real) -> [Point<Real>; 4] {
        let i2 = (axis + 1) % 3;
        let i3 = (axis + 2) % 3;
        let corners = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
        let mut result = [Point::origin(); 4];

        for (k, (s2, s3)) in corners.iter().enumerate() {
            let mut v = Vector::zeros();
            v[axis] = sign * self.half_extents[axis];
            v[i2] = s2 * self.half_extents[i2];
            v[i3] = s3 * self.half_extents[i3];
            // Faces with a negative normal are traversed backward to stay counter-clockwise.
            let id = if sign < 0.0 { 3 - k } else { k };
            result[id] = Point::from(v);
        }

        result
    }
}

impl SupportMap for Cuboid {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        self.half_extents.zip_map(dir, |h, d| h.copysign(d)).into()
    }
}

impl PolygonalFeatureMap for Cuboid {
    fn local_support_feature(&self, dir: &UnitVector<Real>, out_feature: &mut PolygonalFeature) {
        let axis = dir.iamax();
        let sign = if dir[axis] < 0.0 { -1.0 } else { 1.0 };
        let vertices = self.face_vertices(axis, sign);
        let mut normal = Vector::zeros();
        normal[axis] = sign;

        out_feature.vertices = vertices;
        out_feature.num_vertices = 4;
        out_feature.normal = Some(Unit::new_unchecked(normal));
    }
}
