use crate::math::{Isometry, Real};
use crate::query::details::contact_support_map_support_map_with_params;
use crate::query::epa::Epa;
use crate::query::gjk::DilatedShape;
use crate::query::Contact;
use crate::shape::{PolygonalFeature, PolygonalFeatureMap, Shape};

/// Computes the contacts between two convex shapes implementing the `PolygonalFeatureMap`
/// trait, both given as [`Shape`]s.
///
/// Returns the number of contacts pushed to `out`, or zero if one of the shapes has no
/// polygonal features.
pub fn contact_pfm_pfm_shapes(
    pos12: &Isometry<Real>,
    shape1: &Shape,
    shape2: &Shape,
    prediction: Real,
    out: &mut Vec<Contact>,
) -> usize {
    if let (Some((pfm1, border_radius1)), Some((pfm2, border_radius2))) = (
        shape1.as_polygonal_feature_map(),
        shape2.as_polygonal_feature_map(),
    ) {
        contact_pfm_pfm(
            pos12,
            pfm1,
            border_radius1,
            pfm2,
            border_radius2,
            prediction,
            out,
        )
    } else {
        0
    }
}

/// Computes the contacts between two convex shapes implementing the `PolygonalFeatureMap` trait.
///
/// `border_radius1` and `border_radius2` round the shapes (a capsule is its axis segment with a
/// border radius). GJK and EPA find the deepest contact, then the support features of both
/// shapes along the contact normal are clipped against each other to get up to four contacts.
/// When clipping fails (e.g. two edges crossing), the single EPA contact is kept.
pub fn contact_pfm_pfm<S1, S2>(
    pos12: &Isometry<Real>,
    pfm1: &S1,
    border_radius1: Real,
    pfm2: &S2,
    border_radius2: Real,
    prediction: Real,
    out: &mut Vec<Contact>,
) -> usize
where
    S1: ?Sized + PolygonalFeatureMap,
    S2: ?Sized + PolygonalFeatureMap,
{
    let round1 = DilatedShape::new(pfm1, border_radius1);
    let round2 = DilatedShape::new(pfm2, border_radius2);
    let mut epa = Epa::new();

    let Some(deepest) =
        contact_support_map_support_map_with_params(pos12, &round1, &round2, prediction, &mut epa)
    else {
        return 0;
    };

    let mut feature1 = PolygonalFeature::default();
    let mut feature2 = PolygonalFeature::default();
    pfm1.local_support_feature(&deepest.normal1, &mut feature1);
    pfm2.local_support_feature(&deepest.normal2, &mut feature2);

    let num_clipped = PolygonalFeature::contacts(
        pos12,
        &deepest.normal1,
        &feature1,
        border_radius1,
        &feature2,
        border_radius2,
        prediction,
        out,
    );

    if num_clipped == 0 {
        out.push(deepest);
        1
    } else {
        num_clipped
    }
}

#[cfg(test)]
mod test {
    use super::contact_pfm_pfm;
    use crate::math::{Isometry, Real, Vector};
    use crate::query::ContactKind;
    use crate::shape::{Capsule, Cuboid};

    #[test]
    fn box_on_box_yields_a_face_manifold() {
        let ground = Cuboid::new(Vector::new(5.0, 0.5, 5.0));
        let cube = Cuboid::new(Vector::new(0.5, 0.5, 0.5));
        let pos12 = Isometry::translation(0.1, 0.98, -0.3);
        let mut out = vec![];

        let n = contact_pfm_pfm(&pos12, &ground, 0.0, &cube, 0.0, 0.0, &mut out);
        assert_eq!(n, 4);
        assert_eq!(out.len(), 4);

        for contact in &out {
            assert_eq!(contact.kind, ContactKind::Face);
            assert_relative_eq!(contact.dist, -0.02 as Real, epsilon = 1.0e-3);
            assert_relative_eq!(*contact.normal1, Vector::y(), epsilon = 1.0e-3);
        }
    }

    #[test]
    fn capsule_lying_on_box() {
        let ground = Cuboid::new(Vector::new(5.0, 0.5, 5.0));
        let capsule = Capsule::new_x(1.0, 0.25);
        let pos12 = Isometry::translation(0.0, 0.7, 0.0);
        let mut out = vec![];

        let n = contact_pfm_pfm(
            &pos12,
            &ground,
            0.0,
            &capsule.segment,
            capsule.radius,
            0.0,
            &mut out,
        );
        assert_eq!(n, 2);

        for contact in &out {
            assert_relative_eq!(contact.dist, -0.05 as Real, epsilon = 1.0e-3);
            assert_relative_eq!(contact.point2.y, -0.25, epsilon = 1.0e-3);
        }
    }
}
