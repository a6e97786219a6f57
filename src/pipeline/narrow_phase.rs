use crate::bounding_volume::BoundingVolume;
use crate::math::{Isometry, Real};
use crate::pipeline::{
    ColliderHandle, ColliderPair, ColliderSet, CollisionManifold, ContactPoint, WorldSettings,
};
use crate::query::details::{
    contact_ball_ball, contact_ball_capsule, contact_ball_cuboid, contact_ball_triangle,
    contact_capsule_capsule, contact_capsule_triangle, contact_pfm_pfm, contact_pfm_pfm_shapes,
    contact_support_map_support_map, InternalEdgesFixer,
};
use crate::query::Contact;
use crate::shape::{Shape, ShapeKind};

/// A routine computing the contacts between two shapes of known kinds.
///
/// The contacts are appended to the output vector. `pos12` is the position of the second shape
/// relative to the first one.
pub type ContactFn = fn(&Isometry<Real>, &Shape, &Shape, Real, &mut Vec<Contact>);

type DispatchTable = [[Option<ContactFn>; ShapeKind::COUNT]; ShapeKind::COUNT];

/// Computes the contact manifolds of the pairs found by the broadphase.
pub struct NarrowPhase {
    table: DispatchTable,
    contacts: Vec<Contact>,
    previous: Vec<CollisionManifold>,
    unsupported_reported: bool,
}

impl Default for NarrowPhase {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for NarrowPhase {
    fn clone(&self) -> Self {
        Self {
            table: self.table,
            contacts: Vec::new(),
            previous: self.previous.clone(),
            unsupported_reported: self.unsupported_reported,
        }
    }
}

impl core::fmt::Debug for NarrowPhase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NarrowPhase")
            .field("previous", &self.previous.len())
            .finish_non_exhaustive()
    }
}

impl NarrowPhase {
    /// A narrowphase with the default dispatch table.
    pub fn new() -> Self {
        use ShapeKind::*;

        let mut table: DispatchTable = [[None; ShapeKind::COUNT]; ShapeKind::COUNT];
        let mut set = |k1: ShapeKind, k2: ShapeKind, f: ContactFn| {
            table[k1.index()][k2.index()] = Some(f);
        };

        set(Ball, Ball, ball_ball);
        set(Ball, Cuboid, ball_cuboid);
        set(Ball, Capsule, ball_capsule);
        set(Ball, ConvexPolyhedron, support_map_support_map);
        set(Cuboid, Cuboid, pfm_pfm);
        set(Cuboid, Capsule, pfm_pfm);
        set(Cuboid, ConvexPolyhedron, pfm_pfm);
        set(Capsule, Capsule, capsule_capsule);
        set(Capsule, ConvexPolyhedron, pfm_pfm);
        set(ConvexPolyhedron, ConvexPolyhedron, pfm_pfm);

        for kind in [Ball, Cuboid, Capsule, ConvexPolyhedron] {
            set(kind, TriMesh, convex_trimesh);
        }

        Self {
            table,
            contacts: Vec::new(),
            previous: Vec::new(),
            unsupported_reported: false,
        }
    }

    /// The routine handling shapes of kinds `k1` and `k2`, in that order.
    ///
    /// Only pairs with `k1 <= k2` have a routine.
    pub fn contact_fn(&self, k1: ShapeKind, k2: ShapeKind) -> Option<ContactFn> {
        self.table[k1.index()][k2.index()]
    }

    /// Computes the contacts between two shapes, in any order.
    ///
    /// Returns `false` if the pair is not supported.
    pub fn contacts(
        &mut self,
        pos12: &Isometry<Real>,
        shape1: &Shape,
        shape2: &Shape,
        prediction: Real,
        out: &mut Vec<Contact>,
    ) -> bool {
        let (k1, k2) = (shape1.kind(), shape2.kind());

        if k1 <= k2 {
            if let Some(f) = self.contact_fn(k1, k2) {
                f(pos12, shape1, shape2, prediction, out);
                return true;
            }
        } else if let Some(f) = self.contact_fn(k2, k1) {
            let first = out.len();
            f(&pos12.inverse(), shape2, shape1, prediction, out);
            out[first..].iter_mut().for_each(|c| c.flip());
            return true;
        }

        if !self.unsupported_reported {
            log::debug!("No contact routine between {:?} and {:?}; ignoring the pair.", k1, k2);
            self.unsupported_reported = true;
        }

        false
    }

    /// Rebuilds `manifolds` from the candidate pairs.
    ///
    /// A manifold is created for each pair with at least one contact. When warm starting is
    /// enabled, contacts inherit the impulses of the matching contacts of the manifolds the
    /// previous call produced.
    pub fn update(
        &mut self,
        pairs: &[ColliderPair],
        colliders: &ColliderSet,
        settings: &WorldSettings,
        manifolds: &mut Vec<CollisionManifold>,
    ) {
        core::mem::swap(&mut self.previous, manifolds);
        manifolds.clear();

        let mut previous: Vec<((ColliderHandle, ColliderHandle), usize)> = self
            .previous
            .iter()
            .enumerate()
            .map(|(i, m)| ((m.collider_a, m.collider_b), i))
            .collect();
        previous.sort_unstable();

        let mut contacts = core::mem::take(&mut self.contacts);

        for pair in pairs {
            let (Some(a), Some(b)) = (colliders.get(pair.first), colliders.get(pair.second))
            else {
                continue;
            };

            let pos12 = a.shape_position().inv_mul(&b.shape_position());
            contacts.clear();

            if !self.contacts(&pos12, &a.shape, &b.shape, 0.0, &mut contacts) {
                continue;
            }

            let mut manifold = CollisionManifold::new(pair.first, a, pair.second, b);

            for contact in &contacts {
                if !contact.is_finite() {
                    log::warn!(
                        "Dropping a non-finite contact between colliders {:?} and {:?}.",
                        pair.first.id(),
                        pair.second.id()
                    );
                    continue;
                }

                manifold
                    .points
                    .push(ContactPoint::from_contact(contact, a, b));
            }

            if manifold.points.is_empty() {
                continue;
            }

            manifold.update_aggregates();

            if settings.warm_start {
                if let Ok(k) = previous
                    .binary_search_by_key(&(pair.first, pair.second), |(key, _)| *key)
                {
                    manifold.warm_start_from(
                        &self.previous[previous[k].1],
                        settings.warm_start_factor,
                        settings.warm_start_distance,
                    );
                }
            }

            manifolds.push(manifold);
        }

        self.contacts = contacts;
    }

    /// Forgets the manifolds of the previous step involving `handle`.
    pub fn remove_collider(&mut self, handle: ColliderHandle) {
        self.previous
            .retain(|m| m.collider_a != handle && m.collider_b != handle);
    }
}

fn ball_ball(
    pos12: &Isometry<Real>,
    s1: &Shape,
    s2: &Shape,
    prediction: Real,
    out: &mut Vec<Contact>,
) {
    if let (Some(b1), Some(b2)) = (s1.as_ball(), s2.as_ball()) {
        out.extend(contact_ball_ball(pos12, b1, b2, prediction));
    }
}

fn ball_cuboid(
    pos12: &Isometry<Real>,
    s1: &Shape,
    s2: &Shape,
    prediction: Real,
    out: &mut Vec<Contact>,
) {
    if let (Some(ball), Some(cuboid)) = (s1.as_ball(), s2.as_cuboid()) {
        out.extend(contact_ball_cuboid(pos12, ball, cuboid, prediction));
    }
}

fn ball_capsule(
    pos12: &Isometry<Real>,
    s1: &Shape,
    s2: &Shape,
    prediction: Real,
    out: &mut Vec<Contact>,
) {
    if let (Some(ball), Some(capsule)) = (s1.as_ball(), s2.as_capsule()) {
        out.extend(contact_ball_capsule(pos12, ball, capsule, prediction));
    }
}

fn capsule_capsule(
    pos12: &Isometry<Real>,
    s1: &Shape,
    s2: &Shape,
    prediction: Real,
    out: &mut Vec<Contact>,
) {
    if let (Some(c1), Some(c2)) = (s1.as_capsule(), s2.as_capsule()) {
        out.extend(contact_capsule_capsule(pos12, c1, c2, prediction));
    }
}

fn support_map_support_map(
    pos12: &Isometry<Real>,
    s1: &Shape,
    s2: &Shape,
    prediction: Real,
    out: &mut Vec<Contact>,
) {
    out.extend(contact_support_map_support_map(pos12, s1, s2, prediction));
}

fn pfm_pfm(
    pos12: &Isometry<Real>,
    s1: &Shape,
    s2: &Shape,
    prediction: Real,
    out: &mut Vec<Contact>,
) {
    let _ = contact_pfm_pfm_shapes(pos12, s1, s2, prediction, out);
}

/// Contacts between a convex shape and the triangles of a mesh overlapping its AABB.
///
/// Contacts against internal edges and vertices already covered by a face contact with a
/// neighboring triangle are discarded.
fn convex_trimesh(
    pos12: &Isometry<Real>,
    s1: &Shape,
    s2: &Shape,
    prediction: Real,
    out: &mut Vec<Contact>,
) {
    let Some(mesh) = s2.as_trimesh() else {
        return;
    };

    let aabb1 = s1.compute_aabb(&pos12.inverse()).loosened(prediction);
    let mut contacts = vec![];
    let mut scratch = vec![];

    mesh.for_each_triangle_in_aabb(&aabb1, |i, triangle| {
        match s1 {
            Shape::Ball(ball) => {
                scratch.extend(contact_ball_triangle(pos12, ball, &triangle, prediction))
            }
            Shape::Capsule(capsule) => {
                let internal_edges = [0, 1, 2].map(|k| mesh.is_internal_edge(i, k));
                scratch.extend(contact_capsule_triangle(
                    pos12,
                    capsule,
                    &triangle,
                    internal_edges,
                    prediction,
                ))
            }
            _ => {
                if let Some((pfm1, border_radius1)) = s1.as_polygonal_feature_map() {
                    let _ = contact_pfm_pfm(
                        pos12,
                        pfm1,
                        border_radius1,
                        &triangle,
                        0.0,
                        prediction,
                        &mut scratch,
                    );
                }
            }
        }

        contacts.extend(scratch.drain(..).map(|c| (i, c)));
    });

    InternalEdgesFixer::default().remove_invalid_contacts(mesh, &mut contacts);
    out.extend(contacts.into_iter().map(|(_, c)| c));
}
