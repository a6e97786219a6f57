use crate::math::Real;
use crate::query::Contact;
use crate::shape::{TriMesh, TrianglePointLocation};
use std::collections::HashSet;

/// Removes the contacts generated against the internal edges and vertices of a triangle mesh.
///
/// A convex shape resting on two coplanar triangles touches the face of one of them and the
/// shared edge of the other. The edge contact has a tilted normal that makes sliding shapes
/// catch on the seam. Such a contact is dropped when the feature it was generated from is
/// already covered by a face contact with a neighboring triangle.
#[derive(Default, Clone, Debug)]
pub struct InternalEdgesFixer {
    delayed_groups: Vec<(usize, Real)>,
    vertex_set: HashSet<u32>,
}

impl InternalEdgesFixer {
    /// Filters `contacts`, where each contact is tagged with the index of the mesh triangle it
    /// was computed with.
    ///
    /// The contacts of a single triangle must be contiguous. The second shape of every contact
    /// is the triangle, in the local frame of `mesh`.
    pub fn remove_invalid_contacts(&mut self, mesh: &TriMesh, contacts: &mut Vec<(u32, Contact)>) {
        let mut groups = vec![];
        let mut start = 0;

        for end in 1..=contacts.len() {
            if end == contacts.len() || contacts[end].0 != contacts[start].0 {
                groups.push((contacts[start].0, start, end));
                start = end;
            }
        }

        // 1. Ingest all the face contacts.
        for (gid, (tri_id, start, end)) in groups.iter().enumerate() {
            let Some(deepest) = contacts[*start..*end]
                .iter()
                .map(|(_, c)| c)
                .min_by(|a, b| a.dist.total_cmp(&b.dist))
            else {
                continue;
            };

            let is_face = mesh
                .triangle(*tri_id)
                .normal()
                .is_some_and(|n| deepest.normal2.dot(&n).abs() > 1.0 - 1.0e-4);

            if is_face {
                self.vertex_set.extend(mesh.indices()[*tri_id as usize]);
            } else {
                self.delayed_groups.push((gid, deepest.dist));
            }
        }

        // 2. Deal with the edge and vertex contacts, deepest first.
        self.delayed_groups.sort_by(|a, b| a.1.total_cmp(&b.1));
        let mut keep = vec![true; contacts.len()];

        for (gid, _) in &self.delayed_groups {
            let (tri_id, start, end) = groups[*gid];
            let tri = mesh.triangle(tri_id);
            let idx = mesh.indices()[tri_id as usize];
            let covered = |k: u32| self.vertex_set.contains(&idx[k as usize % 3]);

            for (i, (_, contact)) in contacts.iter().enumerate().take(end).skip(start) {
                keep[i] = match tri.project_local_point_and_get_location(&contact.point2).1 {
                    TrianglePointLocation::OnVertex(k) => !covered(k),
                    TrianglePointLocation::OnEdge(k, _) => !covered(k) || !covered(k + 1),
                    // Most likely an edge contact misclassified by rounding errors.
                    TrianglePointLocation::OnFace(_) => !(covered(0) || covered(1) || covered(2)),
                };
            }

            self.vertex_set.extend(idx);
        }

        let mut keep = keep.into_iter();
        contacts.retain(|_| keep.next().unwrap_or(true));

        self.vertex_set.clear();
        self.delayed_groups.clear();
    }
}

#[cfg(test)]
mod test {
    use super::InternalEdgesFixer;
    use crate::math::{Isometry, Point, Real};
    use crate::query::details::contact_ball_triangle;
    use crate::query::{Contact, ContactKind};
    use crate::shape::{Ball, TriMesh};

    fn quad() -> TriMesh {
        let vertices = vec![
            Point::new(-5.0, 0.0, -5.0),
            Point::new(5.0, 0.0, -5.0),
            Point::new(5.0, 0.0, 5.0),
            Point::new(-5.0, 0.0, 5.0),
        ];
        TriMesh::new(vertices, vec![[0, 2, 1], [0, 3, 2]]).unwrap()
    }

    fn ball_contacts(mesh: &TriMesh, pos12: &Isometry<Real>) -> Vec<(u32, Contact)> {
        let ball = Ball::new(0.5);
        (0..mesh.num_triangles() as u32)
            .filter_map(|i| {
                contact_ball_triangle(pos12, &ball, &mesh.triangle(i), 0.0).map(|c| (i, c))
            })
            .collect()
    }

    #[test]
    fn seam_contact_is_removed_next_to_a_face_contact() {
        let mesh = quad();
        // The ball center is above the second triangle, close to the diagonal seam.
        let pos12 = Isometry::translation(0.3, -0.45, 0.2);
        let mut contacts = ball_contacts(&mesh, &pos12);
        assert_eq!(contacts.len(), 2);
        assert!(contacts.iter().any(|(_, c)| c.kind == ContactKind::Edge));

        InternalEdgesFixer::default().remove_invalid_contacts(&mesh, &mut contacts);
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].0, 1);
        assert_eq!(contacts[0].1.kind, ContactKind::Face);
    }

    #[test]
    fn vertical_seam_contacts_are_kept() {
        let mesh = quad();
        // Right above the seam both triangles report a contact with a vertical normal.
        let pos12 = Isometry::translation(-1.0, -0.45, -1.0);
        let mut contacts = ball_contacts(&mesh, &pos12);
        assert_eq!(contacts.len(), 2);

        InternalEdgesFixer::default().remove_invalid_contacts(&mesh, &mut contacts);
        assert_eq!(contacts.len(), 2);
        assert!(contacts.iter().all(|(_, c)| c.normal2.y > 0.99));
    }

    #[test]
    fn boundary_edge_contact_is_kept() {
        let mesh = quad();
        // Past the outer edge of the mesh: only the first triangle is touched.
        let pos12 = Isometry::translation(-5.3, 0.0, 2.0);
        let mut contacts = ball_contacts(&mesh, &pos12);
        assert_eq!(contacts.len(), 1);

        InternalEdgesFixer::default().remove_invalid_contacts(&mesh, &mut contacts);
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].1.kind, ContactKind::Edge);
    }
}
