use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};
use crate::partitioning::AabbTree;
use crate::shape::{ShapeBuildError, SupportMap, Triangle};
use crate::utils;
use std::collections::HashMap;

/// A triangle mesh.
///
/// The mesh owns an [`AabbTree`] over its triangles (payload: the triangle index) which
/// narrowphase and ray queries descend to find the triangles near another shape. Zero-area
/// triangles are kept in the index buffer but flagged and skipped by contact generation.
#[derive(Clone, Debug)]
pub struct TriMesh {
    vertices: Vec<Point<Real>>,
    indices: Vec<[u32; 3]>,
    degenerate: Vec<bool>,
    internal_edges: Vec<[bool; 3]>,
    tree: AabbTree<u32>,
}

pub(super) fn validate_buffers(
    vertices: &[Point<Real>],
    indices: &[[u32; 3]],
) -> Result<(), ShapeBuildError> {
    if vertices.is_empty() {
        return Err(ShapeBuildError::EmptyVertices);
    }

    if indices.is_empty() {
        return Err(ShapeBuildError::EmptyIndices);
    }

    if let Some(i) = vertices
        .iter()
        .position(|p| !p.coords.iter().all(|x| x.is_finite()))
    {
        return Err(ShapeBuildError::NonFiniteVertex(i));
    }

    for (triangle, idx) in indices.iter().enumerate() {
        for index in idx {
            if *index as usize >= vertices.len() {
                return Err(ShapeBuildError::IndexOutOfBounds {
                    triangle,
                    index: *index,
                    num_vertices: vertices.len(),
                });
            }
        }
    }

    Ok(())
}

pub(super) fn split_raw_buffers(
    vertices: &[Real],
    indices: &[u32],
) -> Result<(Vec<Point<Real>>, Vec<[u32; 3]>), ShapeBuildError> {
    if vertices.len() % 3 != 0 {
        return Err(ShapeBuildError::VertexCountNotMultipleOfThree(
            vertices.len(),
        ));
    }

    if indices.len() % 3 != 0 {
        return Err(ShapeBuildError::IndexCountNotMultipleOfThree(indices.len()));
    }

    let points = vertices
        .chunks_exact(3)
        .map(|c| Point::new(c[0], c[1], c[2]))
        .collect();
    let idx = indices
        .chunks_exact(3)
        .map(|c| [c[0], c[1], c[2]])
        .collect();

    Ok((points, idx))
}

impl TriMesh {
    /// Creates a new triangle mesh from a vertex buffer and an index buffer.
    pub fn new(vertices: Vec<Point<Real>>, indices: Vec<[u32; 3]>) -> Result<Self, ShapeBuildError> {
        validate_buffers(&vertices, &indices)?;

        let triangles: Vec<Triangle> = indices
            .iter()
            .map(|idx| {
                Triangle::new(
                    vertices[idx[0] as usize],
                    vertices[idx[1] as usize],
                    vertices[idx[2] as usize],
                )
            })
            .collect();
        let degenerate = triangles.iter().map(Triangle::is_degenerate).collect();
        let tree = AabbTree::from_leaves(
            triangles
                .iter()
                .enumerate()
                .map(|(i, tri)| (tri.local_aabb(), i as u32)),
        );

        let internal_edges = compute_internal_edges(&indices);

        Ok(TriMesh {
            vertices,
            indices,
            degenerate,
            internal_edges,
            tree,
        })
    }

    /// Creates a new triangle mesh from flat coordinate and index buffers.
    pub fn from_raw_buffers(vertices: &[Real], indices: &[u32]) -> Result<Self, ShapeBuildError> {
        let (points, idx) = split_raw_buffers(vertices, indices)?;
        Self::new(points, idx)
    }

    /// The vertex buffer of this mesh.
    pub fn vertices(&self) -> &[Point<Real>] {
        &self.vertices
    }

    /// The index buffer of this mesh.
    pub fn indices(&self) -> &[[u32; 3]] {
        &self.indices
    }

    /// The number of triangles of this mesh.
    pub fn num_triangles(&self) -> usize {
        self.indices.len()
    }

    /// Get the `i`-th triangle of this mesh.
    pub fn triangle(&self, i: u32) -> Triangle {
        let idx = self.indices[i as usize];
        Triangle::new(
            self.vertices[idx[0] as usize],
            self.vertices[idx[1] as usize],
            self.vertices[idx[2] as usize],
        )
    }

    /// An iterator through all the triangles of this mesh.
    pub fn triangles(&self) -> impl ExactSizeIterator<Item = Triangle> + '_ {
        (0..self.indices.len() as u32).map(move |i| self.triangle(i))
    }

    /// Is the `i`-th triangle too thin to produce contacts?
    pub fn is_degenerate(&self, i: u32) -> bool {
        self.degenerate[i as usize]
    }

    /// Is the `edge`-th edge (`0`: AB, `1`: BC, `2`: CA) of the `i`-th triangle shared with
    /// another triangle?
    pub fn is_internal_edge(&self, i: u32, edge: u32) -> bool {
        self.internal_edges[i as usize][edge as usize]
    }

    /// The bounding-volume tree over the triangles of this mesh.
    pub fn tree(&self) -> &AabbTree<u32> {
        &self.tree
    }

    /// Calls `f` with the index of each non-degenerate triangle whose AABB intersects `aabb`.
    pub fn for_each_triangle_in_aabb(&self, aabb: &Aabb, mut f: impl FnMut(u32, Triangle)) {
        self.tree.for_each_overlap(aabb, |i| {
            if !self.is_degenerate(i) {
                f(i, self.triangle(i))
            }
        });
    }
}

fn compute_internal_edges(indices: &[[u32; 3]]) -> Vec<[bool; 3]> {
    let edge_key = |a: u32, b: u32| if a < b { (a, b) } else { (b, a) };
    let mut edge_count: HashMap<(u32, u32), u32> = HashMap::new();

    for idx in indices {
        for k in 0..3 {
            *edge_count
                .entry(edge_key(idx[k], idx[(k + 1) % 3]))
                .or_insert(0) += 1;
        }
    }

    indices
        .iter()
        .map(|idx| {
            let mut internal = [false; 3];
            for k in 0..3 {
                let key = edge_key(idx[k], idx[(k + 1) % 3]);
                internal[k] = edge_count.get(&key).copied().unwrap_or(0) > 1;
            }
            internal
        })
        .collect()
}

impl SupportMap for TriMesh {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        utils::point_cloud_support_point(dir, &self.vertices)
    }
}
