/// Errors returned when building a convex polyhedron or a triangle mesh from raw buffers.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShapeBuildError {
    /// The vertex buffer is empty.
    #[error("the shape has no vertices")]
    EmptyVertices,
    /// The index buffer is empty.
    #[error("the shape has no triangles")]
    EmptyIndices,
    /// A flat index buffer does not contain a multiple of three elements.
    #[error("the index buffer length {0} is not a multiple of three")]
    IndexCountNotMultipleOfThree(usize),
    /// A flat vertex buffer does not contain a multiple of three elements.
    #[error("the vertex buffer length {0} is not a multiple of three")]
    VertexCountNotMultipleOfThree(usize),
    /// A triangle references a vertex that does not exist.
    #[error("triangle {triangle} references vertex {index} but only {num_vertices} exist")]
    IndexOutOfBounds {
        /// The faulty triangle.
        triangle: usize,
        /// The out-of-range vertex index.
        index: u32,
        /// The number of vertices of the shape.
        num_vertices: usize,
    },
    /// A vertex has a NaN or infinite coordinate.
    #[error("vertex {0} has a non-finite coordinate")]
    NonFiniteVertex(usize),
}
