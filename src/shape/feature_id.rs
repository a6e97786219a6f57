/// An identifier of a geometric feature (vertex, edge, or face) of a shape.
///
/// Feature ids are local to the shape that produced them: the same id on two different
/// shapes does not identify related features.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, Default)]
pub enum FeatureId {
    /// Shape-dependent identifier of a vertex.
    Vertex(u32),
    /// Shape-dependent identifier of an edge.
    Edge(u32),
    /// Shape-dependent identifier of a face.
    Face(u32),
    /// Unknown identifier.
    #[default]
    Unknown,
}

impl FeatureId {
    /// The face index this id refers to, if it identifies a face.
    pub fn face(self) -> Option<u32> {
        match self {
            FeatureId::Face(id) => Some(id),
            _ => None,
        }
    }
}
