//! Mesh error types.

/// Errors from mesh operations that violate an input contract.
#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    /// Quad subdivision was asked to split a polygon that is not a quad.
    /// The operation fails before mutating the mesh.
    #[error("unsupported polygon degree {degree} in polygon {polygon}: subdivision requires quads")]
    UnsupportedPolygonDegree {
        /// Index of the offending polygon.
        polygon: usize,
        /// Its actual number of edges.
        degree: usize,
    },
}
