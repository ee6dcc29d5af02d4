//! Flat vertex/index buffers produced by triangulation, ready for a renderer.

/// Triangulated mesh data: positions and triangle indices.
///
/// Positions are plain `[f32; 3]` and indices `u32`, so both slices can be
/// cast to bytes for GPU upload without copying.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshBuffers {
    /// Vertex positions.
    pub positions: Vec<[f32; 3]>,
    /// Triangle indices, 3 per triangle.
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether the buffers describe no geometry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Positions as raw bytes for vertex-buffer upload.
    #[must_use]
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Indices as raw bytes for index-buffer upload.
    #[must_use]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}
