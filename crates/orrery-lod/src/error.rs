//! LOD pipeline errors.

use orrery_mesh::MeshError;
use thiserror::Error;

/// Errors surfaced by the chunk LOD pipeline.
#[derive(Debug, Error)]
pub enum LodError {
    /// Patch generation hit a mesh that cannot be subdivided.
    #[error("patch generation failed: {0}")]
    Mesh(#[from] MeshError),
}
