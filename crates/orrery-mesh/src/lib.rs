//! Shared-edge polygon mesh: vertices, deduplicated edges, and polygons built
//! from directed edge references, with quad subdivision and triangulation.

mod buffers;
mod edge;
mod edge_mesh;
mod error;
mod polygon;

pub use buffers::MeshBuffers;
pub use edge::{Edge, EdgeLink};
pub use edge_mesh::{AdjacentPolygon, EdgeMesh};
pub use error::MeshError;
pub use polygon::Polygon;
