//! Level-of-detail management for cube-sphere patches: the per-tick
//! controller, per-region mesh cache, and renderable view pool.

mod cache;
mod controller;
mod error;
mod settings;
mod view_pool;

pub use cache::MeshCache;
pub use controller::{ChunkLodController, TransformSource};
pub use error::LodError;
pub use settings::{LodParameters, SphereSettings};
pub use view_pool::{MeshView, ViewPool};
