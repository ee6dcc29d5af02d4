//! Spherical math primitives: great-arc interpolation and spherical quads.

mod quad;
mod slerp;

pub use quad::SphericalQuad;
pub use slerp::slerp;
