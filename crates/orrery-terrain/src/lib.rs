//! Procedural surface relief: fBm noise sampling and radial vertex displacement.

mod displacement;
mod heightmap;

pub use displacement::RadialDisplacement;
pub use heightmap::{HeightmapParams, HeightmapSampler};
