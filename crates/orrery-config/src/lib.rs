//! Configuration system for the cube-sphere LOD demo.
//!
//! Provides runtime-configurable settings that persist to disk as RON files.
//! Supports CLI overrides via clap and forward/backward compatible
//! serialization.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, ObserverConfig, SphereConfig, TerrainConfig};
pub use error::ConfigError;
