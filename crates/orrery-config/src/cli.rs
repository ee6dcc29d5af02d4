//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "orrery", about = "Cube-sphere LOD demo")]
pub struct CliArgs {
    /// Sphere radius in world units.
    #[arg(long)]
    pub radius: Option<f64>,

    /// Target angular triangle size in radians.
    #[arg(long)]
    pub angular_size: Option<f64>,

    /// Terrain seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Disable surface relief.
    #[arg(long)]
    pub flat: bool,

    /// Number of simulation ticks.
    #[arg(long)]
    pub ticks: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(radius) = args.radius {
            self.sphere.radius = radius;
        }
        if let Some(angular_size) = args.angular_size {
            self.sphere.angular_size = angular_size;
        }
        if let Some(seed) = args.seed {
            self.terrain.seed = seed;
        }
        if args.flat {
            self.terrain.enabled = false;
        }
        if let Some(ticks) = args.ticks {
            self.observer.ticks = ticks;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_args() -> CliArgs {
        CliArgs {
            radius: None,
            angular_size: None,
            seed: None,
            flat: false,
            ticks: None,
            log_level: None,
            config: None,
        }
    }

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            radius: Some(25.0),
            seed: Some(77),
            flat: true,
            ..empty_args()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.sphere.radius, 25.0);
        assert_eq!(config.terrain.seed, 77);
        assert!(!config.terrain.enabled);
        // Non-overridden fields retain defaults
        assert_eq!(config.sphere.angular_size, 0.1);
        assert_eq!(config.observer.ticks, 120);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&empty_args());
        assert_eq!(config, original);
    }
}
