//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Sphere placement and detail targets.
    pub sphere: SphereConfig,
    /// Surface relief settings.
    pub terrain: TerrainConfig,
    /// Observer flight script for the demo.
    pub observer: ObserverConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Sphere placement and LOD detail targets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SphereConfig {
    /// Sphere radius in world units.
    pub radius: f64,
    /// Sphere center offset in the body's local space.
    pub center: [f64; 3],
    /// Target angular size of one triangle seen by the observer, in radians.
    pub angular_size: f64,
}

/// Surface relief settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// Apply fBm relief; a bare projected sphere otherwise.
    pub enabled: bool,
    /// Seed for deterministic relief.
    pub seed: u64,
    /// Number of noise octaves.
    pub octaves: u32,
    /// Frequency multiplier between octaves.
    pub lacunarity: f64,
    /// Amplitude multiplier between octaves.
    pub persistence: f64,
    /// Frequency of the first octave over the unit sphere.
    pub base_frequency: f64,
    /// Amplitude of the first octave as a fraction of the radius.
    pub amplitude: f64,
}

/// Observer flight script for the demo binary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ObserverConfig {
    /// Number of simulation ticks to run.
    pub ticks: u32,
    /// Observer distance from the sphere center at the first tick, in radii.
    pub start_distance: f64,
    /// Observer distance at the last tick, in radii.
    pub end_distance: f64,
    /// Full orbits completed over the run.
    pub orbits: f64,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            radius: 1.0,
            center: [0.0, 0.0, 0.0],
            angular_size: 0.1,
        }
    }
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            seed: 0,
            octaves: 5,
            lacunarity: 2.0,
            persistence: 0.5,
            base_frequency: 2.0,
            amplitude: 0.05,
        }
    }
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            ticks: 120,
            start_distance: 8.0,
            end_distance: 1.05,
            orbits: 0.5,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            tracing::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            tracing::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(!ron_str.is_empty());
        assert!(ron_str.contains("radius: 1.0"));
        assert!(ron_str.contains("ticks: 120"));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_field_uses_default() {
        // Config missing the `terrain` section entirely
        let ron_str = "(sphere: (), observer: (), debug: ())";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.terrain, TerrainConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let ron_str = "(future_setting: true)";
        // RON with #[serde(default)] and deny_unknown_fields not set should accept this
        let result: Result<Config, _> = ron::from_str(ron_str);
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.sphere.radius = 50.0;
        config.terrain.seed = 1234;
        config.observer.ticks = 10;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result: Result<Config, _> = ron::from_str("{{not valid}}");
        assert!(result.is_err());
    }

    #[test]
    fn test_ron_comments_accepted() {
        let ron_str = "// This is a comment\n(\n  // Another comment\n)";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config, Config::default());
    }
}
