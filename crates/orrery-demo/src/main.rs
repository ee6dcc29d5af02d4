//! Demo binary that flies a scripted observer down towards a LOD-managed
//! sphere and logs region changes and view churn along the way.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI
//! flags. Run with `cargo run -p orrery-demo` for the default descent, or
//! `cargo run -p orrery-demo -- --radius 50 --flat` to override settings.

use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;
use glam::{DQuat, DVec3};
use orrery_config::{CliArgs, Config, ObserverConfig};
use orrery_lod::{ChunkLodController, MeshView, SphereSettings, TransformSource};
use orrery_mesh::MeshBuffers;
use orrery_terrain::{HeightmapParams, HeightmapSampler, RadialDisplacement};
use tracing::{debug, error, info};

/// A renderable slot that only logs what it would draw.
struct LoggingView {
    id: usize,
    buffers: Option<Rc<MeshBuffers>>,
}

impl MeshView for LoggingView {
    fn show(&mut self, buffers: Rc<MeshBuffers>) {
        debug!(
            view = self.id,
            triangles = buffers.triangle_count(),
            "view shown"
        );
        self.buffers = Some(buffers);
    }

    fn hide(&mut self) {
        debug!(view = self.id, "view hidden");
        self.buffers = None;
    }
}

/// Scripted descending orbit: spirals from the start distance down to the
/// end distance while drifting in latitude, so the region crosses faces.
struct ScriptedOrbit {
    start_distance: f64,
    end_distance: f64,
    orbits: f64,
    ticks: u32,
    radius: f64,
    observer: DVec3,
}

impl ScriptedOrbit {
    fn new(config: &ObserverConfig, radius: f64) -> Self {
        let mut orbit = Self {
            start_distance: config.start_distance,
            end_distance: config.end_distance,
            orbits: config.orbits,
            ticks: config.ticks,
            radius,
            observer: DVec3::ZERO,
        };
        orbit.advance(0);
        orbit
    }

    fn advance(&mut self, tick: u32) {
        let t = if self.ticks <= 1 {
            0.0
        } else {
            f64::from(tick) / f64::from(self.ticks - 1)
        };
        let distance =
            self.radius * (self.start_distance + (self.end_distance - self.start_distance) * t);
        let angle = self.orbits * std::f64::consts::TAU * t;
        let latitude = 0.3 * (std::f64::consts::PI * t).sin();
        let direction = DVec3::new(
            angle.cos() * latitude.cos(),
            latitude.sin(),
            angle.sin() * latitude.cos(),
        );
        self.observer = direction * distance;
    }
}

impl TransformSource for ScriptedOrbit {
    fn observer_position(&self) -> DVec3 {
        self.observer
    }

    fn body_position(&self) -> DVec3 {
        DVec3::ZERO
    }

    fn body_rotation(&self) -> DQuat {
        DQuat::IDENTITY
    }
}

fn main() {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from("config"));

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    orrery_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    let settings = SphereSettings {
        center: DVec3::from_array(config.sphere.center),
        radius: config.sphere.radius,
        angular_size: config.sphere.angular_size,
        ..SphereSettings::default()
    };

    let displacement = if config.terrain.enabled {
        RadialDisplacement::with_heightmap(HeightmapSampler::new(HeightmapParams {
            seed: config.terrain.seed,
            octaves: config.terrain.octaves,
            lacunarity: config.terrain.lacunarity,
            persistence: config.terrain.persistence,
            base_frequency: config.terrain.base_frequency,
            amplitude: config.terrain.amplitude,
        }))
    } else {
        RadialDisplacement::sphere()
    };

    let mut next_view_id = 0usize;
    let mut controller = ChunkLodController::new(
        settings,
        move |v| displacement.displace(v),
        move || {
            next_view_id += 1;
            LoggingView {
                id: next_view_id,
                buffers: None,
            }
        },
    );

    info!(
        radius = config.sphere.radius,
        relief = config.terrain.enabled,
        ticks = config.observer.ticks,
        "starting descent"
    );

    let mut orbit = ScriptedOrbit::new(&config.observer, config.sphere.radius);
    let mut last_region = None;
    for tick in 0..config.observer.ticks {
        orbit.advance(tick);
        controller.update(&orbit);
        if let Err(err) = controller.late_update() {
            error!(%err, tick, "tick failed");
            return;
        }

        let region = controller.current_region();
        if region != last_region {
            if let Some(region) = region {
                info!(
                    tick,
                    %region,
                    views = controller.active_view_count(),
                    cached = controller.cached_mesh_count(),
                    "region changed"
                );
            }
            last_region = region;
        }
    }

    info!(
        cached = controller.cached_mesh_count(),
        views_created = controller.view_pool().created_count(),
        views_idle = controller.view_pool().idle_count(),
        "descent complete"
    );
}
