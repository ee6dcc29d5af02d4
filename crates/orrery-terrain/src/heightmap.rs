//! Multi-octave fractal Brownian motion (fBm) height sampler.
//!
//! Composites several octaves of simplex noise sampled on the unit sphere,
//! so patch boundaries never show UV seam artifacts.

use glam::DVec3;
use noise::{NoiseFn, Simplex};

/// Configuration for the fBm height field.
#[derive(Clone, Debug)]
pub struct HeightmapParams {
    /// Seed for deterministic generation.
    pub seed: u64,
    /// Number of noise octaves to composite. Typical range: 4-8.
    pub octaves: u32,
    /// Frequency multiplier between successive octaves. Default: 2.0.
    pub lacunarity: f64,
    /// Amplitude multiplier between successive octaves. Default: 0.5.
    pub persistence: f64,
    /// Frequency of the first octave over the unit sphere. Default: 2.0,
    /// giving continent-scale features.
    pub base_frequency: f64,
    /// Amplitude of the first octave as a fraction of the sphere radius.
    /// Default: 0.05.
    pub amplitude: f64,
}

impl Default for HeightmapParams {
    fn default() -> Self {
        Self {
            seed: 0,
            octaves: 5,
            lacunarity: 2.0,
            persistence: 0.5,
            base_frequency: 2.0,
            amplitude: 0.05,
        }
    }
}

/// Samples radial height offsets from fBm over simplex noise.
///
/// Each successive octave doubles in frequency and halves in amplitude,
/// producing self-similar detail at progressively finer scales.
pub struct HeightmapSampler {
    noise: Simplex,
    params: HeightmapParams,
}

impl HeightmapSampler {
    /// Create a new sampler with the given parameters.
    pub fn new(params: HeightmapParams) -> Self {
        let noise = Simplex::new(params.seed as u32);
        Self { noise, params }
    }

    /// Sample the height offset at a direction on the unit sphere.
    ///
    /// Returns a value in roughly `[-max_amplitude, +max_amplitude]`.
    pub fn sample(&self, direction: DVec3) -> f64 {
        let mut total = 0.0;
        let mut frequency = self.params.base_frequency;
        let mut amplitude = self.params.amplitude;

        for _ in 0..self.params.octaves {
            let p = direction * frequency;
            total += self.noise.get([p.x, p.y, p.z]) * amplitude;

            frequency *= self.params.lacunarity;
            amplitude *= self.params.persistence;
        }

        total
    }

    /// The theoretical maximum absolute height (geometric series sum).
    pub fn max_amplitude(&self) -> f64 {
        let mut sum = 0.0;
        let mut amp = self.params.amplitude;
        for _ in 0..self.params.octaves {
            sum += amp;
            amp *= self.params.persistence;
        }
        sum
    }

    /// The current parameters.
    pub fn params(&self) -> &HeightmapParams {
        &self.params
    }
}
