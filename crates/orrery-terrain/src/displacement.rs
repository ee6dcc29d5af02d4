//! Vertex displacement for sphere patches.
//!
//! During subdivision every new vertex passes through a displacement
//! function before it lands in the mesh. The projection onto the unit
//! sphere and the height offset are applied together so midpoints stay
//! consistent with the corners they came from.

use glam::DVec3;

use crate::heightmap::HeightmapSampler;

/// Projects vertices onto the unit sphere, optionally offset by a height
/// field.
///
/// Without a sampler this is the bare spherification used while shaping a
/// patch; with one, each vertex moves to `1 + height(direction)` times the
/// unit direction.
pub struct RadialDisplacement {
    sampler: Option<HeightmapSampler>,
}

impl RadialDisplacement {
    /// Pure projection onto the unit sphere.
    #[must_use]
    pub fn sphere() -> Self {
        Self { sampler: None }
    }

    /// Projection plus a radial height offset from `sampler`.
    #[must_use]
    pub fn with_heightmap(sampler: HeightmapSampler) -> Self {
        Self {
            sampler: Some(sampler),
        }
    }

    /// Displace one vertex.
    ///
    /// Zero vectors pass through unchanged; they carry no direction to
    /// project along.
    #[must_use]
    pub fn displace(&self, vertex: DVec3) -> DVec3 {
        let Some(direction) = vertex.try_normalize() else {
            return vertex;
        };
        let height = match &self.sampler {
            Some(sampler) => sampler.sample(direction),
            None => 0.0,
        };
        direction * (1.0 + height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heightmap::HeightmapParams;

    #[test]
    fn test_sphere_projection_normalizes() {
        let displacement = RadialDisplacement::sphere();
        let out = displacement.displace(DVec3::new(3.0, 4.0, 0.0));
        assert!((out.length() - 1.0).abs() < 1e-12);
        assert!((out - DVec3::new(0.6, 0.8, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_zero_vector_passes_through() {
        let displacement = RadialDisplacement::sphere();
        assert_eq!(displacement.displace(DVec3::ZERO), DVec3::ZERO);
    }

    #[test]
    fn test_heightmap_offsets_radius() {
        let sampler = HeightmapSampler::new(HeightmapParams {
            seed: 7,
            ..Default::default()
        });
        let max_amp = sampler.max_amplitude();
        let displacement = RadialDisplacement::with_heightmap(sampler);

        let out = displacement.displace(DVec3::new(0.2, -0.9, 0.4));
        let radius = out.length();
        assert!(radius >= 1.0 - max_amp - 1e-12);
        assert!(radius <= 1.0 + max_amp + 1e-12);
    }

    #[test]
    fn test_displacement_depends_only_on_direction() {
        let sampler = HeightmapSampler::new(HeightmapParams {
            seed: 3,
            ..Default::default()
        });
        let displacement = RadialDisplacement::with_heightmap(sampler);

        let a = displacement.displace(DVec3::new(0.1, 0.2, 0.3));
        let b = displacement.displace(DVec3::new(0.2, 0.4, 0.6));
        assert!((a - b).length() < 1e-12);
    }
}
