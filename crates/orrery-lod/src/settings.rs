//! Sphere placement and LOD target sizes.

use glam::DVec3;

/// Placement and detail targets for one LOD-managed sphere.
#[derive(Clone, Debug)]
pub struct SphereSettings {
    /// Sphere center offset in the body's local space.
    pub center: DVec3,
    /// Sphere radius in world units.
    pub radius: f64,
    /// Target angular size of one triangle as seen by the observer, in
    /// radians. Default: 0.1.
    pub angular_size: f64,
    /// Explicit cell extent target in world units. When set it replaces the
    /// value derived from the observer distance.
    pub area_size: Option<f64>,
    /// Explicit triangle extent target in world units. When set it replaces
    /// the value derived from the observer distance.
    pub triangle_size: Option<f64>,
}

impl Default for SphereSettings {
    fn default() -> Self {
        Self {
            center: DVec3::ZERO,
            radius: 1.0,
            angular_size: 0.1,
            area_size: None,
            triangle_size: None,
        }
    }
}

/// World-space detail targets derived from the observer distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LodParameters {
    /// Target extent of one grid cell.
    pub area_size: f64,
    /// Target extent of one triangle inside the cell.
    pub triangle_size: f64,
}

impl SphereSettings {
    /// Derive detail targets for an observer at `distance` from the sphere
    /// center.
    ///
    /// The cell target is the half-chord of the visible cap, so the grid
    /// refines as the horizon closes in. The triangle target scales with the
    /// height above the surface; it is floored at a small fraction of the
    /// radius so an observer on (or under) the surface still gets a finite
    /// tessellation depth. Explicit `area_size`/`triangle_size` targets in
    /// the settings take precedence over the derived values.
    #[must_use]
    pub fn lod_parameters(&self, distance: f64) -> LodParameters {
        let ratio2 = (self.radius * self.radius) / (distance * distance);
        let derived_area = self.radius * (1.0 - ratio2).max(0.0).sqrt();

        let height = (distance - self.radius).max(self.radius * 1e-3);
        let derived_triangle = height * self.angular_size;

        LodParameters {
            area_size: self.area_size.unwrap_or(derived_area),
            triangle_size: self.triangle_size.unwrap_or(derived_triangle),
        }
    }
}
