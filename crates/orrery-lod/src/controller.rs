//! Per-tick LOD driver for one sphere.
//!
//! The embedding application calls [`ChunkLodController::update`] once the
//! frame's transforms are fresh and [`ChunkLodController::late_update`]
//! afterwards. All changes landing between two ticks coalesce into at most
//! one region recomputation, and a region recomputation triggers view
//! reconciliation only when the region actually changed.

use std::rc::Rc;

use glam::{DQuat, DVec3};
use orrery_mesh::{EdgeMesh, MeshBuffers};
use orrery_region::{Region, locate, sector, self_and_neighbours};
use tracing::debug;

use crate::cache::MeshCache;
use crate::error::LodError;
use crate::settings::SphereSettings;
use crate::view_pool::{MeshView, ViewPool};

/// Supplies the frame's observer and body transforms.
///
/// The body transform places the sphere's parent in world space; the
/// observer position is the camera in world space.
pub trait TransformSource {
    fn observer_position(&self) -> DVec3;
    fn body_position(&self) -> DVec3;
    fn body_rotation(&self) -> DQuat;
}

/// Drives mesh generation and view assignment for one LOD-managed sphere.
///
/// Owns the reference mesh, the per-region mesh cache, and the pool of
/// renderable views. Two dirty flags coalesce upstream changes: placement
/// changes (center, radius) invalidate the whole cache, spatial and detail
/// changes only force a region recheck.
pub struct ChunkLodController<V: MeshView> {
    settings: SphereSettings,
    reference: EdgeMesh,
    displacement: Box<dyn Fn(DVec3) -> DVec3>,
    cache: MeshCache,
    pool: ViewPool<V>,
    views: Vec<(Rc<MeshBuffers>, V)>,
    current_region: Option<Region>,
    observer_position: DVec3,
    body_position: DVec3,
    body_rotation: DQuat,
    cache_dirty: bool,
    region_dirty: bool,
}

impl<V: MeshView> ChunkLodController<V> {
    /// Create a controller over the reference cube.
    ///
    /// `displacement` maps each generated vertex onto the unit-radius
    /// surface (projection plus relief); `view_factory` constructs a fresh
    /// renderable view when the pool has no idle one.
    pub fn new(
        settings: SphereSettings,
        displacement: impl Fn(DVec3) -> DVec3 + 'static,
        view_factory: impl FnMut() -> V + 'static,
    ) -> Self {
        Self {
            settings,
            reference: EdgeMesh::cube(),
            displacement: Box::new(displacement),
            cache: MeshCache::new(),
            pool: ViewPool::new(view_factory),
            views: Vec::new(),
            current_region: None,
            observer_position: DVec3::ZERO,
            body_position: DVec3::ZERO,
            body_rotation: DQuat::IDENTITY,
            cache_dirty: false,
            region_dirty: true,
        }
    }

    /// Sample the frame's transforms; any movement schedules a region
    /// recheck for the next [`late_update`](Self::late_update).
    pub fn update(&mut self, source: &impl TransformSource) {
        let observer = source.observer_position();
        let position = source.body_position();
        let rotation = source.body_rotation();
        if observer != self.observer_position
            || position != self.body_position
            || rotation != self.body_rotation
        {
            self.observer_position = observer;
            self.body_position = position;
            self.body_rotation = rotation;
            self.region_dirty = true;
        }
    }

    /// Run the coalesced recomputation for this tick.
    ///
    /// # Errors
    ///
    /// Propagates [`LodError`] from patch generation.
    pub fn late_update(&mut self) -> Result<(), LodError> {
        if self.cache_dirty {
            self.cache.clear();
            self.region_dirty = true;
        }
        if !self.region_dirty {
            return Ok(());
        }
        self.region_dirty = false;

        let vector_to_center = self.vector_to_center();
        let params = self.settings.lod_parameters(vector_to_center.length());
        let region = locate(
            &self.reference,
            vector_to_center,
            self.settings.radius,
            params.area_size,
            params.triangle_size,
        );

        // After a cache clear the views hold stale geometry even when the
        // region is unchanged, so reconcile unconditionally.
        if self.cache_dirty || self.current_region != Some(region) {
            self.current_region = Some(region);
            self.reconcile(region)?;
        }
        self.cache_dirty = false;
        Ok(())
    }

    /// The mesh for `region`, generated and cached on first request.
    ///
    /// Generation slices the reference face quad down to the region's cell,
    /// builds a single-quad mesh, displaces, tessellates `subdivider` times,
    /// then scales and translates into the sphere's local frame.
    ///
    /// # Errors
    ///
    /// Propagates [`LodError`] when the patch cannot be subdivided.
    pub fn mesh_for(&mut self, region: Region) -> Result<Rc<MeshBuffers>, LodError> {
        if let Some(found) = self.cache.get(&region) {
            return Ok(Rc::clone(found));
        }

        let quad = sector(&self.reference, &region);
        let mut mesh = EdgeMesh::from_quad(&quad);
        mesh.transform_vertices(&*self.displacement);
        mesh.subdivide_times(region.subdivider, &*self.displacement)?;
        mesh.move_and_scale(self.settings.center, self.settings.radius);

        Ok(self.cache.insert(region, mesh.triangulate()))
    }

    /// Move the sphere center; invalidates all cached geometry.
    pub fn set_center(&mut self, center: DVec3) {
        self.settings.center = center;
        self.cache_dirty = true;
    }

    /// Resize the sphere; invalidates all cached geometry.
    pub fn set_radius(&mut self, radius: f64) {
        self.settings.radius = radius;
        self.cache_dirty = true;
    }

    /// Change the triangle detail target; forces a region recheck.
    pub fn set_angular_size(&mut self, angular_size: f64) {
        self.settings.angular_size = angular_size;
        self.region_dirty = true;
    }

    /// Pin (or with `None` unpin) an explicit cell extent target; forces a
    /// region recheck.
    pub fn set_area_size(&mut self, area_size: Option<f64>) {
        self.settings.area_size = area_size;
        self.region_dirty = true;
    }

    /// Pin (or with `None` unpin) an explicit triangle extent target; forces
    /// a region recheck.
    pub fn set_triangle_size(&mut self, triangle_size: Option<f64>) {
        self.settings.triangle_size = triangle_size;
        self.region_dirty = true;
    }

    /// Current settings.
    #[must_use]
    pub fn settings(&self) -> &SphereSettings {
        &self.settings
    }

    /// The region selected by the last recomputation.
    #[must_use]
    pub fn current_region(&self) -> Option<Region> {
        self.current_region
    }

    /// Number of views currently showing a mesh.
    #[must_use]
    pub fn active_view_count(&self) -> usize {
        self.views.len()
    }

    /// Number of regions with cached geometry.
    #[must_use]
    pub fn cached_mesh_count(&self) -> usize {
        self.cache.len()
    }

    /// The view pool, for lifecycle statistics.
    #[must_use]
    pub fn view_pool(&self) -> &ViewPool<V> {
        &self.pool
    }

    /// Direction from the sphere center to the observer, in the body's
    /// local frame.
    #[must_use]
    pub fn vector_to_center(&self) -> DVec3 {
        let local = self.body_rotation.inverse() * (self.observer_position - self.body_position);
        local - self.settings.center
    }

    fn reconcile(&mut self, region: Region) -> Result<(), LodError> {
        let regions = self_and_neighbours(&self.reference, region);
        let mut desired = Vec::with_capacity(regions.len());
        for r in &regions {
            desired.push(self.mesh_for(*r)?);
        }

        // Keep views whose mesh is still wanted, release the rest, then
        // hand out views for the remaining meshes. Identity, not equality:
        // regenerated geometry must replace the view's stale buffers.
        let mut kept = Vec::with_capacity(desired.len());
        for (buffers, view) in self.views.drain(..) {
            if let Some(at) = desired.iter().position(|m| Rc::ptr_eq(m, &buffers)) {
                desired.swap_remove(at);
                kept.push((buffers, view));
            } else {
                self.pool.release(view);
            }
        }
        for buffers in desired {
            let view = self.pool.acquire(Rc::clone(&buffers));
            kept.push((buffers, view));
        }
        self.views = kept;

        debug!(
            %region,
            views = self.views.len(),
            cached = self.cache.len(),
            "reconciled view set"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct TestView {
        shown: Option<Rc<MeshBuffers>>,
    }

    impl MeshView for TestView {
        fn show(&mut self, buffers: Rc<MeshBuffers>) {
            self.shown = Some(buffers);
        }

        fn hide(&mut self) {
            self.shown = None;
        }
    }

    struct FixedTransforms {
        observer: DVec3,
    }

    impl TransformSource for FixedTransforms {
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

    fn controller() -> ChunkLodController<TestView> {
        ChunkLodController::new(
            SphereSettings::default(),
            |v: DVec3| v.normalize_or_zero(),
            TestView::default,
        )
    }

    #[test]
    fn test_first_tick_populates_views() {
        let mut controller = controller();
        controller.update(&FixedTransforms {
            observer: DVec3::new(0.0, 0.0, -3.0),
        });
        controller.late_update().unwrap();

        let region = controller.current_region().unwrap();
        assert_eq!(region.divider, 1);
        // Self plus four cross-face cardinals; corner diagonals vanish at
        // valence three.
        assert_eq!(controller.active_view_count(), 5);
        assert_eq!(controller.cached_mesh_count(), 5);
    }

    #[test]
    fn test_unchanged_tick_is_a_no_op() {
        let mut controller = controller();
        let transforms = FixedTransforms {
            observer: DVec3::new(0.0, 0.0, -3.0),
        };
        controller.update(&transforms);
        controller.late_update().unwrap();
        let created = controller.view_pool().created_count();

        controller.update(&transforms);
        controller.late_update().unwrap();
        assert_eq!(controller.view_pool().created_count(), created);
        assert_eq!(controller.view_pool().idle_count(), 0);
        assert_eq!(controller.active_view_count(), 5);
    }

    #[test]
    fn test_repeated_mesh_lookup_returns_cached_object() {
        let mut controller = controller();
        let region = Region::new(0, 2, 1, 0, 1);
        let first = controller.mesh_for(region).unwrap();
        let second = controller.mesh_for(region).unwrap();
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(controller.cached_mesh_count(), 1);
    }

    #[test]
    fn test_radius_change_regenerates_geometry() {
        let mut controller = controller();
        controller.update(&FixedTransforms {
            observer: DVec3::new(0.0, 0.0, -3.0),
        });
        controller.late_update().unwrap();
        let created = controller.view_pool().created_count();

        controller.set_radius(2.0);
        controller.late_update().unwrap();

        // Views were recycled through the pool rather than rebuilt.
        assert_eq!(controller.view_pool().created_count(), created);
        for (buffers, _) in &controller.views {
            let max_radius = buffers
                .positions
                .iter()
                .map(|p| DVec3::new(f64::from(p[0]), f64::from(p[1]), f64::from(p[2])).length())
                .fold(0.0, f64::max);
            assert!((max_radius - 2.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_approaching_observer_refines_region() {
        let mut controller = controller();
        controller.update(&FixedTransforms {
            observer: DVec3::new(0.0, 0.0, -3.0),
        });
        controller.late_update().unwrap();
        let far = controller.current_region().unwrap();

        controller.update(&FixedTransforms {
            observer: DVec3::new(0.0, 0.0, -1.05),
        });
        controller.late_update().unwrap();
        let near = controller.current_region().unwrap();

        assert!(near.divider > far.divider);
        assert!(near.subdivider >= far.subdivider);
    }

    #[test]
    fn test_pinned_targets_refine_without_movement() {
        let mut controller = controller();
        controller.update(&FixedTransforms {
            observer: DVec3::new(0.0, 0.0, -3.0),
        });
        controller.late_update().unwrap();
        let derived = controller.current_region().unwrap();
        assert_eq!(derived.divider, 1);

        controller.set_area_size(Some(0.2));
        controller.set_triangle_size(Some(0.02));
        controller.late_update().unwrap();
        let pinned = controller.current_region().unwrap();
        assert!(pinned.divider > derived.divider);
        assert!(pinned.subdivider > derived.subdivider);

        controller.set_area_size(None);
        controller.set_triangle_size(None);
        controller.late_update().unwrap();
        assert_eq!(controller.current_region().unwrap(), derived);
    }

    #[test]
    fn test_views_show_meshes_from_the_cache() {
        let mut controller = controller();
        controller.update(&FixedTransforms {
            observer: DVec3::new(0.0, 0.0, -3.0),
        });
        controller.late_update().unwrap();

        for (buffers, view) in &controller.views {
            let shown = view.shown.as_ref().unwrap();
            assert!(Rc::ptr_eq(shown, buffers));
            assert!(!buffers.is_empty());
        }
    }
}
