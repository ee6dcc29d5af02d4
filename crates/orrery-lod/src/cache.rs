//! Per-region mesh memoization.

use std::rc::Rc;

use hashbrown::HashMap;
use orrery_mesh::MeshBuffers;
use orrery_region::Region;

/// Generated meshes keyed by region address.
///
/// Entries are shared by reference, so a repeated lookup hands back the same
/// buffers object. Cleared wholesale when the sphere's placement changes;
/// views holding an `Rc` keep their buffers alive across a clear.
#[derive(Default)]
pub struct MeshCache {
    entries: HashMap<Region, Rc<MeshBuffers>>,
}

impl MeshCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the mesh for `region`.
    #[must_use]
    pub fn get(&self, region: &Region) -> Option<&Rc<MeshBuffers>> {
        self.entries.get(region)
    }

    /// Store the mesh for `region`, returning the shared handle.
    pub fn insert(&mut self, region: Region, buffers: MeshBuffers) -> Rc<MeshBuffers> {
        let shared = Rc::new(buffers);
        self.entries.insert(region, Rc::clone(&shared));
        shared
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached regions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffers() -> MeshBuffers {
        MeshBuffers {
            positions: vec![[0.0, 0.0, 0.0]],
            indices: vec![],
        }
    }

    #[test]
    fn test_repeated_lookup_returns_same_object() {
        let mut cache = MeshCache::new();
        let region = Region::new(0, 2, 1, 0, 3);
        let inserted = cache.insert(region, buffers());
        let looked_up = cache.get(&region).cloned();
        assert!(looked_up.is_some_and(|m| Rc::ptr_eq(&m, &inserted)));
    }

    #[test]
    fn test_clear_keeps_outstanding_handles_alive() {
        let mut cache = MeshCache::new();
        let region = Region::new(1, 4, 0, 0, 0);
        let handle = cache.insert(region, buffers());
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(handle.positions.len(), 1);
    }

    #[test]
    fn test_distinct_regions_get_distinct_entries() {
        let mut cache = MeshCache::new();
        let a = cache.insert(Region::new(0, 1, 0, 0, 0), buffers());
        let b = cache.insert(Region::new(0, 1, 0, 0, 1), buffers());
        assert!(!Rc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 2);
    }
}
