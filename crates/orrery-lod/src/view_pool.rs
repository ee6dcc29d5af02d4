//! Recycling pool for renderable mesh views.
//!
//! Views are whatever the embedding application renders with; the pool only
//! needs to show a mesh on an idle view and hide it again on release.

use std::rc::Rc;

use orrery_mesh::MeshBuffers;

/// A renderable slot that can display one mesh at a time.
pub trait MeshView {
    /// Attach `buffers` and make the view visible.
    fn show(&mut self, buffers: Rc<MeshBuffers>);
    /// Detach the mesh and hide the view.
    fn hide(&mut self);
}

/// Hands out views, preferring idle ones over fresh construction.
pub struct ViewPool<V: MeshView> {
    factory: Box<dyn FnMut() -> V>,
    idle: Vec<V>,
    created: usize,
}

impl<V: MeshView> ViewPool<V> {
    /// Create a pool that builds new views with `factory` when none are idle.
    pub fn new(factory: impl FnMut() -> V + 'static) -> Self {
        Self {
            factory: Box::new(factory),
            idle: Vec::new(),
            created: 0,
        }
    }

    /// Take a view showing `buffers`.
    pub fn acquire(&mut self, buffers: Rc<MeshBuffers>) -> V {
        let mut view = match self.idle.pop() {
            Some(view) => view,
            None => {
                self.created += 1;
                (self.factory)()
            }
        };
        view.show(buffers);
        view
    }

    /// Hide `view` and keep it for reuse.
    pub fn release(&mut self, mut view: V) {
        view.hide();
        self.idle.push(view);
    }

    /// Number of idle views held.
    #[must_use]
    pub fn idle_count(&self) -> usize {
        self.idle.len()
    }

    /// Total views ever constructed by the factory.
    #[must_use]
    pub fn created_count(&self) -> usize {
        self.created
    }
}
