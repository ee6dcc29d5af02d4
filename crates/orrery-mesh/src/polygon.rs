//! Polygons as ordered loops of directed edge links.

use glam::DVec3;

use crate::edge::{Edge, EdgeLink};

/// An ordered, closed loop of [`EdgeLink`]s.
///
/// Order and direction define the winding (and therefore the outward normal).
/// Invariant: each link's last vertex is the next link's first vertex, and
/// the loop closes back on itself. Constructors `debug_assert` this; it is a
/// programming defect to build a broken loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Polygon {
    /// The edge links in traversal order.
    pub links: Vec<EdgeLink>,
}

impl Polygon {
    /// Build a polygon from links in traversal order.
    #[must_use]
    pub fn new(links: Vec<EdgeLink>) -> Self {
        debug_assert!(links.len() >= 3, "polygon needs at least 3 links");
        Self { links }
    }

    /// Build a polygon from `(edge index, reversed)` pairs.
    #[must_use]
    pub fn from_slots(slots: &[(usize, bool)]) -> Self {
        Self::new(
            slots
                .iter()
                .map(|&(edge, reversed)| EdgeLink::new(edge, reversed))
                .collect(),
        )
    }

    /// Number of edges (equally, corners) in the loop.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.links.len()
    }

    /// Whether this polygon is a quad.
    #[must_use]
    pub fn is_quad(&self) -> bool {
        self.links.len() == 4
    }

    /// The corner vertex at the given slot: the first vertex of that slot's
    /// link in traversal order.
    #[must_use]
    pub fn vertex_at(&self, slot: usize, edges: &[Edge]) -> usize {
        self.links[slot].first_vertex(edges)
    }

    /// Centroid of the polygon's corner vertices.
    #[must_use]
    pub fn center(&self, vertices: &[DVec3], edges: &[Edge]) -> DVec3 {
        let sum: DVec3 = self
            .links
            .iter()
            .map(|link| vertices[link.first_vertex(edges)])
            .sum();
        sum / self.links.len() as f64
    }

    /// The slot holding the given edge index, if the polygon uses it.
    #[must_use]
    pub fn slot_of_edge(&self, edge: usize) -> Option<usize> {
        self.links.iter().position(|link| link.edge == edge)
    }

    /// The slot whose corner is the given vertex, if any.
    #[must_use]
    pub fn slot_of_vertex(&self, vertex: usize, edges: &[Edge]) -> Option<usize> {
        (0..self.links.len()).find(|&slot| self.vertex_at(slot, edges) == vertex)
    }

    /// Whether consecutive links chain head-to-tail and the loop closes.
    #[must_use]
    pub fn is_closed(&self, edges: &[Edge]) -> bool {
        self.links.iter().enumerate().all(|(i, link)| {
            let next = &self.links[(i + 1) % self.links.len()];
            link.last_vertex(edges) == next.first_vertex(edges)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> (Vec<DVec3>, Vec<Edge>, Polygon) {
        let vertices = vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
        ];
        let edges = vec![
            Edge::new(0, 1),
            Edge::new(1, 2),
            Edge::new(3, 2), // stored against traversal order
            Edge::new(3, 0),
        ];
        let polygon = Polygon::from_slots(&[(0, false), (1, false), (2, true), (3, false)]);
        (vertices, edges, polygon)
    }

    #[test]
    fn test_square_is_closed_quad() {
        let (_, edges, polygon) = square();
        assert!(polygon.is_quad());
        assert!(polygon.is_closed(&edges));
    }

    #[test]
    fn test_corner_vertices_follow_traversal_order() {
        let (_, edges, polygon) = square();
        let corners: Vec<usize> = (0..4).map(|slot| polygon.vertex_at(slot, &edges)).collect();
        assert_eq!(corners, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_center_averages_corners() {
        let (vertices, edges, polygon) = square();
        let center = polygon.center(&vertices, &edges);
        assert!((center - DVec3::new(0.5, 0.5, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_slot_lookups() {
        let (_, edges, polygon) = square();
        assert_eq!(polygon.slot_of_edge(2), Some(2));
        assert_eq!(polygon.slot_of_edge(9), None);
        assert_eq!(polygon.slot_of_vertex(2, &edges), Some(2));
        assert_eq!(polygon.slot_of_vertex(7, &edges), None);
    }

    #[test]
    fn test_broken_loop_is_detected() {
        let edges = vec![Edge::new(0, 1), Edge::new(1, 2), Edge::new(0, 3)];
        let polygon = Polygon::from_slots(&[(0, false), (1, false), (2, false)]);
        assert!(!polygon.is_closed(&edges));
    }
}
