//! The shared-edge mesh arena and its subdivision / adjacency operations.

use glam::DVec3;
use hashbrown::HashMap;
use orrery_math::SphericalQuad;

use crate::buffers::MeshBuffers;
use crate::edge::{Edge, EdgeLink};
use crate::error::MeshError;
use crate::polygon::Polygon;

/// A polygon found adjacent to a query polygon across a shared edge or
/// vertex, together with the rotation between the two coordinate frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdjacentPolygon {
    /// Index of the adjacent polygon.
    pub polygon: usize,
    /// Quarter-turn count that aligns the neighbour's `(x, y)` frame with
    /// the query polygon's, taken modulo the polygon degree by consumers.
    ///
    /// Two polygons traverse their shared edge in opposite directions, which
    /// contributes a fixed half-turn; the shift already includes it, so a
    /// shift of 0 mod 4 means the frames line up with no rotation.
    pub edge_shift: i32,
}

/// A mesh of vertices, deduplicated undirected edges, and polygons expressed
/// as ordered [`EdgeLink`] loops.
///
/// Vertices are owned here and referenced by index everywhere else. Edge and
/// polygon lists are rebuilt wholesale by [`subdivide`](Self::subdivide);
/// vertices only accumulate.
#[derive(Clone, Debug)]
pub struct EdgeMesh {
    /// Vertex positions.
    pub vertices: Vec<DVec3>,
    /// Undirected edges; no two entries connect the same unordered pair.
    pub edges: Vec<Edge>,
    /// Polygons as closed edge-link loops.
    pub polygons: Vec<Polygon>,
}

impl EdgeMesh {
    /// Build a mesh from parts.
    #[must_use]
    pub fn new(vertices: Vec<DVec3>, edges: Vec<Edge>, polygons: Vec<Polygon>) -> Self {
        debug_assert!(
            polygons
                .iter()
                .all(|p| p.links.iter().all(|l| l.edge < edges.len())),
            "edge link out of range"
        );
        debug_assert!(
            edges.iter().all(|e| e.a < vertices.len() && e.b < vertices.len()),
            "edge vertex out of range"
        );
        debug_assert!(
            polygons.iter().all(|p| p.is_closed(&edges)),
            "polygon loop does not close"
        );
        Self {
            vertices,
            edges,
            polygons,
        }
    }

    /// The unit cube: 8 vertices, 12 edges, 6 quads, centered on the origin
    /// with side 1.
    ///
    /// This is the reference mesh for cube-sphere generation; its face
    /// quads are the top level of the region address space.
    #[must_use]
    pub fn cube() -> Self {
        let vertices = vec![
            DVec3::new(-0.5, -0.5, -0.5),
            DVec3::new(-0.5, -0.5, 0.5),
            DVec3::new(-0.5, 0.5, -0.5),
            DVec3::new(-0.5, 0.5, 0.5),
            DVec3::new(0.5, -0.5, -0.5),
            DVec3::new(0.5, -0.5, 0.5),
            DVec3::new(0.5, 0.5, -0.5),
            DVec3::new(0.5, 0.5, 0.5),
        ];

        let edges = vec![
            Edge::new(0, 1),
            Edge::new(0, 2),
            Edge::new(2, 3),
            Edge::new(1, 3),
            Edge::new(0, 4),
            Edge::new(1, 5),
            Edge::new(2, 6),
            Edge::new(3, 7),
            Edge::new(4, 5),
            Edge::new(4, 6),
            Edge::new(6, 7),
            Edge::new(5, 7),
        ];

        let polygons = vec![
            Polygon::from_slots(&[(0, false), (3, false), (2, true), (1, true)]),
            Polygon::from_slots(&[(0, true), (4, false), (8, false), (5, true)]),
            Polygon::from_slots(&[(1, false), (6, false), (9, true), (4, true)]),
            Polygon::from_slots(&[(2, false), (7, false), (10, true), (6, true)]),
            Polygon::from_slots(&[(3, true), (5, false), (11, false), (7, true)]),
            Polygon::from_slots(&[(8, true), (9, false), (10, false), (11, true)]),
        ];

        Self::new(vertices, edges, polygons)
    }

    /// A mesh of a single quad taken from a spherical patch.
    ///
    /// Corner `k` of the patch becomes the first vertex of edge slot `k`, so
    /// region coordinates transfer unchanged.
    #[must_use]
    pub fn from_quad(quad: &SphericalQuad) -> Self {
        let vertices = quad.corners().to_vec();
        let edges = vec![
            Edge::new(0, 1),
            Edge::new(1, 2),
            Edge::new(2, 3),
            Edge::new(3, 0),
        ];
        let polygons = vec![Polygon::from_slots(&[
            (0, false),
            (1, false),
            (2, false),
            (3, false),
        ])];
        Self::new(vertices, edges, polygons)
    }

    /// The corner vectors of a quad polygon as a [`SphericalQuad`], in slot
    /// order.
    ///
    /// # Panics
    ///
    /// Panics if the polygon is not a quad.
    #[must_use]
    pub fn quad(&self, polygon: usize) -> SphericalQuad {
        let p = &self.polygons[polygon];
        assert!(p.is_quad(), "polygon {polygon} is not a quad");
        let corner = |slot| self.vertices[p.vertex_at(slot, &self.edges)];
        SphericalQuad::new([corner(0), corner(1), corner(2), corner(3)])
    }

    /// Length of a polygon's shortest side.
    #[must_use]
    pub fn min_side_length(&self, polygon: usize) -> f64 {
        self.side_lengths(polygon)
            .fold(f64::INFINITY, f64::min)
    }

    /// Length of a polygon's longest side.
    #[must_use]
    pub fn max_side_length(&self, polygon: usize) -> f64 {
        self.side_lengths(polygon).fold(0.0, f64::max)
    }

    fn side_lengths(&self, polygon: usize) -> impl Iterator<Item = f64> + '_ {
        self.polygons[polygon].links.iter().map(|link| {
            let edge = self.edges[link.edge];
            (self.vertices[edge.a] - self.vertices[edge.b]).length()
        })
    }

    /// Index of the polygon whose centroid has the largest projection onto
    /// `direction`: the face a ray from the origin along `direction` hits.
    ///
    /// Linear in the polygon count, which stays tiny for reference meshes.
    #[must_use]
    pub fn nearest_polygon(&self, direction: DVec3) -> usize {
        let mut best = 0;
        let mut best_dot = f64::NEG_INFINITY;
        for (index, polygon) in self.polygons.iter().enumerate() {
            let dot = polygon.center(&self.vertices, &self.edges).dot(direction);
            if dot > best_dot {
                best_dot = dot;
                best = index;
            }
        }
        best
    }

    /// Find the polygon sharing the edge at `(polygon, slot)`.
    ///
    /// Returns `None` when the edge is a boundary (only one polygon uses it).
    /// A well-formed patch has at most two polygons per edge; the scan takes
    /// the first match.
    #[must_use]
    pub fn adjacent_polygon(&self, polygon: usize, slot: usize) -> Option<AdjacentPolygon> {
        let edge = self.polygons[polygon].links[slot].edge;
        for (index, candidate) in self.polygons.iter().enumerate() {
            if index == polygon {
                continue;
            }
            if let Some(found_slot) = candidate.slot_of_edge(edge) {
                return Some(AdjacentPolygon {
                    polygon: index,
                    edge_shift: slot as i32 - found_slot as i32 + 2,
                });
            }
        }
        None
    }

    /// Every polygon sharing the corner vertex at `(polygon, slot)`,
    /// including the query polygon itself, each with its frame shift.
    ///
    /// The shift follows the same convention as [`adjacent_polygon`]
    /// (`query slot − found slot + 2`). Works for any vertex valence; the
    /// caller filters out polygons it already accounted for.
    #[must_use]
    pub fn polygons_by_vertex(&self, polygon: usize, slot: usize) -> Vec<AdjacentPolygon> {
        let vertex = self.polygons[polygon].vertex_at(slot, &self.edges);
        let mut found = Vec::new();
        for (index, candidate) in self.polygons.iter().enumerate() {
            if let Some(found_slot) = candidate.slot_of_vertex(vertex, &self.edges) {
                found.push(AdjacentPolygon {
                    polygon: index,
                    edge_shift: slot as i32 - found_slot as i32 + 2,
                });
            }
        }
        found
    }

    /// Apply `transform` to every vertex in place.
    pub fn transform_vertices(&mut self, transform: impl Fn(DVec3) -> DVec3) -> &mut Self {
        for vertex in &mut self.vertices {
            *vertex = transform(*vertex);
        }
        self
    }

    /// Scale every vertex by `scale`, then translate by `offset`.
    pub fn move_and_scale(&mut self, offset: DVec3, scale: f64) -> &mut Self {
        for vertex in &mut self.vertices {
            *vertex = scale * *vertex + offset;
        }
        self
    }

    /// Split every quad into four child quads, passing each new vertex
    /// (edge midpoints and polygon centers) through `transform`.
    ///
    /// Each original edge is halved once and shared by both polygons on it;
    /// four spoke edges per polygon connect its edge midpoints to its center.
    /// Edge and polygon lists are replaced; old vertices stay in the arena
    /// (children only reference the corners they keep).
    ///
    /// # Errors
    ///
    /// Fails with [`MeshError::UnsupportedPolygonDegree`] before any
    /// mutation if a polygon is not a quad.
    pub fn subdivide(&mut self, transform: impl Fn(DVec3) -> DVec3) -> Result<(), MeshError> {
        for (index, polygon) in self.polygons.iter().enumerate() {
            if !polygon.is_quad() {
                return Err(MeshError::UnsupportedPolygonDegree {
                    polygon: index,
                    degree: polygon.degree(),
                });
            }
        }

        struct SplitEdge {
            first_half: usize,
            second_half: usize,
            midpoint: usize,
        }

        let mut new_edges: Vec<Edge> = Vec::with_capacity(2 * self.edges.len() + 4 * self.polygons.len());
        let mut by_pair: HashMap<(usize, usize), usize> = HashMap::with_capacity(new_edges.capacity());
        let mut add_edge = |edges: &mut Vec<Edge>, edge: Edge| -> usize {
            *by_pair.entry(edge.key()).or_insert_with(|| {
                edges.push(edge);
                edges.len() - 1
            })
        };

        // Halve every edge once, so polygons sharing it agree on the midpoint.
        let mut splits = Vec::with_capacity(self.edges.len());
        for edge in &self.edges {
            let midpoint = transform((self.vertices[edge.a] + self.vertices[edge.b]) / 2.0);
            self.vertices.push(midpoint);
            let midpoint = self.vertices.len() - 1;
            splits.push(SplitEdge {
                first_half: add_edge(&mut new_edges, Edge::new(edge.a, midpoint)),
                second_half: add_edge(&mut new_edges, Edge::new(midpoint, edge.b)),
                midpoint,
            });
        }

        // Selects the half of a parent link lying on the wanted side in
        // traversal order. XOR keeps the halves consistently oriented no
        // matter which way the parent edge is stored.
        let half_link = |link: EdgeLink, first: bool, splits: &[SplitEdge]| -> EdgeLink {
            let split = &splits[link.edge];
            let use_second = link.reversed ^ !first;
            let edge = if use_second {
                split.second_half
            } else {
                split.first_half
            };
            EdgeLink::new(edge, link.reversed)
        };

        let mut new_polygons = Vec::with_capacity(4 * self.polygons.len());
        for polygon in &self.polygons {
            let center = transform(polygon.center(&self.vertices, &self.edges));
            self.vertices.push(center);
            let center = self.vertices.len() - 1;

            // One spoke per edge slot: midpoint -> center.
            let mut spokes = [0usize; 4];
            for (slot, link) in polygon.links.iter().enumerate() {
                spokes[slot] = add_edge(&mut new_edges, Edge::new(splits[link.edge].midpoint, center));
            }

            // Child k keeps corner k and walks corner -> mid_k -> center -> mid_{k-1}.
            for k in 0..4 {
                let prev = (k + 3) % 4;
                new_polygons.push(Polygon::new(vec![
                    half_link(polygon.links[k], true, &splits),
                    EdgeLink::new(spokes[k], false),
                    EdgeLink::new(spokes[prev], true),
                    half_link(polygon.links[prev], false, &splits),
                ]));
            }
        }

        self.edges = new_edges;
        self.polygons = new_polygons;
        Ok(())
    }

    /// Subdivide `times` times; non-positive counts are a no-op.
    ///
    /// # Errors
    ///
    /// Propagates [`MeshError::UnsupportedPolygonDegree`] from any step.
    pub fn subdivide_times(
        &mut self,
        times: i32,
        transform: impl Fn(DVec3) -> DVec3,
    ) -> Result<(), MeshError> {
        for _ in 0..times {
            self.subdivide(&transform)?;
        }
        Ok(())
    }

    /// Fan-triangulate every polygon from its first corner and emit flat
    /// buffers.
    ///
    /// Correct for convex planar polygons only; this is not ear clipping.
    /// All arena vertices are emitted; unreferenced ones are harmless in a
    /// vertex buffer.
    #[must_use]
    pub fn triangulate(&self) -> MeshBuffers {
        let positions = self
            .vertices
            .iter()
            .map(|v| [v.x as f32, v.y as f32, v.z as f32])
            .collect();

        let triangle_count: usize = self
            .polygons
            .iter()
            .map(|p| p.degree().saturating_sub(2))
            .sum();
        let mut indices = Vec::with_capacity(3 * triangle_count);
        for polygon in &self.polygons {
            let corner = |slot| polygon.vertex_at(slot, &self.edges) as u32;
            for i in 1..polygon.degree() - 1 {
                indices.push(corner(0));
                indices.push(corner(i));
                indices.push(corner(i + 1));
            }
        }

        MeshBuffers { positions, indices }
    }

    /// Rebuild the mesh so no two polygons share a vertex or an edge,
    /// duplicating geometry per face (flat shading).
    ///
    /// Produces a fresh vertex/edge arena instead of editing loops in place,
    /// so nothing else can alias the previous shared structures.
    pub fn make_ribbed(&mut self) {
        let corner_count: usize = self.polygons.iter().map(Polygon::degree).sum();
        let mut new_vertices = Vec::with_capacity(corner_count);
        let mut new_edges = Vec::with_capacity(corner_count);
        let mut new_polygons = Vec::with_capacity(self.polygons.len());

        for polygon in &self.polygons {
            let first = new_vertices.len();
            let degree = polygon.degree();
            for link in &polygon.links {
                new_vertices.push(self.vertices[link.first_vertex(&self.edges)]);
            }

            let mut links = Vec::with_capacity(degree);
            for i in 0..degree {
                new_edges.push(Edge::new(first + i, first + (i + 1) % degree));
                links.push(EdgeLink::new(new_edges.len() - 1, false));
            }
            new_polygons.push(Polygon::new(links));
        }

        self.vertices = new_vertices;
        self.edges = new_edges;
        self.polygons = new_polygons;
    }
}
