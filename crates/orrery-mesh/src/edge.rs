//! Undirected edges and the directed links polygons use to reference them.

use std::hash::{Hash, Hasher};

/// An undirected edge between two vertices, stored by index into the owning
/// mesh's vertex list.
///
/// Equality and hashing ignore vertex order: an edge from A to B equals an
/// edge from B to A. Direction is carried separately by [`EdgeLink`].
#[derive(Clone, Copy, Debug)]
pub struct Edge {
    /// First vertex index as stored.
    pub a: usize,
    /// Second vertex index as stored.
    pub b: usize,
}

impl Edge {
    /// Create an edge between two vertex indices.
    #[must_use]
    pub fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }

    /// The vertex pair ordered low-to-high, the canonical identity of the
    /// edge regardless of stored direction.
    #[must_use]
    pub fn key(&self) -> (usize, usize) {
        if self.a <= self.b {
            (self.a, self.b)
        } else {
            (self.b, self.a)
        }
    }

    /// Whether the edge touches the given vertex.
    #[must_use]
    pub fn contains(&self, vertex: usize) -> bool {
        self.a == vertex || self.b == vertex
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// A directed reference to an edge: the edge index plus a flag telling
/// whether the polygon traverses it against its stored direction.
///
/// This lets two polygons share one [`Edge`] entry while walking it in
/// opposite directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeLink {
    /// Index into the mesh's edge list.
    pub edge: usize,
    /// Traverse the edge from `b` to `a` instead of `a` to `b`.
    pub reversed: bool,
}

impl EdgeLink {
    /// Create a link to the given edge.
    #[must_use]
    pub fn new(edge: usize, reversed: bool) -> Self {
        Self { edge, reversed }
    }

    /// The vertex this link starts at, in traversal order.
    #[must_use]
    pub fn first_vertex(&self, edges: &[Edge]) -> usize {
        let edge = edges[self.edge];
        if self.reversed { edge.b } else { edge.a }
    }

    /// The vertex this link ends at, in traversal order.
    #[must_use]
    pub fn last_vertex(&self, edges: &[Edge]) -> usize {
        let edge = edges[self.edge];
        if self.reversed { edge.a } else { edge.b }
    }
}
