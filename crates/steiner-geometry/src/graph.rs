// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Weighted Graph over a Point Set
// ─────────────────────────────────────────────────────────────────────
//! Undirected weighted graph whose vertices are points and whose edge
//! weights are Euclidean distances.
//!
//! Vertices are stored once each; edges refer to them by index. The
//! complete graph over a point set collapses coincident points to a single
//! vertex, so an MST over it has `distinct − 1` edges.

use serde::{Deserialize, Serialize};

use steiner_types::{Point, SteinerError, SteinerResult};

use crate::metric::distance;

/// Undirected edge between vertex indices `a` and `b`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
    pub weight: f64,
}

/// Point-labelled undirected graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightedGraph {
    vertices: Vec<Point>,
    edges: Vec<Edge>,
}

impl WeightedGraph {
    /// Graph with the given vertices and no edges.
    pub fn new(vertices: Vec<Point>) -> Self {
        Self {
            vertices,
            edges: Vec::new(),
        }
    }

    /// Complete graph over the distinct points of `points`.
    ///
    /// One edge per unordered pair, no self-loops, weight = Euclidean
    /// distance. O(n²) edges.
    pub fn complete(points: &[Point]) -> SteinerResult<Self> {
        let mut vertices: Vec<Point> = Vec::with_capacity(points.len());
        for p in points {
            if !vertices.contains(p) {
                vertices.push(p.clone());
            }
        }

        let n = vertices.len();
        let mut edges = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for i in 0..n {
            for j in (i + 1)..n {
                edges.push(Edge {
                    a: i,
                    b: j,
                    weight: distance(&vertices[i], &vertices[j])?,
                });
            }
        }
        Ok(Self { vertices, edges })
    }

    /// Append an edge. Endpoints must exist; the weight is stored as given
    /// and checked when the graph is summed.
    pub fn add_edge(&mut self, a: usize, b: usize, weight: f64) -> SteinerResult<()> {
        let n = self.vertices.len();
        if a >= n || b >= n {
            return Err(SteinerError::Integrity(format!(
                "edge ({a}, {b}) references a vertex outside 0..{n}"
            )));
        }
        self.edges.push(Edge { a, b, weight });
        Ok(())
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Index of a vertex equal to `point`, if present.
    pub fn vertex_index(&self, point: &Point) -> Option<usize> {
        self.vertices.iter().position(|v| v == point)
    }

    /// Edges as endpoint coordinate pairs with their weight.
    pub fn segments(&self) -> impl Iterator<Item = (&Point, &Point, f64)> + '_ {
        self.edges
            .iter()
            .filter(|e| e.a < self.vertices.len() && e.b < self.vertices.len())
            .map(move |e| (&self.vertices[e.a], &self.vertices[e.b], e.weight))
    }

    /// Whether every vertex is reachable from every other.
    pub fn is_connected(&self) -> bool {
        let n = self.vertices.len();
        if n <= 1 {
            return true;
        }
        let mut parent: Vec<usize> = (0..n).collect();
        let mut components = n;
        for e in &self.edges {
            if e.a >= n || e.b >= n {
                continue;
            }
            let ra = find(&mut parent, e.a);
            let rb = find(&mut parent, e.b);
            if ra != rb {
                parent[ra] = rb;
                components -= 1;
            }
        }
        components == 1
    }

    /// |E| = |V| − 1 and connected.
    pub fn is_spanning_tree(&self) -> bool {
        self.edges.len() + 1 == self.vertices.len().max(1) && self.is_connected()
    }
}

fn find(parent: &mut [usize], mut x: usize) -> usize {
    while parent[x] != x {
        parent[x] = parent[parent[x]];
        x = parent[x];
    }
    x
}
