// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Minimum Spanning Tree Provider
// ─────────────────────────────────────────────────────────────────────
//! MST seam. The optimiser only needs "weighted graph in, spanning tree
//! out"; `KruskalProvider` fills it with petgraph's Kruskal
//! implementation. Any other backend (incremental MST, Delaunay-restricted
//! candidate graph) can plug in via `SpanningTreeProvider`.

use petgraph::algo::min_spanning_tree;
use petgraph::data::Element;
use petgraph::graph::{NodeIndex, UnGraph};

use steiner_types::{Point, SteinerError, SteinerResult};

use crate::graph::WeightedGraph;

/// Trait for minimum spanning tree backends.
pub trait SpanningTreeProvider: Send + Sync {
    /// Return a minimum spanning tree over all vertices of `graph`.
    ///
    /// Must return a tree (not a forest) for a connected input. Ties
    /// between equal-weight trees may break differently between calls; the
    /// total weight may not.
    fn minimum_spanning_tree(&self, graph: &WeightedGraph) -> SteinerResult<WeightedGraph>;
}

/// Kruskal's algorithm via `petgraph::algo::min_spanning_tree`.
#[derive(Debug, Clone, Copy, Default)]
pub struct KruskalProvider;

impl SpanningTreeProvider for KruskalProvider {
    fn minimum_spanning_tree(&self, graph: &WeightedGraph) -> SteinerResult<WeightedGraph> {
        let n = graph.vertex_count();
        let mut pg: UnGraph<(), f64> = UnGraph::with_capacity(n, graph.edge_count());
        let nodes: Vec<NodeIndex> = (0..n).map(|_| pg.add_node(())).collect();

        for e in graph.edges() {
            if e.a >= n || e.b >= n {
                return Err(SteinerError::Integrity(format!(
                    "edge ({}, {}) references a vertex outside 0..{n}",
                    e.a, e.b
                )));
            }
            // Kruskal sorts by partial order; NaN would poison it.
            if !e.weight.is_finite() {
                return Err(SteinerError::Integrity(format!(
                    "edge ({}, {}) has non-finite weight",
                    e.a, e.b
                )));
            }
            pg.add_edge(nodes[e.a], nodes[e.b], e.weight);
        }

        let mut tree = WeightedGraph::new(graph.vertices().to_vec());
        for element in min_spanning_tree(&pg) {
            if let Element::Edge {
                source,
                target,
                weight,
            } = element
            {
                tree.add_edge(source, target, weight)?;
            }
        }

        if n > 0 && tree.edge_count() + 1 != n {
            return Err(SteinerError::Integrity(format!(
                "graph is disconnected: spanning forest has {} edges over {n} vertices",
                tree.edge_count()
            )));
        }
        Ok(tree)
    }
}

/// Euclidean MST over the distinct points of `points`.
pub fn euclidean_mst(
    points: &[Point],
    provider: &dyn SpanningTreeProvider,
) -> SteinerResult<WeightedGraph> {
    let graph = WeightedGraph::complete(points)?;
    provider.minimum_spanning_tree(&graph)
}
