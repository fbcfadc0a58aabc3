// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Euclidean Metric and Graph Weight
// ─────────────────────────────────────────────────────────────────────
//! Distance between n-dimensional points and total weight of a graph.

use steiner_types::{SteinerError, SteinerResult};

use crate::graph::WeightedGraph;

/// Euclidean distance ‖p2 − p1‖₂ for any shared dimensionality.
///
/// Points of different dimension are rejected rather than truncated.
pub fn distance(p1: &[f64], p2: &[f64]) -> SteinerResult<f64> {
    if p1.len() != p2.len() {
        return Err(SteinerError::DimensionMismatch {
            expected: p1.len(),
            found: p2.len(),
        });
    }
    let sum_sq: f64 = p1
        .iter()
        .zip(p2)
        .map(|(a, b)| {
            let d = b - a;
            d * d
        })
        .sum();
    Ok(sum_sq.sqrt())
}

/// Sum of edge weights.
///
/// A non-finite or negative weight, or an edge pointing outside the vertex
/// set, is a data-integrity fault and is reported, never counted as zero.
pub fn total_weight(graph: &WeightedGraph) -> SteinerResult<f64> {
    let n = graph.vertex_count();
    let mut total = 0.0;
    for (i, edge) in graph.edges().iter().enumerate() {
        if edge.a >= n || edge.b >= n {
            return Err(SteinerError::Integrity(format!(
                "edge {i} ({}, {}) references a vertex outside 0..{n}",
                edge.a, edge.b
            )));
        }
        if !edge.weight.is_finite() || edge.weight < 0.0 {
            return Err(SteinerError::Integrity(format!(
                "edge {i} ({}, {}) has invalid weight {}",
                edge.a, edge.b, edge.weight
            )));
        }
        total += edge.weight;
    }
    Ok(total)
}
