// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Steiner Geometry
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Geometry substrate for the Steiner PSO kernel: Euclidean metric,
//! weighted graphs over point sets, minimum spanning trees, and the
//! axis-aligned search box.

pub mod bounds;
pub mod graph;
pub mod metric;
pub mod mst;

pub use bounds::BoundingBox;
pub use graph::{Edge, WeightedGraph};
pub use metric::{distance, total_weight};
pub use mst::{euclidean_mst, KruskalProvider, SpanningTreeProvider};
