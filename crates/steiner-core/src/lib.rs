// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Steiner PSO Core
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Approximate Euclidean Steiner minimal trees by particle swarm search.
//!
//! # Invariants
//!
//! 1. **Weight never increases**: a candidate point is committed only if
//!    the MST weight with it is strictly below the current weight.
//!
//! 2. **Derived state is explicit**: `tree` and `weight` are recomputed
//!    only by `compute_tree`/`compute_weight` (and by the insertion loop
//!    after an acceptance). `run` refuses to start without them.
//!
//! 3. **Swarms are isolated**: each swarm owns its global best and its
//!    particles' RNG streams; nothing is process-wide.
//!
//! 4. **Bad input fails before search**: empty sets, mixed dimensions,
//!    and non-finite coordinates are rejected at construction.

pub mod batch;
pub mod optimizer;

pub use batch::{execute, execute_file, results_path, BatchOptions, BatchReport, Instance};
pub use optimizer::{improvement_percentage, RunOutcome, SteinerTree};
