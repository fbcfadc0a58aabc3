// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Steiner PSO Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for all Steiner PSO failures.
#[derive(Error, Debug)]
pub enum SteinerError {
    /// No points were supplied.
    #[error("point set is empty")]
    EmptyPointSet,

    /// Two points (or a point and a bound) disagree on dimensionality.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// A coordinate is NaN or infinite.
    #[error("non-finite coordinate in point {index}")]
    NonFinite { index: usize },

    /// Graph data is inconsistent (missing/invalid edge weight, dangling edge).
    #[error("graph integrity fault: {0}")]
    Integrity(String),

    /// An operation needs the tree/weight and they were never computed.
    #[error("tree not computed: call compute_tree and compute_weight first")]
    TreeNotComputed,

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Improvement relative to a zero-weight tree is undefined.
    #[error("original tree weight is zero; improvement percentage undefined")]
    DegenerateWeight,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SteinerResult<T> = Result<T, SteinerError>;
