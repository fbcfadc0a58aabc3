// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Steiner PSO Point Type
// ─────────────────────────────────────────────────────────────────────

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::error::{SteinerError, SteinerResult};

/// A point in n-dimensional Euclidean space.
///
/// Serialises as a bare coordinate array (`[x, y]`), so instance files can
/// list points as nested arrays. Equality is coordinate-wise `f64` equality,
/// which is also the vertex identity used when building graphs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Point(Vec<f64>);

impl Point {
    pub fn new(coords: Vec<f64>) -> Self {
        Self(coords)
    }

    pub fn dim(&self) -> usize {
        self.0.len()
    }

    pub fn coords(&self) -> &[f64] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }
}

impl Deref for Point {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl From<Vec<f64>> for Point {
    fn from(coords: Vec<f64>) -> Self {
        Self(coords)
    }
}

impl From<&[f64]> for Point {
    fn from(coords: &[f64]) -> Self {
        Self(coords.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for Point {
    fn from(coords: [f64; N]) -> Self {
        Self(coords.to_vec())
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c:.4}")?;
        }
        write!(f, ")")
    }
}

/// Check a point set before any optimisation touches it.
///
/// Fails on an empty set, mixed dimensionality, zero-dimensional points,
/// or NaN/Inf coordinates. Returns the shared dimension.
pub fn validate_points(points: &[Point]) -> SteinerResult<usize> {
    let first = points.first().ok_or(SteinerError::EmptyPointSet)?;
    let dim = first.dim();
    if dim == 0 {
        return Err(SteinerError::DimensionMismatch {
            expected: 1,
            found: 0,
        });
    }
    for (index, p) in points.iter().enumerate() {
        if p.dim() != dim {
            return Err(SteinerError::DimensionMismatch {
                expected: dim,
                found: p.dim(),
            });
        }
        if !p.is_finite() {
            return Err(SteinerError::NonFinite { index });
        }
    }
    Ok(dim)
}
