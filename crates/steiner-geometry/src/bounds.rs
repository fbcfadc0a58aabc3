// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Axis-Aligned Search Box
// ─────────────────────────────────────────────────────────────────────

use rand::Rng;
use serde::{Deserialize, Serialize};

use steiner_types::{validate_points, Point, SteinerResult};

/// Component-wise min/max of a point set.
///
/// Bounds both the random swarm seed and particle position clamping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

impl BoundingBox {
    pub fn from_points(points: &[Point]) -> SteinerResult<Self> {
        let dim = validate_points(points)?;
        let mut lower = points[0].to_vec();
        let mut upper = points[0].to_vec();
        for p in &points[1..] {
            for i in 0..dim {
                lower[i] = lower[i].min(p[i]);
                upper[i] = upper[i].max(p[i]);
            }
        }
        Ok(Self { lower, upper })
    }

    pub fn dim(&self) -> usize {
        self.lower.len()
    }

    pub fn contains(&self, point: &[f64]) -> bool {
        point.len() == self.dim()
            && point
                .iter()
                .zip(self.lower.iter().zip(&self.upper))
                .all(|(&c, (&lo, &hi))| lo <= c && c <= hi)
    }

    /// Uniform sample inside the box, one draw per dimension in order.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        self.lower
            .iter()
            .zip(&self.upper)
            .map(|(&lo, &hi)| if lo < hi { rng.gen_range(lo..=hi) } else { lo })
            .collect::<Vec<f64>>()
            .into()
    }
}
