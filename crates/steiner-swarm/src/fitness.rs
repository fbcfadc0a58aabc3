// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Fitness Seam
// ─────────────────────────────────────────────────────────────────────

/// Scalar objective evaluated at a position. Lower is better.
///
/// `Sync` so particles of one round can be evaluated concurrently.
pub trait Fitness: Sync {
    fn evaluate(&self, position: &[f64]) -> f64;
}

impl<F> Fitness for F
where
    F: Fn(&[f64]) -> f64 + Sync,
{
    fn evaluate(&self, position: &[f64]) -> f64 {
        self(position)
    }
}
