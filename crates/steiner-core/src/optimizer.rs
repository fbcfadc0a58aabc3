// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Steiner Point Insertion Optimiser
// ─────────────────────────────────────────────────────────────────────
//! Approximate Euclidean Steiner minimal tree by one-point-at-a-time PSO.
//!
//! The fitness of a candidate point is the MST weight of the committed
//! points plus that candidate, recomputed from scratch per evaluation.
//! Each swarm searches the current bounding box from a uniform random
//! seed; its best candidate is committed only if it strictly lowers the
//! tree weight. Swarms run one after another against the live point set,
//! so an accepted point reshapes the landscape for every later swarm.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use steiner_geometry::{
    euclidean_mst, total_weight, BoundingBox, KruskalProvider, SpanningTreeProvider,
    WeightedGraph,
};
use steiner_swarm::{StopToken, Swarm, Termination};
use steiner_types::{validate_points, Point, RunConfig, SteinerError, SteinerResult};

/// Result of `SteinerTree::run`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunOutcome {
    /// Committed point set after the run (input points first).
    pub points: Vec<Point>,
    /// Final MST weight.
    pub weight: f64,
    /// Accepted Steiner points in discovery order.
    pub new_points: Vec<Point>,
    /// Swarms actually spawned.
    pub swarms_run: usize,
    /// True if cancellation or the deadline ended the run.
    pub stopped_early: bool,
}

/// `100 − improved·100 / original`.
///
/// Undefined for a zero-weight original tree (all points coincide).
pub fn improvement_percentage(original: f64, improved: f64) -> SteinerResult<f64> {
    if original == 0.0 {
        return Err(SteinerError::DegenerateWeight);
    }
    Ok(100.0 - improved * 100.0 / original)
}

/// Committed point set with its derived MST and weight.
///
/// `tree` and `weight` are derived state: mutating `points` through
/// `reset` clears them, and `compute_tree`/`compute_weight` must be called
/// again before `run`.
pub struct SteinerTree {
    points: Vec<Point>,
    tree: Option<WeightedGraph>,
    weight: Option<f64>,
    provider: Arc<dyn SpanningTreeProvider>,
}

impl SteinerTree {
    pub fn new(points: Vec<Point>) -> SteinerResult<Self> {
        Self::with_provider(points, Arc::new(KruskalProvider))
    }

    pub fn with_provider(
        points: Vec<Point>,
        provider: Arc<dyn SpanningTreeProvider>,
    ) -> SteinerResult<Self> {
        validate_points(&points)?;
        Ok(Self {
            points,
            tree: None,
            weight: None,
            provider,
        })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn tree(&self) -> Option<&WeightedGraph> {
        self.tree.as_ref()
    }

    pub fn weight(&self) -> Option<f64> {
        self.weight
    }

    /// Replace the point set and drop derived state.
    pub fn reset(&mut self, points: Vec<Point>) -> SteinerResult<()> {
        validate_points(&points)?;
        self.points = points;
        self.tree = None;
        self.weight = None;
        Ok(())
    }

    /// Empty the state: no points, no tree, zero weight.
    pub fn clear(&mut self) {
        self.points.clear();
        self.tree = None;
        self.weight = Some(0.0);
    }

    /// MST over the distinct current points.
    pub fn compute_tree(&mut self) -> SteinerResult<&WeightedGraph> {
        let tree = euclidean_mst(&self.points, self.provider.as_ref())?;
        Ok(&*self.tree.insert(tree))
    }

    /// Sum the stored tree's edge weights into `weight`.
    pub fn compute_weight(&mut self) -> SteinerResult<f64> {
        let tree = self.tree.as_ref().ok_or(SteinerError::TreeNotComputed)?;
        let w = total_weight(tree)?;
        self.weight = Some(w);
        Ok(w)
    }

    pub fn bounding_box(&self) -> SteinerResult<BoundingBox> {
        BoundingBox::from_points(&self.points)
    }

    /// Component-wise maximum of the current points.
    pub fn upper_limit(&self) -> SteinerResult<Vec<f64>> {
        Ok(self.bounding_box()?.upper)
    }

    /// Component-wise minimum of the current points.
    pub fn lower_limit(&self) -> SteinerResult<Vec<f64>> {
        Ok(self.bounding_box()?.lower)
    }

    /// MST over the current points plus `point`. Leaves `self` untouched.
    pub fn tree_with_point(&self, point: &[f64]) -> SteinerResult<WeightedGraph> {
        let mut candidate_set = Vec::with_capacity(self.points.len() + 1);
        candidate_set.extend_from_slice(&self.points);
        candidate_set.push(Point::from(point));
        euclidean_mst(&candidate_set, self.provider.as_ref())
    }

    /// Total weight of `tree_with_point(point)`. This is what swarms minimise.
    pub fn candidate_fitness(&self, point: &[f64]) -> SteinerResult<f64> {
        total_weight(&self.tree_with_point(point)?)
    }

    /// Fitness for the swarm: a failed evaluation ranks as the worst.
    fn swarm_fitness(&self, point: &[f64]) -> f64 {
        match self.candidate_fitness(point) {
            Ok(w) => w,
            Err(e) => {
                log::warn!("candidate evaluation failed ({e}); ranking as +inf");
                f64::INFINITY
            }
        }
    }

    /// Run the point-insertion loop with no external stop signal.
    pub fn run(&mut self, config: &RunConfig) -> SteinerResult<RunOutcome> {
        let stop = StopToken::from_deadline_ms(config.deadline_ms);
        self.run_until(config, &stop)
    }

    /// Spawn up to `swarm_amount` swarms, stopping early once `max_points`
    /// points have been accepted or `stop` fires.
    ///
    /// Requires `compute_tree` and `compute_weight` to have run for the
    /// current points. Never increases `weight`.
    pub fn run_until(&mut self, config: &RunConfig, stop: &StopToken) -> SteinerResult<RunOutcome> {
        config.validate()?;
        let mut weight = self.weight.ok_or(SteinerError::TreeNotComputed)?;
        if self.tree.is_none() {
            return Err(SteinerError::TreeNotComputed);
        }

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let cap = config.max_points.unwrap_or(usize::MAX);

        log::info!("original weight {weight:.6} over {} points", self.points.len());

        let mut new_points: Vec<Point> = Vec::new();
        let mut swarms_run = 0;
        let mut stopped_early = false;

        while swarms_run < config.swarm_amount && new_points.len() < cap {
            if stop.is_stopped() {
                stopped_early = true;
                break;
            }

            let bounds = self.bounding_box()?;
            let seed = bounds.sample(&mut rng);

            let outcome = {
                let fitness = |candidate: &[f64]| self.swarm_fitness(candidate);
                let mut swarm = Swarm::new(
                    config.population_size,
                    &seed,
                    &fitness,
                    config.pso.clone(),
                    &mut rng,
                )?
                .with_parallel(config.parallel_particles);
                swarm.optimize_until(&bounds.lower, &bounds.upper, config.max_iterations, stop)
            };
            swarms_run += 1;
            if outcome.termination == Termination::Stopped {
                stopped_early = true;
            }

            let candidate_weight = self.swarm_fitness(&outcome.best.position);
            if candidate_weight < weight {
                let point = Point::new(outcome.best.position);
                self.points.push(point.clone());
                self.compute_tree()?;
                weight = self.compute_weight()?;
                log::info!(
                    "swarm {swarms_run}: accepted Steiner point {point}, weight now {weight:.6}"
                );
                new_points.push(point);
            } else {
                log::debug!(
                    "swarm {swarms_run}: candidate weight {candidate_weight:.6} does not beat {weight:.6}"
                );
            }

            if stopped_early {
                break;
            }
        }

        if stopped_early {
            log::warn!("run stopped early after {swarms_run} swarms");
        }
        log::info!(
            "final weight {weight:.6} with {} Steiner points",
            new_points.len()
        );

        Ok(RunOutcome {
            points: self.points.clone(),
            weight,
            new_points,
            swarms_run,
            stopped_early,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[[f64; 2]]) -> Vec<Point> {
        raw.iter().map(|p| Point::from(*p)).collect()
    }

    fn triangle() -> SteinerTree {
        SteinerTree::new(pts(&[[0.0, 0.0], [0.0, 1.0], [2.0, 0.0]])).unwrap()
    }

    fn ready(points: Vec<Point>) -> SteinerTree {
        let mut st = SteinerTree::new(points).unwrap();
        st.compute_tree().unwrap();
        st.compute_weight().unwrap();
        st
    }

    #[test]
    fn test_constructor() {
        let st = triangle();
        assert_eq!(st.points().len(), 3);
        assert!(st.tree().is_none());
        assert!(st.weight().is_none());
    }

    #[test]
    fn test_constructor_rejects_bad_input() {
        assert!(matches!(
            SteinerTree::new(vec![]),
            Err(SteinerError::EmptyPointSet)
        ));
        assert!(SteinerTree::new(vec![Point::from([0.0, f64::INFINITY])]).is_err());
    }

    #[test]
    fn test_calculate_tree() {
        let mut st = triangle();
        assert_eq!(st.compute_tree().unwrap().edge_count(), 2);
    }

    #[test]
    fn test_total_weight() {
        let mut st = triangle();
        st.compute_tree().unwrap();
        assert!((st.compute_weight().unwrap() - 3.0).abs() < 1e-12);
        assert_eq!(st.weight(), Some(3.0));
    }

    #[test]
    fn test_weight_before_tree() {
        let mut st = triangle();
        assert!(matches!(
            st.compute_weight(),
            Err(SteinerError::TreeNotComputed)
        ));
    }

    #[test]
    fn test_tree_idempotent() {
        let mut st = ready(pts(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]]));
        let w1 = st.weight().unwrap();
        st.compute_tree().unwrap();
        let w2 = st.compute_weight().unwrap();
        assert_eq!(w1, w2);
    }

    #[test]
    fn test_calculate_tree_with_point() {
        let st = ready(pts(&[[0.0, 0.0], [0.0, 1.0], [2.0, 0.0]]));
        let tree = st.tree_with_point(&[1.0, 1.0]).unwrap();
        assert_eq!(tree.edge_count(), 3);
        assert!(total_weight(&tree).unwrap() <= 3.5);
        assert_eq!(st.points().len(), 3);
    }

    #[test]
    fn test_candidate_fitness_matches_tree() {
        let st = ready(pts(&[[0.0, 0.0], [0.0, 1.0], [2.0, 0.0]]));
        let f = st.candidate_fitness(&[1.0, 1.0]).unwrap();
        assert!((f - total_weight(&st.tree_with_point(&[1.0, 1.0]).unwrap()).unwrap()).abs() < 1e-12);
    }

    #[test]
    fn test_candidate_on_existing_point_is_neutral() {
        let st = ready(pts(&[[0.0, 0.0], [0.0, 1.0], [2.0, 0.0]]));
        assert!((st.candidate_fitness(&[0.0, 1.0]).unwrap() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_candidate_fitness_dimension_mismatch() {
        let st = ready(pts(&[[0.0, 0.0], [0.0, 1.0]]));
        assert!(st.candidate_fitness(&[1.0, 1.0, 1.0]).is_err());
    }

    #[test]
    fn test_limits() {
        let st = SteinerTree::new(pts(&[
            [-9.0, 8.0],
            [-7.0, 3.0],
            [-2.0, 7.0],
            [9.0, 9.0],
            [10.0, -8.0],
            [-10.0, 9.0],
            [4.0, 0.0],
        ]))
        .unwrap();
        assert_eq!(st.upper_limit().unwrap(), vec![10.0, 9.0]);
        assert_eq!(st.lower_limit().unwrap(), vec![-10.0, -8.0]);
    }

    #[test]
    fn test_reset_and_clear() {
        let mut st = ready(pts(&[[0.0, 0.0], [0.0, 1.0]]));
        st.reset(pts(&[[5.0, 5.0], [6.0, 5.0]])).unwrap();
        assert!(st.tree().is_none());
        assert!(st.weight().is_none());
        assert_eq!(st.points()[0], Point::from([5.0, 5.0]));
        st.clear();
        assert!(st.points().is_empty());
        assert_eq!(st.weight(), Some(0.0));
    }

    #[test]
    fn test_run_requires_computed_tree() {
        let mut st = triangle();
        let cfg = RunConfig::new(5, 1, 3).with_seed(1);
        assert!(matches!(st.run(&cfg), Err(SteinerError::TreeNotComputed)));
    }

    #[test]
    fn test_steiner_optimization() {
        let mut st = ready(pts(&[[-4.0, 0.0], [0.0, 6.0], [4.0, 0.0]]));
        let before = st.weight().unwrap();
        let out = st.run(&RunConfig::new(30, 10, 15).with_seed(42)).unwrap();
        assert!(out.points.len() >= 3);
        assert!(out.weight <= before);
        assert_eq!(out.weight, st.weight().unwrap());
        assert!(out.new_points.len() <= 10);
        assert_eq!(out.points.len(), 3 + out.new_points.len());
        assert!(st.tree().unwrap().is_spanning_tree());
    }

    #[test]
    fn test_run_finds_improvement_on_equilateral_triangle() {
        // Any point near the Fermat point beats the 2-edge MST (weight 2).
        let h = 3f64.sqrt() / 2.0;
        let mut st = ready(pts(&[[0.0, 0.0], [1.0, 0.0], [0.5, h]]));
        let out = st.run(&RunConfig::new(60, 5, 20).with_seed(7)).unwrap();
        assert!(!out.new_points.is_empty());
        assert!(out.weight < 2.0);
        // Optimum is sqrt(3) ≈ 1.732.
        assert!(out.weight >= 3f64.sqrt() - 1e-9);
    }

    #[test]
    fn test_run_respects_max_points() {
        let h = 3f64.sqrt() / 2.0;
        let mut st = ready(pts(&[[0.0, 0.0], [1.0, 0.0], [0.5, h], [1.5, h]]));
        let out = st
            .run(&RunConfig::new(40, 8, 15).with_seed(3).with_max_points(1))
            .unwrap();
        assert!(out.new_points.len() <= 1);
        if out.new_points.len() == 1 {
            assert!(out.swarms_run <= 8);
        }
    }

    #[test]
    fn test_run_zero_swarms_is_noop() {
        let mut st = ready(pts(&[[0.0, 0.0], [0.0, 1.0], [2.0, 0.0]]));
        let out = st.run(&RunConfig::new(10, 0, 5).with_seed(1)).unwrap();
        assert_eq!(out.swarms_run, 0);
        assert!(out.new_points.is_empty());
        assert_eq!(out.weight, 3.0);
    }

    #[test]
    fn test_run_is_reproducible_with_seed() {
        let cfg = RunConfig::new(20, 4, 10).with_seed(11);
        let mut a = ready(pts(&[[-4.0, 0.0], [0.0, 6.0], [4.0, 0.0]]));
        let mut b = ready(pts(&[[-4.0, 0.0], [0.0, 6.0], [4.0, 0.0]]));
        assert_eq!(a.run(&cfg).unwrap(), b.run(&cfg).unwrap());
    }

    #[test]
    fn test_parallel_particles_same_result() {
        let cfg = RunConfig::new(20, 3, 10).with_seed(5);
        let mut a = ready(pts(&[[-4.0, 0.0], [0.0, 6.0], [4.0, 0.0]]));
        let mut b = ready(pts(&[[-4.0, 0.0], [0.0, 6.0], [4.0, 0.0]]));
        let seq = a.run(&cfg).unwrap();
        let par = b.run(&cfg.clone().with_parallel_particles(true)).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_cancelled_run_keeps_state() {
        let mut st = ready(pts(&[[-4.0, 0.0], [0.0, 6.0], [4.0, 0.0]]));
        let stop = StopToken::new();
        stop.cancel();
        let out = st
            .run_until(&RunConfig::new(30, 10, 15).with_seed(1), &stop)
            .unwrap();
        assert!(out.stopped_early);
        assert_eq!(out.swarms_run, 0);
        assert_eq!(out.points.len(), 3);
    }

    #[test]
    fn test_weight_never_increases_over_seeds() {
        for seed in 0..5 {
            let mut st = ready(pts(&[[0.0, 0.0], [3.0, 1.0], [1.0, 4.0], [5.0, 5.0]]));
            let before = st.weight().unwrap();
            let out = st
                .run(&RunConfig::new(15, 3, 8).with_seed(seed))
                .unwrap();
            assert!(out.weight <= before);
            assert!(out.swarms_run <= 3);
            assert!(out.new_points.len() <= out.swarms_run);
        }
    }

    #[test]
    fn test_each_accepted_point_lowers_weight() {
        let layout = pts(&[[0.0, 0.0], [4.0, 1.0], [1.0, 5.0], [6.0, 6.0], [3.0, -2.0]]);
        for seed in 0..120 {
            let mut st = ready(layout.clone());
            let before = st.weight().unwrap();
            let out = st.run(&RunConfig::new(5, 3, 4).with_seed(seed)).unwrap();
            assert!(
                out.weight <= before,
                "seed {seed}: weight rose from {before} to {}",
                out.weight
            );

            let mut replay = ready(layout.clone());
            let mut last = before;
            for point in &out.new_points {
                let next = replay.candidate_fitness(point).unwrap();
                assert!(next < last, "seed {seed}: {point} raised weight {last} -> {next}");
                let mut points = replay.points().to_vec();
                points.push(point.clone());
                replay = ready(points);
                last = next;
            }
            assert!((last - out.weight).abs() < 1e-9);
        }
    }

    #[test]
    fn test_improvement_percentage() {
        assert!((improvement_percentage(4.0, 3.0).unwrap() - 25.0).abs() < 1e-12);
        assert!(matches!(
            improvement_percentage(0.0, 0.0),
            Err(SteinerError::DegenerateWeight)
        ));
    }
}
