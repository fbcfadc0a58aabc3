// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Batch Driver
// ─────────────────────────────────────────────────────────────────────
//! Repeated independent runs over one problem instance.
//!
//! An instance file names the original points, run parameters, the number
//! of executions, and (optionally) reference Steiner points from the
//! literature. Every execution restarts from the original points; the
//! point set with the strictly lowest weight wins and is written to
//! `<stem>_results.json` beside the instance.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use steiner_types::{validate_points, Point, RunConfig, SteinerError, SteinerResult};

use crate::optimizer::{improvement_percentage, SteinerTree};

/// Problem instance as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    pub max_iteration: usize,
    pub swarm_amount: usize,
    pub population_size: usize,
    pub executions: usize,
    /// Known Steiner points; their count caps accepted points per run.
    /// An empty list deliberately means no cap rather than a cap of zero.
    #[serde(default)]
    pub found_points: Vec<Point>,
    pub original_points: Vec<Point>,
}

impl Instance {
    pub fn from_json(json: &str) -> SteinerResult<Self> {
        let instance: Self = serde_json::from_str(json)?;
        validate_points(&instance.original_points)?;
        Ok(instance)
    }

    pub fn from_file(path: &Path) -> SteinerResult<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Run configuration for execution number `execution`.
    pub fn run_config(&self, options: &BatchOptions, execution: usize) -> RunConfig {
        RunConfig {
            max_iterations: self.max_iteration,
            swarm_amount: self.swarm_amount,
            population_size: self.population_size,
            max_points: (!self.found_points.is_empty()).then_some(self.found_points.len()),
            seed: options.seed.map(|s| s.wrapping_add(execution as u64)),
            deadline_ms: options.deadline_ms,
            parallel_particles: options.parallel_particles,
            pso: Default::default(),
        }
    }
}

/// Knobs that are not part of the instance file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchOptions {
    /// Base seed; execution `i` uses `seed + i`.
    pub seed: Option<u64>,
    /// Per-execution deadline.
    pub deadline_ms: Option<u64>,
    /// Run executions on the rayon pool.
    pub parallel_executions: bool,
    pub parallel_particles: bool,
}

/// Best result across all executions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub original_weight: f64,
    pub improved_weight: f64,
    pub improvement_percentage: f64,
    /// Full point set (original + Steiner) of the best execution, or the
    /// original points if nothing improved.
    pub found_points: Vec<Point>,
}

fn prepared(points: &[Point]) -> SteinerResult<SteinerTree> {
    let mut st = SteinerTree::new(points.to_vec())?;
    st.compute_tree()?;
    st.compute_weight()?;
    Ok(st)
}

/// Run every execution of `instance` and keep the lightest tree.
pub fn execute(instance: &Instance, options: &BatchOptions) -> SteinerResult<BatchReport> {
    let original = prepared(&instance.original_points)?;
    let original_weight = original.weight().ok_or(SteinerError::TreeNotComputed)?;
    if original_weight == 0.0 {
        return Err(SteinerError::DegenerateWeight);
    }
    let best = Mutex::new((original_weight, instance.original_points.clone()));

    let run_one = |execution: usize| -> SteinerResult<()> {
        let mut st = prepared(&instance.original_points)?;
        let outcome = st.run(&instance.run_config(options, execution))?;
        let mut guard = best.lock();
        if outcome.weight < guard.0 {
            log::info!(
                "execution {execution} improves minimum weight to {:.6}",
                outcome.weight
            );
            *guard = (outcome.weight, outcome.points);
        }
        Ok(())
    };

    if options.parallel_executions {
        (0..instance.executions).into_par_iter().try_for_each(run_one)?;
    } else {
        (0..instance.executions).try_for_each(run_one)?;
    }

    let (improved_weight, found_points) = best.into_inner();
    Ok(BatchReport {
        original_weight,
        improved_weight,
        improvement_percentage: improvement_percentage(original_weight, improved_weight)?,
        found_points,
    })
}

/// `<dir>/<stem>_results.json` for an instance at `<dir>/<stem>.<ext>`.
pub fn results_path(instance_path: &Path) -> PathBuf {
    let stem = instance_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    instance_path.with_file_name(format!("{stem}_results.json"))
}

/// Load, execute, and persist. Returns the report and where it was written.
pub fn execute_file(path: &Path, options: &BatchOptions) -> SteinerResult<(BatchReport, PathBuf)> {
    let instance = Instance::from_file(path)?;
    let report = execute(&instance, options)?;
    let out = results_path(path);
    fs::write(&out, serde_json::to_string_pretty(&report)?)?;
    log::info!("results written to {}", out.display());
    Ok((report, out))
}
