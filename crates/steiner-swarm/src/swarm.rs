// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — PSO Swarm
// ─────────────────────────────────────────────────────────────────────
//! Fixed-size population searching a box for the minimum of a fitness.
//!
//! One round:
//!   1. Scan the population; a particle whose personal best is strictly
//!      below the global best replaces it and resets the stall counter.
//!      Personal bests are (fitness, position) pairs evaluated together,
//!      so the global best is always a point the fitness was measured at.
//!   2. Every particle steps against the global best frozen after the
//!      scan (no mid-round updates), so particles are independent within
//!      a round and may step in parallel.
//!   3. If the global best position did not change, stall += 1.
//!
//! The loop ends after `max_iterations` rounds, once stall exceeds
//! `stagnation_limit`, or when the stop token fires.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use steiner_types::{PsoParams, SteinerError, SteinerResult};

use crate::fitness::Fitness;
use crate::particle::{Best, Particle};
use crate::stop::StopToken;

/// Why `optimize` returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    MaxIterations,
    Stagnated,
    Stopped,
}

/// Result of one swarm run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwarmOutcome {
    pub best: Best,
    pub iterations: usize,
    pub termination: Termination,
}

/// A particle swarm bound to one fitness function for its lifetime.
pub struct Swarm<'f, F: Fitness + ?Sized> {
    population: Vec<Particle>,
    global_best: Best,
    fitness: &'f F,
    params: PsoParams,
    parallel: bool,
}

impl<'f, F: Fitness + ?Sized> Swarm<'f, F> {
    /// Spawn `size` particles around `seed`.
    ///
    /// The swarm RNG hands each particle a `u64` seed for its own stream.
    /// The global best starts at the first particle and moves to any later
    /// particle with strictly lower fitness.
    pub fn new<R: Rng + ?Sized>(
        size: usize,
        seed: &[f64],
        fitness: &'f F,
        params: PsoParams,
        rng: &mut R,
    ) -> SteinerResult<Self> {
        if size == 0 {
            return Err(SteinerError::Config(
                "swarm population must be >= 1".to_string(),
            ));
        }
        params.validate()?;

        let mut population = Vec::with_capacity(size);
        for _ in 0..size {
            let stream = StdRng::seed_from_u64(rng.gen());
            population.push(Particle::new(seed, fitness, &params, stream));
        }

        let mut global_best = population[0].best().clone();
        for p in &population[1..] {
            if p.best().fitness < global_best.fitness {
                global_best = p.best().clone();
            }
        }

        Ok(Self {
            population,
            global_best,
            fitness,
            params,
            parallel: false,
        })
    }

    /// Step particles on the rayon pool.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn population(&self) -> &[Particle] {
        &self.population
    }

    pub fn len(&self) -> usize {
        self.population.len()
    }

    pub fn is_empty(&self) -> bool {
        self.population.is_empty()
    }

    pub fn global_best(&self) -> &Best {
        &self.global_best
    }

    pub fn params(&self) -> &PsoParams {
        &self.params
    }

    /// Pull the global best down to the lowest personal best, if strictly
    /// better. Returns whether it moved.
    ///
    /// A particle's current position has already moved past the point its
    /// `fitness()` was measured at, so only personal bests are compared.
    pub fn observe(&mut self) -> bool {
        let mut improved = false;
        for p in &self.population {
            if p.best().fitness < self.global_best.fitness {
                self.global_best = p.best().clone();
                improved = true;
            }
        }
        improved
    }

    fn step_all(&mut self, lower: &[f64], upper: &[f64]) {
        let fitness = self.fitness;
        let params = &self.params;
        let gbest = self.global_best.position.as_slice();
        if self.parallel {
            self.population
                .par_iter_mut()
                .for_each(|p| p.step(fitness, params, lower, upper, gbest));
        } else {
            for p in self.population.iter_mut() {
                p.step(fitness, params, lower, upper, gbest);
            }
        }
    }

    /// Run up to `max_iterations` rounds inside [lower, upper].
    pub fn optimize(&mut self, lower: &[f64], upper: &[f64], max_iterations: usize) -> SwarmOutcome {
        self.optimize_until(lower, upper, max_iterations, &StopToken::new())
    }

    /// `optimize`, polling `stop` before every round.
    pub fn optimize_until(
        &mut self,
        lower: &[f64],
        upper: &[f64],
        max_iterations: usize,
        stop: &StopToken,
    ) -> SwarmOutcome {
        let mut iteration = 0;
        let mut stalled: u32 = 0;

        let termination = loop {
            if iteration >= max_iterations {
                break Termination::MaxIterations;
            }
            if stalled > self.params.stagnation_limit {
                break Termination::Stagnated;
            }
            if stop.is_stopped() {
                break Termination::Stopped;
            }

            let previous = self.global_best.position.clone();
            if self.observe() {
                stalled = 0;
            }
            self.step_all(lower, upper);
            if previous == self.global_best.position {
                stalled += 1;
            }
            iteration += 1;
        };

        log::debug!(
            "swarm finished after {iteration} rounds ({termination:?}), best fitness {:.6}",
            self.global_best.fitness
        );

        SwarmOutcome {
            best: self.global_best.clone(),
            iterations: iteration,
            termination,
        }
    }
}
