// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — PSO Particle
// ─────────────────────────────────────────────────────────────────────
//! Single search agent.
//!
//! Per-round update, in this order:
//!   1. check_reset    : respawn after `reset_threshold` worsening steps
//!   2. update_fitness : evaluate at the current (pre-move) position
//!   3. update_velocity: v = w·v + c1·r1·(pbest − x) + c2·r2·(gbest − x)
//!   4. update_position: x += v, clamped into [lower, upper]
//!
//! r1 and r2 are standard-normal vectors, not uniform: the stochastic
//! term can overshoot and flip sign.
//!
//! RNG draw order: spawn draws every velocity component (uniform in
//! [0, init_velocity_max]) and then every position offset (uniform in
//! ±position_jitter); a velocity update draws the whole r1 vector and
//! then the whole r2 vector.

use rand::rngs::StdRng;
use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

use steiner_types::PsoParams;

use crate::fitness::Fitness;

/// Best fitness seen and where it was seen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Best {
    pub fitness: f64,
    pub position: Vec<f64>,
}

/// A PSO particle with its own RNG stream.
#[derive(Debug, Clone)]
pub struct Particle {
    position: Vec<f64>,
    velocity: Vec<f64>,
    fitness: f64,
    best: Best,
    stagnation: u32,
    rng: StdRng,
}

impl Particle {
    /// Spawn a particle around `seed` and evaluate it.
    pub fn new<F: Fitness + ?Sized>(
        seed: &[f64],
        fitness: &F,
        params: &PsoParams,
        mut rng: StdRng,
    ) -> Self {
        let (position, velocity) = Self::draw_state(seed, params, &mut rng);
        let value = fitness.evaluate(&position);
        Self {
            best: Best {
                fitness: value,
                position: position.clone(),
            },
            position,
            velocity,
            fitness: value,
            stagnation: 0,
            rng,
        }
    }

    fn draw_state(seed: &[f64], params: &PsoParams, rng: &mut StdRng) -> (Vec<f64>, Vec<f64>) {
        let vmax = params.init_velocity_max;
        let jitter = params.position_jitter;
        let velocity: Vec<f64> = seed.iter().map(|_| rng.gen_range(0.0..=vmax)).collect();
        let position: Vec<f64> = seed
            .iter()
            .map(|&s| s + rng.gen_range(-jitter..=jitter))
            .collect();
        (position, velocity)
    }

    pub fn position(&self) -> &[f64] {
        &self.position
    }

    pub fn velocity(&self) -> &[f64] {
        &self.velocity
    }

    /// Fitness of the most recent evaluation.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn best(&self) -> &Best {
        &self.best
    }

    pub fn stagnation(&self) -> u32 {
        self.stagnation
    }

    /// Move by the current velocity, clamping each coordinate to its limit.
    pub fn update_position(&mut self, lower: &[f64], upper: &[f64]) {
        for (i, x) in self.position.iter_mut().enumerate() {
            let mut next = *x + self.velocity[i];
            if next > upper[i] {
                next = upper[i];
            }
            if next < lower[i] {
                next = lower[i];
            }
            *x = next;
        }
    }

    pub fn update_velocity(&mut self, global_best: &[f64], params: &PsoParams) {
        let d = self.position.len();
        let r1: Vec<f64> = (0..d).map(|_| self.rng.sample(StandardNormal)).collect();
        let r2: Vec<f64> = (0..d).map(|_| self.rng.sample(StandardNormal)).collect();

        for i in 0..d {
            let momentum = params.inertia * self.velocity[i];
            let cognitive = params.cognitive * r1[i] * (self.best.position[i] - self.position[i]);
            let social = params.social * r2[i] * (global_best[i] - self.position[i]);
            self.velocity[i] = momentum + cognitive + social;
        }
    }

    /// Re-evaluate at the current position.
    ///
    /// Worse than the personal best: stagnation +1. Better: stagnation
    /// reset and personal best replaced. Equal: stagnation reset, personal
    /// best kept.
    pub fn update_fitness<F: Fitness + ?Sized>(&mut self, fitness: &F) {
        let value = fitness.evaluate(&self.position);
        self.fitness = value;
        if value > self.best.fitness {
            self.stagnation += 1;
        } else {
            self.stagnation = 0;
            if value < self.best.fitness {
                self.best = Best {
                    fitness: value,
                    position: self.position.clone(),
                };
            }
        }
    }

    /// Respawn around the current position once stagnation reaches the
    /// threshold. Personal memory is discarded.
    pub fn check_reset<F: Fitness + ?Sized>(&mut self, fitness: &F, params: &PsoParams) {
        if self.stagnation < params.reset_threshold {
            return;
        }
        let seed = std::mem::take(&mut self.position);
        let (position, velocity) = Self::draw_state(&seed, params, &mut self.rng);
        let value = fitness.evaluate(&position);
        self.best = Best {
            fitness: value,
            position: position.clone(),
        };
        self.position = position;
        self.velocity = velocity;
        self.fitness = value;
        self.stagnation = 0;
    }

    /// One full round for this particle.
    pub fn step<F: Fitness + ?Sized>(
        &mut self,
        fitness: &F,
        params: &PsoParams,
        lower: &[f64],
        upper: &[f64],
        global_best: &[f64],
    ) {
        self.check_reset(fitness, params);
        self.update_fitness(fitness);
        self.update_velocity(global_best, params);
        self.update_position(lower, upper);
    }
}
