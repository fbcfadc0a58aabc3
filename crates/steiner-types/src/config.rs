// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Steiner PSO Configuration
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::error::{SteinerError, SteinerResult};

/// Particle swarm coefficients and stagnation policy.
///
/// The defaults are the canonical constants of the optimiser; changing
/// them changes convergence behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PsoParams {
    /// Inertia weight w applied to the previous velocity.
    /// Default: 0.5.
    pub inertia: f64,

    /// Cognitive constant c1 (pull towards the particle's own best).
    /// Default: 1.25.
    pub cognitive: f64,

    /// Social constant c2 (pull towards the swarm's global best).
    /// Default: 1.75.
    pub social: f64,

    /// Initial velocity components are drawn from [0, init_velocity_max].
    /// Default: 1.0.
    pub init_velocity_max: f64,

    /// Initial position components are drawn from seed ± position_jitter.
    /// Default: 1.0.
    pub position_jitter: f64,

    /// Consecutive worsening evaluations before a particle is respawned.
    /// Default: 20.
    pub reset_threshold: u32,

    /// Swarm stops once the global best position has been unchanged for
    /// more than this many rounds.
    /// Default: 35.
    pub stagnation_limit: u32,
}

impl Default for PsoParams {
    fn default() -> Self {
        Self {
            inertia: 0.5,
            cognitive: 1.25,
            social: 1.75,
            init_velocity_max: 1.0,
            position_jitter: 1.0,
            reset_threshold: 20,
            stagnation_limit: 35,
        }
    }
}

impl PsoParams {
    pub fn validate(&self) -> SteinerResult<()> {
        let coefficients = [
            ("inertia", self.inertia),
            ("cognitive", self.cognitive),
            ("social", self.social),
            ("init_velocity_max", self.init_velocity_max),
            ("position_jitter", self.position_jitter),
        ];
        for (name, value) in coefficients {
            if !value.is_finite() || value < 0.0 {
                return Err(SteinerError::Config(format!(
                    "{name} must be finite and >= 0, got {value}"
                )));
            }
        }
        if self.reset_threshold < 1 {
            return Err(SteinerError::Config(
                "reset_threshold must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parameters of one point-insertion run.
///
/// Crosses the boundary to the batch driver as plain values; there is no
/// process-wide configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Maximum rounds per swarm.
    pub max_iterations: usize,

    /// Number of swarms spawned, one after another.
    pub swarm_amount: usize,

    /// Particles per swarm.
    pub population_size: usize,

    /// Cap on accepted Steiner points. `None` = unbounded.
    #[serde(default)]
    pub max_points: Option<usize>,

    /// RNG seed. `None` draws one from the OS.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Wall-clock budget for the whole run, in milliseconds.
    #[serde(default)]
    pub deadline_ms: Option<u64>,

    /// Step the particles of one round on the rayon pool.
    #[serde(default)]
    pub parallel_particles: bool,

    #[serde(default)]
    pub pso: PsoParams,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_iterations: 30,
            swarm_amount: 10,
            population_size: 15,
            max_points: None,
            seed: None,
            deadline_ms: None,
            parallel_particles: false,
            pso: PsoParams::default(),
        }
    }
}

impl RunConfig {
    pub fn new(max_iterations: usize, swarm_amount: usize, population_size: usize) -> Self {
        Self {
            max_iterations,
            swarm_amount,
            population_size,
            ..Self::default()
        }
    }

    pub fn with_max_points(mut self, max_points: usize) -> Self {
        self.max_points = Some(max_points);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_deadline_ms(mut self, deadline_ms: u64) -> Self {
        self.deadline_ms = Some(deadline_ms);
        self
    }

    pub fn with_parallel_particles(mut self, parallel: bool) -> Self {
        self.parallel_particles = parallel;
        self
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> SteinerResult<()> {
        if self.population_size < 1 {
            return Err(SteinerError::Config(format!(
                "population_size must be >= 1, got {}",
                self.population_size
            )));
        }
        if self.deadline_ms == Some(0) {
            return Err(SteinerError::Config(
                "deadline_ms must be > 0 when set".to_string(),
            ));
        }
        self.pso.validate()
    }

    /// Load from JSON string.
    pub fn from_json(json: &str) -> SteinerResult<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| SteinerError::Config(format!("JSON parse error: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }
}
