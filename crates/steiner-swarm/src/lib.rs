// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Steiner Particle Swarm Engine
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Particle Swarm Optimisation (PSO) over a bounded box.
//!
//! Architecture:
//!   - Fitness: minimisation target, `Fn(&[f64]) -> f64` or a custom impl
//!   - Particle: position, velocity, personal best, stagnation counter,
//!     private RNG; respawns after `reset_threshold` worsening steps
//!   - Swarm: fixed population, global best, round loop with early stop
//!   - StopToken: cancellation flag + optional deadline, polled per round
//!
//! Every particle owns its RNG (seeded from the swarm's RNG at spawn), so
//! a seeded swarm is reproducible whether its particles step sequentially
//! or on the rayon pool.

pub mod fitness;
pub mod particle;
pub mod stop;
pub mod swarm;

pub use fitness::Fitness;
pub use particle::{Best, Particle};
pub use stop::StopToken;
pub use swarm::{Swarm, SwarmOutcome, Termination};
