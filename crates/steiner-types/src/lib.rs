// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Steiner PSO Kernel Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Point type, run configuration, and error hierarchy shared by every
//! crate of the Steiner PSO kernel.

pub mod config;
pub mod error;
pub mod point;

pub use config::{PsoParams, RunConfig};
pub use error::{SteinerError, SteinerResult};
pub use point::{validate_points, Point};
