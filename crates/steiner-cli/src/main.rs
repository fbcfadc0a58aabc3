// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Steiner PSO Command Line
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! `steiner-pso`: run the Steiner point insertion loop from the shell.
//!
//! ```text
//! steiner-pso solve --point=-4,0 --point=0,6 --point=4,0 --seed 42
//! steiner-pso batch instances/decroos-example.json --parallel
//! ```
//!
//! Reports go to stdout as JSON; logs go to stderr (`-v`, `-vv`, or
//! `RUST_LOG`).

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use steiner_core::{execute_file, improvement_percentage, BatchOptions, RunOutcome, SteinerTree};
use steiner_types::{Point, RunConfig, SteinerResult};

/// Approximate Euclidean Steiner minimal trees with particle swarms.
#[derive(Parser)]
#[command(name = "steiner-pso")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Optimise a point set given on the command line
    Solve(SolveArgs),
    /// Run every execution of an instance file and write `<stem>_results.json`
    Batch(BatchArgs),
}

#[derive(Args)]
struct SolveArgs {
    /// Point as comma-separated coordinates, e.g. `--point=-4,0` (repeat)
    #[arg(short, long = "point", value_parser = parse_point, required = true, allow_hyphen_values = true)]
    points: Vec<Point>,

    /// Maximum rounds per swarm
    #[arg(long, default_value_t = 30)]
    iterations: usize,

    /// Number of swarms
    #[arg(long, default_value_t = 10)]
    swarms: usize,

    /// Particles per swarm
    #[arg(long, default_value_t = 15)]
    population: usize,

    /// Stop after this many accepted Steiner points
    #[arg(long)]
    max_points: Option<usize>,

    #[arg(long)]
    seed: Option<u64>,

    /// Wall-clock budget in milliseconds
    #[arg(long)]
    deadline_ms: Option<u64>,

    /// Step particles in parallel
    #[arg(long)]
    parallel: bool,
}

#[derive(Args)]
struct BatchArgs {
    /// Instance file (JSON)
    instance: PathBuf,

    /// Base seed; execution i uses seed + i
    #[arg(long)]
    seed: Option<u64>,

    /// Per-execution wall-clock budget in milliseconds
    #[arg(long)]
    deadline_ms: Option<u64>,

    /// Run executions in parallel
    #[arg(long)]
    parallel: bool,
}

#[derive(Serialize)]
struct SolveReport {
    original_weight: f64,
    improvement_percentage: Option<f64>,
    #[serde(flatten)]
    outcome: RunOutcome,
    edges: Vec<[Point; 2]>,
}

fn parse_point(raw: &str) -> Result<Point, String> {
    raw.split(',')
        .map(|c| {
            c.trim()
                .parse::<f64>()
                .map_err(|e| format!("invalid coordinate {c:?}: {e}"))
        })
        .collect::<Result<Vec<f64>, String>>()
        .map(Point::new)
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // Also installs the `log` bridge used by the library crates.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn solve(args: SolveArgs) -> SteinerResult<String> {
    let mut config = RunConfig::new(args.iterations, args.swarms, args.population)
        .with_parallel_particles(args.parallel);
    config.max_points = args.max_points;
    config.seed = args.seed;
    config.deadline_ms = args.deadline_ms;

    let mut st = SteinerTree::new(args.points)?;
    st.compute_tree()?;
    let original_weight = st.compute_weight()?;
    let outcome = st.run(&config)?;

    let edges = st
        .tree()
        .map(|t| t.segments().map(|(a, b, _)| [a.clone(), b.clone()]).collect())
        .unwrap_or_default();
    let report = SolveReport {
        original_weight,
        improvement_percentage: improvement_percentage(original_weight, outcome.weight).ok(),
        outcome,
        edges,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

fn batch(args: BatchArgs) -> SteinerResult<String> {
    let options = BatchOptions {
        seed: args.seed,
        deadline_ms: args.deadline_ms,
        parallel_executions: args.parallel,
        parallel_particles: false,
    };
    let (report, _) = execute_file(&args.instance, &options)?;
    Ok(serde_json::to_string_pretty(&report)?)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Solve(args) => solve(args),
        Commands::Batch(args) => batch(args),
    };

    match result {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("-4, 0.5").unwrap(), Point::from([-4.0, 0.5]));
        assert!(parse_point("1,x").is_err());
    }

    #[test]
    fn test_solve_args_parse() {
        let cli = Cli::try_parse_from([
            "steiner-pso",
            "solve",
            "--point",
            "-4,0",
            "--point=0,6",
            "-p",
            "4,0",
            "--seed",
            "42",
        ])
        .unwrap();
        match cli.command {
            Commands::Solve(args) => {
                assert_eq!(args.points.len(), 3);
                assert_eq!(args.points[0], Point::from([-4.0, 0.0]));
                assert_eq!(args.seed, Some(42));
                assert_eq!(args.iterations, 30);
            }
            Commands::Batch(_) => panic!("expected solve"),
        }
    }

    #[test]
    fn test_solve_reports_json() {
        let args = SolveArgs {
            points: vec![
                Point::from([-4.0, 0.0]),
                Point::from([0.0, 6.0]),
                Point::from([4.0, 0.0]),
            ],
            iterations: 10,
            swarms: 2,
            population: 5,
            max_points: None,
            seed: Some(1),
            deadline_ms: None,
            parallel: false,
        };
        let json = solve(args).unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(v["weight"].as_f64().unwrap() <= v["original_weight"].as_f64().unwrap());
        let n_points = v["points"].as_array().unwrap().len();
        assert_eq!(v["edges"].as_array().unwrap().len(), n_points - 1);
    }
}
