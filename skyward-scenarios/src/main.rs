/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Scenario runner for the Skyward continuum scheduler.
//!
//! ```text
//! skyward-scenarios --scheduler slo-aware --results results/hyperdrive.csv
//! skyward-scenarios --scheduler round-robin --satellites 144 --seed 3
//! ```
//!
//! Log verbosity follows `RUST_LOG` (e.g. `RUST_LOG=skyward_scheduler=debug`).

mod constellation;
mod experiment;
mod nodes_generator;
mod results;
mod workflows;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use experiment::{run_wildfire_quality_experiment, NodeCounts, SchedulerKind};
use skyward_scheduler::config::load_tuning;
use skyward_scheduler::plugins::VicinityConfig;

#[derive(Debug, Parser)]
#[command(
    name = "skyward-scenarios",
    about = "Runs scheduling experiments over a simulated LEO/edge/ground fleet"
)]
struct Cli {
    /// Scenario to run.
    #[arg(long, default_value = "wildfire-quality")]
    scenario: String,

    /// Plugin set driving the scheduler under test.
    #[arg(long, value_enum, default_value_t = SchedulerKind::SloAware)]
    scheduler: SchedulerKind,

    /// Output CSV with one row per scheduling decision.
    #[arg(long, default_value = "results/results.csv")]
    results: PathBuf,

    /// Optional YAML tuning file (vicinity radii and counts).
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Seed for fleet generation and the randomised plugins.
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Simulated duration in ticks (one tick per minute).
    #[arg(long, default_value_t = 40)]
    duration: i64,

    /// Number of satellites in the constellation.
    #[arg(long, default_value_t = 72)]
    satellites: usize,

    /// Number of terrestrial edge nodes (drones).
    #[arg(long, default_value_t = 5)]
    edge_nodes: usize,

    /// Number of ground stations.
    #[arg(long, default_value_t = 2)]
    ground_stations: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    let vicinity = match &cli.tuning {
        Some(path) => {
            load_tuning(path)
                .with_context(|| format!("invalid tuning file: {}", path.display()))?
                .vicinity
        }
        None => VicinityConfig::default(),
    };

    let counts = NodeCounts {
        satellites: cli.satellites,
        edge_nodes: cli.edge_nodes,
        ground_stations: cli.ground_stations,
    };

    info!(
        scenario = %cli.scenario,
        scheduler = ?cli.scheduler,
        seed = cli.seed,
        "starting scenario"
    );

    match cli.scenario.as_str() {
        "wildfire-quality" => run_wildfire_quality_experiment(
            cli.seed,
            counts,
            cli.duration,
            vicinity,
            cli.scheduler,
            &cli.results,
        ),
        other => bail!("unknown scenario '{other}' (available: wildfire-quality)"),
    }
}
