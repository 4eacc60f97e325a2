//! Headless agent simulation runner.
//!
//! Loads settings from an INI file, builds a simulation from a scenario file
//! (or the bundled demo scenario), runs a fixed number of ticks and reports
//! how much of each agent type every absorber consumed.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --scenario scenario.json --ticks 1000 --save snapshot.json
//! ```
//!
//! Set `RUST_LOG=trace` to follow every burst and absorption.

use std::path::PathBuf;

use agentsim::components::absorber::AgentAbsorber;
use agentsim::components::agent::AgentId;
use agentsim::resources::simconfig::SimConfig;
use agentsim::scenario::Scenario;
use agentsim::simulation::Simulation;
use bevy_ecs::prelude::*;
use clap::Parser;
use log::{error, info, warn};
use rustc_hash::FxHashMap;

/// Agent particle simulation
#[derive(Parser)]
#[command(version, about = "Runs a headless agent emission/absorption simulation.")]
struct Cli {
    /// INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Scenario JSON file. The bundled demo scenario is used when omitted.
    #[arg(long, value_name = "PATH")]
    scenario: Option<PathBuf>,

    /// Number of ticks to run (overrides the config file).
    #[arg(long)]
    ticks: Option<u64>,

    /// Random seed (overrides the config file).
    #[arg(long)]
    seed: Option<u64>,

    /// Write a JSON snapshot of the final state to this path.
    #[arg(long, value_name = "PATH")]
    save: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = SimConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }
    if let Some(ticks) = cli.ticks {
        config.ticks = ticks;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }

    if let Err(e) = run(&cli, &config) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli, config: &SimConfig) -> Result<(), Box<dyn std::error::Error>> {
    let scenario = match &cli.scenario {
        Some(path) => Scenario::load_from_file(path)?,
        None => Scenario::demo(),
    };

    let mut sim = Simulation::new(config);
    let entities = scenario.apply(&mut sim)?;

    info!(
        "Running {} ticks of {} ms (seed {})",
        config.ticks, config.tick_ms, config.seed
    );

    // The per-tick ledger is cleared every pass, so totals are kept here.
    let mut totals: FxHashMap<(Entity, AgentId), f32> = FxHashMap::default();
    let mut absorbers = sim.world_mut().query::<(Entity, &AgentAbsorber)>();
    for _ in 0..config.ticks {
        sim.tick(config.tick_ms);
        for (entity, absorber) in absorbers.iter(sim.world()) {
            for (agent_id, amount) in absorber.absorbed() {
                *totals.entry((entity, *agent_id)).or_insert(0.0) += amount;
            }
        }
    }

    info!(
        "Finished after {} tick(s) at {} ms with {} live agent(s)",
        sim.time().frame_count,
        sim.time().elapsed,
        sim.agent_count()
    );
    for (index, absorber) in entities.absorbers.iter().enumerate() {
        for (agent_id, _) in sim.registry().entries() {
            let total = totals.get(&(*absorber, agent_id)).copied().unwrap_or(0.0);
            if total > 0.0 {
                info!(
                    "Absorber #{} consumed {:.2} of {}",
                    index,
                    total,
                    sim.registry().display_name(agent_id)?
                );
            }
        }
    }

    if let Some(path) = &cli.save {
        let snapshot = sim.snapshot()?;
        std::fs::write(path, serde_json::to_string_pretty(&snapshot)?)?;
        info!("Snapshot written to {}", path.display());
    }

    Ok(())
}
