//! Headless runner: drives a simulation at a fixed tick rate and reports
//! population statistics through structured logs.

mod telemetry;

use anyhow::{Context, Result};
use clap::Parser;
use life_core::{PopulationStats, RunnerConfig};
use life_world::Simulation;
use std::path::PathBuf;
use tokio::signal;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Headless Life Engine runner
#[derive(Parser, Debug)]
#[command(name = "life-runner")]
#[command(about = "Run a cellular-automaton life simulation without a UI")]
struct Args {
    /// JSON runner configuration (defaults apply when omitted)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many ticks
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Ticks per second
    #[arg(long)]
    tick_rate: Option<u32>,

    /// Log statistics every N ticks
    #[arg(long)]
    stats_interval: Option<u64>,

    /// Grid width
    #[arg(long)]
    width: Option<i32>,

    /// Grid height
    #[arg(long)]
    height: Option<i32>,

    /// Emit JSON log lines
    #[arg(long)]
    json: bool,

    /// Keep running after the population dies out
    #[arg(long)]
    keep_running: bool,
}

impl Args {
    /// File config (or defaults) with command line overrides applied
    fn runner_config(&self) -> Result<RunnerConfig> {
        let mut config = match &self.config {
            Some(path) => RunnerConfig::from_file(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => RunnerConfig::default(),
        };

        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(max_ticks) = self.max_ticks {
            config.max_ticks = Some(max_ticks);
        }
        if let Some(rate) = self.tick_rate {
            config.tick_rate_hz = rate;
        }
        if let Some(every) = self.stats_interval {
            config.stats_interval = every;
        }
        if let Some(width) = self.width {
            config.simulation.width = width;
        }
        if let Some(height) = self.height {
            config.simulation.height = height;
        }
        config.json_logs |= self.json;
        if self.keep_running {
            config.stop_on_extinction = false;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.runner_config()?;

    telemetry::init_telemetry(config.json_logs)?;

    let mut sim = match config.seed {
        Some(seed) => Simulation::with_seed(config.simulation.clone(), seed)?,
        None => Simulation::new(config.simulation.clone())?,
    };

    info!(
        width = config.simulation.width,
        height = config.simulation.height,
        tick_rate_hz = config.tick_rate_hz,
        max_ticks = ?config.max_ticks,
        seed = ?config.seed,
        "Starting Life Engine runner"
    );
    report(&sim.stats());

    sim.start();
    tokio::select! {
        _ = run_loop(&mut sim, &config) => {}
        _ = shutdown_signal() => {}
    }
    sim.pause();

    let stats = sim.stats();
    report(&stats);
    info!(
        tick = stats.tick,
        generation = stats.generation,
        population = stats.population,
        "Runner finished"
    );

    telemetry::shutdown_telemetry();

    Ok(())
}

/// Step the simulation at most `tick_rate_hz` times per second until a stop
/// condition is reached
async fn run_loop(sim: &mut Simulation, config: &RunnerConfig) {
    let period = Duration::from_secs_f64(1.0 / config.tick_rate_hz as f64);
    let mut ticker = interval(period);
    // Never burst to catch up after a slow tick
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let before = sim.state().generation;
        let state = sim.step();
        let tick = state.tick;

        if state.generation > before {
            debug!(tick, generation = state.generation, "New generation");
            record_counter!("generations", 1u64, tick = tick);
        }

        let stats = sim.stats();
        if config.stats_interval > 0 && tick % config.stats_interval == 0 {
            report(&stats);
        }

        if config.stop_on_extinction && stats.is_extinct() {
            warn!(tick, "Population extinct, stopping");
            break;
        }

        if config.max_ticks.is_some_and(|max| tick >= max) {
            info!(tick, "Tick limit reached");
            break;
        }
    }
}

fn report(stats: &PopulationStats) {
    record_gauge!("population", stats.population, tick = stats.tick);
    record_gauge!("species", stats.species_count, tick = stats.tick);
    record_gauge!("food", stats.food_count, tick = stats.tick);
    info!(
        tick = stats.tick,
        generation = stats.generation,
        population = stats.population,
        species = stats.species_count,
        total_cells = stats.total_cells,
        average_size = format!("{:.2}", stats.average_size()),
        mouth = stats.cell_types.mouth,
        producer = stats.cell_types.producer,
        mover = stats.cell_types.mover,
        killer = stats.cell_types.killer,
        food = stats.food_count,
        "Population statistics"
    );
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
