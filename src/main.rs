//! Runs the SWAP-test optimization experiments and prints the best parameters.
//!
//! ```bash
//! swap-test-qsim angles
//! swap-test-qsim grid --seed 3
//! swap-test-qsim all --config experiments.yaml --log-level debug
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use swap_test_qsim::{
    experiment::{run_grid, run_iterative},
    report::{grid_report, search_report},
    ExperimentConfig, NelderMeadStep, Optimizer, Rotosolve, StateVectorSimulator,
};

#[derive(Parser)]
#[command(name = "swap-test-qsim")]
#[command(about = "Optimize SWAP-test circuit parameters to match a reference state")]
struct Cli {
    /// Path to a YAML experiment configuration
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Simulator seed, overrides the configuration
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Parameter update strategy for the iterative experiments
    #[arg(long, global = true, value_enum, default_value_t = OptimizerKind::Rotosolve)]
    optimizer: OptimizerKind,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reference state prepared from two rotation angles
    Angles,
    /// Reference state injected as literal amplitudes
    Amplitudes,
    /// Four-register basis state recovered by exhaustive grid search
    Grid,
    /// Every experiment in turn
    All,
}

#[derive(Clone, Copy, ValueEnum)]
enum OptimizerKind {
    Rotosolve,
    NelderMead,
}

impl OptimizerKind {
    fn build(self) -> Box<dyn Optimizer> {
        match self {
            OptimizerKind::Rotosolve => Box::new(Rotosolve::new()),
            OptimizerKind::NelderMead => Box::new(NelderMeadStep::default()),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ExperimentConfig::load(cli.config.as_deref())?;
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let simulator = match config.seed {
        Some(seed) => StateVectorSimulator::with_seed(seed),
        None => StateVectorSimulator::new(),
    };
    info!(seed = ?config.seed, "simulator ready");

    let mut optimizer = cli.optimizer.build();

    let (angles, amplitudes, grid) = match cli.command {
        Commands::Angles => (true, false, false),
        Commands::Amplitudes => (false, true, false),
        Commands::Grid => (false, false, true),
        Commands::All => (true, true, true),
    };

    if angles {
        let outcome = run_iterative(&config.angles, &simulator, optimizer.as_mut())?;
        println!("{}", search_report(&outcome));
    }
    if amplitudes {
        let outcome = run_iterative(&config.amplitudes, &simulator, optimizer.as_mut())?;
        println!("{}", search_report(&outcome));
    }
    if grid {
        let outcome = run_grid(&config.grid, &simulator)?;
        println!("{}", grid_report(&outcome));
    }

    Ok(())
}
