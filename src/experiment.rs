//! The two end-to-end experiments: iterative single-register search and the grid search.

use anyhow::Result;
use tracing::info;

use crate::config::{GridConfig, IterativeConfig};
use crate::cost::SwapTestCost;
use crate::grid::{GridOutcome, GridSearch};
use crate::optimizer::Optimizer;
use crate::search::{IterativeSearch, SearchOutcome};
use crate::simulator::Simulator;
use crate::swap_test::SwapTestCircuit;

pub fn run_iterative<S: Simulator>(
    config: &IterativeConfig,
    simulator: &S,
    optimizer: &mut dyn Optimizer,
) -> Result<SearchOutcome> {
    config.validate()?;
    let circuit = SwapTestCircuit::single_register(&config.reference)?;
    let cost = SwapTestCost::new(simulator, &circuit, config.shots);
    info!(
        reference = ?config.reference,
        shots = config.shots,
        "running single-register swap test"
    );

    IterativeSearch::new(config.search_config()).run(
        optimizer,
        &|params: &[f64]| cost.total_cost(params),
        cost.num_of_parameters(),
    )
}

pub fn run_grid<S: Simulator>(config: &GridConfig, simulator: &S) -> Result<GridOutcome> {
    config.validate()?;
    let circuit = SwapTestCircuit::multi_register(&config.bits)?;
    let cost = SwapTestCost::new(simulator, &circuit, config.shots);
    info!(
        bits = %config.bits,
        shots = config.shots,
        "running multi-register swap test"
    );

    GridSearch::new(&config.values, cost.num_of_parameters())?
        .run(&|params: &[f64]| cost.block_costs(params))
}
