use anyhow::Result;
use argmin::core::CostFunction;
use tracing::trace;

use crate::observable::Observable;
use crate::simulator::{Sample, Simulator};
use crate::swap_test::SwapTestCircuit;

/// `1 - mean(samples)`: 0 for identical states, 1 for orthogonal ones.
pub fn cost_from_samples(samples: &[Sample]) -> Result<f64> {
    if samples.is_empty() {
        return Err(anyhow::anyhow!("Cannot compute a cost from zero shots"));
    }
    let sum: f64 = samples.iter().map(|&s| f64::from(s)).sum();
    Ok(1.0 - sum / samples.len() as f64)
}

/// Sampled SWAP-test cost of a circuit on a given simulator.
pub struct SwapTestCost<'a, S: Simulator> {
    simulator: &'a S,
    circuit: &'a SwapTestCircuit,
    shots: usize,
}

impl<'a, S: Simulator> SwapTestCost<'a, S> {
    pub fn new(simulator: &'a S, circuit: &'a SwapTestCircuit, shots: usize) -> Self {
        Self {
            simulator,
            circuit,
            shots,
        }
    }

    pub fn num_of_parameters(&self) -> usize {
        self.circuit.num_of_parameters()
    }

    pub fn num_of_blocks(&self) -> usize {
        self.circuit.num_of_blocks()
    }

    /// One cost per SWAP-test block.
    pub fn block_costs(&self, params: &[f64]) -> Result<Vec<f64>> {
        let samples = self.simulator.evaluate(self.circuit, params, self.shots)?;
        let costs = samples
            .iter()
            .map(|block| cost_from_samples(block))
            .collect::<Result<Vec<_>>>()?;
        trace!(?params, ?costs, "evaluated block costs");
        Ok(costs)
    }

    /// Sum of the block costs.
    pub fn total_cost(&self, params: &[f64]) -> Result<f64> {
        Ok(self.block_costs(params)?.iter().sum())
    }
}

impl<S: Simulator> CostFunction for SwapTestCost<'_, S> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, params: &Self::Param) -> Result<Self::Output> {
        self.total_cost(params)
    }
}

/// Noise-free block costs `1 - <Z_ancilla>`, computed from the state vector.
pub fn exact_block_costs(circuit: &SwapTestCircuit, params: &[f64]) -> Result<Vec<f64>> {
    let state = circuit.run(params)?;
    circuit
        .ancillas()
        .into_iter()
        .map(|ancilla| Ok(1.0 - Observable::z(ancilla).expectation_value(&state)?))
        .collect()
}
