//! Shot-based execution of SWAP-test circuits.

use std::cell::RefCell;

use anyhow::Result;
use rand::distr::{weighted::WeightedIndex, Distribution};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::trace;

use crate::swap_test::SwapTestCircuit;

/// A PauliZ outcome, `+1` or `-1`.
pub type Sample = i8;

/// Runs a circuit for a number of shots and reports the ancilla PauliZ sample of every block.
///
/// The outer vector has one entry per block, each holding `shots` samples.
pub trait Simulator {
    fn evaluate(
        &self,
        circuit: &SwapTestCircuit,
        params: &[f64],
        shots: usize,
    ) -> Result<Vec<Vec<Sample>>>;
}

/// Dense state-vector simulation followed by Born-rule sampling.
pub struct StateVectorSimulator {
    rng: RefCell<StdRng>,
}

impl StateVectorSimulator {
    pub fn new() -> Self {
        Self {
            rng: RefCell::new(StdRng::from_os_rng()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: RefCell::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for StateVectorSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator for StateVectorSimulator {
    fn evaluate(
        &self,
        circuit: &SwapTestCircuit,
        params: &[f64],
        shots: usize,
    ) -> Result<Vec<Vec<Sample>>> {
        let state = circuit.run(params)?;
        let distribution = WeightedIndex::new(state.probabilities())?;
        let ancillas = circuit.ancillas();

        let mut samples = vec![Vec::with_capacity(shots); ancillas.len()];
        let mut rng = self.rng.borrow_mut();
        for _ in 0..shots {
            let outcome = distribution.sample(&mut *rng);
            for (block, &ancilla) in ancillas.iter().enumerate() {
                samples[block].push(pauli_z_sample(outcome, ancilla));
            }
        }

        trace!(?params, shots, "sampled swap-test circuit");
        Ok(samples)
    }
}

/// Eigenvalue of Z on `qubit` for the computational basis state `basis_index`.
pub fn pauli_z_sample(basis_index: usize, qubit: usize) -> Sample {
    if (basis_index >> qubit) & 1 == 0 {
        1
    } else {
        -1
    }
}
