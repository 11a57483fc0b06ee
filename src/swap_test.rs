//! Parameterized SWAP-test circuits.
//!
//! Every block occupies three consecutive qubits: `3k` is the ancilla, `3k + 1` holds the
//! reference state and `3k + 2` the trial state driven by the parameters.

use anyhow::Result;

use crate::circuit::{Circuit, ParameterizedGate};
use crate::prepare::ReferenceState;
use crate::qstate::QState;

pub const QUBITS_PER_BLOCK: usize = 3;

/// Rotations applied to the trial qubit of every block, one parameter each.
#[derive(Clone, Debug, PartialEq)]
pub struct Ansatz {
    pub rotations: Vec<ParameterizedGate>,
}

impl Ansatz {
    /// `RY` then `RZ`: reaches any single-qubit state up to global phase.
    pub fn ry_rz() -> Self {
        Self {
            rotations: vec![ParameterizedGate::RY, ParameterizedGate::RZ],
        }
    }

    pub fn ry() -> Self {
        Self {
            rotations: vec![ParameterizedGate::RY],
        }
    }
}

pub struct SwapTestCircuit {
    circuit: Circuit,
    num_of_blocks: usize,
}

impl SwapTestCircuit {
    /// One block per reference entry, with `ansatz` on each trial qubit.
    pub fn new(reference: &ReferenceState, ansatz: &Ansatz) -> Result<Self> {
        reference.validate()?;
        if ansatz.rotations.is_empty() {
            return Err(anyhow::anyhow!("Ansatz must contain at least one rotation"));
        }

        let num_of_blocks = reference.num_of_blocks();
        let mut circuit = Circuit::new(num_of_blocks * QUBITS_PER_BLOCK);

        for block in 0..num_of_blocks {
            let (_, reference_qbit, trial_qbit) = Self::block_qubits(block);
            reference.prepare(&mut circuit, block, reference_qbit)?;
            for gate in &ansatz.rotations {
                circuit.add_parametric_gate_at(trial_qbit, *gate, 0.0)?;
            }
        }

        for block in 0..num_of_blocks {
            let (ancilla, reference_qbit, trial_qbit) = Self::block_qubits(block);
            circuit = circuit
                .H(ancilla)?
                .cswap(ancilla, reference_qbit, trial_qbit)?
                .H(ancilla)?;
        }

        Ok(Self {
            circuit,
            num_of_blocks,
        })
    }

    /// Single reference qubit, trial prepared by `RY(params[0])` and `RZ(params[1])`.
    pub fn single_register(reference: &ReferenceState) -> Result<Self> {
        Self::new(reference, &Ansatz::ry_rz())
    }

    /// One block per bit of `bits`, trial of block `k` prepared by `RY(params[k])`.
    pub fn multi_register(bits: &str) -> Result<Self> {
        Self::new(&ReferenceState::Basis(bits.to_string()), &Ansatz::ry())
    }

    /// (ancilla, reference, trial)
    pub fn block_qubits(block: usize) -> (usize, usize, usize) {
        let base = block * QUBITS_PER_BLOCK;
        (base, base + 1, base + 2)
    }

    pub fn num_of_blocks(&self) -> usize {
        self.num_of_blocks
    }

    pub fn num_of_qbits(&self) -> usize {
        self.circuit.num_of_qbits()
    }

    pub fn num_of_parameters(&self) -> usize {
        self.circuit.num_of_parameters()
    }

    pub fn ancillas(&self) -> Vec<usize> {
        (0..self.num_of_blocks)
            .map(|block| Self::block_qubits(block).0)
            .collect()
    }

    /// Binds `params` and evolves `|0...0>` through the circuit.
    ///
    /// Binding happens on a scratch copy of the parameter table so `&self` stays shareable.
    pub fn run(&self, params: &[f64]) -> Result<QState> {
        if params.len() != self.num_of_parameters() {
            return Err(anyhow::anyhow!(
                "SWAP-test circuit expects {} parameters, but got {}",
                self.num_of_parameters(),
                params.len()
            ));
        }
        let bound = self.circuit.with_parameters(params)?;
        bound.apply(&QState::zero_state(self.num_of_qbits()))
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;
    use crate::{assert_approx_eq, observable::Observable};

    const T0: f64 = 0.125 * PI;
    const P0: f64 = 0.25 * PI;

    #[test]
    fn test_layout() -> Result<()> {
        let reference = ReferenceState::Angles {
            theta: T0,
            phi: P0,
        };
        let single = SwapTestCircuit::single_register(&reference)?;
        assert_eq!(1, single.num_of_blocks());
        assert_eq!(3, single.num_of_qbits());
        assert_eq!(2, single.num_of_parameters());

        let multi = SwapTestCircuit::multi_register("1011")?;
        assert_eq!(4, multi.num_of_blocks());
        assert_eq!(12, multi.num_of_qbits());
        assert_eq!(4, multi.num_of_parameters());
        assert_eq!(vec![0, 3, 6, 9], multi.ancillas());

        Ok(())
    }

    #[test]
    fn test_ancilla_expectation_is_overlap() -> Result<()> {
        let reference = ReferenceState::Angles { theta: T0, phi: P0 };
        let circuit = SwapTestCircuit::single_register(&reference)?;
        let ancilla_z = Observable::z(0);

        // <Z> on the ancilla equals |<ref|trial>|^2
        let matched = circuit.run(&[T0, P0])?;
        assert_approx_eq!(1.0, ancilla_z.expectation_value(&matched)?);

        let trial = ReferenceState::Angles { theta: 0.0, phi: PI }.single_qubit_state(0)?;
        let overlap = reference.single_qubit_state(0)?.fidelity(&trial)?;
        let mismatched = circuit.run(&[0.0, PI])?;
        assert_approx_eq!(overlap, ancilla_z.expectation_value(&mismatched)?);

        Ok(())
    }

    #[test]
    fn test_blocks_are_independent() -> Result<()> {
        let circuit = SwapTestCircuit::multi_register("10")?;
        let state = circuit.run(&[PI, PI])?;

        // block 0 matches, block 1 is orthogonal
        assert_approx_eq!(1.0, Observable::z(0).expectation_value(&state)?);
        assert_approx_eq!(0.0, Observable::z(3).expectation_value(&state)?);

        Ok(())
    }

    #[test]
    fn test_wrong_parameter_count() -> Result<()> {
        let circuit = SwapTestCircuit::multi_register("1011")?;
        assert!(circuit.run(&[0.0, 0.0]).is_err());
        Ok(())
    }
}
