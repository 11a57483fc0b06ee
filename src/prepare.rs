//! Fixed reference states loaded into the reference qubit of each SWAP-test block.

use anyhow::Result;
use num_complex::Complex;
use serde::{Deserialize, Serialize};

use crate::circuit::{Circuit, ParameterizedGate};
use crate::gates::{state_injection_matrix, x_matrix};
use crate::qstate::QState;
use crate::Qbit;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceState {
    /// `RZ(phi) RY(theta) |0>`
    Angles { theta: f64, phi: f64 },
    /// `alpha|0> + beta|1>`, normalized on use.
    Amplitudes { alpha: Qbit, beta: Qbit },
    /// One bit per block, leftmost character is block 0.
    Basis(String),
}

impl ReferenceState {
    /// The amplitude pair produced by [`ReferenceState::Angles`] with the same angles.
    ///
    /// RZ only contributes phases `e^{∓iφ/2}`, so the pair is exact, global phase included.
    pub fn from_angles_as_amplitudes(theta: f64, phi: f64) -> Self {
        let (sin, cos) = (theta / 2.0).sin_cos();
        ReferenceState::Amplitudes {
            alpha: Complex::from_polar(cos, -phi / 2.0),
            beta: Complex::from_polar(sin, phi / 2.0),
        }
    }

    /// Number of SWAP-test blocks this reference fills.
    pub fn num_of_blocks(&self) -> usize {
        match self {
            ReferenceState::Angles { .. } | ReferenceState::Amplitudes { .. } => 1,
            ReferenceState::Basis(bits) => bits.len(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            ReferenceState::Angles { theta, phi } => {
                if !theta.is_finite() || !phi.is_finite() {
                    return Err(anyhow::anyhow!("Reference angles must be finite"));
                }
            }
            ReferenceState::Amplitudes { alpha, beta } => {
                if alpha.norm_sqr() + beta.norm_sqr() < 1e-24 {
                    return Err(anyhow::anyhow!("Amplitudes must not both be zero"));
                }
            }
            ReferenceState::Basis(bits) => {
                if bits.is_empty() {
                    return Err(anyhow::anyhow!("Basis reference must have at least one bit"));
                }
                if let Some(c) = bits.chars().find(|c| *c != '0' && *c != '1') {
                    return Err(anyhow::anyhow!(
                        "Basis reference {:?} contains non-binary character {:?}",
                        bits,
                        c
                    ));
                }
            }
        }
        Ok(())
    }

    /// Adds the preparation gates for block `block` on `qubit`.
    pub(crate) fn prepare(&self, circuit: &mut Circuit, block: usize, qubit: usize) -> Result<()> {
        match self {
            ReferenceState::Angles { theta, phi } => {
                circuit.add_gate_at(qubit, ParameterizedGate::RY.matrix(*theta))?;
                circuit.add_gate_at(qubit, ParameterizedGate::RZ.matrix(*phi))?;
            }
            ReferenceState::Amplitudes { alpha, beta } => {
                circuit.add_gate_at(qubit, state_injection_matrix(*alpha, *beta)?)?;
            }
            ReferenceState::Basis(bits) => {
                let bit = bits.as_bytes().get(block).ok_or_else(|| {
                    anyhow::anyhow!("Basis reference {:?} has no bit for block {}", bits, block)
                })?;
                if *bit == b'1' {
                    circuit.add_gate_at(qubit, x_matrix())?;
                }
            }
        }
        Ok(())
    }

    /// The 1-qubit state loaded into block `block`.
    pub fn single_qubit_state(&self, block: usize) -> Result<QState> {
        self.validate()?;
        let mut circuit = Circuit::new(1);
        self.prepare(&mut circuit, block, 0)?;
        circuit.apply(&QState::zero_state(1))
    }
}
