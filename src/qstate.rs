use anyhow::Result;
use nalgebra::DVector;
use num_complex::Complex;

use crate::Qbit;

pub struct QState {
    pub(crate) state: DVector<Qbit>,
}

impl QState {
    pub fn new(state: &[Qbit]) -> Result<Self> {
        let len = state.len();
        if len == 0 || (len & (len - 1)) != 0 {
            return Err(anyhow::anyhow!(
                "State vector length must be a non-zero power of 2"
            ));
        }

        let state = DVector::from_row_slice(state);
        Ok(Self { state })
    }

    pub fn zero_state(num_of_qbits: usize) -> Self {
        let size = 2_usize.pow(num_of_qbits as u32);
        let mut state = DVector::zeros(size);
        state[0] = Complex::new(1.0, 0.0); // |0...0> state
        Self { state }
    }

    /// The rightmost character is qubit 0.
    pub fn from_str(qbits: &str) -> Result<Self> {
        if qbits.is_empty() {
            return Err(anyhow::anyhow!("Basis state string must not be empty"));
        }
        let index = usize::from_str_radix(qbits, 2)?;
        let mut state = DVector::zeros(2_usize.pow(qbits.len() as u32));
        state[index] = Complex::new(1.0, 0.0);

        Ok(Self { state })
    }

    pub fn num_of_qbits(&self) -> usize {
        self.state.len().ilog2() as usize
    }

    pub fn amplitudes(&self) -> &[Qbit] {
        self.state.as_slice()
    }

    /// Born probabilities of every computational basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.state.iter().map(|amp| amp.norm_sqr()).collect()
    }

    /// |<self|other>|^2, which is insensitive to global phase.
    pub fn fidelity(&self, other: &QState) -> Result<f64> {
        if self.state.len() != other.state.len() {
            return Err(anyhow::anyhow!(
                "Cannot compare states of {} and {} qubits",
                self.num_of_qbits(),
                other.num_of_qbits()
            ));
        }
        Ok(self.state.dotc(&other.state).norm_sqr())
    }
}
