use std::iter;

use crate::{circuit::kronecker_product, gates::z_matrix, qstate::QState};
use anyhow::Result;
use nalgebra_sparse::{convert::serial::convert_dense_csr, CsrMatrix};

/// Weighted sum of PauliZ strings, evaluated exactly on a state vector.
#[derive(Clone, Default)]
pub struct Observable {
    operators: Vec<PauliOperator>,
}

impl Observable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Z on a single qubit, the parity read out on a SWAP-test ancilla.
    pub fn z(index: usize) -> Self {
        let mut observable = Self::new();
        observable.add_pauli_operator(1.0, &[(Pauli::Z, index)]);
        observable
    }

    pub fn add_pauli_operator(&mut self, coefficient: f64, ops: &[(Pauli, usize)]) {
        let operator = PauliOperator {
            coefficient,
            ops: ops
                .iter()
                .map(|&(kind, index)| PauliMatrix { index, kind })
                .collect(),
        };
        self.operators.push(operator);
    }

    pub fn expectation_value(&self, qstate: &QState) -> Result<f64> {
        let mut expectation = 0.0;

        for operator in &self.operators {
            let mut kinds = iter::repeat(Pauli::I)
                .take(qstate.num_of_qbits())
                .collect::<Vec<_>>();
            for op in &operator.ops {
                let slot = kinds.get_mut(op.index).ok_or_else(|| {
                    anyhow::anyhow!(
                        "Pauli operator index {} out of bounds for {} qubits",
                        op.index,
                        qstate.num_of_qbits()
                    )
                })?;
                *slot = op.kind;
            }

            let mut op = CsrMatrix::identity(1);
            for kind in kinds.iter().rev() {
                match kind {
                    Pauli::I => {
                        op = kronecker_product(&op, &CsrMatrix::identity(2));
                    }
                    Pauli::Z => {
                        op = kronecker_product(&op, &z_matrix());
                    }
                }
            }

            let ket = convert_dense_csr(&qstate.state);
            let bra = convert_dense_csr(&qstate.state.adjoint());
            let exp = (bra * op * ket)
                .get_entry(0, 0)
                .ok_or_else(|| anyhow::anyhow!("Failed to compute expectation value for operator"))?
                .into_value()
                .re;

            expectation += operator.coefficient * exp;
        }

        Ok(expectation)
    }
}

#[derive(Clone, Debug)]
struct PauliOperator {
    coefficient: f64,
    ops: Vec<PauliMatrix>,
}

#[derive(Clone, Debug)]
pub struct PauliMatrix {
    index: usize,
    kind: Pauli,
}

#[derive(Clone, Copy, Debug)]
pub enum Pauli {
    I,
    Z,
}

#[cfg(test)]
mod tests {
    use num_complex::Complex;

    use crate::{assert_approx_eq, Circuit};

    use super::*;

    #[test]
    fn test_1qbit_z_observable() -> Result<()> {
        let q0 = QState::from_str("0")?;

        let observable = Observable::z(0);

        let expectation = observable.expectation_value(&q0)?;
        assert_approx_eq!(1.0, expectation);

        let q1 = Circuit::new(1).H(0)?.apply(&q0)?;
        let expectation = observable.expectation_value(&q1)?;
        assert_approx_eq!(0.0, expectation);

        let q2 = QState::new(&[
            Complex::new((2.0f64 / 3.0).sqrt(), 0.0),
            Complex::new(0.0, (1.0f64 / 3.0).sqrt()),
        ])?;
        let expectation = observable.expectation_value(&q2)?;
        assert_approx_eq!(1.0 / 3.0, expectation);

        Ok(())
    }

    #[test]
    fn test_2qbit_zz_observable() -> Result<()> {
        let q01 = QState::from_str("01")?;

        let mut observable = Observable::new();
        observable.add_pauli_operator(0.5, &[(Pauli::Z, 0), (Pauli::Z, 1)]);
        observable.add_pauli_operator(2.0, &[(Pauli::Z, 1)]);

        // Z0 Z1 = -1, Z1 = +1
        let expectation = observable.expectation_value(&q01)?;
        assert_approx_eq!(-0.5 + 2.0, expectation);

        Ok(())
    }

    #[test]
    fn test_out_of_range_index() {
        let q0 = QState::zero_state(1);
        assert!(Observable::z(4).expectation_value(&q0).is_err());
    }
}
