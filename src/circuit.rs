use anyhow::Result;
use nalgebra_sparse::{coo::CooMatrix, csr::CsrMatrix};
use num_complex::Complex;

use crate::gates::{h_matrix, ry_matrix, rz_matrix};
use crate::qstate::QState;
use crate::Qbit;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParameterizedGate {
    RY,
    RZ,
}

impl ParameterizedGate {
    pub fn matrix(self, angle: f64) -> CsrMatrix<Qbit> {
        match self {
            ParameterizedGate::RY => ry_matrix(angle),
            ParameterizedGate::RZ => rz_matrix(angle),
        }
    }
}

#[derive(Clone)]
struct Parameter {
    gate_index: usize,
    qbit_index: usize,
    gate: ParameterizedGate,
    value: f64,
}

/// A circuit is a list of full-register sparse unitaries applied in order.
///
/// Qubit `i` is bit `i` of the basis index, so qubit 0 is the least significant bit.
#[derive(Clone)]
pub struct Circuit {
    gates: Vec<CsrMatrix<Qbit>>,
    num_of_qbits: usize,

    parameters: Vec<Parameter>,
}

impl Circuit {
    pub fn new(num_of_qbits: usize) -> Self {
        Self {
            gates: Vec::new(),
            num_of_qbits,
            parameters: Vec::new(),
        }
    }

    pub fn num_of_qbits(&self) -> usize {
        self.num_of_qbits
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.num_of_qbits {
            return Err(anyhow::anyhow!(
                "Index {} out of bounds for the number of qubits {}",
                index,
                self.num_of_qbits
            ));
        }
        Ok(())
    }

    fn check_and_reverse_index(&self, index: usize) -> Result<usize> {
        self.check_index(index)?;
        Ok(self.num_of_qbits - 1 - index)
    }

    fn create_gate_for_index(
        &self,
        index: usize,
        gate: &CsrMatrix<Qbit>,
    ) -> Result<CsrMatrix<Qbit>> {
        let index = self.check_and_reverse_index(index)?;

        let mut matrix = CsrMatrix::identity(1);
        for i in 0..self.num_of_qbits {
            if i == index {
                matrix = kronecker_product(&matrix, gate);
            } else {
                matrix = kronecker_product(&matrix, &CsrMatrix::identity(2));
            }
        }

        Ok(matrix)
    }

    pub fn gate_at(mut self, index: usize, gate: CsrMatrix<Qbit>) -> Result<Self> {
        self.add_gate_at(index, gate)?;
        Ok(self)
    }

    pub fn add_gate_at(&mut self, index: usize, gate: CsrMatrix<Qbit>) -> Result<()> {
        let gate = self.create_gate_for_index(index, &gate)?;
        self.gates.push(gate);
        Ok(())
    }

    #[allow(non_snake_case)]
    pub fn H(self, index: usize) -> Result<Self> {
        self.gate_at(index, h_matrix())
    }

    pub fn add_parametric_gate_at(
        &mut self,
        index: usize,
        gate: ParameterizedGate,
        value: f64,
    ) -> Result<()> {
        let param = Parameter {
            gate_index: self.gates.len(),
            qbit_index: index,
            gate,
            value,
        };
        let matrix = self.create_gate_for_index(index, &gate.matrix(value))?;

        self.parameters.push(param);
        self.gates.push(matrix);

        Ok(())
    }

    pub fn parametric_gate_at(
        mut self,
        index: usize,
        gate: ParameterizedGate,
        value: f64,
    ) -> Result<Self> {
        self.add_parametric_gate_at(index, gate, value)?;
        Ok(self)
    }

    pub fn num_of_parameters(&self) -> usize {
        self.parameters.len()
    }

    pub fn get_parameters(&self) -> Vec<f64> {
        self.parameters.iter().map(|param| param.value).collect()
    }

    pub fn set_parameter(&mut self, param_index: usize, value: f64) -> Result<()> {
        let Some(param) = self.parameters.get_mut(param_index) else {
            return Err(anyhow::anyhow!("Parameter index out of bounds"));
        };
        param.value = value;

        // No index check is needed
        let param = &self.parameters[param_index];
        let gate_index = param.gate_index;
        let matrix = self.create_gate_for_index(param.qbit_index, &param.gate.matrix(value))?;
        self.gates[gate_index] = matrix;

        Ok(())
    }

    pub fn set_parameters(&mut self, values: &[f64]) -> Result<()> {
        if values.len() != self.parameters.len() {
            return Err(anyhow::anyhow!(
                "Expected {} parameters, but got {}",
                self.parameters.len(),
                values.len()
            ));
        }

        for (i, &value) in values.iter().enumerate() {
            self.set_parameter(i, value)?;
        }

        Ok(())
    }

    /// Copy of this circuit with every parameter rebound to `values`.
    pub fn with_parameters(&self, values: &[f64]) -> Result<Self> {
        let mut circuit = self.clone();
        circuit.set_parameters(values)?;
        Ok(circuit)
    }

    /// Fredkin gate: exchanges `target1` and `target2` when `control` is |1>.
    pub fn cswap(mut self, control: usize, target1: usize, target2: usize) -> Result<Self> {
        self.check_index(control)?;
        self.check_index(target1)?;
        self.check_index(target2)?;

        if control == target1 || control == target2 || target1 == target2 {
            return Err(anyhow::anyhow!(
                "Control and target qubits of a controlled swap must be distinct"
            ));
        }

        let dim = 1_usize << self.num_of_qbits;
        let one = Complex::new(1.0, 0.0);
        let mut cswap = CooMatrix::new(dim, dim);
        for col in 0..dim {
            let control_set = (col >> control) & 1 == 1;
            let bits_differ = ((col >> target1) & 1) != ((col >> target2) & 1);
            let row = if control_set && bits_differ {
                col ^ (1 << target1) ^ (1 << target2)
            } else {
                col
            };
            cswap.push(row, col, one);
        }

        self.gates.push(CsrMatrix::from(&cswap));
        Ok(self)
    }

    pub fn apply(&self, state: &QState) -> Result<QState> {
        if state.num_of_qbits() != self.num_of_qbits {
            return Err(anyhow::anyhow!(
                "Circuit acts on {} qubits, but the state has {}",
                self.num_of_qbits,
                state.num_of_qbits()
            ));
        }

        let mut result = state.state.clone();
        for gate in &self.gates {
            result = gate * result;
        }
        Ok(QState { state: result })
    }
}

pub fn kronecker_product(x: &CsrMatrix<Qbit>, y: &CsrMatrix<Qbit>) -> CsrMatrix<Qbit> {
    let mut result = CooMatrix::new(x.nrows() * y.nrows(), x.ncols() * y.ncols());

    for (rx, cx, value_x) in x.triplet_iter() {
        for (ry, cy, value_y) in y.triplet_iter() {
            let new_row = rx * y.nrows() + ry;
            let new_col = cx * y.ncols() + cy;
            let new_value = value_x * value_y;
            result.push(new_row, new_col, new_value);
        }
    }

    CsrMatrix::from(&result)
}
