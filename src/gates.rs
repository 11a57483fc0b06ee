use anyhow::Result;
use nalgebra::Matrix2;
use nalgebra_sparse::convert::serial::convert_dense_coo;
use nalgebra_sparse::{coo::CooMatrix, csr::CsrMatrix};
use num_complex::Complex;

use crate::Qbit;

pub fn h_matrix() -> CsrMatrix<Qbit> {
    let root2 = 2.0_f64.sqrt();
    let one = Complex::new(1.0, 0.0);
    let hadamard_coo = convert_dense_coo(&Matrix2::from_row_slice(&[
        one / root2,
        one / root2,
        one / root2,
        -one / root2,
    ]));
    CsrMatrix::from(&hadamard_coo)
}

pub fn x_matrix() -> CsrMatrix<Qbit> {
    let mut x_coo = CooMatrix::new(2, 2);
    x_coo.push(0, 1, Complex::new(1.0, 0.0));
    x_coo.push(1, 0, Complex::new(1.0, 0.0));
    CsrMatrix::from(&x_coo)
}

pub fn z_matrix() -> CsrMatrix<Qbit> {
    let mut z_coo = CooMatrix::new(2, 2);
    z_coo.push(0, 0, Complex::new(1.0, 0.0));
    z_coo.push(1, 1, Complex::new(-1.0, 0.0));
    CsrMatrix::from(&z_coo)
}

/// RY(θ) = exp(-iθY/2)
pub fn ry_matrix(angle: f64) -> CsrMatrix<Qbit> {
    let (sin, cos) = (angle / 2.0).sin_cos();
    let mut ry_coo = CooMatrix::new(2, 2);
    ry_coo.push(0, 0, Complex::new(cos, 0.0));
    ry_coo.push(0, 1, Complex::new(-sin, 0.0));
    ry_coo.push(1, 0, Complex::new(sin, 0.0));
    ry_coo.push(1, 1, Complex::new(cos, 0.0));
    CsrMatrix::from(&ry_coo)
}

/// RZ(φ) = exp(-iφZ/2)
pub fn rz_matrix(angle: f64) -> CsrMatrix<Qbit> {
    let mut rz_coo = CooMatrix::new(2, 2);
    rz_coo.push(0, 0, Complex::from_polar(1.0, -angle / 2.0));
    rz_coo.push(1, 1, Complex::from_polar(1.0, angle / 2.0));
    CsrMatrix::from(&rz_coo)
}

/// Unitary mapping |0> to `alpha|0> + beta|1>`.
///
/// The amplitudes are normalized first, the second column is chosen orthogonal to the first.
pub fn state_injection_matrix(alpha: Qbit, beta: Qbit) -> Result<CsrMatrix<Qbit>> {
    let norm = (alpha.norm_sqr() + beta.norm_sqr()).sqrt();
    if norm < 1e-12 {
        return Err(anyhow::anyhow!("Amplitudes must not both be zero"));
    }
    let (alpha, beta) = (alpha / norm, beta / norm);

    let injection_coo = convert_dense_coo(&Matrix2::from_row_slice(&[
        alpha,
        -beta.conj(),
        beta,
        alpha.conj(),
    ]));
    Ok(CsrMatrix::from(&injection_coo))
}
