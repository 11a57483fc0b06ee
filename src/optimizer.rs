//! Parameter update strategies used by the iterative search.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use anyhow::Result;
use argmin::{
    core::{CostFunction, Executor, State},
    solver::neldermead::NelderMead,
};
use tracing::trace;

pub trait Optimizer {
    /// Returns the next parameter vector given the current one.
    fn propose(&mut self, cost: &dyn Fn(&[f64]) -> Result<f64>, params: &[f64])
        -> Result<Vec<f64>>;
}

/// Coordinate-wise closed-form minimization.
///
/// Each coordinate is assumed to enter the cost as `a sin(θ + b) + c`, which holds for
/// rotation gates generated by a Pauli operator. Three evaluations fix the sinusoid and its
/// minimizer. Coordinates are updated in order, each seeing the already updated ones.
#[derive(Clone, Debug, Default)]
pub struct Rotosolve;

impl Rotosolve {
    pub fn new() -> Self {
        Self
    }

    fn minimize_coordinate(
        cost: &dyn Fn(&[f64]) -> Result<f64>,
        params: &mut [f64],
        d: usize,
    ) -> Result<()> {
        let mut evaluate_at = |value: f64| -> Result<f64> {
            params[d] = value;
            cost(&*params)
        };
        let m_zero = evaluate_at(0.0)?;
        let m_plus = evaluate_at(FRAC_PI_2)?;
        let m_minus = evaluate_at(-FRAC_PI_2)?;

        let theta = -FRAC_PI_2 - (2.0 * m_zero - m_plus - m_minus).atan2(m_plus - m_minus);
        params[d] = wrap_angle(theta);
        trace!(coordinate = d, value = params[d], "rotosolve update");
        Ok(())
    }
}

impl Optimizer for Rotosolve {
    fn propose(
        &mut self,
        cost: &dyn Fn(&[f64]) -> Result<f64>,
        params: &[f64],
    ) -> Result<Vec<f64>> {
        let mut next = params.to_vec();
        for d in 0..next.len() {
            Self::minimize_coordinate(cost, &mut next, d)?;
        }
        Ok(next)
    }
}

/// Wraps an angle into `(-π, π]`.
pub fn wrap_angle(theta: f64) -> f64 {
    let wrapped = (theta + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

struct ClosureCost<'a> {
    cost: &'a dyn Fn(&[f64]) -> Result<f64>,
}

impl CostFunction for ClosureCost<'_> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, params: &Self::Param) -> Result<Self::Output> {
        (self.cost)(params)
    }
}

/// A short Nelder-Mead run seeded with a simplex around the current point.
#[derive(Clone, Debug)]
pub struct NelderMeadStep {
    pub iterations: u64,
    pub simplex_size: f64,
}

impl NelderMeadStep {
    pub fn new(iterations: u64, simplex_size: f64) -> Self {
        Self {
            iterations,
            simplex_size,
        }
    }
}

impl Default for NelderMeadStep {
    fn default() -> Self {
        Self::new(20, FRAC_PI_2)
    }
}

impl Optimizer for NelderMeadStep {
    fn propose(
        &mut self,
        cost: &dyn Fn(&[f64]) -> Result<f64>,
        params: &[f64],
    ) -> Result<Vec<f64>> {
        let mut simplex = vec![params.to_vec()];
        for i in 0..params.len() {
            let mut vertex = params.to_vec();
            vertex[i] += self.simplex_size;
            simplex.push(vertex);
        }

        let solver: NelderMead<Vec<f64>, f64> = NelderMead::new(simplex);
        let res = Executor::new(ClosureCost { cost }, solver)
            .configure(|state| state.max_iters(self.iterations))
            .run()?;

        let best = res
            .state
            .get_best_param()
            .ok_or_else(|| anyhow::anyhow!("Nelder-Mead finished without a best parameter"))?;
        Ok(best.clone())
    }
}
