//! Fixed-budget iterative search with best-so-far tracking.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::optimizer::Optimizer;

/// Stops the loop once the best cost has not improved by `min_improvement` for `patience` steps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EarlyStop {
    pub patience: usize,
    pub min_improvement: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    pub steps: usize,
    /// Disabled by default: the full step budget always runs.
    #[serde(default)]
    pub early_stop: Option<EarlyStop>,
}

impl SearchConfig {
    pub fn new(steps: usize) -> Self {
        Self {
            steps,
            early_stop: None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SearchOutcome {
    pub best_params: Vec<f64>,
    pub best_cost: f64,
    /// Cost of every evaluated point, the initial zero vector first.
    pub costs: Vec<f64>,
    /// Running minimum of `costs`.
    pub best_costs: Vec<f64>,
}

impl SearchOutcome {
    pub fn steps_run(&self) -> usize {
        self.costs.len() - 1
    }
}

pub struct IterativeSearch {
    config: SearchConfig,
}

impl IterativeSearch {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Starts from the zero vector of length `num_of_parameters`.
    pub fn run(
        &self,
        optimizer: &mut dyn Optimizer,
        cost: &dyn Fn(&[f64]) -> Result<f64>,
        num_of_parameters: usize,
    ) -> Result<SearchOutcome> {
        let mut params = vec![0.0; num_of_parameters];
        let initial_cost = cost(&params)?;

        let mut outcome = SearchOutcome {
            best_params: params.clone(),
            best_cost: initial_cost,
            costs: vec![initial_cost],
            best_costs: vec![initial_cost],
        };
        info!(
            steps = self.config.steps,
            initial_cost, "starting iterative search"
        );

        let mut stale_steps = 0;
        for step in 0..self.config.steps {
            params = optimizer.propose(cost, &params)?;
            let new_cost = cost(&params)?;

            let previous_best = outcome.best_cost;
            if new_cost < outcome.best_cost {
                outcome.best_cost = new_cost;
                outcome.best_params = params.clone();
            }
            outcome.costs.push(new_cost);
            outcome.best_costs.push(outcome.best_cost);
            debug!(step, cost = new_cost, best_cost = outcome.best_cost, "search step");

            if let Some(early_stop) = &self.config.early_stop {
                if previous_best - outcome.best_cost > early_stop.min_improvement {
                    stale_steps = 0;
                } else {
                    stale_steps += 1;
                }
                if stale_steps >= early_stop.patience {
                    info!(step, "best cost stalled, stopping early");
                    break;
                }
            }
        }

        info!(
            best_cost = outcome.best_cost,
            best_params = ?outcome.best_params,
            "iterative search finished"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    /// Walks through a scripted list of proposals, ignoring the cost.
    struct Scripted {
        proposals: Vec<Vec<f64>>,
        next: usize,
    }

    impl Optimizer for Scripted {
        fn propose(
            &mut self,
            _cost: &dyn Fn(&[f64]) -> Result<f64>,
            _params: &[f64],
        ) -> Result<Vec<f64>> {
            let proposal = self.proposals[self.next % self.proposals.len()].clone();
            self.next += 1;
            Ok(proposal)
        }
    }

    fn parabola(p: &[f64]) -> Result<f64> {
        Ok(p.iter().map(|x| (x - 1.0).powi(2)).sum())
    }

    #[test]
    fn test_best_is_kept_when_later_steps_worsen() -> Result<()> {
        let mut optimizer = Scripted {
            proposals: vec![vec![0.5], vec![1.0], vec![3.0], vec![0.9]],
            next: 0,
        };
        let outcome = IterativeSearch::new(SearchConfig::new(4)).run(&mut optimizer, &parabola, 1)?;

        assert_eq!(vec![1.0], outcome.best_params);
        assert_eq!(0.0, outcome.best_cost);
        assert_eq!(5, outcome.costs.len());
        assert_eq!(vec![1.0, 0.25, 0.0, 0.0, 0.0], outcome.best_costs);
        assert_eq!(4, outcome.steps_run());

        Ok(())
    }

    #[test]
    fn test_best_costs_never_increase() -> Result<()> {
        let mut optimizer = Scripted {
            proposals: vec![vec![2.0, -1.0], vec![0.3, 0.4], vec![5.0, 5.0], vec![1.1, 0.9]],
            next: 0,
        };
        let outcome =
            IterativeSearch::new(SearchConfig::new(12)).run(&mut optimizer, &parabola, 2)?;

        assert!(outcome.best_costs.windows(2).all(|w| w[1] <= w[0]));
        for (cost, best) in outcome.costs.iter().zip(&outcome.best_costs) {
            assert!(best <= cost);
        }

        Ok(())
    }

    #[test]
    fn test_fixed_budget_runs_every_step() -> Result<()> {
        let evaluations = Cell::new(0);
        let cost = |p: &[f64]| -> Result<f64> {
            evaluations.set(evaluations.get() + 1);
            parabola(p)
        };
        let mut optimizer = Scripted {
            proposals: vec![vec![1.0]],
            next: 0,
        };
        let outcome = IterativeSearch::new(SearchConfig::new(30)).run(&mut optimizer, &cost, 1)?;

        assert_eq!(30, outcome.steps_run());
        assert_eq!(31, evaluations.get());

        Ok(())
    }

    #[test]
    fn test_early_stop() -> Result<()> {
        let mut optimizer = Scripted {
            proposals: vec![vec![1.0]],
            next: 0,
        };
        let config = SearchConfig {
            steps: 100,
            early_stop: Some(EarlyStop {
                patience: 3,
                min_improvement: 1e-9,
            }),
        };
        let outcome = IterativeSearch::new(config).run(&mut optimizer, &parabola, 1)?;

        // one improving step, then three stale ones
        assert_eq!(4, outcome.steps_run());
        assert_eq!(0.0, outcome.best_cost);

        Ok(())
    }

    #[test]
    fn test_cost_errors_abort() {
        let failing = |_: &[f64]| -> Result<f64> { Err(anyhow::anyhow!("no shots")) };
        let mut optimizer = Scripted {
            proposals: vec![vec![1.0]],
            next: 0,
        };
        let result = IterativeSearch::new(SearchConfig::new(5)).run(&mut optimizer, &failing, 1);
        assert!(result.is_err());
    }
}
