//! Exhaustive search over a small discrete lattice.

use anyhow::Result;
use tracing::{debug, info};

/// Cartesian product of `values` over `dims` slots, first slot varying slowest.
pub fn grid_points(values: &[f64], dims: usize) -> Vec<Vec<f64>> {
    let mut points = vec![Vec::with_capacity(dims)];
    for _ in 0..dims {
        points = points
            .into_iter()
            .flat_map(|prefix| {
                values.iter().map(move |&value| {
                    let mut point = prefix.clone();
                    point.push(value);
                    point
                })
            })
            .collect();
    }
    points
}

#[derive(Clone, Debug)]
pub struct GridOutcome {
    pub best_params: Vec<f64>,
    /// Summed block cost of `best_params`.
    pub best_cost: f64,
    /// Every point with its per-block costs, in evaluation order.
    pub evaluated: Vec<(Vec<f64>, Vec<f64>)>,
}

impl GridOutcome {
    pub fn num_of_evaluated(&self) -> usize {
        self.evaluated.len()
    }
}

pub struct GridSearch {
    points: Vec<Vec<f64>>,
}

impl GridSearch {
    pub fn new(values: &[f64], dims: usize) -> Result<Self> {
        if values.is_empty() || dims == 0 {
            return Err(anyhow::anyhow!("Grid needs at least one value and one dimension"));
        }
        Ok(Self {
            points: grid_points(values, dims),
        })
    }

    /// Evaluates every point; ties keep the earliest one.
    pub fn run(&self, block_costs: &dyn Fn(&[f64]) -> Result<Vec<f64>>) -> Result<GridOutcome> {
        info!(points = self.points.len(), "starting grid search");

        let mut evaluated = Vec::with_capacity(self.points.len());
        let mut best: Option<(usize, f64)> = None;
        for (i, point) in self.points.iter().enumerate() {
            let costs = block_costs(point)?;
            let total: f64 = costs.iter().sum();
            debug!(?point, ?costs, total, "grid point");

            if best.map_or(true, |(_, best_cost)| total < best_cost) {
                best = Some((i, total));
            }
            evaluated.push((point.clone(), costs));
        }

        let (best_index, best_cost) =
            best.ok_or_else(|| anyhow::anyhow!("Grid search evaluated no points"))?;
        let best_params = self.points[best_index].clone();
        info!(?best_params, best_cost, "grid search finished");

        Ok(GridOutcome {
            best_params,
            best_cost,
            evaluated,
        })
    }
}
