//! Plots the per-step cost and the running best cost of the single-register experiment.

use anyhow::Result;
use plotters::prelude::*;
use swap_test_qsim::{
    config::IterativeConfig, experiment::run_iterative, report::search_report, Rotosolve,
    StateVectorSimulator,
};

fn plot_history(costs: &[f64], best_costs: &[f64], file_name: &str) -> Result<()> {
    let root = BitMapBackend::new(file_name, (640, 480)).into_drawing_area();

    let y_max = costs.iter().copied().fold(0.0_f64, f64::max).max(0.1);

    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("SWAP-test cost", ("sans-serif", 20))
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(0..costs.len(), 0.0..y_max)?;

    chart.configure_mesh().x_desc("step").y_desc("cost").draw()?;

    chart
        .draw_series(LineSeries::new(
            costs.iter().enumerate().map(|(i, &c)| (i, c)),
            &BLUE,
        ))?
        .label("cost")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .draw_series(LineSeries::new(
            best_costs.iter().enumerate().map(|(i, &c)| (i, c)),
            &RED,
        ))?
        .label("best cost")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<()> {
    let config = IterativeConfig {
        steps: 200,
        ..IterativeConfig::angles()
    };
    let simulator = StateVectorSimulator::new();

    let outcome = run_iterative(&config, &simulator, &mut Rotosolve::new())?;
    println!("{}", search_report(&outcome));

    plot_history(&outcome.costs, &outcome.best_costs, "cost_history.png")?;
    println!("Cost history saved to 'cost_history.png'.");

    Ok(())
}
