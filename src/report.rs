use crate::grid::GridOutcome;
use crate::search::SearchOutcome;

/// Renders `[a b c]` the way numpy prints a 1-D array.
pub fn format_params(params: &[f64]) -> String {
    let values = params
        .iter()
        .map(|p| format!("{:.8}", p))
        .collect::<Vec<_>>()
        .join(" ");
    format!("[{}]", values)
}

pub fn search_report(outcome: &SearchOutcome) -> String {
    format_params(&outcome.best_params)
}

pub fn grid_report(outcome: &GridOutcome) -> String {
    format!(
        "{}\n{}",
        format_params(&outcome.best_params),
        outcome.best_cost
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_params() {
        assert_eq!("[]", format_params(&[]));
        assert_eq!("[0.50000000]", format_params(&[0.5]));
        assert_eq!(
            "[0.39269908 -3.14159265]",
            format_params(&[0.125 * std::f64::consts::PI, -std::f64::consts::PI])
        );
    }

    #[test]
    fn test_grid_report_includes_cost() {
        let outcome = GridOutcome {
            best_params: vec![0.0, 1.0],
            best_cost: 0.25,
            evaluated: Vec::new(),
        };
        assert_eq!("[0.00000000 1.00000000]\n0.25", grid_report(&outcome));
    }
}
