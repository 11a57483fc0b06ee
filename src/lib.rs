pub mod circuit;
pub mod config;
pub mod cost;
pub mod experiment;
pub mod gates;
pub mod grid;
pub mod observable;
pub mod optimizer;
pub mod prepare;
pub mod qstate;
pub mod report;
pub mod search;
pub mod simulator;
pub mod swap_test;
pub mod test_util;

use num_complex::Complex;

pub type Qbit = Complex<f64>;

pub use circuit::Circuit;
pub use config::ExperimentConfig;
pub use cost::{cost_from_samples, SwapTestCost};
pub use grid::{GridOutcome, GridSearch};
pub use optimizer::{NelderMeadStep, Optimizer, Rotosolve};
pub use prepare::ReferenceState;
pub use qstate::QState;
pub use search::{IterativeSearch, SearchOutcome};
pub use simulator::{Simulator, StateVectorSimulator};
pub use swap_test::SwapTestCircuit;
