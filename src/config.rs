//! Experiment configuration.
//!
//! Defaults describe the reference SWAP-test runs: 100 or 1000 shots, 1000 or 100 steps, a
//! reference at `(π/8, π/4)` and a `{0, π}` grid. A YAML file can override any subset of fields,
//! and a couple of environment variables are applied last.

use std::env;
use std::f64::consts::PI;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::prepare::ReferenceState;
use crate::search::{EarlyStop, SearchConfig};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// RNG seed for the simulator; random when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "IterativeConfig::angles")]
    pub angles: IterativeConfig,

    #[serde(default = "IterativeConfig::amplitudes")]
    pub amplitudes: IterativeConfig,

    #[serde(default)]
    pub grid: GridConfig,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            seed: None,
            log_level: default_log_level(),
            angles: IterativeConfig::angles(),
            amplitudes: IterativeConfig::amplitudes(),
            grid: GridConfig::default(),
        }
    }
}

impl ExperimentConfig {
    /// Load configuration from an optional YAML file, then apply environment overrides.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                Self::from_yaml(&content)?
            }
            None => Self::default(),
        };

        config.apply_overrides(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse experiment config")
    }

    /// Applies `SWAPTEST_SEED` and `SWAPTEST_LOG_LEVEL` as resolved by `lookup`.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(val) = lookup("SWAPTEST_SEED") {
            let seed = val.parse().with_context(|| {
                format!("SWAPTEST_SEED must be an unsigned integer, got {val:?}")
            })?;
            self.seed = Some(seed);
        }
        if let Some(val) = lookup("SWAPTEST_LOG_LEVEL") {
            self.log_level = val;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.angles.validate().context("invalid `angles` section")?;
        self.amplitudes
            .validate()
            .context("invalid `amplitudes` section")?;
        self.grid.validate().context("invalid `grid` section")?;
        Ok(())
    }
}

/// A single-register experiment driven by the iterative search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IterativeConfig {
    pub reference: ReferenceState,
    pub shots: usize,
    pub steps: usize,
    #[serde(default)]
    pub early_stop: Option<EarlyStop>,
}

impl IterativeConfig {
    pub const T0: f64 = 0.125 * PI;
    pub const P0: f64 = 0.25 * PI;

    /// Reference prepared by `RY(t0)`, `RZ(p0)`, 100 shots, 1000 steps.
    pub fn angles() -> Self {
        Self {
            reference: ReferenceState::Angles {
                theta: Self::T0,
                phi: Self::P0,
            },
            shots: 100,
            steps: 1000,
            early_stop: None,
        }
    }

    /// The same reference injected as literal amplitudes, 1000 shots, 100 steps.
    pub fn amplitudes() -> Self {
        Self {
            reference: ReferenceState::from_angles_as_amplitudes(Self::T0, Self::P0),
            shots: 1000,
            steps: 100,
            early_stop: None,
        }
    }

    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            steps: self.steps,
            early_stop: self.early_stop.clone(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.shots == 0 {
            return Err(anyhow::anyhow!("shots must be greater than zero"));
        }
        if self.steps == 0 {
            return Err(anyhow::anyhow!("steps must be greater than zero"));
        }
        if let Some(early_stop) = &self.early_stop {
            if early_stop.patience == 0 {
                return Err(anyhow::anyhow!("early_stop.patience must be at least one step"));
            }
        }
        if self.reference.num_of_blocks() != 1 {
            return Err(anyhow::anyhow!(
                "iterative experiments use a single-qubit reference"
            ));
        }
        self.reference.validate()
    }
}

/// The multi-register experiment searched exhaustively over `values^len(bits)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Basis state to recover, one bit per SWAP-test block.
    #[serde(default = "default_grid_bits")]
    pub bits: String,
    #[serde(default = "default_grid_values")]
    pub values: Vec<f64>,
    #[serde(default = "default_grid_shots")]
    pub shots: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            bits: default_grid_bits(),
            values: default_grid_values(),
            shots: default_grid_shots(),
        }
    }
}

impl GridConfig {
    pub fn validate(&self) -> Result<()> {
        if self.shots == 0 {
            return Err(anyhow::anyhow!("shots must be greater than zero"));
        }
        if self.values.is_empty() {
            return Err(anyhow::anyhow!("grid values must not be empty"));
        }
        ReferenceState::Basis(self.bits.clone()).validate()
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_grid_bits() -> String {
    "1011".to_string()
}

fn default_grid_values() -> Vec<f64> {
    vec![0.0, PI]
}

fn default_grid_shots() -> usize {
    1000
}
