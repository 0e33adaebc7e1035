//! Engine configuration
//!
//! Every field has a built-in default. A JSON file only needs the values it
//! overrides:
//!
//! ```json
//! { "simulation": { "max_months": 360 }, "returns": { "moderate": "0.065" } }
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::debt::SimulationConfig;
use crate::error::{EngineError, EngineResult};
use crate::projection::{ReturnAssumptions, RetirementAssumptions, DEFAULT_PROJECTION_YEARS};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Payoff simulation limits
    pub simulation: SimulationConfig,

    /// Expected returns by risk tolerance
    pub returns: ReturnAssumptions,

    /// Retirement and Social Security placeholders
    pub retirement: RetirementAssumptions,

    /// Years in the net worth projection
    pub projection_years: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            returns: ReturnAssumptions::default(),
            retirement: RetirementAssumptions::default(),
            projection_years: DEFAULT_PROJECTION_YEARS,
        }
    }
}

impl EngineConfig {
    /// Load from a JSON file, filling unspecified fields with defaults
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("open config {}", path.display()))?;
        let config: Self = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parse config {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("parse config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.simulation.max_months == 0 {
            return Err(EngineError::invalid("simulation.max_months", "must be at least 1"));
        }
        self.returns.validate()?;
        self.retirement.validate()
    }
}
