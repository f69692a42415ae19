//! Configuration for the means assessment engine
//!
//! Compile-time limits guard the criteria loader against oversized or
//! malformed tables. Runtime settings for the binaries are read from the
//! environment through [`EngineConfig::from_env`].

use std::path::PathBuf;

use crate::error::{EngineError, Result};

/// Maximum criteria YAML document size in bytes (1 MB).
///
/// A criteria table holds a few rows per year of policy changes; real tables
/// are a few KB.
pub const MAX_YAML_SIZE: usize = 1_000_000;

/// Maximum number of criteria rows that can be loaded into one registry.
pub const MAX_CRITERIA_ROWS: usize = 500;

/// Maximum number of child weighting bands per criteria row.
pub const MAX_CHILD_WEIGHTINGS: usize = 50;

/// Maximum number of sections, or details per section, in one request.
pub const MAX_SECTION_ENTRIES: usize = 1_000;

/// Decimal places used for annualised money amounts.
pub const MONEY_SCALE: u32 = 2;

/// Environment variable naming the criteria YAML file.
pub const CRITERIA_PATH_VAR: &str = "CRIME_MEANS_CRITERIA_PATH";

/// Runtime configuration for the engine binaries.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Path to the criteria table (YAML)
    pub criteria_path: PathBuf,
}

impl EngineConfig {
    pub fn from_env() -> Result<Self> {
        let criteria_path = std::env::var(CRITERIA_PATH_VAR)
            .map_err(|_| EngineError::Config(format!("{CRITERIA_PATH_VAR} not set")))?;

        if criteria_path.trim().is_empty() {
            return Err(EngineError::Config(format!("{CRITERIA_PATH_VAR} is empty")));
        }

        Ok(Self {
            criteria_path: criteria_path.into(),
        })
    }

    pub fn new(criteria_path: impl Into<PathBuf>) -> Self {
        Self {
            criteria_path: criteria_path.into(),
        }
    }
}
