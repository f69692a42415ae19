//! Assessment criteria loader
//!
//! Handles loading and parsing of time-versioned means assessment criteria
//! (thresholds, weighting factors, living allowance and child weightings)
//! from YAML.
//!
//! # Format
//!
//! ```yaml
//! criteria:
//!   - id: 34
//!     date_from: '2016-04-11'
//!     date_to: '2022-04-10'
//!     applicant_weighting_factor: '1.00'
//!     partner_weighting_factor: '0.64'
//!     initial_lower_threshold: '12475.00'
//!     initial_upper_threshold: '22325.00'
//!     full_threshold: '3398.00'
//!     eligibility_threshold: '37500.00'
//!     living_allowance: '5676.00'
//!     child_weightings:
//!       - id: 37
//!         lower_age_range: 0
//!         upper_age_range: 1
//!         weighting_factor: '0.15'
//! ```
//!
//! Amounts are quoted so they are parsed as exact decimals.
//!
//! # Security Considerations
//!
//! - **YAML size limits**: see [`config::MAX_YAML_SIZE`]
//! - **Row and band limits**: see [`config::MAX_CRITERIA_ROWS`] and
//!   [`config::MAX_CHILD_WEIGHTINGS`]

use crate::config;
use crate::error::{EngineError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Weighting applied for each dependent child within an age band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildWeighting {
    pub id: i32,
    pub lower_age_range: u32,
    pub upper_age_range: u32,
    pub weighting_factor: Decimal,
}

/// Thresholds and weighting factors in force for a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentCriteria {
    pub id: i32,
    /// First day the row applies (inclusive)
    pub date_from: NaiveDate,
    /// Last day the row applies (inclusive); open-ended when absent
    #[serde(default)]
    pub date_to: Option<NaiveDate>,
    pub applicant_weighting_factor: Decimal,
    #[serde(default)]
    pub partner_weighting_factor: Decimal,
    pub initial_lower_threshold: Decimal,
    pub initial_upper_threshold: Decimal,
    pub full_threshold: Decimal,
    pub eligibility_threshold: Decimal,
    pub living_allowance: Decimal,
    #[serde(default)]
    pub child_weightings: Vec<ChildWeighting>,
}

impl AssessmentCriteria {
    /// Check whether this row is in force on the given date.
    pub fn is_in_force(&self, date: NaiveDate) -> bool {
        self.date_from <= date && self.date_to.is_none_or(|to| date <= to)
    }

    /// Check whether two rows have overlapping validity ranges.
    pub fn overlaps(&self, other: &AssessmentCriteria) -> bool {
        let self_ends_before = self.date_to.is_some_and(|to| to < other.date_from);
        let other_ends_before = other.date_to.is_some_and(|to| to < self.date_from);
        !self_ends_before && !other_ends_before
    }

    pub fn find_child_weighting(&self, id: i32) -> Option<&ChildWeighting> {
        self.child_weightings.iter().find(|cw| cw.id == id)
    }

    pub fn find_child_weighting_by_band(&self, lower: u32, upper: u32) -> Option<&ChildWeighting> {
        self.child_weightings
            .iter()
            .find(|cw| cw.lower_age_range == lower && cw.upper_age_range == upper)
    }

    /// Validate the internal consistency of a single row.
    pub fn validate(&self) -> Result<()> {
        if let Some(to) = self.date_to {
            if to < self.date_from {
                return Err(EngineError::LoadError(format!(
                    "Criteria {} ends ({}) before it starts ({})",
                    self.id, to, self.date_from
                )));
            }
        }

        if self.initial_lower_threshold > self.initial_upper_threshold {
            return Err(EngineError::LoadError(format!(
                "Criteria {} has a lower threshold above its upper threshold",
                self.id
            )));
        }

        if self.applicant_weighting_factor <= Decimal::ZERO {
            return Err(EngineError::LoadError(format!(
                "Criteria {} must have a positive applicant weighting factor",
                self.id
            )));
        }

        if self.child_weightings.len() > config::MAX_CHILD_WEIGHTINGS {
            return Err(EngineError::LoadError(format!(
                "Too many child weightings in criteria {} ({}, max {})",
                self.id,
                self.child_weightings.len(),
                config::MAX_CHILD_WEIGHTINGS
            )));
        }

        let mut ids = HashSet::new();
        for cw in &self.child_weightings {
            if !ids.insert(cw.id) {
                return Err(EngineError::LoadError(format!(
                    "Duplicate child weighting id {} in criteria {}",
                    cw.id, self.id
                )));
            }
            if cw.lower_age_range > cw.upper_age_range {
                return Err(EngineError::LoadError(format!(
                    "Child weighting {} has an inverted age band",
                    cw.id
                )));
            }
        }

        Ok(())
    }
}

/// A complete criteria table as stored in YAML.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CriteriaTable {
    #[serde(default)]
    pub criteria: Vec<AssessmentCriteria>,
}

impl CriteriaTable {
    /// Load a criteria table from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, exceeds
    /// [`config::MAX_YAML_SIZE`], or fails [`Self::from_yaml_str`].
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        let metadata = fs::metadata(path_ref).map_err(|_| {
            // Sanitized error message - don't expose path details
            EngineError::LoadError("Failed to access criteria file".to_string())
        })?;

        let file_size = metadata.len() as usize;
        if file_size > config::MAX_YAML_SIZE {
            tracing::warn!(
                size = file_size,
                max = config::MAX_YAML_SIZE,
                "Criteria file exceeds size limit"
            );
            return Err(EngineError::LoadError(format!(
                "File exceeds maximum size limit ({} bytes)",
                config::MAX_YAML_SIZE
            )));
        }

        let content = fs::read_to_string(path_ref)
            .map_err(|_| EngineError::LoadError("Failed to read criteria file".to_string()))?;

        Self::from_yaml_str(&content)
    }

    /// Parse a criteria table from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Content exceeds size limit
    /// - YAML is invalid
    /// - A row is inconsistent or rows overlap in time
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.len() > config::MAX_YAML_SIZE {
            tracing::warn!(
                size = content.len(),
                max = config::MAX_YAML_SIZE,
                "YAML content exceeds size limit"
            );
            return Err(EngineError::LoadError(format!(
                "YAML content exceeds maximum size limit ({} bytes)",
                config::MAX_YAML_SIZE
            )));
        }

        let table: Self = serde_yaml_ng::from_str(content)?;
        table.validate()?;

        tracing::debug!(rows = table.criteria.len(), "Parsed criteria table");

        Ok(table)
    }

    /// Validate every row and the non-overlap of validity ranges.
    pub fn validate(&self) -> Result<()> {
        if self.criteria.len() > config::MAX_CRITERIA_ROWS {
            return Err(EngineError::LoadError(format!(
                "Too many criteria rows ({}, max {})",
                self.criteria.len(),
                config::MAX_CRITERIA_ROWS
            )));
        }

        for row in &self.criteria {
            row.validate()?;
        }

        for (i, a) in self.criteria.iter().enumerate() {
            for b in &self.criteria[i + 1..] {
                if a.overlaps(b) {
                    return Err(EngineError::LoadError(format!(
                        "Criteria {} and {} have overlapping validity ranges",
                        a.id, b.id
                    )));
                }
            }
        }

        Ok(())
    }
}
