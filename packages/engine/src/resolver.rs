//! Criteria registry with date-based version selection
//!
//! Provides the [`CriteriaSource`] seam the engine uses to answer "which
//! criteria apply on date D", and [`CriteriaRegistry`], an in-memory
//! implementation backed by loaded [`CriteriaTable`]s.
//!
//! # Version Selection
//!
//! Each row has an inclusive `date_from` and optional inclusive `date_to`.
//! Rows never overlap (checked on load), so at most one row is in force for
//! any date. A date with no row in force is a [`EngineError::CriteriaNotFound`]
//! error rather than an empty result.
//!
//! # Security
//!
//! The registry enforces [`config::MAX_CRITERIA_ROWS`] to prevent memory
//! exhaustion.

use crate::config;
use crate::criteria::{AssessmentCriteria, CriteriaTable};
use crate::error::{EngineError, Result};
use chrono::NaiveDate;
use std::path::Path;

/// Collaborator that resolves the criteria row effective on a date.
///
/// Implement this trait to back the engine with a database or a remote
/// reference-data service. The default implementation is [`CriteriaRegistry`].
pub trait CriteriaSource: Send + Sync {
    /// Get the criteria row in force on `date`.
    ///
    /// # Errors
    ///
    /// [`EngineError::CriteriaNotFound`] when no row covers the date.
    fn criteria_for_date(&self, date: NaiveDate) -> Result<AssessmentCriteria>;
}

/// In-memory registry of criteria rows.
///
/// Rows are kept sorted by `date_from` (newest first).
///
/// ```ignore
/// let mut registry = CriteriaRegistry::new();
/// registry.load_from_yaml(yaml_str)?;
///
/// let criteria = registry.criteria_for_date(date)?;
/// ```
#[derive(Debug, Default)]
pub struct CriteriaRegistry {
    rows: Vec<AssessmentCriteria>,
}

impl CriteriaRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Load a single criteria row.
    ///
    /// A row with the same id replaces the existing one.
    ///
    /// # Errors
    ///
    /// Returns error if the row is invalid, overlaps another row, or the
    /// maximum number of rows would be exceeded.
    pub fn load_criteria(&mut self, criteria: AssessmentCriteria) -> Result<()> {
        criteria.validate()?;

        let existing_idx = self.rows.iter().position(|r| r.id == criteria.id);
        if existing_idx.is_none() && self.rows.len() >= config::MAX_CRITERIA_ROWS {
            tracing::warn!(
                current = self.rows.len(),
                max = config::MAX_CRITERIA_ROWS,
                criteria_id = criteria.id,
                "Maximum criteria row count exceeded"
            );
            return Err(EngineError::LoadError(format!(
                "Maximum number of criteria rows exceeded ({} rows)",
                config::MAX_CRITERIA_ROWS
            )));
        }

        if let Some(clash) = self
            .rows
            .iter()
            .find(|r| r.id != criteria.id && r.overlaps(&criteria))
        {
            return Err(EngineError::LoadError(format!(
                "Criteria {} and {} have overlapping validity ranges",
                clash.id, criteria.id
            )));
        }

        match existing_idx {
            Some(idx) => {
                tracing::debug!(criteria_id = criteria.id, "Replacing existing criteria row");
                self.rows[idx] = criteria;
            }
            None => {
                tracing::debug!(
                    criteria_id = criteria.id,
                    date_from = %criteria.date_from,
                    "Adding criteria row"
                );
                self.rows.push(criteria);
            }
        }

        self.rows.sort_by(|a, b| b.date_from.cmp(&a.date_from));
        Ok(())
    }

    /// Load every row of a table.
    ///
    /// Returns the number of rows loaded.
    pub fn load_table(&mut self, table: CriteriaTable) -> Result<usize> {
        let count = table.criteria.len();
        for row in table.criteria {
            self.load_criteria(row)?;
        }
        tracing::debug!(loaded = count, total = self.rows.len(), "Criteria table loaded");
        Ok(count)
    }

    /// Load a criteria table from a YAML string.
    pub fn load_from_yaml(&mut self, yaml: &str) -> Result<usize> {
        self.load_table(CriteriaTable::from_yaml_str(yaml)?)
    }

    /// Load a criteria table from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        self.load_table(CriteriaTable::from_yaml_file(path)?)
    }

    /// Get the row in force on `date`, if any.
    pub fn get_for_date(&self, date: NaiveDate) -> Option<&AssessmentCriteria> {
        self.rows.iter().find(|r| r.is_in_force(date))
    }

    pub fn get(&self, id: i32) -> Option<&AssessmentCriteria> {
        self.rows.iter().find(|r| r.id == id)
    }

    /// List loaded criteria ids, newest first.
    pub fn list_criteria(&self) -> Vec<i32> {
        self.rows.iter().map(|r| r.id).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Remove a criteria row.
    ///
    /// # Returns
    /// `true` if the row was removed, `false` if it didn't exist.
    pub fn unload_criteria(&mut self, id: i32) -> bool {
        let before = self.rows.len();
        self.rows.retain(|r| r.id != id);
        self.rows.len() < before
    }
}

impl CriteriaSource for CriteriaRegistry {
    fn criteria_for_date(&self, date: NaiveDate) -> Result<AssessmentCriteria> {
        self.get_for_date(date).cloned().ok_or_else(|| {
            tracing::warn!(date = %date, "No criteria in force");
            EngineError::CriteriaNotFound { date }
        })
    }
}

/// Parse a date string in ISO 8601 format (YYYY-MM-DD).
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| EngineError::InvalidDate(format!("'{}': {}", s, e)))
}
