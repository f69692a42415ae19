//! Assessment history data sources
//!
//! The Crown Court eligibility check and the completion decision need the
//! case's earlier means and passported assessments. They reach that data
//! through the [`AssessmentHistorySource`] trait; the case-management system
//! that actually holds it is outside the engine.
//!
//! [`InMemoryAssessmentHistory`] is a map-backed implementation used by the
//! CLI and the tests.
//!
//! # Example
//!
//! ```ignore
//! use crime_means_engine::{AssessmentHistory, InMemoryAssessmentHistory};
//!
//! let mut source = InMemoryAssessmentHistory::new();
//! source.store(AssessmentHistory {
//!     case_id: 5639,
//!     financial_assessments: vec![record],
//!     passport_assessments: vec![],
//!     mags_outcome_date_set: None,
//! });
//!
//! let history = source.find_assessment_history(5639)?;
//! ```

use crate::error::{EngineError, Result};
use crate::types::{
    FullAssessmentResult, InitAssessmentResult, NewWorkReason, PassportAssessmentResult,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A means assessment previously recorded on a case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialAssessmentRecord {
    pub id: i64,
    pub date_created: NaiveDateTime,
    #[serde(default)]
    pub new_work_reason: Option<NewWorkReason>,
    #[serde(default)]
    pub init_result: Option<InitAssessmentResult>,
    #[serde(default)]
    pub full_result: Option<FullAssessmentResult>,
    #[serde(default)]
    pub date_completed: Option<NaiveDateTime>,
    /// Superseded by a later assessment
    #[serde(default)]
    pub replaced: bool,
}

/// A passported (benefit-based) assessment previously recorded on a case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassportAssessmentRecord {
    pub id: i64,
    pub date_created: NaiveDateTime,
    #[serde(default)]
    pub result: Option<PassportAssessmentResult>,
    /// Superseded by a later assessment
    #[serde(default)]
    pub replaced: bool,
}

/// Assessment history of a single case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentHistory {
    pub case_id: i64,
    #[serde(default)]
    pub financial_assessments: Vec<FinancialAssessmentRecord>,
    #[serde(default)]
    pub passport_assessments: Vec<PassportAssessmentRecord>,
    /// When the magistrates' court outcome was recorded
    #[serde(default)]
    pub mags_outcome_date_set: Option<NaiveDateTime>,
}

impl AssessmentHistory {
    pub fn find_financial_assessment(&self, id: i64) -> Option<&FinancialAssessmentRecord> {
        self.financial_assessments.iter().find(|a| a.id == id)
    }
}

/// Collaborator that answers history lookups for the engine.
///
/// Lookups are synchronous; implementations own any retry or timeout
/// policy.
pub trait AssessmentHistorySource: Send + Sync {
    /// Get the assessment history of a case.
    ///
    /// # Errors
    /// [`EngineError::HistoryNotFound`] when the case is unknown.
    fn find_assessment_history(&self, case_id: i64) -> Result<AssessmentHistory>;

    /// Get a single financial assessment by id.
    ///
    /// # Errors
    /// [`EngineError::AssessmentNotFound`] when no assessment has this id.
    fn find_financial_assessment(&self, id: i64) -> Result<FinancialAssessmentRecord>;
}

/// Map-backed history source keyed by case id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAssessmentHistory {
    histories: HashMap<i64, AssessmentHistory>,
}

impl InMemoryAssessmentHistory {
    /// Create a new empty source.
    pub fn new() -> Self {
        Self {
            histories: HashMap::new(),
        }
    }

    /// Create a source from a list of case histories.
    pub fn from_histories(histories: Vec<AssessmentHistory>) -> Self {
        let mut source = Self::new();
        for history in histories {
            source.store(history);
        }
        source
    }

    /// Store (or replace) the history of a case.
    pub fn store(&mut self, history: AssessmentHistory) {
        self.histories.insert(history.case_id, history);
    }

    /// Remove the history of a case.
    ///
    /// # Returns
    /// `true` if a history was removed, `false` if not found.
    pub fn remove(&mut self, case_id: i64) -> bool {
        self.histories.remove(&case_id).is_some()
    }

    /// Get the number of cases held.
    pub fn case_count(&self) -> usize {
        self.histories.len()
    }
}

impl AssessmentHistorySource for InMemoryAssessmentHistory {
    fn find_assessment_history(&self, case_id: i64) -> Result<AssessmentHistory> {
        self.histories
            .get(&case_id)
            .cloned()
            .ok_or(EngineError::HistoryNotFound(case_id))
    }

    fn find_financial_assessment(&self, id: i64) -> Result<FinancialAssessmentRecord> {
        self.histories
            .values()
            .find_map(|h| h.find_financial_assessment(id))
            .cloned()
            .ok_or(EngineError::AssessmentNotFound(id))
    }
}
