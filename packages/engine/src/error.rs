//! Error types for the means assessment engine

use chrono::NaiveDate;
use thiserror::Error;

/// Main error type for engine operations
#[derive(Error, Debug)]
pub enum EngineError {
    /// Failed to load or parse a criteria table
    #[error("Failed to load criteria: {0}")]
    LoadError(String),

    /// YAML parsing error
    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Missing or malformed runtime configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// No criteria row is in force on the assessment date
    #[error("No assessment criteria found for date {date}")]
    CriteriaNotFound { date: NaiveDate },

    /// A criteria child weighting has no declared count
    #[error("Child weightings missing for criteria: {0}")]
    ChildWeightingsMissing(i32),

    /// A declared count refers to a weighting the criteria does not define
    #[error("Invalid child weighting id: {0}")]
    InvalidChildWeighting(i32),

    /// A declared age band does not match any criteria child weighting
    #[error("No child weighting for age band {lower}-{upper}")]
    UnknownAgeBand { lower: u32, upper: u32 },

    /// Other request validation failures
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Financial assessment id not known to the history collaborator
    #[error("Financial assessment not found: {0}")]
    AssessmentNotFound(i64),

    /// No assessment history held for the case
    #[error("Assessment history not found for case: {0}")]
    HistoryNotFound(i64),

    /// The assessment being checked is absent from its own case history
    #[error("Initial assessment {assessment_id} not found in history of case {case_id}")]
    InitialAssessmentNotInHistory { case_id: i64, assessment_id: i64 },

    /// Invalid date format
    #[error("Invalid date format: {0}")]
    InvalidDate(String),
}

impl EngineError {
    /// Whether this error means a referenced record does not exist.
    ///
    /// Lets a transport layer map lookup failures separately from
    /// validation failures.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            EngineError::CriteriaNotFound { .. }
                | EngineError::AssessmentNotFound(_)
                | EngineError::HistoryNotFound(_)
                | EngineError::InitialAssessmentNotInHistory { .. }
        )
    }

    /// Whether this error was caused by the request content.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EngineError::ChildWeightingsMissing(_)
                | EngineError::InvalidChildWeighting(_)
                | EngineError::UnknownAgeBand { .. }
                | EngineError::Validation(_)
        )
    }
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
