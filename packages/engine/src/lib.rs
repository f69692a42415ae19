//! Crime Means Engine
//!
//! A Rust implementation of the criminal legal aid means assessment.
//! This library provides functionality for:
//! - Loading dated assessment criteria tables (YAML)
//! - Annualising income and expenditure declarations
//! - Initial (gross income) and full (disposable income) assessments
//! - Full assessment availability, Crown Court eligibility and completion decisions
//!
//! # Example
//!
//! ```ignore
//! use crime_means_engine::{CriteriaRegistry, InMemoryAssessmentHistory, MeansAssessmentService};
//!
//! let mut registry = CriteriaRegistry::new();
//! registry.load_from_file("criteria/crime_means_criteria.yaml")?;
//! let history = InMemoryAssessmentHistory::new();
//!
//! let outcome = MeansAssessmentService::new(&registry, &history).assess(&request)?;
//! ```

pub mod aggregation;
pub mod availability;
pub mod child_weighting;
pub mod completion;
pub mod config;
pub mod criteria;
pub mod data_source;
pub mod eligibility;
pub mod error;
pub mod full;
pub mod initial;
pub mod resolver;
pub mod selector;
pub mod service;
pub mod types;

// Re-export commonly used items
pub use aggregation::{
    aggregate_section, aggregate_sections, annual_amount, AggregatedTotals, AssessmentDetail,
    SectionSummary, SectionTotals,
};
pub use availability::{failed_case_can_proceed, is_full_assessment_available, AvailabilityInput};
pub use child_weighting::{
    complete_counts, counts_from_declarations, declarations_from_counts, total_child_weighting,
    validate_counts, ChildDeclaration, ChildWeightingCount,
};
pub use completion::{CompletionDecider, CompletionInput};
pub use config::EngineConfig;
pub use criteria::{AssessmentCriteria, ChildWeighting, CriteriaTable};
pub use data_source::{
    AssessmentHistory, AssessmentHistorySource, FinancialAssessmentRecord,
    InMemoryAssessmentHistory, PassportAssessmentRecord,
};
pub use eligibility::{CrownCourtEligibilityChecker, EligibilityCheckInput, PriorAssessment};
pub use error::{EngineError, Result};
pub use full::{FullAssessment, FullAssessmentEngine};
pub use initial::{InitialAssessment, InitialAssessmentEngine};
pub use resolver::{parse_date, CriteriaRegistry, CriteriaSource};
pub use selector::{select_criteria, select_criteria_for_context};
pub use service::{MeansAssessmentOutcome, MeansAssessmentRequest, MeansAssessmentService};
pub use types::{
    AssessmentContext, AssessmentType, CaseType, CurrentStatus, Frequency, FullAssessmentResult,
    InitAssessmentResult, MagCourtOutcome, NewWorkReason, PassportAssessmentResult,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
