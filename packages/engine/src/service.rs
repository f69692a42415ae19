//! Service layer for means assessments
//!
//! `MeansAssessmentService` runs one assessment request through criteria
//! selection, income aggregation, the initial assessment and (when requested
//! and available) the full assessment, then decides completion.
//!
//! The service holds no state of its own: criteria and case history come
//! from the two collaborator seams it is constructed with.
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
//! let service = MeansAssessmentService::new(&registry, &history);
//! let outcome = service.assess(&request)?;
//! println!("{}", outcome.initial.result);
//! ```

use crate::aggregation::{aggregate_sections, AggregatedTotals, SectionSummary};
use crate::availability::{is_full_assessment_available, AvailabilityInput};
use crate::child_weighting::{
    declarations_from_counts, total_child_weighting, ChildDeclaration, ChildWeightingCount,
};
use crate::completion::{CompletionDecider, CompletionInput};
use crate::data_source::AssessmentHistorySource;
use crate::eligibility::{CrownCourtEligibilityChecker, EligibilityCheckInput};
use crate::error::Result;
use crate::full::{FullAssessment, FullAssessmentEngine};
use crate::initial::{InitialAssessment, InitialAssessmentEngine};
use crate::resolver::CriteriaSource;
use crate::selector::select_criteria_for_context;
use crate::types::{AssessmentContext, AssessmentType, CurrentStatus};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A request to assess the means of one applicant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeansAssessmentRequest {
    pub case_id: i64,
    /// Id of the stored assessment being made, if it has one yet
    #[serde(default)]
    pub financial_assessment_id: Option<i64>,
    pub assessment_type: AssessmentType,
    pub assessment_status: CurrentStatus,
    pub context: AssessmentContext,
    #[serde(default)]
    pub income_sections: Vec<SectionSummary>,
    #[serde(default)]
    pub expenditure_sections: Vec<SectionSummary>,
    #[serde(default)]
    pub child_weightings: Vec<ChildWeightingCount>,
    /// Set when a full assessment has been made before (re-assessment)
    #[serde(default)]
    pub full_assessment_date: Option<NaiveDateTime>,
}

/// Result of a means assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeansAssessmentOutcome {
    pub case_id: i64,
    pub financial_assessment_id: Option<i64>,
    pub criteria_id: i32,
    pub income: AggregatedTotals,
    pub initial: InitialAssessment,
    pub full_assessment_available: bool,
    pub eligibility_check_required: bool,
    pub expenditure: Option<AggregatedTotals>,
    pub full: Option<FullAssessment>,
    pub completion_required: bool,
    pub date_completed: Option<NaiveDateTime>,
    /// Child weightings in wire form, one entry per band
    pub child_weightings: Vec<ChildDeclaration>,
}

/// Orchestrates a means assessment against the collaborator seams.
pub struct MeansAssessmentService<'a> {
    criteria_source: &'a dyn CriteriaSource,
    history_source: &'a dyn AssessmentHistorySource,
}

impl<'a> MeansAssessmentService<'a> {
    /// Create a new service over borrowed collaborators.
    pub fn new(
        criteria_source: &'a dyn CriteriaSource,
        history_source: &'a dyn AssessmentHistorySource,
    ) -> Self {
        Self {
            criteria_source,
            history_source,
        }
    }

    /// Run the assessment.
    ///
    /// # Errors
    ///
    /// - criteria lookup errors ([`crate::EngineError::CriteriaNotFound`])
    /// - child weighting validation errors
    /// - [`crate::EngineError::Validation`] when an amount overflows
    /// - history lookup errors from the eligibility check or completion
    ///   decision, unchanged
    pub fn assess(&self, request: &MeansAssessmentRequest) -> Result<MeansAssessmentOutcome> {
        let context = &request.context;
        let criteria = select_criteria_for_context(self.criteria_source, context)?;

        let child_weighting = total_child_weighting(&criteria, &request.child_weightings)?;
        let income = aggregate_sections(&request.income_sections)?;

        let initial = InitialAssessmentEngine::new(&criteria).evaluate(
            income.total,
            child_weighting,
            context.new_work_reason.as_ref(),
        )?;

        let full_assessment_available = is_full_assessment_available(&AvailabilityInput {
            case_type: context.case_type,
            mag_court_outcome: context.mag_court_outcome,
            new_work_reason: context.new_work_reason.as_ref(),
            init_result: Some(initial.result),
            full_assessment_date: request.full_assessment_date,
        });

        let mut eligibility_check_required = context.eligibility_check_required;
        let mut expenditure = None;
        let mut full = None;

        if request.assessment_type == AssessmentType::Full {
            if full_assessment_available {
                eligibility_check_required |= CrownCourtEligibilityChecker::new(self.history_source)
                    .is_check_required(&EligibilityCheckInput {
                        case_id: request.case_id,
                        financial_assessment_id: request.financial_assessment_id,
                        case_type: context.case_type,
                        mag_court_outcome: context.mag_court_outcome,
                        init_result: Some(initial.result),
                    })?;

                let totals = aggregate_sections(&request.expenditure_sections)?;
                full = Some(FullAssessmentEngine::new(&criteria).evaluate(
                    income.total,
                    totals.total,
                    child_weighting,
                    eligibility_check_required,
                )?);
                expenditure = Some(totals);
            } else {
                tracing::warn!(
                    case_id = request.case_id,
                    init_result = %initial.result,
                    "Full assessment requested but not available"
                );
            }
        }

        let completion_required = CompletionDecider::new(self.history_source)
            .is_completion_required(&CompletionInput {
                assessment_status: request.assessment_status,
                assessment_type: request.assessment_type,
                init_result: initial.result,
                case_type: context.case_type,
                mag_court_outcome: context.mag_court_outcome,
                financial_assessment_id: request.financial_assessment_id,
            })?;
        let date_completed = completion_required.then_some(context.assessment_date);

        tracing::info!(
            case_id = request.case_id,
            criteria_id = criteria.id,
            init_result = %initial.result,
            full_result = ?full.as_ref().map(|f| f.result),
            completion_required,
            "Means assessment completed"
        );

        Ok(MeansAssessmentOutcome {
            case_id: request.case_id,
            financial_assessment_id: request.financial_assessment_id,
            criteria_id: criteria.id,
            income,
            initial,
            full_assessment_available,
            eligibility_check_required,
            expenditure,
            full,
            completion_required,
            date_completed,
            child_weightings: declarations_from_counts(&criteria, &request.child_weightings),
        })
    }
}
