//! Completion decision
//!
//! An assessment submitted as COMPLETE is only marked complete (and given a
//! completion date) when nothing further can follow it.

use crate::availability::failed_case_can_proceed;
use crate::data_source::AssessmentHistorySource;
use crate::error::Result;
use crate::types::{AssessmentType, CaseType, CurrentStatus, InitAssessmentResult, MagCourtOutcome};

/// Inputs to the completion decision.
#[derive(Debug, Clone, Copy)]
pub struct CompletionInput {
    pub assessment_status: CurrentStatus,
    pub assessment_type: AssessmentType,
    pub init_result: InitAssessmentResult,
    pub case_type: CaseType,
    pub mag_court_outcome: Option<MagCourtOutcome>,
    pub financial_assessment_id: Option<i64>,
}

pub struct CompletionDecider<'a> {
    history_source: &'a dyn AssessmentHistorySource,
}

impl<'a> CompletionDecider<'a> {
    pub fn new(history_source: &'a dyn AssessmentHistorySource) -> Self {
        Self { history_source }
    }

    /// Whether the assessment should be marked complete.
    ///
    /// A FULL assessment is looked up through the history source; errors
    /// from that lookup propagate.
    pub fn is_completion_required(&self, input: &CompletionInput) -> Result<bool> {
        if input.assessment_status != CurrentStatus::Complete {
            return Ok(false);
        }

        let required = match input.assessment_type {
            AssessmentType::Init => match input.init_result {
                InitAssessmentResult::Pass => true,
                InitAssessmentResult::Fail => {
                    !failed_case_can_proceed(input.case_type, input.mag_court_outcome)
                }
                _ => false,
            },
            AssessmentType::Full => match input.financial_assessment_id {
                Some(id) => self
                    .history_source
                    .find_financial_assessment(id)?
                    .date_completed
                    .is_none(),
                None => true,
            },
        };

        tracing::debug!(
            assessment_type = ?input.assessment_type,
            init_result = %input.init_result,
            assessment_id = ?input.financial_assessment_id,
            required,
            "Completion decided"
        );

        Ok(required)
    }
}
