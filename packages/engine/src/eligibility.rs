//! Crown Court eligibility check
//!
//! Cases heading for the Crown Court may need the stricter disposable-income
//! eligibility gate applied in the full assessment. The gate is only
//! considered for:
//!
//! - INDICTABLE or CC_ALREADY cases sent for trial, and
//! - EITHER_WAY cases committed for trial.
//!
//! Whether it is required depends on what earlier assessments on the case
//! already established. A prior initial PASS, a prior full PASS or FAIL, or
//! a prior passported PASS is disqualifying: the gate is then not required.

use crate::data_source::{
    AssessmentHistory, AssessmentHistorySource, FinancialAssessmentRecord,
    PassportAssessmentRecord,
};
use crate::error::{EngineError, Result};
use crate::types::{
    CaseType, FullAssessmentResult, InitAssessmentResult, MagCourtOutcome,
    PassportAssessmentResult,
};
use chrono::NaiveDateTime;

/// Inputs to the eligibility check.
#[derive(Debug, Clone, Copy)]
pub struct EligibilityCheckInput {
    pub case_id: i64,
    /// Id of the assessment currently being made
    pub financial_assessment_id: Option<i64>,
    pub case_type: CaseType,
    pub mag_court_outcome: Option<MagCourtOutcome>,
    /// Initial result of the current assessment, when already known
    pub init_result: Option<InitAssessmentResult>,
}

/// A prior assessment of either kind.
#[derive(Debug, Clone, Copy)]
pub enum PriorAssessment<'a> {
    Financial(&'a FinancialAssessmentRecord),
    Passport(&'a PassportAssessmentRecord),
}

impl PriorAssessment<'_> {
    pub fn date_created(&self) -> NaiveDateTime {
        match self {
            PriorAssessment::Financial(a) => a.date_created,
            PriorAssessment::Passport(a) => a.date_created,
        }
    }

    /// Whether this assessment already settles the applicant's position.
    pub fn is_disqualifying(&self) -> bool {
        match self {
            PriorAssessment::Financial(a) => {
                a.init_result == Some(InitAssessmentResult::Pass)
                    || matches!(
                        a.full_result,
                        Some(FullAssessmentResult::Pass) | Some(FullAssessmentResult::Fail)
                    )
            }
            PriorAssessment::Passport(a) => a.result == Some(PassportAssessmentResult::Pass),
        }
    }
}

/// Whether the case type and outcome put the case on a Crown Court
/// trajectory where the check applies at all.
pub fn check_applies(case_type: CaseType, mag_court_outcome: Option<MagCourtOutcome>) -> bool {
    match (case_type, mag_court_outcome) {
        (CaseType::Indictable | CaseType::CcAlready, Some(MagCourtOutcome::SentForTrial)) => true,
        (CaseType::EitherWay, Some(MagCourtOutcome::CommittedForTrial)) => true,
        _ => false,
    }
}

/// Prior assessments on the case, excluding replaced ones and the current
/// assessment.
pub fn prior_assessments(
    history: &AssessmentHistory,
    current_assessment_id: Option<i64>,
) -> Vec<PriorAssessment<'_>> {
    let financial = history
        .financial_assessments
        .iter()
        .filter(|a| !a.replaced && Some(a.id) != current_assessment_id)
        .map(PriorAssessment::Financial);
    let passport = history
        .passport_assessments
        .iter()
        .filter(|a| !a.replaced)
        .map(PriorAssessment::Passport);

    financial.chain(passport).collect()
}

/// Walks the case history to decide whether the eligibility gate applies.
pub struct CrownCourtEligibilityChecker<'a> {
    history_source: &'a dyn AssessmentHistorySource,
}

impl<'a> CrownCourtEligibilityChecker<'a> {
    pub fn new(history_source: &'a dyn AssessmentHistorySource) -> Self {
        Self { history_source }
    }

    /// Decide whether the Crown Court eligibility check is required.
    ///
    /// # Errors
    ///
    /// - history lookup errors from the source, unchanged
    /// - [`EngineError::Validation`] when an either-way committed-for-trial
    ///   check is made without the current assessment id
    /// - [`EngineError::InitialAssessmentNotInHistory`] when the current
    ///   assessment is absent from the case history
    pub fn is_check_required(&self, input: &EligibilityCheckInput) -> Result<bool> {
        if !check_applies(input.case_type, input.mag_court_outcome) {
            return Ok(false);
        }

        let history = self.history_source.find_assessment_history(input.case_id)?;
        let prior = prior_assessments(&history, input.financial_assessment_id);

        if input.case_type == CaseType::EitherWay {
            if let Some(required) = self.check_committed_for_trial(input, &history, &prior)? {
                return Ok(required);
            }
        }

        let required = !prior.iter().any(PriorAssessment::is_disqualifying);
        tracing::debug!(
            case_id = input.case_id,
            prior = prior.len(),
            required,
            "Eligibility check decided from full history"
        );
        Ok(required)
    }

    /// Either-way cases committed for trial look only at the most recent
    /// prior assessment once the current one passed or post-dates the
    /// magistrates' outcome. Returns `None` to fall back to the full
    /// history scan.
    fn check_committed_for_trial(
        &self,
        input: &EligibilityCheckInput,
        history: &AssessmentHistory,
        prior: &[PriorAssessment<'_>],
    ) -> Result<Option<bool>> {
        let assessment_id = input.financial_assessment_id.ok_or_else(|| {
            EngineError::Validation(
                "Financial assessment id required for committed for trial cases".to_string(),
            )
        })?;

        let initial = history.find_financial_assessment(assessment_id).ok_or(
            EngineError::InitialAssessmentNotInHistory {
                case_id: input.case_id,
                assessment_id,
            },
        )?;

        if initial
            .new_work_reason
            .as_ref()
            .is_some_and(|r| r.is_first_means_assessment())
        {
            return Ok(None);
        }

        let passed =
            input.init_result.or(initial.init_result) == Some(InitAssessmentResult::Pass);
        let after_outcome = history
            .mags_outcome_date_set
            .is_some_and(|outcome_date| initial.date_created > outcome_date);

        if !passed && !after_outcome {
            return Ok(None);
        }

        let latest = prior.iter().max_by_key(|a| a.date_created());
        let required = latest.is_none_or(|a| !a.is_disqualifying());

        tracing::debug!(
            case_id = input.case_id,
            assessment_id,
            latest = ?latest.map(|a| a.date_created()),
            required,
            "Eligibility check decided from latest prior assessment"
        );

        Ok(Some(required))
    }
}
