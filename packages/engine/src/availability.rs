//! Full assessment availability
//!
//! Decides whether the full assessment may run after the initial
//! assessment. A full assessment date that is already set (re-assessment)
//! always makes it available; otherwise the decision is keyed on the initial
//! result:
//!
//! | Initial result | Available when                                              |
//! |----------------|-------------------------------------------------------------|
//! | FULL           | always                                                      |
//! | FAIL           | INDICTABLE, CC_ALREADY, APPEAL_CC; EITHER_WAY if committed for trial |
//! | HARDSHIP       | new work reason is HR                                       |
//! | PASS / NONE    | never                                                       |

use crate::types::{CaseType, InitAssessmentResult, MagCourtOutcome, NewWorkReason};
use chrono::NaiveDateTime;

/// Inputs to the availability decision.
#[derive(Debug, Clone, Copy)]
pub struct AvailabilityInput<'a> {
    pub case_type: CaseType,
    pub mag_court_outcome: Option<MagCourtOutcome>,
    pub new_work_reason: Option<&'a NewWorkReason>,
    pub init_result: Option<InitAssessmentResult>,
    pub full_assessment_date: Option<NaiveDateTime>,
}

/// Whether a failed initial assessment can still proceed to a full
/// assessment for this case type and outcome.
pub fn failed_case_can_proceed(
    case_type: CaseType,
    mag_court_outcome: Option<MagCourtOutcome>,
) -> bool {
    match case_type {
        CaseType::Indictable | CaseType::CcAlready | CaseType::AppealCc => true,
        CaseType::EitherWay => mag_court_outcome == Some(MagCourtOutcome::CommittedForTrial),
        CaseType::SummaryOnly | CaseType::Commital => false,
    }
}

/// Decide whether the full assessment is available.
pub fn is_full_assessment_available(input: &AvailabilityInput<'_>) -> bool {
    if input.full_assessment_date.is_some() {
        return true;
    }

    let available = match input.init_result {
        Some(InitAssessmentResult::Full) => true,
        Some(InitAssessmentResult::Fail) => {
            failed_case_can_proceed(input.case_type, input.mag_court_outcome)
        }
        Some(InitAssessmentResult::Hardship) => input
            .new_work_reason
            .is_some_and(NewWorkReason::is_hardship_review),
        Some(InitAssessmentResult::Pass) | Some(InitAssessmentResult::None) | None => false,
    };

    tracing::debug!(
        case_type = ?input.case_type,
        outcome = ?input.mag_court_outcome,
        init_result = ?input.init_result,
        available,
        "Full assessment availability decided"
    );

    available
}
