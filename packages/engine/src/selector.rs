//! Criteria selection for a single assessment
//!
//! Resolves the criteria in force on the assessment date and derives the
//! request-scoped copy the engines score against.

use crate::criteria::AssessmentCriteria;
use crate::error::Result;
use crate::resolver::CriteriaSource;
use crate::types::AssessmentContext;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Select the criteria for an assessment.
///
/// The partner weighting factor is zero in the returned copy when there is
/// no partner, or the partner has a contrary interest. The row held by
/// `source` is never modified.
///
/// # Errors
///
/// Propagates [`crate::EngineError::CriteriaNotFound`] from the source.
pub fn select_criteria(
    source: &dyn CriteriaSource,
    assessment_date: NaiveDate,
    has_partner: bool,
    partner_contrary_interest: bool,
) -> Result<AssessmentCriteria> {
    let mut criteria = source.criteria_for_date(assessment_date)?;

    if !has_partner || partner_contrary_interest {
        criteria.partner_weighting_factor = Decimal::ZERO;
    }

    tracing::debug!(
        criteria_id = criteria.id,
        date = %assessment_date,
        partner_weighting = %criteria.partner_weighting_factor,
        "Selected assessment criteria"
    );

    Ok(criteria)
}

/// Select the criteria for the assessment described by `context`.
pub fn select_criteria_for_context(
    source: &dyn CriteriaSource,
    context: &AssessmentContext,
) -> Result<AssessmentCriteria> {
    select_criteria(
        source,
        context.assessment_date.date(),
        context.has_partner,
        context.partner_contrary_interest,
    )
}
