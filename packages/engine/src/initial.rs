//! Initial (gross income) assessment
//!
//! Divides the household's annual income by its combined weighting factor
//! and places the adjusted income against the lower and upper thresholds:
//!
//! ```text
//! adjusted <= lower           -> PASS
//! lower < adjusted < upper    -> FULL
//! adjusted >= upper           -> FAIL (HARDSHIP for a hardship review)
//! ```
//!
//! Adjusted income is rounded up (away from zero) at the scale of the income
//! value, so it is never under-estimated.

use crate::criteria::AssessmentCriteria;
use crate::error::{EngineError, Result};
use crate::types::{combined_weighting, InitAssessmentResult, NewWorkReason};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Outcome of the initial assessment with the figures that justify it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitialAssessment {
    pub criteria_id: i32,
    pub total_aggregated_income: Decimal,
    pub total_child_weighting: Decimal,
    pub combined_weighting: Decimal,
    pub adjusted_income: Decimal,
    pub lower_threshold: Decimal,
    pub upper_threshold: Decimal,
    pub result: InitAssessmentResult,
    pub result_reason: String,
}

/// Runs the initial assessment against one criteria row.
pub struct InitialAssessmentEngine<'a> {
    criteria: &'a AssessmentCriteria,
}

impl<'a> InitialAssessmentEngine<'a> {
    /// Create a new engine for the request-scoped criteria.
    pub fn new(criteria: &'a AssessmentCriteria) -> Self {
        Self { criteria }
    }

    /// Combined household weighting for the given child weighting total.
    pub fn combined_weighting(&self, total_child_weighting: Decimal) -> Decimal {
        combined_weighting(
            self.criteria.applicant_weighting_factor,
            self.criteria.partner_weighting_factor,
            total_child_weighting,
        )
    }

    /// Compute the adjusted income.
    ///
    /// Zero or negative income adjusts to zero.
    ///
    /// # Errors
    ///
    /// [`EngineError::Validation`] when the combined weighting is not
    /// positive and income is.
    pub fn adjusted_income(&self, income: Decimal, total_child_weighting: Decimal) -> Result<Decimal> {
        if income <= Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }

        let weighting = self.combined_weighting(total_child_weighting);
        if weighting <= Decimal::ZERO {
            return Err(EngineError::Validation(format!(
                "Combined weighting must be positive, got {weighting}"
            )));
        }

        let scale = income.scale();
        let mut adjusted = income
            .checked_div(weighting)
            .ok_or_else(|| EngineError::Validation("Adjusted income overflow".to_string()))?
            .round_dp_with_strategy(scale, RoundingStrategy::AwayFromZero);
        adjusted.rescale(scale);

        Ok(adjusted)
    }

    /// Classify an adjusted income.
    pub fn classify(
        &self,
        adjusted_income: Decimal,
        new_work_reason: Option<&NewWorkReason>,
    ) -> InitAssessmentResult {
        if adjusted_income <= self.criteria.initial_lower_threshold {
            InitAssessmentResult::Pass
        } else if adjusted_income >= self.criteria.initial_upper_threshold {
            if new_work_reason.is_some_and(NewWorkReason::is_hardship_review) {
                InitAssessmentResult::Hardship
            } else {
                InitAssessmentResult::Fail
            }
        } else {
            InitAssessmentResult::Full
        }
    }

    /// Run the initial assessment.
    ///
    /// # Arguments
    /// * `total_aggregated_income` - Annual household income
    /// * `total_child_weighting` - Weighting contributed by dependent children
    /// * `new_work_reason` - Reason code of the new piece of work
    pub fn evaluate(
        &self,
        total_aggregated_income: Decimal,
        total_child_weighting: Decimal,
        new_work_reason: Option<&NewWorkReason>,
    ) -> Result<InitialAssessment> {
        let combined_weighting = self.combined_weighting(total_child_weighting);
        let adjusted_income = self.adjusted_income(total_aggregated_income, total_child_weighting)?;
        let result = self.classify(adjusted_income, new_work_reason);

        tracing::debug!(
            criteria_id = self.criteria.id,
            income = %total_aggregated_income,
            weighting = %combined_weighting,
            adjusted_income = %adjusted_income,
            result = %result,
            "Initial assessment evaluated"
        );

        Ok(InitialAssessment {
            criteria_id: self.criteria.id,
            total_aggregated_income,
            total_child_weighting,
            combined_weighting,
            adjusted_income,
            lower_threshold: self.criteria.initial_lower_threshold,
            upper_threshold: self.criteria.initial_upper_threshold,
            result,
            result_reason: result.reason().to_string(),
        })
    }
}
