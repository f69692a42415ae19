//! Full (disposable income) assessment
//!
//! Subtracts annual expenditure and a household-adjusted living allowance
//! from annual income, and classifies the remaining disposable income:
//!
//! ```text
//! eligibility check required && disposable >= eligibility threshold -> INELIGIBLE
//! disposable <= full threshold                                      -> PASS
//! otherwise                                                         -> FAIL
//! ```

use crate::aggregation::to_money;
use crate::criteria::AssessmentCriteria;
use crate::error::{EngineError, Result};
use crate::types::{combined_weighting, FullAssessmentResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Outcome of the full assessment with the figures that justify it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullAssessment {
    pub criteria_id: i32,
    pub total_aggregated_income: Decimal,
    /// Annual expenditure from the itemised sections only
    pub section_expenditure: Decimal,
    pub adjusted_living_allowance: Decimal,
    /// Section expenditure plus adjusted living allowance
    pub total_aggregated_expenditure: Decimal,
    pub total_annual_disposable_income: Decimal,
    pub full_threshold: Decimal,
    pub eligibility_threshold: Decimal,
    pub eligibility_check_required: bool,
    pub result: FullAssessmentResult,
    pub result_reason: String,
}

/// Runs the full assessment against one criteria row.
pub struct FullAssessmentEngine<'a> {
    criteria: &'a AssessmentCriteria,
}

impl<'a> FullAssessmentEngine<'a> {
    /// Create a new engine for the request-scoped criteria.
    pub fn new(criteria: &'a AssessmentCriteria) -> Self {
        Self { criteria }
    }

    /// Living allowance scaled by the combined household weighting.
    pub fn adjusted_living_allowance(&self, total_child_weighting: Decimal) -> Decimal {
        let weighting = combined_weighting(
            self.criteria.applicant_weighting_factor,
            self.criteria.partner_weighting_factor,
            total_child_weighting,
        );
        to_money(self.criteria.living_allowance * weighting)
    }

    /// Classify a disposable income.
    pub fn classify(
        &self,
        disposable_income: Decimal,
        eligibility_check_required: bool,
    ) -> FullAssessmentResult {
        if eligibility_check_required && disposable_income >= self.criteria.eligibility_threshold {
            FullAssessmentResult::Ineligible
        } else if disposable_income <= self.criteria.full_threshold {
            FullAssessmentResult::Pass
        } else {
            FullAssessmentResult::Fail
        }
    }

    /// Run the full assessment.
    ///
    /// # Arguments
    /// * `total_aggregated_income` - Annual income from the initial assessment
    /// * `section_expenditure` - Annual itemised expenditure
    /// * `total_child_weighting` - Weighting contributed by dependent children
    /// * `eligibility_check_required` - Whether the Crown Court eligibility gate applies
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Validation`] when the expenditure or disposable
    /// income overflows.
    pub fn evaluate(
        &self,
        total_aggregated_income: Decimal,
        section_expenditure: Decimal,
        total_child_weighting: Decimal,
        eligibility_check_required: bool,
    ) -> Result<FullAssessment> {
        let adjusted_living_allowance = self.adjusted_living_allowance(total_child_weighting);
        let total_aggregated_expenditure = section_expenditure
            .checked_add(adjusted_living_allowance)
            .ok_or_else(|| EngineError::Validation("Total expenditure overflows".to_string()))?;
        let total_annual_disposable_income = total_aggregated_income
            .checked_sub(total_aggregated_expenditure)
            .ok_or_else(|| EngineError::Validation("Disposable income overflows".to_string()))?;
        let result = self.classify(total_annual_disposable_income, eligibility_check_required);

        tracing::debug!(
            criteria_id = self.criteria.id,
            income = %total_aggregated_income,
            expenditure = %total_aggregated_expenditure,
            disposable_income = %total_annual_disposable_income,
            eligibility_check_required,
            result = %result,
            "Full assessment evaluated"
        );

        Ok(FullAssessment {
            criteria_id: self.criteria.id,
            total_aggregated_income,
            section_expenditure,
            adjusted_living_allowance,
            total_aggregated_expenditure,
            total_annual_disposable_income,
            full_threshold: self.criteria.full_threshold,
            eligibility_threshold: self.criteria.eligibility_threshold,
            eligibility_check_required,
            result,
            result_reason: result.reason().to_string(),
        })
    }
}

/// Expenditure implied by an income and a disposable income.
///
/// Inverse of the disposable income calculation, used to reconcile a
/// stored disposable income against stored totals.
pub fn expenditure_from_disposable_income(
    total_aggregated_income: Decimal,
    total_annual_disposable_income: Decimal,
) -> Decimal {
    total_aggregated_income - total_annual_disposable_income
}
