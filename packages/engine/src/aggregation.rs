//! Section aggregation
//!
//! Annualises itemised income or expenditure entries. Each
//! [`AssessmentDetail`] carries an applicant and a partner amount, each with
//! its own [`Frequency`]; the aggregator multiplies every amount up to a
//! yearly figure, totals applicant and partner columns per section, and sums
//! the sections into a grand total.
//!
//! Annual contributions are rounded to 2 decimal places (half-up) and always
//! carry scale 2, so totals keep the same scale.

use crate::config;
use crate::error::{EngineError, Result};
use crate::types::Frequency;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// One itemised entry within a section.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AssessmentDetail {
    pub criteria_detail_id: i32,
    #[serde(default)]
    pub applicant_amount: Option<Decimal>,
    #[serde(default)]
    pub applicant_frequency: Option<Frequency>,
    #[serde(default)]
    pub partner_amount: Option<Decimal>,
    #[serde(default)]
    pub partner_frequency: Option<Frequency>,
}

/// A named group of income or expenditure entries.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SectionSummary {
    pub section: String,
    #[serde(default)]
    pub assessment_details: Vec<AssessmentDetail>,
}

/// Annual totals of one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionTotals {
    pub section: String,
    pub applicant_annual_total: Decimal,
    pub partner_annual_total: Decimal,
    pub annual_total: Decimal,
}

/// Annual totals of a set of sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedTotals {
    pub sections: Vec<SectionTotals>,
    pub total: Decimal,
}

impl AggregatedTotals {
    pub fn section(&self, name: &str) -> Option<&SectionTotals> {
        self.sections.iter().find(|s| s.section == name)
    }
}

/// Zero at money scale.
pub fn zero_money() -> Decimal {
    Decimal::new(0, config::MONEY_SCALE)
}

/// Round to money scale, half-up, always returning scale 2.
pub fn to_money(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(config::MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(config::MONEY_SCALE);
    rounded
}

/// Annualise a single amount.
///
/// A missing amount, a missing frequency, or a zero amount contributes zero.
///
/// # Errors
///
/// Returns [`EngineError::Validation`] when the annual figure overflows.
pub fn annual_amount(amount: Option<Decimal>, frequency: Option<Frequency>) -> Result<Decimal> {
    match (amount, frequency) {
        (Some(amount), Some(frequency)) if !amount.is_zero() => amount
            .checked_mul(Decimal::from(frequency.annual_multiplier()))
            .map(to_money)
            .ok_or_else(|| {
                EngineError::Validation(format!(
                    "Amount {amount} at frequency {frequency:?} overflows when annualised"
                ))
            }),
        _ => Ok(zero_money()),
    }
}

fn add_money(total: Decimal, amount: Decimal, section: &str) -> Result<Decimal> {
    total.checked_add(amount).ok_or_else(|| {
        EngineError::Validation(format!("Annual total of section {section} overflows"))
    })
}

/// Annualise one section.
///
/// # Errors
///
/// Returns [`EngineError::Validation`] when an amount or a total overflows.
pub fn aggregate_section(section: &SectionSummary) -> Result<SectionTotals> {
    let mut applicant_annual_total = zero_money();
    let mut partner_annual_total = zero_money();

    for detail in &section.assessment_details {
        applicant_annual_total = add_money(
            applicant_annual_total,
            annual_amount(detail.applicant_amount, detail.applicant_frequency)?,
            &section.section,
        )?;
        partner_annual_total = add_money(
            partner_annual_total,
            annual_amount(detail.partner_amount, detail.partner_frequency)?,
            &section.section,
        )?;
    }

    Ok(SectionTotals {
        section: section.section.clone(),
        applicant_annual_total,
        partner_annual_total,
        annual_total: add_money(applicant_annual_total, partner_annual_total, &section.section)?,
    })
}

/// Annualise all sections and compute the grand total.
///
/// # Errors
///
/// Returns [`EngineError::Validation`] when the request exceeds
/// [`config::MAX_SECTION_ENTRIES`] sections or details per section, or when
/// an annual total overflows.
pub fn aggregate_sections(sections: &[SectionSummary]) -> Result<AggregatedTotals> {
    if sections.len() > config::MAX_SECTION_ENTRIES {
        return Err(EngineError::Validation(format!(
            "Too many sections ({}, max {})",
            sections.len(),
            config::MAX_SECTION_ENTRIES
        )));
    }
    if let Some(section) = sections
        .iter()
        .find(|s| s.assessment_details.len() > config::MAX_SECTION_ENTRIES)
    {
        return Err(EngineError::Validation(format!(
            "Too many details in section {} ({}, max {})",
            section.section,
            section.assessment_details.len(),
            config::MAX_SECTION_ENTRIES
        )));
    }

    let totals = sections
        .iter()
        .map(aggregate_section)
        .collect::<Result<Vec<_>>>()?;
    let total = totals.iter().try_fold(zero_money(), |acc, s| {
        acc.checked_add(s.annual_total)
            .ok_or_else(|| EngineError::Validation("Aggregated total overflows".to_string()))
    })?;

    tracing::trace!(sections = totals.len(), total = %total, "Aggregated sections");

    Ok(AggregatedTotals {
        sections: totals,
        total,
    })
}
