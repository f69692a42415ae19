//! Child weighting resolution
//!
//! Children are declared per age band on the wire and keyed by the criteria's
//! child weighting id when scoring. This module converts between the two
//! forms and sums the household weighting contributed by children.
//!
//! The scoring path is strict: every weighting the criteria defines must
//! have a declared count. The wire path is lenient: any weighting not
//! declared is reported with a zero count.

use crate::criteria::AssessmentCriteria;
use crate::error::{EngineError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Number of children declared for an age band (wire form).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildDeclaration {
    pub lower_age_range: u32,
    pub upper_age_range: u32,
    pub no_of_children: u32,
}

/// Number of children keyed by criteria child weighting id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildWeightingCount {
    pub child_weighting_id: i32,
    pub no_of_children: u32,
}

/// Translate age band declarations to weighting-id counts.
///
/// # Errors
///
/// [`EngineError::UnknownAgeBand`] when a band matches no criteria weighting,
/// [`EngineError::Validation`] when the same band is declared twice.
pub fn counts_from_declarations(
    criteria: &AssessmentCriteria,
    declarations: &[ChildDeclaration],
) -> Result<Vec<ChildWeightingCount>> {
    let mut counts: Vec<ChildWeightingCount> = Vec::with_capacity(declarations.len());

    for declaration in declarations {
        let weighting = criteria
            .find_child_weighting_by_band(declaration.lower_age_range, declaration.upper_age_range)
            .ok_or(EngineError::UnknownAgeBand {
                lower: declaration.lower_age_range,
                upper: declaration.upper_age_range,
            })?;

        if counts.iter().any(|c| c.child_weighting_id == weighting.id) {
            return Err(EngineError::Validation(format!(
                "Age band {}-{} declared more than once",
                declaration.lower_age_range, declaration.upper_age_range
            )));
        }

        counts.push(ChildWeightingCount {
            child_weighting_id: weighting.id,
            no_of_children: declaration.no_of_children,
        });
    }

    Ok(counts)
}

/// Convert weighting-id counts back to wire form.
///
/// Every band the criteria defines is listed in criteria order; bands
/// without a declared count are reported with zero children.
pub fn declarations_from_counts(
    criteria: &AssessmentCriteria,
    counts: &[ChildWeightingCount],
) -> Vec<ChildDeclaration> {
    let by_id: HashMap<i32, u32> = counts
        .iter()
        .map(|c| (c.child_weighting_id, c.no_of_children))
        .collect();

    criteria
        .child_weightings
        .iter()
        .map(|cw| ChildDeclaration {
            lower_age_range: cw.lower_age_range,
            upper_age_range: cw.upper_age_range,
            no_of_children: by_id.get(&cw.id).copied().unwrap_or(0),
        })
        .collect()
}

/// Fill in a zero count for every criteria weighting not declared.
pub fn complete_counts(
    criteria: &AssessmentCriteria,
    counts: &[ChildWeightingCount],
) -> Vec<ChildWeightingCount> {
    criteria
        .child_weightings
        .iter()
        .map(|cw| ChildWeightingCount {
            child_weighting_id: cw.id,
            no_of_children: counts
                .iter()
                .find(|c| c.child_weighting_id == cw.id)
                .map_or(0, |c| c.no_of_children),
        })
        .collect()
}

/// Check that declared counts match the criteria weightings one-to-one.
///
/// # Errors
///
/// - [`EngineError::ChildWeightingsMissing`] for the first criteria weighting
///   without a declared count
/// - [`EngineError::InvalidChildWeighting`] for a declared id the criteria
///   does not define
/// - [`EngineError::Validation`] for an id declared more than once
pub fn validate_counts(
    criteria: &AssessmentCriteria,
    counts: &[ChildWeightingCount],
) -> Result<()> {
    let mut seen = HashSet::new();
    if let Some(repeated) = counts.iter().find(|c| !seen.insert(c.child_weighting_id)) {
        return Err(EngineError::Validation(format!(
            "Child weighting id {} declared more than once",
            repeated.child_weighting_id
        )));
    }

    for cw in &criteria.child_weightings {
        if !counts.iter().any(|c| c.child_weighting_id == cw.id) {
            return Err(EngineError::ChildWeightingsMissing(cw.id));
        }
    }

    if let Some(unknown) = counts
        .iter()
        .find(|c| criteria.find_child_weighting(c.child_weighting_id).is_none())
    {
        return Err(EngineError::InvalidChildWeighting(unknown.child_weighting_id));
    }

    Ok(())
}

/// Total weighting contributed by dependent children.
///
/// Sum of `weighting_factor * no_of_children` over every declared count.
pub fn total_child_weighting(
    criteria: &AssessmentCriteria,
    counts: &[ChildWeightingCount],
) -> Result<Decimal> {
    validate_counts(criteria, counts)?;

    let mut total = Decimal::ZERO;
    for count in counts {
        let weighting = criteria
            .find_child_weighting(count.child_weighting_id)
            .ok_or(EngineError::InvalidChildWeighting(count.child_weighting_id))?;
        total += weighting.weighting_factor * Decimal::from(count.no_of_children);
    }

    tracing::trace!(criteria_id = criteria.id, total = %total, "Child weighting resolved");

    Ok(total)
}
