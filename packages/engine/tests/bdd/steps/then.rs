//! Then step definitions
//!
//! Steps that verify outcomes and assertions.

use crime_means_engine::EngineError;
use cucumber::then;

use crate::helpers::table_parsing::parse_amount;
use crate::world::MeansWorld;

// =============================================================================
// Criteria and initial assessment
// =============================================================================

#[then(expr = "the criteria used is {int}")]
fn assert_criteria_id(world: &mut MeansWorld, expected: i32) {
    assert_eq!(world.outcome().criteria_id, expected);
}

#[then(expr = "the total annual income is {string}")]
fn assert_total_income(world: &mut MeansWorld, expected: String) {
    assert_eq!(world.outcome().income.total, parse_amount(&expected));
}

#[then(expr = "the adjusted income is {string}")]
fn assert_adjusted_income(world: &mut MeansWorld, expected: String) {
    assert_eq!(world.outcome().initial.adjusted_income, parse_amount(&expected));
}

#[then(expr = "the initial result is {string}")]
fn assert_initial_result(world: &mut MeansWorld, expected: String) {
    let initial = &world.outcome().initial;
    assert_eq!(
        initial.result.to_string(),
        expected,
        "Expected initial result {}, got {} ({})",
        expected,
        initial.result,
        initial.result_reason
    );
}

// =============================================================================
// Full assessment
// =============================================================================

#[then("the full assessment is available")]
fn assert_full_available(world: &mut MeansWorld) {
    assert!(world.outcome().full_assessment_available);
}

#[then("the full assessment is not available")]
fn assert_full_unavailable(world: &mut MeansWorld) {
    let outcome = world.outcome();
    assert!(!outcome.full_assessment_available);
    assert!(outcome.full.is_none(), "Expected no full assessment result");
}

#[then(expr = "the full result is {string}")]
fn assert_full_result(world: &mut MeansWorld, expected: String) {
    let full = world
        .outcome()
        .full
        .as_ref()
        .unwrap_or_else(|| panic!("Expected a full assessment result"));
    assert_eq!(
        full.result.to_string(),
        expected,
        "Expected full result {}, got {} (disposable income {})",
        expected,
        full.result,
        full.total_annual_disposable_income
    );
}

#[then(expr = "the adjusted living allowance is {string}")]
fn assert_living_allowance(world: &mut MeansWorld, expected: String) {
    let full = world.outcome().full.as_ref().expect("full assessment result");
    assert_eq!(full.adjusted_living_allowance, parse_amount(&expected));
}

#[then(expr = "the disposable income is {string}")]
fn assert_disposable_income(world: &mut MeansWorld, expected: String) {
    let full = world.outcome().full.as_ref().expect("full assessment result");
    assert_eq!(full.total_annual_disposable_income, parse_amount(&expected));
}

#[then("an eligibility check is required")]
fn assert_eligibility_required(world: &mut MeansWorld) {
    assert!(world.outcome().eligibility_check_required);
}

#[then("no eligibility check is required")]
fn assert_eligibility_not_required(world: &mut MeansWorld) {
    assert!(!world.outcome().eligibility_check_required);
}

// =============================================================================
// Completion
// =============================================================================

#[then("the assessment is marked complete")]
fn assert_complete(world: &mut MeansWorld) {
    let outcome = world.outcome();
    assert!(outcome.completion_required);
    assert_eq!(outcome.date_completed, Some(world.assessment_date));
}

#[then("the assessment is not marked complete")]
fn assert_not_complete(world: &mut MeansWorld) {
    let outcome = world.outcome();
    assert!(!outcome.completion_required);
    assert_eq!(outcome.date_completed, None);
}

// =============================================================================
// Child weightings
// =============================================================================

#[then(expr = "the child weightings list {int} age bands")]
fn assert_child_band_count(world: &mut MeansWorld, expected: usize) {
    assert_eq!(world.outcome().child_weightings.len(), expected);
}

// =============================================================================
// Errors
// =============================================================================

#[then(expr = "the assessment fails with {string}")]
fn assert_error(world: &mut MeansWorld, expected: String) {
    let error = world
        .error
        .as_ref()
        .unwrap_or_else(|| panic!("Expected an error, got {:?}", world.outcome));

    let matched = match expected.as_str() {
        "criteria not found" => matches!(error, EngineError::CriteriaNotFound { .. }),
        "unknown age band" => matches!(error, EngineError::UnknownAgeBand { .. }),
        "assessment not in history" => {
            matches!(error, EngineError::InitialAssessmentNotInHistory { .. })
        }
        other => panic!("Unknown error kind in feature file: {}", other),
    };

    assert!(matched, "Expected {} error, got: {}", expected, error);
}
