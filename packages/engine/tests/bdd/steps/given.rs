//! Given step definitions
//!
//! Steps that set up the case, declarations and history for a scenario.

use crime_means_engine::{
    ChildDeclaration, CurrentStatus, FinancialAssessmentRecord, FullAssessmentResult,
    InitAssessmentResult, NewWorkReason, PassportAssessmentRecord, PassportAssessmentResult,
};
use cucumber::{gherkin::Step, given};

use crate::helpers::table_parsing::{add_section_rows, data_rows, parse_code, Declarant};
use crate::world::{start_of_day, MeansWorld};

// =============================================================================
// Case context
// =============================================================================

#[given(expr = "the assessment date is {string}")]
fn set_assessment_date(world: &mut MeansWorld, date: String) {
    world.assessment_date = start_of_day(&date);
}

#[given(expr = "a {string} case")]
fn set_case_type(world: &mut MeansWorld, case_type: String) {
    world.case_type = parse_code(&case_type);
}

#[given(expr = "the magistrates court outcome is {string}")]
fn set_mag_court_outcome(world: &mut MeansWorld, outcome: String) {
    world.mag_court_outcome = Some(parse_code(&outcome));
}

#[given(expr = "the magistrates court outcome was recorded on {string}")]
fn set_mags_outcome_date(world: &mut MeansWorld, date: String) {
    world.mags_outcome_date_set = Some(start_of_day(&date));
}

#[given(expr = "the new work reason is {string}")]
fn set_new_work_reason(world: &mut MeansWorld, reason: String) {
    world.new_work_reason = Some(NewWorkReason::new(reason));
}

#[given("the applicant has a partner")]
fn set_partner(world: &mut MeansWorld) {
    world.has_partner = true;
}

#[given("the applicant has a partner with a contrary interest")]
fn set_contrary_partner(world: &mut MeansWorld) {
    world.has_partner = true;
    world.partner_contrary_interest = true;
}

#[given("the assessment is in progress")]
fn set_in_progress(world: &mut MeansWorld) {
    world.status = CurrentStatus::InProgress;
}

#[given(expr = "a full assessment was previously made on {string}")]
fn set_full_assessment_date(world: &mut MeansWorld, date: String) {
    world.full_assessment_date = Some(start_of_day(&date));
}

#[given(expr = "the assessment was already completed on {string}")]
fn set_date_completed(world: &mut MeansWorld, date: String) {
    world.date_completed = Some(start_of_day(&date));
}

// =============================================================================
// Declarations
// =============================================================================

#[given("the applicant declares the following income:")]
fn set_applicant_income(world: &mut MeansWorld, step: &Step) {
    if let Some(table) = &step.table {
        add_section_rows(&mut world.income, table, Declarant::Applicant);
    }
}

#[given("the partner declares the following income:")]
fn set_partner_income(world: &mut MeansWorld, step: &Step) {
    if let Some(table) = &step.table {
        add_section_rows(&mut world.income, table, Declarant::Partner);
    }
}

#[given("the applicant declares the following expenditure:")]
fn set_applicant_expenditure(world: &mut MeansWorld, step: &Step) {
    if let Some(table) = &step.table {
        add_section_rows(&mut world.expenditure, table, Declarant::Applicant);
    }
}

#[given("the following dependent children:")]
fn set_children(world: &mut MeansWorld, step: &Step) {
    if let Some(table) = &step.table {
        for row in data_rows(table) {
            let parse = |cell: &String| -> u32 {
                cell.trim()
                    .parse()
                    .unwrap_or_else(|_| panic!("Invalid number: {}", cell))
            };
            world.children.push(ChildDeclaration {
                lower_age_range: parse(&row[0]),
                upper_age_range: parse(&row[1]),
                no_of_children: parse(&row[2]),
            });
        }
    }
}

// =============================================================================
// Case history
// =============================================================================

/// Table columns: `| id | kind | date_created | result |` where kind is
/// `INIT`, `FULL` or `PASSPORT`. A FULL row records an initial FULL result
/// followed by the given full result. A trailing `replaced` column marks
/// superseded assessments.
#[given("the case has the following prior assessments:")]
fn set_prior_assessments(world: &mut MeansWorld, step: &Step) {
    let Some(table) = &step.table else {
        return;
    };

    for row in data_rows(table) {
        let id: i64 = row[0]
            .trim()
            .parse()
            .unwrap_or_else(|_| panic!("Invalid assessment id: {}", row[0]));
        let date_created = start_of_day(row[2].trim());
        let result = row[3].trim();
        let replaced = row.get(4).is_some_and(|cell| cell.trim() == "yes");

        match row[1].trim() {
            "INIT" => world.prior_financial.push(FinancialAssessmentRecord {
                id,
                date_created,
                new_work_reason: None,
                init_result: Some(parse_code::<InitAssessmentResult>(result)),
                full_result: None,
                date_completed: None,
                replaced,
            }),
            "FULL" => world.prior_financial.push(FinancialAssessmentRecord {
                id,
                date_created,
                new_work_reason: None,
                init_result: Some(InitAssessmentResult::Full),
                full_result: Some(parse_code::<FullAssessmentResult>(result)),
                date_completed: None,
                replaced,
            }),
            "PASSPORT" => world.prior_passport.push(PassportAssessmentRecord {
                id,
                date_created,
                result: Some(parse_code::<PassportAssessmentResult>(result)),
                replaced,
            }),
            other => panic!("Unknown assessment kind: {}", other),
        }
    }
}
