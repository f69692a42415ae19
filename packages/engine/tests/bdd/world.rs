//! World struct for Cucumber BDD tests
//!
//! Contains the test state that persists across steps in a scenario.

use chrono::{NaiveDate, NaiveDateTime};
use crime_means_engine::{
    complete_counts, counts_from_declarations, AssessmentContext, AssessmentHistory,
    AssessmentType, CaseType, ChildDeclaration, CriteriaRegistry, CriteriaSource, CurrentStatus,
    EngineError, FinancialAssessmentRecord, InMemoryAssessmentHistory, MagCourtOutcome,
    MeansAssessmentOutcome, MeansAssessmentRequest, MeansAssessmentService, NewWorkReason,
    PassportAssessmentRecord, SectionSummary,
};
use cucumber::World;

use crate::helpers::criteria_loader::load_all_criteria;

pub const CASE_ID: i64 = 5639;
pub const ASSESSMENT_ID: i64 = 2000;

/// Test world that holds state across steps in a Cucumber scenario.
#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct MeansWorld {
    /// Criteria registry with every table under `criteria/` loaded
    pub registry: CriteriaRegistry,
    pub assessment_date: NaiveDateTime,
    pub case_type: CaseType,
    pub mag_court_outcome: Option<MagCourtOutcome>,
    pub new_work_reason: Option<NewWorkReason>,
    pub has_partner: bool,
    pub partner_contrary_interest: bool,
    pub status: CurrentStatus,
    pub income: Vec<SectionSummary>,
    pub expenditure: Vec<SectionSummary>,
    pub children: Vec<ChildDeclaration>,
    pub full_assessment_date: Option<NaiveDateTime>,
    /// Completion date already held for the current assessment
    pub date_completed: Option<NaiveDateTime>,
    pub mags_outcome_date_set: Option<NaiveDateTime>,
    pub prior_financial: Vec<FinancialAssessmentRecord>,
    pub prior_passport: Vec<PassportAssessmentRecord>,
    /// Last assessment outcome (if successful)
    pub outcome: Option<MeansAssessmentOutcome>,
    /// Last error (if the assessment failed)
    pub error: Option<EngineError>,
}

impl Default for MeansWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl MeansWorld {
    /// Create a new world with all criteria loaded.
    pub fn new() -> Self {
        let mut registry = CriteriaRegistry::new();
        if let Err(e) = load_all_criteria(&mut registry) {
            panic!("Failed to load criteria: {}", e);
        }

        Self {
            registry,
            assessment_date: start_of_day("2021-05-01"),
            case_type: CaseType::SummaryOnly,
            mag_court_outcome: None,
            new_work_reason: None,
            has_partner: false,
            partner_contrary_interest: false,
            status: CurrentStatus::Complete,
            income: Vec::new(),
            expenditure: Vec::new(),
            children: Vec::new(),
            full_assessment_date: None,
            date_completed: None,
            mags_outcome_date_set: None,
            prior_financial: Vec::new(),
            prior_passport: Vec::new(),
            outcome: None,
            error: None,
        }
    }

    /// Case history as the case-management system would hold it: the
    /// prior assessments plus the one being made.
    fn case_history(&self) -> AssessmentHistory {
        let mut financial_assessments = self.prior_financial.clone();
        financial_assessments.push(FinancialAssessmentRecord {
            id: ASSESSMENT_ID,
            date_created: self.assessment_date,
            new_work_reason: self.new_work_reason.clone(),
            init_result: None,
            full_result: None,
            date_completed: self.date_completed,
            replaced: false,
        });

        AssessmentHistory {
            case_id: CASE_ID,
            financial_assessments,
            passport_assessments: self.prior_passport.clone(),
            mags_outcome_date_set: self.mags_outcome_date_set,
        }
    }

    fn build_request(&self, assessment_type: AssessmentType) -> Result<MeansAssessmentRequest, EngineError> {
        // Children are declared by age band; the request carries the
        // complete id-keyed form for the criteria in force.
        let criteria = self.registry.criteria_for_date(self.assessment_date.date())?;
        let declared = counts_from_declarations(&criteria, &self.children)?;

        Ok(MeansAssessmentRequest {
            case_id: CASE_ID,
            financial_assessment_id: Some(ASSESSMENT_ID),
            assessment_type,
            assessment_status: self.status,
            context: AssessmentContext {
                case_type: self.case_type,
                mag_court_outcome: self.mag_court_outcome,
                new_work_reason: self.new_work_reason.clone(),
                has_partner: self.has_partner,
                partner_contrary_interest: self.partner_contrary_interest,
                eligibility_check_required: false,
                assessment_date: self.assessment_date,
            },
            income_sections: self.income.clone(),
            expenditure_sections: self.expenditure.clone(),
            child_weightings: complete_counts(&criteria, &declared),
            full_assessment_date: self.full_assessment_date,
        })
    }

    /// Run the assessment and store the outcome or error
    pub fn assess(&mut self, assessment_type: AssessmentType) {
        let history = InMemoryAssessmentHistory::from_histories(vec![self.case_history()]);
        let service = MeansAssessmentService::new(&self.registry, &history);

        match self
            .build_request(assessment_type)
            .and_then(|request| service.assess(&request))
        {
            Ok(outcome) => {
                self.outcome = Some(outcome);
                self.error = None;
            }
            Err(e) => {
                self.outcome = None;
                self.error = Some(e);
            }
        }
    }

    /// Outcome of the last assessment, failing the step if it errored
    pub fn outcome(&self) -> &MeansAssessmentOutcome {
        match &self.outcome {
            Some(outcome) => outcome,
            None => panic!(
                "Expected a successful assessment, got error: {:?}",
                self.error_message()
            ),
        }
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }
}

/// Parse `YYYY-MM-DD` as midnight on that date.
pub fn start_of_day(date: &str) -> NaiveDateTime {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_else(|| panic!("Invalid date: {}", date))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::panic, clippy::unwrap_used)]
mod tests {
    use super::MeansWorld;

    #[test]
    fn test_world_initialization() {
        let world = MeansWorld::new();
        assert!(
            !world.registry.is_empty(),
            "Expected at least one criteria row to be loaded"
        );
    }
}
