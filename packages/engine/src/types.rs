//! Core types for the means assessment engine

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Payment frequency of an income or expenditure entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    #[serde(rename = "WEEKLY")]
    Weekly,
    #[serde(rename = "2WEEKLY")]
    TwoWeekly,
    #[serde(rename = "4WEEKLY")]
    FourWeekly,
    #[serde(rename = "MONTHLY")]
    Monthly,
    #[serde(rename = "ANNUALLY")]
    Annually,
}

impl Frequency {
    /// Number of payments per year
    pub fn annual_multiplier(&self) -> u32 {
        match self {
            Frequency::Weekly => 52,
            Frequency::TwoWeekly => 26,
            Frequency::FourWeekly => 13,
            Frequency::Monthly => 12,
            Frequency::Annually => 1,
        }
    }

    /// Wire code of this frequency
    pub fn code(&self) -> &'static str {
        match self {
            Frequency::Weekly => "WEEKLY",
            Frequency::TwoWeekly => "2WEEKLY",
            Frequency::FourWeekly => "4WEEKLY",
            Frequency::Monthly => "MONTHLY",
            Frequency::Annually => "ANNUALLY",
        }
    }
}

/// Case type of the criminal case the application relates to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaseType {
    Indictable,
    SummaryOnly,
    /// Case already in the Crown Court
    CcAlready,
    /// Appeal to the Crown Court
    AppealCc,
    Commital,
    EitherWay,
}

/// Outcome recorded at the magistrates' court
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MagCourtOutcome {
    CommittedForTrial,
    SentForTrial,
    ResolvedInMags,
    Committed,
    AppealToCc,
}

/// Reason code for the new piece of work that triggered the assessment.
///
/// Codes are compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewWorkReason(String);

impl NewWorkReason {
    /// Hardship review
    pub const HARDSHIP_REVIEW: &'static str = "HR";
    /// First means assessment on the case
    pub const FIRST_MEANS_ASSESSMENT: &'static str = "FMA";

    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn code(&self) -> &str {
        &self.0
    }

    /// Check whether this reason has the given code (case-insensitive)
    pub fn is(&self, code: &str) -> bool {
        self.0.trim().eq_ignore_ascii_case(code)
    }

    pub fn is_hardship_review(&self) -> bool {
        self.is(Self::HARDSHIP_REVIEW)
    }

    pub fn is_first_means_assessment(&self) -> bool {
        self.is(Self::FIRST_MEANS_ASSESSMENT)
    }
}

impl From<&str> for NewWorkReason {
    fn from(code: &str) -> Self {
        NewWorkReason::new(code)
    }
}

impl fmt::Display for NewWorkReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of the initial (gross income) assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InitAssessmentResult {
    Pass,
    Full,
    Fail,
    Hardship,
    None,
}

impl InitAssessmentResult {
    pub fn reason(&self) -> &'static str {
        match self {
            InitAssessmentResult::Pass => "Gross income below the lower threshold",
            InitAssessmentResult::Full => "Gross income in between the upper and lower thresholds",
            InitAssessmentResult::Fail => "Gross income above the upper threshold",
            InitAssessmentResult::Hardship => "Hardship application",
            InitAssessmentResult::None => "No initial assessment result",
        }
    }
}

impl fmt::Display for InitAssessmentResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InitAssessmentResult::Pass => "PASS",
            InitAssessmentResult::Full => "FULL",
            InitAssessmentResult::Fail => "FAIL",
            InitAssessmentResult::Hardship => "HARDSHIP",
            InitAssessmentResult::None => "NONE",
        };
        f.write_str(s)
    }
}

/// Result of the full (disposable income) assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FullAssessmentResult {
    Pass,
    Fail,
    Ineligible,
}

impl FullAssessmentResult {
    pub fn reason(&self) -> &'static str {
        match self {
            FullAssessmentResult::Pass => "Disposable income below the threshold",
            FullAssessmentResult::Fail => "Disposable income above the threshold",
            FullAssessmentResult::Ineligible => {
                "Disposable income above the maximum eligibility threshold"
            }
        }
    }
}

impl fmt::Display for FullAssessmentResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FullAssessmentResult::Pass => "PASS",
            FullAssessmentResult::Fail => "FAIL",
            FullAssessmentResult::Ineligible => "INELIGIBLE",
        };
        f.write_str(s)
    }
}

/// Result of a passported (benefit-based) assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PassportAssessmentResult {
    Pass,
    Fail,
    Temp,
}

/// Phase of the means assessment being performed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssessmentType {
    Init,
    Full,
}

/// Workflow status of the assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CurrentStatus {
    InProgress,
    Complete,
}

/// Case context that keys the availability and eligibility decisions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentContext {
    pub case_type: CaseType,
    #[serde(default)]
    pub mag_court_outcome: Option<MagCourtOutcome>,
    #[serde(default)]
    pub new_work_reason: Option<NewWorkReason>,
    #[serde(default)]
    pub has_partner: bool,
    #[serde(default)]
    pub partner_contrary_interest: bool,
    #[serde(default)]
    pub eligibility_check_required: bool,
    pub assessment_date: NaiveDateTime,
}

impl AssessmentContext {
    /// Whether the new work reason is a hardship review
    pub fn is_hardship_review(&self) -> bool {
        self.new_work_reason
            .as_ref()
            .is_some_and(NewWorkReason::is_hardship_review)
    }
}

/// Sum of the household weighting factors used to adjust income and
/// living allowance.
pub fn combined_weighting(
    applicant_weighting: Decimal,
    partner_weighting: Decimal,
    total_child_weighting: Decimal,
) -> Decimal {
    applicant_weighting + partner_weighting + total_child_weighting
}
