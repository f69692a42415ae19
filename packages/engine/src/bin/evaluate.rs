//! CLI binary for running a means assessment via stdin.
//!
//! Usage:
//!   CRIME_MEANS_CRITERIA_PATH=criteria/crime_means_criteria.yaml \
//!     cargo run --bin evaluate < request.json
//!
//! Input (JSON on stdin):
//!   - request: Object, the means assessment request
//!   - history: Optional<Vec<Object>>, case histories for the eligibility
//!     check and completion decision
//!
//! Output (JSON on stdout):
//!   - outcome: Optional<Object>, the assessment outcome
//!   - error: Optional<String>, error message if the assessment failed
//!
//! Logs go to stderr, filtered by `RUST_LOG` (default `warn`).

use crime_means_engine::{
    AssessmentHistory, CriteriaRegistry, EngineConfig, InMemoryAssessmentHistory,
    MeansAssessmentOutcome, MeansAssessmentRequest, MeansAssessmentService, Result,
};
use std::io::Read;
use tracing_subscriber::EnvFilter;

#[derive(serde::Deserialize)]
struct EvaluateRequest {
    request: MeansAssessmentRequest,
    #[serde(default)]
    history: Vec<AssessmentHistory>,
}

#[derive(serde::Serialize)]
struct EvaluateResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<MeansAssessmentOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn respond(resp: &EvaluateResponse) {
    println!("{}", serde_json::to_string(resp).unwrap_or_default());
}

fn run() -> Result<MeansAssessmentOutcome> {
    let config = EngineConfig::from_env()?;

    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    let evaluate: EvaluateRequest = serde_json::from_str(&input)?;

    let mut registry = CriteriaRegistry::new();
    let rows = registry.load_from_file(&config.criteria_path)?;
    tracing::debug!(path = %config.criteria_path.display(), rows, "Loaded criteria");

    let history = InMemoryAssessmentHistory::from_histories(evaluate.history);
    MeansAssessmentService::new(&registry, &history).assess(&evaluate.request)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(outcome) => respond(&EvaluateResponse {
            outcome: Some(outcome),
            error: None,
        }),
        Err(e) => {
            tracing::error!(error = %e, "Assessment failed");
            respond(&EvaluateResponse {
                outcome: None,
                error: Some(e.to_string()),
            });
            std::process::exit(1);
        }
    }
}
