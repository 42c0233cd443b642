//! HTTP endpoint contract verification
//!
//! Issues GET requests to the service's public routes and checks status codes
//! and the minimal JSON shape each route promises. Runs in-process against the
//! router or over the network against a deployed instance.

pub mod checks;
pub mod probe;
pub mod report;

pub use checks::*;
pub use probe::*;
pub use report::*;

use std::time::Instant;
use tracing::{debug, info, warn};

/// Run every check `rounds` times. Checks are independent; a transport error or
/// mismatch in one does not stop the others.
pub async fn run_checks(
    probe: &dyn Probe,
    checks: &[EndpointCheck],
    rounds: u32,
) -> VerificationReport {
    let target = probe.target();
    info!("Verifying {} checks x {} rounds against {}", checks.len(), rounds, target);

    let mut outcomes = Vec::new();
    for round in 1..=rounds.max(1) {
        for check in checks {
            debug!("Round {}: {}", round, check);
            let start = Instant::now();
            let result = probe.get(check.path).await;
            let duration_ms = start.elapsed().as_millis() as u64;

            let outcome = match result {
                Ok(response) => {
                    let verdict = check.evaluate(&response);
                    CheckOutcome {
                        name: check.name,
                        path: check.path,
                        round,
                        status: if verdict.is_ok() { CheckStatus::Pass } else { CheckStatus::Fail },
                        observed_status: Some(response.status),
                        duration_ms,
                        message: verdict.err(),
                    }
                }
                Err(e) => CheckOutcome {
                    name: check.name,
                    path: check.path,
                    round,
                    status: CheckStatus::Error,
                    observed_status: None,
                    duration_ms,
                    message: Some(format!("{:#}", e)),
                },
            };

            if outcome.status != CheckStatus::Pass {
                warn!("{}", outcome);
            }
            outcomes.push(outcome);
        }
    }

    VerificationReport { target, outcomes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;
    use serde_json::json;

    struct FixedProbe;

    #[async_trait]
    impl Probe for FixedProbe {
        async fn get(&self, path: &str) -> Result<ProbeResponse> {
            match path {
                "/health" => Ok(ProbeResponse { status: 200, body: Some(json!({"status": "ok"})) }),
                "/translation/languages" => Ok(ProbeResponse {
                    status: 200,
                    body: Some(json!({"success": false, "data": null})),
                }),
                "/chatbot/categories" => anyhow::bail!("connection reset"),
                _ => Ok(ProbeResponse { status: 404, body: None }),
            }
        }

        fn target(&self) -> String {
            "fixed".to_string()
        }
    }

    #[tokio::test]
    async fn records_pass_fail_and_error() {
        let report = run_checks(&FixedProbe, &contract_checks(), 1).await;
        let statuses: Vec<_> = report.outcomes.iter().map(|o| o.status).collect();
        assert_eq!(
            statuses,
            vec![CheckStatus::Pass, CheckStatus::Fail, CheckStatus::Error, CheckStatus::Pass]
        );
        assert_eq!(report.passed(), 2);
        assert!(!report.all_passed());
        assert_eq!(report.failures().count(), 2);

        let rendered = report.to_string();
        assert!(rendered.contains("connection reset"));
        assert!(rendered.ends_with("2 passed, 2 failed"));
    }

    #[tokio::test]
    async fn repeats_each_round() {
        let report = run_checks(&FixedProbe, &contract_checks()[..1], 3).await;
        assert_eq!(report.outcomes.len(), 3);
        assert_eq!(report.outcomes[2].round, 3);
        assert!(report.all_passed());
    }

    #[tokio::test]
    async fn zero_rounds_still_runs_once() {
        let report = run_checks(&FixedProbe, &contract_checks()[..1], 0).await;
        assert_eq!(report.outcomes.len(), 1);
    }
}
