// crates/plagiarism-e2e/src/runner.rs
// ============================================================================
// Module: Orchestrator
// Description: Sequential scenario state machine for one E2E run.
// Purpose: Run every scenario in order, stop at the first failure, report.
// Dependencies: crate::scenarios, crate::report, crate::events
// ============================================================================

//! ## Overview
//! The orchestrator walks `HealthCheck -> SubmitAndReport -> PlagiarismLink ->
//! WordCloud -> NotFound -> Done` with no branching and no retries. Identifiers
//! produced by the submission scenario travel inside the state that needs
//! them. Scenario errors are caught here and only here; [`Orchestrator::run`]
//! always returns a [`RunReport`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::sync::Arc;
use std::time::Instant;

use crate::client::PipelineClient;
use crate::config::HarnessConfig;
use crate::events::EventSink;
use crate::events::ScenarioEvent;
use crate::events::duration_millis;
use crate::events::now_millis;
use crate::report::RunReport;
use crate::report::ScenarioOutcome;
use crate::report::ScenarioStatus;
use crate::scenarios::Scenario;
use crate::scenarios::ScenarioContext;
use crate::scenarios::health::verify_health;
use crate::scenarios::not_found::verify_not_found;
use crate::scenarios::plagiarism_link::verify_plagiarism_link;
use crate::scenarios::submission::SubmissionIds;
use crate::scenarios::submission::verify_submit_and_report;
use crate::scenarios::word_cloud::verify_word_cloud;
use crate::verify::HarnessResult;

// ============================================================================
// SECTION: State Machine
// ============================================================================

/// Position in the fixed scenario sequence.
#[derive(Debug)]
enum RunState {
    /// Check every service.
    HealthCheck,
    /// Submit, check reports and the summary.
    SubmitAndReport,
    /// Check the duplicate's plagiarism report.
    PlagiarismLink(SubmissionIds),
    /// Check the first file's word cloud.
    WordCloud(SubmissionIds),
    /// Check 404 semantics.
    NotFound,
    /// Every scenario passed.
    Done,
}

impl RunState {
    /// Scenario executed in this state, `None` once done.
    const fn scenario(&self) -> Option<Scenario> {
        match self {
            Self::HealthCheck => Some(Scenario::HealthCheck),
            Self::SubmitAndReport => Some(Scenario::SubmitAndReport),
            Self::PlagiarismLink(_) => Some(Scenario::PlagiarismLink),
            Self::WordCloud(_) => Some(Scenario::WordCloud),
            Self::NotFound => Some(Scenario::NotFound),
            Self::Done => None,
        }
    }
}

// ============================================================================
// SECTION: Orchestrator
// ============================================================================

/// Drives one run and writes human-readable progress to `out`.
pub struct Orchestrator<W: Write> {
    /// Client shared by every scenario.
    client: PipelineClient,
    /// Structured event sink.
    events: Arc<dyn EventSink>,
    /// Plagiarism score threshold.
    min_plagiarism_score: f64,
    /// Progress output.
    out: W,
}

impl<W: Write> Orchestrator<W> {
    /// Creates an orchestrator over a configured client.
    pub fn new(
        config: &HarnessConfig,
        client: PipelineClient,
        events: Arc<dyn EventSink>,
        out: W,
    ) -> Self {
        Self {
            client,
            events,
            min_plagiarism_score: config.min_plagiarism_score,
            out,
        }
    }

    /// Runs every scenario in order and returns the run report.
    pub async fn run(&mut self) -> RunReport {
        let started_at_ms = now_millis();
        self.start_banner();

        let mut outcomes = Vec::with_capacity(Scenario::ORDER.len());
        let mut state = RunState::HealthCheck;
        while let Some(scenario) = state.scenario() {
            self.line(scenario.heading());
            self.events.record_scenario(&ScenarioEvent::started(scenario));
            let started = Instant::now();
            let mut ctx = ScenarioContext::new(&self.client, self.min_plagiarism_score);
            let result = advance(&mut ctx, state).await;
            let notes = ctx.take_notes();
            let duration_ms = duration_millis(started.elapsed());
            for note in &notes {
                self.line(note);
            }

            match result {
                Ok(next) => {
                    self.events.record_scenario(&ScenarioEvent::finished(scenario, "passed", None));
                    outcomes.push(ScenarioOutcome {
                        scenario,
                        status: ScenarioStatus::Passed,
                        duration_ms,
                        notes,
                    });
                    state = next;
                }
                Err(err) => {
                    let status = ScenarioStatus::failed(&err);
                    self.events.record_scenario(&ScenarioEvent::finished(
                        scenario,
                        status.label(),
                        Some(err.to_string()),
                    ));
                    outcomes.push(ScenarioOutcome {
                        scenario,
                        status,
                        duration_ms,
                        notes,
                    });
                    outcomes.extend(
                        Scenario::ORDER
                            .into_iter()
                            .skip_while(|candidate| *candidate != scenario)
                            .skip(1)
                            .map(ScenarioOutcome::not_run),
                    );
                    break;
                }
            }
        }

        let report =
            RunReport::new(self.client.endpoints().clone(), started_at_ms, now_millis(), outcomes);
        self.line(&report.final_banner());
        report
    }

    /// Prints the start banner with the three endpoints.
    fn start_banner(&mut self) {
        let endpoints = self.client.endpoints().clone();
        self.line("=== Plagiarism pipeline E2E run ===");
        self.line(&format!("public api:   {}", endpoints.public_api_url));
        self.line(&format!("checker:      {}", endpoints.checker_url));
        self.line(&format!("file storage: {}", endpoints.file_storage_url));
    }

    /// Writes one progress line; output failures never abort the run.
    fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
    }
}

/// Runs the scenario for `state` and returns the next state.
async fn advance(ctx: &mut ScenarioContext<'_>, state: RunState) -> HarnessResult<RunState> {
    match state {
        RunState::HealthCheck => {
            verify_health(ctx).await?;
            Ok(RunState::SubmitAndReport)
        }
        RunState::SubmitAndReport => {
            let ids = verify_submit_and_report(ctx).await?;
            Ok(RunState::PlagiarismLink(ids))
        }
        RunState::PlagiarismLink(ids) => {
            verify_plagiarism_link(ctx, &ids.work1_id, &ids.work2_id).await?;
            Ok(RunState::WordCloud(ids))
        }
        RunState::WordCloud(ids) => {
            verify_word_cloud(ctx, &ids.file1_id).await?;
            Ok(RunState::NotFound)
        }
        RunState::NotFound => {
            verify_not_found(ctx).await?;
            Ok(RunState::Done)
        }
        RunState::Done => Ok(RunState::Done),
    }
}
