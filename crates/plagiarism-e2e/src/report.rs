// crates/plagiarism-e2e/src/report.rs
// ============================================================================
// Module: Run Report
// Description: Per-scenario outcomes, final banners, and run artifacts.
// Purpose: Summarize a run for humans and for CI in a deterministic form.
// Dependencies: serde, serde_jcs
// ============================================================================

//! ## Overview
//! A [`RunReport`] is the single value the orchestrator produces. It renders
//! the final progress banner and, when a report directory is configured, is
//! persisted as `summary.json` (canonical JSON) and `summary.md`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;

use crate::config::Endpoints;
use crate::scenarios::Scenario;
use crate::verify::HarnessError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// File name of the canonical JSON summary.
pub const SUMMARY_JSON_FILE: &str = "summary.json";
/// File name of the Markdown summary.
pub const SUMMARY_MARKDOWN_FILE: &str = "summary.md";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Which error family ended a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The system under test violated its contract.
    Verification,
    /// The harness could not obtain a usable answer.
    Unexpected,
}

impl FailureKind {
    /// Classifies a harness error.
    #[must_use]
    pub const fn of(err: &HarnessError) -> Self {
        match err {
            HarnessError::Verification(_) => Self::Verification,
            HarnessError::Unexpected(_) => Self::Unexpected,
        }
    }

    /// Returns a stable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Verification => "verification",
            Self::Unexpected => "unexpected",
        }
    }
}

/// Outcome of one scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ScenarioStatus {
    /// Every assertion held.
    Passed,
    /// The scenario stopped at its first failing assertion.
    Failed {
        /// Error family.
        kind: FailureKind,
        /// Rendered error.
        detail: String,
    },
    /// An earlier scenario failed.
    NotRun,
}

impl ScenarioStatus {
    /// Builds a failed status from a harness error.
    #[must_use]
    pub fn failed(err: &HarnessError) -> Self {
        Self::Failed {
            kind: FailureKind::of(err),
            detail: err.to_string(),
        }
    }

    /// Returns a stable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed {
                ..
            } => "failed",
            Self::NotRun => "not_run",
        }
    }
}

/// One scenario's record in the run report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioOutcome {
    /// Scenario label.
    pub scenario: Scenario,
    /// Result of the scenario.
    pub status: ScenarioStatus,
    /// Wall-clock duration in milliseconds (zero when not run).
    pub duration_ms: u64,
    /// Progress lines produced while the scenario ran.
    pub notes: Vec<String>,
}

impl ScenarioOutcome {
    /// Builds the record of a scenario skipped after an earlier failure.
    #[must_use]
    pub const fn not_run(scenario: Scenario) -> Self {
        Self {
            scenario,
            status: ScenarioStatus::NotRun,
            duration_ms: 0,
            notes: Vec::new(),
        }
    }
}

/// Overall run verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Every scenario passed.
    Passed,
    /// At least one scenario did not pass.
    Failed,
}

/// Result of a complete run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Overall verdict.
    pub status: RunStatus,
    /// Run start (milliseconds since epoch).
    pub started_at_ms: u64,
    /// Run end (milliseconds since epoch).
    pub ended_at_ms: u64,
    /// Run duration in milliseconds.
    pub duration_ms: u64,
    /// Service base URLs exercised by the run.
    pub endpoints: Endpoints,
    /// Outcomes in execution order.
    pub scenarios: Vec<ScenarioOutcome>,
}

// ============================================================================
// SECTION: Report
// ============================================================================

impl RunReport {
    /// Assembles a report; the verdict passes only if every scenario passed.
    #[must_use]
    pub fn new(
        endpoints: Endpoints,
        started_at_ms: u64,
        ended_at_ms: u64,
        scenarios: Vec<ScenarioOutcome>,
    ) -> Self {
        let all_passed = !scenarios.is_empty()
            && scenarios.iter().all(|outcome| outcome.status == ScenarioStatus::Passed);
        Self {
            status: if all_passed { RunStatus::Passed } else { RunStatus::Failed },
            started_at_ms,
            ended_at_ms,
            duration_ms: ended_at_ms.saturating_sub(started_at_ms),
            endpoints,
            scenarios,
        }
    }

    /// Returns true when every scenario passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.status == RunStatus::Passed
    }

    /// Returns the scenario that ended the run, with its failure.
    #[must_use]
    pub fn failure(&self) -> Option<(Scenario, FailureKind, &str)> {
        self.scenarios.iter().find_map(|outcome| match &outcome.status {
            ScenarioStatus::Failed {
                kind,
                detail,
            } => Some((outcome.scenario, *kind, detail.as_str())),
            _ => None,
        })
    }

    /// Renders the final progress banner.
    #[must_use]
    pub fn final_banner(&self) -> String {
        match self.failure() {
            None if self.passed() => "=== ALL E2E SCENARIOS PASSED ===".to_string(),
            None => "=== E2E RUN INCOMPLETE ===".to_string(),
            Some((scenario, FailureKind::Verification, detail)) => {
                format!("=== E2E VERIFICATION FAILED in {scenario} ===\n{detail}")
            }
            Some((scenario, FailureKind::Unexpected, detail)) => {
                format!("=== E2E RUN ABORTED by an unexpected error in {scenario} ===\n{detail}")
            }
        }
    }

    /// Renders the Markdown summary.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        let verdict = match self.status {
            RunStatus::Passed => "passed",
            RunStatus::Failed => "failed",
        };
        let _ = writeln!(out, "# Plagiarism pipeline E2E run");
        let _ = writeln!(out);
        let _ = writeln!(out, "- Status: **{verdict}**");
        let _ = writeln!(out, "- Duration: {} ms", self.duration_ms);
        let _ = writeln!(out, "- Public API: `{}`", self.endpoints.public_api_url);
        let _ = writeln!(out, "- Checker: `{}`", self.endpoints.checker_url);
        let _ = writeln!(out, "- File storage: `{}`", self.endpoints.file_storage_url);
        let _ = writeln!(out);
        let _ = writeln!(out, "| Scenario | Status | Duration (ms) |");
        let _ = writeln!(out, "| --- | --- | --- |");
        for outcome in &self.scenarios {
            let _ = writeln!(
                out,
                "| {} | {} | {} |",
                outcome.scenario,
                outcome.status.label(),
                outcome.duration_ms
            );
        }
        if let Some((scenario, kind, detail)) = self.failure() {
            let _ = writeln!(out);
            let _ = writeln!(out, "## Failure in `{scenario}` ({})", kind.as_str());
            let _ = writeln!(out);
            let _ = writeln!(out, "```text\n{detail}\n```");
        }
        out
    }

    /// Writes `summary.json` and `summary.md` into `dir`, creating it.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory or a file cannot be written.
    pub fn write_artifacts(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        fs::create_dir_all(dir)?;
        let json_path = dir.join(SUMMARY_JSON_FILE);
        let bytes = serde_jcs::to_vec(self).map_err(|err| io::Error::other(err.to_string()))?;
        fs::write(&json_path, bytes)?;
        let markdown_path = dir.join(SUMMARY_MARKDOWN_FILE);
        fs::write(&markdown_path, self.to_markdown().as_bytes())?;
        Ok(vec![json_path, markdown_path])
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
