// crates/plagiarism-e2e/src/scenarios/mod.rs
// ============================================================================
// Module: Scenarios
// Description: Behavioral contracts verified against the pipeline.
// Purpose: Encapsulate one contract per scenario with shared context.
// Dependencies: crate::client, crate::verify
// ============================================================================

//! ## Overview
//! Each scenario calls client shims and verification primitives and may assert
//! invariants across several calls. Scenarios fail fast: the first violated
//! assertion returns an error and nothing after it runs. Progress lines go to
//! the [`ScenarioContext`] notes buffer so the orchestrator owns all output.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod health;
pub mod not_found;
pub mod plagiarism_link;
pub mod submission;
pub mod word_cloud;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;

use crate::client::PipelineClient;

// ============================================================================
// SECTION: Scenario Labels
// ============================================================================

/// Scenarios in their fixed execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// Liveness of every service.
    HealthCheck,
    /// Submission, per-assignment plagiarism, reports, and summary.
    SubmitAndReport,
    /// Source work and score on the duplicate's plagiarism report.
    PlagiarismLink,
    /// Word-cloud rendering content type.
    WordCloud,
    /// 404 semantics for unknown works and assignments.
    NotFound,
}

impl Scenario {
    /// Fixed execution order.
    pub const ORDER: [Self; 5] = [
        Self::HealthCheck,
        Self::SubmitAndReport,
        Self::PlagiarismLink,
        Self::WordCloud,
        Self::NotFound,
    ];

    /// Returns a stable label for the scenario.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HealthCheck => "health_check",
            Self::SubmitAndReport => "submit_and_report",
            Self::PlagiarismLink => "plagiarism_link",
            Self::WordCloud => "word_cloud",
            Self::NotFound => "not_found",
        }
    }

    /// Returns the progress heading printed before the scenario runs.
    #[must_use]
    pub const fn heading(self) -> &'static str {
        match self {
            Self::HealthCheck => "== Checking /status on every service ==",
            Self::SubmitAndReport => "== Checking submission and report retrieval ==",
            Self::PlagiarismLink => "== Checking plagiarism link (sourceWorkId, plagiarismScore) ==",
            Self::WordCloud => "== Checking word cloud ==",
            Self::NotFound => "== Checking negative scenarios (404) ==",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Context
// ============================================================================

/// Shared state handed to every scenario.
pub struct ScenarioContext<'a> {
    /// Client shared across the run.
    client: &'a PipelineClient,
    /// Minimum score a plagiarism-flagged report must reach.
    min_plagiarism_score: f64,
    /// Progress lines produced so far by the running scenario.
    notes: Vec<String>,
}

impl<'a> ScenarioContext<'a> {
    /// Creates a context over a shared client.
    #[must_use]
    pub const fn new(client: &'a PipelineClient, min_plagiarism_score: f64) -> Self {
        Self {
            client,
            min_plagiarism_score,
            notes: Vec::new(),
        }
    }

    /// Returns the shared client.
    #[must_use]
    pub const fn client(&self) -> &'a PipelineClient {
        self.client
    }

    /// Returns the plagiarism score threshold.
    #[must_use]
    pub const fn min_plagiarism_score(&self) -> f64 {
        self.min_plagiarism_score
    }

    /// Appends a progress line.
    pub fn note(&mut self, line: impl Into<String>) {
        self.notes.push(line.into());
    }

    /// Drains the progress lines collected so far.
    pub fn take_notes(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notes)
    }
}
