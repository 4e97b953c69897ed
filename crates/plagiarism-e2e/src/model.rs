// crates/plagiarism-e2e/src/model.rs
// ============================================================================
// Module: Observed Records
// Description: Response-shaped records decoded from the pipeline.
// Purpose: Give scenarios typed access to works, reports, and summaries.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! These records mirror what the public API returns. They are transient: the
//! harness holds them for a single run and never mutates them. Field names on
//! the wire are camelCase.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::ids::AssignmentId;
use crate::ids::FileId;
use crate::ids::ReportId;
use crate::ids::WorkId;

// ============================================================================
// SECTION: Requests
// ============================================================================

/// Inputs for one submission through the public API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkSubmission {
    /// Student identifier.
    pub student_id: String,
    /// Student display name.
    pub student_name: String,
    /// Assignment the work belongs to.
    pub assignment_id: AssignmentId,
    /// Raw text content, uploaded as `work.txt`.
    pub content: String,
}

// ============================================================================
// SECTION: Responses
// ============================================================================

/// Keys the submit response must carry.
pub const SUBMITTED_WORK_FIELDS: [&str; 4] = ["workId", "reportId", "isPlagiarism", "fileId"];

/// Keys the assignment summary must carry.
pub const ASSIGNMENT_SUMMARY_FIELDS: [&str; 3] = ["assignmentId", "totalWorks", "plagiarisedCount"];

/// Result of a successful submission. Plagiarism is resolved synchronously.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedWork {
    /// Newly created work.
    pub work_id: WorkId,
    /// Report produced during submission.
    pub report_id: ReportId,
    /// Whether the checker flagged the work at submission time.
    pub is_plagiarism: bool,
    /// Stored file backing the work.
    pub file_id: FileId,
}

/// Plagiarism-check result attached to a work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkReport {
    /// Whether the work is judged a duplicate.
    pub is_plagiarism: bool,
    /// Earlier work this one duplicates.
    #[serde(default)]
    pub source_work_id: Option<WorkId>,
    /// Similarity score; higher is more similar.
    #[serde(default)]
    pub plagiarism_score: Option<f64>,
    /// Report identifier, when returned.
    #[serde(default)]
    pub report_id: Option<ReportId>,
    /// Owning work, when returned.
    #[serde(default)]
    pub work_id: Option<WorkId>,
    /// Submitting student, when returned.
    #[serde(default)]
    pub student_id: Option<String>,
    /// Submitting student's display name, when returned.
    #[serde(default)]
    pub student_name: Option<String>,
    /// Assignment of the owning work, when returned.
    #[serde(default)]
    pub assignment_id: Option<AssignmentId>,
    /// Creation timestamp as reported by the service.
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Aggregate plagiarism statistics for one assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentSummary {
    /// Echo of the requested assignment.
    pub assignment_id: AssignmentId,
    /// Number of works submitted under the assignment.
    pub total_works: u64,
    /// Number of those works with at least one plagiarism report.
    pub plagiarised_count: u64,
}

// ============================================================================
// SECTION: Lookup
// ============================================================================

/// Outcome of a lookup where 404 is a legitimate answer rather than an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    /// The service returned 200 with a decoded body.
    Found(T),
    /// The service returned 404.
    NotFound,
}

impl<T> Lookup<T> {
    /// Returns true when the service answered 404.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Returns the found value, if any.
    #[must_use]
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::NotFound => None,
        }
    }
}

impl<T> Lookup<Vec<T>> {
    /// Normalizes 404 to an empty sequence.
    #[must_use]
    pub fn or_empty(self) -> Vec<T> {
        self.found().unwrap_or_default()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
