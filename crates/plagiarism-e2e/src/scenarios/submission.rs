// crates/plagiarism-e2e/src/scenarios/submission.rs
// ============================================================================
// Module: Submit-and-Report Scenario
// Description: Per-assignment plagiarism scoping, reports, and summary.
// Purpose: Verify the core plagiarism contract end to end.
// Dependencies: crate::client, crate::verify
// ============================================================================

//! ## Overview
//! Identical content is submitted three times:
//! 1. under assignment `A` by student 1, which must not be flagged;
//! 2. under `A` by student 2, which must be flagged (same assignment);
//! 3. under a distinct assignment `A2` by student 3, which must not be flagged.
//!
//! Every work must then have at least one report, student 2's reports must
//! include a plagiarism flag, and the summary for `A` must echo `A` and count
//! at least two works with at least one flagged.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::ids::AssignmentId;
use crate::ids::FileId;
use crate::ids::WorkId;
use crate::model::SubmittedWork;
use crate::model::WorkReport;
use crate::model::WorkSubmission;
use crate::scenarios::ScenarioContext;
use crate::verify::HarnessResult;
use crate::verify::ensure;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Content shared by every submission in the scenario.
pub const SHARED_CONTENT: &str = "This is a test file used to check plagiarism logic. Hello HSE!";

/// A student submitting in this scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Student {
    /// Student identifier.
    pub id: &'static str,
    /// Student display name.
    pub name: &'static str,
}

/// Original author under assignment `A`.
pub const FIRST_STUDENT: Student = Student {
    id: "student_1",
    name: "Alice",
};
/// Duplicate author under assignment `A`.
pub const SECOND_STUDENT: Student = Student {
    id: "student_2",
    name: "Bob",
};
/// Author of the same content under assignment `A2`.
pub const THIRD_STUDENT: Student = Student {
    id: "student_3",
    name: "Carol",
};

/// Minimum number of works the summary must count for `A`.
const MIN_SUMMARY_WORKS: u64 = 2;
/// Minimum number of plagiarised works the summary must count for `A`.
const MIN_SUMMARY_PLAGIARISED: u64 = 1;

// ============================================================================
// SECTION: Outputs
// ============================================================================

/// Identifiers produced by the scenario and threaded into later ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionIds {
    /// Assignment `A`.
    pub assignment_id: AssignmentId,
    /// Assignment `A2`, derived from `A`.
    pub other_assignment_id: AssignmentId,
    /// Student 1's work (original).
    pub work1_id: WorkId,
    /// Student 1's file.
    pub file1_id: FileId,
    /// Student 2's work (duplicate under `A`).
    pub work2_id: WorkId,
    /// Student 2's file.
    pub file2_id: FileId,
    /// Student 3's work (same content under `A2`).
    pub work3_id: WorkId,
    /// Student 3's file.
    pub file3_id: FileId,
}

// ============================================================================
// SECTION: Scenario
// ============================================================================

/// Runs the submit-and-report scenario under a fresh assignment.
///
/// # Errors
///
/// Returns the first violated expectation.
pub async fn verify_submit_and_report(
    ctx: &mut ScenarioContext<'_>,
) -> HarnessResult<SubmissionIds> {
    let assignment_id = AssignmentId::fresh();
    let other_assignment_id = assignment_id.derived_other();

    let first = submit(ctx, FIRST_STUDENT, &assignment_id).await?;
    ensure(
        !first.is_plagiarism,
        "first submission of the content is not plagiarism",
        "isPlagiarism=false",
        format!("isPlagiarism={}", first.is_plagiarism),
    )?;

    let second = submit(ctx, SECOND_STUDENT, &assignment_id).await?;
    ensure(
        second.is_plagiarism,
        "same content by another student under the same assignment is plagiarism",
        "isPlagiarism=true",
        format!("isPlagiarism={}", second.is_plagiarism),
    )?;

    let third = submit(ctx, THIRD_STUDENT, &other_assignment_id).await?;
    ensure(
        !third.is_plagiarism,
        "same content under a different assignment is not plagiarism",
        "isPlagiarism=false",
        format!("isPlagiarism={}", third.is_plagiarism),
    )?;

    let client = ctx.client();
    let reports1 = client.work_reports(&first.work_id).await?.or_empty();
    let reports2 = client.work_reports(&second.work_id).await?.or_empty();
    let reports3 = client.work_reports(&third.work_id).await?.or_empty();
    for (label, reports) in [("first", &reports1), ("second", &reports2), ("third", &reports3)] {
        ensure(
            !reports.is_empty(),
            &format!("reports for the {label} work"),
            "at least one report",
            "none",
        )?;
    }
    ensure(
        reports2.iter().any(|report| report.is_plagiarism),
        "reports for the second work carry a plagiarism flag",
        "at least one report with isPlagiarism=true",
        flagged_summary(&reports2),
    )?;
    ctx.note("OK: work reports are returned correctly");

    let summary = client.required_assignment_summary(&assignment_id).await?;
    ensure(
        summary.assignment_id == assignment_id,
        "summary assignmentId echoes the requested assignment",
        &assignment_id,
        &summary.assignment_id,
    )?;
    ensure(
        summary.total_works >= MIN_SUMMARY_WORKS,
        "summary totalWorks counts both submissions under the assignment",
        format!(">= {MIN_SUMMARY_WORKS}"),
        summary.total_works,
    )?;
    ensure(
        summary.plagiarised_count >= MIN_SUMMARY_PLAGIARISED,
        "summary plagiarisedCount counts the duplicate",
        format!(">= {MIN_SUMMARY_PLAGIARISED}"),
        summary.plagiarised_count,
    )?;
    ensure(
        summary.plagiarised_count <= summary.total_works,
        "summary plagiarisedCount never exceeds totalWorks",
        format!("<= {}", summary.total_works),
        summary.plagiarised_count,
    )?;
    ctx.note(format!(
        "OK: assignment summary assignmentId={}, totalWorks={}, plagiarisedCount={}",
        summary.assignment_id, summary.total_works, summary.plagiarised_count
    ));

    Ok(SubmissionIds {
        assignment_id,
        other_assignment_id,
        work1_id: first.work_id,
        file1_id: first.file_id,
        work2_id: second.work_id,
        file2_id: second.file_id,
        work3_id: third.work_id,
        file3_id: third.file_id,
    })
}

/// Submits the shared content as `student` under `assignment_id`.
async fn submit(
    ctx: &mut ScenarioContext<'_>,
    student: Student,
    assignment_id: &AssignmentId,
) -> HarnessResult<SubmittedWork> {
    let submission = WorkSubmission {
        student_id: student.id.to_string(),
        student_name: student.name.to_string(),
        assignment_id: assignment_id.clone(),
        content: SHARED_CONTENT.to_string(),
    };
    let work = ctx.client().submit_work(&submission).await?;
    ctx.note(format!(
        "submit_work: assignment={assignment_id}, student={}, isPlagiarism={}",
        student.id, work.is_plagiarism
    ));
    Ok(work)
}

/// Describes how many of `reports` are flagged.
fn flagged_summary(reports: &[WorkReport]) -> String {
    let flagged = reports.iter().filter(|report| report.is_plagiarism).count();
    format!("{flagged} of {} reports flagged", reports.len())
}
