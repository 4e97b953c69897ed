// crates/plagiarism-e2e/src/scenarios/plagiarism_link.rs
// ============================================================================
// Module: Plagiarism-Link Scenario
// Description: Source work and score on a duplicate's plagiarism report.
// Purpose: Verify that a flagged report points back at the original work.
// Dependencies: crate::client, crate::verify
// ============================================================================

//! The first plagiarism-flagged report of the duplicate must name the
//! original work as `sourceWorkId` (exact match) and carry a
//! `plagiarismScore` at or above the configured threshold.

use crate::ids::WorkId;
use crate::scenarios::ScenarioContext;
use crate::verify::HarnessResult;
use crate::verify::VerificationError;
use crate::verify::ensure;

/// Verifies the duplicate's plagiarism report against the original work.
///
/// # Errors
///
/// Returns the first violated expectation, naming expected and actual values.
pub async fn verify_plagiarism_link(
    ctx: &mut ScenarioContext<'_>,
    original: &WorkId,
    duplicate: &WorkId,
) -> HarnessResult<()> {
    let reports = ctx.client().work_reports(duplicate).await?.or_empty();
    ensure(!reports.is_empty(), "reports for the duplicate work", "at least one report", "none")?;

    let report = reports.iter().find(|report| report.is_plagiarism).ok_or_else(|| {
        VerificationError::Invariant {
            check: "plagiarism-flagged report for the duplicate work".to_string(),
            expected: "at least one report with isPlagiarism=true".to_string(),
            actual: format!("{} reports, none flagged", reports.len()),
        }
    })?;

    let source = report.source_work_id.as_ref().ok_or_else(|| VerificationError::Invariant {
        check: "plagiarism report sourceWorkId".to_string(),
        expected: original.to_string(),
        actual: "absent".to_string(),
    })?;
    ensure(
        source == original,
        "plagiarism report sourceWorkId points at the first work",
        original,
        source,
    )?;

    let min_score = ctx.min_plagiarism_score();
    let score = report.plagiarism_score.ok_or_else(|| VerificationError::Invariant {
        check: "plagiarism report plagiarismScore".to_string(),
        expected: format!(">= {min_score}"),
        actual: "absent".to_string(),
    })?;
    ensure(score >= min_score, "plagiarism report plagiarismScore", format!(">= {min_score}"), score)?;

    ctx.note(format!(
        "OK: plagiarism report sourceWorkId points at the first work, plagiarismScore={score}"
    ));
    Ok(())
}
