// crates/plagiarism-e2e/src/scenarios/not_found.rs
// ============================================================================
// Module: Not-Found Scenario
// Description: 404 semantics for identifiers that were never used.
// Purpose: Verify unknown works and assignments are reported as absent.
// Dependencies: crate::client, crate::verify
// ============================================================================

//! Both lookups must answer exactly 404. A 200 (even with an empty list) or
//! any other status fails the scenario.

use reqwest::StatusCode;

use crate::client::Service;
use crate::ids::AssignmentId;
use crate::ids::WorkId;
use crate::scenarios::ScenarioContext;
use crate::verify::HarnessResult;
use crate::verify::assert_status;

/// Verifies 404 for a random work id and a never-used assignment id.
///
/// # Errors
///
/// Returns a status mismatch for the first lookup not answering 404.
pub async fn verify_not_found(ctx: &mut ScenarioContext<'_>) -> HarnessResult<()> {
    let work_id = WorkId::random();
    let response = ctx
        .client()
        .get(Service::PublicApi, &["api", "works", work_id.as_str(), "reports"])
        .await?;
    assert_status(&response, StatusCode::NOT_FOUND)?;
    ctx.note(format!("OK: /api/works/{work_id}/reports returned 404 for an unknown work"));

    let assignment_id = AssignmentId::never_used();
    let response = ctx
        .client()
        .get(Service::PublicApi, &["api", "assignments", assignment_id.as_str(), "reports"])
        .await?;
    assert_status(&response, StatusCode::NOT_FOUND)?;
    ctx.note(format!(
        "OK: /api/assignments/{assignment_id}/reports returned 404 for an unknown assignment"
    ));
    Ok(())
}
