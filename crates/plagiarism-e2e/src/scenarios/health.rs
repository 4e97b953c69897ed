// crates/plagiarism-e2e/src/scenarios/health.rs
// ============================================================================
// Module: Health Scenario
// Description: Liveness check of every service under test.
// Purpose: Establish the precondition for every later scenario.
// Dependencies: crate::client
// ============================================================================

//! Each service must answer `GET /status` with 200. The body is free-form
//! text and is only echoed into the progress output.

use crate::client::Service;
use crate::scenarios::ScenarioContext;
use crate::verify::HarnessResult;

/// Checks file storage, checker, and public API in that order.
///
/// # Errors
///
/// Returns the first failed check.
pub async fn verify_health(ctx: &mut ScenarioContext<'_>) -> HarnessResult<()> {
    for service in Service::HEALTH_ORDER {
        let body = ctx.client().check_status(service).await?;
        ctx.note(format!("OK: {} /status => {body}", service.name()));
    }
    Ok(())
}
