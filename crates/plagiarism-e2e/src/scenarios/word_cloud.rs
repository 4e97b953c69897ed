// crates/plagiarism-e2e/src/scenarios/word_cloud.rs
// ============================================================================
// Module: Word-Cloud Scenario
// Description: Rendering endpoint content type for a stored file.
// Purpose: Verify the word cloud is served as a PNG image.
// Dependencies: crate::client, crate::verify
// ============================================================================

//! The body is an opaque rendered image; only status and media type are
//! checked.

use crate::ids::FileId;
use crate::scenarios::ScenarioContext;
use crate::verify::HarnessResult;
use crate::verify::ensure;

/// Media type the rendering must declare.
pub const WORD_CLOUD_MEDIA_TYPE: &str = "image/png";

/// Verifies the word-cloud rendering of `file_id`.
///
/// # Errors
///
/// Returns a status mismatch or a content-type violation.
pub async fn verify_word_cloud(ctx: &mut ScenarioContext<'_>, file_id: &FileId) -> HarnessResult<()> {
    let response = ctx.client().word_cloud(file_id).await?;
    let content_type = response.content_type.as_deref().unwrap_or_default();
    ensure(
        content_type.contains(WORD_CLOUD_MEDIA_TYPE),
        &format!("Content-Type of /api/files/{file_id}/wordCloud"),
        WORD_CLOUD_MEDIA_TYPE,
        if content_type.is_empty() { "<missing>" } else { content_type },
    )?;
    ctx.note(format!("OK: wordCloud returned a PNG image ({} bytes)", response.body.len()));
    Ok(())
}
