// crates/plagiarism-e2e/src/verify.rs
// ============================================================================
// Module: Verification Primitives
// Description: Status and field assertions plus the harness error taxonomy.
// Purpose: Fail loudly with enough context to diagnose without re-running.
// Dependencies: reqwest, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Two error kinds exist. [`VerificationError`] means the system under test
//! answered but violated its contract (status, missing field, wrong shape, or
//! business invariant). [`UnexpectedFailure`] means the harness could not get
//! a usable answer at all (transport, undecodable body, client setup). Both
//! travel inside [`HarnessError`] and are caught once, at the orchestrator.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Display;

use reqwest::Method;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum body characters embedded in a diagnostic message.
pub const MAX_DIAGNOSTIC_BODY_CHARS: usize = 2_048;

// ============================================================================
// SECTION: Observed Response
// ============================================================================

/// Fully buffered HTTP exchange, captured before any assertion runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedResponse {
    /// Request method.
    pub method: Method,
    /// Request URL.
    pub url: String,
    /// Response status.
    pub status: StatusCode,
    /// Response `Content-Type` header, when present and valid UTF-8.
    pub content_type: Option<String>,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl ObservedResponse {
    /// Returns the body as lossy UTF-8 text.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`UnexpectedFailure::Decode`] when the body is not valid JSON.
    pub fn json(&self) -> Result<Value, UnexpectedFailure> {
        serde_json::from_slice(&self.body).map_err(|err| UnexpectedFailure::Decode {
            url: self.url.clone(),
            detail: format!("{err}; body={}", truncate_body(&self.text())),
        })
    }

    /// Returns `METHOD URL` for diagnostics.
    #[must_use]
    pub fn request_line(&self) -> String {
        format!("{} {}", self.method, self.url)
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Contract violations observed in the system under test.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    /// Response status differs from the expected code.
    #[error(
        "expected status {expected}, got {actual}. URL={method} {url}, body={body}"
    )]
    StatusMismatch {
        /// Request method.
        method: String,
        /// Request URL.
        url: String,
        /// Expected status code.
        expected: u16,
        /// Actual status code.
        actual: u16,
        /// Raw response body (truncated).
        body: String,
    },
    /// A required key is absent from a decoded body.
    #[error("{context}: response is missing field '{field}': {body}")]
    MissingField {
        /// Operation that produced the body.
        context: String,
        /// First missing key.
        field: String,
        /// Full decoded body.
        body: String,
    },
    /// The body decoded but has the wrong shape.
    #[error("{context}: expected {expected}, got: {body}")]
    UnexpectedShape {
        /// Operation that produced the body.
        context: String,
        /// Description of the expected shape.
        expected: String,
        /// Full decoded body.
        body: String,
    },
    /// A business invariant across one or more calls does not hold.
    #[error("{check}: expected {expected}, got {actual}")]
    Invariant {
        /// What was checked.
        check: String,
        /// Expected value or condition.
        expected: String,
        /// Observed value.
        actual: String,
    },
}

/// Failures that prevent obtaining a usable answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnexpectedFailure {
    /// The request could not be sent or the response could not be read.
    #[error("transport error on {method} {url}: {detail}")]
    Transport {
        /// Request method.
        method: String,
        /// Request URL.
        url: String,
        /// Underlying error chain.
        detail: String,
    },
    /// The body is not decodable JSON.
    #[error("undecodable response from {url}: {detail}")]
    Decode {
        /// Request URL.
        url: String,
        /// Decoder error and body excerpt.
        detail: String,
    },
    /// Client construction or request building failed.
    #[error("http client error: {0}")]
    Client(String),
}

/// Harness error: a contract violation or an unexpected failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HarnessError {
    /// The system under test violated its contract.
    #[error(transparent)]
    Verification(#[from] VerificationError),
    /// The harness could not obtain a usable answer.
    #[error(transparent)]
    Unexpected(#[from] UnexpectedFailure),
}

/// Result alias for harness operations.
pub type HarnessResult<T> = Result<T, HarnessError>;

// ============================================================================
// SECTION: Assertions
// ============================================================================

/// Fails with [`VerificationError::StatusMismatch`] unless the status matches.
///
/// # Errors
///
/// Returns the mismatch with method, URL, expected/actual code, and body.
pub fn assert_status(
    response: &ObservedResponse,
    expected: StatusCode,
) -> Result<(), VerificationError> {
    if response.status == expected {
        return Ok(());
    }
    Err(VerificationError::StatusMismatch {
        method: response.method.to_string(),
        url: response.url.clone(),
        expected: expected.as_u16(),
        actual: response.status.as_u16(),
        body: truncate_body(&response.text()),
    })
}

/// Fails with [`VerificationError::MissingField`] naming the first absent key.
///
/// A body that is not a JSON object is missing every key.
///
/// # Errors
///
/// Returns the first missing key along with the full body.
pub fn assert_fields_present(
    body: &Value,
    required: &[&str],
    context: &str,
) -> Result<(), VerificationError> {
    let object = body.as_object();
    for field in required {
        if !object.is_some_and(|map| map.contains_key(*field)) {
            return Err(VerificationError::MissingField {
                context: context.to_string(),
                field: (*field).to_string(),
                body: body.to_string(),
            });
        }
    }
    Ok(())
}

/// Fails with [`VerificationError::Invariant`] unless `holds` is true.
///
/// # Errors
///
/// Returns the named check with expected and actual renderings.
pub fn ensure(
    holds: bool,
    check: &str,
    expected: impl Display,
    actual: impl Display,
) -> Result<(), VerificationError> {
    if holds {
        return Ok(());
    }
    Err(VerificationError::Invariant {
        check: check.to_string(),
        expected: expected.to_string(),
        actual: actual.to_string(),
    })
}

/// Decodes a JSON value into `T`, mapping failures to a shape violation.
///
/// # Errors
///
/// Returns [`VerificationError::UnexpectedShape`] when `T` cannot be built.
pub fn decode_shape<T: serde::de::DeserializeOwned>(
    body: Value,
    context: &str,
    expected: &str,
) -> Result<T, VerificationError> {
    let rendered = body.to_string();
    serde_json::from_value(body).map_err(|err| VerificationError::UnexpectedShape {
        context: context.to_string(),
        expected: format!("{expected} ({err})"),
        body: rendered,
    })
}

/// Truncates body text for embedding in diagnostics.
#[must_use]
pub fn truncate_body(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(MAX_DIAGNOSTIC_BODY_CHARS).collect();
    if chars.next().is_some() { format!("{head}...<truncated>") } else { head }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
#[path = "verify_tests.rs"]
mod tests;
