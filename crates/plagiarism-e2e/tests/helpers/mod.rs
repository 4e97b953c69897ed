// crates/plagiarism-e2e/tests/helpers/mod.rs
// ============================================================================
// Module: Integration Test Helpers
// Description: Shared helpers for plagiarism-e2e integration tests.
// Purpose: Provide an in-process pipeline stub with injectable faults.
// Dependencies: axum, tokio
// ============================================================================

//! ## Overview
//! Shared helpers for plagiarism-e2e integration tests.

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

pub mod pipeline_stub;
